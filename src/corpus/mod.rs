//! Corpus loading and record preparation.
//!
//! Parses a tabular CSV source into a fixed schema, defaulting any missing
//! column or cell to an empty string, and derives one normalized document
//! string per record for the vector space. Records are immutable once
//! loaded; a filtered corpus is a fresh `Corpus` the caller re-fits.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::core::Result;
use crate::text::normalize;

/// Expected dataset columns, in output order. Columns absent from the
/// source are synthesized with empty values rather than rejected.
pub const EXPECTED_COLUMNS: [&str; 9] = [
    "id",
    "title",
    "description",
    "domain",
    "skills_required",
    "difficulty",
    "goal",
    "popularity_score",
    "year",
];

/// Placeholder document for records with no extractable text, so every
/// record contributes at least one term to the vector space.
pub const FALLBACK_DOCUMENT: &str = "untitled project";

/// One row of the project dataset.
#[derive(Debug, Clone, Default)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub domain: String,
    pub skills_required: String,
    pub difficulty: String,
    pub goal: String,
    pub popularity_score: f64,
    pub year: u32,
    /// Derived normalized text indexed by the vector space. Never empty.
    pub document: String,
}

impl ProjectRecord {
    /// Derive the searchable document text. Title contributes twice to
    /// bias term weight toward project names.
    fn derive_document(&self) -> String {
        let title = normalize(&self.title);
        let fields = [
            title.clone(),
            title,
            normalize(&self.description),
            normalize(&self.skills_required),
            normalize(&self.goal),
            normalize(&self.domain),
        ];

        let mut document = String::new();
        for field in fields {
            if field.is_empty() {
                continue;
            }
            if !document.is_empty() {
                document.push(' ');
            }
            document.push_str(&field);
        }

        if document.is_empty() {
            FALLBACK_DOCUMENT.to_string()
        } else {
            document
        }
    }
}

/// Ordered, immutable set of project records with a fixed schema.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<ProjectRecord>,
}

impl Corpus {
    /// Load a corpus from a CSV file on disk.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let corpus = Self::load(file)?;
        debug!(records = corpus.len(), path = %path.display(), "loaded corpus");
        Ok(corpus)
    }

    /// Load a corpus from any CSV reader.
    ///
    /// Missing columns and cells default to empty strings; lenient numeric
    /// parsing defaults to zero. A source that cannot be read as tabular
    /// data at all fails with `Error::DataFormat`.
    pub fn load<R: Read>(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);

        let headers = reader.headers()?.clone();
        let positions: Vec<Option<usize>> = EXPECTED_COLUMNS
            .iter()
            .map(|col| headers.iter().position(|h| h.trim() == *col))
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let cell = |slot: usize| positions[slot].and_then(|i| row.get(i)).unwrap_or("").trim();

            let mut record = ProjectRecord {
                id: cell(0).to_string(),
                title: cell(1).to_string(),
                description: cell(2).to_string(),
                domain: cell(3).to_string(),
                skills_required: cell(4).to_string(),
                difficulty: cell(5).to_string(),
                goal: cell(6).to_string(),
                popularity_score: cell(7).parse().unwrap_or_default(),
                year: cell(8).parse().unwrap_or_default(),
                document: String::new(),
            };
            record.document = record.derive_document();
            records.push(record);
        }

        Ok(Self { records })
    }

    /// Build a corpus from in-memory records, re-deriving each document so
    /// the non-empty-document invariant holds regardless of input.
    pub fn from_records(mut records: Vec<ProjectRecord>) -> Self {
        for record in &mut records {
            record.document = record.derive_document();
        }
        Self { records }
    }

    /// Return a new corpus containing only records matching the given
    /// filters (case-insensitive whole-field match; `None` matches all).
    ///
    /// The result is a fresh corpus: fit a new vector space against it and
    /// swap, rather than mutating anything queries may be reading.
    pub fn filtered(&self, domain: Option<&str>, difficulty: Option<&str>) -> Self {
        let field_matches = |field: &str, want: Option<&str>| {
            want.map_or(true, |w| field.eq_ignore_ascii_case(w.trim()))
        };
        Self {
            records: self
                .records
                .iter()
                .filter(|r| field_matches(&r.domain, domain) && field_matches(&r.difficulty, difficulty))
                .cloned()
                .collect(),
        }
    }

    /// All records, in load order.
    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the corpus holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the record with the given id, if present.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}
