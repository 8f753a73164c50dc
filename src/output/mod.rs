//! Output formatters for recommendation results.

use std::io::Write;

use colored::Colorize;

use crate::core::Result;
use crate::engine::RecommendationSet;

/// Column order for CSV export: the record fields plus the score.
const CSV_HEADER: [&str; 10] = [
    "id",
    "title",
    "description",
    "domain",
    "skills_required",
    "difficulty",
    "goal",
    "popularity_score",
    "year",
    "similarity_score",
];

/// Output format enum.
#[derive(Clone, Copy, Debug, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
    Markdown,
    Csv,
}

impl Format {
    /// Write a result set to `writer` in this format.
    pub fn write<W: Write>(&self, set: &RecommendationSet, writer: &mut W) -> Result<()> {
        match self {
            Format::Text => write_text(set, writer),
            Format::Json => write_json(set, writer),
            Format::Markdown => write_markdown(set, writer),
            Format::Csv => write_csv(set, writer),
        }
    }
}

fn write_json<W: Write>(set: &RecommendationSet, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, set)?;
    writeln!(writer)?;
    Ok(())
}

fn write_text<W: Write>(set: &RecommendationSet, writer: &mut W) -> Result<()> {
    if set.results.is_empty() {
        writeln!(writer, "No recommendations for \"{}\".", set.query)?;
        return Ok(());
    }

    writeln!(
        writer,
        "{} result(s) for \"{}\" ({} records searched)\n",
        set.results.len(),
        set.query,
        set.total_records
    )?;

    for r in &set.results {
        writeln!(writer, "{}  {}", r.title.bold(), format!("[{:.3}]", r.similarity_score).dimmed())?;
        writeln!(
            writer,
            "  {}",
            format!(
                "{} | {} | popularity {:.1} | {}",
                r.domain, r.difficulty, r.popularity_score, r.year
            )
            .dimmed()
        )?;
        if !r.description.is_empty() {
            writeln!(writer, "  {}", r.description)?;
        }
        if !r.skills_required.is_empty() {
            writeln!(writer, "  Skills: {}", r.skills_required)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn write_markdown<W: Write>(set: &RecommendationSet, writer: &mut W) -> Result<()> {
    writeln!(writer, "# Recommendations for \"{}\"\n", set.query)?;
    if set.results.is_empty() {
        writeln!(writer, "_No matches_")?;
        return Ok(());
    }

    writeln!(writer, "| Title | Domain | Difficulty | Skills | Year | Score |")?;
    writeln!(writer, "| --- | --- | --- | --- | --- | --- |")?;
    for r in &set.results {
        writeln!(
            writer,
            "| {} | {} | {} | {} | {} | {:.3} |",
            escape_cell(&r.title),
            escape_cell(&r.domain),
            escape_cell(&r.difficulty),
            escape_cell(&r.skills_required),
            r.year,
            r.similarity_score
        )?;
    }
    writeln!(writer)?;
    Ok(())
}

fn write_csv<W: Write>(set: &RecommendationSet, writer: &mut W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(&mut *writer);
    csv_writer.write_record(CSV_HEADER)?;
    for r in &set.results {
        let popularity = r.popularity_score.to_string();
        let year = r.year.to_string();
        let score = format!("{:.3}", r.similarity_score);
        csv_writer.write_record([
            r.id.as_str(),
            r.title.as_str(),
            r.description.as_str(),
            r.domain.as_str(),
            r.skills_required.as_str(),
            r.difficulty.as_str(),
            r.goal.as_str(),
            popularity.as_str(),
            year.as_str(),
            score.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn escape_cell(field: &str) -> String {
    field.replace('|', "\\|")
}
