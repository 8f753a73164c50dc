//! Query scoring, ranking, and the confidence floor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Error, Result};
use crate::corpus::{Corpus, ProjectRecord};

use super::vector_space::VectorSpace;

/// Scores at or below this floor are treated as noise rather than matches.
pub const SCORE_FLOOR: f32 = 0.01;

/// Sentinel similarity forcing a record below every real cosine score.
const SELF_SIMILARITY: f32 = -1.0;

/// One recommended record with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub domain: String,
    pub skills_required: String,
    pub difficulty: String,
    pub goal: String,
    pub popularity_score: f64,
    pub year: u32,
    /// Cosine similarity against the query, rounded to 3 decimals.
    pub similarity_score: f32,
}

impl Recommendation {
    fn new(record: &ProjectRecord, score: f32) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            domain: record.domain.clone(),
            skills_required: record.skills_required.clone(),
            difficulty: record.difficulty.clone(),
            goal: record.goal.clone(),
            popularity_score: record.popularity_score,
            year: record.year,
            similarity_score: round3(score),
        }
    }
}

/// Ordered result set for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// The query text (or seed record id for similarity lookups).
    pub query: String,
    /// Number of records searched.
    pub total_records: usize,
    /// Results in descending score order.
    pub results: Vec<Recommendation>,
}

impl RecommendationSet {
    fn new(query: &str, total_records: usize, results: Vec<Recommendation>) -> Self {
        Self {
            query: query.to_string(),
            total_records,
            results,
        }
    }
}

/// Recommendation engine: an immutable corpus plus its fitted vector space.
///
/// Instances are read-only after construction, so they can be shared across
/// threads. Rebuilding after a corpus change means constructing a new
/// `Recommender` and swapping it in; in-flight queries keep a consistent
/// snapshot.
pub struct Recommender {
    corpus: Corpus,
    space: VectorSpace,
}

impl Recommender {
    /// Fit a vector space over the corpus and wrap both for querying.
    pub fn new(corpus: Corpus) -> Result<Self> {
        let space = VectorSpace::fit(&corpus)?;
        Ok(Self { corpus, space })
    }

    /// The corpus this engine serves.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The fitted vector space.
    pub fn vector_space(&self) -> &VectorSpace {
        &self.space
    }

    /// Rank the corpus against a free-text query.
    ///
    /// Degenerate query text never errors: it projects to a zero vector,
    /// every score is zero, and the floor fallback keeps the top results.
    pub fn recommend(&self, query: &str, top_n: usize) -> Result<RecommendationSet> {
        if top_n == 0 {
            return Err(Error::InvalidArgument("top_n must be positive".to_string()));
        }
        if self.corpus.is_empty() {
            return Ok(RecommendationSet::new(query, 0, Vec::new()));
        }

        let probe = self.space.embed_query(query);
        let scores = self.space.score_all(&probe);
        let results = rank(&scores, &self.corpus, top_n, None);
        debug!(query, returned = results.len(), "recommend");

        Ok(RecommendationSet::new(query, self.corpus.len(), results))
    }

    /// Rank the corpus against an existing record's own document vector.
    ///
    /// The seed record never appears in its own results. An unknown id is
    /// recoverable: it yields an empty result set rather than an error.
    pub fn similar_to(&self, record_id: &str, top_n: usize) -> Result<RecommendationSet> {
        if top_n == 0 {
            return Err(Error::InvalidArgument("top_n must be positive".to_string()));
        }

        match self.ranked_similar(record_id, top_n) {
            Ok(results) => Ok(RecommendationSet::new(record_id, self.corpus.len(), results)),
            Err(Error::RecordNotFound { id }) => {
                debug!(id = %id, "similar_to on unknown record");
                Ok(RecommendationSet::new(record_id, self.corpus.len(), Vec::new()))
            }
            Err(e) => Err(e),
        }
    }

    fn ranked_similar(&self, record_id: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        let seed = self
            .corpus
            .position_of(record_id)
            .ok_or_else(|| Error::record_not_found(record_id))?;
        let probe = self
            .space
            .doc_vector(seed)
            .ok_or_else(|| Error::record_not_found(record_id))?;

        let mut scores = self.space.score_all(probe);
        scores[seed] = SELF_SIMILARITY;
        Ok(rank(&scores, &self.corpus, top_n, Some(seed)))
    }
}

/// Stable descending sort, top-n cut, then the confidence floor.
///
/// Ties keep corpus order. If the floor would discard every candidate the
/// unfloored top-n is kept instead, so a computed result set is never
/// empty. `exclude` drops a seed record before ranking so the floor
/// fallback cannot resurrect it.
fn rank(scores: &[f32], corpus: &Corpus, top_n: usize, exclude: Option<usize>) -> Vec<Recommendation> {
    let mut order: Vec<usize> = (0..scores.len())
        .filter(|i| Some(*i) != exclude)
        .collect();
    // sort_by is stable, so equal scores preserve corpus order
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(top_n);

    let confident: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| scores[i] > SCORE_FLOOR)
        .collect();
    let kept = if confident.is_empty() { order } else { confident };

    kept.into_iter()
        .map(|i| Recommendation::new(&corpus.records()[i], scores[i]))
        .collect()
}

fn round3(score: f32) -> f32 {
    (score * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::ProjectRecord;

    fn record(id: &str, title: &str, domain: &str, skills: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            title: title.to_string(),
            domain: domain.to_string(),
            skills_required: skills.to_string(),
            ..ProjectRecord::default()
        }
    }

    fn recommender() -> Recommender {
        Recommender::new(Corpus::from_records(vec![
            record("p1", "Web Dashboard", "Web", "React, CSS"),
            record("p2", "ML Classifier", "AI", "Python, scikit-learn"),
            record("p3", "IoT Sensor Hub", "IoT", "C, MQTT"),
        ]))
        .unwrap()
    }

    #[test]
    fn test_recommend_ranks_best_match_first() {
        let set = recommender().recommend("machine learning python", 2).unwrap();
        assert!(set.results.len() <= 2);
        assert_eq!(set.results[0].id, "p2");
        assert!(set.results[0].similarity_score > 0.0);
    }

    #[test]
    fn test_recommend_scores_descend() {
        let set = recommender().recommend("sensor dashboard python", 3).unwrap();
        for pair in set.results.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
    }

    #[test]
    fn test_recommend_punctuation_query_falls_back_to_top_n() {
        let set = recommender().recommend("!!!???", 2).unwrap();
        assert_eq!(set.results.len(), 2);
        assert!(set.results.iter().all(|r| r.similarity_score == 0.0));
    }

    #[test]
    fn test_recommend_top_n_exceeding_corpus_returns_all() {
        let set = recommender().recommend("web", 50).unwrap();
        assert!(set.results.len() <= 3);
    }

    #[test]
    fn test_recommend_zero_top_n_is_invalid() {
        let err = recommender().recommend("web", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_recommend_empty_corpus_returns_empty_set() {
        let rec = Recommender::new(Corpus::default()).unwrap();
        let set = rec.recommend("anything", 5).unwrap();
        assert!(set.results.is_empty());
        assert_eq!(set.total_records, 0);
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let rec = recommender();
        let a = rec.recommend("python sensors", 3).unwrap();
        let b = rec.recommend("python sensors", 3).unwrap();
        let ids_a: Vec<_> = a.results.iter().map(|r| (&r.id, r.similarity_score)).collect();
        let ids_b: Vec<_> = b.results.iter().map(|r| (&r.id, r.similarity_score)).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_scores_rounded_to_three_decimals() {
        let set = recommender().recommend("machine learning", 3).unwrap();
        for r in &set.results {
            let scaled = r.similarity_score * 1000.0;
            assert!((scaled - scaled.round()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_similar_to_excludes_seed() {
        let set = recommender().similar_to("p2", 3).unwrap();
        assert!(set.results.iter().all(|r| r.id != "p2"));
    }

    #[test]
    fn test_similar_to_excludes_seed_even_when_all_scores_weak() {
        // No shared vocabulary between records: every cross score is 0 and
        // the floor fallback kicks in. The seed must still be absent.
        let rec = Recommender::new(Corpus::from_records(vec![
            record("a", "alpha apple", "", ""),
            record("b", "beta banana", "", ""),
            record("c", "gamma grape", "", ""),
        ]))
        .unwrap();
        let set = rec.similar_to("a", 10).unwrap();
        assert!(!set.results.is_empty());
        assert!(set.results.iter().all(|r| r.id != "a"));
    }

    #[test]
    fn test_similar_to_unknown_id_yields_empty_set() {
        let set = recommender().similar_to("zzz999", 5).unwrap();
        assert!(set.results.is_empty());
        assert_eq!(set.total_records, 3);
    }

    #[test]
    fn test_similar_to_finds_related_record() {
        let rec = Recommender::new(Corpus::from_records(vec![
            record("p1", "Python Web Scraper", "Data", "Python, requests"),
            record("p2", "Python Data Pipeline", "Data", "Python, pandas"),
            record("p3", "Arduino Weather Station", "IoT", "C++"),
        ]))
        .unwrap();
        let set = rec.similar_to("p1", 1).unwrap();
        assert_eq!(set.results[0].id, "p2");
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(0.9996), 1.0);
        assert_eq!(round3(0.0), 0.0);
    }
}
