use proptest::prelude::*;

use muse::corpus::{Corpus, ProjectRecord};
use muse::engine::Recommender;
use muse::text::normalize;

fn record(id: &str, title: &str, skills: &str, goal: &str) -> ProjectRecord {
    ProjectRecord {
        id: id.to_string(),
        title: title.to_string(),
        skills_required: skills.to_string(),
        goal: goal.to_string(),
        ..ProjectRecord::default()
    }
}

fn fixture_recommender() -> Recommender {
    Recommender::new(Corpus::from_records(vec![
        record("p1", "Web Dashboard", "React, CSS", "Learn frontend"),
        record("p2", "ML Classifier", "Python, scikit-learn", "Learn machine learning"),
        record("p3", "IoT Sensor Hub", "C, MQTT", "Build hardware skills"),
        record("p4", "Recipe Finder", "JavaScript, Node.js", "Ship a full-stack app"),
        record("p5", "Stock Price Predictor", "Python, pandas", "Apply regression models"),
    ]))
    .expect("fixture corpus fits")
}

// ---------------------------------------------------------------------------
// Normalizer properties
// ---------------------------------------------------------------------------

proptest! {
    /// normalize(normalize(s)) == normalize(s) for all strings.
    #[test]
    fn normalize_is_idempotent(s in ".*") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Output contains only lowercase alphanumerics, single spaces, and hyphens,
    /// with no leading/trailing whitespace.
    #[test]
    fn normalize_output_charset(s in ".*") {
        let out = normalize(&s);
        prop_assert!(out.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-' | ' ')));
        prop_assert!(!out.starts_with(' '));
        prop_assert!(!out.ends_with(' '));
        prop_assert!(!out.contains("  "));
    }
}

// ---------------------------------------------------------------------------
// Query engine properties
// ---------------------------------------------------------------------------

proptest! {
    /// Identical inputs produce identical ordered output.
    #[test]
    fn recommend_is_deterministic(query in "[a-zA-Z ,!?-]{0,60}", top_n in 1usize..10) {
        let rec = fixture_recommender();
        let a = rec.recommend(&query, top_n).unwrap();
        let b = rec.recommend(&query, top_n).unwrap();
        let flat_a: Vec<_> = a.results.iter().map(|r| (r.id.clone(), r.similarity_score)).collect();
        let flat_b: Vec<_> = b.results.iter().map(|r| (r.id.clone(), r.similarity_score)).collect();
        prop_assert_eq!(flat_a, flat_b);
    }

    /// Scores never increase down the ranking.
    #[test]
    fn recommend_scores_are_monotone(query in "[a-zA-Z ]{0,60}", top_n in 1usize..10) {
        let rec = fixture_recommender();
        let set = rec.recommend(&query, top_n).unwrap();
        for pair in set.results.windows(2) {
            prop_assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
    }

    /// Result size never exceeds min(top_n, corpus size).
    #[test]
    fn recommend_respects_bound(query in "[a-zA-Z ]{0,60}", top_n in 1usize..20) {
        let rec = fixture_recommender();
        let set = rec.recommend(&query, top_n).unwrap();
        prop_assert!(set.results.len() <= top_n.min(rec.corpus().len()));
    }

    /// If any candidate scored above zero, the floor never empties the result.
    #[test]
    fn confidence_floor_never_empties_results(query in "[a-zA-Z ]{1,60}", top_n in 1usize..10) {
        let rec = fixture_recommender();
        let set = rec.recommend(&query, top_n).unwrap();
        prop_assert!(!set.results.is_empty());
    }

    /// A record is never similar to itself.
    #[test]
    fn similar_to_never_returns_seed(idx in 0usize..5, top_n in 1usize..10) {
        let rec = fixture_recommender();
        let id = rec.corpus().records()[idx].id.clone();
        let set = rec.similar_to(&id, top_n).unwrap();
        prop_assert!(set.results.iter().all(|r| r.id != id));
    }
}

// ---------------------------------------------------------------------------
// Fixed examples
// ---------------------------------------------------------------------------

#[test]
fn empty_corpus_recommend_is_empty_and_ok() {
    let rec = Recommender::new(Corpus::default()).unwrap();
    let set = rec.recommend("anything at all", 5).unwrap();
    assert!(set.results.is_empty());
}

#[test]
fn ml_query_ranks_classifier_first() {
    let rec = fixture_recommender();
    let set = rec.recommend("machine learning python", 2).unwrap();
    assert!(set.results.len() <= 2);
    assert_eq!(set.results[0].id, "p2");
    let top_score = set.results[0].similarity_score;
    assert!(set.results.iter().all(|r| r.similarity_score <= top_score));
}

#[test]
fn punctuation_query_returns_top_n_at_zero() {
    let rec = fixture_recommender();
    let set = rec.recommend("!!!???", 3).unwrap();
    assert_eq!(set.results.len(), 3);
    assert!(set.results.iter().all(|r| r.similarity_score == 0.0));
}

#[test]
fn unknown_id_similar_is_empty_not_error() {
    let rec = fixture_recommender();
    let set = rec.similar_to("zzz999", 5).unwrap();
    assert!(set.results.is_empty());
}
