//! Muse - project idea recommendation library.
//!
//! Muse recommends project ideas from a tabular dataset using classical
//! TF-IDF vector-space retrieval: one normalization policy for corpus
//! fields and queries, a capped unigram + bigram vocabulary, and
//! cosine-ranked results guarded by a confidence floor.
//!
//! # Example
//!
//! ```no_run
//! use muse::corpus::Corpus;
//! use muse::engine::Recommender;
//!
//! let corpus = Corpus::load_path("projects.csv").unwrap();
//! let recommender = Recommender::new(corpus).unwrap();
//! let set = recommender.recommend("machine learning python", 5).unwrap();
//! println!("{} matches", set.results.len());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod corpus;
pub mod engine;
pub mod llm;
pub mod output;
pub mod text;

pub use core::{Error, Result};
pub use engine::{Recommendation, RecommendationSet, Recommender};
