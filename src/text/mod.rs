//! Text normalization and tokenization.
//!
//! One normalization policy, applied uniformly to corpus fields and query
//! strings: lowercase, keep only `[a-z0-9]`, whitespace, and hyphens, and
//! collapse runs of everything else into single spaces. Hyphens survive so
//! compound terms like "ai-powered" stay single tokens.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// English stop words excluded from the vocabulary.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "may",
    "me", "might", "more", "most", "must", "my", "no", "nor", "not", "now", "of", "off",
    "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own", "same",
    "shall", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
    "yours", "yourself",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Normalize free text for indexing or querying.
///
/// Lowercases, replaces every character outside `{a-z, 0-9, whitespace, -}`
/// with a space, collapses consecutive whitespace, and trims. Pure and
/// idempotent: `normalize(normalize(s)) == normalize(s)`.
///
/// # Examples
///
/// ```
/// use muse::text::normalize;
///
/// assert_eq!(normalize("  AI-Powered   Chatbot! "), "ai-powered chatbot");
/// assert_eq!(normalize("!!!???"), "");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        let ch = ch.to_ascii_lowercase();
        if matches!(ch, 'a'..='z' | '0'..='9' | '-') {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }
    out
}

/// Split text into stop-word-filtered lowercase unigrams plus contiguous
/// bigrams. Input is normalized first, so corpus documents and queries
/// share one token space.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let words: Vec<&str> = normalized
        .split_whitespace()
        .filter(|w| !STOP_WORD_SET.contains(*w))
        .collect();

    let mut tokens: Vec<String> = words.iter().map(|w| (*w).to_string()).collect();
    for pair in words.windows(2) {
        tokens.push(format!("{} {}", pair[0], pair[1]));
    }
    tokens
}

/// True if `word` is on the stop-word list.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}
