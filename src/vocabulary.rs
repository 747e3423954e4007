//! Lexical diversity via the type-token ratio.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::text::trim_punctuation;
use crate::HP;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarietyBand {
    Good,
    Average,
    NeedsImprovement,
}

impl VarietyBand {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > HP.variety_good_ratio {
            Self::Good
        } else if ratio > HP.variety_average_ratio {
            Self::Average
        } else {
            Self::NeedsImprovement
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyResult {
    pub unique_word_count: usize,
    pub total_word_count: usize,
    pub type_token_ratio: f64,
    pub variety: VarietyBand,
    pub top_terms: Vec<TermCount>,
}

/// Analyze vocabulary keeping the default number of top terms.
pub fn analyze(text: &str) -> VocabularyResult {
    analyze_with_limit(text, HP.top_terms)
}

/// Analyze vocabulary keeping at most `limit` top terms.
///
/// Tokens are whitespace-delimited, trimmed of surrounding punctuation and
/// case-folded. Top terms are ordered by count, ties by first appearance.
pub fn analyze_with_limit(text: &str, limit: usize) -> VocabularyResult {
    let mut terms: Vec<TermCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;

    for token in text.split_whitespace() {
        let term = trim_punctuation(token);
        if term.is_empty() {
            continue;
        }
        total += 1;
        match index.get(&term) {
            Some(&slot) => terms[slot].count += 1,
            None => {
                index.insert(term.clone(), terms.len());
                terms.push(TermCount { term, count: 1 });
            }
        }
    }

    let unique = terms.len();
    let ratio = if total == 0 {
        0.0
    } else {
        unique as f64 / total as f64
    };

    // Stable sort keeps first-seen order among equal counts.
    terms.sort_by(|a, b| b.count.cmp(&a.count));
    terms.truncate(limit);

    VocabularyResult {
        unique_word_count: unique,
        total_word_count: total,
        type_token_ratio: (ratio * 10_000.0).round() / 10_000.0,
        variety: VarietyBand::from_ratio(ratio),
        top_terms: terms,
    }
}
