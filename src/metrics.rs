//! Structural counts over raw text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::HP;

static SENTENCE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

static PARAGRAPH_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub word_count: usize,
    pub character_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
}

impl TextMetrics {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Mean words per sentence, rounded to one decimal. `0.0` without sentences.
    pub fn avg_words_per_sentence(&self) -> f64 {
        ratio_one_decimal(self.word_count, self.sentence_count)
    }

    /// Mean words per paragraph, rounded to one decimal. `0.0` without paragraphs.
    pub fn avg_words_per_paragraph(&self) -> f64 {
        ratio_one_decimal(self.word_count, self.paragraph_count)
    }

    /// Estimated reading time; at least one minute for any non-empty text.
    pub fn reading_time_minutes(&self) -> usize {
        if self.word_count == 0 {
            0
        } else {
            std::cmp::max(1, self.word_count / HP.words_per_minute)
        }
    }
}

fn ratio_one_decimal(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (numerator as f64 / denominator as f64 * 10.0).round() / 10.0
}

/// Count words, characters, sentences and paragraphs. Never fails.
pub fn extract(text: &str) -> TextMetrics {
    if text.is_empty() {
        return TextMetrics::default();
    }

    let sentence_count = SENTENCE_BREAK_RE
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let paragraph_count = PARAGRAPH_BREAK_RE
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count();

    TextMetrics {
        word_count: crate::text::word_count(text),
        character_count: text.chars().count(),
        sentence_count,
        paragraph_count,
    }
}
