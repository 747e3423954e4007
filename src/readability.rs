//! Flesch Reading Ease estimate.
//!
//! `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`,
//! clamped to `[0, 100]`. Word and sentence counts come from
//! [`TextMetrics`]; syllables use a vowel-group heuristic.

use serde::{Deserialize, Serialize};

use crate::metrics::TextMetrics;
use crate::text::letters_only;
use crate::HP;

/// Ordinal readability band, easiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadabilityBand {
    VeryEasy,
    Easy,
    FairlyEasy,
    Standard,
    FairlyDifficult,
    Difficult,
    VeryDifficult,
}

impl ReadabilityBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::VeryEasy
        } else if score >= 80.0 {
            Self::Easy
        } else if score >= 70.0 {
            Self::FairlyEasy
        } else if score >= 60.0 {
            Self::Standard
        } else if score >= 50.0 {
            Self::FairlyDifficult
        } else if score >= 30.0 {
            Self::Difficult
        } else {
            Self::VeryDifficult
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryEasy => "very easy",
            Self::Easy => "easy",
            Self::FairlyEasy => "fairly easy",
            Self::Standard => "standard",
            Self::FairlyDifficult => "fairly difficult",
            Self::Difficult => "difficult",
            Self::VeryDifficult => "very difficult",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityResult {
    pub score: f64,
    pub band: ReadabilityBand,
    pub avg_sentence_length: f64,
}

impl ReadabilityResult {
    fn neutral() -> Self {
        Self {
            score: HP.readability_default,
            band: ReadabilityBand::from_score(HP.readability_default),
            avg_sentence_length: 0.0,
        }
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Approximate syllables in one word. Tokens without letters count zero;
/// every other word counts at least one.
pub fn count_syllables(word: &str) -> usize {
    let chars: Vec<char> = letters_only(word).chars().collect();
    let Some(&first) = chars.first() else {
        return 0;
    };

    let mut count = usize::from(is_vowel(first));
    count += chars
        .windows(2)
        .filter(|pair| is_vowel(pair[1]) && !is_vowel(pair[0]))
        .count();

    let n = chars.len();
    if chars[n - 1] == 'e' {
        count = count.saturating_sub(1);
    }
    if n > 2 && chars[n - 2] == 'l' && chars[n - 1] == 'e' && !is_vowel(chars[n - 3]) {
        count += 1;
    }
    count.max(1)
}

/// Estimate readability of `text`. Returns the neutral default (score 50)
/// when there are no words or no sentences.
pub fn analyze(text: &str, metrics: &TextMetrics) -> ReadabilityResult {
    let words = metrics.word_count;
    let sentences = metrics.sentence_count;
    if words == 0 || sentences == 0 {
        return ReadabilityResult::neutral();
    }

    let syllables: usize = text.split_whitespace().map(count_syllables).sum();
    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    let raw = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    let score = (raw.clamp(0.0, 100.0) * 100.0).round() / 100.0;

    ReadabilityResult {
        score,
        band: ReadabilityBand::from_score(score),
        avg_sentence_length: (words_per_sentence * 100.0).round() / 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllables_follow_vowel_groups() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("reading"), 2);
        assert_eq!(count_syllables("beautiful"), 3);
    }

    #[test]
    fn trailing_e_and_le_adjustments() {
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("the"), 1);
    }

    #[test]
    fn letterless_tokens_have_no_syllables() {
        assert_eq!(count_syllables("--"), 0);
        assert_eq!(count_syllables("1999"), 0);
    }
}
