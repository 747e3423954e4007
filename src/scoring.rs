//! Composite quality score and letter grade.
//!
//! Three components, each in `[0, 100]`:
//!
//! - grammar: 100 minus a severity-weighted penalty per issue, floored at 0;
//! - spelling: a step table over misspelling density (occurrences per word);
//! - content: four 25-point buckets for length, paragraphs, sentences and
//!   vocabulary diversity.
//!
//! The overall score is their weighted sum under [`ScoringWeights`].
//! Empty text scores 100 on grammar and spelling (nothing to penalize) and 0
//! on content (nothing written), giving 60.00 overall with the canonical
//! weights.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::issue::{Issue, Severity};
use crate::metrics::TextMetrics;
use crate::readability::ReadabilityResult;
use crate::vocabulary::VocabularyResult;
use crate::HP;

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 100.0;
const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// Relative weight of each component in the overall score. Must be
/// non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub grammar: f64,
    pub spelling: f64,
    pub content: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            grammar: 0.35,
            spelling: 0.25,
            content: 0.40,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> ConfigResult<()> {
        let weights = [self.grammar, self.spelling, self.content];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::Invalid(
                "scoring weights must be finite and non-negative".into(),
            ));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::Invalid(format!(
                "scoring weights must sum to 1, got {sum:.3}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        HP.grade_ladder
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub grammar_score: f64,
    pub spelling_score: f64,
    pub content_score: f64,
    pub overall_score: f64,
    /// Reported alongside the components; not part of the weighting.
    pub readability_score: f64,
    pub grade: Grade,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Clamp to `[0, 100]`, mapping NaN to 0.
pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        SCORE_MIN
    } else {
        value.clamp(SCORE_MIN, SCORE_MAX)
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn severity_penalty(severity: Severity) -> f64 {
    match severity {
        Severity::Low => HP.penalty_low,
        Severity::Medium => HP.penalty_medium,
        Severity::High => HP.penalty_high,
    }
}

fn count_bucket(value: usize, ladder: &[(usize, f64)]) -> f64 {
    ladder
        .iter()
        .find(|(min, _)| value >= *min)
        .map_or(0.0, |(_, points)| *points)
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

pub fn grammar_score(issues: &[Issue]) -> f64 {
    let penalty: f64 = issues.iter().map(|i| severity_penalty(i.severity)).sum();
    clamp_score(SCORE_MAX - penalty)
}

pub fn spelling_score(issues: &[Issue], word_count: usize) -> f64 {
    if word_count == 0 {
        return SCORE_MAX;
    }
    let occurrences: usize = issues.iter().map(|i| i.occurrences.max(1)).sum();
    let density = occurrences as f64 / word_count as f64;
    let score = HP
        .spelling_density_ladder
        .iter()
        .find(|(below, _)| density < *below)
        .map_or(HP.spelling_density_floor, |(_, points)| *points);
    clamp_score(score)
}

pub fn content_score(metrics: &TextMetrics, vocabulary: &VocabularyResult) -> f64 {
    let words = count_bucket(metrics.word_count, HP.content_words_ladder);
    let paragraphs = count_bucket(metrics.paragraph_count, HP.content_paragraphs_ladder);
    let sentences = count_bucket(metrics.sentence_count, HP.content_sentences_ladder);
    let diversity = if metrics.word_count == 0 {
        0.0
    } else {
        HP.content_vocabulary_ladder
            .iter()
            .find(|(above, _)| vocabulary.type_token_ratio > *above)
            .map_or(HP.content_vocabulary_floor, |(_, points)| *points)
    };
    clamp_score(words + paragraphs + sentences + diversity)
}

/// Combine analyzer outputs into a [`ScoreBreakdown`].
pub fn aggregate(
    metrics: &TextMetrics,
    grammar_issues: &[Issue],
    spelling_issues: &[Issue],
    readability: &ReadabilityResult,
    vocabulary: &VocabularyResult,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let grammar = grammar_score(grammar_issues);
    let spelling = spelling_score(spelling_issues, metrics.word_count);
    let content = content_score(metrics, vocabulary);

    let weighted =
        weights.grammar * grammar + weights.spelling * spelling + weights.content * content;
    let overall = round2(clamp_score(weighted));

    ScoreBreakdown {
        grammar_score: round2(grammar),
        spelling_score: round2(spelling),
        content_score: round2(content),
        overall_score: overall,
        readability_score: round2(clamp_score(readability.score)),
        grade: Grade::from_score(overall),
    }
}
