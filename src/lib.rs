//! Deterministic heuristic analysis, scoring and ranking for submitted essays.
//!
//! The pipeline runs leaves first:
//!
//! 1. [`metrics`] counts words, characters, sentences and paragraphs.
//! 2. [`grammar`], [`spelling`], [`readability`] and [`vocabulary`] each run
//!    independently over the same text.
//! 3. [`scoring`] folds everything into a [`ScoreBreakdown`] and letter grade.
//! 4. [`ranking`] turns per-user aggregates into a leaderboard snapshot.
//!
//! Every function here is total: degenerate input degrades to documented
//! defaults instead of failing, and identical input always yields identical
//! output.
//!
//! ```
//! let report = essay_score::evaluate("Their going to the store.");
//! assert_eq!(report.analysis.grammar_issues.len(), 1);
//! assert!(report.score.overall_score <= 100.0);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod feedback;
pub mod grammar;
pub mod issue;
pub mod metrics;
pub mod ranking;
pub mod readability;
pub mod scoring;
pub mod spelling;
pub mod vocabulary;

mod text;

pub use config::{Confusion, EngineConfig, RuleTables};
pub use error::{ConfigError, ConfigResult};
pub use issue::{Issue, IssueCategory, IssueKind, Severity};
pub use metrics::TextMetrics;
pub use ranking::{LeaderboardEntry, RankingPolicy, UserAggregate};
pub use readability::{ReadabilityBand, ReadabilityResult};
pub use scoring::{Grade, ScoreBreakdown, ScoringWeights};
pub use vocabulary::{TermCount, VarietyBand, VocabularyResult};

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

/// Fixed thresholds of the heuristics. Tunable values that deployments are
/// expected to change live in [`EngineConfig`] instead.
pub(crate) struct Hyperparameters {
    pub fragment_max_tokens: usize,
    pub run_on_min_tokens: usize,
    pub repetition_min_chars: usize,
    pub repetition_min_count: usize,
    pub spelling_context_tokens: usize,
    pub context_window_chars: usize,
    pub spelling_medium_occurrences: usize,
    pub spelling_high_occurrences: usize,
    pub readability_default: f64,
    pub top_terms: usize,
    pub words_per_minute: usize,
    pub variety_good_ratio: f64,
    pub variety_average_ratio: f64,
    pub penalty_low: f64,
    pub penalty_medium: f64,
    pub penalty_high: f64,
    pub spelling_density_ladder: &'static [(f64, f64)],
    pub spelling_density_floor: f64,
    pub content_words_ladder: &'static [(usize, f64)],
    pub content_paragraphs_ladder: &'static [(usize, f64)],
    pub content_sentences_ladder: &'static [(usize, f64)],
    pub content_vocabulary_ladder: &'static [(f64, f64)],
    pub content_vocabulary_floor: f64,
    pub grade_ladder: &'static [(f64, Grade)],
    pub advice_min_words: usize,
    pub advice_long_sentence_words: f64,
    pub advice_short_sentence_words: f64,
    pub advice_min_paragraphs: usize,
}

pub(crate) static HP: Hyperparameters = Hyperparameters {
    fragment_max_tokens: 2,
    run_on_min_tokens: 51,
    repetition_min_chars: 4,
    repetition_min_count: 4,
    spelling_context_tokens: 2,
    context_window_chars: 60,
    spelling_medium_occurrences: 2,
    spelling_high_occurrences: 4,
    readability_default: 50.0,
    top_terms: 10,
    words_per_minute: 200,
    variety_good_ratio: 0.6,
    variety_average_ratio: 0.4,
    penalty_low: 3.0,
    penalty_medium: 5.0,
    penalty_high: 8.0,
    spelling_density_ladder: &[
        (0.005, 100.0),
        (0.01, 95.0),
        (0.02, 85.0),
        (0.03, 75.0),
        (0.04, 65.0),
        (0.05, 60.0),
    ],
    spelling_density_floor: 55.0,
    content_words_ladder: &[(500, 25.0), (300, 20.0), (150, 12.0), (50, 6.0)],
    content_paragraphs_ladder: &[(5, 25.0), (3, 20.0), (2, 10.0), (1, 5.0)],
    content_sentences_ladder: &[(15, 25.0), (8, 18.0), (4, 10.0), (1, 5.0)],
    content_vocabulary_ladder: &[(0.6, 25.0), (0.4, 18.0), (0.25, 10.0)],
    content_vocabulary_floor: 5.0,
    grade_ladder: &[
        (90.0, Grade::APlus),
        (85.0, Grade::A),
        (80.0, Grade::AMinus),
        (75.0, Grade::BPlus),
        (70.0, Grade::B),
        (65.0, Grade::BMinus),
        (60.0, Grade::CPlus),
        (55.0, Grade::C),
        (50.0, Grade::CMinus),
        (40.0, Grade::D),
    ],
    advice_min_words: 300,
    advice_long_sentence_words: 25.0,
    advice_short_sentence_words: 10.0,
    advice_min_paragraphs: 3,
};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Text handed over by the host application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub text: String,
    #[serde(default)]
    pub language_tag: Option<String>,
}

impl AnalysisInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_tag: None,
        }
    }

    pub fn with_language(mut self, tag: impl Into<String>) -> Self {
        self.language_tag = Some(tag.into());
        self
    }
}

/// Output of every analyzer for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub language_tag: Option<String>,
    pub metrics: TextMetrics,
    pub grammar_issues: Vec<Issue>,
    pub spelling_issues: Vec<Issue>,
    pub readability: ReadabilityResult,
    pub vocabulary: VocabularyResult,
}

/// Analysis, score and writing advice for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub analysis: Analysis,
    pub score: ScoreBreakdown,
    pub advice: Vec<String>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Analysis engine bound to one immutable [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run every analyzer over `input.text`.
    #[tracing::instrument(skip_all, fields(text_len = input.text.len()))]
    pub fn analyze(&self, input: &AnalysisInput) -> Analysis {
        let text = input.text.as_str();
        let metrics = metrics::extract(text);
        let grammar_issues = grammar::check(text, &self.config.tables);
        let spelling_issues = spelling::check(text, &self.config.tables);
        let readability = readability::analyze(text, &metrics);
        let vocabulary = vocabulary::analyze(text);

        tracing::debug!(
            words = metrics.word_count,
            grammar = grammar_issues.len(),
            spelling = spelling_issues.len(),
            readability = readability.score,
            "analysis complete"
        );

        Analysis {
            language_tag: input.language_tag.clone(),
            metrics,
            grammar_issues,
            spelling_issues,
            readability,
            vocabulary,
        }
    }

    /// Fold analyzer outputs into a [`ScoreBreakdown`] using the configured
    /// weights.
    pub fn score(
        &self,
        metrics: &TextMetrics,
        grammar_issues: &[Issue],
        spelling_issues: &[Issue],
        readability: &ReadabilityResult,
        vocabulary: &VocabularyResult,
    ) -> ScoreBreakdown {
        scoring::aggregate(
            metrics,
            grammar_issues,
            spelling_issues,
            readability,
            vocabulary,
            &self.config.weights,
        )
    }

    /// Analyze, score and advise in one pass.
    pub fn evaluate(&self, input: &AnalysisInput) -> Report {
        let analysis = self.analyze(input);
        let score = self.score(
            &analysis.metrics,
            &analysis.grammar_issues,
            &analysis.spelling_issues,
            &analysis.readability,
            &analysis.vocabulary,
        );
        let advice = feedback::advise(
            &analysis.metrics,
            &analysis.readability,
            &analysis.vocabulary,
        );
        Report {
            analysis,
            score,
            advice,
        }
    }

    /// Rank a consistent snapshot of per-user aggregates.
    #[tracing::instrument(skip_all, fields(users = aggregates.len()))]
    pub fn recompute_leaderboard(&self, aggregates: &[UserAggregate]) -> Vec<LeaderboardEntry> {
        let entries = ranking::rank(aggregates, &self.config.ranking);
        tracing::debug!(ranked = entries.len(), "leaderboard recomputed");
        entries
    }
}

static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::default);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyze `text` with the built-in tables.
pub fn analyze(text: &str) -> Analysis {
    DEFAULT_ENGINE.analyze(&AnalysisInput::new(text))
}

/// Score analyzer outputs with the canonical weights.
pub fn score(
    metrics: &TextMetrics,
    grammar_issues: &[Issue],
    spelling_issues: &[Issue],
    readability: &ReadabilityResult,
    vocabulary: &VocabularyResult,
) -> ScoreBreakdown {
    DEFAULT_ENGINE.score(
        metrics,
        grammar_issues,
        spelling_issues,
        readability,
        vocabulary,
    )
}

/// Analyze, score and advise with the built-in configuration.
pub fn evaluate(text: &str) -> Report {
    DEFAULT_ENGINE.evaluate(&AnalysisInput::new(text))
}

/// Rank aggregates with the default [`RankingPolicy`].
pub fn recompute_leaderboard(aggregates: &[UserAggregate]) -> Vec<LeaderboardEntry> {
    DEFAULT_ENGINE.recompute_leaderboard(aggregates)
}
