use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Grammar,
    Spelling,
}

/// Rule family that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    ConfusedWord,
    Fragment,
    RunOn,
    PassiveVoice,
    Repetition,
    Capitalization,
    Spacing,
    Misspelling,
}

/// A single grammar or spelling finding.
///
/// `sentence_index` is 1-based over the `". "` sentence split and is `None`
/// for whole-text findings (repetition, phrase misspellings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub category: IssueCategory,
    pub sentence_index: Option<usize>,
    pub term: String,
    pub suggestions: Vec<String>,
    pub severity: Severity,
    pub message: String,
    pub occurrences: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Issue {
    pub(crate) fn grammar(
        category: IssueCategory,
        sentence_index: Option<usize>,
        term: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: IssueKind::Grammar,
            category,
            sentence_index,
            term: term.into(),
            suggestions: Vec::new(),
            severity,
            message: message.into(),
            occurrences: 1,
            context: None,
        }
    }

    pub(crate) fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }
}
