//! Heuristic grammar checks.
//!
//! Text is split into sentences on `". "`. Each sentence goes through the
//! confused-word table, the fragment and run-on length checks, and the
//! declarative [`PATTERN_RULES`]. Word repetition is checked once over the
//! whole text, after every per-sentence rule.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Match, Regex};

use crate::config::RuleTables;
use crate::issue::{Issue, IssueCategory, Severity};
use crate::text::{checker_sentences, letters_only, trim_punctuation};
use crate::HP;

// ---------------------------------------------------------------------------
// Declarative pattern rules
// ---------------------------------------------------------------------------

/// Characters allowed right after a standalone pronoun `i`.
const PRONOUN_FOLLOWERS: &str = ",;:!?'.";

/// How the characters around a regex match decide whether it counts.
/// `regex` has no lookaround, so neighbours are checked after matching.
#[derive(Clone, Copy)]
enum MatchContext {
    /// Every match counts; the term is the trimmed match.
    Any,
    /// Whitespace (or the start) before, whitespace, the end or one of
    /// [`PRONOUN_FOLLOWERS`] after.
    StandaloneWord,
    /// Non-whitespace on both sides; the term includes both neighbours.
    BetweenWords,
}

impl MatchContext {
    fn term(self, sentence: &str, m: &Match<'_>) -> Option<String> {
        let before = sentence[..m.start()].chars().next_back();
        let after = sentence[m.end()..].chars().next();
        match self {
            Self::Any => Some(m.as_str().trim().to_string()),
            Self::StandaloneWord => {
                let open = before.map_or(true, char::is_whitespace);
                let close =
                    after.map_or(true, |c| c.is_whitespace() || PRONOUN_FOLLOWERS.contains(c));
                (open && close).then(|| m.as_str().to_string())
            }
            Self::BetweenWords => match (before, after) {
                (Some(b), Some(a)) if !b.is_whitespace() && !a.is_whitespace() => {
                    Some(format!("{b}{}{a}", m.as_str()))
                }
                _ => None,
            },
        }
    }
}

/// One regex heuristic. A match accepted by `context` emits an issue whose
/// message is `message` with `{match}` replaced by the term.
struct PatternRule {
    pattern: Regex,
    context: MatchContext,
    category: IssueCategory,
    severity: Severity,
    message: &'static str,
    suggestion: Option<&'static str>,
}

impl PatternRule {
    fn new(
        pattern: &str,
        context: MatchContext,
        category: IssueCategory,
        severity: Severity,
        message: &'static str,
        suggestion: Option<&'static str>,
    ) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            context,
            category,
            severity,
            message,
            suggestion,
        }
    }
}

static PATTERN_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(
            r"(?i)\b(?:am|is|are|was|were|be|been|being)\s+[a-z]+ed\b",
            MatchContext::Any,
            IssueCategory::PassiveVoice,
            Severity::Low,
            "Possible passive voice: '{match}'. Consider an active construction.",
            None,
        ),
        PatternRule::new(
            r"\bi\b",
            MatchContext::StandaloneWord,
            IssueCategory::Capitalization,
            Severity::Medium,
            "Use capital \"I\" when referring to yourself.",
            Some("I"),
        ),
        PatternRule::new(
            r" {2,}",
            MatchContext::BetweenWords,
            IssueCategory::Spacing,
            Severity::Low,
            "Avoid double spaces: '{match}'.",
            Some("Use a single space"),
        ),
    ]
});

/// True when `word` opens with a pronoun `i` the pattern rules already report.
fn starts_with_pronoun(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next() == Some('i') && chars.next().map_or(true, |c| PRONOUN_FOLLOWERS.contains(c))
}

// ---------------------------------------------------------------------------
// Rule implementations
// ---------------------------------------------------------------------------

fn rule_confused_words(tokens: &[&str], index: usize, tables: &RuleTables) -> Vec<Issue> {
    let mut out = Vec::new();
    for token in tokens {
        let cleaned = letters_only(token);
        let Some(confusion) = tables.confusions.get(&cleaned) else {
            continue;
        };
        // "it's" folds to "its"; a token already written as a suggestion is fine.
        let as_written = trim_punctuation(token);
        if confusion.suggestions.iter().any(|s| *s == as_written) {
            continue;
        }
        let first = confusion
            .suggestions
            .first()
            .map(String::as_str)
            .unwrap_or_default();
        out.push(
            Issue::grammar(
                IssueCategory::ConfusedWord,
                Some(index),
                *token,
                confusion.severity,
                format!("Commonly confused: {cleaned} vs {first}"),
            )
            .with_suggestions(confusion.suggestions.iter().cloned()),
        );
    }
    out
}

fn rule_sentence_length(sentence: &str, tokens: &[&str], index: usize) -> Vec<Issue> {
    let mut out = Vec::new();
    if tokens.len() <= HP.fragment_max_tokens {
        out.push(Issue::grammar(
            IssueCategory::Fragment,
            Some(index),
            sentence.trim(),
            Severity::Medium,
            "Possible sentence fragment. Consider expanding this thought into a complete sentence.",
        ));
    }
    if tokens.len() >= HP.run_on_min_tokens {
        let preview = format!("{}...", tokens[..8].join(" "));
        out.push(Issue::grammar(
            IssueCategory::RunOn,
            Some(index),
            preview,
            Severity::Medium,
            format!(
                "Long sentence ({} words), possibly a run-on. Consider breaking it into shorter sentences.",
                tokens.len()
            ),
        ));
    }
    out
}

fn rule_patterns(sentence: &str, index: usize) -> Vec<Issue> {
    let mut out = Vec::new();
    for rule in PATTERN_RULES.iter() {
        for m in rule.pattern.find_iter(sentence) {
            let Some(term) = rule.context.term(sentence, &m) else {
                continue;
            };
            let message = rule.message.replace("{match}", &term);
            let mut issue =
                Issue::grammar(rule.category, Some(index), term, rule.severity, message);
            if let Some(suggestion) = rule.suggestion {
                issue = issue.with_suggestions([suggestion]);
            }
            out.push(issue);
        }
    }
    out
}

fn rule_sentence_start(tokens: &[&str], index: usize) -> Vec<Issue> {
    let Some(word) = tokens
        .iter()
        .copied()
        .find(|t| t.chars().any(char::is_alphabetic))
    else {
        return vec![];
    };
    if starts_with_pronoun(word) {
        return vec![];
    }
    let Some(first) = word.chars().find(|c| c.is_alphabetic()) else {
        return vec![];
    };
    if !first.is_lowercase() {
        return vec![];
    }

    let mut capitalized = String::with_capacity(word.len());
    let mut done = false;
    for c in word.chars() {
        if !done && c.is_alphabetic() {
            capitalized.extend(c.to_uppercase());
            done = true;
        } else {
            capitalized.push(c);
        }
    }
    vec![Issue::grammar(
        IssueCategory::Capitalization,
        Some(index),
        word,
        Severity::Low,
        "Sentence should start with a capital letter.",
    )
    .with_suggestions([capitalized])]
}

fn rule_repetition(text: &str) -> Vec<Issue> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in text.split_whitespace() {
        let cleaned = letters_only(token);
        if cleaned.chars().count() < HP.repetition_min_chars {
            continue;
        }
        let count = counts.entry(cleaned.clone()).or_insert(0);
        if *count == 0 {
            order.push(cleaned);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|term| {
            let count = counts[&term];
            if count < HP.repetition_min_count {
                return None;
            }
            let mut issue = Issue::grammar(
                IssueCategory::Repetition,
                None,
                term.as_str(),
                Severity::Low,
                format!("'{term}' is repeated {count} times. Consider varying your word choice."),
            );
            issue.occurrences = count;
            Some(issue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every grammar heuristic over `text`.
///
/// Issues are ordered by sentence, then by rule, with whole-text repetition
/// findings last.
pub fn check(text: &str, tables: &RuleTables) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (i, sentence) in checker_sentences(text).into_iter().enumerate() {
        if sentence.trim().is_empty() {
            continue;
        }
        let index = i + 1;
        let tokens: Vec<&str> = sentence.split_whitespace().collect();

        // 1. Confused words
        issues.extend(rule_confused_words(&tokens, index, tables));
        // 2. Fragments and run-ons
        issues.extend(rule_sentence_length(sentence, &tokens, index));
        // 3. Pattern rules
        issues.extend(rule_patterns(sentence, index));
        // 4. Sentence capitalization
        issues.extend(rule_sentence_start(&tokens, index));
    }

    // 5. Repetition across the whole text
    issues.extend(rule_repetition(text));
    issues
}
