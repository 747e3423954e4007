//! Curated-dictionary misspelling detection.
//!
//! Single-word entries are looked up token by token; phrase entries (keys
//! containing a space) are counted as case-insensitive, non-overlapping
//! substrings of the whole text.
//! Findings are aggregated: one [`Issue`] per distinct term, carrying its
//! occurrence count and the context of its first occurrence.

use std::collections::HashMap;

use regex::Regex;

use crate::config::RuleTables;
use crate::issue::{Issue, IssueCategory, IssueKind, Severity};
use crate::text::{checker_sentences, context_around, letters_only, token_window};
use crate::HP;

fn severity_for(occurrences: usize) -> Severity {
    if occurrences >= HP.spelling_high_occurrences {
        Severity::High
    } else if occurrences >= HP.spelling_medium_occurrences {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn misspelling(
    term: &str,
    corrections: &[String],
    sentence_index: Option<usize>,
    context: String,
) -> Issue {
    let first = corrections.first().map(String::as_str).unwrap_or_default();
    Issue {
        kind: IssueKind::Spelling,
        category: IssueCategory::Misspelling,
        sentence_index,
        term: term.to_string(),
        suggestions: corrections.to_vec(),
        severity: Severity::Low,
        message: format!("'{term}' is likely misspelled. Did you mean '{first}'?"),
        occurrences: 0,
        context: Some(context),
    }
}

fn finalize(mut issue: Issue) -> Issue {
    issue.severity = severity_for(issue.occurrences);
    if issue.occurrences > 1 {
        issue.message = format!("{} ({} occurrences)", issue.message, issue.occurrences);
    }
    issue
}

fn check_words(text: &str, tables: &RuleTables) -> Vec<Issue> {
    let mut issues: Vec<Issue> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    let mut tokens: Vec<&str> = Vec::new();
    let mut sentence_of: Vec<usize> = Vec::new();
    for (i, sentence) in checker_sentences(text).into_iter().enumerate() {
        for token in sentence.split_whitespace() {
            tokens.push(token);
            sentence_of.push(i + 1);
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        let cleaned = letters_only(token);
        if cleaned.is_empty() {
            continue;
        }
        if let Some(&slot) = seen.get(&cleaned) {
            issues[slot].occurrences += 1;
            continue;
        }
        let Some(corrections) = tables.misspellings.get(&cleaned) else {
            continue;
        };
        let context = token_window(&tokens, i, HP.spelling_context_tokens);
        let mut issue = misspelling(&cleaned, corrections, Some(sentence_of[i]), context);
        issue.occurrences = 1;
        seen.insert(cleaned, issues.len());
        issues.push(issue);
    }
    issues
}

/// Literal, case-insensitive matcher for a phrase key. No word boundaries:
/// "should of" also counts inside "should offer".
fn phrase_pattern(phrase: &str) -> Option<Regex> {
    Regex::new(&format!("(?i){}", regex::escape(phrase))).ok()
}

fn check_phrases(text: &str, tables: &RuleTables) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (phrase, corrections) in tables.misspellings.iter().filter(|(k, _)| k.contains(' ')) {
        let Some(pattern) = phrase_pattern(phrase) else {
            continue;
        };
        let mut matches = pattern.find_iter(text);
        let Some(first) = matches.next() else {
            continue;
        };
        let context = context_around(text, first.start(), first.end(), HP.context_window_chars);
        let mut issue = misspelling(phrase, corrections, None, context);
        issue.occurrences = 1 + matches.count();
        issues.push(issue);
    }
    issues
}

/// Detect curated misspellings in `text`.
///
/// Word findings come first in order of first occurrence, followed by phrase
/// findings in table order.
pub fn check(text: &str, tables: &RuleTables) -> Vec<Issue> {
    check_words(text, tables)
        .into_iter()
        .chain(check_phrases(text, tables))
        .map(finalize)
        .collect()
}
