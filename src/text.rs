//! Tokenizing and snippet helpers shared by the analyzers.

use once_cell::sync::Lazy;
use regex::Regex;

static PUNCT_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\w]+|[^\w]+$").unwrap());

/// Sentence separator used by the grammar and spelling checkers.
pub(crate) const CHECKER_SENTENCE_SEPARATOR: &str = ". ";

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lower-cased token with every non-alphabetic character removed.
pub(crate) fn letters_only(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lower-cased token with leading and trailing punctuation trimmed.
pub(crate) fn trim_punctuation(token: &str) -> String {
    PUNCT_STRIP_RE.replace_all(token, "").to_lowercase()
}

/// Sentences as the checkers see them: a plain split on `". "`.
pub(crate) fn checker_sentences(text: &str) -> Vec<&str> {
    text.split(CHECKER_SENTENCE_SEPARATOR).collect()
}

/// Tokens `radius` either side of `index`, joined by single spaces.
pub(crate) fn token_window(tokens: &[&str], index: usize, radius: usize) -> String {
    let start = index.saturating_sub(radius);
    let end = std::cmp::min(tokens.len(), index + radius + 1);
    tokens[start..end].join(" ")
}

pub(crate) fn context_around(text: &str, start: usize, end: usize, width: usize) -> String {
    let mid = (start + end) / 2;
    let half = width / 2;
    let ctx_start = mid.saturating_sub(half);
    let ctx_end = std::cmp::min(text.len(), mid + half);

    // Ensure we don't slice in the middle of a multi-byte char
    let ctx_start = snap_to_char_boundary(text, ctx_start, false);
    let ctx_end = snap_to_char_boundary(text, ctx_end, true);

    let snippet = text[ctx_start..ctx_end].replace('\n', " ");
    let prefix = if ctx_start > 0 { "..." } else { "" };
    let suffix = if ctx_end < text.len() { "..." } else { "" };
    format!("{prefix}{snippet}{suffix}")
}

/// Snap a byte offset to a valid char boundary.
/// If `forward` is true, snap forward; otherwise snap backward.
fn snap_to_char_boundary(text: &str, pos: usize, forward: bool) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    if forward {
        while p < text.len() && !text.is_char_boundary(p) {
            p += 1;
        }
    } else {
        while p > 0 && !text.is_char_boundary(p) {
            p -= 1;
        }
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_only_strips_and_folds() {
        assert_eq!(letters_only("Their,"), "their");
        assert_eq!(letters_only("it's"), "its");
        assert_eq!(letters_only("42"), "");
    }

    #[test]
    fn token_window_clamps_at_edges() {
        let tokens = ["I", "recieve", "the", "package."];
        assert_eq!(token_window(&tokens, 1, 2), "I recieve the package.");
        assert_eq!(token_window(&tokens, 0, 2), "I recieve the");
    }

    #[test]
    fn context_window_respects_char_boundaries() {
        let text = "caf\u{e9} au lait could of been better \u{2014} honestly";
        let start = text.find("could of").unwrap();
        let ctx = context_around(text, start, start + 8, 12);
        assert!(ctx.contains("could"), "context was {ctx}");
    }
}
