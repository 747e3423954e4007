//! Property tests for the engine's invariants:
//! - metrics are all zero exactly when the text is empty
//! - every score stays within [0, 100]
//! - analysis is deterministic
//! - readability bands are monotonic in the score
//! - leaderboard ranks are a permutation of 1..=N with non-increasing percentiles

use proptest::prelude::*;

use essay_score::{
    analyze, evaluate, metrics, recompute_leaderboard, scoring, ReadabilityBand, UserAggregate,
};

/// Essay-like text built from words that trigger most rules.
fn essay_text() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        Just("their"),
        Just("Their"),
        Just("its"),
        Just("it's"),
        Just("recieve"),
        Just("alot"),
        Just("could of"),
        Just("was"),
        Just("baked"),
        Just("i"),
        Just("essay"),
        Just("writing"),
        Just("the"),
        Just("beautiful"),
        Just("table"),
        Just("\u{e9}t\u{e9}"),
        Just("--"),
    ];
    let sep = prop_oneof![Just(" "), Just("  "), Just(". "), Just("! "), Just("\n\n"), Just(", ")];
    prop::collection::vec((word, sep), 0..120).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(w, s)| format!("{w}{s}"))
            .collect::<String>()
    })
}

fn in_range(v: f64) -> bool {
    (0.0..=100.0).contains(&v)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: metrics are all zero iff the text is empty.
    #[test]
    fn prop_metrics_zero_iff_empty(text in "\\PC{0,80}") {
        let m = metrics::extract(&text);
        prop_assert_eq!(m.is_empty(), text.is_empty());
    }

    /// Property: all score components are clamped to [0, 100].
    #[test]
    fn prop_scores_in_range(text in essay_text()) {
        let report = evaluate(&text);
        let s = &report.score;
        prop_assert!(in_range(s.grammar_score), "grammar {}", s.grammar_score);
        prop_assert!(in_range(s.spelling_score), "spelling {}", s.spelling_score);
        prop_assert!(in_range(s.content_score), "content {}", s.content_score);
        prop_assert!(in_range(s.overall_score), "overall {}", s.overall_score);
        prop_assert!(in_range(report.analysis.readability.score));
        let ttr = report.analysis.vocabulary.type_token_ratio;
        prop_assert!((0.0..=1.0).contains(&ttr), "ttr {}", ttr);
    }

    /// Property: arbitrary unicode input never breaks the pipeline.
    #[test]
    fn prop_arbitrary_text_is_total(text in "\\PC{0,200}") {
        let report = evaluate(&text);
        prop_assert!(in_range(report.score.overall_score));
    }

    /// Property: analyzing identical input twice gives byte-identical JSON.
    #[test]
    fn prop_analysis_deterministic(text in essay_text()) {
        let first = serde_json::to_string(&analyze(&text)).unwrap();
        let second = serde_json::to_string(&analyze(&text)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: adding grammar issues never raises the grammar score.
    #[test]
    fn prop_grammar_score_non_increasing(text in essay_text()) {
        let issues = analyze(&text).grammar_issues;
        for k in 0..issues.len() {
            prop_assert!(
                scoring::grammar_score(&issues[..k]) >= scoring::grammar_score(&issues[..k + 1])
            );
        }
    }

    /// Property: a higher readability score never maps to a harder band.
    #[test]
    fn prop_readability_band_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ReadabilityBand::from_score(hi) <= ReadabilityBand::from_score(lo));
    }
}

fn aggregates() -> impl Strategy<Value = Vec<UserAggregate>> {
    prop::collection::vec(
        (
            prop_oneof![Just(50.0f64), 0.0f64..=100.0],
            -5i64..60,
            -5i64..200,
            0i64..30,
            0i64..10,
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (quality, essays, likes, streak, badges))| UserAggregate {
                user_id: format!("user-{}", i % 7),
                quality_score: quality,
                essay_count: essays,
                likes_received: likes,
                streak_days: streak,
                badge_count: badges,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: ranks are exactly 1..=N in order, with no gaps or duplicates.
    #[test]
    fn prop_ranks_are_contiguous(users in aggregates()) {
        let board = recompute_leaderboard(&users);
        prop_assert_eq!(board.len(), users.len());
        for (i, entry) in board.iter().enumerate() {
            prop_assert_eq!(entry.rank, i + 1);
        }
    }

    /// Property: percentiles stay in [0, 100] and never increase down the board.
    #[test]
    fn prop_percentile_non_increasing(users in aggregates()) {
        let board = recompute_leaderboard(&users);
        for entry in &board {
            prop_assert!(in_range(entry.percentile));
        }
        for pair in board.windows(2) {
            prop_assert!(pair[0].percentile >= pair[1].percentile);
            prop_assert!(pair[0].composite_score >= pair[1].composite_score);
        }
        if let Some(first) = board.first() {
            prop_assert_eq!(first.percentile, 100.0);
        }
    }

    /// Property: recomputing the same snapshot is idempotent.
    #[test]
    fn prop_leaderboard_deterministic(users in aggregates()) {
        prop_assert_eq!(recompute_leaderboard(&users), recompute_leaderboard(&users));
    }
}
