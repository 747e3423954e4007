//! Leaderboard computation over per-user aggregates.
//!
//! ```text
//! composite = quality * quality_weight
//!           + min(activity_cap,   essays * per_essay)
//!           + min(popularity_cap, likes  * per_like)
//!           + min(engagement_cap, streak * per_streak_day + badges * per_badge)
//! ```
//!
//! Entries are ordered by composite (descending), then essay count
//! (descending), then user id (ascending), then input position, so ranks are
//! always the contiguous sequence `1..=N`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::scoring::{clamp_score, round2, ScoreBreakdown};

/// Weights and caps for the composite leaderboard score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingPolicy {
    pub quality_weight: f64,
    pub per_essay: f64,
    pub activity_cap: f64,
    pub per_like: f64,
    pub popularity_cap: f64,
    pub per_streak_day: f64,
    pub per_badge: f64,
    pub engagement_cap: f64,
    /// Users whose composite falls below this are left off the leaderboard.
    pub min_composite: Option<f64>,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            quality_weight: 0.7,
            per_essay: 2.0,
            activity_cap: 50.0,
            per_like: 0.5,
            popularity_cap: 30.0,
            per_streak_day: 0.5,
            per_badge: 2.0,
            engagement_cap: 20.0,
            min_composite: None,
        }
    }
}

impl RankingPolicy {
    pub fn validate(&self) -> ConfigResult<()> {
        let values = [
            ("quality_weight", self.quality_weight),
            ("per_essay", self.per_essay),
            ("activity_cap", self.activity_cap),
            ("per_like", self.per_like),
            ("popularity_cap", self.popularity_cap),
            ("per_streak_day", self.per_streak_day),
            ("per_badge", self.per_badge),
            ("engagement_cap", self.engagement_cap),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "ranking.{name} must be finite and non-negative, got {value}"
            )));
        }
        if self.min_composite.is_some_and(|m| !m.is_finite()) {
            return Err(ConfigError::Invalid(
                "ranking.min_composite must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Composite leaderboard score for one user, rounded to two decimals.
    /// Negative counts count as zero; quality is clamped to `[0, 100]`.
    pub fn composite_score(&self, user: &UserAggregate) -> f64 {
        let quality = clamp_score(user.quality_score);
        let essays = user.essay_count.max(0) as f64;
        let likes = user.likes_received.max(0) as f64;
        let streak = user.streak_days.max(0) as f64;
        let badges = user.badge_count.max(0) as f64;

        let activity = (essays * self.per_essay).min(self.activity_cap);
        let popularity = (likes * self.per_like).min(self.popularity_cap);
        let engagement =
            (streak * self.per_streak_day + badges * self.per_badge).min(self.engagement_cap);

        round2(quality * self.quality_weight + activity + popularity + engagement)
    }
}

/// Per-user statistics folded by the host from that user's essay history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAggregate {
    pub user_id: String,
    pub quality_score: f64,
    pub essay_count: i64,
    pub likes_received: i64,
    pub streak_days: i64,
    pub badge_count: i64,
}

impl UserAggregate {
    pub fn new(user_id: impl Into<String>, quality_score: f64) -> Self {
        Self {
            user_id: user_id.into(),
            quality_score,
            ..Self::default()
        }
    }

    /// Fold a user's scored essays: quality is the mean overall score and
    /// essay count the history length.
    pub fn from_history(
        user_id: impl Into<String>,
        history: &[ScoreBreakdown],
        likes_received: i64,
        streak_days: i64,
        badge_count: i64,
    ) -> Self {
        let quality_score = if history.is_empty() {
            0.0
        } else {
            let total: f64 = history.iter().map(|s| s.overall_score).sum();
            round2(total / history.len() as f64)
        };
        Self {
            user_id: user_id.into(),
            quality_score,
            essay_count: i64::try_from(history.len()).unwrap_or(i64::MAX),
            likes_received,
            streak_days,
            badge_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub composite_score: f64,
    pub rank: usize,
    pub percentile: f64,
}

struct Candidate<'a> {
    position: usize,
    user: &'a UserAggregate,
    composite: f64,
}

fn leaderboard_order(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.composite
        .total_cmp(&a.composite)
        .then_with(|| b.user.essay_count.max(0).cmp(&a.user.essay_count.max(0)))
        .then_with(|| a.user.user_id.cmp(&b.user.user_id))
        .then_with(|| a.position.cmp(&b.position))
}

fn percentile(rank: usize, total: usize) -> f64 {
    if total <= 1 {
        return 100.0;
    }
    round2((total - rank) as f64 / (total - 1) as f64 * 100.0)
}

/// Rank `aggregates` under `policy`. Stateless: the same snapshot always
/// yields the same leaderboard.
pub fn rank(aggregates: &[UserAggregate], policy: &RankingPolicy) -> Vec<LeaderboardEntry> {
    let mut candidates: Vec<Candidate<'_>> = aggregates
        .iter()
        .enumerate()
        .map(|(position, user)| Candidate {
            position,
            user,
            composite: policy.composite_score(user),
        })
        .filter(|c| policy.min_composite.map_or(true, |min| c.composite >= min))
        .collect();

    candidates.sort_by(leaderboard_order);

    let total = candidates.len();
    candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| LeaderboardEntry {
            user_id: c.user.user_id.clone(),
            composite_score: c.composite,
            rank: i + 1,
            percentile: percentile(i + 1, total),
        })
        .collect()
}
