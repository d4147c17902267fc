//! Streak records: the running tally of consecutive vape-free days.
//!
//! A record is only ever mutated by [`crate::engine::StreakEngine`]; the
//! store persists whatever the engine returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One snapshot in a record's history: the streak count reached on the day of
/// `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakEntry {
  pub date:         DateTime<Utc>,
  pub streak_count: u32,
}

/// Current and longest streak for one user.
///
/// Invariants: `longest_streak >= current_streak`; `streak_history` dates are
/// non-decreasing with at most one entry per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
  pub current_streak: u32,
  pub longest_streak: u32,
  /// `None` until the first check-in.
  pub last_checkin:   Option<DateTime<Utc>>,
  pub streak_history: Vec<StreakEntry>,
}

impl StreakRecord {
  /// The zero-valued record created lazily on first read.
  pub fn zero() -> Self { Self::default() }
}

/// A record together with what it means at the moment it was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStatus {
  #[serde(flatten)]
  pub record:           StreakRecord,
  /// Whether the last check-in falls on today's date.
  pub checked_in_today: bool,
  /// `current_streak`, or 0 once a day has been missed.
  pub effective_streak: u32,
}
