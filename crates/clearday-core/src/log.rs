//! Daily logs: one immutable record per check-in submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{Error, Result, engine::check_instant, user::UserId};

/// Inclusive bounds of the craving-intensity scale.
pub const CRAVING_MIN: u8 = 1;
pub const CRAVING_MAX: u8 = 10;

/// How the user felt on the day they logged.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
  Terrible,
  Bad,
  Neutral,
  Good,
  Great,
}

impl Mood {
  /// Parse the lowercase wire form, e.g. `"good"`.
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownMood(s.to_owned()))
  }
}

/// A stored check-in log. Never updated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
  pub log_id:            Uuid,
  pub user_id:           UserId,
  /// The day being logged; defaults to the submission instant.
  pub date:              DateTime<Utc>,
  pub mood:              Mood,
  pub craving_intensity: u8,
  pub notes:             String,
  pub triggers:          Vec<String>,
  pub activities:        Vec<String>,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at:       DateTime<Utc>,
}

/// Input to [`crate::store::TrackerStore::create_log`].
/// `log_id` and `recorded_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewDailyLog {
  pub user_id:           UserId,
  pub date:              DateTime<Utc>,
  pub mood:              Mood,
  pub craving_intensity: u8,
  pub notes:             String,
  pub triggers:          Vec<String>,
  pub activities:        Vec<String>,
}

impl NewDailyLog {
  /// Convenience constructor with empty notes, triggers and activities.
  pub fn new(
    user_id: UserId,
    date: DateTime<Utc>,
    mood: Mood,
    craving_intensity: u8,
  ) -> Self {
    Self {
      user_id,
      date,
      mood,
      craving_intensity,
      notes: String::new(),
      triggers: Vec::new(),
      activities: Vec::new(),
    }
  }

  /// Check the craving scale and the date, and tidy the free-text lists.
  ///
  /// Triggers and activities are trimmed; blank entries are dropped.
  pub fn validate(mut self) -> Result<Self> {
    check_instant("date", self.date)?;
    if !(CRAVING_MIN..=CRAVING_MAX).contains(&self.craving_intensity) {
      return Err(Error::validation(format!(
        "cravingIntensity must be between {CRAVING_MIN} and {CRAVING_MAX}, got {}",
        self.craving_intensity
      )));
    }
    self.triggers = tidy(self.triggers);
    self.activities = tidy(self.activities);
    Ok(self)
  }
}

fn tidy(items: Vec<String>) -> Vec<String> {
  items
    .into_iter()
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
    .collect()
}
