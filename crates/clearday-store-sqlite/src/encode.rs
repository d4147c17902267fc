//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings so that
//! lexicographic order is chronological. Lists and streak history are stored
//! as compact JSON. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use clearday_core::{
  log::{DailyLog, Mood},
  settings::UserSettings,
  streak::{StreakEntry, StreakRecord},
  user::UserId,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Lists ───────────────────────────────────────────────────────────────────

pub fn encode_list(items: &[String]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_list(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

pub fn encode_history(history: &[StreakEntry]) -> Result<String> {
  Ok(serde_json::to_string(history)?)
}

pub fn decode_history(s: &str) -> Result<Vec<StreakEntry>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawDailyLog::from_row`].
pub const LOG_COLUMNS: &str = "log_id, user_id, date, mood, craving_intensity, notes, \
                               triggers, activities, recorded_at";

/// Raw values read directly from a `daily_logs` row.
pub struct RawDailyLog {
  pub log_id:            String,
  pub user_id:           String,
  pub date:              String,
  pub mood:              String,
  pub craving_intensity: u8,
  pub notes:             String,
  pub triggers:          String,
  pub activities:        String,
  pub recorded_at:       String,
}

impl RawDailyLog {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      log_id:            row.get(0)?,
      user_id:           row.get(1)?,
      date:              row.get(2)?,
      mood:              row.get(3)?,
      craving_intensity: row.get(4)?,
      notes:             row.get(5)?,
      triggers:          row.get(6)?,
      activities:        row.get(7)?,
      recorded_at:       row.get(8)?,
    })
  }

  pub fn from_log(log: &DailyLog) -> Result<Self> {
    Ok(Self {
      log_id:            encode_uuid(log.log_id),
      user_id:           log.user_id.as_str().to_owned(),
      date:              encode_dt(log.date),
      mood:              log.mood.as_ref().to_owned(),
      craving_intensity: log.craving_intensity,
      notes:             log.notes.clone(),
      triggers:          encode_list(&log.triggers)?,
      activities:        encode_list(&log.activities)?,
      recorded_at:       encode_dt(log.recorded_at),
    })
  }

  pub fn into_log(self) -> Result<DailyLog> {
    Ok(DailyLog {
      log_id:            decode_uuid(&self.log_id)?,
      user_id:           UserId::new(self.user_id)?,
      date:              decode_dt(&self.date)?,
      mood:              Mood::parse(&self.mood)?,
      craving_intensity: self.craving_intensity,
      notes:             self.notes,
      triggers:          decode_list(&self.triggers)?,
      activities:        decode_list(&self.activities)?,
      recorded_at:       decode_dt(&self.recorded_at)?,
    })
  }
}

/// Column list matching [`RawStreak::from_row`].
pub const STREAK_COLUMNS: &str = "current_streak, longest_streak, last_checkin, history";

/// Raw values read directly from a `streaks` row.
#[derive(Clone)]
pub struct RawStreak {
  pub current_streak: u32,
  pub longest_streak: u32,
  pub last_checkin:   Option<String>,
  pub history:        String,
}

impl RawStreak {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      current_streak: row.get(0)?,
      longest_streak: row.get(1)?,
      last_checkin:   row.get(2)?,
      history:        row.get(3)?,
    })
  }

  pub fn from_record(record: &StreakRecord) -> Result<Self> {
    Ok(Self {
      current_streak: record.current_streak,
      longest_streak: record.longest_streak,
      last_checkin:   record.last_checkin.map(encode_dt),
      history:        encode_history(&record.streak_history)?,
    })
  }

  pub fn into_record(self) -> Result<StreakRecord> {
    if self.longest_streak < self.current_streak {
      return Err(Error::Corrupt(format!(
        "longest streak {} below current streak {}",
        self.longest_streak, self.current_streak
      )));
    }
    Ok(StreakRecord {
      current_streak: self.current_streak,
      longest_streak: self.longest_streak,
      last_checkin:   self.last_checkin.as_deref().map(decode_dt).transpose()?,
      streak_history: decode_history(&self.history)?,
    })
  }
}

/// Column list matching [`RawSettings::from_row`].
pub const SETTINGS_COLUMNS: &str =
  "start_date, weekly_vape_cost, monthly_vape_cost, investment_rate, investment_years";

/// Raw values read directly from a `user_settings` row.
pub struct RawSettings {
  pub start_date:        String,
  pub weekly_vape_cost:  f64,
  pub monthly_vape_cost: f64,
  pub investment_rate:   f64,
  pub investment_years:  u32,
}

impl RawSettings {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      start_date:        row.get(0)?,
      weekly_vape_cost:  row.get(1)?,
      monthly_vape_cost: row.get(2)?,
      investment_rate:   row.get(3)?,
      investment_years:  row.get(4)?,
    })
  }

  pub fn into_settings(self) -> Result<UserSettings> {
    Ok(UserSettings {
      start_date:        decode_dt(&self.start_date)?,
      weekly_vape_cost:  self.weekly_vape_cost,
      monthly_vape_cost: self.monthly_vape_cost,
      investment_rate:   self.investment_rate,
      investment_years:  self.investment_years,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn encoded_timestamps_sort_chronologically() {
    let whole = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let later = whole + chrono::Duration::microseconds(1500);
    let next_day = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();

    let mut encoded = vec![encode_dt(next_day), encode_dt(later), encode_dt(whole)];
    encoded.sort();
    assert_eq!(encoded, [encode_dt(whole), encode_dt(later), encode_dt(next_day)]);
    assert_eq!(decode_dt(&encode_dt(later)).unwrap(), later);
  }

  #[test]
  fn streak_row_with_inverted_counts_is_corrupt() {
    let raw = RawStreak {
      current_streak: 3,
      longest_streak: 2,
      last_checkin:   None,
      history:        "[]".into(),
    };
    assert!(matches!(raw.into_record(), Err(Error::Corrupt(_))));
  }

  #[test]
  fn five_digit_years_do_not_decode() {
    let far = Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap();
    assert!(matches!(decode_dt(&encode_dt(far)), Err(Error::DateParse(_))));
  }
}
