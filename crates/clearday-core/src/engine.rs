//! The streak engine.
//!
//! A pure function of `(existing record, check-in instant)` to the updated
//! record. Whether two instants fall on "consecutive days" is decided by
//! subtracting calendar dates, so month and year rollover need no special
//! casing. The engine never touches storage; callers persist its result.

use chrono::{DateTime, Datelike as _, FixedOffset, NaiveDate, Offset as _, Utc};

use crate::{
  Error, Result,
  streak::{StreakEntry, StreakRecord, StreakStatus},
};

/// Largest UTC offset accepted for the calendar-day boundary, in minutes.
pub const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Years a check-in, log or quit date may fall in. Outside this range RFC 3339
/// has no four-digit form and the instant cannot be stored.
pub const MIN_YEAR: i32 = 0;
pub const MAX_YEAR: i32 = 9999;

/// Reject instants outside [`MIN_YEAR`]`..=`[`MAX_YEAR`].
pub fn check_instant(field: &str, at: DateTime<Utc>) -> Result<DateTime<Utc>> {
  if (MIN_YEAR..=MAX_YEAR).contains(&at.year()) {
    Ok(at)
  } else {
    Err(Error::validation(format!(
      "{field} must fall between years {MIN_YEAR} and {MAX_YEAR}, got {at}"
    )))
  }
}

/// Applies check-ins to [`StreakRecord`]s.
///
/// The engine carries the UTC offset at which a calendar day begins. With the
/// default (UTC) a check-in at 23:59Z and one at 00:01Z the next morning are
/// consecutive days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakEngine {
  offset: FixedOffset,
}

impl Default for StreakEngine {
  fn default() -> Self { Self::utc() }
}

impl StreakEngine {
  pub fn utc() -> Self { Self { offset: Utc.fix() } }

  pub fn with_offset(offset: FixedOffset) -> Self { Self { offset } }

  /// Build an engine whose days start at `minutes` east of UTC.
  pub fn from_offset_minutes(minutes: i32) -> Result<Self> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
      return Err(Error::validation(format!(
        "utc offset must be within ±{MAX_OFFSET_MINUTES} minutes, got {minutes}"
      )));
    }
    FixedOffset::east_opt(minutes * 60)
      .map(Self::with_offset)
      .ok_or_else(|| Error::validation(format!("invalid utc offset: {minutes} minutes")))
  }

  pub fn offset(&self) -> FixedOffset { self.offset }

  /// The calendar date `at` falls on.
  pub fn day_of(&self, at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&self.offset).date_naive()
  }

  /// Apply one check-in at instant `at`.
  ///
  /// - no record, or one that has never been checked in: a fresh streak of 1;
  /// - same calendar day as the last check-in: counts and history unchanged,
  ///   `last_checkin` moves to `at`;
  /// - the next calendar day: the streak grows by one;
  /// - two or more days later: the streak restarts at 1;
  /// - an earlier day than the last check-in: the record is returned as is.
  ///
  /// `longest_streak` never decreases and never falls below `current_streak`.
  pub fn apply(&self, record: Option<StreakRecord>, at: DateTime<Utc>) -> StreakRecord {
    let mut record = record.unwrap_or_default();

    let Some(last) = record.last_checkin else {
      record.current_streak = 1;
      record.longest_streak = record.longest_streak.max(1);
      record.last_checkin = Some(at);
      record.streak_history.push(StreakEntry { date: at, streak_count: 1 });
      return record;
    };

    let gap = (self.day_of(at) - self.day_of(last)).num_days();
    match gap {
      0 => record.last_checkin = Some(at),
      1 => {
        record.current_streak += 1;
        record.last_checkin = Some(at);
        record.streak_history.push(StreakEntry {
          date:         at,
          streak_count: record.current_streak,
        });
      }
      g if g >= 2 => {
        record.current_streak = 1;
        record.last_checkin = Some(at);
        record.streak_history.push(StreakEntry { date: at, streak_count: 1 });
      }
      // Backdated.
      _ => {}
    }

    record.longest_streak = record.longest_streak.max(record.current_streak);
    record
  }

  /// Whether the record already holds a check-in for the day containing `now`.
  pub fn checked_in_today(&self, record: &StreakRecord, now: DateTime<Utc>) -> bool {
    record
      .last_checkin
      .is_some_and(|last| self.day_of(last) == self.day_of(now))
  }

  /// The streak as of `now`: `current_streak` while the user last checked in
  /// today or yesterday, otherwise 0 because the streak has lapsed even though
  /// no check-in has reset it yet.
  pub fn effective_streak(&self, record: &StreakRecord, now: DateTime<Utc>) -> u32 {
    match record.last_checkin {
      Some(last) if (self.day_of(now) - self.day_of(last)).num_days() <= 1 => {
        record.current_streak
      }
      _ => 0,
    }
  }

  /// `record` as seen at `now`.
  pub fn status(&self, record: StreakRecord, now: DateTime<Utc>) -> StreakStatus {
    StreakStatus {
      checked_in_today: self.checked_in_today(&record, now),
      effective_streak: self.effective_streak(&record, now),
      record,
    }
  }
}

/// Apply a check-in using UTC calendar days.
pub fn apply_checkin(record: Option<StreakRecord>, at: DateTime<Utc>) -> StreakRecord {
  StreakEngine::utc().apply(record, at)
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone as _};

  use super::*;

  fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
  }

  fn counts(r: &StreakRecord) -> (u32, u32) { (r.current_streak, r.longest_streak) }

  #[test]
  fn worked_example() {
    let r = apply_checkin(None, at(2024, 3, 1, 9));
    assert_eq!(counts(&r), (1, 1));

    let r = apply_checkin(Some(r), at(2024, 3, 2, 9));
    assert_eq!(counts(&r), (2, 2));

    let r = apply_checkin(Some(r), at(2024, 3, 5, 9));
    assert_eq!(counts(&r), (1, 2));
    assert_eq!(r.streak_history.len(), 3);
    assert_eq!(
      r.streak_history.iter().map(|e| e.streak_count).collect::<Vec<_>>(),
      [1, 2, 1]
    );
  }

  #[test]
  fn first_checkin_on_zero_record() {
    let r = apply_checkin(Some(StreakRecord::zero()), at(2024, 3, 1, 9));
    assert_eq!(counts(&r), (1, 1));
    assert_eq!(r.last_checkin, Some(at(2024, 3, 1, 9)));
    assert_eq!(r.streak_history, [StreakEntry { date: at(2024, 3, 1, 9), streak_count: 1 }]);
  }

  #[test]
  fn same_day_twice_changes_nothing_but_last_checkin() {
    let first = apply_checkin(None, at(2024, 3, 1, 8));
    let second = apply_checkin(Some(first.clone()), at(2024, 3, 1, 22));

    assert_eq!(counts(&second), counts(&first));
    assert_eq!(second.streak_history, first.streak_history);
    assert_eq!(second.last_checkin, Some(at(2024, 3, 1, 22)));
  }

  #[test]
  fn consecutive_across_month_and_year_boundaries() {
    for (from, to) in [
      (at(2024, 1, 31, 20), at(2024, 2, 1, 7)),
      (at(2024, 2, 28, 20), at(2024, 2, 29, 7)),
      (at(2024, 2, 29, 20), at(2024, 3, 1, 7)),
      (at(2023, 2, 28, 20), at(2023, 3, 1, 7)),
      (at(2023, 12, 31, 23), at(2024, 1, 1, 0)),
    ] {
      let r = apply_checkin(None, from);
      let r = apply_checkin(Some(r), to);
      assert_eq!(r.current_streak, 2, "{from} -> {to}");
    }
  }

  #[test]
  fn same_day_of_month_in_a_later_month_is_a_gap() {
    let r = apply_checkin(None, at(2024, 3, 1, 9));
    let r = apply_checkin(Some(r), at(2024, 3, 2, 9));
    let r = apply_checkin(Some(r), at(2024, 4, 2, 9));
    assert_eq!(counts(&r), (1, 2));
    assert_eq!(r.streak_history.len(), 3);
  }

  #[test]
  fn less_than_a_day_apart_but_next_date_counts() {
    let r = apply_checkin(None, at(2024, 3, 1, 23));
    let r = apply_checkin(Some(r), at(2024, 3, 2, 0));
    assert_eq!(r.current_streak, 2);
  }

  #[test]
  fn more_than_a_day_apart_but_next_date_counts() {
    let r = apply_checkin(None, at(2024, 3, 1, 0));
    let r = apply_checkin(Some(r), at(2024, 3, 2, 23));
    assert_eq!(r.current_streak, 2);
  }

  #[test]
  fn backdated_checkin_is_ignored() {
    let r = apply_checkin(None, at(2024, 3, 5, 9));
    let r = apply_checkin(Some(r), at(2024, 3, 6, 9));
    let before = r.clone();
    let r = apply_checkin(Some(r), at(2024, 3, 2, 9));
    assert_eq!(r, before);
  }

  #[test]
  fn offset_moves_the_day_boundary() {
    // 22:00Z and 23:30Z on the 1st: same UTC day, but at UTC+1:00 the second
    // is already 00:30 on the 2nd.
    let plus1 = StreakEngine::from_offset_minutes(60).unwrap();
    let r = plus1.apply(None, at(2024, 3, 1, 22));
    let r = plus1.apply(Some(r), at(2024, 3, 1, 22) + Duration::minutes(90));
    assert_eq!(r.current_streak, 2);

    let r = apply_checkin(None, at(2024, 3, 1, 22));
    let r = apply_checkin(Some(r), at(2024, 3, 1, 22) + Duration::minutes(90));
    assert_eq!(r.current_streak, 1);
  }

  #[test]
  fn offset_out_of_range_is_rejected() {
    assert!(StreakEngine::from_offset_minutes(MAX_OFFSET_MINUTES).is_ok());
    assert!(StreakEngine::from_offset_minutes(-MAX_OFFSET_MINUTES).is_ok());
    assert!(StreakEngine::from_offset_minutes(MAX_OFFSET_MINUTES + 1).is_err());
  }

  #[test]
  fn invariants_hold_over_a_long_irregular_sequence() {
    // Gaps (in days) chosen to mix repeats, consecutive days and breaks.
    let gaps = [0, 1, 1, 0, 1, 3, 1, 1, 1, 1, 0, 2, 1, 7, 1, 1, 0, 0, 1, 30, 1];
    let mut now = at(2023, 12, 20, 12);
    let mut record: Option<StreakRecord> = None;
    let mut prev_longest = 0;

    for gap in gaps {
      now += Duration::days(gap);
      let before = record.clone();
      let after = apply_checkin(before.clone(), now);

      assert!(after.longest_streak >= after.current_streak);
      assert!(after.longest_streak >= prev_longest);
      prev_longest = after.longest_streak;

      if let Some(before) = before {
        match gap {
          0 => {
            assert_eq!(after.current_streak, before.current_streak);
            assert_eq!(after.streak_history.len(), before.streak_history.len());
          }
          1 => assert_eq!(after.current_streak, before.current_streak + 1),
          _ => assert_eq!(after.current_streak, 1),
        }
      }

      let days: Vec<_> = after.streak_history.iter().map(|e| e.date.date_naive()).collect();
      assert!(days.windows(2).all(|w| w[0] < w[1]), "one entry per day, ascending");

      record = Some(after);
    }

    let record = record.unwrap();
    assert_eq!(record.longest_streak, 5);
  }

  #[test]
  fn checked_in_today_and_effective_streak() {
    let engine = StreakEngine::utc();
    let r = apply_checkin(None, at(2024, 3, 1, 9));
    let r = apply_checkin(Some(r), at(2024, 3, 2, 9));

    assert!(engine.checked_in_today(&r, at(2024, 3, 2, 23)));
    assert!(!engine.checked_in_today(&r, at(2024, 3, 3, 0)));

    assert_eq!(engine.effective_streak(&r, at(2024, 3, 2, 12)), 2);
    assert_eq!(engine.effective_streak(&r, at(2024, 3, 3, 12)), 2);
    assert_eq!(engine.effective_streak(&r, at(2024, 3, 4, 12)), 0);
    assert_eq!(engine.effective_streak(&StreakRecord::zero(), at(2024, 3, 4, 12)), 0);
  }

  #[test]
  fn status_uses_the_engine_offset() {
    // 23:30Z on the 1st is already the 2nd at UTC+2.
    let r = apply_checkin(None, Utc.with_ymd_and_hms(2024, 3, 1, 23, 30, 0).unwrap());
    let now = at(2024, 3, 2, 8);

    let utc = StreakEngine::utc().status(r.clone(), now);
    assert!(!utc.checked_in_today);
    assert_eq!(utc.effective_streak, 1);

    let plus2 = StreakEngine::from_offset_minutes(120).unwrap().status(r.clone(), now);
    assert!(plus2.checked_in_today);
    assert_eq!(plus2.record, r);

    let lapsed = StreakEngine::utc().status(r, at(2024, 3, 9, 8));
    assert!(!lapsed.checked_in_today);
    assert_eq!(lapsed.effective_streak, 0);
  }

  #[test]
  fn instants_must_have_four_digit_years() {
    assert!(check_instant("date", at(2024, 3, 1, 9)).is_ok());
    assert!(check_instant("date", at(0, 1, 1, 0)).is_ok());
    assert!(check_instant("date", at(9999, 12, 31, 23)).is_ok());

    let err = check_instant("date", at(10_000, 1, 1, 0)).unwrap_err();
    assert!(matches!(err, Error::Validation(m) if m.starts_with("date must fall")));
    assert!(check_instant("date", at(-1, 12, 31, 0)).is_err());
  }
}
