//! Plain-text summaries of API responses.
//!
//! Every function returns the text instead of printing it, so the layout is
//! testable.

use std::fmt::Write as _;

use chrono::{Datelike as _, NaiveDate};
use clearday_core::{
  insights::{HealthProgress, MonthCalendar, SavingsProjection},
  log::DailyLog,
  settings::UserSettings,
  streak::{StreakRecord, StreakStatus},
};

use crate::client::CheckinResponse;

fn days(n: u32) -> String {
  if n == 1 { "1 day".to_owned() } else { format!("{n} days") }
}

pub fn checkin(resp: &CheckinResponse) -> String {
  let mut out = format!(
    "Logged {} (craving {}/10) for {}.\n",
    resp.log.mood,
    resp.log.craving_intensity,
    resp.log.date.format("%Y-%m-%d")
  );
  out.push_str(&streak(&resp.streak));
  out
}

pub fn streak(record: &StreakRecord) -> String {
  let last = record
    .last_checkin
    .map_or_else(|| "never".to_owned(), |at| at.format("%Y-%m-%d %H:%M UTC").to_string());
  format!(
    "Current streak: {}\nLongest streak: {}\nLast check-in:  {last}\n",
    days(record.current_streak),
    days(record.longest_streak),
  )
}

/// [`streak`] plus whether today is done, or a note that the streak lapsed.
pub fn streak_status(status: &StreakStatus) -> String {
  let mut out = streak(&status.record);
  if status.checked_in_today {
    out.push_str("Checked in today.\n");
  } else if status.effective_streak < status.record.current_streak {
    out.push_str("Streak lapsed: check in to start again.\n");
  } else {
    out.push_str("Not checked in today.\n");
  }
  out
}

pub fn logs(logs: &[DailyLog]) -> String {
  if logs.is_empty() {
    return "No logs yet.\n".to_owned();
  }
  let mut out = String::new();
  for log in logs {
    let _ = write!(
      out,
      "{}  {:<8}  craving {:>2}/10",
      log.date.format("%Y-%m-%d"),
      log.mood.as_ref(),
      log.craving_intensity
    );
    if !log.triggers.is_empty() {
      let _ = write!(out, "  triggers: {}", log.triggers.join(", "));
    }
    if !log.activities.is_empty() {
      let _ = write!(out, "  activities: {}", log.activities.join(", "));
    }
    if !log.notes.is_empty() {
      let _ = write!(out, "  \"{}\"", log.notes);
    }
    out.push('\n');
  }
  out
}

pub fn settings(s: &UserSettings) -> String {
  format!(
    "Quit date:        {}\n\
     Weekly spend:     {:.2}\n\
     Monthly spend:    {:.2}\n\
     Investment rate:  {:.1}%\n\
     Investment years: {}\n",
    s.start_date.format("%Y-%m-%d %H:%M UTC"),
    s.weekly_vape_cost,
    s.monthly_vape_cost,
    s.investment_rate * 100.0,
    s.investment_years,
  )
}

pub fn savings(p: &SavingsProjection) -> String {
  let mut out = format!(
    "Saved so far:  {:.2} over {}\n\
     Invested at {:.1}% for {} years: {:.2}\n",
    p.current_savings,
    days(p.streak_days),
    p.investment_rate * 100.0,
    p.investment_years,
    p.future_value,
  );
  for point in &p.growth {
    let _ = writeln!(out, "  year {:>3}: {:>12.2}", point.year, point.value);
  }
  out
}

pub fn health(h: &HealthProgress) -> String {
  let mut out = format!("{} hours ({} days) vape-free.\n", h.hours_quit, h.days_quit);
  for m in &h.achieved {
    let _ = writeln!(out, "  [x] {:<9} {}", m.label, m.benefit);
  }
  if h.achieved.last() != Some(&h.next) {
    let _ = writeln!(
      out,
      "  [ ] {:<9} {} ({:.0}% there)",
      h.next.label, h.next.benefit, h.progress_to_next
    );
  }
  out
}

/// A month grid, Monday first. Checked-in days are marked with `*`.
pub fn calendar(cal: &MonthCalendar) -> String {
  let title = NaiveDate::from_ymd_opt(cal.year, cal.month, 1)
    .map_or_else(|| format!("{}-{:02}", cal.year, cal.month), |d| d.format("%B %Y").to_string());
  let mut out = format!("{title}\n Mo  Tu  We  Th  Fr  Sa  Su\n");

  let lead = cal
    .days
    .first()
    .map_or(0, |d| d.date.weekday().num_days_from_monday());
  out.push_str(&"    ".repeat(lead as usize));

  for day in &cal.days {
    let mark = if day.checked_in { '*' } else { ' ' };
    let _ = write!(out, "{:>3}{mark}", day.date.day());
    if day.date.weekday().num_days_from_monday() == 6 {
      out.push('\n');
    }
  }
  if !out.ends_with('\n') {
    out.push('\n');
  }
  let _ = writeln!(out, "{} checked in this month", days(cal.checked_in_days as u32));
  out
}

#[cfg(test)]
mod tests {
  use chrono::{FixedOffset, TimeZone as _, Utc};
  use clearday_core::{
    engine::{StreakEngine, apply_checkin},
    insights::month_calendar,
  };

  use super::*;

  #[test]
  fn streak_summary_pluralises() {
    let record = apply_checkin(None, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
    let text = streak(&record);
    assert!(text.contains("Current streak: 1 day\n"));
    assert!(text.contains("2024-03-01 09:00 UTC"));

    assert!(streak(&StreakRecord::zero()).contains("Last check-in:  never"));
  }

  #[test]
  fn streak_status_notes_today_and_lapses() {
    let engine = StreakEngine::utc();
    let record = apply_checkin(None, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());

    let same_day = engine.status(record.clone(), Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap());
    assert!(streak_status(&same_day).ends_with("Checked in today.\n"));

    let next_day = engine.status(record.clone(), Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap());
    assert!(streak_status(&next_day).ends_with("Not checked in today.\n"));

    let lapsed = engine.status(record, Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap());
    assert!(streak_status(&lapsed).contains("Streak lapsed"));

    let fresh = engine.status(StreakRecord::zero(), Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap());
    assert!(streak_status(&fresh).ends_with("Not checked in today.\n"));
  }

  #[test]
  fn calendar_grid_starts_on_the_right_weekday() {
    // 1 March 2024 was a Friday.
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let record = apply_checkin(None, at);
    let utc = FixedOffset::east_opt(0).unwrap();
    let cal = month_calendar(&record.streak_history, 2024, 3, utc).unwrap();

    let text = calendar(&cal);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "March 2024");
    assert_eq!(lines[2], format!("{}  1*  2   3 ", " ".repeat(16)));
    assert!(text.ends_with("1 day checked in this month\n"));
  }

  #[test]
  fn empty_logs() {
    assert_eq!(logs(&[]), "No logs yet.\n");
  }
}
