//! Figures derived from settings and streaks for the dashboard: money saved
//! and its compound growth, the health-recovery timeline, and a month
//! calendar of checked-in days. Nothing here is stored.

use chrono::{DateTime, Datelike as _, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, settings::UserSettings, streak::StreakEntry};

// ─── Savings ─────────────────────────────────────────────────────────────────

/// Interval between points of [`SavingsProjection::growth`], in years.
pub const GROWTH_STEP_YEARS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
  pub year:  u32,
  pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProjection {
  pub streak_days:      u32,
  /// Money not spent on vapes over the streak so far.
  pub current_savings:  f64,
  /// `current_savings` compounded annually for `investment_years`.
  pub future_value:     f64,
  pub investment_rate:  f64,
  pub investment_years: u32,
  /// Value at year 0, 5, 10, … up to `investment_years`.
  pub growth:           Vec<GrowthPoint>,
}

impl SavingsProjection {
  pub fn compute(settings: &UserSettings, streak_days: u32) -> Self {
    let rate = settings.investment_rate;
    let years = settings.investment_years;
    let current_savings = f64::from(streak_days) / 7.0 * settings.weekly_vape_cost;

    let growth = (0..=years)
      .step_by(GROWTH_STEP_YEARS as usize)
      .map(|year| GrowthPoint { year, value: compound(current_savings, rate, year) })
      .collect();

    Self {
      streak_days,
      current_savings,
      future_value: compound(current_savings, rate, years),
      investment_rate: rate,
      investment_years: years,
      growth,
    }
  }
}

fn compound(principal: f64, rate: f64, years: u32) -> f64 {
  principal * (1.0 + rate).powf(f64::from(years))
}

// ─── Health timeline ─────────────────────────────────────────────────────────

/// `(hours since quitting, label, benefit)`, ascending by hours.
const MILESTONES: [(i64, &str, &str); 12] = [
  (8, "8 hours", "Carbon monoxide levels return to normal"),
  (24, "24 hours", "Decreased risk of heart attack"),
  (48, "48 hours", "Nerve endings start to regrow"),
  (72, "72 hours", "Bronchial tubes relax, breathing easier"),
  (336, "2 weeks", "Circulation improves, lung function increases"),
  (720, "1 month", "Cilia regrow in lungs, less coughing"),
  (2_160, "3 months", "Heart attack risk drops significantly"),
  (4_320, "6 months", "Reduced respiratory infections"),
  (8_760, "1 year", "Risk of coronary heart disease cut in half"),
  (43_800, "5 years", "Stroke risk reduced to that of a non-smoker"),
  (87_600, "10 years", "Lung cancer risk cut in half"),
  (131_400, "15 years", "Heart disease risk same as non-smoker"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMilestone {
  pub hours:   i64,
  pub label:   String,
  pub benefit: String,
}

/// The full recovery timeline, ascending.
pub fn health_milestones() -> Vec<HealthMilestone> {
  MILESTONES
    .iter()
    .map(|&(hours, label, benefit)| HealthMilestone {
      hours,
      label: label.to_owned(),
      benefit: benefit.to_owned(),
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProgress {
  pub hours_quit:       i64,
  pub days_quit:        i64,
  pub achieved:         Vec<HealthMilestone>,
  /// The first milestone not yet reached, or the final one once all are.
  pub next:             HealthMilestone,
  /// Percent of the way from the previous milestone to `next`, `0..=100`.
  pub progress_to_next: f64,
}

impl HealthProgress {
  pub fn at(start_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
    let elapsed = (now - start_date).max(chrono::TimeDelta::zero());
    let hours_quit = elapsed.num_hours();
    let days_quit = elapsed.num_days();

    let mut milestones = health_milestones();
    let reached = milestones.iter().take_while(|m| m.hours <= hours_quit).count();

    let (next, progress_to_next) = if reached < milestones.len() {
      let prev_hours = reached.checked_sub(1).map_or(0, |i| milestones[i].hours);
      let next = milestones[reached].clone();
      let pct = (hours_quit - prev_hours) as f64 / (next.hours - prev_hours) as f64 * 100.0;
      (next, pct.clamp(0.0, 100.0))
    } else {
      (milestones[milestones.len() - 1].clone(), 100.0)
    };

    milestones.truncate(reached);
    Self { hours_quit, days_quit, achieved: milestones, next, progress_to_next }
  }
}

// ─── Calendar ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
  pub date:         NaiveDate,
  pub checked_in:   bool,
  /// Streak count recorded on that day, if checked in.
  pub streak_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCalendar {
  pub year:            i32,
  pub month:           u32,
  pub checked_in_days: usize,
  pub days:            Vec<CalendarDay>,
}

/// Lay `history` out over every day of `year`-`month`, using `offset` to
/// decide which calendar day each entry belongs to.
pub fn month_calendar(
  history: &[StreakEntry],
  year: i32,
  month: u32,
  offset: FixedOffset,
) -> Result<MonthCalendar> {
  let first = NaiveDate::from_ymd_opt(year, month, 1)
    .ok_or_else(|| Error::validation(format!("invalid month: {year}-{month}")))?;

  let days: Vec<CalendarDay> = first
    .iter_days()
    .take_while(|d| d.month() == month)
    .map(|date| {
      let streak_count = history
        .iter()
        .filter(|e| e.date.with_timezone(&offset).date_naive() == date)
        .map(|e| e.streak_count)
        .last();
      CalendarDay { date, checked_in: streak_count.is_some(), streak_count }
    })
    .collect();

  let checked_in_days = days.iter().filter(|d| d.checked_in).count();
  Ok(MonthCalendar { year, month, checked_in_days, days })
}
