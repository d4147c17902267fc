//! Per-user settings: quit date and the figures behind the savings projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, engine::check_instant};

pub const DEFAULT_WEEKLY_VAPE_COST: f64 = 30.0;
pub const DEFAULT_MONTHLY_VAPE_COST: f64 = 120.0;
pub const DEFAULT_INVESTMENT_RATE: f64 = 0.07;
pub const DEFAULT_INVESTMENT_YEARS: u32 = 40;
pub const MAX_INVESTMENT_YEARS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
  /// When the user quit.
  pub start_date:        DateTime<Utc>,
  pub weekly_vape_cost:  f64,
  pub monthly_vape_cost: f64,
  /// Annual return as a fraction, e.g. `0.07` for 7 %.
  pub investment_rate:   f64,
  pub investment_years:  u32,
}

impl UserSettings {
  /// Defaults used when settings are first read, with the quit date set to
  /// `now`.
  pub fn defaults_at(now: DateTime<Utc>) -> Self {
    Self {
      start_date:        now,
      weekly_vape_cost:  DEFAULT_WEEKLY_VAPE_COST,
      monthly_vape_cost: DEFAULT_MONTHLY_VAPE_COST,
      investment_rate:   DEFAULT_INVESTMENT_RATE,
      investment_years:  DEFAULT_INVESTMENT_YEARS,
    }
  }

  pub fn validate(&self) -> Result<()> {
    check_instant("startDate", self.start_date)?;
    for (name, cost) in [
      ("weeklyVapeCost", self.weekly_vape_cost),
      ("monthlyVapeCost", self.monthly_vape_cost),
    ] {
      if !cost.is_finite() || cost < 0.0 {
        return Err(Error::validation(format!(
          "{name} must be a non-negative number"
        )));
      }
    }
    if !self.investment_rate.is_finite() || self.investment_rate <= -1.0 {
      return Err(Error::validation("investmentRate must be greater than -1"));
    }
    if self.investment_years > MAX_INVESTMENT_YEARS {
      return Err(Error::validation(format!(
        "investmentYears must be at most {MAX_INVESTMENT_YEARS}"
      )));
    }
    Ok(())
  }
}

/// A partial update; fields left `None` keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
  pub start_date:        Option<DateTime<Utc>>,
  pub weekly_vape_cost:  Option<f64>,
  pub monthly_vape_cost: Option<f64>,
  pub investment_rate:   Option<f64>,
  pub investment_years:  Option<u32>,
}

impl SettingsPatch {
  pub fn is_empty(&self) -> bool {
    self.start_date.is_none()
      && self.weekly_vape_cost.is_none()
      && self.monthly_vape_cost.is_none()
      && self.investment_rate.is_none()
      && self.investment_years.is_none()
  }

  /// Overwrite the present fields of `settings` and validate the result.
  /// `settings` is returned untouched on error.
  pub fn apply(&self, settings: &UserSettings) -> Result<UserSettings> {
    let mut next = settings.clone();
    if let Some(v) = self.start_date {
      next.start_date = v;
    }
    if let Some(v) = self.weekly_vape_cost {
      next.weekly_vape_cost = v;
    }
    if let Some(v) = self.monthly_vape_cost {
      next.monthly_vape_cost = v;
    }
    if let Some(v) = self.investment_rate {
      next.investment_rate = v;
    }
    if let Some(v) = self.investment_years {
      next.investment_years = v;
    }
    next.validate()?;
    Ok(next)
  }
}
