//! Read-only dashboard figures derived from settings and the streak.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/savings` | Projection from settings and the live streak |
//! | `GET`  | `/health` | Recovery timeline since the settings' `startDate` |
//! | `GET`  | `/calendar` | `?year=&month=`; defaults to the current month |

use axum::{Json, extract::State};
use chrono::{Datelike as _, Utc};
use clearday_core::{
  insights::{HealthProgress, MonthCalendar, SavingsProjection, month_calendar},
  store::TrackerStore,
};
use serde::Deserialize;

use crate::{ApiState, CurrentUser, error::ApiError, error::QueryParams};

/// `GET /savings`
///
/// Uses the effective streak, so a lapsed streak saves nothing until the
/// next check-in starts a new one.
pub async fn savings<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<SavingsProjection>, ApiError>
where
  S: TrackerStore,
{
  let settings = state
    .store
    .get_or_create_settings(user.clone())
    .await
    .map_err(ApiError::store("Failed to fetch user data"))?;
  let streak = state
    .store
    .get_or_create_streak(user)
    .await
    .map_err(ApiError::store("Failed to fetch streak data"))?;

  let days = state.engine.effective_streak(&streak, Utc::now());
  Ok(Json(SavingsProjection::compute(&settings, days)))
}

/// `GET /health`
pub async fn health<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<HealthProgress>, ApiError>
where
  S: TrackerStore,
{
  let settings = state
    .store
    .get_or_create_settings(user)
    .await
    .map_err(ApiError::store("Failed to fetch user data"))?;
  Ok(Json(HealthProgress::at(settings.start_date, Utc::now())))
}

#[derive(Debug, Deserialize)]
pub struct CalendarParams {
  pub year:  Option<i32>,
  pub month: Option<u32>,
}

/// `GET /calendar[?year=2024][&month=3]`
pub async fn calendar<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(user): CurrentUser,
  QueryParams(params): QueryParams<CalendarParams>,
) -> Result<Json<MonthCalendar>, ApiError>
where
  S: TrackerStore,
{
  let today = state.engine.day_of(Utc::now());
  let year = params.year.unwrap_or_else(|| today.year());
  let month = params.month.unwrap_or_else(|| today.month());

  let streak = state
    .store
    .get_or_create_streak(user)
    .await
    .map_err(ApiError::store("Failed to fetch streak data"))?;

  let calendar = month_calendar(&streak.streak_history, year, month, state.engine.offset())?;
  Ok(Json(calendar))
}
