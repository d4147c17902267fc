//! Handlers for `/streak` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/streak` | Creates a zero-valued record on first read |
//! | `POST` | `/streak` | Optional body `{"date": "..."}`; applies a check-in |
//!
//! Both answer with the stored record plus `checkedInToday` and
//! `effectiveStreak`, judged against the engine's calendar.

use axum::{Json, body::Bytes, extract::State};
use chrono::{DateTime, Utc};
use clearday_core::{engine::check_instant, store::TrackerStore, streak::StreakStatus};
use serde::Deserialize;

use crate::{ApiState, CurrentUser, error::ApiError};

/// `GET /streak`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<StreakStatus>, ApiError>
where
  S: TrackerStore,
{
  let streak = state
    .store
    .get_or_create_streak(user)
    .await
    .map_err(ApiError::store("Failed to fetch streak data"))?;
  Ok(Json(state.engine.status(streak, Utc::now())))
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckInBody {
  /// Check-in instant; defaults to now.
  pub date: Option<DateTime<Utc>>,
}

/// `POST /streak`: body may be empty.
pub async fn check_in<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(user): CurrentUser,
  body: Bytes,
) -> Result<Json<StreakStatus>, ApiError>
where
  S: TrackerStore,
{
  let body: CheckInBody = if body.iter().all(u8::is_ascii_whitespace) {
    CheckInBody::default()
  } else {
    serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
  };
  let at = check_instant("date", body.date.unwrap_or_else(Utc::now))?;

  let engine = state.engine;
  let streak = state
    .store
    .update_streak(user.clone(), move |record| engine.apply(record, at))
    .await
    .map_err(ApiError::store("Failed to update streak"))?;

  tracing::info!(%user, current = streak.current_streak, "streak check-in");
  Ok(Json(engine.status(streak, Utc::now())))
}
