//! Handler for `POST /checkin`: store a daily log and advance the streak in
//! one request.

use axum::{Json, extract::State};
use chrono::Utc;
use clearday_core::{log::DailyLog, store::TrackerStore, streak::StreakRecord};
use serde::Serialize;

use crate::{ApiState, CurrentUser, error::ApiError, error::JsonBody, logs::LogBody};

#[derive(Debug, Serialize)]
pub struct CheckinResponse {
  pub log:    DailyLog,
  pub streak: StreakRecord,
}

/// `POST /checkin`: body: [`LogBody`]. The log's `date` (or now) is the
/// check-in instant fed to the streak engine.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(user): CurrentUser,
  JsonBody(body): JsonBody<LogBody>,
) -> Result<Json<CheckinResponse>, ApiError>
where
  S: TrackerStore,
{
  let input = body.into_new_log(user.clone(), Utc::now())?;
  let at = input.date;

  let engine = state.engine;
  let (log, streak) = state
    .store
    .check_in(input, move |record| engine.apply(record, at))
    .await
    .map_err(ApiError::store("Failed to update streak"))?;

  tracing::info!(
    %user,
    mood = %log.mood,
    current = streak.current_streak,
    longest = streak.longest_streak,
    "check-in recorded"
  );
  Ok(Json(CheckinResponse { log, streak }))
}
