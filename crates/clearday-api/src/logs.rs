//! Handlers for `/logs` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/logs` | All logs for the user, newest first |
//! | `POST` | `/logs` | Body: [`LogBody`]; returns 201 + stored log |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use clearday_core::{
  log::{DailyLog, Mood, NewDailyLog},
  store::TrackerStore,
  user::UserId,
};
use serde::Deserialize;

use crate::{ApiState, CurrentUser, error::ApiError, error::JsonBody};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /logs`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<DailyLog>>, ApiError>
where
  S: TrackerStore,
{
  let logs = state
    .store
    .list_logs(user)
    .await
    .map_err(ApiError::store("Failed to fetch logs"))?;
  Ok(Json(logs))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /logs` and `POST /checkin`.
///
/// `mood` and `cravingIntensity` are optional here only so that their absence
/// is reported as a 400 with a readable message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogBody {
  pub date:              Option<DateTime<Utc>>,
  pub mood:              Option<Mood>,
  pub craving_intensity: Option<u8>,
  pub notes:             Option<String>,
  pub triggers:          Option<Vec<String>>,
  pub activities:        Option<Vec<String>>,
}

impl LogBody {
  /// Build a validated [`NewDailyLog`], dating it `now` when the body has no
  /// `date`.
  pub fn into_new_log(self, user: UserId, now: DateTime<Utc>) -> Result<NewDailyLog, ApiError> {
    let (Some(mood), Some(craving_intensity)) = (self.mood, self.craving_intensity) else {
      return Err(ApiError::BadRequest(
        "Mood and craving intensity are required".to_owned(),
      ));
    };
    let input = NewDailyLog {
      user_id: user,
      date: self.date.unwrap_or(now),
      mood,
      craving_intensity,
      notes: self.notes.unwrap_or_default(),
      triggers: self.triggers.unwrap_or_default(),
      activities: self.activities.unwrap_or_default(),
    };
    Ok(input.validate()?)
  }
}

/// `POST /logs`: returns 201 + the stored [`DailyLog`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(user): CurrentUser,
  JsonBody(body): JsonBody<LogBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TrackerStore,
{
  let input = body.into_new_log(user, Utc::now())?;
  let log = state
    .store
    .create_log(input)
    .await
    .map_err(ApiError::store("Failed to create log"))?;
  Ok((StatusCode::CREATED, Json(log)))
}
