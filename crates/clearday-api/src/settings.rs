//! Handlers for `/user`: the user's settings.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/user` | Creates defaults on first read |
//! | `PUT`  | `/user` | Body: any subset of [`SettingsPatch`] fields |

use axum::{Json, extract::State};
use clearday_core::{
  settings::{SettingsPatch, UserSettings},
  store::TrackerStore,
};

use crate::{ApiState, CurrentUser, error::ApiError, error::JsonBody};

/// `GET /user`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<UserSettings>, ApiError>
where
  S: TrackerStore,
{
  let settings = state
    .store
    .get_or_create_settings(user)
    .await
    .map_err(ApiError::store("Failed to fetch user data"))?;
  Ok(Json(settings))
}

/// `PUT /user`: overwrite only the fields present in the body.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(user): CurrentUser,
  JsonBody(patch): JsonBody<SettingsPatch>,
) -> Result<Json<UserSettings>, ApiError>
where
  S: TrackerStore,
{
  let current = state
    .store
    .get_or_create_settings(user.clone())
    .await
    .map_err(ApiError::store("Failed to update user data"))?;

  if patch.is_empty() {
    return Ok(Json(current));
  }

  let next = patch.apply(&current)?;
  state
    .store
    .save_settings(user.clone(), next.clone())
    .await
    .map_err(ApiError::store("Failed to update user data"))?;

  tracing::info!(%user, "settings updated");
  Ok(Json(next))
}
