//! The [`CurrentUser`] extractor.
//!
//! Requests name their user in the `X-User-Id` header. Without it they act
//! as [`UserId::default`], so a single-person deployment needs no header at
//! all. There is no authentication; put the API behind something that sets
//! the header if it must be trusted.

use axum::{extract::FromRequestParts, http::request::Parts};
use clearday_core::user::UserId;

use crate::error::ApiError;

pub const USER_HEADER: &str = "x-user-id";

/// The user a request acts on behalf of.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let Some(value) = parts.headers.get(USER_HEADER) else {
      return Ok(Self(UserId::default()));
    };
    let raw = value
      .to_str()
      .map_err(|_| ApiError::BadRequest("X-User-Id must be visible ASCII".to_owned()))?;
    Ok(Self(UserId::new(raw.trim())?))
  }
}
