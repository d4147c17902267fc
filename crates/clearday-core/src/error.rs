//! Error types for `clearday-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Caller-supplied input failed a domain rule.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("unknown mood: {0:?}")]
  UnknownMood(String),
}

impl Error {
  pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
