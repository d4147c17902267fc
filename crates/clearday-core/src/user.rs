//! User identity.
//!
//! Every log, streak and settings row is keyed by a [`UserId`]. A deployment
//! with a single person simply never names anyone but [`UserId::default`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Maximum length of a user identifier, in bytes.
pub const MAX_USER_ID_LEN: usize = 64;

/// An opaque, validated user identifier.
///
/// Accepts 1–64 ASCII alphanumerics plus `-`, `_` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
  pub const DEFAULT: &'static str = "default";

  pub fn new(raw: impl Into<String>) -> Result<Self> {
    let raw = raw.into();
    if raw.is_empty() || raw.len() > MAX_USER_ID_LEN {
      return Err(Error::validation(format!(
        "user id must be 1-{MAX_USER_ID_LEN} characters"
      )));
    }
    if !raw
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
      return Err(Error::validation(format!(
        "user id {raw:?} contains invalid characters"
      )));
    }
    Ok(Self(raw))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for UserId {
  fn default() -> Self { Self(Self::DEFAULT.to_owned()) }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for UserId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::new(s) }
}

impl TryFrom<String> for UserId {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::new(s) }
}

impl From<UserId> for String {
  fn from(id: UserId) -> Self { id.0 }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_plain_identifiers() {
    for raw in ["default", "alice", "user-42", "a_b.c"] {
      assert_eq!(UserId::new(raw).unwrap().as_str(), raw);
    }
  }

  #[test]
  fn rejects_empty_long_and_odd_identifiers() {
    assert!(UserId::new("").is_err());
    assert!(UserId::new("x".repeat(MAX_USER_ID_LEN + 1)).is_err());
    assert!(UserId::new("bob smith").is_err());
    assert!(UserId::new("../etc").is_err());
  }

  #[test]
  fn deserialize_validates() {
    let ok: UserId = serde_json::from_str("\"carol\"").unwrap();
    assert_eq!(ok.as_str(), "carol");
    assert!(serde_json::from_str::<UserId>("\"no spaces\"").is_err());
  }
}
