//! HTTP server assembly for Clearday.
//!
//! Wires a [`TrackerStore`] and a [`StreakEngine`] into the JSON API under
//! `/api`, with request tracing. The binary in `main.rs` adds configuration
//! loading and the listener.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use clearday_core::{engine::StreakEngine, store::TrackerStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CLEARDAY_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  /// Minutes east of UTC at which a calendar day begins.
  #[serde(default)]
  pub utc_offset_minutes: i32,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("clearday.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:               default_host(),
      port:               default_port(),
      store_path:         default_store_path(),
      utc_offset_minutes: 0,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn engine(&self) -> clearday_core::Result<StreakEngine> {
    StreakEngine::from_offset_minutes(self.utc_offset_minutes)
  }

  /// `store_path` with a leading `~/` replaced by `home`, when given.
  pub fn store_path_in(&self, home: Option<&Path>) -> PathBuf {
    match (self.store_path.strip_prefix("~"), home) {
      (Ok(rest), Some(home)) => home.join(rest),
      _ => self.store_path.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: the API nested under `/api`, wrapped
/// in request tracing.
pub fn router<S>(store: Arc<S>, engine: StreakEngine) -> Router
where
  S: TrackerStore + 'static,
{
  Router::new()
    .nest("/api", clearday_api::api_router(store, engine))
    .layer(TraceLayer::new_for_http())
}
