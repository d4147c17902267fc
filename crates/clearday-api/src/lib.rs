//! JSON REST API for Clearday.
//!
//! Exposes an axum [`Router`] backed by any
//! [`clearday_core::store::TrackerStore`]. Request tracing and the listener
//! belong to whoever mounts it.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", clearday_api::api_router(store.clone(), engine))
//! ```

pub mod checkin;
pub mod error;
pub mod insights;
pub mod logs;
pub mod settings;
pub mod streak;
pub mod user;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use clearday_core::{engine::StreakEngine, store::TrackerStore};

pub use error::ApiError;
pub use user::{CurrentUser, USER_HEADER};

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  /// Decides where calendar days begin for streaks and calendars.
  pub engine: StreakEngine,
}

// Not derived: the store itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), engine: self.engine }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, engine: StreakEngine) -> Router<()>
where
  S: TrackerStore + 'static,
{
  Router::new()
    .route("/checkin", post(checkin::create::<S>))
    .route("/logs", get(logs::list::<S>).post(logs::create::<S>))
    .route("/streak", get(streak::get_one::<S>).post(streak::check_in::<S>))
    .route("/user", get(settings::get_one::<S>).put(settings::update::<S>))
    .route("/savings", get(insights::savings::<S>))
    .route("/health", get(insights::health::<S>))
    .route("/calendar", get(insights::calendar::<S>))
    .with_state(ApiState { store, engine })
}
