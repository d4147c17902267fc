//! The `TrackerStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `clearday-store-sqlite`). The API layer depends on this abstraction, not on
//! any concrete backend. Every method is scoped by [`UserId`].

use std::future::Future;

use crate::{
  log::{DailyLog, NewDailyLog},
  settings::UserSettings,
  streak::StreakRecord,
  user::UserId,
};

/// Abstraction over a Clearday storage backend.
///
/// Logs are append-only. Streaks and settings are one row per user, created
/// explicitly through the `get_or_create_*` methods and overwritten whole on
/// save.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait TrackerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Logs ──────────────────────────────────────────────────────────────

  /// Persist a new log. `log_id` and `recorded_at` are assigned by the store.
  fn create_log(
    &self,
    input: NewDailyLog,
  ) -> impl Future<Output = Result<DailyLog, Self::Error>> + Send + '_;

  /// All logs for `user`, newest `date` first.
  fn list_logs(
    &self,
    user: UserId,
  ) -> impl Future<Output = Result<Vec<DailyLog>, Self::Error>> + Send + '_;

  // ── Streaks ───────────────────────────────────────────────────────────

  /// The stored streak for `user`, or `None` if there has never been one.
  fn get_streak(
    &self,
    user: UserId,
  ) -> impl Future<Output = Result<Option<StreakRecord>, Self::Error>> + Send + '_;

  /// The stored streak for `user`, inserting [`StreakRecord::zero`] first if
  /// there is none.
  fn get_or_create_streak(
    &self,
    user: UserId,
  ) -> impl Future<Output = Result<StreakRecord, Self::Error>> + Send + '_;

  /// Overwrite the streak for `user`.
  fn save_streak(
    &self,
    user: UserId,
    record: StreakRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Read the streak for `user`, pass it through `update` and store the
  /// result, as one atomic step. Returns the stored record.
  ///
  /// Concurrent callers cannot interleave between the read and the write, so
  /// two check-ins racing each other both count.
  fn update_streak<F>(
    &self,
    user: UserId,
    update: F,
  ) -> impl Future<Output = Result<StreakRecord, Self::Error>> + Send + '_
  where
    F: FnOnce(Option<StreakRecord>) -> StreakRecord + Send + 'static;

  /// Store `input` and advance the owner's streak through `update` in one
  /// transaction. If either write fails neither is kept.
  fn check_in<F>(
    &self,
    input: NewDailyLog,
    update: F,
  ) -> impl Future<Output = Result<(DailyLog, StreakRecord), Self::Error>> + Send + '_
  where
    F: FnOnce(Option<StreakRecord>) -> StreakRecord + Send + 'static;

  // ── Settings ──────────────────────────────────────────────────────────

  fn get_settings(
    &self,
    user: UserId,
  ) -> impl Future<Output = Result<Option<UserSettings>, Self::Error>> + Send + '_;

  /// The stored settings for `user`, inserting
  /// [`UserSettings::defaults_at`]`(now)` first if there are none.
  fn get_or_create_settings(
    &self,
    user: UserId,
  ) -> impl Future<Output = Result<UserSettings, Self::Error>> + Send + '_;

  /// Overwrite the settings for `user`.
  fn save_settings(
    &self,
    user: UserId,
    settings: UserSettings,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
