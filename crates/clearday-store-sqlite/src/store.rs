//! [`SqliteStore`]: the SQLite implementation of [`TrackerStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use clearday_core::{
  log::{DailyLog, NewDailyLog},
  settings::UserSettings,
  store::TrackerStore,
  streak::StreakRecord,
  user::UserId,
};

use crate::{
  Error, Result,
  encode::{
    LOG_COLUMNS, RawDailyLog, RawSettings, RawStreak, SETTINGS_COLUMNS, STREAK_COLUMNS,
    encode_dt,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Clearday store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted. All SQL runs
/// on the connection's own thread, one call at a time.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Validate `input` and assign its id and receipt time.
fn new_log(input: NewDailyLog) -> Result<(DailyLog, RawDailyLog)> {
  let input = input.validate()?;

  // Stored timestamps carry microseconds; match them in what we return.
  let log = DailyLog {
    log_id:            Uuid::new_v4(),
    user_id:           input.user_id,
    date:              input.date.trunc_subsecs(6),
    mood:              input.mood,
    craving_intensity: input.craving_intensity,
    notes:             input.notes,
    triggers:          input.triggers,
    activities:        input.activities,
    recorded_at:       Utc::now().trunc_subsecs(6),
  };
  let raw = RawDailyLog::from_log(&log)?;
  Ok((log, raw))
}

// ─── SQL helpers (run on the connection thread) ──────────────────────────────

fn insert_log(conn: &rusqlite::Connection, raw: &RawDailyLog) -> rusqlite::Result<()> {
  conn.execute(
    &format!("INSERT INTO daily_logs ({LOG_COLUMNS})
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
    rusqlite::params![
      raw.log_id,
      raw.user_id,
      raw.date,
      raw.mood,
      raw.craving_intensity,
      raw.notes,
      raw.triggers,
      raw.activities,
      raw.recorded_at,
    ],
  )?;
  Ok(())
}

fn select_streak(
  conn: &rusqlite::Connection,
  user: &str,
) -> rusqlite::Result<Option<RawStreak>> {
  conn
    .query_row(
      &format!("SELECT {STREAK_COLUMNS} FROM streaks WHERE user_id = ?1"),
      rusqlite::params![user],
      RawStreak::from_row,
    )
    .optional()
}

fn upsert_streak(conn: &rusqlite::Connection, user: &str, raw: &RawStreak) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO streaks (user_id, current_streak, longest_streak, last_checkin, history, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     ON CONFLICT(user_id) DO UPDATE SET
       current_streak = excluded.current_streak,
       longest_streak = excluded.longest_streak,
       last_checkin   = excluded.last_checkin,
       history        = excluded.history,
       updated_at     = excluded.updated_at",
    rusqlite::params![
      user,
      raw.current_streak,
      raw.longest_streak,
      raw.last_checkin,
      raw.history,
      encode_dt(Utc::now()),
    ],
  )?;
  Ok(())
}

fn select_settings(
  conn: &rusqlite::Connection,
  user: &str,
) -> rusqlite::Result<Option<RawSettings>> {
  conn
    .query_row(
      &format!("SELECT {SETTINGS_COLUMNS} FROM user_settings WHERE user_id = ?1"),
      rusqlite::params![user],
      RawSettings::from_row,
    )
    .optional()
}

/// Read-modify-write of the streak row inside an open transaction.
///
/// The new record is decoded before it is written, so a value that could not
/// be read back never reaches the table.
fn apply_streak_update<F>(
  tx: &rusqlite::Transaction<'_>,
  user: &str,
  update: F,
) -> std::result::Result<StreakRecord, tokio_rusqlite::Error>
where
  F: FnOnce(Option<StreakRecord>) -> StreakRecord,
{
  let current = select_streak(tx, user)?
    .map(RawStreak::into_record)
    .transpose()
    .map_err(Error::into_call_error)?;

  let next = RawStreak::from_record(&update(current)).map_err(Error::into_call_error)?;
  let record = next.clone().into_record().map_err(Error::into_call_error)?;
  upsert_streak(tx, user, &next)?;
  Ok(record)
}

/// Insert `settings` for `user`. With `overwrite` false an existing row wins.
fn insert_settings(
  conn: &rusqlite::Connection,
  user: &str,
  settings: &UserSettings,
  overwrite: bool,
) -> rusqlite::Result<()> {
  let on_conflict = if overwrite {
    "DO UPDATE SET
       start_date        = excluded.start_date,
       weekly_vape_cost  = excluded.weekly_vape_cost,
       monthly_vape_cost = excluded.monthly_vape_cost,
       investment_rate   = excluded.investment_rate,
       investment_years  = excluded.investment_years,
       updated_at        = excluded.updated_at"
  } else {
    "DO NOTHING"
  };
  conn.execute(
    &format!(
      "INSERT INTO user_settings (
         user_id, start_date, weekly_vape_cost, monthly_vape_cost,
         investment_rate, investment_years, updated_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
       ON CONFLICT(user_id) {on_conflict}"
    ),
    rusqlite::params![
      user,
      encode_dt(settings.start_date),
      settings.weekly_vape_cost,
      settings.monthly_vape_cost,
      settings.investment_rate,
      settings.investment_years,
      encode_dt(Utc::now()),
    ],
  )?;
  Ok(())
}

// ─── TrackerStore impl ───────────────────────────────────────────────────────

impl TrackerStore for SqliteStore {
  type Error = Error;

  // ── Logs ──────────────────────────────────────────────────────────────────

  async fn create_log(&self, input: NewDailyLog) -> Result<DailyLog> {
    let (log, raw) = new_log(input)?;

    self
      .conn
      .call(move |conn| Ok(insert_log(conn, &raw)?))
      .await?;

    tracing::debug!(user = %log.user_id, log_id = %log.log_id, "daily log stored");
    Ok(log)
  }

  async fn list_logs(&self, user: UserId) -> Result<Vec<DailyLog>> {
    let user_str = user.as_str().to_owned();

    let raws: Vec<RawDailyLog> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LOG_COLUMNS} FROM daily_logs
           WHERE user_id = ?1
           ORDER BY date DESC, recorded_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], RawDailyLog::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDailyLog::into_log).collect()
  }

  // ── Streaks ───────────────────────────────────────────────────────────────

  async fn get_streak(&self, user: UserId) -> Result<Option<StreakRecord>> {
    let user_str = user.as_str().to_owned();

    let raw = self
      .conn
      .call(move |conn| Ok(select_streak(conn, &user_str)?))
      .await?;

    raw.map(RawStreak::into_record).transpose()
  }

  async fn get_or_create_streak(&self, user: UserId) -> Result<StreakRecord> {
    let user_str = user.as_str().to_owned();
    let zero = RawStreak::from_record(&StreakRecord::zero())?;

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = match select_streak(&tx, &user_str)? {
          Some(raw) => raw,
          None => {
            upsert_streak(&tx, &user_str, &zero)?;
            zero
          }
        };
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_record()
  }

  async fn save_streak(&self, user: UserId, record: StreakRecord) -> Result<()> {
    let user_str = user.as_str().to_owned();
    let raw = RawStreak::from_record(&record)?;

    self
      .conn
      .call(move |conn| Ok(upsert_streak(conn, &user_str, &raw)?))
      .await?;
    Ok(())
  }

  async fn update_streak<F>(&self, user: UserId, update: F) -> Result<StreakRecord>
  where
    F: FnOnce(Option<StreakRecord>) -> StreakRecord + Send + 'static,
  {
    let user_str = user.as_str().to_owned();

    let record = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let record = apply_streak_update(&tx, &user_str, update)?;
        tx.commit()?;
        Ok(record)
      })
      .await?;

    Ok(record)
  }

  async fn check_in<F>(&self, input: NewDailyLog, update: F) -> Result<(DailyLog, StreakRecord)>
  where
    F: FnOnce(Option<StreakRecord>) -> StreakRecord + Send + 'static,
  {
    let (log, raw) = new_log(input)?;
    let user_str = raw.user_id.clone();

    let record = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        insert_log(&tx, &raw)?;
        let record = apply_streak_update(&tx, &user_str, update)?;
        tx.commit()?;
        Ok(record)
      })
      .await?;

    tracing::debug!(
      user = %log.user_id,
      log_id = %log.log_id,
      streak = record.current_streak,
      "check-in stored"
    );
    Ok((log, record))
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  async fn get_settings(&self, user: UserId) -> Result<Option<UserSettings>> {
    let user_str = user.as_str().to_owned();

    let raw = self
      .conn
      .call(move |conn| Ok(select_settings(conn, &user_str)?))
      .await?;

    raw.map(RawSettings::into_settings).transpose()
  }

  async fn get_or_create_settings(&self, user: UserId) -> Result<UserSettings> {
    let user_str = user.as_str().to_owned();
    let defaults = UserSettings::defaults_at(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        insert_settings(&tx, &user_str, &defaults, false)?;
        let raw = select_settings(&tx, &user_str)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw
      .ok_or_else(|| Error::Corrupt(format!("settings for {user} vanished after insert")))?
      .into_settings()
  }

  async fn save_settings(&self, user: UserId, settings: UserSettings) -> Result<()> {
    settings.validate()?;
    let user_str = user.as_str().to_owned();

    self
      .conn
      .call(move |conn| Ok(insert_settings(conn, &user_str, &settings, true)?))
      .await?;
    Ok(())
  }
}
