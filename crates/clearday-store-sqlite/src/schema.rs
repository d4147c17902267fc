//! SQL schema for the Clearday SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Logs are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS daily_logs (
    log_id            TEXT PRIMARY KEY,
    user_id           TEXT NOT NULL,
    date              TEXT NOT NULL,   -- RFC 3339 UTC, fixed width
    mood              TEXT NOT NULL,   -- 'terrible' | 'bad' | 'neutral' | 'good' | 'great'
    craving_intensity INTEGER NOT NULL CHECK (craving_intensity BETWEEN 1 AND 10),
    notes             TEXT NOT NULL DEFAULT '',
    triggers          TEXT NOT NULL DEFAULT '[]',
    activities        TEXT NOT NULL DEFAULT '[]',
    recorded_at       TEXT NOT NULL    -- server-assigned
);

-- One row per user, overwritten by every check-in.
CREATE TABLE IF NOT EXISTS streaks (
    user_id        TEXT PRIMARY KEY,
    current_streak INTEGER NOT NULL DEFAULT 0,
    longest_streak INTEGER NOT NULL DEFAULT 0,
    last_checkin   TEXT,               -- NULL until the first check-in
    history        TEXT NOT NULL DEFAULT '[]',
    updated_at     TEXT NOT NULL,
    CHECK (longest_streak >= current_streak)
);

CREATE TABLE IF NOT EXISTS user_settings (
    user_id           TEXT PRIMARY KEY,
    start_date        TEXT NOT NULL,
    weekly_vape_cost  REAL NOT NULL,
    monthly_vape_cost REAL NOT NULL,
    investment_rate   REAL NOT NULL,
    investment_years  INTEGER NOT NULL,
    updated_at        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS daily_logs_user_date_idx ON daily_logs(user_id, date);

PRAGMA user_version = 1;
";
