//! `clearday`: command-line client for a Clearday server.
//!
//! # Usage
//!
//! ```text
//! clearday checkin --mood good --craving 3 --trigger coffee
//! clearday --url http://localhost:8080 --user alice streak
//! clearday --config ~/.config/clearday/config.toml calendar --month 3
//! ```

mod client;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use clearday_core::{log::Mood, settings::SettingsPatch};
use client::{ApiClient, ApiConfig, CheckinRequest};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "clearday", version, about = "Track your vape-free streak")]
struct Args {
  /// Path to a TOML config file (url, user).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the Clearday server (default: http://localhost:8080).
  #[arg(long, env = "CLEARDAY_URL")]
  url: Option<String>,

  /// User to act as; the server's default user when omitted.
  #[arg(long, env = "CLEARDAY_USER")]
  user: Option<String>,

  /// Print raw JSON instead of a summary.
  #[arg(long, global = true)]
  json: bool,

  /// Log requests to stderr.
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Log how today went and extend the streak.
  Checkin {
    /// terrible, bad, neutral, good or great.
    #[arg(long)]
    mood:     Mood,
    /// Craving intensity, 1 to 10.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    craving:  u8,
    #[arg(long)]
    notes:    Option<String>,
    /// Repeat for several triggers.
    #[arg(long = "trigger")]
    triggers: Vec<String>,
    /// Repeat for several activities.
    #[arg(long = "activity")]
    activity: Vec<String>,
    /// RFC 3339 instant to record instead of now.
    #[arg(long)]
    date:     Option<DateTime<Utc>>,
  },
  /// List daily logs, newest first.
  Logs {
    /// Show at most this many.
    #[arg(short = 'n', long)]
    limit: Option<usize>,
  },
  /// Show the streak, or check in without logging.
  Streak {
    #[arg(long)]
    check_in: bool,
    /// With --check-in: RFC 3339 instant to record instead of now.
    #[arg(long, requires = "check_in")]
    date:     Option<DateTime<Utc>>,
  },
  /// Show settings, updating any field given.
  Settings {
    /// RFC 3339 instant the user quit.
    #[arg(long)]
    start_date:   Option<DateTime<Utc>>,
    #[arg(long)]
    weekly_cost:  Option<f64>,
    #[arg(long)]
    monthly_cost: Option<f64>,
    /// Annual return as a fraction, e.g. 0.07.
    #[arg(long)]
    rate:         Option<f64>,
    #[arg(long)]
    years:        Option<u32>,
  },
  /// Money saved and what it could grow to.
  Savings,
  /// Health milestones reached since the quit date.
  Health,
  /// Checked-in days for one month.
  Calendar {
    #[arg(long)]
    year:  Option<i32>,
    #[arg(long)]
    month: Option<u32>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:  String,
  #[serde(default)]
  user: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let level = if args.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy(),
    )
    .init();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // Flags and environment override the config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
    user:     args
      .user
      .or_else(|| (!file_cfg.user.is_empty()).then(|| file_cfg.user.clone())),
  };

  let client = ApiClient::new(api_config)?;
  run(&client, args.command, args.json).await
}

async fn run(client: &ApiClient, command: Command, json: bool) -> Result<()> {
  match command {
    Command::Checkin { mood, craving, notes, triggers, activity, date } => {
      let req = CheckinRequest {
        date,
        mood,
        craving_intensity: craving,
        notes,
        triggers,
        activities: activity,
      };
      let resp = client.checkin(&req).await?;
      emit(json, &resp, render::checkin)
    }
    Command::Logs { limit } => {
      let mut logs = client.list_logs().await?;
      if let Some(limit) = limit {
        logs.truncate(limit);
      }
      emit(json, &logs, |l: &Vec<_>| render::logs(l))
    }
    Command::Streak { check_in, date } => {
      let status = if check_in {
        client.check_in_streak(date).await?
      } else {
        client.streak().await?
      };
      emit(json, &status, render::streak_status)
    }
    Command::Settings { start_date, weekly_cost, monthly_cost, rate, years } => {
      let patch = SettingsPatch {
        start_date,
        weekly_vape_cost: weekly_cost,
        monthly_vape_cost: monthly_cost,
        investment_rate: rate,
        investment_years: years,
      };
      let settings = if patch.is_empty() {
        client.settings().await?
      } else {
        client.update_settings(&patch).await?
      };
      emit(json, &settings, render::settings)
    }
    Command::Savings => emit(json, &client.savings().await?, render::savings),
    Command::Health => emit(json, &client.health().await?, render::health),
    Command::Calendar { year, month } => {
      let cal = client.calendar(year, month).await?;
      emit(json, &cal, render::calendar)
    }
  }
}

fn emit<T: Serialize>(json: bool, value: &T, summary: impl Fn(&T) -> String) -> Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(value).context("encoding JSON")?);
  } else {
    print!("{}", summary(value));
  }
  Ok(())
}
