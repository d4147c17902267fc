//! Async HTTP client wrapping the Clearday JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use clearday_core::{
  insights::{HealthProgress, MonthCalendar, SavingsProjection},
  log::{DailyLog, Mood},
  settings::{SettingsPatch, UserSettings},
  streak::{StreakRecord, StreakStatus},
};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

const USER_HEADER: &str = "X-User-Id";

/// Connection settings for the Clearday API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Sent as `X-User-Id`; the server's default user when `None`.
  pub user:     Option<String>,
}

/// Body of `POST /api/checkin`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date:              Option<DateTime<Utc>>,
  pub mood:              Mood,
  pub craving_intensity: u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes:             Option<String>,
  pub triggers:          Vec<String>,
  pub activities:        Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinResponse {
  pub log:    DailyLog,
  pub streak: StreakRecord,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the Clearday JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn as_user(&self, req: RequestBuilder) -> RequestBuilder {
    match &self.config.user {
      Some(user) => req.header(USER_HEADER, user),
      None => req,
    }
  }

  /// Send `req` and decode a successful JSON response. Failures carry the
  /// server's `error` message when it sent one.
  async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T> {
    tracing::debug!(request = what, "sending");
    let resp = self
      .as_user(req)
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    let resp = check(resp, what).await?;
    resp
      .json()
      .await
      .with_context(|| format!("deserialising {what} response"))
  }

  // ── Check-ins ─────────────────────────────────────────────────────────────

  /// `POST /api/checkin`
  pub async fn checkin(&self, body: &CheckinRequest) -> Result<CheckinResponse> {
    let req = self.client.post(self.url("/checkin")).json(body);
    self.fetch(req, "POST /checkin").await
  }

  // ── Logs ──────────────────────────────────────────────────────────────────

  /// `GET /api/logs`
  pub async fn list_logs(&self) -> Result<Vec<DailyLog>> {
    let req = self.client.get(self.url("/logs"));
    self.fetch(req, "GET /logs").await
  }

  // ── Streak ────────────────────────────────────────────────────────────────

  /// `GET /api/streak`
  pub async fn streak(&self) -> Result<StreakStatus> {
    let req = self.client.get(self.url("/streak"));
    self.fetch(req, "GET /streak").await
  }

  /// `POST /api/streak`: check in without logging.
  pub async fn check_in_streak(&self, date: Option<DateTime<Utc>>) -> Result<StreakStatus> {
    let mut req = self.client.post(self.url("/streak"));
    if let Some(date) = date {
      req = req.json(&serde_json::json!({ "date": date }));
    }
    self.fetch(req, "POST /streak").await
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  /// `GET /api/user`
  pub async fn settings(&self) -> Result<UserSettings> {
    let req = self.client.get(self.url("/user"));
    self.fetch(req, "GET /user").await
  }

  /// `PUT /api/user`
  pub async fn update_settings(&self, patch: &SettingsPatch) -> Result<UserSettings> {
    let req = self.client.put(self.url("/user")).json(patch);
    self.fetch(req, "PUT /user").await
  }

  // ── Insights ──────────────────────────────────────────────────────────────

  /// `GET /api/savings`
  pub async fn savings(&self) -> Result<SavingsProjection> {
    let req = self.client.get(self.url("/savings"));
    self.fetch(req, "GET /savings").await
  }

  /// `GET /api/health`
  pub async fn health(&self) -> Result<HealthProgress> {
    let req = self.client.get(self.url("/health"));
    self.fetch(req, "GET /health").await
  }

  /// `GET /api/calendar[?year=<y>][&month=<m>]`
  pub async fn calendar(&self, year: Option<i32>, month: Option<u32>) -> Result<MonthCalendar> {
    let mut query = Vec::new();
    if let Some(year) = year {
      query.push(("year", year.to_string()));
    }
    if let Some(month) = month {
      query.push(("month", month.to_string()));
    }
    let req = self.client.get(self.url("/calendar")).query(&query);
    self.fetch(req, "GET /calendar").await
  }
}

async fn check(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  match resp.json::<ErrorBody>().await {
    Ok(body) => Err(anyhow!("{what} → {status}: {}", body.error)),
    Err(_) => Err(anyhow!("{what} → {status}")),
  }
}
