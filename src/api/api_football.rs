use super::{DateFetch, FixtureSource};
use crate::models::Goals;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const API_FOOTBALL_BASE_URL: &str = "https://v3.football.api-sports.io";
pub const API_FOOTBALL_HOST: &str = "api-football-v1.p.rapidapi.com";

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to fixtures endpoint failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("fixtures endpoint returned {0}")]
    Status(reqwest::StatusCode),
    #[error("fixtures endpoint rejected the request: {0}")]
    Rejected(String),
    #[error("failed to parse fixtures response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Envelope of `GET /fixtures`
#[derive(Debug, Deserialize)]
struct FixturesResponse {
    // `[]` when fine, `{"plan": "..."}` style object when the request was refused
    #[serde(default)]
    errors: serde_json::Value,
    #[serde(default)]
    response: Option<Vec<serde_json::Value>>,
}

/// One raw fixture record as API-Football sends it
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub fixture: FixtureInfo,
    pub league: League,
    pub teams: Teams,
    #[serde(default, deserialize_with = "null_default")]
    pub goals: Goals,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureInfo {
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_default")]
    pub status: FixtureStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureStatus {
    #[serde(default)]
    pub short: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct League {
    pub id: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Teams {
    pub home: Team,
    pub away: Team,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

// The upstream sends `null` for blocks it has no data for yet
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub struct ApiFootballClient {
    api_key: String,
    base_url: String,
    host: String,
    client: reqwest::Client,
}

impl ApiFootballClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, API_FOOTBALL_BASE_URL, API_FOOTBALL_HOST)
    }

    pub fn with_endpoint(api_key: String, base_url: &str, host: &str) -> Self {
        Self::with_http_client(api_key, base_url, host, reqwest::Client::new())
    }

    pub fn with_http_client(
        api_key: String,
        base_url: &str,
        host: &str,
        client: reqwest::Client,
    ) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            host: host.to_string(),
            client,
        }
    }

    /// Fetch every fixture the upstream lists for `date` (YYYY-MM-DD)
    pub async fn request_fixtures(&self, date: NaiveDate) -> Result<Vec<Fixture>, FetchError> {
        let url = format!("{}/fixtures", self.base_url);
        let day = date.format("%Y-%m-%d").to_string();

        info!(date = %day, "Fetching fixtures");

        let response = self
            .client
            .get(&url)
            .query(&[("date", day.as_str())])
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(API_HOST_HEADER, self.host.as_str())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body: FixturesResponse = response.json().await.map_err(FetchError::Decode)?;
        unpack_response(body)
    }
}

impl FixtureSource for ApiFootballClient {
    async fn fetch_fixtures(&self, date: NaiveDate) -> DateFetch {
        let result = self.request_fixtures(date).await;
        if let Err(e) = &result {
            // Free plans refuse dates outside a small window; keep going with what we have
            warn!(date = %date, error = %e, "Fixtures unavailable for date");
        }
        DateFetch { date, result }
    }
}

fn unpack_response(body: FixturesResponse) -> Result<Vec<Fixture>, FetchError> {
    if let Some(reason) = rejection_reason(&body.errors) {
        return Err(FetchError::Rejected(reason));
    }

    let raw = body.response.unwrap_or_default();
    let total = raw.len();
    let fixtures: Vec<Fixture> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Fixture>(value) {
            Ok(fixture) => Some(fixture),
            Err(e) => {
                warn!(error = %e, "Skipping malformed fixture record");
                None
            }
        })
        .collect();

    debug!(total, kept = fixtures.len(), "Decoded fixtures");
    Ok(fixtures)
}

fn rejection_reason(errors: &serde_json::Value) -> Option<String> {
    let describe = |v: &serde_json::Value| match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    match errors {
        serde_json::Value::Object(map) if !map.is_empty() => Some(
            map.iter()
                .map(|(key, value)| format!("{}: {}", key, describe(value)))
                .collect::<Vec<_>>()
                .join("; "),
        ),
        serde_json::Value::Array(items) if !items.is_empty() => {
            Some(items.iter().map(describe).collect::<Vec<_>>().join("; "))
        }
        _ => None,
    }
}
