// AlerTrace REST API repository implementation
use crate::application::sensor_repository::SensorRepository;
use crate::domain::sensor::Sensor;
use crate::domain::session::Session;
use crate::domain::telemetry::{sort_by_time, DataPoint};
use crate::infrastructure::config::prepare_path;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::time::Duration;

const SENSORS_PATH: &str = "/api/v1/sensors";
const READINGS_PATH: &str = "/api/v1/sensors/{id}/readings";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("AlerTrace API rejected the session token")]
    Unauthorized,
    #[error("AlerTrace API resource not found: {0}")]
    NotFound(String),
    #[error("AlerTrace API request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct ApiRepository {
    base_url: String,
    client: reqwest::Client,
}

/// The API wraps some payloads in `{"data": ...}` and returns others bare
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SensorDto {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    area: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReadingDto {
    timestamp: DateTime<Utc>,
    value: f64,
}

fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid sensor id: {}", other))),
    }
}

impl ApiRepository {
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(&session.token)
            .header("X-User-Type", session.user_type.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to AlerTrace API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, path, body).into());
        }

        let data = response
            .json::<Envelope<T>>()
            .await
            .context("Failed to parse AlerTrace API response")?;

        Ok(data.into_inner())
    }
}

fn status_error(status: StatusCode, path: &str, body: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound(path.to_string()),
        _ => ApiError::Upstream {
            status: status.as_u16(),
            body,
        },
    }
}

fn to_points(readings: Vec<ReadingDto>) -> Vec<DataPoint> {
    let mut points: Vec<DataPoint> = readings
        .into_iter()
        .filter(|r| r.value.is_finite())
        .map(|r| DataPoint::new(r.timestamp, r.value))
        .collect();

    sort_by_time(&mut points);
    points
}

#[async_trait]
impl SensorRepository for ApiRepository {
    async fn list_sensors(&self, session: &Session) -> Result<Vec<Sensor>> {
        let sensors: Vec<SensorDto> = self.get_json(session, SENSORS_PATH, &[]).await?;

        tracing::debug!("Found {} sensors for {} session", sensors.len(), session.user_type.as_str());

        Ok(sensors
            .into_iter()
            .map(|s| {
                Sensor::new(
                    s.id,
                    s.name,
                    s.kind.unwrap_or_else(|| "unknown".to_string()),
                    s.unit,
                    s.area,
                )
            })
            .collect())
    }

    async fn get_readings(&self, session: &Session, sensor_id: &str, hours: i32) -> Result<Vec<DataPoint>> {
        let mut vars = HashMap::new();
        vars.insert("id".to_string(), sensor_id.to_string());
        let path = prepare_path(READINGS_PATH, &vars);

        let readings: Vec<ReadingDto> = self
            .get_json(session, &path, &[("hours", hours.to_string())])
            .await?;

        let points = to_points(readings);
        tracing::debug!("Sensor {}: {} readings", sensor_id, points.len());

        Ok(points)
    }
}
