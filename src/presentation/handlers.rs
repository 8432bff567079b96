// HTTP request handlers
use crate::domain::session::Session;
use crate::infrastructure::api_repository::ApiError;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::json_response;
use crate::infrastructure::json_mapper::{report_to_json, sensor_to_json, SensorJson};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_HOURS: i32 = 24;

#[derive(Deserialize)]
pub struct RangeQuery {
    pub hours: Option<i32>,
}

impl RangeQuery {
    fn hours(&self) -> Result<i32, StatusCode> {
        match self.hours {
            Some(h) if h <= 0 => Err(StatusCode::BAD_REQUEST),
            Some(h) => Ok(h),
            None => Ok(DEFAULT_HOURS),
        }
    }
}

/// Whether the client accepts Brotli compression
fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get("accept-encoding")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

/// Map a service error onto a status code
pub fn error_status(error: &anyhow::Error) -> StatusCode {
    match error.downcast_ref::<ApiError>() {
        Some(ApiError::Unauthorized) => StatusCode::UNAUTHORIZED,
        Some(ApiError::NotFound(_)) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn respond(result: Result<Response, StatusCode>) -> Response {
    result.unwrap_or_else(|status| status.into_response())
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the session's sensors
pub async fn list_sensors(
    session: Session,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    match state.sensor_service.list_sensors(&session).await {
        Ok(sensors) => {
            let sensors: Vec<SensorJson> = sensors.into_iter().map(sensor_to_json).collect();
            respond(json_response(&sensors, compress).await)
        }
        Err(e) => {
            tracing::error!("Error fetching sensors: {:#}", e);
            error_status(&e).into_response()
        }
    }
}

/// Trend report for a single sensor
pub async fn sensor_trend(
    Path(id): Path<String>,
    Query(query): Query<RangeQuery>,
    session: Session,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hours = match query.hours() {
        Ok(hours) => hours,
        Err(status) => return status.into_response(),
    };
    let compress = accepts_brotli(&headers);

    match state.trend_service.trend_report(&session, &id, hours).await {
        Ok(report) => respond(json_response(&report_to_json(report), compress).await),
        Err(e) => {
            tracing::error!("Error building trend for {}: {:#}", id, e);
            error_status(&e).into_response()
        }
    }
}

/// Stream trend reports for every sensor (progressive loading)
pub async fn stream_trends(
    Query(query): Query<RangeQuery>,
    session: Session,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hours = match query.hours() {
        Ok(hours) => hours,
        Err(status) => return status.into_response(),
    };
    let compress = accepts_brotli(&headers);

    match state.streaming_service.stream_trends(session, hours).await {
        Ok(rx) => stream_from_receiver(rx, compress).await.into_response(),
        Err(e) => {
            tracing::error!("Error starting trend stream: {:#}", e);
            error_status(&e).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(error_status(&ApiError::Unauthorized.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(
            error_status(&ApiError::NotFound("/api/v1/sensors/x".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(error_status(&anyhow::anyhow!("connection reset")), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_status_through_context() {
        let err = anyhow::Error::from(ApiError::Unauthorized).context("listing sensors");
        assert_eq!(error_status(&err), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));

        headers.insert("accept-encoding", HeaderValue::from_static("gzip, br"));
        assert!(accepts_brotli(&headers));
    }

    #[test]
    fn test_range_query_hours() {
        assert_eq!(RangeQuery { hours: None }.hours(), Ok(DEFAULT_HOURS));
        assert_eq!(RangeQuery { hours: Some(6) }.hours(), Ok(6));
        assert_eq!(RangeQuery { hours: Some(0) }.hours(), Err(StatusCode::BAD_REQUEST));
    }
}
