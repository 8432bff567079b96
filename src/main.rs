// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use alertrace_analytics::application::sensor_service::SensorService;
use alertrace_analytics::application::streaming_service::StreamingTrendService;
use alertrace_analytics::application::trend_service::TrendService;
use alertrace_analytics::infrastructure::api_repository::ApiRepository;
use alertrace_analytics::infrastructure::config::{load_analytics_config, load_api_config};
use alertrace_analytics::presentation::app_state::AppState;
use alertrace_analytics::presentation::handlers::{health_check, list_sensors, sensor_trend, stream_trends};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let api_config = load_api_config()?;
    let analytics = load_analytics_config()?.analytics;

    // Create repository (infrastructure layer)
    let repository = Arc::new(ApiRepository::new(
        api_config.api.base_url,
        api_config.api.timeout_secs,
    )?);

    // Create services (application layer)
    let sensor_service = SensorService::new(repository.clone());
    let trend_service = TrendService::new(repository.clone(), analytics.clone());
    let streaming_service = StreamingTrendService::new(repository, analytics);

    let state = Arc::new(AppState {
        sensor_service,
        trend_service,
        streaming_service,
    });

    // Build router (presentation layer)
    // Compression is done in the response builders, so no CompressionLayer here
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/sensors", get(list_sensors))
        .route("/sensors/:id/trend", get(sensor_trend))
        .route("/trends/stream", get(stream_trends))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = api_config.server.bind.parse()?;
    tracing::info!("Starting alertrace-analytics service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
