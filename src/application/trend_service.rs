// Trend service - Use case for building a sensor's trend report
use crate::application::sensor_repository::SensorRepository;
use crate::domain::report::TrendReport;
use crate::domain::sensor::Sensor;
use crate::domain::session::Session;
use crate::domain::statistics::calculate_statistics;
use crate::domain::telemetry::{downsample, DataPoint};
use crate::domain::trend::{analyze_trend_with, AnalyticsParams};
use std::sync::Arc;

#[derive(Clone)]
pub struct TrendService {
    repository: Arc<dyn SensorRepository>,
    params: AnalyticsParams,
}

impl TrendService {
    pub fn new(repository: Arc<dyn SensorRepository>, params: AnalyticsParams) -> Self {
        Self { repository, params }
    }

    pub async fn trend_report(
        &self,
        session: &Session,
        sensor_id: &str,
        hours: i32,
    ) -> anyhow::Result<TrendReport> {
        let readings = self.repository.get_readings(session, sensor_id, hours).await?;

        let sensor = match self.repository.list_sensors(session).await {
            Ok(sensors) => sensors.into_iter().find(|s| s.id == sensor_id),
            Err(e) => {
                tracing::warn!("Could not list sensors for {}: {}", sensor_id, e);
                None
            }
        }
        .unwrap_or_else(|| Sensor::from_id(sensor_id));

        Ok(build_report(sensor, readings, &self.params))
    }
}

/// Analytics run on the full series; only the chart series is downsampled.
pub(crate) fn build_report(
    sensor: Sensor,
    readings: Vec<DataPoint>,
    params: &AnalyticsParams,
) -> TrendReport {
    let statistics = calculate_statistics(&readings);
    let trend = analyze_trend_with(&readings, params);

    tracing::debug!(
        "Trend for {}: {} samples, direction={}, r={:.3}",
        sensor.id,
        readings.len(),
        trend.direction.as_str(),
        trend.correlation
    );

    let sample_count = readings.len();
    let series = downsample(readings, params.max_series_points);

    TrendReport::new(sensor, statistics, trend, sample_count, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sensor_repository::fake::FakeRepository;
    use crate::domain::session::UserType;
    use crate::domain::trend::TrendDirection;
    use chrono::{Duration, TimeZone, Utc};

    fn session() -> Session {
        Session::new("token".to_string(), UserType::Farmer)
    }

    #[tokio::test]
    async fn test_trend_report_for_known_sensor() {
        let repo = FakeRepository::default().with_sensor("soil_ph", "ph", &[10.0, 20.0, 30.0]);
        let service = TrendService::new(Arc::new(repo), AnalyticsParams::default());

        let report = service.trend_report(&session(), "soil_ph", 24).await.unwrap();

        assert_eq!(report.sensor.kind, "ph");
        assert_eq!(report.sample_count, 3);
        assert_eq!(report.statistics.change_percent, 50.0);
        assert_eq!(report.trend.direction, TrendDirection::Up);
        assert!((report.trend.forecast[0].value - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_series_keeps_latest_reading_and_spike() {
        let readings: Vec<DataPoint> = (0..300)
            .map(|i| {
                let value = match i {
                    100 => 95.0,
                    299 => 40.0,
                    _ => 30.0,
                };
                DataPoint::new(Utc.timestamp_opt(i * 3600, 0).unwrap(), value)
            })
            .collect();
        let last = readings[299].timestamp;

        let report = build_report(Sensor::from_id("greenhouse_temp"), readings, &AnalyticsParams::default());

        assert_eq!(report.statistics.current, 40.0);
        assert_eq!(report.statistics.max, 95.0);
        assert_eq!(report.statistics.min, 30.0);
        assert!((report.statistics.change_percent - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.sample_count, 300);
        assert_eq!(report.series.len(), 150);
        assert_eq!(report.trend.forecast[0].timestamp, last + Duration::seconds(3600));
        assert_eq!(report.trend.forecast[1].timestamp, last + Duration::seconds(7200));
    }

    #[tokio::test]
    async fn test_unknown_sensor_gets_fallback_descriptor() {
        let service = TrendService::new(Arc::new(FakeRepository::default()), AnalyticsParams::default());

        let report = service.trend_report(&session(), "barn_temp", 6).await.unwrap();

        assert_eq!(report.sensor.name, "Barn Temp");
        assert_eq!(report.sample_count, 0);
        assert_eq!(report.statistics.current, 0.0);
        assert_eq!(report.trend.direction, TrendDirection::Stable);
    }

    #[tokio::test]
    async fn test_reading_failure_propagates() {
        let repo = FakeRepository::default()
            .with_sensor("radiation", "radiation", &[1.0])
            .failing_on("radiation");
        let service = TrendService::new(Arc::new(repo), AnalyticsParams::default());

        assert!(service.trend_report(&session(), "radiation", 6).await.is_err());
    }
}
