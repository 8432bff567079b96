// Streaming trend service - Progressive delivery of per-sensor reports
use crate::application::sensor_repository::SensorRepository;
use crate::application::trend_service::build_report;
use crate::domain::report::TrendReport;
use crate::domain::sensor::Sensor;
use crate::domain::session::Session;
use crate::domain::trend::AnalyticsParams;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub enum StreamMessage {
    Skeleton { sensors: Vec<Sensor> },
    Report(Box<TrendReport>),
    Failed { sensor_id: String, reason: String },
    Complete { reports: usize, duration_ms: i64 },
}

#[derive(Clone)]
pub struct StreamingTrendService {
    repository: Arc<dyn SensorRepository>,
    params: AnalyticsParams,
}

impl StreamingTrendService {
    pub fn new(repository: Arc<dyn SensorRepository>, params: AnalyticsParams) -> Self {
        Self { repository, params }
    }

    /// Send the sensor skeleton, then one report per sensor as it completes,
    /// then a completion event once every sensor task has finished.
    pub async fn stream_trends(
        &self,
        session: Session,
        hours: i32,
    ) -> anyhow::Result<mpsc::Receiver<StreamMessage>> {
        let start_time = Instant::now();
        let sensors = self.repository.list_sensors(&session).await?;
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        tracing::debug!("Streaming trends for {} sensors over {}h", sensors.len(), hours);

        // 1. Skeleton first so clients can lay out placeholders
        let _ = tx
            .send(StreamMessage::Skeleton {
                sensors: sensors.clone(),
            })
            .await;

        // 2. One task per sensor
        let session = Arc::new(session);
        let mut handles = Vec::with_capacity(sensors.len());
        for sensor in sensors {
            let tx = tx.clone();
            let repo = self.repository.clone();
            let params = self.params.clone();
            let session = session.clone();

            handles.push(tokio::spawn(async move {
                match repo.get_readings(&session, &sensor.id, hours).await {
                    Ok(readings) => {
                        let report = build_report(sensor, readings, &params);
                        tx.send(StreamMessage::Report(Box::new(report))).await.is_ok()
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load readings for {}: {}", sensor.id, e);
                        let _ = tx
                            .send(StreamMessage::Failed {
                                sensor_id: sensor.id,
                                reason: e.to_string(),
                            })
                            .await;
                        false
                    }
                }
            }));
        }

        // 3. Completion after every sensor task is done
        tokio::spawn(async move {
            let reports = futures::future::join_all(handles)
                .await
                .into_iter()
                .filter(|delivered| matches!(delivered, Ok(true)))
                .count();

            let duration_ms = start_time.elapsed().as_millis() as i64;
            let _ = tx.send(StreamMessage::Complete { reports, duration_ms }).await;
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sensor_repository::fake::FakeRepository;
    use crate::domain::session::UserType;

    async fn collect(mut rx: mpsc::Receiver<StreamMessage>) -> Vec<StreamMessage> {
        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }
        messages
    }

    #[tokio::test]
    async fn test_stream_order_and_completion() {
        let repo = FakeRepository::default()
            .with_sensor("soil_ph", "ph", &[6.5, 6.6, 6.7])
            .with_sensor("radiation", "radiation", &[800.0, 810.0])
            .with_sensor("humidity", "humidity", &[40.0])
            .failing_on("humidity");
        let service = StreamingTrendService::new(Arc::new(repo), AnalyticsParams::default());
        let session = Session::new("token".to_string(), UserType::Farmer);

        let rx = service.stream_trends(session, 12).await.unwrap();
        let messages = collect(rx).await;

        assert_eq!(messages.len(), 5);
        assert!(matches!(&messages[0], StreamMessage::Skeleton { sensors } if sensors.len() == 3));
        assert!(matches!(messages[4], StreamMessage::Complete { reports: 2, .. }));

        let reports = messages
            .iter()
            .filter(|m| matches!(m, StreamMessage::Report(_)))
            .count();
        assert_eq!(reports, 2);
        assert!(messages.iter().any(
            |m| matches!(m, StreamMessage::Failed { sensor_id, .. } if sensor_id == "humidity")
        ));
    }

    #[tokio::test]
    async fn test_stream_without_sensors_completes() {
        let service =
            StreamingTrendService::new(Arc::new(FakeRepository::default()), AnalyticsParams::default());
        let session = Session::new("token".to_string(), UserType::Company);

        let messages = collect(service.stream_trends(session, 6).await.unwrap()).await;

        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[1], StreamMessage::Complete { reports: 0, .. }));
    }
}
