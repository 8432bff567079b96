// Repository trait for sensor data access
use crate::domain::sensor::Sensor;
use crate::domain::session::Session;
use crate::domain::telemetry::DataPoint;
use async_trait::async_trait;

#[async_trait]
pub trait SensorRepository: Send + Sync {
    /// List the sensors visible to this session
    async fn list_sensors(&self, session: &Session) -> anyhow::Result<Vec<Sensor>>;

    /// Readings for one sensor over the last `hours`, ascending by timestamp
    async fn get_readings(
        &self,
        session: &Session,
        sensor_id: &str,
        hours: i32,
    ) -> anyhow::Result<Vec<DataPoint>>;
}
