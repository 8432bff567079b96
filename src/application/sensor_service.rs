// Sensor service - Use case for listing sensors
use crate::application::sensor_repository::SensorRepository;
use crate::domain::sensor::Sensor;
use crate::domain::session::Session;
use std::sync::Arc;

#[derive(Clone)]
pub struct SensorService {
    repository: Arc<dyn SensorRepository>,
}

impl SensorService {
    pub fn new(repository: Arc<dyn SensorRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_sensors(&self, session: &Session) -> anyhow::Result<Vec<Sensor>> {
        let mut sensors = self.repository.list_sensors(session).await?;
        sensors.sort_by(|a, b| a.area.cmp(&b.area).then_with(|| a.name.cmp(&b.name)));
        Ok(sensors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sensor_repository::fake::FakeRepository;
    use crate::domain::session::UserType;

    #[tokio::test]
    async fn test_list_sensors_sorted_by_name() {
        let repo = FakeRepository::default()
            .with_sensor("tank_level", "level", &[])
            .with_sensor("air_humidity", "humidity", &[]);
        let service = SensorService::new(Arc::new(repo));
        let session = Session::new("t".to_string(), UserType::Company);

        let sensors = service.list_sensors(&session).await.unwrap();
        let names: Vec<&str> = sensors.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Air Humidity", "Tank Level"]);
    }

    #[tokio::test]
    async fn test_list_sensors_grouped_by_area() {
        let sensor = |id: &str, area: Option<&str>| {
            Sensor::new(id.to_string(), None, "ph".to_string(), None, area.map(str::to_string))
        };
        let repo = FakeRepository {
            sensors: vec![
                sensor("west_ph", Some("West Field")),
                sensor("tank_level", None),
                sensor("east_ph_b", Some("East Field")),
                sensor("air_humidity", None),
                sensor("east_ph_a", Some("East Field")),
            ],
            ..FakeRepository::default()
        };
        let service = SensorService::new(Arc::new(repo));
        let session = Session::new("t".to_string(), UserType::Farmer);

        let sensors = service.list_sensors(&session).await.unwrap();
        let ids: Vec<&str> = sensors.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["air_humidity", "tank_level", "east_ph_a", "east_ph_b", "west_ph"]
        );
    }
}
