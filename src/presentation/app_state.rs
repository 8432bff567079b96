// Application state for HTTP handlers
use crate::application::sensor_service::SensorService;
use crate::application::streaming_service::StreamingTrendService;
use crate::application::trend_service::TrendService;

#[derive(Clone)]
pub struct AppState {
    pub sensor_service: SensorService,
    pub trend_service: TrendService,
    pub streaming_service: StreamingTrendService,
}
