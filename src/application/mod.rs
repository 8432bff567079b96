// Application layer - Use cases over the sensor repository
pub mod sensor_repository;
pub mod sensor_service;
pub mod streaming_service;
pub mod trend_service;
