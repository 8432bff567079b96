// Domain layer - Pure models and analytics
pub mod report;
pub mod sensor;
pub mod session;
pub mod statistics;
pub mod telemetry;
pub mod trend;
