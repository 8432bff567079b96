// Sensor trend analytics for the AlerTrace monitoring platform
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use domain::statistics::{calculate_statistics, Statistics};
pub use domain::telemetry::DataPoint;
pub use domain::trend::{analyze_trend, analyze_trend_with, AnalyticsParams, TrendAnalysis, TrendDirection};
