// Trend report domain model
use super::sensor::Sensor;
use super::statistics::Statistics;
use super::telemetry::DataPoint;
use super::trend::TrendAnalysis;

#[derive(Debug, Clone)]
pub struct TrendReport {
    pub sensor: Sensor,
    pub statistics: Statistics,
    pub trend: TrendAnalysis,
    pub sample_count: usize,
    /// Readings for charting, possibly downsampled
    pub series: Vec<DataPoint>,
}

impl TrendReport {
    pub fn new(
        sensor: Sensor,
        statistics: Statistics,
        trend: TrendAnalysis,
        sample_count: usize,
        series: Vec<DataPoint>,
    ) -> Self {
        Self {
            sensor,
            statistics,
            trend,
            sample_count,
            series,
        }
    }
}
