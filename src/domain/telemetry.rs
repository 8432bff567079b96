// Telemetry data domain models
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl DataPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    pub fn time_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

/// Sort readings ascending by timestamp. Stable, so duplicate timestamps
/// keep the order they arrived in.
pub fn sort_by_time(points: &mut [DataPoint]) {
    points.sort_by_key(|p| p.timestamp);
}

/// Downsample readings using bucket averaging. Bucket sizes differ by at
/// most one, so the output keeps an even spacing and exactly `max_points`
/// samples.
pub fn downsample(points: Vec<DataPoint>, max_points: usize) -> Vec<DataPoint> {
    if max_points == 0 || points.len() <= max_points {
        return points;
    }

    let len = points.len();
    (0..max_points)
        .map(|i| {
            let chunk = &points[i * len / max_points..(i + 1) * len / max_points];

            // Use middle point's timestamp and average value
            let mid_idx = chunk.len() / 2;
            let avg_value = chunk.iter().map(|p| p.value).sum::<f64>() / chunk.len() as f64;

            DataPoint::new(chunk[mid_idx].timestamp, avg_value)
        })
        .collect()
}
