// Summary statistics over a reading series
use super::telemetry::DataPoint;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    pub current: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub change_percent: f64,
}

/// Reduce a series to current/avg/min/max and the percent change between
/// the last two samples. An empty series yields all zeros.
pub fn calculate_statistics(series: &[DataPoint]) -> Statistics {
    let Some(last) = series.last() else {
        return Statistics::default();
    };

    let (sum, min, max) = series.iter().fold(
        (0.0, f64::INFINITY, f64::NEG_INFINITY),
        |(sum, min, max), p| (sum + p.value, min.min(p.value), max.max(p.value)),
    );

    Statistics {
        current: last.value,
        avg: sum / series.len() as f64,
        min,
        max,
        change_percent: change_percent(series),
    }
}

fn change_percent(series: &[DataPoint]) -> f64 {
    match series {
        [.., prev, last] if prev.value != 0.0 => (last.value - prev.value) / prev.value * 100.0,
        _ => 0.0,
    }
}
