// Trend analysis: least-squares fit over sample index plus a linear forecast
use super::telemetry::DataPoint;
use chrono::Duration;
use serde::Deserialize;

/// Tunable knobs for trend classification and forecasting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsParams {
    /// Number of points projected past the last sample
    pub forecast_points: usize,
    /// |r| above this marks a strong trend
    pub strong_correlation: f64,
    /// Slope threshold as a fraction of the series' mean magnitude per step
    pub stable_slope_ratio: f64,
    /// Forecast spacing when the series has no usable interval
    pub default_interval_secs: i64,
    /// Cap on the chart series returned alongside a report
    pub max_series_points: usize,
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            forecast_points: 6,
            strong_correlation: 0.7,
            stable_slope_ratio: 0.01,
            default_interval_secs: 3600,
            max_series_points: 150,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Ordinary least-squares fit of value against sample index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub correlation: f64,
}

impl Regression {
    pub fn fit(series: &[DataPoint]) -> Self {
        let n = series.len();
        if n < 2 {
            return Self {
                slope: 0.0,
                intercept: series.first().map(|p| p.value).unwrap_or(0.0),
                correlation: 0.0,
            };
        }

        let n_f = n as f64;
        let x_mean = (n_f - 1.0) / 2.0;
        let y_mean = series.iter().map(|p| p.value).sum::<f64>() / n_f;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        for (i, p) in series.iter().enumerate() {
            let dx = i as f64 - x_mean;
            let dy = p.value - y_mean;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }

        let slope = sxy / sxx;
        let denom = (sxx * syy).sqrt();
        let correlation = if denom > 0.0 && denom.is_finite() {
            (sxy / denom).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        Self {
            slope,
            intercept: y_mean - slope * x_mean,
            correlation,
        }
    }

    pub fn value_at(&self, index: f64) -> f64 {
        self.slope * index + self.intercept
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendAnalysis {
    pub direction: TrendDirection,
    pub slope: f64,
    pub intercept: f64,
    pub correlation: f64,
    pub strong: bool,
    pub forecast: Vec<DataPoint>,
}

/// Trend analysis with the default parameters.
pub fn analyze_trend(series: &[DataPoint]) -> TrendAnalysis {
    analyze_trend_with(series, &AnalyticsParams::default())
}

/// Fit the series, classify its direction and project a forecast.
pub fn analyze_trend_with(series: &[DataPoint], params: &AnalyticsParams) -> TrendAnalysis {
    let regression = Regression::fit(series);

    TrendAnalysis {
        direction: classify(series, &regression, params),
        slope: regression.slope,
        intercept: regression.intercept,
        correlation: regression.correlation,
        strong: regression.correlation.abs() > params.strong_correlation,
        forecast: forecast(series, &regression, params),
    }
}

/// Compare the slope against a threshold scaled by the series' mean
/// magnitude, so pH and radiation readings classify alike.
fn classify(series: &[DataPoint], regression: &Regression, params: &AnalyticsParams) -> TrendDirection {
    if series.len() < 2 {
        return TrendDirection::Stable;
    }

    let magnitude = series.iter().map(|p| p.value.abs()).sum::<f64>() / series.len() as f64;
    let threshold = params.stable_slope_ratio * magnitude;

    if regression.slope > threshold {
        TrendDirection::Up
    } else if regression.slope < -threshold {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}

/// Project the fitted line past the last sample at the series' own spacing.
pub fn forecast(series: &[DataPoint], regression: &Regression, params: &AnalyticsParams) -> Vec<DataPoint> {
    let Some(last) = series.last() else {
        return Vec::new();
    };

    let step = match series {
        [.., prev, last] if last.timestamp > prev.timestamp => last.timestamp - prev.timestamp,
        _ => match Duration::try_seconds(params.default_interval_secs) {
            Some(interval) if interval > Duration::zero() => interval,
            _ => return Vec::new(),
        },
    };

    // Stops early rather than overflow the timestamp range
    let last_index = series.len() - 1;
    (1..=params.forecast_points)
        .map_while(|k| {
            let offset = step.checked_mul(i32::try_from(k).ok()?)?;
            let timestamp = last.timestamp.checked_add_signed(offset)?;
            Some(DataPoint::new(timestamp, regression.value_at((last_index + k) as f64)))
        })
        .collect()
}
