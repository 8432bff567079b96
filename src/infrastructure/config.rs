use crate::domain::trend::AnalyticsParams;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub analytics: AnalyticsParams,
}

const MAX_FORECAST_POINTS: usize = 1_000;
const MAX_INTERVAL_SECS: i64 = 366 * 86_400;

impl AnalyticsConfig {
    /// Reject parameters that would make forecasts stall, run backwards or overflow
    pub fn validate(&self) -> anyhow::Result<()> {
        let params = &self.analytics;

        if params.forecast_points > MAX_FORECAST_POINTS {
            anyhow::bail!(
                "analytics.forecast_points must be at most {}, got {}",
                MAX_FORECAST_POINTS,
                params.forecast_points
            );
        }
        if !(1..=MAX_INTERVAL_SECS).contains(&params.default_interval_secs) {
            anyhow::bail!(
                "analytics.default_interval_secs must be in 1..={}, got {}",
                MAX_INTERVAL_SECS,
                params.default_interval_secs
            );
        }
        if !(0.0..=1.0).contains(&params.strong_correlation) {
            anyhow::bail!(
                "analytics.strong_correlation must be in [0, 1], got {}",
                params.strong_correlation
            );
        }
        if !params.stable_slope_ratio.is_finite() || params.stable_slope_ratio < 0.0 {
            anyhow::bail!(
                "analytics.stable_slope_ratio must be a non-negative number, got {}",
                params.stable_slope_ratio
            );
        }

        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    10
}

pub fn load_api_config() -> anyhow::Result<ApiConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/api"))
        .add_source(
            config::Environment::with_prefix("ALERTRACE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_analytics_config() -> anyhow::Result<AnalyticsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/analytics").required(false))
        .add_source(
            config::Environment::with_prefix("ALERTRACE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AnalyticsConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Replace template variables in an API path
pub fn prepare_path(path: &str, vars: &HashMap<String, String>) -> String {
    let mut result = path.to_string();
    for (key, value) in vars {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_path() {
        let mut vars = HashMap::new();
        vars.insert("id".to_string(), "north field/ph".to_string());

        let result = prepare_path("/api/v1/sensors/{id}/readings", &vars);

        assert_eq!(result, "/api/v1/sensors/north%20field%2Fph/readings");
    }

    #[test]
    fn test_analytics_defaults_when_section_missing() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str("", config::FileFormat::Toml))
            .build()
            .unwrap();
        let config: AnalyticsConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.analytics.forecast_points, 6);
        assert_eq!(config.analytics.strong_correlation, 0.7);
    }

    fn analytics_from(toml: &str) -> AnalyticsConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_analytics_are_valid() {
        assert!(AnalyticsConfig::default().validate().is_ok());
        assert!(analytics_from("[analytics]\nforecast_points = 0\n").validate().is_ok());
    }

    #[test]
    fn test_invalid_analytics_rejected() {
        for toml in [
            "[analytics]\ndefault_interval_secs = -3600\n",
            "[analytics]\ndefault_interval_secs = 0\n",
            "[analytics]\ndefault_interval_secs = 9223372036854775807\n",
            "[analytics]\nforecast_points = 5000\n",
            "[analytics]\nstrong_correlation = 1.5\n",
            "[analytics]\nstable_slope_ratio = -0.01\n",
        ] {
            assert!(analytics_from(toml).validate().is_err(), "accepted: {}", toml);
        }
    }

    #[test]
    fn test_analytics_partial_override() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[analytics]\nforecast_points = 12\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: AnalyticsConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.analytics.forecast_points, 12);
        assert_eq!(config.analytics.default_interval_secs, 3600);
    }
}
