// Mapper to convert domain models to JSON wire types
use crate::application::streaming_service::StreamMessage;
use crate::domain::report::TrendReport;
use crate::domain::sensor::Sensor;
use crate::domain::statistics::Statistics;
use crate::domain::telemetry::DataPoint;
use crate::domain::trend::TrendAnalysis;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SensorJson {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PointJson {
    pub time_ms: i64,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct StatisticsJson {
    pub current: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub change_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct TrendJson {
    pub direction: &'static str,
    pub slope: f64,
    pub intercept: f64,
    pub correlation: f64,
    pub strong: bool,
    pub forecast: Vec<PointJson>,
}

#[derive(Debug, Serialize)]
pub struct TrendReportJson {
    pub sensor: SensorJson,
    pub statistics: StatisticsJson,
    pub trend: TrendJson,
    pub sample_count: usize,
    pub series: Vec<PointJson>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessageJson {
    Skeleton { sensors: Vec<SensorJson> },
    Report { report: TrendReportJson },
    Failed { sensor_id: String, reason: String },
    Complete { reports: usize, duration_ms: i64 },
}

pub fn sensor_to_json(sensor: Sensor) -> SensorJson {
    SensorJson {
        id: sensor.id,
        name: sensor.name,
        kind: sensor.kind,
        unit: sensor.unit,
        area: sensor.area,
    }
}

fn point_to_json(point: DataPoint) -> PointJson {
    PointJson {
        time_ms: point.time_ms(),
        value: point.value,
    }
}

fn statistics_to_json(stats: Statistics) -> StatisticsJson {
    StatisticsJson {
        current: stats.current,
        avg: stats.avg,
        min: stats.min,
        max: stats.max,
        change_percent: stats.change_percent,
    }
}

fn trend_to_json(trend: TrendAnalysis) -> TrendJson {
    TrendJson {
        direction: trend.direction.as_str(),
        slope: trend.slope,
        intercept: trend.intercept,
        correlation: trend.correlation,
        strong: trend.strong,
        forecast: trend.forecast.into_iter().map(point_to_json).collect(),
    }
}

pub fn report_to_json(report: TrendReport) -> TrendReportJson {
    TrendReportJson {
        sensor: sensor_to_json(report.sensor),
        statistics: statistics_to_json(report.statistics),
        trend: trend_to_json(report.trend),
        sample_count: report.sample_count,
        series: report.series.into_iter().map(point_to_json).collect(),
    }
}

pub fn message_to_json(msg: StreamMessage) -> StreamMessageJson {
    match msg {
        StreamMessage::Skeleton { sensors } => StreamMessageJson::Skeleton {
            sensors: sensors.into_iter().map(sensor_to_json).collect(),
        },
        StreamMessage::Report(report) => StreamMessageJson::Report {
            report: report_to_json(*report),
        },
        StreamMessage::Failed { sensor_id, reason } => StreamMessageJson::Failed { sensor_id, reason },
        StreamMessage::Complete { reports, duration_ms } => {
            StreamMessageJson::Complete { reports, duration_ms }
        }
    }
}
