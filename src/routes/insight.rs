use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{Direction, Metric, Severity, StationId};
use crate::db::models::RecordType;

// =========================================================
// Insight types
// =========================================================

/// Interquartile range of the climatology: the band of unremarkable values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NormalBand {
    pub p25: f64,
    pub p75: f64,
}

/// How much history stands behind an insight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQuality {
    pub coverage_years: u32,
    pub first_year: i32,
    pub coverage_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_samples: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_year: Option<i32>,
}

/// Attached when the current value ties or beats a stored all-time record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordInfo {
    pub record_type: RecordType,
    pub record_value: f64,
    pub record_start: NaiveDate,
    pub record_end: NaiveDate,
    pub is_new_record: bool,
}

/// The core product output: a severity-classified judgment of one rolling
/// window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightResponse {
    pub station_id: StationId,
    pub end_date: NaiveDate,
    pub window_days: u32,
    pub metric: Metric,
    pub primary_statement: String,
    pub supporting_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub severity: Severity,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_band: Option<NormalBand>,
    pub data_quality: DataQuality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_info: Option<RecordInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_year: Option<i32>,
}
