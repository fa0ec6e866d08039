use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{Metric, StationId};

// =========================================================
// Series types
// =========================================================

/// One charted day: the rolling value plus its climatology band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p10: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p25: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p50: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p75: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p90: Option<f64>,
}

/// Rolling time series with climatology bands for charting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub station_id: StationId,
    pub window_days: u32,
    pub metric: Metric,
    pub series: Vec<SeriesPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_year: Option<i32>,
}
