use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{Metric, StationId};
use crate::db::models::{RecordType, StationRecord};

// =========================================================
// Record types
// =========================================================

/// A stored all-time record for one (metric, window, record type) key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResponse {
    pub station_id: StationId,
    pub metric: Metric,
    pub window_days: u32,
    pub record_type: RecordType,
    pub value: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub n_years: u32,
}

impl From<StationRecord> for RecordResponse {
    fn from(record: StationRecord) -> Self {
        Self {
            station_id: record.station_id,
            metric: record.metric,
            window_days: record.window_days,
            record_type: record.record_type,
            value: record.value,
            start_date: record.start_date,
            end_date: record.end_date,
            n_years: record.n_years,
        }
    }
}
