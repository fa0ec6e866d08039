//! Storage-level models shared by all repository backends.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{Direction, Metric, Severity, StationId};

/// A single daily observation. Immutable once ingested; a later ingest for
/// the same (station, metric, date) supersedes the stored value (the upstream
/// connectors resolve source quality before handing data to the store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyObservation {
    pub station_id: StationId,
    pub metric: Metric,
    pub date: NaiveDate,
    pub value: f64,
}

/// Static station registry entry. Maintained by the ingestion collaborator;
/// read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub station_id: StationId,
    pub name: String,
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: f64,
    /// Elevation in meters above sea level (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
    pub is_active: bool,
    pub first_obs_date: Option<NaiveDate>,
    pub last_obs_date: Option<NaiveDate>,
    /// Distinct years with usable data, per the registry's own bookkeeping.
    pub coverage_years: Option<u32>,
}

impl Station {
    /// Basic coordinate sanity check, applied on registry upserts.
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err("Latitude must be between -90 and 90 degrees".to_string());
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err("Longitude must be between -180 and 180 degrees".to_string());
        }
        Ok(())
    }
}

/// Which end of the distribution a station record tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Highest,
    Lowest,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Highest => "highest",
            RecordType::Lowest => "lowest",
        }
    }

    /// True when `candidate` is strictly more extreme than `incumbent` for
    /// this record type.
    pub fn beats(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            RecordType::Highest => candidate > incumbent,
            RecordType::Lowest => candidate < incumbent,
        }
    }
}

/// The single most extreme rolling-window value ever observed for one
/// (station, metric, window_days, record_type) key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub station_id: StationId,
    pub metric: Metric,
    pub window_days: u32,
    pub record_type: RecordType,
    pub value: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Years of data backing the record at the time it was computed.
    pub n_years: u32,
}

/// Precomputed insight snapshot, one per (station_id, window_days).
///
/// Lifecycle: created on first successful compute, overwritten only by a
/// compute whose `end_date` is >= the stored one, never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestInsightSnapshot {
    pub station_id: StationId,
    pub window_days: u32,
    pub metric: Metric,
    pub end_date: NaiveDate,
    pub value: Option<f64>,
    pub percentile: Option<f64>,
    pub severity: Severity,
    pub direction: Direction,
    pub primary_statement: String,
    pub supporting_line: String,
    pub coverage_years: u32,
    pub first_year: i32,
    pub computed_at: DateTime<Utc>,
}
