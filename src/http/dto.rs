//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/query deserialization in the REST API.
//! The response DTOs live in the routes module and are re-exported here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Insight
    DataQuality, InsightResponse, NormalBand, RecordInfo,
    // Latest
    LatestInsightItem,
    // Rankings
    ExtremesRankingEntry, ExtremesRankingResponse, SeasonalRankingEntry, SeasonalRankingResponse,
    // Records
    RecordResponse,
    // Series
    SeriesPoint, SeriesResponse,
    // Stations
    StationResponse,
};
use crate::api::Metric;
use crate::db::models::DailyObservation;

fn default_window_days() -> u32 {
    7
}

fn default_metric() -> Metric {
    Metric::TavgC
}

/// Query parameters for the insight endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightQuery {
    pub end_date: NaiveDate,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_metric")]
    pub metric: Metric,
    #[serde(default)]
    pub since_year: Option<i32>,
}

/// Query parameters for the series endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_metric")]
    pub metric: Metric,
    #[serde(default)]
    pub since_year: Option<i32>,
}

/// Query parameters for the records endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsQuery {
    /// Restrict to one metric; all metrics when omitted.
    #[serde(default)]
    pub metric: Option<Metric>,
}

/// Query parameters for the seasonal ranking endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonalRankingQuery {
    pub end_date: NaiveDate,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_metric")]
    pub metric: Metric,
    #[serde(default)]
    pub since_year: Option<i32>,
}

/// Query parameters for the extremes ranking endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtremesRankingQuery {
    pub end_date: NaiveDate,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_metric")]
    pub metric: Metric,
    /// "cold" or "warm" ("dry"/"wet" for precipitation). Required.
    pub direction: String,
    #[serde(default)]
    pub since_year: Option<i32>,
}

/// Query parameters for the latest-available-date endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestDateQuery {
    #[serde(default = "default_metric")]
    pub metric: Metric,
    /// Window the caller intends to query next; 1 means "any observation".
    #[serde(default = "default_latest_date_window")]
    pub window_days: u32,
}

fn default_latest_date_window() -> u32 {
    1
}

/// Response for the latest-available-date endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestDateResponse {
    pub station_id: String,
    pub metric: Metric,
    pub window_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Request body for bulk observation ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub observations: Vec<DailyObservation>,
}

/// Response for bulk observation ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub observations_written: usize,
    /// Records that changed as a result of the ingest.
    pub records_updated: usize,
}

/// Response for triggering a background recompute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeResponse {
    /// Job ID for tracking the async processing
    pub job_id: String,
    /// Message about the operation
    pub message: String,
}

/// Job status response for async processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    /// Job ID
    pub job_id: String,
    /// Job status
    pub status: String,
    /// Log entries
    pub logs: Vec<crate::services::job_tracker::LogEntry>,
    /// Result if completed
    pub result: Option<serde_json::Value>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage backend status
    pub database: String,
}

/// Station list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationListResponse {
    /// List of stations
    pub stations: Vec<StationResponse>,
    /// Total count
    pub total: usize,
}

/// List of cached latest insights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestInsightListResponse {
    pub insights: Vec<LatestInsightItem>,
    pub total: usize,
}
