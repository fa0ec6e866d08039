//! Public API surface for the Rust backend.
//!
//! This file consolidates the shared identifier types and re-exports the DTO
//! types for the HTTP API. All types derive Serialize/Deserialize for JSON
//! serialization.

pub use crate::routes::insight::DataQuality;
pub use crate::routes::insight::InsightResponse;
pub use crate::routes::insight::NormalBand;
pub use crate::routes::insight::RecordInfo;
pub use crate::routes::latest::LatestInsightItem;
pub use crate::routes::rankings::ExtremesRankingEntry;
pub use crate::routes::rankings::ExtremesRankingResponse;
pub use crate::routes::rankings::SeasonalRankingEntry;
pub use crate::routes::rankings::SeasonalRankingResponse;
pub use crate::routes::records::RecordResponse;
pub use crate::routes::series::SeriesPoint;
pub use crate::routes::series::SeriesResponse;
pub use crate::routes::stations::StationResponse;

pub use crate::services::severity::{Direction, Severity};

use serde::{Deserialize, Serialize};

/// Weather station identifier (GHCN-style, e.g. `USW00094728`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationId(pub String);

impl StationId {
    pub fn new(value: impl Into<String>) -> Self {
        StationId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        StationId(s.to_string())
    }
}

/// Daily observation metric.
///
/// Temperature metrics aggregate by mean over a rolling window; precipitation
/// aggregates by sum (a 7-day precipitation total, not a mean rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Daily mean temperature, Celsius
    #[serde(rename = "tavg_c")]
    TavgC,
    /// Daily minimum temperature, Celsius
    #[serde(rename = "tmin_c")]
    TminC,
    /// Daily maximum temperature, Celsius
    #[serde(rename = "tmax_c")]
    TmaxC,
    /// Daily precipitation, millimetres
    #[serde(rename = "prcp_mm")]
    PrcpMm,
}

impl Metric {
    /// All supported metrics.
    pub const ALL: [Metric; 4] = [Metric::TavgC, Metric::TminC, Metric::TmaxC, Metric::PrcpMm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::TavgC => "tavg_c",
            Metric::TminC => "tmin_c",
            Metric::TmaxC => "tmax_c",
            Metric::PrcpMm => "prcp_mm",
        }
    }

    /// Whether this metric is a temperature (warm/cold direction) as opposed
    /// to precipitation (wet/dry direction).
    pub fn is_temperature(&self) -> bool {
        !matches!(self, Metric::PrcpMm)
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tavg_c" => Ok(Metric::TavgC),
            "tmin_c" => Ok(Metric::TminC),
            "tmax_c" => Ok(Metric::TmaxC),
            "prcp_mm" => Ok(Metric::PrcpMm),
            other => Err(format!("Unknown metric: {}", other)),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Convert Celsius to Fahrenheit, rounded to one decimal place.
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    ((c * 9.0 / 5.0 + 32.0) * 10.0).round() / 10.0
}
