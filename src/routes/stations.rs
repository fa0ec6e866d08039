use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::StationId;
use crate::db::models::Station;

// =========================================================
// Station registry types
// =========================================================

/// Station registry entry as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationResponse {
    pub station_id: StationId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_years: Option<u32>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_obs_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_obs_date: Option<NaiveDate>,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            station_id: station.station_id,
            name: station.name,
            lat: station.latitude,
            lon: station.longitude,
            elevation_m: station.elevation_m,
            coverage_years: station.coverage_years,
            is_active: station.is_active,
            first_obs_date: station.first_obs_date,
            last_obs_date: station.last_obs_date,
        }
    }
}
