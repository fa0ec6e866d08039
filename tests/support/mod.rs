use chrono::{Datelike, Duration, NaiveDate};

use eti_rust::api::{Metric, StationId};
use eti_rust::db::models::{DailyObservation, Station};
use eti_rust::db::repositories::LocalRepository;
use eti_rust::db::repository::{ObservationRepository, StationRepository};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn station_id(id: &str) -> StationId {
    StationId::new(id)
}

/// Register a minimal station entry.
pub async fn register_station(repo: &LocalRepository, id: &str) {
    repo.upsert_station(&Station {
        station_id: station_id(id),
        name: format!("Station {}", id),
        latitude: 41.9,
        longitude: -87.6,
        elevation_m: Some(182.0),
        is_active: true,
        first_obs_date: None,
        last_obs_date: None,
        coverage_years: None,
    })
    .await
    .unwrap();
}

/// Seed gap-free daily observations over `[first, last]` with a value
/// function of the date.
pub async fn seed_daily(
    repo: &LocalRepository,
    id: &str,
    metric: Metric,
    first: NaiveDate,
    last: NaiveDate,
    value_of: impl Fn(NaiveDate) -> f64,
) {
    let mut batch = Vec::new();
    let mut date = first;
    while date <= last {
        batch.push(DailyObservation {
            station_id: station_id(id),
            metric,
            date,
            value: value_of(date),
        });
        date += Duration::days(1);
    }
    repo.ingest_observations(&batch).await.unwrap();
}

/// A plausible temperature: seasonal sinusoid plus a slow per-year trend.
pub fn seasonal_temperature(date: NaiveDate, base_year: i32) -> f64 {
    let doy = date.ordinal() as f64;
    let seasonal = 10.0 - 15.0 * (2.0 * std::f64::consts::PI * doy / 365.25).cos();
    let trend = (date.year() - base_year) as f64 * 0.02;
    seasonal + trend
}
