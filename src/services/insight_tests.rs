use chrono::{Datelike, Duration, NaiveDate};

use crate::api::{Metric, StationId};
use crate::config::EngineSettings;
use crate::db::models::{DailyObservation, Station};
use crate::db::repositories::LocalRepository;
use crate::db::repository::{ObservationRepository, StationRepository};
use crate::services::insight::{get_insight, resolve_latest_available_date};
use crate::services::severity::{Direction, Severity};
use crate::services::ComputeError;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn station_id() -> StationId {
    StationId::new("TEST0001")
}

fn config() -> EngineSettings {
    EngineSettings::default()
}

async fn seed_station(repo: &LocalRepository) {
    repo.upsert_station(&Station {
        station_id: station_id(),
        name: "Test Station".to_string(),
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

/// Seed gap-free daily data for 1990..=2019 where every day of year y has
/// `value_of(y)`.
async fn seed_observations(repo: &LocalRepository, value_of: impl Fn(i32) -> f64) {
    let mut batch = Vec::new();
    let mut date = d(1990, 1, 1);
    let last = d(2019, 12, 31);
    while date <= last {
        batch.push(DailyObservation {
            station_id: station_id(),
            metric: Metric::TavgC,
            date,
            value: value_of(date.year()),
        });
        date += Duration::days(1);
    }
    repo.ingest_observations(&batch).await.unwrap();
}

#[tokio::test]
async fn test_second_coldest_week_is_boundary_unusual() {
    let repo = LocalRepository::new();
    seed_station(&repo).await;
    // One historical year colder than the current week, 28 warmer.
    seed_observations(&repo, |y| match y {
        1990 => -10.0,
        2019 => -9.0,
        other => (other - 1990) as f64,
    })
    .await;

    let insight = get_insight(
        &repo,
        &config(),
        &station_id(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        None,
    )
    .await
    .unwrap();

    // Mid-rank of the 2nd-coldest among 30 aligned values: exactly 5.0,
    // which sits on the unusual/extreme boundary and stays unusual.
    assert_eq!(insight.percentile, Some(5.0));
    assert_eq!(insight.severity, Severity::Unusual);
    assert_eq!(insight.direction, Direction::Cold);
    assert_eq!(insight.data_quality.n_samples, Some(29));
    assert_eq!(insight.data_quality.coverage_years, 30);
    assert_eq!(insight.data_quality.first_year, 1990);
}

#[tokio::test]
async fn test_one_year_history_degrades_to_insufficient_data() {
    let repo = LocalRepository::new();
    seed_station(&repo).await;
    let mut batch = Vec::new();
    let mut date = d(2019, 1, 1);
    while date <= d(2019, 12, 31) {
        batch.push(DailyObservation {
            station_id: station_id(),
            metric: Metric::TavgC,
            date,
            value: 10.0,
        });
        date += Duration::days(1);
    }
    repo.ingest_observations(&batch).await.unwrap();

    let insight = get_insight(
        &repo,
        &config(),
        &station_id(),
        d(2019, 12, 31),
        30,
        Metric::TavgC,
        None,
    )
    .await
    .unwrap();

    assert_eq!(insight.severity, Severity::InsufficientData);
    assert_eq!(insight.percentile, None);
    assert!(insight.normal_band.is_none());
    assert_eq!(insight.direction, Direction::Neutral);
    // Still a well-formed insight with a value
    assert!(insight.value.is_some());
}

#[tokio::test]
async fn test_warmest_week_gets_record_framing() {
    let repo = LocalRepository::new();
    seed_station(&repo).await;
    seed_observations(&repo, |y| if y == 2019 { 30.0 } else { (y % 10) as f64 }).await;

    let insight = get_insight(
        &repo,
        &config(),
        &station_id(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        None,
    )
    .await
    .unwrap();

    assert_eq!(insight.severity, Severity::Extreme);
    assert_eq!(insight.direction, Direction::Warm);
    assert!(
        insight.primary_statement.contains("warmest on record"),
        "got: {}",
        insight.primary_statement
    );
}

#[tokio::test]
async fn test_normal_band_brackets_normal_value() {
    let repo = LocalRepository::new();
    seed_station(&repo).await;
    // Current year sits in the middle of the historical spread.
    seed_observations(&repo, |y| if y == 2019 { 15.0 } else { (y - 1990) as f64 }).await;

    let insight = get_insight(
        &repo,
        &config(),
        &station_id(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        None,
    )
    .await
    .unwrap();

    let band = insight.normal_band.unwrap();
    assert!(band.p25 < band.p75);
    assert_eq!(insight.severity, Severity::Normal);
    // Normal severity still reads a direction, just not as an intensity
    assert_ne!(insight.direction, Direction::Neutral);
}

#[tokio::test]
async fn test_since_year_shrinks_reference() {
    let repo = LocalRepository::new();
    seed_station(&repo).await;
    seed_observations(&repo, |y| (y - 1990) as f64).await;

    let insight = get_insight(
        &repo,
        &config(),
        &station_id(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        Some(2005),
    )
    .await
    .unwrap();

    assert_eq!(insight.data_quality.n_samples, Some(14)); // 2005..=2018
    assert_eq!(insight.data_quality.first_year, 2005);
    assert_eq!(insight.data_quality.since_year, Some(2005));
    assert!(insight.supporting_line.contains("2005"));
}

#[tokio::test]
async fn test_unknown_station_is_hard_error() {
    let repo = LocalRepository::new();
    let result = get_insight(
        &repo,
        &config(),
        &StationId::new("NOPE"),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        None,
    )
    .await;
    assert!(matches!(result, Err(ComputeError::Repository(_))));
}

#[tokio::test]
async fn test_missing_window_is_no_data_for_date() {
    let repo = LocalRepository::new();
    seed_station(&repo).await;
    seed_observations(&repo, |y| (y - 1990) as f64).await;

    let result = get_insight(
        &repo,
        &config(),
        &station_id(),
        d(2030, 7, 15),
        7,
        Metric::TavgC,
        None,
    )
    .await;
    assert!(matches!(result, Err(ComputeError::NoDataForDate { .. })));
}

#[tokio::test]
async fn test_zero_window_is_invalid() {
    let repo = LocalRepository::new();
    seed_station(&repo).await;
    let result = get_insight(
        &repo,
        &config(),
        &station_id(),
        d(2019, 7, 15),
        0,
        Metric::TavgC,
        None,
    )
    .await;
    assert!(matches!(result, Err(ComputeError::InvalidParameter(_))));
}

#[tokio::test]
async fn test_resolve_latest_walks_past_sparse_tail() {
    let repo = LocalRepository::new();
    seed_station(&repo).await;

    // Dense data through Dec 24, then a lone observation on Dec 31.
    let mut batch = Vec::new();
    let mut date = d(2019, 1, 1);
    while date <= d(2019, 12, 24) {
        batch.push(DailyObservation {
            station_id: station_id(),
            metric: Metric::TavgC,
            date,
            value: 5.0,
        });
        date += Duration::days(1);
    }
    batch.push(DailyObservation {
        station_id: station_id(),
        metric: Metric::TavgC,
        date: d(2019, 12, 31),
        value: 5.0,
    });
    repo.ingest_observations(&batch).await.unwrap();

    let resolved = resolve_latest_available_date(
        &repo,
        &config(),
        &station_id(),
        Metric::TavgC,
        7,
    )
    .await
    .unwrap();

    // Windows ending Dec 28..31 are under the 0.5 coverage floor; Dec 27 is
    // the freshest end date with 4 of 7 days observed.
    assert_eq!(resolved, Some(d(2019, 12, 27)));
}

#[tokio::test]
async fn test_resolve_latest_none_without_observations() {
    let repo = LocalRepository::new();
    seed_station(&repo).await;
    let resolved = resolve_latest_available_date(
        &repo,
        &config(),
        &station_id(),
        Metric::TavgC,
        7,
    )
    .await
    .unwrap();
    assert_eq!(resolved, None);
}
