mod support;

use chrono::Utc;

use eti_rust::api::Metric;
use eti_rust::config::EngineSettings;
use eti_rust::db::models::{DailyObservation, LatestInsightSnapshot, RecordType};
use eti_rust::db::repositories::LocalRepository;
use eti_rust::db::repository::DerivedStateRepository;
use eti_rust::services;
use eti_rust::services::severity::{Direction, Severity};

use support::{date, register_station, seed_daily, station_id};

const STATION: &str = "USW00094728";

fn small_config() -> EngineSettings {
    let mut config = EngineSettings::default();
    config.window_days = vec![7, 30];
    config
}

async fn seeded_repo() -> LocalRepository {
    let repo = LocalRepository::new();
    register_station(&repo, STATION).await;
    // Flat 10 degree record with one hot week in 2010 and one cold week in 1995
    seed_daily(
        &repo,
        STATION,
        Metric::TavgC,
        date(1990, 1, 1),
        date(2019, 12, 31),
        |d| {
            if d >= date(2010, 7, 1) && d <= date(2010, 7, 7) {
                35.0
            } else if d >= date(1995, 1, 10) && d <= date(1995, 1, 16) {
                -25.0
            } else {
                10.0
            }
        },
    )
    .await;
    repo
}

#[tokio::test]
async fn test_records_found_across_whole_history() {
    let repo = seeded_repo().await;
    let config = small_config();

    services::recompute_all_records(&repo, &config, &station_id(STATION))
        .await
        .unwrap();

    let records = services::get_station_records(&repo, &station_id(STATION), Some(Metric::TavgC))
        .await
        .unwrap();

    // highest + lowest for each configured window
    assert_eq!(records.len(), 4);

    let highest_week = records
        .iter()
        .find(|r| r.window_days == 7 && r.record_type == RecordType::Highest)
        .unwrap();
    assert_eq!(highest_week.value, 35.0);
    assert_eq!(highest_week.start_date, date(2010, 7, 1));
    assert_eq!(highest_week.end_date, date(2010, 7, 7));
    assert_eq!(highest_week.n_years, 30);

    let lowest_week = records
        .iter()
        .find(|r| r.window_days == 7 && r.record_type == RecordType::Lowest)
        .unwrap();
    assert_eq!(lowest_week.value, -25.0);
    assert_eq!(lowest_week.end_date, date(1995, 1, 16));
}

#[tokio::test]
async fn test_ingest_updates_beaten_record_and_leaves_others() {
    let repo = seeded_repo().await;
    let config = small_config();
    services::recompute_all_records(&repo, &config, &station_id(STATION))
        .await
        .unwrap();

    let before = services::get_station_records(&repo, &station_id(STATION), Some(Metric::TavgC))
        .await
        .unwrap();
    let lowest_before = before
        .iter()
        .find(|r| r.window_days == 7 && r.record_type == RecordType::Lowest)
        .unwrap()
        .clone();

    // A week in 2020 hotter than the 2010 record
    let batch: Vec<DailyObservation> = (1..=7)
        .map(|day| DailyObservation {
            station_id: station_id(STATION),
            metric: Metric::TavgC,
            date: date(2020, 7, day),
            value: 40.0,
        })
        .collect();
    let outcome = services::ingest_observations(&repo, &config, &batch)
        .await
        .unwrap();
    assert_eq!(outcome.observations_written, 7);
    assert!(outcome.records_updated > 0);

    let after = services::get_station_records(&repo, &station_id(STATION), Some(Metric::TavgC))
        .await
        .unwrap();

    let highest_after = after
        .iter()
        .find(|r| r.window_days == 7 && r.record_type == RecordType::Highest)
        .unwrap();
    // Value, dates and n_years moved together
    assert_eq!(highest_after.value, 40.0);
    assert_eq!(highest_after.start_date, date(2020, 7, 1));
    assert_eq!(highest_after.end_date, date(2020, 7, 7));
    assert_eq!(highest_after.n_years, 31);

    // The untouched record type is byte-for-byte what it was
    let lowest_after = after
        .iter()
        .find(|r| r.window_days == 7 && r.record_type == RecordType::Lowest)
        .unwrap();
    assert_eq!(lowest_after.value, lowest_before.value);
    assert_eq!(lowest_after.start_date, lowest_before.start_date);
    assert_eq!(lowest_after.end_date, lowest_before.end_date);
}

#[tokio::test]
async fn test_less_extreme_value_does_not_displace_record() {
    let repo = seeded_repo().await;
    let config = small_config();
    services::recompute_all_records(&repo, &config, &station_id(STATION))
        .await
        .unwrap();

    // A warm-but-not-record week
    let batch: Vec<DailyObservation> = (1..=7)
        .map(|day| DailyObservation {
            station_id: station_id(STATION),
            metric: Metric::TavgC,
            date: date(2020, 7, day),
            value: 30.0,
        })
        .collect();
    services::ingest_observations(&repo, &config, &batch)
        .await
        .unwrap();

    let records = services::get_station_records(&repo, &station_id(STATION), Some(Metric::TavgC))
        .await
        .unwrap();
    let highest = records
        .iter()
        .find(|r| r.window_days == 7 && r.record_type == RecordType::Highest)
        .unwrap();
    assert_eq!(highest.value, 35.0);
    assert_eq!(highest.end_date, date(2010, 7, 7));
}

fn snapshot(end: chrono::NaiveDate, statement: &str) -> LatestInsightSnapshot {
    LatestInsightSnapshot {
        station_id: station_id(STATION),
        window_days: 7,
        metric: Metric::TavgC,
        end_date: end,
        value: Some(10.0),
        percentile: Some(50.0),
        severity: Severity::Normal,
        direction: Direction::Warm,
        primary_statement: statement.to_string(),
        supporting_line: "Warmer than 50% of historical weeks.".to_string(),
        coverage_years: 30,
        first_year: 1990,
        computed_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_snapshot_store_is_monotonic_in_end_date() {
    let repo = LocalRepository::new();

    assert!(repo
        .store_latest_insight_if_newer(&snapshot(date(2019, 12, 31), "fresh"))
        .await
        .unwrap());

    // An out-of-order recompute with an older end_date is a no-op
    assert!(!repo
        .store_latest_insight_if_newer(&snapshot(date(2019, 12, 25), "stale"))
        .await
        .unwrap());

    let stored = repo.list_latest_insights().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].end_date, date(2019, 12, 31));
    assert_eq!(stored[0].primary_statement, "fresh");

    // Equal end_date overwrites, which is what makes recompute idempotent
    assert!(repo
        .store_latest_insight_if_newer(&snapshot(date(2019, 12, 31), "fresh again"))
        .await
        .unwrap());
    let stored = repo.list_latest_insights().await.unwrap();
    assert_eq!(stored[0].primary_statement, "fresh again");
}

#[tokio::test]
async fn test_latest_recompute_is_idempotent() {
    let repo = seeded_repo().await;
    let config = small_config();

    let first = services::compute_latest_insight(&repo, &config, &station_id(STATION), 7)
        .await
        .unwrap()
        .unwrap();
    let second = services::compute_latest_insight(&repo, &config, &station_id(STATION), 7)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.end_date, second.end_date);
    assert_eq!(first.value, second.value);
    assert_eq!(first.percentile, second.percentile);
    assert_eq!(first.primary_statement, second.primary_statement);

    let stored = repo.list_latest_insights().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].end_date, first.end_date);
}
