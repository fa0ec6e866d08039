use chrono::{Datelike, Duration, NaiveDate};

use crate::api::{Metric, StationId};
use crate::config::EngineSettings;
use crate::models::DailySeries;
use crate::services::rankings::{compute_extremes_ranking, compute_seasonal_ranking};
use crate::services::severity::Direction;
use crate::services::ComputeError;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn station() -> StationId {
    StationId::new("TEST0001")
}

fn config() -> EngineSettings {
    EngineSettings::default()
}

/// Gap-free daily series 1990..=2019 where every day of year y carries
/// `value_of(y)`.
fn series_by_year(value_of: impl Fn(i32) -> f64) -> DailySeries {
    let mut series = DailySeries::new();
    let mut date = d(1990, 1, 1);
    let last = d(2019, 12, 31);
    while date <= last {
        series.insert(date, value_of(date.year()));
        date += Duration::days(1);
    }
    series
}

#[test]
fn test_seasonal_warmest_current_year() {
    let series = series_by_year(|y| (y - 1990) as f64);
    let ranking = compute_seasonal_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        None,
        &config(),
    )
    .unwrap();

    assert_eq!(ranking.total_years, 30);
    assert_eq!(ranking.direction, Direction::Warm);
    assert_eq!(ranking.current_rank, 1);

    let top = &ranking.rankings[0];
    assert!(top.is_current);
    assert_eq!(top.rank, 1);
    assert_eq!(top.year, 2019);
    assert_eq!(top.delta_f, 0.0);

    // Warm direction ranks descending: rank 2 is 2018
    assert_eq!(ranking.rankings[1].year, 2018);
    assert!(ranking.rankings[1].delta_f < 0.0);
}

#[test]
fn test_seasonal_coldest_current_year() {
    let series = series_by_year(|y| (2019 - y) as f64);
    let ranking = compute_seasonal_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        None,
        &config(),
    )
    .unwrap();

    assert_eq!(ranking.direction, Direction::Cold);
    assert_eq!(ranking.current_rank, 1);
    assert!(ranking.rankings[0].is_current);
}

#[test]
fn test_seasonal_second_coldest() {
    // 1990 colder than the current year; everything else warmer.
    let series = series_by_year(|y| match y {
        1990 => 0.0,
        2019 => 1.0,
        other => (other - 1989) as f64,
    });
    let ranking = compute_seasonal_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        None,
        &config(),
    )
    .unwrap();

    assert_eq!(ranking.direction, Direction::Cold);
    assert_eq!(ranking.current_rank, 2);
    assert_eq!(ranking.rankings[0].year, 1990);
    assert!(ranking.rankings[1].is_current);
}

#[test]
fn test_seasonal_ranks_are_dense_and_current_is_unique() {
    let series = series_by_year(|y| ((y * 37) % 17) as f64);
    let ranking = compute_seasonal_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        None,
        &config(),
    )
    .unwrap();

    let ranks: Vec<u32> = ranking.rankings.iter().map(|e| e.rank).collect();
    let expected: Vec<u32> = (1..=ranking.total_years as u32).collect();
    assert_eq!(ranks, expected);

    let currents = ranking.rankings.iter().filter(|e| e.is_current).count();
    assert_eq!(currents, 1);
    let current = ranking.rankings.iter().find(|e| e.is_current).unwrap();
    assert_eq!(current.rank, ranking.current_rank);
}

#[test]
fn test_seasonal_ties_break_by_earlier_year() {
    // 1995 and 2001 share a value; all values distinct otherwise.
    let series = series_by_year(|y| match y {
        1995 | 2001 => 5.0,
        other => (other - 1990) as f64 + 100.0,
    });
    let ranking = compute_seasonal_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        None,
        &config(),
    )
    .unwrap();

    let pos_1995 = ranking.rankings.iter().position(|e| e.year == 1995).unwrap();
    let pos_2001 = ranking.rankings.iter().position(|e| e.year == 2001).unwrap();
    assert!(pos_1995 < pos_2001);
}

#[test]
fn test_seasonal_since_year_limits_candidates() {
    let series = series_by_year(|y| (y - 1990) as f64);
    let ranking = compute_seasonal_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        Some(2010),
        &config(),
    )
    .unwrap();

    assert_eq!(ranking.total_years, 10); // 2010..=2019
    assert!(ranking.rankings.iter().all(|e| e.year >= 2010));
}

#[test]
fn test_seasonal_feb_29_skips_non_leap_years() {
    let series = series_by_year(|y| (y - 1990) as f64);
    let ranking = compute_seasonal_ranking(
        &series,
        &station(),
        d(2016, 2, 29),
        7,
        Metric::TavgC,
        None,
        &config(),
    )
    .unwrap();

    // Only leap years can align: 1992..=2012 step 4, plus the current 2016
    assert_eq!(ranking.total_years, 7);
    assert!(ranking.rankings.iter().all(|e| e.year % 4 == 0));
}

#[test]
fn test_seasonal_no_data_errors() {
    let series = DailySeries::new();
    let result = compute_seasonal_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        None,
        &config(),
    );
    assert!(matches!(result, Err(ComputeError::NoDataForDate { .. })));
}

#[test]
fn test_extremes_finds_cold_spike_outside_season() {
    // Flat series except a deep cold snap in January 2000.
    let mut series = series_by_year(|_| 10.0);
    for day in 10..=20 {
        series.insert(d(2000, 1, day), -30.0);
    }

    let ranking = compute_extremes_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        Direction::Cold,
        None,
        &config(),
    )
    .unwrap();

    // The 2000 cold snap ranks first even though the query is mid-July.
    let top = &ranking.rankings[0];
    assert_eq!(top.rank, 1);
    assert_eq!(top.year, 2000);
    assert!(top.value_c < -20.0);
    assert_eq!(top.end_date.month(), 1);
    assert_eq!(
        top.end_date - top.start_date,
        Duration::days(6),
        "entry spans the window"
    );

    // The current entry is the query window itself.
    let current = ranking.rankings.iter().find(|e| e.is_current).unwrap();
    assert_eq!(current.year, 2019);
    assert_eq!(current.end_date, d(2019, 7, 15));
    assert_eq!(ranking.current_rank, current.rank);
}

#[test]
fn test_extremes_one_entry_per_year() {
    let series = series_by_year(|y| (y % 7) as f64);
    let ranking = compute_extremes_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        Direction::Warm,
        None,
        &config(),
    )
    .unwrap();

    let mut years: Vec<i32> = ranking.rankings.iter().map(|e| e.year).collect();
    years.sort_unstable();
    years.dedup();
    assert_eq!(years.len(), ranking.total_years);
    assert_eq!(ranking.total_years, 30);
}

#[test]
fn test_extremes_warm_sorts_descending() {
    let series = series_by_year(|y| (y - 1990) as f64);
    let ranking = compute_extremes_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        Direction::Warm,
        None,
        &config(),
    )
    .unwrap();

    for pair in ranking.rankings.windows(2) {
        assert!(pair[0].value_c >= pair[1].value_c);
    }
    assert_eq!(ranking.current_rank, 1); // 2019 is the warmest year
}

#[test]
fn test_extremes_rejects_bad_direction() {
    let series = series_by_year(|y| (y - 1990) as f64);
    let result = compute_extremes_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::TavgC,
        Direction::Wet,
        None,
        &config(),
    );
    assert!(matches!(result, Err(ComputeError::InvalidParameter(_))));

    let result = compute_extremes_ranking(
        &series,
        &station(),
        d(2019, 7, 15),
        7,
        Metric::PrcpMm,
        Direction::Cold,
        None,
        &config(),
    );
    assert!(matches!(result, Err(ComputeError::InvalidParameter(_))));
}
