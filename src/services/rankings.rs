//! Historical rankings: seasonal (same time of year) and all-time extremes.
//!
//! Both rankers place the current rolling value inside an ordered list with
//! dense ranks 1..N, rank 1 being the most extreme in the query's direction,
//! ties broken by earlier year.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::api::{
    celsius_to_fahrenheit, ExtremesRankingEntry, ExtremesRankingResponse, Metric,
    SeasonalRankingEntry, SeasonalRankingResponse, StationId,
};
use crate::config::EngineSettings;
use crate::db::repository::FullRepository;
use crate::models::{aligned_date, window_start, DailySeries};
use crate::services::error::{ComputeError, ComputeResult};
use crate::services::percentile::percentile_rank;
use crate::services::rolling::{rolling_series, window_aggregate, WindowAggregation};
use crate::services::severity::{classify_direction, Direction};

/// One candidate before ranking.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    year: i32,
    value: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_current: bool,
}

/// Rank the current period against the same calendar position in every year
/// on record (including the current year).
///
/// Direction is derived from the current value's position: at or below the
/// median it reads cold (dry), ranked ascending; above it warm (wet), ranked
/// descending.
pub fn compute_seasonal_ranking(
    series: &DailySeries,
    station_id: &StationId,
    end_date: NaiveDate,
    window_days: u32,
    metric: Metric,
    since_year: Option<i32>,
    config: &EngineSettings,
) -> ComputeResult<SeasonalRankingResponse> {
    let filtered;
    let series = match since_year {
        Some(year) => {
            filtered = series.since_year(year);
            &filtered
        }
        None => series,
    };

    let aggregation = WindowAggregation::from(metric);
    let current = window_aggregate(
        series,
        station_id,
        end_date,
        window_days,
        aggregation,
        config.min_coverage_ratio,
    )?;

    let rolling: BTreeMap<NaiveDate, f64> = rolling_series(series, window_days, aggregation)
        .into_iter()
        .map(|p| (p.end_date, p.value))
        .collect();

    let current_year = end_date.year();
    let (Some(first_year), Some(last_year)) = (series.first_year(), series.last_year()) else {
        return Err(ComputeError::NoDataForDate {
            station_id: station_id.clone(),
            end_date,
        });
    };

    let mut candidates: Vec<Candidate> = Vec::new();
    for year in first_year..=last_year {
        if year == current_year {
            continue;
        }
        let Some(aligned) = aligned_date(end_date, year) else {
            continue;
        };
        // Nearest complete window within the configured half-width, closest
        // offset first.
        let Some((position, value)) = nearest_rolling_value(
            &rolling,
            aligned,
            config.climatology_halfwidth_days,
        ) else {
            continue;
        };
        candidates.push(Candidate {
            year,
            value,
            start_date: window_start(position, window_days),
            end_date: position,
            is_current: false,
        });
    }

    candidates.push(Candidate {
        year: current_year,
        value: current.value,
        start_date: current.start_date,
        end_date: current.end_date,
        is_current: true,
    });

    let values: Vec<f64> = candidates.iter().map(|c| c.value).collect();
    // The candidate set always contains the current value, so the sample is
    // never empty.
    let percentile = percentile_rank(current.value, &values).unwrap_or(50.0);
    let direction = classify_direction(percentile, metric);

    let ranked = rank_candidates(candidates, direction);
    let current_rank = current_rank_of(&ranked)?;
    let current_value_f = celsius_to_fahrenheit(current.value);

    let total_years = ranked.len();
    let rankings = ranked
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let value_f = celsius_to_fahrenheit(c.value);
            SeasonalRankingEntry {
                rank: (i + 1) as u32,
                year: c.year,
                value_c: round2(c.value),
                value_f,
                delta_f: round1(value_f - current_value_f),
                is_current: c.is_current,
            }
        })
        .collect();

    Ok(SeasonalRankingResponse {
        rankings,
        current_rank,
        total_years,
        direction,
    })
}

/// Rank the current period against each year's single most extreme window of
/// the same length, anywhere in the year.
///
/// Unlike the seasonal ranking this is not calendar-restricted, and the
/// direction is an explicit caller choice. Overlapping windows are
/// deduplicated by keeping one local extremum per end-date year; the current
/// year is represented by the query window itself.
pub fn compute_extremes_ranking(
    series: &DailySeries,
    station_id: &StationId,
    end_date: NaiveDate,
    window_days: u32,
    metric: Metric,
    direction: Direction,
    since_year: Option<i32>,
    config: &EngineSettings,
) -> ComputeResult<ExtremesRankingResponse> {
    validate_extremes_direction(direction, metric)?;

    let filtered;
    let series = match since_year {
        Some(year) => {
            filtered = series.since_year(year);
            &filtered
        }
        None => series,
    };

    let aggregation = WindowAggregation::from(metric);
    let current = window_aggregate(
        series,
        station_id,
        end_date,
        window_days,
        aggregation,
        config.min_coverage_ratio,
    )?;

    let current_year = end_date.year();
    let high_side = direction.is_high_side();

    // Most extreme complete window per year, keyed by end-date year; the
    // earliest end date wins a within-year tie.
    let mut per_year: BTreeMap<i32, (NaiveDate, f64)> = BTreeMap::new();
    for point in rolling_series(series, window_days, aggregation) {
        let year = point.end_date.year();
        if year == current_year {
            continue;
        }
        let replaces = match per_year.get(&year) {
            Some(&(_, incumbent)) => {
                if high_side {
                    point.value > incumbent
                } else {
                    point.value < incumbent
                }
            }
            None => true,
        };
        if replaces {
            per_year.insert(year, (point.end_date, point.value));
        }
    }

    let mut candidates: Vec<Candidate> = per_year
        .into_iter()
        .map(|(year, (end, value))| Candidate {
            year,
            value,
            start_date: window_start(end, window_days),
            end_date: end,
            is_current: false,
        })
        .collect();

    candidates.push(Candidate {
        year: current_year,
        value: current.value,
        start_date: current.start_date,
        end_date: current.end_date,
        is_current: true,
    });

    let ranked = rank_candidates(candidates, direction);
    let current_rank = current_rank_of(&ranked)?;
    let current_value_f = celsius_to_fahrenheit(current.value);

    let total_years = ranked.len();
    let rankings = ranked
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let value_f = celsius_to_fahrenheit(c.value);
            ExtremesRankingEntry {
                rank: (i + 1) as u32,
                year: c.year,
                value_c: round2(c.value),
                value_f,
                delta_f: round1(value_f - current_value_f),
                start_date: c.start_date,
                end_date: c.end_date,
                is_current: c.is_current,
            }
        })
        .collect();

    Ok(ExtremesRankingResponse {
        rankings,
        current_rank,
        total_years,
        direction,
    })
}

/// Fetch the station's series and compute the seasonal ranking.
pub async fn get_seasonal_ranking(
    repo: &dyn FullRepository,
    config: &EngineSettings,
    station_id: &StationId,
    end_date: NaiveDate,
    window_days: u32,
    metric: Metric,
    since_year: Option<i32>,
) -> ComputeResult<SeasonalRankingResponse> {
    validate_window(window_days)?;
    let series = repo.fetch_daily_series(station_id, metric).await?;
    compute_seasonal_ranking(
        &series,
        station_id,
        end_date,
        window_days,
        metric,
        since_year,
        config,
    )
}

/// Fetch the station's series and compute the extremes ranking.
#[allow(clippy::too_many_arguments)]
pub async fn get_extremes_ranking(
    repo: &dyn FullRepository,
    config: &EngineSettings,
    station_id: &StationId,
    end_date: NaiveDate,
    window_days: u32,
    metric: Metric,
    direction: Direction,
    since_year: Option<i32>,
) -> ComputeResult<ExtremesRankingResponse> {
    validate_window(window_days)?;
    let series = repo.fetch_daily_series(station_id, metric).await?;
    compute_extremes_ranking(
        &series,
        station_id,
        end_date,
        window_days,
        metric,
        direction,
        since_year,
        config,
    )
}

pub(crate) fn validate_window(window_days: u32) -> ComputeResult<()> {
    if window_days == 0 {
        return Err(ComputeError::InvalidParameter(
            "window_days must be >= 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_extremes_direction(direction: Direction, metric: Metric) -> ComputeResult<()> {
    let valid = if metric.is_temperature() {
        matches!(direction, Direction::Warm | Direction::Cold)
    } else {
        matches!(direction, Direction::Wet | Direction::Dry)
    };
    if !valid {
        return Err(ComputeError::InvalidParameter(format!(
            "Direction {} is not valid for metric {}",
            direction.as_str(),
            metric
        )));
    }
    Ok(())
}

/// The complete rolling value nearest to `aligned`, searching offsets
/// 0, -1, +1, -2, +2, ... out to `halfwidth` days.
fn nearest_rolling_value(
    rolling: &BTreeMap<NaiveDate, f64>,
    aligned: NaiveDate,
    halfwidth: u32,
) -> Option<(NaiveDate, f64)> {
    for distance in 0..=halfwidth as i64 {
        for offset in [-distance, distance] {
            let position = aligned + Duration::days(offset);
            if let Some(&value) = rolling.get(&position) {
                return Some((position, value));
            }
        }
    }
    None
}

/// Sort most-extreme-first for `direction`, ties by earlier year.
fn rank_candidates(mut candidates: Vec<Candidate>, direction: Direction) -> Vec<Candidate> {
    let high_side = direction.is_high_side();
    candidates.sort_by(|a, b| {
        let value_order = if high_side {
            b.value.partial_cmp(&a.value)
        } else {
            a.value.partial_cmp(&b.value)
        };
        value_order
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.year.cmp(&b.year))
    });
    candidates
}

fn current_rank_of(ranked: &[Candidate]) -> ComputeResult<u32> {
    ranked
        .iter()
        .position(|c| c.is_current)
        .map(|i| (i + 1) as u32)
        .ok_or_else(|| {
            ComputeError::InvalidParameter("Ranking lost its current entry".to_string())
        })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
