//! Insight composition: the core product output.
//!
//! Orchestrates rolling value -> climatology -> percentile -> severity ->
//! statements. Insufficient historical context never fails a request; it
//! degrades to `severity = insufficient_data` with null percentile and band,
//! so consumers always receive a well-formed insight.

use chrono::{Datelike, Duration, NaiveDate};

use crate::api::{DataQuality, InsightResponse, Metric, NormalBand, RecordInfo, StationId};
use crate::config::EngineSettings;
use crate::db::models::RecordType;
use crate::db::repository::FullRepository;
use crate::models::DailySeries;
use crate::services::climatology::build_reference_sample;
use crate::services::error::ComputeResult;
use crate::services::percentile::{normal_band, percentile_rank};
use crate::services::rankings::{compute_seasonal_ranking, validate_window};
use crate::services::rolling::{window_aggregate, WindowAggregation};
use crate::services::severity::{classify_direction, classify_severity, Direction, Severity};
use crate::services::statements::{
    direction_superlative, generate_insight, RecordFraming, StatementContext,
};

/// Get a severity-classified insight for a rolling window.
pub async fn get_insight(
    repo: &dyn FullRepository,
    config: &EngineSettings,
    station_id: &StationId,
    end_date: NaiveDate,
    window_days: u32,
    metric: Metric,
    since_year: Option<i32>,
) -> ComputeResult<InsightResponse> {
    validate_window(window_days)?;

    // Unknown stations are a hard 404, not an insufficient-data insight.
    let _station = repo.get_station(station_id).await?;

    let series = repo.fetch_daily_series(station_id, metric).await?;
    compute_insight(
        repo,
        &series,
        config,
        station_id,
        end_date,
        window_days,
        metric,
        since_year,
    )
    .await
}

/// Compose an insight from an already fetched series.
#[allow(clippy::too_many_arguments)]
pub async fn compute_insight(
    repo: &dyn FullRepository,
    series: &DailySeries,
    config: &EngineSettings,
    station_id: &StationId,
    end_date: NaiveDate,
    window_days: u32,
    metric: Metric,
    since_year: Option<i32>,
) -> ComputeResult<InsightResponse> {
    let filtered;
    let series = match since_year {
        Some(year) => {
            filtered = series.since_year(year);
            &filtered
        }
        None => series,
    };

    let aggregation = WindowAggregation::from(metric);

    // 1. The current rolling value. Hard failures stop here.
    let current = window_aggregate(
        series,
        station_id,
        end_date,
        window_days,
        aggregation,
        config.min_coverage_ratio,
    )?;

    // 2. Historical reference sample for this calendar position.
    let sample = build_reference_sample(
        series,
        end_date,
        window_days,
        aggregation,
        since_year,
        config.climatology_halfwidth_days,
    );

    // 3. Percentile: the current period participates in its own ranking, so
    //    a value tied with one colder year out of 30 lands on exactly 5.0.
    let sufficient = sample.n_samples() >= config.min_climatology_samples;
    let percentile = if sufficient {
        percentile_rank(current.value, &sample.with_value(current.value))
    } else {
        None
    };

    // 4. Severity and direction.
    let severity = classify_severity(percentile, sample.n_samples(), config.min_climatology_samples);
    let direction = match percentile {
        Some(p) => classify_direction(p, metric),
        None => Direction::Neutral,
    };

    let band = if severity == Severity::InsufficientData {
        None
    } else {
        normal_band(&sample.values).map(|(p25, p75)| NormalBand {
            p25: round2(p25),
            p75: round2(p75),
        })
    };

    // 5. Seasonal rank-1 check for record framing.
    let mut record_framing = None;
    if severity != Severity::InsufficientData {
        if let Ok(ranking) = compute_seasonal_ranking(
            series,
            station_id,
            end_date,
            window_days,
            metric,
            since_year,
            config,
        ) {
            if ranking.current_rank == 1 && ranking.total_years >= config.min_record_years {
                record_framing = Some(RecordFraming {
                    superlative: direction_superlative(ranking.direction),
                    total_years: ranking.total_years,
                });
            }
        }
    }

    // 6. All-time record proximity.
    let record_info = check_record_proximity(
        repo,
        station_id,
        metric,
        window_days,
        current.value,
    )
    .await?;
    if record_framing.is_none() {
        if let Some(info) = record_info.as_ref().filter(|i| i.is_new_record) {
            record_framing = Some(RecordFraming {
                superlative: match (info.record_type, metric.is_temperature()) {
                    (RecordType::Highest, true) => "warmest",
                    (RecordType::Lowest, true) => "coldest",
                    (RecordType::Highest, false) => "wettest",
                    (RecordType::Lowest, false) => "driest",
                },
                total_years: sample.distinct_years.max(1),
            });
        }
    }

    let coverage_years = series.distinct_years() as u32;
    let first_year = sample
        .first_year
        .or_else(|| series.first_year())
        .unwrap_or_else(|| end_date.year());

    // 7. Statements.
    let (primary_statement, supporting_line) = generate_insight(&StatementContext {
        window_days,
        percentile,
        severity,
        direction,
        coverage_years,
        first_year,
        since_year,
        record_framing,
    });

    Ok(InsightResponse {
        station_id: station_id.clone(),
        end_date,
        window_days,
        metric,
        primary_statement,
        supporting_line,
        value: Some(round2(current.value)),
        severity,
        direction,
        percentile: percentile.map(round1),
        normal_band: band,
        data_quality: DataQuality {
            coverage_years,
            first_year,
            coverage_ratio: current.coverage_ratio,
            n_samples: if sample.is_empty() {
                None
            } else {
                Some(sample.n_samples())
            },
            since_year,
        },
        record_info,
        since_year,
    })
}

/// Check whether a value ties or beats a stored all-time record.
pub async fn check_record_proximity(
    repo: &dyn FullRepository,
    station_id: &StationId,
    metric: Metric,
    window_days: u32,
    value: f64,
) -> ComputeResult<Option<RecordInfo>> {
    let records = repo.fetch_station_records(station_id, Some(metric)).await?;
    for record in records {
        if record.window_days != window_days {
            continue;
        }
        let reached = match record.record_type {
            RecordType::Highest => value >= record.value,
            RecordType::Lowest => value <= record.value,
        };
        if reached {
            return Ok(Some(RecordInfo {
                record_type: record.record_type,
                record_value: record.value,
                record_start: record.start_date,
                record_end: record.end_date,
                is_new_record: true,
            }));
        }
    }
    Ok(None)
}

/// The freshest end_date for which the aggregator can produce a value,
/// walking back up to `max_publication_lag_days` from the newest observation
/// (upstream providers publish with lag). `None` when the station has no
/// usable window in that span.
///
/// Keeping this in the engine means retry-over-dates logic lives once, here,
/// rather than in every caller.
pub async fn resolve_latest_available_date(
    repo: &dyn FullRepository,
    config: &EngineSettings,
    station_id: &StationId,
    metric: Metric,
    window_days: u32,
) -> ComputeResult<Option<NaiveDate>> {
    validate_window(window_days)?;
    let Some(newest) = repo.latest_observation_date(station_id, metric).await? else {
        return Ok(None);
    };

    let series = repo.fetch_daily_series(station_id, metric).await?;
    let aggregation = WindowAggregation::from(metric);
    for back in 0..=config.max_publication_lag_days as i64 {
        let end_date = newest - Duration::days(back);
        if window_aggregate(
            &series,
            station_id,
            end_date,
            window_days,
            aggregation,
            config.min_coverage_ratio,
        )
        .is_ok()
        {
            return Ok(Some(end_date));
        }
    }
    Ok(None)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
