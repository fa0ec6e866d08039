//! All-time station records.
//!
//! For every configured window length the tracker keeps the single most
//! extreme complete rolling value ever observed, per record type. Updates go
//! through the repository's compare-and-swap write path, so a reader never
//! sees a half-updated record and a concurrent stale recompute cannot regress
//! a fresher extreme.

use tracing::info;

use crate::api::{Metric, RecordResponse, StationId};
use crate::config::EngineSettings;
use crate::db::models::{DailyObservation, RecordType, StationRecord};
use crate::db::repository::FullRepository;
use crate::models::window_start;
use crate::services::error::ComputeResult;
use crate::services::rolling::{rolling_series, WindowAggregation};

/// Recompute and store all-time records for one station and metric.
///
/// Returns the number of records that actually changed.
pub async fn recompute_station_records(
    repo: &dyn FullRepository,
    config: &EngineSettings,
    station_id: &StationId,
    metric: Metric,
) -> ComputeResult<usize> {
    let series = repo.fetch_daily_series(station_id, metric).await?;
    let (Some(first_year), Some(last_year)) = (series.first_year(), series.last_year()) else {
        return Ok(0);
    };
    let n_years = (last_year - first_year + 1) as u32;
    let aggregation = WindowAggregation::from(metric);

    let mut updated = 0usize;
    for &window_days in &config.window_days {
        let rolling = rolling_series(&series, window_days, aggregation);
        if rolling.is_empty() {
            continue;
        }

        // First occurrence wins on ties, so the earliest extreme holds the
        // record.
        let mut highest = rolling[0];
        let mut lowest = rolling[0];
        for point in &rolling[1..] {
            if point.value > highest.value {
                highest = *point;
            }
            if point.value < lowest.value {
                lowest = *point;
            }
        }

        for (record_type, point) in [
            (RecordType::Highest, highest),
            (RecordType::Lowest, lowest),
        ] {
            let record = StationRecord {
                station_id: station_id.clone(),
                metric,
                window_days,
                record_type,
                value: point.value,
                start_date: window_start(point.end_date, window_days),
                end_date: point.end_date,
                n_years,
            };
            if repo.upsert_record_if_more_extreme(&record).await? {
                updated += 1;
            }
        }
    }

    if updated > 0 {
        info!(
            station = %station_id,
            metric = %metric,
            updated,
            "station records updated"
        );
    }
    Ok(updated)
}

/// Recompute records for every supported metric of a station.
pub async fn recompute_all_records(
    repo: &dyn FullRepository,
    config: &EngineSettings,
    station_id: &StationId,
) -> ComputeResult<usize> {
    let mut total = 0;
    for metric in Metric::ALL {
        total += recompute_station_records(repo, config, station_id, metric).await?;
    }
    Ok(total)
}

/// Stored records for a station, both record types, all window lengths.
pub async fn get_station_records(
    repo: &dyn FullRepository,
    station_id: &StationId,
    metric: Option<Metric>,
) -> ComputeResult<Vec<RecordResponse>> {
    // Unknown stations are a hard failure rather than an empty list.
    let _station = repo.get_station(station_id).await?;
    let records = repo.fetch_station_records(station_id, metric).await?;
    Ok(records.into_iter().map(RecordResponse::from).collect())
}

/// Outcome of an observation ingest.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct IngestOutcome {
    pub observations_written: usize,
    pub records_updated: usize,
}

/// Ingest a batch of observations and re-evaluate the records of every
/// (station, metric) the batch touched.
pub async fn ingest_observations(
    repo: &dyn FullRepository,
    config: &EngineSettings,
    batch: &[DailyObservation],
) -> ComputeResult<IngestOutcome> {
    let observations_written = repo.ingest_observations(batch).await?;

    let mut touched: Vec<(StationId, Metric)> = batch
        .iter()
        .map(|obs| (obs.station_id.clone(), obs.metric))
        .collect();
    touched.sort_by(|a, b| (a.0.as_str(), a.1.as_str()).cmp(&(b.0.as_str(), b.1.as_str())));
    touched.dedup();

    let mut records_updated = 0;
    for (station_id, metric) in touched {
        records_updated +=
            recompute_station_records(repo, config, &station_id, metric).await?;
    }

    Ok(IngestOutcome {
        observations_written,
        records_updated,
    })
}
