//! In-memory repository for unit testing and local development.
//!
//! State lives in `parking_lot` locks; the derived-state write methods run
//! their compare-and-swap check and the swap inside one critical section, so
//! readers never observe a half-updated record or snapshot.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::api::{Metric, StationId};
use crate::db::models::{
    DailyObservation, LatestInsightSnapshot, RecordType, Station, StationRecord,
};
use crate::db::repository::{
    DerivedStateRepository, ErrorContext, ObservationRepository, RepositoryError,
    RepositoryResult, StationRepository,
};
use crate::models::DailySeries;

type ObservationKey = (StationId, Metric);
type RecordKey = (StationId, Metric, u32, RecordType);
type SnapshotKey = (StationId, u32);

/// In-memory implementation of the full repository.
#[derive(Default)]
pub struct LocalRepository {
    observations: RwLock<HashMap<ObservationKey, BTreeMap<NaiveDate, f64>>>,
    stations: RwLock<BTreeMap<StationId, Station>>,
    records: RwLock<HashMap<RecordKey, StationRecord>>,
    snapshots: RwLock<HashMap<SnapshotKey, LatestInsightSnapshot>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObservationRepository for LocalRepository {
    async fn ingest_observations(&self, batch: &[DailyObservation]) -> RepositoryResult<usize> {
        let mut observations = self.observations.write();
        for obs in batch {
            if !obs.value.is_finite() {
                return Err(RepositoryError::validation(format!(
                    "Non-finite observation value for {} {} on {}",
                    obs.station_id, obs.metric, obs.date
                )));
            }
            observations
                .entry((obs.station_id.clone(), obs.metric))
                .or_default()
                .insert(obs.date, obs.value);
        }
        Ok(batch.len())
    }

    async fn fetch_daily_series(
        &self,
        station_id: &StationId,
        metric: Metric,
    ) -> RepositoryResult<DailySeries> {
        let observations = self.observations.read();
        let series = observations
            .get(&(station_id.clone(), metric))
            .map(|days| DailySeries::from_pairs(days.iter().map(|(d, v)| (*d, *v))))
            .unwrap_or_default();
        Ok(series)
    }

    async fn latest_observation_date(
        &self,
        station_id: &StationId,
        metric: Metric,
    ) -> RepositoryResult<Option<NaiveDate>> {
        let observations = self.observations.read();
        Ok(observations
            .get(&(station_id.clone(), metric))
            .and_then(|days| days.keys().next_back().copied()))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl StationRepository for LocalRepository {
    async fn list_stations(&self) -> RepositoryResult<Vec<Station>> {
        Ok(self.stations.read().values().cloned().collect())
    }

    async fn get_station(&self, station_id: &StationId) -> RepositoryResult<Station> {
        self.stations.read().get(station_id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Station {} not found", station_id),
                ErrorContext::new("get_station")
                    .with_entity("station")
                    .with_entity_id(station_id),
            )
        })
    }

    async fn upsert_station(&self, station: &Station) -> RepositoryResult<()> {
        station
            .validate()
            .map_err(RepositoryError::validation)?;
        self.stations
            .write()
            .insert(station.station_id.clone(), station.clone());
        Ok(())
    }
}

#[async_trait]
impl DerivedStateRepository for LocalRepository {
    async fn upsert_record_if_more_extreme(
        &self,
        record: &StationRecord,
    ) -> RepositoryResult<bool> {
        let key = (
            record.station_id.clone(),
            record.metric,
            record.window_days,
            record.record_type,
        );
        let mut records = self.records.write();
        let replaces = match records.get(&key) {
            Some(incumbent) => record.record_type.beats(record.value, incumbent.value),
            None => true,
        };
        if replaces {
            records.insert(key, record.clone());
        }
        Ok(replaces)
    }

    async fn fetch_station_records(
        &self,
        station_id: &StationId,
        metric: Option<Metric>,
    ) -> RepositoryResult<Vec<StationRecord>> {
        let records = self.records.read();
        let mut matched: Vec<StationRecord> = records
            .values()
            .filter(|r| &r.station_id == station_id)
            .filter(|r| metric.map_or(true, |m| r.metric == m))
            .cloned()
            .collect();
        matched.sort_by_key(|r| (r.metric.as_str(), r.window_days, r.record_type.as_str()));
        Ok(matched)
    }

    async fn store_latest_insight_if_newer(
        &self,
        snapshot: &LatestInsightSnapshot,
    ) -> RepositoryResult<bool> {
        let key = (snapshot.station_id.clone(), snapshot.window_days);
        let mut snapshots = self.snapshots.write();
        let writes = match snapshots.get(&key) {
            Some(stored) => snapshot.end_date >= stored.end_date,
            None => true,
        };
        if writes {
            snapshots.insert(key, snapshot.clone());
        }
        Ok(writes)
    }

    async fn list_latest_insights(&self) -> RepositoryResult<Vec<LatestInsightSnapshot>> {
        let snapshots = self.snapshots.read();
        let mut all: Vec<LatestInsightSnapshot> = snapshots.values().cloned().collect();
        all.sort_by(|a, b| {
            (&a.station_id, a.window_days).cmp(&(&b.station_id, b.window_days))
        });
        Ok(all)
    }
}
