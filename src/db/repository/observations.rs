//! Observation-store repository trait.
//!
//! The engine is a pure function over this store: daily scalar observations
//! per (station, metric, date), possibly with gaps. Ingestion connectors
//! write through `ingest_observations`; everything else is read-only.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::api::{Metric, StationId};
use crate::db::models::DailyObservation;
use crate::models::DailySeries;

/// Repository trait for daily observation access.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Ingest a batch of observations, deduplicated by
    /// (station, metric, date) with the incoming value superseding any
    /// stored one.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of observations written
    async fn ingest_observations(&self, batch: &[DailyObservation]) -> RepositoryResult<usize>;

    /// Fetch the full daily series for one station and metric, in date order.
    async fn fetch_daily_series(
        &self,
        station_id: &StationId,
        metric: Metric,
    ) -> RepositoryResult<DailySeries>;

    /// Date of the most recent observation, or `None` when the station has
    /// no data for the metric.
    async fn latest_observation_date(
        &self,
        station_id: &StationId,
        metric: Metric,
    ) -> RepositoryResult<Option<NaiveDate>>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
