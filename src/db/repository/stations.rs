//! Station-registry repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::StationId;
use crate::db::models::Station;

/// Repository trait for station registry reads and maintenance.
///
/// The registry itself is owned by the ingestion collaborator; the engine
/// only reads metadata (coordinates, active range, coverage bookkeeping).
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// List all registered stations, ordered by id.
    async fn list_stations(&self) -> RepositoryResult<Vec<Station>>;

    /// Fetch a single station.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` when the id is unknown
    async fn get_station(&self, station_id: &StationId) -> RepositoryResult<Station>;

    /// Insert or replace a registry entry.
    async fn upsert_station(&self, station: &Station) -> RepositoryResult<()>;
}
