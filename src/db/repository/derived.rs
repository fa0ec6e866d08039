//! Derived-state repository trait: station records and latest-insight
//! snapshots.
//!
//! These are the only mutable stores the engine owns. Both write paths carry
//! their consistency contract in the method itself (compare-and-swap style)
//! rather than leaving the check to callers, so concurrent recompute triggers
//! cannot race the invariant:
//!
//! - records: replaced only by a strictly more extreme value, atomically
//!   (value, dates and n_years together);
//! - snapshots: replaced only by a compute whose end_date is >= the stored
//!   one (monotonic recency), which also makes recompute idempotent.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Metric, StationId};
use crate::db::models::{LatestInsightSnapshot, StationRecord};

/// Repository trait for engine-owned derived state.
#[async_trait]
pub trait DerivedStateRepository: Send + Sync {
    /// Store `record` unless an incumbent for the same
    /// (station, metric, window_days, record_type) key is at least as
    /// extreme. Ties keep the incumbent, so the earliest achiever holds the
    /// record.
    ///
    /// # Returns
    /// * `Ok(true)` - the record was written
    /// * `Ok(false)` - the incumbent stands
    async fn upsert_record_if_more_extreme(
        &self,
        record: &StationRecord,
    ) -> RepositoryResult<bool>;

    /// Fetch stored records for a station, optionally filtered to one metric.
    /// Covers both record types and all window lengths.
    async fn fetch_station_records(
        &self,
        station_id: &StationId,
        metric: Option<Metric>,
    ) -> RepositoryResult<Vec<StationRecord>>;

    /// Store `snapshot` unless the stored snapshot for the same
    /// (station_id, window_days) key has a newer end_date.
    ///
    /// # Returns
    /// * `Ok(true)` - the snapshot was written
    /// * `Ok(false)` - the write was a no-op (stale recompute)
    async fn store_latest_insight_if_newer(
        &self,
        snapshot: &LatestInsightSnapshot,
    ) -> RepositoryResult<bool>;

    /// All stored snapshots across stations and window lengths, for listing
    /// views. Ordered by (station_id, window_days).
    async fn list_latest_insights(&self) -> RepositoryResult<Vec<LatestInsightSnapshot>>;
}
