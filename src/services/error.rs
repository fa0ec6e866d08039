//! Error taxonomy of the insight engine.
//!
//! Only structurally invalid requests or total absence of observations are
//! hard failures. Insufficient historical context never errors: it degrades
//! to `severity = insufficient_data` with a null percentile so downstream
//! consumers always receive a well-formed insight.

use chrono::NaiveDate;

use crate::api::StationId;
use crate::db::repository::RepositoryError;

/// Result type for engine computations.
pub type ComputeResult<T> = Result<T, ComputeError>;

/// Errors produced by the insight engine.
#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
    /// Too many missing days in the requested window. Recoverable by
    /// choosing a different end_date or window length.
    #[error(
        "Insufficient coverage: {observed} of {window_days} days observed \
         (floor {min_coverage_ratio})"
    )]
    InsufficientCoverage {
        observed: usize,
        window_days: u32,
        min_coverage_ratio: f64,
    },

    /// Zero reference-sample years. Handled inside the engine by degrading
    /// the insight; it never escapes to callers as an error.
    #[error("No climatology data for the requested calendar position")]
    NoClimatologyData,

    /// No observation at all inside the requested window. Propagated to the
    /// caller, who may retry with an earlier end_date (or use
    /// `resolve_latest_available_date`).
    #[error("No data for station {station_id} at {end_date}")]
    NoDataForDate {
        station_id: StationId,
        end_date: NaiveDate,
    },

    /// Structurally invalid request: non-positive window, malformed date,
    /// unknown direction or metric.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Storage-layer failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_insufficient_coverage() {
        let err = ComputeError::InsufficientCoverage {
            observed: 3,
            window_days: 7,
            min_coverage_ratio: 0.5,
        };
        let rendered = err.to_string();
        assert!(rendered.contains("3 of 7 days"));
    }

    #[test]
    fn test_repository_error_passthrough() {
        let err: ComputeError = RepositoryError::not_found("nope").into();
        assert!(matches!(err, ComputeError::Repository(_)));
    }
}
