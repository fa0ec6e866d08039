use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{Direction, Metric, Severity, StationId};
use crate::db::models::LatestInsightSnapshot;

// =========================================================
// Latest-insight types
// =========================================================

/// One precomputed snapshot for the listing view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestInsightItem {
    pub station_id: StationId,
    pub end_date: NaiveDate,
    pub window_days: u32,
    pub metric: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
    pub severity: Severity,
    pub direction: Direction,
    pub primary_statement: String,
    pub supporting_line: String,
    pub coverage_years: u32,
    pub first_year: i32,
    pub computed_at: DateTime<Utc>,
}

impl From<LatestInsightSnapshot> for LatestInsightItem {
    fn from(snapshot: LatestInsightSnapshot) -> Self {
        Self {
            station_id: snapshot.station_id,
            end_date: snapshot.end_date,
            window_days: snapshot.window_days,
            metric: snapshot.metric,
            value: snapshot.value,
            percentile: snapshot.percentile,
            severity: snapshot.severity,
            direction: snapshot.direction,
            primary_statement: snapshot.primary_statement,
            supporting_line: snapshot.supporting_line,
            coverage_years: snapshot.coverage_years,
            first_year: snapshot.first_year,
            computed_at: snapshot.computed_at,
        }
    }
}
