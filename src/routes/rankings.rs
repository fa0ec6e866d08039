use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::Direction;

// =========================================================
// Ranking types
// =========================================================

/// One year in the seasonal (same-time-of-year) ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalRankingEntry {
    pub rank: u32,
    pub year: i32,
    pub value_c: f64,
    pub value_f: f64,
    /// Difference from the current period's value, Fahrenheit.
    pub delta_f: f64,
    #[serde(default)]
    pub is_current: bool,
}

/// Ranking of the current period against the same calendar window in every
/// other year on record. Rank 1 is the most extreme in the query's direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalRankingResponse {
    pub rankings: Vec<SeasonalRankingEntry>,
    pub current_rank: u32,
    pub total_years: usize,
    pub direction: Direction,
}

/// One year in the all-time extremes ranking, with the window's date span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtremesRankingEntry {
    pub rank: u32,
    pub year: i32,
    pub value_c: f64,
    pub value_f: f64,
    pub delta_f: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_current: bool,
}

/// Ranking of the current period against each year's most extreme window of
/// the same length, irrespective of season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtremesRankingResponse {
    pub rankings: Vec<ExtremesRankingEntry>,
    pub current_rank: u32,
    pub total_years: usize,
    pub direction: Direction,
}
