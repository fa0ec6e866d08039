//! Rolling-window aggregation over a daily series.
//!
//! A rolling value is the mean (temperature) or sum (precipitation) of the
//! observations inside a trailing window of `window_days` ending on a given
//! date. Missing days are excluded from the aggregate, never imputed; the
//! coverage ratio records how much of the window was observed.

use chrono::{Duration, NaiveDate};

use crate::api::{Metric, StationId};
use crate::models::{window_start, DailySeries};
use crate::services::error::{ComputeError, ComputeResult};

/// How observations inside a window are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAggregation {
    Mean,
    Sum,
}

impl From<Metric> for WindowAggregation {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::PrcpMm => WindowAggregation::Sum,
            _ => WindowAggregation::Mean,
        }
    }
}

/// A computed rolling-window value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowValue {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub value: f64,
    /// Observed days / window_days, in (0, 1].
    pub coverage_ratio: f64,
}

/// Compute the rolling value ending on `end_date`.
///
/// Zero observations in the window is `NoDataForDate`; a partially observed
/// window below `min_coverage_ratio` is `InsufficientCoverage`. The floor is
/// a parameter because different window lengths tolerate different gap rates.
pub fn window_aggregate(
    series: &DailySeries,
    station_id: &StationId,
    end_date: NaiveDate,
    window_days: u32,
    aggregation: WindowAggregation,
    min_coverage_ratio: f64,
) -> ComputeResult<WindowValue> {
    if window_days == 0 {
        return Err(ComputeError::InvalidParameter(
            "window_days must be >= 1".to_string(),
        ));
    }

    let mut sum = 0.0;
    let mut observed = 0usize;
    for value in series.window_values(end_date, window_days) {
        sum += value;
        observed += 1;
    }

    if observed == 0 {
        return Err(ComputeError::NoDataForDate {
            station_id: station_id.clone(),
            end_date,
        });
    }

    let coverage_ratio = observed as f64 / window_days as f64;
    if coverage_ratio < min_coverage_ratio {
        return Err(ComputeError::InsufficientCoverage {
            observed,
            window_days,
            min_coverage_ratio,
        });
    }

    let value = match aggregation {
        WindowAggregation::Mean => sum / observed as f64,
        WindowAggregation::Sum => sum,
    };

    Ok(WindowValue {
        start_date: window_start(end_date, window_days),
        end_date,
        value,
        coverage_ratio,
    })
}

/// A rolling value from the incremental full-series pass. Complete windows
/// only (coverage = 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingPoint {
    pub end_date: NaiveDate,
    pub value: f64,
}

/// One O(n) pass producing every complete rolling window of the series.
///
/// Walks the observed date span once with a running sum and count, adding the
/// day entering the window and dropping the day leaving it, so decades of
/// history never require per-window rescans. Historical baselines (the
/// climatology, the rankers, record computation) all consume this pass.
pub fn rolling_series(
    series: &DailySeries,
    window_days: u32,
    aggregation: WindowAggregation,
) -> Vec<RollingPoint> {
    let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
        return Vec::new();
    };
    if window_days == 0 {
        return Vec::new();
    }

    let mut points = Vec::new();
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut end = first;

    while end <= last {
        if let Some(v) = series.get(end) {
            sum += v;
            count += 1;
        }
        let leaving = end - Duration::days(window_days as i64);
        if leaving >= first {
            if let Some(v) = series.get(leaving) {
                sum -= v;
                count -= 1;
            }
        }

        // Only emit once the window lies fully inside the observed span and
        // every day of it was observed.
        if count == window_days as usize {
            let value = match aggregation {
                WindowAggregation::Mean => sum / count as f64,
                WindowAggregation::Sum => sum,
            };
            points.push(RollingPoint {
                end_date: end,
                value,
            });
        }

        end += Duration::days(1);
    }

    points
}
