//! Climatology: the historical reference distribution for a calendar
//! position.
//!
//! For a query ending on some month/day, the reference sample holds the
//! rolling-window value ending on that same month/day in every other year on
//! record. Alignment is explicit calendar-date arithmetic: when the date does
//! not exist in a year (Feb 29 outside leap years) that year is skipped, not
//! approximated.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{aligned_date, DailySeries};
use crate::services::rolling::{rolling_series, WindowAggregation};

/// Reference sample plus coverage metadata. Ephemeral; built per query.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSample {
    /// One complete rolling value per aligned calendar position.
    pub values: Vec<f64>,
    /// Number of distinct years contributing at least one value.
    pub distinct_years: usize,
    /// Earliest contributing year.
    pub first_year: Option<i32>,
}

impl ReferenceSample {
    pub fn n_samples(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The sample with `value` appended: the shape the percentile ranker
    /// sees when the current period participates in its own ranking.
    pub fn with_value(&self, value: f64) -> Vec<f64> {
        let mut values = self.values.clone();
        values.push(value);
        values
    }
}

/// Build the reference sample for the calendar position of `end_date`.
///
/// Every year y ≠ year(end_date) (and y ≥ `since_year` when given)
/// contributes the complete rolling value ending on the aligned date in y;
/// with `halfwidth_days` > 0, also the values ending within ±halfwidth days
/// of it. Years without a complete window (gaps, edges of the record, Feb 29)
/// contribute nothing. An empty sample is a soft outcome; callers treat it
/// as insufficient data, never as an error.
pub fn build_reference_sample(
    series: &DailySeries,
    end_date: NaiveDate,
    window_days: u32,
    aggregation: WindowAggregation,
    since_year: Option<i32>,
    halfwidth_days: u32,
) -> ReferenceSample {
    let (Some(first_year), Some(last_year)) = (series.first_year(), series.last_year()) else {
        return ReferenceSample::default();
    };

    // One incremental pass over the whole record, then O(1) lookups per
    // aligned position; decades of history are never rescanned per year.
    let rolling: BTreeMap<NaiveDate, f64> = rolling_series(series, window_days, aggregation)
        .into_iter()
        .map(|p| (p.end_date, p.value))
        .collect();

    reference_sample_at(
        &rolling,
        (first_year, last_year),
        end_date,
        since_year,
        halfwidth_days,
    )
}

/// Build the reference sample from an already computed rolling pass.
///
/// The series endpoint builds climatologies for hundreds of consecutive days;
/// sharing one rolling pass across them keeps that linear in the record
/// length.
pub fn reference_sample_at(
    rolling: &BTreeMap<NaiveDate, f64>,
    (first_year, last_year): (i32, i32),
    end_date: NaiveDate,
    since_year: Option<i32>,
    halfwidth_days: u32,
) -> ReferenceSample {
    let query_year = end_date.year();
    let start_year = since_year.map_or(first_year, |y| y.max(first_year));

    let mut sample = ReferenceSample::default();
    for year in start_year..=last_year {
        if year == query_year {
            continue;
        }
        let Some(aligned) = aligned_date(end_date, year) else {
            continue;
        };

        let mut contributed = false;
        for offset in -(halfwidth_days as i64)..=halfwidth_days as i64 {
            let position = aligned + Duration::days(offset);
            if let Some(&value) = rolling.get(&position) {
                sample.values.push(value);
                contributed = true;
            }
        }

        if contributed {
            sample.distinct_years += 1;
            if sample.first_year.is_none() {
                sample.first_year = Some(year);
            }
        }
    }

    sample
}
