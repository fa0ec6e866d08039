use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::calendar::window_start;

/// A station's daily observation series for one metric.
///
/// Dates are unique (the store deduplicates on ingest) and iteration is in
/// date order. Gaps are simply absent keys; nothing is interpolated.
#[derive(Debug, Clone, Default)]
pub struct DailySeries {
    values: BTreeMap<NaiveDate, f64>,
}

impl DailySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from (date, value) pairs. Later duplicates win.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate, value: f64) {
        self.values.insert(date, value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.values.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.values.keys().next_back().copied()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.first_date().map(|d| d.year())
    }

    pub fn last_year(&self) -> Option<i32> {
        self.last_date().map(|d| d.year())
    }

    /// Observed values within `[window_start(end, window_days), end]`.
    pub fn window_values(
        &self,
        end_date: NaiveDate,
        window_days: u32,
    ) -> impl Iterator<Item = f64> + '_ {
        let start = window_start(end_date, window_days);
        self.values.range(start..=end_date).map(|(_, v)| *v)
    }

    /// Iterate the whole series in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }

    /// Drop observations before January 1 of `since_year`.
    pub fn since_year(&self, since_year: i32) -> Self {
        let cutoff = match NaiveDate::from_ymd_opt(since_year, 1, 1) {
            Some(d) => d,
            None => return self.clone(),
        };
        Self {
            values: self.values.range(cutoff..).map(|(d, v)| (*d, *v)).collect(),
        }
    }

    /// Number of distinct calendar years with at least one observation.
    pub fn distinct_years(&self) -> usize {
        let mut years: Vec<i32> = self.values.keys().map(|d| d.year()).collect();
        years.dedup();
        years.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_series() {
        let series = DailySeries::new();
        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
        assert_eq!(series.last_date(), None);
    }

    #[test]
    fn test_window_values_with_gap() {
        let series = DailySeries::from_pairs([
            (d(2024, 1, 1), 1.0),
            (d(2024, 1, 2), 2.0),
            // Jan 3 missing
            (d(2024, 1, 4), 4.0),
        ]);
        let values: Vec<f64> = series.window_values(d(2024, 1, 4), 4).collect();
        assert_eq!(values, vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_duplicate_dates_last_wins() {
        let series =
            DailySeries::from_pairs([(d(2024, 1, 1), 1.0), (d(2024, 1, 1), 9.0)]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(d(2024, 1, 1)), Some(9.0));
    }

    #[test]
    fn test_since_year() {
        let series = DailySeries::from_pairs([
            (d(1999, 12, 31), 1.0),
            (d(2000, 1, 1), 2.0),
            (d(2001, 6, 1), 3.0),
        ]);
        let filtered = series.since_year(2000);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.first_year(), Some(2000));
    }

    #[test]
    fn test_distinct_years() {
        let series = DailySeries::from_pairs([
            (d(1999, 1, 1), 1.0),
            (d(1999, 7, 1), 2.0),
            (d(2001, 1, 1), 3.0),
        ]);
        assert_eq!(series.distinct_years(), 2);
    }
}
