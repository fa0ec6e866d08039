use chrono::{Datelike, Duration, NaiveDate};

/// Map a calendar position (month/day of `target`) into another year.
///
/// Returns `None` when the date does not exist in that year (Feb 29 outside
/// leap years): the year is skipped by callers, never approximated. Explicit
/// date arithmetic rather than day-of-year offsets, which drift across leap
/// years.
pub fn aligned_date(target: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, target.month(), target.day())
}

/// Inclusive start of a trailing window of `window_days` ending at `end_date`.
pub fn window_start(end_date: NaiveDate, window_days: u32) -> NaiveDate {
    end_date - Duration::days(window_days as i64 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_aligned_date_ordinary() {
        assert_eq!(aligned_date(d(2024, 7, 15), 1995), Some(d(1995, 7, 15)));
    }

    #[test]
    fn test_aligned_date_dec_31() {
        assert_eq!(aligned_date(d(2023, 12, 31), 2000), Some(d(2000, 12, 31)));
    }

    #[test]
    fn test_aligned_date_feb_29_skips_non_leap_years() {
        let leap = d(2024, 2, 29);
        assert_eq!(aligned_date(leap, 2023), None);
        assert_eq!(aligned_date(leap, 2020), Some(d(2020, 2, 29)));
        // 1900 was not a leap year; 2000 was
        assert_eq!(aligned_date(leap, 1900), None);
        assert_eq!(aligned_date(leap, 2000), Some(d(2000, 2, 29)));
    }

    #[test]
    fn test_window_start() {
        assert_eq!(window_start(d(2024, 1, 7), 7), d(2024, 1, 1));
        assert_eq!(window_start(d(2024, 1, 7), 1), d(2024, 1, 7));
        // Crosses a year boundary
        assert_eq!(window_start(d(2024, 1, 3), 7), d(2023, 12, 28));
    }
}
