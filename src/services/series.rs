//! Rolling time series with climatology bands, for charting.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::api::{Metric, SeriesPoint, SeriesResponse, StationId};
use crate::config::EngineSettings;
use crate::db::repository::FullRepository;
use crate::models::DailySeries;
use crate::services::climatology::reference_sample_at;
use crate::services::error::{ComputeError, ComputeResult};
use crate::services::percentile::{percentile_rank, quantile_sorted};
use crate::services::rankings::validate_window;
use crate::services::rolling::{rolling_series, WindowAggregation};

/// One insight-equivalent point per day in `[start_date, end_date]`: the
/// complete rolling value plus the percentile band of its calendar position.
/// Days without a complete window are omitted; days whose climatology is too
/// thin keep their value but carry null band fields.
#[allow(clippy::too_many_arguments)]
pub async fn get_series(
    repo: &dyn FullRepository,
    config: &EngineSettings,
    station_id: &StationId,
    window_days: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    metric: Metric,
    since_year: Option<i32>,
) -> ComputeResult<SeriesResponse> {
    validate_window(window_days)?;
    if start_date > end_date {
        return Err(ComputeError::InvalidParameter(
            "start_date must be on or before end_date".to_string(),
        ));
    }

    let series = repo.fetch_daily_series(station_id, metric).await?;
    let points = compute_series_points(
        &series,
        station_id,
        window_days,
        start_date,
        end_date,
        metric,
        since_year,
        config,
    )?;

    Ok(SeriesResponse {
        station_id: station_id.clone(),
        window_days,
        metric,
        series: points,
        since_year,
    })
}

#[allow(clippy::too_many_arguments)]
pub fn compute_series_points(
    series: &DailySeries,
    station_id: &StationId,
    window_days: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    metric: Metric,
    since_year: Option<i32>,
    config: &EngineSettings,
) -> ComputeResult<Vec<SeriesPoint>> {
    let aggregation = WindowAggregation::from(metric);

    let rolling: BTreeMap<NaiveDate, f64> = rolling_series(series, window_days, aggregation)
        .into_iter()
        .map(|p| (p.end_date, p.value))
        .collect();

    if rolling.range(start_date..=end_date).next().is_none() {
        return Err(ComputeError::NoDataForDate {
            station_id: station_id.clone(),
            end_date,
        });
    }

    let year_span = (
        series.first_year().unwrap_or_else(|| start_date.year()),
        series.last_year().unwrap_or_else(|| end_date.year()),
    );

    let mut points = Vec::new();
    let mut date = start_date;
    while date <= end_date {
        if let Some(&value) = rolling.get(&date) {
            let sample = reference_sample_at(
                &rolling,
                year_span,
                date,
                since_year,
                config.climatology_halfwidth_days,
            );

            let point = if sample.n_samples() >= config.min_climatology_samples {
                let mut sorted = sample.values.clone();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                let percentile = percentile_rank(value, &sample.with_value(value));
                SeriesPoint {
                    end_date: date,
                    value: Some(round2(value)),
                    percentile: percentile.map(round1),
                    p10: Some(round2(quantile_sorted(&sorted, 0.10))),
                    p25: Some(round2(quantile_sorted(&sorted, 0.25))),
                    p50: Some(round2(quantile_sorted(&sorted, 0.50))),
                    p75: Some(round2(quantile_sorted(&sorted, 0.75))),
                    p90: Some(round2(quantile_sorted(&sorted, 0.90))),
                }
            } else {
                SeriesPoint {
                    end_date: date,
                    value: Some(round2(value)),
                    percentile: None,
                    p10: None,
                    p25: None,
                    p50: None,
                    p75: None,
                    p90: None,
                }
            };
            points.push(point);
        }
        date += Duration::days(1);
    }

    Ok(points)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
