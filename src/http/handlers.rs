//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use super::dto::{
    ExtremesRankingQuery, HealthResponse, IngestRequest, IngestResponse, InsightQuery,
    JobStatusResponse, LatestDateQuery, LatestDateResponse, LatestInsightListResponse,
    RecomputeResponse, RecordsQuery, SeasonalRankingQuery, SeriesQuery, StationListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    ExtremesRankingResponse, InsightResponse, RecordResponse, SeasonalRankingResponse,
    SeriesResponse, StationId, StationResponse,
};
use crate::services;
use crate::services::job_tracker::JobKind;
use crate::services::severity::Direction;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn validate_since_year(since_year: Option<i32>) -> Result<(), AppError> {
    if let Some(year) = since_year {
        if !(1850..=2100).contains(&year) {
            return Err(AppError::BadRequest(format!(
                "since_year must be within 1850-2100, got {}",
                year
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Station Registry
// =============================================================================

/// GET /v1/stations
///
/// List all registered stations.
pub async fn list_stations(State(state): State<AppState>) -> HandlerResult<StationListResponse> {
    let stations = state.repository.list_stations().await?;
    let stations: Vec<StationResponse> = stations.into_iter().map(Into::into).collect();
    let total = stations.len();

    Ok(Json(StationListResponse { stations, total }))
}

/// GET /v1/stations/{station_id}
///
/// Get one station registry entry.
pub async fn get_station(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
) -> HandlerResult<StationResponse> {
    let station = state
        .repository
        .get_station(&StationId::new(station_id))
        .await?;
    Ok(Json(station.into()))
}

// =============================================================================
// Insight Engine
// =============================================================================

/// GET /v1/stations/{station_id}/insight
///
/// Get a severity-classified insight for a rolling window.
pub async fn get_insight(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Query(query): Query<InsightQuery>,
) -> HandlerResult<InsightResponse> {
    validate_since_year(query.since_year)?;
    let insight = services::get_insight(
        state.repository.as_ref(),
        &state.config,
        &StationId::new(station_id),
        query.end_date,
        query.window_days,
        query.metric,
        query.since_year,
    )
    .await?;
    Ok(Json(insight))
}

/// GET /v1/stations/{station_id}/series
///
/// Get the rolling time series with climatology bands for charting.
pub async fn get_series(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Query(query): Query<SeriesQuery>,
) -> HandlerResult<SeriesResponse> {
    validate_since_year(query.since_year)?;
    let series = services::get_series(
        state.repository.as_ref(),
        &state.config,
        &StationId::new(station_id),
        query.window_days,
        query.start_date,
        query.end_date,
        query.metric,
        query.since_year,
    )
    .await?;
    Ok(Json(series))
}

/// GET /v1/stations/{station_id}/records
///
/// Get stored all-time records (both record types, all window lengths).
pub async fn get_records(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Query(query): Query<RecordsQuery>,
) -> HandlerResult<Vec<RecordResponse>> {
    let records = services::get_station_records(
        state.repository.as_ref(),
        &StationId::new(station_id),
        query.metric,
    )
    .await?;
    Ok(Json(records))
}

/// GET /v1/stations/{station_id}/rankings/seasonal
///
/// Rank the current period against the same time of year in every year on
/// record.
pub async fn get_seasonal_ranking(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Query(query): Query<SeasonalRankingQuery>,
) -> HandlerResult<SeasonalRankingResponse> {
    validate_since_year(query.since_year)?;
    let ranking = services::get_seasonal_ranking(
        state.repository.as_ref(),
        &state.config,
        &StationId::new(station_id),
        query.end_date,
        query.window_days,
        query.metric,
        query.since_year,
    )
    .await?;
    Ok(Json(ranking))
}

/// GET /v1/stations/{station_id}/rankings/extremes
///
/// Rank the current period against each year's most extreme window of the
/// same length, irrespective of season.
pub async fn get_extremes_ranking(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Query(query): Query<ExtremesRankingQuery>,
) -> HandlerResult<ExtremesRankingResponse> {
    validate_since_year(query.since_year)?;
    let direction: Direction = query
        .direction
        .parse()
        .map_err(AppError::BadRequest)?;
    let ranking = services::get_extremes_ranking(
        state.repository.as_ref(),
        &state.config,
        &StationId::new(station_id),
        query.end_date,
        query.window_days,
        query.metric,
        direction,
        query.since_year,
    )
    .await?;
    Ok(Json(ranking))
}

/// GET /v1/stations/{station_id}/latest-date
///
/// The freshest end_date the engine can currently serve, accounting for
/// upstream publication lag. Callers chart or query from here instead of
/// retrying over candidate dates themselves.
pub async fn get_latest_date(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Query(query): Query<LatestDateQuery>,
) -> HandlerResult<LatestDateResponse> {
    let station_id = StationId::new(station_id);
    let end_date = services::resolve_latest_available_date(
        state.repository.as_ref(),
        &state.config,
        &station_id,
        query.metric,
        query.window_days,
    )
    .await?;
    Ok(Json(LatestDateResponse {
        station_id: station_id.0,
        metric: query.metric,
        window_days: query.window_days,
        end_date,
    }))
}

// =============================================================================
// Latest-Insight Cache
// =============================================================================

/// GET /v1/latest-insights
///
/// All cached latest-insight snapshots, for listing views.
pub async fn get_latest_insights(
    State(state): State<AppState>,
) -> HandlerResult<LatestInsightListResponse> {
    let insights = services::get_latest_insights(state.repository.as_ref()).await?;
    let total = insights.len();
    Ok(Json(LatestInsightListResponse { insights, total }))
}

/// POST /v1/recompute-latest
///
/// Force a refresh of the latest-insight cache for all stations. Returns a
/// job ID for tracking progress; the recompute runs in the background.
pub async fn trigger_recompute_latest(
    State(state): State<AppState>,
) -> Result<(axum::http::StatusCode, Json<RecomputeResponse>), AppError> {
    if state.job_tracker.has_running(JobKind::RecomputeLatest) {
        return Err(AppError::BadRequest(
            "A latest-insight recompute is already running".to_string(),
        ));
    }

    let job_id = state.job_tracker.create_job(JobKind::RecomputeLatest);
    let response_job_id = job_id.clone();

    let tracker = state.job_tracker.clone();
    let repo = Arc::clone(&state.repository);
    let config = (*state.config).clone();

    tokio::spawn(async move {
        let result =
            services::recompute_all_latest(repo, config, Some((tracker.clone(), job_id.clone())))
                .await;
        match result {
            Ok(summary) => {
                let value = serde_json::to_value(summary).unwrap_or_default();
                tracker.complete_job(&job_id, Some(value));
            }
            Err(e) => tracker.fail_job(&job_id, e.to_string()),
        }
    });

    Ok((
        axum::http::StatusCode::ACCEPTED,
        Json(RecomputeResponse {
            job_id: response_job_id.clone(),
            message: format!(
                "Recompute started. Track progress at /v1/jobs/{}/logs",
                response_job_id
            ),
        }),
    ))
}

// =============================================================================
// Observation Ingest
// =============================================================================

/// POST /v1/observations
///
/// Bulk-ingest observations and re-evaluate the all-time records of every
/// (station, metric) the batch touched.
pub async fn ingest_observations(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> HandlerResult<IngestResponse> {
    if request.observations.is_empty() {
        return Err(AppError::BadRequest(
            "Observation batch must not be empty".to_string(),
        ));
    }

    let outcome = services::ingest_observations(
        state.repository.as_ref(),
        &state.config,
        &request.observations,
    )
    .await?;

    Ok(Json(IngestResponse {
        observations_written: outcome.observations_written,
        records_updated: outcome.records_updated,
    }))
}

// =============================================================================
// Async Job Management
// =============================================================================

/// GET /v1/jobs/{job_id}
///
/// Get the current status and logs of a background job.
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> HandlerResult<JobStatusResponse> {
    let job = state
        .job_tracker
        .get_job(&job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

    Ok(Json(JobStatusResponse {
        job_id: job.job_id,
        status: format!("{:?}", job.status).to_lowercase(),
        logs: job.logs,
        result: job.result,
    }))
}

/// GET /v1/jobs/{job_id}/logs
///
/// Stream job logs via Server-Sent Events (SSE).
pub async fn stream_job_logs(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    // Verify job exists
    if state.job_tracker.get_job(&job_id).is_none() {
        return Err(AppError::NotFound(format!("Job {} not found", job_id)));
    }

    let tracker = state.job_tracker.clone();
    let stream = async_stream::stream! {
        let mut last_log_count = 0;
        loop {
            // Get current logs
            let logs = tracker.get_logs(&job_id);

            // Send new logs since last check
            for log in logs.iter().skip(last_log_count) {
                let event_data = serde_json::to_string(log).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_log_count = logs.len();

            // Check if job is complete
            if let Some(job) = tracker.get_job(&job_id) {
                if job.status != crate::services::job_tracker::JobStatus::Running {
                    // Serde serialization keeps status values lowercase
                    // ("completed", "failed") for the frontend.
                    let final_event = serde_json::json!({
                        "status": job.status,
                        "result": job.result,
                    });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
            } else {
                break;
            }

            // Wait before checking again
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}
