//! # ETI Rust Backend
//!
//! Climatology and insight-computation engine for daily weather records.
//!
//! This crate provides the Rust backend for the Extreme Temperature Insights
//! (ETI) system. It turns a long-running daily temperature record per weather
//! station into a judgment of how unusual the current period of weather is:
//! rolling-window aggregation, historical reference distributions
//! ("climatology"), percentile ranking, severity classification, same-time-of-
//! year and all-time rankings, and all-time record tracking. The backend
//! exposes a REST API via Axum for the React frontend.
//!
//! ## Features
//!
//! - **Rolling windows**: trailing N-day aggregates with gap tolerance
//! - **Climatology**: calendar-aligned reference samples across all years on record
//! - **Classification**: percentile-based severity and warm/cold direction
//! - **Rankings**: seasonal (same calendar position) and all-time extremes
//! - **Records**: per-station all-time highs/lows with atomic updates
//! - **Latest-insight cache**: precomputed snapshots for listing views
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Shared identifiers and Data Transfer Objects (DTOs)
//! - [`config`]: Engine thresholds loaded from `engine.toml`
//! - [`models`]: Calendar alignment and daily-series domain types
//! - [`db`]: Observation store access, repository pattern, derived state
//! - [`services`]: The insight-computation engine and recompute jobs
//! - [`routes`]: Route-specific response types
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod config;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
