//! Engine configuration file support.
//!
//! This module provides utilities for reading engine thresholds from TOML
//! configuration files. Every threshold has a serde default so a partial (or
//! absent) `engine.toml` still yields a fully usable configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::error::ComputeError;

/// Engine configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub engine: EngineSettings,
}

/// Engine threshold settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Rolling window sizes (days) maintained by batch recompute and the
    /// records tracker.
    #[serde(default = "default_window_days")]
    pub window_days: Vec<u32>,
    /// Minimum fraction of the window that must have observations for the
    /// current value to be computed. Different window lengths tolerate
    /// different gap rates, hence a parameter rather than a constant.
    #[serde(default = "default_min_coverage_ratio")]
    pub min_coverage_ratio: f64,
    /// Minimum reference-sample size below which severity degrades to
    /// `insufficient_data`.
    #[serde(default = "default_min_climatology_samples")]
    pub min_climatology_samples: usize,
    /// Days on each side of the aligned calendar date that contribute extra
    /// reference samples per year (0 = exactly one sample per year).
    #[serde(default)]
    pub climatology_halfwidth_days: u32,
    /// Minimum number of ranked years before a rank-1 seasonal result may be
    /// framed as a record in the insight narrative.
    #[serde(default = "default_min_record_years")]
    pub min_record_years: usize,
    /// How many days the latest-insight recompute walks back from the newest
    /// observation when the freshest windows cannot be computed (upstream
    /// publication lag).
    #[serde(default = "default_max_publication_lag_days")]
    pub max_publication_lag_days: u32,
    /// Maximum number of stations recomputed concurrently. Within one
    /// station the cache keys are always written sequentially.
    #[serde(default = "default_recompute_concurrency")]
    pub recompute_concurrency: usize,
}

fn default_window_days() -> Vec<u32> {
    vec![1, 3, 7, 14, 30, 90, 365]
}

fn default_min_coverage_ratio() -> f64 {
    0.5
}

fn default_min_climatology_samples() -> usize {
    10
}

fn default_min_record_years() -> usize {
    10
}

fn default_max_publication_lag_days() -> u32 {
    7
}

fn default_recompute_concurrency() -> usize {
    8
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            min_coverage_ratio: default_min_coverage_ratio(),
            min_climatology_samples: default_min_climatology_samples(),
            climatology_halfwidth_days: 0,
            min_record_years: default_min_record_years(),
            max_publication_lag_days: default_max_publication_lag_days(),
            recompute_concurrency: default_recompute_concurrency(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ComputeError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ComputeError::InvalidParameter(format!("Failed to read config file: {}", e))
        })?;

        let config: EngineConfig = toml::from_str(&content).map_err(|e| {
            ComputeError::InvalidParameter(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load engine configuration from the default locations, falling back to
    /// built-in defaults when no `engine.toml` is found.
    ///
    /// Searches for `engine.toml` in:
    /// 1. Current directory
    /// 2. Parent directory
    pub fn from_default_location() -> Self {
        let search_paths = [PathBuf::from("engine.toml"), PathBuf::from("../engine.toml")];

        for path in search_paths {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring invalid engine.toml: {}", e);
                        break;
                    }
                }
            }
        }

        Self::default()
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ComputeError> {
        let s = &self.engine;
        if s.window_days.is_empty() || s.window_days.iter().any(|&w| w == 0) {
            return Err(ComputeError::InvalidParameter(
                "engine.window_days must be non-empty and positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&s.min_coverage_ratio) {
            return Err(ComputeError::InvalidParameter(
                "engine.min_coverage_ratio must be within [0, 1]".to_string(),
            ));
        }
        if s.recompute_concurrency == 0 {
            return Err(ComputeError::InvalidParameter(
                "engine.recompute_concurrency must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
