//! Severity classification based on percentile thresholds.
//!
//! Four-level scale plus an `insufficient_data` override, symmetric around
//! the median:
//!
//! | percentile            | severity  |
//! |-----------------------|-----------|
//! | < 5 or > 95           | extreme   |
//! | <= 15 or >= 85        | unusual   |
//! | <= 35 or >= 65        | a_bit     |
//! | otherwise             | normal    |
//!
//! Severity is purely a function of the percentile and sample sufficiency;
//! it never inspects the raw physical value.

use serde::{Deserialize, Serialize};

use crate::api::Metric;

/// Ordered severity label: insufficient_data < normal < a_bit < unusual < extreme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    InsufficientData,
    Normal,
    ABit,
    Unusual,
    Extreme,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Extreme => "extreme",
            Severity::Unusual => "unusual",
            Severity::ABit => "a_bit",
            Severity::Normal => "normal",
            Severity::InsufficientData => "insufficient_data",
        }
    }
}

/// Which side of the climatology the value sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Warm,
    Cold,
    Wet,
    Dry,
    Neutral,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Warm => "warm",
            Direction::Cold => "cold",
            Direction::Wet => "wet",
            Direction::Dry => "dry",
            Direction::Neutral => "neutral",
        }
    }

    /// True for the high-percentile side of the metric's axis.
    pub fn is_high_side(&self) -> bool {
        matches!(self, Direction::Warm | Direction::Wet)
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warm" => Ok(Direction::Warm),
            "cold" => Ok(Direction::Cold),
            "wet" => Ok(Direction::Wet),
            "dry" => Ok(Direction::Dry),
            other => Err(format!("Unknown direction: {}", other)),
        }
    }
}

/// Classify severity from a percentile (0-100) and the reference-sample size.
///
/// `insufficient_data` overrides all other rules: a missing percentile or a
/// sample below `min_samples` yields it regardless of the value.
pub fn classify_severity(
    percentile: Option<f64>,
    n_samples: usize,
    min_samples: usize,
) -> Severity {
    let Some(p) = percentile else {
        return Severity::InsufficientData;
    };
    if n_samples < min_samples {
        return Severity::InsufficientData;
    }

    if p < 5.0 || p > 95.0 {
        Severity::Extreme
    } else if p <= 15.0 || p >= 85.0 {
        Severity::Unusual
    } else if p <= 35.0 || p >= 65.0 {
        Severity::ABit
    } else {
        Severity::Normal
    }
}

/// Determine the direction from percentile and metric.
///
/// Below-median percentiles read cold (dry for precipitation), above-median
/// warm (wet). A normal-severity insight still carries a direction; it just
/// is not presented as an intensity.
pub fn classify_direction(percentile: f64, metric: Metric) -> Direction {
    let high = percentile > 50.0;
    if metric.is_temperature() {
        if high {
            Direction::Warm
        } else {
            Direction::Cold
        }
    } else if high {
        Direction::Wet
    } else {
        Direction::Dry
    }
}
