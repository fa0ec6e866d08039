//! Descriptive statement generation.
//!
//! Produces the primary statement and supporting line for the insight API.
//! All statements are deterministic for identical inputs.

use crate::services::severity::{Direction, Severity};

/// Inputs for statement generation.
#[derive(Debug, Clone)]
pub struct StatementContext {
    pub window_days: u32,
    pub percentile: Option<f64>,
    pub severity: Severity,
    pub direction: Direction,
    pub coverage_years: u32,
    pub first_year: i32,
    pub since_year: Option<i32>,
    /// Set when the period is rank 1 of a sufficiently long seasonal ranking
    /// or ties/beats a stored all-time record.
    pub record_framing: Option<RecordFraming>,
}

/// Record framing for the primary statement.
#[derive(Debug, Clone)]
pub struct RecordFraming {
    /// "coldest", "warmest", "wettest", "driest"
    pub superlative: &'static str,
    pub total_years: usize,
}

/// Generate (primary_statement, supporting_line).
pub fn generate_insight(ctx: &StatementContext) -> (String, String) {
    let window_label = window_label(ctx.window_days);

    let primary = if let Some(record) = &ctx.record_framing {
        format!(
            "This {} is the {} on record ({} years).",
            window_label, record.superlative, record.total_years
        )
    } else {
        match ctx.severity {
            Severity::InsufficientData => {
                format!("Not enough climatology data to classify this {}.", window_label)
            }
            Severity::Normal => format!("This {} is near normal.", window_label),
            Severity::ABit => format!(
                "This {} is a bit {}.",
                window_label,
                direction_comparative(ctx.direction)
            ),
            Severity::Unusual | Severity::Extreme => format!(
                "This {} is {} {}.",
                window_label,
                severity_adverb(ctx.severity),
                direction_adjective(ctx.direction)
            ),
        }
    };

    let percentile = ctx.percentile.unwrap_or(50.0);
    let comparison = if ctx.direction.is_high_side() {
        format!(
            "{} than {:.0}%",
            high_side_comparative(ctx.direction),
            percentile
        )
    } else {
        format!(
            "{} than {:.0}%",
            low_side_comparative(ctx.direction),
            100.0 - percentile
        )
    };

    let range_label = match ctx.since_year {
        Some(since) => format!("{}\u{2013}present", since),
        None => format!("since {}", ctx.first_year),
    };

    let supporting = format!(
        "{} of historical {}s ({}, {} years of data).",
        comparison, window_label, range_label, ctx.coverage_years
    );

    (primary, supporting)
}

/// Human-readable window label.
pub fn window_label(window_days: u32) -> String {
    match window_days {
        1 => "day".to_string(),
        7 => "week".to_string(),
        30 => "30-day period".to_string(),
        365 => "year".to_string(),
        n => format!("{}-day period", n),
    }
}

/// The superlative used for record framing in a given direction.
pub fn direction_superlative(direction: Direction) -> &'static str {
    match direction {
        Direction::Warm => "warmest",
        Direction::Cold => "coldest",
        Direction::Wet => "wettest",
        Direction::Dry => "driest",
        Direction::Neutral => "most unusual",
    }
}

fn severity_adverb(severity: Severity) -> &'static str {
    match severity {
        Severity::Extreme => "extremely",
        Severity::Unusual => "unusually",
        _ => "",
    }
}

fn direction_adjective(direction: Direction) -> &'static str {
    match direction {
        Direction::Warm => "warm",
        Direction::Cold => "cold",
        Direction::Wet => "wet",
        Direction::Dry => "dry",
        Direction::Neutral => "unusual",
    }
}

fn direction_comparative(direction: Direction) -> &'static str {
    match direction {
        Direction::Warm => "warmer",
        Direction::Cold => "colder",
        Direction::Wet => "wetter",
        Direction::Dry => "drier",
        Direction::Neutral => "different",
    }
}

fn high_side_comparative(direction: Direction) -> &'static str {
    match direction {
        Direction::Wet => "Wetter",
        _ => "Warmer",
    }
}

fn low_side_comparative(direction: Direction) -> &'static str {
    match direction {
        Direction::Dry => "Drier",
        _ => "Colder",
    }
}
