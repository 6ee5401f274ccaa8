//! Utility functions shared by the ledger and the shell

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Calculate the absolute difference between two ratings
pub fn rating_difference(rating1: f64, rating2: f64) -> f64 {
    (rating1 - rating2).abs()
}

/// Format a rating delta with two decimals and an explicit sign for gains
pub fn format_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{:.2}", delta)
    } else {
        format!("{:.2}", delta)
    }
}

/// Round a rating to two decimals for display
pub fn display_rating(rating: f64) -> f64 {
    (rating * 100.0).round() / 100.0
}

/// Split a comma separated list of names, trimming whitespace and dropping blanks
pub fn parse_name_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
