//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables, amounts, and the breakdown bar chart.

pub mod category;
pub mod report;
pub mod transaction;

pub use category::format_category_list;
pub use report::{format_amount, format_breakdown, format_totals};
pub use transaction::{format_transaction_details, format_transaction_list};

use chrono::NaiveDate;
use std::fmt::Write;

/// Format a date with a user-supplied strftime pattern
///
/// Falls back to ISO format when the pattern is invalid.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        "...".chars().take(max_chars).collect()
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}
