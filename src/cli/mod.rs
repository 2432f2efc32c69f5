//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the dashboard.

pub mod auth;
pub mod category;
pub mod report;
pub mod transaction;

pub use auth::{handle_login, handle_logout, handle_status};
pub use category::{handle_category_command, CategoryCommands};
pub use report::{handle_report_command, ReportArgs};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::api::ExpenseBackend;
use crate::dashboard::Dashboard;
use crate::error::{ExpenseError, ExpenseResult};

/// Require a session, then reload the snapshots from the backend
pub(crate) fn load_snapshots<B: ExpenseBackend>(dashboard: &mut Dashboard<B>) -> ExpenseResult<()> {
    dashboard.session().require_token()?;
    dashboard.refresh()
}

/// Parse a `YYYY-MM-DD` argument
pub(crate) fn parse_date(value: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", value))
    })
}

/// Parse an amount argument; thousands separators are allowed
pub(crate) fn parse_amount(value: &str) -> ExpenseResult<f64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| ExpenseError::Validation(format!("Invalid amount: '{}'", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-11-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
        );
        let err = parse_date("11/01/2024").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12000").unwrap(), 12000.0);
        assert_eq!(parse_amount("12,000").unwrap(), 12000.0);
        assert_eq!(parse_amount(" 3.5 ").unwrap(), 3.5);
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert!(parse_amount("inf").unwrap_err().is_validation());
    }
}
