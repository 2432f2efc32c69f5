//! Reports module for Expense CLI
//!
//! Derived views over category and transaction snapshots. Reports are never
//! persisted; they are recomputed whenever their inputs change.

pub mod expense_breakdown;

pub use expense_breakdown::{ExpenseBreakdown, HslColor, ReportRow};
