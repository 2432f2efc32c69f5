//! Expense CLI - Terminal client for a personal expense tracker
//!
//! This library provides the core functionality for the Expense CLI. All
//! categories and transactions live on a remote backend; the crate logs in,
//! loads them, and turns the expense transactions into a per-category
//! breakdown with shares and display colors.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, transactions, ids)
//! - `reports`: The expense breakdown aggregator
//! - `session`: Login state, its observers, and on-disk persistence
//! - `api`: Backend trait and the REST client
//! - `dashboard`: Root coordinator owning the session and loaded data
//! - `services`: Filtering, totals, and lookups
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense::reports::ExpenseBreakdown;
//!
//! let breakdown = ExpenseBreakdown::compute(&categories, &transactions);
//! for row in &breakdown.rows {
//!     println!("{} {}% {}", row.label, row.percentage, row.color);
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;

pub use error::ExpenseError;
