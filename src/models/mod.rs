//! Core data models for Expense CLI
//!
//! Snapshots of the backend's categories and transactions, plus the request
//! bodies used to create them. The client never owns these records; it only
//! reads them and asks the backend to change them.

pub mod category;
pub mod ids;
pub mod transaction;

pub use category::{Category, CategoryValidationError, NewCategory};
pub use ids::{CategoryId, TransactionId};
pub use transaction::{
    Transaction, TransactionInput, TransactionKind, TransactionValidationError,
};
