//! Backend access for Expense CLI
//!
//! [`ExpenseBackend`] is the seam between the application and the remote
//! service that owns all categories and transactions. [`ApiClient`] talks to
//! the real REST API; tests substitute an in-memory implementation.

mod client;
mod wire;

pub use client::{ApiClient, SESSION_HEADER};
pub use wire::{Credentials, MIN_PASSWORD_LEN};

use crate::error::ExpenseResult;
use crate::models::{Category, NewCategory, Transaction, TransactionId, TransactionInput};
use crate::session::SessionToken;

/// Operations the remote backend provides
pub trait ExpenseBackend {
    /// Exchange credentials for a session token
    fn login(&self, credentials: &Credentials) -> ExpenseResult<SessionToken>;

    /// All categories owned by the session's user
    fn list_categories(&self, token: &SessionToken) -> ExpenseResult<Vec<Category>>;

    /// Create a category; returns the created record when the backend echoes it
    fn create_category(
        &self,
        token: &SessionToken,
        category: &NewCategory,
    ) -> ExpenseResult<Option<Category>>;

    /// All transactions owned by the session's user
    fn list_transactions(&self, token: &SessionToken) -> ExpenseResult<Vec<Transaction>>;

    fn create_transaction(&self, token: &SessionToken, input: &TransactionInput)
        -> ExpenseResult<()>;

    fn update_transaction(
        &self,
        token: &SessionToken,
        id: TransactionId,
        input: &TransactionInput,
    ) -> ExpenseResult<()>;

    fn delete_transaction(&self, token: &SessionToken, id: TransactionId) -> ExpenseResult<()>;
}
