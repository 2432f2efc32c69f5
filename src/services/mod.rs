//! Service layer for Expense CLI
//!
//! Pure helpers that sit between the CLI and the loaded snapshots: filtering,
//! totals, and resolving what the user typed into ids.

pub mod filter;
pub mod lookup;

pub use filter::{TransactionFilter, TransactionTotals};
pub use lookup::{find_category, find_transaction, resolve_category_ids};
