//! Transaction filtering and totals
//!
//! Narrows a transaction list by type and inclusive date range, and sums the
//! result into income, expense, and balance figures.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Transaction, TransactionKind};

/// Filter criteria; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    /// Inclusive lower bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    /// Build a filter, rejecting an inverted date range
    pub fn new(
        kind: Option<TransactionKind>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> ExpenseResult<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ExpenseError::Validation(format!(
                    "Start date {} is after end date {}",
                    from, to
                )));
            }
        }
        Ok(Self { kind, from, to })
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.from.is_none() && self.to.is_none()
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }

        if let Some(from) = self.from {
            if txn.occurred_on < from {
                return false;
            }
        }

        if let Some(to) = self.to {
            if txn.occurred_on > to {
                return false;
            }
        }

        true
    }

    /// Matching transactions, in input order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Income and expense sums over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransactionTotals {
    pub income: f64,
    pub expense: f64,
}

impl TransactionTotals {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals = Self::default();
        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => totals.income += txn.effective_amount(),
                TransactionKind::Expense => totals.expense += txn.effective_amount(),
            }
        }
        totals
    }

    /// Income minus expense
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}
