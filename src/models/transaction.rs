//! Transaction model
//!
//! Represents a single income or expense record as returned by the backend,
//! plus the request body used to create or edit one.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::{CategoryId, TransactionId};

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}'. Use 'income' or 'expense'",
                other
            )),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Backend-assigned identifier
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "transactionType", alias = "type")]
    pub kind: TransactionKind,

    /// Non-negative amount
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,

    /// Free-form description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Day the transaction happened
    #[serde(rename = "date", deserialize_with = "deserialize_lenient_date")]
    pub occurred_on: NaiveDate,

    /// Categories this transaction is filed under (many-to-many)
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
}

impl Transaction {
    /// Create a transaction snapshot with no categories
    pub fn new(
        id: impl Into<TransactionId>,
        kind: TransactionKind,
        amount: f64,
        occurred_on: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            amount,
            description: String::new(),
            occurred_on,
            categories: Vec::new(),
        }
    }

    /// Builder-style helper to attach categories
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Builder-style helper to set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// The amount, with non-finite values treated as zero
    pub fn effective_amount(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount
        } else {
            0.0
        }
    }

    /// Check whether this transaction is filed under the given category
    pub fn has_category(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    /// Labels of the attached categories, comma separated
    pub fn category_labels(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.occurred_on, self.kind, self.amount, self.description
        )
    }
}

/// An explicit `null` decodes the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The backend sends either a plain date or a local/UTC date-time
fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_lenient_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

/// Parse `2024-05-01`, `2024-05-01T09:30:00`, or an RFC 3339 timestamp
pub fn parse_lenient_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Request body for creating or editing a transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub category_ids: Vec<CategoryId>,

    pub description: String,

    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,

    /// Sent as midnight UTC of the chosen day
    #[serde(rename = "date", serialize_with = "serialize_midnight_utc")]
    pub occurred_on: NaiveDate,
}

impl TransactionInput {
    /// Build a validated request
    pub fn new(
        kind: TransactionKind,
        category_ids: Vec<CategoryId>,
        description: impl Into<String>,
        amount: f64,
        occurred_on: NaiveDate,
    ) -> Result<Self, TransactionValidationError> {
        let input = Self {
            kind,
            category_ids,
            description: description.into().trim().to_string(),
            amount,
            occurred_on,
        };
        input.validate()?;
        Ok(input)
    }

    /// Start an edit from an existing transaction
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind,
            category_ids: txn.categories.iter().map(|c| c.id).collect(),
            description: txn.description.clone(),
            amount: txn.amount,
            occurred_on: txn.occurred_on,
        }
    }

    /// Validate the request
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.category_ids.is_empty() {
            return Err(TransactionValidationError::NoCategories);
        }

        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(TransactionValidationError::NonPositiveAmount);
        }

        // Stored as a whole number server-side
        if self.amount.fract() != 0.0 {
            return Err(TransactionValidationError::FractionalAmount);
        }

        Ok(())
    }
}

/// Whole amounts go out as integers since the backend stores them as such
fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

fn serialize_midnight_utc<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let dt = date.and_time(NaiveTime::MIN).and_utc();
    serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NoCategories,
    EmptyDescription,
    NonPositiveAmount,
    FractionalAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCategories => write!(f, "Select at least one category"),
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Amount must be a positive number"),
            Self::FractionalAmount => write!(f, "Amount must be a whole number"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
