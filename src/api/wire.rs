//! Request and response bodies exchanged with the backend

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Transaction};

/// Minimum password length accepted by the login form
pub const MIN_PASSWORD_LEN: usize = 6;

/// Login request body
#[derive(Clone, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Validate and build login credentials
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> ExpenseResult<Self> {
        let email = email.into().trim().to_string();
        let password = password.into();

        if email.is_empty() || password.is_empty() {
            return Err(ExpenseError::Validation(
                "Both email and password are required".into(),
            ));
        }

        if !looks_like_email(&email) {
            return Err(ExpenseError::Validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ExpenseError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// `local@domain.tld` with no whitespace
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Login response body
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// Category list response body
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Transaction list response body
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TransactionsResponse {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Error body; the backend puts a human-readable reason in `message`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

/// Build an API error from a failed response
///
/// Uses the body's `message` when present, otherwise `fallback`.
pub(crate) fn api_error(status: u16, body: &str, fallback: &str) -> ExpenseError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    ExpenseError::Api { status, message }
}
