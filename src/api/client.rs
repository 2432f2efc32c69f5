//! Blocking REST client for the expense backend
//!
//! Every authenticated request carries the session token in the
//! `X-Session-ID` header. Failures are surfaced once; nothing is retried.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};

use super::wire::{
    api_error, CategoriesResponse, Credentials, LoginResponse, TransactionsResponse,
};
use super::ExpenseBackend;
use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, NewCategory, Transaction, TransactionId, TransactionInput};
use crate::session::SessionToken;

/// Header carrying the session token
pub const SESSION_HEADER: &str = "X-Session-ID";

/// HTTP implementation of [`ExpenseBackend`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Build a client from user settings
    pub fn new(settings: &Settings) -> ExpenseResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .user_agent(concat!("expense-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExpenseError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authed(&self, method: Method, path: &str, token: &SessionToken) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(SESSION_HEADER, token.as_str())
    }

    /// Send a request and turn non-success statuses into errors
    fn send(&self, request: RequestBuilder, fallback: &str) -> ExpenseResult<Response> {
        let response = request.send()?;
        let status = response.status();
        log::debug!("{} {}", status.as_u16(), response.url());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(api_error(status.as_u16(), &body, fallback))
    }
}

impl ExpenseBackend for ApiClient {
    fn login(&self, credentials: &Credentials) -> ExpenseResult<SessionToken> {
        let response = self
            .http
            .post(self.url("profile/login"))
            .json(credentials)
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ExpenseError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(api_error(status.as_u16(), &body, "Login failed"));
        }

        let body: LoginResponse = response.json()?;
        let raw = body.session_id.ok_or_else(|| ExpenseError::Api {
            status: status.as_u16(),
            message: "Login response did not include a session id".into(),
        })?;

        SessionToken::new(raw)
    }

    fn list_categories(&self, token: &SessionToken) -> ExpenseResult<Vec<Category>> {
        let response = self.send(
            self.authed(Method::GET, "categories/get", token),
            "Failed to load categories",
        )?;
        let body: CategoriesResponse = response.json()?;
        Ok(body.categories)
    }

    fn create_category(
        &self,
        token: &SessionToken,
        category: &NewCategory,
    ) -> ExpenseResult<Option<Category>> {
        let response = self.send(
            self.authed(Method::POST, "categories/create", token).json(category),
            "Failed to create category",
        )?;

        // Some backends echo the created record; any other body is ignored
        let text = response.text().unwrap_or_default();
        Ok(serde_json::from_str(&text).ok())
    }

    fn list_transactions(&self, token: &SessionToken) -> ExpenseResult<Vec<Transaction>> {
        let response = self.send(
            self.authed(Method::GET, "transactions/profile", token),
            "Failed to load transactions",
        )?;
        let body: TransactionsResponse = response.json()?;
        Ok(body.transactions)
    }

    fn create_transaction(
        &self,
        token: &SessionToken,
        input: &TransactionInput,
    ) -> ExpenseResult<()> {
        self.send(
            self.authed(Method::POST, "transactions/create", token).json(input),
            "Failed to save transaction",
        )?;
        Ok(())
    }

    fn update_transaction(
        &self,
        token: &SessionToken,
        id: TransactionId,
        input: &TransactionInput,
    ) -> ExpenseResult<()> {
        self.send(
            self.authed(Method::PUT, &format!("transactions/edit/{}", id.get()), token)
                .json(input),
            "Failed to save transaction",
        )?;
        Ok(())
    }

    fn delete_transaction(&self, token: &SessionToken, id: TransactionId) -> ExpenseResult<()> {
        self.send(
            self.authed(Method::DELETE, &format!("transactions/{}", id.get()), token),
            "Failed to delete transaction",
        )?;
        Ok(())
    }
}
