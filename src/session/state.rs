//! Session state and change notification
//!
//! The session is a single value owned by whoever coordinates the
//! application. Components that care about login state register a
//! [`SessionObserver`] and are told when a token is acquired or cleared.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExpenseError, ExpenseResult};

/// Opaque token proving an authenticated user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token issued by the backend
    pub fn new(raw: impl Into<String>) -> ExpenseResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ExpenseError::Validation("Session token cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = ExpenseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// A change in login state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A token was stored
    Acquired,
    /// The token was dropped
    Cleared,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acquired => write!(f, "session acquired"),
            Self::Cleared => write!(f, "session cleared"),
        }
    }
}

/// Receives session changes
pub trait SessionObserver {
    /// Called after the session changed; `token` is the new token, if any
    fn on_session_event(
        &mut self,
        event: SessionEvent,
        token: Option<&SessionToken>,
    ) -> ExpenseResult<()>;
}

/// Logs every session change
#[derive(Debug, Default)]
pub struct LogObserver;

impl SessionObserver for LogObserver {
    fn on_session_event(
        &mut self,
        event: SessionEvent,
        _token: Option<&SessionToken>,
    ) -> ExpenseResult<()> {
        log::info!("{}", event);
        Ok(())
    }
}

/// Current login state plus the observers interested in it
#[derive(Default)]
pub struct Session {
    token: Option<SessionToken>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session {
    /// A logged-out session with no observers
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously stored token without notifying anyone
    pub fn restore(token: Option<SessionToken>) -> Self {
        Self {
            token,
            observers: Vec::new(),
        }
    }

    /// Register an observer; observers are notified in registration order
    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The token, or `NotLoggedIn`
    pub fn require_token(&self) -> ExpenseResult<&SessionToken> {
        self.token.as_ref().ok_or(ExpenseError::NotLoggedIn)
    }

    /// Store a new token and notify observers
    pub fn acquire(&mut self, token: SessionToken) -> ExpenseResult<()> {
        self.token = Some(token);
        self.notify(SessionEvent::Acquired)
    }

    /// Drop the token and notify observers
    ///
    /// Returns `false` without notifying if there was no token.
    pub fn clear(&mut self) -> ExpenseResult<bool> {
        if self.token.take().is_none() {
            return Ok(false);
        }
        self.notify(SessionEvent::Cleared)?;
        Ok(true)
    }

    /// Every observer runs even if an earlier one fails; the first error wins
    fn notify(&mut self, event: SessionEvent) -> ExpenseResult<()> {
        let mut first_error = None;
        for observer in &mut self.observers {
            if let Err(e) = observer.on_session_event(event, self.token.as_ref()) {
                log::warn!("Session observer failed on {}: {}", event, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token)
            .field("observers", &self.observers.len())
            .finish()
    }
}
