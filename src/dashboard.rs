//! Root coordinator for Expense CLI
//!
//! The [`Dashboard`] owns the session, the latest category and transaction
//! snapshots, and the expense breakdown derived from them. Whether the user
//! is logged in is answered only by the owned session; every view reads from
//! here instead of re-deriving it.

use crate::api::{Credentials, ExpenseBackend};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, NewCategory, Transaction, TransactionId, TransactionInput};
use crate::reports::ExpenseBreakdown;
use crate::session::{Session, SessionToken};

/// How a successful login went
#[derive(Debug)]
pub enum LoginOutcome {
    /// Session stored and data loaded
    Loaded,
    /// Session stored, but the first load failed
    LoadFailed(ExpenseError),
}

/// Application state shared by every command
pub struct Dashboard<B: ExpenseBackend> {
    backend: B,
    session: Session,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    breakdown: ExpenseBreakdown,
}

impl<B: ExpenseBackend> Dashboard<B> {
    /// Create a dashboard; nothing is loaded until [`Dashboard::refresh`]
    pub fn new(backend: B, session: Session) -> Self {
        Self {
            backend,
            session,
            categories: Vec::new(),
            transactions: Vec::new(),
            breakdown: ExpenseBreakdown::empty(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn breakdown(&self) -> &ExpenseBreakdown {
        &self.breakdown
    }

    /// Log in, store the session, and load the user's data
    ///
    /// Once the token is stored the login stands even if the first load
    /// fails; that failure comes back as [`LoginOutcome::LoadFailed`].
    pub fn login(&mut self, credentials: &Credentials) -> ExpenseResult<LoginOutcome> {
        let token = self.backend.login(credentials)?;
        log::info!("Logged in as {}", credentials.email());
        self.session.acquire(token)?;

        match self.refresh() {
            Ok(()) => Ok(LoginOutcome::Loaded),
            Err(e) if self.is_logged_in() => {
                log::warn!("Logged in, but loading data failed: {}", e);
                Ok(LoginOutcome::LoadFailed(e))
            }
            Err(e) => Err(e),
        }
    }

    /// Drop the session and every loaded snapshot
    ///
    /// Returns `false` if there was no session to drop. Snapshots are
    /// emptied even when an observer fails.
    pub fn logout(&mut self) -> ExpenseResult<bool> {
        let cleared = self.session.clear();
        self.replace_snapshots(Vec::new(), Vec::new());
        cleared
    }

    /// Reload categories and transactions for the current session
    ///
    /// When logged out, the snapshots are simply emptied.
    pub fn refresh(&mut self) -> ExpenseResult<()> {
        let Some(token) = self.session.token().cloned() else {
            self.replace_snapshots(Vec::new(), Vec::new());
            return Ok(());
        };

        let categories = self.backend.list_categories(&token);
        let categories = self.check_auth(categories)?;
        let transactions = self.backend.list_transactions(&token);
        let transactions = self.check_auth(transactions)?;

        log::debug!(
            "Loaded {} categories and {} transactions",
            categories.len(),
            transactions.len()
        );
        self.replace_snapshots(categories, transactions);
        Ok(())
    }

    /// Create a category and reload
    pub fn add_category(&mut self, label: &str) -> ExpenseResult<Option<Category>> {
        let body = NewCategory::new(label)?;
        let token = self.token()?;
        let created = self.backend.create_category(&token, &body);
        let created = self.check_auth(created)?;
        self.refresh()?;
        Ok(created)
    }

    /// Record a transaction and reload
    pub fn add_transaction(&mut self, input: &TransactionInput) -> ExpenseResult<()> {
        input.validate()?;
        let token = self.token()?;
        let result = self.backend.create_transaction(&token, input);
        self.check_auth(result)?;
        self.refresh()
    }

    /// Replace a transaction's fields and reload
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        input: &TransactionInput,
    ) -> ExpenseResult<()> {
        input.validate()?;
        let token = self.token()?;
        let result = self.backend.update_transaction(&token, id, input);
        self.check_auth(result)?;
        self.refresh()
    }

    /// Delete a transaction and reload
    pub fn delete_transaction(&mut self, id: TransactionId) -> ExpenseResult<()> {
        let token = self.token()?;
        let result = self.backend.delete_transaction(&token, id);
        self.check_auth(result)?;
        self.refresh()
    }

    fn token(&self) -> ExpenseResult<SessionToken> {
        self.session.require_token().cloned()
    }

    /// A rejected token means the stored session is stale; drop it
    fn check_auth<T>(&mut self, result: ExpenseResult<T>) -> ExpenseResult<T> {
        match result {
            Err(e) if e.is_unauthorized() => {
                log::warn!("Backend rejected the session token; clearing session");
                if let Err(clear_err) = self.logout() {
                    log::warn!("Failed to forget the stored session: {}", clear_err);
                }
                Err(ExpenseError::NotLoggedIn)
            }
            other => other,
        }
    }

    fn replace_snapshots(&mut self, categories: Vec<Category>, transactions: Vec<Transaction>) {
        self.breakdown = ExpenseBreakdown::compute(&categories, &transactions);
        self.categories = categories;
        self.transactions = transactions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, TransactionKind};
    use crate::session::{SessionEvent, SessionObserver};
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory backend keyed by a single valid token
    #[derive(Default)]
    struct FakeBackend {
        valid_token: &'static str,
        broken_transactions: bool,
        categories: RefCell<Vec<Category>>,
        transactions: RefCell<Vec<Transaction>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                valid_token: "good",
                ..Self::default()
            }
        }

        fn check(&self, token: &SessionToken) -> ExpenseResult<()> {
            if token.as_str() == self.valid_token {
                Ok(())
            } else {
                Err(ExpenseError::Api {
                    status: 401,
                    message: "invalid session".into(),
                })
            }
        }

        fn record(&self, call: &str) {
            self.calls.borrow_mut().push(call.to_string());
        }
    }

    impl ExpenseBackend for FakeBackend {
        fn login(&self, credentials: &Credentials) -> ExpenseResult<SessionToken> {
            self.record("login");
            if credentials.email() == "kim@example.com" {
                SessionToken::new(self.valid_token)
            } else {
                Err(ExpenseError::InvalidCredentials)
            }
        }

        fn list_categories(&self, token: &SessionToken) -> ExpenseResult<Vec<Category>> {
            self.record("list_categories");
            self.check(token)?;
            Ok(self.categories.borrow().clone())
        }

        fn create_category(
            &self,
            token: &SessionToken,
            category: &NewCategory,
        ) -> ExpenseResult<Option<Category>> {
            self.record("create_category");
            self.check(token)?;
            let next = self.categories.borrow().len() as i64 + 1;
            let created = Category::new(next, category.content.clone());
            self.categories.borrow_mut().push(created.clone());
            Ok(Some(created))
        }

        fn list_transactions(&self, token: &SessionToken) -> ExpenseResult<Vec<Transaction>> {
            self.record("list_transactions");
            self.check(token)?;
            if self.broken_transactions {
                return Err(ExpenseError::Json("invalid type: null".into()));
            }
            Ok(self.transactions.borrow().clone())
        }

        fn create_transaction(
            &self,
            token: &SessionToken,
            input: &TransactionInput,
        ) -> ExpenseResult<()> {
            self.record("create_transaction");
            self.check(token)?;
            let categories: Vec<Category> = self
                .categories
                .borrow()
                .iter()
                .filter(|c| input.category_ids.contains(&c.id))
                .cloned()
                .collect();
            let next = self.transactions.borrow().len() as i64 + 1;
            let txn = Transaction::new(next, input.kind, input.amount, input.occurred_on)
                .with_description(input.description.clone())
                .with_categories(categories);
            self.transactions.borrow_mut().push(txn);
            Ok(())
        }

        fn update_transaction(
            &self,
            token: &SessionToken,
            id: TransactionId,
            input: &TransactionInput,
        ) -> ExpenseResult<()> {
            self.record("update_transaction");
            self.check(token)?;
            let mut txns = self.transactions.borrow_mut();
            let txn = txns
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| ExpenseError::transaction_not_found(id.to_string()))?;
            txn.amount = input.amount;
            txn.kind = input.kind;
            Ok(())
        }

        fn delete_transaction(&self, token: &SessionToken, id: TransactionId) -> ExpenseResult<()> {
            self.record("delete_transaction");
            self.check(token)?;
            self.transactions.borrow_mut().retain(|t| t.id != id);
            Ok(())
        }
    }

    struct EventLog(Rc<RefCell<Vec<SessionEvent>>>);

    struct FailingStore;

    impl SessionObserver for FailingStore {
        fn on_session_event(
            &mut self,
            event: SessionEvent,
            _token: Option<&SessionToken>,
        ) -> ExpenseResult<()> {
            match event {
                SessionEvent::Acquired => Ok(()),
                SessionEvent::Cleared => Err(ExpenseError::Storage("disk full".into())),
            }
        }
    }

    impl SessionObserver for EventLog {
        fn on_session_event(
            &mut self,
            event: SessionEvent,
            _token: Option<&SessionToken>,
        ) -> ExpenseResult<()> {
            self.0.borrow_mut().push(event);
            Ok(())
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
    }

    fn creds() -> Credentials {
        Credentials::new("kim@example.com", "hunter22").unwrap()
    }

    fn expense_input(category: i64, amount: f64) -> TransactionInput {
        TransactionInput::new(
            TransactionKind::Expense,
            vec![CategoryId::new(category)],
            "test",
            amount,
            day(),
        )
        .unwrap()
    }

    #[test]
    fn test_logged_out_refresh_is_empty() {
        let backend = FakeBackend::new();
        backend.categories.borrow_mut().push(Category::new(1, "Food"));
        let mut dashboard = Dashboard::new(backend, Session::new());

        dashboard.refresh().unwrap();

        assert!(!dashboard.is_logged_in());
        assert!(dashboard.categories().is_empty());
        assert!(dashboard.backend.calls.borrow().is_empty());
    }

    #[test]
    fn test_login_notifies_and_loads() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut session = Session::new();
        session.subscribe(Box::new(EventLog(Rc::clone(&events))));

        let backend = FakeBackend::new();
        backend.categories.borrow_mut().push(Category::new(1, "Food"));
        let mut dashboard = Dashboard::new(backend, session);

        let outcome = dashboard.login(&creds()).unwrap();

        assert!(matches!(outcome, LoginOutcome::Loaded));
        assert!(dashboard.is_logged_in());
        assert_eq!(dashboard.categories().len(), 1);
        assert_eq!(*events.borrow(), vec![SessionEvent::Acquired]);
    }

    #[test]
    fn test_failed_login_keeps_session_empty() {
        let mut dashboard = Dashboard::new(FakeBackend::new(), Session::new());
        let other = Credentials::new("lee@example.com", "hunter22").unwrap();

        assert!(matches!(
            dashboard.login(&other),
            Err(ExpenseError::InvalidCredentials)
        ));
        assert!(!dashboard.is_logged_in());
    }

    #[test]
    fn test_mutations_recompute_breakdown() {
        let mut dashboard = Dashboard::new(FakeBackend::new(), Session::new());
        dashboard.login(&creds()).unwrap();

        dashboard.add_category("Food").unwrap();
        dashboard.add_category("Transport").unwrap();
        dashboard.add_transaction(&expense_input(1, 700.0)).unwrap();
        dashboard.add_transaction(&expense_input(2, 300.0)).unwrap();

        let breakdown = dashboard.breakdown();
        assert_eq!(breakdown.total, 1000.0);
        assert_eq!(breakdown.rows[0].label, "Food");
        assert_eq!(breakdown.rows[0].percentage, 70);

        dashboard
            .update_transaction(TransactionId::new(2), &expense_input(2, 1700.0))
            .unwrap();
        assert_eq!(dashboard.breakdown().rows[0].label, "Transport");
        assert_eq!(dashboard.breakdown().total, 2400.0);

        dashboard.delete_transaction(TransactionId::new(1)).unwrap();
        assert_eq!(dashboard.transactions().len(), 1);
        assert_eq!(dashboard.breakdown().rows.len(), 1);
        assert_eq!(dashboard.breakdown().rows[0].percentage, 100);
    }

    #[test]
    fn test_blank_category_never_reaches_backend() {
        let mut dashboard = Dashboard::new(FakeBackend::new(), Session::new());
        dashboard.login(&creds()).unwrap();
        dashboard.backend.calls.borrow_mut().clear();

        let err = dashboard.add_category("   ").unwrap_err();
        assert!(err.is_validation());
        assert!(dashboard.backend.calls.borrow().is_empty());
    }

    #[test]
    fn test_mutation_requires_session() {
        let mut dashboard = Dashboard::new(FakeBackend::new(), Session::new());
        assert!(matches!(
            dashboard.add_transaction(&expense_input(1, 10.0)),
            Err(ExpenseError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_logout_clears_everything() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut session = Session::new();
        session.subscribe(Box::new(EventLog(Rc::clone(&events))));
        let mut dashboard = Dashboard::new(FakeBackend::new(), session);

        dashboard.login(&creds()).unwrap();
        dashboard.add_category("Food").unwrap();
        dashboard.add_transaction(&expense_input(1, 5.0)).unwrap();

        assert!(dashboard.logout().unwrap());
        assert!(!dashboard.is_logged_in());
        assert!(dashboard.categories().is_empty());
        assert!(dashboard.breakdown().is_empty());
        assert!(!dashboard.logout().unwrap());
        assert_eq!(
            *events.borrow(),
            vec![SessionEvent::Acquired, SessionEvent::Cleared]
        );
    }

    #[test]
    fn test_login_stands_when_first_load_fails() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut session = Session::new();
        session.subscribe(Box::new(EventLog(Rc::clone(&events))));

        let backend = FakeBackend {
            broken_transactions: true,
            ..FakeBackend::new()
        };
        let mut dashboard = Dashboard::new(backend, session);

        let outcome = dashboard.login(&creds()).unwrap();

        assert!(matches!(
            outcome,
            LoginOutcome::LoadFailed(ExpenseError::Json(_))
        ));
        assert!(dashboard.is_logged_in());
        assert_eq!(*events.borrow(), vec![SessionEvent::Acquired]);
    }

    #[test]
    fn test_rejected_token_clears_state_even_if_store_fails() {
        let mut session = Session::new();
        session.subscribe(Box::new(FailingStore));
        let mut dashboard = Dashboard::new(FakeBackend::new(), session);

        dashboard.login(&creds()).unwrap();
        dashboard.add_category("Food").unwrap();
        dashboard.add_transaction(&expense_input(1, 500.0)).unwrap();
        assert!(!dashboard.breakdown().is_empty());

        dashboard.backend.valid_token = "rotated";

        assert!(matches!(dashboard.refresh(), Err(ExpenseError::NotLoggedIn)));
        assert!(!dashboard.is_logged_in());
        assert!(dashboard.categories().is_empty());
        assert!(dashboard.transactions().is_empty());
        assert!(dashboard.breakdown().is_empty());
    }

    #[test]
    fn test_stale_token_is_cleared() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut session = Session::restore(Some(SessionToken::new("expired").unwrap()));
        session.subscribe(Box::new(EventLog(Rc::clone(&events))));
        let mut dashboard = Dashboard::new(FakeBackend::new(), session);

        assert!(matches!(dashboard.refresh(), Err(ExpenseError::NotLoggedIn)));
        assert!(!dashboard.is_logged_in());
        assert_eq!(*events.borrow(), vec![SessionEvent::Cleared]);
    }
}
