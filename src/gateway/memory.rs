//! In-process implementation of the gateway traits. Backs the test suite
//! (deterministic, with per-collection failure injection) and offline runs.

use crate::error::{AppError, AppResult};
use crate::gateway::{AuthEvent, DataGateway, Filter, IdentityGateway, Session};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Account {
    user_id: String,
    password: String,
}

#[derive(Default)]
pub struct MemoryGateway {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    accounts: Mutex<HashMap<String, Account>>,
    session: Mutex<Option<Session>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<AuthEvent>>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every data operation against `collection` fail until cleared.
    pub fn set_failing(&self, collection: &str, failing: bool) {
        let mut set = self.failing.lock().expect("failing lock poisoned");
        if failing {
            set.insert(collection.to_string());
        } else {
            set.remove(collection);
        }
    }

    /// Seeds rows directly, bypassing failure injection.
    pub fn seed(&self, collection: &str, rows: Vec<Value>) {
        self.tables
            .lock()
            .expect("tables lock poisoned")
            .entry(collection.to_string())
            .or_default()
            .extend(rows);
    }

    /// The current identity session, if any.
    pub fn session(&self) -> Option<Session> {
        self.session.lock().expect("session lock poisoned").clone()
    }

    pub fn rows(&self, collection: &str) -> Vec<Value> {
        self.tables
            .lock()
            .expect("tables lock poisoned")
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check_failing(&self, collection: &str) -> AppResult<()> {
        if self
            .failing
            .lock()
            .expect("failing lock poisoned")
            .contains(collection)
        {
            return Err(AppError::GatewayError(format!(
                "injected failure for {collection}"
            )));
        }
        Ok(())
    }

    fn matches_all(row: &Value, filters: &[Filter]) -> bool {
        filters.iter().all(|f| f.matches(row))
    }

    fn merge(row: &mut Value, changes: &Value) {
        if let (Some(target), Some(source)) = (row.as_object_mut(), changes.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
    }

    fn set_session(&self, session: Option<Session>) {
        *self.session.lock().expect("session lock poisoned") = session;
    }

    fn emit(&self, event: AuthEvent) {
        let mut subscribers = self.subscribers.lock().expect("subscribers lock poisoned");
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn start_session(&self, account: &Account, email: &str) -> Session {
        let session = Session {
            user_id: account.user_id.clone(),
            email: email.to_string(),
            access_token: Uuid::new_v4().simple().to_string(),
        };
        self.set_session(Some(session.clone()));
        self.emit(AuthEvent::SignedIn(session.clone()));
        session
    }
}

impl DataGateway for MemoryGateway {
    async fn select(&self, collection: &str, filters: &[Filter]) -> AppResult<Vec<Value>> {
        self.check_failing(collection)?;
        let tables = self.tables.lock().expect("tables lock poisoned");
        let rows = tables.get(collection).cloned().unwrap_or_default();
        Ok(rows
            .into_iter()
            .filter(|row| Self::matches_all(row, filters))
            .collect())
    }

    async fn insert(&self, collection: &str, row: Value) -> AppResult<()> {
        self.check_failing(collection)?;
        let mut tables = self.tables.lock().expect("tables lock poisoned");
        tables.entry(collection.to_string()).or_default().push(row);
        Ok(())
    }

    async fn update(&self, collection: &str, filters: &[Filter], changes: Value) -> AppResult<()> {
        self.check_failing(collection)?;
        let mut tables = self.tables.lock().expect("tables lock poisoned");
        if let Some(rows) = tables.get_mut(collection) {
            for row in rows.iter_mut() {
                if Self::matches_all(row, filters) {
                    Self::merge(row, &changes);
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, filters: &[Filter]) -> AppResult<()> {
        self.check_failing(collection)?;
        let mut tables = self.tables.lock().expect("tables lock poisoned");
        if let Some(rows) = tables.get_mut(collection) {
            rows.retain(|row| !Self::matches_all(row, filters));
        }
        Ok(())
    }

    async fn upsert(&self, collection: &str, row: Value) -> AppResult<()> {
        self.check_failing(collection)?;
        // Conflict target mirrors the backend's primary keys: `id` for
        // entity collections, `key` for page_configs.
        let conflict_column = if row.get("id").is_some() { "id" } else { "key" };
        let conflict_value = row.get(conflict_column).cloned().unwrap_or(Value::Null);

        let mut tables = self.tables.lock().expect("tables lock poisoned");
        let rows = tables.entry(collection.to_string()).or_default();
        if let Some(existing) = rows
            .iter_mut()
            .find(|r| r.get(conflict_column) == Some(&conflict_value))
        {
            Self::merge(existing, &row);
        } else {
            rows.push(row);
        }
        Ok(())
    }
}

impl IdentityGateway for MemoryGateway {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session> {
        let mut accounts = self.accounts.lock().expect("accounts lock poisoned");
        if accounts.contains_key(email) {
            return Err(AppError::AuthError("User already registered".to_string()));
        }
        let account = Account {
            user_id: format!("user-{}", Uuid::new_v4().simple()),
            password: password.to_string(),
        };
        accounts.insert(email.to_string(), account.clone());
        drop(accounts);
        // Mirrors a backend with email confirmation disabled: sign-up
        // yields a live session immediately.
        Ok(self.start_session(&account, email))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<Session> {
        let accounts = self.accounts.lock().expect("accounts lock poisoned");
        let account = accounts
            .get(email)
            .filter(|a| a.password == password)
            .cloned()
            .ok_or_else(|| AppError::AuthError("Invalid login credentials".to_string()))?;
        drop(accounts);
        Ok(self.start_session(&account, email))
    }

    async fn sign_out(&self) -> AppResult<()> {
        self.set_session(None);
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> AppResult<()> {
        let email = self
            .session
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.email.clone())
            .ok_or_else(|| AppError::AuthError("Not signed in".to_string()))?;
        let mut accounts = self.accounts.lock().expect("accounts lock poisoned");
        let account = accounts
            .get_mut(&email)
            .ok_or_else(|| AppError::AuthError("Account not found".to_string()))?;
        account.password = new_password.to_string();
        Ok(())
    }

    async fn reset_password_for_email(&self, email: &str) -> AppResult<()> {
        // Email sending is a logged stub across the whole system.
        log::info!("[email] password reset link queued for {email}");
        Ok(())
    }

    fn subscribe_auth_events(&self) -> mpsc::UnboundedReceiver<AuthEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .expect("subscribers lock poisoned")
            .push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::collections;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_select_with_filters() {
        let gateway = MemoryGateway::new();
        gateway
            .insert(collections::ORDERS, json!({"id": "order-1", "status": "new"}))
            .await
            .unwrap();
        gateway
            .insert(collections::ORDERS, json!({"id": "order-2", "status": "shipped"}))
            .await
            .unwrap();

        let rows = gateway
            .select(collections::ORDERS, &[Filter::eq("status", "new")])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "order-1");
    }

    #[tokio::test]
    async fn test_update_merges_changes_into_matching_rows() {
        let gateway = MemoryGateway::new();
        gateway
            .insert(collections::ORDERS, json!({"id": "order-1", "status": "new"}))
            .await
            .unwrap();

        gateway
            .update(
                collections::ORDERS,
                &[Filter::eq("id", "order-1")],
                json!({"status": "processing"}),
            )
            .await
            .unwrap();

        let rows = gateway.rows(collections::ORDERS);
        assert_eq!(rows[0]["status"], "processing");
        assert_eq!(rows[0]["id"], "order-1");
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_key_for_page_configs() {
        let gateway = MemoryGateway::new();
        gateway
            .upsert(collections::PAGE_CONFIGS, json!({"key": "about", "value": {"a": 1}}))
            .await
            .unwrap();
        gateway
            .upsert(collections::PAGE_CONFIGS, json!({"key": "about", "value": {"a": 2}}))
            .await
            .unwrap();

        let rows = gateway.rows(collections::PAGE_CONFIGS);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["value"]["a"], 2);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let gateway = MemoryGateway::new();
        gateway.set_failing(collections::ORDERS, true);
        let result = gateway.insert(collections::ORDERS, json!({"id": "order-1"})).await;
        assert!(result.is_err());

        gateway.set_failing(collections::ORDERS, false);
        assert!(gateway.insert(collections::ORDERS, json!({"id": "order-1"})).await.is_ok());
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in_round_trip() {
        let gateway = MemoryGateway::new();
        let session = gateway.sign_up("asha@example.com", "secret123").await.unwrap();
        assert_eq!(session.email, "asha@example.com");

        gateway.sign_out().await.unwrap();
        let session = gateway
            .sign_in_with_password("asha@example.com", "secret123")
            .await
            .unwrap();
        assert_eq!(session.email, "asha@example.com");
    }

    #[tokio::test]
    async fn test_password_update_invalidates_old_password() {
        let gateway = MemoryGateway::new();
        gateway.sign_up("asha@example.com", "old-password").await.unwrap();
        gateway.update_password("new-password").await.unwrap();
        gateway.sign_out().await.unwrap();

        assert!(
            gateway
                .sign_in_with_password("asha@example.com", "old-password")
                .await
                .is_err()
        );
        assert!(
            gateway
                .sign_in_with_password("asha@example.com", "new-password")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_auth_events_are_delivered() {
        let gateway = MemoryGateway::new();
        let mut events = gateway.subscribe_auth_events();

        gateway.sign_up("asha@example.com", "secret123").await.unwrap();
        gateway.sign_out().await.unwrap();

        match events.recv().await {
            Some(AuthEvent::SignedIn(session)) => assert_eq!(session.email, "asha@example.com"),
            other => panic!("expected SignedIn, got {other:?}"),
        }
        assert_eq!(events.recv().await, Some(AuthEvent::SignedOut));
    }
}
