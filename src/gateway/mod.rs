//! The remote data gateway: a generic CRUD client over named collections
//! plus the backend's identity sub-service. The store depends on these
//! traits only; `RestGateway` talks to the real backend and
//! `MemoryGateway` backs tests and offline runs.

pub mod memory;
pub mod rest;

pub use memory::MemoryGateway;
pub use rest::RestGateway;

use crate::error::AppResult;
use serde_json::Value;
use tokio::sync::mpsc;

/// Collection names on the remote backend.
pub mod collections {
    pub const PRODUCTS: &str = "products";
    pub const ORDERS: &str = "orders";
    pub const DISTRIBUTORS: &str = "distributors";
    pub const PROFILES: &str = "profiles";
    pub const ADDRESSES: &str = "addresses";
    pub const WISHLIST: &str = "wishlist";
    pub const BANNERS: &str = "banners";
    pub const REWARDS: &str = "rewards";
    pub const PAGE_CONFIGS: &str = "page_configs";
}

/// Column-equality filter — the only operator the app uses.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, row: &Value) -> bool {
        row.get(&self.column) == Some(&self.value)
    }
}

/// An authenticated identity session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

/// Identity-state-change notification.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
}

#[allow(async_fn_in_trait)]
pub trait DataGateway {
    async fn select(&self, collection: &str, filters: &[Filter]) -> AppResult<Vec<Value>>;
    async fn insert(&self, collection: &str, row: Value) -> AppResult<()>;
    async fn update(&self, collection: &str, filters: &[Filter], changes: Value) -> AppResult<()>;
    async fn delete(&self, collection: &str, filters: &[Filter]) -> AppResult<()>;
    async fn upsert(&self, collection: &str, row: Value) -> AppResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait IdentityGateway {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session>;
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<Session>;
    async fn sign_out(&self) -> AppResult<()>;
    /// Changes the password of the currently signed-in account.
    async fn update_password(&self, new_password: &str) -> AppResult<()>;
    async fn reset_password_for_email(&self, email: &str) -> AppResult<()>;
    /// Stream of session-present / session-absent notifications.
    fn subscribe_auth_events(&self) -> mpsc::UnboundedReceiver<AuthEvent>;
}
