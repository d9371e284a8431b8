//! HTTP implementation of the gateway traits against a PostgREST-style
//! backend (`/rest/v1/{collection}` for data, `/auth/v1/*` for identity).

use crate::config::GatewayConfig;
use crate::error::{AppError, AppResult};
use crate::gateway::{AuthEvent, DataGateway, Filter, IdentityGateway, Session};
use reqwest::Client;
use serde_json::Value;
use std::sync::Mutex;
use tokio::sync::mpsc;

pub struct RestGateway {
    client: Client,
    config: GatewayConfig,
    session: Mutex<Option<Session>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<AuthEvent>>>,
}

impl RestGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            session: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn rest_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, collection)
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.config.base_url, endpoint)
    }

    /// Bearer token: the session access token when signed in, otherwise the
    /// anonymous API key.
    fn bearer(&self) -> String {
        self.session
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.config.api_key.clone())
    }

    fn filter_query(filters: &[Filter]) -> Vec<(String, String)> {
        filters
            .iter()
            .map(|f| {
                let value = match &f.value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (f.column.clone(), format!("eq.{value}"))
            })
            .collect()
    }

    async fn check(response: reqwest::Response, context: &str) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::GatewayError(format!(
            "{context} failed with {status}: {body}"
        )))
    }

    fn session_from_token_response(body: &Value) -> AppResult<Session> {
        let access_token = body["access_token"].as_str().unwrap_or_default();
        // Sign-up responses nest the account under "user"; some backends
        // return it at the top level.
        let user = if body.get("user").map_or(false, |u| u.is_object()) {
            &body["user"]
        } else {
            body
        };
        let user_id = user["id"]
            .as_str()
            .ok_or_else(|| AppError::GatewayError("identity response missing user id".into()))?;
        let email = user["email"].as_str().unwrap_or_default();
        Ok(Session {
            user_id: user_id.to_string(),
            email: email.to_string(),
            access_token: access_token.to_string(),
        })
    }

    fn set_session(&self, session: Option<Session>) {
        *self.session.lock().expect("session lock poisoned") = session;
    }

    fn emit(&self, event: AuthEvent) {
        let mut subscribers = self.subscribers.lock().expect("subscribers lock poisoned");
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl DataGateway for RestGateway {
    async fn select(&self, collection: &str, filters: &[Filter]) -> AppResult<Vec<Value>> {
        let response = self
            .client
            .get(self.rest_url(collection))
            .query(&Self::filter_query(filters))
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.bearer())
            .send()
            .await?;
        let response = Self::check(response, &format!("select {collection}")).await?;
        let rows: Vec<Value> = response.json().await?;
        Ok(rows)
    }

    async fn insert(&self, collection: &str, row: Value) -> AppResult<()> {
        let response = self
            .client
            .post(self.rest_url(collection))
            .header("apikey", &self.config.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(self.bearer())
            .json(&row)
            .send()
            .await?;
        Self::check(response, &format!("insert into {collection}")).await?;
        Ok(())
    }

    async fn update(&self, collection: &str, filters: &[Filter], changes: Value) -> AppResult<()> {
        let response = self
            .client
            .patch(self.rest_url(collection))
            .query(&Self::filter_query(filters))
            .header("apikey", &self.config.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(self.bearer())
            .json(&changes)
            .send()
            .await?;
        Self::check(response, &format!("update {collection}")).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, filters: &[Filter]) -> AppResult<()> {
        let response = self
            .client
            .delete(self.rest_url(collection))
            .query(&Self::filter_query(filters))
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.bearer())
            .send()
            .await?;
        Self::check(response, &format!("delete from {collection}")).await?;
        Ok(())
    }

    async fn upsert(&self, collection: &str, row: Value) -> AppResult<()> {
        let response = self
            .client
            .post(self.rest_url(collection))
            .header("apikey", &self.config.api_key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .bearer_auth(self.bearer())
            .json(&row)
            .send()
            .await?;
        Self::check(response, &format!("upsert into {collection}")).await?;
        Ok(())
    }
}

impl IdentityGateway for RestGateway {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session> {
        let response = self
            .client
            .post(self.auth_url("signup"))
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let response = Self::check(response, "sign up").await?;
        let body: Value = response.json().await?;
        let session = Self::session_from_token_response(&body)?;
        log::info!("Signed up account {}", session.user_id);
        Ok(session)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<Session> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AuthError(format!("Login failed: {body}")));
        }
        let body: Value = response.json().await?;
        let session = Self::session_from_token_response(&body)?;
        self.set_session(Some(session.clone()));
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> AppResult<()> {
        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.bearer())
            .send()
            .await?;
        // The local session is cleared even if the server-side revoke
        // failed; the client must not stay signed in.
        self.set_session(None);
        self.emit(AuthEvent::SignedOut);
        Self::check(response, "sign out").await?;
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> AppResult<()> {
        if self.session.lock().expect("session lock poisoned").is_none() {
            return Err(AppError::AuthError("Not signed in".to_string()));
        }
        let response = self
            .client
            .put(self.auth_url("user"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.bearer())
            .json(&serde_json::json!({ "password": new_password }))
            .send()
            .await?;
        Self::check(response, "update password").await?;
        Ok(())
    }

    async fn reset_password_for_email(&self, email: &str) -> AppResult<()> {
        let response = self
            .client
            .post(self.auth_url("recover"))
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;
        Self::check(response, "reset password").await?;
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
