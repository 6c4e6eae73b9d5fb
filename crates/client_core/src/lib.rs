use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{UserId, UserRecord},
    error::ApiError,
};
use tracing::{debug, info, warn};
use url::Url;

pub mod config;
pub mod error;
pub mod state;

pub use config::ClientSettings;
pub use error::ClientError;
pub use state::{DirectoryState, Effect, LoadStatus, StateEvent, Transition};

pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Remote user listing service. Every call is a single request with no
/// retry; callers decide what a failure means for local state.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError>;
    async fn delete_user(&self, user_id: UserId) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    http: Client,
    base_url: String,
}

impl HttpUserDirectory {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout` of `None` leaves requests unbounded.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::ClientBuild)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, user_id: UserId) -> String {
        format!("{}/users/{user_id}", self.base_url)
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        let url = self.users_url();
        debug!(%url, "fetching user list");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let response = ensure_success(response)?;
        let body = response.bytes().await.map_err(ClientError::Transport)?;
        let users: Vec<UserRecord> = serde_json::from_slice(&body)?;
        info!(count = users.len(), "user list loaded");
        Ok(users)
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), ClientError> {
        let url = self.user_url(user_id);
        debug!(%url, "deleting user");
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        ensure_success(response)?;
        info!(user_id = user_id.0, "user deleted on server");
        Ok(())
    }
}

fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!(status = status.as_u16(), url = %response.url(), "request rejected");
    Err(ApiError::from_status(
        status.as_u16(),
        status.canonical_reason().unwrap_or("unrecognized status"),
    )
    .into())
}

fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|err| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "query and fragment are not allowed".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
