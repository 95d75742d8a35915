//! Reqwest-backed user directory adapter: `GET {base}/api/user`.
//!
//! The service answers with either a bare array of users or a paginated
//! envelope; both are accepted and only the users are kept.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::User;
use crate::domain::ports::{UsersDirectory, UsersDirectoryError};
use crate::outbound::http_support::{body_preview, endpoint, with_context};

#[derive(Deserialize)]
#[serde(untagged)]
enum UsersPayload {
    List(Vec<User>),
    Page { items: Vec<User> },
}

impl From<UsersPayload> for Vec<User> {
    fn from(payload: UsersPayload) -> Self {
        match payload {
            UsersPayload::List(users) | UsersPayload::Page { items: users } => users,
        }
    }
}

/// User directory adapter issuing JSON requests against one base URL.
pub struct UsersHttpClient {
    client: Client,
    base: Url,
}

impl UsersHttpClient {
    /// Build an adapter whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }
}

#[async_trait]
impl UsersDirectory for UsersHttpClient {
    async fn list_users(&self) -> Result<Vec<User>, UsersDirectoryError> {
        let url = endpoint(&self.base, &["api", "user"]).ok_or_else(|| {
            UsersDirectoryError::transport(format!(
                "user service URL cannot carry a path: {}",
                self.base
            ))
        })?;
        let response = with_context(self.client.get(url), None)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        decode_users(&body)
    }
}

fn decode_users(body: &[u8]) -> Result<Vec<User>, UsersDirectoryError> {
    serde_json::from_slice::<UsersPayload>(body)
        .map(Vec::from)
        .map_err(|error| {
            UsersDirectoryError::decode(format!(
                "{error}; body: {preview}",
                preview = body_preview(body)
            ))
        })
}

fn map_transport_error(error: reqwest::Error) -> UsersDirectoryError {
    if error.is_timeout() {
        UsersDirectoryError::timeout(error.to_string())
    } else {
        UsersDirectoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> UsersDirectoryError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            UsersDirectoryError::timeout(format!("status {}", status.as_u16()))
        }
        _ => UsersDirectoryError::status(status.as_u16()),
    }
}
