//! Reqwest-backed transaction service adapter.
//!
//! ```text
//! GET {base}/api/transaction?status=&pageNo=&pageSize=
//! GET {base}/api/transaction/{id}
//! PUT {base}/api/transaction/{id}/deliverydetails
//! ```
//!
//! Every request names the acting user in the `User-Id` header. Non-success
//! responses become [`TransactionServiceError::Rejected`], carrying the
//! `detail` of a structured error body when the service sent one.

use std::time::Duration;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{ListQueryDto, rejection_detail};
use crate::domain::ports::{TransactionService, TransactionServiceError};
use crate::domain::{
    DeliveryDetails, ItemId, TransactionInfo, TransactionStatus, TransactionSummary, UserId,
};
use crate::outbound::http_support::{body_preview, endpoint, with_context};

/// Transaction service adapter issuing JSON requests against one base URL.
pub struct TransactionHttpClient {
    client: Client,
    base: Url,
}

impl TransactionHttpClient {
    /// Build an adapter whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, TransactionServiceError> {
        endpoint(&self.base, segments).ok_or_else(|| {
            TransactionServiceError::transport(format!(
                "transaction service URL cannot carry a path: {}",
                self.base
            ))
        })
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, TransactionServiceError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl TransactionService for TransactionHttpClient {
    async fn list_for_user(
        &self,
        user_id: &UserId,
        status: TransactionStatus,
        request: PageRequest,
    ) -> Result<Page<TransactionSummary>, TransactionServiceError> {
        let query = ListQueryDto {
            status: status.as_str(),
            page_no: request.page(),
            page_size: request.page_size(),
        };
        let builder = self.client.get(self.url(&["api", "transaction"])?).query(&query);
        let body = self.execute(with_context(builder, Some(user_id))).await?;
        decode(&body)
    }

    async fn get(
        &self,
        user_id: &UserId,
        item_id: ItemId,
    ) -> Result<TransactionInfo, TransactionServiceError> {
        let id = item_id.to_string();
        let builder = self.client.get(self.url(&["api", "transaction", &id])?);
        let body = self.execute(with_context(builder, Some(user_id))).await?;
        decode(&body)
    }

    async fn submit_delivery_details(
        &self,
        user_id: &UserId,
        item_id: ItemId,
        details: DeliveryDetails,
    ) -> Result<(), TransactionServiceError> {
        let id = item_id.to_string();
        let builder = self
            .client
            .put(self.url(&["api", "transaction", &id, "deliverydetails"])?)
            .json(&details);
        self.execute(with_context(builder, Some(user_id))).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, TransactionServiceError> {
    serde_json::from_slice(body).map_err(|error| {
        TransactionServiceError::decode(format!(
            "{error}; body: {preview}",
            preview = body_preview(body)
        ))
    })
}

fn map_transport_error(error: reqwest::Error) -> TransactionServiceError {
    if error.is_timeout() {
        TransactionServiceError::timeout(error.to_string())
    } else {
        TransactionServiceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TransactionServiceError {
    let detail = rejection_detail(body);
    if detail.is_none() {
        debug!(
            status = status.as_u16(),
            body = %body_preview(body),
            "transaction service error without structured detail"
        );
    }
    TransactionServiceError::rejected(status.as_u16(), detail)
}
