//! Driven port for the remote transaction service.
//!
//! Every call is scoped to the authenticated user. Failures are classified
//! so callers can tell a rejection carrying a user-facing explanation apart
//! from infrastructure faults; [`extract_message`] performs that split.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use super::define_port_error;
use crate::domain::{
    DeliveryDetails, ItemData, ItemId, TransactionInfo, TransactionStatus, TransactionSummary,
    UserId,
};

define_port_error! {
    /// Errors surfaced while calling the transaction service.
    pub enum TransactionServiceError {
        /// The service answered with a non-success status. `detail` holds the
        /// explanation from a structured error body, when one was sent.
        Rejected { status: u16, detail: Option<String> } =>
            "transaction service rejected the request with status {status}",
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "transaction service transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "transaction service timeout: {message}",
        /// A success response could not be decoded.
        Decode { message: String } =>
            "transaction service response decode failed: {message}",
    }
}

/// Pull the user-facing explanation out of a failed call.
///
/// Returns `None` when the failure carries no structured detail; callers
/// must treat that as an infrastructure fault rather than show it inline.
///
/// # Examples
/// ```
/// use web_gateway::domain::ports::{TransactionServiceError, extract_message};
///
/// let rejected = TransactionServiceError::rejected(409_u16, Some("Already paid".to_owned()));
/// assert_eq!(extract_message(&rejected).as_deref(), Some("Already paid"));
///
/// let timeout = TransactionServiceError::timeout("5s elapsed");
/// assert_eq!(extract_message(&timeout), None);
/// ```
pub fn extract_message(error: &TransactionServiceError) -> Option<String> {
    match error {
        TransactionServiceError::Rejected {
            detail: Some(detail),
            ..
        } if !detail.trim().is_empty() => Some(detail.clone()),
        _ => None,
    }
}

/// Port for reading and updating auction transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Fetch one page of the user's transactions in `status`.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        status: TransactionStatus,
        request: PageRequest,
    ) -> Result<Page<TransactionSummary>, TransactionServiceError>;

    /// Fetch a single transaction visible to the user.
    async fn get(
        &self,
        user_id: &UserId,
        item_id: ItemId,
    ) -> Result<TransactionInfo, TransactionServiceError>;

    /// Replace the delivery details of a transaction.
    async fn submit_delivery_details(
        &self,
        user_id: &UserId,
        item_id: ItemId,
        details: DeliveryDetails,
    ) -> Result<(), TransactionServiceError>;
}

/// Read-only stand-in used when no transaction service is configured.
///
/// Serves one transaction between the two fixture users; submissions are
/// acknowledged and discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureTransactionService;

impl FixtureTransactionService {
    /// Item identifier of the fixture transaction.
    pub const ITEM_ID: &'static str = "6a1c0e2f-92b4-4d1e-8f4b-2f6e0b7d9c11";

    fn transaction() -> Result<TransactionInfo, TransactionServiceError> {
        let parse = |raw: &str| {
            UserId::new(raw).map_err(|err| TransactionServiceError::decode(err.to_string()))
        };
        let [(seller, _), (winner, _)] = super::users_directory::FIXTURE_USERS;
        let item_id = Self::ITEM_ID
            .parse()
            .map(ItemId::new)
            .map_err(|err: uuid::Error| TransactionServiceError::decode(err.to_string()))?;
        Ok(TransactionInfo {
            item_id,
            creator: parse(seller)?,
            winner: parse(winner)?,
            item_data: ItemData {
                title: "Difference Engine punch cards".to_owned(),
                description: "A bundle of original punch cards.".to_owned(),
                currency_id: "GBP".to_owned(),
                increment: 50,
                reserve_price: 5_000,
            },
            item_price: 12_500,
            delivery_info: None,
            delivery_price: None,
            status: TransactionStatus::NegotiatingDelivery,
        })
    }

    fn visible_to(info: &TransactionInfo, user_id: &UserId) -> bool {
        &info.creator == user_id || &info.winner == user_id
    }
}

#[async_trait]
impl TransactionService for FixtureTransactionService {
    async fn list_for_user(
        &self,
        user_id: &UserId,
        status: TransactionStatus,
        request: PageRequest,
    ) -> Result<Page<TransactionSummary>, TransactionServiceError> {
        let info = Self::transaction()?;
        let mut items = Vec::new();
        if info.status == status && Self::visible_to(&info, user_id) {
            items.push(TransactionSummary {
                item_id: info.item_id,
                creator_id: info.creator,
                winner_id: info.winner,
                item_title: info.item_data.title,
                currency_id: info.item_data.currency_id,
                item_price: info.item_price,
                status: info.status,
            });
        }
        let count = items.len() as u64;
        if request.page() > 0 {
            items.clear();
        }
        Ok(Page::new(items, request, count))
    }

    async fn get(
        &self,
        user_id: &UserId,
        item_id: ItemId,
    ) -> Result<TransactionInfo, TransactionServiceError> {
        let info = Self::transaction()?;
        if info.item_id != item_id || !Self::visible_to(&info, user_id) {
            return Err(TransactionServiceError::rejected(
                404_u16,
                Some(format!("Transaction for item {item_id} not found")),
            ));
        }
        Ok(info)
    }

    async fn submit_delivery_details(
        &self,
        user_id: &UserId,
        item_id: ItemId,
        _details: DeliveryDetails,
    ) -> Result<(), TransactionServiceError> {
        self.get(user_id, item_id).await.map(|_| ())
    }
}
