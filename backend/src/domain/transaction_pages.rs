//! Page use-cases for the transaction screens.
//!
//! Each use-case issues one call to the transaction service on behalf of an
//! authenticated user and translates its failure: a structured rejection
//! becomes an inline message on the same page, anything else is logged and
//! surfaced as [`ErrorCode::ServiceUnavailable`](crate::domain::ErrorCode).

use std::sync::Arc;

use futures_util::future::join;
use pagination::{Page, PageRequest};
use tracing::{error, info};

use crate::domain::ports::{
    NavigationQuery, TransactionService, TransactionServiceError, extract_message,
};
use crate::domain::{
    Currency, DeliveryDetailsForm, Error, FormErrors, ItemId, NavigationContext, TransactionInfo,
    TransactionStatus, TransactionSummary, User, UserId,
};

/// Outcome of a remote call after error translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome<T> {
    /// The call succeeded.
    Loaded(T),
    /// The service rejected the call with an explanation for the user.
    Failed(String),
}

/// Split a remote result into a renderable outcome or a gateway error.
///
/// Failures without a structured detail are logged and mapped to a generic
/// service-unavailable error.
pub fn translate<T>(
    operation: &'static str,
    result: Result<T, TransactionServiceError>,
) -> Result<RemoteOutcome<T>, Error> {
    match result {
        Ok(value) => Ok(RemoteOutcome::Loaded(value)),
        Err(err) => match extract_message(&err) {
            Some(message) => {
                info!(operation, error = %err, "transaction service rejected request");
                Ok(RemoteOutcome::Failed(message))
            }
            None => {
                error!(operation, error = %err, "transaction service call failed");
                Err(Error::service_unavailable(
                    "The transaction service is currently unavailable",
                ))
            }
        },
    }
}

/// Data for the transaction list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionListPage {
    pub navigation: NavigationContext,
    pub status: TransactionStatus,
    pub request: PageRequest,
    pub transactions: Option<Page<TransactionSummary>>,
    pub error: Option<String>,
}

/// Data for the transaction detail page.
///
/// On a structured failure every data field is empty and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetailPage {
    pub navigation: NavigationContext,
    pub transaction: Option<TransactionInfo>,
    pub seller: Option<User>,
    pub winner: Option<User>,
    pub currency: Option<Currency>,
    pub error: Option<String>,
}

/// Data for the delivery details form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFormPage {
    pub navigation: NavigationContext,
    pub item_id: ItemId,
    pub form: DeliveryDetailsForm,
    pub status: TransactionStatus,
    pub is_buyer: bool,
    pub errors: FormErrors,
    pub error: Option<String>,
}

/// Result of posting the delivery form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliverySubmission {
    /// The service stored the details.
    Accepted,
    /// The form must be shown again with errors or a message.
    Redisplay(DeliveryFormPage),
}

/// Delivery form post with the flags carried through the page's query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySubmissionRequest {
    pub item_id: ItemId,
    pub status: TransactionStatus,
    pub is_buyer: bool,
    pub form: DeliveryDetailsForm,
}

/// Transaction page use-cases over the driven ports.
#[derive(Clone)]
pub struct TransactionPages {
    transactions: Arc<dyn TransactionService>,
    navigation: Arc<dyn NavigationQuery>,
}

impl TransactionPages {
    /// Create the use-cases over the given ports.
    pub fn new(
        transactions: Arc<dyn TransactionService>,
        navigation: Arc<dyn NavigationQuery>,
    ) -> Self {
        Self {
            transactions,
            navigation,
        }
    }

    /// Load exactly the requested slice of the user's transactions.
    pub async fn list(
        &self,
        user_id: &UserId,
        status: TransactionStatus,
        request: PageRequest,
    ) -> Result<TransactionListPage, Error> {
        let (navigation, listed) = join(
            self.navigation.load(user_id),
            self.transactions.list_for_user(user_id, status, request),
        )
        .await;
        let navigation = navigation?;
        let (transactions, error) = match translate("list_for_user", listed)? {
            RemoteOutcome::Loaded(page) => (Some(page), None),
            RemoteOutcome::Failed(message) => (None, Some(message)),
        };
        Ok(TransactionListPage {
            navigation,
            status,
            request,
            transactions,
            error,
        })
    }

    /// Load one transaction and resolve its participants for display.
    pub async fn detail(
        &self,
        user_id: &UserId,
        item_id: ItemId,
    ) -> Result<TransactionDetailPage, Error> {
        let (navigation, fetched) = join(
            self.navigation.load(user_id),
            self.transactions.get(user_id, item_id),
        )
        .await;
        let navigation = navigation?;
        let page = match translate("get", fetched)? {
            RemoteOutcome::Loaded(info) => TransactionDetailPage {
                seller: navigation.find_user(&info.creator).cloned(),
                winner: navigation.find_user(&info.winner).cloned(),
                currency: info.currency(),
                transaction: Some(info),
                error: None,
                navigation,
            },
            RemoteOutcome::Failed(message) => TransactionDetailPage {
                navigation,
                transaction: None,
                seller: None,
                winner: None,
                currency: None,
                error: Some(message),
            },
        };
        Ok(page)
    }

    /// Load the delivery form, prefilled from any stored details.
    ///
    /// The transaction is fetched before the navigation context.
    pub async fn delivery_form(
        &self,
        user_id: &UserId,
        item_id: ItemId,
    ) -> Result<DeliveryFormPage, Error> {
        let fetched = translate("get", self.transactions.get(user_id, item_id).await)?;
        let navigation = self.navigation.load(user_id).await?;
        let page = match fetched {
            RemoteOutcome::Loaded(info) => DeliveryFormPage {
                form: info
                    .delivery_info
                    .as_ref()
                    .map(DeliveryDetailsForm::from)
                    .unwrap_or_default(),
                status: info.status,
                is_buyer: info.viewer_is_buyer(user_id),
                navigation,
                item_id,
                errors: FormErrors::new(),
                error: None,
            },
            RemoteOutcome::Failed(message) => DeliveryFormPage {
                navigation,
                item_id,
                form: DeliveryDetailsForm::default(),
                status: TransactionStatus::NegotiatingDelivery,
                is_buyer: false,
                errors: FormErrors::new(),
                error: Some(message),
            },
        };
        Ok(page)
    }

    /// Validate and submit the delivery form.
    ///
    /// Invalid input never reaches the transaction service.
    pub async fn submit_delivery(
        &self,
        user_id: &UserId,
        request: DeliverySubmissionRequest,
    ) -> Result<DeliverySubmission, Error> {
        let DeliverySubmissionRequest {
            item_id,
            status,
            is_buyer,
            form,
        } = request;

        let (errors, error) = match form.validate() {
            Err(errors) => (errors, None),
            Ok(details) => {
                let submitted = self
                    .transactions
                    .submit_delivery_details(user_id, item_id, details)
                    .await;
                match translate("submit_delivery_details", submitted)? {
                    RemoteOutcome::Loaded(()) => return Ok(DeliverySubmission::Accepted),
                    RemoteOutcome::Failed(message) => (FormErrors::new(), Some(message)),
                }
            }
        };

        let navigation = self.navigation.load(user_id).await?;
        Ok(DeliverySubmission::Redisplay(DeliveryFormPage {
            navigation,
            item_id,
            form,
            status,
            is_buyer,
            errors,
            error,
        }))
    }
}
