//! Domain primitives, ports and page use-cases.
//!
//! Purpose: define the strongly typed values the gateway exchanges with the
//! transaction and user services, and the use-cases that compose them into
//! pages. Nothing here depends on HTTP or on a particular client library.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - User / UserId: platform users as listed by the user directory.
//! - TransactionInfo / TransactionSummary: records owned by the transaction
//!   service.
//! - DeliveryDetails / DeliveryDetailsForm: delivery record and its form.
//! - TransactionPages: list, detail and delivery use-cases.

pub mod delivery;
pub mod error;
pub mod navigation;
pub mod ports;
pub mod trace_id;
pub mod transaction;
pub mod transaction_pages;
pub mod user;

pub use self::delivery::{DeliveryDetails, DeliveryDetailsForm, DeliveryField, FormErrors};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::navigation::{NavigationContext, NavigationService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::transaction::{
    Currency, ItemData, ItemId, TransactionInfo, TransactionStatus, TransactionSummary,
    UnknownTransactionStatus,
};
pub use self::transaction_pages::{
    DeliveryFormPage, DeliverySubmission, DeliverySubmissionRequest, RemoteOutcome,
    TransactionDetailPage, TransactionListPage, TransactionPages,
};
pub use self::user::{DisplayName, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use web_gateway::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
