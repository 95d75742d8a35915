//! Outbound adapters implementing domain ports over HTTP.
//!
//! Adapters are thin translators between the backend services' JSON and
//! domain types. They contain no page logic.

mod http_support;
pub mod transactions;
pub mod users;

pub use http_support::USER_ID_HEADER;
