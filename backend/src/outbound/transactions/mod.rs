//! Reqwest adapter for the transaction service.

mod dto;
mod http_client;

pub use http_client::TransactionHttpClient;
