//! HTTP inbound adapter serving the transaction pages.

pub mod auth;
pub mod error;
pub mod health;
pub mod paths;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transactions;
pub mod users;
pub mod validation;
pub mod views;

pub use error::ApiResult;
