//! Reqwest adapter for the user service.

mod http_client;

pub use http_client::UsersHttpClient;
