//! Builders choosing real or fixture adapters for the HTTP state.
//!
//! A backend service with a configured URL is reached over HTTP; otherwise
//! its fixture stands in so the gateway can run on its own.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use web_gateway::config::GatewaySettings;
use web_gateway::domain::ports::{
    FixtureTransactionService, FixtureUsersDirectory, TransactionService, UsersDirectory,
};
use web_gateway::inbound::http::state::{HttpState, HttpStatePorts};
use web_gateway::outbound::transactions::TransactionHttpClient;
use web_gateway::outbound::users::UsersHttpClient;

fn client_error(service: &str, error: reqwest::Error) -> std::io::Error {
    std::io::Error::other(format!("failed to build {service} client: {error}"))
}

fn build_transaction_service(
    settings: &GatewaySettings,
) -> std::io::Result<Arc<dyn TransactionService>> {
    match &settings.transaction_service_url {
        Some(url) => {
            info!(url = %url, "using transaction service");
            let client = TransactionHttpClient::new(url.clone(), settings.request_timeout())
                .map_err(|error| client_error("transaction service", error))?;
            Ok(Arc::new(client))
        }
        None => {
            warn!("GATEWAY_TRANSACTION_SERVICE_URL not set; serving fixture transactions");
            Ok(Arc::new(FixtureTransactionService))
        }
    }
}

fn build_users_directory(settings: &GatewaySettings) -> std::io::Result<Arc<dyn UsersDirectory>> {
    match &settings.user_service_url {
        Some(url) => {
            info!(url = %url, "using user service");
            let client = UsersHttpClient::new(url.clone(), settings.request_timeout())
                .map_err(|error| client_error("user service", error))?;
            Ok(Arc::new(client))
        }
        None => {
            warn!("GATEWAY_USER_SERVICE_URL not set; serving fixture users");
            Ok(Arc::new(FixtureUsersDirectory))
        }
    }
}

/// Build the shared HTTP state from gateway settings.
///
/// # Errors
///
/// Returns [`std::io::Error`] when an HTTP client cannot be constructed.
pub fn build_http_state(settings: &GatewaySettings) -> std::io::Result<web::Data<HttpState>> {
    let ports = HttpStatePorts::from_services(
        build_transaction_service(settings)?,
        build_users_directory(settings)?,
    );
    Ok(web::Data::new(
        HttpState::new(ports).with_inline_instruction(settings.show_inline_instruction),
    ))
}
