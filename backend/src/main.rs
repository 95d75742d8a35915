//! Gateway entry-point: loads configuration, wires the transaction pages and
//! serves them until shutdown.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use web_gateway::config::GatewaySettings;
use web_gateway::inbound::http::health::HealthState;
use web_gateway::inbound::http::session_config::{BuildMode, session_settings_from_env};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GatewaySettings::load_from_iter(std::env::args_os())
        .map_err(|error| eyre!("failed to load gateway settings: {error}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let config = ServerConfig::new(session, settings);
    info!(addr = %config.bind_addr(), "starting web gateway");

    let health_state = web::Data::new(HealthState::new());
    let server =
        create_server(health_state.clone(), config).wrap_err("failed to start web gateway")?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("web gateway terminated abnormally")
}
