//! Gateway configuration loaded via OrthoConfig.
//!
//! Values come from `GATEWAY_*` environment variables, CLI flags or a config
//! file. Service URLs are optional; without them the gateway serves fixture
//! data so it can run stand-alone.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for binding the gateway and reaching its backend services.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEWAY")]
pub struct GatewaySettings {
    /// Address to listen on.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Base URL of the transaction service.
    pub transaction_service_url: Option<Url>,
    /// Base URL of the user service.
    pub user_service_url: Option<Url>,
    /// Timeout applied to each backend request, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Ask pages to show the inline usage instruction.
    #[ortho_config(default = false)]
    pub show_inline_instruction: bool,
}

impl GatewaySettings {
    /// Socket address to bind, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Per-request timeout for backend calls.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
