//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use web_gateway::config::GatewaySettings;
use web_gateway::inbound::http::session_config::SessionSettings;

/// Everything needed to bind the server and build its application state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) settings: GatewaySettings,
}

impl ServerConfig {
    /// Combine validated session settings with gateway settings.
    #[must_use]
    pub fn new(session: SessionSettings, settings: GatewaySettings) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            settings,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.settings.bind_addr()
    }
}
