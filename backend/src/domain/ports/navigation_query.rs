//! Driving port for the navigation context shown on every page.

use async_trait::async_trait;

use crate::domain::{Error, NavigationContext, UserId};

/// Use-case port that loads the navigation context for a viewer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NavigationQuery: Send + Sync {
    /// Load the viewer's navigation context. Never cached.
    async fn load(&self, user_id: &UserId) -> Result<NavigationContext, Error>;
}
