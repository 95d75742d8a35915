//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! domain ports and stay testable without network I/O.

use std::sync::Arc;

use crate::domain::ports::{NavigationQuery, TransactionService, UsersDirectory};
use crate::domain::{NavigationService, TransactionPages};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub transactions: Arc<dyn TransactionService>,
    pub navigation: Arc<dyn NavigationQuery>,
    pub users: Arc<dyn UsersDirectory>,
}

impl HttpStatePorts {
    /// Bundle the two remote services, deriving navigation from the user
    /// directory.
    pub fn from_services(
        transactions: Arc<dyn TransactionService>,
        users: Arc<dyn UsersDirectory>,
    ) -> Self {
        let navigation: Arc<dyn NavigationQuery> =
            Arc::new(NavigationService::new(Arc::clone(&users)));
        Self {
            transactions,
            navigation,
            users,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub pages: TransactionPages,
    pub users: Arc<dyn UsersDirectory>,
    pub show_inline_instruction: bool,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use web_gateway::domain::ports::{FixtureTransactionService, FixtureUsersDirectory};
    /// use web_gateway::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let ports = HttpStatePorts::from_services(
    ///     Arc::new(FixtureTransactionService),
    ///     Arc::new(FixtureUsersDirectory),
    /// );
    /// let state = HttpState::new(ports).with_inline_instruction(true);
    /// assert!(state.show_inline_instruction);
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            transactions,
            navigation,
            users,
        } = ports;
        Self {
            pages: TransactionPages::new(transactions, navigation),
            users,
            show_inline_instruction: false,
        }
    }

    /// Toggle the inline instruction banner on every page.
    pub fn with_inline_instruction(mut self, show: bool) -> Self {
        self.show_inline_instruction = show;
        self
    }
}
