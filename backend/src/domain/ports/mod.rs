//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod navigation_query;
mod transaction_service;
mod users_directory;

#[cfg(test)]
pub use navigation_query::MockNavigationQuery;
pub use navigation_query::NavigationQuery;
#[cfg(test)]
pub use transaction_service::MockTransactionService;
pub use transaction_service::{
    FixtureTransactionService, TransactionService, TransactionServiceError, extract_message,
};
#[cfg(test)]
pub use users_directory::MockUsersDirectory;
pub use users_directory::{FixtureUsersDirectory, UsersDirectory, UsersDirectoryError};
