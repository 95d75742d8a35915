//! Driven port for the platform's user directory.
//!
//! The gateway does not own user records; it asks the user service for the
//! full list and uses it both to render navigation and to check logins.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::User;

define_port_error! {
    /// Errors surfaced while calling the user service.
    pub enum UsersDirectoryError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "user service transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "user service timeout: {message}",
        /// The service answered with a non-success status.
        Status { status: u16 } =>
            "user service responded with status {status}",
        /// The response could not be decoded.
        Decode { message: String } =>
            "user service response decode failed: {message}",
    }
}

/// Port for listing every user known to the platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersDirectory: Send + Sync {
    /// Return all users.
    async fn list_users(&self) -> Result<Vec<User>, UsersDirectoryError>;
}

/// Identifier and display name of each fixture user.
pub(crate) const FIXTURE_USERS: [(&str, &str); 2] = [
    ("3fa85f64-5717-4562-b3fc-2c963f66afa6", "Ada Lovelace"),
    ("9b2d1c4e-6f7a-4b8c-9d0e-1f2a3b4c5d6e", "Charles Babbage"),
];

/// Fixed user list used when no user service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersDirectory;

#[async_trait]
impl UsersDirectory for FixtureUsersDirectory {
    async fn list_users(&self) -> Result<Vec<User>, UsersDirectoryError> {
        // Compile-time constants; invalid data is a regression, not input.
        FIXTURE_USERS
            .iter()
            .map(|(id, name)| {
                User::try_from_strings(id, *name)
                    .map_err(|err| UsersDirectoryError::decode(err.to_string()))
            })
            .collect()
    }
}
