//! Navigation context rendered alongside every page.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{NavigationQuery, UsersDirectory, UsersDirectoryError};
use crate::domain::{Error, User, UserId};

/// The viewer plus the users they may interact with.
///
/// Recomputed for every request and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationContext {
    /// The viewer, when the directory knows them.
    pub current_user: Option<User>,
    /// Every user known to the directory.
    pub users: Vec<User>,
}

impl NavigationContext {
    /// Build a context for `viewer` out of the directory listing.
    pub fn for_viewer(viewer: &UserId, users: Vec<User>) -> Self {
        let current_user = users.iter().find(|user| user.id() == viewer).cloned();
        Self {
            current_user,
            users,
        }
    }

    /// Find the user with exactly this identifier.
    pub fn find_user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }
}

/// Navigation service backed by the user directory.
#[derive(Clone)]
pub struct NavigationService<D: ?Sized> {
    directory: Arc<D>,
}

impl<D: ?Sized> NavigationService<D> {
    /// Create a service reading from `directory`.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

pub(crate) fn map_directory_error(error: UsersDirectoryError) -> Error {
    match error {
        UsersDirectoryError::Decode { message } => {
            Error::internal(format!("user service returned malformed users: {message}"))
        }
        other => Error::service_unavailable(other.to_string()),
    }
}

#[async_trait]
impl<D> NavigationQuery for NavigationService<D>
where
    D: UsersDirectory + ?Sized,
{
    async fn load(&self, user_id: &UserId) -> Result<NavigationContext, Error> {
        let users = self.directory.list_users().await.map_err(|err| {
            tracing::warn!(error = %err, "failed to load users for navigation");
            map_directory_error(err)
        })?;
        Ok(NavigationContext::for_viewer(user_id, users))
    }
}
