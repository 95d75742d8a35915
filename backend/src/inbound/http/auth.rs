//! Authentication gate for HTTP handlers.
//!
//! Handlers wrap their action in [`require_user`]; the action only runs once
//! an identity has been resolved, so no downstream call is ever made on
//! behalf of an anonymous caller.

use std::future::Future;

use crate::domain::{Error, UserId};

use super::ApiResult;

/// Source of the caller's identity for one request.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityResolver {
    /// Resolve the logged-in user, or `None` for anonymous callers.
    fn resolve(&self) -> Result<Option<UserId>, Error>;
}

/// Run `action` with the resolved user id, or fail with `401 Unauthorized`.
///
/// # Examples
/// ```no_run
/// use actix_web::HttpResponse;
/// use web_gateway::inbound::http::{ApiResult, auth::require_user, session::SessionContext};
///
/// async fn whoami(session: SessionContext) -> ApiResult<HttpResponse> {
///     require_user(&session, |user_id| async move {
///         Ok(HttpResponse::Ok().body(user_id.to_string()))
///     })
///     .await
/// }
/// ```
pub async fn require_user<R, F, Fut, T>(resolver: &R, action: F) -> ApiResult<T>
where
    R: IdentityResolver + ?Sized,
    F: FnOnce(UserId) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    match resolver.resolve()? {
        Some(user_id) => action(user_id).await,
        None => Err(Error::unauthorized("login required")),
    }
}
