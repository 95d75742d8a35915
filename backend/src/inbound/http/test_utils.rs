//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;

use crate::domain::ports::{FixtureUsersDirectory, NavigationQuery, TransactionService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Login form post for one of the fixture directory users.
pub fn login_request(user_id: &str) -> TestRequest {
    TestRequest::post()
        .uri("/login")
        .set_form([("userId", user_id)])
}

/// Handler state over test doubles, with the fixture user directory.
pub fn state_with(
    transactions: impl TransactionService + 'static,
    navigation: impl NavigationQuery + 'static,
) -> HttpState {
    HttpState::new(HttpStatePorts {
        transactions: Arc::new(transactions),
        navigation: Arc::new(navigation),
        users: Arc::new(FixtureUsersDirectory),
    })
}
