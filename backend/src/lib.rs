//! Web gateway for the auction's transaction pages.
//!
//! Logged-in users list their transactions by status, inspect one, and
//! submit delivery details. Data lives in a remote transaction service; the
//! gateway checks the session, calls the service, turns failures into inline
//! messages or service errors, and renders JSON page models.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
