//! OpenAPI documentation for the gateway.
//!
//! Registers the transaction pages, login/logout and health probes, the JSON
//! view models they return, and the external error schemas from
//! [`crate::inbound::http::schemas`].

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, FieldErrorDetailsSchema};
use crate::inbound::http::views::{
    DeliveryDetailsView, DeliveryFormView, ItemView, NavigationView, PaginationView,
    TransactionDetailView, TransactionListView, TransactionSummaryView, TransactionView, UserView,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the gateway.
/// Swagger UI serves it in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Auction web gateway",
        description = "Transaction pages for the online auction: listing, detail and delivery details."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::transactions::list_transactions,
        crate::inbound::http::transactions::get_transaction,
        crate::inbound::http::transactions::show_delivery_form,
        crate::inbound::http::transactions::submit_delivery_form,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        FieldErrorDetailsSchema,
        UserView,
        NavigationView,
        PaginationView,
        TransactionSummaryView,
        TransactionListView,
        ItemView,
        DeliveryDetailsView,
        TransactionView,
        TransactionDetailView,
        DeliveryFormView,
    )),
    tags(
        (name = "transactions", description = "Transaction pages for logged-in users"),
        (name = "users", description = "Login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
