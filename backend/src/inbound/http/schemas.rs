//! OpenAPI schema definitions for domain error types.
//!
//! The domain error stays free of `ToSchema`; these wrappers mirror its wire
//! shape so handlers can document error bodies without coupling the domain
//! to utoipa.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No user is logged in, or the login was refused.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backend service failed without explaining why.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred inside the gateway.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Field-level details attached to `invalid_request` errors.
#[derive(ToSchema)]
#[schema(as = domain::FieldErrorDetails)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldErrorDetailsSchema {
    /// Request field that failed validation.
    #[schema(example = "pageSize")]
    field: String,
    /// Offending raw value, when echoing it is safe.
    #[schema(example = "0")]
    value: Option<String>,
    /// Machine-readable validation code.
    #[schema(example = "invalid_page_size")]
    code: String,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "service_unavailable")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "The transaction service is currently unavailable")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` response header.
    #[schema(example = "6f1c2a8e-3b4d-4e5f-8a9b-0c1d2e3f4a5b")]
    trace_id: Option<String>,
    /// Supplementary details such as the failing field.
    details: Option<FieldErrorDetailsSchema>,
}
