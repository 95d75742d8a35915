//! Login and logout handlers.
//!
//! ```text
//! POST /login   userId=3fa85f64-5717-4562-b3fc-2c963f66afa6
//! POST /logout
//! ```
//!
//! The gateway holds no credentials: logging in selects one of the users the
//! user service knows about and records it in the session cookie.

use actix_web::{HttpResponse, http::header, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::navigation::map_directory_error;
use crate::domain::{Error, TransactionStatus, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paths::transactions_path;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login form body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
}

fn map_user_id_error(err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyId => "empty_user_id",
        _ => "invalid_user_id",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": "userId", "code": code }))
}

/// Log in as a user known to the user service.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in", headers(
            ("Set-Cookie" = String, description = "Session cookie"),
            ("Location" = String, description = "Transaction list")
        )),
        (status = 400, description = "Malformed user id", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "User service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(form.into_inner().user_id).map_err(map_user_id_error)?;
    let users = state
        .users
        .list_users()
        .await
        .map_err(map_directory_error)?;
    if !users.iter().any(|user| user.id() == &user_id) {
        return Err(Error::unauthorized("unknown user"));
    }
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "user logged in");
    Ok(HttpResponse::SeeOther()
        .insert_header((
            header::LOCATION,
            transactions_path(TransactionStatus::NegotiatingDelivery),
        ))
        .finish())
}

/// Forget the logged-in user.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 303, description = "Logged out", headers(("Location" = String, description = "Site root")))
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}
