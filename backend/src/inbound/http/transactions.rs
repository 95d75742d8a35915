//! Transaction page handlers.
//!
//! ```text
//! GET  /transactions/{status}?page=0&pageSize=15
//! GET  /transaction/{id}
//! GET  /transaction/{id}/delivery
//! POST /transaction/{id}/delivery?status=NEGOTIATING_DELIVERY&isBuyer=true
//! ```
//!
//! Every handler runs behind [`require_user`], so anonymous requests are
//! rejected before the transaction service is contacted.

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{DeliveryDetailsForm, DeliverySubmission, DeliverySubmissionRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_user;
use crate::inbound::http::paths::transaction_path;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, malformed_input, page_request, parse_item_id, parse_status,
};
use crate::inbound::http::views::{DeliveryFormView, TransactionDetailView, TransactionListView};

/// Paging parameters for the transaction list; omitted values use defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Zero-based page index. Defaults to 0.
    pub page: Option<u32>,
    /// Items per page. Defaults to 15.
    pub page_size: Option<u32>,
}

/// Flags carried from the delivery form page back to its submission.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DeliverySubmitQuery {
    /// Transaction status shown on the form.
    pub status: String,
    /// Whether the submitting user is the buyer.
    pub is_buyer: bool,
}

/// List the user's transactions in one status.
#[utoipa::path(
    get,
    path = "/transactions/{status}",
    params(
        ("status" = String, Path, description = "Transaction status, any case", example = "negotiating_delivery"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Transaction list page", body = TransactionListView),
        (status = 400, description = "Invalid status or paging", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Transaction service unavailable", body = ErrorSchema)
    ),
    tags = ["transactions"],
    operation_id = "listTransactions"
)]
#[get("/transactions/{status}")]
pub async fn list_transactions(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<TransactionListView>> {
    require_user(&session, |user_id| async move {
        let status = parse_status(&path, FieldName::new("status"))?;
        let request = page_request(query.page, query.page_size)?;
        let page = state.pages.list(&user_id, status, request).await?;
        Ok(web::Json(TransactionListView::new(
            &page,
            state.show_inline_instruction,
        )))
    })
    .await
}

/// Show one transaction with its participants.
#[utoipa::path(
    get,
    path = "/transaction/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Transaction detail page", body = TransactionDetailView),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Transaction service unavailable", body = ErrorSchema)
    ),
    tags = ["transactions"],
    operation_id = "getTransaction"
)]
#[get("/transaction/{id}")]
pub async fn get_transaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TransactionDetailView>> {
    require_user(&session, |user_id| async move {
        let item_id = parse_item_id(&path)?;
        let page = state.pages.detail(&user_id, item_id).await?;
        Ok(web::Json(TransactionDetailView::new(
            &page,
            state.show_inline_instruction,
        )))
    })
    .await
}

/// Show the delivery details form, prefilled from stored details.
#[utoipa::path(
    get,
    path = "/transaction/{id}/delivery",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Delivery form page", body = DeliveryFormView),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Transaction service unavailable", body = ErrorSchema)
    ),
    tags = ["transactions"],
    operation_id = "showDeliveryForm"
)]
#[get("/transaction/{id}/delivery")]
pub async fn show_delivery_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeliveryFormView>> {
    require_user(&session, |user_id| async move {
        let item_id = parse_item_id(&path)?;
        let page = state.pages.delivery_form(&user_id, item_id).await?;
        Ok(web::Json(DeliveryFormView::new(
            &page,
            state.show_inline_instruction,
        )))
    })
    .await
}

/// Submit delivery details.
///
/// Redirects to the transaction page on success; otherwise the form is
/// shown again with field errors or the service's message.
#[utoipa::path(
    post,
    path = "/transaction/{id}/delivery",
    params(("id" = String, Path, description = "Item identifier"), DeliverySubmitQuery),
    request_body(
        content = crate::inbound::http::views::DeliveryDetailsView,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Details stored", headers(("Location" = String, description = "Transaction page"))),
        (status = 200, description = "Form shown again with errors", body = DeliveryFormView),
        (status = 400, description = "Invalid identifier or status", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Transaction service unavailable", body = ErrorSchema)
    ),
    tags = ["transactions"],
    operation_id = "submitDeliveryForm"
)]
#[post("/transaction/{id}/delivery")]
pub async fn submit_delivery_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: Result<web::Query<DeliverySubmitQuery>, actix_web::Error>,
    form: Result<web::Form<DeliveryDetailsForm>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    // Extraction failures surface inside the gate so anonymous callers see 401.
    require_user(&session, |user_id| async move {
        let item_id = parse_item_id(&path)?;
        let DeliverySubmitQuery { status, is_buyer } =
            query.map_err(|err| malformed_input("query", &err))?.into_inner();
        let status = parse_status(&status, FieldName::new("status"))?;
        let form = form.map_err(|err| malformed_input("form", &err))?.into_inner();
        let request = DeliverySubmissionRequest {
            item_id,
            status,
            is_buyer,
            form,
        };
        match state.pages.submit_delivery(&user_id, request).await? {
            DeliverySubmission::Accepted => Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, transaction_path(item_id)))
                .finish()),
            DeliverySubmission::Redisplay(page) => Ok(HttpResponse::Ok().json(
                DeliveryFormView::new(&page, state.show_inline_instruction),
            )),
        }
    })
    .await
}
