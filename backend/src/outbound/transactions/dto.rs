//! Wire shapes specific to the transaction service.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Structured error body sent with rejected requests.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Query string for the transaction list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListQueryDto<'a> {
    pub status: &'a str,
    pub page_no: u32,
    pub page_size: u32,
}

/// Explanation carried by an error body, if the body is structured.
pub(super) fn rejection_detail(body: &[u8]) -> Option<String> {
    let dto: ErrorBodyDto = serde_json::from_slice(body).ok()?;
    if let Some(name) = dto.name.as_deref() {
        debug!(error_name = name, "transaction service rejected request");
    }
    dto.detail.filter(|detail| !detail.trim().is_empty())
}
