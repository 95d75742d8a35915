//! Gateway paths embedded in views and redirects.

use crate::domain::{ItemId, TransactionStatus};

/// Path of the transaction list with default paging.
pub fn transactions_path(status: TransactionStatus) -> String {
    format!("/transactions/{}", status.path_segment())
}

/// Path of one page of the transaction list; the status is lowercased.
///
/// # Examples
/// ```
/// use web_gateway::domain::TransactionStatus;
/// use web_gateway::inbound::http::paths::transactions_page_path;
///
/// assert_eq!(
///     transactions_page_path(TransactionStatus::ItemShipped, 1, 15),
///     "/transactions/item_shipped?page=1&pageSize=15"
/// );
/// ```
pub fn transactions_page_path(status: TransactionStatus, page: u32, page_size: u32) -> String {
    format!(
        "/transactions/{}?page={page}&pageSize={page_size}",
        status.path_segment()
    )
}

/// Path of the transaction detail page.
pub fn transaction_path(item_id: ItemId) -> String {
    format!("/transaction/{item_id}")
}

/// Path of the delivery form page.
pub fn delivery_form_path(item_id: ItemId) -> String {
    format!("/transaction/{item_id}/delivery")
}

/// Form action for submitting delivery details, carrying the page flags.
pub fn delivery_submit_path(item_id: ItemId, status: TransactionStatus, is_buyer: bool) -> String {
    format!("/transaction/{item_id}/delivery?status={status}&isBuyer={is_buyer}")
}
