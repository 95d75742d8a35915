//! JSON view models for the transaction pages.
//!
//! Each view carries what a page needs to render: the inline-instruction
//! flag, the page data, an optional error message shown in place of the data
//! and the navigation context. Domain types stay free of OpenAPI derives; the
//! views here own the wire shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::paths::{
    delivery_form_path, delivery_submit_path, transaction_path, transactions_page_path,
};
use crate::domain::{
    Currency, DeliveryDetails, DeliveryDetailsForm, DeliveryFormPage, NavigationContext,
    TransactionDetailPage, TransactionInfo, TransactionListPage, TransactionSummary, User,
};

/// A platform user as shown in navigation and participant slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.display_name().to_string(),
        }
    }
}

/// Navigation context rendered on every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    pub current_user: Option<UserView>,
    pub users: Vec<UserView>,
}

impl From<&NavigationContext> for NavigationView {
    fn from(context: &NavigationContext) -> Self {
        Self {
            current_user: context.current_user.as_ref().map(UserView::from),
            users: context.users.iter().map(UserView::from).collect(),
        }
    }
}

fn formatted(currency_id: &str, amount: i64) -> Option<String> {
    Currency::from_id(currency_id).map(|currency| currency.format(amount))
}

/// One row of the transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummaryView {
    pub item_id: String,
    pub creator_id: String,
    pub winner_id: String,
    pub item_title: String,
    pub currency_id: String,
    /// Price in minor units.
    pub item_price: i64,
    /// Price rendered in the item's currency, when the currency is known.
    #[schema(example = "125.00")]
    pub formatted_price: Option<String>,
    #[schema(example = "NEGOTIATING_DELIVERY")]
    pub status: String,
    /// Path of the transaction detail page.
    pub path: String,
}

impl From<&TransactionSummary> for TransactionSummaryView {
    fn from(summary: &TransactionSummary) -> Self {
        Self {
            item_id: summary.item_id.to_string(),
            creator_id: summary.creator_id.to_string(),
            winner_id: summary.winner_id.to_string(),
            item_title: summary.item_title.clone(),
            currency_id: summary.currency_id.clone(),
            item_price: summary.item_price,
            formatted_price: formatted(&summary.currency_id, summary.item_price),
            status: summary.status.to_string(),
            path: transaction_path(summary.item_id),
        }
    }
}

/// Pagination data derived from the remote total count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub page: u32,
    pub page_size: u32,
    pub count: u64,
    pub total_pages: u64,
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// The transaction list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListView {
    pub show_inline_instruction: bool,
    #[schema(example = "NEGOTIATING_DELIVERY")]
    pub status: String,
    pub transactions: Vec<TransactionSummaryView>,
    pub pagination: Option<PaginationView>,
    pub error: Option<String>,
    pub nav: NavigationView,
}

impl TransactionListView {
    /// Compose the list view.
    pub fn new(page: &TransactionListPage, show_inline_instruction: bool) -> Self {
        let status = page.status;
        let (transactions, pagination) = match &page.transactions {
            Some(listed) => {
                let request = listed.request();
                let link = |request: pagination::PageRequest| {
                    transactions_page_path(status, request.page(), request.page_size())
                };
                let pagination = PaginationView {
                    page: listed.page,
                    page_size: listed.page_size,
                    count: listed.count,
                    total_pages: listed.total_pages(),
                    previous: (!listed.is_first())
                        .then(|| request.previous().map(link))
                        .flatten(),
                    next: (!listed.is_last())
                        .then(|| request.next().map(link))
                        .flatten(),
                };
                let rows = listed.items.iter().map(TransactionSummaryView::from).collect();
                (rows, Some(pagination))
            }
            None => (Vec::new(), None),
        };
        Self {
            show_inline_instruction,
            status: status.to_string(),
            transactions,
            pagination,
            error: page.error.clone(),
            nav: NavigationView::from(&page.navigation),
        }
    }
}

/// Delivery address fields, used both for stored details and form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetailsView {
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<&DeliveryDetails> for DeliveryDetailsView {
    fn from(details: &DeliveryDetails) -> Self {
        Self::from(&DeliveryDetailsForm::from(details))
    }
}

impl From<&DeliveryDetailsForm> for DeliveryDetailsView {
    fn from(form: &DeliveryDetailsForm) -> Self {
        Self {
            address_line1: form.address_line1.clone(),
            address_line2: form.address_line2.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            postal_code: form.postal_code.clone(),
            country: form.country.clone(),
        }
    }
}

/// Descriptive item data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub title: String,
    pub description: String,
    pub currency_id: String,
    pub increment: i64,
    pub reserve_price: i64,
}

/// A full transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub item_id: String,
    pub creator: String,
    pub winner: String,
    pub item: ItemView,
    pub item_price: i64,
    pub formatted_item_price: Option<String>,
    pub delivery_info: Option<DeliveryDetailsView>,
    pub delivery_price: Option<i64>,
    pub status: String,
    /// Path of the delivery form for this transaction.
    pub delivery_path: String,
}

impl From<&TransactionInfo> for TransactionView {
    fn from(info: &TransactionInfo) -> Self {
        let data = &info.item_data;
        Self {
            item_id: info.item_id.to_string(),
            creator: info.creator.to_string(),
            winner: info.winner.to_string(),
            item: ItemView {
                title: data.title.clone(),
                description: data.description.clone(),
                currency_id: data.currency_id.clone(),
                increment: data.increment,
                reserve_price: data.reserve_price,
            },
            item_price: info.item_price,
            formatted_item_price: formatted(&data.currency_id, info.item_price),
            delivery_info: info.delivery_info.as_ref().map(DeliveryDetailsView::from),
            delivery_price: info.delivery_price,
            status: info.status.to_string(),
            delivery_path: delivery_form_path(info.item_id),
        }
    }
}

/// The transaction detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetailView {
    pub show_inline_instruction: bool,
    pub transaction: Option<TransactionView>,
    pub seller: Option<UserView>,
    pub winner: Option<UserView>,
    #[schema(example = "USD")]
    pub currency: Option<String>,
    pub error: Option<String>,
    pub nav: NavigationView,
}

impl TransactionDetailView {
    /// Compose the detail view.
    pub fn new(page: &TransactionDetailPage, show_inline_instruction: bool) -> Self {
        Self {
            show_inline_instruction,
            transaction: page.transaction.as_ref().map(TransactionView::from),
            seller: page.seller.as_ref().map(UserView::from),
            winner: page.winner.as_ref().map(UserView::from),
            currency: page.currency.map(|currency| currency.code().to_owned()),
            error: page.error.clone(),
            nav: NavigationView::from(&page.navigation),
        }
    }
}

/// The delivery details form page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFormView {
    pub show_inline_instruction: bool,
    pub item_id: String,
    pub form: DeliveryDetailsView,
    #[schema(example = "NEGOTIATING_DELIVERY")]
    pub status: String,
    pub is_buyer: bool,
    /// Validation messages keyed by form field name.
    pub errors: BTreeMap<String, String>,
    pub error: Option<String>,
    /// Form action, carrying the status and role flags.
    pub submit_path: String,
    pub nav: NavigationView,
}

impl DeliveryFormView {
    /// Compose the delivery form view.
    pub fn new(page: &DeliveryFormPage, show_inline_instruction: bool) -> Self {
        Self {
            show_inline_instruction,
            item_id: page.item_id.to_string(),
            form: DeliveryDetailsView::from(&page.form),
            status: page.status.to_string(),
            is_buyer: page.is_buyer,
            errors: page
                .errors
                .iter()
                .map(|(field, message)| ((*field).to_owned(), message.clone()))
                .collect(),
            error: page.error.clone(),
            submit_path: delivery_submit_path(page.item_id, page.status, page.is_buyer),
            nav: NavigationView::from(&page.navigation),
        }
    }
}
