//! Transaction records as supplied by the remote transaction service.
//!
//! These are value objects: the gateway never mutates them, it only reads
//! them to compose views. Field names follow the remote JSON contract
//! (`camelCase`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DeliveryDetails, UserId};

/// Identifier of the auctioned item a transaction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Wrap a parsed UUID.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for ItemId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    NegotiatingDelivery,
    PaymentPending,
    PaymentSubmitted,
    PaymentConfirmed,
    ItemShipped,
    ItemReceived,
    Cancelled,
}

impl TransactionStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::NegotiatingDelivery,
        Self::PaymentPending,
        Self::PaymentSubmitted,
        Self::PaymentConfirmed,
        Self::ItemShipped,
        Self::ItemReceived,
        Self::Cancelled,
    ];

    /// Wire name, e.g. `NEGOTIATING_DELIVERY`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NegotiatingDelivery => "NEGOTIATING_DELIVERY",
            Self::PaymentPending => "PAYMENT_PENDING",
            Self::PaymentSubmitted => "PAYMENT_SUBMITTED",
            Self::PaymentConfirmed => "PAYMENT_CONFIRMED",
            Self::ItemShipped => "ITEM_SHIPPED",
            Self::ItemReceived => "ITEM_RECEIVED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Lowercase form used in gateway paths, e.g. `negotiating_delivery`.
    pub fn path_segment(self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status name does not match any [`TransactionStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction status: {0}")]
pub struct UnknownTransactionStatus(pub String);

impl FromStr for TransactionStatus {
    type Err = UnknownTransactionStatus;

    /// Parse a status name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTransactionStatus(s.to_owned()))
    }
}

/// Currencies the auction platform trades in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Cad,
    Jpy,
}

impl Currency {
    /// Resolve a currency from its ISO code; unknown codes yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            "GBP" => Some(Self::Gbp),
            "CAD" => Some(Self::Cad),
            "JPY" => Some(Self::Jpy),
            _ => None,
        }
    }

    /// ISO code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cad => "CAD",
            Self::Jpy => "JPY",
        }
    }

    /// Number of minor-unit digits.
    pub fn decimals(self) -> u32 {
        match self {
            Self::Jpy => 0,
            _ => 2,
        }
    }

    /// Render an amount held in minor units, e.g. `1234` USD as `12.34`.
    ///
    /// ```
    /// use web_gateway::domain::Currency;
    ///
    /// assert_eq!(Currency::Usd.format(1234), "12.34");
    /// assert_eq!(Currency::Usd.format(-5), "-0.05");
    /// assert_eq!(Currency::Jpy.format(500), "500");
    /// ```
    pub fn format(self, minor_units: i64) -> String {
        let decimals = self.decimals();
        if decimals == 0 {
            return minor_units.to_string();
        }
        let scale = 10_u64.pow(decimals);
        let sign = if minor_units < 0 { "-" } else { "" };
        let magnitude = minor_units.unsigned_abs();
        format!(
            "{sign}{}.{:0width$}",
            magnitude / scale,
            magnitude % scale,
            width = decimals as usize
        )
    }
}

/// Descriptive data about the auctioned item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub currency_id: String,
    #[serde(default)]
    pub increment: i64,
    #[serde(default)]
    pub reserve_price: i64,
}

/// Full transaction record returned by `get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub item_id: ItemId,
    pub creator: UserId,
    pub winner: UserId,
    pub item_data: ItemData,
    pub item_price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_info: Option<DeliveryDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_price: Option<i64>,
    pub status: TransactionStatus,
}

impl TransactionInfo {
    /// Whether `viewer` is on the buying side, i.e. not the item's creator.
    pub fn viewer_is_buyer(&self, viewer: &UserId) -> bool {
        &self.creator != viewer
    }

    /// Currency of the item, if the platform knows it.
    pub fn currency(&self) -> Option<Currency> {
        Currency::from_id(&self.item_data.currency_id)
    }
}

/// One row of a user's transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub item_id: ItemId,
    pub creator_id: UserId,
    pub winner_id: UserId,
    pub item_title: String,
    pub currency_id: String,
    pub item_price: i64,
    pub status: TransactionStatus,
}
