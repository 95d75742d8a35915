//! Shared validation helpers for inbound HTTP adapters.
//!
//! Malformed path and query values are rejected with `400 invalid_request`
//! and a `details` object naming the field, the offending value and a code.

use pagination::PageRequest;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, ItemId, TransactionStatus};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    UnknownStatus,
    InvalidPageSize,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::UnknownStatus => "unknown_status",
            ErrorCode::InvalidPageSize => "invalid_page_size",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn invalid_value(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        let name = field.as_str();
        invalid_value(
            field,
            format!("{name} must be a valid UUID"),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

/// Reject a query string or body that could not be decoded at all.
pub(crate) fn malformed_input(part: &str, err: &impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("malformed {part}: {err}"))
}

pub(crate) fn parse_item_id(value: &str) -> Result<ItemId, Error> {
    parse_uuid(value, FieldName::new("id")).map(ItemId::new)
}

pub(crate) fn parse_status(value: &str, field: FieldName) -> Result<TransactionStatus, Error> {
    value.parse().map_err(|_| {
        invalid_value(
            field,
            format!("unknown transaction status: {value}"),
            ErrorCode::UnknownStatus,
            value,
        )
    })
}

pub(crate) fn page_request(page: Option<u32>, page_size: Option<u32>) -> Result<PageRequest, Error> {
    PageRequest::from_optional(page, page_size).map_err(|err| {
        invalid_value(
            FieldName::new("pageSize"),
            err.to_string(),
            ErrorCode::InvalidPageSize,
            &page_size.map(|size| size.to_string()).unwrap_or_default(),
        )
    })
}
