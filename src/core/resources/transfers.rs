//! Transfers: movements between two accounts.

use super::Resource;
use crate::api::models::Transfer;
use crate::core::filters::{FieldRule, FilterField, SORT_ORDERS};
use serde_json::{Value, json};

pub const TRANSFER_STATUSES: &[&str] = &["pending", "completed", "failed", "cancelled"];
pub const TRANSFER_TYPES: &[&str] = &["internal", "external"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferFilter {
    Status,
    Type,
    SortOrder,
    SourceAccountId,
    DestinationAccountId,
    IsSettled,
    StartDate,
    EndDate,
}

impl FilterField for TransferFilter {
    const ALL: &'static [Self] = &[
        TransferFilter::Status,
        TransferFilter::Type,
        TransferFilter::SortOrder,
        TransferFilter::SourceAccountId,
        TransferFilter::DestinationAccountId,
        TransferFilter::IsSettled,
        TransferFilter::StartDate,
        TransferFilter::EndDate,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            TransferFilter::Status => "status",
            TransferFilter::Type => "type",
            TransferFilter::SortOrder => "sortOrder",
            TransferFilter::SourceAccountId => "sourceAccountId",
            TransferFilter::DestinationAccountId => "destinationAccountId",
            TransferFilter::IsSettled => "isSettled",
            TransferFilter::StartDate => "startDate",
            TransferFilter::EndDate => "endDate",
        }
    }

    fn rule(&self) -> FieldRule {
        match self {
            TransferFilter::Status => FieldRule::OneOf(TRANSFER_STATUSES),
            TransferFilter::Type => FieldRule::OneOf(TRANSFER_TYPES),
            TransferFilter::SortOrder => FieldRule::OneOf(SORT_ORDERS),
            TransferFilter::SourceAccountId | TransferFilter::DestinationAccountId => {
                FieldRule::NonEmptyString
            }
            TransferFilter::IsSettled => FieldRule::Boolean,
            TransferFilter::StartDate | TransferFilter::EndDate => FieldRule::Any,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Transfers;

impl Resource for Transfers {
    type Filter = TransferFilter;
    type Item = Transfer;

    const PLURAL: &'static str = "Transfers";
    const SINGULAR: &'static str = "Transfer";
    const PATH: &'static str = "/transfers";
    const PAGE_SIZE: u64 = 100;

    fn default_params() -> Vec<(&'static str, Value)> {
        vec![("orderBy", json!("createdAt")), ("sortOrder", json!("desc"))]
    }
}
