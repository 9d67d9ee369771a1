//! Payments: money movements initiated on behalf of a client.

use super::{DEFAULT_LOCALE, Resource};
use crate::api::models::Payment;
use crate::core::filters::{FieldRule, FilterField, SORT_ORDERS};
use serde_json::{Value, json};

pub const PAYMENT_STATUSES: &[&str] = &[
    "pending",
    "processing",
    "completed",
    "failed",
    "cancelled",
    "returned",
];
pub const PAYMENT_RAILS: &[&str] = &["ach", "wire", "rtp", "book", "card"];
pub const PAYMENT_TYPES: &[&str] = &["credit", "debit"];
pub const PAYMENT_ORDER_BY: &[&str] = &["createdAt", "updatedAt", "amount", "status"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentFilter {
    Status,
    Rail,
    Type,
    SortOrder,
    OrderBy,
    RecipientName,
    ClientId,
    AccountId,
    IsSettled,
    StartDate,
    EndDate,
    Locale,
}

impl FilterField for PaymentFilter {
    const ALL: &'static [Self] = &[
        PaymentFilter::Status,
        PaymentFilter::Rail,
        PaymentFilter::Type,
        PaymentFilter::SortOrder,
        PaymentFilter::OrderBy,
        PaymentFilter::RecipientName,
        PaymentFilter::ClientId,
        PaymentFilter::AccountId,
        PaymentFilter::IsSettled,
        PaymentFilter::StartDate,
        PaymentFilter::EndDate,
        PaymentFilter::Locale,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            PaymentFilter::Status => "status",
            PaymentFilter::Rail => "rail",
            PaymentFilter::Type => "type",
            PaymentFilter::SortOrder => "sortOrder",
            PaymentFilter::OrderBy => "orderBy",
            PaymentFilter::RecipientName => "recipientName",
            PaymentFilter::ClientId => "clientId",
            PaymentFilter::AccountId => "accountId",
            PaymentFilter::IsSettled => "isSettled",
            PaymentFilter::StartDate => "startDate",
            PaymentFilter::EndDate => "endDate",
            PaymentFilter::Locale => "locale",
        }
    }

    fn rule(&self) -> FieldRule {
        match self {
            PaymentFilter::Status => FieldRule::OneOf(PAYMENT_STATUSES),
            PaymentFilter::Rail => FieldRule::OneOf(PAYMENT_RAILS),
            PaymentFilter::Type => FieldRule::OneOf(PAYMENT_TYPES),
            PaymentFilter::SortOrder => FieldRule::OneOf(SORT_ORDERS),
            PaymentFilter::OrderBy => FieldRule::OneOf(PAYMENT_ORDER_BY),
            PaymentFilter::RecipientName | PaymentFilter::AccountId => FieldRule::NonEmptyString,
            PaymentFilter::ClientId => FieldRule::StringOrNumber,
            PaymentFilter::IsSettled => FieldRule::Boolean,
            PaymentFilter::StartDate | PaymentFilter::EndDate | PaymentFilter::Locale => {
                FieldRule::Any
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Payments;

impl Resource for Payments {
    type Filter = PaymentFilter;
    type Item = Payment;

    const PLURAL: &'static str = "Payments";
    const SINGULAR: &'static str = "Payment";
    const PATH: &'static str = "/payments";
    const PAGE_SIZE: u64 = 200;

    fn default_params() -> Vec<(&'static str, Value)> {
        vec![
            ("locale", json!(DEFAULT_LOCALE)),
            ("orderBy", json!("createdAt")),
            ("sortOrder", json!("desc")),
        ]
    }
}
