//! Recipients: saved payees a payment can be sent to.

use super::{DEFAULT_LOCALE, Resource};
use crate::api::models::Recipient;
use crate::core::filters::{FieldRule, FilterField, SORT_ORDERS};
use crate::core::resources::payments::PAYMENT_RAILS;
use serde_json::{Value, json};

pub const RECIPIENT_STATUSES: &[&str] = &["active", "inactive", "pending_verification"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipientFilter {
    Status,
    Rail,
    SortOrder,
    Name,
    ClientId,
    Locale,
}

impl FilterField for RecipientFilter {
    const ALL: &'static [Self] = &[
        RecipientFilter::Status,
        RecipientFilter::Rail,
        RecipientFilter::SortOrder,
        RecipientFilter::Name,
        RecipientFilter::ClientId,
        RecipientFilter::Locale,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            RecipientFilter::Status => "status",
            RecipientFilter::Rail => "rail",
            RecipientFilter::SortOrder => "sortOrder",
            RecipientFilter::Name => "name",
            RecipientFilter::ClientId => "clientId",
            RecipientFilter::Locale => "locale",
        }
    }

    fn rule(&self) -> FieldRule {
        match self {
            RecipientFilter::Status => FieldRule::OneOf(RECIPIENT_STATUSES),
            RecipientFilter::Rail => FieldRule::OneOf(PAYMENT_RAILS),
            RecipientFilter::SortOrder => FieldRule::OneOf(SORT_ORDERS),
            RecipientFilter::Name => FieldRule::NonEmptyString,
            RecipientFilter::ClientId => FieldRule::StringOrNumber,
            RecipientFilter::Locale => FieldRule::Any,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Recipients;

impl Resource for Recipients {
    type Filter = RecipientFilter;
    type Item = Recipient;

    const PLURAL: &'static str = "Recipients";
    const SINGULAR: &'static str = "Recipient";
    const PATH: &'static str = "/recipients";
    const PAGE_SIZE: u64 = 100;

    fn default_params() -> Vec<(&'static str, Value)> {
        vec![("locale", json!(DEFAULT_LOCALE)), ("sortOrder", json!("asc"))]
    }
}
