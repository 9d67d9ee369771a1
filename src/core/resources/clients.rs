use super::{DEFAULT_LOCALE, Resource};
use crate::api::models::ClientRecord;
use crate::core::filters::{FieldRule, FilterField, SORT_ORDERS};
use serde_json::{Value, json};

pub const CLIENT_STATUSES: &[&str] = &["active", "inactive", "pending", "suspended"];
pub const CLIENT_TYPES: &[&str] = &["individual", "business"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientFilter {
    Status,
    Type,
    SortOrder,
    Name,
    Email,
    ClientId,
    Locale,
}

impl FilterField for ClientFilter {
    const ALL: &'static [Self] = &[
        ClientFilter::Status,
        ClientFilter::Type,
        ClientFilter::SortOrder,
        ClientFilter::Name,
        ClientFilter::Email,
        ClientFilter::ClientId,
        ClientFilter::Locale,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ClientFilter::Status => "status",
            ClientFilter::Type => "type",
            ClientFilter::SortOrder => "sortOrder",
            ClientFilter::Name => "name",
            ClientFilter::Email => "email",
            ClientFilter::ClientId => "clientId",
            ClientFilter::Locale => "locale",
        }
    }

    fn rule(&self) -> FieldRule {
        match self {
            ClientFilter::Status => FieldRule::OneOf(CLIENT_STATUSES),
            ClientFilter::Type => FieldRule::OneOf(CLIENT_TYPES),
            ClientFilter::SortOrder => FieldRule::OneOf(SORT_ORDERS),
            ClientFilter::Name | ClientFilter::Email => FieldRule::NonEmptyString,
            ClientFilter::ClientId => FieldRule::StringOrNumber,
            ClientFilter::Locale => FieldRule::Any,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Clients;

impl Resource for Clients {
    type Filter = ClientFilter;
    type Item = ClientRecord;

    const PLURAL: &'static str = "Clients";
    const SINGULAR: &'static str = "Client";
    const PATH: &'static str = "/clients";
    const PAGE_SIZE: u64 = 200;

    fn default_params() -> Vec<(&'static str, Value)> {
        vec![
            ("locale", json!(DEFAULT_LOCALE)),
            ("orderBy", json!("createdAt")),
            ("sortOrder", json!("desc")),
        ]
    }
}
