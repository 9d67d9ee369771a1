//! Accounts: ledgers held by a client.

use super::{DEFAULT_LOCALE, Resource};
use crate::api::models::Account;
use crate::core::filters::{FieldRule, FilterField, SORT_ORDERS};
use serde_json::{Value, json};

pub const ACCOUNT_STATUSES: &[&str] = &["active", "inactive", "frozen", "closed"];
pub const ACCOUNT_TYPES: &[&str] = &["checking", "savings", "operating", "escrow", "virtual"];
pub const ACCOUNT_ORDER_BY: &[&str] = &["createdAt", "updatedAt", "name", "balance"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountFilter {
    Status,
    Type,
    SortOrder,
    OrderBy,
    Name,
    ClientId,
    Locale,
}

impl FilterField for AccountFilter {
    const ALL: &'static [Self] = &[
        AccountFilter::Status,
        AccountFilter::Type,
        AccountFilter::SortOrder,
        AccountFilter::OrderBy,
        AccountFilter::Name,
        AccountFilter::ClientId,
        AccountFilter::Locale,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            AccountFilter::Status => "status",
            AccountFilter::Type => "type",
            AccountFilter::SortOrder => "sortOrder",
            AccountFilter::OrderBy => "orderBy",
            AccountFilter::Name => "name",
            AccountFilter::ClientId => "clientId",
            AccountFilter::Locale => "locale",
        }
    }

    fn rule(&self) -> FieldRule {
        match self {
            AccountFilter::Status => FieldRule::OneOf(ACCOUNT_STATUSES),
            AccountFilter::Type => FieldRule::OneOf(ACCOUNT_TYPES),
            AccountFilter::SortOrder => FieldRule::OneOf(SORT_ORDERS),
            AccountFilter::OrderBy => FieldRule::OneOf(ACCOUNT_ORDER_BY),
            AccountFilter::Name => FieldRule::NonEmptyString,
            AccountFilter::ClientId => FieldRule::StringOrNumber,
            AccountFilter::Locale => FieldRule::Any,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Accounts;

impl Resource for Accounts {
    type Filter = AccountFilter;
    type Item = Account;

    const PLURAL: &'static str = "Accounts";
    const SINGULAR: &'static str = "Account";
    const PATH: &'static str = "/accounts";
    const PAGE_SIZE: u64 = 200;

    fn default_params() -> Vec<(&'static str, Value)> {
        vec![
            ("locale", json!(DEFAULT_LOCALE)),
            ("orderBy", json!("createdAt")),
            ("sortOrder", json!("desc")),
        ]
    }
}
