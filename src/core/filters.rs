//! Filter key allow-lists and per-field value checks.
//!
//! Each resource declares a closed enum of filter fields. The enum's
//! [`FilterField::rule`] is an exhaustive `match`, so adding a field without
//! deciding how its values are checked does not compile.

use crate::error::{CommandError, ErrorCode};
use serde_json::{Value, json};
use std::fmt::Debug;
use std::hash::Hash;

pub const SORT_ORDERS: &[&str] = &["asc", "desc"];

/// How a filter value is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Must be one of the listed strings
    OneOf(&'static [&'static str]),
    /// Any string with non-whitespace content
    NonEmptyString,
    Boolean,
    /// String or number, e.g. client identifiers
    StringOrNumber,
    /// Accepted as-is (dates, locales)
    Any,
}

impl FieldRule {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldRule::OneOf(allowed) => value.as_str().is_some_and(|s| allowed.contains(&s)),
            FieldRule::NonEmptyString => value.as_str().is_some_and(|s| !s.trim().is_empty()),
            FieldRule::Boolean => value.is_boolean(),
            FieldRule::StringOrNumber => value.is_string() || value.is_number(),
            FieldRule::Any => true,
        }
    }

    fn expectation(&self) -> String {
        match self {
            FieldRule::OneOf(allowed) => format!("one of {}", allowed.join(", ")),
            FieldRule::NonEmptyString => "a non-empty string".to_string(),
            FieldRule::Boolean => "a boolean".to_string(),
            FieldRule::StringOrNumber => "a string or a number".to_string(),
            FieldRule::Any => "any value".to_string(),
        }
    }
}

/// A closed set of filter keys for one resource.
pub trait FilterField: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every allowed field, in documentation order.
    const ALL: &'static [Self];

    /// Wire name used as the query parameter.
    fn as_str(&self) -> &'static str;

    fn rule(&self) -> FieldRule;

    fn parse(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.as_str() == key)
    }

    fn allowed_keys() -> Vec<&'static str> {
        Self::ALL.iter().map(|field| field.as_str()).collect()
    }
}

/// Check `key` against the allow-list of `F`.
pub fn validate_filter_key<F: FilterField>(key: &str) -> Result<F, CommandError> {
    F::parse(key).ok_or_else(|| {
        CommandError::new(
            ErrorCode::InvalidFilterKey,
            format!(
                "Invalid filter key '{}'. Allowed keys: {}",
                key,
                F::allowed_keys().join(", ")
            ),
        )
        .with_details(json!({ "key": key }))
    })
}

/// Check `value` for the field named `key`. Keys outside the allow-list are
/// not checked here; rejecting them is [`validate_filter_key`]'s job.
pub fn validate_filter_value<F: FilterField>(key: &str, value: &Value) -> Result<(), CommandError> {
    match F::parse(key) {
        Some(field) => validate_field_value(field, value),
        None => Ok(()),
    }
}

pub fn validate_field_value<F: FilterField>(field: F, value: &Value) -> Result<(), CommandError> {
    let rule = field.rule();
    if rule.accepts(value) {
        return Ok(());
    }

    Err(CommandError::new(
        ErrorCode::InvalidFilterValue {
            field: field.as_str(),
        },
        format!(
            "Invalid value {} for filter '{}': expected {}",
            value,
            field.as_str(),
            rule.expectation()
        ),
    )
    .with_details(json!({ "key": field.as_str(), "value": value })))
}

/// Render a filter value as a query-string value.
pub fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
