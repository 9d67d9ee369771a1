//! Immutable, chainable list-query builder shared by every resource.

use crate::Result;
use crate::api::client::base_request;
use crate::api::models::Page;
use crate::core::command::{Command, CommandMetadata, HttpMethod};
use crate::core::filters::{FilterField, query_value, validate_field_value, validate_filter_key};
use crate::core::pagination::{fetch_all, fetch_page};
use crate::core::resources::Resource;
use crate::error::{CommandError, ErrorCode};
use serde::Serialize;
use serde_json::{Value, json};
use std::marker::PhantomData;

/// Frozen state of a list query, as seen by middleware.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListInput {
    pub filters: Vec<(String, Value)>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub tenant_id: Option<String>,
}

/// Accumulated filters and paging for one resource.
///
/// Every method returns a new query; the receiver is never modified, so a
/// query can be used as the base for several diverging chains.
#[derive(Debug)]
pub struct ListQuery<R: Resource> {
    filters: Vec<(R::Filter, Value)>,
    limit: Option<u64>,
    offset: Option<u64>,
    tenant_id: Option<String>,
    resource: PhantomData<R>,
}

impl<R: Resource> Clone for ListQuery<R> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            limit: self.limit,
            offset: self.offset,
            tenant_id: self.tenant_id.clone(),
            resource: PhantomData,
        }
    }
}

impl<R: Resource> Default for ListQuery<R> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            limit: None,
            offset: None,
            tenant_id: None,
            resource: PhantomData,
        }
    }
}

/// Pending filter on a validated key, completed by [`FilterClause::eq`].
#[derive(Debug)]
pub struct FilterClause<R: Resource> {
    query: ListQuery<R>,
    field: R::Filter,
}

impl<R: Resource> FilterClause<R> {
    pub fn field(&self) -> R::Filter {
        self.field
    }

    /// Validate `value` and return the query with the filter set.
    /// Setting a key that is already present replaces its value.
    pub fn eq(self, value: impl Into<Value>) -> Result<ListQuery<R>> {
        let value = value.into();
        validate_field_value(self.field, &value)?;

        let mut query = self.query;
        match query.filters.iter_mut().find(|(field, _)| *field == self.field) {
            Some(entry) => entry.1 = value,
            None => query.filters.push((self.field, value)),
        }
        Ok(query)
    }
}

impl<R: Resource> ListQuery<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a filter on `key`. Unknown keys fail here, before any request.
    pub fn filter(&self, key: &str) -> Result<FilterClause<R>> {
        let field = validate_filter_key::<R::Filter>(key)?;
        Ok(self.field(field))
    }

    /// Start a filter on a typed field.
    pub fn field(&self, field: R::Filter) -> FilterClause<R> {
        FilterClause {
            query: self.clone(),
            field,
        }
    }

    /// Page size. `0` means fetch every page.
    pub fn limit(&self, limit: i64) -> Result<Self> {
        if limit < 0 {
            return Err(CommandError::new(
                ErrorCode::InvalidLimit,
                format!("limit must be zero or positive, got {}", limit),
            )
            .with_details(json!({ "limit": limit })));
        }
        let mut next = self.clone();
        next.limit = Some(limit as u64);
        Ok(next)
    }

    pub fn offset(&self, offset: i64) -> Result<Self> {
        if offset < 0 {
            return Err(CommandError::new(
                ErrorCode::InvalidOffset,
                format!("offset must be zero or positive, got {}", offset),
            )
            .with_details(json!({ "offset": offset })));
        }
        let mut next = self.clone();
        next.offset = Some(offset as u64);
        Ok(next)
    }

    /// Shorthand for `limit(0)`.
    pub fn all(&self) -> Self {
        let mut next = self.clone();
        next.limit = Some(0);
        next
    }

    /// Run under another tenant for this query only.
    pub fn tenant(&self, tenant_id: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.tenant_id = Some(tenant_id.into());
        next
    }

    pub fn filters(&self) -> &[(R::Filter, Value)] {
        &self.filters
    }

    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<u64> {
        self.offset
    }

    /// Resource defaults overlaid with caller filters, as query pairs.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, Value)> = R::default_params()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();

        for (field, value) in &self.filters {
            let key = field.as_str();
            match params.iter_mut().find(|(existing, _)| existing == key) {
                Some(entry) => entry.1 = value.clone(),
                None => params.push((key.to_string(), value.clone())),
            }
        }

        params
            .into_iter()
            .map(|(key, value)| (key, query_value(&value)))
            .collect()
    }

    fn input(&self) -> ListInput {
        ListInput {
            filters: self
                .filters
                .iter()
                .map(|(field, value)| (field.as_str().to_string(), value.clone()))
                .collect(),
            limit: self.limit,
            offset: self.offset,
            tenant_id: self.tenant_id.clone(),
        }
    }

    /// Freeze the query into a command. No request is made until it runs.
    pub fn execute(&self) -> Command<ListInput, Page<R::Item>> {
        let query = self.query_pairs();
        let limit = self.limit;
        let offset = self.offset;
        let tenant_id = self.tenant_id.clone();

        Command::new(
            self.input(),
            CommandMetadata::new(format!("List{}", R::PLURAL), R::PATH, HttpMethod::Get),
            move |mut config| {
                let query = query.clone();
                let tenant_id = tenant_id.clone();
                async move {
                    if let Some(tenant_id) = tenant_id {
                        config.tenant_id = Some(tenant_id);
                    }
                    let client = base_request(&config)?;

                    let page = match limit {
                        Some(0) => {
                            fetch_all(&client, R::PATH, &query, R::PAGE_SIZE, offset.unwrap_or(0))
                                .await?
                        }
                        limit => fetch_page(&client, R::PATH, &query, limit, offset).await?,
                    };
                    Ok(Some(page))
                }
            },
        )
    }
}
