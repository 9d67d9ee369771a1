//! Resource definitions and the command factories shared by all of them.

use crate::Result;
use crate::api::client::{HttpClient, RequestOptions, base_request, decode};
use crate::core::command::{Command, CommandMetadata, HttpMethod};
use crate::core::config::Config;
use crate::core::filters::FilterField;
use crate::core::query::ListQuery;
use crate::utils::validation::validate_resource_id;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use std::marker::PhantomData;

pub mod accounts;
pub mod clients;
pub mod payments;
pub mod recipients;
pub mod transfers;

pub use accounts::{AccountFilter, Accounts};
pub use clients::{ClientFilter, Clients};
pub use payments::{PaymentFilter, Payments};
pub use recipients::{RecipientFilter, Recipients};
pub use transfers::{TransferFilter, Transfers};

pub const DEFAULT_LOCALE: &str = "en_US";

/// Static description of one REST resource.
pub trait Resource: Debug + Send + Sync + 'static {
    type Filter: FilterField;
    type Item: DeserializeOwned + Serialize + Debug + Send + Sync + 'static;

    /// Used in command names, e.g. `ListPayments`
    const PLURAL: &'static str;
    /// Used in command names, e.g. `GetPayment`
    const SINGULAR: &'static str;
    const PATH: &'static str;
    /// Page size used when fetching every record
    const PAGE_SIZE: u64;

    /// Query parameters sent unless the caller filters on the same key.
    fn default_params() -> Vec<(&'static str, Value)>;
}

/// Input of a single-record command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordInput {
    pub id: Option<String>,
    pub body: Option<Value>,
    pub tenant_id: Option<String>,
}

/// Entry point for one resource: list queries and single-record commands.
#[derive(Debug)]
pub struct ResourceApi<R: Resource> {
    tenant_id: Option<String>,
    resource: PhantomData<R>,
}

impl<R: Resource> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self {
            tenant_id: self.tenant_id.clone(),
            resource: PhantomData,
        }
    }
}

impl<R: Resource> Default for ResourceApi<R> {
    fn default() -> Self {
        Self {
            tenant_id: None,
            resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tenant(&self, tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: Some(tenant_id.into()),
            resource: PhantomData,
        }
    }

    pub fn list(&self) -> ListQuery<R> {
        let query = ListQuery::new();
        match &self.tenant_id {
            Some(tenant_id) => query.tenant(tenant_id.clone()),
            None => query,
        }
    }

    pub fn get(&self, id: &str) -> Result<Command<RecordInput, R::Item>> {
        validate_resource_id(R::SINGULAR, id)?;
        let path = format!("{}/{}", R::PATH, id);
        Ok(self.record_command(
            format!("Get{}", R::SINGULAR),
            path,
            HttpMethod::Get,
            Some(id.to_string()),
            None,
        ))
    }

    pub fn create(&self, body: Value) -> Command<RecordInput, R::Item> {
        self.record_command(
            format!("Create{}", R::SINGULAR),
            R::PATH.to_string(),
            HttpMethod::Post,
            None,
            Some(body),
        )
    }

    pub fn update(&self, id: &str, body: Value) -> Result<Command<RecordInput, R::Item>> {
        validate_resource_id(R::SINGULAR, id)?;
        let path = format!("{}/{}", R::PATH, id);
        Ok(self.record_command(
            format!("Update{}", R::SINGULAR),
            path,
            HttpMethod::Put,
            Some(id.to_string()),
            Some(body),
        ))
    }

    /// Delete a record. The response body, if any, is returned untyped.
    pub fn delete(&self, id: &str) -> Result<Command<RecordInput, Value>> {
        validate_resource_id(R::SINGULAR, id)?;
        let path = format!("{}/{}", R::PATH, id);
        Ok(self.record_command(
            format!("Delete{}", R::SINGULAR),
            path,
            HttpMethod::Delete,
            Some(id.to_string()),
            None,
        ))
    }

    fn record_command<O>(
        &self,
        command_name: String,
        path: String,
        method: HttpMethod,
        id: Option<String>,
        body: Option<Value>,
    ) -> Command<RecordInput, O>
    where
        O: DeserializeOwned + Send + 'static,
    {
        let input = RecordInput {
            id,
            body: body.clone(),
            tenant_id: self.tenant_id.clone(),
        };
        let tenant_id = self.tenant_id.clone();
        let metadata = CommandMetadata::new(command_name, path.clone(), method);

        Command::new(input, metadata, move |config| {
            send_record::<O>(config, tenant_id.clone(), method, path.clone(), body.clone())
        })
    }
}

async fn send_record<O>(
    mut config: Config,
    tenant_id: Option<String>,
    method: HttpMethod,
    path: String,
    body: Option<Value>,
) -> Result<Option<O>>
where
    O: DeserializeOwned,
{
    if let Some(tenant_id) = tenant_id {
        config.tenant_id = Some(tenant_id);
    }
    let client = base_request(&config)?;
    let opts = RequestOptions::default();

    let response = match method {
        HttpMethod::Get => client.get(&path, opts).await?,
        HttpMethod::Post => client.post(&path, body, opts).await?,
        HttpMethod::Put => client.put(&path, body, opts).await?,
        HttpMethod::Delete => client.delete(&path, opts).await?,
    };

    if response.data.is_null() {
        return Ok(None);
    }
    decode(response, &path).map(Some)
}
