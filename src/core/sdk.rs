//! The top-level client object tying the config store to the request handler.

use crate::Result;
use crate::core::command::{Command, Payload};
use crate::core::config::{Config, ConfigPatch, ConfigStore};
use crate::core::handler::handle_request;
use crate::core::resources::{Accounts, Clients, Payments, Recipients, ResourceApi, Transfers};
use std::sync::Arc;

pub struct PayrailClient {
    store: ConfigStore,
}

impl PayrailClient {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            store: ConfigStore::new(config)?,
        })
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<Config> {
        self.store.snapshot()
    }

    pub fn set_config(&self, config: Config) -> Result<()> {
        self.store.set(config)
    }

    pub fn update_config(&self, patch: ConfigPatch) -> Result<()> {
        self.store.update(patch)
    }

    pub fn reset_config(&self) {
        self.store.reset()
    }

    pub fn payments(&self) -> ResourceApi<Payments> {
        ResourceApi::new()
    }

    pub fn accounts(&self) -> ResourceApi<Accounts> {
        ResourceApi::new()
    }

    pub fn clients(&self) -> ResourceApi<Clients> {
        ResourceApi::new()
    }

    pub fn recipients(&self) -> ResourceApi<Recipients> {
        ResourceApi::new()
    }

    pub fn transfers(&self) -> ResourceApi<Transfers> {
        ResourceApi::new()
    }

    /// Run `command` through the middleware pipeline.
    ///
    /// The config is read once when the call starts; updates made while the
    /// request is in flight apply to the next call only.
    pub async fn request<I, O>(&self, command: &Command<I, O>) -> Result<Option<O>>
    where
        I: Payload,
        O: Payload,
    {
        let snapshot = self.store.snapshot();
        handle_request(command, &snapshot).await
    }
}
