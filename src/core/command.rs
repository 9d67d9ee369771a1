//! The uniform operation type every public API call produces.

use crate::Result;
use crate::core::config::Config;
use futures::future::{BoxFuture, FutureExt};
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMetadata {
    pub command_name: String,
    pub path: String,
    pub method: HttpMethod,
}

impl CommandMetadata {
    pub fn new(command_name: impl Into<String>, path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            command_name: command_name.into(),
            path: path.into(),
            method,
        }
    }
}

/// Type-erased view of command inputs and responses handed to middleware.
pub trait Payload: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> Payload for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// What a middleware hook gets to see of the running command.
#[derive(Clone, Copy)]
pub struct CommandView<'a> {
    pub metadata: &'a CommandMetadata,
    pub input: &'a dyn Payload,
}

impl fmt::Debug for CommandView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandView")
            .field("metadata", self.metadata)
            .field("input", &self.input)
            .finish()
    }
}

type Executor<O> = Arc<dyn Fn(Config) -> BoxFuture<'static, Result<Option<O>>> + Send + Sync>;

/// An immutable description of one API operation.
///
/// The executor closes over everything the call needs (filters, paging,
/// identifiers) and receives its own copy of the config on each run, so a
/// command can be executed any number of times.
pub struct Command<I, O> {
    input: I,
    metadata: CommandMetadata,
    executor: Executor<O>,
}

impl<I, O> Command<I, O>
where
    I: Payload,
    O: Send + 'static,
{
    pub fn new<F, Fut>(input: I, metadata: CommandMetadata, executor: F) -> Self
    where
        F: Fn(Config) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<O>>> + Send + 'static,
    {
        Self {
            input,
            metadata,
            executor: Arc::new(move |config| executor(config).boxed()),
        }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn metadata(&self) -> &CommandMetadata {
        &self.metadata
    }

    pub fn view(&self) -> CommandView<'_> {
        CommandView {
            metadata: &self.metadata,
            input: &self.input,
        }
    }

    /// Run the operation against `config`. The caller's config is never modified.
    pub async fn execute(&self, config: &Config) -> Result<Option<O>> {
        (self.executor)(config.clone()).await
    }
}

impl<I: Clone, O> Clone for Command<I, O> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            metadata: self.metadata.clone(),
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<I: fmt::Debug, O> fmt::Debug for Command<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("input", &self.input)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
