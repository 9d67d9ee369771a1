//! Lifecycle hooks wrapped around command execution.

use crate::Result;
use crate::core::command::{CommandView, Payload};
use crate::error::CommandError;
use async_trait::async_trait;

/// A set of optional hooks. Unimplemented hooks are no-ops.
///
/// Hooks observe the command; they cannot change its input or swap its
/// result. An `Err` from `before` or `after` fails the command and is
/// reported to the `on_error` hooks like any other failure.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, _command: CommandView<'_>) -> Result<()> {
        Ok(())
    }

    async fn after(&self, _command: CommandView<'_>, _response: Option<&dyn Payload>) -> Result<()> {
        Ok(())
    }

    async fn on_error(&self, _command: CommandView<'_>, _error: &CommandError) {}
}

/// Logs every command as `tracing` events.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    async fn before(&self, command: CommandView<'_>) -> Result<()> {
        tracing::info!(
            "{} {} {}",
            command.metadata.command_name,
            command.metadata.method,
            command.metadata.path
        );
        tracing::debug!("{} input: {:?}", command.metadata.command_name, command.input);
        Ok(())
    }

    async fn after(&self, command: CommandView<'_>, response: Option<&dyn Payload>) -> Result<()> {
        match response {
            Some(_) => tracing::info!("{} succeeded", command.metadata.command_name),
            None => tracing::info!("{} succeeded with no content", command.metadata.command_name),
        }
        Ok(())
    }

    async fn on_error(&self, command: CommandView<'_>, error: &CommandError) {
        tracing::warn!(
            "{} failed [{}]: {}",
            command.metadata.command_name,
            error.code,
            error
        );
    }
}
