//! payrail: a typed client for a payments REST API
//!
//! Every operation is a [`core::command::Command`] executed through a
//! middleware pipeline. List endpoints are queried with an immutable builder
//! that validates filters before any request goes out.

pub use error::{AppError, CommandError, ErrorCode};

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Commands, middleware, queries, resources
pub mod storage; // Profiles and credentials

/// Support modules (used across layers)
pub mod api; // HTTP transport and wire models
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, CommandError>;

pub mod prelude {
    pub use crate::api::models::Page;
    pub use crate::core::command::{Command, CommandMetadata, CommandView, HttpMethod, Payload};
    pub use crate::core::config::{Config, ConfigPatch, Credentials};
    pub use crate::core::middleware::{LoggingMiddleware, Middleware};
    pub use crate::core::query::ListQuery;
    pub use crate::core::sdk::PayrailClient;
    pub use crate::error::{CommandError, ErrorCode, is_command_error};
}
