use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Closed set of error codes carried by [`CommandError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidFilterKey,
    /// Value rejected for the named filter field (wire name, e.g. `sortOrder`)
    InvalidFilterValue { field: &'static str },
    InvalidLimit,
    InvalidOffset,
    InvalidConfig,
    InvalidId,
    InvalidResponse,
    Unauthorized,
    Timeout,
    Http,
    Network,
}

impl ErrorCode {
    /// Wire form of the code, e.g. `invalid_filter_key`.
    pub fn code(&self) -> String {
        match self {
            ErrorCode::InvalidFilterKey => "invalid_filter_key".to_string(),
            ErrorCode::InvalidFilterValue { field } => {
                format!("invalid_{}_value", snake_case(field))
            }
            ErrorCode::InvalidLimit => "invalid_limit".to_string(),
            ErrorCode::InvalidOffset => "invalid_offset".to_string(),
            ErrorCode::InvalidConfig => "invalid_config".to_string(),
            ErrorCode::InvalidId => "invalid_id".to_string(),
            ErrorCode::InvalidResponse => "invalid_response".to_string(),
            ErrorCode::Unauthorized => "unauthorized".to_string(),
            ErrorCode::Timeout => "timeout".to_string(),
            ErrorCode::Http => "http_error".to_string(),
            ErrorCode::Network => "network_error".to_string(),
        }
    }

    /// True for errors raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ErrorCode::InvalidFilterKey
                | ErrorCode::InvalidFilterValue { .. }
                | ErrorCode::InvalidLimit
                | ErrorCode::InvalidOffset
                | ErrorCode::InvalidConfig
                | ErrorCode::InvalidId
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// The one error shape surfaced by every command, builder and config operation.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct CommandError {
    pub code: ErrorCode,
    pub message: String,
    pub status_code: Option<u16>,
    /// Offending key/value for validation errors, response body for HTTP errors
    pub details: Option<Value>,
    #[source]
    pub original_error: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status_code: None,
            details: None,
            original_error: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.original_error = Some(Box::new(source));
        self
    }

    pub fn name(&self) -> &'static str {
        "CommandError"
    }
}

/// Type guard usable on any error, regardless of where it was raised.
pub fn is_command_error(error: &(dyn std::error::Error + 'static)) -> bool {
    error.downcast_ref::<CommandError>().is_some()
}

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: f64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authentication failed")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Timeout { .. } => None,
            ApiError::Http { status: 0, .. } => None,
            ApiError::Http { status, .. } | ApiError::Unauthorized { status, .. } => Some(*status),
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Timeout { endpoint, .. }
            | ApiError::Http { endpoint, .. }
            | ApiError::Unauthorized { endpoint, .. } => endpoint,
        }
    }
}

impl From<ApiError> for CommandError {
    fn from(error: ApiError) -> Self {
        let (code, body) = match &error {
            ApiError::Timeout { .. } => (ErrorCode::Timeout, None),
            ApiError::Unauthorized { server_message, .. } => {
                (ErrorCode::Unauthorized, Some(server_message.clone()))
            }
            ApiError::Http { status: 0, .. } => (ErrorCode::Network, None),
            // A success status here means the body failed to parse.
            ApiError::Http {
                status: 200..=299,
                message,
                ..
            } => (ErrorCode::InvalidResponse, Some(message.clone())),
            ApiError::Http { message, .. } => (ErrorCode::Http, Some(message.clone())),
        };

        let mut command_error = CommandError::new(
            code,
            format!("{} failed: {}", error.endpoint(), error),
        );
        command_error.status_code = error.status();
        command_error.details = body.map(|text| {
            serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text))
        });
        command_error.with_source(error)
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },
    #[error("No base URL configured for profile '{profile}'")]
    MissingBaseUrl { profile: String },
}

/// Top-level error for the binary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("CommandError: {0}")]
    Command(#[from] CommandError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Command(err) => match err.code {
                ErrorCode::Unauthorized | ErrorCode::InvalidConfig => ErrorSeverity::High,
                ErrorCode::Http if err.status_code.is_some_and(|s| s >= 500) => {
                    ErrorSeverity::High
                }
                ErrorCode::Network => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Cli(_) => ErrorSeverity::Low,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Command(err) => match err.code {
                ErrorCode::Unauthorized => {
                    Some("Set PAYRAIL_TOKEN or PAYRAIL_CLIENT_ID/PAYRAIL_CLIENT_SECRET".to_string())
                }
                ErrorCode::Timeout | ErrorCode::Network => {
                    Some("Check your connection and the profile's base URL".to_string())
                }
                ErrorCode::InvalidConfig => {
                    Some("'payrail config set url <url>' to fix the base URL".to_string())
                }
                ErrorCode::InvalidFilterKey | ErrorCode::InvalidFilterValue { .. } => {
                    Some("Filters are passed as --filter key=value".to_string())
                }
                _ => None,
            },
            AppError::Cli(CliError::MissingBaseUrl { .. }) => {
                Some("'payrail config set url <url>' or set PAYRAIL_URL".to_string())
            }
            AppError::Storage(StorageError::ConfigParseError { .. }) => {
                Some("Check ~/.config/payrail/config.toml for syntax errors".to_string())
            }
            _ => None,
        }
    }
}
