//! Runtime client configuration and the process-wide store that owns it.

use crate::core::middleware::Middleware;
use crate::error::{CommandError, ErrorCode};
use crate::utils::validation::{validate_timeout, validate_url};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Authentication material attached to every request.
#[derive(Clone, Default, PartialEq)]
pub struct Credentials {
    pub bearer_token: Option<String>,
    /// Client id paired with `secret` for basic auth
    pub credential: Option<String>,
    pub secret: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "***"))
            .field("credential", &self.credential)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Settings handed through to the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpConfig {
    pub timeout_secs: Option<f64>,
    pub headers: BTreeMap<String, String>,
}

#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub tenant_id: Option<String>,
    pub credentials: Credentials,
    pub http: HttpConfig,
    pub trace_id: Option<String>,
    pub middlewares: Vec<Arc<dyn Middleware>>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("tenant_id", &self.tenant_id)
            .field("credentials", &self.credentials)
            .field("http", &self.http)
            .field("trace_id", &self.trace_id)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            tenant_id: None,
            credentials: Credentials::default(),
            http: HttpConfig::default(),
            trace_id: None,
            middlewares: Vec::new(),
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credentials.bearer_token = Some(token.into());
        self
    }

    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middlewares.push(middleware);
        self
    }

    /// Check every rule and report all violations at once.
    pub fn validate(&self) -> Result<(), CommandError> {
        let mut problems = Vec::new();

        if let Err(problem) = validate_url(&self.base_url) {
            problems.push(problem);
        }
        if let Some(timeout) = self.http.timeout_secs {
            if let Err(problem) = validate_timeout(timeout) {
                problems.push(problem);
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CommandError::new(
                ErrorCode::InvalidConfig,
                format!("Invalid configuration: {}", problems.join(", ")),
            )
            .with_details(json!({ "problems": problems })))
        }
    }

    /// Apply a patch: headers are unioned, every other present field replaces.
    pub fn merged(&self, patch: ConfigPatch) -> Config {
        let mut next = self.clone();

        if let Some(base_url) = patch.base_url {
            next.base_url = base_url;
        }
        if let Some(tenant_id) = patch.tenant_id {
            next.tenant_id = Some(tenant_id);
        }
        if let Some(credentials) = patch.credentials {
            next.credentials = credentials;
        }
        if let Some(trace_id) = patch.trace_id {
            next.trace_id = Some(trace_id);
        }
        if let Some(middlewares) = patch.middlewares {
            next.middlewares = middlewares;
        }
        if let Some(http) = patch.http {
            if let Some(timeout) = http.timeout_secs {
                next.http.timeout_secs = Some(timeout);
            }
            next.http.headers.extend(http.headers);
        }

        next
    }
}

/// Partial HTTP settings used by [`ConfigPatch`].
#[derive(Debug, Clone, Default)]
pub struct HttpPatch {
    pub timeout_secs: Option<f64>,
    pub headers: BTreeMap<String, String>,
}

#[derive(Clone, Default)]
pub struct ConfigPatch {
    pub base_url: Option<String>,
    pub tenant_id: Option<String>,
    pub credentials: Option<Credentials>,
    pub http: Option<HttpPatch>,
    pub trace_id: Option<String>,
    pub middlewares: Option<Vec<Arc<dyn Middleware>>>,
}

impl ConfigPatch {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http
            .get_or_insert_with(HttpPatch::default)
            .headers
            .insert(name.into(), value.into());
        self
    }
}

/// Owner of the current [`Config`]. Every value it holds has passed validation.
pub struct ConfigStore {
    initial: Config,
    current: RwLock<Arc<Config>>,
}

impl ConfigStore {
    pub fn new(config: Config) -> Result<Self, CommandError> {
        config.validate()?;
        // The initial value is owned by the store, so reset cannot see outside mutation.
        let initial = config.clone();
        Ok(Self {
            initial,
            current: RwLock::new(Arc::new(config)),
        })
    }

    /// Current config as an immutable snapshot.
    pub fn snapshot(&self) -> Arc<Config> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn set(&self, config: Config) -> Result<(), CommandError> {
        config.validate()?;
        self.replace(config);
        Ok(())
    }

    /// Merge and re-validate; an invalid result leaves the store untouched.
    pub fn update(&self, patch: ConfigPatch) -> Result<(), CommandError> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let merged = guard.merged(patch);
        merged.validate()?;
        *guard = Arc::new(merged);
        Ok(())
    }

    pub fn reset(&self) {
        self.replace(self.initial.clone());
    }

    fn replace(&self, config: Config) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
    }
}
