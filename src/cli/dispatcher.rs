use crate::cli::main_types::{Commands, ConfigCommands, ResourceCommands};
use crate::core::config::Config;
use crate::core::middleware::LoggingMiddleware;
use crate::core::resources::{
    Accounts, Clients, Payments, Recipients, Resource, ResourceApi, Transfers,
};
use crate::core::sdk::PayrailClient;
use crate::error::{AppError, CliError, CommandError, ErrorCode};
use crate::storage::config::{Profile, Settings};
use crate::storage::credentials::{has_credentials, load_credentials};
use crate::utils::validation::{validate_timeout, validate_url};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_PROFILE: &str = "default";

pub struct Dispatcher {
    settings: Settings,
    settings_path: Option<PathBuf>,
    profile_name: String,
    explicit_profile: bool,
    tenant: Option<String>,
}

impl Dispatcher {
    pub fn new(
        settings: Settings,
        settings_path: Option<PathBuf>,
        profile: Option<String>,
        tenant: Option<String>,
    ) -> Self {
        let explicit_profile = profile.is_some();
        let profile_name = profile
            .or_else(|| settings.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        tracing::debug!("Using profile: {}", profile_name);

        Self {
            settings,
            settings_path,
            profile_name,
            explicit_profile,
            tenant,
        }
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Payments { command } => self.handle_resource::<Payments>(command).await,
            Commands::Accounts { command } => self.handle_resource::<Accounts>(command).await,
            Commands::Clients { command } => self.handle_resource::<Clients>(command).await,
            Commands::Recipients { command } => self.handle_resource::<Recipients>(command).await,
            Commands::Transfers { command } => self.handle_resource::<Transfers>(command).await,
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    /// Profile in use. A profile named with `--profile` must exist.
    fn profile(&self) -> Result<Profile, CliError> {
        match self.settings.get_profile(&self.profile_name) {
            Some(profile) => Ok(profile.clone()),
            None if self.explicit_profile => Err(CliError::ProfileNotFound {
                name: self.profile_name.clone(),
            }),
            None => Ok(Profile::default()),
        }
    }

    fn build_config(&self) -> Result<Config, AppError> {
        let profile = self.profile()?;
        let base_url = profile
            .resolved_url()
            .ok_or_else(|| CliError::MissingBaseUrl {
                profile: self.profile_name.clone(),
            })?;

        let mut config = profile
            .to_config(base_url, load_credentials())
            .with_middleware(Arc::new(LoggingMiddleware));
        if let Some(tenant) = &self.tenant {
            config.tenant_id = Some(tenant.clone());
        }
        Ok(config)
    }

    async fn handle_resource<R: Resource>(&self, command: ResourceCommands) -> Result<(), AppError> {
        let client = PayrailClient::new(self.build_config()?)?;
        let api = ResourceApi::<R>::new();

        match command {
            ResourceCommands::List {
                filter,
                limit,
                offset,
                all,
            } => {
                tracing::debug!("Listing {} with {} filter(s)", R::PLURAL, filter.len());
                let mut query = api.list();
                for raw in &filter {
                    let (key, value) = parse_filter_arg(raw)?;
                    query = query.filter(&key)?.eq(value)?;
                }
                if let Some(limit) = limit {
                    query = query.limit(limit)?;
                }
                if let Some(offset) = offset {
                    query = query.offset(offset)?;
                }
                if all {
                    query = query.all();
                }

                let page = client.request(&query.execute()).await?;
                print_json(&page)
            }
            ResourceCommands::Get { id } => {
                let command = api.get(&id)?;
                let record = client.request(&command).await?;
                print_json(&record)
            }
        }
    }

    fn handle_config_command(&mut self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                let profile = self.profile()?;
                print_json(&json!({
                    "profile": self.profile_name,
                    "base_url": profile.resolved_url(),
                    "tenant_id": self.tenant.clone().or(profile.tenant_id),
                    "timeout_secs": profile.timeout_secs,
                    "headers": profile.headers,
                    "authenticated": has_credentials(),
                }))
            }
            ConfigCommands::Set { key, value } => {
                match key.as_str() {
                    "url" => validate_url(&value).map_err(CliError::InvalidArguments)?,
                    "timeout" => {
                        let secs = value.parse::<f64>().map_err(|_| {
                            CliError::InvalidArguments(format!(
                                "timeout must be a number of seconds, got '{}'",
                                value
                            ))
                        })?;
                        validate_timeout(secs).map_err(CliError::InvalidArguments)?;
                    }
                    _ => {}
                }

                self.settings
                    .profile_mut(&self.profile_name)
                    .set_field(&key, &value)
                    .map_err(CliError::InvalidArguments)?;
                if self.settings.default_profile.is_none() {
                    self.settings.default_profile = Some(self.profile_name.clone());
                }
                self.settings.save(self.settings_path.clone())?;

                println!("✅ Set {} for profile '{}'", key, self.profile_name);
                Ok(())
            }
        }
    }
}

/// Split `key=value` and coerce the value: `true`/`false` become booleans,
/// integers become numbers, anything else stays a string.
pub fn parse_filter_arg(raw: &str) -> Result<(String, Value), CliError> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        CliError::InvalidArguments(format!("Filter '{}' must be in key=value format", raw))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidArguments(format!(
            "Filter '{}' has an empty key",
            raw
        )));
    }
    Ok((key.to_string(), coerce_value(value)))
}

fn coerce_value(value: &str) -> Value {
    match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match value.parse::<i64>() {
            Ok(number) => Value::from(number),
            Err(_) => Value::String(value.to_string()),
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| {
        CommandError::new(ErrorCode::InvalidResponse, format!("Failed to render output: {}", e))
            .with_source(e)
    })?;
    println!("{}", rendered);
    Ok(())
}
