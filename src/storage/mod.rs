//! Storage layer for payrail
//!
//! Profiles live in a TOML file; credentials are read from the environment.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
