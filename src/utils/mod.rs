//! Utils module - Shared utilities and helpers

/// reqwest error conversion helpers
pub mod error_helpers;

/// tracing subscriber setup for the binary
pub mod logging;

/// Input validation utilities
pub mod validation;
