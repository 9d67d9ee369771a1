//! Input validation utilities
//!
//! Checks applied to configuration values and resource identifiers before
//! they are used to build a request.

use crate::error::{CommandError, ErrorCode};
use serde_json::json;
use std::time::Duration;
use url::Url;

/// Validate that a base URL is present and parseable as an http(s) URL.
/// Returns a human readable problem description on failure.
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.trim().is_empty() {
        return Err("baseUrl is required".to_string());
    }

    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(format!(
            "baseUrl '{}' must use http or https, got '{}'",
            url,
            parsed.scheme()
        )),
        Err(e) => Err(format!("baseUrl '{}' is not a valid URL: {}", url, e)),
    }
}

/// Validate that a request timeout is a finite, non-negative number of seconds.
pub fn validate_timeout(timeout_secs: f64) -> Result<(), String> {
    request_timeout(timeout_secs).map(|_| ())
}

/// Convert a timeout in seconds to a request timeout. `0` means no timeout.
pub fn request_timeout(timeout_secs: f64) -> Result<Option<Duration>, String> {
    if !timeout_secs.is_finite() || timeout_secs < 0.0 {
        return Err(format!(
            "timeout must be a non-negative number, got {}",
            timeout_secs
        ));
    }
    if timeout_secs == 0.0 {
        return Ok(None);
    }
    Duration::try_from_secs_f64(timeout_secs)
        .map(Some)
        .map_err(|_| format!("timeout {} is too large", timeout_secs))
}

/// Validate a resource identifier used in a path segment.
pub fn validate_resource_id(resource: &str, id: &str) -> Result<(), CommandError> {
    if id.trim().is_empty() || id.contains('/') {
        return Err(CommandError::new(
            ErrorCode::InvalidId,
            format!("Invalid {} id '{}'", resource, id),
        )
        .with_details(json!({ "resource": resource, "id": id })));
    }
    Ok(())
}
