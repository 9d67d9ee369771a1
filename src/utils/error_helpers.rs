//! Helper functions for turning reqwest failures into ApiError with endpoint context.

use crate::error::ApiError;

/// Convert reqwest errors to ApiError with endpoint context
pub fn convert_request_error(error: reqwest::Error, endpoint: &str, timeout_secs: f64) -> ApiError {
    if error.is_timeout() {
        return convert_timeout_error(endpoint, timeout_secs);
    }

    ApiError::Http {
        status: error.status().map(|s| s.as_u16()).unwrap_or(0),
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert timeout errors to ApiError with endpoint context
pub fn convert_timeout_error(endpoint: &str, timeout_secs: f64) -> ApiError {
    ApiError::Timeout {
        timeout_secs,
        endpoint: endpoint.to_string(),
    }
}

/// Convert JSON deserialization errors to ApiError with endpoint context
pub fn convert_json_error(error: impl std::fmt::Display, status: u16, endpoint: &str) -> ApiError {
    ApiError::Http {
        status,
        endpoint: endpoint.to_string(),
        message: format!("JSON parse error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_timeout_error() {
        let api_error = convert_timeout_error("/payments", 30.0);

        match api_error {
            ApiError::Timeout {
                endpoint,
                timeout_secs,
            } => {
                assert_eq!(endpoint, "/payments");
                assert_eq!(timeout_secs, 30.0);
            }
            _ => panic!("Expected Timeout error"),
        }
    }

    #[test]
    fn test_convert_json_error_keeps_status() {
        let api_error = convert_json_error("expected value at line 1", 200, "/accounts");

        match api_error {
            ApiError::Http {
                status,
                endpoint,
                message,
            } => {
                assert_eq!(status, 200);
                assert_eq!(endpoint, "/accounts");
                assert!(message.contains("JSON parse error"));
            }
            _ => panic!("Expected Http error"),
        }
    }
}
