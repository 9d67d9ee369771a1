//! Credential lookup
//!
//! Credentials are never written to disk. A bearer token comes from
//! PAYRAIL_TOKEN; a client id/secret pair from PAYRAIL_CLIENT_ID and
//! PAYRAIL_CLIENT_SECRET.

use crate::core::config::Credentials;
use std::env;

pub const TOKEN_ENV: &str = "PAYRAIL_TOKEN";
pub const CLIENT_ID_ENV: &str = "PAYRAIL_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "PAYRAIL_CLIENT_SECRET";

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Read credentials from the environment.
pub fn load_credentials() -> Credentials {
    Credentials {
        bearer_token: non_empty_var(TOKEN_ENV),
        credential: non_empty_var(CLIENT_ID_ENV),
        secret: non_empty_var(CLIENT_SECRET_ENV),
    }
}

/// Check if any usable credential is configured
pub fn has_credentials() -> bool {
    let creds = load_credentials();
    creds.bearer_token.is_some() || (creds.credential.is_some() && creds.secret.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations below never race each other.
    #[test]
    fn test_load_credentials_from_env() {
        let originals: Vec<(&str, Option<String>)> = [TOKEN_ENV, CLIENT_ID_ENV, CLIENT_SECRET_ENV]
            .into_iter()
            .map(|name| (name, env::var(name).ok()))
            .collect();

        unsafe {
            env::set_var(TOKEN_ENV, "tok_abc");
            env::set_var(CLIENT_ID_ENV, "");
            env::remove_var(CLIENT_SECRET_ENV);
        }
        let creds = load_credentials();
        assert_eq!(creds.bearer_token.as_deref(), Some("tok_abc"));
        assert!(creds.credential.is_none());
        assert!(has_credentials());

        unsafe {
            env::remove_var(TOKEN_ENV);
            env::set_var(CLIENT_ID_ENV, "client");
        }
        assert!(!has_credentials());

        unsafe {
            env::set_var(CLIENT_SECRET_ENV, "shh");
        }
        let creds = load_credentials();
        assert_eq!(creds.credential.as_deref(), Some("client"));
        assert_eq!(creds.secret.as_deref(), Some("shh"));
        assert!(has_credentials());

        // Restore original state
        unsafe {
            for (name, value) in originals {
                match value {
                    Some(value) => env::set_var(name, value),
                    None => env::remove_var(name),
                }
            }
        }
    }
}
