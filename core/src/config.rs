//! Client configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const SERVER_ENV: &str = "CONSOLE_DNS_SERVER";
pub const TOKEN_ENV: &str = "CONSOLE_DNS_TOKEN";

/// Where the console-dns service lives and how to authenticate to it.
///
/// `server` is joined to request paths verbatim, so it should not end with a
/// slash.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub server: String,
    pub token: String,
}

impl ClientConfig {
    pub fn new(server: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            token: token.into(),
        }
    }

    /// Read `CONSOLE_DNS_SERVER` and `CONSOLE_DNS_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let server = std::env::var(SERVER_ENV).map_err(|_| ConfigError::MissingVar(SERVER_ENV))?;
        let token = std::env::var(TOKEN_ENV).map_err(|_| ConfigError::MissingVar(TOKEN_ENV))?;
        Ok(Self::new(server, token))
    }

    /// Parse a JSON object with `server` and `token` fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server", &self.server)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_token() {
        let config = ClientConfig::new("http://127.0.0.1:8090", "secret-token");
        let debug = format!("{config:?}");
        assert!(debug.contains("http://127.0.0.1:8090"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn parses_json() {
        let config =
            ClientConfig::from_json(r#"{"server":"http://dns.internal","token":"abc"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("http://dns.internal", "abc"));
    }

    #[test]
    fn rejects_json_without_token() {
        let err = ClientConfig::from_json(r#"{"server":"http://dns.internal"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
