use anyhow::{Context, Result};
use std::env;

use crate::errors::FormatPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub instance_id: String,
}

/// Settings consumed by the API surface itself
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Advertise and serve the v1 API
    pub enable_v1_api: bool,
    /// Externally visible base URL used in self-links instead of the request host
    pub public_endpoint: Option<String>,
    /// How error message templates that fail to render are handled
    pub format_policy: FormatPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_v1_api: true,
            public_endpoint: None,
            format_policy: FormatPolicy::Lenient,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "9292".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
                // Used only for debugging/observability. If unset, fall back to HOSTNAME if
                // present (e.g. Docker/Kubernetes), otherwise "unknown".
                instance_id: env::var("INSTANCE_ID")
                    .or_else(|_| env::var("HOSTNAME"))
                    .unwrap_or_else(|_| "unknown".to_string()),
            },
            api: ApiConfig {
                enable_v1_api: env::var("ENABLE_V1_API")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .context("ENABLE_V1_API must be true or false")?,
                public_endpoint: env::var("PUBLIC_ENDPOINT")
                    .ok()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty()),
                format_policy: FormatPolicy::from_fatal_flag(
                    env::var("FATAL_EXCEPTION_FORMAT_ERRORS")
                        .unwrap_or_else(|_| "false".to_string())
                        .parse()
                        .context("FATAL_EXCEPTION_FORMAT_ERRORS must be true or false")?,
                ),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9292,
                instance_id: "test-instance".to_string(),
            },
            api: ApiConfig::default(),
        };

        assert_eq!(config.server_address(), "127.0.0.1:9292");
    }

    #[test]
    fn test_api_defaults() {
        let api = ApiConfig::default();
        assert!(api.enable_v1_api);
        assert!(api.public_endpoint.is_none());
        assert_eq!(api.format_policy, FormatPolicy::Lenient);
    }
}
