//! Main gateway configuration

#![allow(missing_docs)]

use super::*;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Reporting configuration
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Build a configuration from `GATEWAY_*` environment variables,
    /// falling back to defaults for anything unset
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = env::var("GATEWAY_HOST") {
            config.server.host = host;
        }
        if let Some(port) = parse_env::<u16>("GATEWAY_PORT")? {
            config.server.port = port;
        }
        if let Ok(secret) = env::var("GATEWAY_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Some(ttl) = parse_env::<u64>("GATEWAY_ACCESS_TOKEN_TTL")? {
            config.auth.access_token_ttl = ttl;
        }
        if let Some(ttl) = parse_env::<u64>("GATEWAY_REFRESH_TOKEN_TTL")? {
            config.auth.refresh_token_ttl = ttl;
        }
        if let Some(development) = parse_env::<bool>("GATEWAY_DEVELOPMENT")? {
            config.auth.rbac.development_mode = development;
        }
        if let (Ok(email), Ok(password)) = (
            env::var("GATEWAY_ADMIN_EMAIL"),
            env::var("GATEWAY_ADMIN_PASSWORD"),
        ) {
            config.auth.rbac.bootstrap_admin = Some(BootstrapAdmin {
                email,
                password,
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
            });
        }
        if let Ok(path) = env::var("GATEWAY_REPORTS_FILE") {
            config.reports.data_file = Some(path.into());
        }
        if let Ok(level) = env::var("GATEWAY_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(json) = parse_env::<bool>("GATEWAY_LOG_JSON")? {
            config.logging.json = json;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.auth = self.auth.merge(other.auth);
        self.reports = self.reports.merge(other.reports);
        self.logging = self.logging.merge(other.logging);
        self
    }
}

fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| GatewayError::config(format!("Invalid value for {}: {}", key, raw))),
        Err(_) => Ok(None),
    }
}
