//! Server, reporting and logging configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::warn;

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.workers == Some(0) {
            return Err("Worker count cannot be 0".to_string());
        }

        self.cors.validate()
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.allows_all_origins() {
            if self.allow_credentials {
                return Err(
                    "CORS cannot allow all origins when credentials are enabled".to_string(),
                );
            }
            warn!("CORS allows all origins. This may be insecure for production.");
        }
        Ok(())
    }
}

impl Validate for ReportsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_page_size == 0 {
            return Err("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            return Err(format!(
                "Default page size {} exceeds max page size {}",
                self.default_page_size, self.max_page_size
            ));
        }

        if self.export_limit == 0 {
            return Err("Export limit cannot be 0".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
