use crate::core::{AppError, Result};
use std::env;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub qoyod: QoyodConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
}

/// Qoyod accounting API credentials and endpoint
#[derive(Debug, Clone)]
pub struct QoyodConfig {
    pub api_key: String,
    pub base_url: String,
    /// Request timeout in seconds. Qoyod can take well over a minute to
    /// answer large date-range queries, hence the generous default.
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            },
            server: ServerConfig::from_env()?,
            qoyod: QoyodConfig {
                api_key: env::var("QOYOD_API_KEY")
                    .map_err(|_| AppError::Configuration("QOYOD_API_KEY not set".to_string()))?,
                base_url: env::var("QOYOD_BASE_URL")
                    .unwrap_or_else(|_| "https://api.qoyod.com/2.0".to_string()),
                timeout_secs: env::var("QOYOD_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid QOYOD_TIMEOUT_SECS".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // A real Qoyod key is a long opaque token; anything shorter is a
        // placeholder that would only produce 401s downstream.
        if self.qoyod.api_key.len() <= 10 {
            return Err(AppError::Configuration(
                "QOYOD_API_KEY looks invalid (too short)".to_string(),
            ));
        }

        if self.qoyod.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Qoyod timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
