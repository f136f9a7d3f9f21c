//! Configuration management for shutterbox.
//!
//! Loads configuration from environment variables. The public base URL is
//! intentionally absent: upload URLs are derived from each inbound request's
//! own scheme and host, so clients never depend on a configured address.

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory that stored assets are written to and served from.
    pub uploads_path: String,
    pub max_upload_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "3000").parse().expect("Invalid PORT"),
            },
            storage: StorageConfig {
                uploads_path: env_or("UPLOADS_PATH", "./uploads"),
                max_upload_size: env_or("MAX_UPLOAD_SIZE", "10485760")
                    .parse()
                    .unwrap_or(10 * 1024 * 1024), // 10MB
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
