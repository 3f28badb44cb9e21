//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use validator::Validate;

use crate::shared::error::AppError;

/// Prefix for structured environment overrides (`MOMO_GATEWAY__MOMO__API_KEY`)
pub const ENV_PREFIX: &str = "MOMO_GATEWAY";

/// Flat environment variables understood for compatibility with existing deployments
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("MOMO_BASE_URL", "momo.base_url"),
    ("MOMO_COLLECTION_SUBSCRIPTION_KEY", "momo.subscription_key"),
    ("MOMO_COLLECTION_USER_ID", "momo.user_id"),
    ("MOMO_COLLECTION_API_KEY", "momo.api_key"),
    ("CALLBACK_URL", "momo.callback_url"),
    ("PORT", "server.port"),
];

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Maximum request size in bytes
    #[validate(range(min = 1024, max = 10485760))] // 1KB to 10MB
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

/// MoMo Collection API credentials and endpoint settings
///
/// Read-only for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MomoConfig {
    /// Provider base URL, without trailing slash
    #[validate(url)]
    pub base_url: String,

    /// Collection product subscription key (`Ocp-Apim-Subscription-Key`)
    pub subscription_key: String,

    /// API user id used for Basic auth on the token endpoint
    pub user_id: String,

    /// API key paired with `user_id`
    pub api_key: String,

    /// Where the provider should deliver payment callbacks
    #[validate(url)]
    pub callback_url: String,

    /// Value of the `X-Target-Environment` header
    #[validate(length(min = 1))]
    pub target_environment: String,

    /// Per-request timeout; unset leaves the HTTP client default in place
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: Option<u64>,
}

impl Default for MomoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sandbox.momodeveloper.mtn.com".to_string(),
            subscription_key: String::new(),
            user_id: String::new(),
            api_key: String::new(),
            callback_url: "https://your-app.vercel.app/callback".to_string(),
            target_environment: "sandbox".to_string(),
            timeout_seconds: None,
        }
    }
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SecurityConfig {
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,

    /// Allowed CORS methods
    pub cors_methods: Vec<String>,

    /// Allowed CORS headers
    pub cors_headers: Vec<String>,

    /// Enable request logging
    pub enable_request_logging: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec!["*".to_string()],
            cors_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
            cors_headers: vec![
                "Content-Type".to_string(),
                "Authorization".to_string(),
                "Accept".to_string(),
            ],
            enable_request_logging: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format ("text" or "json")
    #[validate(length(min = 1))]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Payment provider configuration
    pub momo: MomoConfig,

    /// Security configuration
    pub security: SecurityConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration, resolving the flat legacy variables through `lookup`
    pub fn load_with<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("Conf").required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        for (env_key, config_key) in LEGACY_ENV_KEYS {
            builder = builder
                .set_override_option(*config_key, lookup(env_key))
                .map_err(|e| AppError::Config(format!("Failed to apply {}: {}", env_key, e)))?;
        }

        let config = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        config.validate_config()?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> crate::Result<()> {
        self.server.validate()?;
        self.momo.validate()?;
        self.security.validate()?;
        self.logging.validate()?;

        super::ConfigValidator::validate_config(self)
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    /// Check if CORS is configured for any origin
    pub fn cors_allow_any_origin(&self) -> bool {
        self.security.cors_origins.iter().any(|origin| origin == "*")
    }
}
