//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::app_config::{MomoConfig, SecurityConfig};
use crate::config::AppConfig;
use crate::shared::error::AppError;
use crate::shared::logging::LoggingUtils;

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_base_url(&config.momo.base_url)?;
        Self::validate_security_config(&config.security)?;

        Ok(())
    }

    /// Log concerns that do not block startup; call once logging is initialized
    pub fn log_startup_warnings(config: &AppConfig) {
        for warning in Self::credential_warnings(&config.momo) {
            LoggingUtils::log_config_warning(&warning);
        }
    }

    /// Validate the provider base URL
    fn validate_base_url(url: &str) -> crate::Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::Config(
                "MoMo base URL must start with http:// or https://".to_string(),
            ));
        }

        if url.ends_with('/') {
            return Err(AppError::Config(
                "MoMo base URL must not end with a slash".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate security configuration
    fn validate_security_config(security: &SecurityConfig) -> crate::Result<()> {
        for method in &security.cors_methods {
            if method.parse::<warp::http::Method>().is_err() {
                return Err(AppError::Config(format!("Invalid CORS method: {}", method)));
            }
        }

        for header in &security.cors_headers {
            if warp::http::header::HeaderName::from_bytes(header.as_bytes()).is_err() {
                return Err(AppError::Config(format!("Invalid CORS header: {:?}", header)));
            }
        }

        for origin in &security.cors_origins {
            if origin != "*" && !Self::is_valid_origin(origin) {
                return Err(AppError::Config(format!("Invalid CORS origin: {}", origin)));
            }
        }

        Ok(())
    }

    /// Origins are scheme plus host (and optional port), without a path
    fn is_valid_origin(origin: &str) -> bool {
        let host = match origin
            .strip_prefix("https://")
            .or_else(|| origin.strip_prefix("http://"))
        {
            Some(host) => host,
            None => return false,
        };

        !host.is_empty() && !host.contains('/') && origin.parse::<warp::http::HeaderValue>().is_ok()
    }

    /// Missing credentials let the server start; token requests will fail until they are set
    pub fn credential_warnings(momo: &MomoConfig) -> Vec<String> {
        let mut warnings = Vec::new();

        if momo.subscription_key.trim().is_empty() {
            warnings.push("MoMo collection subscription key is not set".to_string());
        }
        if momo.user_id.trim().is_empty() {
            warnings.push("MoMo collection user id is not set".to_string());
        }
        if momo.api_key.trim().is_empty() {
            warnings.push("MoMo collection API key is not set".to_string());
        }

        warnings
    }
}
