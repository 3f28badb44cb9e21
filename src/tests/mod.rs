//! Test suite for the MoMo payments gateway
//!
//! This module provides:
//! - A recording mock of the Collection API and request fixtures
//! - Route-level integration tests driven through `warp::test`

pub mod integration;

/// Test configuration and utilities
pub mod config {
    use crate::config::AppConfig;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test environment
    pub fn init() {
        INIT.call_once(|| {
            // Initialize tracing for tests
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }

    /// Create test configuration
    pub fn test_config() -> AppConfig {
        let mut config = AppConfig::default();

        // Configure for testing
        config.server.bind_address = "127.0.0.1".parse().unwrap();
        config.momo.base_url = "http://127.0.0.1:9".to_string();
        config.momo.subscription_key = "test-subscription-key".to_string();
        config.momo.user_id = "test-user".to_string();
        config.momo.api_key = "test-api-key".to_string();

        config
    }
}

/// Test result types
pub type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_initialization() {
        config::init();
        let test_config = config::test_config();
        assert_eq!(test_config.server_address(), "127.0.0.1:3000");
        assert!(test_config.validate_config().is_ok());
    }
}
