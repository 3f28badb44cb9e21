//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use crate::shared::error::{AppError, Operation};
use tracing::{error, info, warn};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    ///
    /// `RUST_LOG` takes precedence over `level` when set.
    pub fn initialize(level: &str, format: &str) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let result = if format.eq_ignore_ascii_case("json") {
            tracing::subscriber::set_global_default(builder.json().finish())
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };

        result.map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))
    }

    /// Log an inbound request
    pub fn log_request(method: &str, path: &str) {
        info!(method = %method, path = %path, "Processing request");
    }

    /// Log a failed provider interaction with its payload
    pub fn log_provider_error(operation: Operation, error: &AppError) {
        match error {
            AppError::TokenAcquisition { failure, .. } => error!(
                operation = %operation,
                details = %failure.details(),
                "Error getting access token"
            ),
            AppError::PaymentSubmission(failure)
            | AppError::StatusQuery(failure)
            | AppError::BalanceQuery(failure) => error!(
                operation = %operation,
                details = %failure.details(),
                "Provider call failed"
            ),
            other => error!(operation = %operation, error = %other, "Request failed"),
        }
    }

    /// Log a callback pushed by the provider
    pub fn log_callback(payload: &serde_json::Value) {
        info!(payload = %payload, "MoMo callback received");
    }

    /// Log configuration concerns that do not prevent startup
    pub fn log_config_warning(details: &str) {
        warn!(details = %details, "Configuration warning");
    }
}
