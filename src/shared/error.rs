//! Error handling module
//!
//! This module provides centralized error handling for the gateway: the error
//! taxonomy, the failure shape reported by the provider adapter, and the
//! mapping of both onto HTTP status codes and response bodies.

use serde_json::{json, Value};
use thiserror::Error;

/// Message returned to clients when a payment request lacks required fields
pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: amount, currency, externalId, payer.partyId";

/// Details returned to clients when the token step fails
pub const TOKEN_FAILURE_DETAILS: &str = "Failed to get access token";

/// Provider call a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RequestToPay,
    PaymentStatus,
    AccountBalance,
}

impl Operation {
    /// Client-facing label used in the `error` field of failure responses
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::RequestToPay => "Payment request failed",
            Operation::PaymentStatus => "Failed to check payment status",
            Operation::AccountBalance => "Failed to get account balance",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::RequestToPay => write!(f, "request_to_pay"),
            Operation::PaymentStatus => write!(f, "payment_status"),
            Operation::AccountBalance => write!(f, "account_balance"),
        }
    }
}

/// Failure reported by the provider adapter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderFailure {
    /// The provider answered with a non-success status
    #[error("provider responded with HTTP {status}: {body}")]
    Response { status: u16, body: Value },

    /// The call never produced a usable response
    #[error("transport error: {0}")]
    Transport(String),

    /// A success status whose body could not be used
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderFailure {
    /// Provider payload when present, otherwise the transport message
    pub fn details(&self) -> Value {
        match self {
            ProviderFailure::Response { body, .. } => body.clone(),
            ProviderFailure::Transport(message) | ProviderFailure::InvalidResponse(message) => {
                Value::String(message.clone())
            }
        }
    }
}

impl From<reqwest::Error> for ProviderFailure {
    fn from(err: reqwest::Error) -> Self {
        ProviderFailure::Transport(err.to_string())
    }
}

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Token acquisition failed for {operation}: {failure}")]
    TokenAcquisition {
        operation: Operation,
        failure: ProviderFailure,
    },

    #[error("Payment submission failed: {0}")]
    PaymentSubmission(ProviderFailure),

    #[error("Status query failed: {0}")]
    StatusQuery(ProviderFailure),

    #[error("Balance query failed: {0}")]
    BalanceQuery(ProviderFailure),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Route not found")]
    RouteNotFound,

    #[error("CORS request forbidden: {0}")]
    CorsForbidden(String),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> warp::http::StatusCode {
        match self {
            AppError::Validation(_) => warp::http::StatusCode::BAD_REQUEST,
            AppError::RouteNotFound => warp::http::StatusCode::NOT_FOUND,
            AppError::CorsForbidden(_) => warp::http::StatusCode::FORBIDDEN,
            _ => warp::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body of the error response sent to the client
    ///
    /// Internal and configuration faults never leak their detail.
    pub fn to_response_body(&self) -> Value {
        match self {
            AppError::Validation(message) => json!({ "error": message }),
            AppError::TokenAcquisition { operation, .. } => json!({
                "error": operation.failure_message(),
                "details": TOKEN_FAILURE_DETAILS,
            }),
            AppError::PaymentSubmission(failure) => json!({
                "error": Operation::RequestToPay.failure_message(),
                "details": failure.details(),
            }),
            AppError::StatusQuery(failure) => json!({
                "error": Operation::PaymentStatus.failure_message(),
                "details": failure.details(),
            }),
            AppError::BalanceQuery(failure) => json!({
                "error": Operation::AccountBalance.failure_message(),
                "details": failure.details(),
            }),
            AppError::RouteNotFound => json!({ "error": "Route not found" }),
            AppError::CorsForbidden(_) => json!({ "error": "CORS request forbidden" }),
            AppError::Config(_) | AppError::Internal(_) => {
                json!({ "error": "Something went wrong!" })
            }
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

// Implement warp::reject::Reject for AppError
impl warp::reject::Reject for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Configuration validation failed: {}", err))
    }
}
