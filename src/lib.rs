//! MoMo Payments Gateway - A thin HTTP facade over the MTN MoMo Collection API
//!
//! This library exposes a small JSON API for initiating request-to-pay
//! collections, querying their status and reading the collection account
//! balance. Every provider call is preceded by a fresh token acquisition.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

#[cfg(test)]
mod tests;

pub use application::services::PaymentGateway;
pub use config::AppConfig;
pub use infrastructure::http::HttpServer;
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
