//! HTTP utilities - Common helper functions
//!
//! Filters that inject shared state into route handlers.

use std::convert::Infallible;
use std::sync::Arc;

use warp::Filter;

use crate::application::services::PaymentGateway;
use crate::config::AppConfig;

/// Helper function to inject the payment gateway into route
pub fn with_gateway(
    gateway: Arc<PaymentGateway>,
) -> impl Filter<Extract = (Arc<PaymentGateway>,), Error = Infallible> + Clone {
    warp::any().map(move || gateway.clone())
}

/// Helper function to inject configuration into route
pub fn with_config(
    config: Arc<AppConfig>,
) -> impl Filter<Extract = (Arc<AppConfig>,), Error = Infallible> + Clone {
    warp::any().map(move || config.clone())
}

/// `application/json`, with or without parameters
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
