//! Payments HTTP handlers

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, warn};
use warp::Reply;

use crate::application::services::PaymentGateway;
use crate::config::AppConfig;
use crate::domain::payments::PaymentRequest;
use crate::infrastructure::http::responses::ResponseFormatter;
use crate::infrastructure::http::utils::is_json_content_type;
use crate::shared::error::AppError;
use crate::shared::logging::LoggingUtils;

/// Bodies without a JSON content type are treated as empty requests
pub async fn handle_request_payment(
    content_type: Option<String>,
    body: Bytes,
    gateway: Arc<PaymentGateway>,
    config: Arc<AppConfig>,
) -> Result<impl Reply, warp::reject::Rejection> {
    if config.security.enable_request_logging {
        LoggingUtils::log_request("POST", "/api/request-payment");
    }

    let request = if is_json_content_type(content_type.as_deref()) {
        PaymentRequest::from_json_slice(&body)
    } else {
        Ok(PaymentRequest::default())
    };

    let result = match request {
        Ok(request) => gateway.initiate_payment(request).await,
        Err(e) => Err(e),
    };
    match &result {
        Err(AppError::Validation(message)) => warn!(error = %message, "Payment request rejected"),
        Err(AppError::Internal(message)) => error!(error = %message, "Payment request body unusable"),
        _ => {}
    }

    Ok(ResponseFormatter::from_result(&result))
}

pub async fn handle_payment_status(
    reference_id: String,
    gateway: Arc<PaymentGateway>,
    config: Arc<AppConfig>,
) -> Result<impl Reply, warp::reject::Rejection> {
    if config.security.enable_request_logging {
        LoggingUtils::log_request("GET", "/api/payment-status");
    }

    let result = gateway.get_payment_status(&reference_id).await;
    Ok(ResponseFormatter::from_result(&result))
}

pub async fn handle_account_balance(
    gateway: Arc<PaymentGateway>,
    config: Arc<AppConfig>,
) -> Result<impl Reply, warp::reject::Rejection> {
    if config.security.enable_request_logging {
        LoggingUtils::log_request("GET", "/api/account-balance");
    }

    let result = gateway.get_account_balance().await;
    Ok(ResponseFormatter::from_result(&result))
}
