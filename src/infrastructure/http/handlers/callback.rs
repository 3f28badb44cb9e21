//! Provider callback handler

use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;
use warp::Reply;

use crate::application::services::PaymentGateway;
use crate::domain::payments::CallbackNotification;
use crate::infrastructure::http::responses::ResponseFormatter;

/// Accept any callback body and acknowledge it
pub async fn handle_callback(
    body: Bytes,
    gateway: Arc<PaymentGateway>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let notification = CallbackNotification::from_body(&body);
    gateway.receive_callback(&notification);

    Ok(ResponseFormatter::success(&json!({ "message": "Callback received successfully" })))
}
