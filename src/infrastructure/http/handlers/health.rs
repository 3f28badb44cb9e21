//! Health check handler module
//!
//! Liveness endpoints; neither touches the provider.

use warp::Reply;

use crate::domain::health::{HealthResponse, ServiceInfo};
use crate::infrastructure::http::responses::ResponseFormatter;

/// Handle root requests
pub async fn handle_root_request() -> Result<impl Reply, warp::reject::Rejection> {
    Ok(ResponseFormatter::success(&ServiceInfo::default()))
}

/// Handle health check requests
pub async fn handle_health_request() -> Result<impl Reply, warp::reject::Rejection> {
    Ok(ResponseFormatter::success(&HealthResponse::healthy()))
}
