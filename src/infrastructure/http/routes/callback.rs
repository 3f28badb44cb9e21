//! Provider callback route
//!
//! The body is read as raw bytes without a length requirement so that empty,
//! chunked or malformed deliveries are still acknowledged.

use std::sync::Arc;
use warp::Filter;

use crate::application::services::PaymentGateway;
use crate::infrastructure::http::handlers::handle_callback;
use crate::infrastructure::http::utils::with_gateway;

pub struct CallbackRoutes;

impl CallbackRoutes {
    pub fn create_routes(
        gateway: Arc<PaymentGateway>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("callback")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::bytes())
            .and(with_gateway(gateway))
            .and_then(handle_callback)
    }
}
