//! Health routes module
//!
//! This module contains the root banner and health check route configurations.

use crate::infrastructure::http::handlers::{handle_health_request, handle_root_request};
use warp::Filter;

/// Health routes configuration
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the root and health check endpoint routes
    pub fn create_routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let root = warp::path::end()
            .and(warp::get())
            .and_then(handle_root_request);

        let health = warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .and_then(handle_health_request);

        root.or(health)
    }
}
