//! Route builder module
//!
//! This module contains the main route builder that orchestrates the creation
//! of all application routes.

use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

use crate::application::services::PaymentGateway;
use crate::config::AppConfig;
use crate::infrastructure::http::responses::handle_rejection;
use crate::infrastructure::http::routes::{CallbackRoutes, HealthRoutes, PaymentsRoutes};

/// Route builder that orchestrates the creation of all application routes
pub struct RouteBuilder;

impl RouteBuilder {
    /// Build all application routes
    ///
    /// Route rejections are recovered inside the CORS wrapper so error bodies
    /// carry CORS headers; refusals raised by the wrapper itself are recovered
    /// outside it.
    pub fn build_routes(
        config: Arc<AppConfig>,
        gateway: Arc<PaymentGateway>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
        let cors = Self::cors(&config);

        let health_routes = HealthRoutes::create_routes();
        let payments_routes = PaymentsRoutes::create_routes(config, gateway.clone());
        let callback_route = CallbackRoutes::create_routes(gateway);

        health_routes
            .or(payments_routes)
            .or(callback_route)
            .recover(handle_rejection)
            .with(cors)
            .recover(handle_rejection)
    }

    /// CORS policy from the security section; validated at load time
    fn cors(config: &AppConfig) -> warp::cors::Cors {
        let security = &config.security;
        let builder = warp::cors()
            .allow_methods(security.cors_methods.iter().map(String::as_str))
            .allow_headers(security.cors_headers.iter().map(String::as_str));

        if config.cors_allow_any_origin() {
            builder.allow_any_origin().build()
        } else {
            builder
                .allow_origins(security.cors_origins.iter().map(String::as_str))
                .build()
        }
    }
}
