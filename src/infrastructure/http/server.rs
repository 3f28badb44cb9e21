//! HTTP server implementation
//!
//! This module wires configuration, the Collection API client and the payment
//! gateway into the warp route tree and serves it.

use crate::{
    application::services::PaymentGateway,
    config::AppConfig,
    infrastructure::{adapters::MomoCollectionClient, http::routes::RouteBuilder},
    shared::error::{AppError, AppResult},
};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, instrument};
use warp::{Filter, Reply};

/// HTTP server for the payments gateway
pub struct HttpServer {
    config: Arc<AppConfig>,
    gateway: Arc<PaymentGateway>,
}

impl HttpServer {
    /// Create a new HTTP server backed by the live Collection API client
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let config = Arc::new(config);

        // Initialize infrastructure layer
        let client = Arc::new(MomoCollectionClient::new(config.clone())?);

        // Initialize application layer
        let gateway = Arc::new(PaymentGateway::new(client));

        Ok(Self { config, gateway })
    }

    /// Create a server around an existing gateway
    pub fn with_gateway(config: Arc<AppConfig>, gateway: Arc<PaymentGateway>) -> Self {
        Self { config, gateway }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Create the application routes
    pub fn routes(&self) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
        RouteBuilder::build_routes(self.config.clone(), self.gateway.clone())
    }

    /// Run the HTTP server until the process is stopped
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr = self.config.server_address();
        let addr: std::net::SocketAddr = addr
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        let routes = self.routes();

        info!(
            %addr,
            target_environment = %self.config.momo.target_environment,
            "Server running"
        );
        warp::serve(routes).run(addr).await;

        Ok(())
    }
}
