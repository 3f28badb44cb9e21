//! Payments routes

use std::sync::Arc;
use warp::Filter;

use crate::application::services::PaymentGateway;
use crate::config::AppConfig;
use crate::infrastructure::http::handlers::{
    handle_account_balance, handle_payment_status, handle_request_payment,
};
use crate::infrastructure::http::utils::{with_config, with_gateway};

pub struct PaymentsRoutes;

impl PaymentsRoutes {
    pub fn create_routes(
        config: Arc<AppConfig>,
        gateway: Arc<PaymentGateway>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let request_payment = warp::path("api")
            .and(warp::path("request-payment"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(config.server.max_request_size as u64))
            .and(warp::header::optional::<String>("content-type"))
            .and(warp::body::bytes())
            .and(with_gateway(gateway.clone()))
            .and(with_config(config.clone()))
            .and_then(handle_request_payment);

        let payment_status = warp::path("api")
            .and(warp::path("payment-status"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and(with_gateway(gateway.clone()))
            .and(with_config(config.clone()))
            .and_then(handle_payment_status);

        let account_balance = warp::path("api")
            .and(warp::path("account-balance"))
            .and(warp::path::end())
            .and(warp::get())
            .and(with_gateway(gateway))
            .and(with_config(config))
            .and_then(handle_account_balance);

        request_payment.or(payment_status).or(account_balance)
    }
}
