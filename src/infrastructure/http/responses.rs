//! HTTP responses module
//!
//! This module contains HTTP response formatting and the rejection handler
//! that turns every unmatched or failed request into the gateway's JSON error shape.

use std::convert::Infallible;

use serde::Serialize;
use tracing::{error, warn};
use warp::cors::CorsForbidden;
use warp::http::StatusCode;
use warp::reject::{LengthRequired, MethodNotAllowed, PayloadTooLarge};
use warp::reply::{Json, WithStatus};
use warp::{Rejection, Reply};

use crate::shared::error::AppError;

/// Response formatter for HTTP responses
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Format a successful JSON response
    pub fn success<T: Serialize>(body: &T) -> WithStatus<Json> {
        warp::reply::with_status(warp::reply::json(body), StatusCode::OK)
    }

    /// Format an application error with its status code
    pub fn from_app_error(error: &AppError) -> WithStatus<Json> {
        warp::reply::with_status(
            warp::reply::json(&error.to_response_body()),
            error.http_status_code(),
        )
    }

    /// Format either outcome of a gateway operation
    pub fn from_result<T: Serialize>(result: &Result<T, AppError>) -> WithStatus<Json> {
        match result {
            Ok(body) => Self::success(body),
            Err(e) => Self::from_app_error(e),
        }
    }
}

/// Classify a rejection into the application error taxonomy
///
/// Specific rejections are checked before the not-found family because a
/// combined rejection carries the causes from every route branch.
pub fn classify_rejection(err: &Rejection) -> AppError {
    if let Some(app_error) = err.find::<AppError>() {
        return app_error.clone();
    }

    // Body framing failures are unhandled faults, not missing fields
    if err.find::<LengthRequired>().is_some() {
        warn!("Request body sent without a content length");
        return AppError::Internal("Request body has no content length".to_string());
    }

    if err.find::<PayloadTooLarge>().is_some() {
        warn!("Request body exceeds the configured limit");
        return AppError::Internal("Request body too large".to_string());
    }

    if let Some(e) = err.find::<CorsForbidden>() {
        warn!(error = %e, "Cross-origin request refused");
        return AppError::CorsForbidden(e.to_string());
    }

    if err.is_not_found() || err.find::<MethodNotAllowed>().is_some() {
        return AppError::RouteNotFound;
    }

    error!(rejection = ?err, "Unhandled rejection");
    AppError::Internal(format!("{:?}", err))
}

/// Recover handler installed on the full route tree
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    Ok(ResponseFormatter::from_app_error(&classify_rejection(&err)))
}
