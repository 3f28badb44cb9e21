//! HTTP infrastructure module
//!
//! This module contains HTTP-related concerns including the server
//! implementation, routes, utilities, responses and handlers.

pub mod handlers;
pub mod responses;
pub mod routes;
pub mod server;
pub mod utils;

pub use handlers::*;
pub use responses::{handle_rejection, ResponseFormatter};
pub use routes::RouteBuilder;
pub use server::HttpServer;
pub use utils::*;
