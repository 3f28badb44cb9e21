//! HTTP route handlers module
//!
//! This module contains separate route handlers for different endpoint types,
//! organized by functionality.

pub mod callback;
pub mod health;
pub mod payments;

pub use callback::handle_callback;
pub use health::{handle_health_request, handle_root_request};
pub use payments::{handle_account_balance, handle_payment_status, handle_request_payment};
