//! HTTP routes module
//!
//! This module contains all HTTP route configurations.

pub mod builder;
pub mod callback;
pub mod health;
pub mod payments;

// Re-export commonly used types
pub use builder::RouteBuilder;
pub use callback::CallbackRoutes;
pub use health::HealthRoutes;
pub use payments::PaymentsRoutes;
