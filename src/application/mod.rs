//! Application layer - Application services
//!
//! This module contains the services that orchestrate domain logic and the
//! provider adapter for each gateway operation.

pub mod services;

pub use services::*;
