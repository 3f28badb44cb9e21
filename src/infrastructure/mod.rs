//! Infrastructure layer - External concerns and adapters
//!
//! This module contains the provider adapter and HTTP handling.

pub mod adapters;
pub mod http;

pub use adapters::{CollectionApi, MomoCollectionClient};
