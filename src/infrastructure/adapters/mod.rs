//! Infrastructure adapters module
//!
//! This module contains adapters for external services.

pub mod collection_api;

pub use collection_api::{CollectionApi, MomoCollectionClient};
