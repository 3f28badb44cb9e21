//! Application services - Orchestration of domain logic

pub mod payments_service;

pub use payments_service::PaymentGateway;
