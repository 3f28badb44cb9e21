//! Domain layer - Core models and rules
//!
//! This module contains the request/response shapes exchanged with clients and
//! the provider, independent of HTTP transport concerns.

pub mod health;
pub mod payments;

pub use health::{HealthResponse, ServiceInfo};
pub use payments::{
    AccessToken, AccountBalanceResult, CallbackNotification, FieldValue, Party, PayerInput,
    PaymentReference, PaymentRequest, PaymentStatusResult, PaymentSubmitted, RequestToPayPayload,
};
