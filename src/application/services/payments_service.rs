//! Payment gateway service: token acquisition followed by one provider call per operation

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::domain::payments::{
    AccessToken, AccountBalanceResult, CallbackNotification, PaymentReference, PaymentRequest,
    PaymentStatusResult, PaymentSubmitted, RequestToPayPayload,
};
use crate::infrastructure::adapters::CollectionApi;
use crate::shared::error::{AppError, AppResult, Operation};
use crate::shared::logging::LoggingUtils;

/// Stateless facade over the Collection API
///
/// Every domain call is preceded by its own token acquisition; tokens are
/// never cached or shared between invocations.
pub struct PaymentGateway {
    api: Arc<dyn CollectionApi>,
}

impl PaymentGateway {
    pub fn new(api: Arc<dyn CollectionApi>) -> Self {
        Self { api }
    }

    /// Fetch a fresh access token for `operation`
    pub async fn acquire_access_token(&self, operation: Operation) -> AppResult<AccessToken> {
        self.api
            .request_token()
            .await
            .map_err(|failure| AppError::TokenAcquisition { operation, failure })
    }

    /// Validate, shape and submit a request-to-pay
    ///
    /// The provider's acknowledgment body is not surfaced; callers get the
    /// locally generated reference and must keep it for status queries.
    #[instrument(skip(self, request))]
    pub async fn initiate_payment(&self, request: PaymentRequest) -> AppResult<PaymentSubmitted> {
        // Validation happens before any provider traffic
        let payload = request.to_provider_payload()?;

        let reference = self
            .submit_request_to_pay(&payload)
            .await
            .inspect_err(|e| LoggingUtils::log_provider_error(Operation::RequestToPay, e))?;

        info!(reference_id = %reference, external_id = %payload.external_id, "Payment request submitted");
        Ok(PaymentSubmitted::new(reference))
    }

    async fn submit_request_to_pay(&self, payload: &RequestToPayPayload) -> AppResult<PaymentReference> {
        let token = self.acquire_access_token(Operation::RequestToPay).await?;
        let reference = PaymentReference::generate();

        self.api
            .request_to_pay(&token, &reference, payload)
            .await
            .map_err(AppError::PaymentSubmission)?;

        Ok(reference)
    }

    /// Query the provider for the status of `reference_id`
    #[instrument(skip(self))]
    pub async fn get_payment_status(&self, reference_id: &str) -> AppResult<PaymentStatusResult> {
        self.fetch_payment_status(reference_id)
            .await
            .map(PaymentStatusResult::from_provider)
            .inspect_err(|e| LoggingUtils::log_provider_error(Operation::PaymentStatus, e))
    }

    async fn fetch_payment_status(&self, reference_id: &str) -> AppResult<Value> {
        let token = self.acquire_access_token(Operation::PaymentStatus).await?;
        self.api
            .get_request_to_pay(&token, reference_id)
            .await
            .map_err(AppError::StatusQuery)
    }

    /// Query the provider for the collection account balance
    #[instrument(skip(self))]
    pub async fn get_account_balance(&self) -> AppResult<AccountBalanceResult> {
        self.fetch_account_balance()
            .await
            .map(AccountBalanceResult::from_provider)
            .inspect_err(|e| LoggingUtils::log_provider_error(Operation::AccountBalance, e))
    }

    async fn fetch_account_balance(&self) -> AppResult<Value> {
        let token = self.acquire_access_token(Operation::AccountBalance).await?;
        self.api
            .get_account_balance(&token)
            .await
            .map_err(AppError::BalanceQuery)
    }

    /// Record a provider callback; accepts anything
    ///
    /// The payload is neither verified nor correlated with a reference.
    pub fn receive_callback(&self, notification: &CallbackNotification) {
        LoggingUtils::log_callback(&notification.to_value());
    }
}
