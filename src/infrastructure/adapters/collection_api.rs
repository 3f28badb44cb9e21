//! MoMo Collection API adapter
//!
//! This adapter handles HTTP communication with the provider's Collection API:
//! token acquisition with Basic auth and the bearer-authenticated
//! request-to-pay, status and balance calls. It performs no retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Request, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::domain::payments::{AccessToken, PaymentReference, RequestToPayPayload};
use crate::shared::error::{AppError, AppResult, ProviderFailure};

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const REFERENCE_ID_HEADER: &str = "X-Reference-Id";
pub const TARGET_ENVIRONMENT_HEADER: &str = "X-Target-Environment";

const TOKEN_PATH: &str = "/collection/token/";
const REQUEST_TO_PAY_PATH: &str = "/collection/v1_0/requesttopay";
const BALANCE_PATH: &str = "/collection/v1_0/account/balance";

/// Calls the gateway makes against the provider
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// Obtain a fresh bearer token
    async fn request_token(&self) -> Result<AccessToken, ProviderFailure>;

    /// Submit a request-to-pay; the provider's acknowledgment body is not returned
    async fn request_to_pay(
        &self,
        token: &AccessToken,
        reference: &PaymentReference,
        payload: &RequestToPayPayload,
    ) -> Result<(), ProviderFailure>;

    /// Fetch the status payload of a previous request-to-pay
    async fn get_request_to_pay(
        &self,
        token: &AccessToken,
        reference_id: &str,
    ) -> Result<Value, ProviderFailure>;

    /// Fetch the collection account balance
    async fn get_account_balance(&self, token: &AccessToken) -> Result<Value, ProviderFailure>;
}

/// reqwest-backed Collection API client
pub struct MomoCollectionClient {
    config: Arc<AppConfig>,
    client: Client,
}

impl MomoCollectionClient {
    /// Create a new client from configuration
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.momo.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.momo.base_url, path)
    }

    /// Token request: Basic auth plus subscription key
    pub fn token_request(&self) -> reqwest::Result<Request> {
        let momo = &self.config.momo;
        self.client
            .post(self.url(TOKEN_PATH))
            .basic_auth(&momo.user_id, Some(&momo.api_key))
            .header(SUBSCRIPTION_KEY_HEADER, &momo.subscription_key)
            .json(&serde_json::json!({}))
            .build()
    }

    fn authorized(&self, method: Method, path: &str, token: &AccessToken) -> RequestBuilder {
        let momo = &self.config.momo;
        self.client
            .request(method, self.url(path))
            .bearer_auth(token.as_str())
            .header(TARGET_ENVIRONMENT_HEADER, &momo.target_environment)
            .header(SUBSCRIPTION_KEY_HEADER, &momo.subscription_key)
    }

    pub fn request_to_pay_request(
        &self,
        token: &AccessToken,
        reference: &PaymentReference,
        payload: &RequestToPayPayload,
    ) -> reqwest::Result<Request> {
        self.authorized(Method::POST, REQUEST_TO_PAY_PATH, token)
            .header(REFERENCE_ID_HEADER, reference.as_str())
            .json(payload)
            .build()
    }

    pub fn status_request(&self, token: &AccessToken, reference_id: &str) -> reqwest::Result<Request> {
        let path = format!("{}/{}", REQUEST_TO_PAY_PATH, reference_id);
        self.authorized(Method::GET, &path, token).build()
    }

    pub fn balance_request(&self, token: &AccessToken) -> reqwest::Result<Request> {
        self.authorized(Method::GET, BALANCE_PATH, token).build()
    }

    /// Execute a request; non-success statuses become `ProviderFailure::Response`
    async fn send(&self, request: Request) -> Result<Response, ProviderFailure> {
        debug!(method = %request.method(), url = %request.url(), "Calling MoMo API");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!(status = %status, error = %e, "Failed to read provider error body");
                String::new()
            }
        };
        Err(ProviderFailure::Response {
            status: status.as_u16(),
            body: error_body(status.as_u16(), &text),
        })
    }

    async fn send_for_json(&self, request: Request) -> Result<Value, ProviderFailure> {
        let response = self.send(request).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ProviderFailure::InvalidResponse(format!("Provider returned invalid JSON: {}", e))
        })
    }
}

/// Provider error payload as JSON; plain text is kept as a string, an empty body
/// is replaced by a status message
pub fn error_body(status: u16, text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::String(format!("Request failed with status code {}", status));
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl CollectionApi for MomoCollectionClient {
    async fn request_token(&self) -> Result<AccessToken, ProviderFailure> {
        let body = self.send_for_json(self.token_request()?).await?;

        body.get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(AccessToken::new)
            .ok_or_else(|| {
                ProviderFailure::InvalidResponse(
                    "Token response did not contain access_token".to_string(),
                )
            })
    }

    async fn request_to_pay(
        &self,
        token: &AccessToken,
        reference: &PaymentReference,
        payload: &RequestToPayPayload,
    ) -> Result<(), ProviderFailure> {
        let request = self.request_to_pay_request(token, reference, payload)?;
        let response = self.send(request).await?;

        // Drain the acknowledgment so the call completes before we answer the client
        let status = response.status();
        let _ = response.bytes().await?;
        info!(reference_id = %reference, status = %status, "Request to pay accepted by provider");

        Ok(())
    }

    async fn get_request_to_pay(
        &self,
        token: &AccessToken,
        reference_id: &str,
    ) -> Result<Value, ProviderFailure> {
        self.send_for_json(self.status_request(token, reference_id)?).await
    }

    async fn get_account_balance(&self, token: &AccessToken) -> Result<Value, ProviderFailure> {
        self.send_for_json(self.balance_request(token)?).await
    }
}
