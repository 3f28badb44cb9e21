//! Integration tests for the payments gateway
//!
//! These tests drive the full route tree (recovery and CORS included) through
//! `warp::test`, with the Collection API replaced by a recording mock.

use crate::{
    shared::error::ProviderFailure,
    tests::{
        common::{fixtures, test_server, MockCollectionApi, ProviderCall},
        config,
        TestResult,
    },
};
use serde_json::{json, Value};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::test::request;

/// Integration test utilities
pub mod utils {
    use super::*;

    /// Send a request through a fresh route tree backed by `api`
    pub async fn send(
        api: Arc<MockCollectionApi>,
        builder: warp::test::RequestBuilder,
    ) -> TestResult<(StatusCode, Value)> {
        config::init();
        let server = test_server(config::test_config(), api);
        let routes = server.routes();

        let response = builder.reply(&routes).await;
        let status = response.status();
        let body: Value = serde_json::from_slice(response.body())?;

        Ok((status, body))
    }

    /// POST a JSON payment request
    pub async fn send_payment_request(
        api: Arc<MockCollectionApi>,
        body: &Value,
    ) -> TestResult<(StatusCode, Value)> {
        send(
            api,
            request().method("POST").path("/api/request-payment").json(body),
        )
        .await
    }

    /// GET a path
    pub async fn get(api: Arc<MockCollectionApi>, path: &str) -> TestResult<(StatusCode, Value)> {
        send(api, request().method("GET").path(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_payment_success() {
        let api = Arc::new(MockCollectionApi::new());
        let (status, body) =
            utils::send_payment_request(api.clone(), &fixtures::sandbox_payment_request())
                .await
                .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Payment request submitted successfully");

        let reference_id = body["referenceId"].as_str().unwrap();
        let parsed = uuid::Uuid::parse_str(reference_id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);

        let calls = api.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ProviderCall::Token);
        match &calls[1] {
            ProviderCall::RequestToPay { token, reference_id: sent, payload } => {
                assert_eq!(token, MockCollectionApi::TOKEN);
                assert_eq!(sent, reference_id);
                assert_eq!(payload.amount, "500");
                assert_eq!(payload.external_id, "order-123");
                assert_eq!(payload.payer.party_id, "46733123450");
                assert_eq!(payload.payer_message, "Pay for order");
                assert_eq!(payload.payee_note, "Thanks");
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_payment_applies_defaults() {
        let api = Arc::new(MockCollectionApi::new());
        let (status, _) =
            utils::send_payment_request(api.clone(), &fixtures::minimal_payment_request())
                .await
                .unwrap();
        assert_eq!(status, StatusCode::OK);

        match &api.calls().await[1] {
            ProviderCall::RequestToPay { payload, .. } => {
                assert_eq!(payload.amount, "100");
                assert_eq!(payload.currency, "EUR");
                assert_eq!(payload.payer.party_id_type, "MSISDN");
                assert_eq!(payload.payer_message, "Payment request");
                assert_eq!(payload.payee_note, "Payment from your app");
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_payment_missing_fields() {
        let api = Arc::new(MockCollectionApi::new());
        let body = json!({ "amount": "500", "currency": "EUR", "payer": { "partyId": "46733123450" } });

        let (status, response) = utils::send_payment_request(api.clone(), &body).await.unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response,
            json!({ "error": "Missing required fields: amount, currency, externalId, payer.partyId" })
        );
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_request_payment_zero_amount_is_missing() {
        let api = Arc::new(MockCollectionApi::new());
        let mut body = fixtures::sandbox_payment_request();
        body["amount"] = json!(0);

        let (status, _) = utils::send_payment_request(api.clone(), &body).await.unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_request_payment_malformed_json_is_unhandled() {
        let api = Arc::new(MockCollectionApi::new());
        let builder = request()
            .method("POST")
            .path("/api/request-payment")
            .header("content-type", "application/json")
            .body("{not json");

        let (status, body) = utils::send(api.clone(), builder).await.unwrap();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Something went wrong!" }));
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_request_payment_oversized_body_is_unhandled() {
        let api = Arc::new(MockCollectionApi::new());
        let mut test_config = config::test_config();
        test_config.server.max_request_size = 1024;
        let server = test_server(test_config, api.clone());
        let routes = server.routes();

        let oversized = json!({ "amount": "500", "payeeNote": "x".repeat(2048) });
        let response = request()
            .method("POST")
            .path("/api/request-payment")
            .json(&oversized)
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, json!({ "error": "Something went wrong!" }));
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_request_payment_empty_or_non_json_body_is_missing_fields() {
        for builder in [
            request()
                .method("POST")
                .path("/api/request-payment")
                .header("content-type", "application/json")
                .body(""),
            request()
                .method("POST")
                .path("/api/request-payment")
                .header("content-type", "text/plain")
                .body(r#"{"amount":"500"}"#),
        ] {
            let api = Arc::new(MockCollectionApi::new());
            let (status, body) = utils::send(api.clone(), builder).await.unwrap();

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body["error"],
                "Missing required fields: amount, currency, externalId, payer.partyId"
            );
            assert!(api.calls().await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_request_payment_numeric_identifiers() {
        let api = Arc::new(MockCollectionApi::new());
        let body = json!({
            "amount": 500.0,
            "currency": "EUR",
            "externalId": 12345,
            "payer": { "partyId": 46733123450u64 }
        });

        let (status, _) = utils::send_payment_request(api.clone(), &body).await.unwrap();
        assert_eq!(status, StatusCode::OK);

        match &api.calls().await[1] {
            ProviderCall::RequestToPay { payload, .. } => {
                assert_eq!(payload.amount, "500");
                assert_eq!(payload.external_id, "12345");
                assert_eq!(payload.payer.party_id, "46733123450");
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_identical_requests_get_distinct_references() {
        let api = Arc::new(MockCollectionApi::new());
        let body = fixtures::sandbox_payment_request();

        let (_, first) = utils::send_payment_request(api.clone(), &body).await.unwrap();
        let (_, second) = utils::send_payment_request(api.clone(), &body).await.unwrap();

        let first = first["referenceId"].as_str().unwrap().to_string();
        let second = second["referenceId"].as_str().unwrap().to_string();
        assert!(uuid::Uuid::parse_str(&first).is_ok());
        assert!(uuid::Uuid::parse_str(&second).is_ok());
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_request_payment_token_failure() {
        let api = Arc::new(MockCollectionApi::new().with_token_failure(ProviderFailure::Response {
            status: 401,
            body: json!({ "error": "invalid_client" }),
        }));

        let (status, body) =
            utils::send_payment_request(api.clone(), &fixtures::sandbox_payment_request())
                .await
                .unwrap();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "Payment request failed", "details": "Failed to get access token" })
        );
        assert_eq!(api.calls().await, vec![ProviderCall::Token]);
    }

    #[tokio::test]
    async fn test_request_payment_provider_rejection_forwarded() {
        let provider_body = json!({ "code": "PAYER_NOT_FOUND", "message": "Payer not found" });
        let api = Arc::new(MockCollectionApi::new().with_domain_failure(ProviderFailure::Response {
            status: 404,
            body: provider_body.clone(),
        }));

        let (status, body) =
            utils::send_payment_request(api, &fixtures::sandbox_payment_request())
                .await
                .unwrap();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Payment request failed");
        assert_eq!(body["details"], provider_body);
    }

    #[tokio::test]
    async fn test_payment_status_passthrough() {
        let data = json!({
            "amount": "500",
            "currency": "EUR",
            "externalId": "order-123",
            "status": "SUCCESSFUL"
        });
        let api = Arc::new(MockCollectionApi::new().with_status(data.clone()));

        let (status, body) = utils::get(api.clone(), "/api/payment-status/abc-123").await.unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "status": "SUCCESSFUL", "data": data }));
        assert_eq!(
            api.calls().await[1],
            ProviderCall::Status {
                token: MockCollectionApi::TOKEN.to_string(),
                reference_id: "abc-123".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_payment_status_without_status_field() {
        let api = Arc::new(MockCollectionApi::new().with_status(json!({ "amount": "1" })));

        let (status, body) = utils::get(api, "/api/payment-status/ref").await.unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(body["status"].is_null());
    }

    #[tokio::test]
    async fn test_payment_status_provider_failure() {
        let api = Arc::new(MockCollectionApi::new().with_domain_failure(ProviderFailure::Response {
            status: 400,
            body: json!("Request failed with status code 400"),
        }));

        let (status, body) = utils::get(api, "/api/payment-status/not-a-uuid").await.unwrap();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to check payment status");
        assert_eq!(body["details"], "Request failed with status code 400");
    }

    #[tokio::test]
    async fn test_account_balance_passthrough() {
        let balance = json!({ "availableBalance": "2500", "currency": "EUR" });
        let api = Arc::new(MockCollectionApi::new().with_balance(balance.clone()));

        let (status, body) = utils::get(api, "/api/account-balance").await.unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "balance": balance }));
    }

    #[tokio::test]
    async fn test_account_balance_token_failure() {
        let api = Arc::new(
            MockCollectionApi::new()
                .with_token_failure(ProviderFailure::Transport("connection refused".to_string())),
        );

        let (status, body) = utils::get(api.clone(), "/api/account-balance").await.unwrap();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "Failed to get account balance", "details": "Failed to get access token" })
        );
        assert_eq!(api.calls().await, vec![ProviderCall::Token]);
    }

    #[tokio::test]
    async fn test_callback_accepts_any_body() {
        let expected = json!({ "message": "Callback received successfully" });

        let bodies: Vec<&[u8]> = vec![
            b"",
            br#"{"referenceId":"abc","status":"SUCCESSFUL"}"#,
            b"not json at all",
        ];

        for body in bodies {
            let api = Arc::new(MockCollectionApi::new());
            let builder = request().method("POST").path("/callback").body(body);
            let (status, response) = utils::send(api.clone(), builder).await.unwrap();

            assert_eq!(status, StatusCode::OK);
            assert_eq!(response, expected);
            assert!(api.calls().await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_callback_without_body_headers() {
        let api = Arc::new(MockCollectionApi::new());
        let (status, body) = utils::send(api, request().method("POST").path("/callback")).await.unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Callback received successfully");
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let api = Arc::new(MockCollectionApi::new());

        let (status, body) = utils::get(api.clone(), "/").await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "MoMo Payments Backend API", "status": "running" }));

        let (status, body) = utils::get(api.clone(), "/health").await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());

        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let api = Arc::new(MockCollectionApi::new());

        let (status, body) = utils::get(api.clone(), "/nope").await.unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Route not found" }));

        let (status, _) = utils::send(api, request().method("POST").path("/api/unknown").body("{}"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method_is_route_not_found() {
        let api = Arc::new(MockCollectionApi::new());

        let (status, body) = utils::get(api.clone(), "/api/request-payment").await.unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Route not found" }));

        let (status, _) = utils::send(
            api.clone(),
            request().method("POST").path("/api/account-balance").body("{}"),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_cors_headers_on_cross_origin_request() {
        config::init();
        let api = Arc::new(MockCollectionApi::new());
        let server = test_server(config::test_config(), api);
        let routes = server.routes();

        let response = request()
            .method("GET")
            .path("/health")
            .header("origin", "https://shop.example")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("access-control-allow-origin").is_some());
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        config::init();
        let api = Arc::new(MockCollectionApi::new());
        let server = test_server(config::test_config(), api);
        let routes = server.routes();

        let response = request()
            .method("OPTIONS")
            .path("/api/request-payment")
            .header("origin", "https://shop.example")
            .header("access-control-request-method", "POST")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("access-control-allow-methods").is_some());
    }

    #[tokio::test]
    async fn test_cors_refusal_is_json() {
        config::init();
        let api = Arc::new(MockCollectionApi::new());
        let mut test_config = config::test_config();
        test_config.security.cors_origins = vec!["https://shop.example".to_string()];
        let server = test_server(test_config, api);
        let routes = server.routes();

        let response = request()
            .method("GET")
            .path("/health")
            .header("origin", "https://elsewhere.example")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, json!({ "error": "CORS request forbidden" }));
    }
}
