//! Integration tests
//!
//! Drives the supervisor end to end: selection, upstream call, response
//! post-processing, rate limiting. The upstream is either an in-process
//! double or a wiremock HTTP server behind the real provider actor.

use async_trait::async_trait;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::actors::messages::AppError;
use crate::actors::supervisor::SupervisorHandle;
use crate::actors::traits::CompletionActor;
use crate::config::GatewayConfig;
use crate::models::GatewayRequest;
use crate::pipeline::classifier::ContentType;

/// Completion double returning a fixed raw response.
struct FixedCompletion {
    raw: String,
}

#[async_trait]
impl CompletionActor for FixedCompletion {
    async fn complete(
        &self,
        _model: String,
        _prompt: String,
        _system_prompt: Option<String>,
        _temperature: Option<f32>,
        _max_tokens: Option<u32>,
    ) -> Result<String, AppError> {
        Ok(self.raw.clone())
    }
}

fn request(client_id: &str, input: &str) -> GatewayRequest {
    GatewayRequest {
        client_id: client_id.to_string(),
        input: input.to_string(),
        context: None,
    }
}

fn test_config(rate_limit: usize) -> GatewayConfig {
    GatewayConfig {
        provider_url: Url::parse("http://127.0.0.1:9").expect("static test url"),
        api_key: "test-key".to_string(),
        request_timeout: Duration::from_secs(5),
        rate_limit,
        rate_window: Duration::from_secs(60),
        default_model: "conversational".to_string(),
    }
}

#[tokio::test]
async fn test_full_request_lifecycle_with_double() {
    let raw = "Sure, here's my take: I visited this restaurant last week. \
               The food was amazing and the staff was great. However, the wait \
               was too long. I would recommend trying the pasta. I hope this helps!";
    let supervisor = SupervisorHandle::with_completion_actor(
        test_config(10),
        Box::new(FixedCompletion { raw: raw.to_string() }),
    );

    let response = supervisor
        .process_request(request("client-a", "Tell me about that restaurant"))
        .await
        .expect("request should succeed");

    // Boilerplate is stripped and the review template applied.
    assert_eq!(response.content_type, ContentType::Review);
    assert!(response.content.contains("✨ What I Really Enjoyed:"));
    assert!(response.content.contains("⚠️ Areas for Improvement:"));
    assert!(!response.content.contains("I hope this helps"));
    assert!(!response.request_id.is_empty());
    assert!(!response.model.is_empty());
}

#[tokio::test]
async fn test_rate_limit_surfaces_as_error() {
    let supervisor = SupervisorHandle::with_completion_actor(
        test_config(2),
        Box::new(FixedCompletion { raw: "Fine.".to_string() }),
    );

    for _ in 0..2 {
        supervisor
            .process_request(request("client-b", "hello"))
            .await
            .expect("within limit");
    }

    let err = supervisor
        .process_request(request("client-b", "hello"))
        .await
        .expect_err("over limit");
    assert!(matches!(err, AppError::RateLimited));
}

#[tokio::test]
async fn test_clients_rate_limited_independently() {
    let supervisor = SupervisorHandle::with_completion_actor(
        test_config(1),
        Box::new(FixedCompletion { raw: "Fine.".to_string() }),
    );

    supervisor
        .process_request(request("client-c", "hello"))
        .await
        .expect("first client allowed");
    supervisor
        .process_request(request("client-d", "hello"))
        .await
        .expect("second client allowed");
}

#[tokio::test]
async fn test_strategy_stable_for_repeated_input() {
    let supervisor = SupervisorHandle::with_completion_actor(
        test_config(10),
        Box::new(FixedCompletion {
            raw: "The findings show a steady summary of results.".to_string(),
        }),
    );

    let input = "Analyze the quarterly summary for insights";
    let first = supervisor
        .process_request(request("client-e", input))
        .await
        .expect("first request");
    let second = supervisor
        .process_request(request("client-e", input))
        .await
        .expect("second request");

    // Same input, same cached strategy; only the request id differs.
    assert_eq!(first.model, second.model);
    assert_eq!(first.strategy.max_tokens, second.strategy.max_tokens);
    assert_eq!(first.strategy.temperature, second.strategy.temperature);
    assert_ne!(first.request_id, second.request_id);
}

#[tokio::test]
async fn test_supervisor_with_real_provider_actor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": "Hello friend, good to hear from you today."
        })))
        .mount(&mock_server)
        .await;

    let config = GatewayConfig {
        provider_url: Url::parse(&mock_server.uri()).expect("mock url"),
        ..test_config(10)
    };

    let supervisor = SupervisorHandle::new(config);
    let response = supervisor
        .process_request(request("client-f", "hi there"))
        .await
        .expect("request through mock provider");

    assert_eq!(response.content_type, ContentType::Conversation);
    assert!(!response.content.is_empty());
}

#[tokio::test]
async fn test_provider_failure_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let config = GatewayConfig {
        provider_url: Url::parse(&mock_server.uri()).expect("mock url"),
        ..test_config(10)
    };

    let supervisor = SupervisorHandle::new(config);
    let err = supervisor
        .process_request(request("client-g", "hello"))
        .await
        .expect_err("provider error should surface");

    assert!(matches!(err, AppError::Provider(_)));
}
