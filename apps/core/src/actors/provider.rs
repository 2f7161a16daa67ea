use crate::actors::messages::{ActorError, AppError, ProviderMessage};
use crate::actors::traits::CompletionActor;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{error, info};
use url::Url;

// --- Constants ---
const HANDLE_TIMEOUT: Duration = Duration::from_secs(150);

/// A handle to the provider actor.
///
/// This struct provides a public, cloneable interface for sending messages to
/// the running provider actor. It abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct ProviderActorHandle {
    sender: mpsc::Sender<ProviderMessage>,
}

impl ProviderActorHandle {
    /// Creates a new provider actor and returns a handle to it.
    ///
    /// This will spawn the `ProviderActorRunner` in a new Tokio task.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the upstream completion API.
    /// * `api_key` - Bearer token for the upstream API.
    /// * `request_timeout` - Hard timeout for a single completion request.
    pub fn new(base_url: Url, api_key: String, request_timeout: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = ProviderActorRunner::new(receiver, base_url, api_key, request_timeout);
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }
}

#[async_trait]
impl CompletionActor for ProviderActorHandle {
    async fn complete(
        &self,
        model: String,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = ProviderMessage::Complete {
            model,
            prompt,
            system_prompt,
            temperature,
            max_tokens,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?;
        timeout(HANDLE_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?
    }
}

// --- Actor Runner (Internal Logic) ---
struct ProviderActorRunner {
    receiver: mpsc::Receiver<ProviderMessage>,
    base_url: Url,
    api_key: String,
    request_timeout: Duration,
    client: Client,
}

impl ProviderActorRunner {
    fn new(
        receiver: mpsc::Receiver<ProviderMessage>,
        base_url: Url,
        api_key: String,
        request_timeout: Duration,
    ) -> Self {
        Self {
            receiver,
            base_url,
            api_key,
            request_timeout,
            client: Client::new(),
        }
    }

    async fn run(mut self) {
        info!("ProviderActor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }

        info!("ProviderActor stopped");
    }

    async fn handle_message(&mut self, msg: ProviderMessage) {
        match msg {
            ProviderMessage::Complete {
                model,
                prompt,
                system_prompt,
                temperature,
                max_tokens,
                responder,
            } => {
                let result = self
                    .request_completion(model, prompt, system_prompt, temperature, max_tokens)
                    .await;
                let _ = responder.send(result);
            }
        }
    }

    fn build_request(&self, payload: &serde_json::Value) -> Result<reqwest::RequestBuilder, AppError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key);
        headers.insert(
            AUTHORIZATION,
            auth_value
                .parse()
                .map_err(|_| AppError::Config("API key is not a valid header value".to_string()))?,
        );

        let endpoint = self.base_url.join("v1/completions")?;
        Ok(self.client.post(endpoint).headers(headers).json(payload))
    }

    async fn request_completion(
        &self,
        model: String,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, AppError> {
        info!(%model, "Requesting completion");

        let mut payload = serde_json::json!({
            "model": model,
            "prompt": prompt,
            "stream": false,
        });

        if let Some(system) = system_prompt {
            payload["system_prompt"] = serde_json::Value::String(system);
        }
        if let Some(temp) = temperature {
            if let Some(number) = serde_json::Number::from_f64(temp as f64) {
                payload["temperature"] = serde_json::Value::Number(number);
            }
        }
        if let Some(tokens) = max_tokens {
            payload["max_tokens"] = serde_json::Value::Number(tokens.into());
        }

        let request_future = self.build_request(&payload)?.send();

        let res = timeout(self.request_timeout, request_future).await??;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(%status, "Completion request failed");
            return Err(AppError::Provider(format!(
                "Completion request failed with status {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = res
            .json()
            .await
            .map_err(|e| AppError::Actor(ActorError::CompletionError(e.to_string())))?;

        Ok(json["content"].as_str().unwrap_or("").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_test_actor(server_url: String) -> ProviderActorHandle {
        let (sender, receiver) = mpsc::channel(32);

        let base_url = Url::parse(&server_url).expect("mock server url");
        let mut actor = ProviderActorRunner::new(
            receiver,
            base_url,
            "test-key".to_string(),
            Duration::from_secs(5),
        );

        tokio::spawn(async move {
            info!("Mock ProviderActor started");
            while let Some(msg) = actor.receiver.recv().await {
                actor.handle_message(msg).await;
            }
            info!("Mock ProviderActor stopped");
        });

        ProviderActorHandle { sender }
    }

    #[tokio::test]
    async fn test_completion_success() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let handle = setup_test_actor(mock_server.uri()).await;

        let expected_response = json!({
            "content": "This is a test response.",
            "model": "test-model",
            "stop": true
        });

        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(expected_response))
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = handle
            .complete(
                "test-model".to_string(),
                "Hello".to_string(),
                Some("You are a test.".to_string()),
                Some(0.7),
                Some(256),
            )
            .await;

        // 3. Assert
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "This is a test response.");
    }

    #[tokio::test]
    async fn test_completion_server_error() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let handle = setup_test_actor(mock_server.uri()).await;

        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = handle
            .complete("test-model".to_string(), "Hello".to_string(), None, None, None)
            .await;

        // 3. Assert
        assert!(result.is_err());
        if let Err(AppError::Provider(err_msg)) = result {
            assert!(err_msg.contains("Completion request failed with status 500"));
            assert!(err_msg.contains("Internal Server Error"));
        } else {
            panic!("Expected AppError::Provider, got something else.");
        }
    }

    #[tokio::test]
    async fn test_missing_content_field_yields_empty_string() {
        let mock_server = MockServer::start().await;
        let handle = setup_test_actor(mock_server.uri()).await;

        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"model": "m"})))
            .mount(&mock_server)
            .await;

        let result = handle
            .complete("m".to_string(), "Hello".to_string(), None, None, None)
            .await;

        assert_eq!(result.unwrap(), "");
    }
}
