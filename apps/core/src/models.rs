use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::pipeline::classifier::ContentType;
use crate::selector::strategy::ResponseStrategy;

/// Static descriptor for one upstream model configuration.
///
/// Registry entries are built once at process start and never mutated
/// afterwards; every selection borrows from the same read-only table.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ModelConfig {
    /// Registry key naming the use case this configuration serves
    /// (e.g. "empathy", "reasoning").
    #[validate(length(min = 1))]
    pub key: String,
    /// The identifier for the model to be used (e.g. API model name).
    #[validate(length(min = 1))]
    pub name: String,
    /// Upstream completion endpoint for this model.
    #[validate(url)]
    pub endpoint: String,
    /// Ordered capability tags, strongest first.
    pub strengths: Vec<String>,
    /// Controls the creativity of the model's responses. Value between 0.0 and 2.0.
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    /// Token budget for a single completion.
    #[validate(range(min = 1))]
    pub max_tokens: u32,
    /// The system-level instructions provided to the model for context.
    #[validate(length(min = 1))]
    pub system_prompt: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            key: "conversational".to_string(),
            name: "llama-3.1-8b-instruct".to_string(),
            endpoint: "https://api.respona.dev/v1/completions".to_string(),
            strengths: vec!["conversation".to_string(), "speed".to_string()],
            temperature: 0.7,
            max_tokens: 512,
            system_prompt: "You are a helpful assistant.".to_string(),
        }
    }
}

/// A single inbound request to the gateway.
///
/// Transient: created per request and discarded once the response is returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRequest {
    /// Identifier of the calling client, used for rate limiting.
    pub client_id: String,
    /// The raw user input (text or transcribed voice).
    pub input: String,
    /// Optional free-form context mapping, used for relevance scoring.
    #[serde(default)]
    pub context: Option<HashMap<String, String>>,
}

/// The finished gateway response handed back to the route layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// Unique identifier for this response (UUID v4).
    pub request_id: String,
    /// The cleaned, structured, formatted response text.
    pub content: String,
    /// Name of the upstream model that produced the raw completion.
    pub model: String,
    /// Content type assigned by the pipeline classifier.
    pub content_type: ContentType,
    /// The strategy that drove the upstream call.
    pub strategy: ResponseStrategy,
    /// When the response was assembled.
    pub created_at: DateTime<Utc>,
}
