//! Static model registry.
//!
//! Built once at process start and read-only afterwards. Each entry pairs a
//! use-case key with an upstream model configuration; selection only ever
//! returns entries from this table, so a model is always available.

use std::sync::LazyLock;

use crate::models::ModelConfig;

/// Ceiling applied when a strategy scales a token budget up.
pub const MAX_TOKENS_CEILING: u32 = 4096;

/// Registry key for the fallback configuration.
pub const DEFAULT_KEY: &str = "conversational";

static REGISTRY: LazyLock<Vec<ModelConfig>> = LazyLock::new(|| {
    vec![
        ModelConfig {
            key: "empathy".to_string(),
            name: "gpt-4o-mini".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            strengths: vec![
                "empathy".to_string(),
                "customer_support".to_string(),
                "tone".to_string(),
            ],
            temperature: 0.6,
            max_tokens: 1024,
            system_prompt: "You are a patient, empathetic support agent. Acknowledge the \
                            customer's situation before proposing solutions."
                .to_string(),
        },
        ModelConfig {
            key: "reasoning".to_string(),
            name: "claude-3-5-sonnet".to_string(),
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            strengths: vec![
                "reasoning".to_string(),
                "analysis".to_string(),
                "long_context".to_string(),
            ],
            temperature: 0.3,
            max_tokens: 2048,
            system_prompt: "You are a careful analyst. Work through the material step by step \
                            and state findings before recommendations."
                .to_string(),
        },
        ModelConfig {
            key: "creative".to_string(),
            name: "mistral-large".to_string(),
            endpoint: "https://api.mistral.ai/v1/chat/completions".to_string(),
            strengths: vec![
                "creativity".to_string(),
                "variety".to_string(),
                "reviews".to_string(),
            ],
            temperature: 0.9,
            max_tokens: 1024,
            system_prompt: "You are a vivid, opinionated writer. Favor concrete detail over \
                            generic praise."
                .to_string(),
        },
        ModelConfig {
            key: DEFAULT_KEY.to_string(),
            name: "llama-3.1-8b-instruct".to_string(),
            endpoint: "https://api.respona.dev/v1/completions".to_string(),
            strengths: vec!["conversation".to_string(), "speed".to_string()],
            temperature: 0.7,
            max_tokens: 512,
            system_prompt: "You are a helpful assistant.".to_string(),
        },
    ]
});

/// All registry entries, in declaration order.
pub fn all() -> &'static [ModelConfig] {
    &REGISTRY
}

/// Looks up a configuration by use-case key, falling back to the default
/// entry. There is no "no suitable model" outcome.
pub fn config_for(key: &str) -> &'static ModelConfig {
    REGISTRY
        .iter()
        .find(|c| c.key == key)
        .or_else(|| REGISTRY.iter().find(|c| c.key == DEFAULT_KEY))
        .unwrap_or(&REGISTRY[0])
}
