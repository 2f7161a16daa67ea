//! Strategy derivation: turns an input analysis plus a chosen model
//! configuration into concrete generation parameters.

use serde::{Deserialize, Serialize};

use super::analysis::{Complexity, InputAnalysis, Sentiment, SelectorContentType, Urgency};
use super::registry::MAX_TOKENS_CEILING;
use crate::models::ModelConfig;

// Fixed adjustment constants.
const URGENCY_TEMPERATURE_BOOST: f32 = 0.2;
const COMPLEXITY_TOKEN_FACTOR: f32 = 1.5;

/// Generation parameters derived from a model configuration and an analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseStrategy {
    /// Name of the chosen upstream model.
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ordered section names the response is expected to carry.
    pub structure: Vec<String>,
    /// Ordered tone tags for the response.
    pub tone: Vec<String>,
    /// Adjustment tags applied on top of the base configuration.
    pub enhancements: Vec<String>,
}

impl ResponseStrategy {
    /// Derives a strategy from the chosen configuration, then applies the
    /// fixed urgency/sentiment/complexity adjustments in that order.
    pub fn derive(config: &ModelConfig, analysis: &InputAnalysis) -> Self {
        let mut strategy = Self {
            model: config.name.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            structure: expected_structure(analysis.content_type),
            tone: expected_tone(analysis.content_type),
            enhancements: vec![],
        };

        if analysis.urgency == Urgency::High {
            strategy.temperature = (strategy.temperature + URGENCY_TEMPERATURE_BOOST).min(1.0);
            strategy.enhancements.push("urgent_response".to_string());
        }
        if analysis.sentiment == Sentiment::Negative {
            strategy.enhancements.push("empathetic_tone".to_string());
            strategy.tone.push("empathetic".to_string());
        }
        if analysis.complexity == Complexity::High {
            let scaled = (strategy.max_tokens as f32 * COMPLEXITY_TOKEN_FACTOR) as u32;
            strategy.max_tokens = scaled.min(MAX_TOKENS_CEILING);
            strategy.enhancements.push("detailed_explanation".to_string());
        }

        strategy
    }
}

/// Expected section names per content type, in emission order.
fn expected_structure(content_type: SelectorContentType) -> Vec<String> {
    let sections: &[&str] = match content_type {
        SelectorContentType::Review => {
            &["opening", "positives", "negatives", "suggestions", "conclusion"]
        }
        SelectorContentType::Analysis => {
            &["summary", "findings", "recommendations", "action_items"]
        }
        SelectorContentType::Conversation => &["greeting", "main", "closing"],
        SelectorContentType::CustomerService => {
            &["acknowledgment", "situation", "solutions", "follow_up"]
        }
        SelectorContentType::Inquiry => &["answer", "details", "follow_up"],
        SelectorContentType::General => &["main_point", "details", "conclusion"],
    };
    sections.iter().map(|s| s.to_string()).collect()
}

/// Expected tone tags per content type, strongest first.
fn expected_tone(content_type: SelectorContentType) -> Vec<String> {
    let tones: &[&str] = match content_type {
        SelectorContentType::Review => &["balanced", "descriptive"],
        SelectorContentType::Analysis => &["precise", "neutral"],
        SelectorContentType::Conversation => &["friendly", "casual"],
        SelectorContentType::CustomerService => &["professional", "warm"],
        SelectorContentType::Inquiry => &["helpful", "direct"],
        SelectorContentType::General => &["clear", "neutral"],
    };
    tones.iter().map(|s| s.to_string()).collect()
}
