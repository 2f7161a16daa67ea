//! # Model Selector
//!
//! Picks the upstream model configuration and generation strategy for a raw
//! user input, BEFORE the upstream call is made.
//!
//! ## Components
//! - `analysis`: pure sub-analyses of the input (content type, complexity,
//!   sentiment, urgency, domain, intent)
//! - `registry`: the static table of model configurations
//! - `strategy`: strategy derivation and parameter adjustments
//!
//! Selection is deterministic and total: the default configuration catches
//! everything the policy rules do not.

pub mod analysis;
pub mod registry;
pub mod strategy;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::models::ModelConfig;
use analysis::{Complexity, Domain, InputAnalysis, Sentiment, SelectorContentType, Urgency, UserIntent};
use strategy::ResponseStrategy;

pub use analysis::analyze as analyze_input;

// Confidence scoring: base plus a fixed increment per informative dimension.
const CONFIDENCE_BASE: f32 = 0.5;
const CONFIDENCE_INCREMENT: f32 = 0.1;

/// Outcome of one selection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResult {
    pub analysis: InputAnalysis,
    pub selected_model: ModelConfig,
    pub strategy: ResponseStrategy,
    /// How sure the selector is that the analysis is informative, in
    /// `[0.5, 1.0]`.
    pub confidence: f32,
    pub processing_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Deterministic model and strategy selector.
pub struct ModelSelector {
    /// Registry key used when no policy rule matches.
    default_key: String,
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSelector {
    pub fn new() -> Self {
        Self::with_default_key(registry::DEFAULT_KEY.to_string())
    }

    /// A selector whose fallback configuration is looked up by `key`.
    pub fn with_default_key(key: String) -> Self {
        Self { default_key: key }
    }

    /// Analyzes the input and selects a model configuration plus strategy.
    ///
    /// Always returns a result; the default configuration is the final rule.
    pub fn select(&self, input: &str) -> SelectionResult {
        let start = Instant::now();
        let analysis = analysis::analyze(input);

        let key = self.select_key(&analysis);
        let config = registry::config_for(key);
        let strategy = ResponseStrategy::derive(config, &analysis);
        let confidence = score_confidence(&analysis);

        debug!(
            model = %config.name,
            key,
            confidence,
            "selected model configuration"
        );

        SelectionResult {
            analysis,
            selected_model: config.clone(),
            strategy,
            confidence,
            processing_time_ms: start.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        }
    }

    /// Selection policy: first matching rule wins.
    fn select_key(&self, analysis: &InputAnalysis) -> &str {
        if analysis.content_type == SelectorContentType::CustomerService
            || analysis.user_intent == UserIntent::Complaint
        {
            "empathy"
        } else if analysis.content_type == SelectorContentType::Analysis
            || analysis.complexity == Complexity::High
        {
            "reasoning"
        } else if analysis.content_type == SelectorContentType::Review
            || analysis.domain == Domain::General
        {
            "creative"
        } else {
            &self.default_key
        }
    }
}

/// Confidence starts at the base and gains a fixed increment for every
/// dimension that came out non-default, capped at 1.0.
fn score_confidence(analysis: &InputAnalysis) -> f32 {
    let mut confidence = CONFIDENCE_BASE;
    if analysis.content_type != SelectorContentType::General {
        confidence += CONFIDENCE_INCREMENT;
    }
    if analysis.sentiment != Sentiment::Neutral {
        confidence += CONFIDENCE_INCREMENT;
    }
    if analysis.urgency == Urgency::High {
        confidence += CONFIDENCE_INCREMENT;
    }
    if analysis.domain != Domain::General {
        confidence += CONFIDENCE_INCREMENT;
    }
    if analysis.user_intent != UserIntent::General {
        confidence += CONFIDENCE_INCREMENT;
    }
    if analysis.complexity != Complexity::Low {
        confidence += CONFIDENCE_INCREMENT;
    }
    confidence.min(1.0)
}
