//! Response processor: the single caller-visible stage that turns raw model
//! output into a formatted report.
//!
//! Chains the cleaner, tokenizer, classifier and formatter; from the outside
//! cleaning and formatting are one operation.

use tracing::debug;

use super::classifier::{ContentClassifier, ContentStructure, ContentType};
use super::cleaner;
use super::formatter::ResponseFormatter;
use super::payload;
use super::tokenizer::split_sentences;

/// Result of running raw text through the full pipeline.
#[derive(Debug, Clone)]
pub struct ProcessedResponse {
    /// The normalized text the structure was derived from.
    pub cleaned: String,
    /// The derived structure analysis.
    pub structure: ContentStructure,
    /// The rendered, section-based report.
    pub formatted: String,
}

impl ProcessedResponse {
    pub fn content_type(&self) -> ContentType {
        self.structure.content_type
    }
}

/// Orchestrates clean → tokenize → classify → format.
pub struct ResponseProcessor {
    classifier: ContentClassifier,
    formatter: ResponseFormatter,
}

impl Default for ResponseProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseProcessor {
    pub fn new() -> Self {
        Self {
            classifier: ContentClassifier::new(),
            formatter: ResponseFormatter::new(),
        }
    }

    /// A processor whose formatter uses a pinned random source.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            classifier: ContentClassifier::new(),
            formatter: ResponseFormatter::with_seed(seed),
        }
    }

    /// Runs the full pipeline over raw model output.
    ///
    /// Models asked for structured output sometimes hand back JSON; a
    /// parseable payload with a summary is flattened to prose first, anything
    /// else is treated as prose directly. Empty input passes through
    /// unchanged at every stage, so the result is an empty report rather
    /// than an error.
    pub fn process(&mut self, raw: &str) -> ProcessedResponse {
        let source = match payload::parse_analysis_payload(raw) {
            Ok(p) if !p.summary.is_empty() => p.into_prose(),
            _ => raw.to_string(),
        };
        let cleaned = cleaner::clean(&source);
        let sentences = split_sentences(&cleaned);
        let structure = self.classifier.classify(&sentences);
        debug!(
            content_type = structure.content_type.label(),
            sentences = structure.total_sentences,
            "classified response"
        );
        let formatted = self.formatter.format(&sentences, &structure);

        ProcessedResponse {
            cleaned,
            structure,
            formatted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_review() {
        let mut processor = ResponseProcessor::with_seed(42);
        let result = processor.process(
            "I visited this restaurant last week. The food was amazing and the staff was great. \
             However, the wait was too long. I would recommend trying the pasta.",
        );

        assert_eq!(result.content_type(), ContentType::Review);
        assert_eq!(
            result.structure.positive_aspects,
            vec!["The food was amazing and the staff was great"]
        );
        assert_eq!(
            result.structure.negative_aspects,
            vec!["However, the wait was too long"]
        );
        assert!(result.formatted.contains("✨ What I Really Enjoyed:"));
        assert!(result.formatted.contains("⚠️ Areas for Improvement:"));
        assert!(result.formatted.lines().last().unwrap().contains("🎯"));
    }

    #[test]
    fn test_empty_input_degrades_quietly() {
        let mut processor = ResponseProcessor::with_seed(1);
        let result = processor.process("");

        assert!(result.cleaned.is_empty());
        assert!(result.formatted.is_empty());
        assert_eq!(result.structure.total_sentences, 0);
    }

    #[test]
    fn test_json_payload_unwrapped_to_prose() {
        let mut processor = ResponseProcessor::with_seed(2);
        let result = processor.process(
            r#"{"summary": "The findings show steady growth", "sentiment": "positive",
                "score": 0.8, "suggestions": ["We should expand the program"]}"#,
        );

        assert_eq!(result.content_type(), ContentType::Analysis);
        assert!(result.formatted.contains("📋 Executive Summary:"));
        assert!(!result.formatted.contains('{'));
    }

    #[test]
    fn test_braces_in_prose_stay_prose() {
        let mut processor = ResponseProcessor::with_seed(2);
        let result = processor.process("The food was great {honestly}.");
        assert_eq!(result.content_type(), ContentType::Review);
        assert!(result.formatted.contains("• The food was great"));
    }

    #[test]
    fn test_cleaning_feeds_classification() {
        // Boilerplate and markdown are stripped before classification sees it.
        let mut processor = ResponseProcessor::with_seed(1);
        let result = processor.process("Sure, here's **the review**: the food was great!!!");

        assert_eq!(result.content_type(), ContentType::Review);
        assert!(!result.cleaned.contains("**"));
        assert!(!result.cleaned.to_lowercase().starts_with("sure"));
    }
}
