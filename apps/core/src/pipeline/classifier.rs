//! Content classifier: assigns a content type to a sentence sequence and
//! extracts the sentence buckets that drive templated formatting.
//!
//! Type detection is an ordered-priority keyword match: the first matching
//! rule wins, so a text mentioning both "stars" and "analysis" classifies as
//! a review. Bucket predicates are independent of each other and of the type,
//! so one sentence may land in several buckets. Both are deliberate, matching
//! how the gateway has always behaved; do not "fix" them into an exclusive
//! partition.
//!
//! The model selector carries its own content-type detector with a different
//! priority order (see `selector::analysis`); the two are intentionally kept
//! separate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::tokenizer::{contains_any, matching_sentences};

/// Content-type tag assigned to a text blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Product/venue review (ratings, experiences, recommendations).
    Review,
    /// Analytical report (findings, insights, summaries).
    Analysis,
    /// Casual conversational exchange.
    Conversation,
    /// Customer-service interaction (complaints, resolutions).
    CustomerService,
    /// Anything that matches none of the above.
    General,
}

impl ContentType {
    /// Returns the wire label for the content type.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Review => "review",
            ContentType::Analysis => "analysis",
            ContentType::Conversation => "conversation",
            ContentType::CustomerService => "customer_service",
            ContentType::General => "general",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

const REVIEW_KEYWORDS: &[&str] = &[
    "rating", "stars", "recommend", "experience", "food", "service", "quality",
];
const ANALYSIS_KEYWORDS: &[&str] = &[
    "analysis", "sentiment", "key points", "summary", "findings", "insights",
];
const CONVERSATION_KEYWORDS: &[&str] = &["hello", "hi", "how are you", "chat", "conversation"];
const CUSTOMER_SERVICE_KEYWORDS: &[&str] = &[
    "customer", "service", "apologize", "resolve", "issue", "problem",
];

const KEY_POINT_KEYWORDS: &[&str] = &["important", "key", "main", "primary", "essential", "critical"];
const POSITIVE_KEYWORDS: &[&str] = &[
    "like", "love", "good", "great", "amazing", "excellent", "outstanding", "fantastic",
];
const NEGATIVE_KEYWORDS: &[&str] = &[
    "disappointing", "bad", "poor", "terrible", "awful", "horrible", "unacceptable", "too long",
    "too slow",
];
const SUGGESTION_KEYWORDS: &[&str] = &["suggest", "recommend", "could", "should", "might", "consider"];

/// Topic trigger words and the labels they unlock. All-or-nothing per group:
/// any trigger present adds every label in the group.
const TOPIC_GROUPS: &[(&[&str], &[&str])] = &[
    (
        &["restaurant", "food", "dining", "meal"],
        &["restaurant", "food", "dining"],
    ),
    (
        &["hotel", "accommodation", "room", "stay"],
        &["hotel", "accommodation", "travel"],
    ),
    (
        &["product", "item", "purchase", "buy"],
        &["product", "shopping", "consumer"],
    ),
    (
        &["service", "support", "help", "assistance"],
        &["service", "support", "customer care"],
    ),
    (
        &["app", "software", "technology", "digital"],
        &["technology", "software", "digital"],
    ),
];

/// Derived structure analysis for a sentence sequence.
///
/// Every bucket is an ordered subsequence of the input sentences; buckets are
/// not mutually exclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentStructure {
    pub content_type: ContentType,
    pub key_points: Vec<String>,
    pub positive_aspects: Vec<String>,
    pub negative_aspects: Vec<String>,
    pub suggestions: Vec<String>,
    pub questions: Vec<String>,
    pub statements: Vec<String>,
    pub topics: Vec<String>,
    pub total_sentences: usize,
}

impl ContentStructure {
    /// An empty structure with the given type, used for degenerate input.
    pub fn empty(content_type: ContentType) -> Self {
        Self {
            content_type,
            key_points: vec![],
            positive_aspects: vec![],
            negative_aspects: vec![],
            suggestions: vec![],
            questions: vec![],
            statements: vec![],
            topics: vec![],
            total_sentences: 0,
        }
    }
}

/// Rule-based content classifier.
pub struct ContentClassifier;

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Detects the content type of the joined, lowercased text.
    ///
    /// Priority order: review, analysis, conversation, customer_service,
    /// then general as the default.
    pub fn detect_content_type(&self, joined_lower: &str) -> ContentType {
        if contains_any(joined_lower, REVIEW_KEYWORDS) {
            ContentType::Review
        } else if contains_any(joined_lower, ANALYSIS_KEYWORDS) {
            ContentType::Analysis
        } else if contains_any(joined_lower, CONVERSATION_KEYWORDS) {
            ContentType::Conversation
        } else if contains_any(joined_lower, CUSTOMER_SERVICE_KEYWORDS) {
            ContentType::CustomerService
        } else {
            ContentType::General
        }
    }

    /// Classifies a sentence sequence into a full content structure.
    pub fn classify(&self, sentences: &[String]) -> ContentStructure {
        if sentences.is_empty() {
            return ContentStructure::empty(ContentType::General);
        }

        let joined_lower = sentences.join(". ").to_lowercase();
        let content_type = self.detect_content_type(&joined_lower);

        let (questions, statements): (Vec<String>, Vec<String>) = sentences
            .iter()
            .cloned()
            .partition(|s| s.contains('?'));

        ContentStructure {
            content_type,
            key_points: matching_sentences(sentences, KEY_POINT_KEYWORDS),
            positive_aspects: matching_sentences(sentences, POSITIVE_KEYWORDS),
            negative_aspects: matching_sentences(sentences, NEGATIVE_KEYWORDS),
            suggestions: matching_sentences(sentences, SUGGESTION_KEYWORDS),
            questions,
            statements,
            topics: self.extract_topics(&joined_lower),
            total_sentences: sentences.len(),
        }
    }

    /// Extracts topic labels from the joined text, deduplicated in
    /// first-seen order.
    fn extract_topics(&self, joined_lower: &str) -> Vec<String> {
        let mut topics = Vec::new();
        for (triggers, labels) in TOPIC_GROUPS {
            if contains_any(joined_lower, triggers) {
                for label in *labels {
                    if !topics.iter().any(|t| t == label) {
                        topics.push(label.to_string());
                    }
                }
            }
        }
        topics
    }
}
