//! Input analysis for model selection.
//!
//! Every sub-analysis is a pure function of the lowercased input text. The
//! content-type detector here is deliberately NOT the pipeline classifier: it
//! has its own keyword sets, its own `Inquiry` tag, and a different priority
//! order (conversation before analysis before review). The two detectors can
//! disagree on the same input; that asymmetry is long-standing gateway
//! behavior and selection depends on it, so it is preserved rather than
//! unified. A regression test pins both outputs.

use serde::{Deserialize, Serialize};

use crate::pipeline::tokenizer::{contains_any, split_sentences, split_words};

/// Content type as seen by the selector. Carries `Inquiry`, which the
/// pipeline classifier does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorContentType {
    Conversation,
    Analysis,
    Review,
    CustomerService,
    Inquiry,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Restaurant,
    Hospitality,
    Retail,
    Service,
    Technology,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserIntent {
    Question,
    Support,
    Feedback,
    Complaint,
    Recommendation,
    General,
}

const CONVERSATION_KEYWORDS: &[&str] = &["hello", "hi", "how are you", "chat"];
const ANALYSIS_KEYWORDS: &[&str] = &["analyze", "analysis", "sentiment", "insights", "summary"];
const REVIEW_KEYWORDS: &[&str] = &["review", "rating", "stars", "recommend", "experience"];
const CUSTOMER_SERVICE_KEYWORDS: &[&str] =
    &["complaint", "refund", "apologize", "resolve", "issue", "problem"];
const INQUIRY_KEYWORDS: &[&str] = &["what", "how", "when", "where", "why", "can you"];

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "love", "wonderful", "fantastic", "happy",
];
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "poor", "disappointed", "angry", "unacceptable",
];

const URGENCY_KEYWORDS: &[&str] = &["urgent", "asap", "immediately", "right away", "emergency"];

const RESTAURANT_KEYWORDS: &[&str] = &["restaurant", "food", "menu", "meal", "dining"];
const HOSPITALITY_KEYWORDS: &[&str] = &["hotel", "room", "stay", "booking", "accommodation"];
const RETAIL_KEYWORDS: &[&str] = &["product", "purchase", "order", "shipping", "store"];
const SERVICE_KEYWORDS: &[&str] = &["service", "support", "help", "assistance"];
const TECHNOLOGY_KEYWORDS: &[&str] = &["app", "software", "website", "technology", "digital"];

const SUPPORT_KEYWORDS: &[&str] = &["help", "support", "assist"];
const FEEDBACK_KEYWORDS: &[&str] = &["feedback", "review", "opinion"];
const COMPLAINT_KEYWORDS: &[&str] = &["complaint", "disappointed", "terrible", "unacceptable", "refund"];
const RECOMMENDATION_KEYWORDS: &[&str] = &["recommend", "suggest", "advice"];

/// The complete, independently computed analysis of one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputAnalysis {
    pub content_type: SelectorContentType,
    pub complexity: Complexity,
    pub sentiment: Sentiment,
    pub urgency: Urgency,
    pub domain: Domain,
    pub user_intent: UserIntent,
    pub word_count: usize,
}

/// Analyzes raw user input for model selection.
pub fn analyze(input: &str) -> InputAnalysis {
    let lower = input.to_lowercase();
    let words = split_words(&lower);
    let sentence_count = split_sentences(&lower).len().max(1);

    InputAnalysis {
        content_type: detect_content_type(&lower),
        complexity: detect_complexity(words.len(), sentence_count),
        sentiment: detect_sentiment(&words),
        urgency: detect_urgency(&lower),
        domain: detect_domain(&lower),
        user_intent: detect_user_intent(input, &lower),
        word_count: words.len(),
    }
}

/// Selector-side content-type detection.
///
/// Priority order: conversation, analysis, review, customer_service, inquiry,
/// then general. This order differs from the pipeline classifier's.
pub fn detect_content_type(lower: &str) -> SelectorContentType {
    if contains_any(lower, CONVERSATION_KEYWORDS) {
        SelectorContentType::Conversation
    } else if contains_any(lower, ANALYSIS_KEYWORDS) {
        SelectorContentType::Analysis
    } else if contains_any(lower, REVIEW_KEYWORDS) {
        SelectorContentType::Review
    } else if contains_any(lower, CUSTOMER_SERVICE_KEYWORDS) {
        SelectorContentType::CustomerService
    } else if contains_any(lower, INQUIRY_KEYWORDS) {
        SelectorContentType::Inquiry
    } else {
        SelectorContentType::General
    }
}

fn detect_complexity(word_count: usize, sentence_count: usize) -> Complexity {
    let avg_words = word_count as f64 / sentence_count as f64;
    if word_count > 100 || avg_words > 25.0 {
        Complexity::High
    } else if word_count > 40 || avg_words > 15.0 {
        Complexity::Medium
    } else {
        Complexity::Low
    }
}

fn detect_sentiment(words: &[String]) -> Sentiment {
    let positive = words
        .iter()
        .filter(|w| POSITIVE_WORDS.contains(&w.as_str()))
        .count();
    let negative = words
        .iter()
        .filter(|w| NEGATIVE_WORDS.contains(&w.as_str()))
        .count();
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

fn detect_urgency(lower: &str) -> Urgency {
    if contains_any(lower, URGENCY_KEYWORDS) {
        Urgency::High
    } else {
        Urgency::Normal
    }
}

fn detect_domain(lower: &str) -> Domain {
    if contains_any(lower, RESTAURANT_KEYWORDS) {
        Domain::Restaurant
    } else if contains_any(lower, HOSPITALITY_KEYWORDS) {
        Domain::Hospitality
    } else if contains_any(lower, RETAIL_KEYWORDS) {
        Domain::Retail
    } else if contains_any(lower, SERVICE_KEYWORDS) {
        Domain::Service
    } else if contains_any(lower, TECHNOLOGY_KEYWORDS) {
        Domain::Technology
    } else {
        Domain::General
    }
}

fn detect_user_intent(input: &str, lower: &str) -> UserIntent {
    if input.contains('?') || contains_any(lower, INQUIRY_KEYWORDS) {
        UserIntent::Question
    } else if contains_any(lower, SUPPORT_KEYWORDS) {
        UserIntent::Support
    } else if contains_any(lower, FEEDBACK_KEYWORDS) {
        UserIntent::Feedback
    } else if contains_any(lower, COMPLAINT_KEYWORDS) {
        UserIntent::Complaint
    } else if contains_any(lower, RECOMMENDATION_KEYWORDS) {
        UserIntent::Recommendation
    } else {
        UserIntent::General
    }
}
