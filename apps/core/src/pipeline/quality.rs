//! Quality analyzer: scores a finished response along eight independent
//! metrics and aggregates them into a weighted overall score.
//!
//! Every heuristic is a pure function of the response text (plus the optional
//! context mapping for relevance). Weights and thresholds are fixed constants;
//! stored historical scores depend on them staying exactly as they are.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::classifier::ContentType;
use super::tokenizer::{split_sentences, split_words};

// Fixed metric weights; they sum to 1.0.
const W_COHERENCE: f64 = 0.15;
const W_RELEVANCE: f64 = 0.15;
const W_COMPLETENESS: f64 = 0.15;
const W_CLARITY: f64 = 0.15;
const W_ENGAGEMENT: f64 = 0.10;
const W_STRUCTURE: f64 = 0.10;
const W_TONE: f64 = 0.10;
const W_LENGTH: f64 = 0.10;

// Thresholds for the derived label lists.
const STRENGTH_THRESHOLD: f64 = 0.8;
const WEAKNESS_THRESHOLD: f64 = 0.5;
const SUGGESTION_THRESHOLD: f64 = 0.6;

const TRANSITION_WORDS: &[&str] = &[
    "however",
    "therefore",
    "additionally",
    "furthermore",
    "moreover",
    "consequently",
    "meanwhile",
    "finally",
];
const PERSONAL_PRONOUNS: &[&str] = &["you", "your", "we", "our", "i"];
const PASSIVE_MARKERS: &[&str] = &["was", "were", "been", "being"];
const STRUCTURAL_MARKERS: &[&str] = &["first", "second", "finally", "in conclusion"];
const CONCLUSION_MARKERS: &[&str] = &["overall", "in conclusion", "finally", "to sum up"];
const EMOTIONAL_WORDS: &[&str] = &[
    "love", "hate", "excited", "thrilled", "worried", "delighted", "frustrated", "amazed",
];
const HARSH_WORDS: &[&str] = &["stupid", "dumb", "ridiculous", "useless", "hate"];

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love", "enjoy", "happy",
    "pleased",
];
const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "horrible",
    "poor",
    "disappointing",
    "hate",
    "angry",
    "upset",
    "unacceptable",
];

/// Human-readable labels per metric, in metric declaration order:
/// (metric, strength, weakness, suggestion).
const METRIC_CATALOG: &[(&str, &str, &str, &str)] = &[
    (
        "coherence",
        "Clear logical flow between ideas",
        "Ideas feel disconnected",
        "Add transition words to connect ideas",
    ),
    (
        "relevance",
        "Stays on topic throughout",
        "Drifts away from the topic",
        "Tie the response back to the original request",
    ),
    (
        "completeness",
        "Covers the topic thoroughly",
        "Leaves the topic underdeveloped",
        "Expand the response with supporting detail",
    ),
    (
        "clarity",
        "Easy to read and understand",
        "Hard to follow in places",
        "Shorten sentences and prefer active voice",
    ),
    (
        "engagement",
        "Speaks directly to the reader",
        "Reads as distant and impersonal",
        "Address the reader directly and ask a question",
    ),
    (
        "structure",
        "Well organized with visible structure",
        "Lacks visible organization",
        "Break the response into lists or short paragraphs",
    ),
    (
        "tone",
        "Warm, constructive tone",
        "Tone comes across as harsh",
        "Soften the wording and balance criticism with positives",
    ),
    (
        "length",
        "Well-judged length",
        "Length is off target",
        "Aim for a response between 50 and 300 words",
    ),
];

/// Overall sentiment of a response, majority-voted over fixed word lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Reading-complexity band derived from sentence length and word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityBand {
    Low,
    Moderate,
    High,
}

/// The eight quality metrics, each clamped to `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub coherence: f64,
    pub relevance: f64,
    pub completeness: f64,
    pub clarity: f64,
    pub engagement: f64,
    pub structure: f64,
    pub tone: f64,
    pub length: f64,
}

impl QualityMetrics {
    fn zero() -> Self {
        Self {
            coherence: 0.0,
            relevance: 0.0,
            completeness: 0.0,
            clarity: 0.0,
            engagement: 0.0,
            structure: 0.0,
            tone: 0.0,
            length: 0.0,
        }
    }

    /// Metric values in catalog order.
    fn values(&self) -> [f64; 8] {
        [
            self.coherence,
            self.relevance,
            self.completeness,
            self.clarity,
            self.engagement,
            self.structure,
            self.tone,
            self.length,
        ]
    }

    /// The fixed-weight linear combination of all eight metrics.
    pub fn overall_score(&self) -> f64 {
        self.coherence * W_COHERENCE
            + self.relevance * W_RELEVANCE
            + self.completeness * W_COMPLETENESS
            + self.clarity * W_CLARITY
            + self.engagement * W_ENGAGEMENT
            + self.structure * W_STRUCTURE
            + self.tone * W_TONE
            + self.length * W_LENGTH
    }
}

/// Full quality analysis for a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub metrics: QualityMetrics,
    pub overall_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub sentiment: Sentiment,
    pub complexity: ComplexityBand,
}

impl QualityReport {
    /// Baseline report for an empty response: zero scores, no labels.
    fn baseline() -> Self {
        Self {
            metrics: QualityMetrics::zero(),
            overall_score: 0.0,
            strengths: vec![],
            weaknesses: vec![],
            suggestions: vec![],
            sentiment: Sentiment::Neutral,
            complexity: ComplexityBand::Low,
        }
    }
}

/// Heuristic quality scorer for formatted responses.
pub struct QualityAnalyzer;

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Scores a response. Empty input yields the baseline report.
    ///
    /// `context` is used only for keyword-overlap relevance scoring; the
    /// content type is recorded for callers but does not change the rubric.
    pub fn analyze(
        &self,
        response: &str,
        _content_type: ContentType,
        context: Option<&HashMap<String, String>>,
    ) -> QualityReport {
        let words = split_words(response);
        if words.is_empty() {
            return QualityReport::baseline();
        }

        let sentences = split_sentences(response);
        let lower = response.to_lowercase();

        let metrics = QualityMetrics {
            coherence: score_coherence(&lower, sentences.len()),
            relevance: score_relevance(&words, context),
            completeness: score_completeness(&lower, &words, &sentences),
            clarity: score_clarity(&words, sentences.len()),
            engagement: score_engagement(response, &words),
            structure: score_structure(response, &lower),
            tone: score_tone(&lower),
            length: score_length(words.len()),
        };

        let values = metrics.values();
        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();
        let mut suggestions = Vec::new();
        for (value, (_, strength, weakness, suggestion)) in values.iter().zip(METRIC_CATALOG) {
            if *value >= STRENGTH_THRESHOLD {
                strengths.push(strength.to_string());
            }
            if *value < WEAKNESS_THRESHOLD {
                weaknesses.push(weakness.to_string());
            }
            if *value < SUGGESTION_THRESHOLD {
                suggestions.push(suggestion.to_string());
            }
        }

        let overall_score = metrics.overall_score();
        QualityReport {
            metrics,
            overall_score,
            strengths,
            weaknesses,
            suggestions,
            sentiment: vote_sentiment(&words),
            complexity: band_complexity(&words, sentences.len()),
        }
    }
}

fn score_coherence(lower: &str, sentence_count: usize) -> f64 {
    let transitions = TRANSITION_WORDS
        .iter()
        .filter(|w| lower.contains(*w))
        .count() as f64;
    let mut score = 0.5 + (transitions * 0.1).min(0.3);
    if (3..=15).contains(&sentence_count) {
        score += 0.2;
    }
    score.clamp(0.0, 1.0)
}

fn score_relevance(words: &[String], context: Option<&HashMap<String, String>>) -> f64 {
    let Some(context) = context.filter(|c| !c.is_empty()) else {
        return 0.5;
    };

    let context_words: Vec<String> = context
        .values()
        .flat_map(|v| split_words(v))
        .filter(|w| w.len() > 3)
        .collect();
    if context_words.is_empty() {
        return 0.5;
    }

    let matched = context_words
        .iter()
        .filter(|cw| words.contains(cw))
        .count() as f64;
    let ratio = matched / context_words.len() as f64;
    (0.3 + 0.7 * ratio).clamp(0.0, 1.0)
}

fn score_completeness(lower: &str, words: &[String], sentences: &[String]) -> f64 {
    let mut score = (words.len() as f64 / 100.0).min(0.7);
    if sentences.first().is_some_and(|s| s.len() > 20) {
        score += 0.15;
    }
    if CONCLUSION_MARKERS.iter().any(|m| lower.contains(m)) {
        score += 0.15;
    }
    score.clamp(0.0, 1.0)
}

fn score_clarity(words: &[String], sentence_count: usize) -> f64 {
    let avg_words = words.len() as f64 / sentence_count.max(1) as f64;
    let base = if avg_words <= 20.0 { 1.0 } else { 20.0 / avg_words };

    let passive = words
        .iter()
        .filter(|w| PASSIVE_MARKERS.contains(&w.as_str()))
        .count() as f64;
    let penalty = (passive / words.len() as f64 * 2.0).min(0.3);

    (base - penalty).clamp(0.0, 1.0)
}

fn score_engagement(response: &str, words: &[String]) -> f64 {
    let pronouns = words
        .iter()
        .filter(|w| PERSONAL_PRONOUNS.contains(&w.as_str()))
        .count() as f64;
    let mut score = (pronouns / words.len() as f64 * 5.0).min(0.5);
    if response.contains('?') {
        score += 0.25;
    }
    let emotional = words
        .iter()
        .filter(|w| EMOTIONAL_WORDS.contains(&w.as_str()))
        .count() as f64;
    score += (emotional * 0.05).min(0.25);
    score.clamp(0.0, 1.0)
}

fn score_structure(response: &str, lower: &str) -> f64 {
    let mut score: f64 = 0.2;
    if response.lines().any(|l| {
        let t = l.trim_start();
        t.starts_with('•') || t.starts_with("- ")
    }) {
        score += 0.25;
    }
    if response.lines().any(|l| {
        let t = l.trim_start();
        t.len() > 1 && t.as_bytes()[0].is_ascii_digit() && t[1..].starts_with('.')
    }) {
        score += 0.25;
    }
    if response.contains("\n\n") {
        score += 0.25;
    }
    if STRUCTURAL_MARKERS.iter().any(|m| lower.contains(m)) {
        score += 0.25;
    }
    score.clamp(0.0, 1.0)
}

fn score_tone(lower: &str) -> f64 {
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as f64;
    let harsh = HARSH_WORDS.iter().filter(|w| lower.contains(*w)).count() as f64;
    (0.5 + (positive * 0.05).min(0.3) - (harsh * 0.1).min(0.4)).clamp(0.0, 1.0)
}

fn score_length(word_count: usize) -> f64 {
    let words = word_count as f64;
    if (50.0..=300.0).contains(&words) {
        1.0
    } else if words < 50.0 {
        (words / 50.0).clamp(0.0, 1.0)
    } else {
        (1.0 - (words - 300.0) / 600.0).clamp(0.3, 1.0)
    }
}

fn vote_sentiment(words: &[String]) -> Sentiment {
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

fn band_complexity(words: &[String], sentence_count: usize) -> ComplexityBand {
    let avg_words = words.len() as f64 / sentence_count.max(1) as f64;
    let complex_words = words.iter().filter(|w| w.len() >= 8).count();
    if avg_words > 20.0 || complex_words > 10 {
        ComplexityBand::High
    } else if avg_words > 12.0 || complex_words > 5 {
        ComplexityBand::Moderate
    } else {
        ComplexityBand::Low
    }
}
