//! Parsing for JSON-shaped payloads embedded in model output.
//!
//! Upstream models asked for structured output routinely wrap the JSON in
//! prose or fences, or return something that is not JSON at all. Parsing
//! failure is a first-class branch here: callers either match on the
//! `Result` or take the fixed fallback record, never an exception path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A structured analysis payload requested from the upstream model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub summary: String,
    #[serde(default = "default_sentiment")]
    pub sentiment: String,
    #[serde(default = "default_score")]
    pub score: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

fn default_sentiment() -> String {
    "neutral".to_string()
}

fn default_score() -> f64 {
    0.5
}

impl AnalysisPayload {
    /// The defined recovery value used when parsing fails: neutral sentiment,
    /// midpoint score, nothing else.
    pub fn fallback() -> Self {
        Self {
            summary: String::new(),
            sentiment: default_sentiment(),
            score: default_score(),
            suggestions: vec![],
        }
    }

    /// Flattens the payload back into prose for the formatting pipeline.
    pub fn into_prose(self) -> String {
        let mut parts = vec![self.summary];
        parts.extend(self.suggestions);
        parts.retain(|p| !p.is_empty());
        parts.join(". ")
    }
}

/// Why a payload could not be parsed.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("no JSON object found in model output")]
    NoJsonObject,
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Extracts and parses the first JSON object embedded in `raw`.
///
/// Tries the whole string first, then the outermost `{...}` span.
pub fn parse_analysis_payload(raw: &str) -> Result<AnalysisPayload, PayloadError> {
    let trimmed = raw.trim();
    if let Ok(payload) = serde_json::from_str(trimmed) {
        return Ok(payload);
    }

    let start = trimmed.find('{').ok_or(PayloadError::NoJsonObject)?;
    let end = trimmed.rfind('}').ok_or(PayloadError::NoJsonObject)?;
    if end < start {
        return Err(PayloadError::NoJsonObject);
    }

    Ok(serde_json::from_str(&trimmed[start..=end])?)
}

/// Parses a payload, degrading to the fixed fallback record on any failure.
pub fn parse_or_fallback(raw: &str) -> AnalysisPayload {
    parse_analysis_payload(raw).unwrap_or_else(|_| AnalysisPayload::fallback())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_clean_json() {
        let raw = r#"{"summary": "ok", "sentiment": "positive", "score": 0.9, "suggestions": []}"#;
        let payload = parse_analysis_payload(raw).unwrap();
        assert_eq!(payload.summary, "ok");
        assert_eq!(payload.sentiment, "positive");
    }

    #[test]
    fn test_parses_json_wrapped_in_prose() {
        let raw = "Here is the analysis you wanted: {\"summary\": \"brief\"} hope that works";
        let payload = parse_analysis_payload(raw).unwrap();
        assert_eq!(payload.summary, "brief");
        // Missing fields take their serde defaults.
        assert_eq!(payload.sentiment, "neutral");
    }

    #[test]
    fn test_non_json_yields_error() {
        assert!(matches!(
            parse_analysis_payload("no structure here"),
            Err(PayloadError::NoJsonObject)
        ));
    }

    #[test]
    fn test_broken_json_yields_error() {
        assert!(matches!(
            parse_analysis_payload("{not valid json}"),
            Err(PayloadError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_into_prose_joins_summary_and_suggestions() {
        let payload = AnalysisPayload {
            summary: "Growth is steady".to_string(),
            sentiment: "positive".to_string(),
            score: 0.8,
            suggestions: vec!["Expand the program".to_string()],
        };
        assert_eq!(payload.into_prose(), "Growth is steady. Expand the program");
    }

    #[test]
    fn test_fallback_record_is_neutral() {
        let payload = parse_or_fallback("garbage output");
        assert_eq!(payload, AnalysisPayload::fallback());
        assert_eq!(payload.sentiment, "neutral");
        assert!((payload.score - 0.5).abs() < 1e-9);
    }
}
