//! # Response Pipeline
//!
//! Pure, synchronous post-processing for raw model output. Analyzes and
//! rewrites text AFTER the upstream call so the gateway always hands back a
//! structured, human-friendly response.
//!
//! ## Components
//! - `tokenizer`: sentence splitting and keyword matching (shared utility)
//! - `cleaner`: fixed-order normalization passes
//! - `classifier`: content-type tagging and structure analysis
//! - `formatter`: section-based report rendering per content type
//! - `quality`: eight-metric scoring rubric with weighted aggregate
//! - `payload`: embedded-JSON parsing with a defined fallback
//! - `processor`: the clean → classify → format orchestrator

pub mod classifier;
pub mod cleaner;
pub mod formatter;
pub mod payload;
pub mod processor;
pub mod quality;
pub mod tokenizer;

pub use classifier::{ContentClassifier, ContentStructure, ContentType};
pub use cleaner::clean;
pub use formatter::ResponseFormatter;
pub use payload::{parse_analysis_payload, parse_or_fallback, AnalysisPayload, PayloadError};
pub use processor::{ProcessedResponse, ResponseProcessor};
pub use quality::{ComplexityBand, QualityAnalyzer, QualityMetrics, QualityReport, Sentiment};
