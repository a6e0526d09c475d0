//! Binary sentiment classification.
//!
//! The pipeline only sees the `SentimentModel` trait. The real model is
//! loaded once at start-up and shared read-only between requests.

pub mod distilbert;
pub mod mock;

use serde::Serialize;

use crate::error::PipelineError;

pub use distilbert::DistilBertClassifier;
pub use mock::MockSentimentModel;

pub const POSITIVE: &str = "POSITIVE";
pub const NEGATIVE: &str = "NEGATIVE";

/// Top-ranked label and its probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// A pretrained two-class text classifier.
///
/// Implementations truncate oversized input silently and must be safe to
/// call from many threads at once.
pub trait SentimentModel: Send + Sync {
    fn classify(&self, text: &str) -> Result<Classification, PipelineError>;

    /// Identifier reported by the health endpoint
    fn model_id(&self) -> &str;
}
