//! Mock sentiment model for deterministic testing and offline runs.
//!
//! ```rust
//! use cv_classifier::sentiment::{MockSentimentModel, SentimentModel, NEGATIVE};
//!
//! let model = MockSentimentModel::new().with_result(NEGATIVE, 0.75);
//! let result = model.classify("any text").unwrap();
//! assert_eq!(result.label, NEGATIVE);
//! assert_eq!(model.calls(), vec!["any text".to_string()]);
//! ```

use std::sync::Mutex;

use super::{Classification, SentimentModel, POSITIVE};
use crate::error::PipelineError;

pub const MOCK_MODEL_ID: &str = "mock-sentiment";

/// Returns a fixed classification (or a fixed failure) and records every input.
#[derive(Debug)]
pub struct MockSentimentModel {
    result: Classification,
    failure: Option<String>,
    call_log: Mutex<Vec<String>>,
}

impl Default for MockSentimentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSentimentModel {
    /// Mock that answers `POSITIVE` with confidence 0.99.
    pub fn new() -> Self {
        Self {
            result: Classification::new(POSITIVE, 0.99),
            failure: None,
            call_log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_result(mut self, label: impl Into<String>, confidence: f32) -> Self {
        self.result = Classification::new(label, confidence);
        self
    }

    /// Make every call fail with an inference error carrying `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Texts passed to `classify`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.call_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

impl SentimentModel for MockSentimentModel {
    fn classify(&self, text: &str) -> Result<Classification, PipelineError> {
        if let Ok(mut log) = self.call_log.lock() {
            log.push(text.to_string());
        }

        match &self.failure {
            Some(message) => Err(PipelineError::InferenceFailure(message.clone())),
            None => Ok(self.result.clone()),
        }
    }

    fn model_id(&self) -> &str {
        MOCK_MODEL_ID
    }
}
