//! Error types for the classification pipeline and model start-up.
//!
//! `PipelineError` keeps its variant all the way out to the boundary
//! layers; only `handler` and `http_server` turn it into a status code.

use thiserror::Error;

/// Prefix used for every server-side failure message.
pub const PROCESSING_ERROR_PREFIX: &str = "Error processing CV";

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Filename does not end in `.pdf` (or no file was uploaded at all)
    #[error("Only PDF files are supported")]
    InvalidInputKind,

    /// Extraction succeeded but produced only whitespace
    #[error("No text could be extracted from the PDF")]
    NoExtractableText,

    #[error("{0}")]
    MalformedDocument(String),

    #[error("{0}")]
    InferenceFailure(String),

    /// Anything else that went wrong while serving the request
    #[error("{0}")]
    ProcessingFailure(String),
}

impl PipelineError {
    /// True for errors caused by what the caller sent.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::InvalidInputKind | PipelineError::NoExtractableText)
    }

    /// Transport status for this error (400 for input errors, 500 otherwise).
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// Message shown to the caller. Server-side failures embed the
    /// original error text after a fixed prefix.
    pub fn public_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            format!("{}: {}", PROCESSING_ERROR_PREFIX, self)
        }
    }

    /// Short tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidInputKind => "invalid_input_kind",
            PipelineError::NoExtractableText => "no_extractable_text",
            PipelineError::MalformedDocument(_) => "malformed_document",
            PipelineError::InferenceFailure(_) => "inference_failure",
            PipelineError::ProcessingFailure(_) => "processing_failure",
        }
    }
}

impl From<candle_core::Error> for PipelineError {
    fn from(e: candle_core::Error) -> Self {
        PipelineError::InferenceFailure(e.to_string())
    }
}

/// Failures while loading the classifier at start-up.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to reach Hugging Face Hub: {0}")]
    Hub(#[from] hf_hub::api::sync::ApiError),

    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to load tokenizer: {0}")]
    Tokenizer(String),

    #[error("Failed to build model: {0}")]
    Candle(#[from] candle_core::Error),

    #[error("Model config has no id2label entry for class {0}")]
    MissingLabel(usize),
}
