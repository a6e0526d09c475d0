//! CV classification pipeline
//!
//! PDF bytes -> page text -> sentiment label -> job category -> response.
//! Both boundary layers (`handler`, `http_server`) call `CvClassifier::handle`
//! and map the returned `PipelineError` to their own status codes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::categories::CategoryTable;
use crate::error::PipelineError;
use crate::pdf_extractor;
use crate::sentiment::SentimentModel;
use crate::utils;

/// Characters of extracted text echoed back in the response
pub const PREVIEW_CHARS: usize = 500;

const PDF_EXTENSION: &str = ".pdf";

/// A file as received from the caller. Lives for one request only.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn has_pdf_extension(&self) -> bool {
        self.filename.ends_with(PDF_EXTENSION)
    }
}

/// Successful classification payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub category: String,
    /// Model probability, widened to f64 without rounding
    pub confidence: f64,
    /// At most `PREVIEW_CHARS` characters, plus `...` when truncated
    pub extracted_text: String,
}

/// Request orchestrator. Holds the shared, read-only model.
#[derive(Clone)]
pub struct CvClassifier {
    model: Arc<dyn SentimentModel>,
    categories: CategoryTable,
}

impl CvClassifier {
    pub fn new(model: Arc<dyn SentimentModel>, categories: CategoryTable) -> Self {
        Self { model, categories }
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Run one upload through the pipeline.
    ///
    /// Checks run in order and the first failure wins: filename suffix,
    /// then non-blank extracted text.
    pub fn handle(&self, document: &UploadedDocument) -> Result<ClassifyResponse, PipelineError> {
        let span = info_span!(
            "classify_cv",
            request_id = %Uuid::new_v4(),
            filename = %document.filename,
            bytes = document.content.len()
        );
        let _guard = span.enter();

        let result = self.run(document);
        match &result {
            Ok(response) => info!(
                category = %response.category,
                confidence = response.confidence,
                "cv classified"
            ),
            Err(e) if e.is_client_error() => warn!(kind = e.kind(), error = %e, "cv rejected"),
            Err(e) => error!(kind = e.kind(), error = %e, "cv processing failed"),
        }
        result
    }

    fn run(&self, document: &UploadedDocument) -> Result<ClassifyResponse, PipelineError> {
        if !document.has_pdf_extension() {
            return Err(PipelineError::InvalidInputKind);
        }

        let text = pdf_extractor::extract_text(&document.content)?;
        if text.trim().is_empty() {
            return Err(PipelineError::NoExtractableText);
        }

        let classification = self.model.classify(&text)?;
        debug!(
            label = %classification.label,
            confidence = classification.confidence,
            "text classified"
        );

        let category = self.categories.map_category(&classification.label);
        debug!(
            category,
            candidates = self.categories.candidates(&classification.label).len(),
            "category mapped"
        );

        Ok(ClassifyResponse {
            category: category.to_string(),
            confidence: f64::from(classification.confidence),
            extracted_text: utils::preview(&text, PREVIEW_CHARS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::MockSentimentModel;

    fn classifier(model: MockSentimentModel) -> CvClassifier {
        CvClassifier::new(Arc::new(model), CategoryTable::default())
    }

    #[test]
    fn test_wrong_extension_rejected_before_parsing() {
        let model = Arc::new(MockSentimentModel::new());
        let cv = CvClassifier::new(model.clone(), CategoryTable::default());
        let doc = UploadedDocument::new("report.txt", b"%PDF-1.4 whatever".to_vec());

        let err = cv.handle(&doc).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInputKind));
        assert!(model.calls().is_empty());
    }

    #[test]
    fn test_extension_check_is_suffix_only() {
        assert!(UploadedDocument::new("cv.pdf", Vec::new()).has_pdf_extension());
        assert!(UploadedDocument::new("my.cv.pdf", Vec::new()).has_pdf_extension());
        assert!(!UploadedDocument::new("cv.pdf.txt", Vec::new()).has_pdf_extension());
        assert!(!UploadedDocument::new("cv.PDF", Vec::new()).has_pdf_extension());
        assert!(!UploadedDocument::new("", Vec::new()).has_pdf_extension());
    }

    #[test]
    fn test_garbage_pdf_is_malformed() {
        let cv = classifier(MockSentimentModel::new());
        let doc = UploadedDocument::new("cv.pdf", b"definitely not a pdf".to_vec());

        let err = cv.handle(&doc).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedDocument(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_response_serializes_expected_keys() {
        let response = ClassifyResponse {
            category: "Java Developer".to_string(),
            confidence: 0.99,
            extracted_text: "I love this job ".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["category"], "Java Developer");
        assert_eq!(obj["extracted_text"], "I love this job ");
        assert!((obj["confidence"].as_f64().unwrap() - 0.99).abs() < 1e-6);
    }
}
