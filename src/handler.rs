//! Function-style entry point
//!
//! Same operation as `POST /classify`, shaped for hosts that hand over a
//! request value and expect a `(body, status)` pair back instead of an
//! HTTP response. Errors come back as `{"error": "..."}`.

use serde_json::{json, Value};

use crate::error::PipelineError;
use crate::pipeline::{CvClassifier, UploadedDocument};

pub const METHOD_POST: &str = "POST";

/// Request as received from a function host
#[derive(Debug, Clone)]
pub struct FunctionRequest {
    pub method: String,
    /// The `file` upload, if the caller sent one
    pub file: Option<UploadedDocument>,
}

impl FunctionRequest {
    pub fn post(file: UploadedDocument) -> Self {
        Self {
            method: METHOD_POST.to_string(),
            file: Some(file),
        }
    }
}

/// Run the request and return `(body, status)`.
pub fn handle(classifier: &CvClassifier, request: &FunctionRequest) -> (Value, u16) {
    if request.method != METHOD_POST {
        return (json!({"error": "Only POST requests are supported"}), 405);
    }

    let Some(file) = &request.file else {
        return error_body(&PipelineError::InvalidInputKind);
    };

    match classifier.handle(file) {
        Ok(response) => match serde_json::to_value(&response) {
            Ok(body) => (body, 200),
            Err(e) => error_body(&PipelineError::ProcessingFailure(e.to_string())),
        },
        Err(e) => error_body(&e),
    }
}

fn error_body(e: &PipelineError) -> (Value, u16) {
    (json!({"error": e.public_message()}), e.status_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryTable;
    use crate::sentiment::MockSentimentModel;
    use std::sync::Arc;

    fn classifier() -> CvClassifier {
        CvClassifier::new(Arc::new(MockSentimentModel::new()), CategoryTable::default())
    }

    #[test]
    fn test_non_post_is_405() {
        for method in ["GET", "PUT", "DELETE", "post"] {
            let request = FunctionRequest {
                method: method.to_string(),
                file: Some(UploadedDocument::new("cv.pdf", Vec::new())),
            };
            let (body, status) = handle(&classifier(), &request);
            assert_eq!(status, 405, "method {}", method);
            assert_eq!(body["error"], "Only POST requests are supported");
        }
    }

    #[test]
    fn test_missing_file_is_400() {
        let request = FunctionRequest {
            method: "POST".to_string(),
            file: None,
        };
        let (body, status) = handle(&classifier(), &request);
        assert_eq!(status, 400);
        assert_eq!(body["error"], "Only PDF files are supported");
    }

    #[test]
    fn test_wrong_extension_is_400() {
        let request = FunctionRequest::post(UploadedDocument::new("report.txt", b"hello".to_vec()));
        let (body, status) = handle(&classifier(), &request);
        assert_eq!(status, 400);
        assert_eq!(body, json!({"error": "Only PDF files are supported"}));
    }

    #[test]
    fn test_malformed_pdf_is_500() {
        let request = FunctionRequest::post(UploadedDocument::new("cv.pdf", b"garbage".to_vec()));
        let (body, status) = handle(&classifier(), &request);
        assert_eq!(status, 500);
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Error processing CV: "), "{}", message);
    }
}
