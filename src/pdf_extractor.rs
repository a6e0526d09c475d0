//! PDF text extraction wrapper
//!
//! Wraps the pdf-extract crate with error handling for:
//! - Bytes that are not a PDF at all
//! - Corrupted PDFs (including ones that make the parser panic)
//! - Scanned/image-only pages, which simply contribute no text

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, trace};

use crate::error::PipelineError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Extract the text of every page, in order, as one string.
///
/// Each page that yields text is appended followed by a single space;
/// pages without text add nothing. The result may be empty.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, PipelineError> {
    let pages = extract_pages(pdf_bytes)?;

    let mut text = String::new();
    for (index, page_text) in pages.iter().enumerate() {
        // pdf-extract opens every page with a blank-line separator
        let page_text = page_text.trim_start_matches('\n');
        trace!(page = index + 1, chars = page_text.len(), "page extracted");
        if !page_text.is_empty() {
            text.push_str(page_text);
            text.push(' ');
        }
    }

    debug!(pages = pages.len(), bytes = text.len(), "pdf text extracted");
    Ok(text)
}

/// Raw per-page text from the parser.
fn extract_pages(pdf_bytes: &[u8]) -> Result<Vec<String>, PipelineError> {
    if !pdf_bytes.starts_with(PDF_MAGIC) {
        return Err(PipelineError::MalformedDocument(
            "File is not a valid PDF (missing %PDF header)".to_string(),
        ));
    }

    // pdf-extract panics on some malformed inputs instead of returning Err
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
    }));

    match outcome {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(PipelineError::MalformedDocument(format!(
            "Failed to parse PDF: {}",
            e
        ))),
        Err(payload) => Err(PipelineError::MalformedDocument(format!(
            "Failed to parse PDF: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "parser panicked".to_string()
    }
}
