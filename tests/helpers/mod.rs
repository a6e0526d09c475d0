//! Shared fixtures: hand-built PDFs, multipart bodies, mock-backed classifiers.

#![allow(dead_code)]

use std::sync::Arc;

use cv_classifier::categories::CategoryTable;
use cv_classifier::sentiment::MockSentimentModel;
use cv_classifier::CvClassifier;

pub const BOUNDARY: &str = "cv-classifier-test-boundary";

/// Page content for `build_pdf`.
pub enum Page<'a> {
    Text(&'a str),
    /// Vector drawing only, no text operators
    Graphics,
}

/// Single-page PDF with one line of text.
pub fn text_pdf(text: &str) -> Vec<u8> {
    build_pdf(&[Page::Text(text)])
}

/// PDF whose pages carry drawings but no text.
pub fn graphics_only_pdf() -> Vec<u8> {
    build_pdf(&[Page::Graphics, Page::Graphics])
}

/// Minimal valid PDF 1.4 using the built-in Helvetica font.
pub fn build_pdf(pages: &[Page]) -> Vec<u8> {
    // 1: catalog, 2: page tree, 3: font, then (page, content) pairs
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + 2 * i).collect();

    let mut objects: Vec<String> = Vec::new();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids = page_ids
        .iter()
        .map(|id| format!("{} 0 R", id))
        .collect::<Vec<_>>()
        .join(" ");
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids,
        pages.len()
    ));
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );

    for (page, page_id) in pages.iter().zip(&page_ids) {
        let content = match page {
            Page::Text(text) => format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", escape(text)),
            Page::Graphics => "0.2 0.4 0.8 rg 72 72 200 200 re f".to_string(),
        };
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            page_id + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in &offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.extend_from_slice(xref.as_bytes());
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// multipart/form-data body with a single file field.
pub fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn classifier_with(model: Arc<MockSentimentModel>) -> CvClassifier {
    CvClassifier::new(model, CategoryTable::default())
}

pub fn mock_classifier() -> CvClassifier {
    classifier_with(Arc::new(MockSentimentModel::new()))
}
