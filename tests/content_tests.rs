mod common;

use edubot::document::{extract_text, DocumentError, FormatTag};

use common::{
    docx_with_paragraphs, pdf_with_text, pdf_without_text, png_bytes, FixedOcr, UnavailableOcr,
};

// ============================================================================
// PDF Extraction Tests
// ============================================================================

#[test]
fn test_pdf_text_layer_extraction() {
    let bytes = pdf_with_text("Hello World");
    let text = extract_text(&bytes, FormatTag::Pdf, &FixedOcr("")).unwrap();

    assert!(text.contains("Hello World"));
}

#[test]
fn test_pdf_without_text_layer() {
    let bytes = pdf_without_text();
    let result = extract_text(&bytes, FormatTag::Pdf, &FixedOcr(""));

    assert!(matches!(result, Err(DocumentError::NoPdfTextLayer)));
}

#[test]
fn test_pdf_invalid_bytes() {
    let bytes = b"%PDF-1.5 but not really a pdf";
    let result = extract_text(bytes, FormatTag::Pdf, &FixedOcr(""));

    assert!(matches!(result, Err(DocumentError::PdfLoad { .. })));
}

// ============================================================================
// Word Extraction Tests
// ============================================================================

#[test]
fn test_docx_paragraphs_joined_with_newlines() {
    let bytes = docx_with_paragraphs(&["Hello", "World"]);
    let text = extract_text(&bytes, FormatTag::Docx, &FixedOcr("")).unwrap();

    assert_eq!(text, "Hello\nWorld");
}

#[test]
fn test_docx_single_paragraph() {
    let bytes = docx_with_paragraphs(&["Dear admissions committee,"]);
    let text = extract_text(&bytes, FormatTag::Docx, &FixedOcr("")).unwrap();

    assert_eq!(text, "Dear admissions committee,");
}

#[test]
fn test_docx_invalid_bytes() {
    let bytes = b"not a valid docx file";
    let result = extract_text(bytes, FormatTag::Docx, &FixedOcr(""));

    assert!(matches!(result, Err(DocumentError::WordLoad { .. })));
}

// ============================================================================
// Plain Text Extraction Tests
// ============================================================================

#[test]
fn test_text_passthrough() {
    let text = extract_text(b"Hello\nWorld\n", FormatTag::Txt, &FixedOcr("")).unwrap();
    assert_eq!(text, "Hello\nWorld");
}

#[test]
fn test_text_drops_invalid_utf8() {
    let bytes = b"caf\xC3\xA9 ok\xFF\xFE";
    let text = extract_text(bytes, FormatTag::Txt, &FixedOcr("")).unwrap();

    assert_eq!(text, "café ok");
}

#[test]
fn test_text_empty_input() {
    let text = extract_text(b"", FormatTag::Txt, &FixedOcr("")).unwrap();
    assert_eq!(text, "");
}

// ============================================================================
// Image Extraction Tests
// ============================================================================

#[test]
fn test_image_recognized_through_ocr() {
    let text = extract_text(&png_bytes(), FormatTag::Png, &FixedOcr("  OCR text out  ")).unwrap();

    assert_eq!(text, "OCR text out");
}

#[test]
fn test_image_invalid_bytes() {
    let result = extract_text(b"not an image", FormatTag::Jpg, &FixedOcr("irrelevant"));

    assert!(matches!(result, Err(DocumentError::ImageDecode { .. })));
}

#[test]
fn test_image_ocr_failure_propagates() {
    let result = extract_text(&png_bytes(), FormatTag::Png, &UnavailableOcr);

    assert!(matches!(result, Err(DocumentError::Ocr { .. })));
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[test]
fn test_unknown_format_has_no_extractor() {
    let result = extract_text(b"anything", FormatTag::Unknown, &FixedOcr(""));

    assert!(matches!(result, Err(DocumentError::NoExtractor { .. })));
}

#[test]
fn test_extracted_text_is_stripped() {
    let text = extract_text(b"\n\n  padded  \n\n", FormatTag::Txt, &FixedOcr("")).unwrap();
    assert_eq!(text, "padded");
}
