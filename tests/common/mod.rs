#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use edubot::chat::scholarships::{FeedError, ScholarshipItem, ScholarshipSource};
use edubot::chat::universities::{DirectoryError, UniversityDirectory, UniversityRecord};
use edubot::document::{OcrEngine, OcrError};
use edubot::generation::{GenerationClient, GenerationError, GenerationRequest};
use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};

// ============================================================================
// Scripted Collaborators
// ============================================================================

/// Generation client that replays queued responses and records every request.
pub struct ScriptedClient {
    responses: Mutex<Vec<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(response: &str) -> Self {
        Self::new(vec![Ok(response.to_string())])
    }

    pub fn failing() -> Self {
        Self::new(vec![Err(GenerationError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })])
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no generation request was captured")
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn complete(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        responses.remove(0)
    }
}

/// OCR engine that recognizes a fixed string for any image.
pub struct FixedOcr(pub &'static str);

impl OcrEngine for FixedOcr {
    fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
        Ok(self.0.to_string())
    }
}

/// OCR engine that always reports itself unavailable.
pub struct UnavailableOcr;

impl OcrEngine for UnavailableOcr {
    fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
        Err(OcrError::EngineUnavailable {
            reason: "scripted failure".to_string(),
        })
    }
}

/// Scholarship source returning a fixed item list.
pub struct FixedScholarships(pub Vec<ScholarshipItem>);

#[async_trait]
impl ScholarshipSource for FixedScholarships {
    async fn fetch_recent(&self) -> Result<Vec<ScholarshipItem>, FeedError> {
        Ok(self.0.clone())
    }
}

/// Scholarship source that always fails.
pub struct FailingScholarships;

#[async_trait]
impl ScholarshipSource for FailingScholarships {
    async fn fetch_recent(&self) -> Result<Vec<ScholarshipItem>, FeedError> {
        Err(FeedError::Parse {
            source: rss::Error::Eof,
        })
    }
}

/// University directory returning a fixed record list.
pub struct FixedDirectory(pub Vec<UniversityRecord>);

#[async_trait]
impl UniversityDirectory for FixedDirectory {
    async fn search(
        &self,
        _country: &str,
        _name: Option<&str>,
    ) -> Result<Vec<UniversityRecord>, DirectoryError> {
        Ok(self.0.clone())
    }
}

/// University directory that always fails.
pub struct FailingDirectory;

#[async_trait]
impl UniversityDirectory for FailingDirectory {
    async fn search(
        &self,
        _country: &str,
        _name: Option<&str>,
    ) -> Result<Vec<UniversityRecord>, DirectoryError> {
        let source = reqwest::Client::new()
            .get("not a valid url")
            .build()
            .expect_err("invalid URL must produce an error");
        Err(DirectoryError::Http { source })
    }
}

// ============================================================================
// Programmatic Fixtures
// ============================================================================

/// Builds a one-page PDF whose text layer contains `text`.
pub fn pdf_with_text(text: &str) -> Vec<u8> {
    let operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 24.into()]),
        Operation::new("Td", vec![100.into(), 600.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ];
    build_pdf(operations)
}

/// Builds a one-page PDF with no text layer at all.
pub fn pdf_without_text() -> Vec<u8> {
    build_pdf(Vec::new())
}

fn build_pdf(operations: Vec<Operation>) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("Failed to encode PDF content"),
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize PDF");
    bytes
}

/// Builds a `.docx` file containing the given paragraphs in order.
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = docx_rs::Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(
            docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*text)),
        );
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack docx");
    buffer.into_inner()
}

/// Builds a small valid PNG.
pub fn png_bytes() -> Vec<u8> {
    let image = DynamicImage::new_rgb8(4, 4);
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer.into_inner()
}
