//! Upload category validation.
//!
//! Each document category accepts a fixed set of content formats. CVs must be
//! text-native, since OCR errors would corrupt the skill and degree terms
//! downstream consumers rely on; SOPs and transcripts are sometimes only
//! available as scans, so image input is tolerated there. The matrix is
//! declared once and consulted by both the support check and the error
//! message that lists accepted formats.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::detect::FormatTag;

/// Declared purpose of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocCategory {
    /// Curriculum vitae or resume.
    Cv,
    /// Statement of purpose.
    Sop,
    /// Academic transcript.
    Transcript,
    /// Motivation letter.
    MotivationLetter,
}

/// Accepted formats per category.
const SUPPORT_MATRIX: &[(DocCategory, &[FormatTag])] = &[
    (DocCategory::Cv, &[FormatTag::Pdf, FormatTag::Docx]),
    (
        DocCategory::Sop,
        &[
            FormatTag::Pdf,
            FormatTag::Docx,
            FormatTag::Txt,
            FormatTag::Jpg,
            FormatTag::Png,
        ],
    ),
    (
        DocCategory::MotivationLetter,
        &[
            FormatTag::Pdf,
            FormatTag::Docx,
            FormatTag::Txt,
            FormatTag::Jpg,
            FormatTag::Png,
        ],
    ),
    (
        DocCategory::Transcript,
        &[FormatTag::Pdf, FormatTag::Jpg, FormatTag::Png],
    ),
];

impl DocCategory {
    /// Parses a declared category string.
    ///
    /// Normalizes case, surrounding whitespace, and separator characters, and
    /// accepts the "resume" alias for `Cv`. Returns `None` for anything
    /// outside the known set.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "cv" | "resume" => Some(DocCategory::Cv),
            "sop" | "statement of purpose" => Some(DocCategory::Sop),
            "transcript" => Some(DocCategory::Transcript),
            "motivation letter" => Some(DocCategory::MotivationLetter),
            _ => None,
        }
    }

    /// Returns the canonical name for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DocCategory::Cv => "cv",
            DocCategory::Sop => "sop",
            DocCategory::Transcript => "transcript",
            DocCategory::MotivationLetter => "motivation letter",
        }
    }

    /// Returns the formats accepted for this category.
    #[must_use]
    pub fn accepted_formats(&self) -> &'static [FormatTag] {
        SUPPORT_MATRIX
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, formats)| *formats)
            .unwrap_or(&[])
    }
}

impl fmt::Display for DocCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` when `format` is accepted for `category`.
///
/// Unknown content is never accepted for any category; the check fails
/// closed.
#[must_use]
pub fn is_supported(format: FormatTag, category: DocCategory) -> bool {
    category.accepted_formats().contains(&format)
}
