//! Shared types for the docdrop selection widget.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::size::format_size;

/// MIME prefix shared by every image type.
const IMAGE_MIME_PREFIX: &str = "image/";

/// MIME type browsers report for PDF documents.
const PDF_MIME: &str = "application/pdf";

/// Metadata of the file the user picked or dropped.
///
/// The bytes themselves stay with the host environment; the browser
/// layer keeps the native `File` handle next to this value and only
/// reads it to build an image preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// File name as reported by the browser (no directory component).
    pub name: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// MIME type as reported by the browser. May be empty when the
    /// browser cannot guess the type.
    pub mime_type: String,
}

impl SelectedFile {
    /// Create a new file description.
    #[must_use]
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Preview classification for this file.
    #[must_use]
    pub fn kind(&self) -> FileKind {
        FileKind::classify(&self.name, &self.mime_type)
    }

    /// Human-readable size, e.g. `"1.5 KB"`.
    #[must_use]
    pub fn formatted_size(&self) -> String {
        format_size(self.size_bytes)
    }

    /// Lowercased extension without the dot, if the name has one.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// How a file is previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Raster image, previewed as a thumbnail.
    Image,
    /// PDF document, previewed with the PDF glyph and label.
    Pdf,
    /// Anything else, previewed with the generic file glyph.
    Other,
}

impl FileKind {
    /// Classify a file by MIME type, falling back to the name for PDFs.
    ///
    /// Priority order:
    /// 1. MIME starts with `image/` -> [`FileKind::Image`]
    /// 2. MIME is `application/pdf`, or the name ends in `.pdf`
    ///    (ASCII case-insensitive) -> [`FileKind::Pdf`]
    /// 3. otherwise [`FileKind::Other`]
    #[must_use]
    pub fn classify(name: &str, mime_type: &str) -> Self {
        if mime_type.starts_with(IMAGE_MIME_PREFIX) {
            Self::Image
        } else if mime_type == PDF_MIME || has_pdf_extension(name) {
            Self::Pdf
        } else {
            Self::Other
        }
    }
}

fn has_pdf_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

/// Top-level state of the widget.
///
/// `Empty` and `Selected` alternate through selection and removal.
/// `Submitting` is terminal: the page either navigates away or the
/// host resets the widget after the server responds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    /// No file selected; the picker prompt is visible.
    Empty,
    /// A file is selected; the summary and preview are visible.
    Selected,
    /// The form was submitted; the submit control is locked.
    Submitting,
}

impl UiState {
    /// Lowercase name, as exposed to host-page scripts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Selected => "selected",
            Self::Submitting => "submitting",
        }
    }
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_mime_wins_over_pdf_extension() {
        assert_eq!(FileKind::classify("scan.pdf", "image/png"), FileKind::Image);
    }

    #[test]
    fn pdf_by_mime() {
        assert_eq!(
            FileKind::classify("download", "application/pdf"),
            FileKind::Pdf
        );
    }

    #[test]
    fn pdf_by_extension_is_case_insensitive() {
        assert_eq!(FileKind::classify("report.PDF", ""), FileKind::Pdf);
        assert_eq!(FileKind::classify("report.Pdf", ""), FileKind::Pdf);
    }

    #[test]
    fn pdf_needs_a_real_extension() {
        // "pdf" as the whole name, or embedded mid-name, is not an extension.
        assert_eq!(FileKind::classify("pdf", ""), FileKind::Other);
        assert_eq!(FileKind::classify("my.pdf.txt", "text/plain"), FileKind::Other);
    }

    #[test]
    fn unknown_is_other() {
        assert_eq!(FileKind::classify("notes.txt", "text/plain"), FileKind::Other);
        assert_eq!(FileKind::classify("blob", ""), FileKind::Other);
    }

    #[test]
    fn extension_is_lowercased() {
        let file = SelectedFile::new("Photo.JPEG", 10, "image/jpeg");
        assert_eq!(file.extension().as_deref(), Some("jpeg"));
        assert_eq!(SelectedFile::new("README", 1, "").extension(), None);
    }

    #[test]
    fn ui_state_serializes_lowercase() {
        let json = serde_json::to_string(&UiState::Submitting).unwrap_or_default();
        assert_eq!(json, "\"submitting\"");
        assert_eq!(UiState::Empty.to_string(), "empty");
    }
}
