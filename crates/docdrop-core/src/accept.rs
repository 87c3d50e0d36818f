//! Optional name/size policy applied before a file is selected.
//!
//! The picker's `accept` attribute filters the native dialog, but
//! drag-and-drop bypasses it. Running the same check on every
//! selection keeps both entry points consistent. Only metadata is
//! inspected; contents are the server's business.

use serde::{Deserialize, Serialize};

use crate::size::format_size;
use crate::types::SelectedFile;

/// Extensions accepted by the document upload form.
const DOCUMENT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "bmp", "webp", "pdf"];

/// Upload size limit of the document upload form (50 MB).
const DOCUMENT_MAX_SIZE: u64 = 50 * 1024 * 1024;

/// Which files the widget accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptPolicy {
    /// Allowed extensions, without the dot, compared case-insensitively.
    /// Empty means any extension.
    pub extensions: Vec<String>,
    /// Largest accepted file, in bytes.
    pub max_size_bytes: Option<u64>,
}

impl Default for AcceptPolicy {
    fn default() -> Self {
        Self::documents()
    }
}

/// Why a file was turned away.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The extension is not in the allowed list.
    #[error("Unsupported file type: {name}")]
    Extension {
        /// Name of the rejected file.
        name: String,
    },
    /// The file exceeds the size limit.
    #[error("File is too large ({size}). Maximum size: {limit}")]
    TooLarge {
        /// Formatted size of the rejected file.
        size: String,
        /// Formatted limit.
        limit: String,
    },
}

impl AcceptPolicy {
    /// The image-and-PDF policy of the document upload form.
    #[must_use]
    pub fn documents() -> Self {
        Self {
            extensions: DOCUMENT_EXTENSIONS.iter().map(|&e| e.to_owned()).collect(),
            max_size_bytes: Some(DOCUMENT_MAX_SIZE),
        }
    }

    /// Check a file against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::Extension`] if the extension list is
    /// non-empty and the file's extension is missing or not listed.
    /// Returns [`Rejection::TooLarge`] if the file exceeds
    /// `max_size_bytes`.
    pub fn check(&self, file: &SelectedFile) -> Result<(), Rejection> {
        if !self.extensions.is_empty() {
            let allowed = file.extension().is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(&ext))
            });
            if !allowed {
                return Err(Rejection::Extension {
                    name: file.name.clone(),
                });
            }
        }

        if let Some(limit) = self.max_size_bytes
            && file.size_bytes > limit
        {
            let (size, limit) = describe_excess(file.size_bytes, limit);
            return Err(Rejection::TooLarge { size, limit });
        }

        Ok(())
    }

    /// Value for the picker's `accept` attribute, e.g. `".jpg,.pdf"`.
    ///
    /// Empty when any extension is allowed.
    #[must_use]
    pub fn accept_attribute(&self) -> String {
        self.extensions
            .iter()
            .map(|e| format!(".{}", e.trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Formatted size and limit for a [`Rejection::TooLarge`].
///
/// Falls back to exact byte counts when rounding would print the two
/// as the same value.
fn describe_excess(size: u64, limit: u64) -> (String, String) {
    let (rounded_size, rounded_limit) = (format_size(size), format_size(limit));
    if rounded_size == rounded_limit {
        (format!("{size} bytes"), format!("{limit} bytes"))
    } else {
        (rounded_size, rounded_limit)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn documents_accepts_images_and_pdfs() {
        let policy = AcceptPolicy::documents();
        assert_eq!(policy.check(&SelectedFile::new("scan.TIF", 10, "image/tiff")), Ok(()));
        assert_eq!(policy.check(&SelectedFile::new("report.pdf", 10, "")), Ok(()));
    }

    #[test]
    fn unlisted_extension_is_rejected() {
        let policy = AcceptPolicy::documents();
        let err = policy
            .check(&SelectedFile::new("setup.exe", 10, "application/octet-stream"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: setup.exe");

        assert!(policy.check(&SelectedFile::new("README", 10, "")).is_err());
    }

    #[test]
    fn oversized_file_is_rejected_with_distinguishable_sizes() {
        let policy = AcceptPolicy::documents();
        let err = policy
            .check(&SelectedFile::new("huge.png", DOCUMENT_MAX_SIZE + 1, "image/png"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "File is too large (52428801 bytes). Maximum size: 52428800 bytes"
        );

        let err = policy
            .check(&SelectedFile::new("huge.png", 60 * 1024 * 1024, "image/png"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "File is too large (60 MB). Maximum size: 50 MB"
        );
        // Exactly at the limit is fine.
        assert_eq!(
            policy.check(&SelectedFile::new("max.png", DOCUMENT_MAX_SIZE, "image/png")),
            Ok(())
        );
    }

    #[test]
    fn empty_extension_list_allows_anything() {
        let policy = AcceptPolicy {
            extensions: Vec::new(),
            max_size_bytes: None,
        };
        assert_eq!(policy.check(&SelectedFile::new("a.bin", u64::MAX, "")), Ok(()));
        assert_eq!(policy.accept_attribute(), "");
    }

    #[test]
    fn accept_attribute_normalizes_dots() {
        let policy = AcceptPolicy {
            extensions: vec!["png".into(), ".pdf".into()],
            max_size_bytes: None,
        };
        assert_eq!(policy.accept_attribute(), ".png,.pdf");
        assert_eq!(policy.check(&SelectedFile::new("a.PDF", 1, "")), Ok(()));
    }
}
