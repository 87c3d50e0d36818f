//! Static preview glyphs for files that are not rendered as thumbnails.
//!
//! The markup is injected into the host page's icon surface as-is, so
//! it carries its own colors and needs no stylesheet support.

/// Outline of a page with a folded corner, shared by both glyphs.
const PAGE_OUTLINE: &str = r#"<path d="M14 2H6C5.47 2 4.96 2.21 4.59 2.59C4.21 2.96 4 3.47 4 4V20C4 20.53 4.21 21.04 4.59 21.41C4.96 21.79 5.47 22 6 22H18C18.53 22 19.04 21.79 19.41 21.41C19.79 21.04 20 20.53 20 20V8L14 2Z"/><path d="M14 2V8H20"/>"#;

/// Text lines drawn on the PDF page.
const PDF_LINES: &str = r#"<path d="M16 13H8"/><path d="M16 17H8"/><path d="M10 9H8"/>"#;

/// Stroke color of the PDF glyph and label.
const PDF_COLOR: &str = "#dc3545";

/// Stroke color of the generic glyph.
const GENERIC_COLOR: &str = "#6c757d";

/// A static glyph shown on the icon surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconGlyph {
    /// Page with text lines and a `PDF` label underneath.
    Pdf,
    /// Blank page, no label.
    Generic,
}

impl IconGlyph {
    /// Label rendered below the glyph, if any.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Pdf => Some("PDF"),
            Self::Generic => None,
        }
    }

    /// Whether the icon surface lays the glyph and label out as a column.
    #[must_use]
    pub const fn stacked(self) -> bool {
        self.label().is_some()
    }

    /// Inner HTML for the icon surface: an inline SVG, plus the label.
    #[must_use]
    pub fn markup(self) -> String {
        let (color, extra) = match self {
            Self::Pdf => (PDF_COLOR, PDF_LINES),
            Self::Generic => (GENERIC_COLOR, ""),
        };
        let svg = format!(
            r#"<svg width="64" height="64" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg" stroke="{color}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">{PAGE_OUTLINE}{extra}</svg>"#
        );
        match self.label() {
            Some(label) => format!(
                r#"{svg}<span style="display: block; margin-top: 0.5rem; color: {color}; font-weight: 600;">{label}</span>"#
            ),
            None => svg,
        }
    }
}
