//! Preview representation of the current selection.
//!
//! [`Preview`] is a sum type: the visible preview surface is derived
//! from the variant, never stored as independent visibility flags, so
//! the image and icon surfaces cannot both be shown.

use crate::icon::IconGlyph;
use crate::types::FileKind;

/// Progress of an image thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePreview {
    /// The data-URI read is in flight; nothing is shown yet.
    Loading,
    /// The read completed with this data URI.
    Ready(String),
}

/// What the preview area represents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Preview {
    /// No file selected: every surface hidden, no cached image data.
    #[default]
    None,
    /// Image thumbnail, possibly still loading.
    Image(ImagePreview),
    /// PDF glyph with label.
    PdfIcon,
    /// Generic file glyph.
    GenericIcon,
}

/// The one preview surface that should be visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleSurface<'a> {
    /// The image surface, with its `src`.
    Image(&'a str),
    /// The icon surface, with its glyph.
    Icon(IconGlyph),
}

impl Preview {
    /// Initial representation for a freshly selected file.
    ///
    /// Images start as [`ImagePreview::Loading`]: the icon surface is
    /// hidden immediately and the thumbnail appears once the read
    /// completes.
    #[must_use]
    pub const fn for_kind(kind: FileKind) -> Self {
        match kind {
            FileKind::Image => Self::Image(ImagePreview::Loading),
            FileKind::Pdf => Self::PdfIcon,
            FileKind::Other => Self::GenericIcon,
        }
    }

    /// The surface to show, or `None` if every surface is hidden.
    #[must_use]
    pub fn visible_surface(&self) -> Option<VisibleSurface<'_>> {
        match self {
            Self::None | Self::Image(ImagePreview::Loading) => None,
            Self::Image(ImagePreview::Ready(uri)) => Some(VisibleSurface::Image(uri)),
            Self::PdfIcon => Some(VisibleSurface::Icon(IconGlyph::Pdf)),
            Self::GenericIcon => Some(VisibleSurface::Icon(IconGlyph::Generic)),
        }
    }

    /// Whether an image read is still outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Image(ImagePreview::Loading))
    }

    /// Store a completed read.
    ///
    /// Only a loading image accepts data; any other variant is left
    /// untouched and `false` is returned.
    pub fn resolve(&mut self, data_uri: String) -> bool {
        if self.is_loading() {
            *self = Self::Image(ImagePreview::Ready(data_uri));
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_image_shows_nothing() {
        let preview = Preview::for_kind(FileKind::Image);
        assert!(preview.is_loading());
        assert_eq!(preview.visible_surface(), None);
    }

    #[test]
    fn resolved_image_shows_only_the_image() {
        let mut preview = Preview::for_kind(FileKind::Image);
        assert!(preview.resolve("data:image/png;base64,AAAA".into()));
        assert_eq!(
            preview.visible_surface(),
            Some(VisibleSurface::Image("data:image/png;base64,AAAA"))
        );
    }

    #[test]
    fn resolve_is_one_shot() {
        let mut preview = Preview::for_kind(FileKind::Image);
        assert!(preview.resolve("data:first".into()));
        assert!(!preview.resolve("data:second".into()));
        assert_eq!(preview.visible_surface(), Some(VisibleSurface::Image("data:first")));
    }

    #[test]
    fn icons_ignore_image_data() {
        let mut preview = Preview::for_kind(FileKind::Pdf);
        assert!(!preview.resolve("data:image/png;base64,AAAA".into()));
        assert_eq!(
            preview.visible_surface(),
            Some(VisibleSurface::Icon(IconGlyph::Pdf))
        );

        let mut preview = Preview::None;
        assert!(!preview.resolve("data:x".into()));
        assert_eq!(preview, Preview::None);
    }

    #[test]
    fn generic_kind_maps_to_generic_glyph() {
        assert_eq!(
            Preview::for_kind(FileKind::Other).visible_surface(),
            Some(VisibleSurface::Icon(IconGlyph::Generic))
        );
    }
}
