//! docdrop-core: File selection state machine (sans-IO).
//!
//! Models the single-file upload widget as plain data:
//! pick or drop -> [`Selection::select`] -> [`Preview`] classification ->
//! optional [`Selection::clear`] -> [`Selection::submit`].
//!
//! This crate has **no browser dependencies** -- it never touches the
//! DOM or reads file bytes. The browser layer (`docdrop-io`) feeds it
//! file metadata and renders the [`View`] it produces.

pub mod accept;
pub mod config;
pub mod drag;
pub mod icon;
pub mod preview;
pub mod selection;
pub mod size;
pub mod types;

pub use accept::AcceptPolicy;
pub use config::{ConfigError, SurfaceIds, WidgetConfig};
pub use drag::{DragAffordance, DragKind};
pub use icon::IconGlyph;
pub use preview::{ImagePreview, Preview, VisibleSurface};
pub use selection::{ReadTicket, Selection, SelectionError, Summary, View};
pub use size::format_size;
pub use types::{FileKind, SelectedFile, UiState};
