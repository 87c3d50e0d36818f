//! docdrop-io: Browser bindings for the docdrop selection widget.
//!
//! Binds a host page's upload form markup to the
//! [`docdrop_core::Selection`] state machine: locates the surfaces,
//! listens for picker, drag-and-drop, remove, and submit events,
//! reads image previews, and renders the resulting view.
//!
//! Everything except [`render::display_value`] requires a browser
//! environment (`wasm32-unknown-unknown` target).

pub mod picker;
pub mod reader;
pub mod render;
pub mod surfaces;
pub mod widget;

pub use reader::ReadError;
pub use surfaces::{AttachError, Surfaces};
pub use widget::Widget;
