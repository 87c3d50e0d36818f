//! The native `<input type="file">` and its file list.
//!
//! The input's file list is what the form actually transmits, so it is
//! kept in step with the selection: empty when nothing is selected,
//! exactly the selected file otherwise. Dropped files do not reach the
//! input on their own and are copied in through a `DataTransfer`.

use docdrop_core::{SelectedFile, drag};
use wasm_bindgen::JsValue;
use web_sys::{DataTransfer, Event, EventInit, File, FileList, HtmlInputElement};

/// Metadata of a browser `File`.
#[must_use]
pub fn describe(file: &File) -> SelectedFile {
    // `Blob.size` is a non-negative integer below 2^53.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let size_bytes = file.size() as u64;
    SelectedFile::new(file.name(), size_bytes, file.type_())
}

/// First file of a list; additional files are discarded.
#[must_use]
pub fn first_file(list: Option<&FileList>) -> Option<File> {
    let list = list?;
    drag::first_file((0..list.length()).filter_map(|i| list.get(i)))
}

/// Number of files currently in the input.
#[must_use]
pub fn file_count(input: &HtmlInputElement) -> usize {
    input.files().map_or(0, |files| files.length() as usize)
}

/// Replace the input's file list with exactly `file`.
///
/// # Errors
///
/// Returns the `JsValue` error if `DataTransfer` is unavailable or
/// refuses the file.
pub fn set_file(input: &HtmlInputElement, file: &File) -> Result<(), JsValue> {
    let transfer = DataTransfer::new()?;
    transfer.items().add_with_file(file)?;
    input.set_files(transfer.files().as_ref());
    Ok(())
}

/// Empty the input's file list.
pub fn clear(input: &HtmlInputElement) {
    input.set_value("");
}

/// Fire a bubbling `change` event on the input, as a picker selection
/// would, so other listeners on the page observe dropped files too.
///
/// # Errors
///
/// Returns the `JsValue` error if the event cannot be constructed.
pub fn dispatch_change(input: &HtmlInputElement) -> Result<(), JsValue> {
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict("change", &init)?;
    input.dispatch_event(&event)?;
    Ok(())
}
