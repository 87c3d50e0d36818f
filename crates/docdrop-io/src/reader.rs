//! Read a browser `File` as a data URI for the image preview.
//!
//! Wraps [`FileReader.readAsDataURL()`][mdn] in a future. The reader's
//! `load` and `error` handlers are the promise's own resolve/reject
//! functions, so no closures are leaked.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/FileReader/readAsDataURL

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader};

/// Errors that can occur while reading a preview.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// A browser API call failed, or the reader fired `error`.
    #[error("file read failed: {0}")]
    JsError(String),

    /// The reader finished without a string result.
    #[error("file reader did not produce a data URI")]
    NotADataUri,
}

impl From<JsValue> for ReadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Read `file` as a `data:` URI.
///
/// The future never resolves if the browser never fires `load` or
/// `error`; callers must not depend on completion.
///
/// # Errors
///
/// Returns [`ReadError::JsError`] if the reader cannot be created or
/// fails, and [`ReadError::NotADataUri`] if its result is not a string.
#[allow(clippy::future_not_send)] // WASM is single-threaded; FileReader is !Send
pub async fn read_data_url(file: &File) -> Result<String, ReadError> {
    let reader = FileReader::new()?;

    let promise = js_sys::Promise::new(&mut |resolve: js_sys::Function, reject: js_sys::Function| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });

    reader.read_as_data_url(file)?;
    JsFuture::from(promise).await?;

    let uri = reader.result()?.as_string().ok_or(ReadError::NotADataUri)?;
    if uri.starts_with("data:") {
        Ok(uri)
    } else {
        Err(ReadError::NotADataUri)
    }
}
