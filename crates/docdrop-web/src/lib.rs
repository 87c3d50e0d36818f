//! WASM entry point for server-rendered upload pages.
//!
//! The page loads this module and either attaches explicitly:
//!
//! ```js
//! const widget = DocDrop.attach(JSON.stringify({ drag_class: "hot" }));
//! // ...
//! widget.destroy();
//! ```
//!
//! or opts in to attaching once the DOM is ready, keeping the widget
//! for the page's lifetime:
//!
//! ```js
//! attachOnReady();
//! ```
//!
//! Instantiating the module only installs the panic hook and logger;
//! nothing is attached until one of the two is called.
//!
//! Configuration is the JSON form of [`WidgetConfig`]; every field is
//! optional and defaults to the stock upload page markup.

use std::cell::RefCell;

use docdrop_core::WidgetConfig;
use docdrop_io::{AttachError, Widget};
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

thread_local! {
    /// Widget attached by [`attach_on_ready`]; lives for the page.
    static READY_WIDGET: RefCell<Option<Widget>> = const { RefCell::new(None) };
}

/// Install the panic hook and console logger.
///
/// Called automatically when the WASM module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed, which is fine.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// A widget attached from JavaScript.
#[wasm_bindgen]
pub struct DocDrop {
    widget: Option<Widget>,
}

#[wasm_bindgen]
impl DocDrop {
    /// Attach to the current document.
    ///
    /// # Errors
    ///
    /// Throws if the configuration is invalid, the picker input or
    /// drop target is missing, or there is no document.
    pub fn attach(config_json: Option<String>) -> Result<Self, JsError> {
        let config = parse_config(config_json.as_deref())?;
        let document = document()?;
        let widget = Widget::attach(&document, config)?;
        Ok(Self {
            widget: Some(widget),
        })
    }

    /// Detach all listeners. Further calls are no-ops.
    pub fn destroy(&mut self) {
        if let Some(widget) = self.widget.take() {
            widget.destroy();
        }
    }

    /// `"empty"`, `"selected"`, or `"submitting"`; `undefined` once
    /// destroyed.
    #[must_use]
    pub fn state(&self) -> Option<String> {
        self.widget
            .as_ref()
            .map(|widget| widget.state().as_str().to_owned())
    }

    /// Name of the selected file, if any.
    #[wasm_bindgen(js_name = selectedFileName)]
    #[must_use]
    pub fn selected_file_name(&self) -> Option<String> {
        self.widget
            .as_ref()
            .and_then(Widget::selected_file)
            .map(|file| file.name)
    }
}

/// Attach once the DOM is ready, keeping the widget for the page's
/// lifetime. A page without the upload markup is left untouched.
///
/// # Errors
///
/// Throws if the configuration is invalid or there is no document.
#[wasm_bindgen(js_name = attachOnReady)]
pub fn attach_on_ready(config_json: Option<String>) -> Result<(), JsError> {
    let config = parse_config(config_json.as_deref())?;
    let document = document()?;

    if is_loading(&document) {
        let callback = Closure::<dyn FnMut()>::once_into_js(move || attach_page_widget(config));
        document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
            .map_err(|e| JsError::new(&format!("failed to wait for DOMContentLoaded: {e:?}")))?;
    } else {
        attach_page_widget(config);
    }
    Ok(())
}

fn attach_page_widget(config: WidgetConfig) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        warn!("no document; upload widget not attached");
        return;
    };
    match Widget::attach(&document, config) {
        Ok(widget) => READY_WIDGET.with(|slot| {
            // Replacing an earlier widget detaches it.
            slot.borrow_mut().replace(widget);
        }),
        Err(AttachError::MissingSurface(id)) => {
            warn!("upload widget not attached: #{id} is not on this page");
        }
        Err(e) => warn!("upload widget not attached: {e}"),
    }
}

fn parse_config(json: Option<&str>) -> Result<WidgetConfig, JsError> {
    match json {
        Some(json) if !json.trim().is_empty() => Ok(WidgetConfig::from_json(json)?),
        _ => Ok(WidgetConfig::default()),
    }
}

fn document() -> Result<Document, JsError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsError::new("no global document"))
}

fn is_loading(document: &Document) -> bool {
    defers_attach(&document.ready_state())
}

/// Whether a document in `ready_state` must wait for `DOMContentLoaded`
/// before its surfaces can be looked up.
fn defers_attach(ready_state: &str) -> bool {
    ready_state == "loading"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_config_is_the_default() {
        assert_eq!(parse_config(None).ok(), Some(WidgetConfig::default()));
        assert_eq!(parse_config(Some("  ")).ok(), Some(WidgetConfig::default()));
    }

    #[test]
    fn only_a_loading_document_defers_attach() {
        assert!(defers_attach("loading"));
        assert!(!defers_attach("interactive"));
        assert!(!defers_attach("complete"));
    }

    #[test]
    fn config_json_is_parsed() {
        let config = parse_config(Some(r#"{"empty_notice": "Choose a document"}"#)).ok();
        assert_eq!(
            config.map(|c| c.empty_notice).as_deref(),
            Some("Choose a document")
        );
    }
}
