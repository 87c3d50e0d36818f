use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use docdrop_core::{AcceptPolicy, WidgetConfig};
use docdrop_io::Widget;

/// Page styles, including the `drag-over` affordance.
const UPLOAD_CSS: &str = include_str!("../assets/upload.css");

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    dioxus::launch(app);
}

/// Root component: a plain upload form in the markup the widget
/// expects, with the widget attached once the elements are mounted.
///
/// The form is ordinary HTML; Dioxus only renders it. Selection,
/// preview, and submission are handled entirely by the attached
/// [`Widget`], exactly as on a server-rendered page.
fn app() -> Element {
    let widget = use_hook(|| Rc::new(RefCell::new(None::<Widget>)));

    // --- Attach after the first render ---
    {
        let widget = Rc::clone(&widget);
        use_effect(move || {
            if widget.borrow().is_some() {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                log::warn!("no document; upload widget not attached");
                return;
            };
            let config = WidgetConfig {
                accept: Some(AcceptPolicy::documents()),
                empty_notice: "Please select a file to upload".into(),
                ..WidgetConfig::default()
            };
            match Widget::attach(&document, config) {
                Ok(attached) => *widget.borrow_mut() = Some(attached),
                Err(e) => log::warn!("upload widget not attached: {e}"),
            }
        });
    }

    // --- Detach on unmount ---
    use_drop(move || {
        if let Some(attached) = widget.borrow_mut().take() {
            attached.destroy();
        }
    });

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: UPLOAD_CSS }

        main { class: "upload-page",
            h1 { "Upload a document" }
            p { class: "hint",
                "JPEG, PNG, TIFF, BMP, WebP or PDF, up to 50 MB"
            }

            form {
                id: "upload-form",
                action: "/upload/",
                method: "post",
                enctype: "multipart/form-data",

                // Picker prompt and drop target
                div { id: "file-upload-area", class: "file-upload-area",
                    input {
                        id: "file-upload-input",
                        class: "file-input",
                        r#type: "file",
                        name: "file",
                    }
                    label { r#for: "file-upload-input",
                        "Drop a file here or click to browse"
                    }
                }

                // Selected-file summary and preview
                div {
                    id: "file-selected-info",
                    class: "file-selected-info",
                    style: "display: none;",

                    div { id: "file-preview", class: "file-preview",
                        img {
                            id: "file-preview-image",
                            alt: "Preview",
                            style: "display: none;",
                        }
                        div {
                            id: "file-preview-icon",
                            class: "file-preview-icon",
                            style: "display: none;",
                        }
                    }
                    div { class: "file-details",
                        span { id: "file-name", class: "file-name" }
                        span { id: "file-size", class: "file-size" }
                    }
                    button {
                        id: "file-remove-btn",
                        class: "file-remove-btn",
                        r#type: "button",
                        "Remove"
                    }
                }

                // Submit control with idle label and busy indicator
                button { id: "submit-btn", class: "submit-btn", r#type: "submit",
                    span { class: "btn-text", "Extract text" }
                    span { class: "btn-loader", style: "display: none;",
                        "Uploading..."
                    }
                }
            }
        }
    }
}
