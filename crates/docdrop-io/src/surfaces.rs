//! Host-page surfaces the widget binds to.
//!
//! Surfaces are looked up once, at attach time. The picker input and
//! the drop target are required; every other surface is optional and
//! the behavior depending on it is skipped when it is absent.

use docdrop_core::{ConfigError, SurfaceIds};
use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlImageElement, HtmlInputElement};

/// Errors that prevent the widget from attaching.
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    /// A required surface is not on the page (or has the wrong element type).
    #[error("required surface #{0} not found")]
    MissingSurface(String),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A browser API call returned an error or a global was missing.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for AttachError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// The form, submit control, and its two sub-surfaces.
///
/// The submission guard needs all four, so they are resolved as a unit.
#[derive(Debug, Clone)]
pub struct SubmitSurfaces {
    /// The guarded form.
    pub form: HtmlFormElement,
    /// The submit control, disabled while submitting.
    pub control: HtmlElement,
    /// Idle label inside the control.
    pub label: HtmlElement,
    /// Busy indicator inside the control.
    pub busy: HtmlElement,
}

/// Resolved host-page elements.
#[derive(Debug, Clone)]
pub struct Surfaces {
    /// The native file input; its file list is what the form transmits.
    pub input: HtmlInputElement,
    /// Picker prompt and drop target.
    pub drop_target: HtmlElement,
    /// Selected-file summary container.
    pub summary: Option<HtmlElement>,
    /// File name text.
    pub name: Option<HtmlElement>,
    /// Formatted size text.
    pub size: Option<HtmlElement>,
    /// Remove button.
    pub remove: Option<HtmlElement>,
    /// Preview container.
    pub preview: Option<HtmlElement>,
    /// Image thumbnail surface.
    pub preview_image: Option<HtmlImageElement>,
    /// Glyph surface.
    pub preview_icon: Option<HtmlElement>,
    /// Submission guard surfaces.
    pub submit: Option<SubmitSurfaces>,
}

impl Surfaces {
    /// Look up every surface in `document`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::MissingSurface`] if the picker input or
    /// the drop target is absent.
    pub fn resolve(document: &Document, ids: &SurfaceIds) -> Result<Self, AttachError> {
        let input = by_id::<HtmlInputElement>(document, &ids.input)
            .ok_or_else(|| AttachError::MissingSurface(ids.input.clone()))?;
        let drop_target = by_id::<HtmlElement>(document, &ids.drop_target)
            .ok_or_else(|| AttachError::MissingSurface(ids.drop_target.clone()))?;

        Ok(Self {
            input,
            drop_target,
            summary: optional(document, &ids.summary),
            name: optional(document, &ids.name),
            size: optional(document, &ids.size),
            remove: optional(document, &ids.remove),
            preview: optional(document, &ids.preview),
            preview_image: optional(document, &ids.preview_image),
            preview_icon: optional(document, &ids.preview_icon),
            submit: resolve_submit(document, ids),
        })
    }
}

fn resolve_submit(document: &Document, ids: &SurfaceIds) -> Option<SubmitSurfaces> {
    let form = optional::<HtmlFormElement>(document, &ids.form)?;
    let control = optional::<HtmlElement>(document, &ids.submit)?;
    let label = child(&control, &ids.submit_label)?;
    let busy = child(&control, &ids.submit_busy)?;
    Some(SubmitSurfaces {
        form,
        control,
        label,
        busy,
    })
}

/// Find an element by id and cast it, warning on a type mismatch.
fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let element = document.get_element_by_id(id)?;
    cast(element, id)
}

fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let found = by_id(document, id);
    if found.is_none() {
        debug!("optional surface #{id} not found; its behavior is disabled");
    }
    found
}

/// First descendant of `parent` matching `selector`.
fn child(parent: &HtmlElement, selector: &str) -> Option<HtmlElement> {
    match parent.query_selector(selector) {
        Ok(Some(element)) => cast(element, selector),
        Ok(None) => {
            debug!("submit sub-surface {selector} not found; submission guard disabled");
            None
        }
        Err(e) => {
            warn!("invalid submit sub-surface selector {selector:?}: {e:?}");
            None
        }
    }
}

fn cast<T: JsCast>(element: Element, what: &str) -> Option<T> {
    match element.dyn_into::<T>() {
        Ok(typed) => Some(typed),
        Err(_) => {
            warn!("surface {what} has an unexpected element type; ignoring it");
            None
        }
    }
}
