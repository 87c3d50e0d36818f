//! Render a [`View`] onto the host-page surfaces.
//!
//! Rendering is a pure function of the view: every call sets the
//! visibility of every bound surface, so the page cannot drift from
//! the state machine. Within the preview, surfaces are hidden before
//! the visible one is shown.

use docdrop_core::{IconGlyph, View, VisibleSurface};
use log::warn;
use web_sys::{HtmlElement, HtmlImageElement};

use crate::surfaces::{SubmitSurfaces, Surfaces};

/// `display` for block-level surfaces (prompt, summary, preview, image).
const BLOCK: &str = "block";

/// `display` for the icon surface and the busy indicator.
const FLEX: &str = "flex";

const HIDDEN: &str = "none";

/// CSS `display` value for a surface.
#[must_use]
pub const fn display_value(visible: bool, shown: &'static str) -> &'static str {
    if visible { shown } else { HIDDEN }
}

/// Draw `view` onto `surfaces`.
pub fn apply(view: &View<'_>, surfaces: &Surfaces) {
    set_display(&surfaces.drop_target, display_value(view.prompt_visible(), BLOCK));

    if let Some(summary) = &surfaces.summary {
        set_display(summary, display_value(view.summary.is_some(), BLOCK));
    }
    if let Some(info) = &view.summary {
        if let Some(name) = &surfaces.name {
            name.set_text_content(Some(info.name));
        }
        if let Some(size) = &surfaces.size {
            size.set_text_content(Some(&info.size));
        }
    }

    if let Some(container) = &surfaces.preview {
        set_display(
            container,
            display_value(view.preview_container_visible(), BLOCK),
        );
    }
    apply_preview(
        view.preview,
        surfaces.preview_image.as_ref(),
        surfaces.preview_icon.as_ref(),
    );

    // The busy state is entered once and never reversed here; the host
    // resets the page after the server responds.
    if view.busy()
        && let Some(submit) = &surfaces.submit
    {
        apply_busy(submit);
    }
}

fn apply_preview(
    preview: Option<VisibleSurface<'_>>,
    image: Option<&HtmlImageElement>,
    icon: Option<&HtmlElement>,
) {
    match preview {
        Some(VisibleSurface::Image(uri)) => {
            if let Some(icon) = icon {
                set_display(icon, HIDDEN);
            }
            if let Some(image) = image {
                if image.get_attribute("src").as_deref() != Some(uri) {
                    image.set_src(uri);
                }
                set_display(image, BLOCK);
            }
        }
        Some(VisibleSurface::Icon(glyph)) => {
            if let Some(image) = image {
                hide_image(image);
            }
            if let Some(icon) = icon {
                show_icon(icon, glyph);
            }
        }
        None => {
            if let Some(image) = image {
                hide_image(image);
            }
            if let Some(icon) = icon {
                set_display(icon, HIDDEN);
            }
        }
    }
}

/// Hide the thumbnail and drop its cached data URI.
fn hide_image(image: &HtmlImageElement) {
    set_display(image, HIDDEN);
    if image.has_attribute("src") {
        let _ = image.remove_attribute("src");
    }
}

fn show_icon(icon: &HtmlElement, glyph: IconGlyph) {
    icon.set_inner_html(&glyph.markup());
    let style = icon.style();
    let result = if glyph.stacked() {
        style
            .set_property("flex-direction", "column")
            .and_then(|()| style.set_property("align-items", "center"))
    } else {
        style
            .remove_property("flex-direction")
            .and_then(|_| style.remove_property("align-items"))
            .map(drop)
    };
    if let Err(e) = result {
        warn!("failed to lay out preview icon: {e:?}");
    }
    set_display(icon, FLEX);
}

fn apply_busy(submit: &SubmitSurfaces) {
    set_display(&submit.label, HIDDEN);
    set_display(&submit.busy, FLEX);
    if let Err(e) = submit.control.set_attribute("disabled", "") {
        warn!("failed to disable the submit control: {e:?}");
    }
}

/// Toggle the drag-active class on the drop target.
pub fn set_drag_active(target: &HtmlElement, class: &str, active: bool) {
    let classes = target.class_list();
    let result = if active {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(e) = result {
        warn!("failed to toggle drag class {class:?}: {e:?}");
    }
}

fn set_display(element: &HtmlElement, value: &str) {
    if let Err(e) = element.style().set_property("display", value) {
        warn!("failed to set display: {e:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_surfaces_use_display_none() {
        assert_eq!(display_value(false, BLOCK), "none");
        assert_eq!(display_value(false, FLEX), "none");
    }

    #[test]
    fn visible_surfaces_use_their_layout() {
        assert_eq!(display_value(true, BLOCK), "block");
        assert_eq!(display_value(true, FLEX), "flex");
    }
}
