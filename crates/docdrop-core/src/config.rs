//! Widget configuration: which host-page elements to bind and how to
//! present notices.
//!
//! Every field has a default matching the stock upload page markup, so
//! an empty JSON object (`{}`) is a complete configuration.

use serde::{Deserialize, Serialize};

use crate::accept::AcceptPolicy;

/// Errors from parsing or validating a [`WidgetConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON could not be parsed into a configuration.
    #[error("invalid widget configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the widget cannot use.
    #[error("invalid widget configuration: {field} must not be empty")]
    Empty {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Element ids (and two in-button selectors) of the host-page surfaces.
///
/// Only `input` and `drop_target` are required at attach time; every
/// other surface is optional and its behavior is skipped when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceIds {
    /// The native `<input type="file">`.
    pub input: String,
    /// The picker prompt, which doubles as the drop target.
    pub drop_target: String,
    /// Container of the selected-file summary.
    pub summary: String,
    /// Element receiving the file name.
    pub name: String,
    /// Element receiving the formatted size.
    pub size: String,
    /// Button that clears the selection.
    pub remove: String,
    /// Container of the preview surfaces.
    pub preview: String,
    /// `<img>` used for image thumbnails.
    pub preview_image: String,
    /// Element receiving the PDF/generic glyph markup.
    pub preview_icon: String,
    /// The `<form>` whose submission is guarded.
    pub form: String,
    /// The submit control.
    pub submit: String,
    /// CSS selector, relative to the submit control, of its idle label.
    pub submit_label: String,
    /// CSS selector, relative to the submit control, of its busy indicator.
    pub submit_busy: String,
}

impl Default for SurfaceIds {
    fn default() -> Self {
        Self {
            input: "file-upload-input".into(),
            drop_target: "file-upload-area".into(),
            summary: "file-selected-info".into(),
            name: "file-name".into(),
            size: "file-size".into(),
            remove: "file-remove-btn".into(),
            preview: "file-preview".into(),
            preview_image: "file-preview-image".into(),
            preview_icon: "file-preview-icon".into(),
            form: "upload-form".into(),
            submit: "submit-btn".into(),
            submit_label: ".btn-text".into(),
            submit_busy: ".btn-loader".into(),
        }
    }
}

/// Full widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Host-page surfaces to bind.
    pub surfaces: SurfaceIds,
    /// Class toggled on the drop target while a drag hovers over it.
    pub drag_class: String,
    /// Notice shown when the form is submitted without a file.
    pub empty_notice: String,
    /// Optional name/size policy. `None` accepts every file.
    pub accept: Option<AcceptPolicy>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            surfaces: SurfaceIds::default(),
            drag_class: "drag-over".into(),
            empty_notice: "Please select a file".into(),
            accept: None,
        }
    }
}

impl WidgetConfig {
    /// Parse and validate a configuration from JSON.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the text is not a valid
    /// configuration object, or [`ConfigError::Empty`] if validation
    /// fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every id, selector, and class name is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] naming the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.surfaces;
        let fields = [
            ("surfaces.input", &s.input),
            ("surfaces.drop_target", &s.drop_target),
            ("surfaces.summary", &s.summary),
            ("surfaces.name", &s.name),
            ("surfaces.size", &s.size),
            ("surfaces.remove", &s.remove),
            ("surfaces.preview", &s.preview),
            ("surfaces.preview_image", &s.preview_image),
            ("surfaces.preview_icon", &s.preview_icon),
            ("surfaces.form", &s.form),
            ("surfaces.submit", &s.submit),
            ("surfaces.submit_label", &s.submit_label),
            ("surfaces.submit_busy", &s.submit_busy),
            ("drag_class", &self.drag_class),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default() {
        let config = WidgetConfig::from_json("{}").unwrap();
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn partial_surfaces_keep_other_defaults() {
        let config =
            WidgetConfig::from_json(r#"{"surfaces": {"input": "doc-input"}, "drag_class": "hot"}"#)
                .unwrap();
        assert_eq!(config.surfaces.input, "doc-input");
        assert_eq!(config.surfaces.drop_target, "file-upload-area");
        assert_eq!(config.drag_class, "hot");
        assert_eq!(config.accept, None);
    }

    #[test]
    fn accept_policy_fills_missing_fields_from_documents() {
        let config = WidgetConfig::from_json(r#"{"accept": {"max_size_bytes": 1024}}"#).unwrap();
        let accept = config.accept.unwrap();
        assert_eq!(accept.max_size_bytes, Some(1024));
        assert!(accept.extensions.iter().any(|e| e == "pdf"));
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = WidgetConfig::from_json(r#"{"surfaces": {"drop_target": " "}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Empty {
                field: "surfaces.drop_target"
            }
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = WidgetConfig::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
