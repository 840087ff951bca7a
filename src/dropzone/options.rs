use web_sys::Element;

use super::slots::Slot;

pub const DEFAULT_TARGET_ATTRIBUTE: &str = "data-dropzone-target";
pub const DEFAULT_EVENT_PREFIX: &str = "dropzone";

/// How a dropzone finds its slots and how it shows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropzoneOptions {
    /// Attribute whose (space separated) value names the slot an element plays.
    pub target_attribute: String,
    /// Prefix of the DOM events dispatched on the root element.
    pub event_prefix: String,
    pub input_display: String,
    pub placeholder_display: String,
    pub preview_display: String,
    pub image_display: String,
}

impl Default for DropzoneOptions {
    fn default() -> Self {
        Self {
            target_attribute: DEFAULT_TARGET_ATTRIBUTE.to_string(),
            event_prefix: DEFAULT_EVENT_PREFIX.to_string(),
            input_display: "block".to_string(),
            placeholder_display: "block".to_string(),
            preview_display: "flex".to_string(),
            image_display: "block".to_string(),
        }
    }
}

impl DropzoneOptions {
    pub fn with_target_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.target_attribute = attribute.into();
        self
    }

    pub fn with_event_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.event_prefix = prefix.into();
        self
    }

    pub fn with_preview_display(mut self, display: impl Into<String>) -> Self {
        self.preview_display = display.into();
        self
    }

    /// Defaults overridden by `data-dropzone-*` attributes on `root`.
    pub fn from_element(root: &Element) -> Self {
        Self::default().merge_attributes(|name| root.get_attribute(name))
    }

    fn merge_attributes<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides: [(&str, &mut String); 6] = [
            ("data-dropzone-target-attribute", &mut self.target_attribute),
            ("data-dropzone-event-prefix", &mut self.event_prefix),
            ("data-dropzone-input-display", &mut self.input_display),
            ("data-dropzone-placeholder-display", &mut self.placeholder_display),
            ("data-dropzone-preview-display", &mut self.preview_display),
            ("data-dropzone-image-display", &mut self.image_display),
        ];

        for (attribute, field) in overrides {
            if let Some(value) = lookup(attribute).filter(|v| !v.trim().is_empty()) {
                *field = value.trim().to_string();
            }
        }
        self
    }

    /// CSS `display` value used when `slot` is shown.
    pub fn display_for(&self, slot: Slot) -> &str {
        match slot {
            Slot::Input => &self.input_display,
            Slot::Placeholder => &self.placeholder_display,
            Slot::Preview => &self.preview_display,
            Slot::PreviewImage => &self.image_display,
            Slot::PreviewClearButton | Slot::PreviewFilename => "block",
        }
    }

    /// CSS selector matching the element that plays `slot`.
    pub fn selector_for(&self, slot: Slot) -> String {
        format!("[{}~=\"{}\"]", self.target_attribute, slot.as_str())
    }
}
