use std::fmt;

use super::error::BindingError;

/// A named role for one of the elements a dropzone controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Input,
    Placeholder,
    Preview,
    PreviewClearButton,
    PreviewFilename,
    PreviewImage,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Input,
        Slot::Placeholder,
        Slot::Preview,
        Slot::PreviewClearButton,
        Slot::PreviewFilename,
        Slot::PreviewImage,
    ];

    /// Name used in markup to tag the element playing this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Input => "input",
            Slot::Placeholder => "placeholder",
            Slot::Preview => "preview",
            Slot::PreviewClearButton => "previewClearButton",
            Slot::PreviewFilename => "previewFilename",
            Slot::PreviewImage => "previewImage",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One handle per slot, all present.
#[derive(Debug, Clone)]
pub struct SlotMap<T> {
    pub input: T,
    pub placeholder: T,
    pub preview: T,
    pub preview_clear_button: T,
    pub preview_filename: T,
    pub preview_image: T,
}

impl<T> SlotMap<T> {
    /// Looks every slot up with `find`, failing on the first one that is absent.
    pub fn resolve<F>(mut find: F) -> Result<Self, BindingError>
    where
        F: FnMut(Slot) -> Option<T>,
    {
        let mut take = |slot| find(slot).ok_or(BindingError::MissingSlot(slot));

        Ok(Self {
            input: take(Slot::Input)?,
            placeholder: take(Slot::Placeholder)?,
            preview: take(Slot::Preview)?,
            preview_clear_button: take(Slot::PreviewClearButton)?,
            preview_filename: take(Slot::PreviewFilename)?,
            preview_image: take(Slot::PreviewImage)?,
        })
    }

    pub fn get(&self, slot: Slot) -> &T {
        match slot {
            Slot::Input => &self.input,
            Slot::Placeholder => &self.placeholder,
            Slot::Preview => &self.preview,
            Slot::PreviewClearButton => &self.preview_clear_button,
            Slot::PreviewFilename => &self.preview_filename,
            Slot::PreviewImage => &self.preview_image,
        }
    }
}
