/// Descriptor of the file currently chosen in a dropzone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// Empty when the platform could not determine a type.
    pub mime_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Whether a thumbnail should be attempted for this file.
    pub fn is_image(&self) -> bool {
        !self.mime_type.is_empty() && self.mime_type.contains("image")
    }
}

impl From<&web_sys::File> for SelectedFile {
    fn from(file: &web_sys::File) -> Self {
        Self::new(file.name(), file.type_())
    }
}
