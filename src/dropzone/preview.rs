use base64::{engine::general_purpose, Engine as _};

/// CSS `background-image` value for an element without a thumbnail.
pub const NO_BACKGROUND: &str = "none";

/// Encodes `bytes` as a base64 `data:` URI of the given mime type.
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        "application/octet-stream"
    } else {
        mime_type
    };

    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Wraps a URI into a CSS `url(...)` suitable for `background-image`.
pub fn background_image(uri: &str) -> String {
    format!("url(\"{}\")", uri)
}
