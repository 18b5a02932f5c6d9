//! Photo evidence attached to an answer, carried as a base64 `data:` URI.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("the selected file is empty")]
    Empty,
    #[error("{0} is not an image")]
    NotAnImage(String),
}

/// MIME type of `bytes` judged by their leading signature.
#[must_use]
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") && bytes.len() > 14 {
        Some("image/bmp")
    } else if bytes.len() >= 12
        && &bytes[4..8] == b"ftyp"
        && matches!(&bytes[8..12], b"heic" | b"heix" | b"mif1" | b"heif")
    {
        Some("image/heic")
    } else {
        None
    }
}

/// Encode the contents of an uploaded file as `data:<mime>;base64,...`.
///
/// `file_name` only appears in the error when the bytes are not an image.
///
/// # Errors
///
/// Returns [`ImageError::Empty`] for an empty file and
/// [`ImageError::NotAnImage`] when no image signature is recognised.
pub fn encode_image(file_name: &str, bytes: &[u8]) -> Result<String, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    let mime =
        sniff_image_mime(bytes).ok_or_else(|| ImageError::NotAnImage(file_name.to_string()))?;
    Ok(format!("{DATA_PREFIX}{mime}{BASE64_MARKER}{}", STANDARD.encode(bytes)))
}

/// True when `value` is a base64 `data:` URI whose payload is an image of
/// the declared type.
#[must_use]
pub fn is_image_data_uri(value: &str) -> bool {
    let Some(rest) = value.strip_prefix(DATA_PREFIX) else {
        return false;
    };
    let Some((mime, payload)) = rest.split_once(BASE64_MARKER) else {
        return false;
    };
    match STANDARD.decode(payload) {
        Ok(bytes) => sniff_image_mime(&bytes) == Some(mime),
        Err(_) => false,
    }
}
