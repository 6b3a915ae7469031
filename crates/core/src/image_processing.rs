//! Image payload types and encoding utilities.
//!
//! Images travel through the session as base64 text. Source images keep the
//! MIME type they were uploaded with; generated images are always labelled
//! `image/png` for display, while the bytes' real format is sniffed and kept
//! alongside so callers that care can check or transcode.

use crate::error::{AppError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
pub use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;
use tracing::warn;

/// Label every generated image carries.
pub const RESULT_MIME_TYPE: &str = "image/png";

const EMPTY_IMAGE: &str = "Uploaded image is empty";

/// A user-supplied photograph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Raw base64 payload, without any `data:` prefix.
    pub data: String,
    pub mime_type: String,
}

impl SourceImage {
    /// Wraps raw file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidFileType`] unless `mime_type` starts with `image/`,
    /// and [`AppError::ImageProcessing`] when `bytes` is empty.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self> {
        ensure_image_mime(mime_type)?;
        if bytes.is_empty() {
            return Err(AppError::image(EMPTY_IMAGE));
        }
        Ok(Self {
            data: BASE64.encode(bytes),
            mime_type: mime_type.to_string(),
        })
    }

    /// Parses a `data:<mime>;base64,<payload>` string.
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let (header, payload) = data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or_else(|| AppError::image("Expected a data URL"))?;
        let mime_type = header.split(';').next().unwrap_or_default();
        ensure_image_mime(mime_type)?;
        if payload.trim().is_empty() {
            return Err(AppError::image(EMPTY_IMAGE));
        }
        Ok(Self {
            data: payload.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn is_empty(&self) -> bool {
        ImageProcessor::strip_data_url_prefix(&self.data).trim().is_empty()
    }
}

/// The image returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Raw base64 payload as returned.
    pub data: String,
    /// Format sniffed from the decoded bytes, if recognisable.
    pub detected_format: Option<ImageFormat>,
}

impl GeneratedImage {
    /// Wraps a provider payload, sniffing its real format.
    pub fn from_base64(data: impl Into<String>) -> Self {
        let data = data.into();
        let detected_format = BASE64
            .decode(data.as_bytes())
            .ok()
            .and_then(|bytes| ImageProcessor::sniff_format(&bytes));

        match detected_format {
            Some(ImageFormat::Png) => {}
            Some(other) => warn!(format = ?other, "provider returned non-PNG payload, labelling as PNG"),
            None => warn!("could not determine format of provider payload, labelling as PNG"),
        }

        Self { data, detected_format }
    }

    pub fn mime_type(&self) -> &'static str {
        RESULT_MIME_TYPE
    }

    /// Display form, always PNG-typed.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", RESULT_MIME_TYPE, self.data)
    }

    pub fn is_png(&self) -> bool {
        self.detected_format == Some(ImageFormat::Png)
    }

    /// The decoded payload bytes, as returned by the provider.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(self.data.as_bytes())
            .map_err(|e| AppError::image(format!("Invalid base64 payload: {}", e)))
    }

    /// Bytes that really are PNG, transcoding when the payload is not.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let bytes = self.to_bytes()?;
        if self.is_png() {
            return Ok(bytes);
        }
        ImageProcessor::transcode_to_png(&bytes)
    }
}

/// Stateless helpers for image bytes.
pub struct ImageProcessor;

impl ImageProcessor {
    /// Removes a `data:...;base64,` prefix if present, leaving the raw payload.
    pub fn strip_data_url_prefix(payload: &str) -> &str {
        match payload.split_once(',') {
            Some((header, data)) if header.starts_with("data:") => data,
            _ => payload,
        }
    }

    /// Identifies an image format from its magic bytes.
    pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
        image::guess_format(bytes).ok()
    }

    /// Picks a MIME type for an image file, preferring the bytes over the
    /// extension. Returns `None` when neither identifies an image.
    pub fn detect_mime(bytes: &[u8], path: &Path) -> Option<&'static str> {
        Self::sniff_format(bytes)
            .or_else(|| ImageFormat::from_path(path).ok())
            .map(|format| format.to_mime_type())
    }

    /// Decodes any supported image and re-encodes it as PNG.
    pub fn transcode_to_png(bytes: &[u8]) -> Result<Vec<u8>> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| AppError::image(format!("Failed to decode image: {}", e)))?;

        let mut buffer: Vec<u8> = Vec::new();
        decoded
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| AppError::image(format!("Failed to encode image: {}", e)))?;

        Ok(buffer)
    }

    /// Preferred file extension for a format, e.g. `"jpg"`.
    pub fn extension_for(format: ImageFormat) -> &'static str {
        format.extensions_str().first().copied().unwrap_or("bin")
    }
}

fn ensure_image_mime(mime_type: &str) -> Result<()> {
    if mime_type.starts_with("image/") {
        Ok(())
    } else {
        Err(AppError::InvalidFileType(mime_type.to_string()))
    }
}
