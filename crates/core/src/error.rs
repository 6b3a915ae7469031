//! Error types for the headshot-core library.
//!
//! Every failure the session can report maps onto one variant here. None of
//! them are fatal to a session: the user may always retry.

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Why a generation could not be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotReady {
    /// No source photo has been uploaded.
    NoSourceImage,
    /// Preset mode is active but no preset is selected.
    NoStyleSelected,
    /// Custom mode is active and the prompt is blank after trimming.
    EmptyCustomPrompt,
    /// A generation is already in flight.
    GenerationPending,
}

impl fmt::Display for NotReady {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            NotReady::NoSourceImage => "no source image uploaded",
            NotReady::NoStyleSelected => "no style preset selected",
            NotReady::EmptyCustomPrompt => "custom prompt is empty",
            NotReady::GenerationPending => "a generation is already in progress",
        };
        f.write_str(reason)
    }
}

/// Errors that can occur within the headshot-core library.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (missing keys, invalid values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required environment variable was not found.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Upload rejected because the declared type is not `image/*`.
    #[error("Invalid file type '{0}': please upload a valid image file")]
    InvalidFileType(String),

    /// The generate trigger was refused locally.
    #[error("Prompt not ready: {0}")]
    PromptNotReady(NotReady),

    /// The provider call failed or returned no image.
    #[error("{0}")]
    GenerationFailed(String),

    /// No preset with the given id exists in the catalog.
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// An adjustment axis or value outside the closed option sets.
    #[error("Invalid adjustment {axis}={value}")]
    InvalidAdjustment { axis: String, value: String },

    /// No history item with the given id.
    #[error("History item not found: {0}")]
    HistoryItemNotFound(String),

    /// Image decoding, sniffing or encoding failed.
    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    /// A completion was reported with a ticket the session did not issue.
    #[error("Generation ticket {0} is not the one in flight")]
    StaleTicket(u64),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Message used when the provider gives no detail of its own.
    pub const GENERIC_GENERATION_FAILURE: &'static str = "Failed to generate image.";

    /// Message used when the response carried no inline image part.
    pub const NO_IMAGE_PRODUCED: &'static str = "No image data found in the response.";

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an image processing error with the given message.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::ImageProcessing(msg.into())
    }

    /// Creates a generation failure, falling back to a generic message when
    /// the provider supplied none.
    pub fn generation(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if msg.trim().is_empty() {
            Self::GenerationFailed(Self::GENERIC_GENERATION_FAILURE.to_string())
        } else {
            Self::GenerationFailed(msg)
        }
    }

    /// Creates a generation failure from a provider error, keeping the text of
    /// every error in its `source()` chain.
    pub fn from_provider(err: &(dyn StdError + 'static)) -> Self {
        let mut parts: Vec<String> = Vec::new();
        let mut current = Some(err);
        while let Some(e) = current {
            let text = e.to_string();
            // Wrappers often repeat their cause's message verbatim
            if !text.trim().is_empty() && !parts.iter().any(|p| p.contains(&text)) {
                parts.push(text);
            }
            current = e.source();
        }
        Self::generation(parts.join(": "))
    }

    /// Creates the "no image produced" generation failure.
    pub fn no_image() -> Self {
        Self::GenerationFailed(Self::NO_IMAGE_PRODUCED.to_string())
    }

    pub fn not_ready(reason: NotReady) -> Self {
        Self::PromptNotReady(reason)
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
