//! Headshot Core Library
//!
//! This library turns a casual photograph into a styled portrait by sending it
//! to Google's Gemini image model together with an instruction built from a
//! style preset (plus optional fine-tuning) or a free-text prompt.
//!
//! # Overview
//!
//! - **Style Catalog**: the built-in presets via [`styles`]
//! - **Adjustments**: lighting/blur/temperature/tint clauses via [`adjustments`]
//! - **Prompt Builder**: final instruction assembly via [`prompt`]
//! - **Generation Client**: the Gemini call via [`gemini`]
//! - **Session**: generation state machine and history via [`session`] and [`history`]
//!
//! # Quick Start
//!
//! ```ignore
//! use headshot_core::Studio;
//!
//! let mut studio = Studio::new()?;
//! studio.upload_file("me.jpg")?;
//! studio.session_mut().select_style("outdoor")?;
//! let image = studio.generate().await?;
//! std::fs::write("out.png", image.to_png_bytes()?)?;
//! ```
//!
//! # Module Structure
//!
//! - [`adjustments`]: Adjustment axes and their instruction clauses
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`gemini`]: Gemini image-edit client and the [`ImageGenerator`] seam
//! - [`history`]: Most-recent-first ledger of past results
//! - [`image_processing`]: Image payload types and encoding utilities
//! - [`prompt`]: Instruction text assembly
//! - [`session`]: Session controller and generation state machine
//! - [`styles`]: Preset catalog

pub mod adjustments;
pub mod config;
pub mod error;
pub mod gemini;
pub mod history;
pub mod image_processing;
pub mod prompt;
pub mod session;
pub mod styles;

// Re-export primary types for convenience
pub use adjustments::{Adjustment, Adjustments, Axis};
pub use config::Config;
pub use error::{AppError, NotReady, Result};
pub use gemini::{GeminiClient, GenerationRequest, ImageGenerator};
pub use image_processing::{GeneratedImage, ImageProcessor, SourceImage};
pub use prompt::PromptMode;
pub use session::{
    GenerationState, GenerationStatus, GenerationTicket, HistoryEntrySummary, Session, SessionSnapshot,
};
pub use styles::StylePreset;

use std::fs;
use std::path::Path;

/// Main entry point for the headshot application.
///
/// Bundles configuration, a Gemini client and one [`Session`].
pub struct Studio {
    config: Config,
    client: GeminiClient,
    session: Session,
}

impl Studio {
    /// Creates a studio from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the client cannot be built.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a studio with a pre-built configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        let client = GeminiClient::new(&config)?;
        Ok(Self {
            config,
            client,
            session: Session::new(),
        })
    }

    /// Reads an image file and makes it the session's source photo.
    ///
    /// The MIME type is sniffed from the bytes, falling back to the extension.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if the file cannot be read and
    /// [`AppError::InvalidFileType`] if it is not a recognisable image.
    pub fn upload_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let mime_type = ImageProcessor::detect_mime(&bytes, path).unwrap_or("application/octet-stream");
        self.session.upload_image(&bytes, mime_type)
    }

    /// Runs one generation with the current session settings.
    pub async fn generate(&mut self) -> Result<GeneratedImage> {
        self.session.run_generation(&self.client).await
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup. This loads `.env` files if present.
pub fn init() {
    let _ = dotenvy::dotenv();
}
