use crate::config::Config;
use crate::error::{AppError, Result};
use crate::image_processing::{GeneratedImage, ImageProcessor, SourceImage};
use async_trait::async_trait;
use gemini_rust::{Blob, Content, Gemini, Message, Part, Role};
use tracing::{info, warn};

/// One generation attempt: the photo plus the instruction text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Base64 image, optionally with a `data:` prefix.
    pub image_data: String,
    pub mime_type: String,
    pub instruction: String,
}

impl GenerationRequest {
    pub fn new(source: &SourceImage, instruction: impl Into<String>) -> Self {
        Self {
            image_data: source.data.clone(),
            mime_type: source.mime_type.clone(),
            instruction: instruction.into(),
        }
    }
}

/// Anything that can turn a photo and an instruction into a new image.
///
/// Implementations make exactly one provider call per invocation and fold
/// every failure into [`AppError::GenerationFailed`].
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage>;
}

pub struct GeminiClient {
    client: Gemini,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Pass the base URL explicitly to avoid the client's BadScheme error
        let model_url = config.model_url()?;

        let client = Gemini::with_model_and_base_url(
            &config.gemini_api_key,
            model_url.to_string(),
            config.base_url.clone(),
        )
        .map_err(|e| AppError::Config(format!("Failed to create Gemini client: {}", e)))?;

        Ok(Self { client })
    }

    /// Sends the photo and instruction as one multimodal message and returns
    /// the first inline image in the reply.
    pub async fn edit_image(&self, image: &str, mime_type: &str, instruction: &str) -> Result<GeneratedImage> {
        let data = ImageProcessor::strip_data_url_prefix(image);
        if data.is_empty() {
            return Err(AppError::generation("Source image is empty"));
        }
        if instruction.trim().is_empty() {
            return Err(AppError::generation("Instruction text is empty"));
        }

        let image_part = Part::InlineData {
            inline_data: Blob {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            },
        };

        let text_part = Part::Text {
            text: instruction.to_string(),
            thought: None,
            thought_signature: None,
        };

        let message = Message {
            role: Role::User,
            content: Content {
                role: Some(Role::User),
                parts: Some(vec![image_part, text_part]),
            },
        };

        info!(mime_type, prompt_chars = instruction.len(), "sending image edit request");

        let response = self
            .client
            .generate_content()
            .with_messages(vec![message])
            .execute()
            .await
            .map_err(|e| {
                let err = AppError::from_provider(&e);
                warn!(error = %err, "Gemini request failed");
                err
            })?;

        let parts = response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.as_deref())
            .unwrap_or_default();

        let image = extract_first_image(parts)?;
        info!(detected = ?image.detected_format, "received edited image");
        Ok(image)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        self.edit_image(&request.image_data, &request.mime_type, &request.instruction)
            .await
    }
}

/// Finds the first non-empty inline image payload among response parts.
pub fn extract_first_image(parts: &[Part]) -> Result<GeneratedImage> {
    parts
        .iter()
        .find_map(|part| match part {
            Part::InlineData { inline_data } if !inline_data.data.is_empty() => {
                Some(GeneratedImage::from_base64(inline_data.data.clone()))
            }
            _ => None,
        })
        .ok_or_else(AppError::no_image)
}
