//! The built-in catalog of style presets.
//!
//! Presets are immutable and defined at compile time. Consumers look them up
//! by [`StylePreset::id`].

use crate::error::{AppError, Result};
use serde::Serialize;

/// Icon shown next to a preset in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKey {
    Briefcase,
    Monitor,
    Sun,
    Palette,
}

impl IconKey {
    pub fn as_str(self) -> &'static str {
        match self {
            IconKey::Briefcase => "briefcase",
            IconKey::Monitor => "monitor",
            IconKey::Sun => "sun",
            IconKey::Palette => "palette",
        }
    }
}

/// A named, pre-written instruction template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StylePreset {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub instruction_template: &'static str,
    pub icon: IconKey,
}

const STYLES: &[StylePreset] = &[
    StylePreset {
        id: "corporate",
        display_name: "Corporate Executive",
        description: "Professional grey backdrop, business suit, studio lighting.",
        instruction_template: "Transform this image into a professional corporate headshot. The person is wearing a sharp navy blue business suit. The background is a clean, neutral dark grey studio backdrop. High quality, photorealistic, 4k, professional lighting.",
        icon: IconKey::Briefcase,
    },
    StylePreset {
        id: "tech",
        display_name: "Modern Tech",
        description: "Casual yet professional, bright modern office background.",
        instruction_template: "Transform this image into a modern tech industry headshot. The person is wearing smart casual business attire (a clean shirt or polo). The background is a blurred, bright modern office with glass and plants. Natural lighting, approachable, high resolution.",
        icon: IconKey::Monitor,
    },
    StylePreset {
        id: "outdoor",
        display_name: "Outdoor Natural",
        description: "Soft natural light, blurred park or city background.",
        instruction_template: "Transform this image into an outdoor professional portrait. The person is wearing business casual attire. The background is a beautifully blurred city park with golden hour lighting. Soft, warm, natural look, high quality.",
        icon: IconKey::Sun,
    },
    StylePreset {
        id: "studio",
        display_name: "Classic Studio",
        description: "Black and white, dramatic lighting, artistic.",
        instruction_template: "Transform this image into a classic black and white studio portrait. Dramatic rim lighting, high contrast, black background. The person looks dignified and artistic. 8k resolution, detailed texture.",
        icon: IconKey::Palette,
    },
];

/// Returns every preset in display order.
pub fn list_styles() -> &'static [StylePreset] {
    STYLES
}

/// Looks up a preset by id.
pub fn find_style(id: &str) -> Result<&'static StylePreset> {
    STYLES
        .iter()
        .find(|style| style.id == id)
        .ok_or_else(|| AppError::UnknownStyle(id.to_string()))
}

/// The preset a fresh session starts with.
pub fn default_style() -> &'static StylePreset {
    &STYLES[0]
}
