//! Assembles the final instruction text sent to the provider.

use crate::adjustments::Adjustments;
use crate::error::{AppError, NotReady, Result};
use crate::styles::StylePreset;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which tab the instruction comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    #[default]
    Preset,
    Custom,
}

/// Builds the instruction text.
///
/// In preset mode the style template is followed by any adjustment clauses,
/// space-separated. In custom mode the trimmed custom text is used verbatim
/// and adjustments are ignored.
///
/// # Errors
///
/// Returns [`AppError::PromptNotReady`] when preset mode has no style or the
/// trimmed custom text is empty.
pub fn build_prompt(
    mode: PromptMode,
    style: Option<&StylePreset>,
    custom_text: &str,
    adjustments: &Adjustments,
) -> Result<String> {
    match mode {
        PromptMode::Preset => {
            let style = style.ok_or(AppError::PromptNotReady(NotReady::NoStyleSelected))?;
            let mut prompt = style.instruction_template.to_string();
            let clauses = adjustments.encode();
            if !clauses.is_empty() {
                prompt.push(' ');
                prompt.push_str(&clauses.join(" "));
            }
            debug!(style = style.id, clauses = clauses.len(), "built preset prompt");
            Ok(prompt)
        }
        PromptMode::Custom => {
            let text = custom_text.trim();
            if text.is_empty() {
                return Err(AppError::PromptNotReady(NotReady::EmptyCustomPrompt));
            }
            debug!(chars = text.len(), "built custom prompt");
            Ok(text.to_string())
        }
    }
}
