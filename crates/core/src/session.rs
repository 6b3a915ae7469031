//! The session controller.
//!
//! [`Session`] owns all mutable state for one user session. Plain settings
//! (mode, style, custom text, adjustments, theme) have simple setters; the
//! generation lifecycle only moves through [`Session::trigger_generate`] and
//! [`Session::complete`].
//!
//! The display state follows a small state machine:
//! `Idle` -> `Pending` (trigger) -> `Succeeded` | `Failed` (completion)
//! `Succeeded` | `Failed` -> `Idle` (reset or new upload)
//!
//! A generation in flight cannot be cancelled. Uploading, resetting or picking
//! a history item while it runs detaches the display from it: the call still
//! completes and a success is still recorded in history, but the result is
//! not shown.

use crate::adjustments::{Adjustment, Adjustments};
use crate::error::{AppError, NotReady, Result};
use crate::gemini::{GenerationRequest, ImageGenerator};
use crate::history::{CUSTOM_STYLE_ID, HistoryItem, HistoryLedger};
use crate::image_processing::{GeneratedImage, SourceImage};
use crate::prompt::{PromptMode, build_prompt};
use crate::styles::{self, StylePreset};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

/// What the result pane shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    /// A request is outstanding and the display is waiting on it.
    Pending,
    Succeeded(GeneratedImage),
    /// Error message for display.
    Failed(String),
}

impl GenerationState {
    pub fn status(&self) -> GenerationStatus {
        match self {
            GenerationState::Idle => GenerationStatus::Idle,
            GenerationState::Pending => GenerationStatus::Pending,
            GenerationState::Succeeded(_) => GenerationStatus::Succeeded,
            GenerationState::Failed(_) => GenerationStatus::Failed,
        }
    }
}

/// Payload-free view of [`GenerationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Proof of dispatch for the one generation in flight.
///
/// Run [`GenerationTicket::request`] against a provider, then hand the
/// ticket back to [`Session::complete`] with the outcome.
#[derive(Debug)]
pub struct GenerationTicket {
    id: u64,
    request: GenerationRequest,
}

impl GenerationTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

#[derive(Debug)]
struct InFlight {
    ticket_id: u64,
    original: SourceImage,
    style_id: String,
    /// Whether the display is still waiting on this request.
    attached: bool,
}

/// One history entry as listed in a [`SessionSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntrySummary {
    pub id: String,
    pub style_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&HistoryItem> for HistoryEntrySummary {
    fn from(item: &HistoryItem) -> Self {
        Self {
            id: item.id.clone(),
            style_id: item.style_id.clone(),
            created_at: item.created_at,
        }
    }
}

/// Serializable summary of the session for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub status: GenerationStatus,
    pub has_source: bool,
    pub source_mime_type: Option<String>,
    pub has_result: bool,
    pub error: Option<String>,
    pub generating: bool,
    pub can_generate: bool,
    pub mode: PromptMode,
    pub selected_style: Option<&'static str>,
    pub custom_text: String,
    pub adjustments: Adjustments,
    pub history_len: usize,
    pub latest_history_id: Option<String>,
    /// Most recent first.
    pub history: Vec<HistoryEntrySummary>,
    pub dark_mode: bool,
}

impl SessionSnapshot {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug)]
pub struct Session {
    source: Option<SourceImage>,
    state: GenerationState,
    in_flight: Option<InFlight>,
    next_ticket: u64,
    mode: PromptMode,
    selected_style: Option<&'static StylePreset>,
    custom_text: String,
    adjustments: Adjustments,
    history: HistoryLedger,
    dark_mode: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session: preset mode, first catalog style selected, neutral
    /// adjustments, empty history.
    pub fn new() -> Self {
        Self {
            source: None,
            state: GenerationState::Idle,
            in_flight: None,
            next_ticket: 1,
            mode: PromptMode::Preset,
            selected_style: Some(styles::default_style()),
            custom_text: String::new(),
            adjustments: Adjustments::default(),
            history: HistoryLedger::new(),
            dark_mode: false,
        }
    }

    // -- Source image --

    /// Sets a new source photo from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidFileType`] for non-`image/*` types and
    /// [`AppError::ImageProcessing`] for an empty file; the session is left
    /// untouched.
    pub fn upload_image(&mut self, bytes: &[u8], mime_type: &str) -> Result<()> {
        let source = SourceImage::from_bytes(bytes, mime_type).inspect_err(|e| {
            warn!(error = %e, "upload rejected");
        })?;
        self.set_source(source);
        Ok(())
    }

    /// Sets an already-encoded source photo.
    pub fn set_source(&mut self, source: SourceImage) {
        info!(mime_type = %source.mime_type, bytes_b64 = source.data.len(), "source image set");
        self.source = Some(source);
        self.clear_display("new source");
    }

    /// Removes the source photo along with any result or error.
    pub fn clear_source(&mut self) {
        self.source = None;
        self.clear_display("source cleared");
    }

    // -- Plain setters --

    pub fn select_mode(&mut self, mode: PromptMode) {
        self.mode = mode;
    }

    /// Selects a preset by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownStyle`] if no preset has that id.
    pub fn select_style(&mut self, id: &str) -> Result<()> {
        self.selected_style = Some(styles::find_style(id)?);
        Ok(())
    }

    pub fn clear_style(&mut self) {
        self.selected_style = None;
    }

    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        self.custom_text = text.into();
    }

    pub fn set_adjustment(&mut self, adjustment: Adjustment) {
        self.adjustments.set(adjustment);
    }

    pub fn set_adjustments(&mut self, adjustments: Adjustments) {
        self.adjustments = adjustments;
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    // -- Generation lifecycle --

    /// The instruction text the next generation would use.
    pub fn current_prompt(&self) -> Result<String> {
        build_prompt(self.mode, self.selected_style, &self.custom_text, &self.adjustments)
    }

    /// The style id the next generation would be recorded under.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PromptNotReady`] in preset mode with no style.
    pub fn current_style_id(&self) -> Result<&'static str> {
        match self.mode {
            PromptMode::Custom => Ok(CUSTOM_STYLE_ID),
            PromptMode::Preset => self
                .selected_style
                .map(|style| style.id)
                .ok_or(AppError::PromptNotReady(NotReady::NoStyleSelected)),
        }
    }

    fn loaded_source(&self) -> Option<&SourceImage> {
        self.source.as_ref().filter(|source| !source.is_empty())
    }

    /// Whether [`Session::trigger_generate`] would dispatch right now.
    pub fn can_generate(&self) -> bool {
        self.in_flight.is_none() && self.loaded_source().is_some() && self.current_prompt().is_ok()
    }

    /// Dispatches a generation, moving the display to `Pending`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PromptNotReady`] when a request is already in
    /// flight, no source is loaded, or the prompt cannot be built. State is
    /// unchanged in every error case.
    pub fn trigger_generate(&mut self) -> Result<GenerationTicket> {
        if self.in_flight.is_some() {
            return Err(AppError::not_ready(NotReady::GenerationPending));
        }
        let source = self
            .loaded_source()
            .cloned()
            .ok_or(AppError::PromptNotReady(NotReady::NoSourceImage))?;
        let instruction = self.current_prompt()?;
        let style_id = self.current_style_id()?.to_string();

        let id = self.next_ticket;
        self.next_ticket += 1;

        let request = GenerationRequest::new(&source, instruction);
        self.in_flight = Some(InFlight {
            ticket_id: id,
            original: source,
            style_id,
            attached: true,
        });
        self.state = GenerationState::Pending;
        debug!(ticket = id, "generation pending");

        Ok(GenerationTicket { id, request })
    }

    /// Reports the outcome of a dispatched generation.
    ///
    /// On success the pairing is appended to history and its id returned. The
    /// display moves to `Succeeded`/`Failed` only if it is still attached to
    /// this request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StaleTicket`] if the ticket is not the one in
    /// flight.
    pub fn complete(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<GeneratedImage>,
    ) -> Result<Option<String>> {
        self.complete_at(ticket, outcome, Utc::now())
    }

    fn complete_at(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<GeneratedImage>,
        now: DateTime<Utc>,
    ) -> Result<Option<String>> {
        let in_flight = match self.in_flight.take() {
            Some(f) if f.ticket_id == ticket.id => f,
            other => {
                self.in_flight = other;
                return Err(AppError::StaleTicket(ticket.id));
            }
        };

        match outcome {
            Ok(image) => {
                let id = self.history.record(
                    in_flight.original,
                    image.clone(),
                    in_flight.style_id,
                    now,
                );
                info!(ticket = ticket.id, history_id = %id, "generation succeeded");
                if in_flight.attached {
                    self.state = GenerationState::Succeeded(image);
                }
                Ok(Some(id))
            }
            Err(e) => {
                let message = match e {
                    AppError::GenerationFailed(msg) => msg,
                    other => other.to_string(),
                };
                warn!(ticket = ticket.id, error = %message, "generation failed");
                if in_flight.attached {
                    self.state = GenerationState::Failed(message);
                }
                Ok(None)
            }
        }
    }

    /// Triggers, runs and completes one generation against `generator`.
    ///
    /// Holds the session for the duration of the call; front ends that need
    /// to stay editable meanwhile should drive the ticket API themselves.
    pub async fn run_generation(&mut self, generator: &dyn ImageGenerator) -> Result<GeneratedImage> {
        let ticket = self.trigger_generate()?;
        let outcome = generator.generate(ticket.request()).await;
        match outcome {
            Ok(image) => {
                self.complete(ticket, Ok(image.clone()))?;
                Ok(image)
            }
            Err(e) => {
                let message = e.to_string();
                self.complete(ticket, Err(e))?;
                Err(AppError::generation(message))
            }
        }
    }

    /// Clears the result and error, keeping source and history.
    pub fn reset(&mut self) {
        self.clear_display("reset");
    }

    /// Shows a past pairing as the current source and result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::HistoryItemNotFound`] for unknown ids.
    pub fn select_history_item(&mut self, id: &str) -> Result<()> {
        let (original, result) = self
            .history
            .select(id)
            .map(|(o, r)| (o.clone(), r.clone()))
            .ok_or_else(|| AppError::HistoryItemNotFound(id.to_string()))?;

        self.detach_in_flight();
        self.source = Some(original);
        self.state = GenerationState::Succeeded(result);
        debug!(history_id = id, "restored history item");
        Ok(())
    }

    fn clear_display(&mut self, reason: &str) {
        self.detach_in_flight();
        if self.state != GenerationState::Idle {
            debug!(reason, "display reset to idle");
        }
        self.state = GenerationState::Idle;
    }

    fn detach_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.as_mut() {
            if in_flight.attached {
                debug!(ticket = in_flight.ticket_id, "display detached from in-flight generation");
            }
            in_flight.attached = false;
        }
    }

    // -- Accessors --

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn result(&self) -> Option<&GeneratedImage> {
        match &self.state {
            GenerationState::Succeeded(image) => Some(image),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            GenerationState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    pub fn selected_style(&self) -> Option<&'static StylePreset> {
        self.selected_style
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    pub fn adjustments(&self) -> &Adjustments {
        &self.adjustments
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.state.status(),
            has_source: self.source.is_some(),
            source_mime_type: self.source.as_ref().map(|s| s.mime_type.clone()),
            has_result: self.result().is_some(),
            error: self.error().map(str::to_string),
            generating: self.is_generating(),
            can_generate: self.can_generate(),
            mode: self.mode,
            selected_style: self.selected_style.map(|s| s.id),
            custom_text: self.custom_text.clone(),
            adjustments: self.adjustments,
            history_len: self.history.len(),
            latest_history_id: self.history.latest().map(|item| item.id.clone()),
            history: self.history.iter().map(HistoryEntrySummary::from).collect(),
            dark_mode: self.dark_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::Tint;
    use chrono::TimeZone;

    fn image(tag: &str) -> GeneratedImage {
        GeneratedImage {
            data: tag.to_string(),
            detected_format: None,
        }
    }

    fn session_with_source() -> Session {
        let mut session = Session::new();
        session.upload_image(b"jpeg-bytes", "image/jpeg").unwrap();
        session
    }

    #[test]
    fn starts_idle_with_first_style() {
        let session = Session::new();
        assert_eq!(session.state(), &GenerationState::Idle);
        assert_eq!(session.selected_style().map(|s| s.id), Some("corporate"));
        assert!(!session.can_generate());
    }

    #[test]
    fn trigger_without_source_is_refused() {
        let mut session = Session::new();
        let err = session.trigger_generate().unwrap_err();
        assert!(matches!(err, AppError::PromptNotReady(NotReady::NoSourceImage)));
        assert_eq!(session.state(), &GenerationState::Idle);
    }

    #[test]
    fn empty_upload_is_rejected_and_nothing_dispatches() {
        let mut session = Session::new();
        let err = session.upload_image(b"", "image/png").unwrap_err();
        assert!(matches!(err, AppError::ImageProcessing(_)));
        assert!(session.source().is_none());
        assert!(!session.can_generate());
        assert!(matches!(
            session.trigger_generate(),
            Err(AppError::PromptNotReady(NotReady::NoSourceImage))
        ));
        assert_eq!(session.state(), &GenerationState::Idle);
        assert!(!session.is_generating());
    }

    #[test]
    fn empty_source_set_directly_cannot_generate() {
        let mut session = Session::new();
        session.set_source(SourceImage {
            data: String::new(),
            mime_type: "image/png".to_string(),
        });
        assert!(!session.can_generate());
        let err = session.trigger_generate().unwrap_err();
        assert!(matches!(err, AppError::PromptNotReady(NotReady::NoSourceImage)));
        assert_eq!(session.state(), &GenerationState::Idle);
    }

    #[test]
    fn style_id_follows_mode_and_selection() {
        let mut session = session_with_source();
        assert_eq!(session.current_style_id().unwrap(), "corporate");

        session.clear_style();
        assert!(matches!(
            session.current_style_id(),
            Err(AppError::PromptNotReady(NotReady::NoStyleSelected))
        ));
        assert!(session.trigger_generate().is_err());
        assert!(!session.is_generating());

        session.select_mode(PromptMode::Custom);
        assert_eq!(session.current_style_id().unwrap(), CUSTOM_STYLE_ID);
    }

    #[test]
    fn blank_custom_prompt_is_refused() {
        let mut session = session_with_source();
        session.select_mode(PromptMode::Custom);
        session.set_custom_text("   ");
        let err = session.trigger_generate().unwrap_err();
        assert!(matches!(err, AppError::PromptNotReady(NotReady::EmptyCustomPrompt)));
        assert_eq!(session.state(), &GenerationState::Idle);
        assert!(!session.is_generating());
    }

    #[test]
    fn second_trigger_while_pending_is_refused() {
        let mut session = session_with_source();
        let ticket = session.trigger_generate().unwrap();
        let err = session.trigger_generate().unwrap_err();
        assert!(matches!(err, AppError::PromptNotReady(NotReady::GenerationPending)));
        assert_eq!(session.state(), &GenerationState::Pending);
        assert_eq!(ticket.id(), 1);
    }

    #[test]
    fn ticket_carries_source_and_prompt() {
        let mut session = session_with_source();
        session.select_style("studio").unwrap();
        session.set_adjustment(Adjustment::Tint(Tint::Bw));
        let ticket = session.trigger_generate().unwrap();

        let studio = styles::find_style("studio").unwrap();
        assert_eq!(ticket.request().mime_type, "image/jpeg");
        assert_eq!(ticket.request().image_data, session.source().unwrap().data);
        assert_eq!(
            ticket.request().instruction,
            format!("{} Render in black and white.", studio.instruction_template)
        );
    }

    #[test]
    fn success_records_history_and_shows_result() {
        let mut session = session_with_source();
        let ticket = session.trigger_generate().unwrap();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let id = session.complete_at(ticket, Ok(image("out")), now).unwrap();

        assert_eq!(id.as_deref(), Some("1700000000000"));
        assert_eq!(session.result(), Some(&image("out")));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().latest().unwrap().style_id, "corporate");
        assert!(!session.is_generating());
    }

    #[test]
    fn custom_generations_are_recorded_as_custom() {
        let mut session = session_with_source();
        session.select_mode(PromptMode::Custom);
        session.set_custom_text("add a hat");
        let ticket = session.trigger_generate().unwrap();
        session.complete(ticket, Ok(image("out"))).unwrap();
        assert_eq!(session.history().latest().unwrap().style_id, CUSTOM_STYLE_ID);
    }

    #[test]
    fn failure_shows_message_and_reset_returns_to_idle() {
        let mut session = session_with_source();
        let ticket = session.trigger_generate().unwrap();
        session
            .complete(ticket, Err(AppError::generation("deadline exceeded")))
            .unwrap();

        assert_eq!(session.error(), Some("deadline exceeded"));
        assert!(session.result().is_none());
        assert!(session.history().is_empty());

        session.reset();
        assert_eq!(session.state(), &GenerationState::Idle);
        assert!(session.source().is_some());
    }

    #[test]
    fn failure_after_success_clears_previous_result() {
        let mut session = session_with_source();
        let ticket = session.trigger_generate().unwrap();
        session.complete(ticket, Ok(image("first"))).unwrap();

        let ticket = session.trigger_generate().unwrap();
        assert!(session.result().is_none());
        session.complete(ticket, Err(AppError::no_image())).unwrap();
        assert!(session.result().is_none());
        assert_eq!(session.error(), Some(AppError::NO_IMAGE_PRODUCED));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn invalid_upload_leaves_session_untouched() {
        let mut session = session_with_source();
        let ticket = session.trigger_generate().unwrap();
        session.complete(ticket, Ok(image("out"))).unwrap();

        let err = session.upload_image(b"text", "text/plain").unwrap_err();
        assert!(matches!(err, AppError::InvalidFileType(_)));
        assert_eq!(session.result(), Some(&image("out")));
        assert_eq!(session.source().unwrap().mime_type, "image/jpeg");
    }

    #[test]
    fn new_upload_clears_result() {
        let mut session = session_with_source();
        let ticket = session.trigger_generate().unwrap();
        session.complete(ticket, Ok(image("out"))).unwrap();

        session.upload_image(b"png-bytes", "image/png").unwrap();
        assert_eq!(session.state(), &GenerationState::Idle);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn upload_during_flight_detaches_display_but_keeps_history() {
        let mut session = session_with_source();
        let original = session.source().cloned().unwrap();
        let ticket = session.trigger_generate().unwrap();

        session.upload_image(b"other", "image/png").unwrap();
        assert_eq!(session.state(), &GenerationState::Idle);
        assert!(session.is_generating());
        assert!(!session.can_generate());

        session.complete(ticket, Ok(image("late"))).unwrap();
        assert_eq!(session.state(), &GenerationState::Idle);
        assert_eq!(session.history().latest().unwrap().original, original);
        assert!(session.can_generate());
    }

    #[test]
    fn stale_ticket_is_rejected() {
        let mut session = session_with_source();
        let ticket = session.trigger_generate().unwrap();
        session.complete(ticket, Ok(image("a"))).unwrap();

        let forged = GenerationTicket {
            id: 99,
            request: GenerationRequest::new(session.source().unwrap(), "x"),
        };
        assert!(matches!(
            session.complete(forged, Ok(image("b"))),
            Err(AppError::StaleTicket(99))
        ));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn selecting_history_restores_pair_without_reordering() {
        let mut session = session_with_source();
        let t0 = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let ticket = session.trigger_generate().unwrap();
        let first = session.complete_at(ticket, Ok(image("one")), t0).unwrap().unwrap();

        session.upload_image(b"second", "image/png").unwrap();
        let ticket = session.trigger_generate().unwrap();
        session
            .complete_at(ticket, Ok(image("two")), t0 + chrono::Duration::seconds(5))
            .unwrap();

        let before: Vec<String> = session.history().iter().map(|i| i.id.clone()).collect();
        session.select_history_item(&first).unwrap();

        let item = session.history().get(&first).unwrap();
        assert_eq!(session.source(), Some(&item.original));
        assert_eq!(session.result(), Some(&item.result));
        let after: Vec<String> = session.history().iter().map(|i| i.id.clone()).collect();
        assert_eq!(before, after);

        assert!(matches!(
            session.select_history_item("nope"),
            Err(AppError::HistoryItemNotFound(_))
        ));
    }

    #[test]
    fn clear_source_drops_everything_but_history() {
        let mut session = session_with_source();
        let ticket = session.trigger_generate().unwrap();
        session.complete(ticket, Ok(image("out"))).unwrap();

        session.clear_source();
        assert!(session.source().is_none());
        assert_eq!(session.state(), &GenerationState::Idle);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn snapshot_reflects_settings() {
        let mut session = session_with_source();
        session.toggle_theme();
        session.select_mode(PromptMode::Custom);
        session.set_custom_text("retro poster");

        let snapshot = session.snapshot();
        assert!(snapshot.dark_mode);
        assert!(snapshot.can_generate);
        assert_eq!(snapshot.status, GenerationStatus::Idle);
        assert_eq!(snapshot.source_mime_type.as_deref(), Some("image/jpeg"));

        let json = snapshot.to_json_pretty().unwrap();
        assert!(json.contains("\"mode\": \"custom\""));
        assert!(json.contains("\"tint\": \"none\""));
    }

    #[test]
    fn snapshot_lists_history_newest_first() {
        let mut session = session_with_source();
        let t0 = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let ticket = session.trigger_generate().unwrap();
        session.complete_at(ticket, Ok(image("one")), t0).unwrap();

        session.select_mode(PromptMode::Custom);
        session.set_custom_text("add a hat");
        let ticket = session.trigger_generate().unwrap();
        session
            .complete_at(ticket, Ok(image("two")), t0 + chrono::Duration::seconds(1))
            .unwrap();

        let snapshot = session.snapshot();
        let entries: Vec<(&str, &str)> = snapshot
            .history
            .iter()
            .map(|entry| (entry.id.as_str(), entry.style_id.as_str()))
            .collect();
        assert_eq!(entries, vec![("1700000001000", "custom"), ("1700000000000", "corporate")]);
        assert_eq!(snapshot.history[1].created_at, t0);
        assert_eq!(snapshot.history_len, 2);

        let json = snapshot.to_json_pretty().unwrap();
        assert!(json.contains("\"id\": \"1700000001000\""));
        assert!(json.contains("\"style_id\": \"corporate\""));
    }
}
