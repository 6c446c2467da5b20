//! Observable view state and generation orchestration.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use prompt_builder::{GenerationResult, PromptRequestBuilder};
use prompt_primitives::{
    GeneratedResult, GenerationStatus, SelectedTags, TagCategory, TagOption,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::transitions::{StatusEvent, StatusMachine};

/// Snapshot of everything a view renders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    input_text: String,
    selected_tags: SelectedTags,
    result: Option<GeneratedResult>,
    status: GenerationStatus,
    error: Option<String>,
}

impl ViewState {
    /// Current scene description.
    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Tags the user selected, in selection order.
    #[must_use]
    pub fn selected_tags(&self) -> &SelectedTags {
        &self.selected_tags
    }

    /// Latest successful result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&GeneratedResult> {
        self.result.as_ref()
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> GenerationStatus {
        self.status
    }

    /// User-facing error message of the latest failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Handle for one in-flight generation.
///
/// Returned by [`PresentationController::begin_generation`] and consumed by
/// [`PresentationController::complete_generation`].
#[derive(Debug)]
pub struct GenerationTicket {
    token: u64,
    input: String,
    tags: Vec<TagOption>,
}

impl GenerationTicket {
    /// Sequence number of this generation.
    #[must_use]
    pub const fn token(&self) -> u64 {
        self.token
    }

    /// Scene description captured when the generation began.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Selected tags captured when the generation began.
    #[must_use]
    pub fn tags(&self) -> &[TagOption] {
        &self.tags
    }
}

/// What happened to a generate trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Blank input; nothing was sent and the state is unchanged.
    Skipped,
    /// The completion was applied, leaving the view in the given status.
    Applied(GenerationStatus),
    /// A newer generation or a reset happened first; the completion was
    /// dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct Inner {
    view: ViewState,
    machine: StatusMachine,
    latest: u64,
}

impl Inner {
    fn apply(&mut self, event: StatusEvent) {
        match self.machine.transition(event) {
            Ok(status) => self.view.status = status,
            Err(err) => warn!(error = %err, "status transition rejected"),
        }
    }
}

/// Owns the view state and drives the [`PromptRequestBuilder`].
///
/// Every generation and every reset advances a sequence number; completions
/// carrying an older number are dropped, so a stale reply can never overwrite
/// a newer request or a reset.
pub struct PresentationController {
    builder: PromptRequestBuilder,
    inner: Mutex<Inner>,
}

impl fmt::Debug for PresentationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationController")
            .field("builder", &self.builder)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl PresentationController {
    /// Creates a controller in the idle state.
    #[must_use]
    pub fn new(builder: PromptRequestBuilder) -> Self {
        Self {
            builder,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current view state.
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.lock().view.clone()
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> GenerationStatus {
        self.lock().view.status
    }

    /// Replaces the scene description.
    pub fn set_input(&self, text: impl Into<String>) {
        self.lock().view.input_text = text.into();
    }

    /// Selects the tag, or deselects it if a tag with the same id is
    /// selected. Returns `true` when the tag is selected afterwards.
    pub fn toggle_tag(&self, tag: &TagOption) -> bool {
        self.lock().view.selected_tags.toggle(tag)
    }

    /// Deselects every tag. Status and result are untouched.
    pub fn clear_tags(&self) {
        self.lock().view.selected_tags.clear();
    }

    /// Returns `true` when a generate trigger would do anything: the input is
    /// not blank and no request is in flight.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        let inner = self.lock();
        !inner.view.status.is_loading() && !inner.view.input_text.trim().is_empty()
    }

    /// Suggested tags of the current result, grouped by category.
    #[must_use]
    pub fn suggested_categories(&self) -> Vec<TagCategory> {
        self.lock()
            .view
            .result
            .as_ref()
            .map(GeneratedResult::suggested_categories)
            .unwrap_or_default()
    }

    /// Clears input, result, selected tags, and error, and returns to idle.
    ///
    /// Any generation still in flight is superseded.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.view = ViewState::default();
        inner.apply(StatusEvent::Reset);
    }

    /// Enters the loading state and captures the request inputs.
    ///
    /// Returns `None` without touching state when the input is blank.
    pub fn begin_generation(&self) -> Option<GenerationTicket> {
        let mut inner = self.lock();
        if inner.view.input_text.trim().is_empty() {
            return None;
        }

        inner.latest += 1;
        inner.view.error = None;
        inner.apply(StatusEvent::Submit);

        Some(GenerationTicket {
            token: inner.latest,
            input: inner.view.input_text.clone(),
            tags: inner.view.selected_tags.as_slice().to_vec(),
        })
    }

    /// Applies the outcome of the generation identified by `ticket`, unless a
    /// newer generation or a reset happened since it began.
    pub fn complete_generation(
        &self,
        ticket: GenerationTicket,
        outcome: GenerationResult<GeneratedResult>,
    ) -> GenerateOutcome {
        let mut inner = self.lock();
        if ticket.token != inner.latest {
            debug!(
                token = ticket.token,
                latest = inner.latest,
                "dropping superseded generation"
            );
            return GenerateOutcome::Superseded;
        }

        match outcome {
            Ok(result) => {
                inner.view.result = Some(result);
                inner.view.error = None;
                inner.apply(StatusEvent::Resolve);
            }
            Err(err) => {
                inner.view.error = Some(err.user_message().to_owned());
                inner.apply(StatusEvent::Reject);
            }
        }

        GenerateOutcome::Applied(inner.view.status)
    }

    /// Runs one generation with the current input and selected tags.
    ///
    /// Blank input is a no-op. Failures never escape: they become
    /// [`GenerationStatus::Error`] with a user-facing message.
    pub async fn generate(&self) -> GenerateOutcome {
        let Some(ticket) = self.begin_generation() else {
            return GenerateOutcome::Skipped;
        };

        let outcome = self.builder.generate(ticket.input(), ticket.tags()).await;
        self.complete_generation(ticket, outcome)
    }
}
