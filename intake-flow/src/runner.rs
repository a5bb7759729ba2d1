//! WizardRunner – convenience wrapper that loads a session, applies exactly
//! one wizard event, runs any pending review-entry sync, and persists the
//! updated session back to storage.
//!
//! Interactive hosts (the storefront's HTTP service) want to apply one event
//! per request, send the resulting snapshot back to the client, and have the
//! session automatically saved for the next roundtrip. `WizardRunner` makes
//! that a one-liner; callers with custom persistence needs can drive
//! [`Wizard`] directly and save through [`SessionStorage`] themselves.
//!
//! Validation failures are part of the snapshot (`validation_message`), not
//! transport errors: an invalid answer leaves the wizard where it was and the
//! client re-renders the message inline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::{CartItem, DetailsQuestion, Question, QuestionType};
use crate::error::{Result, WizardError};
use crate::photos::{CartPhotosRequirement, PhotoRule};
use crate::storage::{AnswerRepository, QuestionCatalog, Session, SessionStorage};
use crate::wizard::{ReviewEntry, Wizard, WizardState, split_composite};

/// One user interaction with the wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    /// Answer the current step and move forward.
    Answer {
        value: String,
        #[serde(default)]
        details: Option<String>,
    },
    /// Step back one question.
    Previous,
    /// From review, jump to a question by identity.
    Edit { question_id: String },
    /// The cart collaborator reports a new cart snapshot.
    CartChanged { items: Vec<CartItem> },
    /// Toggle the policies/terms acknowledgement.
    Consent { given: bool },
    /// Confirm the review and resolve the navigation target.
    Confirm,
    /// The host is leaving the flow; flush whatever is still dirty.
    Exit,
}

/// Renderable view of the question being asked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub section: String,
    pub question_id: String,
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details_question: Option<DetailsQuestion>,
    /// Previously stored primary value, for prefill when stepping back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_details: Option<String>,
}

/// Snapshot returned to the client after every event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub state: WizardState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub review: Vec<ReviewEntry>,
    pub consent_given: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
    /// Question ids whose background flush failed; they stay dirty and will
    /// be retried, the user is not blocked.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sync_failures: Vec<String>,
    pub photo_requirements: CartPhotosRequirement,
    pub answered: usize,
    pub total_steps: usize,
}

/// High-level helper orchestrating the _load → apply → sync → save_ pattern.
#[derive(Clone)]
pub struct WizardRunner {
    catalog: Arc<dyn QuestionCatalog>,
    answers: Arc<dyn AnswerRepository>,
    sessions: Arc<dyn SessionStorage>,
    photo_rules: Vec<PhotoRule>,
}

impl WizardRunner {
    pub fn new(
        catalog: Arc<dyn QuestionCatalog>,
        answers: Arc<dyn AnswerRepository>,
        sessions: Arc<dyn SessionStorage>,
        photo_rules: Vec<PhotoRule>,
    ) -> Self {
        Self { catalog, answers, sessions, photo_rules }
    }

    /// Create a new session from a cart snapshot and run initialization to
    /// completion. Initialization failure is fatal to the wizard: nothing is
    /// persisted and the caller gets the error to surface as a retryable
    /// blocking state.
    pub async fn start(&self, cart: &[CartItem]) -> Result<WizardResponse> {
        let session_id = Uuid::new_v4().to_string();
        let mut wizard = Wizard::new(self.photo_rules.clone());
        wizard
            .initialize(self.catalog.as_ref(), self.answers.as_ref(), cart)
            .await?;
        wizard.ensure_review_sync(self.answers.as_ref()).await;
        info!(session_id = %session_id, state = ?wizard.state(), "wizard session started");
        let response = build_response(&session_id, &wizard, None);
        self.sessions
            .save(Session::new(session_id, wizard))
            .await?;
        Ok(response)
    }

    /// Apply exactly one event to the given session and persist the result.
    pub async fn run(&self, session_id: &str, event: WizardEvent) -> Result<WizardResponse> {
        let mut session = self
            .sessions
            .get(session_id)
            .await?
            .ok_or_else(|| WizardError::SessionNotFound(session_id.to_string()))?;

        debug!(session_id = %session_id, event = ?event, "applying wizard event");

        let mut validation_message = None;

        let outcome = match event {
            WizardEvent::Answer { value, details } => {
                session
                    .wizard
                    .advance(self.answers.as_ref(), &value, details.as_deref())
                    .await
            }
            WizardEvent::Previous => session.wizard.retreat(),
            WizardEvent::Edit { question_id } => session.wizard.edit_question(&question_id),
            WizardEvent::CartChanged { items } => {
                session.wizard.set_cart(&items);
                Ok(())
            }
            WizardEvent::Consent { given } => session.wizard.set_consent(given),
            WizardEvent::Confirm => session.wizard.confirm().map(|_| ()),
            WizardEvent::Exit => {
                session.wizard.on_exit(self.answers.as_ref()).await;
                Ok(())
            }
        };

        match outcome {
            Ok(()) => {}
            Err(WizardError::Validation(message)) => validation_message = Some(message),
            Err(err) => return Err(err),
        }

        // a rebuild may have landed in Review without its entry sync yet
        session
            .wizard
            .ensure_review_sync(self.answers.as_ref())
            .await;

        let response = build_response(session_id, &session.wizard, validation_message);
        self.sessions.save(session).await?;
        Ok(response)
    }

    /// Read-only snapshot of a session. Performs no transitions or flushes.
    pub async fn inspect(&self, session_id: &str) -> Result<WizardResponse> {
        let session = self
            .sessions
            .get(session_id)
            .await?
            .ok_or_else(|| WizardError::SessionNotFound(session_id.to_string()))?;
        Ok(build_response(session_id, &session.wizard, None))
    }
}

fn question_view(wizard: &Wizard, question: &Question) -> QuestionView {
    let (previous_value, previous_details) = match wizard.answers().get(&question.question_id) {
        Some(stored) => {
            let (primary, details) = split_composite(question, stored);
            (Some(primary.to_string()), details.map(|d| d.to_string()))
        }
        None => (None, None),
    };
    QuestionView {
        section: wizard.current_section_name().unwrap_or_default().to_string(),
        question_id: question.question_id.clone(),
        question_text: question.question_text.clone(),
        question_type: question.question_type,
        options: question.options.clone(),
        details_question: question.details_question.clone(),
        previous_value,
        previous_details,
    }
}

fn build_response(
    session_id: &str,
    wizard: &Wizard,
    validation_message: Option<String>,
) -> WizardResponse {
    let question = wizard.current_question().map(|q| question_view(wizard, q));
    let review = match wizard.state() {
        WizardState::Review => wizard.review_entries(),
        _ => Vec::new(),
    };
    WizardResponse {
        session_id: session_id.to_string(),
        state: wizard.state(),
        question,
        review,
        consent_given: wizard.consent_given(),
        validation_message,
        sync_failures: wizard.sync_failures().to_vec(),
        photo_requirements: wizard.photo_requirements().clone(),
        answered: wizard.answered_count(),
        total_steps: wizard.step_count(),
    }
}
