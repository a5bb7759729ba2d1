//! Wizard Controller: the state machine driving the questionnaire flow.
//!
//! The controller owns the derived section/step lists, the answer store and
//! the photo-requirement aggregate. Every cart mutation is an invalidation
//! signal: sections, steps and the current position are rebuilt from scratch,
//! with the position re-resolved by scanning for the first unanswered step,
//! never by reusing a numeric index against a stale list.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::answers::{AnswerStore, SyncReport};
use crate::catalog::{CartItem, Question, product_names};
use crate::error::{Result, WizardError};
use crate::photos::{CartPhotosRequirement, PhotoRule, aggregate};
use crate::sections::{Section, Step, build_sections, flatten_steps, question_at};
use crate::storage::{AnswerRepository, QuestionCatalog};

/// Where the flow goes after a confirmed review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTarget {
    UploadPhotos,
    Checkout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WizardState {
    /// Initialization has not completed; navigation is rejected.
    Loading,
    /// Collecting the answer for the step at this flat index.
    Answering { step: usize },
    /// All steps answered; read-only summary with per-question edit.
    Review,
    /// Confirmed; the host navigates to `target`.
    Complete { target: NavigationTarget },
}

/// One row of the review summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub section: String,
    pub question_id: String,
    pub question_text: String,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wizard {
    catalog: Vec<Question>,
    cart: Vec<CartItem>,
    cart_names: Vec<String>,
    sections: Vec<Section>,
    steps: Vec<Step>,
    state: WizardState,
    answers: AnswerStore,
    photo_rules: Vec<PhotoRule>,
    photo_requirements: CartPhotosRequirement,
    consent_given: bool,
    review_synced: bool,
    /// Question ids whose last review flush failed; they remain dirty and
    /// are retried on the next sync, the user is not blocked.
    sync_failures: Vec<String>,
}

impl Wizard {
    pub fn new(photo_rules: Vec<PhotoRule>) -> Self {
        Self {
            catalog: Vec::new(),
            cart: Vec::new(),
            cart_names: Vec::new(),
            sections: Vec::new(),
            steps: Vec::new(),
            state: WizardState::Loading,
            answers: AnswerStore::new(),
            photo_rules,
            photo_requirements: CartPhotosRequirement::new(),
            consent_given: false,
            review_synced: false,
            sync_failures: Vec::new(),
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn photo_requirements(&self) -> &CartPhotosRequirement {
        &self.photo_requirements
    }

    pub fn consent_given(&self) -> bool {
        self.consent_given
    }

    pub fn cart_names(&self) -> &[String] {
        &self.cart_names
    }

    pub fn sync_failures(&self) -> &[String] {
        &self.sync_failures
    }

    /// Run the initialization protocol: fetch the catalog if absent, fetch
    /// the answer snapshot (idempotent-guarded), then rebuild sections,
    /// steps and the resume position. A fetch failure leaves the wizard in
    /// `Loading`; calling again retries whatever is still missing.
    pub async fn initialize(
        &mut self,
        catalog: &dyn QuestionCatalog,
        repo: &dyn AnswerRepository,
        cart: &[CartItem],
    ) -> Result<()> {
        if self.catalog.is_empty() {
            self.catalog = catalog.fetch_questions().await?;
        }
        self.answers.fetch_from(repo).await?;
        self.cart = cart.to_vec();
        self.cart_names = product_names(cart);
        self.rebuild();
        Ok(())
    }

    /// Replace the cart snapshot. When the product-name set actually changed,
    /// the whole derivation chain is rebuilt and the position re-resolved.
    /// Returns whether a rebuild happened. No-op while still `Loading`
    /// (initialization will derive everything from the stored cart).
    pub fn set_cart(&mut self, cart: &[CartItem]) -> bool {
        let names = product_names(cart);
        let changed = names != self.cart_names;
        self.cart = cart.to_vec();
        self.cart_names = names;
        if matches!(self.state, WizardState::Loading) {
            return false;
        }
        if changed {
            info!(products = self.cart_names.len(), "cart mix changed, rebuilding wizard");
            self.rebuild();
        }
        changed
    }

    /// Derive sections and steps from the current catalog and cart, then
    /// resume at the first unanswered step (or Review when none remain).
    /// Entering Review this way re-arms the one-shot sync latch.
    fn rebuild(&mut self) {
        self.sections = build_sections(&self.catalog, &self.cart_names);
        self.steps = flatten_steps(&self.sections);
        self.review_synced = false;
        self.state = match self.first_unanswered() {
            Some(step) => WizardState::Answering { step },
            None => WizardState::Review,
        };
        debug!(steps = self.steps.len(), state = ?self.state, "wizard rebuilt");
    }

    fn first_unanswered(&self) -> Option<usize> {
        self.steps.iter().position(|step| {
            question_at(&self.sections, *step)
                .is_some_and(|q| !self.answers.is_answered(&q.question_id))
        })
    }

    pub fn question_at_step(&self, step_index: usize) -> Option<&Question> {
        self.steps
            .get(step_index)
            .and_then(|step| question_at(&self.sections, *step))
    }

    /// The question being answered, when in `Answering`.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            WizardState::Answering { step } => self.question_at_step(step),
            _ => None,
        }
    }

    /// Name of the section owning the current step, when in `Answering`.
    pub fn current_section_name(&self) -> Option<&str> {
        match self.state {
            WizardState::Answering { step } => self
                .steps
                .get(step)
                .and_then(|s| self.sections.get(s.section_index))
                .map(|section| section.name.as_str()),
            _ => None,
        }
    }

    fn validate(&self, question: &Question, primary: &str, details: Option<&str>) -> Result<()> {
        if primary.trim().is_empty() {
            return Err(WizardError::Validation("an answer is required".to_string()));
        }
        if question.options.is_some() && !question.has_option(primary) {
            return Err(WizardError::Validation(format!(
                "'{primary}' is not one of the offered options"
            )));
        }
        if question.details_shown_for(primary)
            && details.is_none_or(|d| d.trim().is_empty())
        {
            return Err(WizardError::Validation(
                "please provide details for your selection".to_string(),
            ));
        }
        Ok(())
    }

    /// Record the answer for the current step and move forward. The stored
    /// value is the composite `"<primary>, <details>"` only when the details
    /// field is actually shown for this primary; a leftover details value
    /// from a prior selection is never folded in. Reaching the end of the
    /// step list enters Review, which flushes dirty answers and recomputes
    /// the photo requirements (once per entry).
    pub async fn advance(
        &mut self,
        repo: &dyn AnswerRepository,
        primary: &str,
        details: Option<&str>,
    ) -> Result<()> {
        let WizardState::Answering { step } = self.state else {
            return Err(WizardError::InvalidTransition(
                "advance is only valid while answering".to_string(),
            ));
        };
        let question = self
            .question_at_step(step)
            .ok_or_else(|| {
                WizardError::InvalidTransition("current step no longer exists".to_string())
            })?
            .clone();
        self.validate(&question, primary, details)?;

        let value = match details.filter(|_| question.details_shown_for(primary)) {
            Some(details) => format!("{primary}, {}", details.trim()),
            None => primary.to_string(),
        };
        self.answers.set(&question.question_id, value);

        if step + 1 >= self.steps.len() {
            self.state = WizardState::Review;
            self.ensure_review_sync(repo).await;
        } else {
            self.state = WizardState::Answering { step: step + 1 };
        }
        Ok(())
    }

    /// Step back one question. A no-op at the first step.
    pub fn retreat(&mut self) -> Result<()> {
        match self.state {
            WizardState::Answering { step } if step > 0 => {
                self.state = WizardState::Answering { step: step - 1 };
                Ok(())
            }
            WizardState::Answering { .. } => Ok(()),
            _ => Err(WizardError::InvalidTransition(
                "previous is only valid while answering".to_string(),
            )),
        }
    }

    /// From Review, jump back to a question resolved by identity. The flat
    /// index is looked up by `question_id`, never taken from the review
    /// screen's iteration order, because sections are rebuilt dynamically.
    /// Leaving Review re-arms the sync latch for the next entry.
    pub fn edit_question(&mut self, question_id: &str) -> Result<()> {
        if !matches!(self.state, WizardState::Review) {
            return Err(WizardError::InvalidTransition(
                "editing is only available from review".to_string(),
            ));
        }
        let step = (0..self.steps.len())
            .find(|i| {
                self.question_at_step(*i)
                    .is_some_and(|q| q.question_id == question_id)
            })
            .ok_or_else(|| WizardError::QuestionNotFound(question_id.to_string()))?;
        self.review_synced = false;
        self.state = WizardState::Answering { step };
        Ok(())
    }

    /// Run the Review-entry side effects at most once per entry: flush all
    /// dirty answers (best-effort, partial failure keeps the rest going) and
    /// recompute the photo-requirement aggregate from the saved answers and
    /// the current cart. Safe to call repeatedly; returns `None` when there
    /// is nothing to do.
    pub async fn ensure_review_sync(
        &mut self,
        repo: &dyn AnswerRepository,
    ) -> Option<SyncReport> {
        if !matches!(self.state, WizardState::Review) || self.review_synced {
            return None;
        }
        // latch before the flush so a re-entrant call cannot double-trigger
        self.review_synced = true;
        let report = self.answers.sync_dirty(repo).await;
        self.sync_failures = report.failed.clone();
        self.photo_requirements = aggregate(&self.photo_rules, &self.cart_names, &self.answers);
        info!(
            synced = report.synced,
            failed = report.failed.len(),
            photo_products = self.photo_requirements.len(),
            "review sync completed"
        );
        Some(report)
    }

    /// Record the policies/terms acknowledgement checkbox.
    pub fn set_consent(&mut self, given: bool) -> Result<()> {
        if !matches!(self.state, WizardState::Review) {
            return Err(WizardError::InvalidTransition(
                "consent is collected on the review screen".to_string(),
            ));
        }
        self.consent_given = given;
        Ok(())
    }

    /// Confirm the review. Requires consent; routes to the photo-upload step
    /// when any photo category is required for a product currently in the
    /// cart, otherwise straight to checkout.
    pub fn confirm(&mut self) -> Result<NavigationTarget> {
        if !matches!(self.state, WizardState::Review) {
            return Err(WizardError::InvalidTransition(
                "confirmation is only valid from review".to_string(),
            ));
        }
        if !self.consent_given {
            return Err(WizardError::Validation(
                "the terms acknowledgement must be accepted before continuing".to_string(),
            ));
        }
        let needs_photos = self
            .photo_requirements
            .iter()
            .any(|(product, categories)| {
                !categories.is_empty() && self.cart_names.iter().any(|n| n == product)
            });
        let target = if needs_photos {
            NavigationTarget::UploadPhotos
        } else {
            NavigationTarget::Checkout
        };
        self.state = WizardState::Complete { target };
        info!(target = ?target, "wizard confirmed");
        Ok(target)
    }

    /// Best-effort flush when the host leaves the flow before Review ran its
    /// sync. Harmless when nothing is dirty.
    pub async fn on_exit(&mut self, repo: &dyn AnswerRepository) -> SyncReport {
        if self.answers.dirty_count() == 0 {
            return SyncReport::default();
        }
        debug!(dirty = self.answers.dirty_count(), "flushing dirty answers on exit");
        self.answers.sync_dirty(repo).await
    }

    /// Read-only review rows in section order.
    pub fn review_entries(&self) -> Vec<ReviewEntry> {
        self.sections
            .iter()
            .flat_map(|section| {
                section.questions.iter().map(|q| ReviewEntry {
                    section: section.name.clone(),
                    question_id: q.question_id.clone(),
                    question_text: q.question_text.clone(),
                    answer: self.answers.get(&q.question_id).map(|a| a.to_string()),
                })
            })
            .collect()
    }

    pub fn answered_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| {
                question_at(&self.sections, **step)
                    .is_some_and(|q| self.answers.is_answered(&q.question_id))
            })
            .count()
    }
}

/// Split a stored composite answer back into primary and details for
/// re-display. The primary is resolved against the question's declared
/// options first (longest option wins) so a primary that itself contains a
/// comma-space cannot be mis-split; free-text answers fall back to the first
/// `", "`. Display convenience only, not a strict invariant.
pub fn split_composite<'a>(question: &Question, stored: &'a str) -> (&'a str, Option<&'a str>) {
    if let Some(options) = &question.options {
        let mut by_length: Vec<&String> = options.iter().collect();
        by_length.sort_by_key(|o| std::cmp::Reverse(o.len()));
        for option in by_length {
            if stored == option.as_str() {
                return (stored, None);
            }
            if let Some(rest) = stored.strip_prefix(option.as_str())
                && let Some(details) = rest.strip_prefix(", ")
            {
                return (&stored[..option.len()], Some(details));
            }
        }
    }
    match stored.split_once(", ") {
        Some((primary, details)) => (primary, Some(details)),
        None => (stored, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, DetailsQuestion, QuestionType};
    use crate::storage::{InMemoryAnswerRepository, InMemoryQuestionCatalog};

    fn radio(id: &str, category: Category, product_key: Option<&str>, options: &[&str]) -> Question {
        Question {
            question_id: id.to_string(),
            question_text: format!("{id}?"),
            question_type: QuestionType::Radio,
            options: Some(options.iter().map(|o| o.to_string()).collect()),
            category,
            product_key: product_key.map(|k| k.to_string()),
            details_question: None,
        }
    }

    fn with_details(mut question: Question, show_if: &[&str]) -> Question {
        question.details_question = Some(DetailsQuestion {
            question_text: "Please specify".to_string(),
            show_if: show_if.iter().map(|s| s.to_string()).collect(),
        });
        question
    }

    fn catalog() -> Vec<Question> {
        vec![
            radio("over18", Category::Personal, None, &["Yes", "No"]),
            with_details(
                radio("allergies", Category::Medical, None, &["None", "Other"]),
                &["Other"],
            ),
            radio("whichArea", Category::Product, Some("Cream A"), &["Face", "Body"]),
        ]
    }

    fn cart(names: &[&str]) -> Vec<CartItem> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| CartItem { id: i.to_string(), name: name.to_string(), quantity: 1 })
            .collect()
    }

    async fn initialized(
        questions: Vec<Question>,
        repo: &InMemoryAnswerRepository,
        cart_names: &[&str],
    ) -> Wizard {
        let catalog = InMemoryQuestionCatalog::new(questions);
        let mut wizard = Wizard::new(Vec::new());
        wizard
            .initialize(&catalog, repo, &cart(cart_names))
            .await
            .unwrap();
        wizard
    }

    #[tokio::test]
    async fn resumes_at_first_unanswered_step() {
        let repo = InMemoryAnswerRepository::new();
        repo.insert("over18", "Yes");
        let wizard = initialized(catalog(), &repo, &["Cream A"]).await;
        assert_eq!(wizard.state(), WizardState::Answering { step: 1 });
        assert_eq!(wizard.current_question().unwrap().question_id, "allergies");
    }

    #[tokio::test]
    async fn all_answered_resumes_in_review() {
        let repo = InMemoryAnswerRepository::new();
        repo.insert("over18", "Yes");
        repo.insert("allergies", "None");
        repo.insert("whichArea", "Face");
        let wizard = initialized(catalog(), &repo, &["Cream A"]).await;
        assert_eq!(wizard.state(), WizardState::Review);
    }

    #[tokio::test]
    async fn blank_answers_do_not_count_as_answered() {
        let repo = InMemoryAnswerRepository::new();
        repo.insert("over18", "  ");
        let wizard = initialized(catalog(), &repo, &[]).await;
        assert_eq!(wizard.state(), WizardState::Answering { step: 0 });
    }

    #[tokio::test]
    async fn cart_change_rebuilds_and_rescans_position() {
        let repo = InMemoryAnswerRepository::new();
        repo.insert("over18", "Yes");
        repo.insert("allergies", "None");
        let mut wizard = initialized(catalog(), &repo, &["Cream A"]).await;
        // positioned on the product question
        assert_eq!(wizard.state(), WizardState::Answering { step: 2 });

        // removing the product leaves only answered steps: straight to review
        assert!(wizard.set_cart(&cart(&[])));
        assert_eq!(wizard.state(), WizardState::Review);
        assert_eq!(wizard.step_count(), 2);

        // adding it back re-derives the position, not the old index
        assert!(wizard.set_cart(&cart(&["Cream A"])));
        assert_eq!(wizard.state(), WizardState::Answering { step: 2 });
        assert_eq!(wizard.current_question().unwrap().question_id, "whichArea");
    }

    #[tokio::test]
    async fn same_cart_mix_does_not_rebuild() {
        let repo = InMemoryAnswerRepository::new();
        let mut wizard = initialized(catalog(), &repo, &["Cream A"]).await;
        // quantity-only change keeps the name set identical
        let mut items = cart(&["Cream A"]);
        items[0].quantity = 3;
        assert!(!wizard.set_cart(&items));
    }

    #[tokio::test]
    async fn advance_requires_valid_primary() {
        let repo = InMemoryAnswerRepository::new();
        let mut wizard = initialized(catalog(), &repo, &[]).await;
        assert!(matches!(
            wizard.advance(&repo, "", None).await,
            Err(WizardError::Validation(_))
        ));
        assert!(matches!(
            wizard.advance(&repo, "Maybe", None).await,
            Err(WizardError::Validation(_))
        ));
        assert_eq!(wizard.state(), WizardState::Answering { step: 0 });
    }

    #[tokio::test]
    async fn details_gating_composes_and_never_leaks() {
        let repo = InMemoryAnswerRepository::new();
        repo.insert("over18", "Yes");
        let mut wizard = initialized(catalog(), &repo, &[]).await;
        assert_eq!(wizard.current_question().unwrap().question_id, "allergies");

        // details required when the trigger option is selected
        assert!(matches!(
            wizard.advance(&repo, "Other", None).await,
            Err(WizardError::Validation(_))
        ));
        wizard.advance(&repo, "Other", Some("penicillin")).await.unwrap();
        assert_eq!(wizard.answers().get("allergies"), Some("Other, penicillin"));

        // re-answering with a non-trigger option drops the leftover details
        wizard.edit_question("allergies").unwrap();
        wizard.advance(&repo, "None", Some("penicillin")).await.unwrap();
        assert_eq!(wizard.answers().get("allergies"), Some("None"));
    }

    #[tokio::test]
    async fn retreat_is_clamped_at_first_step() {
        let repo = InMemoryAnswerRepository::new();
        repo.insert("over18", "Yes");
        let mut wizard = initialized(catalog(), &repo, &[]).await;
        wizard.retreat().unwrap();
        assert_eq!(wizard.state(), WizardState::Answering { step: 0 });
        wizard.retreat().unwrap();
        assert_eq!(wizard.state(), WizardState::Answering { step: 0 });
    }

    #[tokio::test]
    async fn review_sync_runs_once_per_entry() {
        let repo = InMemoryAnswerRepository::new();
        let mut wizard = initialized(catalog(), &repo, &[]).await;
        wizard.advance(&repo, "Yes", None).await.unwrap();
        wizard.advance(&repo, "None", None).await.unwrap();
        assert_eq!(wizard.state(), WizardState::Review);
        // flushed on entry
        assert_eq!(wizard.answers().dirty_count(), 0);
        assert_eq!(repo.get("over18"), Some("Yes".to_string()));

        // re-invocation while staying in review is a no-op
        assert!(wizard.ensure_review_sync(&repo).await.is_none());

        // editing re-arms the latch for the next entry
        wizard.edit_question("over18").unwrap();
        wizard.advance(&repo, "No", None).await.unwrap();
        wizard.advance(&repo, "None", None).await.unwrap();
        assert_eq!(repo.get("over18"), Some("No".to_string()));
    }

    #[tokio::test]
    async fn edit_resolves_step_by_identity() {
        let repo = InMemoryAnswerRepository::new();
        repo.insert("over18", "Yes");
        repo.insert("allergies", "None");
        repo.insert("whichArea", "Face");
        let mut wizard = initialized(catalog(), &repo, &["Cream A"]).await;
        assert_eq!(wizard.state(), WizardState::Review);
        wizard.edit_question("whichArea").unwrap();
        assert_eq!(wizard.state(), WizardState::Answering { step: 2 });
        assert!(matches!(
            {
                // back in review before editing an unknown id
                wizard.advance(&repo, "Body", None).await.unwrap();
                wizard.edit_question("missing")
            },
            Err(WizardError::QuestionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn confirm_requires_consent_and_routes_by_photo_need() {
        let repo = InMemoryAnswerRepository::new();
        let rules = vec![PhotoRule {
            product_key: "Cream A".to_string(),
            question_id: Some("whichArea".to_string()),
            if_answer: vec!["Face".to_string()],
            categories: vec!["face-front".to_string()],
        }];
        let catalog_source = InMemoryQuestionCatalog::new(catalog());
        let mut wizard = Wizard::new(rules);
        wizard
            .initialize(&catalog_source, &repo, &cart(&["Cream A"]))
            .await
            .unwrap();
        wizard.advance(&repo, "Yes", None).await.unwrap();
        wizard.advance(&repo, "None", None).await.unwrap();
        wizard.advance(&repo, "Face", None).await.unwrap();
        assert_eq!(wizard.state(), WizardState::Review);

        assert!(matches!(wizard.confirm(), Err(WizardError::Validation(_))));
        wizard.set_consent(true).unwrap();
        assert_eq!(wizard.confirm().unwrap(), NavigationTarget::UploadPhotos);
        assert_eq!(
            wizard.state(),
            WizardState::Complete { target: NavigationTarget::UploadPhotos }
        );
    }

    #[tokio::test]
    async fn stale_photo_requirements_do_not_block_checkout() {
        let repo = InMemoryAnswerRepository::new();
        // answer for a product that will be removed before review
        repo.insert("over18", "Yes");
        repo.insert("allergies", "None");
        repo.insert("whichArea", "Face");
        let rules = vec![PhotoRule {
            product_key: "Cream A".to_string(),
            question_id: Some("whichArea".to_string()),
            if_answer: vec!["Face".to_string()],
            categories: vec!["face-front".to_string()],
        }];
        let catalog_source = InMemoryQuestionCatalog::new(catalog());
        let mut wizard = Wizard::new(rules);
        // cart no longer contains Cream A
        wizard.initialize(&catalog_source, &repo, &cart(&[])).await.unwrap();
        assert_eq!(wizard.state(), WizardState::Review);
        wizard.ensure_review_sync(&repo).await;
        assert!(wizard.photo_requirements().is_empty());
        wizard.set_consent(true).unwrap();
        assert_eq!(wizard.confirm().unwrap(), NavigationTarget::Checkout);
    }

    #[tokio::test]
    async fn exit_flushes_dirty_answers() {
        let repo = InMemoryAnswerRepository::new();
        let mut wizard = initialized(catalog(), &repo, &[]).await;
        wizard.advance(&repo, "Yes", None).await.unwrap();
        assert!(repo.get("over18").is_none());
        let report = wizard.on_exit(&repo).await;
        assert_eq!(report.synced, 1);
        assert_eq!(repo.get("over18"), Some("Yes".to_string()));
        // nothing left to do
        assert_eq!(wizard.on_exit(&repo).await.synced, 0);
    }

    #[test]
    fn composite_split_prefers_declared_options() {
        let question = with_details(
            radio("pain", Category::Medical, None, &["None", "Yes, severe"]),
            &["Yes, severe"],
        );
        assert_eq!(
            split_composite(&question, "Yes, severe, since last week"),
            ("Yes, severe", Some("since last week"))
        );
        assert_eq!(split_composite(&question, "None"), ("None", None));

        let free_text = Question {
            question_id: "notes".to_string(),
            question_text: "Notes".to_string(),
            question_type: QuestionType::Text,
            options: None,
            category: Category::Medical,
            product_key: None,
            details_question: None,
        };
        assert_eq!(
            split_composite(&free_text, "headache, mild"),
            ("headache", Some("mild"))
        );
    }
}
