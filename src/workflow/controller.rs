use super::error::{RequestKind, WorkflowError};
use super::form::{today_release_date, QuizStatus};
use super::limits::WorkflowLimits;
use super::notice::{Notice, NoticeBoard, DEFAULT_NOTICE_DURATION};
use super::phase::{next_phase, Phase, PhaseError, PhaseTrigger, RedirectTarget};
use super::review::{GeneratedItem, ReviewSet};
use super::rows::{ConfigRow, RowStore};
use super::validate::validate_config;
use crate::catalog::CategoryCatalog;
use crate::client::{GenerationError, SaveError, SaveReceipt, EMPTY_GENERATION_MESSAGE};
use crate::config::Settings;
use crate::shared::ids::{CategoryId, RowId};
use std::time::{Duration, Instant};

pub const STALE_GENERATION_MESSAGE: &str =
    "The configuration changed while generating; the generated quizzes were discarded";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOptions {
    pub limits: WorkflowLimits,
    pub status: QuizStatus,
    pub release_date: String,
    pub notice_duration: Duration,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            limits: WorkflowLimits::default(),
            status: QuizStatus::default(),
            release_date: today_release_date(),
            notice_duration: DEFAULT_NOTICE_DURATION,
        }
    }
}

impl WorkflowOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            limits: settings.limits,
            status: settings.default_status,
            release_date: today_release_date(),
            notice_duration: settings.notice_duration(),
        }
    }
}

/// Identifies one outstanding request. `revision` is the row configuration
/// revision the request was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    sequence: u64,
    revision: u64,
}

impl RequestTicket {
    pub fn sequence(self) -> u64 {
        self.sequence
    }

    pub fn revision(self) -> u64 {
        self.revision
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    pub ticket: RequestTicket,
    pub rows: Vec<ConfigRow>,
    pub catalog: CategoryCatalog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub ticket: RequestTicket,
    pub items: Vec<GeneratedItem>,
    pub release_date: String,
    pub status: QuizStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Applied,
    Failed(String),
    /// The ticket was current but its result no longer matches the configuration.
    Discarded,
    /// The ticket does not match the outstanding request.
    Stale,
}

/// Owns every piece of workflow state. All mutation goes through here.
#[derive(Debug, Clone)]
pub struct WorkflowController {
    catalog: CategoryCatalog,
    rows: RowStore,
    review: ReviewSet,
    phase: Phase,
    release_date: String,
    status: QuizStatus,
    notices: NoticeBoard,
    generation: Option<RequestTicket>,
    save: Option<RequestTicket>,
    next_sequence: u64,
    config_revision: u64,
    exit: Option<RedirectTarget>,
}

impl WorkflowController {
    pub fn new(catalog: CategoryCatalog, options: WorkflowOptions) -> Self {
        Self {
            catalog,
            rows: RowStore::new(options.limits),
            review: ReviewSet::default(),
            phase: Phase::Config,
            release_date: options.release_date,
            status: options.status,
            notices: NoticeBoard::new(options.notice_duration),
            generation: None,
            save: None,
            next_sequence: 0,
            config_revision: 0,
            exit: None,
        }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn review(&self) -> &ReviewSet {
        &self.review
    }

    pub fn release_date(&self) -> &str {
        &self.release_date
    }

    pub fn status(&self) -> QuizStatus {
        self.status
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notices.active(now)
    }

    pub fn generation_in_flight(&self) -> bool {
        self.generation.is_some()
    }

    pub fn save_in_flight(&self) -> bool {
        self.save.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.generation_in_flight() || self.save_in_flight()
    }

    pub fn exit_target(&self) -> Option<&RedirectTarget> {
        self.exit.as_ref()
    }

    pub fn config_revision(&self) -> u64 {
        self.config_revision
    }

    /// Leaving now would drop generated quizzes that were never saved.
    pub fn requires_unload_confirmation(&self) -> bool {
        self.phase == Phase::Review && !self.review.is_empty()
    }

    pub fn raise_info(&mut self, message: impl Into<String>, now: Instant) {
        self.notices.raise_info(message, now);
    }

    pub fn raise_error(&mut self, message: impl Into<String>, now: Instant) {
        self.notices.raise_error(message, now);
    }

    pub fn add_row(&mut self) -> Result<RowId, WorkflowError> {
        self.ensure_row_editing()?;
        let id = self.rows.add_row();
        self.touch_config();
        Ok(id)
    }

    pub fn remove_row(&mut self, id: RowId) -> Result<bool, WorkflowError> {
        self.ensure_row_editing()?;
        let removed = self.rows.remove_row(id);
        self.touch_config();
        Ok(removed)
    }

    pub fn set_category(
        &mut self,
        id: RowId,
        category: Option<CategoryId>,
    ) -> Result<(), WorkflowError> {
        self.ensure_row_editing()?;
        self.rows.set_category(id, category)?;
        self.touch_config();
        Ok(())
    }

    pub fn set_category_input(&mut self, id: RowId, raw: &str) -> Result<(), WorkflowError> {
        self.ensure_row_editing()?;
        self.rows.set_category_input(id, raw)?;
        self.touch_config();
        Ok(())
    }

    pub fn cycle_category(
        &mut self,
        id: RowId,
        forward: bool,
    ) -> Result<Option<CategoryId>, WorkflowError> {
        self.ensure_row_editing()?;
        let selected = self.rows.cycle_category(id, &self.catalog, forward)?;
        self.touch_config();
        Ok(selected)
    }

    pub fn set_count(&mut self, id: RowId, value: i64) -> Result<u32, WorkflowError> {
        self.ensure_row_editing()?;
        let count = self.rows.set_count(id, value)?;
        self.touch_config();
        Ok(count)
    }

    pub fn set_count_input(&mut self, id: RowId, raw: &str) -> Result<u32, WorkflowError> {
        self.ensure_row_editing()?;
        let count = self.rows.set_count_input(id, raw)?;
        self.touch_config();
        Ok(count)
    }

    pub fn adjust_count(&mut self, id: RowId, delta: i64) -> Result<u32, WorkflowError> {
        self.ensure_row_editing()?;
        let count = self.rows.adjust_count(id, delta)?;
        self.touch_config();
        Ok(count)
    }

    pub fn set_release_date(&mut self, value: &str) -> Result<(), WorkflowError> {
        self.ensure_active()?;
        self.release_date = value.trim().to_string();
        Ok(())
    }

    pub fn set_status(&mut self, status: QuizStatus) -> Result<(), WorkflowError> {
        self.ensure_active()?;
        self.status = status;
        Ok(())
    }

    pub fn toggle_status(&mut self) -> Result<QuizStatus, WorkflowError> {
        self.set_status(self.status.toggled())?;
        Ok(self.status)
    }

    /// Validates and reserves the generation slot. Used by both generate and
    /// regenerate; validation failures raise a notice and leave state as is.
    pub fn begin_generation(&mut self, now: Instant) -> Result<PendingGeneration, WorkflowError> {
        self.ensure_active()?;
        if self.generation.is_some() {
            return Err(WorkflowError::RequestInFlight {
                kind: RequestKind::Generation,
            });
        }
        self.notices.clear();
        if let Err(err) = validate_config(&self.rows, &self.release_date) {
            self.notices.raise_error(err.to_string(), now);
            return Err(err.into());
        }
        let ticket = self.issue_ticket();
        self.generation = Some(ticket);
        Ok(PendingGeneration {
            ticket,
            rows: self.rows.rows().to_vec(),
            catalog: self.catalog.clone(),
        })
    }

    pub fn complete_generation(
        &mut self,
        ticket: RequestTicket,
        result: Result<ReviewSet, GenerationError>,
        now: Instant,
    ) -> CompletionOutcome {
        if self.generation != Some(ticket) {
            return CompletionOutcome::Stale;
        }
        self.generation = None;
        if self.exit.is_some() {
            return CompletionOutcome::Stale;
        }
        if ticket.revision != self.config_revision {
            self.notices.raise_info(STALE_GENERATION_MESSAGE, now);
            return CompletionOutcome::Discarded;
        }

        let review = match result {
            Ok(review) if !review.is_empty() => review,
            Ok(_) => return self.fail(EMPTY_GENERATION_MESSAGE.to_string(), now),
            Err(err) => return self.fail(err.notice_message(), now),
        };
        match self.transition(PhaseTrigger::GenerationSucceeded) {
            Ok(_) => {
                self.review = review;
                CompletionOutcome::Applied
            }
            Err(err) => self.fail(err.to_string(), now),
        }
    }

    pub fn back(&mut self) -> Result<(), WorkflowError> {
        self.ensure_active()?;
        self.transition(PhaseTrigger::Back)?;
        Ok(())
    }

    /// Removes one review item; emptying the review returns to Config.
    pub fn remove_review_item(&mut self, index: usize) -> Result<GeneratedItem, WorkflowError> {
        self.ensure_active()?;
        self.ensure_phase(Phase::Review)?;
        let removed = self.review.remove_item(index)?;
        if self.review.is_empty() {
            self.transition(PhaseTrigger::ReviewEmptied)?;
        }
        Ok(removed)
    }

    pub fn begin_save(&mut self, now: Instant) -> Result<PendingSave, WorkflowError> {
        self.ensure_active()?;
        if self.save.is_some() {
            return Err(WorkflowError::RequestInFlight {
                kind: RequestKind::Save,
            });
        }
        self.notices.clear();
        if self.review.is_empty() {
            let err = SaveError::NothingToSave;
            self.notices.raise_error(err.notice_message(), now);
            return Err(err.into());
        }
        self.ensure_phase(Phase::Review)?;
        let ticket = self.issue_ticket();
        self.save = Some(ticket);
        Ok(PendingSave {
            ticket,
            items: self.review.items().to_vec(),
            release_date: self.release_date.clone(),
            status: self.status,
        })
    }

    pub fn complete_save(
        &mut self,
        ticket: RequestTicket,
        result: Result<SaveReceipt, SaveError>,
        now: Instant,
    ) -> CompletionOutcome {
        if self.save != Some(ticket) {
            return CompletionOutcome::Stale;
        }
        self.save = None;
        if self.exit.is_some() {
            return CompletionOutcome::Stale;
        }
        match result {
            Ok(receipt) => {
                self.review.clear();
                self.exit = Some(receipt.target);
                CompletionOutcome::Applied
            }
            Err(err) => self.fail(err.notice_message(), now),
        }
    }

    fn fail(&mut self, message: String, now: Instant) -> CompletionOutcome {
        self.notices.raise_error(message.clone(), now);
        CompletionOutcome::Failed(message)
    }

    fn transition(&mut self, trigger: PhaseTrigger) -> Result<Phase, PhaseError> {
        let next = next_phase(self.phase, trigger)?;
        self.phase = next;
        Ok(next)
    }

    fn issue_ticket(&mut self) -> RequestTicket {
        self.next_sequence += 1;
        RequestTicket {
            sequence: self.next_sequence,
            revision: self.config_revision,
        }
    }

    fn touch_config(&mut self) {
        self.config_revision += 1;
    }

    fn ensure_active(&self) -> Result<(), WorkflowError> {
        match &self.exit {
            Some(target) => Err(WorkflowError::Finished {
                target: target.clone(),
            }),
            None => Ok(()),
        }
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), WorkflowError> {
        if self.phase != expected {
            return Err(WorkflowError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn ensure_row_editing(&self) -> Result<(), WorkflowError> {
        self.ensure_active()?;
        self.ensure_phase(Phase::Config)
    }
}
