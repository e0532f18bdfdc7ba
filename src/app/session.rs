use crate::client::{
    BulkQuizApi, GenerationClient, GenerationError, SaveClient, SaveError, SaveReceipt,
};
use crate::shared::logging::WorkflowLog;
use crate::workflow::{
    CompletionOutcome, GeneratedItem, PendingGeneration, PendingSave, Phase, RequestTicket,
    ReviewSet, WorkflowController, WorkflowError,
};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Result of a request that ran off the UI thread.
#[derive(Debug)]
pub enum RequestCompletion {
    Generation(RequestTicket, Result<ReviewSet, GenerationError>),
    Save(RequestTicket, Result<SaveReceipt, SaveError>),
}

/// Couples a controller with the transport and the workflow log.
pub struct WorkflowSession<A: BulkQuizApi + 'static> {
    controller: WorkflowController,
    api: Arc<A>,
    fallback_redirect: String,
    log: WorkflowLog,
    last_receipt: Option<SaveReceipt>,
}

impl<A: BulkQuizApi + 'static> WorkflowSession<A> {
    pub fn new(
        controller: WorkflowController,
        api: Arc<A>,
        fallback_redirect: &str,
        log: WorkflowLog,
    ) -> Self {
        Self {
            controller,
            api,
            fallback_redirect: fallback_redirect.to_string(),
            log,
            last_receipt: None,
        }
    }

    pub fn controller(&self) -> &WorkflowController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut WorkflowController {
        &mut self.controller
    }

    pub fn log(&self) -> &WorkflowLog {
        &self.log
    }

    pub fn last_receipt(&self) -> Option<&SaveReceipt> {
        self.last_receipt.as_ref()
    }

    pub fn start_generation(&mut self, now: Instant) -> Result<PendingGeneration, WorkflowError> {
        match self.controller.begin_generation(now) {
            Ok(pending) => {
                let summary = self.controller.rows().summary();
                self.log.info(
                    "generate_requested",
                    &format!(
                        "ticket={} rows={} total={}",
                        pending.ticket.sequence(),
                        pending.rows.len(),
                        summary.total_count
                    ),
                );
                Ok(pending)
            }
            Err(err) => {
                match &err {
                    WorkflowError::Validation(_) => {
                        self.log.warn("validation_failed", &err.to_string());
                    }
                    _ => {
                        self.controller.raise_error(err.to_string(), now);
                        self.log.warn("generate_rejected", &err.to_string());
                    }
                }
                Err(err)
            }
        }
    }

    pub fn finish_generation(
        &mut self,
        ticket: RequestTicket,
        result: Result<ReviewSet, GenerationError>,
        now: Instant,
    ) -> CompletionOutcome {
        let before = self.controller.phase();
        let detail = match &result {
            Ok(review) => format!("items={}", review.len()),
            Err(err) => err.to_string(),
        };
        let outcome = self.controller.complete_generation(ticket, result, now);
        match &outcome {
            CompletionOutcome::Applied => self.log.info(
                "generate_succeeded",
                &format!("ticket={} {detail}", ticket.sequence()),
            ),
            CompletionOutcome::Failed(_) => self.log.warn(
                "generate_failed",
                &format!("ticket={} {detail}", ticket.sequence()),
            ),
            CompletionOutcome::Discarded | CompletionOutcome::Stale => self.log.warn(
                "generate_discarded",
                &format!("ticket={} {detail}", ticket.sequence()),
            ),
        }
        self.log_phase_change(before);
        outcome
    }

    /// Runs a generation on the calling thread.
    pub fn generate_now(&mut self, now: Instant) -> Result<CompletionOutcome, WorkflowError> {
        let pending = self.start_generation(now)?;
        let result = GenerationClient::new(self.api.as_ref()).generate(&pending.rows, &pending.catalog);
        Ok(self.finish_generation(pending.ticket, result, now))
    }

    pub fn spawn_generation(
        &self,
        pending: PendingGeneration,
        completions: Sender<RequestCompletion>,
    ) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        thread::spawn(move || {
            let result = GenerationClient::new(api.as_ref()).generate(&pending.rows, &pending.catalog);
            let _ = completions.send(RequestCompletion::Generation(pending.ticket, result));
        })
    }

    pub fn start_save(&mut self, now: Instant) -> Result<PendingSave, WorkflowError> {
        match self.controller.begin_save(now) {
            Ok(pending) => {
                self.log.info(
                    "save_requested",
                    &format!(
                        "ticket={} quizzes={} release_date={} status={}",
                        pending.ticket.sequence(),
                        pending.items.len(),
                        pending.release_date,
                        pending.status
                    ),
                );
                Ok(pending)
            }
            Err(err) => {
                if !matches!(err, WorkflowError::Save(SaveError::NothingToSave)) {
                    self.controller.raise_error(err.to_string(), now);
                }
                self.log.warn("save_rejected", &err.to_string());
                Err(err)
            }
        }
    }

    pub fn finish_save(
        &mut self,
        ticket: RequestTicket,
        result: Result<SaveReceipt, SaveError>,
        now: Instant,
    ) -> CompletionOutcome {
        let detail = match &result {
            Ok(receipt) => format!(
                "redirect={} created_count={}",
                receipt.target,
                receipt
                    .created_count
                    .map(|count| count.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            ),
            Err(err) => err.to_string(),
        };
        let receipt = result.as_ref().ok().cloned();
        let outcome = self.controller.complete_save(ticket, result, now);
        match &outcome {
            CompletionOutcome::Applied => {
                self.last_receipt = receipt;
                self.log.info(
                    "save_succeeded",
                    &format!("ticket={} {detail}", ticket.sequence()),
                );
            }
            CompletionOutcome::Failed(_) => self.log.warn(
                "save_failed",
                &format!("ticket={} {detail}", ticket.sequence()),
            ),
            CompletionOutcome::Discarded | CompletionOutcome::Stale => self.log.warn(
                "save_discarded",
                &format!("ticket={} {detail}", ticket.sequence()),
            ),
        }
        outcome
    }

    pub fn save_now(&mut self, now: Instant) -> Result<CompletionOutcome, WorkflowError> {
        let pending = self.start_save(now)?;
        let result = SaveClient::new(self.api.as_ref(), &self.fallback_redirect).save(
            &pending.items,
            &pending.release_date,
            pending.status,
        );
        Ok(self.finish_save(pending.ticket, result, now))
    }

    pub fn spawn_save(
        &self,
        pending: PendingSave,
        completions: Sender<RequestCompletion>,
    ) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let fallback_redirect = self.fallback_redirect.clone();
        thread::spawn(move || {
            let result = SaveClient::new(api.as_ref(), &fallback_redirect).save(
                &pending.items,
                &pending.release_date,
                pending.status,
            );
            let _ = completions.send(RequestCompletion::Save(pending.ticket, result));
        })
    }

    pub fn apply_completion(
        &mut self,
        completion: RequestCompletion,
        now: Instant,
    ) -> CompletionOutcome {
        match completion {
            RequestCompletion::Generation(ticket, result) => {
                self.finish_generation(ticket, result, now)
            }
            RequestCompletion::Save(ticket, result) => self.finish_save(ticket, result, now),
        }
    }

    pub fn back(&mut self) -> Result<(), WorkflowError> {
        let before = self.controller.phase();
        self.controller.back()?;
        self.log_phase_change(before);
        Ok(())
    }

    pub fn remove_review_item(&mut self, index: usize) -> Result<GeneratedItem, WorkflowError> {
        let before = self.controller.phase();
        let removed = self.controller.remove_review_item(index)?;
        self.log.info(
            "review_item_removed",
            &format!("index={index} title={}", removed.title),
        );
        self.log_phase_change(before);
        Ok(removed)
    }

    fn log_phase_change(&self, before: Phase) {
        let after = self.controller.phase();
        if before != after {
            self.log
                .info("phase_changed", &format!("{before} -> {after}"));
        }
    }
}
