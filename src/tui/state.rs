use super::navigation::{clamp_selection, UiAction};
use crate::app::session::WorkflowSession;
use crate::client::BulkQuizApi;
use crate::workflow::{Phase, WorkflowError};
use std::time::Instant;

pub const QUIT_CONFIRM_MESSAGE: &str =
    "Generated quizzes have not been saved. Press quit again to discard them.";
const RELEASE_DATE_INPUT_MAX: usize = 10;

/// Screen-local state that the controller does not own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub selected_row: usize,
    pub selected_item: usize,
    pub date_input: Option<String>,
    pub quit_armed: bool,
}

impl UiState {
    pub fn editing(&self) -> bool {
        self.date_input.is_some()
    }

    pub fn reconcile<A: BulkQuizApi + 'static>(&mut self, session: &WorkflowSession<A>) {
        let controller = session.controller();
        self.selected_row = clamp_selection(self.selected_row, controller.rows().len());
        self.selected_item = clamp_selection(self.selected_item, controller.review().len());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    None,
    StartGeneration,
    StartSave,
    Quit,
}

/// Applies one action. Request-starting actions come back as effects so the
/// caller decides whether they run inline or on a worker thread.
pub fn apply_ui_action<A: BulkQuizApi + 'static>(
    session: &mut WorkflowSession<A>,
    ui: &mut UiState,
    action: UiAction,
    now: Instant,
) -> UiEffect {
    if action == UiAction::Quit {
        return request_quit(session, ui, now);
    }
    ui.quit_armed = false;
    if session.controller().is_busy() {
        return UiEffect::None;
    }

    let effect = match apply_action(session, ui, action) {
        Ok(effect) => effect,
        Err(err) => {
            session.controller_mut().raise_error(err.to_string(), now);
            UiEffect::None
        }
    };
    ui.reconcile(session);
    effect
}

fn request_quit<A: BulkQuizApi + 'static>(
    session: &mut WorkflowSession<A>,
    ui: &mut UiState,
    now: Instant,
) -> UiEffect {
    if session.controller().requires_unload_confirmation() && !ui.quit_armed {
        ui.quit_armed = true;
        session
            .controller_mut()
            .raise_info(QUIT_CONFIRM_MESSAGE, now);
        return UiEffect::None;
    }
    UiEffect::Quit
}

fn apply_action<A: BulkQuizApi + 'static>(
    session: &mut WorkflowSession<A>,
    ui: &mut UiState,
    action: UiAction,
) -> Result<UiEffect, WorkflowError> {
    let phase = session.controller().phase();
    match action {
        UiAction::MovePrev => match phase {
            Phase::Config => ui.selected_row = ui.selected_row.saturating_sub(1),
            Phase::Review => ui.selected_item = ui.selected_item.saturating_sub(1),
        },
        UiAction::MoveNext => match phase {
            Phase::Config => ui.selected_row += 1,
            Phase::Review => ui.selected_item += 1,
        },
        UiAction::AddRow => {
            session.controller_mut().add_row()?;
            ui.selected_row = session.controller().rows().len().saturating_sub(1);
        }
        UiAction::RemoveRow => {
            if let Some(id) = session.controller().rows().id_at(ui.selected_row) {
                session.controller_mut().remove_row(id)?;
            }
        }
        UiAction::PrevCategory | UiAction::NextCategory => {
            if let Some(id) = session.controller().rows().id_at(ui.selected_row) {
                session
                    .controller_mut()
                    .cycle_category(id, action == UiAction::NextCategory)?;
            }
        }
        UiAction::IncreaseCount | UiAction::DecreaseCount => {
            if let Some(id) = session.controller().rows().id_at(ui.selected_row) {
                let delta = if action == UiAction::IncreaseCount { 1 } else { -1 };
                session.controller_mut().adjust_count(id, delta)?;
            }
        }
        UiAction::EditReleaseDate => {
            ui.date_input = Some(session.controller().release_date().to_string());
        }
        UiAction::ToggleStatus => {
            session.controller_mut().toggle_status()?;
        }
        UiAction::Generate => return Ok(UiEffect::StartGeneration),
        UiAction::Save => return Ok(UiEffect::StartSave),
        UiAction::Back => session.back()?,
        UiAction::RemoveItem => {
            if !session.controller().review().is_empty() {
                session.remove_review_item(ui.selected_item)?;
            }
        }
        UiAction::InputChar(c) => {
            if let Some(input) = ui.date_input.as_mut() {
                if (c.is_ascii_digit() || c == '-') && input.len() < RELEASE_DATE_INPUT_MAX {
                    input.push(c);
                }
            }
        }
        UiAction::InputBackspace => {
            if let Some(input) = ui.date_input.as_mut() {
                input.pop();
            }
        }
        UiAction::InputCommit => {
            if let Some(input) = ui.date_input.take() {
                session.controller_mut().set_release_date(&input)?;
            }
        }
        UiAction::InputCancel => ui.date_input = None,
        UiAction::Quit => return Ok(UiEffect::Quit),
    }
    Ok(UiEffect::None)
}

/// Prompt text shown while the release date is being edited.
pub fn release_date_prompt(input: &str) -> String {
    format!("Release date (YYYY-MM-DD): {input}_")
}
