use super::navigation::{action_from_key, load_scripted_keys, SCRIPT_KEYS_ENV};
use super::screens::draw_workflow_screen;
use super::state::{apply_ui_action, UiEffect, UiState};
use crate::app::command_support::{
    build_session, parse_flags, workflow_summary_lines, CATEGORIES_FLAG, CONFIG_FLAG,
    RELEASE_DATE_FLAG, STATUS_FLAG,
};
use crate::app::session::{RequestCompletion, WorkflowSession};
use crate::client::BulkQuizApi;
use crate::workflow::project_workflow_view;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, IsTerminal};
use std::sync::mpsc;
use std::time::{Duration, Instant};

pub(crate) fn cmd_run(args: &[String]) -> Result<String, String> {
    let flags = parse_flags(
        args,
        &[CONFIG_FLAG, CATEGORIES_FLAG, RELEASE_DATE_FLAG, STATUS_FLAG],
        &[],
    )?;
    if let Some(extra) = flags.positionals().first() {
        return Err(format!("unexpected argument `{extra}`"));
    }
    let mut session = build_session(&flags)?;
    if let Some(scripted_keys) = load_scripted_keys()? {
        run_workflow_scripted(&mut session, scripted_keys);
    } else if is_interactive_run() {
        run_workflow_tui(&mut session)?;
    } else {
        return Err(format!(
            "run needs an interactive terminal; set {SCRIPT_KEYS_ENV} or use `batch`"
        ));
    }

    let mut lines = vec![if session.controller().exit_target().is_some() {
        "workflow saved".to_string()
    } else {
        "workflow closed".to_string()
    }];
    lines.extend(workflow_summary_lines(session.controller()));
    Ok(lines.join("\n"))
}

fn is_interactive_run() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Replays keys with requests running inline, so every request completes
/// before the next key is read.
pub fn run_workflow_scripted<A: BulkQuizApi + 'static>(
    session: &mut WorkflowSession<A>,
    scripted_keys: Vec<KeyEvent>,
) -> UiState {
    let mut ui = UiState::default();
    for key in scripted_keys {
        if session.controller().exit_target().is_some() {
            break;
        }
        let phase = session.controller().phase();
        let Some(action) = action_from_key(phase, ui.editing(), key) else {
            continue;
        };
        let now = Instant::now();
        match apply_ui_action(session, &mut ui, action, now) {
            UiEffect::None => {}
            UiEffect::StartGeneration => {
                let _ = session.generate_now(now);
            }
            UiEffect::StartSave => {
                let _ = session.save_now(now);
            }
            UiEffect::Quit => break,
        }
        ui.reconcile(session);
    }
    ui
}

fn run_workflow_tui<A: BulkQuizApi + 'static>(
    session: &mut WorkflowSession<A>,
) -> Result<(), String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter workflow screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create workflow terminal: {e}"))?;
    let result = run_workflow_tui_loop(session, &mut terminal);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave workflow screen: {e}"))?;
    result
}

fn run_workflow_tui_loop<A: BulkQuizApi + 'static>(
    session: &mut WorkflowSession<A>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), String> {
    let (completions_tx, completions_rx) = mpsc::channel::<RequestCompletion>();
    let mut ui = UiState::default();
    loop {
        while let Ok(completion) = completions_rx.try_recv() {
            session.apply_completion(completion, Instant::now());
            ui.reconcile(session);
        }
        if session.controller().exit_target().is_some() {
            return Ok(());
        }

        let view = project_workflow_view(session.controller(), Instant::now());
        draw_workflow_screen(terminal, &view, &ui)?;
        if !event::poll(Duration::from_millis(100))
            .map_err(|e| format!("failed to poll workflow input: {e}"))?
        {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read workflow input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        let Some(action) = action_from_key(view.phase, ui.editing(), key) else {
            continue;
        };
        let now = Instant::now();
        match apply_ui_action(session, &mut ui, action, now) {
            UiEffect::None => {}
            UiEffect::StartGeneration => {
                if let Ok(pending) = session.start_generation(now) {
                    session.spawn_generation(pending, completions_tx.clone());
                }
            }
            UiEffect::StartSave => {
                if let Ok(pending) = session.start_save(now) {
                    session.spawn_save(pending, completions_tx.clone());
                }
            }
            UiEffect::Quit => return Ok(()),
        }
    }
}
