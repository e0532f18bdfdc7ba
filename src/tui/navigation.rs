use crate::workflow::Phase;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPT_KEYS_ENV: &str = "BULKQUIZ_SCRIPT_KEYS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    MovePrev,
    MoveNext,
    AddRow,
    RemoveRow,
    PrevCategory,
    NextCategory,
    IncreaseCount,
    DecreaseCount,
    EditReleaseDate,
    ToggleStatus,
    Generate,
    Back,
    RemoveItem,
    Save,
    Quit,
    InputChar(char),
    InputBackspace,
    InputCommit,
    InputCancel,
}

impl UiAction {
    pub fn as_str(self) -> &'static str {
        match self {
            UiAction::MovePrev => "move_prev",
            UiAction::MoveNext => "move_next",
            UiAction::AddRow => "add_row",
            UiAction::RemoveRow => "remove_row",
            UiAction::PrevCategory => "prev_category",
            UiAction::NextCategory => "next_category",
            UiAction::IncreaseCount => "increase_count",
            UiAction::DecreaseCount => "decrease_count",
            UiAction::EditReleaseDate => "edit_release_date",
            UiAction::ToggleStatus => "toggle_status",
            UiAction::Generate => "generate",
            UiAction::Back => "back",
            UiAction::RemoveItem => "remove_item",
            UiAction::Save => "save",
            UiAction::Quit => "quit",
            UiAction::InputChar(_) => "input_char",
            UiAction::InputBackspace => "input_backspace",
            UiAction::InputCommit => "input_commit",
            UiAction::InputCancel => "input_cancel",
        }
    }
}

pub fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.min(len - 1)
}

/// Maps a key press to an action for the active phase. `editing` is true
/// while the release date prompt owns the keyboard.
pub fn action_from_key(phase: Phase, editing: bool, key: KeyEvent) -> Option<UiAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UiAction::Quit);
    }
    if editing {
        return match key.code {
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => {
                Some(UiAction::InputCommit)
            }
            KeyCode::Esc => Some(UiAction::InputCancel),
            KeyCode::Backspace => Some(UiAction::InputBackspace),
            KeyCode::Char(c) => Some(UiAction::InputChar(c)),
            _ => None,
        };
    }
    match phase {
        Phase::Config => match key.code {
            KeyCode::Up => Some(UiAction::MovePrev),
            KeyCode::Down => Some(UiAction::MoveNext),
            KeyCode::Left => Some(UiAction::PrevCategory),
            KeyCode::Right => Some(UiAction::NextCategory),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(UiAction::IncreaseCount),
            KeyCode::Char('-') => Some(UiAction::DecreaseCount),
            KeyCode::Char('a') => Some(UiAction::AddRow),
            KeyCode::Char('d') => Some(UiAction::RemoveRow),
            KeyCode::Char('r') => Some(UiAction::EditReleaseDate),
            KeyCode::Char('t') => Some(UiAction::ToggleStatus),
            KeyCode::Enter | KeyCode::Char('g') => Some(UiAction::Generate),
            KeyCode::Esc | KeyCode::Char('q') => Some(UiAction::Quit),
            _ => None,
        },
        Phase::Review => match key.code {
            KeyCode::Up => Some(UiAction::MovePrev),
            KeyCode::Down => Some(UiAction::MoveNext),
            KeyCode::Char('d') => Some(UiAction::RemoveItem),
            KeyCode::Char('r') => Some(UiAction::EditReleaseDate),
            KeyCode::Char('t') => Some(UiAction::ToggleStatus),
            KeyCode::Char('g') => Some(UiAction::Generate),
            KeyCode::Enter | KeyCode::Char('s') => Some(UiAction::Save),
            KeyCode::Esc | KeyCode::Char('b') => Some(UiAction::Back),
            KeyCode::Char('q') => Some(UiAction::Quit),
            _ => None,
        },
    }
}

/// Parses a comma separated key script. Named keys plus any single character.
pub fn parse_scripted_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }
        let normalized = trimmed.to_ascii_lowercase();
        let key = match normalized.as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "left" => KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            "right" => KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "backspace" => KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            _ => {
                let mut chars = trimmed.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
                    _ => {
                        return Err(format!(
                            "invalid {SCRIPT_KEYS_ENV} token `{trimmed}`; valid tokens: up,down,left,right,enter,esc,backspace,ctrl-c or a single character"
                        ));
                    }
                }
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

pub fn load_scripted_keys() -> Result<Option<Vec<KeyEvent>>, String> {
    let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV) else {
        return Ok(None);
    };
    parse_scripted_keys(&raw).map(Some)
}
