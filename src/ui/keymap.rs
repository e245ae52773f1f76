use std::sync::LazyLock;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::model::Mode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Action {
    Quit,
    CursorUp,
    CursorDown,
    InsertChar(char),
    DeleteChar,
    AddRow,
    DeleteRow,
    OpenEditor,
    CloseEditor,
    FocusDayWheel,
    FocusTimeWheel,
    WheelUp,
    WheelDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct KeyBinding {
    pub(super) action: Action,
    pub(super) key_code: KeyCode,
    pub(super) modifiers: KeyModifiers,
    pub(super) help_token: &'static str,
}

const fn bind(
    action: Action,
    key_code: KeyCode,
    modifiers: KeyModifiers,
    help_token: &'static str,
) -> KeyBinding {
    KeyBinding {
        action,
        key_code,
        modifiers,
        help_token,
    }
}

const LIST_HELP_SUFFIX: &str = "Type to edit the cursored task.";
const EDITOR_HELP_SUFFIX: &str = "Changes apply immediately.";

static LIST_BINDINGS: [KeyBinding; 8] = [
    bind(Action::CursorUp, KeyCode::Up, KeyModifiers::NONE, "↑/↓-nav"),
    bind(Action::CursorDown, KeyCode::Down, KeyModifiers::NONE, "↑/↓-nav"),
    bind(Action::OpenEditor, KeyCode::Enter, KeyModifiers::NONE, "enter-date"),
    bind(Action::DeleteChar, KeyCode::Backspace, KeyModifiers::NONE, "bksp-erase"),
    bind(Action::AddRow, KeyCode::Char('n'), KeyModifiers::CONTROL, "^n-new"),
    bind(Action::DeleteRow, KeyCode::Char('d'), KeyModifiers::CONTROL, "^d-delete"),
    bind(Action::Quit, KeyCode::Char('q'), KeyModifiers::CONTROL, "^q-quit"),
    bind(Action::Quit, KeyCode::Char('c'), KeyModifiers::CONTROL, "^q-quit"),
];

static EDITOR_BINDINGS: [KeyBinding; 8] = [
    bind(Action::FocusDayWheel, KeyCode::Left, KeyModifiers::NONE, "←/→-wheel"),
    bind(Action::FocusTimeWheel, KeyCode::Right, KeyModifiers::NONE, "←/→-wheel"),
    bind(Action::WheelUp, KeyCode::Up, KeyModifiers::NONE, "↑/↓-spin"),
    bind(Action::WheelDown, KeyCode::Down, KeyModifiers::NONE, "↑/↓-spin"),
    bind(Action::CloseEditor, KeyCode::Esc, KeyModifiers::NONE, "esc/enter-close"),
    bind(Action::CloseEditor, KeyCode::Enter, KeyModifiers::NONE, "esc/enter-close"),
    bind(Action::Quit, KeyCode::Char('q'), KeyModifiers::CONTROL, "^q-quit"),
    bind(Action::Quit, KeyCode::Char('c'), KeyModifiers::CONTROL, "^q-quit"),
];

fn bindings(mode: Mode) -> &'static [KeyBinding] {
    match mode {
        Mode::List => &LIST_BINDINGS,
        Mode::Editor => &EDITOR_BINDINGS,
    }
}

fn build_help(mode: Mode, suffix: &str) -> String {
    let mut tokens: Vec<&'static str> = Vec::new();
    for binding in bindings(mode) {
        if !tokens.contains(&binding.help_token) {
            tokens.push(binding.help_token);
        }
    }

    let joined_tokens = tokens.join(", ");
    format!("{joined_tokens}. {suffix}")
}

static LIST_HELP_TEXT: LazyLock<String> =
    LazyLock::new(|| build_help(Mode::List, LIST_HELP_SUFFIX));

static EDITOR_HELP_TEXT: LazyLock<String> =
    LazyLock::new(|| build_help(Mode::Editor, EDITOR_HELP_SUFFIX));

pub(super) fn action_for_key(mode: Mode, key: KeyEvent) -> Option<Action> {
    // SHIFT only changes which character arrives, it never selects a binding.
    let modifiers = key.modifiers.difference(KeyModifiers::SHIFT);

    let bound = bindings(mode)
        .iter()
        .find(|binding| binding.key_code == key.code && binding.modifiers == modifiers)
        .map(|binding| binding.action);

    match (bound, mode, key.code) {
        (Some(action), _, _) => Some(action),
        (None, Mode::List, KeyCode::Char(c)) if modifiers.is_empty() => {
            Some(Action::InsertChar(c))
        }
        _ => None,
    }
}

pub(super) fn help_text(mode: Mode) -> &'static str {
    match mode {
        Mode::List => LIST_HELP_TEXT.as_str(),
        Mode::Editor => EDITOR_HELP_TEXT.as_str(),
    }
}
