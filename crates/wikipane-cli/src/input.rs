use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const KEY_HINTS: &str =
    "^E edit | ^W view | ^D compare | ^P preview | ^L current | ^G ver | ^T cmp | Tab focus | ^Q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    ToggleEdit,
    ToggleView,
    ToggleCompare,
    CycleFocus,
    SelectPreview,
    SelectCurrent,
    PromptViewVersion,
    PromptCompareVersion,
}

pub fn map_global_key(key: KeyEvent) -> Option<AppAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(AppAction::Quit),
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => Some(AppAction::ToggleEdit),
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => Some(AppAction::ToggleView),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Some(AppAction::ToggleCompare),
        (KeyCode::Tab, KeyModifiers::NONE) => Some(AppAction::CycleFocus),
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Some(AppAction::SelectPreview),
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => Some(AppAction::SelectCurrent),
        (KeyCode::Char('g'), KeyModifiers::CONTROL) => Some(AppAction::PromptViewVersion),
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => Some(AppAction::PromptCompareVersion),
        _ => None,
    }
}
