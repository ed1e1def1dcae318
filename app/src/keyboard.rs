//! FILENAME: app/src/keyboard.rs
//! PURPOSE: Keyboard shortcut mapping for the grid.
//! CONTEXT: Edge-triggered on specific key combinations. Nothing fires while
//! focus is inside a text input - that precondition applies to every
//! shortcut here, or typing in the search box would trigger grid actions.

/// The keys the grid cares about. `Char` carries the pressed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Delete,
    Backspace,
}

/// One key press as reported by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub in_text_input: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        KeyInput { key, ctrl: false, meta: false, in_text_input: false }
    }

    pub fn with_ctrl(key: Key) -> Self {
        KeyInput { key, ctrl: true, meta: false, in_text_input: false }
    }
}

/// What a shortcut asks the grid to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    /// Select every row on the current page.
    SelectPage,
    ClearSelection,
    ClearSearch,
    /// Open the bulk-delete confirmation for the current selection.
    RequestBulkDelete,
}

/// Maps a key press to a grid action.
///
/// - Ctrl/Cmd+A selects the current page
/// - Escape clears the selection, or failing that the search text
/// - Delete (or Ctrl+Backspace) with a selection requests bulk delete
pub fn grid_action(input: &KeyInput, has_selection: bool, has_search: bool) -> Option<GridAction> {
    if input.in_text_input {
        return None;
    }
    let modifier = input.ctrl || input.meta;
    match input.key {
        Key::Char(c) if modifier && c.eq_ignore_ascii_case(&'a') => Some(GridAction::SelectPage),
        Key::Escape if has_selection => Some(GridAction::ClearSelection),
        Key::Escape if has_search => Some(GridAction::ClearSearch),
        Key::Delete if has_selection => Some(GridAction::RequestBulkDelete),
        Key::Backspace if input.ctrl && has_selection => Some(GridAction::RequestBulkDelete),
        _ => None,
    }
}
