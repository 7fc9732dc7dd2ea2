use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for, before the active tab interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectTab(usize),
    Up,
    Down,
    Left,
    Right,
    Activate,
    Refresh,
    Today,
    PrevMonth,
    NextMonth,
    Help,
    Close,
}

pub fn next_key_event(timeout: Duration) -> color_eyre::Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        // Windows reports releases too; only presses count.
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(key)),
        _ => Ok(None),
    }
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    let action = match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Tab, _) => Action::NextTab,
        (KeyCode::BackTab, _) => Action::PrevTab,
        (KeyCode::Char(c @ '1'..='5'), _) => Action::SelectTab(c as usize - '1' as usize),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Action::Up,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::Down,
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Action::Left,
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Action::Right,
        (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => Action::Activate,
        (KeyCode::Char('r'), _) => Action::Refresh,
        (KeyCode::Char('t'), _) => Action::Today,
        (KeyCode::Char('['), _) => Action::PrevMonth,
        (KeyCode::Char(']'), _) => Action::NextMonth,
        (KeyCode::Char('?'), _) => Action::Help,
        (KeyCode::Esc, _) => Action::Close,
        _ => return None,
    };
    Some(action)
}
