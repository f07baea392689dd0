//! Maps terminal key presses onto controller events.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::controller::{UiEvent, ViewState};
use crate::ui::screen::{Focus, ScreenState};

const SCROLL_STEP: u16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopAction {
    Quit,
    Dispatch(UiEvent),
}

/// Apply a key press. Screen-only changes (focus, drafts, scrolling) are made
/// in place and yield `None`; anything the controller must see is returned.
pub fn handle_key(
    screen: &mut ScreenState,
    view: &ViewState,
    key: KeyEvent,
) -> Option<LoopAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')) {
        return Some(LoopAction::Quit);
    }
    if matches!(key.code, KeyCode::Char(_))
        && key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => return toggle_focus(screen, view),
        KeyCode::PageUp => {
            screen.scroll_back = screen
                .scroll_back
                .saturating_add(SCROLL_STEP)
                .min(screen.max_scroll);
            return None;
        }
        KeyCode::PageDown => {
            screen.scroll_back = screen.scroll_back.saturating_sub(SCROLL_STEP);
            return None;
        }
        _ => {}
    }

    match screen.focus {
        Focus::SessionId => handle_session_key(screen, view, key),
        Focus::Message if view.awaiting_continue_decision() => handle_decision_key(screen, key),
        Focus::Message => handle_composer_key(screen, view, key),
    }
}

fn toggle_focus(screen: &mut ScreenState, view: &ViewState) -> Option<LoopAction> {
    match screen.focus {
        Focus::SessionId => {
            screen.focus = Focus::Message;
            commit_session(screen, view)
        }
        Focus::Message => {
            screen.focus = Focus::SessionId;
            screen.session_draft = view.session_id.to_string();
            None
        }
    }
}

fn commit_session(screen: &mut ScreenState, view: &ViewState) -> Option<LoopAction> {
    if screen.session_draft == view.session_id.as_str() {
        return None;
    }
    screen.scroll_back = 0;
    Some(LoopAction::Dispatch(UiEvent::EditSessionId(
        screen.session_draft.clone(),
    )))
}

fn handle_session_key(
    screen: &mut ScreenState,
    view: &ViewState,
    key: KeyEvent,
) -> Option<LoopAction> {
    match key.code {
        KeyCode::Enter => {
            screen.focus = Focus::Message;
            commit_session(screen, view)
        }
        KeyCode::Esc => {
            screen.session_draft = view.session_id.to_string();
            screen.focus = Focus::Message;
            None
        }
        KeyCode::Backspace => {
            screen.session_draft.pop();
            None
        }
        KeyCode::Char(c) => {
            screen.session_draft.push(c);
            None
        }
        _ => None,
    }
}

fn handle_composer_key(
    screen: &mut ScreenState,
    view: &ViewState,
    key: KeyEvent,
) -> Option<LoopAction> {
    match key.code {
        KeyCode::Enter => {
            screen.scroll_back = 0;
            Some(LoopAction::Dispatch(UiEvent::Send))
        }
        KeyCode::Backspace => {
            let mut input = view.input.clone();
            input.pop()?;
            Some(LoopAction::Dispatch(UiEvent::EditInput(input)))
        }
        KeyCode::Char(c) => {
            let mut input = view.input.clone();
            input.push(c);
            Some(LoopAction::Dispatch(UiEvent::EditInput(input)))
        }
        _ => None,
    }
}

fn handle_decision_key(screen: &mut ScreenState, key: KeyEvent) -> Option<LoopAction> {
    match key.code {
        KeyCode::Left | KeyCode::Right => {
            screen.selected_button = screen.selected_button.toggle();
            None
        }
        KeyCode::Enter => {
            let event = screen.selected_button.event();
            screen.selected_button = Default::default();
            Some(LoopAction::Dispatch(event))
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            Some(LoopAction::Dispatch(UiEvent::ContinueChat))
        }
        KeyCode::Char('x') | KeyCode::Char('X') => {
            Some(LoopAction::Dispatch(UiEvent::ClearHistory))
        }
        _ => None,
    }
}
