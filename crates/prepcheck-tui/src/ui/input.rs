//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use prepcheck_core::Navigation;

use crate::app::{App, AppState, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.close_overlay();
            }
            Ok(false)
        }
        AppState::ConfirmingQuit => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                Ok(true)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.close_overlay();
                Ok(false)
            }
            _ => Ok(false),
        },
        AppState::Assessing => {
            handle_assessing_input(app, key);
            Ok(false)
        }
        AppState::ShowingResult => {
            handle_result_input(app, key);
            Ok(false)
        }
        AppState::Editing => {
            handle_form_input(app, key);
            Ok(false)
        }
        AppState::Quitting => Ok(true),
    }
}

fn handle_assessing_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.open_overlay(AppState::ConfirmingQuit),
        KeyCode::Char('?') => app.open_overlay(AppState::ShowingHelp),
        _ => {
            app.status_message = Some("Assessment in progress, please wait...".to_string());
        }
    }
}

fn handle_result_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.open_overlay(AppState::ConfirmingQuit),
        KeyCode::Char('?') => app.open_overlay(AppState::ShowingHelp),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_result(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_result(1),
        KeyCode::PageUp => app.scroll_result(-(PAGE_SCROLL_SIZE as i32)),
        KeyCode::PageDown => app.scroll_result(PAGE_SCROLL_SIZE as i32),
        KeyCode::Home => app.result_scroll = 0,
        KeyCode::Char('e') | KeyCode::Esc | KeyCode::BackTab => app.back_to_wizard(),
        KeyCode::Char('r') => app.start_over(),
        _ => {}
    }
}

/// Next on steps 1-3, Submit on step 4.
fn advance(app: &mut App) {
    if app.step().is_last() {
        app.submit();
    } else {
        app.navigate(Navigation::Next);
    }
}

fn retreat(app: &mut App) {
    // Previous is only offered from step 2 onward
    if !app.step().is_first() {
        app.navigate(Navigation::Previous);
    }
}

fn handle_form_input(app: &mut App, key: KeyEvent) {
    // Keys shared by every widget
    match key.code {
        KeyCode::Up => return app.form.focus_prev(),
        KeyCode::Down => return app.form.focus_next(),
        KeyCode::Tab | KeyCode::Enter => return advance(app),
        KeyCode::BackTab => return retreat(app),
        KeyCode::Backspace => {
            return app.edit(|w| {
                w.pop_char();
                true
            })
        }
        _ => {}
    }

    // Text fields swallow every printable character
    if app.form.focused().widget.captures_text() {
        match key.code {
            KeyCode::Char(c) => app.edit(|w| w.push_char(c)),
            KeyCode::Esc => retreat(app),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.open_overlay(AppState::ConfirmingQuit),
        KeyCode::Char('?') => app.open_overlay(AppState::ShowingHelp),
        KeyCode::Char('n') => {
            if !app.step().is_last() {
                app.navigate(Navigation::Next);
            }
        }
        KeyCode::Char('p') | KeyCode::Esc => retreat(app),
        KeyCode::Char('s') => {
            if app.step().is_last() {
                app.submit();
            }
        }
        KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => app.edit(|w| {
            w.decrement();
            true
        }),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('l') => app.edit(|w| {
            w.increment();
            true
        }),
        KeyCode::Char(' ') | KeyCode::Char('x') => app.edit(|w| {
            w.toggle();
            true
        }),
        KeyCode::Char(c) if c.is_ascii_digit() => app.edit(|w| w.push_char(c)),
        _ => {}
    }
}
