//! Keyboard Input Handler
//!
//! Modal input (login token, dialogs, settings form) is handled first; the
//! remaining keys are global or specific to the active view.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use cloudtui::logic::auth::{GuardDecision, View};
use cloudtui::model::{SettingsMode, VimCommandState};

use crate::App;

const PREVIEW_PAGE: i32 = 10;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.model.ui.should_quit = true;
        return Ok(());
    }

    // Nothing is interactive until the session check resolves
    if app.model.guard_decision() == GuardDecision::Loading {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.model.ui.should_quit = true;
        }
        return Ok(());
    }

    if app.model.effective_view() == View::Login {
        handle_login_key(app, key);
        return Ok(());
    }

    if app.model.share.open {
        handle_share_key(app, key);
        return Ok(());
    }

    if app.model.ui.upload_input.is_some() {
        handle_upload_key(app, key);
        return Ok(());
    }

    if app.model.ui.view == View::Settings && app.model.settings.mode == SettingsMode::Edit {
        handle_settings_edit_key(app, key);
        return Ok(());
    }

    let vim = app.model.ui.vim_mode;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // gg needs two presses; any other key cancels the first one
    let pending_g = app.model.ui.vim_command_state == VimCommandState::WaitingForSecondG;
    app.model.ui.vim_command_state = VimCommandState::None;

    match key.code {
        KeyCode::Char('q') => app.model.ui.should_quit = true,
        KeyCode::Tab => app.next_view(),
        KeyCode::Char('1') => app.switch_view(View::Browser),
        KeyCode::Char('2') => app.switch_view(View::Library),
        KeyCode::Char('3') => app.switch_view(View::Settings),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('r') => app.refresh_current_view(),

        // Preview scrolling
        KeyCode::Char('d') if vim && ctrl => app.scroll_preview(PREVIEW_PAGE),
        KeyCode::Char('u') if vim && ctrl => app.scroll_preview(-PREVIEW_PAGE),
        KeyCode::PageDown => app.scroll_preview(PREVIEW_PAGE),
        KeyCode::PageUp => app.scroll_preview(-PREVIEW_PAGE),

        _ => match app.model.ui.view {
            View::Browser => handle_browser_key(app, key, vim, pending_g),
            View::Library => handle_library_key(app, key, vim),
            View::Settings => {
                if key.code == KeyCode::Char('e') {
                    app.begin_settings_edit();
                }
            }
            View::Login => {}
        },
    }

    Ok(())
}

fn handle_browser_key(app: &mut App, key: KeyEvent, vim: bool, pending_g: bool) {
    match key.code {
        KeyCode::Down => app.model.browser.select_next(),
        KeyCode::Up => app.model.browser.select_prev(),
        KeyCode::Char('j') if vim => app.model.browser.select_next(),
        KeyCode::Char('k') if vim => app.model.browser.select_prev(),
        KeyCode::Home => app.model.browser.select_first(),
        KeyCode::End => app.model.browser.select_last(),
        KeyCode::Char('g') if vim => {
            if pending_g {
                app.model.browser.select_first();
            } else {
                app.model.ui.vim_command_state = VimCommandState::WaitingForSecondG;
            }
        }
        KeyCode::Char('G') if vim => app.model.browser.select_last(),
        KeyCode::Enter | KeyCode::Right => app.open_selected(),
        KeyCode::Char('l') if vim => app.open_selected(),
        KeyCode::Left | KeyCode::Backspace | KeyCode::Esc => app.go_back(),
        KeyCode::Char('h') if vim => app.go_back(),
        KeyCode::Char('u') => app.open_upload_dialog(),
        KeyCode::Char('d') => app.download_selected(),
        KeyCode::Char('o') => app.open_preview_externally(),
        KeyCode::Char('s') => app.save_preview(),
        KeyCode::Char('S') => app.open_share_dialog(),
        _ => {}
    }
}

fn handle_library_key(app: &mut App, key: KeyEvent, vim: bool) {
    match key.code {
        KeyCode::Down => app.model.library.select_next(),
        KeyCode::Up => app.model.library.select_prev(),
        KeyCode::Char('j') if vim => app.model.library.select_next(),
        KeyCode::Char('k') if vim => app.model.library.select_prev(),
        KeyCode::Char('c') => app.next_library_category(),
        KeyCode::Char('d') => app.download_selected(),
        _ => {}
    }
}

fn handle_settings_edit_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.model.settings.cursor_next(),
        KeyCode::Up | KeyCode::Char('k') => app.model.settings.cursor_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => app.model.settings.choose_cursor(),
        KeyCode::Char('s') => app.save_settings(),
        KeyCode::Esc => app.model.settings.cancel_edit(),
        _ => {}
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_login(),
        KeyCode::Esc => {
            if app.model.ui.token_input.is_empty() {
                app.model.ui.should_quit = true;
            } else {
                app.model.ui.token_input.clear();
            }
        }
        KeyCode::Backspace => {
            app.model.ui.token_input.pop();
        }
        KeyCode::Char(c) => {
            app.model.session.clear_error();
            app.model.ui.token_input.push(c);
        }
        _ => {}
    }
}

fn handle_upload_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_upload(),
        KeyCode::Esc => app.model.ui.upload_input = None,
        KeyCode::Backspace => {
            if let Some(input) = app.model.ui.upload_input.as_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.model.ui.upload_input.as_mut() {
                input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_share_key(app: &mut App, key: KeyEvent) {
    if app.model.share.show_success {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.model.share.close();
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.model.share.close(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.model.share.toggle_focus()
        }
        KeyCode::Enter => app.submit_share(),
        KeyCode::Backspace => app.model.share.pop_char(),
        KeyCode::Char(c) => app.model.share.push_char(c),
        _ => {}
    }
}
