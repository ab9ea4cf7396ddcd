//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! the active view, preferences, text inputs and transient messages.

use std::time::Instant;

use crate::logic::auth::View;

/// Vim command state for tracking double-key commands like 'gg'
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum VimCommandState {
    #[default]
    None,
    WaitingForSecondG,
}

/// UI preferences and popups
#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // NAVIGATION
    // ============================================
    /// Screen the user asked for (the guard may draw Login instead)
    pub view: View,

    // ============================================
    // PREFERENCES
    // ============================================
    pub vim_mode: bool,

    pub vim_command_state: VimCommandState,

    // ============================================
    // INPUTS & POPUPS
    // ============================================
    /// Upload dialog input (comma-separated local paths) while open
    pub upload_input: Option<String>,

    /// Identity token typed on the Login view
    pub token_input: String,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    // ============================================
    // VISUAL STATE
    // ============================================
    /// Vertical scroll of the text preview
    pub preview_scroll: u16,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            view: View::Browser,
            vim_mode,
            vim_command_state: VimCommandState::None,
            upload_input: None,
            token_input: String::new(),
            toast_message: None,
            preview_scroll: 0,
            should_quit: false,
        }
    }

    pub fn has_modal(&self) -> bool {
        self.upload_input.is_some()
    }

    pub fn close_all_modals(&mut self) {
        self.upload_input = None;
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some((message.into(), Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}
