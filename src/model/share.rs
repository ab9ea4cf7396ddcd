//! Share Model
//!
//! The admin-only dialog that grants another user access to a folder.

use crate::api::{ShareRequest, StatusResponse};
use crate::logic::resource::{Outcome, Resource, Ticket};
use crate::logic::validation::{validate_share_form, ShareFormErrors};
use crate::services::ApiRequest;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShareField {
    #[default]
    Name,
    Email,
}

#[derive(Clone, Debug, Default)]
pub struct ShareModel {
    pub open: bool,
    pub name: String,
    pub email: String,

    /// Folder being shared; fixed when the dialog opens
    pub path: String,

    pub focus: ShareField,
    pub errors: ShareFormErrors,
    pub show_success: bool,
    pub share: Resource<StatusResponse>,
}

impl ShareModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a blank form for `path`
    pub fn open_for(&mut self, path: &str) {
        self.reset_form();
        self.path = path.to_string();
        self.open = true;
    }

    /// Close the dialog; a late share response is ignored
    pub fn close(&mut self) {
        self.reset_form();
        self.open = false;
    }

    fn reset_form(&mut self) {
        self.name.clear();
        self.email.clear();
        self.focus = ShareField::Name;
        self.errors = ShareFormErrors::default();
        self.show_success = false;
        self.share.reset();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ShareField::Name => ShareField::Email,
            ShareField::Email => ShareField::Name,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            ShareField::Name => &mut self.name,
            ShareField::Email => &mut self.email,
        }
    }

    /// Editing a field clears that field's validation message
    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
        self.clear_focused_error();
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
        self.clear_focused_error();
    }

    fn clear_focused_error(&mut self) {
        match self.focus {
            ShareField::Name => self.errors.name = None,
            ShareField::Email => self.errors.email = None,
        }
    }

    /// Validate and build the request; `None` when the form has errors
    pub fn submit(&mut self) -> Option<ApiRequest> {
        if self.share.is_loading() {
            return None;
        }

        self.errors = validate_share_form(&self.name, &self.email);
        if !self.errors.is_empty() {
            return None;
        }

        Some(ApiRequest::Share {
            ticket: self.share.begin(),
            request: ShareRequest {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                hard_drive_path_selection: self.path.clone(),
            },
        })
    }

    pub fn apply_share(&mut self, ticket: Ticket, result: Result<StatusResponse, String>) -> Outcome {
        let outcome = self.share.complete(ticket, result);
        if outcome == Outcome::Updated {
            self.show_success = true;
        }
        outcome
    }
}
