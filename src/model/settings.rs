//! Settings Model
//!
//! The stored storage-path selection, the mounted drives it can be chosen
//! from, and the view/edit form around them.

use crate::api::{DriveInfo, StatusResponse, UserSettings, UserSettingsRecord};
use crate::logic::formatting::format_drive_option;
use crate::logic::navigation::{next_selection, prev_selection};
use crate::logic::resource::{Outcome, Resource, Ticket};
use crate::services::ApiRequest;

pub const NO_DRIVE_LABEL: &str = "Select a drive...";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettingsMode {
    #[default]
    View,
    Edit,
}

/// One entry of the drive selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriveOption {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, Default)]
pub struct SettingsModel {
    pub settings: Resource<Option<UserSettingsRecord>>,
    pub drives: Resource<Vec<DriveInfo>>,
    pub save: Resource<StatusResponse>,
    pub mode: SettingsMode,

    /// Value the form will save (may be empty)
    pub selection: String,

    /// Highlighted row in the drive selector
    pub cursor: usize,
}

impl SettingsModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> Option<&UserSettingsRecord> {
        self.settings.data().and_then(Option::as_ref)
    }

    /// Stored storage root, used as the base of the browser's display path
    pub fn stored_path(&self) -> Option<&str> {
        self.record()
            .map(|r| r.hard_drive_path_selection.as_str())
            .filter(|p| !p.is_empty())
    }

    pub fn is_loading(&self) -> bool {
        self.settings.is_loading() || self.drives.is_loading()
    }

    /// First error among settings and drives, for the retry banner
    pub fn load_error(&self) -> Option<&str> {
        self.settings.error().or_else(|| self.drives.error())
    }

    pub fn request_settings(&mut self) -> ApiRequest {
        ApiRequest::GetSettings {
            ticket: self.settings.begin(),
        }
    }

    pub fn request_drives(&mut self) -> ApiRequest {
        ApiRequest::ListDrives {
            ticket: self.drives.begin(),
        }
    }

    pub fn apply_settings(
        &mut self,
        ticket: Ticket,
        result: Result<Option<UserSettingsRecord>, String>,
    ) -> Outcome {
        let outcome = self.settings.complete(ticket, result);
        if outcome == Outcome::Updated && self.mode == SettingsMode::View {
            self.selection = self.stored_path().unwrap_or_default().to_string();
        }
        outcome
    }

    pub fn apply_drives(&mut self, ticket: Ticket, result: Result<Vec<DriveInfo>, String>) -> Outcome {
        let outcome = self.drives.complete(ticket, result);
        self.cursor = self.cursor.min(self.options().len().saturating_sub(1));
        outcome
    }

    /// Selector entries: the empty choice first, then every mounted drive
    pub fn options(&self) -> Vec<DriveOption> {
        let mut options = vec![DriveOption {
            value: String::new(),
            label: NO_DRIVE_LABEL.to_string(),
        }];

        if let Some(drives) = self.drives.data() {
            options.extend(drives.iter().map(|d| DriveOption {
                value: d.mountpoint.clone(),
                label: format_drive_option(&d.device, &d.mountpoint, &d.free),
            }));
        }
        options
    }

    pub fn begin_edit(&mut self) {
        self.mode = SettingsMode::Edit;
        self.selection = self.stored_path().unwrap_or_default().to_string();
        self.cursor = self
            .options()
            .iter()
            .position(|o| o.value == self.selection)
            .unwrap_or(0);
        self.save.clear_error();
    }

    /// Leave edit mode and restore the stored value
    pub fn cancel_edit(&mut self) {
        self.mode = SettingsMode::View;
        self.selection = self.stored_path().unwrap_or_default().to_string();
        self.save.clear_error();
    }

    pub fn cursor_next(&mut self) {
        self.cursor = next_selection(Some(self.cursor), self.options().len()).unwrap_or(0);
    }

    pub fn cursor_prev(&mut self) {
        self.cursor = prev_selection(Some(self.cursor), self.options().len()).unwrap_or(0);
    }

    /// Take the highlighted option as the form value
    pub fn choose_cursor(&mut self) {
        if let Some(option) = self.options().get(self.cursor) {
            self.selection = option.value.clone();
        }
    }

    /// Save the form value exactly as chosen; an empty selection is sent too
    pub fn begin_save(&mut self) -> ApiRequest {
        ApiRequest::UpdateSettings {
            ticket: self.save.begin(),
            settings: UserSettings {
                hard_drive_path_selection: self.selection.clone(),
            },
        }
    }

    /// On success the form closes; the caller re-fetches settings and the listing
    pub fn apply_save(&mut self, ticket: Ticket, result: Result<StatusResponse, String>) -> Outcome {
        let outcome = self.save.complete(ticket, result);
        if outcome == Outcome::Updated {
            self.mode = SettingsMode::View;
        }
        outcome
    }

    pub fn reset(&mut self) {
        self.settings.reset();
        self.drives.reset();
        self.save.reset();
        self.mode = SettingsMode::View;
        self.selection.clear();
        self.cursor = 0;
    }
}
