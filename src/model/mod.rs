//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models:
//!
//! - **SessionModel**: Auth status, signed-in user, admin flag
//! - **BrowserModel**: Current folder, its listing, upload/download
//! - **LibraryModel**: Category-filtered file list and backend health
//! - **SettingsModel**: Storage-path selection and mounted drives
//! - **ShareModel**: Admin share dialog
//! - **UiModel**: Active view, inputs, toasts
//!
//! The streamed file is not part of the Model: its local reference is a file
//! on disk and lives with the runtime (see `stream::StreamManager`).

pub mod browser;
pub mod library;
pub mod navigation;
pub mod session;
pub mod settings;
pub mod share;
pub mod ui;

pub use browser::{Activation, BrowserModel};
pub use library::LibraryModel;
pub use navigation::PathNavigator;
pub use session::{AuthSession, SessionModel};
pub use settings::{SettingsMode, SettingsModel};
pub use share::{ShareField, ShareModel};
pub use ui::{UiModel, VimCommandState};

use crate::logic::auth::{guard, GuardDecision, View};
use crate::services::ApiResponse;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub session: SessionModel,
    pub browser: BrowserModel,
    pub library: LibraryModel,
    pub settings: SettingsModel,
    pub share: ShareModel,
    pub ui: UiModel,
}

impl Model {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            session: SessionModel::new(),
            browser: BrowserModel::new(),
            library: LibraryModel::new(),
            settings: SettingsModel::new(),
            share: ShareModel::new(),
            ui: UiModel::new(vim_mode),
        }
    }

    /// Guard decision for the view the user asked for
    pub fn guard_decision(&self) -> GuardDecision {
        guard(self.session.status, self.ui.view)
    }

    /// View that will actually be drawn
    pub fn effective_view(&self) -> View {
        match self.guard_decision() {
            GuardDecision::RedirectToLogin => View::Login,
            _ => self.ui.view,
        }
    }

    /// Header path: the stored storage root joined with the current folder
    pub fn path_display(&self) -> String {
        self.browser
            .navigator
            .display_path(self.settings.stored_path())
            .unwrap_or_default()
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal() || self.share.open
    }

    pub fn should_dismiss_toast(&self) -> bool {
        self.ui.should_dismiss_toast()
    }

    /// Whether the model would still accept `response`
    ///
    /// Stream tickets belong to the stream manager, so streams report false.
    pub fn is_current(&self, response: &ApiResponse) -> bool {
        match response {
            ApiResponse::HealthResult { ticket, .. } => self.library.health.is_current(*ticket),
            ApiResponse::FolderItemsResult { ticket, .. } => self.browser.listing.is_current(*ticket),
            ApiResponse::StreamResult { .. } => false,
            ApiResponse::BrowseResult { ticket, .. } => self.library.files.is_current(*ticket),
            ApiResponse::UploadResult { ticket, .. } => self.browser.upload.is_current(*ticket),
            ApiResponse::DownloadResult { ticket, .. } => self.browser.download.is_current(*ticket),
            ApiResponse::SettingsResult { ticket, .. } => self.settings.settings.is_current(*ticket),
            ApiResponse::SettingsSaved { ticket, .. } => self.settings.save.is_current(*ticket),
            ApiResponse::DrivesResult { ticket, .. } => self.settings.drives.is_current(*ticket),
            ApiResponse::LoginResult { ticket, .. }
            | ApiResponse::LogoutResult { ticket, .. }
            | ApiResponse::VerifyResult { ticket, .. } => self.session.is_current(*ticket),
            ApiResponse::AdminCheckResult { ticket, .. } => self.session.admin.is_current(*ticket),
            ApiResponse::ShareResult { ticket, .. } => self.share.share.is_current(*ticket),
        }
    }

    /// Forget everything fetched for the signed-out account
    pub fn clear_account_data(&mut self) {
        self.browser.reset();
        self.library.reset();
        self.settings.reset();
        self.share.close();
        self.ui.close_all_modals();
        self.ui.view = View::Browser;
        self.ui.preview_scroll = 0;
    }
}
