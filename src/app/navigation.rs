//! Navigation methods
//!
//! Folder entry/exit in the browser and switching between views.

use cloudtui::logic::auth::View;
use cloudtui::logic::ui::cycle_view;
use cloudtui::model::Activation;

use crate::App;

impl App {
    /// Enter the selected folder, or stream the selected file
    pub(crate) fn open_selected(&mut self) {
        match self.model.browser.activate_selected() {
            Some(Activation::Folder(request)) => {
                self.close_preview();
                self.send(request);
                self.on_path_changed();
            }
            Some(Activation::File(name)) => self.stream_file(&name),
            None => {}
        }
    }

    /// Close the preview if one is open, otherwise go to the parent folder
    pub(crate) fn go_back(&mut self) {
        if self.stream.is_active() {
            self.close_preview();
            return;
        }

        if let Some(request) = self.model.browser.go_back() {
            self.send(request);
            self.on_path_changed();
        }
    }

    /// The settings record is re-read whenever the folder changes
    fn on_path_changed(&mut self) {
        tracing::debug!(path = %self.model.browser.current_path(), "path changed");
        let request = self.model.settings.request_settings();
        self.send(request);
    }

    pub(crate) fn switch_view(&mut self, view: View) {
        if self.model.ui.view == view {
            return;
        }
        self.model.ui.view = view;
        self.model.ui.vim_command_state = Default::default();
    }

    pub(crate) fn next_view(&mut self) {
        self.switch_view(cycle_view(self.model.ui.view));
    }

    /// `r`: re-issue whatever the current view shows
    pub(crate) fn refresh_current_view(&mut self) {
        let requests = match self.model.ui.view {
            View::Browser => vec![self.model.browser.request_listing()],
            View::Library => vec![
                self.model.library.request_health(),
                self.model.library.request_files(),
            ],
            View::Settings => vec![
                self.model.settings.request_settings(),
                self.model.settings.request_drives(),
            ],
            View::Login => Vec::new(),
        };

        for request in requests {
            self.send(request);
        }
    }

    pub(crate) fn next_library_category(&mut self) {
        let request = self.model.library.next_category();
        self.send(request);
    }
}
