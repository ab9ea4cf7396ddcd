//! File Operations
//!
//! Upload from local paths, download to the configured directory, and saving
//! the current preview.

use cloudtui::logic::auth::View;
use cloudtui::logic::upload::{missing_files, parse_upload_selection};

use crate::App;

impl App {
    pub(crate) fn open_upload_dialog(&mut self) {
        self.model.ui.upload_input = Some(String::new());
    }

    /// Upload the comma-separated paths typed into the dialog
    pub(crate) fn submit_upload(&mut self) {
        let Some(input) = self.model.ui.upload_input.take() else {
            return;
        };

        let files = parse_upload_selection(&input);
        let missing: Vec<String> = missing_files(&files)
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        if !missing.is_empty() {
            self.model.ui.show_toast(format!("Error: not found: {}", missing.join(", ")));
            self.model.ui.upload_input = Some(input);
            return;
        }

        match self.model.browser.upload_request(files) {
            Some(request) => {
                tracing::debug!(location = %self.model.browser.current_path(), "uploading");
                self.send(request);
            }
            None => self.model.ui.show_toast("No files selected"),
        }
    }

    /// Download the selected file of the browser or the library
    pub(crate) fn download_selected(&mut self) {
        let name = match self.model.ui.view {
            View::Browser => self
                .model
                .browser
                .selected_item()
                .filter(|item| !item.is_folder())
                .map(|item| item.relative_path.clone()),
            View::Library => self.model.library.selected().map(|f| f.name.clone()),
            _ => None,
        };

        let Some(name) = name else {
            return;
        };

        let request = self
            .model
            .browser
            .download_request(&name, self.download_dir.clone());
        self.model.ui.show_toast(format!("Downloading {}", name));
        self.send(request);
    }

    /// Copy the previewed file into the download directory
    pub(crate) fn save_preview(&mut self) {
        match self.stream.save_to(&self.download_dir) {
            Ok(Some(path)) => {
                tracing::info!(path = %path.display(), "saved preview");
                self.model.ui.show_toast(format!("Saved: {}", path.display()));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, dir = %self.download_dir.display(), "could not save preview");
                self.model.ui.show_toast(format!("Error: could not save file: {}", e));
            }
        }
    }
}
