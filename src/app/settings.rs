//! Settings form methods

use cloudtui::model::SettingsMode;

use crate::App;

impl App {
    pub(crate) fn begin_settings_edit(&mut self) {
        if self.model.settings.mode == SettingsMode::View {
            self.model.settings.begin_edit();
        }
    }

    pub(crate) fn save_settings(&mut self) {
        if self.model.settings.save.is_loading() {
            return;
        }
        let request = self.model.settings.begin_save();
        tracing::debug!(selection = %self.model.settings.selection, "saving settings");
        self.send(request);
    }

    /// After a save the stored root may differ, so the listing is re-read too
    pub(crate) fn reload_after_settings_save(&mut self) {
        let requests = [
            self.model.settings.request_settings(),
            self.model.browser.request_listing(),
        ];
        for request in requests {
            self.send(request);
        }
    }
}
