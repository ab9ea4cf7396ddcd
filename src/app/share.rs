//! Share dialog methods (admins only)

use crate::App;

impl App {
    pub(crate) fn open_share_dialog(&mut self) {
        if !self.model.session.is_admin() {
            self.model.ui.show_toast("Error: sharing requires admin access");
            return;
        }
        let path = self.model.path_display();
        self.model.share.open_for(&path);
    }

    pub(crate) fn submit_share(&mut self) {
        if let Some(request) = self.model.share.submit() {
            tracing::debug!(path = %self.model.share.path, "sharing folder");
            self.send(request);
        }
    }
}
