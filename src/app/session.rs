//! Sign-in, sign-out and the loads that follow them

use crate::App;

impl App {
    /// Check the existing session, then sign in with `token` if one was given
    ///
    /// Verify and login share a sequence, so a startup login supersedes the
    /// verify issued just before it.
    pub(crate) fn start(&mut self, token: Option<&str>) {
        let verify = self.model.session.begin_verify();
        self.send(verify);

        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            let login = self.model.session.begin_login(token);
            self.send(login);
        }
    }

    /// Fetch everything the signed-in views show
    pub(crate) fn load_after_auth(&mut self) {
        tracing::debug!(path = %self.model.browser.current_path(), "loading account data");

        let requests = [
            self.model.browser.request_listing(),
            self.model.settings.request_settings(),
            self.model.settings.request_drives(),
            self.model.session.request_admin_check(),
            self.model.library.request_health(),
            self.model.library.request_files(),
        ];
        for request in requests {
            self.send(request);
        }
    }

    pub(crate) fn submit_login(&mut self) {
        if self.model.session.pending {
            return;
        }

        let token = self.model.ui.token_input.trim().to_string();
        if token.is_empty() {
            return;
        }

        let request = self.model.session.begin_login(&token);
        self.send(request);
    }

    pub(crate) fn logout(&mut self) {
        if self.model.session.pending {
            return;
        }
        let request = self.model.session.begin_logout();
        self.send(request);
    }

    /// Drop the preview and every account-specific model after sign-out
    pub(crate) fn clear_signed_in_state(&mut self) {
        self.close_preview();
        self.model.clear_account_data();
    }
}
