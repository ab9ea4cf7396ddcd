//! API Response Handler
//!
//! Applies responses from the background worker to the Model. Every result
//! carries the ticket of the request that produced it; models drop results a
//! newer request has superseded.

use cloudtui::api::ApiError;
use cloudtui::logic::errors::{format_error_chain, format_error_message};
use cloudtui::logic::resource::Outcome;
use cloudtui::services::ApiResponse;

use crate::App;

/// Handle API response from background service
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    // Only a 401 the models would still accept can end the session
    let current = match &response {
        ApiResponse::StreamResult { ticket, .. } => app.stream.is_current(*ticket),
        other => app.model.is_current(other),
    };
    if current && response.expires_session() && app.model.session.is_authenticated() {
        app.model.session.expire();
        app.clear_signed_in_state();
        app.model.ui.show_toast("Error: session expired, please sign in again");
        return;
    }

    match response {
        ApiResponse::HealthResult { ticket, health } => {
            app.model.library.apply_health(ticket, into_message("health_check", health));
        }

        ApiResponse::FolderItemsResult { ticket, path, items } => {
            let items = into_message("list_folder_items", items);
            if let Ok(items) = &items {
                tracing::debug!(path = %path, count = items.len(), "listing received");
            }
            app.model.browser.apply_listing(ticket, path, items);
        }

        ApiResponse::StreamResult { ticket, name, payload } => {
            tracing::debug!(name = %name, "stream response");
            app.on_stream_complete(ticket, into_message("stream_file", payload));
        }

        ApiResponse::BrowseResult { ticket, files } => {
            app.model.library.apply_files(ticket, into_message("browse_files", files));
        }

        ApiResponse::UploadResult { ticket, result } => {
            match app.model.browser.upload.complete(ticket, into_message("upload", result)) {
                Outcome::Updated => {
                    let count = app
                        .model
                        .browser
                        .upload
                        .data()
                        .map(|r| r.uploaded_files.len())
                        .unwrap_or(0);
                    app.model.ui.show_toast(format!("Uploaded {} file(s)", count));
                    let request = app.model.browser.request_listing();
                    app.send(request);
                }
                Outcome::Failed => {
                    let message = app.model.browser.upload.error().unwrap_or_default().to_string();
                    app.model.ui.show_toast(format!("Error: upload failed: {}", message));
                }
                Outcome::Stale => {}
            }
        }

        ApiResponse::DownloadResult { ticket, name, path } => {
            match app.model.browser.download.complete(ticket, into_message("download", path)) {
                Outcome::Updated => {
                    let saved = app
                        .model
                        .browser
                        .download
                        .data()
                        .map(|p| p.display().to_string())
                        .unwrap_or(name);
                    app.model.ui.show_toast(format!("Downloaded: {}", saved));
                }
                Outcome::Failed => {
                    let message = app.model.browser.download.error().unwrap_or_default().to_string();
                    app.model.ui.show_toast(format!("Error: download of {} failed: {}", name, message));
                }
                Outcome::Stale => {}
            }
        }

        ApiResponse::SettingsResult { ticket, settings } => {
            app.model.settings.apply_settings(ticket, into_message("get_settings", settings));
        }

        ApiResponse::SettingsSaved { ticket, result } => {
            let outcome = app.model.settings.apply_save(ticket, into_message("update_settings", result));
            if outcome == Outcome::Updated {
                app.model.ui.show_toast("Settings saved");
                app.reload_after_settings_save();
            }
        }

        ApiResponse::DrivesResult { ticket, drives } => {
            app.model.settings.apply_drives(ticket, into_message("list_drives", drives));
        }

        ApiResponse::LoginResult { ticket, result } => {
            let applied = app.model.session.apply_login(ticket, into_message("login", result));
            if applied && app.model.session.is_authenticated() {
                app.model.ui.token_input.clear();
                if let Some(user) = &app.model.session.user {
                    tracing::info!(email = %user.email, "signed in");
                }
                app.load_after_auth();
            }
        }

        ApiResponse::LogoutResult { ticket, result } => {
            let applied = app.model.session.apply_logout(ticket, into_message("logout", result));
            if applied && !app.model.session.is_authenticated() {
                tracing::info!("signed out");
                app.clear_signed_in_state();
            }
        }

        ApiResponse::VerifyResult { ticket, result } => {
            let applied = app.model.session.apply_verify(ticket, into_message("verify", result));
            if applied && app.model.session.is_authenticated() {
                app.load_after_auth();
            }
        }

        ApiResponse::AdminCheckResult { ticket, result } => {
            app.model.session.apply_admin_check(ticket, into_message("admin_check", result));
        }

        ApiResponse::ShareResult { ticket, result } => {
            app.model.share.apply_share(ticket, into_message("share", result));
        }
    }
}

/// Log the full error chain and keep only the user-facing message
fn into_message<T>(request: &str, result: Result<T, ApiError>) -> Result<T, String> {
    result.map_err(|e| {
        tracing::warn!(request = request, error = %format_error_chain(&e), "request failed");
        format_error_message(&e)
    })
}
