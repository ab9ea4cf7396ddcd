use crate::App;
use ratatui::Frame;

use super::{
    browser, dialogs, header, layout, legend, library, login, preview, settings, status_bar,
    toast,
};
use cloudtui::logic::auth::{GuardDecision, View};
use cloudtui::model::SettingsMode;

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let view = app.model.effective_view();
    let checking = app.model.guard_decision() == GuardDecision::Loading;

    let legend_ctx = legend::LegendContext {
        view,
        vim_mode: app.model.ui.vim_mode,
        has_preview: app.stream.is_active(),
        has_open_command: app.open_command.is_some(),
        is_admin: app.model.session.is_admin(),
        settings_editing: app.model.settings.mode == SettingsMode::Edit,
    };
    let legend_height = legend::calculate_legend_height(size.width, &legend_ctx);
    let layout_info = layout::calculate_layout(size, legend_height);

    header::render_header(f, layout_info.header_area, &app.model);

    let content = layout_info.content_area;
    if checking {
        login::render_checking(f, content);
    } else {
        match view {
            View::Login => login::render_login(
                f,
                content,
                &app.model.session,
                &app.model.ui.token_input,
            ),
            View::Browser => {
                let (list_area, preview_area) =
                    layout::split_for_preview(content, app.stream.is_active());
                browser::render_browser(f, list_area, &app.model.browser, &app.icon_renderer);
                if let Some(preview_area) = preview_area {
                    preview::render_preview(
                        f,
                        preview_area,
                        &app.stream,
                        &mut app.image_state,
                        app.model.ui.preview_scroll,
                        app.open_command.is_some(),
                    );
                }
            }
            View::Library => {
                library::render_library(f, content, &app.model.library, &app.icon_renderer)
            }
            View::Settings => settings::render_settings(
                f,
                content,
                &app.model.settings,
                app.model.session.user.as_ref(),
            ),
        }
    }

    if legend_height > 0 {
        legend::render_legend(f, layout_info.legend_area, &legend_ctx);
    }
    status_bar::render_status_bar(f, layout_info.status_area, &app.model, &app.base_url);

    if let Some(input) = &app.model.ui.upload_input {
        let path = app.model.path_display();
        dialogs::render_upload_dialog(f, input, &path);
    }
    if app.model.share.open {
        dialogs::render_share_dialog(f, &app.model.share);
    }

    if let Some((message, _)) = &app.model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
