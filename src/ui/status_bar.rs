use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use cloudtui::logic::auth::View;
use cloudtui::logic::formatting::{format_bytes, format_file_size};
use cloudtui::model::Model;

/// Status text for the active view
///
/// Browser: item count and the selected entry. Library: file count for the
/// category. Settings: the stored path.
pub fn build_status_line(model: &Model, base_url: &str) -> String {
    let detail = match model.effective_view() {
        View::Login => String::from("Not signed in"),
        View::Browser => {
            let items = model.browser.items();
            let selected = model
                .browser
                .selected_item()
                .map(|item| {
                    if item.is_folder() {
                        format!("{}/", item.name)
                    } else {
                        format!("{} ({})", item.name, format_file_size(item.size.as_deref()))
                    }
                })
                .unwrap_or_default();
            format!("Items: {:<5} │ {}", items.len(), selected)
        }
        View::Library => {
            let total = model
                .library
                .files
                .data()
                .map(|r| r.total_count)
                .unwrap_or(0);
            let selected = model
                .library
                .selected()
                .map(|f| format!("{} ({})", f.name, format_bytes(f.size)))
                .unwrap_or_default();
            format!("{}: {:<5} │ {}", model.library.category.label(), total, selected)
        }
        View::Settings => match model.settings.stored_path() {
            Some(path) => format!("Storage: {}", path),
            None => String::from("Storage: Not configured"),
        },
    };

    format!("{} │ {}", base_url, detail)
}

fn is_busy(model: &Model) -> bool {
    model.browser.listing.is_loading()
        || model.browser.upload.is_loading()
        || model.browser.download.is_loading()
        || model.library.files.is_loading()
        || model.settings.is_loading()
        || model.settings.save.is_loading()
        || model.session.pending
}

/// Render the bottom status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, model: &Model, base_url: &str) {
    let mut spans = vec![Span::raw(build_status_line(model, base_url))];
    if is_busy(model) {
        spans.push(Span::styled("  ⟳ working…", Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::Gray));
    f.render_widget(status, area);
}
