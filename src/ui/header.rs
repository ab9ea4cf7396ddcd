use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use cloudtui::logic::auth::{display_name, View};
use cloudtui::model::Model;

const TABS: [View; 3] = [View::Browser, View::Library, View::Settings];

/// Breadcrumb spans for the header path ("/" when nothing is selected yet)
fn path_spans(path: &str) -> Vec<Span<'static>> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return vec![Span::styled("/", Style::default().fg(Color::DarkGray))];
    }

    let last = segments.len() - 1;
    let mut spans = Vec::with_capacity(segments.len() * 2);
    for (i, segment) in segments.into_iter().enumerate() {
        spans.push(Span::styled(" / ", Style::default().fg(Color::DarkGray)));
        let style = if i == last {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(segment.to_string(), style));
    }
    spans
}

/// Render the top bar: view tabs and the signed-in user, titled with the path
pub fn render_header(f: &mut Frame, area: Rect, model: &Model) {
    let active = model.effective_view();
    let mut spans = Vec::new();

    if active == View::Login {
        spans.push(Span::styled(
            View::Login.title(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    } else {
        for (i, view) in TABS.iter().enumerate() {
            let label = format!(" {}:{} ", i + 1, view.title());
            let style = if *view == active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
    }

    if let Some(user) = &model.session.user {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("{} <{}>", display_name(user), user.email),
            Style::default().fg(Color::Green),
        ));
        if model.session.is_admin() {
            spans.push(Span::styled(" [admin]", Style::default().fg(Color::Magenta)));
        }
    }

    let mut title = vec![Span::raw(" cloudtui ")];
    if active == View::Browser {
        title.extend(path_spans(&model.path_display()));
        title.push(Span::raw(" "));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(Line::from(title)));
    f.render_widget(header, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_root_path_is_slash() {
        assert_eq!(text(&path_spans("")), "/");
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(text(&path_spans("/media/usb/Docs")), " / media / usb / Docs");
        assert_eq!(text(&path_spans("Docs/2024")), " / Docs / 2024");
    }
}
