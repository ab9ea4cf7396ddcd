use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::layout::centered_rect;
use cloudtui::model::{ShareField, ShareModel};

/// Render the upload dialog (comma-separated local paths)
pub fn render_upload_dialog(f: &mut Frame, input: &str, current_path: &str) {
    let destination = if current_path.is_empty() { "/" } else { current_path };

    let lines = vec![
        Line::from(vec![
            Span::styled("Upload to: ", Style::default().fg(Color::DarkGray)),
            Span::raw(destination.to_string()),
        ]),
        Line::raw(""),
        Line::styled(
            "Local file paths, separated by commas:",
            Style::default().fg(Color::DarkGray),
        ),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::raw(input.to_string()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::raw(""),
        Line::styled("Enter: upload   Esc: cancel", Style::default().fg(Color::DarkGray)),
    ];

    let area = centered_rect(70, 9, f.area());
    let prompt = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Upload Files ")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

fn field_lines(label: &str, value: &str, focused: bool, error: Option<&str>) -> Vec<Line<'static>> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut value_spans = vec![
        Span::styled(if focused { "> " } else { "  " }, label_style),
        Span::raw(value.to_string()),
    ];
    if focused {
        value_spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }

    let mut lines = vec![Line::styled(label.to_string(), label_style), Line::from(value_spans)];
    if let Some(error) = error {
        lines.push(Line::styled(format!("  {}", error), Style::default().fg(Color::Red)));
    }
    lines
}

/// Lines of the share dialog body
pub fn share_lines(share: &ShareModel) -> Vec<Line<'static>> {
    if share.show_success {
        return vec![
            Line::styled(
                format!("Access to {} granted to {}", share.path, share.email.trim()),
                Style::default().fg(Color::Green),
            ),
            Line::raw(""),
            Line::styled("Enter/Esc: close", Style::default().fg(Color::DarkGray)),
        ];
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Folder: ", Style::default().fg(Color::DarkGray)),
            Span::raw(if share.path.is_empty() { "/".to_string() } else { share.path.clone() }),
        ]),
        Line::raw(""),
    ];
    lines.extend(field_lines(
        "Name",
        &share.name,
        share.focus == ShareField::Name,
        share.errors.name,
    ));
    lines.extend(field_lines(
        "Email",
        &share.email,
        share.focus == ShareField::Email,
        share.errors.email,
    ));
    lines.push(Line::raw(""));

    if share.share.is_loading() {
        lines.push(Line::styled("Sharing...", Style::default().fg(Color::Yellow)));
    } else if let Some(error) = share.share.error() {
        lines.push(Line::styled(format!("Error: {}", error), Style::default().fg(Color::Red)));
    }
    lines.push(Line::styled(
        "Tab: switch field   Enter: share   Esc: cancel",
        Style::default().fg(Color::DarkGray),
    ));
    lines
}

/// Render the admin share dialog
pub fn render_share_dialog(f: &mut Frame, share: &ShareModel) {
    let lines = share_lines(share);
    let height = lines.len() as u16 + 2;
    let area = centered_rect(64, height, f.area());

    let prompt = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Share Folder ")
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudtui::logic::validation::NAME_REQUIRED;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_share_form_shows_validation_error() {
        let mut share = ShareModel::new();
        share.open_for("/media/usb/Photos");
        assert!(share.submit().is_none());

        let body = text(&share_lines(&share));
        assert!(body.contains("Folder: /media/usb/Photos"));
        assert!(body.contains(NAME_REQUIRED));
    }

    #[test]
    fn test_share_success_message() {
        let mut share = ShareModel::new();
        share.open_for("/media/usb");
        share.email = "ana@example.com".into();
        share.show_success = true;

        let body = text(&share_lines(&share));
        assert!(body.contains("granted to ana@example.com"));
        assert!(!body.contains("Tab: switch field"));
    }
}
