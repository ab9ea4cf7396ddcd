use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Messages starting with this prefix are drawn as errors
const ERROR_PREFIX: &str = "Error:";

fn is_error(message: &str) -> bool {
    message.starts_with(ERROR_PREFIX)
}

/// Toast box for `message`, near the top of `area`
fn toast_area(area: Rect, message: &str) -> Rect {
    let max_width = area.width.min(80);
    let width = (message.width() as u16).saturating_add(6).min(max_width);
    let height = if message.width() as u16 + 6 > max_width { 5 } else { 4 };

    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + 3u16.min(area.height.saturating_sub(height)),
        width,
        height: height.min(area.height),
    }
}

/// Render a toast notification (brief pop-up message)
pub fn render_toast(f: &mut Frame, area: Rect, message: &str) {
    let toast_area = toast_area(area, message);
    f.render_widget(Clear, toast_area);

    let (icon, color) = if is_error(message) {
        ("✗ ", Color::Red)
    } else {
        ("✓ ", Color::Green)
    };

    let text = message.strip_prefix(ERROR_PREFIX).map(str::trim_start).unwrap_or(message);
    let line = Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(text),
    ]);

    let toast = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(toast, toast_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detection() {
        assert!(is_error("Error: upload failed"));
        assert!(!is_error("Uploaded 2 file(s)"));
    }

    #[test]
    fn test_toast_area_is_centered_and_bounded() {
        let area = Rect::new(0, 0, 100, 30);
        let rect = toast_area(area, "Saved");
        assert_eq!(rect.width, 11);
        assert_eq!(rect.x, 44);
        assert_eq!(rect.y, 3);

        let long = "x".repeat(200);
        assert_eq!(toast_area(area, &long).width, 80);
        assert_eq!(toast_area(area, &long).height, 5);
    }
}
