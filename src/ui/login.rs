//! Sign-in and auth-check screens

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::layout::centered_rect;
use cloudtui::model::SessionModel;

/// Token input is masked except for the last four characters
pub fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 4 {
        return "•".repeat(count);
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("{}{}", "•".repeat(count - 4), tail)
}

pub fn render_login(f: &mut Frame, area: Rect, session: &SessionModel, token_input: &str) {
    let mut lines = vec![
        Line::styled(
            "Sign in with your identity provider token",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Token: ", Style::default().fg(Color::DarkGray)),
            Span::raw(mask_token(token_input)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::raw(""),
    ];

    if session.pending {
        lines.push(Line::styled("Signing in...", Style::default().fg(Color::Yellow)));
    } else if let Some(error) = &session.error {
        lines.push(Line::styled(format!("Error: {}", error), Style::default().fg(Color::Red)));
    } else {
        lines.push(Line::raw(""));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Enter: sign in   Esc: clear / quit",
        Style::default().fg(Color::DarkGray),
    ));

    let dialog = centered_rect(64, lines.len() as u16 + 2, area);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sign In ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, dialog);
    f.render_widget(paragraph, dialog);
}

/// Shown while the startup session check is in flight
pub fn render_checking(f: &mut Frame, area: Rect) {
    let dialog = centered_rect(40, 3, area);
    let paragraph = Paragraph::new("Checking authentication...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, dialog);
}
