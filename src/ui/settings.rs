//! Settings view: storage root, account info and the drive picker

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use cloudtui::api::User;
use cloudtui::logic::formatting::format_timestamp;
use cloudtui::model::{SettingsMode, SettingsModel};

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{:<14}", text), Style::default().fg(Color::DarkGray))
}

fn dim(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

/// Read-only summary of the stored settings and the signed-in account
pub fn summary_lines(settings: &SettingsModel, user: Option<&User>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    match settings.stored_path() {
        Some(path) => lines.push(Line::from(vec![label("Storage path"), Span::raw(path.to_string())])),
        None => lines.push(Line::from(vec![
            label("Storage path"),
            Span::styled("Not configured", Style::default().fg(Color::Yellow)),
        ])),
    }

    if let Some(record) = settings.record() {
        lines.push(Line::from(vec![
            label("Created"),
            Span::raw(format_timestamp(&record.created_at)),
        ]));
        lines.push(Line::from(vec![
            label("Updated"),
            Span::raw(format_timestamp(&record.updated_at)),
        ]));
    }

    lines.push(Line::raw(""));
    let name = user
        .and_then(|u| u.name.as_deref())
        .filter(|n| !n.is_empty());
    lines.push(Line::from(vec![
        label("Name"),
        match name {
            Some(n) => Span::raw(n.to_string()),
            None => dim("Not provided"),
        },
    ]));
    lines.push(Line::from(vec![
        label("Email"),
        Span::raw(user.map(|u| u.email.clone()).unwrap_or_default()),
    ]));
    lines.push(Line::from(vec![label(""), dim("Email cannot be changed")]));

    lines
}

fn render_view_mode(f: &mut Frame, area: Rect, settings: &SettingsModel, user: Option<&User>) {
    let mut lines = summary_lines(settings, user);
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("e", Style::default().fg(Color::Yellow)),
        Span::raw(":Change storage path"),
    ]));
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_edit_mode(f: &mut Frame, area: Rect, settings: &SettingsModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(area);

    let items: Vec<ListItem> = settings
        .options()
        .into_iter()
        .map(|option| {
            let marker = if option.value == settings.selection { "(•) " } else { "( ) " };
            ListItem::new(format!("{}{}", marker, option.label))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Storage drive "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(settings.cursor));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let footer = if settings.save.is_loading() {
        Line::styled("Saving...", Style::default().fg(Color::Yellow))
    } else if let Some(error) = settings.save.error() {
        Line::styled(format!("Error: {}", error), Style::default().fg(Color::Red))
    } else {
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(":Choose  "),
            Span::styled("s", Style::default().fg(Color::Yellow)),
            Span::raw(":Save  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(":Cancel"),
        ])
    };
    f.render_widget(Paragraph::new(footer), chunks[1]);
}

pub fn render_settings(f: &mut Frame, area: Rect, settings: &SettingsModel, user: Option<&User>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Settings ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(error) = settings.load_error() {
        let line = Line::from(vec![
            Span::styled(format!("Error: {}", error), Style::default().fg(Color::Red)),
            Span::styled("  r:Retry", Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), inner);
        return;
    }

    if settings.is_loading() && settings.settings.data().is_none() {
        f.render_widget(
            Paragraph::new("Loading settings...").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    match settings.mode {
        SettingsMode::View => render_view_mode(f, inner, settings, user),
        SettingsMode::Edit => render_edit_mode(f, inner, settings),
    }
}
