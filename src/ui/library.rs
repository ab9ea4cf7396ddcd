use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use super::icons::IconRenderer;
use cloudtui::api::{BrowseFile, HealthStatus};
use cloudtui::logic::formatting::{format_bytes, format_date};
use cloudtui::logic::resource::Resource;
use cloudtui::logic::ui::BrowseCategory;
use cloudtui::model::LibraryModel;

const CATEGORIES: [BrowseCategory; 7] = [
    BrowseCategory::All,
    BrowseCategory::Photos,
    BrowseCategory::Videos,
    BrowseCategory::Documents,
    BrowseCategory::Audio,
    BrowseCategory::Zip,
    BrowseCategory::Others,
];

/// One-line backend health summary
fn health_line(health: &Resource<HealthStatus>, icons: &IconRenderer) -> Line<'static> {
    if let Some(error) = health.error() {
        return Line::from(vec![
            icons.health_icon(false),
            Span::styled(
                format!("Backend unreachable: {}", error),
                Style::default().fg(Color::Red),
            ),
        ]);
    }
    match health.data() {
        Some(status) if status.status == "ok" => Line::from(vec![
            icons.health_icon(true),
            Span::styled("Backend online", Style::default().fg(Color::Green)),
        ]),
        Some(status) => Line::from(vec![
            icons.health_icon(false),
            Span::styled(
                format!("Backend status: {}", status.status),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        None => Line::styled("Checking backend...", Style::default().fg(Color::DarkGray)),
    }
}

fn file_row(file: &BrowseFile, icons: &IconRenderer) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        icons.item_icon(&file.name, false),
        Span::raw(file.name.clone()),
        Span::styled(
            format!("  {}  {}  {}", format_bytes(file.size), file.category, format_date(&file.modified)),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

pub fn render_library(f: &mut Frame, area: Rect, library: &LibraryModel, icons: &IconRenderer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    f.render_widget(Paragraph::new(health_line(&library.health, icons)), chunks[0]);

    let selected_tab = CATEGORIES
        .iter()
        .position(|c| *c == library.category)
        .unwrap_or(0);
    let tabs = Tabs::new(CATEGORIES.iter().map(|c| c.label()).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title(" Category (c) "))
        .select(selected_tab)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[1]);

    let total = library.files.data().map(|r| r.total_count).unwrap_or(0);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ({}) ", library.category.label(), total))
        .border_style(Style::default().fg(Color::Cyan));

    let entries = library.entries();
    if entries.is_empty() {
        let message = if let Some(error) = library.files.error() {
            Line::from(vec![
                Span::styled(format!("Error: {}", error), Style::default().fg(Color::Red)),
                Span::styled("  (r to retry)", Style::default().fg(Color::DarkGray)),
            ])
        } else if library.files.is_loading() {
            Line::styled("Loading...", Style::default().fg(Color::DarkGray))
        } else {
            Line::styled("No files in this category", Style::default().fg(Color::DarkGray))
        };
        f.render_widget(Paragraph::new(message).block(block), chunks[2]);
        return;
    }

    let rows: Vec<ListItem> = entries.iter().map(|file| file_row(file, icons)).collect();
    let list = List::new(rows)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(library.selection);
    f.render_stateful_widget(list, chunks[2], &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::icons::{IconMode, IconTheme};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_health_states() {
        let icons = IconRenderer::new(IconMode::Emoji, IconTheme::default());
        let mut health: Resource<HealthStatus> = Resource::new();
        assert_eq!(line_text(&health_line(&health, &icons)), "Checking backend...");

        health.set_data(HealthStatus { status: "ok".into() });
        assert!(line_text(&health_line(&health, &icons)).ends_with("Backend online"));

        health.set_data(HealthStatus { status: "degraded".into() });
        assert!(line_text(&health_line(&health, &icons)).ends_with("Backend status: degraded"));
    }

    #[test]
    fn test_every_category_has_a_tab() {
        let mut category = BrowseCategory::All;
        for _ in 0..CATEGORIES.len() {
            assert!(CATEGORIES.contains(&category));
            category = cloudtui::logic::ui::cycle_category(category);
        }
        assert_eq!(category, BrowseCategory::All);
    }
}
