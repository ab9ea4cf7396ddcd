use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::icons::IconRenderer;
use cloudtui::api::FolderItem;
use cloudtui::logic::formatting::{format_date, format_file_size};
use cloudtui::model::BrowserModel;

/// Right-hand column: date for folders, size and date for files
fn info_text(item: &FolderItem) -> String {
    let date = format_date(&item.modified);
    if item.is_folder() {
        date
    } else {
        format!("{:>10}  {}", format_file_size(item.size.as_deref()), date)
    }
}

/// Build a list row: icon, name, and the info column right-aligned
fn build_list_item<'a>(item: &'a FolderItem, icons: &IconRenderer, panel_width: u16) -> ListItem<'a> {
    let icon = icons.item_icon(&item.name, item.is_folder());
    let info = info_text(item);

    // borders(2) + highlight symbol(2) + padding(2)
    let available = panel_width.saturating_sub(6) as usize;
    let used = icon.content.width() + item.name.width();
    let info_width = info.width();

    let mut spans = vec![icon, Span::raw(item.name.as_str())];
    if used + info_width + 2 <= available {
        let padding = available - used - info_width;
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(info, Style::default().fg(Color::DarkGray)));
    }

    ListItem::new(Line::from(spans))
}

/// Render the folder listing
pub fn render_browser(f: &mut Frame, area: Rect, browser: &BrowserModel, icons: &IconRenderer) {
    let title = if browser.listing.is_loading() {
        " Files (loading…) "
    } else {
        " Files "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    let items = browser.items();

    // Error banner takes precedence over an empty list
    if items.is_empty() {
        let message = if let Some(error) = browser.listing.error() {
            Line::from(vec![
                Span::styled(format!("Error: {}", error), Style::default().fg(Color::Red)),
                Span::styled("  (r to retry)", Style::default().fg(Color::DarkGray)),
            ])
        } else if browser.listing.is_loading() || browser.listing.data().is_none() {
            Line::styled("Loading...", Style::default().fg(Color::DarkGray))
        } else {
            Line::styled("This folder is empty", Style::default().fg(Color::DarkGray))
        };
        let paragraph = Paragraph::new(message).block(block).wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
        return;
    }

    let rows: Vec<ListItem> = items
        .iter()
        .map(|item| build_list_item(item, icons, area.width))
        .collect();

    let mut block = block;
    if let Some(error) = browser.listing.error() {
        block = block.title_bottom(Line::styled(
            format!(" Error: {} (r to retry) ", error),
            Style::default().fg(Color::Red),
        ));
    }

    let list = List::new(rows)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(browser.selection);
    f.render_stateful_widget(list, area, &mut state);

    // Scrollbar when the listing is longer than the viewport
    let viewport_height = area.height.saturating_sub(2) as usize;
    if items.len() > viewport_height {
        let mut scrollbar_state =
            ScrollbarState::new(items.len()).position(browser.selection.unwrap_or(0));
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_symbol(Some("│"))
            .thumb_symbol("█");
        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                horizontal: 0,
                vertical: 1,
            }),
            &mut scrollbar_state,
        );
    }
}
