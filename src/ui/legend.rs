use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use cloudtui::logic::auth::View;

/// What the legend needs to know about the current screen
#[derive(Debug, Clone, Copy)]
pub struct LegendContext {
    pub view: View,
    pub vim_mode: bool,
    pub has_preview: bool,
    pub has_open_command: bool,
    pub is_admin: bool,
    pub settings_editing: bool,
}

fn key(k: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(k, Style::default().fg(Color::Yellow)),
        Span::raw(label),
    ]
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(ctx: &LegendContext) -> Vec<Span<'static>> {
    let mut hotkey_spans = vec![];

    match ctx.view {
        View::Login => {
            hotkey_spans.extend(key("Enter", ":Sign in  "));
            hotkey_spans.extend(key("Esc", ":Clear/Quit"));
            return hotkey_spans;
        }
        View::Browser => {
            if ctx.vim_mode {
                hotkey_spans.extend(key("hjkl", ":Nav  "));
                hotkey_spans.extend(key("gg/G", ":First/Last  "));
            } else {
                hotkey_spans.extend(key("↑/↓", ":Nav  "));
                hotkey_spans.extend(key("Enter", ":Open  "));
            }

            if ctx.has_preview {
                hotkey_spans.extend(key("Esc", ":Close preview  "));
                hotkey_spans.extend(key("s", ":Save  "));
                if ctx.has_open_command {
                    hotkey_spans.extend(key("o", ":Open  "));
                }
                let scroll = if ctx.vim_mode { "^d/^u" } else { "PgUp/PgDn" };
                hotkey_spans.extend(key(scroll, ":Scroll  "));
            } else if !ctx.vim_mode {
                hotkey_spans.extend(key("←", ":Back  "));
            }

            hotkey_spans.extend(key("u", ":Upload  "));
            hotkey_spans.extend(key("d", ":Download  "));
            if ctx.is_admin {
                hotkey_spans.extend(key("S", ":Share  "));
            }
        }
        View::Library => {
            let nav = if ctx.vim_mode { "jk" } else { "↑/↓" };
            hotkey_spans.extend(key(nav, ":Nav  "));
            hotkey_spans.extend(key("c", ":Category  "));
            hotkey_spans.extend(key("d", ":Download  "));
        }
        View::Settings if ctx.settings_editing => {
            hotkey_spans.extend(key("↑/↓", ":Choose  "));
            hotkey_spans.extend(key("Enter", ":Select  "));
            hotkey_spans.extend(key("s", ":Save  "));
            hotkey_spans.extend(key("Esc", ":Cancel"));
            return hotkey_spans;
        }
        View::Settings => {
            hotkey_spans.extend(key("e", ":Edit  "));
        }
    }

    hotkey_spans.extend(key("Tab", ":View  "));
    hotkey_spans.extend(key("r", ":Refresh  "));
    hotkey_spans.extend(key("L", ":Logout  "));
    hotkey_spans.extend(key("q", ":Quit"));
    hotkey_spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(ctx: &LegendContext) -> Paragraph<'static> {
    Paragraph::new(Line::from(build_hotkey_spans(ctx)))
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: false })
}

pub fn render_legend(f: &mut Frame, area: Rect, ctx: &LegendContext) {
    f.render_widget(build_legend_paragraph(ctx), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, ctx: &LegendContext) -> u16 {
    // Count lines without the block; line_count() miscounts with borders attached
    let paragraph = Paragraph::new(Line::from(build_hotkey_spans(ctx))).wrap(Wrap { trim: false });
    let line_count = paragraph.line_count(terminal_width.saturating_sub(2));
    (line_count as u16).saturating_add(2).max(3)
}
