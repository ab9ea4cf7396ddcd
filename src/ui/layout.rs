use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for rendering
pub struct LayoutInfo {
    /// Top bar: view tabs, user, current path
    pub header_area: Rect,
    /// Active view
    pub content_area: Rect,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Calculate the screen layout: header, content, legend, status bar
pub fn calculate_layout(terminal_size: Rect, legend_height: u16) -> LayoutInfo {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header (border, text, border)
            Constraint::Min(3),                // Content
            Constraint::Length(legend_height), // Legend (exact fit for wrapped content)
            Constraint::Length(1),             // Status bar
        ])
        .split(terminal_size);

    LayoutInfo {
        header_area: chunks[0],
        content_area: chunks[1],
        legend_area: chunks[2],
        status_area: chunks[3],
    }
}

/// Split the browser area into listing and preview panes
///
/// Narrow terminals stack the preview under the listing.
pub fn split_for_preview(area: Rect, with_preview: bool) -> (Rect, Option<Rect>) {
    if !with_preview {
        return (area, None);
    }

    let direction = if area.width >= 80 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };

    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    (chunks[0], Some(chunks[1]))
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
