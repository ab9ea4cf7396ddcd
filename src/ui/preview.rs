//! Preview pane for the streamed file
//!
//! Images are drawn with terminal graphics once decoded; text and PDFs are
//! shown as scrollable text; media and everything else get a details card
//! pointing at the external viewer or the download key.

use std::path::PathBuf;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use ratatui_image::StatefulImage;

use crate::{ImageMetadata, ImagePreviewState};
use cloudtui::logic::file::{base_name, extract_text_from_binary, text_preview, PreviewKind};
use cloudtui::logic::formatting::format_bytes;
use cloudtui::stream::{StreamManager, StreamedFile};

pub const LOADING_TEXT: &str = "Loading file...";

fn kind_label(kind: PreviewKind) -> &'static str {
    match kind {
        PreviewKind::Image => "Image",
        PreviewKind::Video => "Video",
        PreviewKind::Audio => "Audio",
        PreviewKind::Pdf => "PDF document",
        PreviewKind::Text => "Text",
        PreviewKind::Download => "File",
    }
}

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<8}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Name, type, size and local copy of the previewed file
fn details(file: &StreamedFile) -> Vec<Line<'static>> {
    vec![
        detail_line("Name", base_name(&file.name).to_string()),
        detail_line(
            "Type",
            format!("{} ({})", kind_label(file.preview_kind()), file.mime_type),
        ),
        detail_line("Size", format_bytes(file.content.len() as u64)),
        detail_line("Local", file.reference.path().display().to_string()),
    ]
}

fn hint_line(has_open_command: bool, open_label: &str) -> Line<'static> {
    let mut spans = Vec::new();
    if has_open_command {
        spans.push(Span::styled("o", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(":{}  ", open_label)));
    }
    spans.push(Span::styled("s", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(":Save to downloads"));
    Line::from(spans)
}

/// Body text for the non-image kinds
fn body_lines(file: &StreamedFile, has_open_command: bool) -> Vec<Line<'static>> {
    match file.preview_kind() {
        PreviewKind::Text => text_preview(&file.content)
            .lines()
            .map(|l| Line::raw(l.to_string()))
            .collect(),
        PreviewKind::Pdf => {
            let mut lines = vec![hint_line(has_open_command, "Open in viewer"), Line::raw("")];
            lines.extend(
                extract_text_from_binary(&file.content)
                    .lines()
                    .map(|l| Line::raw(l.to_string())),
            );
            lines
        }
        PreviewKind::Video | PreviewKind::Audio => {
            let mut lines = details(file);
            lines.push(Line::raw(""));
            lines.push(hint_line(has_open_command, "Play"));
            lines
        }
        PreviewKind::Download | PreviewKind::Image => {
            let mut lines = details(file);
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("No preview available for {}", file.mime_type),
                Style::default().fg(Color::DarkGray),
            ));
            lines.push(hint_line(has_open_command, "Open"));
            lines
        }
    }
}

fn image_status_lines(metadata: &ImageMetadata, heading: &str) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        heading.to_string(),
        Style::default().fg(Color::Yellow),
    )];
    if let Some((w, h)) = metadata.dimensions {
        lines.push(detail_line("Pixels", format!("{}x{}", w, h)));
    }
    if let Some(format) = &metadata.format {
        lines.push(detail_line("Info", format.clone()));
    }
    lines.push(detail_line("Size", format_bytes(metadata.file_size)));
    lines
}

fn render_image(
    f: &mut Frame,
    area: Rect,
    file: &StreamedFile,
    image_state: &mut Option<(PathBuf, ImagePreviewState)>,
) {
    let state = image_state
        .as_mut()
        .filter(|(path, _)| path.as_path() == file.reference.path())
        .map(|(_, state)| state);

    match state {
        Some(ImagePreviewState::Ready { protocol, metadata }) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(area);

            f.render_stateful_widget(StatefulImage::default(), chunks[0], protocol);

            let caption = match metadata.dimensions {
                Some((w, h)) => format!("{}x{} · {}", w, h, format_bytes(metadata.file_size)),
                None => format_bytes(metadata.file_size),
            };
            f.render_widget(
                Paragraph::new(caption).style(Style::default().fg(Color::DarkGray)),
                chunks[1],
            );
        }
        Some(ImagePreviewState::Failed { metadata }) => {
            let mut lines = image_status_lines(metadata, "Image preview unavailable");
            lines.push(Line::raw(""));
            lines.extend(details(file));
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
        }
        Some(ImagePreviewState::Loading) | None => {
            let mut lines = vec![Line::styled(
                "Loading image preview...",
                Style::default().fg(Color::DarkGray),
            )];
            lines.push(Line::raw(""));
            lines.extend(details(file));
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
        }
    }
}

/// Render the preview pane for whatever the stream manager holds
pub fn render_preview(
    f: &mut Frame,
    area: Rect,
    stream: &StreamManager,
    image_state: &mut Option<(PathBuf, ImagePreviewState)>,
    scroll: u16,
    has_open_command: bool,
) {
    let title = stream
        .current()
        .map(|file| base_name(&file.name))
        .or_else(|| stream.pending_name().map(base_name))
        .unwrap_or("Preview");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if stream.is_loading() {
        f.render_widget(
            Paragraph::new(LOADING_TEXT).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    if let Some(error) = stream.error() {
        let paragraph = Paragraph::new(Line::styled(
            format!("Stream error: {}", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .wrap(Wrap { trim: false });
        f.render_widget(paragraph, inner);
        return;
    }

    let Some(file) = stream.current() else {
        return;
    };

    if file.preview_kind() == PreviewKind::Image {
        render_image(f, inner, file, image_state);
        return;
    }

    let paragraph = Paragraph::new(body_lines(file, has_open_command))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, inner);
}
