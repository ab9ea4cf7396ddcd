use ratatui::{
    style::{Color, Style},
    text::Span,
};

use cloudtui::logic::file::{file_category, FileCategory};

/// Icon display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Emoji,    // Standard emoji icons (📁, 📄, etc.)
    NerdFont, // Nerd Fonts icons (U+E5FF, etc.)
}

/// Icon colors, using terminal palette colors so user themes apply
#[derive(Debug, Clone)]
pub struct IconTheme {
    pub folder_color: Color,
    pub image_color: Color,
    pub video_color: Color,
    pub audio_color: Color,
    pub document_color: Color,
    pub archive_color: Color,
    pub file_color: Color,

    pub healthy_color: Color,
    pub unhealthy_color: Color,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            folder_color: Color::Blue,
            image_color: Color::Magenta,
            video_color: Color::LightRed,
            audio_color: Color::LightGreen,
            document_color: Color::Cyan,
            archive_color: Color::Yellow,
            file_color: Color::Gray,

            healthy_color: Color::Green,
            unhealthy_color: Color::Red,
        }
    }
}

/// Icon renderer that handles both emoji and Nerd Font modes
pub struct IconRenderer {
    mode: IconMode,
    theme: IconTheme,
}

impl IconRenderer {
    pub fn new(mode: IconMode, theme: IconTheme) -> Self {
        Self { mode, theme }
    }

    /// Icon for a listing entry, chosen by extension
    pub fn item_icon(&self, name: &str, is_folder: bool) -> Span<'static> {
        self.category_icon(file_category(name, is_folder))
    }

    pub fn category_icon(&self, category: FileCategory) -> Span<'static> {
        let (emoji_icon, nerd_icon, color) = match category {
            FileCategory::Folder => ("📁 ", "\u{E5FF} ", self.theme.folder_color),
            FileCategory::Image => ("🌄 ", "\u{F1C5} ", self.theme.image_color),
            FileCategory::Video => ("🎬 ", "\u{F1C8} ", self.theme.video_color),
            FileCategory::Audio => ("🎵 ", "\u{F1C7} ", self.theme.audio_color),
            FileCategory::Document => ("📄 ", "\u{F15C} ", self.theme.document_color),
            FileCategory::Archive => ("📦 ", "\u{F1C6} ", self.theme.archive_color),
            FileCategory::Other => ("📎 ", "\u{F15B} ", self.theme.file_color),
        };

        let icon = match self.mode {
            IconMode::Emoji => emoji_icon,
            IconMode::NerdFont => nerd_icon,
        };

        Span::styled(icon, Style::default().fg(color))
    }

    /// Backend health indicator for the library banner
    pub fn health_icon(&self, healthy: bool) -> Span<'static> {
        let (emoji_icon, nerd_icon, color) = if healthy {
            ("✅ ", "\u{F00C} ", self.theme.healthy_color)
        } else {
            ("❌ ", "\u{F00D} ", self.theme.unhealthy_color)
        };

        let icon = match self.mode {
            IconMode::Emoji => emoji_icon,
            IconMode::NerdFont => nerd_icon,
        };

        Span::styled(icon, Style::default().fg(color))
    }
}
