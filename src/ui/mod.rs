// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - icons: Icon rendering (emoji and Nerd Fonts) with themes
// - layout: Header/content/legend/status split and the preview split
// - render: Main orchestration function that coordinates all rendering
// - header: View tabs, signed-in user and current path
// - browser: Folder listing
// - preview: Streamed file preview (image, text, PDF, media details)
// - library: Category-filtered file library and backend health
// - settings: Storage path and account info, drive picker
// - login: Sign-in screen and auth check
// - legend: Renders hotkey legend
// - status_bar: Renders bottom status bar
// - dialogs: Upload and share dialogs
// - toast: Renders toast notifications (brief pop-up messages)

pub mod browser;
pub mod dialogs;
pub mod header;
pub mod icons;
pub mod layout;
pub mod legend;
pub mod library;
pub mod login;
pub mod preview;
pub mod render;
pub mod settings;
pub mod status_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
