use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, time::Duration};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use cloudtui::api::CloudClient;
use cloudtui::config::{self, Config};
use cloudtui::services::{self, ApiRequest, ApiResponse};
use cloudtui::stream::StreamManager;
use cloudtui::{logging, model, utils};

mod app;
mod handlers;
mod ui;

use ui::icons::{IconMode, IconRenderer, IconTheme};

/// Personal cloud storage TUI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <temp>/cloudtui-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, gg/G, ^d/^u)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Identity-provider token to sign in with at startup
    #[arg(long)]
    token: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ImageMetadata {
    pub dimensions: Option<(u32, u32)>,
    pub format: Option<String>,
    pub file_size: u64,
}

pub enum ImagePreviewState {
    Loading,
    Ready {
        protocol: ratatui_image::protocol::StatefulProtocol,
        metadata: ImageMetadata,
    },
    Failed {
        metadata: ImageMetadata,
    },
}

impl std::fmt::Debug for ImagePreviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImagePreviewState::Loading => write!(f, "ImagePreviewState::Loading"),
            ImagePreviewState::Ready { metadata, .. } => f
                .debug_struct("ImagePreviewState::Ready")
                .field("metadata", metadata)
                .field("protocol", &"<StatefulProtocol>")
                .finish(),
            ImagePreviewState::Failed { metadata } => f
                .debug_struct("ImagePreviewState::Failed")
                .field("metadata", metadata)
                .finish(),
        }
    }
}

pub struct App {
    pub model: model::Model,

    /// Owns the previewed file and its scratch copy; not Clone, so not in Model
    stream: StreamManager,

    api_tx: UnboundedSender<ApiRequest>,
    api_rx: UnboundedReceiver<ApiResponse>,
    icon_renderer: IconRenderer,
    image_picker: Option<ratatui_image::picker::Picker>,

    /// Decoded image for the scratch file at this path
    image_state: Option<(PathBuf, ImagePreviewState)>,
    image_update_tx: UnboundedSender<(PathBuf, ImagePreviewState)>,
    image_update_rx: UnboundedReceiver<(PathBuf, ImagePreviewState)>,

    open_command: Option<String>,
    download_dir: PathBuf,
    base_url: String,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let client = CloudClient::new(config.base_url.clone(), config.timeout())
            .with_context(|| format!("Failed to create HTTP client for {}", config.base_url))?;
        let (api_tx, api_rx) = services::spawn_api_service(client);
        let (image_update_tx, image_update_rx) = mpsc::unbounded_channel();

        // Parse icon mode from config
        let icon_mode = match config.icon_mode.to_lowercase().as_str() {
            "emoji" => IconMode::Emoji,
            "nerdfont" | "nerd" | "nf" => IconMode::NerdFont,
            _ => IconMode::NerdFont,
        };
        let icon_renderer = IconRenderer::new(icon_mode, IconTheme::default());

        let image_picker = if config.image_preview_enabled {
            let mut picker = match ratatui_image::picker::Picker::from_query_stdio() {
                Ok(p) => p,
                Err(e) => {
                    tracing::debug!(error = %e, "image preview: failed to detect terminal");
                    ratatui_image::picker::Picker::from_fontsize((8, 16))
                }
            };

            match config.image_protocol.to_lowercase().as_str() {
                "auto" => tracing::debug!("image preview: auto-detected protocol"),
                "iterm2" => picker.set_protocol_type(ratatui_image::picker::ProtocolType::Iterm2),
                "kitty" => picker.set_protocol_type(ratatui_image::picker::ProtocolType::Kitty),
                "sixel" => picker.set_protocol_type(ratatui_image::picker::ProtocolType::Sixel),
                "halfblocks" => {
                    picker.set_protocol_type(ratatui_image::picker::ProtocolType::Halfblocks)
                }
                unknown => {
                    tracing::warn!(protocol = unknown, "image preview: unknown protocol, using auto-detect")
                }
            }
            Some(picker)
        } else {
            tracing::debug!("image preview disabled in config");
            None
        };

        Ok(App {
            model: model::Model::new(config.vim_mode),
            stream: StreamManager::new(config.scratch_dir()),
            api_tx,
            api_rx,
            icon_renderer,
            image_picker,
            image_state: None,
            image_update_tx,
            image_update_rx,
            open_command: config.open_command.clone(),
            download_dir: config.download_dir(),
            base_url: config.base_url,
        })
    }

    /// Hand a request to the background worker
    fn send(&self, request: ApiRequest) {
        if self.api_tx.send(request).is_err() {
            tracing::error!("api service has stopped; request dropped");
        }
    }

    /// Handle API responses from background service
    /// Delegated to handlers::api module
    fn handle_api_response(&mut self, response: ApiResponse) {
        handlers::handle_api_response(self, response);
    }

    /// Delegated to handlers::keyboard module
    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        handlers::handle_key(self, key)
    }

    /// Store a decoded image if it still belongs to the previewed file
    fn apply_image_update(&mut self, path: PathBuf, state: ImagePreviewState) {
        let current = self.stream.current().map(|f| f.reference.path());
        if current != Some(path.as_path()) {
            tracing::debug!(path = %path.display(), "dropping image for a preview that is gone");
            return;
        }
        self.image_state = Some((path, state));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = config::get_config_path(args.config.as_deref())?;
    let mut config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env()?;

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }

    if args.debug {
        let log_path = utils::get_debug_log_path();
        logging::init(&log_path, &config.log_level)?;
        tracing::debug!(path = %log_path.display(), "debug mode enabled");
        match &config_path {
            Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
            None => tracing::debug!("no config file found, using defaults"),
        }
        tracing::debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "backend");
    }

    let mut app = App::new(config)?;
    app.start(args.token.as_deref());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Scratch files go with the preview
    app.stream.reset();

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            app.handle_api_response(response);
        }

        // Process image updates from background decoding tasks (non-blocking)
        while let Ok((path, state)) = app.image_update_rx.try_recv() {
            app.apply_image_update(path, state);
        }

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key)?;
            }
        }
    }

    Ok(())
}
