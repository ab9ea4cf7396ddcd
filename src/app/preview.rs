//! File preview methods
//!
//! Streaming a file into the preview pane, decoding images for terminal
//! graphics, and handing the local reference to an external viewer.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use cloudtui::api::StreamPayload;
use cloudtui::logic::file::PreviewKind;
use cloudtui::logic::resource::Ticket;
use cloudtui::services::ApiRequest;
use cloudtui::stream::StreamOutcome;

use crate::{App, ImageMetadata, ImagePreviewState};

const MAX_IMAGE_BYTES: u64 = 20 * 1024 * 1024;

impl App {
    pub(crate) fn stream_file(&mut self, name: &str) {
        self.image_state = None;
        self.model.ui.preview_scroll = 0;

        let ticket = self.stream.begin(name);
        tracing::debug!(name = %name, ticket = ticket.id(), "streaming file");
        self.send(ApiRequest::StreamFile {
            ticket,
            name: name.to_string(),
        });
    }

    /// Release the local reference and forget any decoded image
    pub(crate) fn close_preview(&mut self) {
        self.stream.reset();
        self.image_state = None;
        self.model.ui.preview_scroll = 0;
    }

    pub(crate) fn on_stream_complete(&mut self, ticket: Ticket, result: Result<StreamPayload, String>) {
        match self.stream.complete(ticket, result) {
            StreamOutcome::Ready => self.load_image_for_current(),
            StreamOutcome::Failed(message) => {
                tracing::warn!(error = %message, "stream failed");
            }
            StreamOutcome::Stale => {}
        }
    }

    /// Start decoding the current file in the background if it is an image
    fn load_image_for_current(&mut self) {
        let Some(file) = self.stream.current() else {
            return;
        };
        if file.preview_kind() != PreviewKind::Image {
            return;
        }

        let path = file.reference.path().to_path_buf();
        let file_size = file.content.len() as u64;

        let Some(picker) = self.image_picker.clone() else {
            self.image_state = Some((
                path,
                ImagePreviewState::Failed {
                    metadata: ImageMetadata {
                        dimensions: None,
                        format: Some("Image preview disabled in config".to_string()),
                        file_size,
                    },
                },
            ));
            return;
        };

        self.image_state = Some((path.clone(), ImagePreviewState::Loading));
        let image_tx = self.image_update_tx.clone();

        tokio::spawn(async move {
            tracing::debug!(path = %path.display(), "background: loading image");
            let state = match Self::load_image_preview(path.clone(), picker).await {
                Ok((protocol, metadata)) => ImagePreviewState::Ready { protocol, metadata },
                Err(metadata) => {
                    tracing::debug!(path = %path.display(), reason = ?metadata.format, "background: image load failed");
                    ImagePreviewState::Failed { metadata }
                }
            };
            let _ = image_tx.send((path, state));
        });
    }

    async fn load_image_preview(
        path: PathBuf,
        picker: ratatui_image::picker::Picker,
    ) -> Result<(ratatui_image::protocol::StatefulProtocol, ImageMetadata), ImageMetadata> {
        let file_size = match tokio::fs::metadata(&path).await {
            Ok(m) => m.len(),
            Err(e) => {
                return Err(ImageMetadata {
                    dimensions: None,
                    format: Some(format!("Read error: {}", e)),
                    file_size: 0,
                });
            }
        };

        if file_size > MAX_IMAGE_BYTES {
            return Err(ImageMetadata {
                dimensions: None,
                format: Some("Too large".to_string()),
                file_size,
            });
        }

        let img = match tokio::task::spawn_blocking(move || image::open(&path)).await {
            Ok(Ok(img)) => img,
            Ok(Err(e)) => {
                return Err(ImageMetadata {
                    dimensions: None,
                    format: Some(format!("Load error: {}", e)),
                    file_size,
                });
            }
            Err(e) => {
                return Err(ImageMetadata {
                    dimensions: None,
                    format: Some(format!("Task error: {}", e)),
                    file_size,
                });
            }
        };

        let dimensions = (img.width(), img.height());
        let format = match img.color() {
            image::ColorType::L8 | image::ColorType::L16 => "Grayscale",
            image::ColorType::La8 | image::ColorType::La16 => "Grayscale+Alpha",
            image::ColorType::Rgb8 | image::ColorType::Rgb16 | image::ColorType::Rgb32F => "RGB",
            image::ColorType::Rgba8 | image::ColorType::Rgba16 | image::ColorType::Rgba32F => "RGBA",
            _ => "Unknown",
        };

        // Downscale to roughly a large terminal's worth of cells before encoding
        let font_size = picker.font_size();
        let max_width = 200 * font_size.0 as u32;
        let max_height = 60 * font_size.1 as u32;
        let img = if img.width() > max_width || img.height() > max_height {
            tracing::debug!(width = img.width(), height = img.height(), max_width, max_height, "downscaling image");
            img.resize(max_width, max_height, image::imageops::FilterType::Triangle)
        } else {
            img
        };

        let protocol = picker.new_resize_protocol(img);

        Ok((
            protocol,
            ImageMetadata {
                dimensions: Some(dimensions),
                format: Some(format.to_string()),
                file_size,
            },
        ))
    }

    /// Launch `open_command` on the local reference of the current preview
    pub(crate) fn open_preview_externally(&mut self) {
        let Some(open_cmd) = self.open_command.clone() else {
            self.model.ui.show_toast("Error: open_command not configured");
            return;
        };

        let Some(file) = self.stream.current() else {
            self.model.ui.show_toast("Error: no file is being previewed");
            return;
        };
        let path = file.reference.path().to_path_buf();
        let name = file.name.clone();

        let result = Command::new(&open_cmd)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match result {
            Ok(_child) => {
                tracing::debug!(command = %open_cmd, path = %path.display(), "open_command spawned");
                self.model.ui.show_toast(format!("Opened: {}", name));
            }
            Err(e) => {
                tracing::warn!(command = %open_cmd, error = %e, "open_command failed");
                self.model.ui.show_toast(format!("Error: failed to run {}: {}", open_cmd, e));
            }
        }
    }

    pub(crate) fn scroll_preview(&mut self, delta: i32) {
        let scroll = self.model.ui.preview_scroll as i32 + delta;
        self.model.ui.preview_scroll = scroll.clamp(0, u16::MAX as i32) as u16;
    }
}
