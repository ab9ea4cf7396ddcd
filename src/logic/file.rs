//! File type detection and utilities
//!
//! Pure functions for identifying file types from names and MIME types.

/// How a streamed file is shown in the preview pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Video,
    Audio,
    /// Embedded document viewer
    Pdf,
    Text,
    /// No inline rendering, only a download/open affordance
    Download,
}

/// Pick the preview for a MIME type
///
/// # Examples
/// ```
/// use cloudtui::logic::file::{preview_kind, PreviewKind};
///
/// assert_eq!(preview_kind("application/pdf"), PreviewKind::Pdf);
/// assert_eq!(preview_kind("image/png"), PreviewKind::Image);
/// assert_eq!(preview_kind("text/plain; charset=utf-8"), PreviewKind::Text);
/// assert_eq!(preview_kind("application/octet-stream"), PreviewKind::Download);
/// ```
pub fn preview_kind(mime_type: &str) -> PreviewKind {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    if essence.starts_with("image/") {
        PreviewKind::Image
    } else if essence.starts_with("video/") {
        PreviewKind::Video
    } else if essence.starts_with("audio/") {
        PreviewKind::Audio
    } else if essence == "application/pdf" {
        PreviewKind::Pdf
    } else if essence.starts_with("text/") || essence == "application/json" {
        PreviewKind::Text
    } else {
        PreviewKind::Download
    }
}

/// Icon category for a listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Folder,
    Image,
    Video,
    Audio,
    Document,
    Archive,
    Other,
}

/// Categorize an entry by its name's extension
///
/// # Examples
/// ```
/// use cloudtui::logic::file::{file_category, FileCategory};
///
/// assert_eq!(file_category("Docs", true), FileCategory::Folder);
/// assert_eq!(file_category("beach.JPG", false), FileCategory::Image);
/// assert_eq!(file_category("report.pdf", false), FileCategory::Document);
/// assert_eq!(file_category("notes", false), FileCategory::Other);
/// ```
pub fn file_category(name: &str, is_folder: bool) -> FileCategory {
    if is_folder {
        return FileCategory::Folder;
    }

    let lower = name.to_lowercase();
    let ext = match lower.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => return FileCategory::Other,
    };

    match ext {
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" | "tiff" | "tif" | "svg" | "heic" => {
            FileCategory::Image
        }
        "mp4" | "mov" | "mkv" | "avi" | "webm" | "m4v" => FileCategory::Video,
        "mp3" | "wav" | "flac" | "ogg" | "m4a" | "aac" => FileCategory::Audio,
        "doc" | "docx" | "pdf" | "txt" | "md" | "odt" | "rtf" | "xls" | "xlsx" | "csv" => {
            FileCategory::Document
        }
        "zip" | "tar" | "gz" | "tgz" | "7z" | "rar" | "bz2" | "xz" => FileCategory::Archive,
        _ => FileCategory::Other,
    }
}

/// Check if a file path represents an image file based on extension
///
/// # Examples
/// ```
/// use cloudtui::logic::file::is_image_file;
///
/// assert!(is_image_file("photo.jpg"));
/// assert!(is_image_file("image.PNG"));
/// assert!(!is_image_file("document.pdf"));
/// ```
pub fn is_image_file(path: &str) -> bool {
    file_category(path, false) == FileCategory::Image
}

/// Check if file content is binary based on presence of null bytes
pub fn is_binary_content(bytes: &[u8]) -> bool {
    bytes.contains(&0)
}

/// Text shown in the preview pane for a text-like stream
///
/// Invalid UTF-8 is replaced; content with null bytes falls back to the
/// printable runs it contains.
pub fn text_preview(bytes: &[u8]) -> String {
    if is_binary_content(bytes) {
        return extract_text_from_binary(bytes);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

/// Extract printable runs of at least four characters, like `strings(1)`
pub fn extract_text_from_binary(bytes: &[u8]) -> String {
    const MIN_STRING_LENGTH: usize = 4;

    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();

    for &byte in bytes {
        if (32..=126).contains(&byte) || byte == b'\n' || byte == b'\t' {
            current.push(byte as char);
        } else {
            if current.len() >= MIN_STRING_LENGTH {
                runs.push(std::mem::take(&mut current));
            }
            current.clear();
        }
    }
    if current.len() >= MIN_STRING_LENGTH {
        runs.push(current);
    }

    if runs.is_empty() {
        "[Binary file - no readable text found]".to_string()
    } else {
        format!("[Binary file - extracted text]\n\n{}", runs.join("\n"))
    }
}

/// File name component of a relative path
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
}
