//! Utility functions used throughout the application

use std::path::PathBuf;

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("cloudtui-debug.log");
    path
}

/// Downloads land in the user's download dir, or the home dir, or `.`
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Preview scratch files live under the system temp dir
pub fn default_scratch_dir() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("cloudtui-previews");
    path
}
