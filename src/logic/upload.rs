//! Parsing of the upload dialog input

use std::path::{Path, PathBuf};

/// Split a comma-separated list of local paths
///
/// Blank entries are dropped and a leading `~/` expands to the home directory.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use cloudtui::logic::upload::parse_upload_selection;
///
/// assert_eq!(
///     parse_upload_selection(" /tmp/a.txt, ,/tmp/b.png "),
///     vec![PathBuf::from("/tmp/a.txt"), PathBuf::from("/tmp/b.png")]
/// );
/// assert!(parse_upload_selection("  ").is_empty());
/// ```
pub fn parse_upload_selection(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(expand_home)
        .collect()
}

fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(raw),
        },
        None => PathBuf::from(raw),
    }
}

/// Paths from the selection that do not exist locally
pub fn missing_files(files: &[PathBuf]) -> Vec<&Path> {
    files
        .iter()
        .filter(|p| !p.is_file())
        .map(PathBuf::as_path)
        .collect()
}
