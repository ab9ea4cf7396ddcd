//! Navigation logic
//!
//! Pure functions for remote folder paths and list selection.
//! Paths are relative to the user's storage root and `/`-delimited; the
//! root is the empty string.

/// Non-empty segments of a relative path
///
/// # Examples
/// ```
/// use cloudtui::logic::navigation::path_segments;
///
/// assert_eq!(path_segments("Docs/2024/taxes"), vec!["Docs", "2024", "taxes"]);
/// assert!(path_segments("").is_empty());
/// assert_eq!(path_segments("/Docs//2024/"), vec!["Docs", "2024"]);
/// ```
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Path with its last segment removed; root stays root
///
/// # Examples
/// ```
/// use cloudtui::logic::navigation::parent_path;
///
/// assert_eq!(parent_path("Docs/2024"), "Docs");
/// assert_eq!(parent_path("Docs"), "");
/// assert_eq!(parent_path(""), "");
/// ```
pub fn parent_path(path: &str) -> String {
    let mut segments = path_segments(path);
    segments.pop();
    segments.join("/")
}

/// Presentation string for a folder: the storage-root label joined with the
/// current relative path
///
/// At root the label is returned as-is (which may be nothing).
pub fn display_path(current: &str, base: Option<&str>) -> Option<String> {
    if current.is_empty() {
        return base.map(str::to_string);
    }

    match base {
        Some(base) if !base.is_empty() => Some(format!("{}/{}", base, current)),
        _ => Some(current.to_string()),
    }
}

/// Next list index, wrapping to the top; `None` for an empty list
pub fn next_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) if i + 1 >= list_len => 0,
        Some(i) => i + 1,
        None => 0,
    })
}

/// Previous list index, wrapping to the bottom; `None` for an empty list
pub fn prev_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(0) | None => list_len - 1,
        Some(i) => (i - 1).min(list_len - 1),
    })
}

/// Keep a selection inside a list that may have shrunk
pub fn clamp_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }
    Some(current.unwrap_or(0).min(list_len - 1))
}
