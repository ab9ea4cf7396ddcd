//! Navigation Model
//!
//! Tracks which remote folder is open. There is no history stack: going back
//! means going to the structural parent of the current path.

use crate::api::FolderItem;
use crate::logic::navigation::{display_path, parent_path, path_segments};

/// Current folder, as a path relative to the storage root (`""` at root)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathNavigator {
    current: String,
}

impl PathNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_path(&self) -> &str {
        &self.current
    }

    pub fn is_root(&self) -> bool {
        self.current.is_empty()
    }

    /// Open a folder by the `relative_path` the server gave for it
    pub fn enter_folder(&mut self, relative_path: &str) {
        self.current = relative_path.to_string();
    }

    /// Open a listing entry; files are refused and leave the path unchanged
    pub fn enter_item(&mut self, item: &FolderItem) -> bool {
        if !item.is_folder() {
            return false;
        }
        self.enter_folder(&item.relative_path);
        true
    }

    /// Move to the parent folder. Returns whether the path changed.
    pub fn go_back(&mut self) -> bool {
        if self.is_root() {
            return false;
        }
        self.current = parent_path(&self.current);
        true
    }

    /// Header text: storage root joined with the current path
    pub fn display_path(&self, base: Option<&str>) -> Option<String> {
        display_path(&self.current, base)
    }

    /// Breadcrumb segments of the current path
    pub fn segments(&self) -> Vec<&str> {
        path_segments(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ItemType;

    fn item(relative_path: &str, item_type: ItemType) -> FolderItem {
        FolderItem {
            name: relative_path.rsplit('/').next().unwrap_or("").to_string(),
            full_path: format!("/media/usb/{}", relative_path),
            relative_path: relative_path.to_string(),
            item_type,
            size: None,
            modified: "2025-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_starts_at_root() {
        let nav = PathNavigator::new();
        assert!(nav.is_root());
        assert_eq!(nav.current_path(), "");
        assert!(nav.segments().is_empty());
    }

    #[test]
    fn test_enter_folder_item() {
        let mut nav = PathNavigator::new();
        assert!(nav.enter_item(&item("Docs", ItemType::Folder)));
        assert_eq!(nav.current_path(), "Docs");
    }

    #[test]
    fn test_enter_file_item_is_refused() {
        let mut nav = PathNavigator::new();
        nav.enter_folder("Docs");
        assert!(!nav.enter_item(&item("Docs/a.txt", ItemType::File)));
        assert_eq!(nav.current_path(), "Docs");
    }

    #[test]
    fn test_go_back_drops_last_segment() {
        let mut nav = PathNavigator::new();
        nav.enter_folder("Docs/2024");
        assert!(nav.go_back());
        assert_eq!(nav.current_path(), "Docs");
        assert!(nav.go_back());
        assert!(nav.is_root());
    }

    #[test]
    fn test_go_back_at_root_is_noop() {
        let mut nav = PathNavigator::new();
        assert!(!nav.go_back());
        assert!(!nav.go_back());
        assert_eq!(nav.current_path(), "");
    }

    #[test]
    fn test_display_path() {
        let mut nav = PathNavigator::new();
        assert_eq!(nav.display_path(Some("/media/usb")), Some("/media/usb".to_string()));
        nav.enter_folder("Docs");
        assert_eq!(
            nav.display_path(Some("/media/usb")),
            Some("/media/usb/Docs".to_string())
        );
        assert_eq!(nav.display_path(None), Some("Docs".to_string()));
    }
}
