//! UI state transition logic
//!
//! Pure functions for cycling views and filters.

use crate::logic::auth::View;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 1500;

pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

/// Library category filter, in the order `c` cycles through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowseCategory {
    #[default]
    All,
    Photos,
    Videos,
    Documents,
    Audio,
    Zip,
    Others,
}

impl BrowseCategory {
    /// Value of the `category` query parameter; `None` means unfiltered
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            BrowseCategory::All => None,
            BrowseCategory::Photos => Some("photos"),
            BrowseCategory::Videos => Some("videos"),
            BrowseCategory::Documents => Some("documents"),
            BrowseCategory::Audio => Some("audio"),
            BrowseCategory::Zip => Some("zip"),
            BrowseCategory::Others => Some("others"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BrowseCategory::All => "All",
            BrowseCategory::Photos => "Photos",
            BrowseCategory::Videos => "Videos",
            BrowseCategory::Documents => "Documents",
            BrowseCategory::Audio => "Audio",
            BrowseCategory::Zip => "Archives",
            BrowseCategory::Others => "Others",
        }
    }
}

/// Cycle to the next library filter, wrapping back to All
///
/// # Examples
/// ```
/// use cloudtui::logic::ui::{cycle_category, BrowseCategory};
///
/// assert_eq!(cycle_category(BrowseCategory::All), BrowseCategory::Photos);
/// assert_eq!(cycle_category(BrowseCategory::Others), BrowseCategory::All);
/// ```
pub fn cycle_category(current: BrowseCategory) -> BrowseCategory {
    match current {
        BrowseCategory::All => BrowseCategory::Photos,
        BrowseCategory::Photos => BrowseCategory::Videos,
        BrowseCategory::Videos => BrowseCategory::Documents,
        BrowseCategory::Documents => BrowseCategory::Audio,
        BrowseCategory::Audio => BrowseCategory::Zip,
        BrowseCategory::Zip => BrowseCategory::Others,
        BrowseCategory::Others => BrowseCategory::All,
    }
}

/// Tab order of the signed-in views: Files → Library → Settings → Files
///
/// Login is not part of the cycle and stays where it is.
pub fn cycle_view(current: View) -> View {
    match current {
        View::Browser => View::Library,
        View::Library => View::Settings,
        View::Settings => View::Browser,
        View::Login => View::Login,
    }
}
