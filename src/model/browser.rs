//! Browser Model
//!
//! The folder listing for the current path plus the upload and download
//! actions that operate on it.

use std::path::PathBuf;

use super::navigation::PathNavigator;
use crate::api::{FolderItem, UploadResponse};
use crate::logic::navigation::{clamp_selection, next_selection, prev_selection};
use crate::logic::resource::{Outcome, Resource, Ticket};
use crate::services::ApiRequest;

/// What activating a listing entry leads to
#[derive(Clone, Debug, PartialEq)]
pub enum Activation {
    /// Entered a folder; the new listing must be fetched
    Folder(ApiRequest),
    /// A file was chosen; stream it by this name
    File(String),
}

#[derive(Clone, Debug, Default)]
pub struct BrowserModel {
    pub navigator: PathNavigator,
    pub listing: Resource<Vec<FolderItem>>,
    pub selection: Option<usize>,
    pub upload: Resource<UploadResponse>,
    pub download: Resource<PathBuf>,

    /// Path the listing data belongs to
    listed_path: Option<String>,
}

impl BrowserModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_path(&self) -> &str {
        self.navigator.current_path()
    }

    pub fn items(&self) -> &[FolderItem] {
        self.listing.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_item(&self) -> Option<&FolderItem> {
        self.selection.and_then(|i| self.items().get(i))
    }

    /// Issue a listing of the current path
    pub fn request_listing(&mut self) -> ApiRequest {
        ApiRequest::ListFolderItems {
            ticket: self.listing.begin(),
            path: self.navigator.current_path().to_string(),
        }
    }

    pub fn apply_listing(
        &mut self,
        ticket: Ticket,
        path: String,
        result: Result<Vec<FolderItem>, String>,
    ) -> Outcome {
        let outcome = self.listing.complete(ticket, result);
        if outcome == Outcome::Updated {
            let len = self.items().len();
            self.selection = if self.listed_path.as_deref() == Some(path.as_str()) {
                clamp_selection(self.selection, len)
            } else {
                clamp_selection(None, len)
            };
            self.listed_path = Some(path);
        }
        outcome
    }

    pub fn select_next(&mut self) {
        self.selection = next_selection(self.selection, self.items().len());
    }

    pub fn select_prev(&mut self) {
        self.selection = prev_selection(self.selection, self.items().len());
    }

    pub fn select_first(&mut self) {
        self.selection = clamp_selection(Some(0), self.items().len());
    }

    pub fn select_last(&mut self) {
        let len = self.items().len();
        self.selection = clamp_selection(Some(len.saturating_sub(1)), len);
    }

    /// Open the selected entry: folders are entered, files are handed back for streaming
    pub fn activate_selected(&mut self) -> Option<Activation> {
        let item = self.selected_item()?.clone();

        if self.navigator.enter_item(&item) {
            self.selection = None;
            Some(Activation::Folder(self.request_listing()))
        } else {
            Some(Activation::File(item.relative_path))
        }
    }

    /// Go to the parent folder; `None` at root
    pub fn go_back(&mut self) -> Option<ApiRequest> {
        if !self.navigator.go_back() {
            return None;
        }
        self.selection = None;
        Some(self.request_listing())
    }

    /// Upload into the current folder; nothing is sent for an empty selection
    pub fn upload_request(&mut self, files: Vec<PathBuf>) -> Option<ApiRequest> {
        if files.is_empty() {
            return None;
        }

        Some(ApiRequest::Upload {
            ticket: self.upload.begin(),
            files,
            location: self.navigator.current_path().to_string(),
        })
    }

    pub fn download_request(&mut self, name: &str, dest_dir: PathBuf) -> ApiRequest {
        ApiRequest::Download {
            ticket: self.download.begin(),
            name: name.to_string(),
            dest_dir,
        }
    }

    /// Back to the root with nothing loaded; in-flight results are ignored
    pub fn reset(&mut self) {
        self.navigator = PathNavigator::new();
        self.listing.reset();
        self.selection = None;
        self.upload.reset();
        self.download.reset();
        self.listed_path = None;
    }
}
