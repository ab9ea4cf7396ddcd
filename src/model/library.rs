//! Library Model
//!
//! Flat, category-filtered view of every file in storage, plus the backend
//! health banner shown above it.

use crate::api::{BrowseFile, BrowseResponse, HealthStatus};
use crate::logic::navigation::{clamp_selection, next_selection, prev_selection};
use crate::logic::resource::{Outcome, Resource, Ticket};
use crate::logic::ui::{cycle_category, BrowseCategory};
use crate::services::ApiRequest;

#[derive(Clone, Debug, Default)]
pub struct LibraryModel {
    pub health: Resource<HealthStatus>,
    pub files: Resource<BrowseResponse>,
    pub category: BrowseCategory,
    pub selection: Option<usize>,
}

impl LibraryModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[BrowseFile] {
        self.files.data().map(|r| r.files.as_slice()).unwrap_or(&[])
    }

    pub fn selected(&self) -> Option<&BrowseFile> {
        self.selection.and_then(|i| self.entries().get(i))
    }

    pub fn request_health(&mut self) -> ApiRequest {
        ApiRequest::HealthCheck {
            ticket: self.health.begin(),
        }
    }

    pub fn apply_health(&mut self, ticket: Ticket, result: Result<HealthStatus, String>) -> Outcome {
        self.health.complete(ticket, result)
    }

    /// Fetch the current category; results of the previous filter are dropped
    pub fn request_files(&mut self) -> ApiRequest {
        ApiRequest::BrowseFiles {
            ticket: self.files.begin_fresh(),
            category: self.category.as_query().map(str::to_string),
        }
    }

    pub fn apply_files(&mut self, ticket: Ticket, result: Result<BrowseResponse, String>) -> Outcome {
        let outcome = self.files.complete(ticket, result);
        if outcome == Outcome::Updated {
            self.selection = clamp_selection(None, self.entries().len());
        }
        outcome
    }

    pub fn next_category(&mut self) -> ApiRequest {
        self.category = cycle_category(self.category);
        self.selection = None;
        self.request_files()
    }

    pub fn select_next(&mut self) {
        self.selection = next_selection(self.selection, self.entries().len());
    }

    pub fn select_prev(&mut self) {
        self.selection = prev_selection(self.selection, self.entries().len());
    }

    pub fn reset(&mut self) {
        self.health.reset();
        self.files.reset();
        self.category = BrowseCategory::All;
        self.selection = None;
    }
}
