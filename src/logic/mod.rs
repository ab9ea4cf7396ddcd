//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - auth: Session states and the view guard
//! - errors: Gateway error classification
//! - file: File type detection and preview classification
//! - formatting: Sizes and timestamps for display
//! - navigation: Remote path manipulation and list selection
//! - resource: Request state with stale-response protection
//! - ui: View and filter cycling
//! - upload: Upload dialog input parsing
//! - validation: Share form checks

pub mod auth;
pub mod errors;
pub mod file;
pub mod formatting;
pub mod navigation;
pub mod resource;
pub mod ui;
pub mod upload;
pub mod validation;
