//! External Services
//!
//! This module contains services that interact with external systems:
//! - api: Background worker that runs gateway calls off the UI loop

pub mod api;

pub use api::{spawn_api_service, ApiRequest, ApiResponse, Priority};
