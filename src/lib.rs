//! Cloud storage TUI library
//!
//! Everything below the terminal layer: the HTTP gateway, request state,
//! navigation, stream lifecycle and the pure model. Exposed for the binary
//! and for tests.

pub mod api;
pub mod config;
pub mod logging;
pub mod logic;
pub mod model;
pub mod services;
pub mod stream;
pub mod utils;
