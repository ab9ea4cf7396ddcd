//! Event Handlers
//!
//! - api: responses from the background request worker
//! - keyboard: user keyboard input
//!
//! Handlers take `&mut App`, update the Model and send follow-up requests.

pub mod api;
pub mod keyboard;

pub use api::handle_api_response;
pub use keyboard::handle_key;
