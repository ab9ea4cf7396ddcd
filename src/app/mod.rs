//! App Orchestration Methods
//!
//! `impl App` methods grouped by domain. Each one asks a sub-model (in
//! `cloudtui::model`) to start an action and sends the resulting request to
//! the background worker; responses come back through `handlers::api`.

pub(crate) mod file_ops;
pub(crate) mod navigation;
pub(crate) mod preview;
pub(crate) mod session;
pub(crate) mod settings;
pub(crate) mod share;
