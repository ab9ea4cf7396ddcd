//! Session state and view gating
//!
//! The client holds no identity of its own. The session is whatever the
//! backend's verify endpoint says, and every view except Login is gated on it.

use crate::api::{User, VerifyResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// Verify call in flight; nothing is known yet
    #[default]
    Checking,
    Authenticated,
    Unauthenticated,
}

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    Login,
    #[default]
    Browser,
    Library,
    Settings,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Sign in",
            View::Browser => "Files",
            View::Library => "Library",
            View::Settings => "Settings",
        }
    }
}

/// What to draw for a view given the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the "Checking authentication..." screen
    Loading,
    Render,
    /// Switch to the Login view instead
    RedirectToLogin,
}

/// Gate a view on the session
///
/// # Examples
/// ```
/// use cloudtui::logic::auth::{guard, AuthStatus, GuardDecision, View};
///
/// assert_eq!(guard(AuthStatus::Checking, View::Browser), GuardDecision::Loading);
/// assert_eq!(guard(AuthStatus::Authenticated, View::Settings), GuardDecision::Render);
/// assert_eq!(guard(AuthStatus::Unauthenticated, View::Browser), GuardDecision::RedirectToLogin);
/// assert_eq!(guard(AuthStatus::Unauthenticated, View::Login), GuardDecision::Render);
/// ```
pub fn guard(status: AuthStatus, view: View) -> GuardDecision {
    match status {
        AuthStatus::Checking => GuardDecision::Loading,
        AuthStatus::Authenticated => GuardDecision::Render,
        AuthStatus::Unauthenticated if view == View::Login => GuardDecision::Render,
        AuthStatus::Unauthenticated => GuardDecision::RedirectToLogin,
    }
}

/// Session established by a verify answer
///
/// Authenticated only when the server says so *and* sends the user.
pub fn resolve_verify(response: &VerifyResponse) -> (AuthStatus, Option<User>) {
    match (&response.user, response.authenticated) {
        (Some(user), true) => (AuthStatus::Authenticated, Some(user.clone())),
        _ => (AuthStatus::Unauthenticated, None),
    }
}

/// Name to greet the user with: display name, else email
pub fn display_name(user: &User) -> &str {
    user.name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(&user.email)
}
