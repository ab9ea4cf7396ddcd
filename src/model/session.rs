//! Session Model
//!
//! Mirrors the backend session. Verify, login and logout share one request
//! sequence, so whichever auth action was issued last decides the state.

use crate::api::{AdminCheck, LoginResponse, MessageResponse, User, VerifyResponse};
use crate::logic::auth::{resolve_verify, AuthStatus};
use crate::logic::resource::{RequestSequence, Resource, Ticket};
use crate::services::ApiRequest;

const LOGIN_FAILED: &str = "Login failed";
const LOGOUT_FAILED: &str = "Logout failed";

/// Snapshot handed to views
#[derive(Clone, Debug, PartialEq)]
pub struct AuthSession {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

#[derive(Clone, Debug, Default)]
pub struct SessionModel {
    pub status: AuthStatus,
    pub user: Option<User>,
    pub error: Option<String>,

    /// Login or logout in flight
    pub pending: bool,

    pub admin: Resource<bool>,

    sequence: RequestSequence,
}

impl SessionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auth_session(&self) -> AuthSession {
        AuthSession {
            user: self.user.clone(),
            is_authenticated: self.status == AuthStatus::Authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.admin.data().copied().unwrap_or(false)
    }

    /// Whether `ticket` belongs to the latest verify, login or logout
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.sequence.is_current(ticket)
    }

    pub fn begin_verify(&mut self) -> ApiRequest {
        self.status = AuthStatus::Checking;
        self.error = None;
        ApiRequest::Verify {
            ticket: self.sequence.next(),
        }
    }

    /// Verify failures are not errors: they just mean there is no session
    pub fn apply_verify(&mut self, ticket: Ticket, result: Result<VerifyResponse, String>) -> bool {
        if !self.sequence.is_current(ticket) {
            return false;
        }

        let (status, user) = match result {
            Ok(response) => resolve_verify(&response),
            Err(message) => {
                tracing::debug!(error = %message, "verify failed, treating as signed out");
                (AuthStatus::Unauthenticated, None)
            }
        };
        self.status = status;
        self.user = user;
        self.error = None;
        true
    }

    pub fn begin_login(&mut self, token: &str) -> ApiRequest {
        self.pending = true;
        self.error = None;
        ApiRequest::Login {
            ticket: self.sequence.next(),
            token: token.to_string(),
        }
    }

    /// A failed login records the error and never leaves the session checking
    pub fn apply_login(&mut self, ticket: Ticket, result: Result<LoginResponse, String>) -> bool {
        if !self.sequence.is_current(ticket) {
            return false;
        }

        self.pending = false;
        match result {
            Ok(response) => {
                self.status = AuthStatus::Authenticated;
                self.user = Some(response.user);
                self.error = None;
            }
            Err(message) => {
                // A login that replaced the startup verify must still settle it
                if self.status == AuthStatus::Checking {
                    self.status = AuthStatus::Unauthenticated;
                }
                self.error = Some(non_empty(message, LOGIN_FAILED));
            }
        }
        true
    }

    pub fn begin_logout(&mut self) -> ApiRequest {
        self.pending = true;
        self.error = None;
        ApiRequest::Logout {
            ticket: self.sequence.next(),
        }
    }

    pub fn apply_logout(&mut self, ticket: Ticket, result: Result<MessageResponse, String>) -> bool {
        if !self.sequence.is_current(ticket) {
            return false;
        }

        self.pending = false;
        match result {
            Ok(_) => self.sign_out(),
            Err(message) => self.error = Some(non_empty(message, LOGOUT_FAILED)),
        }
        true
    }

    /// The backend rejected the session cookie on some other call
    pub fn expire(&mut self) {
        if self.status == AuthStatus::Unauthenticated {
            return;
        }
        tracing::info!("session expired");
        self.sequence.invalidate();
        self.pending = false;
        self.sign_out();
    }

    fn sign_out(&mut self) {
        self.status = AuthStatus::Unauthenticated;
        self.user = None;
        self.error = None;
        self.admin.reset();
    }

    pub fn request_admin_check(&mut self) -> ApiRequest {
        ApiRequest::AdminCheck {
            ticket: self.admin.begin(),
        }
    }

    pub fn apply_admin_check(&mut self, ticket: Ticket, result: Result<AdminCheck, String>) {
        self.admin.complete(ticket, result.map(|check| check.is_admin));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::auth::{guard, GuardDecision, View};

    fn user() -> User {
        User {
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
            picture: None,
        }
    }

    fn ticket(request: ApiRequest) -> Ticket {
        match request {
            ApiRequest::Verify { ticket }
            | ApiRequest::Login { ticket, .. }
            | ApiRequest::Logout { ticket }
            | ApiRequest::AdminCheck { ticket } => ticket,
            other => panic!("unexpected request {:?}", other),
        }
    }

    fn signed_in() -> SessionModel {
        let mut session = SessionModel::new();
        let t = ticket(session.begin_verify());
        session.apply_verify(
            t,
            Ok(VerifyResponse {
                authenticated: true,
                user: Some(user()),
            }),
        );
        session
    }

    #[test]
    fn test_starts_checking() {
        let session = SessionModel::new();
        assert_eq!(session.status, AuthStatus::Checking);
        assert!(!session.auth_session().is_authenticated);
    }

    #[test]
    fn test_verify_success_authenticates() {
        let session = signed_in();
        assert_eq!(session.status, AuthStatus::Authenticated);
        assert_eq!(
            session.auth_session(),
            AuthSession {
                user: Some(user()),
                is_authenticated: true
            }
        );
    }

    #[test]
    fn test_verify_failure_is_silent_sign_out() {
        let mut session = SessionModel::new();
        let t = ticket(session.begin_verify());
        session.apply_verify(t, Err("An unexpected error occurred".to_string()));
        assert_eq!(session.status, AuthStatus::Unauthenticated);
        assert!(session.error.is_none());
    }

    #[test]
    fn test_login_failure_keeps_status_and_sets_error() {
        let mut session = SessionModel::new();
        let t = ticket(session.begin_verify());
        session.apply_verify(t, Err("401".into()));

        let t = ticket(session.begin_login("bad-token"));
        assert!(session.pending);
        session.apply_login(t, Err("Invalid token".to_string()));

        assert_eq!(session.status, AuthStatus::Unauthenticated);
        assert_eq!(session.error.as_deref(), Some("Invalid token"));
        assert!(!session.pending);
    }

    #[test]
    fn test_failed_login_settles_superseded_verify() {
        let mut session = SessionModel::new();
        let verify = ticket(session.begin_verify());
        let login = ticket(session.begin_login("bad-token"));

        assert!(!session.apply_verify(verify, Err("no cookie".into())));
        assert_eq!(session.status, AuthStatus::Checking);

        assert!(session.apply_login(login, Err("Invalid token".to_string())));
        assert_eq!(session.status, AuthStatus::Unauthenticated);
        assert_eq!(session.error.as_deref(), Some("Invalid token"));
        assert_eq!(guard(session.status, View::Browser), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn test_failed_login_keeps_existing_session() {
        let mut session = signed_in();
        let t = ticket(session.begin_login("bad-token"));
        session.apply_login(t, Err("Invalid token".to_string()));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_login_success() {
        let mut session = SessionModel::new();
        let t = ticket(session.begin_login("good"));
        session.apply_login(
            t,
            Ok(LoginResponse {
                message: "Login successful".to_string(),
                user: user(),
            }),
        );
        assert!(session.is_authenticated());
        assert_eq!(session.user, Some(user()));
    }

    #[test]
    fn test_verify_response_after_login_is_stale() {
        let mut session = SessionModel::new();
        let verify = ticket(session.begin_verify());
        let login = ticket(session.begin_login("good"));
        session.apply_login(
            login,
            Ok(LoginResponse {
                message: String::new(),
                user: user(),
            }),
        );

        assert!(!session.apply_verify(verify, Err("no cookie".into())));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_user_and_admin() {
        let mut session = signed_in();
        let t = ticket(session.request_admin_check());
        session.apply_admin_check(t, Ok(AdminCheck { is_admin: true }));
        assert!(session.is_admin());

        let t = ticket(session.begin_logout());
        session.apply_logout(t, Ok(MessageResponse { message: "Logged out".into() }));
        assert_eq!(session.status, AuthStatus::Unauthenticated);
        assert!(session.user.is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_logout_failure_keeps_session() {
        let mut session = signed_in();
        let t = ticket(session.begin_logout());
        session.apply_logout(t, Err(String::new()));
        assert!(session.is_authenticated());
        assert_eq!(session.error.as_deref(), Some(LOGOUT_FAILED));
    }

    #[test]
    fn test_expire_signs_out_and_drops_in_flight() {
        let mut session = signed_in();
        let t = ticket(session.begin_login("again"));
        session.expire();
        assert_eq!(session.status, AuthStatus::Unauthenticated);
        assert!(!session.apply_login(
            t,
            Ok(LoginResponse {
                message: String::new(),
                user: user(),
            })
        ));
    }

    #[test]
    fn test_admin_check_failure_means_not_admin() {
        let mut session = signed_in();
        let t = ticket(session.request_admin_check());
        session.apply_admin_check(t, Err("HTTP 500: Internal Server Error".into()));
        assert!(!session.is_admin());
        assert!(session.admin.error().is_some());
    }
}
