//! Request state for one backend resource
//!
//! A `Resource<T>` is the `{data, loading, error}` triple a view renders,
//! plus a sequence counter. Every action takes a `Ticket` from `begin()` and
//! hands it back with the result; only the most recently issued ticket may
//! change the state, so a slow response can never overwrite a newer one.

pub const FALLBACK_ERROR: &str = "An error occurred";

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Hands out tickets and remembers which one is current
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Make every outstanding ticket stale without issuing a new one
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }
}

/// What `complete` did with a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Failed,
    /// A newer request was issued after this one; the result was dropped
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    sequence: RequestSequence,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            sequence: RequestSequence::new(),
        }
    }
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a request: loading on, error cleared, previous data kept
    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.error = None;
        self.sequence.next()
    }

    /// Like `begin`, but also drops the previous data
    pub fn begin_fresh(&mut self) -> Ticket {
        self.data = None;
        self.begin()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.sequence.is_current(ticket)
    }

    /// Apply the result of the request identified by `ticket`
    pub fn complete(&mut self, ticket: Ticket, result: Result<T, String>) -> Outcome {
        if !self.sequence.is_current(ticket) {
            return Outcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                Outcome::Updated
            }
            Err(message) => {
                self.error = Some(if message.trim().is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                });
                Outcome::Failed
            }
        }
    }

    /// Replace the data directly (e.g. when another action already fetched it)
    pub fn set_data(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Back to the initial state; in-flight results will be ignored
    pub fn reset(&mut self) {
        self.data = None;
        self.loading = false;
        self.error = None;
        self.sequence.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_sets_loading_and_clears_error() {
        let mut res: Resource<u32> = Resource::new();
        let t = res.begin();
        res.complete(t, Err("nope".to_string()));
        assert_eq!(res.error(), Some("nope"));

        res.begin();
        assert!(res.is_loading());
        assert!(res.error().is_none());
    }

    #[test]
    fn test_success_sets_data() {
        let mut res = Resource::new();
        let t = res.begin();
        assert_eq!(res.complete(t, Ok(7)), Outcome::Updated);
        assert_eq!(res.data(), Some(&7));
        assert!(!res.is_loading());
        assert!(res.error().is_none());
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut res = Resource::new();
        let t = res.begin();
        res.complete(t, Ok(vec!["a"]));

        let t = res.begin();
        assert_eq!(res.complete(t, Err("HTTP 500: Internal Server Error".into())), Outcome::Failed);
        assert_eq!(res.data(), Some(&vec!["a"]));
        assert!(!res.is_loading());
        assert_eq!(res.error(), Some("HTTP 500: Internal Server Error"));
    }

    #[test]
    fn test_empty_error_message_gets_fallback() {
        let mut res: Resource<()> = Resource::new();
        let t = res.begin();
        res.complete(t, Err("  ".into()));
        assert_eq!(res.error(), Some(FALLBACK_ERROR));
    }

    #[test]
    fn test_older_response_is_stale() {
        let mut res = Resource::new();
        let first = res.begin();
        let second = res.begin();

        assert_eq!(res.complete(second, Ok("new")), Outcome::Updated);
        assert_eq!(res.complete(first, Ok("old")), Outcome::Stale);
        assert_eq!(res.data(), Some(&"new"));
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let mut res = Resource::new();
        let first = res.begin();
        let _second = res.begin();

        res.complete(first, Ok(1));
        assert!(res.is_loading());
        assert!(res.data().is_none());
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let mut res = Resource::new();
        let t = res.begin();
        res.reset();
        assert_eq!(res.complete(t, Ok(1)), Outcome::Stale);
        assert!(res.data().is_none());
        assert!(!res.is_loading());
    }

    #[test]
    fn test_begin_fresh_drops_data() {
        let mut res = Resource::new();
        let t = res.begin();
        res.complete(t, Ok(1));
        res.begin_fresh();
        assert!(res.data().is_none());
    }
}
