//! Client-side checks for the share form

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";

/// Per-field validation messages; empty when the form may be submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareFormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
}

impl ShareFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Loose `local@domain.tld` shape check
///
/// # Examples
/// ```
/// use cloudtui::logic::validation::is_valid_email;
///
/// assert!(is_valid_email("ada@example.com"));
/// assert!(!is_valid_email("ada@example"));
/// assert!(!is_valid_email("ada example@x.io"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn validate_share_form(name: &str, email: &str) -> ShareFormErrors {
    let name = if name.trim().is_empty() {
        Some(NAME_REQUIRED)
    } else {
        None
    };

    let email = email.trim();
    let email = if email.is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !is_valid_email(email) {
        Some(EMAIL_INVALID)
    } else {
        None
    };

    ShareFormErrors { name, email }
}
