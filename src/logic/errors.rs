use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401
    Forbidden,    // HTTP 403
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    LocalFile,
    Other,
}

/// Classify a gateway error by status code or transport failure kind
pub fn classify_error(error: &ApiError) -> ErrorType {
    match error {
        ApiError::Transport(e) => {
            if e.is_timeout() {
                return ErrorType::Timeout;
            }
            if let Some(status) = e.status() {
                return classify_status(status.as_u16());
            }

            let chain = format_error_chain(e).to_lowercase();
            if chain.contains("connection refused") {
                ErrorType::ConnectionRefused
            } else if e.is_connect() || chain.contains("dns") || chain.contains("network") {
                ErrorType::NetworkError
            } else {
                ErrorType::Other
            }
        }
        ApiError::Server { status, .. } | ApiError::Http { status, .. } => classify_status(*status),
        ApiError::LocalFile { .. } => ErrorType::LocalFile,
        ApiError::Decode(_) => ErrorType::Other,
    }
}

fn classify_status(status: u16) -> ErrorType {
    match status {
        401 => ErrorType::Unauthorized,
        403 => ErrorType::Forbidden,
        404 => ErrorType::NotFound,
        500..=599 => ErrorType::ServerError,
        _ => ErrorType::Other,
    }
}

/// True when the session cookie was rejected
pub fn is_unauthorized(error: &ApiError) -> bool {
    classify_error(error) == ErrorType::Unauthorized
}

/// Message shown to the user in a view's error slot
///
/// This is the error's `Display`, so server messages reach the screen verbatim.
pub fn format_error_message(error: &ApiError) -> String {
    error.to_string()
}

/// Full source chain, joined for the debug log
///
/// Sources already repeated in their parent's message are skipped.
pub fn format_error_chain(error: &dyn std::error::Error) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();

    while let Some(err) = source {
        let text = err.to_string();
        if !parts.last().is_some_and(|prev| prev.ends_with(&text)) {
            parts.push(text);
        }
        source = err.source();
    }

    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn server(status: u16, message: &str) -> ApiError {
        ApiError::Server {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_classify_unauthorized() {
        let err = server(401, "Not authenticated");
        assert_eq!(classify_error(&err), ErrorType::Unauthorized);
        assert!(is_unauthorized(&err));
    }

    #[test]
    fn test_classify_status_without_body() {
        let err = ApiError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(classify_error(&err), ErrorType::ServerError);
        assert!(!is_unauthorized(&err));
    }

    #[test]
    fn test_classify_not_found_and_forbidden() {
        assert_eq!(classify_error(&server(404, "File not found")), ErrorType::NotFound);
        assert_eq!(classify_error(&server(403, "Only admins can share")), ErrorType::Forbidden);
        assert_eq!(classify_error(&server(422, "bad")), ErrorType::Other);
    }

    #[test]
    fn test_classify_local_file() {
        let err = ApiError::LocalFile {
            path: PathBuf::from("/nope"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(classify_error(&err), ErrorType::LocalFile);
    }

    #[test]
    fn test_format_uses_server_message_verbatim() {
        let err = server(400, "Drive not mounted");
        assert_eq!(format_error_message(&err), "Drive not mounted");
    }

    #[test]
    fn test_format_chain_includes_sources() {
        let err = ApiError::LocalFile {
            path: PathBuf::from("/tmp/a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(format_error_chain(&err), "/tmp/a.txt: denied");
    }
}
