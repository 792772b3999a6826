use thiserror::Error;

/// Maximum characters of a response body kept in a [`StsError::Decode`].
pub(crate) const MAX_ERROR_BODY_CHARS: usize = 200;

/// Structured rejection returned by the STS service in the response body.
///
/// Built from the `{RequestId, HostId, Code, Message}` error shape. The HTTP
/// status code is recorded as received; it is not used to decide that the
/// exchange failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("service error (HTTP {status_code}, RequestId: {request_id}): [{code}] {message}")]
pub struct ServiceError {
    /// Machine-readable error code, e.g. `SignatureDoesNotMatch`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// The response body exactly as received.
    pub raw_message: String,
    /// HTTP status code of the response carrying this error.
    pub status_code: u16,
    /// Request identifier for support correlation.
    pub request_id: String,
    /// Host that served the request.
    pub host_id: Option<String>,
    /// Diagnosis URL suggested by the service.
    pub recommend: Option<String>,
}

/// Errors that can occur when requesting temporary credentials.
#[derive(Debug, Error)]
pub enum StsError {
    /// The request never produced a response (DNS, connect, TLS, timeout, bad URL).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body matched neither the success nor the error shape.
    #[error("decode error (HTTP {status}): {reason}")]
    Decode {
        status: u16,
        reason: String,
        body: String,
    },

    /// The service rejected the request.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Credential or role reference could not be resolved.
    #[error("credential error: {0}")]
    Credential(String),

    /// HTTP client could not be built from the configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl StsError {
    pub(crate) fn decode(status: u16, reason: impl Into<String>, body: &str) -> Self {
        StsError::Decode {
            status,
            reason: reason.into(),
            body: truncate_str(body, MAX_ERROR_BODY_CHARS).to_string(),
        }
    }

    /// Returns `true` if a later, independent attempt might succeed.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            StsError::Transport(e) => e.is_timeout() || e.is_connect(),
            StsError::Service(err) => {
                if err.code == "Throttling" || err.code == "ServiceUnavailable" {
                    return true;
                }
                err.code.starts_with("Internal") || err.status_code >= 500
            }
            StsError::Decode { status, .. } => *status >= 500,
            StsError::Credential(_) | StsError::Config(_) => false,
        }
    }

    /// Returns the request ID if this is a service error.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            StsError::Service(err) => Some(&err.request_id),
            _ => None,
        }
    }

    /// Returns the error code if this is a service error.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            StsError::Service(err) => Some(&err.code),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StsError::Service(err) => Some(err.status_code),
            StsError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A specialized Result type for STS operations.
pub type Result<T> = std::result::Result<T, StsError>;

/// Truncates a string to at most `max_chars` characters on a valid UTF-8 boundary.
pub(crate) fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
