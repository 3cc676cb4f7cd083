//! Domain-level error type.
//!
//! Raised when an operator action fails outside the banner flow: a Gateway
//! call behind a confirmed delete, or a form opened for a record that is not
//! loaded. The CLI adapter turns these into exit reports.

use std::fmt;

use super::ports::GatewayError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The Gateway refused the payload.
    InvalidRequest,
    /// The console's credentials were not accepted.
    Unauthorized,
    /// The signed-in operator may not perform this action.
    Forbidden,
    NotFound,
    /// The Gateway could not be reached or timed out.
    ServiceUnavailable,
    /// The Gateway answered with something the console cannot read.
    InternalError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is never blank; the code name stands in for an empty one.
///
/// # Examples
/// ```
/// use admin_console::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("course 42 is not loaded");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(Error::new(ErrorCode::Forbidden, "  ").message(), "forbidden");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.as_str().to_owned()
        } else {
            message
        };
        Self { code, message }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether repeating the action unchanged may succeed.
    pub fn is_retryable(&self) -> bool {
        self.code == ErrorCode::ServiceUnavailable
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<GatewayError> for Error {
    fn from(value: GatewayError) -> Self {
        let code = match value {
            GatewayError::Transport { .. } | GatewayError::Timeout { .. } => {
                ErrorCode::ServiceUnavailable
            }
            GatewayError::Unauthorized { .. } => ErrorCode::Unauthorized,
            GatewayError::Forbidden { .. } => ErrorCode::Forbidden,
            GatewayError::NotFound { .. } => ErrorCode::NotFound,
            GatewayError::Rejected { .. } => ErrorCode::InvalidRequest,
            GatewayError::Decode { .. } => ErrorCode::InternalError,
        };
        Self::new(code, value.to_string())
    }
}
