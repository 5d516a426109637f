//! Error types for user service calls.
//!
//! Every failing call returns exactly one [`Error`]. Callers tell the failure
//! kinds apart by matching on the variant:
//!
//! - [`Error::InvalidInput`] is raised before any request is sent.
//! - [`Error::Service`] carries a documented failure status and the decoded
//!   [`ErrorResponse`], if any.
//! - [`Error::UnexpectedStatus`] is a status the operation does not document.
//! - [`Error::Network`], [`Error::Cancelled`] and [`Error::DeadlineExceeded`]
//!   come from the round trip itself.

use crate::model::ErrorResponse;
use http::StatusCode;
use std::fmt;

/// The main error type for user service calls.
///
/// # Examples
///
/// ```no_run
/// use restuser::{Client, Context, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder().base_url("https://users.example.com")?.build()?;
///
/// match client.get_user(&Context::background(), "c3e11b46").await {
///     Ok(user) => println!("found {}", user.name),
///     Err(e) if e.is_not_found() => println!("no such user"),
///     Err(Error::Service(err)) => eprintln!("service error {}", err.status_code),
///     Err(e) if e.is_cancellation() => eprintln!("gave up waiting"),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required argument was missing or empty. No request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The service answered with one of the failure statuses documented for
    /// the operation.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The service answered with a status the operation does not document,
    /// e.g. a gateway error injected by a proxy.
    #[error("received unexpected status code {0}")]
    UnexpectedStatus(u16),

    /// The transport failed to complete the round trip.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The caller's cancellation token fired before the call completed.
    #[error("context canceled")]
    Cancelled,

    /// The caller's deadline passed before the call completed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// A success response carried a body that is not the expected payload.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// The request body could not be encoded as JSON.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// Invalid client configuration, e.g. a missing base URL or a bad header.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if the call was aborted because the context was
    /// cancelled or its deadline passed, including timeouts reported by the
    /// transport.
    pub fn is_cancellation(&self) -> bool {
        match self {
            Error::Cancelled | Error::DeadlineExceeded => true,
            Error::Network(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Returns `true` for a structured 404 from the service.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Service(e) if e.status_code == 404)
    }

    /// Returns `true` if the service answered with an undocumented status.
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, Error::UnexpectedStatus(_))
    }

    /// Returns the structured service error, if this is one.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Error::Service(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the HTTP status code the service answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Service(e) => Some(e.status_code),
            Error::UnexpectedStatus(code) => Some(*code),
            Error::DeserializationFailed { status, .. } => Some(status.as_u16()),
            _ => None,
        }
    }
}

/// A failure reported by the service: the status code plus the decoded
/// [`ErrorResponse`] body.
///
/// `response` is `None` when the body was empty or not an `ErrorResponse`.
/// Two values are equal when both the status and the decoded body are equal.
///
/// ```
/// use restuser::{ErrorResponse, ServiceError};
///
/// let a = ServiceError::new(404, Some(ErrorResponse::new("everything is wrong")));
/// let b = ServiceError::new(404, Some(ErrorResponse::new("everything is wrong")));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub status_code: u16,
    pub response: Option<ErrorResponse>,
}

impl ServiceError {
    pub fn new(status_code: u16, response: Option<ErrorResponse>) -> Self {
        Self {
            status_code,
            response,
        }
    }

    /// The message from the decoded body, if the service sent one.
    pub fn message(&self) -> Option<&str> {
        self.response.as_ref().map(|r| r.message.as_str())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) if !message.is_empty() => {
                write!(f, "user service error {}: {}", self.status_code, message)
            }
            _ => write!(f, "user service error {}", self.status_code),
        }
    }
}

impl std::error::Error for ServiceError {}

/// A specialized `Result` type for user service calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_message_is_exact() {
        let err = Error::UnexpectedStatus(502);
        assert_eq!(err.to_string(), "received unexpected status code 502");
        assert!(err.is_unexpected_status());
        assert!(err.service_error().is_none());
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn service_errors_compare_by_value() {
        let err = Error::from(ServiceError::new(
            404,
            Some(ErrorResponse::new("everything is wrong")),
        ));

        assert!(err.is_not_found());
        assert_eq!(
            err.service_error(),
            Some(&ServiceError::new(
                404,
                Some(ErrorResponse::new("everything is wrong"))
            ))
        );
        assert_ne!(
            err.service_error(),
            Some(&ServiceError::new(404, None))
        );
    }

    #[test]
    fn service_error_display() {
        let with_message = ServiceError::new(400, Some(ErrorResponse::new("bad name")));
        assert_eq!(with_message.to_string(), "user service error 400: bad name");

        let without = ServiceError::new(500, None);
        assert_eq!(without.to_string(), "user service error 500");
    }

    #[test]
    fn cancellation_predicate() {
        assert!(Error::Cancelled.is_cancellation());
        assert!(Error::DeadlineExceeded.is_cancellation());
        assert!(!Error::UnexpectedStatus(504).is_cancellation());
        assert!(!Error::InvalidInput("user is required".into()).is_cancellation());
    }
}
