//! Error Taxonomy and Classification
//!
//! Every failure a caller can see is normalized into one of a small set of
//! [`ErrorKind`] values before it is surfaced. Transport-level failures
//! start life as a [`TransportError`] at the HTTP boundary; the `From`
//! conversion below is the classifier. Precondition failures (`NotReady`,
//! `EmptyInput`, `Busy`) are produced inside the controller and never reach
//! the transport at all.

use thiserror::Error;

/// A raw failure from the transport layer
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection failure, timeout, or other transport-level error
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with `success: false`
    #[error("backend rejected the request: {message}")]
    Rejected {
        /// The backend-supplied reason
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Classified failure surfaced to callers of the session controller
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport or connection failure
    #[error("could not reach the backend")]
    Network,

    /// The backend explicitly declined, with its own message
    #[error("backend rejected the request: {0}")]
    BackendRejected(String),

    /// The response violated the wire contract
    #[error("backend returned a malformed response")]
    Malformed,

    /// Asked before the session was ready
    #[error("session is not ready")]
    NotReady,

    /// The question was blank after trimming
    #[error("question is empty")]
    EmptyInput,

    /// An operation on the same channel is already in flight
    #[error("an operation is already in progress")]
    Busy,
}

impl ErrorKind {
    /// Whether this failure was detected locally, before any network call
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NotReady | Self::EmptyInput | Self::Busy)
    }
}

impl From<TransportError> for ErrorKind {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(_) => Self::Network,
            TransportError::Rejected { message } => Self::BackendRejected(message),
            TransportError::Malformed(_) => Self::Malformed,
        }
    }
}

/// Fallback message when the backend rejects without supplying one
pub(crate) const DEFAULT_REJECTION_MESSAGE: &str = "backend reported a failure";
