//! Q&A Backend Trait
//!
//! Trait definition for the question-answering transport. The abstraction
//! keeps the session controller independent of how the exchange actually
//! happens — the real client speaks HTTP/JSON, tests substitute a scripted
//! mock.
//!
//! All methods return a [`TransportError`] on failure; a structured
//! `success: false` payload is reported as [`TransportError::Rejected`] so
//! the controller never has to look at wire flags.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::transcript::Source;

/// Backend readiness as reported by the status probe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusReport {
    /// Whether the backend has finished initializing
    pub initialized: bool,
}

/// A successful answer to a question
#[derive(Clone, Debug, PartialEq)]
pub struct Answer {
    /// The answer text
    pub text: String,
    /// Sources backing the answer; empty when the backend attached none
    pub sources: Vec<Source>,
}

/// Q&A backend transport
///
/// Implement this trait to connect the controller to a backend.
#[async_trait]
pub trait QaBackend: Send + Sync {
    /// Get the backend name (for logging)
    fn name(&self) -> &str;

    /// Probe whether the backend is initialized
    async fn status(&self) -> Result<StatusReport, TransportError>;

    /// Ask the backend to initialize (load data, build indexes)
    ///
    /// Returns `Ok(())` only when the backend reports success.
    async fn initialize(&self) -> Result<(), TransportError>;

    /// Send a question and wait for the complete answer
    async fn ask(&self, question: &str) -> Result<Answer, TransportError>;

    /// Fetch the backend's suggested sample questions
    async fn sample_questions(&self) -> Result<Vec<String>, TransportError>;
}
