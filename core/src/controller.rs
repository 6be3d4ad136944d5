//! Session Controller - The Orchestration Core
//!
//! The controller is the one place session state changes. It tracks backend
//! readiness, enforces single-flight request discipline per channel, owns
//! the append-only transcript, and classifies every failure before a caller
//! sees it.
//!
//! # Design Philosophy
//!
//! The controller is renderer-agnostic. It doesn't know or care whether a
//! terminal, a web page, or a test harness is driving it. Callers invoke
//! operations and receive tagged results; a renderer may additionally
//! subscribe to [`SessionEvent`]s for passive updates. All methods take
//! `&self`, so a single controller instance can be shared behind `Arc` —
//! the gates decide what may actually run concurrently.
//!
//! # State Machine
//!
//! ```text
//!                   initialize()            ask()
//! Uninitialized ──► Initializing ──► Ready ◄────► Ready
//!       │                 │            ▲
//!       │ status probe    │ failure    │ initialize()
//!       │ (initialized)   ▼            │
//!       └───────────────► Failed ──────┘
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::backend::QaBackend;
use crate::error::ErrorKind;
use crate::gate::{Channel, RequestGate};
use crate::transcript::{Transcript, Turn};

/// Session readiness states
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No contact with the backend yet
    Uninitialized,
    /// An initialize request is in flight
    Initializing,
    /// Backend is ready; questions may be asked
    Ready,
    /// Initialization failed; retryable via `initialize()`
    Failed,
}

impl SessionState {
    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Uninitialized => "Not started",
            Self::Initializing => "Starting up...",
            Self::Ready => "Ready",
            Self::Failed => "Startup failed",
        }
    }
}

/// Events pushed to a subscribed renderer
///
/// These duplicate what the operation results already carry; a renderer
/// that drives the controller directly can ignore the channel entirely.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// The session state changed
    State {
        /// The new state
        state: SessionState,
    },
    /// A turn was appended to the transcript
    Turn {
        /// The appended turn
        turn: Turn,
    },
    /// A backend or transport failure was classified and surfaced
    Error {
        /// The classified failure
        kind: ErrorKind,
    },
}

/// The session controller - headless orchestration core
pub struct SessionController<B: QaBackend> {
    /// Backend transport
    backend: Arc<B>,
    /// Current readiness state
    state: Mutex<SessionState>,
    /// Conversation transcript
    transcript: Mutex<Transcript>,
    /// Single-flight gates for the init and ask channels
    gate: RequestGate,
    /// Channel to push events to the renderer
    tx: mpsc::Sender<SessionEvent>,
}

impl<B: QaBackend> SessionController<B> {
    /// Create a new controller in the `Uninitialized` state
    pub fn new(backend: B, tx: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            backend: Arc::new(backend),
            state: Mutex::new(SessionState::Uninitialized),
            transcript: Mutex::new(Transcript::new()),
            gate: RequestGate::new(),
            tx,
        }
    }

    /// Get the current session state
    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Access the underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Check if the session is ready for questions
    pub fn is_ready(&self) -> bool {
        self.state() == SessionState::Ready
    }

    /// Snapshot of the transcript, oldest turn first
    pub fn turns(&self) -> Vec<Turn> {
        self.transcript.lock().all().to_vec()
    }

    /// Probe backend readiness without initializing
    ///
    /// A backend that reports itself initialized moves an `Uninitialized`
    /// session straight to `Ready`, skipping `Initializing`. Probe failures
    /// are surfaced but never change state.
    pub async fn check_status(&self) -> Result<bool, ErrorKind> {
        match self.backend.status().await {
            Ok(report) => {
                if report.initialized && self.state() == SessionState::Uninitialized {
                    self.set_state(SessionState::Ready).await;
                }
                Ok(report.initialized)
            }
            Err(e) => {
                let kind = ErrorKind::from(e);
                tracing::warn!(backend = self.backend.name(), error = %kind, "Status probe failed");
                self.emit_error(kind.clone()).await;
                Err(kind)
            }
        }
    }

    /// Bring the backend online
    ///
    /// Returns success immediately, with no network call, if the session is
    /// already `Ready`. Fails with `Busy` if an initialize is already in
    /// flight. On backend rejection or transport failure the session moves
    /// to `Failed` and stays retryable.
    pub async fn initialize(&self) -> Result<(), ErrorKind> {
        if self.state() == SessionState::Ready {
            return Ok(());
        }

        let _permit = self.gate.acquire(Channel::Init).ok_or(ErrorKind::Busy)?;
        self.set_state(SessionState::Initializing).await;

        match self.backend.initialize().await {
            Ok(()) => {
                tracing::info!(backend = self.backend.name(), "Backend initialized");
                self.set_state(SessionState::Ready).await;
                Ok(())
            }
            Err(e) => {
                let kind = ErrorKind::from(e);
                tracing::warn!(error = %kind, "Initialization failed");
                self.set_state(SessionState::Failed).await;
                self.emit_error(kind.clone()).await;
                Err(kind)
            }
        }
    }

    /// Ask a question and record the exchange in the transcript
    ///
    /// The user turn is appended before the network call returns, so the
    /// transcript reflects user intent even when the answer fails. On
    /// success the assistant turn is appended and returned; on failure the
    /// user turn stays as-is, no assistant turn is appended, and the state
    /// remains `Ready`.
    pub async fn ask(&self, question: &str) -> Result<Turn, ErrorKind> {
        if self.state() != SessionState::Ready {
            return Err(ErrorKind::NotReady);
        }

        let question = question.trim();
        if question.is_empty() {
            return Err(ErrorKind::EmptyInput);
        }

        // Held until every exit path below; released by drop
        let _permit = self.gate.acquire(Channel::Ask).ok_or(ErrorKind::Busy)?;

        self.append_turn(Turn::user(question)).await;

        match self.backend.ask(question).await {
            Ok(answer) => {
                let turn = Turn::assistant(answer.text, answer.sources);
                self.append_turn(turn.clone()).await;
                Ok(turn)
            }
            Err(e) => {
                let kind = ErrorKind::from(e);
                tracing::warn!(error = %kind, "Question failed");
                self.emit_error(kind.clone()).await;
                Err(kind)
            }
        }
    }

    /// Fetch the backend's suggested sample questions
    ///
    /// Non-critical: failures are logged and returned but never change the
    /// session state.
    pub async fn sample_questions(&self) -> Result<Vec<String>, ErrorKind> {
        match self.backend.sample_questions().await {
            Ok(questions) => Ok(questions),
            Err(e) => {
                let kind = ErrorKind::from(e);
                tracing::warn!(error = %kind, "Could not fetch sample questions");
                Err(kind)
            }
        }
    }

    /// Set state and notify the renderer
    async fn set_state(&self, state: SessionState) {
        *self.state.lock() = state;
        self.send(SessionEvent::State { state }).await;
    }

    /// Append a turn and notify the renderer
    async fn append_turn(&self, turn: Turn) {
        self.transcript.lock().append(turn.clone());
        self.send(SessionEvent::Turn { turn }).await;
    }

    /// Surface a classified failure to the renderer
    async fn emit_error(&self, kind: ErrorKind) {
        self.send(SessionEvent::Error { kind }).await;
    }

    /// Send an event to the renderer channel
    async fn send(&self, event: SessionEvent) {
        if let Err(e) = self.tx.send(event).await {
            tracing::warn!("Failed to send event to renderer: {}", e);
        }
    }
}
