//! Finchat Core - Headless Session Orchestration
//!
//! This crate drives a remote finance question-answering backend without
//! knowing anything about rendering. It can sit behind a terminal client, a
//! web frontend, or a test harness.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Renderer                      │
//! │   (terminal client, web page, test harness)  │
//! └───────────────┬──────────────▲───────────────┘
//!        operations │            │ results + SessionEvent
//! ┌───────────────▼──────────────┴───────────────┐
//! │             SessionController                 │
//! │  ┌────────────┐ ┌───────────┐ ┌────────────┐ │
//! │  │ Transcript │ │RequestGate│ │ ErrorKind  │ │
//! │  └────────────┘ └───────────┘ └────────────┘ │
//! └───────────────────────┬──────────────────────┘
//!                         │ QaBackend trait
//! ┌───────────────────────▼──────────────────────┐
//! │          HttpBackend (reqwest/JSON)           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`SessionController`]: the state machine that owns a session
//! - [`Transcript`] / [`Turn`]: the append-only conversation log
//! - [`QaBackend`] / [`HttpBackend`]: the transport seam
//! - [`ErrorKind`]: every failure a caller can see, classified
//!
//! # Quick Start
//!
//! ```ignore
//! use finchat_core::{ClientConfig, HttpBackend, SessionController};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::channel(100);
//!     let backend = HttpBackend::from_config(&ClientConfig::from_env());
//!     let controller = SessionController::new(backend, tx);
//!
//!     if !controller.check_status().await.unwrap_or(false) {
//!         controller.initialize().await.unwrap();
//!     }
//!
//!     let answer = controller.ask("What is the AAPL trend?").await.unwrap();
//!     println!("{}", answer.content);
//! }
//! ```
//!
//! # No Renderer Dependencies
//!
//! This crate has **zero** dependencies on any UI framework. It is pure
//! session logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod transcript;

// Re-exports for convenience
pub use backend::{Answer, HttpBackend, QaBackend, StatusReport};
pub use config::ClientConfig;
pub use controller::{SessionController, SessionEvent, SessionState};
pub use error::{ErrorKind, TransportError};
pub use gate::{Channel, GatePermit, RequestGate};
pub use transcript::{AssetKind, Role, Source, Transcript, Turn};
