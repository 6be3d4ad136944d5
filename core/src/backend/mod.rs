//! Backend Transport
//!
//! Abstracted access to the question-answering backend through a common
//! trait interface, with an HTTP/JSON implementation for the real service.

mod http;
mod traits;

pub use http::HttpBackend;
pub use traits::{Answer, QaBackend, StatusReport};
