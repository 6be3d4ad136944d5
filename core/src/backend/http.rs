//! HTTP Backend Implementation
//!
//! Transport for the finance Q&A service's REST API:
//! - `GET  /api/status` - readiness probe
//! - `POST /api/initialize` - load data and build the answer index
//! - `POST /api/ask` - answer a question, with evidentiary sources
//! - `GET  /api/sample-questions` - suggested prompts
//!
//! The service reports application errors as `success: false` JSON bodies,
//! also on 4xx/5xx responses, so classification reads the body rather than
//! the HTTP status: an undecodable body is `Malformed`, a decoded
//! `success: false` is `Rejected`, and connection failures or timeouts are
//! `Network`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::traits::{Answer, QaBackend, StatusReport};
use crate::config::ClientConfig;
use crate::error::{TransportError, DEFAULT_REJECTION_MESSAGE};
use crate::transcript::Source;

/// HTTP client for the Q&A backend
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    status_timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a new backend client
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::from_config(&ClientConfig {
            host: host.into(),
            port,
            ..ClientConfig::default()
        })
    }

    /// Create from a [`ClientConfig`]
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url(),
            status_timeout: config.status_timeout,
            http_client: reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(&ClientConfig::from_env())
    }

    /// Get the base URL
    fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get status endpoint URL
    fn status_url(&self) -> String {
        format!("{}/api/status", self.base_url)
    }

    /// Get initialize endpoint URL
    fn initialize_url(&self) -> String {
        format!("{}/api/initialize", self.base_url)
    }

    /// Get ask endpoint URL
    fn ask_url(&self) -> String {
        format!("{}/api/ask", self.base_url)
    }

    /// Get sample questions endpoint URL
    fn sample_questions_url(&self) -> String {
        format!("{}/api/sample-questions", self.base_url)
    }

    /// Read a response body and decode it into the expected wire shape
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl QaBackend for HttpBackend {
    fn name(&self) -> &str {
        "finance-rag-http"
    }

    async fn status(&self) -> Result<StatusReport, TransportError> {
        let response = self
            .http_client
            .get(self.status_url())
            .timeout(self.status_timeout)
            .send()
            .await?;

        let wire: StatusWire = Self::decode(response).await?;
        Ok(StatusReport {
            initialized: wire.initialized,
        })
    }

    async fn initialize(&self) -> Result<(), TransportError> {
        let response = self
            .http_client
            .post(self.initialize_url())
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let wire: InitializeWire = Self::decode(response).await?;
        if wire.success {
            Ok(())
        } else {
            Err(TransportError::Rejected {
                message: wire
                    .message
                    .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
            })
        }
    }

    async fn ask(&self, question: &str) -> Result<Answer, TransportError> {
        let response = self
            .http_client
            .post(self.ask_url())
            .json(&serde_json::json!({ "question": question }))
            .send()
            .await?;

        let wire: AskWire = Self::decode(response).await?;
        if !wire.success {
            return Err(TransportError::Rejected {
                message: wire
                    .message
                    .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
            });
        }

        let text = wire.answer.ok_or_else(|| {
            TransportError::Malformed("successful ask response without an answer".to_string())
        })?;

        // Absent source list is treated as empty
        let sources = wire
            .sources
            .unwrap_or_default()
            .into_iter()
            .map(Source::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Answer { text, sources })
    }

    async fn sample_questions(&self) -> Result<Vec<String>, TransportError> {
        let response = self
            .http_client
            .get(self.sample_questions_url())
            .timeout(self.status_timeout)
            .send()
            .await?;

        let wire: SampleQuestionsWire = Self::decode(response).await?;
        if wire.success {
            Ok(wire.questions.unwrap_or_default())
        } else {
            Err(TransportError::Rejected {
                message: wire
                    .message
                    .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
            })
        }
    }
}

// ============================================================================
// Wire shapes
// ============================================================================
//
// Responses carry extra fields (timestamps, status echoes, question echoes);
// only the fields below are contractual and the rest are ignored.

#[derive(Debug, Deserialize)]
struct StatusWire {
    initialized: bool,
}

#[derive(Debug, Deserialize)]
struct InitializeWire {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AskWire {
    success: bool,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    sources: Option<Vec<SourceWire>>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SampleQuestionsWire {
    success: bool,
    #[serde(default)]
    questions: Option<Vec<String>>,
    #[serde(default)]
    message: Option<String>,
}

/// Wire shape of a source: exactly one of `ticker`/`coin` must be present
#[derive(Debug, Deserialize)]
struct SourceWire {
    #[serde(default)]
    ticker: Option<String>,
    #[serde(default)]
    coin: Option<String>,
    #[serde(default)]
    price_change_pct: Option<f64>,
}

impl TryFrom<SourceWire> for Source {
    type Error = TransportError;

    fn try_from(wire: SourceWire) -> Result<Self, Self::Error> {
        match (wire.ticker, wire.coin) {
            (Some(ticker), None) => Ok(Source::equity(ticker, wire.price_change_pct)),
            (None, Some(coin)) => Ok(Source::crypto(coin, wire.price_change_pct)),
            (Some(_), Some(_)) => Err(TransportError::Malformed(
                "source has both ticker and coin".to_string(),
            )),
            (None, None) => Err(TransportError::Malformed(
                "source has neither ticker nor coin".to_string(),
            )),
        }
    }
}
