//! Transcript Management
//!
//! The transcript is the ordered record of one conversation: user questions
//! and assistant answers, in the order they happened. It is append-only —
//! once a turn is in, it is never edited, reordered, or removed — because
//! insertion order *is* the displayed conversation order.
//!
//! # Design Philosophy
//!
//! The controller appends the user turn before the network call returns, so
//! the transcript reflects user intent even when the answer never arrives.
//! A failed question therefore shows up as a user turn with no assistant
//! turn after it; the renderer decides how to paint that gap.

use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// A question typed by the user
    User,
    /// An answer from the backend
    Assistant,
}

/// What kind of asset a source refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    /// A stock ticker (e.g. "AAPL", "THYAO")
    Equity,
    /// A crypto asset identifier (e.g. "bitcoin")
    Crypto,
}

/// An evidentiary source attached to an assistant answer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Asset class of the source
    pub kind: AssetKind,
    /// Ticker or coin identifier
    pub symbol: String,
    /// Price change over the backend's lookback window, in percent
    pub price_change_pct: Option<f64>,
}

impl Source {
    /// Create an equity source
    pub fn equity(symbol: impl Into<String>, price_change_pct: Option<f64>) -> Self {
        Self {
            kind: AssetKind::Equity,
            symbol: symbol.into(),
            price_change_pct,
        }
    }

    /// Create a crypto source
    pub fn crypto(symbol: impl Into<String>, price_change_pct: Option<f64>) -> Self {
        Self {
            kind: AssetKind::Crypto,
            symbol: symbol.into(),
            price_change_pct,
        }
    }
}

/// One message in the conversation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Who sent this turn
    pub role: Role,
    /// The question or answer text
    pub content: String,
    /// Sources backing the answer; always empty for user turns
    pub sources: Vec<Source>,
    /// When the turn was appended (Unix timestamp ms)
    pub occurred_at: u64,
}

impl Turn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
            occurred_at: now_ms(),
        }
    }

    /// Create an assistant turn with its sources
    pub fn assistant(content: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sources,
            occurred_at: now_ms(),
        }
    }
}

/// Append-only, order-preserving conversation log
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. O(1), infallible, preserves insertion order.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns, oldest first
    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recent turn, if any
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript is empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Get current timestamp in milliseconds
pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("first"));
        transcript.append(Turn::assistant("second", Vec::new()));
        transcript.append(Turn::user("third"));

        let contents: Vec<_> = transcript.all().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(transcript.len(), 3);
        assert!(!transcript.is_empty());
    }

    #[test]
    fn test_user_turn_has_no_sources() {
        let turn = Turn::user("What happened to AAPL?");
        assert_eq!(turn.role, Role::User);
        assert!(turn.sources.is_empty());
        assert!(turn.occurred_at > 0);
    }

    #[test]
    fn test_assistant_turn_carries_sources() {
        let turn = Turn::assistant(
            "Up 3%",
            vec![Source::equity("AAPL", Some(3.0)), Source::crypto("bitcoin", None)],
        );
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.sources.len(), 2);
        assert_eq!(turn.sources[0].kind, AssetKind::Equity);
        assert_eq!(turn.sources[0].symbol, "AAPL");
        assert_eq!(turn.sources[1].kind, AssetKind::Crypto);
        assert_eq!(turn.sources[1].price_change_pct, None);
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert!(transcript.last().is_none());
        assert_eq!(transcript.all().len(), 0);
    }
}
