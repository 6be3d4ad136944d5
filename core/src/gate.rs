//! Single-Flight Request Gates
//!
//! Per-channel mutual exclusion for in-flight backend operations. Each
//! channel (`init`, `ask`) holds one busy flag; a second acquisition on the
//! same channel while one is outstanding fails fast rather than queuing or
//! blocking. Release is tied to permit drop, so it happens on every exit
//! path of the guarded operation.

use std::sync::atomic::{AtomicBool, Ordering};

/// A named class of operation subject to its own gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Backend initialization (and re-initialization after failure)
    Init,
    /// Question/answer exchange
    Ask,
}

/// Per-channel single-flight guard
#[derive(Debug, Default)]
pub struct RequestGate {
    init_busy: AtomicBool,
    ask_busy: AtomicBool,
}

impl RequestGate {
    /// Create a gate with both channels idle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to acquire the gate for a channel.
    ///
    /// Returns `None` if an operation on that channel is already in flight.
    /// The returned permit releases the channel when dropped.
    pub fn acquire(&self, channel: Channel) -> Option<GatePermit<'_>> {
        let flag = self.flag(channel);
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(GatePermit { flag, channel })
        } else {
            None
        }
    }

    /// Whether a channel currently has an operation in flight
    pub fn is_busy(&self, channel: Channel) -> bool {
        self.flag(channel).load(Ordering::Acquire)
    }

    fn flag(&self, channel: Channel) -> &AtomicBool {
        match channel {
            Channel::Init => &self.init_busy,
            Channel::Ask => &self.ask_busy,
        }
    }
}

/// Held for the duration of one in-flight operation on a channel
#[derive(Debug)]
pub struct GatePermit<'a> {
    flag: &'a AtomicBool,
    channel: Channel,
}

impl GatePermit<'_> {
    /// The channel this permit holds
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_release() {
        let gate = RequestGate::new();
        assert!(!gate.is_busy(Channel::Ask));

        let permit = gate.acquire(Channel::Ask).unwrap();
        assert_eq!(permit.channel(), Channel::Ask);
        assert!(gate.is_busy(Channel::Ask));

        drop(permit);
        assert!(!gate.is_busy(Channel::Ask));
    }

    #[test]
    fn test_second_acquire_fails_while_held() {
        let gate = RequestGate::new();
        let _held = gate.acquire(Channel::Init).unwrap();
        assert!(gate.acquire(Channel::Init).is_none());
    }

    #[test]
    fn test_channels_are_independent() {
        let gate = RequestGate::new();
        let _init = gate.acquire(Channel::Init).unwrap();
        // The ask channel is unaffected by a held init permit
        let ask = gate.acquire(Channel::Ask);
        assert!(ask.is_some());
    }

    #[test]
    fn test_reacquire_after_release() {
        let gate = RequestGate::new();
        drop(gate.acquire(Channel::Ask).unwrap());
        assert!(gate.acquire(Channel::Ask).is_some());
    }
}
