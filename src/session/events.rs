//! Pending score events for the render layer.
//!
//! Each scoring move enqueues one event. The renderer animates it and then
//! acknowledges it by token; only that event is removed, so events queued
//! behind it survive.

use serde::{Deserialize, Serialize};

/// Points gained by a single move, waiting to be animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub amount: u64,
    pub token: u64,
}

/// Ordered queue of unacknowledged score events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvents {
    pending: Vec<ScoreEvent>,
    next_token: u64,
}

impl ScoreEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event and return its token. Tokens are never reused.
    pub fn push(&mut self, amount: u64) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.pending.push(ScoreEvent { amount, token });
        token
    }

    /// Remove the event with `token`. Returns false if it was not pending.
    pub fn acknowledge(&mut self, token: u64) -> bool {
        match self.pending.iter().position(|e| e.token == token) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn pending(&self) -> &[ScoreEvent] {
        &self.pending
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending event. The token counter keeps running.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledge_removes_only_that_event() {
        let mut events = ScoreEvents::new();
        let a = events.push(4);
        let b = events.push(8);
        let c = events.push(16);

        assert!(events.acknowledge(b));
        let remaining: Vec<_> = events.pending().iter().map(|e| e.token).collect();
        assert_eq!(remaining, vec![a, c]);

        assert!(!events.acknowledge(b));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_tokens_survive_clear() {
        let mut events = ScoreEvents::new();
        let first = events.push(4);
        events.clear();
        let second = events.push(4);

        assert!(events.len() == 1 && !events.is_empty());
        assert!(second > first);
    }
}
