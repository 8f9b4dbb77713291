//! Input adapter.
//!
//! Raw UI events are reduced to an `InputEvent`; anything that does not map
//! to a direction is dropped by the session.

use serde::{Deserialize, Serialize};

use crate::core::Direction;

/// An input from the embedding UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A keyboard key name such as `"ArrowUp"`.
    Key(String),
    /// A recognised swipe gesture.
    Swipe(Direction),
}

impl InputEvent {
    pub fn key(name: impl Into<String>) -> Self {
        InputEvent::Key(name.into())
    }

    /// Direction this input asks for, if any.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        match self {
            InputEvent::Key(name) => Direction::from_key(name),
            InputEvent::Swipe(direction) => Some(*direction),
        }
    }
}

impl From<Direction> for InputEvent {
    fn from(direction: Direction) -> Self {
        InputEvent::Swipe(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(InputEvent::key("ArrowDown").direction(), Some(Direction::Down));
        assert_eq!(InputEvent::key("a").direction(), None);
        assert_eq!(InputEvent::key("Escape").direction(), None);
    }

    #[test]
    fn test_swipe_mapping() {
        assert_eq!(InputEvent::from(Direction::Left).direction(), Some(Direction::Left));
    }
}
