//! Move directions.
//!
//! Each direction maps to a unit offset in `(col, row)` terms describing which
//! neighbouring cell a tile advances toward.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseDirectionError;

/// A swipe or arrow-key direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit offset as `(d_col, d_row)`.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Map a keyboard key name to a direction.
    ///
    /// Accepts arrow-key names in any case (`ArrowUp`, `arrowdown`, ...).
    /// Anything else returns `None` and should be ignored by the caller.
    ///
    /// ```
    /// use tile_merge::core::Direction;
    ///
    /// assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
    /// assert_eq!(Direction::from_key("Enter"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let lower = key.to_ascii_lowercase();
        let start = lower.find("arrow")?;
        let rest = &lower[start + "arrow".len()..];
        Self::ALL.into_iter().find(|dir| rest.starts_with(dir.name()))
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|dir| dir.name() == lower)
            .or_else(|| Self::from_key(&lower))
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(Direction::Up.offset(), (0, -1));
        assert_eq!(Direction::Down.offset(), (0, 1));
        assert_eq!(Direction::Left.offset(), (-1, 0));
        assert_eq!(Direction::Right.offset(), (1, 0));
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("arrowright"), Some(Direction::Right));
        assert_eq!(Direction::from_key("ARROWDOWN"), Some(Direction::Down));
        assert_eq!(Direction::from_key("up"), None);
        assert_eq!(Direction::from_key("Space"), None);
        assert_eq!(Direction::from_key("Arrow"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!(" Down ".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("ArrowUp".parse::<Direction>().unwrap(), Direction::Up);

        let err = "sideways".parse::<Direction>().unwrap_err();
        assert_eq!(err.to_string(), "unrecognized direction: sideways");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Direction::Right).unwrap();
        assert_eq!(json, "\"right\"");
        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Direction::Right);
    }
}
