//! Coordinate types for the garden grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a tile on the garden grid.
///
/// Coordinates are signed so that hosts can pass raw cursor-derived values;
/// the grid itself rejects anything outside `0..width` / `0..height`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct TilePos {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl TilePos {
    /// Creates a new tile position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by the given deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance to another tile (square rings around a centre).
    #[must_use]
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl From<(i32, i32)> for TilePos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev() {
        let a = TilePos::new(10, 7);
        assert_eq!(a.chebyshev(TilePos::new(12, 5)), 2);
        assert_eq!(a.chebyshev(TilePos::new(10, 7)), 0);
        assert_eq!(a.chebyshev(TilePos::new(4, 8)), 6);
    }

    #[test]
    fn test_from_tuple() {
        assert_eq!(TilePos::from((3, -1)), TilePos::new(3, -1));
        assert_eq!(TilePos::new(3, -1).to_string(), "(3, -1)");
    }
}
