//! Board square representation.

use crate::CodeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A square on the shogi board.
///
/// `x` is the file (1-9, counted from Black's right) and `y` the rank
/// (1-9, counted from White's side). Serialized as `{"x": 7, "y": 6}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

#[derive(Deserialize)]
struct RawSquare {
    x: u8,
    y: u8,
}

impl TryFrom<RawSquare> for Square {
    type Error = CodeError;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        Square::new(raw.x, raw.y).ok_or(CodeError::SquareOutOfRange(raw.x, raw.y))
    }
}

impl Square {
    /// Creates a square, returning `None` when either coordinate is outside 1-9.
    #[inline]
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x >= 1 && x <= 9 && y >= 1 && y <= 9 {
            Some(Square { x, y })
        } else {
            None
        }
    }

    /// Returns the zero-based `(file, rank)` index pair used by [`crate::Board`].
    #[inline]
    pub const fn index(self) -> (usize, usize) {
        (self.x as usize - 1, self.y as usize - 1)
    }

    /// Returns the two-digit CSA form, e.g. `"76"`.
    pub fn to_digits(self) -> String {
        format!("{}{}", self.x, self.y)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}{})", self.x, self.y)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.x, self.y)
    }
}
