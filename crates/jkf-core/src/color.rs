//! Player color representation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The two sides of a shogi game.
///
/// `Black` is the first player (sente, 先手), `White` the second (gote, 後手).
/// In handicap games the handicap-giving side (上手) plays `White`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Color {
    #[default]
    Black = 0,
    White = 1,
}

impl Color {
    /// Both colors in index order.
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Returns the index (0 for Black, 1 for White).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a color from its wire index.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Color::Black),
            1 => Some(Color::White),
            _ => None,
        }
    }

    /// Returns the color to move at `ply` (1-based) when `self` moves first.
    #[inline]
    pub const fn at_ply(self, ply: usize) -> Self {
        if ply % 2 == 1 {
            self
        } else {
            self.opposite()
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = u8::deserialize(deserializer)?;
        Color::from_index(index)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color {index}")))
    }
}
