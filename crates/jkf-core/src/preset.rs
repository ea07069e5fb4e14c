//! Named starting positions.

use crate::{CodeError, Color};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A standard even or handicap starting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    #[serde(rename = "HIRATE")]
    Hirate,
    #[serde(rename = "KY")]
    Lance,
    #[serde(rename = "KY_R")]
    RightLance,
    #[serde(rename = "KA")]
    Bishop,
    #[serde(rename = "HI")]
    Rook,
    #[serde(rename = "HIKY")]
    RookLance,
    #[serde(rename = "2")]
    TwoPiece,
    #[serde(rename = "3")]
    ThreePiece,
    #[serde(rename = "4")]
    FourPiece,
    #[serde(rename = "5")]
    FivePiece,
    #[serde(rename = "5_L")]
    LeftFivePiece,
    #[serde(rename = "6")]
    SixPiece,
    #[serde(rename = "8")]
    EightPiece,
    #[serde(rename = "10")]
    TenPiece,
    /// An explicit position carried in [`crate::InitialData`].
    #[serde(rename = "OTHER")]
    Other,
}

impl Preset {
    /// The fourteen named presets (everything but [`Preset::Other`]).
    pub const NAMED: [Preset; 14] = [
        Preset::Hirate,
        Preset::Lance,
        Preset::RightLance,
        Preset::Bishop,
        Preset::Rook,
        Preset::RookLance,
        Preset::TwoPiece,
        Preset::ThreePiece,
        Preset::FourPiece,
        Preset::FivePiece,
        Preset::LeftFivePiece,
        Preset::SixPiece,
        Preset::EightPiece,
        Preset::TenPiece,
    ];

    /// Returns the wire code.
    pub const fn code(self) -> &'static str {
        match self {
            Preset::Hirate => "HIRATE",
            Preset::Lance => "KY",
            Preset::RightLance => "KY_R",
            Preset::Bishop => "KA",
            Preset::Rook => "HI",
            Preset::RookLance => "HIKY",
            Preset::TwoPiece => "2",
            Preset::ThreePiece => "3",
            Preset::FourPiece => "4",
            Preset::FivePiece => "5",
            Preset::LeftFivePiece => "5_L",
            Preset::SixPiece => "6",
            Preset::EightPiece => "8",
            Preset::TenPiece => "10",
            Preset::Other => "OTHER",
        }
    }

    /// Parses a wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        Preset::NAMED
            .into_iter()
            .chain([Preset::Other])
            .find(|p| p.code() == code)
    }

    /// The side that moves first when no explicit color is recorded.
    ///
    /// In handicap games the handicap-giving side (上手) moves first.
    pub const fn default_color(self) -> Color {
        match self {
            Preset::Hirate | Preset::Other => Color::Black,
            _ => Color::White,
        }
    }
}

impl FromStr for Preset {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::from_code(s).ok_or_else(|| CodeError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
