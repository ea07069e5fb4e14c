//! Shogi piece kinds and their two-letter codes.

use crate::CodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fourteen piece kinds, plain and promoted.
///
/// Serialized as the two-letter CSA code (`"FU"`, `"NY"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Kind {
    Fu,
    Ky,
    Ke,
    Gi,
    Ki,
    Ka,
    Hi,
    Ou,
    To,
    Ny,
    Nk,
    Ng,
    Um,
    Ry,
}

impl Kind {
    /// All kinds in code order.
    pub const ALL: [Kind; 14] = [
        Kind::Fu,
        Kind::Ky,
        Kind::Ke,
        Kind::Gi,
        Kind::Ki,
        Kind::Ka,
        Kind::Hi,
        Kind::Ou,
        Kind::To,
        Kind::Ny,
        Kind::Nk,
        Kind::Ng,
        Kind::Um,
        Kind::Ry,
    ];

    /// Kinds that can be held in hand, weakest first.
    pub const HAND: [Kind; 7] = [
        Kind::Fu,
        Kind::Ky,
        Kind::Ke,
        Kind::Gi,
        Kind::Ki,
        Kind::Ka,
        Kind::Hi,
    ];

    /// Returns the two-letter code.
    pub const fn code(self) -> &'static str {
        match self {
            Kind::Fu => "FU",
            Kind::Ky => "KY",
            Kind::Ke => "KE",
            Kind::Gi => "GI",
            Kind::Ki => "KI",
            Kind::Ka => "KA",
            Kind::Hi => "HI",
            Kind::Ou => "OU",
            Kind::To => "TO",
            Kind::Ny => "NY",
            Kind::Nk => "NK",
            Kind::Ng => "NG",
            Kind::Um => "UM",
            Kind::Ry => "RY",
        }
    }

    /// Parses a two-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        Kind::ALL.into_iter().find(|k| k.code() == code)
    }

    /// Returns true for promoted kinds.
    #[inline]
    pub const fn is_promoted(self) -> bool {
        matches!(
            self,
            Kind::To | Kind::Ny | Kind::Nk | Kind::Ng | Kind::Um | Kind::Ry
        )
    }

    /// Returns the plain form of a promoted kind; plain kinds map to themselves.
    pub const fn unpromoted(self) -> Self {
        match self {
            Kind::To => Kind::Fu,
            Kind::Ny => Kind::Ky,
            Kind::Nk => Kind::Ke,
            Kind::Ng => Kind::Gi,
            Kind::Um => Kind::Ka,
            Kind::Ry => Kind::Hi,
            other => other,
        }
    }

    /// Returns the promoted form; kinds that cannot promote map to themselves.
    pub const fn promoted(self) -> Self {
        match self {
            Kind::Fu => Kind::To,
            Kind::Ky => Kind::Ny,
            Kind::Ke => Kind::Nk,
            Kind::Gi => Kind::Ng,
            Kind::Ka => Kind::Um,
            Kind::Hi => Kind::Ry,
            other => other,
        }
    }

    /// Returns true if a captured piece of this kind goes to hand as itself.
    #[inline]
    pub const fn is_hand_kind(self) -> bool {
        !self.is_promoted() && !matches!(self, Kind::Ou)
    }

    /// Number of pieces of this plain kind in a full set.
    pub const fn full_set_count(self) -> u8 {
        match self.unpromoted() {
            Kind::Fu => 18,
            Kind::Ky | Kind::Ke | Kind::Gi | Kind::Ki => 4,
            Kind::Ka | Kind::Hi | Kind::Ou => 2,
            _ => 0,
        }
    }
}

impl FromStr for Kind {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_code(s).ok_or_else(|| CodeError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(Kind::from_code("AL"), None);
        assert!("XX".parse::<Kind>().is_err());
    }

    #[test]
    fn promotion() {
        assert!(Kind::Um.is_promoted());
        assert!(!Kind::Ou.is_promoted());
        assert_eq!(Kind::Ry.unpromoted(), Kind::Hi);
        assert_eq!(Kind::Gi.unpromoted(), Kind::Gi);
        assert_eq!(Kind::Ka.promoted(), Kind::Um);
        assert_eq!(Kind::Ki.promoted(), Kind::Ki);
        assert_eq!(Kind::Ng.promoted(), Kind::Ng);
    }

    #[test]
    fn hand_kinds() {
        assert!(Kind::HAND.iter().all(|k| k.is_hand_kind()));
        assert!(!Kind::Ou.is_hand_kind());
        assert!(!Kind::To.is_hand_kind());
    }

    #[test]
    fn full_set() {
        let total: u32 = Kind::HAND.iter().map(|k| k.full_set_count() as u32).sum();
        assert_eq!(total, 38);
        assert_eq!(Kind::To.full_set_count(), 18);
    }

    #[test]
    fn serde_code() {
        assert_eq!(serde_json::to_string(&Kind::Ny).unwrap(), "\"NY\"");
        assert_eq!(serde_json::from_str::<Kind>("\"UM\"").unwrap(), Kind::Um);
    }
}
