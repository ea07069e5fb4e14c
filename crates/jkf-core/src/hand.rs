//! Pieces in hand.

use crate::Kind;
use serde::{Deserialize, Serialize};

/// Counts of the seven droppable kinds held by one side.
///
/// Serialized as `{"FU":0,"KY":0,"KE":0,"GI":0,"KI":0,"KA":0,"HI":0}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Hand {
    pub fu: u8,
    pub ky: u8,
    pub ke: u8,
    pub gi: u8,
    pub ki: u8,
    pub ka: u8,
    pub hi: u8,
}

impl Hand {
    /// Returns the count for `kind`; promoted kinds count as their plain form
    /// and the king is never in hand.
    pub fn get(&self, kind: Kind) -> u8 {
        match self.slot(kind) {
            Some(index) => self.as_array()[index],
            None => 0,
        }
    }

    /// Sets the count for a hand kind. Other kinds are ignored.
    pub fn set(&mut self, kind: Kind, count: u8) {
        if let Some(index) = self.slot(kind) {
            let mut counts = self.as_array();
            counts[index] = count;
            *self = Hand::from_array(counts);
        }
    }

    /// Adds `count` pieces of `kind` (unpromoted first).
    pub fn add(&mut self, kind: Kind, count: u8) {
        let current = self.get(kind);
        self.set(kind, current.saturating_add(count));
    }

    /// Returns true if the hand holds nothing.
    pub fn is_empty(&self) -> bool {
        self.as_array().iter().all(|&n| n == 0)
    }

    fn slot(&self, kind: Kind) -> Option<usize> {
        let plain = kind.unpromoted();
        Kind::HAND.iter().position(|&k| k == plain)
    }

    fn as_array(&self) -> [u8; 7] {
        [self.fu, self.ky, self.ke, self.gi, self.ki, self.ka, self.hi]
    }

    fn from_array(counts: [u8; 7]) -> Self {
        let [fu, ky, ke, gi, ki, ka, hi] = counts;
        Hand {
            fu,
            ky,
            ke,
            gi,
            ki,
            ka,
            hi,
        }
    }
}
