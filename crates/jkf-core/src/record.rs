//! The JKF record tree: header, initial position and move nodes.

use crate::{Board, CodeError, Color, Hand, Kind, Preset, Square};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Game metadata as an insertion-ordered string map.
///
/// Re-inserting a key replaces its value in place. Equality ignores entry
/// order, like two JSON objects.
#[derive(Debug, Clone, Default, Eq)]
pub struct Header {
    entries: Vec<(String, String)>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, keeping the original position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Header {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut header = Header::new();
        for (k, v) in iter {
            header.insert(k, v);
        }
        header
    }
}

impl Serialize for Header {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Header {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeaderVisitor;

        impl<'de> Visitor<'de> for HeaderVisitor {
            type Value = Header;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Header, A::Error> {
                let mut header = Header::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    header.insert(k, v);
                }
                Ok(header)
            }
        }

        deserializer.deserialize_map(HeaderVisitor)
    }
}

/// An explicit starting position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialData {
    pub board: Board,
    /// Hands indexed by [`Color::index`].
    pub hands: [Hand; 2],
    /// Side to move first.
    pub color: Color,
}

/// The starting position of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialPosition {
    pub preset: Preset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InitialData>,
}

impl InitialPosition {
    /// A named preset without explicit data.
    pub const fn preset(preset: Preset) -> Self {
        InitialPosition { preset, data: None }
    }

    /// The side to move first: the explicit color, else the preset default.
    pub fn side_to_move(&self) -> Color {
        match &self.data {
            Some(data) => data.color,
            None => self.preset.default_color(),
        }
    }
}

/// A single move.
///
/// `from` is absent for drops. `to` is absent only when `same` is set and
/// the destination was not known from the previous move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Square>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Square>,
    /// Kind of the moving piece.
    pub piece: Kind,
    /// Written as "same square as the previous move" (同).
    #[serde(default, skip_serializing_if = "is_false")]
    pub same: bool,
    /// Explicit promotion marker: `Some(true)` for 成, `Some(false)` for 不成.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promote: Option<bool>,
    /// Direction qualifiers such as `"LU"` or `"H"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Move {
    /// A board move from `from` to `to`.
    pub fn new(color: Color, from: Square, to: Square, piece: Kind) -> Self {
        Move {
            color,
            from: Some(from),
            to: Some(to),
            piece,
            same: false,
            promote: None,
            relative: None,
        }
    }

    /// A drop from hand onto `to`.
    pub fn drop(color: Color, to: Square, piece: Kind) -> Self {
        Move {
            color,
            from: None,
            to: Some(to),
            piece,
            same: false,
            promote: None,
            relative: None,
        }
    }

    #[inline]
    pub fn is_drop(&self) -> bool {
        self.from.is_none()
    }

    /// The kind standing on the destination after the move.
    pub fn kind_after(&self) -> Kind {
        if self.promote == Some(true) {
            self.piece.promoted()
        } else {
            self.piece
        }
    }
}

/// Events that end or interrupt a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Special {
    Toryo,
    Chudan,
    Sennichite,
    TimeUp,
    IllegalMove,
    IllegalAction,
    Jishogi,
    Tsumi,
    Fuzumi,
}

impl Special {
    pub const ALL: [Special; 9] = [
        Special::Toryo,
        Special::Chudan,
        Special::Sennichite,
        Special::TimeUp,
        Special::IllegalMove,
        Special::IllegalAction,
        Special::Jishogi,
        Special::Tsumi,
        Special::Fuzumi,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Special::Toryo => "TORYO",
            Special::Chudan => "CHUDAN",
            Special::Sennichite => "SENNICHITE",
            Special::TimeUp => "TIME_UP",
            Special::IllegalMove => "ILLEGAL_MOVE",
            Special::IllegalAction => "ILLEGAL_ACTION",
            Special::Jishogi => "JISHOGI",
            Special::Tsumi => "TSUMI",
            Special::Fuzumi => "FUZUMI",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Special::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl FromStr for Special {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Special::from_code(s).ok_or_else(|| CodeError::UnknownSpecial(s.to_string()))
    }
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MinSec {
    pub m: u32,
    pub s: u32,
}

/// Hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HourMinSec {
    pub h: u32,
    pub m: u32,
    pub s: u32,
}

/// Time spent on a move, plus the running total when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Time {
    pub now: MinSec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<HourMinSec>,
}

impl Time {
    /// Elapsed time from a number of seconds, without a total.
    pub const fn from_secs(secs: u32) -> Self {
        Time {
            now: MinSec {
                m: secs / 60,
                s: secs % 60,
            },
            total: None,
        }
    }

    /// Elapsed time in seconds.
    pub const fn now_secs(&self) -> u32 {
        self.now.m * 60 + self.now.s
    }
}

/// One node of a move line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveNode {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub mv: Option<Move>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<Special>,
    /// Alternative continuations replacing this node, in arrival order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forks: Vec<Vec<MoveNode>>,
}

impl MoveNode {
    pub fn with_move(mv: Move) -> Self {
        MoveNode {
            mv: Some(mv),
            ..MoveNode::default()
        }
    }

    pub fn with_special(special: Special) -> Self {
        MoveNode {
            special: Some(special),
            ..MoveNode::default()
        }
    }

    /// True for a node with no move, special, time, comments or forks.
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
            && self.mv.is_none()
            && self.time.is_none()
            && self.special.is_none()
            && self.forks.is_empty()
    }
}

/// A complete game record.
///
/// `moves[0]` stands for the position before the first move and carries at
/// most comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub header: Header,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<InitialPosition>,
    pub moves: Vec<MoveNode>,
}

impl Default for Record {
    fn default() -> Self {
        Record {
            header: Header::new(),
            initial: None,
            moves: vec![MoveNode::default()],
        }
    }
}

impl Record {
    /// The side making the first move: from the initial position, else Black.
    pub fn first_color(&self) -> Color {
        self.initial
            .as_ref()
            .map_or(Color::Black, InitialPosition::side_to_move)
    }
}
