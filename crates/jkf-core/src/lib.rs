//! Core types for shogi game records.
//!
//! This crate provides the canonical JKF record model shared by every
//! notation parser and converter:
//! - [`Color`], [`Kind`] and [`Piece`] for piece representation
//! - [`Square`], [`Board`] and [`Hand`] for positions
//! - [`Preset`] and [`InitialPosition`] for starting positions
//! - [`Record`], [`MoveNode`] and [`Move`] for the move tree
//!
//! Every type serializes to the JKF JSON wire shape through serde.

mod board;
mod color;
mod error;
mod hand;
mod kind;
mod preset;
mod record;
mod square;

pub use board::{Board, Piece, Row};
pub use color::Color;
pub use error::CodeError;
pub use hand::Hand;
pub use kind::Kind;
pub use preset::Preset;
pub use record::{
    Header, HourMinSec, InitialData, InitialPosition, MinSec, Move, MoveNode, Record, Special,
    Time,
};
pub use square::Square;
