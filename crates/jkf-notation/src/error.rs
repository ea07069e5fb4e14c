//! Error types for parsing and format dispatch.

use crate::Format;
use thiserror::Error;

/// A kanji numeral outside the supported range or with an unknown glyph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumeralError {
    #[error("unknown numeral glyph in '{0}'")]
    UnknownGlyph(String),

    #[error("numeral '{0}' is 20 or more")]
    OutOfRange(String),

    #[error("empty numeral")]
    Empty,
}

/// Errors raised while parsing notation text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error at line {line}, column {column}: unexpected {found}")]
    Syntax {
        /// Byte offset of the furthest position any rule reached.
        offset: usize,
        line: usize,
        column: usize,
        found: String,
    },

    #[error("invalid numeral: {0}")]
    Numeral(#[from] NumeralError),

    #[error("variation at ply {ply} has no move to branch from")]
    DanglingFork { ply: usize },

    #[error("invalid hand '{0}'")]
    Hand(String),
}

/// Errors from format selection and dispatch.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid JKF JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file type: {0}")]
    FileType(String),

    #[error("no converter writes {0}")]
    NoConverter(Format),
}
