//! Errors for decoding wire codes into model types.

use thiserror::Error;

/// A code or coordinate that does not name a model value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("unknown piece kind '{0}'")]
    UnknownKind(String),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("unknown special event '{0}'")]
    UnknownSpecial(String),

    #[error("square ({0}, {1}) is off the board")]
    SquareOutOfRange(u8, u8),
}
