//! Pieces on the board and the 9x9 board itself.

use crate::{Color, Kind, Square};
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A piece of a given kind owned by a given side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: Kind,
}

impl Piece {
    pub const fn new(color: Color, kind: Kind) -> Self {
        Piece { color, kind }
    }
}

/// One diagram row as read top to bottom: cell 0 is file 9, cell 8 is file 1.
pub type Row = [Option<Piece>; 9];

/// The 9x9 board, indexed `[file - 1][rank - 1]`.
///
/// Serialized as nine file arrays of nine cells; an empty cell is `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Option<Piece>; 9]; 9],
}

impl Board {
    /// An empty board.
    pub const fn empty() -> Self {
        Board {
            cells: [[None; 9]; 9],
        }
    }

    /// Builds a board from nine diagram rows read top to bottom.
    ///
    /// Row `j` holds rank `j + 1`, and its cells run from file 9 down to
    /// file 1, so `board[i][j] = rows[j][8 - i]`.
    pub fn from_rows(rows: &[Row; 9]) -> Self {
        let mut board = Board::empty();
        for i in 0..9 {
            for j in 0..9 {
                board.cells[i][j] = rows[j][8 - i];
            }
        }
        board
    }

    /// Returns the diagram rows (inverse of [`Board::from_rows`]).
    pub fn to_rows(&self) -> [Row; 9] {
        let mut rows = [[None; 9]; 9];
        for (j, row) in rows.iter_mut().enumerate() {
            for (k, cell) in row.iter_mut().enumerate() {
                *cell = self.cells[8 - k][j];
            }
        }
        rows
    }

    /// The even-game opening position.
    pub fn hirate() -> Self {
        const BACK: [Kind; 9] = [
            Kind::Ky,
            Kind::Ke,
            Kind::Gi,
            Kind::Ki,
            Kind::Ou,
            Kind::Ki,
            Kind::Gi,
            Kind::Ke,
            Kind::Ky,
        ];
        let mut board = Board::empty();
        for (i, kind) in BACK.into_iter().enumerate() {
            board.cells[i][0] = Some(Piece::new(Color::White, kind));
            board.cells[i][2] = Some(Piece::new(Color::White, Kind::Fu));
            board.cells[i][6] = Some(Piece::new(Color::Black, Kind::Fu));
            board.cells[i][8] = Some(Piece::new(Color::Black, kind));
        }
        board.cells[1][1] = Some(Piece::new(Color::White, Kind::Ka));
        board.cells[7][1] = Some(Piece::new(Color::White, Kind::Hi));
        board.cells[1][7] = Some(Piece::new(Color::Black, Kind::Hi));
        board.cells[7][7] = Some(Piece::new(Color::Black, Kind::Ka));
        board
    }

    /// Returns the piece on `square`.
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        let (i, j) = square.index();
        self.cells[i][j]
    }

    /// Places (or clears) a piece on `square`.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        let (i, j) = square.index();
        self.cells[i][j] = piece;
    }

    /// Iterates over occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (1..=9u8).flat_map(move |x| {
            (1..=9u8).filter_map(move |y| {
                let square = Square::new(x, y)?;
                self.get(square).map(|piece| (square, piece))
            })
        })
    }
}

impl std::ops::Index<usize> for Board {
    type Output = [Option<Piece>; 9];

    fn index(&self, file: usize) -> &Self::Output {
        &self.cells[file]
    }
}

/// Serializes a cell as `{}` or `{"color":..,"kind":..}`.
struct CellRef<'a>(&'a Option<Piece>);

impl Serialize for CellRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(piece) => piece.serialize(serializer),
            None => {
                use serde::ser::SerializeMap;
                serializer.serialize_map(Some(0))?.end()
            }
        }
    }
}

#[derive(Deserialize)]
struct RawCell {
    color: Option<Color>,
    kind: Option<Kind>,
}

struct FileRef<'a>(&'a [Option<Piece>; 9]);

impl Serialize for FileRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(9))?;
        for cell in self.0 {
            seq.serialize_element(&CellRef(cell))?;
        }
        seq.end()
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(9))?;
        for file in &self.cells {
            seq.serialize_element(&FileRef(file))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BoardVisitor;

        impl<'de> Visitor<'de> for BoardVisitor {
            type Value = Board;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("nine arrays of nine board cells")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Board, A::Error> {
                use serde::de::Error;

                let mut board = Board::empty();
                let mut files = 0;
                while let Some(file) = seq.next_element::<Vec<RawCell>>()? {
                    if files == 9 || file.len() != 9 {
                        return Err(A::Error::invalid_length(files + 1, &self));
                    }
                    for (rank, cell) in file.into_iter().enumerate() {
                        board.cells[files][rank] = match (cell.color, cell.kind) {
                            (Some(color), Some(kind)) => Some(Piece::new(color, kind)),
                            (None, None) => None,
                            _ => return Err(A::Error::custom("board cell needs both color and kind")),
                        };
                    }
                    files += 1;
                }
                if files != 9 {
                    return Err(A::Error::invalid_length(files, &self));
                }
                Ok(board)
            }
        }

        deserializer.deserialize_seq(BoardVisitor)
    }
}
