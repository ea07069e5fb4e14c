//! KIF parser.
//!
//! KIF lists one numbered ply per line with kanji destination squares and
//! explicit origin squares:
//!
//! ```text
//! 手数----指手---------消費時間--
//!    1 ７六歩(77)   ( 0:12/00:00:12)
//!    2 ３四歩(33)   ( 0:02/00:00:02)
//! ```
//!
//! Variations follow the main line as `変化：N手` blocks.

use crate::forks::{self, Fork};
use crate::kanji::SPECIAL_WORDS;
use crate::kifuable::{self, line_end};
use crate::peg::{PResult, Scanner};
use crate::ParseError;
use jkf_core::{Board, Color, Header, HourMinSec, MinSec, Move, MoveNode, Record, Square, Time};

struct Raw {
    header: Header,
    board: Option<Board>,
    moves: Vec<MoveNode>,
    forks: Vec<Fork>,
}

/// Parses KIF text into a record.
pub fn parse(text: &str) -> Result<Record, ParseError> {
    let Raw {
        mut header,
        board,
        moves,
        forks,
    } = Scanner::new(text).finish(kifu)?;

    let initial = kifuable::initial_position(board, &mut header)?;
    let mut record = Record {
        header,
        initial,
        moves: forks::reconstruct(moves, forks)?,
    };
    let first = record.first_color();
    forks::assign_colors(&mut record.moves, 0, first);
    forks::resolve_same(&mut record.moves, None);
    Ok(record)
}

fn kifu(s: &mut Scanner<'_>) -> PResult<Raw> {
    s.many(kifuable::skipline);
    let mut header = Header::new();
    kifuable::headers(s, &mut header);
    let board = s.opt(kifuable::initial_board);
    kifuable::headers(s, &mut header);
    s.opt(split);
    let moves = moves(s);
    let forks = s.many(fork);
    s.opt(kifuable::nl);
    Ok(Raw {
        header,
        board,
        moves,
        forks,
    })
}

/// The `手数----指手--` column banner.
fn split(s: &mut Scanner<'_>) -> PResult<()> {
    s.literal("手数----指手--")?;
    s.opt(|s| s.literal("-------消費時間--"));
    line_end(s)
}

/// A move list; node 0 holds the comments before the first ply.
fn moves(s: &mut Scanner<'_>) -> Vec<MoveNode> {
    let first = MoveNode {
        comments: kifuable::firstboard(s),
        ..MoveNode::default()
    };
    s.opt(split);
    let mut nodes = vec![first];
    nodes.extend(s.many(move_node));
    s.opt(kifuable::result);
    nodes
}

fn move_node(s: &mut Scanner<'_>) -> PResult<MoveNode> {
    let mut node = line(s)?;
    node.comments = s.many(kifuable::comment);
    Ok(node)
}

fn line(s: &mut Scanner<'_>) -> PResult<MoveNode> {
    s.take_while(|c| c == ' ');
    s.number::<usize>()?;
    s.take_while(|c| c == ' ');
    let mut node = s.choice(&[&move_body, &special_body])?;
    s.take_while(|c| c == ' ');
    node.time = s.opt(time);
    s.opt(|s| s.literal("+"));
    line_end(s)?;
    Ok(node)
}

fn move_body(s: &mut Scanner<'_>) -> PResult<MoveNode> {
    let to = place(s)?;
    let piece = kifuable::piece(s)?;
    let promote = if s.literal("成").is_ok() {
        Some(true)
    } else {
        s.opt(|s| s.literal("不成")).map(|_| false)
    };
    let from = origin(s)?;
    Ok(MoveNode::with_move(Move {
        // Colors are assigned from ply parity once the start color is known.
        color: Color::Black,
        from,
        to,
        piece,
        same: to.is_none(),
        promote,
        relative: None,
    }))
}

/// Destination square, or `None` for 同.
fn place(s: &mut Scanner<'_>) -> PResult<Option<Square>> {
    if let Ok(square) = kifuable::square(s) {
        return Ok(Some(square));
    }
    s.literal("同　").map(|_| None)
}

/// `(xy)` origin, or `None` for a drop.
fn origin(s: &mut Scanner<'_>) -> PResult<Option<Square>> {
    if s.literal("打").is_ok() {
        return Ok(None);
    }
    s.seq(|s| {
        s.literal("(")?;
        let x = s.char_where(|c| matches!(c, '1'..='9'))?;
        let y = s.char_where(|c| matches!(c, '1'..='9'))?;
        s.literal(")")?;
        match (x.to_digit(10), y.to_digit(10)) {
            (Some(x), Some(y)) => Square::new(x as u8, y as u8)
                .map(Some)
                .map_or_else(|| s.fail(), Ok),
            _ => s.fail(),
        }
    })
}

fn special_body(s: &mut Scanner<'_>) -> PResult<MoveNode> {
    for (word, special) in SPECIAL_WORDS {
        if s.literal(word).is_ok() {
            return Ok(MoveNode::with_special(special));
        }
    }
    s.fail()
}

/// `( m:ss/hh:mm:ss)`; the cumulative part may be absent.
fn time(s: &mut Scanner<'_>) -> PResult<Time> {
    s.seq(|s| {
        s.literal("(")?;
        s.take_while(|c| c == ' ');
        let m = s.number()?;
        s.literal(":")?;
        let sec = s.number()?;
        s.take_while(|c| c == ' ');
        let total = s.opt(total_time);
        s.literal(")")?;
        Ok(Time {
            now: MinSec { m, s: sec },
            total,
        })
    })
}

fn total_time(s: &mut Scanner<'_>) -> PResult<HourMinSec> {
    s.literal("/")?;
    s.take_while(|c| c == ' ');
    let h = s.number()?;
    s.literal(":")?;
    let m = s.number()?;
    s.literal(":")?;
    let sec = s.number()?;
    s.take_while(|c| c == ' ');
    Ok(HourMinSec { h, m, s: sec })
}

fn fork(s: &mut Scanner<'_>) -> PResult<Fork> {
    let te = kifuable::fork_header(s)?;
    let mut moves = moves(s);
    // The block's own placeholder node carries nothing worth keeping.
    moves.remove(0);
    Ok(Fork { te, moves })
}
