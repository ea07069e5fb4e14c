//! KI2 parser.
//!
//! KI2 writes moves as `▲７六歩　△３四歩`, several to a line, without
//! origin squares. Ambiguous moves carry direction qualifiers (右, 上, 打…)
//! which end up in [`Move::relative`].

use crate::forks::{self, Fork};
use crate::kifuable;
use crate::peg::{PResult, Scanner};
use crate::ParseError;
use jkf_core::{Board, Color, Header, Move, MoveNode, Record, Square};

/// Qualifier glyphs and their JKF letters, in the order they are written.
const HORIZONTAL: [(char, char); 3] = [('左', 'L'), ('直', 'C'), ('右', 'R')];
const VERTICAL: [(char, char); 3] = [('上', 'U'), ('寄', 'M'), ('引', 'D')];

struct Raw {
    header: Header,
    board: Option<Board>,
    moves: Vec<MoveNode>,
    forks: Vec<Fork>,
}

/// Parses KI2 text into a record.
pub fn parse(text: &str) -> Result<Record, ParseError> {
    let Raw {
        mut header,
        board,
        moves,
        forks,
    } = Scanner::new(text).finish(kifu)?;

    let initial = kifuable::initial_position(board, &mut header)?;
    let mut moves = forks::reconstruct(moves, forks)?;
    forks::resolve_same(&mut moves, None);

    Ok(Record {
        header,
        initial,
        moves,
    })
}

fn kifu(s: &mut Scanner<'_>) -> PResult<Raw> {
    s.many(kifuable::skipline);
    let mut header = Header::new();
    kifuable::headers(s, &mut header);
    let board = s.opt(kifuable::initial_board);
    kifuable::headers(s, &mut header);
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

fn moves(s: &mut Scanner<'_>) -> Vec<MoveNode> {
    let first = MoveNode {
        comments: kifuable::firstboard(s),
        ..MoveNode::default()
    };
    let mut nodes = vec![first];
    nodes.extend(s.many(move_node));
    if let Some(special) = s.opt(kifuable::result) {
        nodes.push(MoveNode::with_special(special));
    }
    nodes
}

fn separators(s: &mut Scanner<'_>) {
    s.many(|s| {
        if s.one_of(" 　").is_ok() {
            return Ok(());
        }
        kifuable::nl(s)
    });
}

fn move_node(s: &mut Scanner<'_>) -> PResult<MoveNode> {
    let mv = line(s)?;
    let comments = s.many(kifuable::comment);
    separators(s);
    Ok(MoveNode {
        comments,
        ..MoveNode::with_move(mv)
    })
}

fn line(s: &mut Scanner<'_>) -> PResult<Move> {
    let color = match s.one_of("▲△")? {
        '▲' => Color::Black,
        _ => Color::White,
    };
    let mv = fugou(s, color)?;
    separators(s);
    Ok(mv)
}

fn fugou(s: &mut Scanner<'_>, color: Color) -> PResult<Move> {
    let to = place(s)?;
    let piece = kifuable::piece(s)?;

    let mut relative = String::new();
    for table in [&HORIZONTAL, &VERTICAL] {
        if let Ok(glyph) = s.char_where(|c| table.iter().any(|(g, _)| *g == c)) {
            relative.extend(table.iter().filter(|(g, _)| *g == glyph).map(|(_, l)| *l));
        }
    }

    let promote = if s.literal("成").is_ok() {
        Some(true)
    } else if s.literal("不成").is_ok() {
        Some(false)
    } else {
        None
    };
    if s.literal("打").is_ok() {
        relative.push('H');
    }

    Ok(Move {
        color,
        from: None,
        to,
        piece,
        same: to.is_none(),
        promote,
        relative: (!relative.is_empty()).then_some(relative),
    })
}

/// Destination square, or `None` for 同 (with or without a trailing space).
fn place(s: &mut Scanner<'_>) -> PResult<Option<Square>> {
    if let Ok(square) = kifuable::square(s) {
        return Ok(Some(square));
    }
    s.literal("同")?;
    s.opt(|s| s.literal("　"));
    Ok(None)
}

fn fork(s: &mut Scanner<'_>) -> PResult<Fork> {
    let te = kifuable::fork_header(s)?;
    let mut moves = moves(s);
    moves.remove(0);
    Ok(Fork { te, moves })
}
