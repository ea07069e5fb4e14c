//! CSA parser.
//!
//! Accepts CSA V2 (`V2.2` version line, `$KEY:value` headers) and V1. Moves
//! are written `+7776FU`; `,` may join several records on one line.

use crate::kifuable::nonls;
use crate::peg::{PResult, Scanner};
use crate::ParseError;
use jkf_core::{
    Board, Color, Hand, Header, InitialData, InitialPosition, Kind, Move, MoveNode, Piece,
    Preset, Record, Special, Square, Time,
};

/// `$KEY` names and the header keys they map to.
pub(crate) const HEADER_KEYS: [(&str, &str); 5] = [
    ("EVENT", "棋戦"),
    ("SITE", "場所"),
    ("START_TIME", "開始日時"),
    ("END_TIME", "終了日時"),
    ("TIME_LIMIT", "持ち時間"),
];

/// Pieces removed from the even position by each preset, as `PI` tokens.
pub(crate) const PRESET_SUFFIXES: [(Preset, &str); 14] = [
    (Preset::Hirate, ""),
    (Preset::Lance, "11KY"),
    (Preset::RightLance, "91KY"),
    (Preset::Bishop, "22KA"),
    (Preset::Rook, "82HI"),
    (Preset::RookLance, "22HI11KY91KY"),
    (Preset::TwoPiece, "82HI22KA"),
    (Preset::ThreePiece, "82HI22KA91KY"),
    (Preset::FourPiece, "82HI22KA11KY91KY"),
    (Preset::FivePiece, "82HI22KA81KE11KY91KY"),
    (Preset::LeftFivePiece, "82HI22KA21KE11KY91KY"),
    (Preset::SixPiece, "82HI22KA21KE81KE11KY91KY"),
    (Preset::EightPiece, "82HI22KA31GI71GI21KE81KE11KY91KY"),
    (Preset::TenPiece, "82HI22KA41KI61KI31GI71GI21KE81KE11KY91KY"),
];

pub(crate) fn preset_suffix(preset: Preset) -> &'static str {
    PRESET_SUFFIXES
        .iter()
        .find(|(p, _)| *p == preset)
        .map_or("", |&(_, suffix)| suffix)
}

type Parsed = (Header, Option<InitialPosition>, Vec<MoveNode>);

/// Parses CSA text into a record.
pub fn parse(text: &str) -> Result<Record, ParseError> {
    let (header, initial, moves) = Scanner::new(text).finish(|s| s.choice(&[&csa2, &csa1]))?;
    Ok(Record {
        header,
        initial,
        moves,
    })
}

fn csa2(s: &mut Scanner<'_>) -> PResult<Parsed> {
    version(s)?;
    let mut header = Header::new();
    players(s, &mut header);
    for (key, value) in s.many(header_line) {
        header.insert(key, value);
    }
    let initial = s.opt(initial_board);
    Ok((header, initial, moves(s)))
}

fn csa1(s: &mut Scanner<'_>) -> PResult<Parsed> {
    let mut header = Header::new();
    players(s, &mut header);
    let initial = s.opt(initial_board);
    Ok((header, initial, moves(s)))
}

/// Record separator: trailing blanks then `,`, line breaks or end of input.
fn nl(s: &mut Scanner<'_>) -> PResult<()> {
    s.seq(|s| {
        s.take_while(|c| c == ' ');
        if s.literal(",").is_ok() {
            return Ok(());
        }
        let breaks = s.many1(|s| {
            s.opt(|s| s.literal("\r"));
            s.literal("\n")
        });
        if breaks.is_ok() {
            return Ok(());
        }
        s.eof()
    })
}

fn version(s: &mut Scanner<'_>) -> PResult<()> {
    s.literal("V2")?;
    s.opt(|s| {
        s.literal(".")?;
        s.take_while1(|c| c.is_ascii_digit())
    });
    nl(s)
}

fn comment(s: &mut Scanner<'_>) -> PResult<String> {
    s.literal("'")?;
    let text = nonls(s);
    nl(s)?;
    Ok(text.to_string())
}

fn players(s: &mut Scanner<'_>, header: &mut Header) {
    if let Some(name) = s.opt(|s| player(s, "N+")) {
        header.insert("先手", name);
    }
    if let Some(name) = s.opt(|s| player(s, "N-")) {
        header.insert("後手", name);
    }
}

fn player(s: &mut Scanner<'_>, tag: &str) -> PResult<String> {
    s.many(comment);
    s.literal(tag)?;
    let name = nonls(s);
    nl(s)?;
    Ok(name.to_string())
}

fn header_line(s: &mut Scanner<'_>) -> PResult<(String, String)> {
    s.many(comment);
    s.literal("$")?;
    let key = s.take_while1(|c| c != ':' && c != '\r' && c != '\n')?;
    s.literal(":")?;
    let value = nonls(s);
    nl(s)?;
    let key = HEADER_KEYS
        .iter()
        .find(|(code, _)| *code == key)
        .map_or(key, |&(_, name)| name);
    Ok((key.to_string(), value.to_string()))
}

fn teban(s: &mut Scanner<'_>) -> PResult<Color> {
    match s.one_of("+-")? {
        '+' => Ok(Color::Black),
        _ => Ok(Color::White),
    }
}

fn kind(s: &mut Scanner<'_>) -> PResult<Kind> {
    for kind in Kind::ALL {
        if s.literal(kind.code()).is_ok() {
            return Ok(kind);
        }
    }
    s.fail()
}

fn digit(s: &mut Scanner<'_>) -> PResult<u8> {
    s.char_where(|c| c.is_ascii_digit())
        .map(|c| c as u8 - b'0')
}

/// Two digits naming a board square; `00` is not one.
fn square(s: &mut Scanner<'_>) -> PResult<Square> {
    s.seq(|s| {
        let x = digit(s)?;
        let y = digit(s)?;
        Square::new(x, y).map_or_else(|| s.fail(), Ok)
    })
}

fn board_piece(s: &mut Scanner<'_>) -> PResult<(Square, Kind)> {
    let square = square(s)?;
    let kind = kind(s)?;
    Ok((square, kind))
}

/// Board before per-piece lines. `removed` is set for a `PI` line.
struct Setup {
    board: Board,
    removed: Option<Vec<String>>,
}

fn pi_setup(s: &mut Scanner<'_>) -> PResult<Setup> {
    s.literal("PI")?;
    let mut board = Board::hirate();
    let mut removed = Vec::new();
    for (square, kind) in s.many(board_piece) {
        board.set(square, None);
        removed.push(format!("{}{}", square.to_digits(), kind.code()));
    }
    nl(s)?;
    Ok(Setup {
        board,
        removed: Some(removed),
    })
}

fn rows_setup(s: &mut Scanner<'_>) -> PResult<Setup> {
    let rows = s.repeat(9, |s| {
        s.literal("P")?;
        s.one_of("123456789")?;
        let cells = s.repeat(9, masu)?;
        nl(s)?;
        Ok(cells)
    })?;
    let mut grid = [[None; 9]; 9];
    for (row, cells) in grid.iter_mut().zip(rows) {
        for (cell, piece) in row.iter_mut().zip(cells) {
            *cell = piece;
        }
    }
    Ok(Setup {
        board: Board::from_rows(&grid),
        removed: None,
    })
}

fn masu(s: &mut Scanner<'_>) -> PResult<Option<Piece>> {
    if s.literal(" * ").is_ok() {
        return Ok(None);
    }
    s.seq(|s| {
        let color = teban(s)?;
        let kind = kind(s)?;
        Ok(Some(Piece::new(color, kind)))
    })
}

fn empty_setup(_: &mut Scanner<'_>) -> PResult<Setup> {
    Ok(Setup {
        board: Board::empty(),
        removed: None,
    })
}

enum Placement {
    Board(Square, Kind),
    Hand(Kind),
    /// `00AL`: every piece not yet placed goes to this side's hand.
    Rest,
}

fn placement(s: &mut Scanner<'_>) -> PResult<Placement> {
    s.seq(|s| {
        if s.literal("00").is_err() {
            let (square, kind) = board_piece(s)?;
            return Ok(Placement::Board(square, kind));
        }
        if s.literal("AL").is_ok() {
            return Ok(Placement::Rest);
        }
        let kind = kind(s)?;
        if kind.is_hand_kind() {
            Ok(Placement::Hand(kind))
        } else {
            s.fail()
        }
    })
}

/// A `P+` or `P-` line.
fn komabetsu(s: &mut Scanner<'_>) -> PResult<(Color, Vec<Placement>)> {
    s.literal("P")?;
    let color = teban(s)?;
    let placements = s.many(placement);
    nl(s)?;
    Ok((color, placements))
}

fn initial_board(s: &mut Scanner<'_>) -> PResult<InitialPosition> {
    s.many(comment);
    let Setup { mut board, removed } = s.choice(&[&pi_setup, &rows_setup, &empty_setup])?;

    let mut hands = [Hand::default(); 2];
    let mut rest = None;
    let mut placed = false;
    for (color, placements) in s.many(komabetsu) {
        for placement in placements {
            match placement {
                Placement::Board(square, kind) => {
                    board.set(square, Some(Piece::new(color, kind)));
                    placed = true;
                }
                Placement::Hand(kind) => hands[color.index()].add(kind, 1),
                Placement::Rest => rest = Some(color),
            }
        }
    }
    if let Some(color) = rest {
        fill_rest(&board, &mut hands, color);
    }

    s.many(comment);
    let color = teban(s)?;
    nl(s)?;

    let preset = match removed {
        Some(removed) if !placed => preset_for_removed(&removed).unwrap_or(Preset::Other),
        _ => Preset::Other,
    };
    Ok(InitialPosition {
        preset,
        data: Some(InitialData {
            board,
            hands,
            color,
        }),
    })
}

/// Gives `color` every hand kind missing from the board and both hands.
fn fill_rest(board: &Board, hands: &mut [Hand; 2], color: Color) {
    for kind in Kind::HAND {
        let on_board = board
            .pieces()
            .filter(|(_, piece)| piece.kind.unpromoted() == kind)
            .count();
        let held = usize::from(hands[0].get(kind)) + usize::from(hands[1].get(kind));
        let missing = usize::from(kind.full_set_count()).saturating_sub(on_board + held);
        hands[color.index()].add(kind, missing as u8);
    }
}

/// The preset whose removal list matches `removed`, ignoring order.
fn preset_for_removed(removed: &[String]) -> Option<Preset> {
    let mut removed: Vec<&str> = removed.iter().map(String::as_str).collect();
    removed.sort_unstable();
    PRESET_SUFFIXES
        .iter()
        .find(|(_, suffix)| {
            let mut tokens: Vec<&str> = (0..suffix.len())
                .step_by(4)
                .filter_map(|i| suffix.get(i..i + 4))
                .collect();
            tokens.sort_unstable();
            tokens == removed
        })
        .map(|&(preset, _)| preset)
}

fn moves(s: &mut Scanner<'_>) -> Vec<MoveNode> {
    let first = MoveNode {
        comments: s.many(comment),
        ..MoveNode::default()
    };
    let mut nodes = vec![first];
    nodes.extend(s.many(move_node));
    nodes
}

fn move_node(s: &mut Scanner<'_>) -> PResult<MoveNode> {
    let mut node = s.choice(&[&normal_move, &special_move])?;
    node.time = s.opt(time);
    node.comments = s.many(comment);
    Ok(node)
}

fn normal_move(s: &mut Scanner<'_>) -> PResult<MoveNode> {
    let color = teban(s)?;
    let from = if s.literal("00").is_ok() {
        None
    } else {
        Some(square(s)?)
    };
    let to = square(s)?;
    let piece = kind(s)?;
    nl(s)?;
    Ok(MoveNode::with_move(Move {
        color,
        from,
        to: Some(to),
        piece,
        same: false,
        promote: None,
        relative: None,
    }))
}

fn special_move(s: &mut Scanner<'_>) -> PResult<MoveNode> {
    s.literal("%")?;
    s.opt(teban);
    let code = s.take_while1(|c| c.is_ascii_uppercase() || c == '_')?;
    let special = Special::from_code(code).map_or_else(|| s.fail(), Ok)?;
    nl(s)?;
    Ok(MoveNode::with_special(special))
}

/// `T<sec>`; an empty number means zero.
fn time(s: &mut Scanner<'_>) -> PResult<Time> {
    s.literal("T")?;
    let digits = s.take_while(|c| c.is_ascii_digit());
    let secs = if digits.is_empty() {
        0
    } else {
        digits.parse().or_else(|_| s.fail())?
    };
    nl(s)?;
    Ok(Time::from_secs(secs))
}
