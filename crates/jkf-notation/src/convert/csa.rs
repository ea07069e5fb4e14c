//! CSA V2.2 text generation.

use crate::csa::{preset_suffix, HEADER_KEYS};
use jkf_core::{Board, Color, Hand, Header, InitialPosition, Kind, MoveNode, Preset, Record, Square};

/// Renders `record` as CSA V2.2. Only the main line is written.
pub fn convert(record: &Record) -> String {
    let mut out = String::from("V2.2\n");
    out.push_str(&header_text(&record.header));
    if let Some(initial) = &record.initial {
        out.push_str(&initial_text(initial));
    }
    let mut previous = None;
    for node in record.moves.iter().filter(|node| !node.is_empty()) {
        out.push_str(&node_text(node, &mut previous));
    }
    out
}

fn sign(color: Color) -> char {
    match color {
        Color::Black => '+',
        Color::White => '-',
    }
}

fn header_text(header: &Header) -> String {
    let mut header = header.clone();
    let mut out = String::new();
    if let Some(name) = header.remove("先手").or_else(|| header.remove("下手")) {
        out.push_str(&format!("N+{name}\n"));
    }
    if let Some(name) = header.remove("後手").or_else(|| header.remove("上手")) {
        out.push_str(&format!("N-{name}\n"));
    }
    for (key, value) in header.iter() {
        let code = HEADER_KEYS
            .iter()
            .find(|(_, name)| *name == key)
            .map_or(key, |&(code, _)| code);
        out.push_str(&format!("${code}:{value}\n"));
    }
    out
}

fn initial_text(initial: &InitialPosition) -> String {
    let mut out = match (initial.preset, &initial.data) {
        (Preset::Other, Some(data)) => rows_text(&data.board),
        (preset, _) => format!("PI{}\n", preset_suffix(preset)),
    };
    if let Some(data) = &initial.data {
        for color in Color::ALL {
            let hand = &data.hands[color.index()];
            if !hand.is_empty() {
                out.push_str(&format!("P{}{}\n", sign(color), hand_text(hand)));
            }
        }
    }
    out.push(sign(initial.side_to_move()));
    out.push('\n');
    out
}

fn rows_text(board: &Board) -> String {
    let mut out = String::new();
    for (rank, row) in board.to_rows().iter().enumerate() {
        out.push_str(&format!("P{}", rank + 1));
        for cell in row {
            match cell {
                Some(piece) => {
                    out.push(sign(piece.color));
                    out.push_str(piece.kind.code());
                }
                None => out.push_str(" * "),
            }
        }
        out.push('\n');
    }
    out
}

/// `00KK` tokens, rook first.
fn hand_text(hand: &Hand) -> String {
    let mut out = String::new();
    for &kind in Kind::HAND.iter().rev() {
        for _ in 0..hand.get(kind) {
            out.push_str("00");
            out.push_str(kind.code());
        }
    }
    out
}

/// One node: its move or special line, then its comments.
///
/// `previous` is the destination of the last move, used for 同 moves whose
/// square was never resolved.
fn node_text(node: &MoveNode, previous: &mut Option<Square>) -> String {
    let mut out = String::new();
    if let Some(mv) = &node.mv {
        let to = mv.to.or(*previous);
        out.push(sign(mv.color));
        out.push_str(&mv.from.map_or_else(|| "00".to_string(), Square::to_digits));
        out.push_str(&to.map_or_else(|| "00".to_string(), Square::to_digits));
        out.push_str(mv.kind_after().code());
        *previous = to;
    } else if let Some(special) = node.special {
        out.push('%');
        out.push_str(special.code());
    }
    if node.mv.is_some() || node.special.is_some() {
        match &node.time {
            Some(time) => out.push_str(&format!(",T{}\n", time.now_secs())),
            None => out.push('\n'),
        }
    }
    for comment in &node.comments {
        out.push_str(&format!("'{comment}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jkf_core::{InitialData, Move, Piece, Special, Time};

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y).unwrap()
    }

    #[test]
    fn header_and_preset() {
        let record = Record {
            header: [
                ("下手", "A"),
                ("上手", "B"),
                ("棋戦", "Cup"),
                ("OPENING", "YAGURA"),
            ]
            .into_iter()
            .collect(),
            initial: Some(InitialPosition::preset(Preset::TwoPiece)),
            moves: vec![MoveNode::default()],
        };
        assert_eq!(
            convert(&record),
            "V2.2\nN+A\nN-B\n$EVENT:Cup\n$OPENING:YAGURA\nPI82HI22KA\n-\n"
        );
    }

    #[test]
    fn moves_times_and_comments() {
        let mut first = MoveNode::with_move(Move::new(Color::Black, sq(7, 7), sq(7, 6), Kind::Fu));
        first.time = Some(Time::from_secs(12));
        first.comments = vec!["good".to_string()];
        let mut promote = Move::new(Color::White, sq(2, 2), sq(8, 8), Kind::Ka);
        promote.promote = Some(true);
        let mut same = Move::new(Color::Black, sq(7, 9), sq(8, 8), Kind::Gi);
        same.to = None;
        same.same = true;
        let record = Record {
            header: Header::new(),
            initial: Some(InitialPosition::preset(Preset::Hirate)),
            moves: vec![
                MoveNode {
                    comments: vec!["start".to_string()],
                    ..MoveNode::default()
                },
                first,
                MoveNode::with_move(promote),
                MoveNode::with_move(same),
                MoveNode::with_move(Move::drop(Color::White, sq(5, 5), Kind::Ka)),
                MoveNode::with_special(Special::Toryo),
            ],
        };
        assert_eq!(
            convert(&record),
            "V2.2\nPI\n+\n'start\n+7776FU,T12\n'good\n-2288UM\n+7988GI\n-0055KA\n%TORYO\n"
        );
    }

    #[test]
    fn explicit_position() {
        let mut board = Board::empty();
        board.set(sq(1, 1), Some(Piece::new(Color::White, Kind::Ou)));
        board.set(sq(2, 3), Some(Piece::new(Color::Black, Kind::To)));
        let mut hands = [Hand::default(); 2];
        hands[0].ki = 2;
        hands[0].hi = 1;
        let record = Record {
            initial: Some(InitialPosition {
                preset: Preset::Other,
                data: Some(InitialData {
                    board,
                    hands,
                    color: Color::Black,
                }),
            }),
            ..Record::default()
        };
        let text = convert(&record);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "P1 *  *  *  *  *  *  *  * -OU");
        assert_eq!(lines[3], "P3 *  *  *  *  *  *  * +TO * ");
        assert_eq!(lines[10], "P+00HI00KI00KI");
        assert_eq!(lines[11], "+");
        assert_eq!(lines.len(), 12);
    }
}
