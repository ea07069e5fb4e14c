//! Property tests: converting a record and parsing the text back.

use jkf_core::{
    Board, Color, Hand, Header, HourMinSec, InitialData, InitialPosition, Kind, MinSec, Move,
    MoveNode, Piece, Preset, Record, Special, Square, Time,
};
use jkf_notation::{convert, csa, kif};
use proptest::prelude::*;

fn arb_color() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::Black), Just(Color::White)]
}

fn arb_kind() -> impl Strategy<Value = Kind> {
    (0..Kind::ALL.len()).prop_map(|i| Kind::ALL[i])
}

fn arb_square() -> impl Strategy<Value = Square> {
    (1..=9u8, 1..=9u8).prop_map(|(x, y)| Square::new(x, y).unwrap())
}

fn arb_special() -> impl Strategy<Value = Special> {
    (0..Special::ALL.len()).prop_map(|i| Special::ALL[i])
}

fn arb_comments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z0-9][a-zA-Z0-9 ]{0,10}", 0..3)
}

fn arb_header() -> impl Strategy<Value = Header> {
    const KEYS: [&str; 8] = ["棋戦", "場所", "開始日時", "終了日時", "持ち時間", "先手", "後手", "備考"];
    prop::collection::vec((0..KEYS.len(), "[a-zA-Z0-9/]{0,10}"), 0..5)
        .prop_map(|entries| entries.into_iter().map(|(k, v)| (KEYS[k], v)).collect())
}

fn arb_board() -> impl Strategy<Value = Board> {
    prop::collection::vec(
        proptest::option::weighted(0.3, (arb_color(), arb_kind()).prop_map(|(c, k)| Piece::new(c, k))),
        81,
    )
    .prop_map(|cells| {
        let mut board = Board::empty();
        for (n, piece) in cells.into_iter().enumerate() {
            let square = Square::new(n as u8 / 9 + 1, n as u8 % 9 + 1).unwrap();
            board.set(square, piece);
        }
        board
    })
}

fn arb_hand() -> impl Strategy<Value = Hand> {
    prop::collection::vec(0..4u8, 7).prop_map(|counts| {
        let mut hand = Hand::default();
        for (kind, count) in Kind::HAND.into_iter().zip(counts) {
            hand.set(kind, count);
        }
        hand
    })
}

fn arb_explicit_position() -> impl Strategy<Value = InitialPosition> {
    (arb_board(), arb_hand(), arb_hand(), arb_color()).prop_map(|(board, black, white, color)| {
        InitialPosition {
            preset: Preset::Other,
            data: Some(InitialData {
                board,
                hands: [black, white],
                color,
            }),
        }
    })
}

// CSA writes exactly what it reads for records without variations, 同 moves
// or promotion flags.

fn arb_csa_move() -> impl Strategy<Value = MoveNode> {
    (
        arb_color(),
        proptest::option::of(arb_square()),
        arb_square(),
        arb_kind(),
        proptest::option::of(0..5000u32),
        arb_comments(),
    )
        .prop_map(|(color, from, to, piece, secs, comments)| MoveNode {
            comments,
            mv: Some(Move {
                color,
                from,
                to: Some(to),
                piece,
                same: false,
                promote: None,
                relative: None,
            }),
            time: secs.map(Time::from_secs),
            ..MoveNode::default()
        })
}

fn arb_csa_record() -> impl Strategy<Value = Record> {
    (
        arb_header(),
        proptest::option::of(arb_explicit_position()),
        arb_comments(),
        prop::collection::vec(arb_csa_move(), 0..12),
        proptest::option::of((arb_special(), proptest::option::of(0..100u32))),
    )
        .prop_map(|(header, initial, opening, moves, special)| {
            let mut nodes = vec![MoveNode {
                comments: opening,
                ..MoveNode::default()
            }];
            nodes.extend(moves);
            if let Some((special, secs)) = special {
                nodes.push(MoveNode {
                    time: secs.map(Time::from_secs),
                    ..MoveNode::with_special(special)
                });
            }
            Record {
                header,
                initial,
                moves: nodes,
            }
        })
}

// KIF normalizes colors and 同 squares on the first pass, so the property is
// that a second pass changes nothing.

fn arb_time() -> impl Strategy<Value = Time> {
    (0..60u32, 0..60u32, proptest::option::of((0..24u32, 0..60u32, 0..60u32))).prop_map(
        |(m, s, total)| Time {
            now: MinSec { m, s },
            total: total.map(|(h, m, s)| HourMinSec { h, m, s }),
        },
    )
}

fn arb_kif_move() -> impl Strategy<Value = MoveNode> {
    (
        proptest::option::of(arb_square()),
        arb_square(),
        arb_kind(),
        any::<bool>(),
        proptest::option::of(any::<bool>()),
        proptest::option::of(arb_time()),
        arb_comments(),
    )
        .prop_map(|(from, to, piece, same, promote, time, comments)| MoveNode {
            comments,
            mv: Some(Move {
                color: Color::Black,
                from,
                to: Some(to),
                piece,
                same,
                promote,
                relative: None,
            }),
            time,
            ..MoveNode::default()
        })
}

fn arb_kif_initial() -> impl Strategy<Value = Option<InitialPosition>> {
    prop_oneof![
        Just(None),
        (0..Preset::NAMED.len()).prop_map(|i| Some(InitialPosition::preset(Preset::NAMED[i]))),
        arb_explicit_position().prop_map(Some),
    ]
}

fn arb_kif_record() -> impl Strategy<Value = Record> {
    (
        arb_header(),
        arb_kif_initial(),
        arb_comments(),
        prop::collection::vec(
            (arb_kif_move(), proptest::option::of(prop::collection::vec(arb_kif_move(), 1..4))),
            0..10,
        ),
        proptest::option::of(arb_special()),
    )
        .prop_map(|(header, initial, opening, moves, special)| {
            let mut nodes = vec![MoveNode {
                comments: opening,
                ..MoveNode::default()
            }];
            for (mut node, variation) in moves {
                if let Some(variation) = variation {
                    node.forks.push(variation);
                }
                nodes.push(node);
            }
            if let Some(special) = special {
                nodes.push(MoveNode::with_special(special));
            }
            Record {
                header,
                initial,
                moves: nodes,
            }
        })
}

proptest! {
    #[test]
    fn csa_round_trip(record in arb_csa_record()) {
        let text = convert::csa::convert(&record);
        let parsed = csa::parse(&text);
        prop_assert!(parsed.is_ok(), "failed to parse:\n{}\n{:?}", text, parsed);
        prop_assert_eq!(parsed.unwrap(), record);
    }

    #[test]
    fn kif_round_trip(record in arb_kif_record()) {
        let first = convert::kif::convert(&record);
        let parsed = kif::parse(&first);
        prop_assert!(parsed.is_ok(), "failed to parse:\n{}\n{:?}", first, parsed);
        let parsed = parsed.unwrap();

        let second = convert::kif::convert(&parsed);
        prop_assert_eq!(&second, &first);
        prop_assert_eq!(kif::parse(&second).unwrap(), parsed);
    }
}
