//! Integration tests for parsing, converting and format dispatch.

use jkf_core::{Color, Kind, Piece, Preset, Record, Special, Square};
use jkf_notation::{convert, csa, ki2, kif, parse_any, sniff, Format};

const KIF_GAME: &str = "# KIF exported
開始日時：2015/08/04 13:00:00
棋戦：練習対局
手合割：平手
先手：sente
後手：gote
手数----指手---------消費時間--
*opening comment
   1 ７六歩(77)   ( 0:12/00:00:12)
*first move
   2 ３四歩(33)   ( 0:02/00:00:02)+
   3 ２二角成(88) ( 0:20/00:00:32)+
   4 同　銀(31)   ( 0:03/00:00:05)
   5 ４五角打     ( 0:39/00:01:11)
   6 投了         ( 0:03/00:00:08)
まで5手で先手の勝ち

変化：3手
   3 ６六歩(67)   ( 0:05/00:00:17)
   4 ８四歩(83)   ( 0:01/00:00:03)

変化：2手
   2 ８四歩(83)   ( 0:04/00:00:04)+
   3 ２六歩(27)   ( 0:03/00:00:15)

変化：2手
   2 ４四歩(43)   ( 0:09/00:00:09)
";

const CSA_GAME: &str = "V2.2
N+sente
N-gote
$EVENT:練習対局
$SITE:将棋会館
$START_TIME:2015/08/04 13:00:00
$OPENING:YAGURA
PI
+
'opening comment
+7776FU,T12
'first move
-3334FU,T2
+8822UM,T100
-3122GI,T1
+0045KA,T0
%TORYO
";

fn sq(x: u8, y: u8) -> Square {
    Square::new(x, y).unwrap()
}

#[test]
fn test_kif_round_trip() {
    let record = kif::parse(KIF_GAME).expect("Failed to parse KIF sample");
    let text = convert::kif::convert(&record);
    let reparsed = kif::parse(&text).expect("Failed to parse converted KIF");
    assert_eq!(record, reparsed, "KIF round trip changed the record:\n{}", text);
}

#[test]
fn test_kif_conversion_is_stable() {
    let record = kif::parse(KIF_GAME).unwrap();
    let once = convert::kif::convert(&record);
    let twice = convert::kif::convert(&kif::parse(&once).unwrap());
    assert_eq!(once, twice);
    assert!(once.starts_with("開始日時：2015/08/04 13:00:00\n棋戦：練習対局\n手合割：平手\n先手：sente\n後手：gote\n"));
}

#[test]
fn test_csa_round_trip() {
    let record = csa::parse(CSA_GAME).expect("Failed to parse CSA sample");
    let text = convert::csa::convert(&record);
    assert_eq!(text, CSA_GAME);
    assert_eq!(csa::parse(&text).unwrap(), record);
}

#[test]
fn test_kif_to_csa_keeps_main_line() {
    let record = kif::parse(KIF_GAME).unwrap();
    let text = convert::csa::convert(&record);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "V2.2");
    assert!(lines.contains(&"N+sente"));
    assert!(lines.contains(&"$EVENT:練習対局"));
    assert!(lines.contains(&"$手合割:平手"));
    assert!(lines.contains(&"+8822UM,T20"));
    assert!(lines.contains(&"-3122GI,T3"));
    assert!(lines.contains(&"%TORYO,T3"));

    let back = csa::parse(&text).unwrap();
    assert_eq!(back.moves.len(), record.moves.len());
    assert_eq!(back.moves[3].mv.as_ref().unwrap().piece, Kind::Um);
    assert!(back.moves.iter().all(|node| node.forks.is_empty()));
}

#[test]
fn test_csa_times_survive_kif() {
    let record = csa::parse(CSA_GAME).unwrap();
    let text = convert::kif::convert(&record);
    assert!(text.contains("   1 ７六歩(77)   ( 0:12)\n"), "{}", text);
    assert!(!text.contains("00:00:00"), "{}", text);

    let back = kif::parse(&text).unwrap();
    let times: Vec<_> = back.moves.iter().map(|node| node.time).collect();
    let expected: Vec<_> = record.moves.iter().map(|node| node.time).collect();
    assert_eq!(times, expected);
    assert_eq!(back.moves[1].time, Some(jkf_core::Time::from_secs(12)));
}

#[test]
fn test_fork_reconstruction() {
    let record = kif::parse(KIF_GAME).unwrap();
    let main = &record.moves;

    let at3 = &main[3].forks;
    assert_eq!(at3.len(), 1, "one variation replaces ply 3");
    assert_eq!(at3[0].len(), 2);
    assert_eq!(at3[0][0].mv.as_ref().unwrap().to, Some(sq(6, 6)));

    let at2 = &main[2].forks;
    assert_eq!(at2.len(), 1, "one variation replaces ply 2");
    let nested = &at2[0][0].forks;
    assert_eq!(nested.len(), 1, "later ply-2 block nests under the first");
    assert_eq!(nested[0][0].mv.as_ref().unwrap().to, Some(sq(4, 4)));
    assert_eq!(nested[0][0].mv.as_ref().unwrap().color, Color::White);
}

#[test]
fn test_board_transpose_in_json() {
    let text = "後手の持駒：なし
  ９ ８ ７ ６ ５ ４ ３ ２ １
+---------------------------+
|v香v桂v銀v金v玉v金v銀v桂v香|一
| ・v飛 ・ ・ ・ ・ ・v角 ・|二
|v歩v歩v歩v歩v歩v歩v歩v歩v歩|三
| ・ ・ ・ ・ ・ ・ ・ ・ ・|四
| ・ ・ ・ ・ ・ ・ ・ ・ ・|五
| ・ ・ ・ ・ ・ ・ ・ ・ ・|六
| 歩 歩 歩 歩 歩 歩 歩 歩 歩|七
| ・ 角 ・ ・ ・ ・ ・ 飛 ・|八
| 香 桂 銀 金 玉 金 銀 桂 香|九
+---------------------------+
先手の持駒：なし
";
    let record = kif::parse(text).unwrap();
    let initial = record.initial.as_ref().unwrap();
    assert_eq!(initial.preset, Preset::Other);
    let board = &initial.data.as_ref().unwrap().board;
    assert_eq!(board[4][0], Some(Piece::new(Color::White, Kind::Ou)));

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["initial"]["preset"], "OTHER");
    assert_eq!(
        json["initial"]["data"]["board"][4][0],
        serde_json::json!({"color": 1, "kind": "OU"})
    );
    assert_eq!(json["initial"]["data"]["board"][4][4], serde_json::json!({}));
}

#[test]
fn test_preset_inverse() {
    for preset in Preset::NAMED {
        let record = Record {
            initial: Some(jkf_core::InitialPosition::preset(preset)),
            ..Record::default()
        };

        let text = convert::csa::convert(&record);
        let back = csa::parse(&text).unwrap();
        assert_eq!(
            back.initial.as_ref().map(|initial| initial.preset),
            Some(preset),
            "CSA preset {} did not survive:\n{}",
            preset,
            text
        );

        let text = convert::kif::convert(&record);
        let back = kif::parse(&text).unwrap();
        assert_eq!(
            back.initial.map(|initial| initial.preset),
            Some(preset),
            "KIF preset {} did not survive:\n{}",
            preset,
            text
        );
    }
}

#[test]
fn test_csa_full_hands_round_trip() {
    let text = concat!(
        "V2.2\n",
        "P1 *  *  *  *  *  *  *  * -OU\n",
        "P2 *  *  *  *  *  *  *  *  * \n",
        "P3 *  *  *  *  *  *  *  *  * \n",
        "P4 *  *  *  *  *  *  *  *  * \n",
        "P5 *  *  *  *  *  *  *  *  * \n",
        "P6 *  *  *  *  *  *  *  *  * \n",
        "P7 *  *  *  *  *  *  *  *  * \n",
        "P8 *  *  *  *  *  *  *  *  * \n",
        "P9+OU *  *  *  *  *  *  *  * \n",
        "P+00HI00HI00KA00KA00KI00KI00KI00KI00GI00GI00GI00GI",
        "00KE00KE00KE00KE00KY00KY00KY00KY",
        "00FU00FU00FU00FU00FU00FU00FU00FU00FU00FU00FU00FU00FU00FU00FU00FU00FU00FU\n",
        "-\n",
    );
    let record = csa::parse(text).unwrap();
    let data = record.initial.as_ref().unwrap().data.as_ref().unwrap();
    assert_eq!(data.hands[0].fu, 18);
    assert_eq!(data.hands[0].hi, 2);
    assert!(data.hands[1].is_empty());
    assert_eq!(data.color, Color::White);
    assert_eq!(convert::csa::convert(&record), text);
}

#[test]
fn test_hand_round_trip() {
    let hand = jkf_core::Hand {
        hi: 2,
        ka: 2,
        ki: 3,
        gi: 4,
        ke: 3,
        ky: 4,
        fu: 17,
    };
    let mut board = jkf_core::Board::empty();
    board.set(sq(5, 1), Some(Piece::new(Color::White, Kind::Ou)));
    board.set(sq(5, 9), Some(Piece::new(Color::Black, Kind::Ou)));
    let record = Record {
        initial: Some(jkf_core::InitialPosition {
            preset: Preset::Other,
            data: Some(jkf_core::InitialData {
                board,
                hands: [hand, jkf_core::Hand::default()],
                color: Color::Black,
            }),
        }),
        ..Record::default()
    };

    let text = convert::csa::convert(&record);
    let expected = format!(
        "P+{}{}{}{}{}{}{}",
        "00HI".repeat(2),
        "00KA".repeat(2),
        "00KI".repeat(3),
        "00GI".repeat(4),
        "00KE".repeat(3),
        "00KY".repeat(4),
        "00FU".repeat(17),
    );
    let hand_lines: Vec<&str> = text.lines().filter(|line| line.starts_with("P+")).collect();
    assert_eq!(hand_lines, vec![expected.as_str()]);

    let back = csa::parse(&text).unwrap();
    let data = back.initial.unwrap().data.unwrap();
    assert_eq!(data.hands[0], hand);
    assert!(data.hands[1].is_empty());
}

#[test]
fn test_ki2_game() {
    let text = "手合割：平手
先手：sente
後手：gote

▲７六歩    △３四歩    ▲２二角成  △同　銀
▲４五角打
まで5手で中断
";
    let record = ki2::parse(text).unwrap();
    assert_eq!(record.moves.len(), 7);
    assert_eq!(record.moves[6].special, Some(Special::Chudan));
    assert_eq!(record.moves[4].mv.as_ref().unwrap().to, Some(sq(2, 2)));

    let (format, sniffed) = sniff(text).unwrap();
    assert_eq!(format, Format::Ki2);
    assert_eq!(sniffed, record);
}

#[test]
fn test_sniff_picks_each_format() {
    assert_eq!(sniff(KIF_GAME).unwrap().0, Format::Kif);
    assert_eq!(sniff(CSA_GAME).unwrap().0, Format::Csa);

    let record = csa::parse(CSA_GAME).unwrap();
    let json = serde_json::to_string(&record).unwrap();
    let (format, parsed) = sniff(&json).unwrap();
    assert_eq!(format, Format::Jkf);
    assert_eq!(parsed, record);
}

#[test]
fn test_headers_only_and_empty_input_are_kif() {
    let (format, record) = sniff("棋戦：名人戦\n").unwrap();
    assert_eq!(format, Format::Kif);
    assert_eq!(record.header.get("棋戦"), Some("名人戦"));
    assert_eq!(record.moves.len(), 1);

    assert_eq!(sniff("").unwrap().0, Format::Kif);
    assert_eq!(parse_any("").unwrap(), Record::default());
}

#[test]
fn test_json_round_trip() {
    for record in [
        kif::parse(KIF_GAME).unwrap(),
        csa::parse(CSA_GAME).unwrap(),
    ] {
        let json = serde_json::to_string_pretty(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
