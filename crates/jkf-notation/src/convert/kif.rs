//! KIF text generation.
//!
//! Produces the layout the KIF parser reads back: header lines, the initial
//! position, the move table and then every variation block.

use crate::kanji::{board_glyph, move_text, preset_from_name, preset_name, special_word};
use crate::numeral::{n2kan, n2kan2, n2zen};
use jkf_core::{
    Color, Hand, InitialData, InitialPosition, Kind, Move, MoveNode, Preset, Record, Special,
    Time,
};

const BANNER: &str = "手数----指手---------消費時間--\n";
const FILES: &str = "  ９ ８ ７ ６ ５ ４ ３ ２ １\n";
const FRAME: &str = "+---------------------------+\n";

/// Width of the move column, counted in display columns.
const MOVE_WIDTH: usize = 13;

/// Renders `record` as KIF.
pub fn convert(record: &Record) -> String {
    let named = record
        .initial
        .as_ref()
        .map(|initial| initial.preset)
        .filter(|preset| *preset != Preset::Other);

    let mut out = String::new();
    let mut players = Vec::new();
    for (key, value) in record.header.iter() {
        let line = format!("{key}：{value}\n");
        match key {
            "先手" | "下手" => players.insert(0, line),
            "後手" | "上手" => players.push(line),
            "手合割" if named.is_some() && preset_from_name(value) == named => {}
            _ => out.push_str(&line),
        }
    }
    if let Some(initial) = &record.initial {
        out.push_str(&initial_text(initial));
    }
    out.extend(players);
    out.push_str(BANNER);

    let mut forks = Vec::new();
    out.push_str(&moves_text(&record.moves, 0, &mut forks));
    if !forks.is_empty() {
        out.push('\n');
        out.push_str(&forks.join("\n"));
    }
    out
}

fn initial_text(initial: &InitialPosition) -> String {
    match (initial.preset, &initial.data) {
        (Preset::Other, Some(data)) => diagram(data),
        (Preset::Other, None) => String::new(),
        (preset, _) => format!("手合割：{}\n", preset_name(preset)),
    }
}

fn diagram(data: &InitialData) -> String {
    let mut out = format!("後手の持駒：{}\n", hand_text(&data.hands[Color::White.index()]));
    out.push_str(FILES);
    out.push_str(FRAME);
    for (rank, row) in data.board.to_rows().iter().enumerate() {
        out.push('|');
        for cell in row {
            match cell {
                Some(piece) => {
                    out.push(if piece.color == Color::White { 'v' } else { ' ' });
                    out.push(board_glyph(piece.kind));
                }
                None => out.push_str(" ・"),
            }
        }
        out.push('|');
        out.push(n2kan(rank as u8 + 1));
        out.push('\n');
    }
    out.push_str(FRAME);
    out.push_str(&format!(
        "先手の持駒：{}\n",
        hand_text(&data.hands[Color::Black.index()])
    ));
    if data.color == Color::White {
        out.push_str("後手番\n");
    }
    out
}

/// `飛　角二　` style list, strongest first; `なし` when empty.
fn hand_text(hand: &Hand) -> String {
    if hand.is_empty() {
        return "なし".to_string();
    }
    let mut text = String::new();
    for &kind in Kind::HAND.iter().rev() {
        let count = hand.get(kind);
        if count == 0 {
            continue;
        }
        text.push(board_glyph(kind));
        if count > 1 {
            text.push_str(&n2kan2(count));
        }
        text.push('　');
    }
    text
}

/// Renders one line; `offset` is the ply of `line[0]`. Variation blocks are
/// collected into `forks`, newest first.
fn moves_text(line: &[MoveNode], offset: usize, forks: &mut Vec<String>) -> String {
    let mut out = String::new();
    for (i, node) in line.iter().enumerate() {
        let ply = offset + i;
        if let Some(special) = node.special {
            out.push_str(&special_line(node, special, ply));
        } else if let Some(mv) = &node.mv {
            out.push_str(&format!("{ply:>4} "));
            out.push_str(&ljust(&move_text_of(mv), MOVE_WIDTH));
            out.push_str(&line_tail(node));
        }
        push_comments(&mut out, &node.comments);
        if let Some(special) = node.special {
            out.push_str(&summary(special, ply));
        }
        if !node.forks.is_empty() {
            let block = forks_text(&node.forks, ply, forks);
            forks.insert(0, block);
        }
    }
    out
}

fn forks_text(variations: &[Vec<MoveNode>], ply: usize, forks: &mut Vec<String>) -> String {
    variations
        .iter()
        .map(|line| format!("変化：{ply}手\n{}", moves_text(line, ply, forks)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn special_line(node: &MoveNode, special: Special, ply: usize) -> String {
    format!(
        "{ply:>4} {}{}",
        ljust(special_word(special), MOVE_WIDTH),
        line_tail(node)
    )
}

/// Time annotation, variation marker and line break.
fn line_tail(node: &MoveNode) -> String {
    let mut tail = node.time.as_ref().map(time_text).unwrap_or_default();
    if !node.forks.is_empty() {
        tail.push('+');
    }
    tail.push('\n');
    tail
}

fn push_comments(out: &mut String, comments: &[String]) {
    for comment in comments {
        // Annotations keep their own `&` marker.
        if !comment.starts_with('&') {
            out.push('*');
        }
        out.push_str(comment);
        out.push('\n');
    }
}

fn move_text_of(mv: &Move) -> String {
    let mut text = match mv.to {
        Some(to) if !mv.same => format!("{}{}", n2zen(to.x), n2kan(to.y)),
        _ => "同　".to_string(),
    };
    text.push_str(&move_text(mv.piece));
    match mv.promote {
        Some(true) => text.push('成'),
        Some(false) => text.push_str("不成"),
        None => {}
    }
    match mv.from {
        Some(from) => text.push_str(&format!("({})", from.to_digits())),
        None => text.push('打'),
    }
    text
}

fn time_text(time: &Time) -> String {
    match time.total {
        Some(total) => format!(
            "({:>2}:{:02}/{:02}:{:02}:{:02})",
            time.now.m, time.now.s, total.h, total.m, total.s
        ),
        None => format!("({:>2}:{:02})", time.now.m, time.now.s),
    }
}

/// The `まで…` line after a special. Sides follow ply parity.
fn summary(special: Special, ply: usize) -> String {
    let n = ply.saturating_sub(1);
    let (mover, other) = if n % 2 == 0 {
        ("先", "後")
    } else {
        ("後", "先")
    };
    match special {
        Special::Toryo => format!("まで{n}手で{other}手の勝ち\n"),
        Special::IllegalAction => format!("まで{n}手で{other}手の反則勝ち\n"),
        Special::IllegalMove => format!("まで{n}手で{mover}手の反則負け\n"),
        Special::TimeUp => format!("まで{n}手で時間切れにより{other}手の勝ち\n"),
        Special::Chudan => format!("まで{n}手で中断\n"),
        Special::Jishogi => format!("まで{n}手で持将棋\n"),
        Special::Sennichite => format!("まで{n}手で千日手\n"),
        Special::Tsumi => format!("まで{n}手で詰み\n"),
        Special::Fuzumi => format!("まで{n}手で不詰\n"),
    }
}

/// Pads `text` to `width` columns; code points above 255 take two.
fn ljust(text: &str, width: usize) -> String {
    let used: usize = text.chars().map(|c| if c as u32 > 255 { 2 } else { 1 }).sum();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}
