//! Kanji vocabularies shared by the KIF and KI2 grammars and the KIF converter.

use jkf_core::{Kind, Preset, Special};

/// Glyphs that follow 成 for the three promoted kinds written with two glyphs.
const PROMOTED: [(char, Kind); 3] = [('香', Kind::Ny), ('桂', Kind::Nk), ('銀', Kind::Ng)];

/// Single-glyph kinds. The first entry for a kind is its diagram glyph.
const GLYPHS: [(char, Kind); 16] = [
    ('歩', Kind::Fu),
    ('香', Kind::Ky),
    ('桂', Kind::Ke),
    ('銀', Kind::Gi),
    ('金', Kind::Ki),
    ('角', Kind::Ka),
    ('飛', Kind::Hi),
    ('玉', Kind::Ou),
    ('王', Kind::Ou),
    ('と', Kind::To),
    ('杏', Kind::Ny),
    ('圭', Kind::Nk),
    ('全', Kind::Ng),
    ('馬', Kind::Um),
    ('龍', Kind::Ry),
    ('竜', Kind::Ry),
];

const PRESET_NAMES: [(&str, Preset); 15] = [
    ("平手", Preset::Hirate),
    ("香落ち", Preset::Lance),
    ("右香落ち", Preset::RightLance),
    ("角落ち", Preset::Bishop),
    ("飛車落ち", Preset::Rook),
    ("飛香落ち", Preset::RookLance),
    ("二枚落ち", Preset::TwoPiece),
    ("三枚落ち", Preset::ThreePiece),
    ("四枚落ち", Preset::FourPiece),
    ("五枚落ち", Preset::FivePiece),
    ("左五枚落ち", Preset::LeftFivePiece),
    ("六枚落ち", Preset::SixPiece),
    ("八枚落ち", Preset::EightPiece),
    ("十枚落ち", Preset::TenPiece),
    ("その他", Preset::Other),
];

/// Words used on KIF move lines for game-ending events.
pub const SPECIAL_WORDS: [(&str, Special); 9] = [
    ("中断", Special::Chudan),
    ("投了", Special::Toryo),
    ("持将棋", Special::Jishogi),
    ("千日手", Special::Sennichite),
    ("詰み", Special::Tsumi),
    ("不詰", Special::Fuzumi),
    ("切れ負け", Special::TimeUp),
    ("反則勝ち", Special::IllegalAction),
    ("反則負け", Special::IllegalMove),
];

pub fn kind_from_glyph(glyph: char) -> Option<Kind> {
    GLYPHS.iter().find(|(g, _)| *g == glyph).map(|&(_, k)| k)
}

/// The kind written as 成 + `glyph`.
pub fn promoted_from_glyph(glyph: char) -> Option<Kind> {
    PROMOTED.iter().find(|(g, _)| *g == glyph).map(|&(_, k)| k)
}

/// Single glyph used in board diagrams and hand lists.
pub fn board_glyph(kind: Kind) -> char {
    GLYPHS
        .iter()
        .find(|(_, k)| *k == kind)
        .map_or('・', |&(g, _)| g)
}

/// Text used on move lines: 成香, 成桂 and 成銀 take two glyphs.
pub fn move_text(kind: Kind) -> String {
    match PROMOTED.iter().find(|(_, k)| *k == kind) {
        Some(&(base, _)) => format!("成{base}"),
        None => board_glyph(kind).to_string(),
    }
}

/// Looks up a 手合割 value, ignoring any whitespace in it.
pub fn preset_from_name(name: &str) -> Option<Preset> {
    let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    PRESET_NAMES
        .iter()
        .find(|(n, _)| *n == compact)
        .map(|&(_, p)| p)
}

pub fn preset_name(preset: Preset) -> &'static str {
    PRESET_NAMES
        .iter()
        .find(|(_, p)| *p == preset)
        .map_or("その他", |&(n, _)| n)
}

pub fn special_word(special: Special) -> &'static str {
    SPECIAL_WORDS
        .iter()
        .find(|(_, s)| *s == special)
        .map_or("中断", |&(w, _)| w)
}
