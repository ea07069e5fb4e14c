//! Full-width and kanji numerals.

use crate::NumeralError;

const ZENKAKU: [char; 10] = ['０', '１', '２', '３', '４', '５', '６', '７', '８', '９'];
const KANJI: [char; 11] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九', '十'];

/// Full-width digit to its value.
pub fn zen2n(c: char) -> Option<u8> {
    ZENKAKU.iter().position(|&z| z == c).map(|n| n as u8)
}

/// Kanji digit (〇 to 九) to its value.
pub fn kan2n(c: char) -> Option<u8> {
    KANJI[..10].iter().position(|&k| k == c).map(|n| n as u8)
}

/// Decodes a one or two glyph kanji numeral in 0..=19.
///
/// A single glyph is 〇 to 十; two glyphs must be 十 followed by 一 to 九.
/// Anything else, including every spelling of 20 and above, is an error.
pub fn kan2n2(text: &str) -> Result<u8, NumeralError> {
    let glyphs: Vec<char> = text.chars().collect();
    let value_of = |c: char| KANJI.iter().position(|&k| k == c);
    match glyphs.as_slice() {
        [] => Err(NumeralError::Empty),
        [single] => value_of(*single)
            .map(|n| n as u8)
            .ok_or_else(|| NumeralError::UnknownGlyph(text.to_string())),
        ['十', unit] => match value_of(*unit) {
            Some(n @ 1..=9) => Ok(10 + n as u8),
            Some(_) => Err(NumeralError::OutOfRange(text.to_string())),
            None => Err(NumeralError::UnknownGlyph(text.to_string())),
        },
        [tens, '十', ..] if value_of(*tens).is_some() => {
            Err(NumeralError::OutOfRange(text.to_string()))
        }
        _ if glyphs.iter().all(|&c| value_of(c).is_some()) => {
            Err(NumeralError::OutOfRange(text.to_string()))
        }
        _ => Err(NumeralError::UnknownGlyph(text.to_string())),
    }
}

/// Value 1..=9 as a full-width digit.
pub fn n2zen(n: u8) -> char {
    ZENKAKU[usize::from(n.min(9))]
}

/// Value 1..=9 as a kanji digit.
pub fn n2kan(n: u8) -> char {
    KANJI[usize::from(n.min(9))]
}

/// Inverse of [`kan2n2`] for 0..=19; larger values are clamped to 19.
pub fn n2kan2(n: u8) -> String {
    match n.min(19) {
        n @ 0..=10 => KANJI[usize::from(n)].to_string(),
        n => format!("十{}", KANJI[usize::from(n - 10)]),
    }
}
