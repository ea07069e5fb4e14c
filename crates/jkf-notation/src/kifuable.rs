//! Productions shared by the KIF and KI2 grammars.

use crate::kanji;
use crate::numeral::{kan2n, kan2n2, zen2n};
use crate::peg::{Backtrack, PResult, Scanner};
use crate::ParseError;
use jkf_core::{
    Board, Color, Hand, Header, InitialData, InitialPosition, Kind, Piece, Preset, Row, Special,
    Square,
};

/// Header keys holding each side's pieces in hand, two spellings per side.
const HAND_KEYS: [[&str; 2]; 2] = [["先手の持駒", "下手の持駒"], ["後手の持駒", "上手の持駒"]];

const TURN_KEY: &str = "手番";

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Rest of the current line, possibly empty.
pub fn nonls<'a>(s: &mut Scanner<'a>) -> &'a str {
    s.take_while(|c| !is_line_break(c))
}

/// Trailing blanks and one line break.
pub fn newline(s: &mut Scanner<'_>) -> PResult<()> {
    s.seq(|s| {
        s.take_while(|c| c == ' ' || c == '\t');
        if s.literal("\n").is_ok() {
            return Ok(());
        }
        s.literal("\r")?;
        s.opt(|s| s.literal("\n"));
        Ok(())
    })
}

/// A `#` line.
pub fn skipline(s: &mut Scanner<'_>) -> PResult<()> {
    s.seq(|s| {
        s.literal("#")?;
        nonls(s);
        newline(s)
    })
}

/// One or more line breaks followed by any `#` lines.
pub fn nl(s: &mut Scanner<'_>) -> PResult<()> {
    s.seq(|s| {
        s.many1(newline)?;
        s.many(skipline);
        Ok(())
    })
}

/// [`nl`] or end of input, for a last line without a trailing break.
pub fn line_end(s: &mut Scanner<'_>) -> PResult<()> {
    if nl(s).is_ok() {
        return Ok(());
    }
    s.seq(|s| {
        s.take_while(|c| c == ' ' || c == '\t');
        s.eof()
    })
}

/// A header line; `None` for lines that carry no entry (盤面回転).
pub fn header(s: &mut Scanner<'_>) -> PResult<Option<(String, String)>> {
    s.choice(&[&header_entry, &header_turn, &header_rotation])
}

fn header_entry(s: &mut Scanner<'_>) -> PResult<Option<(String, String)>> {
    let key = s.take_while1(|c| c != '：' && !is_line_break(c))?;
    s.literal("：")?;
    let value = nonls(s);
    line_end(s)?;
    Ok(Some((key.to_string(), value.to_string())))
}

fn header_turn(s: &mut Scanner<'_>) -> PResult<Option<(String, String)>> {
    s.take_while(|c| c == ' ');
    let side = turn(s)?;
    s.literal("手番")?;
    line_end(s)?;
    Ok(Some((TURN_KEY.to_string(), side.to_string())))
}

fn header_rotation(s: &mut Scanner<'_>) -> PResult<Option<(String, String)>> {
    s.literal("盤面回転")?;
    line_end(s)?;
    Ok(None)
}

/// Collects header lines into `header`.
pub fn headers(s: &mut Scanner<'_>, header: &mut Header) {
    for (key, value) in s.many(self::header).into_iter().flatten() {
        header.insert(key, value);
    }
}

/// 先 後 上 下
pub fn turn(s: &mut Scanner<'_>) -> PResult<char> {
    s.one_of("先後上下")
}

/// Owner marker of a diagram cell.
pub fn teban(s: &mut Scanner<'_>) -> PResult<Color> {
    if s.one_of(" +^").is_ok() {
        return Ok(Color::Black);
    }
    s.one_of("vV").map(|_| Color::White)
}

/// A piece kind: an optional 成 prefix and one glyph.
pub fn piece(s: &mut Scanner<'_>) -> PResult<Kind> {
    s.seq(|s| {
        let promoted = s.opt(|s| s.literal("成")).is_some();
        let glyph = s.char_where(|c| kanji::kind_from_glyph(c).is_some())?;
        let kind = if promoted {
            kanji::promoted_from_glyph(glyph)
        } else {
            kanji::kind_from_glyph(glyph)
        };
        kind.map_or_else(|| s.fail(), Ok)
    })
}

/// A full-width file digit followed by a kanji rank digit, e.g. ７六.
pub fn square(s: &mut Scanner<'_>) -> PResult<Square> {
    s.seq(|s| {
        let x = s.char_where(|c| zen2n(c).is_some())?;
        let y = s.char_where(|c| kan2n(c).is_some())?;
        match (zen2n(x), kan2n(y)) {
            (Some(x), Some(y)) => Square::new(x, y).map_or_else(|| s.fail(), Ok),
            _ => s.fail(),
        }
    })
}

/// A `*` comment, or a `&` annotation kept with its marker.
pub fn comment(s: &mut Scanner<'_>) -> PResult<String> {
    s.seq(|s| {
        let marker = s.one_of("*&")?;
        let text = nonls(s);
        line_end(s)?;
        Ok(if marker == '&' {
            format!("&{text}")
        } else {
            text.to_string()
        })
    })
}

/// Comments before the first move.
pub fn firstboard(s: &mut Scanner<'_>) -> Vec<String> {
    s.many(comment)
}

/// `変化：N手` followed by a line break.
pub fn fork_header(s: &mut Scanner<'_>) -> PResult<usize> {
    s.seq(|s| {
        s.literal("変化：")?;
        s.take_while(|c| c == ' ');
        let te = s.number()?;
        s.literal("手")?;
        nl(s)?;
        Ok(te)
    })
}

/// A `まで…` summary line.
pub fn result(s: &mut Scanner<'_>) -> PResult<Special> {
    s.seq(|s| {
        s.literal("まで")?;
        s.number::<usize>()?;
        s.literal("手")?;
        let special = s.choice(&[&result_win, &result_time_up, &result_plain])?;
        line_end(s)?;
        Ok(special)
    })
}

fn result_win(s: &mut Scanner<'_>) -> PResult<Special> {
    s.literal("で")?;
    turn(s)?;
    s.literal("手の")?;
    if s.literal("勝ち").is_ok() {
        return Ok(Special::Toryo);
    }
    s.literal("反則")?;
    if s.literal("勝ち").is_ok() {
        return Ok(Special::IllegalAction);
    }
    s.literal("負け")?;
    Ok(Special::IllegalMove)
}

fn result_time_up(s: &mut Scanner<'_>) -> PResult<Special> {
    s.literal("で時間切れにより")?;
    turn(s)?;
    s.literal("手の勝ち")?;
    Ok(Special::TimeUp)
}

fn result_plain(s: &mut Scanner<'_>) -> PResult<Special> {
    const WORDS: [(&str, Special); 4] = [
        ("で中断", Special::Chudan),
        ("で持将棋", Special::Jishogi),
        ("で千日手", Special::Sennichite),
        ("で不詰", Special::Fuzumi),
    ];
    for (word, special) in WORDS {
        if s.literal(word).is_ok() {
            return Ok(special);
        }
    }
    s.opt(|s| s.literal("で"));
    s.literal("詰")?;
    s.opt(|s| s.literal("み"));
    Ok(Special::Tsumi)
}

/// A framed board diagram of exactly nine rows.
pub fn initial_board(s: &mut Scanner<'_>) -> PResult<Board> {
    s.seq(|s| {
        s.opt(file_numbers);
        s.opt(frame);
        let rows: [Row; 9] = s
            .repeat(9, board_row)?
            .try_into()
            .map_err(|_| Backtrack)?;
        s.opt(frame);
        Ok(Board::from_rows(&rows))
    })
}

/// The `  ９ ８ ７ ... １` line above a diagram.
fn file_numbers(s: &mut Scanner<'_>) -> PResult<()> {
    s.literal(" ")?;
    s.take_while1(|c| matches!(c, ' ' | '　' | '１'..='９'))?;
    nl(s)
}

fn frame(s: &mut Scanner<'_>) -> PResult<()> {
    s.literal("+")?;
    nonls(s);
    nl(s)
}

fn board_row(s: &mut Scanner<'_>) -> PResult<Row> {
    s.literal("|")?;
    let cells: Row = s.repeat(9, cell)?.try_into().map_err(|_| Backtrack)?;
    s.literal("|")?;
    s.take_while1(|c| !is_line_break(c))?;
    nl(s)?;
    Ok(cells)
}

fn cell(s: &mut Scanner<'_>) -> PResult<Option<Piece>> {
    let occupied = s.seq(|s| {
        let color = teban(s)?;
        let kind = piece(s)?;
        Ok(Piece::new(color, kind))
    });
    match occupied {
        Ok(piece) => Ok(Some(piece)),
        Err(Backtrack) => s.literal(" ・").map(|_| None),
    }
}

/// Parses a hand list such as `飛二　角　歩十八　` or `なし`.
pub fn make_hand(text: &str) -> Result<Hand, ParseError> {
    let mut hand = Hand::default();
    for item in text
        .split(|c: char| c == '　' || c == ' ')
        .filter(|item| !item.is_empty() && *item != "なし")
    {
        let mut chars = item.chars();
        let kind = chars
            .next()
            .and_then(kanji::kind_from_glyph)
            .filter(|kind| kind.is_hand_kind())
            .ok_or_else(|| ParseError::Hand(text.to_string()))?;
        let count = match chars.as_str() {
            "" => 1,
            digits => kan2n2(digits)?,
        };
        hand.add(kind, count);
    }
    Ok(hand)
}

/// Removes the side-to-move and hand entries from `header`.
pub fn take_header_data(header: &mut Header) -> Result<(Color, [Hand; 2]), ParseError> {
    let color = match header.remove(TURN_KEY) {
        Some(value) if value.trim_start().starts_with(['後', '上']) => Color::White,
        _ => Color::Black,
    };
    let mut hands = [Hand::default(); 2];
    for (hand, keys) in hands.iter_mut().zip(HAND_KEYS) {
        let text = keys.iter().find_map(|key| header.get(key).map(str::to_string));
        if let Some(text) = text {
            *hand = make_hand(&text)?;
        }
        for key in keys {
            header.remove(key);
        }
    }
    Ok((color, hands))
}

/// Decides the initial position from an optional diagram and the header.
///
/// A diagram gives `OTHER` with data taken from the header; otherwise a
/// 手合割 entry naming a preset other than その他 gives that preset.
pub fn initial_position(
    board: Option<Board>,
    header: &mut Header,
) -> Result<Option<InitialPosition>, ParseError> {
    if let Some(board) = board {
        let (color, hands) = take_header_data(header)?;
        return Ok(Some(InitialPosition {
            preset: Preset::Other,
            data: Some(InitialData {
                board,
                hands,
                color,
            }),
        }));
    }
    Ok(header
        .get("手合割")
        .and_then(kanji::preset_from_name)
        .filter(|preset| *preset != Preset::Other)
        .map(InitialPosition::preset))
}
