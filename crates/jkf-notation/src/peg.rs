//! Backtracking grammar engine.
//!
//! Rules are plain functions or closures over a [`Scanner`] returning
//! [`PResult`]. A failed rule yields [`Backtrack`], never a value, so rules
//! that succeed with an empty result (`Ok(None)`, `Ok(vec![])`) stay distinct
//! from rules that did not match. Every combinator that can fail restores the
//! cursor before returning `Err`.

use crate::ParseError;
use std::str::FromStr;

/// Marker for "this rule did not match here".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backtrack;

pub type PResult<T> = Result<T, Backtrack>;

/// A rule usable as an alternative in [`Scanner::choice`].
pub type Rule<'r, 'a, T> = &'r dyn Fn(&mut Scanner<'a>) -> PResult<T>;

/// Cursor over the input text.
///
/// `furthest` is the highest byte offset any attempt reached and is only
/// used to report syntax errors.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    furthest: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner {
            src,
            pos: 0,
            furthest: 0,
        }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Records the current position as reached and backtracks.
    pub fn fail<T>(&mut self) -> PResult<T> {
        self.furthest = self.furthest.max(self.pos);
        Err(Backtrack)
    }

    /// Matches `lit` exactly.
    pub fn literal(&mut self, lit: &str) -> PResult<&'a str> {
        if self.rest().starts_with(lit) {
            let start = self.pos;
            self.pos += lit.len();
            Ok(&self.src[start..self.pos])
        } else {
            self.fail()
        }
    }

    /// Matches one character satisfying `pred`.
    pub fn char_where(&mut self, pred: impl FnOnce(char) -> bool) -> PResult<char> {
        match self.peek() {
            Some(c) if pred(c) => {
                self.pos += c.len_utf8();
                Ok(c)
            }
            _ => self.fail(),
        }
    }

    /// Matches one character from `set`.
    pub fn one_of(&mut self, set: &str) -> PResult<char> {
        self.char_where(|c| set.contains(c))
    }

    /// Consumes characters while `pred` holds. Never fails.
    pub fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(rest.len(), |(i, _)| i);
        let start = self.pos;
        self.pos += len;
        &self.src[start..self.pos]
    }

    /// Like [`Scanner::take_while`] but fails on an empty match.
    pub fn take_while1(&mut self, pred: impl FnMut(char) -> bool) -> PResult<&'a str> {
        let matched = self.take_while(pred);
        if matched.is_empty() {
            self.fail()
        } else {
            Ok(matched)
        }
    }

    /// Matches ASCII digits and parses them; overflow is a mismatch.
    pub fn number<N: FromStr>(&mut self) -> PResult<N> {
        self.seq(|s| {
            let digits = s.take_while1(|c| c.is_ascii_digit())?;
            digits.parse().or_else(|_| s.fail())
        })
    }

    pub fn eof(&mut self) -> PResult<()> {
        if self.is_eof() {
            Ok(())
        } else {
            self.fail()
        }
    }

    /// Runs `rule` as one unit: on failure the cursor is restored.
    pub fn seq<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let start = self.pos;
        let result = rule(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    /// Tries each alternative in order; the first success wins.
    pub fn choice<T>(&mut self, alternatives: &[Rule<'_, 'a, T>]) -> PResult<T> {
        for alternative in alternatives {
            if let Ok(value) = self.seq(|s| alternative(s)) {
                return Ok(value);
            }
        }
        Err(Backtrack)
    }

    /// Zero or more repetitions. Stops when `rule` fails or stops consuming.
    pub fn many<T>(&mut self, mut rule: impl FnMut(&mut Self) -> PResult<T>) -> Vec<T> {
        let mut items = Vec::new();
        loop {
            let start = self.pos;
            match self.seq(&mut rule) {
                Ok(item) => {
                    items.push(item);
                    if self.pos == start {
                        break;
                    }
                }
                Err(Backtrack) => break,
            }
        }
        items
    }

    /// One or more repetitions.
    pub fn many1<T>(&mut self, rule: impl FnMut(&mut Self) -> PResult<T>) -> PResult<Vec<T>> {
        let items = self.many(rule);
        if items.is_empty() {
            self.fail()
        } else {
            Ok(items)
        }
    }

    /// Exactly `n` repetitions, all or nothing.
    pub fn repeat<T>(
        &mut self,
        n: usize,
        mut rule: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        self.seq(|s| (0..n).map(|_| rule(s)).collect())
    }

    /// Optional match; `None` when `rule` fails.
    pub fn opt<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        self.seq(rule).ok()
    }

    /// Runs the top rule, requires the whole input to be consumed and
    /// converts a mismatch into a [`ParseError::Syntax`].
    pub fn finish<T>(
        mut self,
        rule: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> Result<T, ParseError> {
        let result = self.seq(|s| {
            let value = rule(s)?;
            s.eof()?;
            Ok(value)
        });
        result.map_err(|Backtrack| self.syntax_error())
    }

    fn syntax_error(&self) -> ParseError {
        let offset = self.furthest.max(self.pos);
        let before = &self.src[..offset];
        let line = before.matches('\n').count() + 1;
        let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        let snippet: String = self.src[offset..]
            .chars()
            .take_while(|&c| c != '\n' && c != '\r')
            .take(16)
            .collect();
        let found = if snippet.is_empty() {
            if offset >= self.src.len() {
                "end of input".to_string()
            } else {
                "line break".to_string()
            }
        } else {
            format!("'{snippet}'")
        };
        ParseError::Syntax {
            offset,
            line,
            column,
            found,
        }
    }
}
