//! Shogi notation parsers and converters for JKF records.
//!
//! This crate reads and writes the plain-text game record formats:
//! - [`kif`], [`ki2`] and [`csa`] parse text into a [`Record`]
//! - [`convert`] renders a [`Record`] as KIF or CSA
//! - [`Format`], [`parse_as`] and [`sniff`] pick a notation by file
//!   extension or by trying each parser in turn
//!
//! JKF JSON itself is handled through the serde implementations in
//! `jkf-core`.

mod error;
mod forks;
mod kanji;
mod kifuable;
mod numeral;
mod peg;

pub mod convert;
pub mod csa;
pub mod ki2;
pub mod kif;

pub use error::{Error, NumeralError, ParseError};

use jkf_core::Record;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A supported text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Kif,
    Ki2,
    Csa,
    /// JKF JSON.
    Jkf,
}

impl Format {
    /// The order [`sniff`] tries formats in.
    pub const SNIFF_ORDER: [Format; 4] = [Format::Kif, Format::Ki2, Format::Csa, Format::Jkf];

    pub const fn name(self) -> &'static str {
        match self {
            Format::Kif => "kif",
            Format::Ki2 => "ki2",
            Format::Csa => "csa",
            Format::Jkf => "jkf",
        }
    }

    /// Picks the format from a file extension, ignoring case.
    pub fn from_extension(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("kif" | "kifu") => Ok(Format::Kif),
            Some("ki2" | "ki2u") => Ok(Format::Ki2),
            Some("csa") => Ok(Format::Csa),
            Some("jkf" | "json") => Ok(Format::Jkf),
            _ => Err(Error::FileType(path.display().to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::SNIFF_ORDER
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::FileType(s.to_string()))
    }
}

/// Parses `text` as `format`.
pub fn parse_as(format: Format, text: &str) -> Result<Record, Error> {
    match format {
        Format::Kif => Ok(kif::parse(text)?),
        Format::Ki2 => Ok(ki2::parse(text)?),
        Format::Csa => Ok(csa::parse(text)?),
        Format::Jkf => Ok(serde_json::from_str(text)?),
    }
}

/// Renders `record` as `format`. KI2 output is not supported.
pub fn convert_to(format: Format, record: &Record) -> Result<String, Error> {
    match format {
        Format::Kif => Ok(convert::kif::convert(record)),
        Format::Csa => Ok(convert::csa::convert(record)),
        Format::Jkf => Ok(serde_json::to_string(record)?),
        Format::Ki2 => Err(Error::NoConverter(format)),
    }
}

/// Tries every format in [`Format::SNIFF_ORDER`] and returns the first that
/// parses.
///
/// When none does, the error carries the last failure only.
pub fn sniff(text: &str) -> Result<(Format, Record), Error> {
    let mut last = None;
    for format in Format::SNIFF_ORDER {
        match parse_as(format, text) {
            Ok(record) => {
                tracing::debug!("Detected {} notation", format);
                return Ok((format, record));
            }
            Err(err) => {
                tracing::debug!("Not {}: {}", format, err);
                last = Some(err);
            }
        }
    }
    Err(Error::FileType(
        last.map_or_else(|| "no format matched".to_string(), |err| err.to_string()),
    ))
}

/// Parses `text` in whichever format accepts it first.
pub fn parse_any(text: &str) -> Result<Record, Error> {
    sniff(text).map(|(_, record)| record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions() {
        let cases = [
            ("a.kif", Format::Kif),
            ("a.KIFU", Format::Kif),
            ("a.ki2", Format::Ki2),
            ("a.ki2u", Format::Ki2),
            ("a.csa", Format::Csa),
            ("a.jkf", Format::Jkf),
            ("a.json", Format::Jkf),
        ];
        for (name, format) in cases {
            assert_eq!(Format::from_extension(Path::new(name)).unwrap(), format);
        }
        assert!(matches!(
            Format::from_extension(Path::new("a.pgn")),
            Err(Error::FileType(_))
        ));
        assert!(Format::from_extension(Path::new("noext")).is_err());
    }

    #[test]
    fn names_round_trip() {
        for format in Format::SNIFF_ORDER {
            assert_eq!(format.to_string().parse::<Format>().unwrap(), format);
        }
        assert!("pgn".parse::<Format>().is_err());
    }

    #[test]
    fn ki2_has_no_converter() {
        let err = convert_to(Format::Ki2, &Record::default()).unwrap_err();
        assert!(matches!(err, Error::NoConverter(Format::Ki2)));
    }

    #[test]
    fn sniff_order() {
        assert_eq!(sniff("").unwrap().0, Format::Kif);
        assert_eq!(sniff("先手：a\n").unwrap().0, Format::Kif);
        assert_eq!(sniff("▲７六歩　△３四歩\n").unwrap().0, Format::Ki2);
        assert_eq!(sniff("V2.2\nPI\n+\n+7776FU\n").unwrap().0, Format::Csa);
        assert_eq!(sniff(r#"{"header":{},"moves":[{}]}"#).unwrap().0, Format::Jkf);
    }

    #[test]
    fn sniff_reports_last_failure() {
        let err = sniff("{not json").unwrap_err();
        match err {
            Error::FileType(message) => assert!(message.contains("JSON"), "{message}"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
