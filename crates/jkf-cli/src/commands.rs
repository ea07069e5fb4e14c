//! What the `convert` and `detect` subcommands do, apart from argument parsing.

use anyhow::Context;
use jkf_core::Record;
use jkf_notation::{Error, Format};
use std::path::Path;

/// Reads a record file as UTF-8, dropping a leading byte order mark.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// Parses `path` by its extension, or by content when `sniff` is set.
pub fn load(path: &Path, sniff: bool) -> anyhow::Result<(Format, Record)> {
    let text = read_input(path)?;
    let (format, record) = if sniff {
        jkf_notation::sniff(&text)?
    } else {
        let format = Format::from_extension(path)?;
        let record = jkf_notation::parse_as(format, &text)
            .with_context(|| format!("Failed to parse {} as {}", path.display(), format))?;
        (format, record)
    };
    tracing::info!("Read {} as {}", path.display(), format);
    Ok((format, record))
}

/// Renders `record` as `format`, pretty-printing JKF when `pretty_json` is set.
pub fn render(format: Format, record: &Record, pretty_json: bool) -> Result<String, Error> {
    match format {
        Format::Jkf if pretty_json => Ok(serde_json::to_string_pretty(record)?),
        _ => jkf_notation::convert_to(format, record),
    }
}

/// Reads `input` and renders it as `to`.
pub fn convert(input: &Path, to: Format, sniff: bool, pretty_json: bool) -> anyhow::Result<String> {
    let (_, record) = load(input, sniff)?;
    tracing::info!("Converting {} to {}", input.display(), to);
    Ok(render(to, &record, pretty_json)?)
}

/// The format content sniffing selects for `input`.
pub fn detect(input: &Path) -> anyhow::Result<Format> {
    let (format, _) = load(input, true)?;
    Ok(format)
}
