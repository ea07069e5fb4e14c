//! Library side of the `jkf` command.
//!
//! - [`config`] - `jkf.toml` loading
//! - [`commands`] - reading, sniffing and rendering record files

pub mod commands;
pub mod config;
