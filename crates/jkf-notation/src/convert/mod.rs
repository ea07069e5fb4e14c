//! Record to text converters.
//!
//! Every converter is a pure function of the record: `convert(&Record) -> String`.

pub mod csa;
pub mod kif;
