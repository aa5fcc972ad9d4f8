//! GetPot text format
//!
//! Bracketed sections (`[name]` ... `[]`, nested `[./name]` ... `[../]`)
//! holding `name = value` lines, with `#` for comments and for
//! commented-out entries.

pub mod document;
pub mod reader;
pub mod writer;

pub use document::{parse_document, read_document, write_document, write_file};
pub use writer::{NEWLINE, SectionPrefix};
