//! Various configuration options to control polytag

mod parse_options;
mod write_options;

pub use parse_options::{ParseOptions, ParsingMode};
pub use write_options::{Id3v2Version, WriteOptions};
