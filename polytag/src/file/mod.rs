//! Generic file handling utilities

pub(crate) mod container;
mod file_type;
mod tag_file;

pub use file_type::{EXTENSIONS, FileType};
pub use tag_file::TagFile;
