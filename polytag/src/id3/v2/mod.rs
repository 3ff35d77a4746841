//! ID3v2 items and utilities
//!
//! ## Important notes
//!
//! See:
//!
//! * [`Id3v2Tag`]
//! * [`Frame`]

mod frame;
pub(crate) mod header;
pub(crate) mod read;
mod tag;
pub(crate) mod util;
pub(crate) mod write;

pub use frame::{Frame, FrameValue};
pub use tag::Id3v2Tag;
