//! FLAC files
//!
//! ## File notes
//!
//! * Vorbis comments are stored in the `VORBIS_COMMENT` block, and pictures in their own
//!   `PICTURE` blocks. Both are exposed through [`VorbisComments`](crate::vorbis::VorbisComments).
//! * An ID3v2 tag is read, and rewritten when present, but never created. Its use is discouraged
//!   by the format.

pub(crate) mod block;
mod properties;
pub(crate) mod read;
pub(crate) mod write;
