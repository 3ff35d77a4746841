//! MPEG audio files
//!
//! Only the layout and the audio properties are handled here, the tags themselves are
//! [`Id3v2Tag`](crate::id3::v2::Id3v2Tag), [`ApeTag`](crate::ape::ApeTag) and
//! [`Id3v1Tag`](crate::id3::v1::Id3v1Tag).

mod constants;
pub(crate) mod header;
mod properties;
pub(crate) mod read;
pub(crate) mod write;
