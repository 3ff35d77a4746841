//! The 128 byte trailer tag
//!
//! An [`Id3v1Tag`] has fixed width Latin-1 fields and no room for anything else. Only the keys
//! `TITLE`, `ARTIST`, `ALBUM`, `DATE`, `COMMENT`, `TRACKNUMBER` and `GENRE` can be stored.
//!
//! The genre is an index into [`GENRES`], and a track number of 0 means "no track number". A
//! track number can only be written if the comment is short enough to leave room for it
//! (ID3v1.1).

pub(crate) mod constants;
pub(crate) mod read;
pub(crate) mod tag;
pub(crate) mod write;

pub use constants::GENRES;
pub use tag::Id3v1Tag;
