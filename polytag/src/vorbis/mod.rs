//! Items for Vorbis comments
//!
//! ## File notes
//!
//! Vorbis comments are only read from and written to FLAC files, where the comments live in the
//! `VORBIS_COMMENT` block and pictures in `PICTURE` blocks.

pub(crate) mod read;
mod tag;
pub(crate) mod write;

pub use tag::VorbisComments;

/// The vendor string used for newly created comments
pub(crate) const DEFAULT_VENDOR: &str = concat!("polytag ", env!("CARGO_PKG_VERSION"));

// A case-insensitive field name that may consist of ASCII 0x20 through 0x7D, 0x3D ('=') excluded.
// ASCII 0x41 through 0x5A inclusive (A-Z) is to be considered equivalent to ASCII 0x61 through 0x7A inclusive (a-z).
pub(crate) fn verify_key(key: &str) -> bool {
	if key.is_empty() {
		return false;
	}

	key.bytes()
		.all(|byte| (0x20..=0x7D).contains(&byte) && byte != 0x3D)
}
