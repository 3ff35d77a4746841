//! Utilities for working with unsynchronized ID3v2 content
//!
//! Unsynchronisation inserts a `0x00` after every `0xFF` that could be mistaken for an MPEG frame
//! sync. Synchsafe integers only use the lower 7 bits of each byte for the same reason.

use crate::error::Result;

use std::borrow::Cow;

/// Undo unsynchronisation, dropping the `0x00` following every `0xFF`
///
/// Content without any `0xFF 0x00` pair is returned as-is.
pub(crate) fn resynchronize(content: &[u8]) -> Cow<'_, [u8]> {
	if !content.windows(2).any(|pair| pair == [0xFF, 0x00]) {
		return Cow::Borrowed(content);
	}

	let mut out = Vec::with_capacity(content.len());
	let mut after_ff = false;
	for &byte in content {
		if after_ff && byte == 0 {
			after_ff = false;
			continue;
		}

		out.push(byte);
		after_ff = byte == 0xFF;
	}

	Cow::Owned(out)
}

/// An integer that can be converted to and from a synchsafe representation
pub(crate) trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in 28 bits
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		if self > 0x0FFF_FFFF {
			crate::macros::err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3)
			| ((self & 0x7F_0000) >> 2)
			| ((self & 0x7F00) >> 1)
			| (self & 0x7F)
	}
}

#[cfg(test)]
mod tests {
	use super::{SynchsafeInteger, resynchronize};

	use std::borrow::Cow;

	#[test_log::test]
	fn resynchronize_content() {
		let content = [0xFF, 0x00, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00, 0x00];
		assert_eq!(
			&*resynchronize(&content),
			&[0xFF, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00]
		);

		// Only the first zero after 0xFF is inserted
		assert_eq!(&*resynchronize(&[0xFF, 0x00, 0x00]), &[0xFF, 0x00]);
		assert_eq!(&*resynchronize(&[0xFF, 0xFF, 0x00, 0xE0]), &[0xFF, 0xFF, 0xE0]);

		let untouched = [0xFF, 0x1A, 0xFF, 0xC0, 0x10, 0x01];
		assert!(matches!(resynchronize(&untouched), Cow::Borrowed(_)));
	}

	#[test_log::test]
	fn synchsafe_u32() {
		assert_eq!(0xFFF_FFFF_u32.synch().unwrap(), 0x7F7F_7F7F);
		assert_eq!(0x7F7F_7F7F_u32.unsynch(), 0xFFF_FFFF);
		assert_eq!(257_u32.synch().unwrap(), 0x0201);
		assert!(0x1000_0000_u32.synch().is_err());
	}
}
