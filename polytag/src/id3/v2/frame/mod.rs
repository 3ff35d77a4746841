pub(super) mod content;
pub(super) mod read;

use crate::picture::Picture;
use crate::util::text::TextEncoding;

/// Represents an `ID3v2` frame
///
/// ## Outdated Frames
///
/// ### ID3v2.2
///
/// `ID3v2.2` frame IDs are 3 characters. When reading these tags, they are upgraded to their
/// `ID3v2.4` counterpart. A frame that can't be upgraded is dropped, as polytag will not write
/// `ID3v2.2` tags.
///
/// ### ID3v2.3
///
/// `TYER` and `TORY` are upgraded to `TDRC` and `TDOR` respectively, and downgraded again when
/// writing an `ID3v2.3` tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
	pub(crate) id: String,
	pub(crate) value: FrameValue,
}

impl Frame {
	pub(crate) fn new(id: impl Into<String>, value: FrameValue) -> Self {
		Self {
			id: id.into(),
			value,
		}
	}

	/// The frame ID, always 4 characters
	pub fn id(&self) -> &str {
		&self.id
	}

	/// The decoded frame content
	pub fn value(&self) -> &FrameValue {
		&self.value
	}

	/// Whether the frame has no meaningful content
	pub(crate) fn is_empty(&self) -> bool {
		match &self.value {
			FrameValue::Text { values, .. } | FrameValue::UserText { values, .. } => {
				values.iter().all(String::is_empty)
			},
			FrameValue::Comment { content, .. } => content.is_empty(),
			FrameValue::Picture { picture, .. } => picture.data.is_empty(),
			FrameValue::UniqueFileId { identifier, .. } => identifier.is_empty(),
			FrameValue::Binary(data) => data.is_empty(),
			FrameValue::Popularimeter { .. } | FrameValue::PlayCount(_) => false,
		}
	}
}

/// The content of a [`Frame`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrameValue {
	/// A "T..." frame (excluding TXXX), which may hold multiple values
	Text {
		/// The encoding the frame was read with
		encoding: TextEncoding,
		/// The values
		values: Vec<String>,
	},
	/// A "TXXX" frame
	UserText {
		/// The encoding the frame was read with
		encoding: TextEncoding,
		/// The description, identifying the frame
		description: String,
		/// The values
		values: Vec<String>,
	},
	/// A "COMM" or "USLT" frame
	Comment {
		/// The encoding the frame was read with
		encoding: TextEncoding,
		/// An ISO-639-2 language code
		language: [u8; 3],
		/// The description, identifying the frame along with the language
		description: String,
		/// The actual text
		content: String,
	},
	/// An "APIC" frame
	Picture {
		/// The encoding of the description
		encoding: TextEncoding,
		/// The picture
		picture: Picture,
	},
	/// A "POPM" frame
	Popularimeter {
		/// The email of the user the rating belongs to
		email: String,
		/// The rating, 1 to 255 with 0 being unknown
		rating: u8,
		/// The number of times the track has been played
		counter: u64,
	},
	/// A "PCNT" frame
	PlayCount(u64),
	/// A "UFID" frame
	UniqueFileId {
		/// The owner of the identifier, usually a URL
		owner: String,
		/// Up to 64 bytes of binary data
		identifier: Vec<u8>,
	},
	/// Any other frame, kept as-is
	Binary(Vec<u8>),
}

/// Various flags to describe the content of an item
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The group identifier the frame belongs to
	pub grouping_identity: bool,
	/// Frame is zlib compressed
	///
	/// It is **required** `data_length_indicator` be set if this is set.
	pub compression: bool,
	/// Frame encryption method symbol
	pub encryption: bool,
	/// Frame is unsynchronised
	pub unsynchronisation: bool,
	/// Frame has a data length indicator
	pub data_length_indicator: bool,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	pub(crate) fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: flags & 0x0040 == 0x0040,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	pub(crate) fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: flags & 0x0020 == 0x0020,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			unsynchronisation: false,
			data_length_indicator: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::FrameFlags;

	#[test_log::test]
	fn parse_flags() {
		let flags = FrameFlags::parse_id3v24(0x0049);
		assert!(flags.grouping_identity);
		assert!(flags.compression);
		assert!(flags.data_length_indicator);
		assert!(!flags.unsynchronisation);

		let flags = FrameFlags::parse_id3v23(0x00C0);
		assert!(flags.compression);
		assert!(flags.encryption);
		assert!(!flags.data_length_indicator);
	}
}
