use super::constants::{GENRES, ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use super::tag::Id3v1Tag;
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::err;
use crate::util::text::latin1_decode;

impl Id3v1Tag {
	/// Parse the 128 bytes of an ID3v1 tag
	///
	/// # Errors
	///
	/// * `reader` doesn't start with `"TAG"`
	/// * The year isn't made up of 4 digits, with [`ParsingMode::Strict`]
	pub(crate) fn parse(reader: [u8; ID3V1_TAG_SIZE], parse_mode: ParsingMode) -> Result<Self> {
		if reader[..3] != ID3V1_TAG_MARKER {
			err!(FakeTag);
		}

		let reader = &reader[3..];

		let mut tag = Self {
			title: decode_text(&reader[..30]),
			artist: decode_text(&reader[30..60]),
			album: decode_text(&reader[60..90]),
			year: try_parse_year(&reader[90..94], parse_mode)?,
			comment: None,
			track_number: None,
			genre: None,
		};

		// Determine the range of the comment (30 bytes for ID3v1 and 28 for ID3v1.1)
		// We check for the null terminator 28 bytes in, and for a non-zero track number after it.
		// A track number of 0 is invalid.
		let range = if reader[122] == 0 && reader[123] != 0 {
			tag.track_number = Some(reader[123]);

			94_usize..122
		} else {
			94..124
		};

		tag.comment = decode_text(&reader[range]);

		if usize::from(reader[124]) < GENRES.len() {
			tag.genre = Some(reader[124]);
		}

		Ok(tag)
	}
}

fn decode_text(data: &[u8]) -> Option<String> {
	let mut first_null_pos = data.len();
	if let Some(null_pos) = data.iter().position(|&b| b == 0) {
		if null_pos == 0 {
			return None;
		}

		if data[null_pos..].iter().any(|b| *b != b'\0') {
			log::warn!("ID3v1 text field contains trailing junk, skipping");
		}

		first_null_pos = null_pos;
	}

	let text = latin1_decode(&data[..first_null_pos]);
	let text = text.trim_end_matches(' ');
	if text.is_empty() {
		return None;
	}

	Some(text.to_owned())
}

fn try_parse_year(input: &[u8], parse_mode: ParsingMode) -> Result<Option<u16>> {
	let (num_digits, year) = input
		.iter()
		.take_while(|c| (**c).is_ascii_digit())
		.fold((0usize, 0u16), |(num_digits, year), c| {
			(num_digits + 1, year * 10 + u16::from(*c - b'0'))
		});
	if num_digits != 4 {
		// Most writers use "\0\0\0\0" for an empty year rather than "0000"
		if parse_mode == ParsingMode::Strict && input.iter().any(|b| *b != 0) {
			err!(TextDecode(
				"ID3v1 year field contains non-ASCII digit characters"
			));
		}

		return Ok(None);
	}

	Ok(Some(year))
}
