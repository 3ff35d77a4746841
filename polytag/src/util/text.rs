use crate::error::{ErrorKind, PolytagError, Result};

/// An error that occurs while encoding text into a fixed encoding
#[derive(Copy, Clone, Debug)]
pub struct TextEncodingError {
	encoding: TextEncoding,
	valid_up_to: usize,
}

impl TextEncodingError {
	/// The encoding that was attempted
	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// The number of characters that could be encoded before the failure
	pub fn valid_up_to(&self) -> usize {
		self.valid_up_to
	}
}

impl core::fmt::Display for TextEncodingError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(
			f,
			"{} cannot represent the character at index {}",
			self.encoding.name(),
			self.valid_up_to
		)
	}
}

impl core::error::Error for TextEncodingError {}

/// The text encodings used by ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from its ID3v2 encoding byte
	///
	/// Returns `None` for anything above 3.
	pub fn from_u8(byte: u8) -> Option<Self> {
		Some(match byte {
			0 => Self::Latin1,
			1 => Self::UTF16,
			2 => Self::UTF16BE,
			3 => Self::UTF8,
			_ => return None,
		})
	}

	fn name(self) -> &'static str {
		match self {
			TextEncoding::Latin1 => "Latin-1",
			TextEncoding::UTF16 => "UTF-16",
			TextEncoding::UTF16BE => "UTF-16 BE",
			TextEncoding::UTF8 => "UTF-8",
		}
	}

	fn unit_len(self) -> usize {
		match self {
			TextEncoding::Latin1 | TextEncoding::UTF8 => 1,
			TextEncoding::UTF16 | TextEncoding::UTF16BE => 2,
		}
	}

	pub(crate) fn verify_latin1(text: &str) -> bool {
		text.chars().all(|c| u32::from(c) <= 0xFF)
	}

	/// Encode `text`, optionally followed by a null terminator
	///
	/// With `lossy`, characters outside of Latin-1 become `?`.
	pub(crate) fn encode(
		self,
		text: &str,
		terminated: bool,
		lossy: bool,
	) -> std::result::Result<Vec<u8>, TextEncodingError> {
		let mut out = match self {
			TextEncoding::Latin1 => latin1_encode(text, lossy).collect::<std::result::Result<_, _>>()?,
			TextEncoding::UTF16 => utf16_encode(text, u16::to_le_bytes, true),
			TextEncoding::UTF16BE => utf16_encode(text, u16::to_be_bytes, false),
			TextEncoding::UTF8 => text.as_bytes().to_vec(),
		};

		if terminated {
			out.resize(out.len() + self.unit_len(), 0);
		}

		Ok(out)
	}

	/// Decode a complete string, trailing nulls are dropped
	pub(crate) fn decode(self, bytes: &[u8]) -> Result<String> {
		if bytes.is_empty() {
			return Ok(String::new());
		}

		match self {
			TextEncoding::Latin1 => Ok(latin1_decode(bytes)),
			TextEncoding::UTF8 => utf8_decode(bytes.to_vec())
				.map_err(|_| PolytagError::new(ErrorKind::TextDecode("Expected a UTF-8 string"))),
			TextEncoding::UTF16BE => utf16_decode(bytes, u16::from_be_bytes),
			TextEncoding::UTF16 => {
				if bytes.len() % 2 != 0 {
					return Err(PolytagError::new(ErrorKind::TextDecode(
						"UTF-16 string has an odd length",
					)));
				}

				match bytes {
					[0xFE, 0xFF, rest @ ..] => utf16_decode(rest, u16::from_be_bytes),
					[0xFF, 0xFE, rest @ ..] => utf16_decode(rest, u16::from_le_bytes),
					// No BOM, assume little endian
					_ => utf16_decode(bytes, u16::from_le_bytes),
				}
			},
		}
	}
}

/// Decode everything left in `reader`
pub(crate) fn read_text(reader: &mut &[u8], encoding: TextEncoding) -> Result<String> {
	let text = encoding.decode(*reader);
	*reader = &[];
	text
}

/// Decode up to (and consume) the next null terminator
///
/// A missing terminator is tolerated, the rest of `reader` is the string.
pub(crate) fn read_terminated_text(reader: &mut &[u8], encoding: TextEncoding) -> Result<String> {
	let unit = encoding.unit_len();
	let data: &[u8] = *reader;

	let end = data
		.chunks_exact(unit)
		.position(|c| c.iter().all(|b| *b == 0))
		.map(|units| units * unit);

	let (text, rest) = match end {
		Some(end) => (&data[..end], &data[end + unit..]),
		None => (&data[..data.len() - data.len() % unit], &[][..]),
	};

	let text = encoding.decode(text);
	*reader = rest;
	text
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
	bytes[..end].iter().copied().map(char::from).collect()
}

pub(crate) fn latin1_encode(
	s: &str,
	lossy: bool,
) -> impl Iterator<Item = std::result::Result<u8, TextEncodingError>> {
	s.chars().enumerate().map(move |(index, c)| match u8::try_from(c) {
		Ok(byte) => Ok(byte),
		Err(_) if lossy => Ok(b'?'),
		Err(_) => Err(TextEncodingError {
			encoding: TextEncoding::Latin1,
			valid_up_to: index,
		}),
	})
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	let mut text = String::from_utf8(bytes)?;
	trim_nulls(&mut text);
	Ok(text)
}

pub(crate) fn utf8_decode_str(bytes: &[u8]) -> Result<&str> {
	Ok(std::str::from_utf8(bytes)?.trim_end_matches('\0'))
}

fn utf16_decode(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
	// Joined values may each carry their own BOM
	let units = bytes
		.chunks_exact(2)
		.map(|pair| [pair[0], pair[1]])
		.filter(|pair| !matches!(pair, [0xFF, 0xFE] | [0xFE, 0xFF]))
		.map(to_unit)
		.collect::<Vec<u16>>();

	let mut text = String::from_utf16(&units)
		.map_err(|_| PolytagError::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))?;
	trim_nulls(&mut text);
	Ok(text)
}

fn trim_nulls(text: &mut String) {
	let len = text.trim_end_matches('\0').len();
	text.truncate(len);
}

fn utf16_encode(text: &str, to_bytes: fn(u16) -> [u8; 2], bom: bool) -> Vec<u8> {
	let bom = bom.then_some(0xFEFF_u16);
	bom.into_iter()
		.chain(text.encode_utf16())
		.flat_map(to_bytes)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::{TextEncoding, read_terminated_text, read_text};

	const SAMPLE: &str = "s\u{00e9}ance\u{00b0}";
	const SAMPLE_BE: [u8; 14] = [
		0x00, 0x73, 0x00, 0xE9, 0x00, 0x61, 0x00, 0x6E, 0x00, 0x63, 0x00, 0x65, 0x00, 0xB0,
	];

	#[test_log::test]
	fn utf16_byte_order() {
		let mut with_be_bom = vec![0xFE, 0xFF];
		with_be_bom.extend(SAMPLE_BE);

		let mut with_le_bom = vec![0xFF, 0xFE];
		with_le_bom.extend(SAMPLE_BE.chunks(2).flat_map(|c| [c[1], c[0]]));

		assert_eq!(TextEncoding::UTF16.decode(&with_be_bom).unwrap(), SAMPLE);
		assert_eq!(TextEncoding::UTF16.decode(&with_le_bom).unwrap(), SAMPLE);
		assert_eq!(TextEncoding::UTF16BE.decode(&SAMPLE_BE).unwrap(), SAMPLE);

		assert!(TextEncoding::UTF16.decode(&[0xFF, 0xFE, 0x61]).is_err());
	}

	#[test_log::test]
	fn terminated_strings() {
		let data = [b'a', b'b', 0, b'c', 0, 0, b'd'];
		let mut reader = &data[..];

		assert_eq!(read_terminated_text(&mut reader, TextEncoding::UTF8).unwrap(), "ab");
		assert_eq!(read_terminated_text(&mut reader, TextEncoding::UTF8).unwrap(), "c");
		assert_eq!(read_terminated_text(&mut reader, TextEncoding::UTF8).unwrap(), "");
		assert_eq!(read_text(&mut reader, TextEncoding::UTF8).unwrap(), "d");
		assert!(reader.is_empty());

		// A null byte inside a UTF-16 unit is not a terminator
		let data = [0x61, 0x00, 0x00, 0x00, 0x62, 0x00];
		let mut reader = &data[..];
		assert_eq!(
			read_terminated_text(&mut reader, TextEncoding::UTF16BE).unwrap(),
			"\u{6100}"
		);
		assert_eq!(reader, &[0x62, 0x00]);
	}

	#[test_log::test]
	fn encode_with_terminator() {
		let mut expected = SAMPLE_BE.to_vec();
		expected.extend([0, 0]);
		assert_eq!(
			TextEncoding::UTF16BE.encode(SAMPLE, true, false).unwrap(),
			expected
		);

		assert_eq!(
			TextEncoding::UTF16.encode("a", false, false).unwrap(),
			[0xFF, 0xFE, 0x61, 0x00]
		);
		assert_eq!(
			TextEncoding::Latin1.encode(SAMPLE, true, false).unwrap(),
			[0x73, 0xE9, 0x61, 0x6E, 0x63, 0x65, 0xB0, 0x00]
		);
	}

	#[test_log::test]
	fn latin1_lossy() {
		assert!(TextEncoding::Latin1.encode("\u{3042}", false, false).is_err());
		assert_eq!(
			TextEncoding::Latin1.encode("a\u{3042}", false, true).unwrap(),
			b"a?"
		);
	}
}
