use super::FrameValue;
use crate::config::ParsingMode;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::header::Id3v2HeaderVersion;
use crate::macros::err;
use crate::picture::{MimeType, Picture, PictureType};
use crate::util::text::{TextEncoding, read_terminated_text, read_text};

use std::io::Read;

use byteorder::ReadBytesExt;

pub(super) fn parse_content(
	reader: &mut &[u8],
	id: &str,
	version: Id3v2HeaderVersion,
	parse_mode: ParsingMode,
) -> Result<Option<FrameValue>> {
	log::trace!("Parsing frame content for ID: {}", id);

	Ok(match id {
		// The ID was previously upgraded, but the content remains unchanged, so version is necessary
		"APIC" => Some(parse_picture(reader, version, parse_mode)?),
		"TXXX" => parse_user_text(reader, version)?,
		"COMM" | "USLT" => parse_comment(reader, version)?,
		"UFID" => parse_unique_file_id(reader)?,
		"POPM" => Some(parse_popularimeter(reader)?),
		"PCNT" => Some(FrameValue::PlayCount(read_counter(reader))),
		i if i.starts_with('T') => parse_text(reader, version)?,
		// URL links, GEOB, PRIV, and any unknown frames
		_ => Some(FrameValue::Binary(reader.to_vec())),
	})
}

pub(super) fn verify_encoding(encoding: u8, version: Id3v2HeaderVersion) -> Result<TextEncoding> {
	if version == Id3v2HeaderVersion::V2 && encoding > 1 {
		err!(TextDecode("ID3v2.2 only supports Latin-1 and UTF-16"));
	}

	match TextEncoding::from_u8(encoding) {
		None => err!(TextDecode("Found invalid encoding")),
		Some(e) => Ok(e),
	}
}

fn split_values(text: &str) -> Vec<String> {
	let mut values = text.split('\0').map(str::to_owned).collect::<Vec<_>>();
	while values.last().is_some_and(String::is_empty) {
		values.pop();
	}

	values
}

fn parse_text(reader: &mut &[u8], version: Id3v2HeaderVersion) -> Result<Option<FrameValue>> {
	let Ok(encoding_byte) = reader.read_u8() else {
		return Ok(None);
	};

	let encoding = verify_encoding(encoding_byte, version)?;
	let text = read_text(reader, encoding)?;

	Ok(Some(FrameValue::Text {
		encoding,
		values: split_values(&text),
	}))
}

fn parse_user_text(reader: &mut &[u8], version: Id3v2HeaderVersion) -> Result<Option<FrameValue>> {
	let Ok(encoding_byte) = reader.read_u8() else {
		return Ok(None);
	};

	let encoding = verify_encoding(encoding_byte, version)?;
	let description = read_terminated_text(reader, encoding)?;
	let text = read_text(reader, encoding)?;

	Ok(Some(FrameValue::UserText {
		encoding,
		description,
		values: split_values(&text),
	}))
}

fn parse_comment(reader: &mut &[u8], version: Id3v2HeaderVersion) -> Result<Option<FrameValue>> {
	let Ok(encoding_byte) = reader.read_u8() else {
		return Ok(None);
	};

	let encoding = verify_encoding(encoding_byte, version)?;

	let mut language = [0; 3];
	reader.read_exact(&mut language)?;

	let description = read_terminated_text(reader, encoding)?;
	let content = read_text(reader, encoding)?;

	Ok(Some(FrameValue::Comment {
		encoding,
		language,
		description,
		content,
	}))
}

fn parse_picture(
	reader: &mut &[u8],
	version: Id3v2HeaderVersion,
	parse_mode: ParsingMode,
) -> Result<FrameValue> {
	let encoding = verify_encoding(reader.read_u8()?, version)?;

	let mime_type = if version == Id3v2HeaderVersion::V2 {
		let mut format = [0; 3];
		reader.read_exact(&mut format)?;

		match &format {
			b"PNG" => MimeType::Png,
			b"JPG" => MimeType::Jpeg,
			b"GIF" => MimeType::Gif,
			b"BMP" => MimeType::Bmp,
			_ if parse_mode == ParsingMode::Strict => {
				return Err(Id3v2Error::new(Id3v2ErrorKind::BadPictureFormat(
					String::from_utf8_lossy(&format).into_owned(),
				))
				.into());
			},
			_ => MimeType::Unknown(String::new()),
		}
	} else {
		let mime_type = read_terminated_text(reader, TextEncoding::Latin1)?;
		MimeType::from_str(&mime_type)
	};

	let pic_type = PictureType::from_u8(reader.read_u8()?);
	let description = read_terminated_text(reader, encoding)?;

	// An empty MIME type is sniffed from the data
	Ok(FrameValue::Picture {
		encoding,
		picture: Picture::from_native(
			reader.to_vec(),
			mime_type.as_str().to_owned(),
			description,
			pic_type,
		),
	})
}

fn parse_unique_file_id(reader: &mut &[u8]) -> Result<Option<FrameValue>> {
	let owner = read_terminated_text(reader, TextEncoding::Latin1)?;

	if owner.is_empty() {
		return Err(Id3v2Error::new(Id3v2ErrorKind::MissingUfidOwner).into());
	}

	Ok(Some(FrameValue::UniqueFileId {
		owner,
		identifier: reader.to_vec(),
	}))
}

fn parse_popularimeter(reader: &mut &[u8]) -> Result<FrameValue> {
	let email = read_terminated_text(reader, TextEncoding::Latin1)?;

	let rating = reader.read_u8()?;
	let counter = read_counter(reader);

	Ok(FrameValue::Popularimeter {
		email,
		rating,
		counter,
	})
}

// The counter is at least 4 bytes, and grows when it overflows
fn read_counter(reader: &mut &[u8]) -> u64 {
	let counter = if reader.len() > 8 {
		log::warn!("Play counter doesn't fit in 64 bits, saturating");
		u64::MAX
	} else {
		reader
			.iter()
			.fold(0_u64, |counter, byte| (counter << 8) | u64::from(*byte))
	};

	*reader = &[];
	counter
}
