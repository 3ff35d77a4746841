use super::frame::{Frame, FrameValue};
use super::tag::Id3v2Tag;
use crate::config::{Id3v2Version, WriteOptions};
use crate::error::{ErrorKind, PolytagError, Result};
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::try_vec;
use crate::tag::BackendKind;
use crate::util::text::{TextEncoding, TextEncodingError};

use std::borrow::Cow;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

// These are all frames from ID3v2.4
const V24_ONLY_FRAMES: &[&str] = &[
	"ASPI", "EQU2", "RVA2", "SEEK", "SIGN", "TDEN", "TDRL", "TDTG", "TMOO", "TPRO", "TSOA", "TSOP",
	"TSOT", "TSST",
];

/// Encode a complete tag, including the header and padding
///
/// An empty tag encodes to nothing, meaning the tag should be stripped.
pub(crate) fn create_tag(tag: &Id3v2Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	if tag.frames.is_empty() {
		return Ok(Vec::new());
	}

	let version = write_options.id3v2_version;
	log::debug!("Writing ID3v2 tag, version: {version:?}");

	let mut id3v2 = Vec::new();
	id3v2.write_all(b"ID3")?;

	match version {
		// Version 3, rev 0
		Id3v2Version::V3 => id3v2.write_all(&[3, 0])?,
		// Version 4, rev 0
		Id3v2Version::V4 => id3v2.write_all(&[4, 0])?,
	}

	// No flags, the size is filled in later
	id3v2.write_u8(0)?;
	id3v2.write_u32::<BigEndian>(0)?;

	for frame in &tag.frames {
		write_frame(&mut id3v2, frame, write_options)?;
	}

	let padding_len = write_options.preferred_padding.unwrap_or(0) as usize;
	if padding_len > 0 {
		log::trace!("Padding tag with {} bytes", padding_len);
		id3v2.write_all(&try_vec![0; padding_len])?;
	}

	let size = u32::try_from(id3v2.len() - 10)
		.map_err(|_| PolytagError::new(ErrorKind::TooMuchData))?
		.synch()?;
	id3v2[6..10].copy_from_slice(&size.to_be_bytes());

	Ok(id3v2)
}

fn write_frame(writer: &mut Vec<u8>, frame: &Frame, write_options: WriteOptions) -> Result<()> {
	let mut id = frame.id();

	if write_options.id3v2_version == Id3v2Version::V3 {
		if V24_ONLY_FRAMES.contains(&id) {
			log::warn!("Discarding frame: {id}, not supported in ID3v2.3");
			return Ok(());
		}

		// TORY (Original release year) is the only component of TDOR that is supported in
		// ID3v2.3, and TYER the only component of TDRC we keep
		match id {
			"TDOR" => id = "TORY",
			"TDRC" => id = "TYER",
			_ => {},
		}
	}

	let content = frame_content(frame, id, write_options)?;
	if content.is_empty() {
		log::debug!("Skipping empty frame: {id}");
		return Ok(());
	}

	let len = u32::try_from(content.len())
		.map_err(|_| PolytagError::new(ErrorKind::TooMuchData))?;

	log::trace!("Writing frame: {id}, size: {len}");

	writer.write_all(id.as_bytes())?;
	match write_options.id3v2_version {
		Id3v2Version::V3 => writer.write_u32::<BigEndian>(len)?,
		Id3v2Version::V4 => writer.write_u32::<BigEndian>(len.synch()?)?,
	}

	// Flags are never carried over, the content was already decoded
	writer.write_u16::<BigEndian>(0)?;
	writer.write_all(&content)?;

	Ok(())
}

/// The smallest encoding able to represent every string
fn choose_encoding<'a>(
	strings: impl IntoIterator<Item = &'a str>,
	version: Id3v2Version,
) -> TextEncoding {
	if strings.into_iter().all(TextEncoding::verify_latin1) {
		return TextEncoding::Latin1;
	}

	match version {
		Id3v2Version::V3 => TextEncoding::UTF16,
		Id3v2Version::V4 => TextEncoding::UTF8,
	}
}

fn encode_err(id: &str, err: TextEncodingError) -> PolytagError {
	PolytagError::backend_encode(BackendKind::Id3v2, format!("Frame \"{id}\": {err}"))
}

fn join_values<'a>(id: &str, values: &'a [String], version: Id3v2Version) -> Cow<'a, str> {
	match values {
		[single] => Cow::Borrowed(single.as_str()),
		// ID3v2.3 has no way to store multiple values, the convention is a `/` separator
		_ if version == Id3v2Version::V3 && id != "TXXX" => Cow::Owned(values.join("/")),
		_ => Cow::Owned(values.join("\0")),
	}
}

// Year frames in ID3v2.3 are exactly 4 digits
fn downgrade_timestamp<'a>(id: &str, value: Cow<'a, str>) -> Cow<'a, str> {
	if matches!(id, "TYER" | "TORY") && value.len() > 4 && value.is_char_boundary(4) {
		return Cow::Owned(value[..4].to_owned());
	}

	value
}

fn frame_content(frame: &Frame, id: &str, write_options: WriteOptions) -> Result<Vec<u8>> {
	let version = write_options.id3v2_version;
	let lossy = write_options.lossy_text_encoding;

	let mut content = Vec::new();
	match &frame.value {
		FrameValue::Text { values, .. } => {
			if values.iter().all(String::is_empty) {
				return Ok(content);
			}

			let text = downgrade_timestamp(id, join_values(id, values, version));
			let encoding = choose_encoding([&*text], version);

			content.write_u8(encoding as u8)?;
			content.write_all(
				&encoding
					.encode(&text, false, lossy)
					.map_err(|e| encode_err(id, e))?,
			)?;
		},
		FrameValue::UserText {
			description,
			values,
			..
		} => {
			let text = join_values(id, values, version);
			let encoding = choose_encoding([description.as_str(), &*text], version);

			content.write_u8(encoding as u8)?;
			content.write_all(
				&encoding
					.encode(description, true, lossy)
					.map_err(|e| encode_err(id, e))?,
			)?;
			content.write_all(
				&encoding
					.encode(&text, false, lossy)
					.map_err(|e| encode_err(id, e))?,
			)?;
		},
		FrameValue::Comment {
			language,
			description,
			content: text,
			..
		} => {
			let encoding = choose_encoding([description.as_str(), text.as_str()], version);

			let language = if language.iter().all(u8::is_ascii_alphabetic) {
				*language
			} else {
				log::warn!("Frame \"{id}\" has an invalid language {language:?}, replacing");
				*b"XXX"
			};

			content.write_u8(encoding as u8)?;
			content.write_all(&language)?;
			content.write_all(
				&encoding
					.encode(description, true, lossy)
					.map_err(|e| encode_err(id, e))?,
			)?;
			content.write_all(
				&encoding
					.encode(text, false, lossy)
					.map_err(|e| encode_err(id, e))?,
			)?;
		},
		FrameValue::Picture { picture, .. } => {
			let encoding = choose_encoding([picture.description()], version);

			content.write_u8(encoding as u8)?;
			content.write_all(
				&TextEncoding::Latin1
					.encode(picture.mime_type(), true, true)
					.map_err(|e| encode_err(id, e))?,
			)?;
			content.write_u8(picture.picture_type().as_u8())?;
			content.write_all(
				&encoding
					.encode(picture.description(), true, lossy)
					.map_err(|e| encode_err(id, e))?,
			)?;
			content.write_all(picture.data())?;
		},
		FrameValue::Popularimeter {
			email,
			rating,
			counter,
		} => {
			content.write_all(
				&TextEncoding::Latin1
					.encode(email, true, lossy)
					.map_err(|e| encode_err(id, e))?,
			)?;
			content.write_u8(*rating)?;
			write_counter(&mut content, *counter)?;
		},
		FrameValue::PlayCount(counter) => write_counter(&mut content, *counter)?,
		FrameValue::UniqueFileId { owner, identifier } => {
			content.write_all(
				&TextEncoding::Latin1
					.encode(owner, true, lossy)
					.map_err(|e| encode_err(id, e))?,
			)?;
			content.write_all(identifier)?;
		},
		FrameValue::Binary(data) => content.write_all(data)?,
	}

	Ok(content)
}

// The counter is at least 4 bytes, and can grow as needed
fn write_counter(writer: &mut Vec<u8>, counter: u64) -> Result<()> {
	match u32::try_from(counter) {
		Ok(counter) => writer.write_u32::<BigEndian>(counter)?,
		Err(_) => {
			let bytes = counter.to_be_bytes();
			let first_used = bytes.iter().position(|b| *b != 0).unwrap_or(0);
			writer.write_all(&bytes[first_used..])?;
		},
	}

	Ok(())
}
