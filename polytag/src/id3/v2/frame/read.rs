use super::content::parse_content;
use super::{Frame, FrameFlags};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::header::Id3v2HeaderVersion;
use crate::id3::v2::util::synchsafe::{SynchsafeInteger, resynchronize};
use crate::id3::v2::util::upgrade::{upgrade_v2, upgrade_v3};

use std::io::Read;

pub(crate) enum ParsedFrame {
	Next(Frame),
	Skip,
	Eof,
}

struct FrameHeader {
	/// The ID upgraded to ID3v2.4, or the raw bytes if they are not a valid ID
	id: std::result::Result<String, Vec<u8>>,
	size: u32,
	flags: FrameFlags,
}

impl FrameHeader {
	/// Returns `None` once the frames run out or padding is reached
	fn read<R>(reader: &mut R, version: Id3v2HeaderVersion) -> Option<Self>
	where
		R: Read,
	{
		let mut buf = [0; 10];
		let header = match version {
			Id3v2HeaderVersion::V2 => &mut buf[..6],
			Id3v2HeaderVersion::V3 | Id3v2HeaderVersion::V4 => &mut buf[..],
		};

		if reader.read_exact(header).is_err() || header[0] == 0 {
			return None;
		}

		let header = Self::from_bytes(header, version);
		log::trace!(
			"Frame header (ID: {:?}, size: {})",
			header.id,
			header.size
		);

		Some(header)
	}

	fn from_bytes(bytes: &[u8], version: Id3v2HeaderVersion) -> Self {
		if version == Id3v2HeaderVersion::V2 {
			let id = &bytes[..3];
			return Self {
				id: valid_id(id)
					.and_then(upgrade_v2)
					.map(str::to_owned)
					.ok_or_else(|| id.to_vec()),
				size: u32::from_be_bytes([0, bytes[3], bytes[4], bytes[5]]),
				flags: FrameFlags::default(),
			};
		}

		let id = &bytes[..4];
		let size = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
		let flags = u16::from_be_bytes([bytes[8], bytes[9]]);

		match version {
			Id3v2HeaderVersion::V4 => Self {
				id: valid_id(id).map(str::to_owned).ok_or_else(|| id.to_vec()),
				size: size.unsynch(),
				flags: FrameFlags::parse_id3v24(flags),
			},
			_ => Self {
				id: valid_id(id)
					.map(|id| upgrade_v3(id).unwrap_or(id).to_owned())
					.ok_or_else(|| id.to_vec()),
				size,
				flags: FrameFlags::parse_id3v23(flags),
			},
		}
	}
}

fn valid_id(id: &[u8]) -> Option<&str> {
	if !id.iter().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
		return None;
	}

	std::str::from_utf8(id).ok()
}

impl ParsedFrame {
	pub(crate) fn read<R>(
		reader: &mut R,
		version: Id3v2HeaderVersion,
		parse_options: ParseOptions,
	) -> Result<Self>
	where
		R: Read,
	{
		let parse_mode = parse_options.parsing_mode;

		let Some(header) = FrameHeader::read(reader, version) else {
			return Ok(Self::Eof);
		};

		// The body is consumed even if the frame is skipped, the next header follows it
		let mut body = Vec::new();
		reader
			.by_ref()
			.take(u64::from(header.size))
			.read_to_end(&mut body)?;

		let id = match header.id {
			Ok(id) => id,
			Err(bytes) => {
				let err = Id3v2Error::new(Id3v2ErrorKind::BadFrameId(bytes));
				if parse_mode == ParsingMode::Strict {
					return Err(err.into());
				}

				log::warn!("Skipping frame: {err}");
				return Ok(Self::Skip);
			},
		};

		if body.len() < header.size as usize {
			if parse_mode == ParsingMode::Strict {
				return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameLength).into());
			}

			log::warn!("Frame \"{id}\" runs past the end of the tag, ignoring it and what follows");
			return Ok(Self::Eof);
		}

		if body.is_empty() {
			if parse_mode == ParsingMode::Strict {
				return Err(Id3v2Error::new(Id3v2ErrorKind::EmptyFrame(id)).into());
			}

			log::debug!("Skipping empty frame \"{id}\"");
			return Ok(Self::Skip);
		}

		if header.flags.encryption {
			log::warn!("Skipping encrypted frame \"{id}\"");
			return Ok(Self::Skip);
		}

		let value = decode_body(&body, header.flags, version).and_then(|content| {
			parse_content(&mut &content[..], &id, version, parse_mode)
		});

		match value {
			Ok(Some(value)) => Ok(Self::Next(Frame::new(id, value))),
			Ok(None) => Ok(Self::Skip),
			Err(err) if parse_mode == ParsingMode::Strict => Err(err),
			Err(err) => {
				log::warn!("Failed to parse frame \"{id}\", skipping: {err}");
				Ok(Self::Skip)
			},
		}
	}
}

/// Strip the extra header fields and undo unsynchronisation and compression
fn decode_body(mut body: &[u8], flags: FrameFlags, version: Id3v2HeaderVersion) -> Result<Vec<u8>> {
	let has_length = flags.data_length_indicator || flags.compression;

	// ID3v2.3 puts the decompressed size before the group, ID3v2.4 after it
	let (first, second) = match version {
		Id3v2HeaderVersion::V4 => ((flags.grouping_identity, 1), (has_length, 4)),
		_ => ((has_length, 4), (flags.grouping_identity, 1)),
	};

	for (present, len) in [first, second] {
		if present {
			body = body.get(len..).unwrap_or_default();
		}
	}

	// Unsynchronisation is applied after compression
	let body = if flags.unsynchronisation {
		resynchronize(body)
	} else {
		body.into()
	};

	if !flags.compression {
		return Ok(body.into_owned());
	}

	let mut content = Vec::with_capacity(body.len());
	decompress(&*body)?.read_to_end(&mut content)?;
	Ok(content)
}

#[cfg(feature = "id3v2_compression_support")]
#[allow(clippy::unnecessary_wraps)]
fn decompress<R: Read>(reader: R) -> Result<flate2::read::ZlibDecoder<R>> {
	Ok(flate2::read::ZlibDecoder::new(reader))
}

#[cfg(not(feature = "id3v2_compression_support"))]
fn decompress<R>(_: R) -> Result<std::io::Empty> {
	Err(Id3v2Error::new(Id3v2ErrorKind::CompressedFrameEncountered).into())
}

#[cfg(test)]
mod tests {
	use super::{FrameHeader, decode_body};
	use crate::id3::v2::frame::FrameFlags;
	use crate::id3::v2::header::Id3v2HeaderVersion;

	#[test_log::test]
	fn header_ids() {
		let v2 = FrameHeader::from_bytes(b"TT2\x00\x00\x05", Id3v2HeaderVersion::V2);
		assert_eq!(v2.id.as_deref(), Ok("TIT2"));
		assert_eq!(v2.size, 5);

		let v3 = FrameHeader::from_bytes(b"TYER\x00\x00\x01\x00\x00\x00", Id3v2HeaderVersion::V3);
		assert_eq!(v3.id.as_deref(), Ok("TDRC"));
		assert_eq!(v3.size, 256);

		// Synchsafe, 0x0100 is 128
		let v4 = FrameHeader::from_bytes(b"TIT2\x00\x00\x01\x00\x00\x00", Id3v2HeaderVersion::V4);
		assert_eq!(v4.size, 128);

		let bad = FrameHeader::from_bytes(b"T+T2\x00\x00\x00\x01\x00\x00", Id3v2HeaderVersion::V4);
		assert_eq!(bad.id, Err(b"T+T2".to_vec()));
	}

	#[test_log::test]
	fn group_and_length_order() {
		let flags = FrameFlags {
			grouping_identity: true,
			data_length_indicator: true,
			..FrameFlags::default()
		};

		// Group ID, then data length
		let body = [0xAA, 0, 0, 0, 3, b'f', b'o', b'o'];
		assert_eq!(decode_body(&body, flags, Id3v2HeaderVersion::V4).unwrap(), b"foo");

		let flags = FrameFlags {
			grouping_identity: true,
			..FrameFlags::default()
		};

		let body = [0xAA, b'b', b'a', b'r'];
		assert_eq!(decode_body(&body, flags, Id3v2HeaderVersion::V3).unwrap(), b"bar");
	}
}
