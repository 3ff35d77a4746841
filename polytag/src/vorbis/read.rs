use super::tag::VorbisComments;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{PolytagError, Result};
use crate::macros::{parse_mode_choice, try_vec};
use crate::picture::{Picture, PictureType};
use crate::tag::BackendKind;

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use data_encoding::BASE64;

fn vorbis_err(description: &'static str) -> PolytagError {
	PolytagError::backend_decode(BackendKind::VorbisComments, description)
}

fn read_string(data: &mut &[u8]) -> Result<Vec<u8>> {
	let len = data.read_u32::<LittleEndian>()? as usize;
	if len > data.len() {
		return Err(vorbis_err("Field length exceeds the comment block"));
	}

	let mut bytes = try_vec![0; len];
	data.read_exact(&mut bytes)?;
	Ok(bytes)
}

/// Read the body of a `VORBIS_COMMENT` block
pub(crate) fn read_comments(mut data: &[u8], parse_options: ParseOptions) -> Result<VorbisComments> {
	let parse_mode = parse_options.parsing_mode;

	let vendor_bytes = read_string(&mut data)?;
	let vendor = match String::from_utf8(vendor_bytes) {
		Ok(vendor) => vendor,
		Err(_) if parse_mode == ParsingMode::Strict => {
			return Err(vorbis_err("Vendor string is not valid UTF-8"));
		},
		Err(e) => {
			log::warn!("Possibly corrupt vendor string, attempting to recover");
			String::from_utf8_lossy(e.as_bytes()).into_owned()
		},
	};

	let number_of_items = data.read_u32::<LittleEndian>()?;
	// Every item needs at least its 4 byte length
	if number_of_items as usize > data.len() >> 2 {
		return Err(vorbis_err("Item count exceeds the comment block"));
	}

	let mut tag = VorbisComments {
		vendor,
		items: Vec::with_capacity(number_of_items as usize),
		pictures: Vec::new(),
	};

	for _ in 0..number_of_items {
		let comment_bytes = read_string(&mut data)?;

		// KEY=VALUE
		let mut comment_split = comment_bytes.splitn(2, |b| *b == b'=');

		let Some(key) = comment_split.next() else {
			continue;
		};

		// Make sure there was a separator present, otherwise just move on
		let Some(value) = comment_split.next() else {
			log::warn!("No separator found in field, discarding");
			continue;
		};

		match key {
			k if k.eq_ignore_ascii_case(b"METADATA_BLOCK_PICTURE") => {
				match Picture::from_flac_bytes(value, true, parse_mode) {
					Ok(picture) => tag.pictures.push(picture),
					Err(e) => {
						if parse_mode == ParsingMode::Strict {
							return Err(e);
						}

						log::warn!("Failed to decode FLAC picture, discarding field");
					},
				}
			},
			k if k.eq_ignore_ascii_case(b"COVERART") => {
				// `COVERART` is an old deprecated image storage format, it has no type or MIME
				//
				// <https://wiki.xiph.org/VorbisComment#Conversion_to_METADATA_BLOCK_PICTURE>
				log::warn!("Found deprecated `COVERART` field, converting to a picture");

				match BASE64.decode(value) {
					Ok(data) => tag.pictures.push(Picture::from_native(
						data,
						String::new(),
						String::new(),
						PictureType::Other,
					)),
					Err(_) if parse_mode == ParsingMode::Strict => {
						return Err(vorbis_err("Invalid base64 in a `COVERART` field"));
					},
					Err(_) => log::warn!("Failed to decode `COVERART` field, discarding"),
				}
			},
			k if super::verify_key(&String::from_utf8_lossy(k)) => {
				// Keys were verified to be ASCII
				let key = String::from_utf8_lossy(k).into_owned();
				let value = match String::from_utf8(value.to_vec()) {
					Ok(value) => value,
					Err(e) => parse_mode_choice!(
						parse_mode,
						STRICT: return Err(vorbis_err("Field is not valid UTF-8")),
						RELAXED: {
							log::warn!("Non UTF-8 field found, replacing invalid sequences");
							String::from_utf8_lossy(e.as_bytes()).into_owned()
						},
						DEFAULT: {
							log::warn!("Non UTF-8 field found, discarding");
							continue;
						}
					),
				};

				tag.items.push((key, value));
			},
			_ => {
				if parse_mode == ParsingMode::Strict {
					return Err(vorbis_err("Field has an invalid key"));
				}

				log::warn!("Field has an invalid key, discarding");
			},
		}
	}

	log::debug!(
		"Read {} Vorbis comment(s), {} picture(s)",
		tag.items.len(),
		tag.pictures.len()
	);
	Ok(tag)
}
