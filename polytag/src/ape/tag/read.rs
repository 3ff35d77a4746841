use super::ApeTag;
use super::item::{ApeItem, ApeItemValue};
use crate::ape::constants::{APE_HEADER_SIZE, is_valid_key};
use crate::ape::header::ApeHeader;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{PolytagError, Result};
use crate::macros::try_vec;
use crate::tag::BackendKind;
use crate::util::text::utf8_decode;

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

fn ape_err(description: &'static str) -> PolytagError {
	PolytagError::backend_decode(BackendKind::Ape, description)
}

/// Read the items of an APE tag
///
/// `tag` is the entire tag, as located by [`find_ape_tag`](crate::ape::header::find_ape_tag).
pub(crate) fn read_ape_tag(
	tag: &[u8],
	header: ApeHeader,
	parse_options: ParseOptions,
) -> Result<ApeTag> {
	let items_start = if header.has_header() {
		APE_HEADER_SIZE
	} else {
		0
	};
	let items_end = tag.len().saturating_sub(APE_HEADER_SIZE);

	let mut data = tag.get(items_start..items_end).unwrap_or_default();
	let mut ape_tag = ApeTag {
		// Bit 0 set: tag is read only
		read_only: header.flags & 1 == 1,
		items: Vec::new(),
	};

	for _ in 0..header.item_count {
		// Size, flags, and at least a 2 byte key with a terminator
		if data.len() < 11 {
			break;
		}

		let value_size = data.read_u32::<LittleEndian>()? as usize;
		let flags = data.read_u32::<LittleEndian>()?;

		let Some(key_len) = data.iter().position(|b| *b == 0) else {
			return Err(ape_err("APE tag item has an unterminated key"));
		};

		let key = utf8_decode(data[..key_len].to_vec())
			.map_err(|_| ape_err("APE tag item contains a non UTF-8 key"))?;
		data = &data[key_len + 1..];

		if value_size > data.len() {
			return Err(ape_err("APE tag item has an invalid size"));
		}

		if !is_valid_key(&key) || value_size == 0 {
			if parse_options.parsing_mode == ParsingMode::Strict {
				return Err(ape_err("APE tag item contains an illegal key"));
			}

			log::warn!("APE: Skipping invalid item '{key}'");
			data = &data[value_size..];
			continue;
		}

		let mut value = try_vec![0; value_size];
		data.read_exact(&mut value)?;

		let value = match (flags >> 1) & 3 {
			0 => ApeItemValue::Text(
				utf8_decode(value)
					.map_err(|_| ape_err("Failed to convert text item into a UTF-8 string"))?,
			),
			1 => ApeItemValue::Binary(value),
			2 => ApeItemValue::Locator(
				utf8_decode(value)
					.map_err(|_| ape_err("Failed to convert locator item into a UTF-8 string"))?,
			),
			_ => return Err(ape_err("APE tag item contains an invalid item type")),
		};

		log::trace!("APE: Read item '{key}'");
		ape_tag.items.push(ApeItem {
			read_only: flags & 1 == 1,
			key,
			value,
		});
	}

	Ok(ape_tag)
}
