use super::ApeTag;
use crate::ape::constants::{APE_HEADER_SIZE, APE_PREAMBLE, APE_VERSION, is_valid_key};
use crate::error::Result;
use crate::macros::{encode_err, err};

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

/// Encode an APEv2 tag, with both a header and a footer
///
/// An empty tag encodes to nothing.
pub(super) fn create_ape_tag(tag: &ApeTag) -> Result<Vec<u8>> {
	// Unnecessary to write anything if there's no metadata
	if tag.items.is_empty() {
		return Ok(Vec::new());
	}

	let mut items = Vec::new();
	for item in &tag.items {
		if !is_valid_key(&item.key) {
			encode_err!(@BAIL Ape, "Invalid item key \"{}\"", item.key);
		}

		let value = item.value.as_bytes();
		let mut flags = item.value.type_flag() << 1;
		if item.read_only {
			flags |= 1;
		}

		items.write_u32::<LittleEndian>(value.len() as u32)?;
		items.write_u32::<LittleEndian>(flags)?;
		items.write_all(item.key.as_bytes())?;
		items.write_u8(0)?;
		items.write_all(value)?;
	}

	let size = items.len() + APE_HEADER_SIZE;
	if size as u64 > u64::from(u32::MAX) {
		err!(TooMuchData);
	}

	// Bit 30 set: tag contains a footer
	// Bit 31 set: tag contains a header
	let mut flags = (1_u32 << 30) | (1_u32 << 31);
	if tag.read_only {
		// Bit 0 set: tag is read only
		flags |= 1;
	}

	let item_count = tag.items.len() as u32;

	let mut tag_bytes = Vec::with_capacity(size + APE_HEADER_SIZE);
	// The header is exactly the same as the footer, except for bit 29
	write_header(&mut tag_bytes, size as u32, item_count, flags | (1 << 29))?;
	tag_bytes.extend(items);
	write_header(&mut tag_bytes, size as u32, item_count, flags)?;

	Ok(tag_bytes)
}

fn write_header(writer: &mut Vec<u8>, size: u32, item_count: u32, flags: u32) -> Result<()> {
	writer.write_all(APE_PREAMBLE)?;
	writer.write_u32::<LittleEndian>(APE_VERSION)?;
	// The total size includes the footer, but not the header
	writer.write_u32::<LittleEndian>(size)?;
	writer.write_u32::<LittleEndian>(item_count)?;
	writer.write_u32::<LittleEndian>(flags)?;
	// The header/footer must end in 8 bytes of zeros
	writer.write_u64::<LittleEndian>(0)?;
	Ok(())
}
