use super::tag::VorbisComments;
use super::{DEFAULT_VENDOR, verify_key};
use crate::error::Result;
use crate::macros::{encode_err, err};

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

fn write_string(writer: &mut Vec<u8>, bytes: &[u8]) -> Result<()> {
	let Ok(len) = u32::try_from(bytes.len()) else {
		err!(TooMuchData);
	};

	writer.write_u32::<LittleEndian>(len)?;
	writer.write_all(bytes)?;
	Ok(())
}

/// Encode the body of a `VORBIS_COMMENT` block
///
/// Pictures are not part of the comments, they are stored in their own blocks.
pub(crate) fn create_comments(tag: &VorbisComments) -> Result<Vec<u8>> {
	let vendor = if tag.vendor.is_empty() {
		DEFAULT_VENDOR
	} else {
		tag.vendor.as_str()
	};

	let mut packet = Vec::new();
	write_string(&mut packet, vendor.as_bytes())?;

	let items = tag
		.items
		.iter()
		.filter(|(_, v)| !v.is_empty())
		.collect::<Vec<_>>();

	packet.write_u32::<LittleEndian>(items.len() as u32)?;

	for (k, v) in items {
		if !verify_key(k) {
			encode_err!(@BAIL VorbisComments, "Invalid field key \"{k}\"");
		}

		write_string(&mut packet, format!("{k}={v}").as_bytes())?;
	}

	Ok(packet)
}
