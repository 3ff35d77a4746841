use super::constants::{APE_HEADER_SIZE, APE_PREAMBLE, APE_VERSION};
use crate::error::{PolytagError, Result};
use crate::tag::BackendKind;

use std::ops::Range;

use byteorder::{LittleEndian, ReadBytesExt};

// Bit 31: tag contains a header
const HAS_HEADER: u32 = 1 << 31;

#[derive(Copy, Clone, Debug)]
pub(crate) struct ApeHeader {
	pub(crate) version: u32,
	/// The size of all items plus the footer
	pub(crate) size: u32,
	pub(crate) item_count: u32,
	pub(crate) flags: u32,
}

impl ApeHeader {
	/// Parse a footer, `bytes` is everything following the preamble
	pub(crate) fn parse(mut bytes: &[u8]) -> Result<Self> {
		let version = bytes.read_u32::<LittleEndian>()?;
		let size = bytes.read_u32::<LittleEndian>()?;
		let item_count = bytes.read_u32::<LittleEndian>()?;
		let flags = bytes.read_u32::<LittleEndian>()?;

		if (size as usize) < APE_HEADER_SIZE {
			// The size includes the footer and all items
			return Err(PolytagError::backend_decode(
				BackendKind::Ape,
				"APE tag has an invalid size (< 32)",
			));
		}

		Ok(Self {
			version,
			size,
			item_count,
			flags,
		})
	}

	/// Whether a header precedes the items, APEv1 never has one
	pub(crate) fn has_header(&self) -> bool {
		self.version == APE_VERSION && self.flags & HAS_HEADER == HAS_HEADER
	}

	/// The size of the entire tag, including the header
	pub(crate) fn total_size(&self) -> usize {
		let mut size = self.size as usize;
		if self.has_header() {
			size += APE_HEADER_SIZE;
		}

		size
	}
}

/// Search for an APE tag ending at `end`
///
/// Returns the range of the entire tag (header included) and its footer.
pub(crate) fn find_ape_tag(data: &[u8], end: usize) -> Result<Option<(Range<usize>, ApeHeader)>> {
	let Some(footer_start) = end.checked_sub(APE_HEADER_SIZE) else {
		return Ok(None);
	};

	let footer = &data[footer_start..end];
	if &footer[..8] != APE_PREAMBLE {
		return Ok(None);
	}

	let header = ApeHeader::parse(&footer[8..])?;
	let Some(start) = end.checked_sub(header.total_size()) else {
		return Err(PolytagError::backend_decode(
			BackendKind::Ape,
			"APE tag has an invalid size (> file size)",
		));
	};

	log::debug!(
		"Found an APE tag at {start}..{end}, version: {}, items: {}",
		header.version,
		header.item_count
	);

	Ok(Some((start..end, header)))
}
