//! ID3 specific items
//!
//! ID3 does things differently than other tags, making working with them a little more effort than other formats.
//! Check the other modules for important notes and/or warnings.

pub mod v1;
pub mod v2;

use crate::config::{ParseOptions, ParsingMode};
use crate::error::{PolytagError, Result};
use crate::tag::BackendKind;
use v1::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use v2::header::Id3v2Header;

use std::ops::Range;

/// Search for an ID3v1 tag in the 128 bytes preceding `end`
pub(crate) fn find_id3v1(data: &[u8], end: usize) -> Option<Range<usize>> {
	let start = end.checked_sub(ID3V1_TAG_SIZE)?;
	if data[start..start + 3] != ID3V1_TAG_MARKER {
		return None;
	}

	log::debug!("Found an ID3v1 tag at {start}");
	Some(start..end)
}

pub(crate) fn read_id3v1(tag: &[u8], parse_mode: ParsingMode) -> Result<v1::Id3v1Tag> {
	let mut bytes = [0; ID3V1_TAG_SIZE];
	bytes.copy_from_slice(&tag[..ID3V1_TAG_SIZE]);

	v1::Id3v1Tag::parse(bytes, parse_mode)
}

/// Search for an ID3v2 tag at the start of `data`
///
/// The returned range covers the header, the tag contents, and the footer if present.
pub(crate) fn find_id3v2(data: &[u8]) -> Result<Option<(Range<usize>, Id3v2Header)>> {
	if !data.starts_with(b"ID3") {
		return Ok(None);
	}

	let header = Id3v2Header::parse(&mut &*data)?;
	let end = header.full_tag_size() as usize;
	if end > data.len() {
		return Err(PolytagError::backend_decode(
			BackendKind::Id3v2,
			"ID3v2 tag size exceeds the file size",
		));
	}

	log::debug!(
		"Found an ID3v2 tag, version: {:?}, size: {end}",
		header.version
	);
	Ok(Some((0..end, header)))
}

/// Read the frames of a tag located by [`find_id3v2`]
pub(crate) fn read_id3v2(
	tag: &[u8],
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<v2::Id3v2Tag> {
	let content_end = 10 + header.size as usize;
	v2::read::parse_id3v2(&tag[10..content_end], header, parse_options)
}
