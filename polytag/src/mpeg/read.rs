use super::header::{Header, find_first_frame};
use super::properties::read_properties;
use crate::ape::header::{ApeHeader, find_ape_tag};
use crate::ape::tag::read::read_ape_tag;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::file::container::{ContainerContents, decode_or_degrade};
use crate::id3::v2::header::Id3v2Header;
use crate::id3::{find_id3v1, find_id3v2, read_id3v1, read_id3v2};
use crate::macros::decode_err;
use crate::tag::BackendKind;

use std::ops::Range;

/// Where everything lives in an MPEG file
///
/// `[ID3v2][audio][APE][ID3v1]`, every tag being optional.
#[derive(Debug)]
pub(crate) struct MpegLayout {
	pub(crate) id3v2: Option<(Range<usize>, Id3v2Header)>,
	/// Everything between the leading and trailing tags, including any junk before the first frame
	pub(crate) audio: Range<usize>,
	pub(crate) first_frame: (Header, usize),
	pub(crate) ape: Option<(Range<usize>, ApeHeader)>,
	pub(crate) id3v1: Option<Range<usize>>,
}

pub(crate) fn locate(data: &[u8], parse_options: ParseOptions) -> Result<MpegLayout> {
	let parse_mode = parse_options.parsing_mode;

	let id3v2 = match find_id3v2(data) {
		Ok(id3v2) => id3v2,
		Err(e) if parse_mode == ParsingMode::Strict => return Err(e),
		Err(e) => {
			log::warn!("MPEG: Skipping unreadable ID3v2 header: {e}");
			None
		},
	};

	let audio_start = id3v2.as_ref().map_or(0, |(range, _)| range.end);

	let id3v1 = find_id3v1(data, data.len()).filter(|range| range.start >= audio_start);
	let trailing_end = id3v1.as_ref().map_or(data.len(), |range| range.start);

	let ape = match find_ape_tag(data, trailing_end) {
		Ok(Some((range, _))) if range.start < audio_start => {
			if parse_mode == ParsingMode::Strict {
				decode_err!(@BAIL Mpeg, "APE tag overlaps the ID3v2 tag");
			}

			log::warn!("MPEG: APE tag overlaps the ID3v2 tag, ignoring it");
			None
		},
		Ok(ape) => ape,
		Err(e) if parse_mode == ParsingMode::Strict => return Err(e),
		Err(e) => {
			log::warn!("MPEG: Ignoring invalid APE footer: {e}");
			None
		},
	};

	let audio_end = ape.as_ref().map_or(trailing_end, |(range, _)| range.start);
	let audio = audio_start..audio_end;

	let Some((offset, header)) = find_first_frame(&data[audio.clone()], parse_options.max_junk_bytes)
	else {
		decode_err!(@BAIL Mpeg, "File contains an invalid frame");
	};

	if offset > 0 {
		log::debug!("MPEG: Skipped {offset} junk bytes before the first frame");
	}

	Ok(MpegLayout {
		id3v2,
		first_frame: (header, audio.start + offset),
		audio,
		ape,
		id3v1,
	})
}

pub(crate) fn read_from(data: &[u8], parse_options: ParseOptions) -> Result<ContainerContents> {
	let parse_mode = parse_options.parsing_mode;
	let layout = locate(data, parse_options)?;

	let mut contents = ContainerContents::default();

	if let Some((range, header)) = layout.id3v2.clone() {
		contents.tags.push(decode_or_degrade(
			BackendKind::Id3v2,
			read_id3v2(&data[range], header, parse_options),
			parse_mode,
		)?);
	}

	if let Some((range, header)) = layout.ape.clone() {
		contents.tags.push(decode_or_degrade(
			BackendKind::Ape,
			read_ape_tag(&data[range], header, parse_options),
			parse_mode,
		)?);
	}

	if let Some(range) = layout.id3v1.clone() {
		contents.tags.push(decode_or_degrade(
			BackendKind::Id3v1,
			read_id3v1(&data[range], parse_mode),
			parse_mode,
		)?);
	}

	if parse_options.read_properties {
		contents.properties = read_properties(data, layout.first_frame, layout.audio.end);
	}

	Ok(contents)
}
