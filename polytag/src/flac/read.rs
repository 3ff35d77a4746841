use super::block::{BLOCK_ID_PICTURE, BLOCK_ID_STREAMINFO, BLOCK_ID_VORBIS_COMMENTS, Block};
use super::properties::read_properties;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::file::container::{ContainerContents, decode_or_degrade};
use crate::id3::v2::header::Id3v2Header;
use crate::id3::{find_id3v1, find_id3v2, read_id3v1, read_id3v2};
use crate::macros::decode_err;
use crate::picture::Picture;
use crate::tag::{Backend, BackendKind, TagBackend};
use crate::vorbis::read::read_comments;

use std::ops::Range;

/// Where everything lives in a FLAC file
///
/// `[ID3v2]"fLaC"[metadata blocks][frames][ID3v1]`
#[derive(Debug)]
pub(crate) struct FlacLayout {
	pub(crate) id3v2: Option<(Range<usize>, Id3v2Header)>,
	/// The metadata blocks, STREAMINFO first
	pub(crate) blocks: Vec<Block>,
	/// The stream marker and every metadata block
	pub(crate) metadata: Range<usize>,
	/// The audio frames
	pub(crate) frames: Range<usize>,
	pub(crate) id3v1: Option<Range<usize>>,
}

pub(crate) fn locate(data: &[u8], parse_options: ParseOptions) -> Result<FlacLayout> {
	// It is possible for a FLAC file to contain an ID3v2 tag
	let id3v2 = match find_id3v2(data) {
		Ok(id3v2) => id3v2,
		Err(e) if parse_options.parsing_mode == ParsingMode::Strict => return Err(e),
		Err(e) => {
			log::warn!("FLAC: Skipping unreadable ID3v2 header: {e}");
			None
		},
	};

	let stream_start = id3v2.as_ref().map_or(0, |(range, _)| range.end);
	if data.get(stream_start..stream_start + 4) != Some(b"fLaC".as_slice()) {
		decode_err!(@BAIL Flac, "File missing \"fLaC\" stream marker");
	}

	let stream_info = Block::read(data, stream_start + 4)?;
	if stream_info.ty != BLOCK_ID_STREAMINFO {
		decode_err!(@BAIL Flac, "File missing mandatory STREAMINFO block");
	}

	let mut last_block = stream_info.last;
	let mut metadata_end = stream_info.end;
	let mut blocks = vec![stream_info];

	while !last_block {
		let block = Block::read(data, metadata_end)?;

		last_block = block.last;
		metadata_end = block.end;
		blocks.push(block);
	}

	let id3v1 = find_id3v1(data, data.len()).filter(|range| range.start >= metadata_end);
	let frames_end = id3v1.as_ref().map_or(data.len(), |range| range.start);

	log::debug!("File verified to be FLAC, {} metadata blocks", blocks.len());

	Ok(FlacLayout {
		id3v2,
		blocks,
		metadata: stream_start..metadata_end,
		frames: metadata_end..frames_end,
		id3v1,
	})
}

pub(crate) fn read_from(data: &[u8], parse_options: ParseOptions) -> Result<ContainerContents> {
	let parse_mode = parse_options.parsing_mode;
	let layout = locate(data, parse_options)?;

	let mut contents = ContainerContents::default();

	if let Some((range, header)) = layout.id3v2.clone() {
		log::warn!("FLAC: Encountered an ID3v2 tag, its use is discouraged");

		contents.tags.push(decode_or_degrade(
			BackendKind::Id3v2,
			read_id3v2(&data[range], header, parse_options),
			parse_mode,
		)?);
	}

	let mut vorbis_comments = None;
	let mut pictures = Vec::new();
	for block in &layout.blocks[1..] {
		match block.ty {
			BLOCK_ID_VORBIS_COMMENTS => {
				log::debug!("Encountered a Vorbis Comments block, parsing");

				// "There may be only one VORBIS_COMMENT block in a stream."
				//
				// The last block wins. Every VORBIS_COMMENT block is removed on write anyway.
				if vorbis_comments.is_some() {
					if parse_mode == ParsingMode::Strict {
						decode_err!(
							@BAIL Flac,
							"Streams are only allowed one Vorbis Comments block per stream"
						);
					}

					log::warn!("FLAC: Multiple Vorbis Comments blocks, using the last one");
				}

				vorbis_comments = Some(decode_or_degrade(
					BackendKind::VorbisComments,
					read_comments(&block.content, parse_options),
					parse_mode,
				)?);
			},
			BLOCK_ID_PICTURE => {
				log::debug!("Encountered a FLAC picture block, parsing");

				match Picture::from_flac_bytes(&block.content, false, parse_mode) {
					Ok(picture) => pictures.push(picture),
					Err(e) if parse_mode == ParsingMode::Strict => return Err(e),
					Err(e) => log::warn!("Unable to read FLAC picture block, discarding: {e}"),
				}
			},
			_ => {},
		}
	}

	// Pictures live in their own blocks, but are exposed through the comments
	if !pictures.is_empty() {
		let comments =
			vorbis_comments.get_or_insert_with(|| Backend::new(BackendKind::VorbisComments));

		let mut all_pictures = comments.pictures();
		all_pictures.append(&mut pictures);
		comments.set_pictures(&all_pictures);
	}

	contents.tags.extend(vorbis_comments);

	if let Some(range) = layout.id3v1.clone() {
		contents.tags.push(decode_or_degrade(
			BackendKind::Id3v1,
			read_id3v1(&data[range], parse_mode),
			parse_mode,
		)?);
	}

	if parse_options.read_properties {
		let stream_length = layout.frames.len() as u64;
		contents.properties = read_properties(&layout.blocks[0].content, stream_length)?;
	}

	Ok(contents)
}
