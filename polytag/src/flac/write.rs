use super::block::{BLOCK_ID_PADDING, BLOCK_ID_PICTURE, BLOCK_ID_VORBIS_COMMENTS, Block};
use super::read::locate;
use crate::config::{ParseOptions, WriteOptions};
use crate::error::{FileEncodingError, Result};
use crate::file::FileType;
use crate::file::container::{RegionUpdate, TagUpdates};

/// Rebuild a FLAC file with updated tags
///
/// Blocks other than `VORBIS_COMMENT`, `PICTURE` and `PADDING` are always kept as-is. If the new
/// metadata fits in the space of the old, the difference is filled with padding so the audio frames
/// stay where they are.
pub(crate) fn write_to(
	data: &[u8],
	parse_options: ParseOptions,
	updates: &TagUpdates,
	write_options: WriteOptions,
) -> Result<Vec<u8>> {
	if updates.ape.writes_tag() {
		return Err(FileEncodingError::new(FileType::Flac, "FLAC files cannot hold an APE tag").into());
	}

	let layout = locate(data, parse_options)?;

	let id3v2 = updates
		.id3v2
		.resolve(layout.id3v2.as_ref().map(|(range, _)| &data[range.clone()]));
	let id3v1 = updates
		.id3v1
		.resolve(layout.id3v1.as_ref().map(|range| &data[range.clone()]));

	let metadata = match (&updates.vorbis_comments, &updates.flac_pictures) {
		(RegionUpdate::Keep, None) => data[layout.metadata.clone()].to_vec(),
		_ => rebuild_metadata(
			layout.blocks,
			layout.metadata.len(),
			updates,
			write_options,
		)?,
	};

	let frames = &data[layout.frames];

	let mut file = Vec::with_capacity(id3v2.len() + metadata.len() + frames.len() + id3v1.len());
	file.extend_from_slice(id3v2);
	file.extend_from_slice(&metadata);
	file.extend_from_slice(frames);
	file.extend_from_slice(id3v1);

	Ok(file)
}

fn rebuild_metadata(
	existing: Vec<Block>,
	existing_len: usize,
	updates: &TagUpdates,
	write_options: WriteOptions,
) -> Result<Vec<u8>> {
	let replace_comments = matches!(updates.vorbis_comments, RegionUpdate::Replace(_));
	let replace_pictures = updates.flac_pictures.is_some();

	let mut blocks = Vec::with_capacity(existing.len());
	for block in existing {
		let remove = match block.ty {
			BLOCK_ID_PADDING => true,
			BLOCK_ID_VORBIS_COMMENTS => replace_comments,
			BLOCK_ID_PICTURE => replace_pictures,
			_ => false,
		};

		if !remove {
			blocks.push(block);
		}
	}

	if let RegionUpdate::Replace(comments) = &updates.vorbis_comments {
		if !comments.is_empty() {
			blocks.push(Block::new(BLOCK_ID_VORBIS_COMMENTS, comments.clone()));
		}
	}

	if let Some(pictures) = &updates.flac_pictures {
		for picture in pictures {
			blocks.push(Block::new(BLOCK_ID_PICTURE, picture.as_flac_bytes(false)));
		}
	}

	// The stream marker
	let blocks_len = 4 + blocks.iter().map(Block::len).sum::<usize>();

	if blocks_len + 4 <= existing_len {
		// Keep the frames in place
		blocks.extend(Block::padding_to_fill(existing_len - blocks_len));
	} else if blocks_len != existing_len {
		if let Some(preferred_padding) = write_options.preferred_padding {
			log::debug!("FLAC: Metadata grew, adding {preferred_padding} bytes of padding");
			blocks.push(Block::new_padding(preferred_padding as usize));
		}
	}

	for block in &mut blocks {
		block.last = false;
	}

	if let Some(block) = blocks.last_mut() {
		block.last = true;
	}

	let mut metadata = Vec::with_capacity(blocks_len);
	metadata.extend_from_slice(b"fLaC");
	for block in &blocks {
		block.write_to(&mut metadata)?;
		log::trace!(
			"Wrote a block (ty: {}, size: {})",
			block.ty,
			block.content.len()
		);
	}

	Ok(metadata)
}

#[cfg(test)]
mod tests {
	use super::write_to;
	use crate::config::{ParseOptions, WriteOptions};
	use crate::error::ErrorKind;
	use crate::file::container::{RegionUpdate, TagUpdates};
	use crate::flac::read::tests::{block, flac};
	use crate::flac::read::{locate, read_from};
	use crate::picture::Picture;
	use crate::tag::TagBackend;
	use crate::vorbis::VorbisComments;
	use crate::vorbis::write::create_comments;

	fn comments(title: &str) -> Vec<u8> {
		let mut tag = VorbisComments::new();
		tag.push(String::from("TITLE"), title.to_owned());
		create_comments(&tag).unwrap()
	}

	#[test_log::test]
	fn keep_everything() {
		let data = flac(&[block(4, true, &comments("Foo"))]);

		let written = write_to(
			&data,
			ParseOptions::new(),
			&TagUpdates::keep_all(),
			WriteOptions::default(),
		)
		.unwrap();
		assert_eq!(written, data);
	}

	#[test_log::test]
	fn shrinking_reuses_space() {
		let data = flac(&[
			block(4, false, &comments("A fairly long title")),
			block(1, true, &[0; 64]),
		]);
		let original = locate(&data, ParseOptions::new()).unwrap();

		let mut updates = TagUpdates::keep_all();
		updates.vorbis_comments = RegionUpdate::Replace(comments("Short"));

		let written =
			write_to(&data, ParseOptions::new(), &updates, WriteOptions::default()).unwrap();
		assert_eq!(written.len(), data.len());

		let layout = locate(&written, ParseOptions::new()).unwrap();
		assert_eq!(layout.frames, original.frames);
		assert_eq!(&written[layout.frames.clone()], &data[original.frames]);

		let contents = read_from(&written, ParseOptions::new()).unwrap();
		assert_eq!(
			contents.tags[0].properties().get_first("TITLE"),
			Some("Short")
		);
	}

	#[test_log::test]
	fn growing_adds_padding() {
		let data = flac(&[]);
		let picture = Picture::new(vec![0xAB; 100], "image/jpeg", "", "Front Cover");

		let mut updates = TagUpdates::keep_all();
		updates.vorbis_comments = RegionUpdate::Replace(comments("Foo"));
		updates.flac_pictures = Some(vec![picture.clone()]);

		let written = write_to(
			&data,
			ParseOptions::new(),
			&updates,
			WriteOptions::new().preferred_padding(512),
		)
		.unwrap();

		let layout = locate(&written, ParseOptions::new()).unwrap();
		let types = layout.blocks.iter().map(|b| b.ty).collect::<Vec<_>>();
		assert_eq!(types, [0, 4, 6, 1]);
		assert_eq!(layout.blocks[3].content.len(), 512);
		assert!(layout.blocks[3].last);

		let contents = read_from(&written, ParseOptions::new()).unwrap();
		assert_eq!(contents.tags[0].pictures(), vec![picture]);

		// No padding requested
		let written = write_to(
			&data,
			ParseOptions::new(),
			&updates,
			WriteOptions::new().preferred_padding(0),
		)
		.unwrap();
		let layout = locate(&written, ParseOptions::new()).unwrap();
		assert_eq!(layout.blocks.len(), 3);
	}

	#[test_log::test]
	fn strip_tags() {
		let picture = Picture::new(vec![1; 40], "image/png", "", "Other");
		let data = flac(&[
			block(4, false, &comments("Foo")),
			block(6, true, &picture.as_flac_bytes(false)),
		]);

		let written = write_to(
			&data,
			ParseOptions::new(),
			&TagUpdates::strip_all(),
			WriteOptions::default(),
		)
		.unwrap();

		let contents = read_from(&written, ParseOptions::new()).unwrap();
		assert!(contents.tags.is_empty());
		assert_eq!(written.len(), data.len());
	}

	#[test_log::test]
	fn large_freed_space_is_split() {
		let cover = Picture::new(vec![0; 9 * 1024 * 1024], "image/png", "", "Front Cover");
		let data = flac(&[
			block(6, false, &cover.as_flac_bytes(false)),
			block(6, true, &cover.as_flac_bytes(false)),
		]);
		let original = locate(&data, ParseOptions::new()).unwrap();

		let mut updates = TagUpdates::keep_all();
		updates.flac_pictures = Some(Vec::new());

		let written =
			write_to(&data, ParseOptions::new(), &updates, WriteOptions::default()).unwrap();
		assert_eq!(written.len(), data.len());

		let layout = locate(&written, ParseOptions::new()).unwrap();
		assert_eq!(layout.frames, original.frames);
		assert!(layout.blocks[1..].iter().all(|b| b.ty == 1));
		assert_eq!(layout.blocks.len(), 3);
		assert!(layout.blocks[2].last);
	}

	#[test_log::test]
	fn refuses_ape() {
		let data = flac(&[]);

		let mut updates = TagUpdates::keep_all();
		updates.ape = RegionUpdate::Replace(vec![0; 32]);

		let err =
			write_to(&data, ParseOptions::new(), &updates, WriteOptions::default()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::FileEncoding(_)));
	}

	#[test_log::test]
	fn oversized_picture() {
		let data = flac(&[]);

		let mut updates = TagUpdates::keep_all();
		updates.flac_pictures = Some(vec![Picture::new(
			vec![0; 0x100_0000],
			"image/png",
			"",
			"Other",
		)]);

		let err =
			write_to(&data, ParseOptions::new(), &updates, WriteOptions::default()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::TooMuchData));
	}
}
