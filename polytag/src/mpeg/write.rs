use super::read::locate;
use crate::config::ParseOptions;
use crate::error::{FileEncodingError, Result};
use crate::file::FileType;
use crate::file::container::TagUpdates;

/// Rebuild an MPEG file with updated tags
///
/// The regions are located again in `data`, so this always works on the file as it currently is
/// on disk. The audio stream is copied untouched.
pub(crate) fn write_to(
	data: &[u8],
	parse_options: ParseOptions,
	updates: &TagUpdates,
) -> Result<Vec<u8>> {
	let has_flac_pictures = updates.flac_pictures.as_ref().is_some_and(|p| !p.is_empty());
	if updates.vorbis_comments.writes_tag() || has_flac_pictures {
		return Err(
			FileEncodingError::new(FileType::Mpeg, "MPEG files cannot hold Vorbis Comments").into(),
		);
	}

	let layout = locate(data, parse_options)?;

	let id3v2 = updates
		.id3v2
		.resolve(layout.id3v2.map(|(range, _)| &data[range]));
	let ape = updates
		.ape
		.resolve(layout.ape.map(|(range, _)| &data[range]));
	let id3v1 = updates.id3v1.resolve(layout.id3v1.map(|range| &data[range]));
	let audio = &data[layout.audio];

	log::debug!(
		"MPEG: Writing tags (ID3v2: {} bytes, APE: {} bytes, ID3v1: {} bytes)",
		id3v2.len(),
		ape.len(),
		id3v1.len()
	);

	let mut file = Vec::with_capacity(id3v2.len() + audio.len() + ape.len() + id3v1.len());
	file.extend_from_slice(id3v2);
	file.extend_from_slice(audio);
	file.extend_from_slice(ape);
	file.extend_from_slice(id3v1);

	Ok(file)
}
