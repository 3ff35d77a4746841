use super::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use super::tag::Id3v1Tag;
use crate::config::WriteOptions;
use crate::error::{PolytagError, Result};
use crate::tag::BackendKind;
use crate::util::text::latin1_encode;

use std::io::Write;

use byteorder::WriteBytesExt;

/// Encode the 128 bytes of an ID3v1 tag
///
/// Fields are truncated to their maximum size. With `lossy_text_encoding` disabled, any character
/// outside of Latin-1 is an error rather than being replaced.
pub(super) fn encode(tag: &Id3v1Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	fn resize_string(value: Option<&str>, size: usize, lossy: bool) -> Result<Vec<u8>> {
		let mut field = vec![0; size];

		if let Some(val) = value {
			for (dest, b) in field.iter_mut().zip(latin1_encode(val, lossy)) {
				*dest = b.map_err(|e| {
					PolytagError::backend_encode(
						BackendKind::Id3v1,
						format!("\"{val}\" can't be written: {e}"),
					)
				})?;
			}
		}

		Ok(field)
	}

	let lossy = write_options.lossy_text_encoding;
	let mut writer = Vec::with_capacity(ID3V1_TAG_SIZE);

	writer.write_all(&ID3V1_TAG_MARKER)?;
	writer.write_all(&resize_string(tag.title.as_deref(), 30, lossy)?)?;
	writer.write_all(&resize_string(tag.artist.as_deref(), 30, lossy)?)?;
	writer.write_all(&resize_string(tag.album.as_deref(), 30, lossy)?)?;

	let mut year = [0; 4];
	if let Some(year_num) = tag.year {
		let mut year_num = std::cmp::min(year_num, 9999);

		for digit in year.iter_mut().rev() {
			*digit = b'0' + (year_num % 10) as u8;
			year_num /= 10;
		}
	}

	writer.write_all(&year)?;

	match tag.track_number {
		Some(track_number) => {
			writer.write_all(&resize_string(tag.comment.as_deref(), 28, lossy)?)?;
			writer.write_u8(0)?;
			writer.write_u8(track_number)?;
		},
		None => writer.write_all(&resize_string(tag.comment.as_deref(), 30, lossy)?)?,
	}

	writer.write_u8(tag.genre.unwrap_or(255))?;

	Ok(writer)
}
