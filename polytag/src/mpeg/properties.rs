use super::header::{Header, VbrHeader, VbrHeaderType};
use crate::properties::AudioProperties;
use crate::util::math::RoundedDivision;

use std::time::Duration;

/// Probe the audio stream
///
/// `first_frame` is the offset of the first frame in `data`, and `stream_end` the offset just past
/// the last audio byte (before any APE or ID3v1 tag).
pub(super) fn read_properties(
	data: &[u8],
	first_frame: (Header, usize),
	stream_end: usize,
) -> AudioProperties {
	let (header, first_frame_offset) = first_frame;

	let mut properties = AudioProperties {
		sample_rate: header.sample_rate,
		channels: header.channels(),
		..AudioProperties::default()
	};

	let vbr_start = first_frame_offset + header.data_start as usize;
	let vbr_header = data
		.get(vbr_start..stream_end)
		.and_then(|vbr_data| match VbrHeader::read(vbr_data) {
			Ok(vbr_header) => vbr_header,
			Err(e) => {
				log::warn!("MPEG: Ignoring invalid VBR header: {e}");
				None
			},
		})
		.or_else(|| {
			// VBRI headers are always 32 bytes after the frame header
			let vbri_start = first_frame_offset + 36;
			data.get(vbri_start..stream_end)
				.and_then(|vbri_data| VbrHeader::read(vbri_data).ok().flatten())
				.filter(|h| h.ty == VbrHeaderType::Vbri)
		});

	if let Some(vbr_header) = vbr_header.filter(VbrHeader::is_valid) {
		log::debug!("MPEG: Valid VBR header; using it to calculate duration");

		let sample_rate = u64::from(header.sample_rate);
		let samples_per_frame = u64::from(header.samples);
		let total_frames = u64::from(vbr_header.frames);

		let length = (samples_per_frame * 1000 * total_frames).div_round(sample_rate);
		if length > 0 {
			properties.duration = Duration::from_millis(length);
			properties.bitrate = ((u64::from(vbr_header.size) * 8) / length) as u32;
		}

		return properties;
	}

	log::debug!("MPEG: Using bitrate to estimate duration");

	let stream_len = stream_end.saturating_sub(first_frame_offset) as u64;
	properties.bitrate = header.bitrate;

	let length = (stream_len * 8).div_round(u64::from(header.bitrate));
	properties.duration = Duration::from_millis(length);

	properties
}
