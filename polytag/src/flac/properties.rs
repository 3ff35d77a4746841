use crate::error::Result;
use crate::macros::decode_err;
use crate::properties::AudioProperties;

use std::time::Duration;

use byteorder::{BigEndian, ByteOrder};

/// Read the audio properties from a STREAMINFO block
///
/// `stream_length` is the size of the audio frames, used for the bitrate.
pub(crate) fn read_properties(stream_info: &[u8], stream_length: u64) -> Result<AudioProperties> {
	if stream_info.len() < 18 {
		decode_err!(@BAIL Flac, "File has an invalid STREAMINFO block size (< 18)");
	}

	// Skip 10 bytes
	// Minimum block size (2)
	// Maximum block size (2)
	// Minimum frame size (3)
	// Maximum frame size (3)
	//
	// Then read 4 bytes
	// Sample rate (20 bits)
	// Number of channels (3 bits)
	// Bits per sample (5 bits)
	// Total samples (first 4 bits)
	let info = BigEndian::read_u32(&stream_info[10..14]);

	let sample_rate = info >> 12;
	let channels = ((info >> 9) & 7) + 1;

	// The remaining 32 bits of the total samples
	let total_samples =
		(u64::from(info & 0xF) << 32) | u64::from(BigEndian::read_u32(&stream_info[14..18]));

	let mut properties = AudioProperties {
		sample_rate,
		channels: channels as u8,
		..AudioProperties::default()
	};

	if sample_rate > 0 && total_samples > 0 {
		let length = (total_samples * 1000) / u64::from(sample_rate);
		properties.duration = Duration::from_millis(length);

		if length > 0 && stream_length > 0 {
			properties.bitrate = ((stream_length * 8) / length) as u32;
		}
	}

	Ok(properties)
}
