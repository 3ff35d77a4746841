use super::constants::{BITRATES, PADDING_SIZES, SAMPLE_RATES, SAMPLES, SIDE_INFORMATION_SIZES};
use crate::error::Result;
use crate::macros::decode_err;

use byteorder::{BigEndian, ByteOrder};

pub(crate) fn verify_frame_sync(frame_sync: [u8; 2]) -> bool {
	frame_sync[0] == 0xFF && frame_sync[1] >> 5 == 0b111
}

// Searches for a frame sync (11 set bits) in `data`, returning the index of its first byte.
//
// Note that the search searches in 8 bit steps, i.e. the first 8 bits need to be byte aligned.
pub(crate) fn search_for_frame_sync(data: &[u8]) -> Option<usize> {
	data.windows(2)
		.position(|pair| verify_frame_sync([pair[0], pair[1]]))
}

// Finds the first position in `data` holding a valid frame header, searching at most `max_offset`
// bytes in.
pub(crate) fn find_first_frame(data: &[u8], max_offset: usize) -> Option<(usize, Header)> {
	let mut pos = 0;
	while pos <= max_offset {
		let remaining = data.get(pos..)?;
		let sync = search_for_frame_sync(remaining)?;

		pos += sync;
		if pos > max_offset {
			return None;
		}

		if let Some(bytes) = data.get(pos..pos + 4) {
			if let Some(header) = Header::read(BigEndian::read_u32(bytes)) {
				return Some((pos, header));
			}
		}

		log::trace!("MPEG: Skipping invalid frame header at offset {pos}");
		pos += 1;
	}

	None
}

/// MPEG Audio version
#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
pub enum MpegVersion {
	#[default]
	V1,
	V2,
	V2_5,
}

/// MPEG layer
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Layer {
	Layer1 = 1,
	Layer2 = 2,
	#[default]
	Layer3 = 3,
}

/// Channel mode
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum ChannelMode {
	#[default]
	Stereo = 0,
	JointStereo = 1,
	/// Two independent mono channels
	DualChannel = 2,
	SingleChannel = 3,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Header {
	pub(crate) sample_rate: u32,
	pub(crate) len: u32,
	pub(crate) data_start: u32,
	pub(crate) samples: u16,
	pub(crate) bitrate: u32,
	pub(crate) version: MpegVersion,
	pub(crate) layer: Layer,
	pub(crate) channel_mode: ChannelMode,
}

impl Header {
	pub(crate) fn read(data: u32) -> Option<Self> {
		if !verify_frame_sync([(data >> 24) as u8, (data >> 16) as u8]) {
			return None;
		}

		let version = match (data >> 19) & 0b11 {
			0b00 => MpegVersion::V2_5,
			0b10 => MpegVersion::V2,
			0b11 => MpegVersion::V1,
			_ => return None,
		};

		let version_index = if version == MpegVersion::V1 { 0 } else { 1 };

		let layer = match (data >> 17) & 0b11 {
			0b01 => Layer::Layer3,
			0b10 => Layer::Layer2,
			0b11 => Layer::Layer1,
			_ => {
				log::debug!("MPEG: Frame header uses a reserved layer");
				return None;
			},
		};

		let layer_index = (layer as usize).saturating_sub(1);

		let bitrate_index = (data >> 12) & 0xF;
		let bitrate = BITRATES[version_index][layer_index][bitrate_index as usize];
		if bitrate == 0 {
			return None;
		}

		let sample_rate_index = (data >> 10) & 0b11;
		let sample_rate = match sample_rate_index {
			// This is invalid
			0b11 => return None,
			_ => SAMPLE_RATES[version as usize][sample_rate_index as usize],
		};

		let mut padding = 0;
		if (data >> 9) & 1 == 1 {
			padding = u32::from(PADDING_SIZES[layer_index]);
		}

		let channel_mode = match (data >> 6) & 0b11 {
			0b00 => ChannelMode::Stereo,
			0b01 => ChannelMode::JointStereo,
			0b10 => ChannelMode::DualChannel,
			_ => ChannelMode::SingleChannel,
		};

		let data_start = SIDE_INFORMATION_SIZES[version_index][channel_mode as usize] + 4;
		let samples = SAMPLES[layer_index][version_index];
		let len = (u32::from(samples) * bitrate * 125 / sample_rate) + padding;

		Some(Header {
			sample_rate,
			len,
			data_start,
			samples,
			bitrate,
			version,
			layer,
			channel_mode,
		})
	}

	pub(crate) fn channels(&self) -> u8 {
		if self.channel_mode == ChannelMode::SingleChannel {
			1
		} else {
			2
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum VbrHeaderType {
	Xing,
	Info,
	Vbri,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct VbrHeader {
	pub(crate) ty: VbrHeaderType,
	pub(crate) frames: u32,
	pub(crate) size: u32,
}

impl VbrHeader {
	/// Read a Xing/Info/VBRI header from the start of `data`
	pub(crate) fn read(data: &[u8]) -> Result<Option<Self>> {
		let Some(header) = data.get(..4) else {
			return Ok(None);
		};

		match header {
			b"Xing" | b"Info" => {
				if data.len() < 16 {
					decode_err!(@BAIL Mpeg, "Xing header has an invalid size (< 16)");
				}

				if data[7] & 0x03 != 0x03 {
					log::debug!(
						"MPEG: Xing header doesn't have required flags set (0x0001 and 0x0002)"
					);
					return Ok(None);
				}

				let frames = BigEndian::read_u32(&data[8..12]);
				let size = BigEndian::read_u32(&data[12..16]);

				let ty = if header == b"Xing" {
					VbrHeaderType::Xing
				} else {
					VbrHeaderType::Info
				};

				Ok(Some(Self { ty, frames, size }))
			},
			b"VBRI" => {
				if data.len() < 32 {
					decode_err!(@BAIL Mpeg, "VBRI header has an invalid size (< 32)");
				}

				// Skip 6 bytes
				// Version ID (2)
				// Delay float (2)
				// Quality indicator (2)
				let size = BigEndian::read_u32(&data[10..14]);
				let frames = BigEndian::read_u32(&data[14..18]);

				Ok(Some(Self {
					ty: VbrHeaderType::Vbri,
					frames,
					size,
				}))
			},
			_ => Ok(None),
		}
	}

	pub(crate) fn is_valid(&self) -> bool {
		self.frames > 0 && self.size > 0
	}
}
