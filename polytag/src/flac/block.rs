use crate::error::Result;
use crate::macros::{decode_err, err};

use byteorder::{BigEndian, ByteOrder};

pub(in crate::flac) const BLOCK_ID_STREAMINFO: u8 = 0;
pub(in crate::flac) const BLOCK_ID_PADDING: u8 = 1;
pub(in crate::flac) const BLOCK_ID_VORBIS_COMMENTS: u8 = 4;
pub(in crate::flac) const BLOCK_ID_PICTURE: u8 = 6;

const BLOCK_HEADER_SIZE: usize = 4;
const MAX_BLOCK_SIZE: usize = 0xFF_FFFF;

/// A metadata block
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Block {
	pub(super) ty: u8,
	pub(super) last: bool,
	pub(crate) content: Vec<u8>,
	/// The offset of the block header, 0 for new blocks
	pub(super) start: usize,
	/// The offset just past the content, 0 for new blocks
	pub(super) end: usize,
}

impl Block {
	/// Read the block whose header starts at `data[start]`
	pub(crate) fn read(data: &[u8], start: usize) -> Result<Self> {
		let Some(header) = data.get(start..start + BLOCK_HEADER_SIZE) else {
			decode_err!(@BAIL Flac, "Block header exceeds the file size");
		};

		let last = (header[0] & 0x80) != 0;
		let ty = header[0] & 0x7F;
		let size = BigEndian::read_u24(&header[1..]) as usize;
		log::trace!("Reading FLAC block, type: {ty}, size: {size}");

		let content_start = start + BLOCK_HEADER_SIZE;
		let end = content_start + size;
		let Some(content) = data.get(content_start..end) else {
			decode_err!(@BAIL Flac, "Block size exceeds the file size");
		};

		Ok(Self {
			ty,
			last,
			content: content.to_vec(),
			start,
			end,
		})
	}

	pub(crate) fn new(ty: u8, content: Vec<u8>) -> Self {
		Self {
			ty,
			last: false,
			content,
			start: 0,
			end: 0,
		}
	}

	pub(crate) fn new_padding(size: usize) -> Self {
		Self::new(BLOCK_ID_PADDING, vec![0; size])
	}

	/// Padding blocks covering exactly `gap` bytes, headers included
	///
	/// A single block can't exceed [`MAX_BLOCK_SIZE`], so large gaps are split. A gap smaller than
	/// a block header can't be filled, and yields no blocks.
	pub(crate) fn padding_to_fill(mut gap: usize) -> Vec<Self> {
		let mut blocks = Vec::new();
		while gap >= BLOCK_HEADER_SIZE {
			let mut size = (gap - BLOCK_HEADER_SIZE).min(MAX_BLOCK_SIZE);

			// Never leave a remainder too small to hold another header
			let rest = gap - BLOCK_HEADER_SIZE - size;
			if rest > 0 && rest < BLOCK_HEADER_SIZE {
				size -= BLOCK_HEADER_SIZE;
			}

			blocks.push(Self::new_padding(size));
			gap -= BLOCK_HEADER_SIZE + size;
		}

		blocks
	}

	/// The size of the block, header included
	pub(crate) fn len(&self) -> usize {
		BLOCK_HEADER_SIZE + self.content.len()
	}

	pub(crate) fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
		if self.content.len() > MAX_BLOCK_SIZE {
			err!(TooMuchData);
		}

		let mut byte = self.ty;
		if self.last {
			byte |= 0x80;
		}

		out.push(byte);

		let mut size = [0; 3];
		BigEndian::write_u24(&mut size, self.content.len() as u32);
		out.extend_from_slice(&size);
		out.extend_from_slice(&self.content);

		Ok(())
	}
}
