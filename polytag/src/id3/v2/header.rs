use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::err;

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

/// The version of an ID3v2 tag as read from its header
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(crate) enum Id3v2HeaderVersion {
	V2,
	V3,
	V4,
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised
	pub unsynchronisation: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer
	pub footer: bool,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2HeaderVersion,
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
	/// The size of the extended header, in bytes, if one is present
	pub extended_size: u32,
}

impl Id3v2Header {
	pub(crate) fn parse<R>(bytes: &mut R) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; 10];
		bytes.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			err!(FakeTag);
		}

		// Version is stored as [major, minor], but here we don't care about minor revisions unless there's an error.
		let version = match header[3] {
			2 => Id3v2HeaderVersion::V2,
			3 => Id3v2HeaderVersion::V3,
			4 => Id3v2HeaderVersion::V4,
			major => {
				return Err(
					Id3v2Error::new(Id3v2ErrorKind::BadId3v2Version(major, header[4])).into(),
				);
			},
		};

		let flags = header[5];

		// ID3v2.2 compression never had a defined scheme, such tags are unreadable
		if version == Id3v2HeaderVersion::V2 && flags & 0x40 == 0x40 {
			return Err(Id3v2Error::new(Id3v2ErrorKind::V2Compression).into());
		}

		let is_v2 = version == Id3v2HeaderVersion::V2;
		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			experimental: !is_v2 && flags & 0x20 == 0x20,
			footer: version == Id3v2HeaderVersion::V4 && flags & 0x10 == 0x10,
		};

		let size = BigEndian::read_u32(&header[6..]).unsynch();
		let mut extended_size = 0;

		if !is_v2 && flags & 0x40 == 0x40 {
			// ID3v2.4 includes the size field in the extended header size, and makes it synchsafe.
			// ID3v2.3 does neither.
			extended_size = match version {
				Id3v2HeaderVersion::V4 => bytes.read_u32::<BigEndian>()?.unsynch(),
				_ => bytes.read_u32::<BigEndian>()?.saturating_add(4),
			};

			if extended_size < 6 {
				return Err(Id3v2Error::new(Id3v2ErrorKind::BadExtendedHeaderSize).into());
			}
		}

		if extended_size > 0 && extended_size >= size {
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadExtendedHeaderSize).into());
		}

		Ok(Id3v2Header {
			version,
			flags: flags_parsed,
			size,
			extended_size,
		})
	}

	/// The total size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> u32 {
		self.size + 10 + if self.flags.footer { 10 } else { 0 }
	}
}
