//! Format-agnostic picture handling
//!
//! A [`Picture`] is the same regardless of the tag it came from. Its classification is kept as a
//! string (see [`PictureType::name`]), and is translated into each tag's native representation
//! when saving.

use crate::config::ParsingMode;
use crate::error::{ErrorKind, PolytagError, Result};
use crate::macros::{err, try_vec};
use crate::util::text::utf8_decode_str;

use std::fmt::{Debug, Display, Formatter};
use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt as _};
use data_encoding::BASE64;

/// Mime types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown mimetype
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::picture::MimeType;
	///
	/// let jpeg_mimetype_str = "image/jpeg";
	/// assert_eq!(MimeType::from_str(jpeg_mimetype_str), MimeType::Jpeg);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	/// Guess the `MimeType` from the first bytes of an image
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::picture::MimeType;
	///
	/// let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
	/// assert_eq!(MimeType::sniff(&png), Some(MimeType::Png));
	/// assert_eq!(MimeType::sniff(b"not an image"), None);
	/// ```
	pub fn sniff(bytes: &[u8]) -> Option<Self> {
		match bytes {
			[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(MimeType::Png),
			[0xFF, 0xD8, ..] => Some(MimeType::Jpeg),
			[b'G', b'I', b'F', 0x38, 0x37 | 0x39, b'a', ..] => Some(MimeType::Gif),
			[b'B', b'M', ..] => Some(MimeType::Bmp),
			[b'I', b'I', b'*', 0x00, ..] | [b'M', b'M', 0x00, b'*', ..] => Some(MimeType::Tiff),
			_ => None,
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
}

const PICTURE_TYPES: [(PictureType, &str, &str); 21] = [
	(PictureType::Other, "Other", "Cover Art (Other)"),
	(PictureType::Icon, "File Icon", "Cover Art (Png Icon)"),
	(PictureType::OtherIcon, "Other File Icon", "Cover Art (Icon)"),
	(PictureType::CoverFront, "Front Cover", "Cover Art (Front)"),
	(PictureType::CoverBack, "Back Cover", "Cover Art (Back)"),
	(PictureType::Leaflet, "Leaflet Page", "Cover Art (Leaflet)"),
	(PictureType::Media, "Media", "Cover Art (Media)"),
	(PictureType::LeadArtist, "Lead Artist", "Cover Art (Lead Artist)"),
	(PictureType::Artist, "Artist", "Cover Art (Artist)"),
	(PictureType::Conductor, "Conductor", "Cover Art (Conductor)"),
	(PictureType::Band, "Band", "Cover Art (Band)"),
	(PictureType::Composer, "Composer", "Cover Art (Composer)"),
	(PictureType::Lyricist, "Lyricist", "Cover Art (Lyricist)"),
	(
		PictureType::RecordingLocation,
		"Recording Location",
		"Cover Art (Recording Location)",
	),
	(
		PictureType::DuringRecording,
		"During Recording",
		"Cover Art (During Recording)",
	),
	(
		PictureType::DuringPerformance,
		"During Performance",
		"Cover Art (During Performance)",
	),
	(
		PictureType::ScreenCapture,
		"Movie Screen Capture",
		"Cover Art (Video Capture)",
	),
	(PictureType::BrightFish, "Coloured Fish", "Cover Art (Fish)"),
	(PictureType::Illustration, "Illustration", "Cover Art (Illustration)"),
	(PictureType::BandLogo, "Band Logo", "Cover Art (Band Logotype)"),
	(
		PictureType::PublisherLogo,
		"Publisher Logo",
		"Cover Art (Publisher Logotype)",
	),
];

impl PictureType {
	/// Get a u8 from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(self) -> u8 {
		PICTURE_TYPES
			.iter()
			.position(|(ty, ..)| *ty == self)
			.unwrap_or_default() as u8
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	///
	/// Values outside of the defined range are treated as [`PictureType::Other`].
	pub fn from_u8(byte: u8) -> Self {
		PICTURE_TYPES
			.get(usize::from(byte))
			.map_or(Self::Other, |(ty, ..)| *ty)
	}

	/// The display name of the type, as used by [`Picture::pic_type`]
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::picture::PictureType;
	///
	/// assert_eq!(PictureType::CoverFront.name(), "Front Cover");
	/// ```
	pub fn name(self) -> &'static str {
		PICTURE_TYPES[usize::from(self.as_u8())].1
	}

	/// Get a `PictureType` from its display name
	///
	/// Unknown names are treated as [`PictureType::Other`].
	pub fn from_name(name: &str) -> Self {
		PICTURE_TYPES
			.iter()
			.find(|(_, type_name, _)| *type_name == name)
			.map_or(Self::Other, |(ty, ..)| *ty)
	}

	/// Get an APE item key from a `PictureType`
	pub fn as_ape_key(self) -> &'static str {
		PICTURE_TYPES[usize::from(self.as_u8())].2
	}

	/// Get a `PictureType` from an APE item key
	///
	/// Returns `None` if the key is not a cover art key.
	pub fn from_ape_key(key: &str) -> Option<Self> {
		PICTURE_TYPES
			.iter()
			.find(|(.., ape_key)| ape_key.eq_ignore_ascii_case(key))
			.map(|(ty, ..)| *ty)
	}
}

/// Information about a [`Picture`]
///
/// This information is necessary for FLAC's `METADATA_BLOCK_PICTURE`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub(crate) struct PictureInformation {
	pub(crate) width: u32,
	pub(crate) height: u32,
	pub(crate) color_depth: u32,
	pub(crate) num_colors: u32,
}

impl PictureInformation {
	/// Attempt to extract the dimensions of a PNG or JPEG picture
	///
	/// Any other format, or an unreadable image, gives zeroed information.
	pub(crate) fn from_picture(picture: &Picture) -> Self {
		match picture.data.get(..4) {
			Some([0x89, b'P', b'N', b'G']) => Self::from_png(&picture.data).unwrap_or_default(),
			Some([0xFF, 0xD8, 0xFF, _]) => Self::from_jpeg(&picture.data).unwrap_or_default(),
			_ => Self::default(),
		}
	}

	fn from_png(data: &[u8]) -> Option<Self> {
		const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

		// The signature is immediately followed by the IHDR chunk
		if data.get(..8)? != SIGNATURE || data.get(12..16)? != b"IHDR" {
			return None;
		}

		let bit_depth = u32::from(*data.get(24)?);
		let color_type = *data.get(25)?;

		let channels = match color_type {
			2 => 3,
			4 | 6 => 4,
			_ => 1,
		};

		// Only indexed-color images have a palette, with 1-256 RGB entries
		let num_colors = if color_type == 3 {
			png_chunks(&data[8..])
				.find(|(ty, _)| ty == b"PLTE")
				.map_or(0, |(_, len)| len / 3)
		} else {
			0
		};

		Some(Self {
			width: be_u32(data, 16)?,
			height: be_u32(data, 20)?,
			color_depth: bit_depth * channels,
			num_colors,
		})
	}

	fn from_jpeg(data: &[u8]) -> Option<Self> {
		if !data.starts_with(&[0xFF, 0xD8]) {
			return None;
		}

		// Segments follow the SOI marker, each length includes itself
		let mut pos = 2;
		while data.get(pos) == Some(&0xFF) {
			let marker = *data.get(pos + 1)?;
			let len = usize::from(u16::from_be_bytes([*data.get(pos + 2)?, *data.get(pos + 3)?]));

			match marker {
				// SOF0 and SOF2 hold the dimensions
				0xC0 | 0xC2 => {
					let segment = data.get(pos + 4..pos + 10)?;
					let precision = u32::from(segment[0]);
					let components = u32::from(segment[5]);

					return Some(Self {
						width: u32::from(u16::from_be_bytes([segment[3], segment[4]])),
						height: u32::from(u16::from_be_bytes([segment[1], segment[2]])),
						color_depth: precision * components,
						num_colors: 0,
					});
				},
				// Start of scan, no frame header was found
				0xDA => return None,
				_ => pos += 2 + len,
			}
		}

		None
	}
}

fn be_u32(data: &[u8], offset: usize) -> Option<u32> {
	let bytes = data.get(offset..offset + 4)?;
	Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// The `(type, length)` of every PNG chunk in `data`
fn png_chunks(data: &[u8]) -> impl Iterator<Item = ([u8; 4], u32)> + '_ {
	let mut pos = 0_usize;
	std::iter::from_fn(move || {
		let len = be_u32(data, pos)?;
		let ty = data.get(pos + 4..pos + 8)?;
		let ty = [ty[0], ty[1], ty[2], ty[3]];

		// Length, type, content, CRC
		pos = pos.checked_add(12 + len as usize)?;
		Some((ty, len))
	})
}

/// An embedded picture
///
/// Pictures handed out by [`TagFile`](crate::file::TagFile) are copies. Changing one has no
/// effect until it is given back through one of the picture setters.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	pub(crate) data: Vec<u8>,
	pub(crate) mime_type: String,
	pub(crate) description: String,
	pub(crate) pic_type: String,
}

impl Debug for Picture {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Picture")
			.field("pic_type", &self.pic_type)
			.field("mime_type", &self.mime_type)
			.field("description", &self.description)
			.field("data", &format!("<{} bytes>", self.data.len()))
			.finish()
	}
}

impl Picture {
	/// Create a new `Picture`
	///
	/// An empty `mime_type` is guessed from the data where possible.
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::picture::Picture;
	///
	/// let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
	/// let picture = Picture::new(png, "", "Cover", "Front Cover");
	///
	/// assert_eq!(picture.mime_type(), "image/png");
	/// ```
	pub fn new(
		data: Vec<u8>,
		mime_type: impl Into<String>,
		description: impl Into<String>,
		pic_type: impl Into<String>,
	) -> Self {
		let mut mime_type = mime_type.into();
		if mime_type.is_empty() {
			if let Some(sniffed) = MimeType::sniff(&data) {
				mime_type = sniffed.as_str().to_owned();
			}
		}

		Self {
			data,
			mime_type,
			description: description.into(),
			pic_type: pic_type.into(),
		}
	}

	pub(crate) fn from_native(
		data: Vec<u8>,
		mime_type: String,
		description: String,
		pic_type: PictureType,
	) -> Self {
		Self::new(data, mime_type, description, pic_type.name())
	}

	/// Returns the picture data
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes the picture, returning its data
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}

	/// Returns the MIME type, may be empty
	pub fn mime_type(&self) -> &str {
		&self.mime_type
	}

	/// Returns the description, may be empty
	pub fn description(&self) -> &str {
		&self.description
	}

	/// Returns the picture classification, such as `"Front Cover"`
	pub fn pic_type(&self) -> &str {
		&self.pic_type
	}

	/// Returns the classification as a [`PictureType`]
	///
	/// Classifications that are not one of the standard names are [`PictureType::Other`].
	pub fn picture_type(&self) -> PictureType {
		PictureType::from_name(&self.pic_type)
	}

	/// Set the picture data
	pub fn set_data(&mut self, data: Vec<u8>) {
		self.data = data;
	}

	/// Set the MIME type
	pub fn set_mime_type(&mut self, mime_type: impl Into<String>) {
		self.mime_type = mime_type.into();
	}

	/// Set the description
	pub fn set_description(&mut self, description: impl Into<String>) {
		self.description = description.into();
	}

	/// Set the picture classification
	pub fn set_pic_type(&mut self, pic_type: impl Into<String>) {
		self.pic_type = pic_type.into();
	}

	/// Convert a [`Picture`] to a FLAC `METADATA_BLOCK_PICTURE` body
	///
	/// When `encode` is set, the result is base64 encoded for use in a Vorbis comment.
	pub(crate) fn as_flac_bytes(&self, encode: bool) -> Vec<u8> {
		let picture_information = PictureInformation::from_picture(self);
		let mut data = Vec::<u8>::new();

		data.extend(u32::from(self.picture_type().as_u8()).to_be_bytes());
		data.extend((self.mime_type.len() as u32).to_be_bytes());
		data.extend(self.mime_type.as_bytes());
		data.extend((self.description.len() as u32).to_be_bytes());
		data.extend(self.description.as_bytes());

		data.extend(picture_information.width.to_be_bytes());
		data.extend(picture_information.height.to_be_bytes());
		data.extend(picture_information.color_depth.to_be_bytes());
		data.extend(picture_information.num_colors.to_be_bytes());

		data.extend((self.data.len() as u32).to_be_bytes());
		data.extend(self.data.iter());

		if encode {
			BASE64.encode(&data).into_bytes()
		} else {
			data
		}
	}

	/// Get a [`Picture`] from a FLAC `METADATA_BLOCK_PICTURE` body
	///
	/// `encoded` signals that the body is base64 encoded, as it is in Vorbis comments.
	pub(crate) fn from_flac_bytes(
		bytes: &[u8],
		encoded: bool,
		parse_mode: ParsingMode,
	) -> Result<Self> {
		if encoded {
			let data = BASE64
				.decode(bytes)
				.map_err(|_| PolytagError::new(ErrorKind::NotAPicture))?;
			Self::from_flac_bytes_inner(&data, parse_mode)
		} else {
			Self::from_flac_bytes_inner(bytes, parse_mode)
		}
	}

	fn from_flac_bytes_inner(content: &[u8], parse_mode: ParsingMode) -> Result<Self> {
		if content.len() < 32 {
			err!(NotAPicture);
		}

		let mut reader = Cursor::new(content);

		let pic_ty = reader.read_u32::<BigEndian>()?;

		// APIC only has a single byte for the type
		if pic_ty > 255 && parse_mode == ParsingMode::Strict {
			err!(NotAPicture);
		}

		let mime_type = read_flac_string(&mut reader, content)?;
		let description = read_flac_string(&mut reader, content)?;

		// Width, height, color depth, number of colors
		reader.seek(SeekFrom::Current(16))?;

		let data_len = reader.read_u32::<BigEndian>()? as usize;
		let remaining = content.len() - reader.position() as usize;
		if data_len > remaining {
			err!(SizeMismatch);
		}

		let mut data = try_vec![0; data_len];
		reader.read_exact(&mut data)?;

		Ok(Self::from_native(
			data,
			mime_type,
			description,
			PictureType::from_u8(pic_ty as u8),
		))
	}

	/// Convert a [`Picture`] to an APE binary item value
	///
	/// The layout is the description, a null terminator, then the picture data.
	pub(crate) fn as_ape_bytes(&self) -> Vec<u8> {
		let mut data: Vec<u8> = Vec::with_capacity(self.description.len() + 1 + self.data.len());

		data.extend(self.description.as_bytes());
		data.push(0);
		data.extend(self.data.iter());

		data
	}

	/// Get a [`Picture`] from an APE binary item
	pub(crate) fn from_ape_bytes(pic_type: PictureType, bytes: &[u8]) -> Result<Self> {
		let Some(terminator) = bytes.iter().position(|b| *b == 0) else {
			err!(NotAPicture);
		};

		let description = String::from_utf8_lossy(&bytes[..terminator]).into_owned();
		let data = bytes[terminator + 1..].to_vec();
		if data.is_empty() {
			err!(NotAPicture);
		}

		Ok(Self::from_native(data, String::new(), description, pic_type))
	}
}

fn read_flac_string(reader: &mut Cursor<&[u8]>, content: &[u8]) -> Result<String> {
	let len = reader.read_u32::<BigEndian>()? as usize;
	let start = reader.position() as usize;

	let Some(bytes) = content.get(start..start + len) else {
		err!(SizeMismatch);
	};

	let text = utf8_decode_str(bytes)?.to_owned();
	reader.seek(SeekFrom::Current(len as i64))?;

	Ok(text)
}
