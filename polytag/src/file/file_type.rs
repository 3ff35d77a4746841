use crate::config::{ParseOptions, WriteOptions};
use crate::error::Result;
use crate::file::container::{ContainerContents, TagUpdates};
use crate::tag::BackendKind;

use std::ffi::OsStr;
use std::path::Path;

/// List of common extensions for every supported [`FileType`]
///
/// NOTE: Files are identified by their content, this can only be used as a filter when scanning
/// directories.
pub const EXTENSIONS: &[&str] = &["mp3", "mp2", "mp1", "flac"];

/// The type of file read
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
#[non_exhaustive]
pub enum FileType {
	Mpeg,
	Flac,
}

impl FileType {
	/// The name of the stream type
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::file::FileType;
	///
	/// assert_eq!(FileType::Mpeg.name(), "MPEG");
	/// assert_eq!(FileType::Flac.name(), "FLAC");
	/// ```
	pub fn name(self) -> &'static str {
		match self {
			FileType::Mpeg => "MPEG",
			FileType::Flac => "FLAC",
		}
	}

	/// The backend created when a file holds no tag that can store a property
	///
	/// | [`FileType`] | [`BackendKind`]  |
	/// |--------------|------------------|
	/// | `Mpeg`       | `Id3v2`          |
	/// | `Flac`       | `VorbisComments` |
	pub fn primary_backend(self) -> BackendKind {
		match self {
			FileType::Mpeg => BackendKind::Id3v2,
			FileType::Flac => BackendKind::VorbisComments,
		}
	}

	/// Whether a backend of `kind` can be created in this file type
	///
	/// Some backends are only read, and rewritten, when they are already present. FLAC files
	/// may carry an ID3v2 tag, but one is never created.
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::file::FileType;
	/// use polytag::tag::BackendKind;
	///
	/// assert!(FileType::Mpeg.can_create(BackendKind::Ape));
	/// assert!(!FileType::Flac.can_create(BackendKind::Id3v2));
	/// ```
	pub fn can_create(self, kind: BackendKind) -> bool {
		match self {
			FileType::Mpeg => matches!(
				kind,
				BackendKind::Id3v2 | BackendKind::Ape | BackendKind::Id3v1
			),
			FileType::Flac => matches!(kind, BackendKind::VorbisComments | BackendKind::Id3v1),
		}
	}

	/// Whether a backend of `kind` can exist in this file type at all
	pub fn supports(self, kind: BackendKind) -> bool {
		match self {
			FileType::Mpeg => kind != BackendKind::VorbisComments,
			FileType::Flac => kind != BackendKind::Ape,
		}
	}

	/// Attempts to extract a [`FileType`] from an extension
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::file::FileType;
	///
	/// let extension = "mp3";
	/// assert_eq!(FileType::from_ext(extension), Some(FileType::Mpeg));
	/// ```
	pub fn from_ext<E>(ext: E) -> Option<Self>
	where
		E: AsRef<OsStr>,
	{
		let ext = ext.as_ref().to_str()?.to_ascii_lowercase();

		// Also update `EXTENSIONS` above
		match ext.as_str() {
			"mp3" | "mp2" | "mp1" => Some(Self::Mpeg),
			"flac" => Some(Self::Flac),
			_ => None,
		}
	}

	/// Attempts to determine a [`FileType`] from a path
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::file::FileType;
	/// use std::path::Path;
	///
	/// let path = Path::new("path/to/my.mp3");
	/// assert_eq!(FileType::from_path(path), Some(FileType::Mpeg));
	/// ```
	pub fn from_path<P>(path: P) -> Option<Self>
	where
		P: AsRef<Path>,
	{
		let ext = path.as_ref().extension();
		ext.and_then(Self::from_ext)
	}

	/// Attempts to identify a [`FileType`] from the start of a file
	///
	/// A leading ID3v2 tag is skipped, as is any junk before the first MPEG frame, up to
	/// [`ParseOptions::max_junk_bytes`].
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::config::ParseOptions;
	/// use polytag::file::FileType;
	///
	/// let flac = b"fLaC\x00\x00\x00\x22";
	/// assert_eq!(FileType::from_buffer(flac, ParseOptions::new()), Some(FileType::Flac));
	///
	/// let mpeg = [0xFF, 0xFB, 0x90, 0x64];
	/// assert_eq!(FileType::from_buffer(&mpeg, ParseOptions::new()), Some(FileType::Mpeg));
	///
	/// assert_eq!(FileType::from_buffer(b"RIFF", ParseOptions::new()), None);
	/// ```
	pub fn from_buffer(buf: &[u8], parse_options: ParseOptions) -> Option<Self> {
		use crate::id3::v2::util::synchsafe::SynchsafeInteger;
		use crate::mpeg::header::find_first_frame;

		let mut start = 0;

		// The bare minimum size for an ID3v2 header is 10 bytes
		if buf.len() >= 10 && &buf[..3] == b"ID3" {
			let size = u32::from_be_bytes([buf[6], buf[7], buf[8], buf[9]]).unsynch();
			start = 10 + size as usize;

			// Footer present
			if buf[5] & 0x10 == 0x10 {
				start += 10;
			}

			log::debug!("Skipping an ID3v2 tag of {start} bytes while identifying the file");
		}

		let stream = buf.get(start..)?;
		if stream.starts_with(b"fLaC") {
			return Some(Self::Flac);
		}

		find_first_frame(stream, parse_options.max_junk_bytes).map(|_| Self::Mpeg)
	}

	pub(crate) fn read_from(
		self,
		data: &[u8],
		parse_options: ParseOptions,
	) -> Result<ContainerContents> {
		match self {
			FileType::Mpeg => crate::mpeg::read::read_from(data, parse_options),
			FileType::Flac => crate::flac::read::read_from(data, parse_options),
		}
	}

	pub(crate) fn write_to(
		self,
		data: &[u8],
		parse_options: ParseOptions,
		updates: &TagUpdates,
		write_options: WriteOptions,
	) -> Result<Vec<u8>> {
		match self {
			FileType::Mpeg => crate::mpeg::write::write_to(data, parse_options, updates),
			FileType::Flac => {
				crate::flac::write::write_to(data, parse_options, updates, write_options)
			},
		}
	}
}
