//! Contains the errors that can arise within polytag
//!
//! The primary error is [`PolytagError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.
//!
//! The kinds fall into four broad groups:
//!
//! * Opening a file: [`ErrorKind::Io`], [`ErrorKind::UnknownFormat`], [`ErrorKind::FileDecoding`]
//!   and [`ErrorKind::InvalidFile`] for handles that failed to open
//! * A single malformed tag: [`ErrorKind::BackendDecode`]
//! * A tag that cannot hold the pending changes: [`ErrorKind::BackendEncode`]
//! * Index based picture access: [`ErrorKind::OutOfBounds`]

use crate::file::FileType;
use crate::tag::BackendKind;
pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, PolytagError>`
pub type Result<T> = std::result::Result<T, PolytagError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Files
	/// The file is neither MPEG nor FLAC
	UnknownFormat,
	/// Operation attempted on a [`TagFile`](crate::file::TagFile) that failed to open
	InvalidFile,
	/// Saving was refused because the file is not writable
	///
	/// See [`WriteOptions::respect_read_only()`](crate::config::WriteOptions::respect_read_only).
	ReadOnly,
	/// A length field exceeds what the format (or the allocation limit) allows
	TooMuchData,
	/// A length field does not fit within its enclosing structure
	SizeMismatch,
	/// The container itself is malformed
	FileDecoding(FileDecodingError),
	/// The container cannot be rebuilt with the requested tags
	FileEncoding(FileEncodingError),

	// Tags
	/// A tag could not be decoded
	BackendDecode(BackendError),
	/// Pending changes could not be encoded into a tag
	BackendEncode(BackendError),

	// Pictures
	/// Picture data that could not be parsed
	NotAPicture,
	/// An index outside of the picture list was used
	OutOfBounds {
		/// The index provided
		index: usize,
		/// The number of available entries
		len: usize,
	},

	// Text and tag internals
	/// A tag identifier was found, but what follows is not a tag
	FakeTag,
	/// Text in a tag is not valid in its declared encoding
	TextDecode(&'static str),
	/// Text cannot be represented in the encoding required by the tag
	TextEncode(TextEncodingError),
	/// A problem specific to ID3v2
	Id3v2(Id3v2Error),

	// Wrapped
	/// See [`std::string::FromUtf8Error`]
	StringFromUtf8(std::string::FromUtf8Error),
	/// See [`std::str::Utf8Error`]
	StrFromUtf8(std::str::Utf8Error),
	/// See [`std::io::Error`]
	Io(std::io::Error),
	/// See [`TryReserveError`]
	Alloc(TryReserveError),
}

/// The types of errors that can occur while interacting with ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	// Header
	/// The major version is not 2, 3 or 4
	BadId3v2Version(u8, u8),
	/// An ID3v2.2 tag with the compression flag set
	///
	/// No compression scheme was ever defined for ID3v2.2, so these tags are unreadable.
	V2Compression,
	/// The extended header is smaller than 6 bytes or larger than the tag
	BadExtendedHeaderSize,

	// Frame
	/// A frame ID with characters outside of `A-Z0-9`
	BadFrameId(Vec<u8>),
	/// A frame size that runs past the end of the tag
	BadFrameLength,
	/// A frame with no content, only an error with [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
	EmptyFrame(String),
	/// An ID3v2.2 picture format other than `PNG`, `JPG`, `GIF` or `BMP`
	BadPictureFormat(String),
	/// A UFID frame with an empty owner
	MissingUfidOwner,

	// Compression
	#[cfg(not(feature = "id3v2_compression_support"))]
	/// A zlib compressed frame, without the `id3v2_compression_support` feature
	CompressedFrameEncountered,
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			// Header
			Self::BadId3v2Version(major, minor) => {
				write!(f, "Unsupported version v2.{major}.{minor}, expected v2.2, v2.3 or v2.4")
			},
			Self::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),
			Self::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},

			// Frame
			Self::BadFrameId(frame_id) => write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}"),
			Self::BadFrameLength => write!(f, "Frame size runs past the end of the tag"),
			Self::EmptyFrame(id) => write!(f, "Frame `{id}` is empty"),
			Self::BadPictureFormat(format) => {
				write!(f, "Picture: Found unexpected format \"{format}\"")
			},
			Self::MissingUfidOwner => write!(f, "Missing owner in UFID frame"),

			// Compression
			#[cfg(not(feature = "id3v2_compression_support"))]
			Self::CompressedFrameEncountered => write!(
				f,
				"Encountered a compressed ID3v2 frame, support is disabled"
			),
		}
	}
}

/// An error that arises while interacting with an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// An error that arises while decoding or encoding a single tag
///
/// This is carried by [`ErrorKind::BackendDecode`] and [`ErrorKind::BackendEncode`].
pub struct BackendError {
	backend: BackendKind,
	description: String,
}

impl BackendError {
	/// Create a `BackendError` from a [`BackendKind`] and a description
	#[must_use]
	pub fn new(backend: BackendKind, description: impl Into<String>) -> Self {
		Self {
			backend,
			description: description.into(),
		}
	}

	/// Returns the [`BackendKind`] of the tag that failed
	pub fn backend(&self) -> BackendKind {
		self.backend
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		&self.description
	}
}

impl Debug for BackendError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}: {:?}", self.backend, self.description)
	}
}

impl Display for BackendError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.backend.name(), self.description)
	}
}

macro_rules! file_error {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		pub struct $name {
			format: FileType,
			description: &'static str,
		}

		impl $name {
			#[doc = concat!("Create a `", stringify!($name), "` from a [`FileType`] and description")]
			#[must_use]
			pub const fn new(format: FileType, description: &'static str) -> Self {
				Self {
					format,
					description,
				}
			}

			/// Returns the [`FileType`] of the file
			pub fn format(&self) -> FileType {
				self.format
			}

			/// Returns the error description
			pub fn description(&self) -> &str {
				self.description
			}
		}

		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				write!(f, "{:?}: {:?}", self.format, self.description)
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				write!(f, "{}: {}", self.format.name(), self.description)
			}
		}
	};
}

file_error!(
	/// The container of a file is malformed
	///
	/// Unlike [`BackendError`], this always makes the file fail to open.
	FileDecodingError
);

file_error!(
	/// A file cannot be rebuilt with the requested tags
	FileEncodingError
);

/// Errors that could occur within polytag
pub struct PolytagError {
	pub(crate) kind: ErrorKind,
}

impl PolytagError {
	/// Create a `PolytagError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::error::{ErrorKind, PolytagError};
	///
	/// let unknown_format = PolytagError::new(ErrorKind::UnknownFormat);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	pub(crate) fn backend_decode(backend: BackendKind, description: impl Into<String>) -> Self {
		Self::new(ErrorKind::BackendDecode(BackendError::new(
			backend,
			description,
		)))
	}

	pub(crate) fn backend_encode(backend: BackendKind, description: impl Into<String>) -> Self {
		Self::new(ErrorKind::BackendEncode(BackendError::new(
			backend,
			description,
		)))
	}
}

impl std::error::Error for PolytagError {}

impl Debug for PolytagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<ErrorKind> for PolytagError {
	fn from(input: ErrorKind) -> Self {
		Self { kind: input }
	}
}

impl From<Id3v2Error> for PolytagError {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl From<FileDecodingError> for PolytagError {
	fn from(input: FileDecodingError) -> Self {
		Self {
			kind: ErrorKind::FileDecoding(input),
		}
	}
}

impl From<FileEncodingError> for PolytagError {
	fn from(input: FileEncodingError) -> Self {
		Self {
			kind: ErrorKind::FileEncoding(input),
		}
	}
}

impl From<TextEncodingError> for PolytagError {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::TextEncode(input),
		}
	}
}

impl From<std::io::Error> for PolytagError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for PolytagError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<std::str::Utf8Error> for PolytagError {
	fn from(input: std::str::Utf8Error) -> Self {
		Self {
			kind: ErrorKind::StrFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for PolytagError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<tempfile::PersistError> for PolytagError {
	fn from(input: tempfile::PersistError) -> Self {
		Self {
			kind: ErrorKind::Io(input.error),
		}
	}
}

impl Display for PolytagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::StrFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::UnknownFormat => write!(f, "Not an MPEG or FLAC file"),
			ErrorKind::InvalidFile => {
				write!(f, "The file failed to open, nothing can be read or saved")
			},
			ErrorKind::ReadOnly => write!(f, "Refusing to save, the file is read-only"),
			ErrorKind::NotAPicture => write!(f, "Picture data could not be parsed"),
			ErrorKind::OutOfBounds { index, len } => write!(
				f,
				"Index {index} is out of bounds for a list of length {len}"
			),
			ErrorKind::FakeTag => write!(f, "Found a tag identifier without a valid tag"),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(ref message) => write!(f, "Text encoding: {message}"),
			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),
			ErrorKind::BackendDecode(ref err) => write!(f, "Failed to decode tag: {err}"),
			ErrorKind::BackendEncode(ref err) => write!(f, "Failed to encode tag: {err}"),

			ErrorKind::TooMuchData => write!(f, "Length exceeds the allowed maximum"),
			ErrorKind::SizeMismatch => {
				write!(f, "Length does not fit within the enclosing structure")
			},
			ErrorKind::FileDecoding(ref file_decode_err) => write!(f, "{file_decode_err}"),
			ErrorKind::FileEncoding(ref file_encode_err) => write!(f, "{file_encode_err}"),
		}
	}
}
