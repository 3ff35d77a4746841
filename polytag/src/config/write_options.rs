/// The ID3v2 revision used when encoding a tag
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Id3v2Version {
	/// ID3v2.3
	V3,
	/// ID3v2.4
	#[default]
	V4,
}

/// Options used by [`TagFile::save_with_options`](crate::file::TagFile::save_with_options)
///
/// Most of these only matter to one tag format, and are ignored by the rest.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) id3v2_version: Id3v2Version,
	pub(crate) lossy_text_encoding: bool,
	pub(crate) respect_read_only: bool,
}

impl WriteOptions {
	/// The padding added to ID3v2 tags and FLAC metadata, unless set
	pub const DEFAULT_PREFERRED_PADDING: u32 = 1024;

	/// Creates the default `WriteOptions`
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::config::WriteOptions;
	///
	/// assert_eq!(WriteOptions::new(), WriteOptions::default());
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: Some(Self::DEFAULT_PREFERRED_PADDING),
			id3v2_version: Id3v2Version::V4,
			lossy_text_encoding: true,
			respect_read_only: true,
		}
	}

	/// Padding to leave after ID3v2 tags and FLAC metadata, in bytes
	///
	/// Padding lets later saves grow the tags without moving the audio. FLAC reuses existing
	/// padding first, so this only applies once the metadata outgrows its old space. A value
	/// of 0 disables padding.
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::config::WriteOptions;
	///
	/// let generous = WriteOptions::new().preferred_padding(8192);
	/// let compact = WriteOptions::new().preferred_padding(0);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		self.preferred_padding = (preferred_padding != 0).then_some(preferred_padding);
		self
	}

	/// The ID3v2 revision to write
	///
	/// ID3v2.4 is the default. ID3v2.3 is more widely supported by older software, but cannot
	/// store UTF-8 text, so non Latin-1 text will be written as UTF-16.
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::config::{Id3v2Version, WriteOptions};
	///
	/// let options = WriteOptions::new().id3v2_version(Id3v2Version::V3);
	/// ```
	pub fn id3v2_version(mut self, id3v2_version: Id3v2Version) -> Self {
		self.id3v2_version = id3v2_version;
		self
	}

	/// Whether to replace characters that cannot be represented in a fixed encoding
	///
	/// This only affects ID3v1, which can only hold Latin-1 text. When enabled (the default),
	/// such characters are written as `?`. When disabled, the save fails instead.
	pub fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}

	/// Whether to respect read-only files
	///
	/// By default, saving to a file without write permissions fails. Disabling this will
	/// replace the file anyway, since the new contents are written to a temporary file
	/// and renamed into place.
	pub fn respect_read_only(mut self, respect_read_only: bool) -> Self {
		self.respect_read_only = respect_read_only;
		self
	}
}

impl Default for WriteOptions {
	/// Same as [`WriteOptions::new`]
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	preferred_padding: 1024,
	/// 	id3v2_version: Id3v2Version::V4,
	/// 	lossy_text_encoding: true,
	/// 	respect_read_only: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
