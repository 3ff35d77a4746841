/// How to react to malformed input
///
/// Set with [`ParseOptions::parsing_mode`].
///
/// # Examples
///
/// ```rust,no_run
/// use polytag::config::{ParseOptions, ParsingMode};
/// use polytag::file::TagFile;
///
/// // Any malformed tag should make the file fail to open
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// let tag_file = TagFile::open_with_options("foo.mp3", parsing_options);
/// assert!(tag_file.is_valid());
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Any malformed tag, frame or item makes the entire file fail to open
	Strict,
	/// Skip what cannot be decoded
	///
	/// A tag that fails to decode is kept as present, but empty, so its bytes survive a save
	/// unless it is written to. Undecodable frames and items are dropped.
	#[default]
	BestAttempt,
	/// Like [`ParsingMode::BestAttempt`], but invalid text is decoded lossily instead of dropped
	Relaxed,
}

/// Options used when a [`TagFile`](crate::file::TagFile) is opened
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) read_properties: bool,
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) max_junk_bytes: usize,
}

impl Default for ParseOptions {
	/// Same as [`ParseOptions::new`]
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	read_properties: true,
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	max_junk_bytes: 1024,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// The parsing mode unless one is set
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// How far past the ID3v2 tag to look for the first MPEG frame, unless set
	pub const DEFAULT_MAX_JUNK_BYTES: usize = 1024;

	/// Creates the default `ParseOptions`
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::config::ParseOptions;
	///
	/// let options = ParseOptions::new();
	/// assert_eq!(options, ParseOptions::default());
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			read_properties: true,
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			max_junk_bytes: Self::DEFAULT_MAX_JUNK_BYTES,
		}
	}

	/// Whether to probe the audio stream
	///
	/// When disabled, [`TagFile::audio_properties`](crate::file::TagFile::audio_properties)
	/// reports zeroed values. Only worth it when nothing but the tags is needed.
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::config::ParseOptions;
	///
	/// let tags_only = ParseOptions::new().read_properties(false);
	/// ```
	pub fn read_properties(&mut self, read_properties: bool) -> Self {
		self.read_properties = read_properties;
		*self
	}

	/// See [`ParsingMode`]
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// How many bytes after the ID3v2 tag are searched for the first MPEG frame
	///
	/// Some encoders leave garbage between the tag and the audio. A file with more than this
	/// fails to open.
	pub fn max_junk_bytes(&mut self, max_junk_bytes: usize) -> Self {
		self.max_junk_bytes = max_junk_bytes;
		*self
	}
}
