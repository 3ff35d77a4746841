use super::DEFAULT_VENDOR;
use super::verify_key;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::picture::Picture;
use crate::tag::{BackendKind, PropertyMap, TagBackend};

/// Vorbis comments
///
/// ## Property keys
///
/// Field names are used as property keys, uppercased. A field may appear several times, each
/// occurrence is one value of the property.
///
/// ## Pictures
///
/// In FLAC, pictures are stored in `PICTURE` blocks. Any `METADATA_BLOCK_PICTURE` (or the
/// deprecated `COVERART`) field found in the comments is moved to the picture list, and written
/// back as a block.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct VorbisComments {
	pub(crate) vendor: String,
	/// Fields in file order, keys as written
	pub(crate) items: Vec<(String, String)>,
	pub(crate) pictures: Vec<Picture>,
}

impl Default for VorbisComments {
	fn default() -> Self {
		Self {
			vendor: String::from(DEFAULT_VENDOR),
			items: Vec::new(),
			pictures: Vec::new(),
		}
	}
}

impl VorbisComments {
	/// An empty comment block with polytag as the vendor
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::vorbis::VorbisComments;
	///
	/// let comments = VorbisComments::new();
	/// assert_eq!(comments.items().len(), 0);
	/// assert!(comments.vendor().starts_with("polytag"));
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// The vendor string, which identifies the encoder
	pub fn vendor(&self) -> &str {
		&self.vendor
	}

	/// Replace the vendor string
	pub fn set_vendor(&mut self, vendor: String) {
		self.vendor = vendor;
	}

	/// Every field as a `(key, value)` pair, in file order
	///
	/// ```rust
	/// use polytag::vorbis::VorbisComments;
	///
	/// let mut comments = VorbisComments::new();
	/// comments.push(String::from("ARTIST"), String::from("Foo"));
	/// comments.push(String::from("ARTIST"), String::from("Bar"));
	///
	/// let fields = comments.items().collect::<Vec<_>>();
	/// assert_eq!(fields, [("ARTIST", "Foo"), ("ARTIST", "Bar")]);
	/// ```
	pub fn items(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + Clone {
		self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// The first value of `key`, compared case-insensitively
	pub fn get(&self, key: &str) -> Option<&str> {
		self.items
			.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(key))
			.map(|(_, v)| v.as_str())
	}

	/// Every value of `key`, compared case-insensitively
	pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + Clone + 'a {
		self.items
			.iter()
			.filter(move |(k, _)| k.eq_ignore_ascii_case(key))
			.map(|(_, v)| v.as_str())
	}

	/// Replace every value of `key` with `value`
	///
	/// Keys must be printable ASCII without `=`, anything else is ignored.
	pub fn insert(&mut self, key: String, value: String) {
		if verify_key(&key) {
			self.remove(&key);
			self.items.push((key, value));
		}
	}

	/// Add `value` after any existing values of `key`
	///
	/// Invalid keys are ignored, see [`VorbisComments::insert`].
	pub fn push(&mut self, key: String, value: String) {
		if verify_key(&key) {
			self.items.push((key, value));
		}
	}

	/// Remove every value of `key`, returning them
	pub fn remove(&mut self, key: &str) -> Vec<String> {
		let mut removed = Vec::new();
		self.items.retain_mut(|(k, v)| {
			let matches = k.eq_ignore_ascii_case(key);
			if matches {
				removed.push(std::mem::take(v));
			}

			!matches
		});

		removed
	}
}

impl TagBackend for VorbisComments {
	fn kind(&self) -> BackendKind {
		BackendKind::VorbisComments
	}

	fn is_empty(&self) -> bool {
		self.items.is_empty() && self.pictures.is_empty()
	}

	fn properties(&self) -> PropertyMap {
		self.items
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_str()))
			.collect()
	}

	fn set_property(&mut self, key: &str, values: &[String]) -> bool {
		self.remove(key);

		// Keys are validated when encoding
		let key = key.to_ascii_uppercase();
		self.items.extend(
			values
				.iter()
				.filter(|v| !v.is_empty())
				.map(|v| (key.clone(), v.clone())),
		);
		true
	}

	fn remove_property(&mut self, key: &str) -> bool {
		!self.remove(key).is_empty()
	}

	fn pictures(&self) -> Vec<Picture> {
		self.pictures.clone()
	}

	fn set_pictures(&mut self, pictures: &[Picture]) {
		self.pictures = pictures.to_vec();
	}

	fn encode(&self, _write_options: WriteOptions) -> Result<Vec<u8>> {
		super::write::create_comments(self)
	}
}

#[cfg(test)]
mod tests {
	use super::VorbisComments;
	use crate::config::{ParseOptions, ParsingMode, WriteOptions};
	use crate::error::ErrorKind;
	use crate::picture::Picture;
	use crate::tag::{BackendKind, TagBackend};
	use crate::vorbis::read::read_comments;

	use data_encoding::BASE64;

	fn values(values: &[&str]) -> Vec<String> {
		values.iter().map(|v| (*v).to_owned()).collect()
	}

	fn comment_block(vendor: &str, comments: &[&[u8]]) -> Vec<u8> {
		let mut block = Vec::new();
		block.extend((vendor.len() as u32).to_le_bytes());
		block.extend(vendor.as_bytes());
		block.extend((comments.len() as u32).to_le_bytes());
		for comment in comments {
			block.extend((comment.len() as u32).to_le_bytes());
			block.extend(*comment);
		}

		block
	}

	#[test_log::test]
	fn parse_vorbis_comments() {
		let block = comment_block(
			"Lavf58.76.100",
			&[
				b"TITLE=Foo title",
				b"artist=Bar artist",
				b"ARTIST=Baz artist",
				b"NOSEPARATOR",
				b"TRACKNUMBER=1",
			],
		);

		let tag = read_comments(&block, ParseOptions::new()).unwrap();
		assert_eq!(tag.vendor(), "Lavf58.76.100");
		assert_eq!(tag.items().len(), 4);

		let properties = tag.properties();
		assert_eq!(properties.get_first("TITLE"), Some("Foo title"));
		assert_eq!(properties.get("ARTIST").unwrap(), &["Bar artist", "Baz artist"]);
		assert_eq!(properties.get_first("TRACKNUMBER"), Some("1"));
	}

	#[test_log::test]
	fn vorbis_comments_re_read() {
		let mut tag = VorbisComments::new();
		tag.set_vendor(String::from("Foo encoder"));
		tag.set_property("title", &values(&["Foo title"]));
		tag.set_property("GENRE", &values(&["Rock", "Jazz"]));

		let encoded = tag.encode(WriteOptions::default()).unwrap();
		let re_read = read_comments(&encoded, ParseOptions::new()).unwrap();

		assert_eq!(re_read, tag);
		assert_eq!(re_read.get("TITLE"), Some("Foo title"));
		assert_eq!(re_read.get_all("genre").count(), 2);
	}

	#[test_log::test]
	fn picture_fields() {
		let picture = Picture::new(vec![1, 2, 3], "image/png", "Foo", "Front Cover");
		let block_picture = format!(
			"METADATA_BLOCK_PICTURE={}",
			BASE64.encode(&picture.as_flac_bytes(false))
		);
		let cover_art = format!("COVERART={}", BASE64.encode(&[4, 5, 6]));

		let block = comment_block(
			"",
			&[block_picture.as_bytes(), cover_art.as_bytes(), b"TITLE=Foo"],
		);

		let tag = read_comments(&block, ParseOptions::new()).unwrap();
		assert_eq!(tag.items().len(), 1);

		let pictures = tag.pictures();
		assert_eq!(pictures.len(), 2);
		assert_eq!(pictures[0], picture);
		assert_eq!(pictures[1].data(), &[4, 5, 6]);
		assert_eq!(pictures[1].pic_type(), "Other");

		// Pictures aren't part of the comments
		let encoded = tag.encode(WriteOptions::default()).unwrap();
		let re_read = read_comments(&encoded, ParseOptions::new()).unwrap();
		assert!(re_read.pictures().is_empty());
	}

	#[test_log::test]
	fn invalid_fields() {
		let block = comment_block("", &[b"BAD\x7FKEY=Foo", b"TITLE=Foo"]);

		let tag = read_comments(&block, ParseOptions::new()).unwrap();
		assert_eq!(tag.items().len(), 1);

		assert!(
			read_comments(
				&block,
				ParseOptions::new().parsing_mode(ParsingMode::Strict)
			)
			.is_err()
		);

		// The item count is larger than the block
		let mut truncated = comment_block("", &[b"TITLE=Foo"]);
		truncated.truncate(truncated.len() - 4);
		assert!(read_comments(&truncated, ParseOptions::new()).is_err());
	}

	#[test_log::test]
	fn lookup_outlives_key() {
		let mut tag = VorbisComments::new();
		tag.push(String::from("ARTIST"), String::from("Foo"));
		tag.push(String::from("artist"), String::from("Bar"));

		let value = {
			let key = String::from("Artist");
			tag.get(&key)
		};
		assert_eq!(value, Some("Foo"));
		assert_eq!(tag.get_all("ARTIST").collect::<Vec<_>>(), ["Foo", "Bar"]);
		assert_eq!(tag.get("TITLE"), None);
	}

	#[test_log::test]
	fn non_utf8_values() {
		let block = comment_block("", &[b"TITLE=Foo\xFF", b"ARTIST=Bar"]);

		let tag = read_comments(&block, ParseOptions::new()).unwrap();
		assert_eq!(tag.get("TITLE"), None);
		assert_eq!(tag.get("ARTIST"), Some("Bar"));

		let tag = read_comments(
			&block,
			ParseOptions::new().parsing_mode(ParsingMode::Relaxed),
		)
		.unwrap();
		assert_eq!(tag.get("TITLE"), Some("Foo\u{FFFD}"));

		assert!(
			read_comments(
				&block,
				ParseOptions::new().parsing_mode(ParsingMode::Strict)
			)
			.is_err()
		);
	}

	#[test_log::test]
	fn invalid_key_fails_encode() {
		let mut tag = VorbisComments::new();
		tag.set_property("BAD=KEY", &values(&["Foo"]));

		let err = tag.encode(WriteOptions::default()).unwrap_err();
		match err.kind() {
			ErrorKind::BackendEncode(e) => {
				assert_eq!(e.backend(), BackendKind::VorbisComments)
			},
			_ => panic!("Expected a backend encode error, got {err:?}"),
		}
	}

	#[test_log::test]
	fn remove_property() {
		let mut tag = VorbisComments::new();
		tag.push(String::from("ARTIST"), String::from("Foo"));
		tag.push(String::from("artist"), String::from("Bar"));
		tag.push(String::from("TITLE"), String::from("Baz"));

		assert!(tag.remove_property("Artist"));
		assert!(!tag.remove_property("ARTIST"));
		assert_eq!(tag.items().len(), 1);
	}
}
