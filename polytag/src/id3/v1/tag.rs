use super::constants::GENRES;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::picture::Picture;
use crate::tag::{BackendKind, PropertyMap, TagBackend};

/// An ID3v1 tag
///
/// ID3v1 is a severely limited format, with each field being incredibly small in size. All
/// fields have been commented with their maximum sizes and any other additional restrictions.
///
/// Attempting to write a field greater than the maximum size will **not** error, it will just
/// be shrunk.
///
/// ## Property keys
///
/// * `title` -> `TITLE`
/// * `artist` -> `ARTIST`
/// * `album` -> `ALBUM`
/// * `year` -> `DATE`
/// * `comment` -> `COMMENT`
/// * `track_number` -> `TRACKNUMBER`
/// * `genre` -> `GENRE` (As long as the genre is a valid index into [`GENRES`])
///
/// Any other key is ignored, as are pictures.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1Tag {
	/// Track title, 30 bytes max
	pub title: Option<String>,
	/// Track artist, 30 bytes max
	pub artist: Option<String>,
	/// Album title, 30 bytes max
	pub album: Option<String>,
	/// Release year, 4 digits max
	pub year: Option<u16>,
	/// A short comment
	///
	/// The number of bytes differs between versions, but not much.
	/// A V1 tag may have been read, which limits this field to 30 bytes.
	/// A V1.1 tag, however, only has 28 bytes available.
	///
	/// Polytag will *always* write a V1.1 tag when a track number is set.
	pub comment: Option<String>,
	/// The track number, 1 byte max
	///
	/// Issues:
	///
	/// * The track number **cannot** be 0. Many readers, including Polytag,
	///   look for a null byte at the end of the comment to differentiate
	///   between V1 and V1.1.
	/// * A V1 tag may have been read, which does *not* have a track number.
	pub track_number: Option<u8>,
	/// The track's genre, 1 byte max
	///
	/// ID3v1 has a predefined set of genres, see [`GENRES`].
	/// This byte should be an index to a genre.
	pub genre: Option<u8>,
}

impl Id3v1Tag {
	/// Create a new empty `Id3v1Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::id3::v1::Id3v1Tag;
	///
	/// let id3v1_tag = Id3v1Tag::new();
	/// assert_eq!(id3v1_tag, Id3v1Tag::default());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	fn genre_name(&self) -> Option<&'static str> {
		self.genre
			.and_then(|genre| GENRES.get(usize::from(genre)))
			.copied()
	}
}

/// Find a genre by name or by index
fn genre_index(value: &str) -> Option<u8> {
	if let Some(pos) = GENRES.iter().position(|g| g.eq_ignore_ascii_case(value)) {
		return Some(pos as u8);
	}

	let index = value
		.trim_start_matches('(')
		.trim_end_matches(')')
		.parse::<u8>()
		.ok()?;
	(usize::from(index) < GENRES.len()).then_some(index)
}

fn leading_number<T: std::str::FromStr>(value: &str, max_digits: usize) -> Option<T> {
	let digits = value
		.trim()
		.chars()
		.take_while(char::is_ascii_digit)
		.take(max_digits)
		.collect::<String>();
	digits.parse().ok()
}

impl TagBackend for Id3v1Tag {
	fn kind(&self) -> BackendKind {
		BackendKind::Id3v1
	}

	fn is_empty(&self) -> bool {
		self.title.is_none()
			&& self.artist.is_none()
			&& self.album.is_none()
			&& self.year.is_none()
			&& self.comment.is_none()
			&& self.track_number.is_none()
			&& self.genre.is_none()
	}

	fn properties(&self) -> PropertyMap {
		let mut map = PropertyMap::new();

		let fields = [
			("TITLE", self.title.clone()),
			("ARTIST", self.artist.clone()),
			("ALBUM", self.album.clone()),
			("DATE", self.year.map(|year| year.to_string())),
			("COMMENT", self.comment.clone()),
			("TRACKNUMBER", self.track_number.map(|track| track.to_string())),
			("GENRE", self.genre_name().map(str::to_owned)),
		];

		for (key, value) in fields {
			if let Some(value) = value {
				map.push(key, value);
			}
		}

		map
	}

	fn set_property(&mut self, key: &str, values: &[String]) -> bool {
		let value = values
			.iter()
			.find(|v| !v.is_empty())
			.map(String::as_str);

		match &*key.to_ascii_uppercase() {
			"TITLE" => self.title = value.map(str::to_owned),
			"ARTIST" => self.artist = value.map(str::to_owned),
			"ALBUM" => self.album = value.map(str::to_owned),
			"COMMENT" => self.comment = value.map(str::to_owned),
			"DATE" => self.year = value.and_then(|v| leading_number(v, 4)),
			"TRACKNUMBER" => {
				self.track_number = value
					.and_then(|v| leading_number::<u8>(v, 3))
					.filter(|track| *track != 0);
			},
			"GENRE" => {
				self.genre = value.and_then(genre_index);
				if value.is_some() && self.genre.is_none() {
					log::debug!("ID3v1: Dropping unknown genre {value:?}");
				}
			},
			_ => return false,
		}

		true
	}

	fn remove_property(&mut self, key: &str) -> bool {
		let field_was_set = self.properties().contains_key(key);
		if field_was_set {
			self.set_property(key, &[]);
		}

		field_was_set
	}

	fn pictures(&self) -> Vec<Picture> {
		Vec::new()
	}

	fn set_pictures(&mut self, pictures: &[Picture]) {
		if !pictures.is_empty() {
			log::trace!("ID3v1: Discarding {} picture(s)", pictures.len());
		}
	}

	fn encode(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		super::write::encode(self, write_options)
	}
}
