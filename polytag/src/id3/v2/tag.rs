use super::frame::{Frame, FrameValue};
use super::util::mappings::{
	MUSICBRAINZ_UFID_OWNER, frame_id_for_key, key_for_frame_id, key_for_txxx, txxx_for_key,
};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v1::GENRES;
use crate::picture::Picture;
use crate::tag::{BackendKind, PropertyMap, TagBackend};
use crate::util::text::TextEncoding;


const COMMENT_FRAME_ID: &str = "COMM";
const LYRICS_FRAME_ID: &str = "USLT";
const PICTURE_FRAME_ID: &str = "APIC";
const POPULARIMETER_FRAME_ID: &str = "POPM";
const PLAY_COUNTER_FRAME_ID: &str = "PCNT";
const UNKNOWN_LANGUAGE: [u8; 3] = *b"XXX";

/// An `ID3v2` tag
///
/// ## Supported file types
///
/// * MPEG, where it is the primary tag
/// * FLAC, where it is read and rewritten, but never created
///
/// ## Property keys
///
/// Text frames are mapped to their property key (`TIT2` is `TITLE`, `TDRC` is `DATE`, ...).
/// Everything else is mapped as follows:
///
/// * `TXXX` uses its description, uppercased. The MusicBrainz and AcoustID descriptions
///   have their own keys, such as `MusicBrainz Album Id` being `MUSICBRAINZ_ALBUMID`.
/// * `COMM` is `COMMENT` with an empty description, otherwise `COMMENT:<DESCRIPTION>`
/// * `USLT` is `LYRICS` with an empty description, otherwise `LYRICS:<DESCRIPTION>`
/// * `UFID` owned by `http://musicbrainz.org` is `MUSICBRAINZ_TRACKID`
///
/// Keys without a dedicated frame are written as `TXXX` frames. Frames with no property
/// mapping (URLs, private frames, ...) are kept as-is.
///
/// ## Rating
///
/// The first `POPM` frame holds the rating and play count. The play count falls back to the
/// `PCNT` frame.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v2Tag {
	pub(crate) frames: Vec<Frame>,
}

impl Id3v2Tag {
	/// Create a new empty `Id3v2Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::id3::v2::Id3v2Tag;
	///
	/// let id3v2_tag = Id3v2Tag::new();
	/// assert!(id3v2_tag.frames().next().is_none());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns an iterator over all frames, in the order they are written
	pub fn frames(&self) -> impl Iterator<Item = &Frame> + '_ {
		self.frames.iter()
	}

	/// Gets the first frame with `id`
	pub fn get(&self, id: &str) -> Option<&Frame> {
		self.frames.iter().find(|f| f.id == id)
	}

	/// The number of frames
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Append a frame, keeping any existing frame with the same ID
	pub(crate) fn push_frame(&mut self, frame: Frame) {
		self.frames.push(frame);
	}

	/// Remove every frame with `id`, returning them
	pub fn remove(&mut self, id: &str) -> Vec<Frame> {
		let (removed, kept) = std::mem::take(&mut self.frames)
			.into_iter()
			.partition(|f| f.id == id);
		self.frames = kept;
		removed
	}

	fn remove_where(&mut self, mut predicate: impl FnMut(&Frame) -> bool) -> bool {
		let before = self.frames.len();
		self.frames.retain(|f| !predicate(f));
		before != self.frames.len()
	}

	/// The rating stored in the first `POPM` frame
	pub(crate) fn rating(&self) -> Option<u8> {
		self.frames.iter().find_map(|f| match f.value {
			FrameValue::Popularimeter { rating, .. } => Some(rating),
			_ => None,
		})
	}

	/// The play count of the first `POPM` frame, otherwise the `PCNT` frame
	pub(crate) fn play_count(&self) -> Option<u64> {
		let popm = self.frames.iter().find_map(|f| match f.value {
			FrameValue::Popularimeter { counter, .. } => Some(counter),
			_ => None,
		});

		popm.or_else(|| {
			self.frames.iter().find_map(|f| match f.value {
				FrameValue::PlayCount(counter) => Some(counter),
				_ => None,
			})
		})
	}

	/// Set or clear the rating
	///
	/// A new `POPM` frame has an empty email and takes over the current play count. Clearing the
	/// rating keeps a non-zero play count in a `PCNT` frame.
	pub(crate) fn set_rating(&mut self, rating: Option<u8>) {
		let play_count = self.play_count().unwrap_or(0);

		let Some(new_rating) = rating else {
			self.remove_where(|f| f.id == POPULARIMETER_FRAME_ID);
			if play_count > 0 {
				self.set_play_counter_frame(play_count);
			}

			return;
		};

		for frame in &mut self.frames {
			if let FrameValue::Popularimeter { rating, .. } = &mut frame.value {
				*rating = new_rating;
				return;
			}
		}

		self.frames.push(Frame::new(
			POPULARIMETER_FRAME_ID,
			FrameValue::Popularimeter {
				email: String::new(),
				rating: new_rating,
				counter: play_count,
			},
		));
	}

	/// Set the play count in every frame that holds one
	///
	/// Without a `POPM` frame, the count goes to a `PCNT` frame, which is removed for a count of 0.
	pub(crate) fn set_play_count(&mut self, play_count: u64) {
		let mut has_popularimeter = false;
		for frame in &mut self.frames {
			if let FrameValue::Popularimeter { counter, .. } = &mut frame.value {
				*counter = play_count;
				has_popularimeter = true;
				break;
			}
		}

		let has_play_counter = self.get(PLAY_COUNTER_FRAME_ID).is_some();
		if play_count == 0 && !has_popularimeter {
			self.remove_where(|f| f.id == PLAY_COUNTER_FRAME_ID);
		} else if has_play_counter || !has_popularimeter {
			self.set_play_counter_frame(play_count);
		}
	}

	fn set_play_counter_frame(&mut self, play_count: u64) {
		for frame in &mut self.frames {
			if let FrameValue::PlayCount(counter) = &mut frame.value {
				*counter = play_count;
				return;
			}
		}

		self.frames.push(Frame::new(
			PLAY_COUNTER_FRAME_ID,
			FrameValue::PlayCount(play_count),
		));
	}
}

/// Split a `TCON` value into genre names
///
/// Numeric references (`"17"`, `"(17)"`) are resolved through the ID3v1 genre list, and the
/// special `(RX)` and `(CR)` references become "Remix" and "Cover".
pub(crate) fn parse_genre(text: &str) -> Vec<String> {
	fn resolve(genre: &str) -> String {
		match genre {
			"RX" => String::from("Remix"),
			"CR" => String::from("Cover"),
			_ => match genre.parse::<usize>() {
				Ok(index) if index < GENRES.len() => GENRES[index].to_owned(),
				_ => genre.to_owned(),
			},
		}
	}

	let mut genres = Vec::new();
	let mut remaining = text.trim();

	while let Some(rest) = remaining.strip_prefix('(') {
		// "((" escapes a genre name starting with a parenthesis
		if rest.starts_with('(') {
			break;
		}

		let Some(close) = rest.find(')') else {
			break;
		};

		genres.push(resolve(&rest[..close]));
		remaining = &rest[close + 1..];
	}

	// Refinement following the references, or a plain name
	let remaining = remaining.strip_prefix('(').unwrap_or(remaining).trim();
	if !remaining.is_empty() && !genres.iter().any(|g| g == remaining) {
		genres.push(resolve(remaining));
	}

	genres
}

/// The property key of a frame, if it has one
fn frame_key(frame: &Frame) -> Option<String> {
	fn with_description(base: &str, description: &str) -> String {
		if description.is_empty() {
			return base.to_owned();
		}

		format!("{base}:{}", description.to_ascii_uppercase())
	}

	match &frame.value {
		FrameValue::Text { .. } => key_for_frame_id(&frame.id).map(str::to_owned),
		FrameValue::UserText { description, .. } => Some(key_for_txxx(description)),
		FrameValue::Comment { description, .. } if frame.id == COMMENT_FRAME_ID => {
			Some(with_description("COMMENT", description))
		},
		FrameValue::Comment { description, .. } if frame.id == LYRICS_FRAME_ID => {
			Some(with_description("LYRICS", description))
		},
		FrameValue::UniqueFileId { owner, .. } if owner == MUSICBRAINZ_UFID_OWNER => {
			Some(String::from("MUSICBRAINZ_TRACKID"))
		},
		_ => None,
	}
}

/// Build the frames needed to store `values` under `key`
fn frames_for_key(key: &str, values: &[String]) -> Vec<Frame> {
	fn comment_frames(id: &str, description: &str, values: &[String]) -> Vec<Frame> {
		values
			.iter()
			.map(|value| {
				Frame::new(
					id,
					FrameValue::Comment {
						encoding: TextEncoding::UTF8,
						language: UNKNOWN_LANGUAGE,
						description: description.to_owned(),
						content: value.clone(),
					},
				)
			})
			.collect()
	}

	let key = key.to_ascii_uppercase();

	if let Some(id) = frame_id_for_key(&key) {
		return vec![Frame::new(
			id,
			FrameValue::Text {
				encoding: TextEncoding::UTF8,
				values: values.to_vec(),
			},
		)];
	}

	match key.split_once(':') {
		None if key == "COMMENT" => return comment_frames(COMMENT_FRAME_ID, "", values),
		None if key == "LYRICS" => return comment_frames(LYRICS_FRAME_ID, "", values),
		Some(("COMMENT", description)) => {
			return comment_frames(COMMENT_FRAME_ID, description, values);
		},
		Some(("LYRICS", description)) => {
			return comment_frames(LYRICS_FRAME_ID, description, values);
		},
		_ => {},
	}

	if key == "MUSICBRAINZ_TRACKID" {
		let Some((identifier, rest)) = values.split_first() else {
			return Vec::new();
		};

		if !rest.is_empty() {
			log::warn!(
				"ID3v2: UFID holds a single track ID, dropping {} value(s)",
				rest.len()
			);
		}

		return vec![Frame::new(
			"UFID",
			FrameValue::UniqueFileId {
				owner: MUSICBRAINZ_UFID_OWNER.to_owned(),
				identifier: identifier.as_bytes().to_vec(),
			},
		)];
	}

	vec![Frame::new(
		"TXXX",
		FrameValue::UserText {
			encoding: TextEncoding::UTF8,
			description: txxx_for_key(&key),
			values: values.to_vec(),
		},
	)]
}

impl TagBackend for Id3v2Tag {
	fn kind(&self) -> BackendKind {
		BackendKind::Id3v2
	}

	fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	fn properties(&self) -> PropertyMap {
		let mut map = PropertyMap::new();

		for frame in &self.frames {
			let Some(key) = frame_key(frame) else {
				continue;
			};

			match &frame.value {
				FrameValue::Text { values, .. } if frame.id == "TCON" => {
					for genre in values.iter().flat_map(|v| parse_genre(v)) {
						map.push(&key, genre);
					}
				},
				FrameValue::Text { values, .. } | FrameValue::UserText { values, .. } => {
					for value in values {
						map.push(&key, value.clone());
					}
				},
				FrameValue::Comment { content, .. } => map.push(&key, content.clone()),
				FrameValue::UniqueFileId { identifier, .. } => {
					map.push(&key, String::from_utf8_lossy(identifier).into_owned());
				},
				_ => {},
			}
		}

		map
	}

	fn set_property(&mut self, key: &str, values: &[String]) -> bool {
		self.remove_property(key);

		let values = values
			.iter()
			.filter(|v| !v.is_empty())
			.cloned()
			.collect::<Vec<_>>();
		if values.is_empty() {
			return true;
		}

		self.frames.extend(frames_for_key(key, &values));
		true
	}

	fn remove_property(&mut self, key: &str) -> bool {
		self.remove_where(|frame| frame_key(frame).is_some_and(|k| k.eq_ignore_ascii_case(key)))
	}

	fn pictures(&self) -> Vec<Picture> {
		self.frames
			.iter()
			.filter_map(|f| match &f.value {
				FrameValue::Picture { picture, .. } => Some(picture.clone()),
				_ => None,
			})
			.collect()
	}

	fn set_pictures(&mut self, pictures: &[Picture]) {
		self.remove_where(|f| f.id == PICTURE_FRAME_ID);
		self.frames.extend(pictures.iter().map(|picture| {
			Frame::new(
				PICTURE_FRAME_ID,
				FrameValue::Picture {
					encoding: TextEncoding::UTF8,
					picture: picture.clone(),
				},
			)
		}));
	}

	fn encode(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		super::write::create_tag(self, write_options)
	}
}
