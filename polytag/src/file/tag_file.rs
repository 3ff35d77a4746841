use super::container::{RegionUpdate, TagUpdates};
use super::file_type::FileType;
use crate::config::{ParseOptions, WriteOptions};
use crate::error::{ErrorKind, PolytagError, Result};
use crate::id3::v2::Id3v2Tag;
use crate::macros::err;
use crate::picture::Picture;
use crate::properties::AudioProperties;
use crate::tag::accessor::{property_accessors, scalar_accessors};
use crate::tag::rating::{self, RATING_UNSET, RatingScale};
use crate::tag::{
	Backend, BackendKind, PRIORITY, PictureStore, PropertyEntry, PropertyMap, TagBackend, merge,
	raw_entries,
};
use crate::util::io::FileHandle;

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

static EMPTY_PROPERTIES: PropertyMap = PropertyMap::new();

/// The backend holding the rating and play count
const RATING_BACKEND: BackendKind = BackendKind::Id3v2;

#[derive(Clone, Debug)]
struct Slot {
	backend: Backend,
	/// Changed since it was read or last saved
	dirty: bool,
}

/// Insert an empty backend, keeping `slots` in priority order
fn insert_slot(slots: &mut Vec<Slot>, kind: BackendKind) -> usize {
	log::debug!("Creating a new {} tag", kind.name());

	let pos = slots.partition_point(|slot| slot.backend.kind().priority() < kind.priority());
	slots.insert(
		pos,
		Slot {
			backend: Backend::new(kind),
			dirty: false,
		},
	);

	pos
}

#[derive(Debug)]
struct Inner {
	handle: FileHandle,
	file_type: FileType,
	properties: AudioProperties,
	parse_options: ParseOptions,
	/// The active backends, in priority order
	slots: Vec<Slot>,
	pictures: PictureStore,
	merged: OnceCell<PropertyMap>,
}

impl Inner {
	fn open(path: &Path, parse_options: ParseOptions) -> Result<Self> {
		let mut handle = FileHandle::open(path)?;
		let data = handle.read_all()?;

		let Some(file_type) = FileType::from_buffer(&data, parse_options) else {
			err!(UnknownFormat);
		};

		log::debug!("Detected a {} stream", file_type.name());

		let contents = file_type.read_from(&data, parse_options)?;

		let mut slots = contents
			.tags
			.into_iter()
			.map(|backend| Slot {
				backend,
				dirty: false,
			})
			.collect::<Vec<_>>();
		slots.sort_by_key(|slot| slot.backend.kind().priority());

		let pictures = slots
			.iter()
			.map(|slot| slot.backend.pictures())
			.find(|pictures| !pictures.is_empty())
			.unwrap_or_default();

		Ok(Self {
			handle,
			file_type,
			properties: contents.properties,
			parse_options,
			slots,
			pictures: PictureStore::from_pictures(pictures),
			merged: OnceCell::new(),
		})
	}

	fn merged(&self) -> &PropertyMap {
		self.merged.get_or_init(|| {
			let maps = self
				.slots
				.iter()
				.map(|slot| (slot.backend.kind(), slot.backend.properties()))
				.collect::<Vec<_>>();

			merge(maps.iter().map(|(kind, map)| (*kind, map)))
		})
	}

	fn position(&self, kind: BackendKind) -> Option<usize> {
		self.slots
			.iter()
			.position(|slot| slot.backend.kind() == kind)
	}

	fn slot_or_create(&mut self, kind: BackendKind) -> &mut Slot {
		let pos = match self.position(kind) {
			Some(pos) => pos,
			None => insert_slot(&mut self.slots, kind),
		};

		&mut self.slots[pos]
	}

	/// The backend receiving new extended properties
	///
	/// This is the highest priority backend that can hold them, created if necessary.
	fn extended_target(&mut self) -> Option<&mut Slot> {
		let kind = self
			.slots
			.iter()
			.map(|slot| slot.backend.kind())
			.find(|kind| kind.supports_extended_properties())
			.or_else(|| {
				PRIORITY.into_iter().find(|kind| {
					kind.supports_extended_properties() && self.file_type.can_create(*kind)
				})
			})?;

		Some(self.slot_or_create(kind))
	}

	fn rating_tag(&self) -> Option<&Id3v2Tag> {
		self.slots.iter().find_map(|slot| slot.backend.as_id3v2())
	}

	/// The backend holding the rating, created when `create` is set and the file allows it
	fn rating_slot(&mut self, create: bool) -> Option<&mut Slot> {
		if self.position(RATING_BACKEND).is_none()
			&& !(create && self.file_type.can_create(RATING_BACKEND))
		{
			return None;
		}

		Some(self.slot_or_create(RATING_BACKEND))
	}

	fn set_property(&mut self, key: &str, values: &[String]) {
		let values = values
			.iter()
			.filter(|value| !value.is_empty())
			.cloned()
			.collect::<Vec<_>>();
		if values.is_empty() {
			self.remove_property(key);
			return;
		}

		self.merged.take();

		let file_type = self.file_type;
		let Some(slot) = self.extended_target() else {
			log::warn!(
				"{} files have no tag that can hold `{key}`, ignoring",
				file_type.name()
			);
			return;
		};

		if slot.backend.set_property(key, &values) {
			slot.dirty = true;
		}
	}

	fn set_scalar(&mut self, key: &str, value: &str) {
		if value.is_empty() {
			self.remove_property(key);
			return;
		}

		self.merged.take();

		let values = [value.to_owned()];

		// ID3v1 may truncate or drop the value, the full value goes to a tag that can hold it
		let file_type = self.file_type;
		let target = match self.extended_target() {
			Some(slot) => {
				if slot.backend.set_property(key, &values) {
					slot.dirty = true;
				}

				Some(slot.backend.kind())
			},
			None => {
				log::warn!(
					"{} files have no tag that can hold `{key}`",
					file_type.name()
				);
				None
			},
		};

		for slot in self
			.slots
			.iter_mut()
			.filter(|slot| Some(slot.backend.kind()) != target)
		{
			if slot.backend.set_property(key, &values) {
				slot.dirty = true;
			}
		}
	}

	fn remove_property(&mut self, key: &str) -> bool {
		self.merged.take();

		let mut removed = false;
		for slot in &mut self.slots {
			if slot.backend.remove_property(key) {
				slot.dirty = true;
				removed = true;
			}
		}

		removed
	}

	fn is_dirty(&self) -> bool {
		self.pictures.is_dirty() || self.slots.iter().any(|slot| slot.dirty)
	}

	/// Copy the picture list into every backend that can hold pictures
	fn stage_pictures(&self, staged: &mut Vec<Slot>) {
		let pictures = self.pictures.pictures();

		let has_target = staged
			.iter()
			.any(|slot| slot.backend.kind().supports_pictures());
		if !has_target && !pictures.is_empty() {
			insert_slot(staged, self.file_type.primary_backend());
		}

		for slot in staged
			.iter_mut()
			.filter(|slot| slot.backend.kind().supports_pictures())
		{
			slot.backend.set_pictures(pictures);
			slot.dirty = true;
		}
	}

	fn save(&mut self, write_options: WriteOptions) -> Result<()> {
		// Everything is encoded from a copy, so a failure leaves the pending changes in place
		let mut staged = self.slots.clone();
		if self.pictures.is_dirty() {
			self.stage_pictures(&mut staged);
		}

		if !staged.iter().any(|slot| slot.dirty) {
			log::debug!("No changes to save");
			self.pictures.mark_clean();
			return Ok(());
		}

		let mut updates = TagUpdates::keep_all();
		for slot in staged.iter().filter(|slot| slot.dirty) {
			let kind = slot.backend.kind();

			let bytes = if slot.backend.is_empty() {
				log::debug!("Stripping the empty {} tag", kind.name());
				Vec::new()
			} else {
				slot.backend.encode(write_options)?
			};

			updates.set(kind, RegionUpdate::Replace(bytes));
			if kind == BackendKind::VorbisComments {
				updates.flac_pictures = Some(slot.backend.pictures());
			}
		}

		let data = self.handle.read_all()?;
		let contents =
			self.file_type
				.write_to(&data, self.parse_options, &updates, write_options)?;
		self.handle.replace_contents(&contents, write_options)?;

		// Stripped tags are no longer present
		staged.retain(|slot| !(slot.dirty && slot.backend.is_empty()));
		for slot in &mut staged {
			slot.dirty = false;
		}

		self.slots = staged;
		self.pictures.mark_clean();
		self.merged.take();

		Ok(())
	}

	fn remove_all_tags(&mut self) -> Result<()> {
		let write_options = WriteOptions::default();

		let data = self.handle.read_all()?;
		let contents = self.file_type.write_to(
			&data,
			self.parse_options,
			&TagUpdates::strip_all(),
			write_options,
		)?;
		self.handle.replace_contents(&contents, write_options)?;

		self.slots.clear();
		self.pictures = PictureStore::default();
		self.merged.take();

		Ok(())
	}
}

/// An audio file and all of its tags
///
/// A `TagFile` is created by opening a path. The stream type is identified from the file's
/// content, every tag present is read, and the audio properties are probed.
///
/// ## Invalid files
///
/// If the file can't be read, or isn't a supported stream, the `TagFile` is invalid. An invalid
/// file reports absent values from every getter, and fails every operation that would change it
/// with [`ErrorKind::InvalidFile`]. The reason is available from [`TagFile::open_error`].
///
/// ## Properties
///
/// Reads go through a merged view of every tag. When several tags define the same key, the value of
/// the highest priority tag is used, see [`PRIORITY`]. The unmerged entries are available from
/// [`TagFile::raw_properties`].
///
/// Writes go to the highest priority tag that can hold arbitrary keys, creating the primary
/// tag of the file type if none is present. The seven scalar fields (title, artist, album, comment,
/// genre, date, track number) are additionally copied into every other tag present, so they stay
/// in sync. An ID3v1 tag alone is never the only destination, as it truncates long text and drops
/// values it can't represent.
///
/// ## Saving
///
/// Nothing is written until [`TagFile::save`] is called, and dropping a `TagFile` discards any
/// pending changes. A save either writes every changed tag, or leaves the file untouched.
///
/// # Examples
///
/// ```rust,no_run
/// use polytag::file::TagFile;
///
/// # fn main() -> polytag::error::Result<()> {
/// let mut file = TagFile::open("track.mp3");
///
/// file.set_title("Foo")?;
/// file.set_rating_stars(4)?;
/// file.save()?;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct TagFile {
	path: PathBuf,
	inner: std::result::Result<Inner, PolytagError>,
}

impl TagFile {
	/// Open a file with the default [`ParseOptions`]
	pub fn open<P>(path: P) -> Self
	where
		P: AsRef<Path>,
	{
		Self::open_with_options(path, ParseOptions::new())
	}

	/// Open a file
	///
	/// With [`ParsingMode::Strict`](crate::config::ParsingMode::Strict), a tag that can't be
	/// decoded makes the entire file invalid. Otherwise, the tag is treated as empty and its bytes
	/// are kept unless it is written to.
	pub fn open_with_options<P>(path: P, parse_options: ParseOptions) -> Self
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();

		let inner = Inner::open(path, parse_options);
		if let Err(e) = &inner {
			log::warn!("Unable to open `{}`: {e}", path.display());
		}

		Self {
			path: path.to_path_buf(),
			inner,
		}
	}

	fn valid(&self) -> Option<&Inner> {
		self.inner.as_ref().ok()
	}

	fn valid_mut(&mut self) -> Result<&mut Inner> {
		self.inner
			.as_mut()
			.map_err(|_| PolytagError::new(ErrorKind::InvalidFile))
	}

	/// The path the file was opened from
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Whether the file was opened successfully
	pub fn is_valid(&self) -> bool {
		self.inner.is_ok()
	}

	/// Why the file failed to open, if it did
	pub fn open_error(&self) -> Option<&PolytagError> {
		self.inner.as_ref().err()
	}

	/// The detected [`FileType`]
	pub fn file_type(&self) -> Option<FileType> {
		self.valid().map(|inner| inner.file_type)
	}

	/// The name of the detected stream type, such as "MPEG"
	pub fn stream_type(&self) -> Option<&'static str> {
		self.file_type().map(FileType::name)
	}

	/// The audio properties, probed when the file was opened
	pub fn audio_properties(&self) -> Option<&AudioProperties> {
		self.valid().map(|inner| &inner.properties)
	}

	/// The kinds of every tag present, in priority order
	///
	/// This includes tags created by changes that were not yet saved.
	pub fn backends(&self) -> Vec<BackendKind> {
		self.valid()
			.map(|inner| {
				inner
					.slots
					.iter()
					.map(|slot| slot.backend.kind())
					.collect()
			})
			.unwrap_or_default()
	}

	/// Whether a tag of `kind` is present
	pub fn has_backend(&self, kind: BackendKind) -> bool {
		self.backends().contains(&kind)
	}

	/// Whether there are changes that have not been saved
	pub fn is_dirty(&self) -> bool {
		self.valid().is_some_and(Inner::is_dirty)
	}

	/// The merged view of every tag's properties
	///
	/// Every key appears once, holding the values of the highest priority tag that defines it.
	pub fn properties(&self) -> &PropertyMap {
		self.valid().map_or(&EMPTY_PROPERTIES, Inner::merged)
	}

	/// The first value of `key` in the merged view
	pub fn property(&self, key: &str) -> Option<&str> {
		self.properties().get_first(key)
	}

	/// Every value of `key` in the merged view
	pub fn property_values(&self, key: &str) -> Option<&[String]> {
		self.properties().get(key)
	}

	/// Every property of every tag, including keys defined by several tags
	///
	/// There is exactly one entry per key and tag, ordered by tag priority.
	pub fn raw_properties(&self) -> Vec<PropertyEntry> {
		let Some(inner) = self.valid() else {
			return Vec::new();
		};

		let maps = inner
			.slots
			.iter()
			.map(|slot| (slot.backend.kind(), slot.backend.properties()))
			.collect::<Vec<_>>();

		raw_entries(maps.iter().map(|(kind, map)| (*kind, map)))
	}

	/// Set `key` to a single value
	///
	/// `None`, or an empty value, removes the key from every tag.
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn set_property(&mut self, key: &str, value: Option<&str>) -> Result<()> {
		match value {
			Some(value) if !value.is_empty() => self.set_property_values(key, &[value.to_owned()]),
			_ => self.remove_property(key),
		}
	}

	/// Set every value of `key`
	///
	/// Empty values are dropped, and nothing remaining removes the key from every tag.
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn set_property_values(&mut self, key: &str, values: &[String]) -> Result<()> {
		self.valid_mut()?.set_property(key, values);
		Ok(())
	}

	pub(crate) fn set_scalar(&mut self, key: &str, value: &str) -> Result<()> {
		self.valid_mut()?.set_scalar(key, value);
		Ok(())
	}

	/// Remove `key` from every tag
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn remove_property(&mut self, key: &str) -> Result<()> {
		self.valid_mut()?.remove_property(key);
		Ok(())
	}

	/// Remove `key` from a single tag, returning whether it was defined there
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn remove_property_from(&mut self, key: &str, kind: BackendKind) -> Result<bool> {
		let inner = self.valid_mut()?;
		inner.merged.take();

		let Some(pos) = inner.position(kind) else {
			return Ok(false);
		};

		let slot = &mut inner.slots[pos];
		let removed = slot.backend.remove_property(key);
		slot.dirty |= removed;

		Ok(removed)
	}

	/// The value of `PERFORMER:<INSTRUMENT>`
	pub fn performer(&self, instrument: &str) -> Option<&str> {
		self.property(&performer_key(instrument))
	}

	/// Set the performer of `instrument`
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn set_performer(&mut self, instrument: &str, value: &str) -> Result<()> {
		self.set_property(&performer_key(instrument), Some(value))
	}

	/// Remove the performer of `instrument`
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn remove_performer(&mut self, instrument: &str) -> Result<()> {
		self.remove_property(&performer_key(instrument))
	}

	/// Every performer, as `(instrument, performer)`
	pub fn performers(&self) -> Vec<(&str, &str)> {
		self.properties()
			.iter()
			.filter_map(|(key, values)| {
				let instrument = key.strip_prefix(PERFORMER_PREFIX)?;
				Some((instrument, values.first()?.as_str()))
			})
			.collect()
	}

	/// The tempo, in beats per minute
	///
	/// A fractional tempo is rounded.
	pub fn bpm(&self) -> Option<u32> {
		let bpm = self.property("BPM")?.trim();
		bpm.parse::<u32>()
			.ok()
			.or_else(|| bpm.parse::<f64>().ok().map(|bpm| bpm.round() as u32))
	}

	/// Set the tempo, 0 removes it
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn set_bpm(&mut self, bpm: u32) -> Result<()> {
		if bpm == 0 {
			return self.remove_bpm();
		}

		self.set_property("BPM", Some(&bpm.to_string()))
	}

	/// Remove the tempo
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn remove_bpm(&mut self) -> Result<()> {
		self.remove_property("BPM")
	}

	/// All pictures
	pub fn pictures(&self) -> Vec<Picture> {
		self.valid()
			.map(|inner| inner.pictures.pictures().to_vec())
			.unwrap_or_default()
	}

	/// The picture at `index`
	pub fn picture(&self, index: usize) -> Option<Picture> {
		self.valid()?.pictures.get(index).cloned()
	}

	/// The number of pictures
	pub fn picture_count(&self) -> usize {
		self.valid().map_or(0, |inner| inner.pictures.len())
	}

	/// The first picture
	pub fn artwork(&self) -> Option<Picture> {
		self.picture(0)
	}

	/// Append a picture
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn add_picture(&mut self, picture: Picture) -> Result<()> {
		self.valid_mut()?.pictures.push(picture);
		Ok(())
	}

	/// Replace the picture at `index`, returning the old one
	///
	/// # Errors
	///
	/// * The file is invalid
	/// * `index` is out of bounds
	pub fn replace_picture(&mut self, index: usize, picture: Picture) -> Result<Picture> {
		self.valid_mut()?.pictures.replace(index, picture)
	}

	/// Remove the picture at `index`
	///
	/// Every following picture moves down by one.
	///
	/// # Errors
	///
	/// * The file is invalid
	/// * `index` is out of bounds
	pub fn remove_picture(&mut self, index: usize) -> Result<Picture> {
		self.valid_mut()?.pictures.remove(index)
	}

	/// Remove every picture whose type is exactly `pic_type`, returning the number removed
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn remove_pictures_of_type(&mut self, pic_type: &str) -> Result<usize> {
		Ok(self.valid_mut()?.pictures.remove_all_of_type(pic_type))
	}

	/// Remove every picture
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn remove_all_pictures(&mut self) -> Result<()> {
		self.valid_mut()?.pictures.clear();
		Ok(())
	}

	/// Replace every picture with `picture`
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn set_artwork(&mut self, picture: Picture) -> Result<()> {
		self.replace_pictures(vec![picture])
	}

	/// Replace every picture
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn replace_pictures(&mut self, pictures: Vec<Picture>) -> Result<()> {
		self.valid_mut()?.pictures.set_all(pictures);
		Ok(())
	}

	/// The rating, `0..=255`, or [`RATING_UNSET`]
	///
	/// See [`rating`](crate::tag::rating) for where the rating is stored.
	pub fn rating(&self) -> i32 {
		self.valid()
			.and_then(Inner::rating_tag)
			.and_then(Id3v2Tag::rating)
			.map_or(RATING_UNSET, |native| {
				i32::from(RatingScale::POPULARIMETER.from_native(native))
			})
	}

	/// Set the rating
	///
	/// Values above 255 are clamped, and any negative value clears the rating. Files that can't
	/// hold a rating accept and ignore it.
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn set_rating(&mut self, rating: i32) -> Result<()> {
		let inner = self.valid_mut()?;
		let file_type = inner.file_type;

		let rating = rating::normalize(rating);
		let Some(slot) = inner.rating_slot(rating.is_some()) else {
			log::debug!("{} files can't hold a rating, ignoring", file_type.name());
			return Ok(());
		};

		if let Some(tag) = slot.backend.as_id3v2_mut() {
			tag.set_rating(rating.map(|rating| RatingScale::POPULARIMETER.to_native(rating)));
			slot.dirty = true;
		}

		Ok(())
	}

	/// The play count, 0 if none is stored
	pub fn play_count(&self) -> u64 {
		self.valid()
			.and_then(Inner::rating_tag)
			.and_then(Id3v2Tag::play_count)
			.unwrap_or(0)
	}

	/// Set the play count
	///
	/// Files that can't hold a play count accept and ignore it.
	///
	/// # Errors
	///
	/// * The file is invalid
	pub fn set_play_count(&mut self, play_count: u64) -> Result<()> {
		let inner = self.valid_mut()?;
		let file_type = inner.file_type;

		let Some(slot) = inner.rating_slot(play_count > 0) else {
			log::debug!("{} files can't hold a play count, ignoring", file_type.name());
			return Ok(());
		};

		if let Some(tag) = slot.backend.as_id3v2_mut() {
			tag.set_play_count(play_count);
			slot.dirty = true;
		}

		Ok(())
	}

	/// The rating as a number of stars, `0..=5`
	///
	/// See [`stars_from_rating`](crate::tag::rating::stars_from_rating).
	pub fn rating_stars(&self) -> u8 {
		rating::stars_from_rating(self.rating())
	}

	/// Set the rating as a number of stars, `0..=5`
	///
	/// See [`rating_from_stars`](crate::tag::rating::rating_from_stars).
	///
	/// # Errors
	///
	/// * `stars` is greater than 5
	/// * The file is invalid
	pub fn set_rating_stars(&mut self, stars: u8) -> Result<()> {
		let Some(rating) = rating::rating_from_stars(stars) else {
			return Err(PolytagError::new(ErrorKind::OutOfBounds {
				index: usize::from(stars),
				len: 6,
			}));
		};

		self.set_rating(i32::from(rating))
	}

	/// Save all pending changes with the default [`WriteOptions`]
	///
	/// # Errors
	///
	/// See [`TagFile::save_with_options`]
	pub fn save(&mut self) -> Result<()> {
		self.save_with_options(WriteOptions::default())
	}

	/// Save all pending changes
	///
	/// Every changed tag is encoded first, and the file is only replaced once all of them
	/// succeed. The new contents are written to a temporary file next to the original, then moved
	/// over it. On failure the file is untouched, and the changes stay pending so the save can be
	/// retried.
	///
	/// Tags left empty are removed from the file.
	///
	/// # Errors
	///
	/// * The file is invalid
	/// * A tag fails to encode
	/// * The file is read only, and [`WriteOptions::respect_read_only()`] is set
	/// * The file changed on disk, and can no longer be parsed
	/// * Any I/O error
	pub fn save_with_options(&mut self, write_options: WriteOptions) -> Result<()> {
		let path = self.path.clone();

		let inner = self.valid_mut()?;
		if let Err(e) = inner.save(write_options) {
			log::warn!("Unable to save `{}`: {e}", path.display());
			return Err(e);
		}

		Ok(())
	}

	/// Remove every tag from the file
	///
	/// This is written immediately, and discards any pending changes.
	///
	/// # Errors
	///
	/// * The file is invalid
	/// * Any I/O error
	pub fn remove_all_tags(&mut self) -> Result<()> {
		self.valid_mut()?.remove_all_tags()
	}
}

const PERFORMER_PREFIX: &str = "PERFORMER:";

fn performer_key(instrument: &str) -> String {
	format!("{PERFORMER_PREFIX}{}", instrument.to_uppercase())
}

scalar_accessors! {
	[title] => "TITLE",
	[artist] => "ARTIST",
	[album] => "ALBUM",
	[comment] => "COMMENT",
	[genre] => "GENRE",
	[date] => "DATE",
	[track number] => "TRACKNUMBER",
}

property_accessors! {
	[album artist] => "ALBUMARTIST",
	[subtitle] => "SUBTITLE",
	[disc number] => "DISCNUMBER",
	[original date] => "ORIGINALDATE",
	[title sort] => "TITLESORT",
	[album sort] => "ALBUMSORT",
	[artist sort] => "ARTISTSORT",
	[album artist sort] => "ALBUMARTISTSORT",
	[composer sort] => "COMPOSERSORT",
	[composer] => "COMPOSER",
	[lyricist] => "LYRICIST",
	[conductor] => "CONDUCTOR",
	[remixer] => "REMIXER",
	[isrc] => "ISRC",
	[asin] => "ASIN",
	[copyright] => "COPYRIGHT",
	[encoded by] => "ENCODEDBY",
	[mood] => "MOOD",
	[media] => "MEDIA",
	[label] => "LABEL",
	[catalog number] => "CATALOGNUMBER",
	[barcode] => "BARCODE",
	[release country] => "RELEASECOUNTRY",
	[release status] => "RELEASESTATUS",
	[release type] => "RELEASETYPE",
	[musicbrainz track id] => "MUSICBRAINZ_TRACKID",
	[musicbrainz album id] => "MUSICBRAINZ_ALBUMID",
	[musicbrainz release group id] => "MUSICBRAINZ_RELEASEGROUPID",
	[musicbrainz release track id] => "MUSICBRAINZ_RELEASETRACKID",
	[musicbrainz work id] => "MUSICBRAINZ_WORKID",
	[musicbrainz artist id] => "MUSICBRAINZ_ARTISTID",
	[musicbrainz album artist id] => "MUSICBRAINZ_ALBUMARTISTID",
	[acoustid id] => "ACOUSTID_ID",
	[acoustid fingerprint] => "ACOUSTID_FINGERPRINT",
	[musicip puid] => "MUSICIP_PUID",
}
