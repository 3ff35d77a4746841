pub(crate) mod item;
pub(crate) mod read;
mod write;

use crate::ape::constants::KEY_RENAMES;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::picture::{Picture, PictureType};
use crate::tag::{BackendKind, PropertyMap, TagBackend};
use item::{ApeItem, ApeItemValue};

/// The property key of a native item key
fn property_key(native: &str) -> String {
	KEY_RENAMES
		.iter()
		.find(|(ape, _)| ape.eq_ignore_ascii_case(native))
		.map_or_else(|| native.to_ascii_uppercase(), |(_, key)| (*key).to_owned())
}

/// The native item key of a property key
fn native_key(key: &str) -> String {
	KEY_RENAMES
		.iter()
		.find(|(_, property)| property.eq_ignore_ascii_case(key))
		.map_or_else(|| key.to_ascii_uppercase(), |(ape, _)| (*ape).to_owned())
}

/// ## Item storage
///
/// `APE` isn't a very strict format. An [`ApeItem`] is only restricted by its key, and holds
/// text, binary data, or a locator.
///
/// ## Property keys
///
/// Text items are exposed under their uppercased key, except for a few legacy names:
///
/// | Item key       | Property key  |
/// |----------------|---------------|
/// | `YEAR`         | `DATE`        |
/// | `TRACK`        | `TRACKNUMBER` |
/// | `DISC`         | `DISCNUMBER`  |
/// | `ALBUM ARTIST` | `ALBUMARTIST` |
/// | `MIXARTIST`    | `REMIXER`     |
///
/// Multiple values are separated by a null byte. Binary and locator items are not exposed, but
/// are kept when writing.
///
/// ## Pictures
///
/// Pictures are binary items keyed by their type (`Cover Art (Front)`, ...). As there is only one
/// item per key, only the first picture of each type can be stored.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct ApeTag {
	/// Whether or not to mark the tag as read only
	pub read_only: bool,
	pub(crate) items: Vec<ApeItem>,
}

impl ApeTag {
	/// Create a new empty `ApeTag`
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::ape::ApeTag;
	///
	/// let ape_tag = ApeTag::new();
	/// assert!(ape_tag.items().next().is_none());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Get an [`ApeItem`] by key
	///
	/// NOTE: While `APE` items are supposed to be case-sensitive,
	/// this rule is rarely followed, so this will ignore case when searching.
	pub fn get(&self, key: &str) -> Option<&ApeItem> {
		self.items.iter().find(|i| i.key.eq_ignore_ascii_case(key))
	}

	/// Insert an [`ApeItem`]
	///
	/// This will remove any item with the same key prior to insertion
	pub fn insert(&mut self, value: ApeItem) {
		self.remove(&value.key);
		self.items.push(value);
	}

	/// Remove an [`ApeItem`] by key
	///
	/// NOTE: Like [`ApeTag::get`], this is not case-sensitive
	pub fn remove(&mut self, key: &str) {
		self.items.retain(|i| !i.key.eq_ignore_ascii_case(key));
	}

	/// Returns all items, in the order they are written
	pub fn items(&self) -> impl Iterator<Item = &ApeItem> + '_ {
		self.items.iter()
	}

	fn is_picture_item(item: &ApeItem) -> bool {
		matches!(item.value, ApeItemValue::Binary(_))
			&& PictureType::from_ape_key(&item.key).is_some()
	}
}

impl TagBackend for ApeTag {
	fn kind(&self) -> BackendKind {
		BackendKind::Ape
	}

	fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	fn properties(&self) -> PropertyMap {
		let mut map = PropertyMap::new();

		for item in &self.items {
			if let ApeItemValue::Text(text) = &item.value {
				let key = property_key(&item.key);
				for value in text.split('\0') {
					map.push(&key, value.to_owned());
				}
			}
		}

		map
	}

	fn set_property(&mut self, key: &str, values: &[String]) -> bool {
		self.remove_property(key);

		let text = values
			.iter()
			.filter(|v| !v.is_empty())
			.map(String::as_str)
			.collect::<Vec<_>>()
			.join("\0");
		if text.is_empty() {
			return true;
		}

		// Keys are validated when encoding
		self.items.push(ApeItem {
			read_only: false,
			key: native_key(key),
			value: ApeItemValue::Text(text),
		});
		true
	}

	fn remove_property(&mut self, key: &str) -> bool {
		let before = self.items.len();
		self.items.retain(|item| {
			!(matches!(item.value, ApeItemValue::Text(_))
				&& property_key(&item.key).eq_ignore_ascii_case(key))
		});

		before != self.items.len()
	}

	fn pictures(&self) -> Vec<Picture> {
		let mut pictures = Vec::new();

		for item in &self.items {
			let (Some(pic_type), ApeItemValue::Binary(bytes)) =
				(PictureType::from_ape_key(&item.key), &item.value)
			else {
				continue;
			};

			match Picture::from_ape_bytes(pic_type, bytes) {
				Ok(picture) => pictures.push(picture),
				Err(e) => log::warn!("APE: Skipping invalid picture item '{}': {e}", item.key),
			}
		}

		pictures
	}

	fn set_pictures(&mut self, pictures: &[Picture]) {
		self.items.retain(|item| !Self::is_picture_item(item));

		for picture in pictures {
			let key = picture.picture_type().as_ape_key();
			if self.get(key).is_some() {
				log::warn!(
					"APE: Only one picture of type \"{}\" can be stored, dropping",
					picture.pic_type()
				);
				continue;
			}

			self.items.push(ApeItem {
				read_only: false,
				key: key.to_owned(),
				value: ApeItemValue::Binary(picture.as_ape_bytes()),
			});
		}
	}

	fn encode(&self, _write_options: WriteOptions) -> Result<Vec<u8>> {
		write::create_ape_tag(self)
	}
}

#[cfg(test)]
mod tests {
	use super::{ApeItem, ApeItemValue, ApeTag};
	use crate::ape::header::find_ape_tag;
	use crate::ape::tag::read::read_ape_tag;
	use crate::config::{ParseOptions, ParsingMode, WriteOptions};
	use crate::error::ErrorKind;
	use crate::picture::Picture;
	use crate::tag::{BackendKind, TagBackend};

	fn values(values: &[&str]) -> Vec<String> {
		values.iter().map(|v| (*v).to_owned()).collect()
	}

	fn re_read(tag: &ApeTag) -> ApeTag {
		let bytes = tag.encode(WriteOptions::default()).unwrap();
		let (range, header) = find_ape_tag(&bytes, bytes.len()).unwrap().unwrap();
		assert_eq!(range, 0..bytes.len());

		read_ape_tag(&bytes, header, ParseOptions::new()).unwrap()
	}

	fn item(key: &str, value: &[u8]) -> Vec<u8> {
		let mut item = Vec::new();
		item.extend((value.len() as u32).to_le_bytes());
		item.extend(0_u32.to_le_bytes());
		item.extend(key.as_bytes());
		item.push(0);
		item.extend(value);
		item
	}

	fn footer_only(items: &[Vec<u8>]) -> Vec<u8> {
		let items = items.concat();
		let mut tag = items.clone();
		tag.extend(b"APETAGEX");
		tag.extend(1000_u32.to_le_bytes());
		tag.extend((items.len() as u32 + 32).to_le_bytes());
		tag.extend(2_u32.to_le_bytes());
		tag.extend(0_u32.to_le_bytes());
		tag.extend([0; 8]);
		tag
	}

	#[test_log::test]
	fn parse_apev1() {
		let bytes = footer_only(&[item("Title", b"Foo title"), item("Year", b"1984")]);
		let (range, header) = find_ape_tag(&bytes, bytes.len()).unwrap().unwrap();
		assert_eq!(range, 0..bytes.len());

		let tag = read_ape_tag(&bytes, header, ParseOptions::new()).unwrap();
		let properties = tag.properties();
		assert_eq!(properties.get_first("TITLE"), Some("Foo title"));
		assert_eq!(properties.get_first("DATE"), Some("1984"));
	}

	#[test_log::test]
	fn invalid_key() {
		let bytes = footer_only(&[item("TAG", b"Foo"), item("Title", b"Foo title")]);
		let (_, header) = find_ape_tag(&bytes, bytes.len()).unwrap().unwrap();

		let tag = read_ape_tag(&bytes, header, ParseOptions::new()).unwrap();
		assert_eq!(tag.items().count(), 1);

		let strict = read_ape_tag(
			&bytes,
			header,
			ParseOptions::new().parsing_mode(ParsingMode::Strict),
		);
		assert!(strict.is_err());
	}

	#[test_log::test]
	fn ape_re_read() {
		let mut tag = ApeTag::new();
		tag.set_property("TITLE", &values(&["Foo title"]));
		tag.set_property("ARTIST", &values(&["Bar", "Baz"]));
		tag.set_property("TRACKNUMBER", &values(&["3/10"]));
		tag.set_property("ALBUMARTIST", &values(&["Qux"]));
		tag.insert(
			ApeItem::new(
				String::from("Website"),
				ApeItemValue::Locator(String::from("https://foo")),
			)
			.unwrap(),
		);

		assert_eq!(
			tag.get("Track").unwrap().value(),
			&ApeItemValue::Text(String::from("3/10"))
		);
		assert!(tag.get("ALBUM ARTIST").is_some());

		let re_read = re_read(&tag);
		assert_eq!(re_read, tag);

		let properties = re_read.properties();
		assert_eq!(properties.get("ARTIST").unwrap(), &["Bar", "Baz"]);
		assert_eq!(properties.get_first("TRACKNUMBER"), Some("3/10"));
		assert_eq!(properties.get_first("ALBUMARTIST"), Some("Qux"));
		// Locators aren't properties
		assert!(!properties.contains_key("WEBSITE"));
	}

	#[test_log::test]
	fn remove_property() {
		let mut tag = ApeTag::new();
		tag.set_property("DATE", &values(&["2020"]));
		tag.set_property("GENRE", &values(&["Rock"]));

		assert!(tag.remove_property("date"));
		assert!(!tag.remove_property("DATE"));
		assert!(tag.get("YEAR").is_none());
		assert_eq!(tag.items().count(), 1);
	}

	#[test_log::test]
	fn pictures() {
		let mut tag = ApeTag::new();
		tag.set_property("TITLE", &values(&["Foo"]));

		let front = Picture::new(vec![1, 2, 3], "", "front", "Front Cover");
		let back = Picture::new(vec![4, 5, 6], "", "back", "Back Cover");
		let second_front = Picture::new(vec![7, 8, 9], "", "other front", "Front Cover");

		tag.set_pictures(&[front.clone(), back.clone(), second_front]);
		assert_eq!(tag.items().count(), 3);

		let re_read = re_read(&tag);
		assert_eq!(re_read.pictures(), vec![front, back]);

		tag.set_pictures(&[]);
		assert!(tag.pictures().is_empty());
		assert_eq!(tag.items().count(), 1);
	}

	#[test_log::test]
	fn invalid_key_fails_encode() {
		let mut tag = ApeTag::new();
		tag.set_property("OGGS", &values(&["Foo"]));

		let err = tag.encode(WriteOptions::default()).unwrap_err();
		match err.kind() {
			ErrorKind::BackendEncode(e) => assert_eq!(e.backend(), BackendKind::Ape),
			_ => panic!("Expected a backend encode error, got {err:?}"),
		}
	}

	#[test_log::test]
	fn empty_tag() {
		assert!(ApeTag::new().encode(WriteOptions::default()).unwrap().is_empty());
	}
}
