use super::{BackendKind, PRIORITY};

/// An ordered map of property keys to their values
///
/// Keys are compared case-insensitively and always stored uppercase. A key maps to one or more
/// values, a key with no values is never stored.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct PropertyMap {
	items: Vec<(String, Vec<String>)>,
}

impl PropertyMap {
	/// Create an empty `PropertyMap`
	pub const fn new() -> Self {
		Self { items: Vec::new() }
	}

	/// Returns the values of `key`
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::tag::PropertyMap;
	///
	/// let mut map = PropertyMap::new();
	/// map.insert("Artist", vec![String::from("Foo"), String::from("Bar")]);
	///
	/// assert_eq!(map.get("ARTIST").map(<[String]>::len), Some(2));
	/// assert_eq!(map.get_first("artist"), Some("Foo"));
	/// ```
	pub fn get(&self, key: &str) -> Option<&[String]> {
		self.items
			.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(key))
			.map(|(_, values)| values.as_slice())
	}

	/// Returns the first value of `key`
	pub fn get_first(&self, key: &str) -> Option<&str> {
		self.get(key)
			.and_then(|values| values.first())
			.map(String::as_str)
	}

	/// Whether `key` is defined
	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Replace the values of `key`
	///
	/// Empty values are dropped. If nothing remains, the key is removed.
	pub fn insert(&mut self, key: &str, values: Vec<String>) {
		let values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
		if values.is_empty() {
			self.remove(key);
			return;
		}

		match self.items.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
			Some((_, existing)) => *existing = values,
			None => self.items.push((key.to_ascii_uppercase(), values)),
		}
	}

	/// Append a single value to `key`
	pub fn push(&mut self, key: &str, value: String) {
		if value.is_empty() {
			return;
		}

		match self.items.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
			Some((_, existing)) => existing.push(value),
			None => self.items.push((key.to_ascii_uppercase(), vec![value])),
		}
	}

	/// Remove `key`, returning its values
	pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
		let pos = self
			.items
			.iter()
			.position(|(k, _)| k.eq_ignore_ascii_case(key))?;
		Some(self.items.remove(pos).1)
	}

	/// Returns all keys, in insertion order
	pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
		self.items.iter().map(|(k, _)| k.as_str())
	}

	/// Returns all keys with their values
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
		self.items.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
	}

	/// The number of keys
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the map has no keys
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl IntoIterator for PropertyMap {
	type Item = (String, Vec<String>);
	type IntoIter = std::vec::IntoIter<(String, Vec<String>)>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}

impl<K, V> FromIterator<(K, V)> for PropertyMap
where
	K: AsRef<str>,
	V: Into<String>,
{
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		let mut map = PropertyMap::new();
		for (key, value) in iter {
			map.push(key.as_ref(), value.into());
		}

		map
	}
}

/// A single property as defined by one backend
///
/// This is an entry of the raw list, see [`TagFile::raw_properties`](crate::file::TagFile::raw_properties).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyEntry {
	key: String,
	values: Vec<String>,
	source: BackendKind,
}

impl PropertyEntry {
	/// The property key, uppercase
	pub fn key(&self) -> &str {
		&self.key
	}

	/// The first value
	pub fn value(&self) -> &str {
		self.values.first().map_or("", String::as_str)
	}

	/// All values the backend holds for the key
	pub fn values(&self) -> &[String] {
		&self.values
	}

	/// The backend that defines this entry
	pub fn source(&self) -> BackendKind {
		self.source
	}
}

/// Build the deduplicated view of several backends
///
/// Keys are resolved in [`PRIORITY`] order. The first backend to define a key wins, and every
/// value it holds for that key is used.
pub(crate) fn merge<'a, I>(maps: I) -> PropertyMap
where
	I: IntoIterator<Item = (BackendKind, &'a PropertyMap)>,
{
	let mut maps = maps.into_iter().collect::<Vec<_>>();
	maps.sort_by_key(|(kind, _)| kind.priority());

	let mut merged = PropertyMap::new();
	for (_, map) in maps {
		for (key, values) in map.iter() {
			if !merged.contains_key(key) {
				merged.insert(key, values.to_vec());
			}
		}
	}

	merged
}

/// Build the raw list of several backends
///
/// There is exactly one entry per (key, backend) pair, ordered by backend priority.
pub(crate) fn raw_entries<'a, I>(maps: I) -> Vec<PropertyEntry>
where
	I: IntoIterator<Item = (BackendKind, &'a PropertyMap)>,
{
	let mut entries = Vec::new();
	let maps = maps.into_iter().collect::<Vec<_>>();

	for kind in PRIORITY {
		for (_, map) in maps.iter().filter(|(k, _)| *k == kind) {
			entries.extend(map.iter().map(|(key, values)| PropertyEntry {
				key: key.to_owned(),
				values: values.to_vec(),
				source: kind,
			}));
		}
	}

	entries
}

#[cfg(test)]
mod tests {
	use super::{PropertyMap, merge, raw_entries};
	use crate::tag::BackendKind;

	fn map(pairs: &[(&str, &str)]) -> PropertyMap {
		pairs.iter().copied().collect()
	}

	#[test_log::test]
	fn keys_are_case_insensitive() {
		let mut map = PropertyMap::new();
		map.insert("title", vec![String::from("Foo")]);
		map.insert("TITLE", vec![String::from("Bar")]);

		assert_eq!(map.len(), 1);
		assert_eq!(map.keys().collect::<Vec<_>>(), vec!["TITLE"]);
		assert_eq!(map.get_first("Title"), Some("Bar"));
	}

	#[test_log::test]
	fn empty_values_remove_key() {
		let mut map = map(&[("TITLE", "Foo"), ("ARTIST", "Bar")]);

		map.insert("TITLE", vec![String::new()]);
		assert!(!map.contains_key("TITLE"));
		assert_eq!(map.len(), 1);
	}

	#[test_log::test]
	fn merge_respects_priority() {
		let id3v1 = map(&[("TITLE", "v1 title"), ("GENRE", "Rock")]);
		let ape = map(&[("TITLE", "ape title"), ("LABEL", "Label")]);
		let id3v2 = map(&[("TITLE", "v2 title")]);

		// Deliberately out of order
		let merged = merge([
			(BackendKind::Id3v1, &id3v1),
			(BackendKind::Ape, &ape),
			(BackendKind::Id3v2, &id3v2),
		]);

		assert_eq!(merged.len(), 3);
		assert_eq!(merged.get_first("TITLE"), Some("v2 title"));
		assert_eq!(merged.get_first("LABEL"), Some("Label"));
		assert_eq!(merged.get_first("GENRE"), Some("Rock"));
	}

	#[test_log::test]
	fn raw_list_keeps_duplicates() {
		let id3v1 = map(&[("TITLE", "a")]);
		let ape = map(&[("TITLE", "b")]);
		let id3v2 = map(&[("TITLE", "c"), ("TITLE", "d")]);

		let maps = [
			(BackendKind::Id3v1, &id3v1),
			(BackendKind::Ape, &ape),
			(BackendKind::Id3v2, &id3v2),
		];

		let merged = merge(maps);
		assert_eq!(merged.keys().count(), 1);
		assert_eq!(merged.get("TITLE").unwrap(), &["c", "d"]);

		let raw = raw_entries(maps);
		assert_eq!(raw.len(), 3);
		assert_eq!(raw[0].source(), BackendKind::Id3v2);
		assert_eq!(raw[0].values(), &["c", "d"]);
		assert_eq!(raw[1].source(), BackendKind::Ape);
		assert_eq!(raw[1].value(), "b");
		assert_eq!(raw[2].source(), BackendKind::Id3v1);
		assert_eq!(raw[2].value(), "a");
	}
}
