//! Utilities for generic tag handling
//!
//! Every tag container polytag understands is one [`BackendKind`]. The set is closed, and the
//! order in [`PRIORITY`] decides which container wins when several of them define the same
//! property.

pub(crate) mod accessor;
mod picture_store;
mod property_map;
pub mod rating;

pub use picture_store::PictureStore;
pub use property_map::{PropertyEntry, PropertyMap};

pub(crate) use property_map::{merge, raw_entries};

use crate::ape::ApeTag;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v1::Id3v1Tag;
use crate::id3::v2::Id3v2Tag;
use crate::picture::Picture;
use crate::vorbis::VorbisComments;

/// The kinds of tag containers
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BackendKind {
	/// The frame based tag, [`Id3v2Tag`]
	Id3v2,
	/// The vendor key/value tag, [`ApeTag`]
	Ape,
	/// The comment block, [`VorbisComments`]
	VorbisComments,
	/// The legacy fixed-field tag, [`Id3v1Tag`]
	Id3v1,
}

/// The order in which backends are consulted, highest priority first
///
/// This decides:
///
/// * Which value is returned by a point lookup when multiple backends define the same key
/// * Which backend receives a newly set property
/// * Which backend the picture list is loaded from
pub const PRIORITY: [BackendKind; 4] = [
	BackendKind::Id3v2,
	BackendKind::Ape,
	BackendKind::VorbisComments,
	BackendKind::Id3v1,
];

impl BackendKind {
	/// The name of the backend, as reported in [`PropertyEntry::source`]
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::tag::BackendKind;
	///
	/// assert_eq!(BackendKind::Id3v2.name(), "ID3v2");
	/// assert_eq!(BackendKind::VorbisComments.name(), "XiphComment");
	/// ```
	pub fn name(self) -> &'static str {
		match self {
			BackendKind::Id3v2 => "ID3v2",
			BackendKind::Ape => "APE",
			BackendKind::VorbisComments => "XiphComment",
			BackendKind::Id3v1 => "ID3v1",
		}
	}

	/// Whether the backend can hold arbitrary keys
	///
	/// ID3v1 only has a fixed set of fields.
	pub fn supports_extended_properties(self) -> bool {
		!matches!(self, BackendKind::Id3v1)
	}

	/// Whether the backend can hold pictures
	pub fn supports_pictures(self) -> bool {
		!matches!(self, BackendKind::Id3v1)
	}

	/// Whether the backend has a native rating and play count
	pub fn supports_rating(self) -> bool {
		matches!(self, BackendKind::Id3v2)
	}

	/// Position in [`PRIORITY`], lower is higher priority
	pub(crate) fn priority(self) -> usize {
		match self {
			BackendKind::Id3v2 => 0,
			BackendKind::Ape => 1,
			BackendKind::VorbisComments => 2,
			BackendKind::Id3v1 => 3,
		}
	}
}

/// The capabilities shared by every tag container
///
/// Decoding happens when a container is read. From then on, the backend translates between its
/// native representation and the common one: a [`PropertyMap`] and a list of [`Picture`]s.
pub(crate) trait TagBackend {
	/// The kind of this backend
	fn kind(&self) -> BackendKind;

	/// Whether the tag has no content, an empty tag is stripped on save
	fn is_empty(&self) -> bool;

	/// All properties the tag defines, with uppercase keys
	fn properties(&self) -> PropertyMap;

	/// Replace all values of `key`
	///
	/// Returns `false` if the backend has no way to store `key`.
	fn set_property(&mut self, key: &str, values: &[String]) -> bool;

	/// Remove every value of `key`
	///
	/// Returns `true` if anything was removed.
	fn remove_property(&mut self, key: &str) -> bool;

	/// All pictures the tag holds, in native order
	fn pictures(&self) -> Vec<Picture>;

	/// Replace all pictures in the tag
	fn set_pictures(&mut self, pictures: &[Picture]);

	/// Encode the tag into its native binary layout
	fn encode(&self, write_options: WriteOptions) -> Result<Vec<u8>>;
}

/// One tag container of any kind
#[derive(Clone, Debug)]
pub(crate) enum Backend {
	Id3v2(Id3v2Tag),
	Ape(ApeTag),
	VorbisComments(VorbisComments),
	Id3v1(Id3v1Tag),
}

macro_rules! dispatch {
	($self:ident, $tag:ident => $body:expr) => {
		match $self {
			Backend::Id3v2($tag) => $body,
			Backend::Ape($tag) => $body,
			Backend::VorbisComments($tag) => $body,
			Backend::Id3v1($tag) => $body,
		}
	};
}

impl Backend {
	/// Create an empty tag of the given kind
	pub(crate) fn new(kind: BackendKind) -> Self {
		match kind {
			BackendKind::Id3v2 => Backend::Id3v2(Id3v2Tag::default()),
			BackendKind::Ape => Backend::Ape(ApeTag::default()),
			BackendKind::VorbisComments => Backend::VorbisComments(VorbisComments::default()),
			BackendKind::Id3v1 => Backend::Id3v1(Id3v1Tag::default()),
		}
	}

	pub(crate) fn as_id3v2(&self) -> Option<&Id3v2Tag> {
		match self {
			Backend::Id3v2(tag) => Some(tag),
			_ => None,
		}
	}

	pub(crate) fn as_id3v2_mut(&mut self) -> Option<&mut Id3v2Tag> {
		match self {
			Backend::Id3v2(tag) => Some(tag),
			_ => None,
		}
	}
}

macro_rules! impl_from_tag {
	($($variant:ident => $tag:ty),+) => {
		$(
			impl From<$tag> for Backend {
				fn from(tag: $tag) -> Self {
					Backend::$variant(tag)
				}
			}
		)+
	};
}

impl_from_tag!(
	Id3v2 => Id3v2Tag,
	Ape => ApeTag,
	VorbisComments => VorbisComments,
	Id3v1 => Id3v1Tag
);

impl TagBackend for Backend {
	fn kind(&self) -> BackendKind {
		dispatch!(self, tag => tag.kind())
	}

	fn is_empty(&self) -> bool {
		dispatch!(self, tag => tag.is_empty())
	}

	fn properties(&self) -> PropertyMap {
		dispatch!(self, tag => tag.properties())
	}

	fn set_property(&mut self, key: &str, values: &[String]) -> bool {
		dispatch!(self, tag => tag.set_property(key, values))
	}

	fn remove_property(&mut self, key: &str) -> bool {
		dispatch!(self, tag => tag.remove_property(key))
	}

	fn pictures(&self) -> Vec<Picture> {
		dispatch!(self, tag => tag.pictures())
	}

	fn set_pictures(&mut self, pictures: &[Picture]) {
		dispatch!(self, tag => tag.set_pictures(pictures))
	}

	fn encode(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		dispatch!(self, tag => tag.encode(write_options))
	}
}
