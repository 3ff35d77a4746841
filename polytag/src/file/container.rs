//! What every container format provides to a [`TagFile`](crate::file::TagFile)

use crate::config::ParsingMode;
use crate::error::Result;
use crate::picture::Picture;
use crate::properties::AudioProperties;
use crate::tag::{Backend, BackendKind};

/// The tags and audio properties read from a file
#[derive(Debug, Default)]
pub(crate) struct ContainerContents {
	/// Every tag present in the file, in no particular order
	pub(crate) tags: Vec<Backend>,
	pub(crate) properties: AudioProperties,
}

/// What to do with one tag when rebuilding a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RegionUpdate {
	/// Copy the existing bytes, if any
	Keep,
	/// Replace the existing tag, an empty buffer removes it
	Replace(Vec<u8>),
}

impl RegionUpdate {
	/// The bytes to write in place of `existing`
	pub(crate) fn resolve<'a>(&'a self, existing: Option<&'a [u8]>) -> &'a [u8] {
		match self {
			RegionUpdate::Keep => existing.unwrap_or_default(),
			RegionUpdate::Replace(bytes) => bytes,
		}
	}

	/// Whether a new tag is written, as opposed to keeping or removing one
	pub(crate) fn writes_tag(&self) -> bool {
		matches!(self, RegionUpdate::Replace(bytes) if !bytes.is_empty())
	}
}

/// The changes to apply to a file's tags
#[derive(Debug, Clone)]
pub(crate) struct TagUpdates {
	pub(crate) id3v2: RegionUpdate,
	pub(crate) ape: RegionUpdate,
	pub(crate) vorbis_comments: RegionUpdate,
	/// FLAC `PICTURE` blocks, `None` keeps the existing blocks
	pub(crate) flac_pictures: Option<Vec<Picture>>,
	pub(crate) id3v1: RegionUpdate,
}

impl TagUpdates {
	/// Keep every tag as-is
	pub(crate) fn keep_all() -> Self {
		Self {
			id3v2: RegionUpdate::Keep,
			ape: RegionUpdate::Keep,
			vorbis_comments: RegionUpdate::Keep,
			flac_pictures: None,
			id3v1: RegionUpdate::Keep,
		}
	}

	/// Remove every tag
	pub(crate) fn strip_all() -> Self {
		Self {
			id3v2: RegionUpdate::Replace(Vec::new()),
			ape: RegionUpdate::Replace(Vec::new()),
			vorbis_comments: RegionUpdate::Replace(Vec::new()),
			flac_pictures: Some(Vec::new()),
			id3v1: RegionUpdate::Replace(Vec::new()),
		}
	}

	pub(crate) fn set(&mut self, kind: BackendKind, update: RegionUpdate) {
		match kind {
			BackendKind::Id3v2 => self.id3v2 = update,
			BackendKind::Ape => self.ape = update,
			BackendKind::VorbisComments => self.vorbis_comments = update,
			BackendKind::Id3v1 => self.id3v1 = update,
		}
	}
}

/// Handle a tag that failed to decode
///
/// With [`ParsingMode::Strict`], the error fails the entire file. Otherwise, the tag is kept as an
/// empty backend of the same kind, so its bytes are preserved unless it is written to.
pub(crate) fn decode_or_degrade<T>(
	kind: BackendKind,
	result: Result<T>,
	parse_mode: ParsingMode,
) -> Result<Backend>
where
	T: Into<Backend>,
{
	match result {
		Ok(tag) => Ok(tag.into()),
		Err(e) if parse_mode == ParsingMode::Strict => Err(e),
		Err(e) => {
			log::warn!("Unable to decode {} tag, treating it as empty: {e}", kind.name());
			Ok(Backend::new(kind))
		},
	}
}
