use crate::error::{ErrorKind, PolytagError, Result};
use crate::picture::Picture;

/// An ordered list of pictures
///
/// Pictures are identified by their position only. Two identical pictures at different indices
/// are distinct entries. Any structural change (insertion, removal) renumbers the entries that
/// follow it, so indices should not be held on to across changes.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct PictureStore {
	pictures: Vec<Picture>,
	dirty: bool,
}

impl PictureStore {
	pub(crate) fn from_pictures(pictures: Vec<Picture>) -> Self {
		Self {
			pictures,
			dirty: false,
		}
	}

	/// Whether the list changed since it was loaded or last saved
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub(crate) fn mark_clean(&mut self) {
		self.dirty = false;
	}

	/// All pictures, in order
	pub fn pictures(&self) -> &[Picture] {
		&self.pictures
	}

	/// The number of pictures
	pub fn len(&self) -> usize {
		self.pictures.len()
	}

	/// Whether there are no pictures
	pub fn is_empty(&self) -> bool {
		self.pictures.is_empty()
	}

	/// Get the picture at `index`, or `None` if it is out of bounds
	pub fn get(&self, index: usize) -> Option<&Picture> {
		self.pictures.get(index)
	}

	/// Append a picture to the end of the list
	pub fn push(&mut self, picture: Picture) {
		self.pictures.push(picture);
		self.dirty = true;
	}

	/// Replace the picture at `index`
	///
	/// # Errors
	///
	/// * `index` is out of bounds
	pub fn replace(&mut self, index: usize, picture: Picture) -> Result<Picture> {
		self.check_bounds(index)?;

		self.dirty = true;
		Ok(std::mem::replace(&mut self.pictures[index], picture))
	}

	/// Remove the picture at `index`, shifting every following picture down by one
	///
	/// # Errors
	///
	/// * `index` is out of bounds
	pub fn remove(&mut self, index: usize) -> Result<Picture> {
		self.check_bounds(index)?;

		self.dirty = true;
		Ok(self.pictures.remove(index))
	}

	/// Remove every picture whose type is exactly `pic_type`, returning the number removed
	///
	/// Nothing matching is not an error, and leaves the list untouched.
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::picture::Picture;
	/// use polytag::tag::PictureStore;
	///
	/// let mut store = PictureStore::default();
	/// store.push(Picture::new(vec![1], "image/png", "", "Front Cover"));
	/// store.push(Picture::new(vec![2], "image/png", "", "Artist"));
	/// store.push(Picture::new(vec![3], "image/png", "", "Front Cover"));
	///
	/// assert_eq!(store.remove_all_of_type("Front Cover"), 2);
	/// assert_eq!(store.remove_all_of_type("Back Cover"), 0);
	/// assert_eq!(store.len(), 1);
	/// ```
	pub fn remove_all_of_type(&mut self, pic_type: &str) -> usize {
		let before = self.pictures.len();
		self.pictures.retain(|p| p.pic_type != pic_type);

		let removed = before - self.pictures.len();
		if removed > 0 {
			self.dirty = true;
		}

		removed
	}

	/// Remove every picture
	pub fn clear(&mut self) {
		if !self.pictures.is_empty() {
			self.dirty = true;
		}

		self.pictures.clear();
	}

	/// Replace the entire list
	pub fn set_all(&mut self, pictures: Vec<Picture>) {
		self.pictures = pictures;
		self.dirty = true;
	}

	fn check_bounds(&self, index: usize) -> Result<()> {
		if index >= self.pictures.len() {
			return Err(PolytagError::new(ErrorKind::OutOfBounds {
				index,
				len: self.pictures.len(),
			}));
		}

		Ok(())
	}
}
