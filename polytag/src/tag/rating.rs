//! Rating and play count normalization
//!
//! Externally, a rating is a single integer in `0..=255`, with [`RATING_UNSET`] meaning that no
//! rating is stored. Each backend that natively supports ratings has its own scale, described by a
//! [`RatingScale`].
//!
//! Only ID3v2 has a native rating (the `POPM` frame), so it is the authoritative backend for both
//! the rating and the play count. Files that cannot host an ID3v2 tag silently ignore ratings.
//!
//! ## Stars
//!
//! No format defines how a rating maps to stars. The mapping used by [`stars_from_rating`] and
//! [`rating_from_stars`] is the common MusicBee/Windows style one:
//!
//! | Stars | Written | Read       |
//! |-------|---------|------------|
//! | 0     | 0       | 0          |
//! | 1     | 1       | 1..=63     |
//! | 2     | 64      | 64..=127   |
//! | 3     | 128     | 128..=195  |
//! | 4     | 196     | 196..=254  |
//! | 5     | 255     | 255        |

/// The value reported when no rating is stored
pub const RATING_UNSET: i32 = -1;

/// A native rating scale, `0..=max`
///
/// Conversions round to the nearest value. For any scale with `max <= 255`, converting a native
/// value to the external scale and back yields the original value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RatingScale {
	max: u8,
}

impl RatingScale {
	/// The scale of an ID3v2 `POPM` frame
	pub const POPULARIMETER: Self = Self::new(255);

	/// Create a scale of `0..=max`
	///
	/// A `max` of 0 is treated as 1.
	pub const fn new(max: u8) -> Self {
		if max == 0 {
			return Self { max: 1 };
		}

		Self { max }
	}

	/// The largest native value
	pub fn max(self) -> u8 {
		self.max
	}

	/// Convert an external `0..=255` rating to this scale
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::tag::rating::RatingScale;
	///
	/// let percent = RatingScale::new(100);
	/// assert_eq!(percent.to_native(255), 100);
	/// assert_eq!(percent.to_native(128), 50);
	/// assert_eq!(RatingScale::POPULARIMETER.to_native(128), 128);
	/// ```
	pub fn to_native(self, rating: u8) -> u8 {
		let max = u32::from(self.max);
		((u32::from(rating) * max + 127) / 255) as u8
	}

	/// Convert a value on this scale to the external `0..=255` rating
	///
	/// Values above the scale's maximum are clamped.
	pub fn from_native(self, native: u8) -> u8 {
		let max = u32::from(self.max);
		let native = u32::from(native.min(self.max));
		((native * 255 + max / 2) / max) as u8
	}
}

/// Clamp a caller supplied rating
///
/// Negative values mean "clear the rating", anything above 255 is clamped.
pub(crate) fn normalize(rating: i32) -> Option<u8> {
	if rating < 0 {
		return None;
	}

	Some(rating.min(255) as u8)
}

/// Convert a `0..=255` rating to a number of stars (`0..=5`)
///
/// [`RATING_UNSET`] (or any negative value) is 0 stars.
///
/// # Examples
///
/// ```rust
/// use polytag::tag::rating::stars_from_rating;
///
/// assert_eq!(stars_from_rating(0), 0);
/// assert_eq!(stars_from_rating(64), 2);
/// assert_eq!(stars_from_rating(255), 5);
/// ```
pub fn stars_from_rating(rating: i32) -> u8 {
	match rating {
		..=0 => 0,
		1..=63 => 1,
		64..=127 => 2,
		128..=195 => 3,
		196..=254 => 4,
		_ => 5,
	}
}

/// Convert a number of stars (`0..=5`) to a `0..=255` rating
///
/// Returns `None` for anything above 5 stars.
pub fn rating_from_stars(stars: u8) -> Option<u8> {
	match stars {
		0 => Some(0),
		1 => Some(1),
		2 => Some(64),
		3 => Some(128),
		4 => Some(196),
		5 => Some(255),
		_ => None,
	}
}
