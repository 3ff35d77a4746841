//! Generic audio properties
//!
//! Every file type probes its audio stream into the same [`AudioProperties`]. These are read once
//! when opening a file, and never change afterwards.

use std::time::Duration;

/// Various *immutable* audio properties
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[non_exhaustive]
pub struct AudioProperties {
	pub(crate) duration: Duration,
	pub(crate) bitrate: u32,
	pub(crate) sample_rate: u32,
	pub(crate) channels: u8,
}

impl AudioProperties {
	/// Create a new `AudioProperties`
	#[must_use]
	pub const fn new(duration: Duration, bitrate: u32, sample_rate: u32, channels: u8) -> Self {
		Self {
			duration,
			bitrate,
			sample_rate,
			channels,
		}
	}

	/// Duration of the audio
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Duration of the audio, in whole seconds
	pub fn duration_seconds(&self) -> u64 {
		self.duration.as_secs()
	}

	/// The duration formatted as `M:SS`, or `H:MM:SS` for an hour or longer
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::properties::AudioProperties;
	/// use std::time::Duration;
	///
	/// let properties = AudioProperties::new(Duration::from_secs(185), 320, 44100, 2);
	/// assert_eq!(properties.formatted_duration(), "3:05");
	///
	/// let properties = AudioProperties::new(Duration::from_secs(3725), 320, 44100, 2);
	/// assert_eq!(properties.formatted_duration(), "1:02:05");
	/// ```
	pub fn formatted_duration(&self) -> String {
		let total = self.duration_seconds();
		let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);

		if hours > 0 {
			format!("{hours}:{minutes:02}:{seconds:02}")
		} else {
			format!("{minutes}:{seconds:02}")
		}
	}

	/// Audio bitrate (kbps)
	pub fn bitrate(&self) -> u32 {
		self.bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	/// Channel count
	pub fn channels(&self) -> u8 {
		self.channels
	}
}

#[cfg(test)]
mod tests {
	use super::AudioProperties;
	use std::time::Duration;

	#[test_log::test]
	fn formatted_duration() {
		let properties = |secs| AudioProperties::new(Duration::from_millis(secs), 0, 0, 0);

		assert_eq!(properties(0).formatted_duration(), "0:00");
		assert_eq!(properties(59_999).formatted_duration(), "0:59");
		assert_eq!(properties(600_000).formatted_duration(), "10:00");
		assert_eq!(properties(3_600_000).formatted_duration(), "1:00:00");
		assert_eq!(properties(3_600_000).duration_seconds(), 3600);
	}
}
