//! Read and write the tags of MPEG and FLAC audio files through one interface.
//!
//! An audio file can carry several tag containers at once. An MP3 may have an ID3v2 tag at the
//! start, and an APE tag and an ID3v1 tag at the end, each with its own idea of what the title is.
//! polytag reads all of them and presents a single view:
//!
//! * Property reads return the value of the highest priority container, see [`tag::PRIORITY`]
//! * Property writes go to the container best suited to hold them, creating it if needed
//! * Pictures are handled as one ordered list, mirrored into every container that can hold them
//! * The rating and play count are normalized to a single scale, see [`tag::rating`]
//!
//! # Supported formats
//!
//! | Stream | Containers                              |
//! |--------|-----------------------------------------|
//! | MPEG   | ID3v2, APE, ID3v1                       |
//! | FLAC   | Vorbis comments (+ `PICTURE` blocks), ID3v2 and ID3v1 when already present |
//!
//! # Examples
//!
//! ## Reading
//!
//! ```rust,no_run
//! use polytag::file::TagFile;
//!
//! let file = TagFile::open("track.flac");
//! if !file.is_valid() {
//! 	return;
//! }
//!
//! println!("{:?} by {:?}", file.title(), file.artist());
//!
//! for entry in file.raw_properties() {
//! 	println!("{} ({}): {:?}", entry.key(), entry.source().name(), entry.values());
//! }
//!
//! if let Some(properties) = file.audio_properties() {
//! 	println!("{}, {} Hz", properties.formatted_duration(), properties.sample_rate());
//! }
//! ```
//!
//! ## Writing
//!
//! ```rust,no_run
//! use polytag::file::TagFile;
//! use polytag::picture::Picture;
//!
//! # fn main() -> polytag::error::Result<()> {
//! let mut file = TagFile::open("track.mp3");
//!
//! file.set_title("Foo title")?;
//! file.set_property("MOOD", Some("Calm"))?;
//! file.set_artwork(Picture::new(
//! 	std::fs::read("cover.jpg")?,
//! 	"",
//! 	"",
//! 	"Front Cover",
//! ))?;
//!
//! // Nothing is written until now
//! file.save()?;
//! # Ok(()) }
//! ```

pub mod ape;
pub mod config;
pub mod error;
pub mod file;
pub(crate) mod flac;
pub mod id3;
pub(crate) mod macros;
pub(crate) mod mpeg;
pub mod picture;
pub mod properties;
pub mod tag;
mod util;
pub mod vorbis;

pub use util::text::TextEncoding;
