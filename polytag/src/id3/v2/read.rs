use super::frame::read::ParsedFrame;
use super::header::Id3v2Header;
use super::tag::Id3v2Tag;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::util::synchsafe::resynchronize;

/// Parse the frames of an ID3v2 tag
///
/// `content` is everything following the 10 byte header, up to the tag size.
pub(crate) fn parse_id3v2(
	content: &[u8],
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag> {
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	let frames = content
		.get(header.extended_size as usize..)
		.unwrap_or_default();

	// Tag level unsynchronisation covers every frame
	let frames = if header.flags.unsynchronisation {
		resynchronize(frames)
	} else {
		frames.into()
	};

	let mut reader = &*frames;
	let mut tag = Id3v2Tag::default();

	loop {
		match ParsedFrame::read(&mut reader, header.version, parse_options)? {
			ParsedFrame::Next(frame) => tag.frames.push(frame),
			// Dropped, but more frames may follow
			ParsedFrame::Skip => {},
			ParsedFrame::Eof => break,
		}
	}

	log::debug!("Read {} ID3v2 frame(s)", tag.frames.len());
	Ok(tag)
}

#[cfg(test)]
mod tests {
	use super::parse_id3v2;
	use crate::config::{ParseOptions, ParsingMode};
	use crate::id3::v2::header::Id3v2Header;
	use crate::id3::v2::util::synchsafe::SynchsafeInteger;

	fn tag_with_frames(version: u8, frames: &[u8]) -> Vec<u8> {
		let mut tag = vec![b'I', b'D', b'3', version, 0, 0];
		tag.extend_from_slice(&(frames.len() as u32 + 10).synch().unwrap().to_be_bytes());
		tag.extend_from_slice(frames);
		// Padding
		tag.extend_from_slice(&[0; 10]);
		tag
	}

	fn frame(id: &[u8; 4], content: &[u8]) -> Vec<u8> {
		let mut frame = id.to_vec();
		frame.extend_from_slice(&(content.len() as u32).to_be_bytes());
		frame.extend_from_slice(&[0, 0]);
		frame.extend_from_slice(content);
		frame
	}

	fn parse(tag: &[u8], parse_mode: ParsingMode) -> crate::error::Result<super::Id3v2Tag> {
		let header = Id3v2Header::parse(&mut &tag[..]).unwrap();
		parse_id3v2(
			&tag[10..],
			header,
			ParseOptions::new().parsing_mode(parse_mode),
		)
	}

	#[test_log::test]
	fn zero_size_id3v2() {
		let tag = b"ID3\x04\x00\x00\x00\x00\x00\x00";
		let parsed = parse(tag, ParsingMode::Strict).unwrap();
		assert!(parsed.frames.is_empty());
	}

	#[test_log::test]
	fn upgrades_v3_frames() {
		let mut frames = frame(b"TIT2", b"\x00Foo title");
		frames.extend(frame(b"TYER", b"\x001984"));

		let parsed = parse(&tag_with_frames(3, &frames), ParsingMode::Strict).unwrap();
		assert_eq!(parsed.frames.len(), 2);
		assert_eq!(parsed.frames[1].id(), "TDRC");
	}

	#[test_log::test]
	fn bad_frame_id_relaxed_id3v2() {
		let mut frames = frame(b"TIT2", b"\x00Foo title");
		// A frame with a "+" in the ID, which is invalid
		frames.extend(frame(b"T+T2", b"\x00Bad"));
		frames.extend(frame(b"TPE1", b"\x00Bar artist"));

		let tag = tag_with_frames(3, &frames);
		assert!(parse(&tag, ParsingMode::Strict).is_err());

		let parsed = parse(&tag, ParsingMode::Relaxed).unwrap();
		assert_eq!(parsed.frames.len(), 2);
		assert_eq!(parsed.frames[0].id(), "TIT2");
		assert_eq!(parsed.frames[1].id(), "TPE1");
	}

	#[test_log::test]
	fn truncated_frame() {
		let mut frames = frame(b"TIT2", b"\x00Foo title");
		let mut truncated = frame(b"TPE1", b"\x00Bar");
		truncated[4..8].copy_from_slice(&100_u32.to_be_bytes());
		frames.extend(truncated);

		let tag = tag_with_frames(3, &frames);
		assert!(parse(&tag, ParsingMode::Strict).is_err());

		let parsed = parse(&tag, ParsingMode::BestAttempt).unwrap();
		assert_eq!(parsed.frames.len(), 1);
		assert_eq!(parsed.frames[0].id(), "TIT2");
	}
}
