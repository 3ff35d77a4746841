//! Builders for the files used in the tests
//!
//! Every file is synthesized in memory and written to a temporary file, so a test can freely
//! modify it.

use polytag::file::TagFile;

use std::io::Write as _;

use tempfile::NamedTempFile;

/// Create a new temporary file holding `content`
pub fn temp_file(content: &[u8]) -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(content).unwrap();
	file.flush().unwrap();

	file
}

/// Open a fresh `TagFile` on `file`, verifying that it is valid
pub fn reopen(file: &NamedTempFile) -> TagFile {
	let tag_file = TagFile::open(file.path());
	assert!(tag_file.is_valid(), "{:?}", tag_file.open_error());

	tag_file
}

/// The current contents of `file`
pub fn contents(file: &NamedTempFile) -> Vec<u8> {
	std::fs::read(file.path()).unwrap()
}

// ID3v2

fn synchsafe(n: u32) -> [u8; 4] {
	[
		((n >> 21) & 0x7F) as u8,
		((n >> 14) & 0x7F) as u8,
		((n >> 7) & 0x7F) as u8,
		(n & 0x7F) as u8,
	]
}

/// An ID3v2.4 frame
pub fn id3v2_frame(id: &str, content: &[u8]) -> Vec<u8> {
	let mut frame = id.as_bytes().to_vec();
	frame.extend(synchsafe(content.len() as u32));
	frame.extend([0, 0]);
	frame.extend(content);
	frame
}

/// A UTF-8 text frame
pub fn text_frame(id: &str, text: &str) -> Vec<u8> {
	let mut content = vec![3];
	content.extend(text.as_bytes());
	id3v2_frame(id, &content)
}

/// A UTF-8 `TXXX` frame
pub fn user_text_frame(description: &str, text: &str) -> Vec<u8> {
	let mut content = vec![3];
	content.extend(description.as_bytes());
	content.push(0);
	content.extend(text.as_bytes());
	id3v2_frame("TXXX", &content)
}

/// A `POPM` frame
pub fn popm_frame(email: &str, rating: u8, counter: u32) -> Vec<u8> {
	let mut content = email.as_bytes().to_vec();
	content.push(0);
	content.push(rating);
	content.extend(counter.to_be_bytes());
	id3v2_frame("POPM", &content)
}

/// An `APIC` frame with a Latin-1 description
pub fn apic_frame(pic_type: u8, mime_type: &str, description: &str, data: &[u8]) -> Vec<u8> {
	let mut content = vec![0];
	content.extend(mime_type.as_bytes());
	content.push(0);
	content.push(pic_type);
	content.extend(description.as_bytes());
	content.push(0);
	content.extend(data);
	id3v2_frame("APIC", &content)
}

/// An ID3v2.4 tag holding `frames`, followed by 16 bytes of padding
pub fn id3v2(frames: &[Vec<u8>]) -> Vec<u8> {
	let body = frames.concat();

	let mut tag = b"ID3\x04\x00\x00".to_vec();
	tag.extend(synchsafe(body.len() as u32 + 16));
	tag.extend(body);
	tag.extend([0; 16]);
	tag
}

// APE

/// An APEv2 tag with a header, holding text items
pub fn ape(items: &[(&str, &str)]) -> Vec<u8> {
	let mut body = Vec::new();
	for (key, value) in items {
		body.extend((value.len() as u32).to_le_bytes());
		body.extend(0_u32.to_le_bytes());
		body.extend(key.as_bytes());
		body.push(0);
		body.extend(value.as_bytes());
	}

	let size = body.len() as u32 + 32;
	let header_or_footer = |flags: u32| {
		let mut bytes = b"APETAGEX".to_vec();
		bytes.extend(2000_u32.to_le_bytes());
		bytes.extend(size.to_le_bytes());
		bytes.extend((items.len() as u32).to_le_bytes());
		bytes.extend(flags.to_le_bytes());
		bytes.extend([0; 8]);
		bytes
	};

	let mut tag = header_or_footer((1 << 31) | (1 << 29));
	tag.extend(body);
	tag.extend(header_or_footer(1 << 31));
	tag
}

// ID3v1

/// An ID3v1.1 tag
pub fn id3v1(title: &str, artist: &str, track: u8, genre: u8) -> Vec<u8> {
	let mut tag = vec![0; 128];
	tag[..3].copy_from_slice(b"TAG");
	tag[3..3 + title.len()].copy_from_slice(title.as_bytes());
	tag[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
	tag[126] = track;
	tag[127] = genre;
	tag
}

// MPEG

/// MPEG-1 Layer 3, 128 kbps, 44.1 kHz, joint stereo, 417 bytes
pub const MPEG_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

/// `count` constant bitrate frames
pub fn mpeg_audio(count: usize) -> Vec<u8> {
	let mut audio = Vec::with_capacity(count * 417);
	for _ in 0..count {
		audio.extend(MPEG_FRAME_HEADER);
		audio.extend([0x55; 413]);
	}

	audio
}

/// An MPEG stream, surrounded by the given tags (any of which may be empty)
pub fn mpeg(id3v2: &[u8], ape: &[u8], id3v1: &[u8]) -> Vec<u8> {
	let mut file = id3v2.to_vec();
	file.extend(mpeg_audio(20));
	file.extend(ape);
	file.extend(id3v1);
	file
}

// FLAC

pub const BLOCK_PADDING: u8 = 1;
pub const BLOCK_VORBIS_COMMENT: u8 = 4;
pub const BLOCK_PICTURE: u8 = 6;

/// The body of a `VORBIS_COMMENT` block
pub fn vorbis_comments(vendor: &str, comments: &[(&str, &str)]) -> Vec<u8> {
	let mut body = (vendor.len() as u32).to_le_bytes().to_vec();
	body.extend(vendor.as_bytes());
	body.extend((comments.len() as u32).to_le_bytes());
	for (key, value) in comments {
		let comment = format!("{key}={value}");
		body.extend((comment.len() as u32).to_le_bytes());
		body.extend(comment.as_bytes());
	}

	body
}

/// The body of a `PICTURE` block
pub fn flac_picture(pic_type: u32, mime_type: &str, description: &str, data: &[u8]) -> Vec<u8> {
	let mut body = pic_type.to_be_bytes().to_vec();
	body.extend((mime_type.len() as u32).to_be_bytes());
	body.extend(mime_type.as_bytes());
	body.extend((description.len() as u32).to_be_bytes());
	body.extend(description.as_bytes());
	// Width, height, color depth, number of colors
	body.extend([0; 16]);
	body.extend((data.len() as u32).to_be_bytes());
	body.extend(data);
	body
}

/// A FLAC stream: 44.1 kHz, stereo, 16 bit, 10 seconds
///
/// `blocks` follow the `STREAMINFO` block, the last block flag is set automatically.
pub fn flac(blocks: &[(u8, Vec<u8>)]) -> Vec<u8> {
	let mut stream_info = vec![0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0];
	let info: u32 = (44100 << 12) | (1 << 9) | (15 << 4);
	stream_info.extend(info.to_be_bytes());
	stream_info.extend(441_000_u32.to_be_bytes());
	stream_info.extend([0; 16]);

	let mut all_blocks = vec![(0, stream_info)];
	all_blocks.extend(blocks.iter().cloned());

	let mut file = b"fLaC".to_vec();
	let count = all_blocks.len();
	for (i, (ty, content)) in all_blocks.into_iter().enumerate() {
		let last = if i + 1 == count { 0x80 } else { 0 };
		file.push(ty | last);
		file.extend(&(content.len() as u32).to_be_bytes()[1..]);
		file.extend(content);
	}

	file.extend([0xFF, 0xF8, 0x69, 0x08]);
	file.extend([0x42; 4000]);
	file
}

/// The offset of the first audio frame in a FLAC stream
pub fn flac_frames_start(data: &[u8]) -> usize {
	data.windows(4)
		.position(|window| window == [0xFF, 0xF8, 0x69, 0x08])
		.unwrap()
}
