use crate::util::{
	BLOCK_PADDING, BLOCK_PICTURE, BLOCK_VORBIS_COMMENT, contents, flac, flac_frames_start,
	flac_picture, reopen, temp_file, vorbis_comments,
};

use polytag::config::{ParseOptions, ParsingMode};
use polytag::error::ErrorKind;
use polytag::file::{FileType, TagFile};
use polytag::picture::Picture;
use polytag::tag::BackendKind;

use std::time::Duration;

const PNG: [u8; 12] = [
	0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
];

fn tagged_file() -> Vec<u8> {
	flac(&[
		(
			BLOCK_VORBIS_COMMENT,
			vorbis_comments(
				"reference libFLAC 1.4.3 20230623",
				&[
					("TITLE", "Foo title"),
					("ARTIST", "Bar artist"),
					("ARTIST", "Baz artist"),
					("BPM", "98"),
					("PERFORMER:PIANO", "Qux"),
				],
			),
		),
		(BLOCK_PICTURE, flac_picture(3, "image/png", "cover", &PNG)),
		(BLOCK_PADDING, vec![0; 512]),
	])
}

#[test_log::test]
fn read() {
	let file = temp_file(&tagged_file());
	let tag_file = reopen(&file);

	assert_eq!(tag_file.file_type(), Some(FileType::Flac));
	assert_eq!(tag_file.stream_type(), Some("FLAC"));
	assert_eq!(tag_file.backends(), [BackendKind::VorbisComments]);

	assert_eq!(tag_file.title(), Some("Foo title"));
	assert_eq!(
		tag_file.property_values("ARTIST"),
		Some(&[String::from("Bar artist"), String::from("Baz artist")][..])
	);
	assert_eq!(tag_file.bpm(), Some(98));
	assert_eq!(tag_file.performer("piano"), Some("Qux"));
	assert_eq!(tag_file.performers(), [("PIANO", "Qux")]);

	let picture = tag_file.artwork().unwrap();
	assert_eq!(picture.pic_type(), "Front Cover");
	assert_eq!(picture.mime_type(), "image/png");
	assert_eq!(picture.description(), "cover");
	assert_eq!(picture.data(), &PNG);

	let properties = tag_file.audio_properties().unwrap();
	assert_eq!(properties.duration(), Duration::from_secs(10));
	assert_eq!(properties.formatted_duration(), "0:10");
	assert_eq!(properties.sample_rate(), 44100);
	assert_eq!(properties.channels(), 2);
}

#[test_log::test]
fn write_keeps_audio() {
	let original = tagged_file();
	let frames = original[flac_frames_start(&original)..].to_vec();
	let file = temp_file(&original);

	let mut tag_file = reopen(&file);
	tag_file.set_title("New title").unwrap();
	tag_file.set_album("New album").unwrap();
	tag_file.save().unwrap();

	let written = contents(&file);
	assert!(written.starts_with(b"fLaC"));
	assert_eq!(&written[flac_frames_start(&written)..], &frames[..]);

	let tag_file = reopen(&file);
	assert_eq!(tag_file.title(), Some("New title"));
	assert_eq!(tag_file.album(), Some("New album"));
	assert_eq!(tag_file.property_values("ARTIST").map(<[String]>::len), Some(2));

	// Pictures are untouched unless changed
	assert_eq!(tag_file.picture_count(), 1);
}

#[test_log::test]
fn small_changes_reuse_padding() {
	let original = tagged_file();
	let file = temp_file(&original);

	let mut tag_file = reopen(&file);
	tag_file.set_property("MOOD", Some("Calm")).unwrap();
	tag_file.save().unwrap();

	// The comment grew, the padding shrank
	assert_eq!(contents(&file).len(), original.len());
	assert_eq!(reopen(&file).mood(), Some("Calm"));
}

#[test_log::test]
fn pictures() {
	let file = temp_file(&flac(&[]));

	let mut tag_file = reopen(&file);
	assert_eq!(tag_file.picture_count(), 0);
	assert!(tag_file.backends().is_empty());

	tag_file
		.set_artwork(Picture::new(PNG.to_vec(), "", "", "Front Cover"))
		.unwrap();
	tag_file
		.add_picture(Picture::new(vec![1, 2, 3], "image/jpeg", "back", "Back Cover"))
		.unwrap();
	tag_file.save().unwrap();

	let mut tag_file = reopen(&file);
	assert_eq!(tag_file.backends(), [BackendKind::VorbisComments]);
	assert_eq!(tag_file.picture_count(), 2);
	assert_eq!(tag_file.picture(0).unwrap().mime_type(), "image/png");
	assert_eq!(tag_file.picture(1).unwrap().description(), "back");

	let old = tag_file
		.replace_picture(1, Picture::new(vec![4, 5, 6], "image/jpeg", "", "Artist"))
		.unwrap();
	assert_eq!(old.pic_type(), "Back Cover");

	tag_file.remove_picture(0).unwrap();
	tag_file.save().unwrap();

	let mut tag_file = reopen(&file);
	assert_eq!(tag_file.picture_count(), 1);
	assert_eq!(tag_file.artwork().unwrap().pic_type(), "Artist");

	// No pictures and no comments left, the comment block goes away
	tag_file.remove_all_pictures().unwrap();
	tag_file.save().unwrap();
	assert!(reopen(&file).backends().is_empty());
}

#[test_log::test]
fn rating_is_ignored() {
	let file = temp_file(&tagged_file());

	let mut tag_file = reopen(&file);
	tag_file.set_rating(200).unwrap();
	tag_file.set_rating_stars(5).unwrap();
	tag_file.set_play_count(3).unwrap();

	assert_eq!(tag_file.rating(), -1);
	assert_eq!(tag_file.play_count(), 0);
	assert!(!tag_file.has_backend(BackendKind::Id3v2));
	assert!(!tag_file.is_dirty());
}

#[test_log::test]
fn failed_encode_keeps_changes() {
	let original = tagged_file();
	let file = temp_file(&original);

	let mut tag_file = reopen(&file);
	tag_file.set_title("New title").unwrap();
	// Accepted now, but '=' can't be written in a field name
	tag_file.set_property("BAD=KEY", Some("x")).unwrap();

	let err = tag_file.save().unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::BackendEncode(_)));

	assert_eq!(contents(&file), original);
	assert!(tag_file.is_dirty());
	assert_eq!(tag_file.title(), Some("New title"));
	assert_eq!(tag_file.property("BAD=KEY"), Some("x"));

	tag_file.remove_property("BAD=KEY").unwrap();
	tag_file.save().unwrap();
	assert_eq!(reopen(&file).title(), Some("New title"));
}

#[test_log::test]
fn remove_all_tags() {
	let original = tagged_file();
	let frames = original[flac_frames_start(&original)..].to_vec();
	let file = temp_file(&original);

	let mut tag_file = reopen(&file);
	tag_file.remove_all_tags().unwrap();
	assert!(tag_file.backends().is_empty());
	assert_eq!(tag_file.picture_count(), 0);

	let written = contents(&file);
	assert_eq!(&written[flac_frames_start(&written)..], &frames[..]);

	let tag_file = reopen(&file);
	assert!(tag_file.backends().is_empty());
	assert_eq!(tag_file.picture_count(), 0);
	assert_eq!(
		tag_file.audio_properties().unwrap().duration(),
		Duration::from_secs(10)
	);
}

#[test_log::test]
fn multiple_comment_blocks() {
	let file = temp_file(&flac(&[
		(
			BLOCK_VORBIS_COMMENT,
			vorbis_comments("", &[("TITLE", "First")]),
		),
		(
			BLOCK_VORBIS_COMMENT,
			vorbis_comments("", &[("TITLE", "Second")]),
		),
	]));

	assert_eq!(reopen(&file).title(), Some("Second"));

	let strict = TagFile::open_with_options(
		file.path(),
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	);
	assert!(!strict.is_valid());
}

#[test_log::test]
fn not_a_flac_file() {
	let mut data = b"fLaC".to_vec();
	// A truncated STREAMINFO
	data.extend([0x80, 0x00, 0x00, 0x22, 0x10]);
	let file = temp_file(&data);

	let tag_file = TagFile::open(file.path());
	assert!(!tag_file.is_valid());
	assert!(tag_file.open_error().is_some());
	assert!(tag_file.properties().is_empty());
	assert!(tag_file.pictures().is_empty());
}
