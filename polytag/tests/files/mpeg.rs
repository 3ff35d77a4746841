use crate::util::{
	apic_frame, ape, contents, id3v1, id3v2, mpeg, mpeg_audio, popm_frame, reopen, temp_file,
	text_frame, user_text_frame,
};

use polytag::config::{ParseOptions, ParsingMode, WriteOptions};
use polytag::error::ErrorKind;
use polytag::file::{FileType, TagFile};
use polytag::picture::Picture;
use polytag::tag::BackendKind;

fn full_test_file() -> Vec<u8> {
	// An MP3 file with an ID3v2, APE, and ID3v1 tag, all disagreeing on the title and artist
	mpeg(
		&id3v2(&[
			text_frame("TIT2", "Foo title"),
			text_frame("TPE1", "Foo artist"),
			text_frame("TMOO", "Calm"),
			user_text_frame("MusicBrainz Album Id", "8c6f5ecd-5b9f-4d51-a7cb-5b1c4c1d6b04"),
			popm_frame("foo@bar.com", 196, 12),
		]),
		&ape(&[
			("Title", "Bar title"),
			("Artist", "Bar artist"),
			("Label", "Bar label"),
		]),
		&id3v1("Baz title", "Baz artist", 5, 17),
	)
}

#[test_log::test]
fn read() {
	let file = temp_file(&full_test_file());
	let tag_file = reopen(&file);

	assert_eq!(tag_file.file_type(), Some(FileType::Mpeg));
	assert_eq!(tag_file.stream_type(), Some("MPEG"));
	assert_eq!(
		tag_file.backends(),
		[BackendKind::Id3v2, BackendKind::Ape, BackendKind::Id3v1]
	);

	// ID3v2 wins every conflict
	assert_eq!(tag_file.title(), Some("Foo title"));
	assert_eq!(tag_file.artist(), Some("Foo artist"));

	// Keys only defined in lower priority tags are still visible
	assert_eq!(tag_file.label(), Some("Bar label"));
	assert_eq!(tag_file.genre(), Some("Rock"));
	assert_eq!(tag_file.track_number(), Some("5"));
	assert_eq!(tag_file.mood(), Some("Calm"));
	assert_eq!(
		tag_file.musicbrainz_album_id(),
		Some("8c6f5ecd-5b9f-4d51-a7cb-5b1c4c1d6b04")
	);

	assert_eq!(tag_file.rating(), 196);
	assert_eq!(tag_file.rating_stars(), 4);
	assert_eq!(tag_file.play_count(), 12);

	let properties = tag_file.audio_properties().unwrap();
	assert_eq!(properties.sample_rate(), 44100);
	assert_eq!(properties.channels(), 2);
	assert_eq!(properties.bitrate(), 128);
}

#[test_log::test]
fn raw_properties_keep_duplicates() {
	let file = temp_file(&full_test_file());
	let tag_file = reopen(&file);

	let titles = tag_file
		.raw_properties()
		.into_iter()
		.filter(|entry| entry.key() == "TITLE")
		.map(|entry| (entry.source(), entry.value().to_owned()))
		.collect::<Vec<_>>();

	assert_eq!(
		titles,
		[
			(BackendKind::Id3v2, String::from("Foo title")),
			(BackendKind::Ape, String::from("Bar title")),
			(BackendKind::Id3v1, String::from("Baz title")),
		]
	);

	// The merged view holds each key once
	assert_eq!(
		tag_file
			.properties()
			.keys()
			.filter(|key| *key == "TITLE")
			.count(),
		1
	);
}

#[test_log::test]
fn scalar_writes_reach_every_tag() {
	let file = temp_file(&full_test_file());

	let mut tag_file = reopen(&file);
	tag_file.set_title("New title").unwrap();
	tag_file.save().unwrap();

	let tag_file = reopen(&file);
	let titles = tag_file
		.raw_properties()
		.into_iter()
		.filter(|entry| entry.key() == "TITLE")
		.map(|entry| entry.value().to_owned())
		.collect::<Vec<_>>();

	assert_eq!(titles, ["New title", "New title", "New title"]);

	// Untouched values survive the rewrite
	assert_eq!(tag_file.artist(), Some("Foo artist"));
	assert_eq!(tag_file.label(), Some("Bar label"));
	assert_eq!(tag_file.play_count(), 12);
}

#[test_log::test]
fn extended_property_goes_to_highest_priority() {
	let file = temp_file(&mpeg(
		&[],
		&ape(&[("Title", "Bar title")]),
		&id3v1("Baz title", "Baz artist", 0, 255),
	));

	let mut tag_file = reopen(&file);
	tag_file.set_property("MOOD", Some("Happy")).unwrap();

	// No new tag is needed, APE can hold any key
	assert_eq!(tag_file.backends(), [BackendKind::Ape, BackendKind::Id3v1]);
	tag_file.save().unwrap();

	let tag_file = reopen(&file);
	let mood = tag_file
		.raw_properties()
		.into_iter()
		.filter(|entry| entry.key() == "MOOD")
		.map(|entry| entry.source())
		.collect::<Vec<_>>();
	assert_eq!(mood, [BackendKind::Ape]);
}

#[test_log::test]
fn new_file_gets_id3v2() {
	let file = temp_file(&mpeg(&[], &[], &[]));

	let mut tag_file = reopen(&file);
	assert!(tag_file.backends().is_empty());
	assert!(tag_file.properties().is_empty());

	tag_file.set_title("Foo title").unwrap();
	tag_file.set_composer("Foo composer").unwrap();
	tag_file.save().unwrap();

	let written = contents(&file);
	assert!(written.starts_with(b"ID3"));
	assert!(written.ends_with(&mpeg_audio(20)));

	let tag_file = reopen(&file);
	assert_eq!(tag_file.backends(), [BackendKind::Id3v2]);
	assert_eq!(tag_file.title(), Some("Foo title"));
	assert_eq!(tag_file.composer(), Some("Foo composer"));
}

#[test_log::test]
fn remove_property_from_one_tag() {
	let file = temp_file(&full_test_file());

	let mut tag_file = reopen(&file);
	assert!(
		tag_file
			.remove_property_from("TITLE", BackendKind::Id3v2)
			.unwrap()
	);
	assert!(
		!tag_file
			.remove_property_from("TITLE", BackendKind::VorbisComments)
			.unwrap()
	);

	// The next tag in line takes over
	assert_eq!(tag_file.title(), Some("Bar title"));
	tag_file.save().unwrap();

	let mut tag_file = reopen(&file);
	let sources = tag_file
		.raw_properties()
		.into_iter()
		.filter(|entry| entry.key() == "TITLE")
		.map(|entry| entry.source())
		.collect::<Vec<_>>();
	assert_eq!(sources, [BackendKind::Ape, BackendKind::Id3v1]);
	assert_eq!(tag_file.title(), Some("Bar title"));

	// Other ID3v2 frames are untouched
	assert_eq!(tag_file.artist(), Some("Foo artist"));

	tag_file.remove_title().unwrap();
	assert_eq!(tag_file.title(), None);
	tag_file.save().unwrap();

	let tag_file = reopen(&file);
	assert!(
		tag_file
			.raw_properties()
			.iter()
			.all(|entry| entry.key() != "TITLE")
	);
}

#[test_log::test]
fn scalar_fields_round_trip() {
	let file = temp_file(&full_test_file());

	let mut tag_file = reopen(&file);
	tag_file.set_title("New title").unwrap();
	tag_file.set_artist("New artist").unwrap();
	tag_file.set_album("New album").unwrap();
	tag_file.set_comment("New comment").unwrap();
	tag_file.set_genre("Jazz").unwrap();
	tag_file.set_date("2024").unwrap();
	tag_file.set_track_number("7").unwrap();
	tag_file.save().unwrap();

	let tag_file = reopen(&file);
	assert_eq!(tag_file.title(), Some("New title"));
	assert_eq!(tag_file.artist(), Some("New artist"));
	assert_eq!(tag_file.album(), Some("New album"));
	assert_eq!(tag_file.comment(), Some("New comment"));
	assert_eq!(tag_file.genre(), Some("Jazz"));
	assert_eq!(tag_file.date(), Some("2024"));
	assert_eq!(tag_file.track_number(), Some("7"));

	// Every tag agrees
	for entry in tag_file.raw_properties() {
		match entry.key() {
			"TITLE" => assert_eq!(entry.value(), "New title"),
			"GENRE" => assert_eq!(entry.value(), "Jazz"),
			"TRACKNUMBER" => assert_eq!(entry.value(), "7"),
			_ => {},
		}
	}
}

#[test_log::test]
fn id3v1_only_file_keeps_full_values() {
	let long_title = "A title that is definitely longer than thirty bytes";
	let file = temp_file(&mpeg(&[], &[], &id3v1("Old title", "Old artist", 1, 17)));

	let mut tag_file = reopen(&file);
	assert_eq!(tag_file.backends(), [BackendKind::Id3v1]);

	tag_file.set_title(long_title).unwrap();
	tag_file.set_genre("Synthwave").unwrap();
	assert_eq!(tag_file.backends(), [BackendKind::Id3v2, BackendKind::Id3v1]);
	assert_eq!(tag_file.genre(), Some("Synthwave"));
	tag_file.save().unwrap();

	let tag_file = reopen(&file);
	assert_eq!(tag_file.backends(), [BackendKind::Id3v2, BackendKind::Id3v1]);
	assert_eq!(tag_file.title(), Some(long_title));
	assert_eq!(tag_file.genre(), Some("Synthwave"));
	assert_eq!(tag_file.artist(), Some("Old artist"));

	// ID3v1 holds what it can
	let id3v1_title = tag_file
		.raw_properties()
		.into_iter()
		.find(|entry| entry.key() == "TITLE" && entry.source() == BackendKind::Id3v1)
		.unwrap();
	assert_eq!(id3v1_title.value(), &long_title[..30]);
	assert!(
		tag_file
			.raw_properties()
			.iter()
			.all(|entry| !(entry.key() == "GENRE" && entry.source() == BackendKind::Id3v1))
	);
}

#[test_log::test]
fn remove_all_tags() {
	let file = temp_file(&full_test_file());

	let mut tag_file = reopen(&file);
	tag_file.remove_all_tags().unwrap();

	assert!(tag_file.backends().is_empty());
	assert_eq!(tag_file.rating(), -1);
	assert_eq!(contents(&file), mpeg_audio(20));

	let tag_file = reopen(&file);
	assert!(tag_file.backends().is_empty());
	assert!(tag_file.raw_properties().is_empty());
}

#[test_log::test]
fn save_without_changes() {
	let original = full_test_file();
	let file = temp_file(&original);

	let mut tag_file = reopen(&file);
	assert!(!tag_file.is_dirty());
	tag_file.save().unwrap();

	assert_eq!(contents(&file), original);
}

#[test_log::test]
fn failed_save_keeps_changes() {
	let original = full_test_file();
	let file = temp_file(&original);

	let mut tag_file = reopen(&file);
	tag_file.set_title("New title").unwrap();

	let mut permissions = std::fs::metadata(file.path()).unwrap().permissions();
	permissions.set_readonly(true);
	std::fs::set_permissions(file.path(), permissions.clone()).unwrap();

	let err = tag_file
		.save_with_options(WriteOptions::new().respect_read_only(true))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::ReadOnly));

	// Nothing was written, and the change is still pending
	assert_eq!(contents(&file), original);
	assert!(tag_file.is_dirty());
	assert_eq!(tag_file.title(), Some("New title"));

	#[allow(clippy::permissions_set_readonly_false)]
	permissions.set_readonly(false);
	std::fs::set_permissions(file.path(), permissions).unwrap();

	tag_file.save().unwrap();
	assert!(!tag_file.is_dirty());
	assert_eq!(reopen(&file).title(), Some("New title"));
}

#[test_log::test]
fn pictures() {
	let file = temp_file(&mpeg(
		&id3v2(&[
			text_frame("TIT2", "Foo title"),
			apic_frame(3, "image/jpeg", "front", &[0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]),
		]),
		&[],
		&[],
	));

	let mut tag_file = reopen(&file);
	assert_eq!(tag_file.picture_count(), 1);

	let front = tag_file.artwork().unwrap();
	assert_eq!(front.pic_type(), "Front Cover");
	assert_eq!(front.mime_type(), "image/jpeg");
	assert_eq!(front.description(), "front");

	tag_file
		.add_picture(Picture::new(vec![1, 2, 3], "image/png", "", "Back Cover"))
		.unwrap();
	assert_eq!(tag_file.remove_pictures_of_type("Front Cover").unwrap(), 1);
	assert_eq!(tag_file.remove_pictures_of_type("Artist").unwrap(), 0);

	let err = tag_file.remove_picture(5).unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::OutOfBounds { index: 5, len: 1 }
	));

	tag_file.save().unwrap();

	let tag_file = reopen(&file);
	assert_eq!(tag_file.picture_count(), 1);
	assert_eq!(tag_file.artwork().unwrap().pic_type(), "Back Cover");
	assert_eq!(tag_file.title(), Some("Foo title"));
}

#[test_log::test]
fn rating_and_play_count() {
	let file = temp_file(&mpeg(&[], &[], &[]));

	let mut tag_file = reopen(&file);
	assert_eq!(tag_file.rating(), -1);

	tag_file.set_rating(128).unwrap();
	tag_file.set_play_count(5).unwrap();
	assert_eq!(tag_file.backends(), [BackendKind::Id3v2]);
	tag_file.save().unwrap();

	let mut tag_file = reopen(&file);
	assert_eq!(tag_file.rating(), 128);
	assert_eq!(tag_file.rating_stars(), 3);
	assert_eq!(tag_file.play_count(), 5);

	tag_file.set_rating(-1).unwrap();
	assert_eq!(tag_file.rating(), -1);
	assert_eq!(tag_file.play_count(), 5);
}

#[test_log::test]
fn rating_bounds_round_trip() {
	let file = temp_file(&mpeg(&[], &[], &[]));

	for (rating, stars) in [(0, 0), (255, 5)] {
		let mut tag_file = reopen(&file);
		tag_file.set_rating(rating).unwrap();
		tag_file.save().unwrap();

		let tag_file = reopen(&file);
		assert_eq!(tag_file.rating(), rating);
		assert_eq!(tag_file.rating_stars(), stars);
	}

	// Out of range values are clamped
	let mut tag_file = reopen(&file);
	tag_file.set_rating(1000).unwrap();
	tag_file.save().unwrap();
	assert_eq!(reopen(&file).rating(), 255);
}

#[test_log::test]
fn junk_before_first_frame() {
	let mut data = vec![0; 100];
	data.extend(mpeg_audio(20));
	let file = temp_file(&data);

	assert!(TagFile::open(file.path()).is_valid());

	let tag_file =
		TagFile::open_with_options(file.path(), ParseOptions::new().max_junk_bytes(32));
	assert!(!tag_file.is_valid());
}

#[test_log::test]
fn strict_mode_rejects_bad_ape_items() {
	let file = temp_file(&mpeg(
		&[],
		&ape(&[("ID3", "Illegal"), ("Title", "Bar title")]),
		&[],
	));

	let strict = TagFile::open_with_options(
		file.path(),
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	);
	assert!(!strict.is_valid());

	let relaxed = TagFile::open_with_options(
		file.path(),
		ParseOptions::new().parsing_mode(ParsingMode::Relaxed),
	);
	assert!(relaxed.is_valid());
	assert_eq!(relaxed.title(), Some("Bar title"));
}
