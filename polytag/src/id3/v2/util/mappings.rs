/// Text frames that map directly to a property key
pub(crate) const TEXT_FRAME_KEYS: &[(&str, &str)] = &[
	("TIT2", "TITLE"),
	("TPE1", "ARTIST"),
	("TALB", "ALBUM"),
	("TDRC", "DATE"),
	("TRCK", "TRACKNUMBER"),
	("TCON", "GENRE"),
	("TPE2", "ALBUMARTIST"),
	("TCOM", "COMPOSER"),
	("TPOS", "DISCNUMBER"),
	("TBPM", "BPM"),
	("TCOP", "COPYRIGHT"),
	("TENC", "ENCODEDBY"),
	("TEXT", "LYRICIST"),
	("TPE3", "CONDUCTOR"),
	("TPE4", "REMIXER"),
	("TSRC", "ISRC"),
	("TMOO", "MOOD"),
	("TMED", "MEDIA"),
	("TPUB", "LABEL"),
	("TIT1", "CONTENTGROUP"),
	("TIT3", "SUBTITLE"),
	("TSOT", "TITLESORT"),
	("TSOA", "ALBUMSORT"),
	("TSOP", "ARTISTSORT"),
	("TSO2", "ALBUMARTISTSORT"),
	("TSOC", "COMPOSERSORT"),
	("TDOR", "ORIGINALDATE"),
	("TSST", "DISCSUBTITLE"),
	("TCMP", "COMPILATION"),
	("TLAN", "LANGUAGE"),
	("TKEY", "INITIALKEY"),
	("TOPE", "ORIGINALARTIST"),
	("TOAL", "ORIGINALALBUM"),
	("TSSE", "ENCODING"),
	("TDRL", "RELEASEDATE"),
	("TOLY", "ORIGINALLYRICIST"),
	("TOWN", "OWNER"),
	("TLEN", "LENGTH"),
];

/// `TXXX` descriptions with a key that differs from the uppercased description
pub(crate) const TXXX_KEYS: &[(&str, &str)] = &[
	("MusicBrainz Album Id", "MUSICBRAINZ_ALBUMID"),
	("MusicBrainz Artist Id", "MUSICBRAINZ_ARTISTID"),
	("MusicBrainz Album Artist Id", "MUSICBRAINZ_ALBUMARTISTID"),
	("MusicBrainz Release Group Id", "MUSICBRAINZ_RELEASEGROUPID"),
	("MusicBrainz Release Track Id", "MUSICBRAINZ_RELEASETRACKID"),
	("MusicBrainz Work Id", "MUSICBRAINZ_WORKID"),
	("MusicBrainz Album Status", "RELEASESTATUS"),
	("MusicBrainz Album Type", "RELEASETYPE"),
	("MusicBrainz Album Release Country", "RELEASECOUNTRY"),
	("Acoustid Id", "ACOUSTID_ID"),
	("Acoustid Fingerprint", "ACOUSTID_FINGERPRINT"),
	("MusicIP PUID", "MUSICIP_PUID"),
];

/// The owner of a `UFID` frame holding the MusicBrainz recording ID
pub(crate) const MUSICBRAINZ_UFID_OWNER: &str = "http://musicbrainz.org";

pub(crate) fn frame_id_for_key(key: &str) -> Option<&'static str> {
	TEXT_FRAME_KEYS
		.iter()
		.find(|(_, k)| k.eq_ignore_ascii_case(key))
		.map(|(id, _)| *id)
}

pub(crate) fn key_for_frame_id(id: &str) -> Option<&'static str> {
	TEXT_FRAME_KEYS
		.iter()
		.find(|(frame_id, _)| *frame_id == id)
		.map(|(_, key)| *key)
}

pub(crate) fn key_for_txxx(description: &str) -> String {
	TXXX_KEYS
		.iter()
		.find(|(desc, _)| desc.eq_ignore_ascii_case(description))
		.map_or_else(|| description.to_ascii_uppercase(), |(_, key)| (*key).to_owned())
}

pub(crate) fn txxx_for_key(key: &str) -> String {
	TXXX_KEYS
		.iter()
		.find(|(_, k)| k.eq_ignore_ascii_case(key))
		.map_or_else(|| key.to_ascii_uppercase(), |(desc, _)| (*desc).to_owned())
}
