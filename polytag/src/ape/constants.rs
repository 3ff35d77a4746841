// https://wiki.hydrogenaud.io/index.php?title=APE_Tags_Header
pub(crate) const APE_PREAMBLE: &[u8; 8] = b"APETAGEX";

/// The size of both the header and the footer
pub(crate) const APE_HEADER_SIZE: usize = 32;

/// The version written, APEv2
pub(crate) const APE_VERSION: u32 = 2000;

pub(crate) const INVALID_KEYS: [&str; 4] = ["ID3", "TAG", "OGGS", "MP+"];

/// Native keys that are stored under a different property key
///
/// Every other key is used as-is, uppercased.
pub(crate) const KEY_RENAMES: [(&str, &str); 5] = [
	("YEAR", "DATE"),
	("TRACK", "TRACKNUMBER"),
	("DISC", "DISCNUMBER"),
	("ALBUM ARTIST", "ALBUMARTIST"),
	("MIXARTIST", "REMIXER"),
];

/// Whether `key` may be used for an APE item
///
/// Keys are 2 to 255 printable ASCII characters, and may not be one of the tag identifiers
/// in [`INVALID_KEYS`].
pub(crate) fn is_valid_key(key: &str) -> bool {
	(2..=255).contains(&key.len())
		&& key.bytes().all(|b| (0x20..=0x7E).contains(&b))
		&& !INVALID_KEYS.contains(&&*key.to_ascii_uppercase())
}
