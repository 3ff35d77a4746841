use crate::ape::constants::is_valid_key;
use crate::error::{PolytagError, Result};
use crate::tag::BackendKind;

/// The value of an [`ApeItem`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApeItemValue {
	/// UTF-8 text, multiple values are separated by a null byte
	Text(String),
	/// Arbitrary binary data, such as cover art
	Binary(Vec<u8>),
	/// A UTF-8 link to an external resource
	Locator(String),
}

impl ApeItemValue {
	/// The item type, stored in bits 1 and 2 of the item flags
	pub(crate) fn type_flag(&self) -> u32 {
		match self {
			ApeItemValue::Text(_) => 0,
			ApeItemValue::Binary(_) => 1,
			ApeItemValue::Locator(_) => 2,
		}
	}

	pub(crate) fn as_bytes(&self) -> &[u8] {
		match self {
			ApeItemValue::Text(text) | ApeItemValue::Locator(text) => text.as_bytes(),
			ApeItemValue::Binary(binary) => binary,
		}
	}
}

/// Represents an `APE` tag item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApeItem {
	/// Whether or not to mark the item as read only
	pub read_only: bool,
	pub(crate) key: String,
	pub(crate) value: ApeItemValue,
}

impl ApeItem {
	/// Create an [`ApeItem`]
	///
	/// # Errors
	///
	/// * `key` is illegal ("ID3", "TAG", "OGGS", "MP+")
	/// * `key` has a bad length (must be 2 to 255, inclusive)
	/// * `key` contains invalid characters (must be in the printable ASCII range)
	///
	/// # Examples
	///
	/// ```rust
	/// use polytag::ape::{ApeItem, ApeItemValue};
	///
	/// let item = ApeItem::new(String::from("Artist"), ApeItemValue::Text(String::from("Foo")));
	/// assert!(item.is_ok());
	///
	/// let item = ApeItem::new(String::from("TAG"), ApeItemValue::Text(String::from("Foo")));
	/// assert!(item.is_err());
	/// ```
	pub fn new(key: String, value: ApeItemValue) -> Result<Self> {
		if !is_valid_key(&key) {
			return Err(PolytagError::backend_encode(
				BackendKind::Ape,
				format!("Invalid item key \"{key}\""),
			));
		}

		Ok(Self {
			read_only: false,
			key,
			value,
		})
	}

	/// Returns the item key
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the item value
	pub fn value(&self) -> &ApeItemValue {
		&self.value
	}
}
