// These define the accessor families of `TagFile`
//
// Usage:
//
// scalar_accessors! {
//     [field_name] => "KEY",
// }
//
// property_accessors! {
//     [field name] => "KEY",
// }
//
// * `field_name` is the name of the getter. If a name consists of multiple segments,
// such as `album_artist`, they should be separated by spaces like so: [album artist].
//
// * `KEY` is the property key the field is stored under.
//
// Each entry generates a getter, `set_<field_name>`, and `remove_<field_name>`. Scalar fields are
// written to every tag present in the file, extended properties only to the highest priority one
// that can hold any key. Both create that tag if it is missing.

macro_rules! scalar_accessors {
	($([$($name:tt)+] => $key:literal),+ $(,)?) => {
		impl crate::file::TagFile {
			$(
				scalar_accessors! { @METHODS [$($name)+] $key }
			)+
		}
	};
	(@METHODS [$name:tt $($other:tt)*] $key:literal) => {
		paste::paste! {
			#[doc = "Returns the " $name $(" " $other)* "."]
			///
			/// This is the value of the highest priority tag that defines it.
			pub fn [<$name $(_ $other)*>](&self) -> Option<&str> {
				self.property($key)
			}

			#[doc = "Sets the " $name $(" " $other)* " in every tag present in the file."]
			///
			/// The highest priority tag that can hold any key always receives the full value,
			/// and is created if missing. ID3v1 only keeps a copy. An empty value removes the
			/// field.
			///
			/// # Errors
			///
			/// * The file is invalid
			pub fn [<set_ $name $(_ $other)*>](&mut self, value: &str) -> crate::error::Result<()> {
				self.set_scalar($key, value)
			}

			#[doc = "Removes the " $name $(" " $other)* " from every tag."]
			///
			/// # Errors
			///
			/// * The file is invalid
			pub fn [<remove_ $name $(_ $other)*>](&mut self) -> crate::error::Result<()> {
				self.remove_property($key)
			}
		}
	};
}

macro_rules! property_accessors {
	($([$($name:tt)+] => $key:literal),+ $(,)?) => {
		impl crate::file::TagFile {
			$(
				property_accessors! { @METHODS [$($name)+] $key }
			)+
		}
	};
	(@METHODS [$name:tt $($other:tt)*] $key:literal) => {
		paste::paste! {
			#[doc = "Returns the " $name $(" " $other)* " (`" $key "`)."]
			pub fn [<$name $(_ $other)*>](&self) -> Option<&str> {
				self.property($key)
			}

			#[doc = "Sets the " $name $(" " $other)* " (`" $key "`)."]
			///
			/// An empty value removes the property.
			///
			/// # Errors
			///
			/// * The file is invalid
			pub fn [<set_ $name $(_ $other)*>](&mut self, value: &str) -> crate::error::Result<()> {
				self.set_property($key, Some(value))
			}

			#[doc = "Removes the " $name $(" " $other)* " (`" $key "`) from every tag."]
			///
			/// # Errors
			///
			/// * The file is invalid
			pub fn [<remove_ $name $(_ $other)*>](&mut self) -> crate::error::Result<()> {
				self.remove_property($key)
			}
		}
	};
}

pub(crate) use {property_accessors, scalar_accessors};
