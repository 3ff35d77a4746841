//! Ownership of the file backing a [`TagFile`](crate::file::TagFile)

use crate::config::WriteOptions;
use crate::error::Result;
use crate::macros::err;

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// An open file, bound to exactly one `TagFile`
///
/// The descriptor is closed when the handle is dropped, on every path out of an open or save.
#[derive(Debug)]
pub(crate) struct FileHandle {
	path: PathBuf,
	file: File,
}

impl FileHandle {
	pub(crate) fn open(path: &Path) -> Result<Self> {
		log::debug!("Opening `{}`", path.display());

		let file = File::open(path)?;
		Ok(Self {
			path: path.to_path_buf(),
			file,
		})
	}

	/// Read the entire file from the start
	pub(crate) fn read_all(&mut self) -> Result<Vec<u8>> {
		self.file.rewind()?;

		let mut contents = Vec::new();
		self.file.read_to_end(&mut contents)?;
		Ok(contents)
	}

	/// Replace the contents of the file in a single step
	///
	/// The new contents are written to a temporary file in the same directory, which is then
	/// renamed over the original. If anything fails before the rename, the original file is
	/// untouched.
	pub(crate) fn replace_contents(
		&mut self,
		contents: &[u8],
		write_options: WriteOptions,
	) -> Result<()> {
		let metadata = std::fs::metadata(&self.path)?;
		let permissions = metadata.permissions();
		if write_options.respect_read_only && permissions.readonly() {
			err!(ReadOnly);
		}

		let dir = match self.path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};

		let mut temp = NamedTempFile::new_in(dir)?;
		temp.write_all(contents)?;
		temp.flush()?;
		temp.as_file().sync_all()?;
		temp.as_file().set_permissions(permissions)?;

		log::debug!(
			"Replacing `{}` ({} bytes)",
			self.path.display(),
			contents.len()
		);

		self.file = temp.persist(&self.path)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::FileHandle;
	use crate::config::WriteOptions;

	use std::io::Write;

	#[test_log::test]
	fn replace_contents() {
		let mut temp = tempfile::NamedTempFile::new().unwrap();
		temp.write_all(b"original").unwrap();

		let mut handle = FileHandle::open(temp.path()).unwrap();
		assert_eq!(handle.read_all().unwrap(), b"original");

		handle
			.replace_contents(b"replaced contents", WriteOptions::default())
			.unwrap();
		assert_eq!(handle.read_all().unwrap(), b"replaced contents");
		assert_eq!(std::fs::read(temp.path()).unwrap(), b"replaced contents");
	}

	#[test_log::test]
	fn read_only_is_respected() {
		let mut temp = tempfile::NamedTempFile::new().unwrap();
		temp.write_all(b"original").unwrap();

		let mut permissions = temp.as_file().metadata().unwrap().permissions();
		permissions.set_readonly(true);
		std::fs::set_permissions(temp.path(), permissions).unwrap();

		let mut handle = FileHandle::open(temp.path()).unwrap();
		assert!(
			handle
				.replace_contents(b"new", WriteOptions::default())
				.is_err()
		);
		assert_eq!(std::fs::read(temp.path()).unwrap(), b"original");

		let mut permissions = std::fs::metadata(temp.path()).unwrap().permissions();
		#[allow(clippy::permissions_set_readonly_false)]
		permissions.set_readonly(false);
		std::fs::set_permissions(temp.path(), permissions).unwrap();
	}
}
