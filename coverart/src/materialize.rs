//! Temporary materialization of extracted pictures
//!
//! Bitmap loaders (GdkPixbuf and friends) want a path, not a byte slice. [`MaterializedPicture`]
//! parks the extracted bytes in an exclusive temporary file for exactly as long as the handle
//! lives.

use crate::error::Result;
use crate::picture::Picture;

use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

/// A picture written out to a temporary file
///
/// The file is created exclusively for this handle and is fully flushed before the handle is
/// returned, so the path can be handed straight to an external bitmap loader. Dropping the handle
/// removes the file, on every exit path, including a failed load.
///
/// # Examples
///
/// ```rust,no_run
/// use coverart::config::ParseOptions;
///
/// # fn main() -> coverart::error::Result<()> {
/// let Some(picture) = coverart::extract_from_path("foo.mp3", ParseOptions::new())? else {
/// 	return Ok(());
/// };
///
/// let materialized = picture.materialize()?;
/// let _pixbuf = load_bitmap(materialized.path());
/// // `materialized` goes out of scope here and the file is removed
/// # fn load_bitmap(_: &std::path::Path) {}
/// # Ok(()) }
/// ```
pub struct MaterializedPicture {
	file: NamedTempFile,
}

impl MaterializedPicture {
	/// The path of the temporary file
	///
	/// Only valid for the lifetime of the handle.
	pub fn path(&self) -> &Path {
		self.file.path()
	}
}

impl AsRef<Path> for MaterializedPicture {
	fn as_ref(&self) -> &Path {
		self.path()
	}
}

impl Picture {
	/// Writes the picture to a new temporary file
	///
	/// See [`MaterializedPicture`] for the lifetime guarantees.
	///
	/// # Errors
	///
	/// * Failure to create the temporary file
	/// * Failure to write or flush the picture bytes
	pub fn materialize(&self) -> Result<MaterializedPicture> {
		let mut file = NamedTempFile::new()?;

		file.write_all(&self.data)?;
		file.flush()?;

		log::trace!(
			"Materialized {} picture bytes to {}",
			self.data.len(),
			file.path().display()
		);

		Ok(MaterializedPicture { file })
	}
}
