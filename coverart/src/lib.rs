//! Extract the cover art embedded in an audio file, without a full tag parser.
//!
//! Two containers are understood: ID3v2 tags (the `APIC` frame) and FLAC metadata chains (the
//! `PICTURE` block). Everything else in the tag or stream is skipped over, which keeps the walk
//! cheap enough for UI paths that decorate a file listing or a properties page.
//!
//! A file with no recognizable magic, or with no embedded picture before the declared end of its
//! metadata, is `Ok(None)`, absence is an expected outcome, not an error.
//!
//! # Examples
//!
//! ```rust,no_run
//! use coverart::config::ParseOptions;
//!
//! # fn main() -> coverart::error::Result<()> {
//! if let Some(picture) = coverart::extract_from_path("cover.mp3", ParseOptions::new())? {
//! 	println!(
//! 		"{} bytes of {:?}",
//! 		picture.data().len(),
//! 		picture.mime_type()
//! 	);
//!
//! 	// Hand the bytes to a bitmap loader through a scoped temporary file
//! 	let materialized = picture.materialize()?;
//! 	let _path = materialized.path();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! When the container is known, the format modules can be used directly: [`id3::find_apic`] and
//! [`flac::find_picture`] (the latter also returns the stored
//! [`PictureInformation`](picture::PictureInformation)).

pub mod config;
pub mod error;
pub mod flac;
pub mod format;
pub mod id3;
pub(crate) mod macros;
pub mod materialize;
pub mod picture;
mod util;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::format::FileFormat;
use crate::picture::Picture;

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Extracts the first embedded picture from a reader
///
/// The format is guessed from the leading magic bytes, see [`FileFormat::from_buffer`]. The
/// reader must be positioned at the start of the stream; its position after the call is
/// unspecified.
///
/// # Errors
///
/// * Failure to read from `reader`
/// * Under [`ParsingMode::Strict`](config::ParsingMode::Strict), structural damage in the
///   container, see [`id3::find_apic`] and [`flac::find_picture`]
///
/// # Examples
///
/// ```rust
/// use coverart::config::ParseOptions;
/// use std::io::Cursor;
///
/// # fn main() -> coverart::error::Result<()> {
/// let mut reader = Cursor::new(b"not an audio file".to_vec());
///
/// // Unrecognized content is a normal negative result
/// assert!(coverart::extract_from(&mut reader, ParseOptions::new())?.is_none());
/// # Ok(())
/// # }
/// ```
pub fn extract_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Option<Picture>>
where
	R: Read + Seek,
{
	let start = reader.stream_position()?;

	let mut magic = [0; 4];
	let mut filled = 0;
	while filled < magic.len() {
		let read = reader.read(&mut magic[filled..])?;
		if read == 0 {
			break;
		}
		filled += read;
	}

	let Some(format) = FileFormat::from_buffer(&magic[..filled]) else {
		log::debug!("No format could be determined, no art to extract");
		return Ok(None);
	};

	reader.seek(SeekFrom::Start(start))?;

	match format {
		FileFormat::Mpeg => id3::find_apic(reader, parse_options),
		FileFormat::Flac => {
			flac::find_picture(reader, parse_options).map(|art| art.map(|(picture, _)| picture))
		},
	}
}

/// Extracts the first embedded picture from a file path
///
/// See [`extract_from`].
///
/// # Errors
///
/// * `path` does not exist or cannot be opened
/// * See [`extract_from`]
pub fn extract_from_path(path: impl AsRef<Path>, parse_options: ParseOptions) -> Result<Option<Picture>> {
	let mut reader = BufReader::new(File::open(path)?);
	extract_from(&mut reader, parse_options)
}
