//! Format detection from leading magic bytes

/// The file formats an embedded picture can be extracted from
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum FileFormat {
	/// An MPEG audio stream carrying an ID3v2 tag
	Mpeg,
	/// A FLAC stream
	Flac,
}

impl FileFormat {
	/// Attempts to determine a `FileFormat` from a buffer
	///
	/// NOTE: The buffer this takes is only the starting bytes of the stream, 4 bytes are enough.
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::format::FileFormat;
	///
	/// let buf = [b'f', b'L', b'a', b'C'];
	/// assert_eq!(FileFormat::from_buffer(&buf), Some(FileFormat::Flac));
	/// ```
	pub fn from_buffer(buf: &[u8]) -> Option<Self> {
		if buf.starts_with(b"ID3") {
			return Some(Self::Mpeg);
		}

		if buf.starts_with(b"fLaC") {
			return Some(Self::Flac);
		}

		None
	}
}
