use crate::error::Result;
use crate::id3::synchsafe::SynchsafeInteger as _;
use crate::macros::decode_err;

use std::io::Read;

use byteorder::{BigEndian, ByteOrder as _};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(crate) enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

/// Flags that apply to the entire tag
///
/// Only the flags that change how the frame walk behaves are kept, the experimental and footer
/// bits do not affect it.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised
	pub(crate) unsynchronisation: bool,
	/// Whether or not an extended header follows the tag header
	pub(crate) extended_header: bool,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub(crate) version: Id3v2Version,
	pub(crate) flags: Id3v2TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE 10 HEADER BYTES**)
	pub(crate) size: u32,
}

impl Id3v2Header {
	/// Parse the 10-byte tag header the reader is positioned on
	///
	/// A stream that does not start with the `ID3` identifier is a normal negative result,
	/// not an error.
	pub(crate) fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; 10];
		reader.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			return Ok(None);
		}

		// Version is stored as [major, minor], minor revisions don't affect the layout
		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			_ => return Err(decode_err!(Mpeg, "Found an invalid ID3v2 version")),
		};

		let flags = header[5];
		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: flags & 0x40 == 0x40,
		};

		let size = BigEndian::read_u32(&header[6..]).unsynch();

		Ok(Some(Self {
			version,
			flags: flags_parsed,
			size,
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::{Id3v2Header, Id3v2Version};

	#[test_log::test]
	fn header_decodes() {
		// v2.4, extended header flag, synchsafe size 0x0201
		let bytes = [b'I', b'D', b'3', 4, 0, 0x40, 0, 0, 0x04, 0x01];
		let header = Id3v2Header::parse(&mut &bytes[..]).unwrap().unwrap();

		assert_eq!(header.version, Id3v2Version::V4);
		assert!(header.flags.extended_header);
		assert!(!header.flags.unsynchronisation);
		assert_eq!(header.size, 0x0201);
	}

	#[test_log::test]
	fn missing_magic_is_negative() {
		let bytes = [0u8; 10];
		assert!(Id3v2Header::parse(&mut &bytes[..]).unwrap().is_none());
	}

	#[test_log::test]
	fn bad_version_is_an_error() {
		let bytes = [b'I', b'D', b'3', 9, 0, 0, 0, 0, 0, 0];
		assert!(Id3v2Header::parse(&mut &bytes[..]).is_err());
	}
}
