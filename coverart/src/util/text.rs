use crate::error::Result;

use std::io::Read;

use byteorder::ReadBytesExt as _;

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub(crate) enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub(crate) fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}
}

/// Reads up to and past the encoding's NUL terminator, returning the bytes before it.
///
/// UTF-16 strings are terminated by an aligned NUL pair, everything else by a single NUL.
pub(crate) fn read_terminated<R>(reader: &mut R, encoding: TextEncoding) -> Result<Vec<u8>>
where
	R: Read,
{
	let mut bytes = Vec::new();

	match encoding {
		TextEncoding::UTF16 | TextEncoding::UTF16BE => loop {
			let pair = [reader.read_u8()?, reader.read_u8()?];
			if pair == [0, 0] {
				break;
			}
			bytes.extend(pair);
		},
		_ => loop {
			let byte = reader.read_u8()?;
			if byte == 0 {
				break;
			}
			bytes.push(byte);
		},
	}

	Ok(bytes)
}

#[cfg(test)]
mod tests {
	use super::{TextEncoding, read_terminated};

	#[test_log::test]
	fn terminated_single_byte() {
		let mut reader = &b"image/jpeg\0rest"[..];
		let text = read_terminated(&mut reader, TextEncoding::Latin1).unwrap();
		assert_eq!(text, b"image/jpeg");
		assert_eq!(reader, b"rest");
	}

	#[test_log::test]
	fn terminated_utf16_pair() {
		// "a" in UTF-16 LE with a BOM, then an aligned NUL pair
		let mut reader = &[0xFF, 0xFE, 0x61, 0x00, 0x00, 0x00, 0xAB][..];
		let text = read_terminated(&mut reader, TextEncoding::UTF16).unwrap();
		assert_eq!(text, [0xFF, 0xFE, 0x61, 0x00]);
		assert_eq!(reader, [0xAB]);
	}

	#[test_log::test]
	fn terminated_missing_terminator() {
		let mut reader = &b"no terminator"[..];
		assert!(read_terminated(&mut reader, TextEncoding::Latin1).is_err());
	}
}
