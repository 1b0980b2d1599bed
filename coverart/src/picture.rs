//! Format-agnostic picture handling

use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::macros::err;
use crate::util::alloc::fallible_vec_from_element;
use crate::util::text::{TextEncoding, read_terminated};

use std::fmt::{Debug, Display, Formatter};
use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt as _};

/// MIME types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::picture::MimeType;
	///
	/// let jpeg_mimetype_str = "image/jpeg";
	/// assert_eq!(MimeType::from_str(jpeg_mimetype_str), MimeType::Jpeg);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::picture::MimeType;
	///
	/// let jpeg_mimetype = MimeType::Jpeg;
	/// assert_eq!(jpeg_mimetype.as_str(), "image/jpeg")
	/// ```
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	/// Get a `u8` from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}
}

/// Information about a [`Picture`]
///
/// A FLAC `PICTURE` block stores these alongside the image. ID3v2 APIC frames do not carry them,
/// so an MPEG extraction leaves them absent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[non_exhaustive]
pub struct PictureInformation {
	/// The picture's width in pixels
	pub width: u32,
	/// The picture's height in pixels
	pub height: u32,
	/// The picture's color depth in bits per pixel
	pub color_depth: u32,
	/// The number of colors used, for indexed-palette pictures
	pub num_colors: u32,
}

/// Represents an embedded picture
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	pub(crate) pic_type: PictureType,
	pub(crate) mime_type: Option<MimeType>,
	pub(crate) description: Option<String>,
	pub(crate) data: Vec<u8>,
}

impl Debug for Picture {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Picture")
			.field("pic_type", &self.pic_type)
			.field("mime_type", &self.mime_type)
			.field("description", &self.description)
			.field("data", &format!("<{} bytes>", self.data.len()))
			.finish()
	}
}

impl Picture {
	/// Returns the [`PictureType`]
	pub fn pic_type(&self) -> PictureType {
		self.pic_type
	}

	/// Returns the [`MimeType`], if one was declared
	pub fn mime_type(&self) -> Option<&MimeType> {
		self.mime_type.as_ref()
	}

	/// Returns the description, if the stream carried a decodable one
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Returns the image bytes
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes the `Picture`, returning the image bytes without a clone
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}

	/// Get a [`Picture`] from ID3v2 APIC frame content
	///
	/// NOTE: This expects *only* the frame content, the 10-byte frame header must already have
	/// been consumed.
	///
	/// # Errors
	///
	/// * There isn't enough data present
	/// * The encoding byte or a terminated string is invalid
	pub fn from_apic_bytes(bytes: &[u8], parse_options: ParseOptions) -> Result<Self> {
		let mut reader = bytes;

		let Some(encoding) = TextEncoding::from_u8(reader.read_u8()?) else {
			err!(NotAPicture);
		};

		let mime_bytes = read_terminated(&mut reader, TextEncoding::Latin1)?;
		let mime_type = if mime_bytes.is_empty() {
			None
		} else {
			Some(MimeType::from_str(std::str::from_utf8(&mime_bytes)?))
		};

		let pic_type = PictureType::from_u8(reader.read_u8()?);

		let description_bytes = read_terminated(&mut reader, encoding)?;
		let description = decode_description(&description_bytes, parse_options.parsing_mode)?;

		// Everything up to the declared frame end is the image
		if reader.is_empty() {
			err!(NotAPicture);
		}
		let data = reader.to_vec();

		Ok(Self {
			pic_type,
			mime_type,
			description,
			data,
		})
	}

	/// Get a [`Picture`] from FLAC `PICTURE` block content
	///
	/// NOTE: This expects *only* the block content, the 4-byte block header must already have
	/// been consumed.
	///
	/// # Errors
	///
	/// This function will return [`NotAPicture`][crate::error::ErrorKind::NotAPicture] if at any
	/// point it's unable to parse the data, and
	/// [`SizeMismatch`][crate::error::ErrorKind::SizeMismatch] if a length field runs past the
	/// block end.
	pub fn from_flac_bytes(
		content: &[u8],
		parse_options: ParseOptions,
	) -> Result<(Self, PictureInformation)> {
		let mut size = content.len();
		let mut reader = Cursor::new(content);

		// The 8 fixed u32 fields alone take 32 bytes
		if size < 32 {
			err!(NotAPicture);
		}

		let pic_ty = reader.read_u32::<BigEndian>()?;
		size -= 4;

		// ID3v2 APIC uses a single byte for picture type.
		// Anything greater than that is probably invalid, so
		// we just stop early
		if pic_ty > 255 && parse_options.parsing_mode == ParsingMode::Strict {
			err!(NotAPicture);
		}

		let mime_len = reader.read_u32::<BigEndian>()? as usize;
		size -= 4;

		if mime_len > size {
			err!(SizeMismatch);
		}

		let mime_type_str = std::str::from_utf8(&content[8..8 + mime_len])?;
		size -= mime_len;

		reader.seek(SeekFrom::Current(mime_len as i64))?;

		let desc_len = reader.read_u32::<BigEndian>()? as usize;
		size -= 4;

		let mut description = None;
		if desc_len > 0 && desc_len < size {
			let pos = 12 + mime_len;

			description = decode_description(
				&content[pos..pos + desc_len],
				parse_options.parsing_mode,
			)?;

			size -= desc_len;
			reader.seek(SeekFrom::Current(desc_len as i64))?;
		}

		let width = reader.read_u32::<BigEndian>()?;
		let height = reader.read_u32::<BigEndian>()?;
		let color_depth = reader.read_u32::<BigEndian>()?;
		let num_colors = reader.read_u32::<BigEndian>()?;
		let data_len = reader.read_u32::<BigEndian>()? as usize;
		size -= 20;

		if data_len > size {
			err!(SizeMismatch);
		}

		let mut data =
			fallible_vec_from_element(0u8, data_len, parse_options.allocation_limit)?;
		reader.read_exact(&mut data)?;

		let mime_type;
		if mime_type_str.is_empty() {
			mime_type = None;
		} else {
			mime_type = Some(MimeType::from_str(mime_type_str));
		}

		Ok((
			Self {
				pic_type: PictureType::from_u8(pic_ty as u8),
				mime_type,
				description,
				data,
			},
			PictureInformation {
				width,
				height,
				color_depth,
				num_colors,
			},
		))
	}
}

// A description is decoration. Outside of Strict mode an undecodable one is dropped rather than
// discarding the picture with it.
fn decode_description(bytes: &[u8], parsing_mode: ParsingMode) -> Result<Option<String>> {
	if bytes.is_empty() {
		return Ok(None);
	}

	match std::str::from_utf8(bytes) {
		Ok(description) => Ok(Some(description.to_owned())),
		Err(err) if parsing_mode == ParsingMode::Strict => Err(err.into()),
		Err(_) => {
			log::warn!("Discarding a picture description that is not valid UTF-8");
			Ok(None)
		},
	}
}

#[cfg(test)]
mod tests {
	use super::{MimeType, Picture, PictureType};
	use crate::config::{ParseOptions, ParsingMode};

	fn apic_content(description: &[u8]) -> Vec<u8> {
		let mut content = vec![0x00]; // Latin-1
		content.extend(b"image/png\0");
		content.push(3); // CoverFront
		content.extend(description);
		content.push(0);
		content.extend([0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
		content
	}

	#[test_log::test]
	fn apic_content_decomposes() {
		let picture =
			Picture::from_apic_bytes(&apic_content(b"Front cover"), ParseOptions::new()).unwrap();

		assert_eq!(picture.pic_type(), PictureType::CoverFront);
		assert_eq!(picture.mime_type(), Some(&MimeType::Png));
		assert_eq!(picture.description(), Some("Front cover"));
		assert_eq!(picture.data(), [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
	}

	#[test_log::test]
	fn apic_empty_description() {
		let picture = Picture::from_apic_bytes(&apic_content(b""), ParseOptions::new()).unwrap();
		assert_eq!(picture.description(), None);
	}

	#[test_log::test]
	fn apic_bad_encoding_byte() {
		let mut content = apic_content(b"");
		content[0] = 0x0C;
		assert!(Picture::from_apic_bytes(&content, ParseOptions::new()).is_err());
	}

	#[test_log::test]
	fn apic_no_image_bytes() {
		// Encoding, MIME terminator, type, description terminator, nothing else
		let content = [0x00, 0x00, 0x03, 0x00];
		assert!(Picture::from_apic_bytes(&content, ParseOptions::new()).is_err());
	}

	fn flac_picture_content(data: &[u8]) -> Vec<u8> {
		let mut content = Vec::new();
		content.extend(3u32.to_be_bytes());
		content.extend((b"image/jpeg".len() as u32).to_be_bytes());
		content.extend(b"image/jpeg");
		content.extend(4u32.to_be_bytes());
		content.extend(b"back");
		content.extend(640u32.to_be_bytes());
		content.extend(480u32.to_be_bytes());
		content.extend(24u32.to_be_bytes());
		content.extend(0u32.to_be_bytes());
		content.extend((data.len() as u32).to_be_bytes());
		content.extend(data);
		content
	}

	#[test_log::test]
	fn flac_content_decomposes() {
		let (picture, info) =
			Picture::from_flac_bytes(&flac_picture_content(&[0xFF, 0xD8, 0xFF]), ParseOptions::new())
				.unwrap();

		assert_eq!(picture.pic_type(), PictureType::CoverFront);
		assert_eq!(picture.mime_type(), Some(&MimeType::Jpeg));
		assert_eq!(picture.description(), Some("back"));
		assert_eq!(picture.data(), [0xFF, 0xD8, 0xFF]);
		assert_eq!(info.width, 640);
		assert_eq!(info.height, 480);
		assert_eq!(info.color_depth, 24);
		assert_eq!(info.num_colors, 0);
	}

	#[test_log::test]
	fn flac_data_length_is_authoritative() {
		// Declares 3 data bytes but carries 5, only 3 must be returned
		let mut content = flac_picture_content(&[0xFF, 0xD8, 0xFF]);
		content.extend([0xAA, 0xBB]);

		let (picture, _) = Picture::from_flac_bytes(&content, ParseOptions::new()).unwrap();
		assert_eq!(picture.data().len(), 3);
	}

	#[test_log::test]
	fn flac_mime_length_past_block_end() {
		let mut content = flac_picture_content(&[0xFF, 0xD8, 0xFF]);
		// Corrupt the MIME length field
		content[4..8].copy_from_slice(&u32::MAX.to_be_bytes());
		assert!(Picture::from_flac_bytes(&content, ParseOptions::new()).is_err());
	}

	#[test_log::test]
	fn flac_data_over_allocation_limit() {
		let content = flac_picture_content(&[0u8; 64]);
		let options = ParseOptions::new().allocation_limit(32);
		assert!(Picture::from_flac_bytes(&content, options).is_err());
	}

	#[test_log::test]
	fn flac_picture_type_out_of_range_strict() {
		let mut content = flac_picture_content(&[0xFF, 0xD8, 0xFF]);
		content[0..4].copy_from_slice(&1000u32.to_be_bytes());

		let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
		assert!(Picture::from_flac_bytes(&content, strict).is_err());
		assert!(Picture::from_flac_bytes(&content, ParseOptions::new()).is_ok());
	}
}
