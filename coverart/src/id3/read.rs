use super::header::{Id3v2Header, Id3v2Version};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::synchsafe::SynchsafeInteger as _;
use crate::macros::{decode_err, err};
use crate::picture::Picture;
use crate::util::alloc::fallible_vec_from_element;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt as _};

/// Searches an ID3v2 tag for an `APIC` frame, returning its picture
///
/// The reader must be positioned at the start of the tag (byte 0 of an MP3 file). A stream that
/// does not carry an `ID3` identifier, or whose tag ends before an `APIC` frame is found, yields
/// `Ok(None)`.
///
/// Outside of [`ParsingMode::Strict`], structural damage (a truncated tag, an unwalkable ID3v2.2
/// tag, an invalid frame) also yields `Ok(None)`: the picture is best-effort decoration, and a
/// damaged tag is treated the same as a tag with no picture.
///
/// # Errors
///
/// * Failure to read from `reader` before the tag structure is entered
/// * Under [`ParsingMode::Strict`], any structural damage listed above
pub fn find_apic<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Option<Picture>>
where
	R: Read + Seek,
{
	match find_apic_inner(reader, parse_options) {
		Ok(picture) => Ok(picture),
		Err(err) => {
			if parse_options.parsing_mode == ParsingMode::Strict {
				return Err(err);
			}

			log::warn!("MPEG: Treating embedded art as absent: {err}");
			Ok(None)
		},
	}
}

fn find_apic_inner<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Option<Picture>>
where
	R: Read + Seek,
{
	let tag_start = reader.stream_position()?;

	let Some(header) = Id3v2Header::parse(reader)? else {
		log::debug!("No ID3v2 tag present");
		return Ok(None);
	};

	if header.version == Id3v2Version::V2 {
		decode_err!(@BAIL Mpeg, "ID3v2.2 tags use 3-byte frame IDs and cannot carry an APIC frame");
	}

	if header.flags.unsynchronisation {
		decode_err!(@BAIL Mpeg, "Refusing to walk an unsynchronised tag");
	}

	// Frames end where the declared tag contents end
	let tag_end = tag_start + 10 + u64::from(header.size);

	if header.flags.extended_header {
		let extended_size = reader.read_u32::<BigEndian>()?.unsynch();
		reader.seek(SeekFrom::Current(i64::from(extended_size)))?;
		skip_padding(reader)?;
	}

	log::debug!("Searching for an APIC frame, tag size: {}", header.size);

	let mut frame_id = [0; 4];
	loop {
		let pos = reader.stream_position()?;
		if pos + 10 > tag_end {
			log::debug!("Reached the end of the tag without an APIC frame");
			return Ok(None);
		}

		reader.read_exact(&mut frame_id)?;

		// A NUL ID byte means the remainder of the tag is padding
		if frame_id[0] == 0 {
			log::debug!("Reached tag padding without an APIC frame");
			return Ok(None);
		}

		let frame_size = reader.read_u32::<BigEndian>()?.unsynch();
		reader.seek(SeekFrom::Current(2))?; // Frame flags

		if u64::from(frame_size) > tag_end - reader.stream_position()? {
			err!(SizeMismatch);
		}

		if &frame_id == b"APIC" {
			log::debug!("Found an APIC frame, size: {frame_size}");

			let mut content = fallible_vec_from_element(
				0u8,
				frame_size as usize,
				parse_options.allocation_limit,
			)?;
			reader.read_exact(&mut content)?;

			return Picture::from_apic_bytes(&content, parse_options).map(Some);
		}

		log::trace!(
			"Skipping frame \"{}\", size: {frame_size}",
			frame_id.escape_ascii()
		);
		reader.seek(SeekFrom::Current(i64::from(frame_size)))?;
	}
}

// An extended header may be followed by padding before the first frame
fn skip_padding<R>(reader: &mut R) -> Result<()>
where
	R: Read + Seek,
{
	loop {
		if reader.read_u8()? != 0 {
			reader.seek(SeekFrom::Current(-1))?;
			return Ok(());
		}
	}
}
