use super::block::{BLOCK_ID_PICTURE, BLOCK_ID_STREAMINFO, Block};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::macros::decode_err;
use crate::picture::{Picture, PictureInformation};

use std::io::{Read, Seek};

// The STREAMINFO payload is fixed-size, so a conforming stream reaches
// its first walkable block at offset 4 + 4 + 34 = 42
const STREAMINFO_SIZE: u64 = 34;

/// Searches a FLAC stream's metadata chain for a `PICTURE` block, returning its picture
///
/// The reader must be positioned at the start of the stream. A stream that does not carry the
/// `fLaC` marker, or whose last metadata block is reached without a `PICTURE` block, yields
/// `Ok(None)`. The scan stops at the block flagged "last", audio frames are never touched.
///
/// Outside of [`ParsingMode::Strict`], structural damage (a missing STREAMINFO block, a truncated
/// chain, an invalid picture block) also yields `Ok(None)`.
///
/// # Errors
///
/// * Failure to read from `reader` before the metadata chain is entered
/// * Under [`ParsingMode::Strict`], any structural damage listed above
pub fn find_picture<R>(
	reader: &mut R,
	parse_options: ParseOptions,
) -> Result<Option<(Picture, PictureInformation)>>
where
	R: Read + Seek,
{
	match find_picture_inner(reader, parse_options) {
		Ok(picture) => Ok(picture),
		Err(err) => {
			if parse_options.parsing_mode == ParsingMode::Strict {
				return Err(err);
			}

			log::warn!("FLAC: Treating embedded art as absent: {err}");
			Ok(None)
		},
	}
}

fn find_picture_inner<R>(
	reader: &mut R,
	parse_options: ParseOptions,
) -> Result<Option<(Picture, PictureInformation)>>
where
	R: Read + Seek,
{
	let Some(stream_info) = verify_flac(reader, parse_options)? else {
		return Ok(None);
	};

	let mut last_block = stream_info.last;
	while !last_block {
		let block = Block::read(reader, parse_options.allocation_limit, |ty| {
			ty == BLOCK_ID_PICTURE
		})?;
		last_block = block.last;

		if block.ty == BLOCK_ID_PICTURE {
			log::debug!("Encountered a FLAC picture block, parsing");
			return Picture::from_flac_bytes(&block.content, parse_options).map(Some);
		}
	}

	log::debug!("Reached the last metadata block without a PICTURE block");
	Ok(None)
}

pub(super) fn verify_flac<R>(
	reader: &mut R,
	parse_options: ParseOptions,
) -> Result<Option<Block>>
where
	R: Read + Seek,
{
	let mut marker = [0; 4];
	reader.read_exact(&mut marker)?;

	if &marker != b"fLaC" {
		log::debug!("File is missing the \"fLaC\" stream marker");
		return Ok(None);
	}

	let block = Block::read(reader, parse_options.allocation_limit, |_| false)?;

	if block.ty != BLOCK_ID_STREAMINFO {
		decode_err!(@BAIL Flac, "File missing mandatory STREAMINFO block");
	}

	if block.end - block.start - 4 < STREAMINFO_SIZE {
		decode_err!(@BAIL Flac, "File has an invalid STREAMINFO block size");
	}

	log::debug!("File verified to be FLAC");
	Ok(Some(block))
}
