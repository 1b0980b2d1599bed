use crate::error::Result;
use crate::util::alloc::fallible_vec_from_element;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt as _};

pub(in crate::flac) const BLOCK_ID_STREAMINFO: u8 = 0;
pub(in crate::flac) const BLOCK_ID_PICTURE: u8 = 6;

/// A metadata block: 1 header byte (bit 7 = last, bits 0-6 = type), a 24-bit big-endian length,
/// then that many content bytes.
pub(crate) struct Block {
	pub(super) ty: u8,
	pub(super) last: bool,
	pub(crate) content: Vec<u8>,
	pub(super) start: u64,
	pub(super) end: u64,
}

impl Block {
	/// Read one block, retaining its content only when `predicate` accepts the block type
	pub(crate) fn read<R, P>(data: &mut R, allocation_limit: usize, mut predicate: P) -> Result<Self>
	where
		R: Read + Seek,
		P: FnMut(u8) -> bool,
	{
		let start = data.stream_position()?;

		let byte = data.read_u8()?;
		let last = (byte & 0x80) != 0;
		let ty = byte & 0x7F;

		let size = data.read_u24::<BigEndian>()?;
		log::trace!("Reading FLAC block, type: {ty}, size: {size}");

		let mut content;
		if predicate(ty) {
			content = fallible_vec_from_element(0, size as usize, allocation_limit)?;
			data.read_exact(&mut content)?;
		} else {
			content = Vec::new();
			data.seek(SeekFrom::Current(i64::from(size)))?;
		}

		let end = data.stream_position()?;

		Ok(Self {
			ty,
			last,
			content,
			start,
			end,
		})
	}
}
