//! FLAC PICTURE block location
//!
//! Walks the metadata block chain between the `fLaC` marker and the first audio frame. Vorbis
//! comments and the other block types are seeked over, never parsed.

mod block;
mod read;

pub use read::find_picture;
