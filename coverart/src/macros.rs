// Shorthand for return Err(CoverArtError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(CoverArtError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(CoverArtError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::CoverArtError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::CoverArtError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for FileDecodingError::new(FileFormat::Foo, "Message")
//
// Usage:
//
// - decode_err!(Variant, Message)
// - decode_err!(Message)
//
// or bail:
//
// - decode_err!(@BAIL Variant, Message)
// - decode_err!(@BAIL Message)
macro_rules! decode_err {
	($file_fmt:ident, $reason:literal) => {
		Into::<crate::error::CoverArtError>::into(crate::error::FileDecodingError::new(
			crate::format::FileFormat::$file_fmt,
			$reason,
		))
	};
	($reason:literal) => {
		Into::<crate::error::CoverArtError>::into(crate::error::FileDecodingError::from_description(
			$reason,
		))
	};
	(@BAIL $($file_fmt:ident,)? $reason:literal) => {
		return Err(decode_err!($($file_fmt,)? $reason))
	};
}

pub(crate) use {decode_err, err};
