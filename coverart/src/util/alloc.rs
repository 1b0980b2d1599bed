use crate::error::Result;
use crate::macros::err;

/// Creates a `Vec` of the specified length, containing copies of `element`.
///
/// The length comes from untrusted size fields, so it is checked against `limit` and the
/// reservation is fallible.
pub(crate) fn fallible_vec_from_element<T>(
	element: T,
	expected_size: usize,
	limit: usize,
) -> Result<Vec<T>>
where
	T: Clone,
{
	if expected_size > limit {
		err!(TooMuchData);
	}

	let mut v = Vec::new();
	v.try_reserve_exact(expected_size)?;
	v.resize(expected_size, element);

	Ok(v)
}
