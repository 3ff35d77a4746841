use crate::error::Result;
use crate::macros::err;

/// The largest single allocation made on behalf of data read from a file
pub(crate) const ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

/// Create a `Vec` of `len` copies of `element`
///
/// Lengths are read from untrusted headers, so anything above [`ALLOCATION_LIMIT`] is rejected
/// and allocation failure is reported instead of aborting.
pub(crate) fn fallible_vec_from_element<T>(element: T, len: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	if len > ALLOCATION_LIMIT {
		err!(TooMuchData);
	}

	let mut vec = Vec::new();
	vec.try_reserve_exact(len)?;
	vec.resize(len, element);

	Ok(vec)
}
