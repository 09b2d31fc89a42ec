pub(crate) mod error;
pub(crate) mod hash_common;
pub(crate) mod primitive;

#[cfg(test)]
pub(crate) mod test_utils;

use self::error::CollectionError;

/// Checks `index < len`, as required by element reads and writes.
#[inline]
pub(crate) fn ensure_restricted_index(index: u64, len: u64) -> Result<(), CollectionError> {
    if index >= len {
        return Err(CollectionError::IndexOutOfRange { index, len });
    }
    Ok(())
}

/// Checks `index <= len`, as required by insertions.
#[inline]
pub(crate) fn ensure_index(index: u64, len: u64) -> Result<(), CollectionError> {
    if index > len {
        return Err(CollectionError::IndexOutOfRange { index, len });
    }
    Ok(())
}

/// Checks that `[from, to)` is a well formed range inside `[0, len)`.
pub(crate) fn ensure_from_to(from: u64, to: u64, len: u64) -> Result<(), CollectionError> {
    if from > to {
        return Err(CollectionError::InvalidArgument(format!(
            "start index ({from}) is greater than end index ({to})"
        )));
    }
    if to > len {
        return Err(CollectionError::IndexOutOfRange { index: to, len });
    }
    Ok(())
}

/// Checks that the `length` elements starting at `from` lie inside `[0, len)`.
pub(crate) fn ensure_span(from: u64, length: usize, len: u64) -> Result<(), CollectionError> {
    ensure_index(from, len)?;
    let to = from.saturating_add(length as u64);
    if to > len {
        return Err(CollectionError::IndexOutOfRange { index: to, len });
    }
    Ok(())
}

/// Checks that `offset .. offset + length` fits in a slice of `slice_len`
/// elements.
pub(crate) fn ensure_offset_length(
    slice_len: usize,
    offset: usize,
    length: usize,
) -> Result<(), CollectionError> {
    match offset.checked_add(length) {
        Some(end) if end <= slice_len => Ok(()),
        _ => Err(CollectionError::IndexOutOfRange {
            index: offset as u64 + length as u64,
            len: slice_len as u64,
        }),
    }
}
