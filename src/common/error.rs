/// The error type returned by the fallible operations of the collections in
/// this crate.
///
/// All variants describe a violated calling contract rather than a transient
/// condition, so retrying the same call will fail the same way.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An index (or the end of a range) lies outside of the valid range of the
    /// collection or of a destination/source slice.
    ///
    /// `len` is the length the index was checked against.
    #[error("index ({index}) is out of range for length {len}")]
    IndexOutOfRange { index: u64, len: u64 },

    /// An argument can never be valid, for example a load factor outside of
    /// `(0, 1)`, key and value arrays of different lengths, or a range whose
    /// start is greater than its end.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `remove` or `set` was called on a cursor without a preceding `next` or
    /// `previous`, or after the entry returned by it was already removed.
    #[error(
        "no current element for this cursor. \
    Call next or previous before calling remove or set, and do not call them twice"
    )]
    InvalidIteratorState,
}
