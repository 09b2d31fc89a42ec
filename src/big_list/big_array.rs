//! Segment tables ("big arrays") and their indexing arithmetic.

use std::fmt;

/// The default segment shift: segments hold `2^27` elements.
pub const DEFAULT_SEGMENT_SHIFT: u32 = 27;

/// A fixed-length array of `T` addressed by `u64` indices, stored as a table
/// of segments of `2^SHIFT` elements each.
///
/// Every segment except possibly the last one holds exactly
/// [`SEGMENT_SIZE`][Self::SEGMENT_SIZE] elements; the last one holds the
/// remainder. Element `i` lives at offset `i & SEGMENT_MASK` of segment
/// `i >> SHIFT`.
///
/// The length of a `BigArray` only changes through [`resize`][Self::resize],
/// which reallocates at most one segment (the last one) and appends or drops
/// whole segments.
#[derive(Clone, PartialEq, Eq)]
pub struct BigArray<T, const SHIFT: u32 = DEFAULT_SEGMENT_SHIFT> {
    segments: Vec<Box<[T]>>,
    len: u64,
}

impl<T, const SHIFT: u32> BigArray<T, SHIFT> {
    /// The number of elements in a full segment.
    pub const SEGMENT_SIZE: usize = 1 << SHIFT;

    /// The mask extracting the offset of an element within its segment.
    pub const SEGMENT_MASK: u64 = (1 << SHIFT) - 1;

    /// Returns the segment holding element `index`.
    #[inline]
    pub fn segment(index: u64) -> usize {
        (index >> SHIFT) as usize
    }

    /// Returns the offset of element `index` within its segment.
    #[inline]
    pub fn displacement(index: u64) -> usize {
        (index & Self::SEGMENT_MASK) as usize
    }

    /// Returns the index of the first element of `segment`.
    #[inline]
    pub fn start(segment: usize) -> u64 {
        (segment as u64) << SHIFT
    }

    /// Returns the index of the element at `displacement` in `segment`.
    #[inline]
    pub fn index(segment: usize, displacement: usize) -> u64 {
        Self::start(segment) + displacement as u64
    }

    /// Returns the segment boundary closest to `index` within `[min, max]`,
    /// or `index` itself when neither boundary of its segment is in range.
    ///
    /// Splitting a range at a segment boundary keeps both halves from sharing
    /// a segment.
    pub fn nearest_segment_start(index: u64, min: u64, max: u64) -> u64 {
        let segment = Self::segment(index);
        let lower = Self::start(segment);
        let upper = Self::start(segment + 1);

        if upper >= max {
            return if lower < min { index } else { lower };
        }
        if lower < min {
            return upper;
        }

        let mid = lower + ((upper - lower) >> 1);
        if index <= mid {
            lower
        } else {
            upper
        }
    }

    /// Creates an empty big array. It does not allocate.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the segments. All of them but the last one are full.
    pub fn segments(&self) -> &[Box<[T]>] {
        &self.segments
    }

    /// Returns the part of segment `segment` covering `[from, to)`, which must
    /// not cross a segment boundary.
    #[inline]
    pub(crate) fn chunk(&self, from: u64, to: u64) -> &[T] {
        let segment = Self::segment(from);
        let displacement = Self::displacement(from);
        &self.segments[segment][displacement..displacement + (to - from) as usize]
    }

    /// Returns the pieces of `[from, to)` in order, one per segment touched.
    pub(crate) fn chunks(&self, from: u64, to: u64) -> impl Iterator<Item = &[T]> + '_ {
        let mut pos = from;
        std::iter::from_fn(move || {
            if pos >= to {
                return None;
            }
            let end = Self::start(Self::segment(pos) + 1).min(to);
            let chunk = self.chunk(pos, end);
            pos = end;
            Some(chunk)
        })
    }

    /// Returns the length of segment `segment` in an array of `len` elements.
    fn segment_len(segment: usize, len: u64) -> usize {
        let full = Self::segment(len);
        if segment < full {
            Self::SEGMENT_SIZE
        } else {
            Self::displacement(len)
        }
    }
}

impl<T, const SHIFT: u32> BigArray<T, SHIFT>
where
    T: Copy + Default,
{
    /// Creates a big array of `len` default elements.
    pub fn with_len(len: u64) -> Self {
        let mut array = Self::new();
        array.resize(len);
        array
    }

    /// Returns element `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn get(&self, index: u64) -> T {
        self.segments[Self::segment(index)][Self::displacement(index)]
    }

    /// Replaces element `index` with `value` and returns the previous element.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn set(&mut self, index: u64, value: T) -> T {
        std::mem::replace(self.get_mut(index), value)
    }

    #[inline]
    pub(crate) fn get_ref(&self, index: u64) -> &T {
        &self.segments[Self::segment(index)][Self::displacement(index)]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: u64) -> &mut T {
        &mut self.segments[Self::segment(index)][Self::displacement(index)]
    }

    /// Changes the length to `len`, keeping the first `min(len, self.len())`
    /// elements. New elements are `T::default()`.
    ///
    /// Only the last segment is ever reallocated; other segments are appended
    /// or dropped whole.
    pub fn resize(&mut self, len: u64) {
        if len == self.len {
            return;
        }
        let segment_count = Self::segment(len + Self::SEGMENT_MASK);

        self.segments.truncate(segment_count);
        if let Some(last) = self.segments.len().checked_sub(1) {
            let wanted = Self::segment_len(last, len);
            if self.segments[last].len() != wanted {
                let mut segment = Vec::from(std::mem::take(&mut self.segments[last]));
                segment.resize(wanted, T::default());
                self.segments[last] = segment.into_boxed_slice();
            }
        }
        while self.segments.len() < segment_count {
            let wanted = Self::segment_len(self.segments.len(), len);
            self.segments.push(vec![T::default(); wanted].into_boxed_slice());
        }

        #[cfg(feature = "logging")]
        log::trace!(
            "Resized a big array from {} to {} elements ({} segments)",
            self.len,
            len,
            segment_count
        );

        self.len = len;
    }

    /// Sets the elements in `[from, to)` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `from > to` or `to > len`.
    pub fn fill(&mut self, from: u64, to: u64, value: T) {
        assert!(from <= to && to <= self.len, "fill range out of bounds");
        let mut pos = from;
        while pos < to {
            let segment = Self::segment(pos);
            let displacement = Self::displacement(pos);
            let end = (Self::start(segment + 1)).min(to);
            let l = (end - pos) as usize;
            self.segments[segment][displacement..displacement + l].fill(value);
            pos = end;
        }
    }

    /// Copies `length` elements from `src` to `dest` within this array, one
    /// block per segment piece. The two ranges may overlap.
    ///
    /// # Panics
    ///
    /// Panics if either range ends past `len`.
    pub fn copy_within(&mut self, src: u64, dest: u64, length: u64) {
        assert!(
            src + length <= self.len && dest + length <= self.len,
            "copy range out of bounds"
        );
        if length == 0 || src == dest {
            return;
        }

        let mut length = length;
        if dest < src {
            // Front to back, so no source element is overwritten before it is
            // read.
            let (mut src_segment, mut src_displ) = (Self::segment(src), Self::displacement(src));
            let (mut dest_segment, mut dest_displ) =
                (Self::segment(dest), Self::displacement(dest));
            while length > 0 {
                let l = (length as usize)
                    .min(self.segments[src_segment].len() - src_displ)
                    .min(self.segments[dest_segment].len() - dest_displ);
                self.copy_chunk(src_segment, src_displ, dest_segment, dest_displ, l);
                src_displ += l;
                if src_displ == Self::SEGMENT_SIZE {
                    src_displ = 0;
                    src_segment += 1;
                }
                dest_displ += l;
                if dest_displ == Self::SEGMENT_SIZE {
                    dest_displ = 0;
                    dest_segment += 1;
                }
                length -= l as u64;
            }
        } else {
            // Back to front, for the same reason.
            let (mut src_segment, mut src_displ) =
                (Self::segment(src + length), Self::displacement(src + length));
            let (mut dest_segment, mut dest_displ) =
                (Self::segment(dest + length), Self::displacement(dest + length));
            while length > 0 {
                if src_displ == 0 {
                    src_displ = Self::SEGMENT_SIZE;
                    src_segment -= 1;
                }
                if dest_displ == 0 {
                    dest_displ = Self::SEGMENT_SIZE;
                    dest_segment -= 1;
                }
                let l = (length as usize).min(src_displ).min(dest_displ);
                self.copy_chunk(src_segment, src_displ - l, dest_segment, dest_displ - l, l);
                src_displ -= l;
                dest_displ -= l;
                length -= l as u64;
            }
        }
    }

    /// Copies `l` elements between two segments, or within one.
    fn copy_chunk(
        &mut self,
        src_segment: usize,
        src_displ: usize,
        dest_segment: usize,
        dest_displ: usize,
        l: usize,
    ) {
        use std::cmp::Ordering;

        match src_segment.cmp(&dest_segment) {
            Ordering::Equal => {
                self.segments[src_segment].copy_within(src_displ..src_displ + l, dest_displ)
            }
            Ordering::Less => {
                let (head, tail) = self.segments.split_at_mut(dest_segment);
                tail[0][dest_displ..dest_displ + l]
                    .copy_from_slice(&head[src_segment][src_displ..src_displ + l]);
            }
            Ordering::Greater => {
                let (head, tail) = self.segments.split_at_mut(src_segment);
                head[dest_segment][dest_displ..dest_displ + l]
                    .copy_from_slice(&tail[0][src_displ..src_displ + l]);
            }
        }
    }

    /// Copies `dest.len()` elements starting at `from` into `dest`.
    ///
    /// # Panics
    ///
    /// Panics if the range ends past `len`.
    pub fn copy_to_slice(&self, from: u64, dest: &mut [T]) {
        let end = from + dest.len() as u64;
        assert!(end <= self.len, "copy range out of bounds");
        let mut written = 0;
        for chunk in self.chunks(from, end) {
            dest[written..written + chunk.len()].copy_from_slice(chunk);
            written += chunk.len();
        }
    }

    /// Copies `src` into this array starting at `at`.
    ///
    /// # Panics
    ///
    /// Panics if the range ends past `len`.
    pub fn copy_from_slice(&mut self, at: u64, src: &[T]) {
        let end = at + src.len() as u64;
        assert!(end <= self.len, "copy range out of bounds");
        let mut pos = at;
        let mut read = 0;
        while pos < end {
            let segment = Self::segment(pos);
            let displacement = Self::displacement(pos);
            let l = (Self::start(segment + 1).min(end) - pos) as usize;
            self.segments[segment][displacement..displacement + l]
                .copy_from_slice(&src[read..read + l]);
            read += l;
            pos += l as u64;
        }
    }
}

impl<T, const SHIFT: u32> Default for BigArray<T, SHIFT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const SHIFT: u32> fmt::Debug for BigArray<T, SHIFT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BigArray")
            .field("len", &self.len)
            .field("segments", &self.segments.len())
            .field("segment_size", &Self::SEGMENT_SIZE)
            .finish()
    }
}
