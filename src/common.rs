//! Common functions and types.

use core::ops::{Bound, Range, RangeBounds};
use core::{error, fmt};

use crate::error::{Error, Param};

/// Panics with the provided displayable error message.
///
/// # Panics
///
/// Always panics with the provided error message.
#[track_caller]
pub(crate) fn panic_display<T>(e: impl fmt::Display) -> T {
    panic!("{e}");
}

/// Converts any generic range into a concrete `Range<usize>` given a length.
///
/// # Errors
///
/// Returns a `RangeError` if the range is invalid.
pub fn range(range: impl RangeBounds<usize>, len: usize) -> Result<Range<usize>, RangeError> {
    range_mono(
        range.start_bound().cloned(),
        range.end_bound().cloned(),
        len,
    )
}

fn range_mono(
    start: Bound<usize>,
    end: Bound<usize>,
    len: usize,
) -> Result<Range<usize>, RangeError> {
    let start = match start {
        Bound::Included(start) => start,
        Bound::Excluded(start) => start.checked_add(1).ok_or(RangeError::StartOverflows)?,
        Bound::Unbounded => 0,
    };
    let end = match end {
        Bound::Included(end) => end.checked_add(1).ok_or(RangeError::EndOverflows)?,
        Bound::Excluded(end) => end,
        Bound::Unbounded => len,
    };
    if start > end {
        Err(RangeError::StartGreaterThanEnd { start, end })
    } else if end > len {
        Err(RangeError::EndOutOfBounds { end, len })
    } else {
        Ok(Range { start, end })
    }
}

/// Represents errors that can occur when slicing a memory block.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RangeError {
    /// The start index overflows.
    StartOverflows,
    /// The end index overflows.
    EndOverflows,
    /// The start index is greater than the end index.
    StartGreaterThanEnd { start: usize, end: usize },
    /// The end index is out of bounds.
    EndOutOfBounds { end: usize, len: usize },
}

impl RangeError {
    /// Returns a static message for the error.
    #[must_use]
    pub const fn const_message(&self) -> &'static str {
        match self {
            Self::StartOverflows => "start index overflows",
            Self::EndOverflows => "end index overflows",
            Self::StartGreaterThanEnd { .. } => "start index is greater than end index",
            Self::EndOutOfBounds { .. } => "end index is out of bounds",
        }
    }
}

impl error::Error for RangeError {}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::StartOverflows => write!(f, "start index overflows"),
            Self::EndOverflows => write!(f, "end index overflows"),
            Self::StartGreaterThanEnd { start, end } => {
                write!(f, "start index {start} is greater than end index {end}")
            }
            Self::EndOutOfBounds { end, len } => {
                write!(
                    f,
                    "end index {end} is out of bounds for memory of length {len}"
                )
            }
        }
    }
}

/// Number of elements spanned by `height` rows of `width` elements separated
/// by `pitch` skipped elements: `width + (width + pitch) * (height - 1)`.
///
/// `height` and `width` must be non-zero.
pub(crate) const fn area(height: usize, width: usize, pitch: usize) -> Result<usize, Error> {
    debug_assert!(height != 0 && width != 0);
    let Some(stride) = width.checked_add(pitch) else {
        return Err(Error::overflow(Param::Pitch, pitch));
    };
    let Some(rows) = stride.checked_mul(height - 1) else {
        return Err(Error::overflow(Param::Height, height));
    };
    match rows.checked_add(width) {
        Some(area) => Ok(area),
        None => Err(Error::overflow(Param::Width, width)),
    }
}

/// Checks that a `height` × `width` region with `pitch` fits in `len`
/// elements starting at `offset`. Zero-area regions always fit.
pub(crate) const fn check_area(
    len: usize,
    offset: usize,
    height: usize,
    width: usize,
    pitch: usize,
) -> Result<(), Error> {
    if offset > len {
        return Err(Error::out_of_range(Param::Offset, offset, len.saturating_add(1)));
    }
    if height == 0 || width == 0 {
        return Ok(());
    }
    let available = len - offset;
    match area(height, width, pitch) {
        Ok(area) if area > available => Err(Error::AreaMismatch { area, available }),
        Ok(_) => Ok(()),
        Err(e) => Err(e),
    }
}
