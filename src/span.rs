//! Borrowed strided spans.
//!
//! A [`Span2D`] is what a view resolves to: a pointer to the first element,
//! a shape and a pitch, valid for the lifetime of the borrow it comes from.

use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::Index;
use core::ptr::NonNull;
use core::slice;

use crate::alloc::fmt;
use crate::alloc::vec::Vec;
use crate::common::{check_area, panic_display};
use crate::error::{Error, Param};

#[cfg(test)]
mod tests;

/// Borrowed, read-only 2D span with a row pitch.
///
/// # Examples
///
/// ```
/// # use memory2d::span::Span2D;
/// let data = [1, 2, 3, 4, 5, 6, 7, 8];
/// let span = Span2D::from_slice(&data, 2, 3, 1).unwrap();
/// assert_eq!(span.row(1), Some(&[5, 6, 7][..]));
/// assert_eq!(span[(0, 2)], 3);
/// ```
pub struct Span2D<'a, T> {
    ptr: NonNull<T>,
    height: usize,
    width: usize,
    pitch: usize,
    marker: PhantomData<&'a [T]>,
}

impl<'a, T> Span2D<'a, T> {
    /// Creates an empty span.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            height: 0,
            width: 0,
            pitch: 0,
            marker: PhantomData,
        }
    }

    /// Creates a span over a slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the region does not fit in the slice.
    pub fn from_slice(
        slice: &'a [T],
        height: usize,
        width: usize,
        pitch: usize,
    ) -> Result<Self, Error> {
        check_area(slice.len(), 0, height, width, pitch)?;
        if height == 0 || width == 0 {
            return Ok(Self::empty());
        }
        // SAFETY: the area was checked against the slice length
        Ok(unsafe { Self::from_raw_parts(slice.as_ptr(), height, width, pitch) })
    }

    /// Creates a span from its raw parts.
    ///
    /// # Safety
    ///
    /// - `ptr` must be non-null and aligned,
    /// - for non-empty shapes, the `width + (width + pitch) * (height - 1)`
    ///   elements from `ptr` must be initialized and stay valid and unmodified
    ///   for `'a`.
    #[inline]
    pub(crate) const unsafe fn from_raw_parts(
        ptr: *const T,
        height: usize,
        width: usize,
        pitch: usize,
    ) -> Self {
        Self {
            // SAFETY: precondition
            ptr: unsafe { NonNull::new_unchecked(ptr.cast_mut()) },
            height,
            width,
            pitch,
            marker: PhantomData,
        }
    }

    /// Returns the number of rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of elements skipped between rows.
    #[inline]
    #[must_use]
    pub const fn pitch(&self) -> usize {
        self.pitch
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.height * self.width
    }

    /// Returns `true` if the span has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    #[inline]
    const fn stride(&self) -> usize {
        self.width + self.pitch
    }

    /// Returns a row.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&'a [T]> {
        if row >= self.height {
            return None;
        }
        // SAFETY: type invariant, every row lies within the addressed area
        Some(unsafe {
            slice::from_raw_parts(self.ptr.as_ptr().add(row * self.stride()), self.width)
        })
    }

    /// Returns the element at (`row`, `column`).
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&'a T> {
        self.row(row)?.get(column)
    }

    /// Returns an iterator over the rows.
    #[inline]
    pub fn rows(&self) -> Rows<'a, T> {
        Rows {
            span: *self,
            front: 0,
            back: self.height,
        }
    }

    /// Returns an iterator over the elements, in row-major order.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a T> + 'a {
        self.rows().flatten()
    }

    /// Returns the elements as a single slice if the rows are packed.
    #[must_use]
    pub fn try_as_slice(&self) -> Option<&'a [T]> {
        if self.is_empty() {
            Some(&[])
        } else if self.pitch == 0 || self.height == 1 {
            // SAFETY: packed rows form one contiguous run
            Some(unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len()) })
        } else {
            None
        }
    }

    /// Copies the elements, row by row, into the start of `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `destination` is too short.
    pub fn copy_to(&self, destination: &mut [T]) -> Result<(), Error>
    where
        T: Clone,
    {
        if destination.len() < self.len() {
            return Err(Error::ShapeMismatch {
                required: (self.height, self.width),
                available: (1, destination.len()),
            });
        }
        if let Some(all) = self.try_as_slice() {
            destination[..all.len()].clone_from_slice(all);
        } else {
            for (row, chunk) in self.rows().zip(destination.chunks_exact_mut(self.width)) {
                chunk.clone_from_slice(row);
            }
        }
        Ok(())
    }

    /// Copies the elements into a new vector, in row-major order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut vec = Vec::with_capacity(self.len());
        for row in self.rows() {
            vec.extend_from_slice(row);
        }
        vec
    }
}

impl<T> Clone for Span2D<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span2D<'_, T> {}

impl<T> Default for Span2D<'_, T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Index<(usize, usize)> for Span2D<'_, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        if row >= self.height {
            panic_display(Error::out_of_range(Param::Row, row, self.height))
        } else if column >= self.width {
            panic_display(Error::out_of_range(Param::Column, column, self.width))
        } else {
            // SAFETY: both indices checked
            unsafe { &*self.ptr.as_ptr().add(row * self.stride() + column) }
        }
    }
}

impl<T: PartialEq> PartialEq for Span2D<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.height == other.height
            && self.width == other.width
            && self.rows().eq(other.rows())
    }
}

impl<T: Eq> Eq for Span2D<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Span2D<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

// A span behaves like a shared slice.
unsafe impl<T: Sync> Send for Span2D<'_, T> {}
unsafe impl<T: Sync> Sync for Span2D<'_, T> {}

/// Iterator over the rows of a [`Span2D`].
pub struct Rows<'a, T> {
    span: Span2D<'a, T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = &'a [T];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let row = self.span.row(self.front);
        self.front += 1;
        row
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Rows<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.span.row(self.back)
    }
}

impl<T> ExactSizeIterator for Rows<'_, T> {}

impl<T> FusedIterator for Rows<'_, T> {}
