//! Writable 2D views.
//!
//! A [`Memory2DMut`] owns its buffer exclusively. It is the only way to write
//! through a 2D view; once filled, it is converted into a read-only
//! [`Memory2D`] without copying.

use crate::alloc::fmt;
use crate::alloc::vec;
use crate::alloc::vec::Vec;
use crate::common::check_area;
use crate::error::Error;
use crate::memory2d::{resolve, sub_rect, Backing, Memory2D};
use crate::span::Span2D;
use crate::storage::Buffer;
use crate::{Backend, ThreadSafe};


/// Writable 2D view over a uniquely owned buffer.
///
/// Has the same layout as [`Memory2D`]; the backing, when present, is always
/// a [`Buffer`] that no other handle shares.
///
/// # Examples
///
/// ```
/// # use memory2d::{Memory2D, Memory2DMut};
/// let mut grid = Memory2DMut::<u32>::new(2, 3);
/// grid.row_mut(1).unwrap().copy_from_slice(&[4, 5, 6]);
/// *grid.get_mut(0, 0).unwrap() = 1;
///
/// let view: Memory2D<u32> = grid.into_read_only();
/// assert_eq!(view.to_vec(), [1, 0, 0, 4, 5, 6]);
/// ```
#[repr(C)]
pub struct Memory2DMut<T, B = ThreadSafe>
where
    B: Backend,
{
    backing: Option<Backing<T, B>>,
    offset: usize,
    height: usize,
    width: usize,
    pitch: usize,
}

impl<T, B> Memory2DMut<T, B>
where
    B: Backend,
{
    const fn empty() -> Self {
        Self {
            backing: None,
            offset: 0,
            height: 0,
            width: 0,
            pitch: 0,
        }
    }

    /// Creates a `height` × `width` view filled with default values.
    ///
    /// # Panics
    ///
    /// Panics if `height * width` overflows.
    #[must_use]
    pub fn new(height: usize, width: usize) -> Self
    where
        T: Default + Clone,
    {
        if height == 0 || width == 0 {
            return Self::empty();
        }
        let Some(len) = height.checked_mul(width) else {
            panic!("capacity overflow");
        };
        Self {
            backing: Some(Backing::Buffer(Buffer::from_vec(vec![T::default(); len]))),
            offset: 0,
            height,
            width,
            pitch: 0,
        }
    }

    /// Creates a view over a vector, taking ownership of it.
    ///
    /// # Errors
    ///
    /// Same validation as [`Memory2D::from_buffer`].
    pub fn from_vec(
        data: Vec<T>,
        offset: usize,
        height: usize,
        width: usize,
        pitch: usize,
    ) -> Result<Self, Error> {
        check_area(data.len(), offset, height, width, pitch)?;
        if height == 0 || width == 0 {
            return Ok(Self::empty());
        }
        Ok(Self {
            backing: Some(Backing::Buffer(Buffer::from_vec(data))),
            offset,
            height,
            width,
            pitch,
        })
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

    /// Returns `true` if the view has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.backing.is_none()
    }

    /// Resolves the view into a borrowed read-only span.
    #[inline]
    #[must_use]
    pub fn span(&self) -> Span2D<'_, T> {
        resolve(
            self.backing.as_ref(),
            self.offset,
            self.height,
            self.width,
            self.pitch,
        )
    }

    /// Returns a row for writing.
    #[must_use]
    pub fn row_mut(&mut self, row: usize) -> Option<&mut [T]> {
        if row >= self.height {
            return None;
        }
        let width = self.width;
        let start = self.offset + row * (width + self.pitch);
        // type invariant: the buffer is never shared
        let Some(Backing::Buffer(buffer)) = &mut self.backing else {
            return None;
        };
        buffer
            .as_mut_slice()
            .map(|all| &mut all[start..start + width])
    }

    /// Returns the element at (`row`, `column`) for writing.
    #[must_use]
    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        self.row_mut(row)?.get_mut(column)
    }

    /// Overwrites every element of the view with clones of `value`.
    ///
    /// Skipped elements between rows are left untouched.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for row in 0..self.height {
            if let Some(row) = self.row_mut(row) {
                row.fill(value.clone());
            }
        }
    }

    /// Narrows the view to a sub-rectangle.
    ///
    /// # Errors
    ///
    /// Same validation as [`Memory2D::slice`]. The view is dropped on error.
    pub fn slice(
        self,
        row: usize,
        column: usize,
        height: usize,
        width: usize,
    ) -> Result<Self, Error> {
        let shape = (self.height, self.width, self.pitch);
        let (shift, pitch) = sub_rect(shape, row, column, height, width)?;
        if height == 0 || width == 0 {
            return Ok(Self::empty());
        }
        Ok(Self {
            backing: self.backing,
            offset: self.offset + shift,
            height,
            width,
            pitch,
        })
    }

    /// Gives up write access, see [`Memory2D::from`].
    #[inline]
    #[must_use]
    pub fn into_read_only(self) -> Memory2D<T, B> {
        Memory2D::from(self)
    }

    #[allow(clippy::type_complexity)]
    pub(crate) fn into_parts(self) -> (Option<Backing<T, B>>, usize, usize, usize, usize) {
        let Self {
            backing,
            offset,
            height,
            width,
            pitch,
        } = self;
        (backing, offset, height, width, pitch)
    }
}

impl<T, B> Default for Memory2DMut<T, B>
where
    B: Backend,
{
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, B> fmt::Debug for Memory2DMut<T, B>
where
    T: fmt::Debug,
    B: Backend,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory2DMut")
            .field("offset", &self.offset)
            .field("height", &self.height)
            .field("width", &self.width)
            .field("pitch", &self.pitch)
            .field("rows", &self.span())
            .finish()
    }
}

impl<T, B> fmt::Display for Memory2DMut<T, B>
where
    B: Backend,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Memory2DMut<{}>[{}, {}]",
            core::any::type_name::<T>(),
            self.height,
            self.width
        )
    }
}
