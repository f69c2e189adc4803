//! Multi-dimensional shared buffers.

use core::hash::{Hash, Hasher};
use core::ops::Index;

use crate::alloc::boxed::Box;
use crate::alloc::fmt;
use crate::alloc::vec::Vec;
use crate::backend::Shared;
use crate::common::panic_display;
use crate::error::{Error, Param};
use crate::{Backend, ThreadSafe};

/// Row-major grid of elements, shared by [`Array2`] (one layer) and [`Array3`].
pub(crate) struct Grid<T> {
    depth: usize,
    rows: usize,
    columns: usize,
    data: Box<[T]>,
}

impl<T> Grid<T> {
    /// Builds a grid, checking that the shape matches the data length.
    fn new(depth: usize, rows: usize, columns: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = volume(depth, rows, columns);
        if expected != Some(data.len()) {
            return Err(Error::ShapeMismatch {
                required: (depth.saturating_mul(rows), columns),
                available: (1, data.len()),
            });
        }
        Ok(Self {
            depth,
            rows,
            columns,
            data: data.into_boxed_slice(),
        })
    }

    fn from_fn(
        depth: usize,
        rows: usize,
        columns: usize,
        mut f: impl FnMut(usize, usize, usize) -> T,
    ) -> Self {
        let Some(len) = volume(depth, rows, columns) else {
            panic!("capacity overflow");
        };
        let mut data = Vec::with_capacity(len);
        for d in 0..depth {
            for r in 0..rows {
                for c in 0..columns {
                    data.push(f(d, r, c));
                }
            }
        }
        Self {
            depth,
            rows,
            columns,
            data: data.into_boxed_slice(),
        }
    }

    #[inline]
    fn index_of(&self, depth: usize, row: usize, column: usize) -> Option<usize> {
        (depth < self.depth && row < self.rows && column < self.columns)
            .then(|| (depth * self.rows + row) * self.columns + column)
    }
}

fn volume(depth: usize, rows: usize, columns: usize) -> Option<usize> {
    depth.checked_mul(rows)?.checked_mul(columns)
}

/// Shared row-major 2D buffer.
///
/// # Examples
///
/// ```
/// # use memory2d::Array2;
/// let a = Array2::from([[1, 2, 3], [4, 5, 6]]);
/// assert_eq!(a.rows(), 2);
/// assert_eq!(a.columns(), 3);
/// assert_eq!(a[(1, 2)], 6);
/// assert_eq!(a.row(0), Some(&[1, 2, 3][..]));
/// ```
pub struct Array2<T, B = ThreadSafe>(pub(crate) Shared<Grid<T>, B>)
where
    B: Backend;

impl<T, B> Array2<T, B>
where
    B: Backend,
{
    /// Creates a 2D buffer from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `data.len() != rows * columns`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::Array2;
    /// let a = Array2::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(a[(1, 0)], 3);
    /// assert!(Array2::from_vec(2, 2, vec![1, 2, 3]).is_err());
    /// ```
    pub fn from_vec(rows: usize, columns: usize, data: Vec<T>) -> Result<Self, Error> {
        Grid::new(1, rows, columns, data).map(|g| Self(Shared::new(g)))
    }

    /// Creates a 2D buffer from data already known to hold `rows * columns`
    /// elements.
    pub(crate) fn from_packed(rows: usize, columns: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(rows.checked_mul(columns), Some(data.len()));
        Self(Shared::new(Grid {
            depth: 1,
            rows,
            columns,
            data: data.into_boxed_slice(),
        }))
    }

    /// Creates a 2D buffer by calling `f(row, column)` for each element.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows.
    #[must_use]
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        Self(Shared::new(Grid::from_fn(1, rows, columns, |_, r, c| {
            f(r, c)
        })))
    }

    /// Creates a 2D buffer filled with clones of `value`.
    #[must_use]
    pub fn from_elem(rows: usize, columns: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(rows, columns, |_, _| value.clone())
    }

    /// Returns the number of rows.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.0.get().rows
    }

    /// Returns the number of columns.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> usize {
        self.0.get().columns
    }

    /// Returns the total number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.get().data.len()
    }

    /// Returns `true` if the buffer has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at (`row`, `column`), if any.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        let grid = self.0.get();
        grid.index_of(0, row, column).map(|i| &grid.data[i])
    }

    /// Returns a row, if any.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[T]> {
        let grid = self.0.get();
        (row < grid.rows).then(|| &grid.data[row * grid.columns..][..grid.columns])
    }

    /// Extracts the row-major slice of all elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0.get().data
    }

    /// Returns `true` if both buffers share the same allocation.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// Returns the number of live pins on this buffer.
    #[inline]
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.0.pin_count()
    }

    /// Returns `true` if at least one pin guard holds this buffer.
    #[inline]
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pin_count() != 0
    }
}

impl<T, B> Clone for Array2<T, B>
where
    B: Backend,
{
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T, B> Default for Array2<T, B>
where
    B: Backend,
{
    fn default() -> Self {
        Self::from_fn(0, 0, |_, _| unreachable!())
    }
}

impl<T, B, const R: usize, const C: usize> From<[[T; C]; R]> for Array2<T, B>
where
    B: Backend,
{
    fn from(value: [[T; C]; R]) -> Self {
        let data: Vec<T> = value.into_iter().flatten().collect();
        Self(Shared::new(Grid {
            depth: 1,
            rows: R,
            columns: C,
            data: data.into_boxed_slice(),
        }))
    }
}

impl<T, B> Index<(usize, usize)> for Array2<T, B>
where
    B: Backend,
{
    type Output = T;

    #[track_caller]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        match self.get(row, column) {
            Some(e) => e,
            None if row >= self.rows() => {
                panic_display(Error::out_of_range(Param::Row, row, self.rows()))
            }
            None => panic_display(Error::out_of_range(Param::Column, column, self.columns())),
        }
    }
}

impl<T, B> Eq for Array2<T, B>
where
    T: Eq,
    B: Backend,
{
}

impl<T, B1, B2> PartialEq<Array2<T, B1>> for Array2<T, B2>
where
    T: PartialEq,
    B1: Backend,
    B2: Backend,
{
    fn eq(&self, other: &Array2<T, B1>) -> bool {
        self.rows() == other.rows()
            && self.columns() == other.columns()
            && self.as_slice() == other.as_slice()
    }
}

impl<T, B> Hash for Array2<T, B>
where
    T: Hash,
    B: Backend,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows().hash(state);
        self.columns().hash(state);
        self.as_slice().hash(state);
    }
}

impl<T, B> fmt::Debug for Array2<T, B>
where
    T: fmt::Debug,
    B: Backend,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.columns().max(1);
        f.debug_list()
            .entries(self.as_slice().chunks(columns))
            .finish()
    }
}

/// Shared row-major 3D buffer, indexed by (depth, row, column).
///
/// A view can address one depth slice at a time, see
/// [`Memory2D::from_array3`](crate::memory2d::Memory2D::from_array3).
///
/// # Examples
///
/// ```
/// # use memory2d::Array3;
/// let a = Array3::from_fn(2, 2, 3, |d, r, c| d * 100 + r * 10 + c);
/// assert_eq!(a.get(1, 1, 2), Some(&112));
/// assert_eq!(a.layer(1).unwrap().len(), 6);
/// ```
pub struct Array3<T, B = ThreadSafe>(pub(crate) Shared<Grid<T>, B>)
where
    B: Backend;

impl<T, B> Array3<T, B>
where
    B: Backend,
{
    /// Creates a 3D buffer from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `data.len() != depth * rows * columns`.
    pub fn from_vec(depth: usize, rows: usize, columns: usize, data: Vec<T>) -> Result<Self, Error> {
        Grid::new(depth, rows, columns, data).map(|g| Self(Shared::new(g)))
    }

    /// Creates a 3D buffer by calling `f(depth, row, column)` for each element.
    ///
    /// # Panics
    ///
    /// Panics if `depth * rows * columns` overflows.
    #[must_use]
    pub fn from_fn(
        depth: usize,
        rows: usize,
        columns: usize,
        f: impl FnMut(usize, usize, usize) -> T,
    ) -> Self {
        Self(Shared::new(Grid::from_fn(depth, rows, columns, f)))
    }

    /// Returns the number of depth slices.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.get().depth
    }

    /// Returns the number of rows per depth slice.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.0.get().rows
    }

    /// Returns the number of columns.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> usize {
        self.0.get().columns
    }

    /// Returns the total number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.get().data.len()
    }

    /// Returns `true` if the buffer has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at (`depth`, `row`, `column`), if any.
    #[inline]
    #[must_use]
    pub fn get(&self, depth: usize, row: usize, column: usize) -> Option<&T> {
        let grid = self.0.get();
        grid.index_of(depth, row, column).map(|i| &grid.data[i])
    }

    /// Returns the row-major elements of a depth slice, if any.
    #[must_use]
    pub fn layer(&self, depth: usize) -> Option<&[T]> {
        let grid = self.0.get();
        let size = grid.rows * grid.columns;
        (depth < grid.depth).then(|| &grid.data[depth * size..][..size])
    }

    /// Extracts the row-major slice of all elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0.get().data
    }

    /// Returns `true` if both buffers share the same allocation.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// Returns the number of live pins on this buffer.
    #[inline]
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.0.pin_count()
    }

    /// Returns `true` if at least one pin guard holds this buffer.
    #[inline]
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pin_count() != 0
    }
}

impl<T, B> Clone for Array3<T, B>
where
    B: Backend,
{
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T, B> Eq for Array3<T, B>
where
    T: Eq,
    B: Backend,
{
}

impl<T, B1, B2> PartialEq<Array3<T, B1>> for Array3<T, B2>
where
    T: PartialEq,
    B1: Backend,
    B2: Backend,
{
    fn eq(&self, other: &Array3<T, B1>) -> bool {
        self.depth() == other.depth()
            && self.rows() == other.rows()
            && self.columns() == other.columns()
            && self.as_slice() == other.as_slice()
    }
}

impl<T, B> fmt::Debug for Array3<T, B>
where
    T: fmt::Debug,
    B: Backend,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array3")
            .field("depth", &self.depth())
            .field("rows", &self.rows())
            .field("columns", &self.columns())
            .field("data", &self.as_slice())
            .finish()
    }
}
