//! Read-only 2D views.
//!
//! This module provides the [`Memory2D`] type: a cheaply clonable window of
//! `height` rows of `width` elements over a shared backing store, rows being
//! separated by `pitch` skipped elements.
//!
//! A view is nothing more than a backing handle and four scalars. Slicing
//! adjusts the scalars, resolving yields a [`Span2D`] borrowing the backing.
//! No operation ever copies the elements unless explicitly asked to.

use crate::alloc::fmt;
use crate::alloc::vec::Vec;
use crate::common::{area, check_area};
use crate::error::{Error, Param};
use crate::memory::Memory;
use crate::memory2d_mut::Memory2DMut;
use crate::pin::{check_pinnable, PinGuard};
use crate::span::Span2D;
use crate::storage::{check_text_element, Array2, Array3, Buffer, Storage, Text};
use crate::{Backend, ThreadSafe};

mod cmp;
mod convert;
#[cfg(feature = "serde")]
mod serde;

#[cfg(test)]
mod tests;

/// Backing store of a 2D view.
///
/// The set of backings is closed. Each variant resolves its base address in
/// its own way; a view then adds its offset to that base.
pub enum Backing<T, B = ThreadSafe>
where
    B: Backend,
{
    /// Shared linear buffer.
    Buffer(Buffer<T, B>),

    /// Shared 2D buffer, addressed in row-major order.
    Array2(Array2<T, B>),

    /// Shared 3D buffer, addressed in depth-major then row-major order.
    Array3(Array3<T, B>),

    /// Immutable text, readable as bytes only.
    Text(Text<B>),

    /// Linear memory block, itself a window over one of the storages above.
    Memory(Memory<T, B>),
}

impl<T, B> Backing<T, B>
where
    B: Backend,
{
    /// Returns the number of addressable elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Buffer(b) => b.len(),
            Self::Array2(a) => a.len(),
            Self::Array3(a) => a.len(),
            Self::Text(t) => t.len(),
            Self::Memory(m) => m.len(),
        }
    }

    /// Returns `true` if the backing has no addressable elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if both backings are the same instance.
    ///
    /// Memory blocks are the same instance if they address the same run of
    /// the same storage.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }

    /// Kind tag, allocation address, start and length.
    fn identity(&self) -> (u8, usize, usize, usize) {
        match self {
            Self::Buffer(b) => (0, b.0.addr(), 0, 0),
            Self::Array2(a) => (1, a.0.addr(), 0, 0),
            Self::Array3(a) => (2, a.0.addr(), 0, 0),
            Self::Text(t) => (3, t.0.addr(), 0, 0),
            Self::Memory(m) => (
                4,
                m.storage().map_or(0, Storage::addr),
                m.start(),
                m.len(),
            ),
        }
    }

    const fn kind_name(&self) -> &'static str {
        match self {
            Self::Buffer(_) => "Buffer",
            Self::Array2(_) => "Array2",
            Self::Array3(_) => "Array3",
            Self::Text(_) => "Text",
            Self::Memory(_) => "Memory",
        }
    }

    /// Pointer to the first addressable element.
    fn base(&self) -> *const T {
        match self {
            Self::Memory(m) => m.base(),
            Self::Buffer(b) => b.as_ptr(),
            Self::Array2(a) => a.as_slice().as_ptr(),
            Self::Array3(a) => a.as_slice().as_ptr(),
            // type invariant: only built for `T = u8`
            Self::Text(t) => t.as_bytes().as_ptr().cast(),
        }
    }

    /// Returns the underlying storage, `None` for memory blocks.
    fn to_storage(&self) -> Option<Storage<T, B>> {
        match self {
            Self::Buffer(b) => Some(Storage::Buffer(b.clone())),
            Self::Array2(a) => Some(Storage::Array2(a.clone())),
            Self::Array3(a) => Some(Storage::Array3(a.clone())),
            Self::Text(t) => Some(Storage::Text(t.clone())),
            Self::Memory(_) => None,
        }
    }
}

impl<T, B> Clone for Backing<T, B>
where
    B: Backend,
{
    fn clone(&self) -> Self {
        match self {
            Self::Buffer(b) => Self::Buffer(b.clone()),
            Self::Array2(a) => Self::Array2(a.clone()),
            Self::Array3(a) => Self::Array3(a.clone()),
            Self::Text(t) => Self::Text(t.clone()),
            Self::Memory(m) => Self::Memory(m.clone()),
        }
    }
}

impl<T, B> fmt::Debug for Backing<T, B>
where
    B: Backend,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, addr, start, len) = self.identity();
        let mut t = f.debug_tuple(self.kind_name());
        t.field(&(addr as *const ()));
        if let Self::Memory(_) = self {
            t.field(&(start..start + len));
        }
        t.finish()
    }
}

/// Resolves a view tuple into a borrowed span.
///
/// The tuple must satisfy the view invariant: zero-area tuples carry no
/// backing, others fit in their backing.
pub(crate) fn resolve<T, B>(
    backing: Option<&Backing<T, B>>,
    offset: usize,
    height: usize,
    width: usize,
    pitch: usize,
) -> Span2D<'_, T>
where
    B: Backend,
{
    match backing {
        // SAFETY: view invariant, the area from `offset` lies within the
        // backing, which the borrow keeps alive and unmodified
        Some(backing) => unsafe {
            Span2D::from_raw_parts(backing.base().add(offset), height, width, pitch)
        },
        None => Span2D::empty(),
    }
}

/// Computes the offset shift and pitch of a sub-rectangle of a
/// `height` × `width` view with `pitch`.
pub(crate) const fn sub_rect(
    (height, width, pitch): (usize, usize, usize),
    row: usize,
    column: usize,
    new_height: usize,
    new_width: usize,
) -> Result<(usize, usize), Error> {
    if row >= height {
        return Err(Error::out_of_range(Param::Row, row, height));
    }
    if column >= width {
        return Err(Error::out_of_range(Param::Column, column, width));
    }
    if new_height > height - row {
        return Err(Error::out_of_range(
            Param::Height,
            new_height,
            height - row + 1,
        ));
    }
    if new_width > width - column {
        return Err(Error::out_of_range(
            Param::Width,
            new_width,
            width - column + 1,
        ));
    }
    // cannot overflow: the shifted element lies within the view area
    let shift = (width + pitch) * row + column;
    Ok((shift, pitch + (width - new_width)))
}

/// Read-only 2D view over a shared backing store.
///
/// A view addresses `height` rows of `width` elements; the first element is
/// at `offset` in the backing and `pitch` elements are skipped between two
/// consecutive rows. Views of zero area are all *the* empty view: no backing
/// and all scalars zero.
///
/// Cloning a view is O(1) and never copies the elements. Two views are equal
/// if they address the same region of the same backing instance; content is
/// not compared.
///
/// # Examples
///
/// ```
/// # use memory2d::{Buffer, Memory2D};
/// let buffer = Buffer::from(vec![1, 2, 3, 4, 5, 6, 7, 8]);
/// let view = Memory2D::from_buffer(buffer, 0, 2, 3, 1).unwrap();
/// assert_eq!(view.to_vec(), [1, 2, 3, 5, 6, 7]);
///
/// let column = view.slice(0, 1, 2, 1).unwrap();
/// assert_eq!(column.to_vec(), [2, 6]);
/// assert_eq!(column.pitch(), 3);
/// ```
#[repr(C)]
pub struct Memory2D<T, B = ThreadSafe>
where
    B: Backend,
{
    backing: Option<Backing<T, B>>,
    offset: usize,
    height: usize,
    width: usize,
    pitch: usize,
}

impl<T, B> Memory2D<T, B>
where
    B: Backend,
{
    /// Creates the empty view.
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::Memory2D;
    /// let view = Memory2D::<u8>::new();
    /// assert!(view.is_empty());
    /// assert_eq!(view, Memory2D::default());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            backing: None,
            offset: 0,
            height: 0,
            width: 0,
            pitch: 0,
        }
    }

    /// Builds a view from already validated parts.
    #[inline]
    pub(crate) fn from_parts(
        backing: Option<Backing<T, B>>,
        offset: usize,
        height: usize,
        width: usize,
        pitch: usize,
    ) -> Self {
        if height == 0 || width == 0 {
            return Self::new();
        }
        Self {
            backing,
            offset,
            height,
            width,
            pitch,
        }
    }

    fn checked(
        backing: Backing<T, B>,
        offset: usize,
        height: usize,
        width: usize,
        pitch: usize,
    ) -> Result<Self, Error> {
        check_area(backing.len(), offset, height, width, pitch)?;
        Ok(Self::from_parts(Some(backing), offset, height, width, pitch))
    }

    /// Creates a view over a linear buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRange`] if `offset` exceeds the buffer length, or if
    ///   the area of the region overflows,
    /// - [`Error::AreaMismatch`] if the region does not fit after `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Buffer, Memory2D, Param};
    /// let buffer = Buffer::from(vec![0_u8; 8]);
    /// assert!(Memory2D::from_buffer(buffer.clone(), 0, 2, 3, 1).is_ok());
    ///
    /// let err = Memory2D::from_buffer(buffer, 9, 1, 1, 0).unwrap_err();
    /// assert_eq!(err.param(), Some(Param::Offset));
    /// ```
    pub fn from_buffer(
        buffer: Buffer<T, B>,
        offset: usize,
        height: usize,
        width: usize,
        pitch: usize,
    ) -> Result<Self, Error> {
        Self::checked(Backing::Buffer(buffer), offset, height, width, pitch)
    }

    /// Creates a view over the packed `height` × `width` start of a buffer.
    ///
    /// # Errors
    ///
    /// See [`Memory2D::from_buffer`].
    pub fn from_buffer_shape(
        buffer: Buffer<T, B>,
        height: usize,
        width: usize,
    ) -> Result<Self, Error> {
        Self::from_buffer(buffer, 0, height, width, 0)
    }

    /// Creates a view over the bytes of a text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] unless `T` is `u8`, before any other
    /// check; otherwise see [`Memory2D::from_buffer`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Memory2D, Text};
    /// let text = Text::from("abcdefgh");
    /// let view = Memory2D::<u8>::from_text(text.clone(), 1, 2, 2, 2).unwrap();
    /// assert_eq!(view.to_vec(), b"bcfg");
    ///
    /// assert!(Memory2D::<u16>::from_text(text, 0, 1, 1, 0).is_err());
    /// ```
    pub fn from_text(
        text: Text<B>,
        offset: usize,
        height: usize,
        width: usize,
        pitch: usize,
    ) -> Result<Self, Error>
    where
        T: 'static,
    {
        check_text_element::<T>()?;
        Self::checked(Backing::Text(text), offset, height, width, pitch)
    }

    /// Creates a view over the packed `height` × `width` start of a text.
    ///
    /// # Errors
    ///
    /// See [`Memory2D::from_text`].
    pub fn from_text_shape(text: Text<B>, height: usize, width: usize) -> Result<Self, Error>
    where
        T: 'static,
    {
        Self::from_text(text, 0, height, width, 0)
    }

    /// Creates a view over a memory block.
    ///
    /// `offset` is relative to the start of the block.
    ///
    /// # Errors
    ///
    /// See [`Memory2D::from_buffer`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Buffer, Memory, Memory2D};
    /// let memory = Memory::from(Buffer::from(vec![1, 2, 3, 4, 5, 6])).slice(2..);
    /// let view = Memory2D::from_memory(memory, 0, 2, 2, 0).unwrap();
    /// assert_eq!(view.to_vec(), [3, 4, 5, 6]);
    /// ```
    pub fn from_memory(
        memory: Memory<T, B>,
        offset: usize,
        height: usize,
        width: usize,
        pitch: usize,
    ) -> Result<Self, Error> {
        Self::checked(Backing::Memory(memory), offset, height, width, pitch)
    }

    /// Creates a view over a rectangle of a 2D buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `row` or `column` is not within the
    /// buffer (even for a zero-sized rectangle), or if the rectangle does not
    /// fit.
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Array2, Memory2D};
    /// let array = Array2::from([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
    /// let view = Memory2D::from_array2_rect(array, 1, 1, 2, 2).unwrap();
    /// assert_eq!(view.to_vec(), [5, 6, 8, 9]);
    /// assert_eq!(view.pitch(), 1);
    /// ```
    pub fn from_array2_rect(
        array: Array2<T, B>,
        row: usize,
        column: usize,
        height: usize,
        width: usize,
    ) -> Result<Self, Error> {
        let shape = (array.rows(), array.columns(), 0);
        let (offset, pitch) = sub_rect(shape, row, column, height, width)?;
        Ok(Self::from_parts(
            Some(Backing::Array2(array)),
            offset,
            height,
            width,
            pitch,
        ))
    }

    /// Creates a view over a whole layer of a 3D buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `depth` is not within the buffer.
    pub fn from_array3(array: Array3<T, B>, depth: usize) -> Result<Self, Error> {
        if depth >= array.depth() {
            return Err(Error::out_of_range(Param::Depth, depth, array.depth()));
        }
        let (rows, columns) = (array.rows(), array.columns());
        let offset = depth * rows * columns;
        Ok(Self::from_parts(
            Some(Backing::Array3(array)),
            offset,
            rows,
            columns,
            0,
        ))
    }

    /// Creates a view over a rectangle of a layer of a 3D buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `depth`, `row` or `column` is not
    /// within the buffer, or if the rectangle does not fit.
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Array3, Memory2D};
    /// let array = Array3::from_fn(2, 3, 3, |d, r, c| d * 100 + r * 10 + c);
    /// let view = Memory2D::from_array3_rect(array, 1, 0, 1, 2, 2).unwrap();
    /// assert_eq!(view.to_vec(), [101, 102, 111, 112]);
    /// ```
    pub fn from_array3_rect(
        array: Array3<T, B>,
        depth: usize,
        row: usize,
        column: usize,
        height: usize,
        width: usize,
    ) -> Result<Self, Error> {
        if depth >= array.depth() {
            return Err(Error::out_of_range(Param::Depth, depth, array.depth()));
        }
        let (rows, columns) = (array.rows(), array.columns());
        let (shift, pitch) = sub_rect((rows, columns, 0), row, column, height, width)?;
        let offset = depth * rows * columns + shift;
        Ok(Self::from_parts(
            Some(Backing::Array3(array)),
            offset,
            height,
            width,
            pitch,
        ))
    }

    /// Creates a view without checking that the region fits in the backing.
    ///
    /// # Errors
    ///
    /// - [`Error::TypeMismatch`] for a text backing unless `T` is `u8`,
    /// - [`Error::OutOfRange`] if the area of the region overflows.
    ///
    /// # Safety
    ///
    /// For a non-empty region, the `width + (width + pitch) * (height - 1)`
    /// elements from `offset` must lie within the backing.
    pub unsafe fn from_raw_parts(
        backing: Backing<T, B>,
        offset: usize,
        height: usize,
        width: usize,
        pitch: usize,
    ) -> Result<Self, Error>
    where
        T: 'static,
    {
        if let Backing::Text(_) = backing {
            check_text_element::<T>()?;
        }
        if height != 0 && width != 0 {
            area(height, width, pitch)?;
        }
        Ok(Self::from_parts(Some(backing), offset, height, width, pitch))
    }

    /// Returns `true` if the view has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.backing.is_none()
    }

    /// Returns the number of elements, `height * width`.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.height * self.width
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

    /// Returns the position of the first element within the backing.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the backing store, `None` for the empty view.
    #[inline]
    #[must_use]
    pub const fn backing(&self) -> Option<&Backing<T, B>> {
        self.backing.as_ref()
    }

    /// Resolves the view into a borrowed span.
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

    /// Extracts a sub-view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `row` or `column` is not within the
    /// view, or if the rectangle does not fit.
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Array2, Memory2D};
    /// let view = Memory2D::from(Array2::from([[1, 2, 3], [4, 5, 6]]));
    /// let sub = view.slice(1, 1, 1, 2).unwrap();
    /// assert_eq!(sub.to_vec(), [5, 6]);
    /// assert!(view.slice(2, 0, 0, 0).is_err());
    /// ```
    pub fn slice(
        &self,
        row: usize,
        column: usize,
        height: usize,
        width: usize,
    ) -> Result<Self, Error> {
        let shape = (self.height, self.width, self.pitch);
        let (shift, pitch) = sub_rect(shape, row, column, height, width)?;
        Ok(Self::from_parts(
            self.backing.clone(),
            self.offset + shift,
            height,
            width,
            pitch,
        ))
    }

    /// Copies the elements, row by row, into the start of `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `destination` is shorter than
    /// [`Memory2D::len`].
    pub fn copy_to(&self, destination: &mut [T]) -> Result<(), Error>
    where
        T: Clone,
    {
        self.span().copy_to(destination)
    }

    /// Copies the elements into the start of `destination`, if it is long
    /// enough.
    pub fn try_copy_to(&self, destination: &mut [T]) -> bool
    where
        T: Clone,
    {
        self.copy_to(destination).is_ok()
    }

    /// Copies the elements into a writable view of the same shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the shapes differ.
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Array2, Memory2D, Memory2DMut};
    /// let view = Memory2D::from(Array2::from([[1, 2], [3, 4]]));
    /// let mut target = Memory2DMut::<i32>::from_vec(vec![0; 6], 1, 2, 2, 1).unwrap();
    /// view.copy_to_2d(&mut target).unwrap();
    /// assert_eq!(target.span().to_vec(), [1, 2, 3, 4]);
    /// ```
    pub fn copy_to_2d<B2>(&self, destination: &mut Memory2DMut<T, B2>) -> Result<(), Error>
    where
        T: Clone,
        B2: Backend,
    {
        let required = (self.height, self.width);
        let available = (destination.height(), destination.width());
        if required != available {
            return Err(Error::ShapeMismatch {
                required,
                available,
            });
        }
        for (i, source) in self.span().rows().enumerate() {
            // a writable view never shares its buffer, every row is reachable
            let target = destination.row_mut(i);
            debug_assert!(target.is_some(), "row {i} of a writable view is shared");
            if let Some(target) = target {
                target.clone_from_slice(source);
            }
        }
        Ok(())
    }

    /// Copies the elements into a writable view, if the shapes match.
    pub fn try_copy_to_2d<B2>(&self, destination: &mut Memory2DMut<T, B2>) -> bool
    where
        T: Clone,
        B2: Backend,
    {
        self.copy_to_2d(destination).is_ok()
    }

    /// Returns the elements as a linear memory block sharing the backing,
    /// if the rows are packed (zero pitch).
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Buffer, Memory2D};
    /// let buffer = Buffer::from(vec![1, 2, 3, 4, 5, 6, 7]);
    /// let packed = Memory2D::from_buffer(buffer.clone(), 1, 2, 3, 0).unwrap();
    /// assert_eq!(packed.try_flatten().unwrap().as_slice(), &[2, 3, 4, 5, 6, 7]);
    ///
    /// let strided = Memory2D::from_buffer(buffer, 0, 2, 3, 1).unwrap();
    /// assert!(strided.try_flatten().is_none());
    /// ```
    #[must_use]
    pub fn try_flatten(&self) -> Option<Memory<T, B>> {
        if self.pitch != 0 {
            return None;
        }
        let Some(backing) = &self.backing else {
            return Some(Memory::new());
        };
        let len = self.len();
        match backing {
            Backing::Memory(memory) => memory.try_slice(self.offset..self.offset + len).ok(),
            // SAFETY: view invariant, the packed area lies within the storage
            _ => backing
                .to_storage()
                .map(|storage| unsafe { Memory::from_parts(storage, self.offset, len) }),
        }
    }

    /// Copies the elements into a new 2D buffer of the same shape.
    #[must_use]
    pub fn to_array(&self) -> Array2<T, B>
    where
        T: Clone,
    {
        Array2::from_packed(self.height, self.width, self.to_vec())
    }

    /// Copies the elements into a new vector, in row-major order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.span().to_vec()
    }

    /// Pins the backing store and returns a guard on the first element.
    ///
    /// The guard keeps the backing store alive: the address stays valid
    /// until the guard is dropped, even if every view is dropped before.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPin`] if `T` owns resources (i.e. needs to
    /// be dropped).
    pub fn pin(&self) -> Result<PinGuard<T, B>, Error> {
        let Some(backing) = &self.backing else {
            return Ok(PinGuard::empty());
        };
        let storage = match backing {
            Backing::Memory(memory) => {
                let guard = memory.pin()?;
                // SAFETY: view invariant, `offset` lies within the block
                return Ok(unsafe { guard.advance(self.offset) });
            }
            Backing::Buffer(b) => Storage::Buffer(b.clone()),
            Backing::Array2(a) => Storage::Array2(a.clone()),
            Backing::Array3(a) => Storage::Array3(a.clone()),
            Backing::Text(t) => Storage::Text(t.clone()),
        };
        check_pinnable::<T>()?;
        // SAFETY: view invariant, `offset` lies within the storage
        Ok(unsafe { PinGuard::new(storage, self.offset) })
    }
}

impl<T, B> Clone for Memory2D<T, B>
where
    B: Backend,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            backing: self.backing.clone(),
            offset: self.offset,
            height: self.height,
            width: self.width,
            pitch: self.pitch,
        }
    }
}

impl<T, B> Default for Memory2D<T, B>
where
    B: Backend,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> fmt::Debug for Memory2D<T, B>
where
    T: fmt::Debug,
    B: Backend,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory2D")
            .field("backing", &self.backing)
            .field("offset", &self.offset)
            .field("height", &self.height)
            .field("width", &self.width)
            .field("pitch", &self.pitch)
            .field("rows", &self.span())
            .finish()
    }
}

impl<T, B> fmt::Display for Memory2D<T, B>
where
    B: Backend,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Memory2D<{}>[{}, {}]",
            core::any::type_name::<T>(),
            self.height,
            self.width
        )
    }
}
