//! Memory blocks.
//!
//! This module provides the [`Memory`] type: a cheaply clonable, sliceable
//! linear view over a backing store.

use core::hash::{Hash, Hasher};
use core::ops::{Deref, RangeBounds};
use core::slice;

use crate::alloc::fmt;
use crate::alloc::vec::Vec;
use crate::common::{self, panic_display, RangeError};
use crate::error::Error;
use crate::pin::{check_pinnable, PinGuard};
use crate::storage::{check_text_element, Array2, Array3, Buffer, Storage, Text};
use crate::{Backend, ThreadSafe};

#[cfg(test)]
mod tests;

/// Contiguous run of elements within a shared storage.
///
/// Slicing a `Memory` never copies: the result addresses the same storage.
/// Two memory blocks are equal if they address the *same* run of the *same*
/// storage; content is not compared.
///
/// # Examples
///
/// ```
/// # use memory2d::{Buffer, Memory};
/// let buffer = Buffer::from(vec![1, 2, 3, 4, 5]);
/// let memory = Memory::from(buffer);
/// let tail = memory.slice(2..);
/// assert_eq!(tail.as_slice(), &[3, 4, 5]);
/// assert_eq!(tail, memory.slice(2..5));
/// ```
pub struct Memory<T, B = ThreadSafe>
where
    B: Backend,
{
    source: Option<Storage<T, B>>,
    start: usize,
    len: usize,
}

impl<T, B> Memory<T, B>
where
    B: Backend,
{
    /// Creates an empty memory block, backed by nothing.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source: None,
            start: 0,
            len: 0,
        }
    }

    fn whole(storage: Storage<T, B>) -> Self {
        let len = storage.len();
        Self {
            source: Some(storage),
            start: 0,
            len,
        }
    }

    /// Creates a memory block over the bytes of a text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] unless `T` is `u8`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Memory, Text};
    /// let m = Memory::<u8>::from_text(Text::from("abc")).unwrap();
    /// assert_eq!(m.as_slice(), b"abc");
    /// assert!(Memory::<u16>::from_text(Text::from("abc")).is_err());
    /// ```
    pub fn from_text(text: Text<B>) -> Result<Self, Error>
    where
        T: 'static,
    {
        check_text_element::<T>()?;
        Ok(Self::whole(Storage::Text(text)))
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the block has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pointer to the first element of the block.
    ///
    /// Dangling (but aligned) when the block is backed by nothing.
    #[inline]
    pub(crate) fn base(&self) -> *const T {
        match &self.source {
            // SAFETY: type invariant, `start + len <= storage.len()`
            Some(storage) => unsafe { storage.base().add(self.start) },
            None => core::ptr::NonNull::dangling().as_ptr(),
        }
    }

    #[inline]
    pub(crate) const fn storage(&self) -> Option<&Storage<T, B>> {
        self.source.as_ref()
    }

    #[inline]
    pub(crate) const fn start(&self) -> usize {
        self.start
    }

    /// Creates a memory block over `len` elements of `storage` from `start`.
    ///
    /// # Safety
    ///
    /// `start + len` must not exceed the length of the storage.
    pub(crate) unsafe fn from_parts(storage: Storage<T, B>, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= storage.len());
        Self {
            source: Some(storage),
            start,
            len,
        }
    }

    /// Extracts a slice of the entire block.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: type invariant, the run lies within the storage kept alive by `self`
        unsafe { slice::from_raw_parts(self.base(), self.len) }
    }

    /// Extracts a sub-block.
    ///
    /// # Panics
    ///
    /// Panics if the range is invalid.
    #[must_use]
    #[track_caller]
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Self {
        match self.try_slice(range) {
            Ok(result) => result,
            Err(err) => panic_display(err),
        }
    }

    /// Extracts a sub-block, if the range is valid.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] if the range is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Buffer, Memory};
    /// let m = Memory::from(Buffer::from(vec![1, 2, 3]));
    /// assert_eq!(m.try_slice(1..).unwrap().as_slice(), &[2, 3]);
    /// assert!(m.try_slice(2..4).is_err());
    /// ```
    pub fn try_slice(&self, range: impl RangeBounds<usize>) -> Result<Self, RangeError> {
        let range = common::range(range, self.len)?;
        Ok(Self {
            source: self.source.clone(),
            start: self.start + range.start,
            len: range.len(),
        })
    }

    /// Pins the block and returns a guard on its first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPin`] if `T` owns resources (i.e. needs to
    /// be dropped): such elements cannot be handed out as raw memory.
    pub fn pin(&self) -> Result<PinGuard<T, B>, Error> {
        let Some(storage) = &self.source else {
            return Ok(PinGuard::empty());
        };
        check_pinnable::<T>()?;
        // SAFETY: type invariant, `start <= storage.len()`
        Ok(unsafe { PinGuard::new(storage.clone(), self.start) })
    }

    /// Copies the elements into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Returns `true` if both blocks are backed by the same storage,
    /// regardless of the addressed runs.
    #[must_use]
    pub fn same_storage(&self, other: &Self) -> bool {
        match (&self.source, &other.source) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T, B> Clone for Memory<T, B>
where
    B: Backend,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            start: self.start,
            len: self.len,
        }
    }
}

impl<T, B> Default for Memory<T, B>
where
    B: Backend,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> Deref for Memory<T, B>
where
    B: Backend,
{
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, B> From<Buffer<T, B>> for Memory<T, B>
where
    B: Backend,
{
    #[inline]
    fn from(value: Buffer<T, B>) -> Self {
        Self::whole(Storage::Buffer(value))
    }
}

impl<T, B> From<Array2<T, B>> for Memory<T, B>
where
    B: Backend,
{
    #[inline]
    fn from(value: Array2<T, B>) -> Self {
        Self::whole(Storage::Array2(value))
    }
}

impl<T, B> From<Array3<T, B>> for Memory<T, B>
where
    B: Backend,
{
    #[inline]
    fn from(value: Array3<T, B>) -> Self {
        Self::whole(Storage::Array3(value))
    }
}

impl<T, B> Eq for Memory<T, B> where B: Backend {}

impl<T, B> PartialEq for Memory<T, B>
where
    B: Backend,
{
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.len == other.len && self.same_storage(other)
    }
}

impl<T, B> Hash for Memory<T, B>
where
    B: Backend,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.as_ref().map_or(0, Storage::addr).hash(state);
        self.start.hash(state);
        self.len.hash(state);
    }
}

impl<T, B> fmt::Debug for Memory<T, B>
where
    T: fmt::Debug,
    B: Backend,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}
