//! Backing stores.
//!
//! This module provides the shared storages a view can address:
//!
//! - [`Buffer`]: a linear buffer,
//! - [`Array2`]: a row-major 2D buffer,
//! - [`Array3`]: a row-major 3D buffer (depth, rows, columns),
//! - [`Text`]: an immutable UTF-8 text, read as bytes.
//!
//! All of them are cheap handles over a reference-counted allocation: cloning
//! a storage never copies its elements. Storages compare by content; use
//! `ptr_eq` to compare identities.

use core::hash::{Hash, Hasher};
use core::ops::Deref;

use crate::alloc::borrow::ToOwned;
use crate::alloc::boxed::Box;
use crate::alloc::string::String;
use crate::alloc::vec::Vec;
use crate::alloc::fmt;
use crate::backend::Shared;
use crate::macros::symmetric_eq;
use crate::{Backend, ThreadSafe};

mod array;

#[cfg(feature = "serde")]
pub(crate) mod serde;

#[cfg(feature = "borsh")]
mod borsh;

#[cfg(feature = "bstr")]
mod bstr;


pub use array::{Array2, Array3};

/// Shared linear buffer.
///
/// # Examples
///
/// ```
/// # use memory2d::Buffer;
/// let a = Buffer::from(vec![1, 2, 3]);
/// let b = a.clone(); // no copy
/// assert!(a.ptr_eq(&b));
/// assert_eq!(b, [1, 2, 3]);
/// ```
pub struct Buffer<T, B = ThreadSafe>(pub(crate) Shared<Box<[T]>, B>)
where
    B: Backend;

impl<T, B> Buffer<T, B>
where
    B: Backend,
{
    /// Creates a buffer taking ownership of the vector.
    #[inline]
    #[must_use]
    pub fn from_vec(vec: Vec<T>) -> Self {
        Self(Shared::new(vec.into_boxed_slice()))
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.get().len()
    }

    /// Returns `true` if the buffer has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extracts a slice of the entire buffer.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.0.get()
    }

    /// Returns a raw pointer to the first element.
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.0.get().as_ptr()
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

    /// Gets a mutable slice if this handle is the only one on the buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        self.0.get_mut().map(|b| &mut b[..])
    }

    #[cfg(test)]
    pub(crate) fn ref_count(&self) -> usize {
        self.0.ref_count()
    }
}

impl<T, B> Clone for Buffer<T, B>
where
    B: Backend,
{
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T, B> Default for Buffer<T, B>
where
    B: Backend,
{
    #[inline]
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

impl<T, B> Deref for Buffer<T, B>
where
    B: Backend,
{
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, B> AsRef<[T]> for Buffer<T, B>
where
    B: Backend,
{
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, B> From<Vec<T>> for Buffer<T, B>
where
    B: Backend,
{
    #[inline]
    fn from(value: Vec<T>) -> Self {
        Self::from_vec(value)
    }
}

impl<T, B> From<Box<[T]>> for Buffer<T, B>
where
    B: Backend,
{
    #[inline]
    fn from(value: Box<[T]>) -> Self {
        Self(Shared::new(value))
    }
}

impl<T, B> From<&[T]> for Buffer<T, B>
where
    T: Clone,
    B: Backend,
{
    #[inline]
    fn from(value: &[T]) -> Self {
        Self::from_vec(value.to_vec())
    }
}

impl<T, B, const N: usize> From<[T; N]> for Buffer<T, B>
where
    B: Backend,
{
    #[inline]
    fn from(value: [T; N]) -> Self {
        Self::from_vec(Vec::from(value))
    }
}

impl<T, B> FromIterator<T> for Buffer<T, B>
where
    B: Backend,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T, B> Eq for Buffer<T, B>
where
    T: Eq,
    B: Backend,
{
}

impl<T, B1, B2> PartialEq<Buffer<T, B1>> for Buffer<T, B2>
where
    T: PartialEq,
    B1: Backend,
    B2: Backend,
{
    #[inline]
    fn eq(&self, other: &Buffer<T, B1>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, B, const N: usize> PartialEq<[T; N]> for Buffer<T, B>
where
    T: PartialEq,
    B: Backend,
{
    #[inline]
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

#[inline]
fn eq_slice<T: PartialEq, B: Backend>(a: &[T], b: &Buffer<T, B>) -> bool {
    a == b.as_slice()
}

#[inline]
fn eq_vec<T: PartialEq, B: Backend>(a: &Vec<T>, b: &Buffer<T, B>) -> bool {
    a.as_slice() == b.as_slice()
}

symmetric_eq! {
    [T, B] [where T: PartialEq, B: Backend] ([T], Buffer<T, B>) = eq_slice;
    [T, B] [where T: PartialEq, B: Backend] (Vec<T>, Buffer<T, B>) = eq_vec;
}

impl<T, B> Hash for Buffer<T, B>
where
    T: Hash,
    B: Backend,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, B> fmt::Debug for Buffer<T, B>
where
    T: fmt::Debug,
    B: Backend,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

/// Shared immutable text.
///
/// Views over a text address its UTF-8 bytes, so only `u8` views can be built
/// from it.
///
/// # Examples
///
/// ```
/// # use memory2d::Text;
/// let t = Text::from("abcdef");
/// assert_eq!(t.len(), 6);
/// assert_eq!(t, "abcdef");
/// ```
pub struct Text<B = ThreadSafe>(pub(crate) Shared<Box<str>, B>)
where
    B: Backend;

impl<B> Text<B>
where
    B: Backend,
{
    /// Returns the text as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// Returns the UTF-8 bytes of the text.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }

    /// Returns the length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    /// Returns `true` if the text is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if both texts share the same allocation.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// Returns the number of live pins on this text.
    #[inline]
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.0.pin_count()
    }

    /// Returns `true` if at least one pin guard holds this text.
    #[inline]
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pin_count() != 0
    }
}

impl<B> Clone for Text<B>
where
    B: Backend,
{
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<B> Deref for Text<B>
where
    B: Backend,
{
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl<B> From<&str> for Text<B>
where
    B: Backend,
{
    #[inline]
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl<B> From<String> for Text<B>
where
    B: Backend,
{
    #[inline]
    fn from(value: String) -> Self {
        Self(Shared::new(value.into_boxed_str()))
    }
}

impl<B> From<Box<str>> for Text<B>
where
    B: Backend,
{
    #[inline]
    fn from(value: Box<str>) -> Self {
        Self(Shared::new(value))
    }
}

impl<B> Eq for Text<B> where B: Backend {}

impl<B1, B2> PartialEq<Text<B1>> for Text<B2>
where
    B1: Backend,
    B2: Backend,
{
    #[inline]
    fn eq(&self, other: &Text<B1>) -> bool {
        self.as_str() == other.as_str()
    }
}

#[inline]
fn eq_str<B: Backend>(a: &str, b: &Text<B>) -> bool {
    a == b.as_str()
}

#[inline]
fn eq_str_ref<B: Backend>(a: &&str, b: &Text<B>) -> bool {
    *a == b.as_str()
}

symmetric_eq! {
    [B] [where B: Backend] (str, Text<B>) = eq_str;
    ['a, B] [where B: Backend] (&'a str, Text<B>) = eq_str_ref;
}

impl<B> Hash for Text<B>
where
    B: Backend,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<B> fmt::Debug for Text<B>
where
    B: Backend,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<B> fmt::Display for Text<B>
where
    B: Backend,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

/// Storage of a memory block or a pin guard.
///
/// The `Text` variant is only ever built for `T = u8`; every constructor
/// wrapping a text checks the element type first.
pub(crate) enum Storage<T, B>
where
    B: Backend,
{
    Buffer(Buffer<T, B>),
    Array2(Array2<T, B>),
    Array3(Array3<T, B>),
    Text(Text<B>),
}

impl<T, B> Storage<T, B>
where
    B: Backend,
{
    /// Pointer to the first element of the storage.
    #[inline]
    pub fn base(&self) -> *const T {
        match self {
            Self::Buffer(b) => b.as_ptr(),
            Self::Array2(a) => a.as_slice().as_ptr(),
            Self::Array3(a) => a.as_slice().as_ptr(),
            // type invariant: `T = u8`
            Self::Text(t) => t.as_bytes().as_ptr().cast(),
        }
    }

    /// Number of elements in the storage.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Buffer(b) => b.len(),
            Self::Array2(a) => a.len(),
            Self::Array3(a) => a.len(),
            Self::Text(t) => t.len(),
        }
    }

    /// Address of the shared allocation, used as identity.
    #[inline]
    pub fn addr(&self) -> usize {
        match self {
            Self::Buffer(b) => b.0.addr(),
            Self::Array2(a) => a.0.addr(),
            Self::Array3(a) => a.0.addr(),
            Self::Text(t) => t.0.addr(),
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }

    #[inline]
    pub fn pin(&self) {
        match self {
            Self::Buffer(b) => b.0.pin(),
            Self::Array2(a) => a.0.pin(),
            Self::Array3(a) => a.0.pin(),
            Self::Text(t) => t.0.pin(),
        }
    }

    #[inline]
    pub fn unpin(&self) {
        match self {
            Self::Buffer(b) => b.0.unpin(),
            Self::Array2(a) => a.0.unpin(),
            Self::Array3(a) => a.0.unpin(),
            Self::Text(t) => t.0.unpin(),
        }
    }
}

impl<T, B> Clone for Storage<T, B>
where
    B: Backend,
{
    fn clone(&self) -> Self {
        match self {
            Self::Buffer(b) => Self::Buffer(b.clone()),
            Self::Array2(a) => Self::Array2(a.clone()),
            Self::Array3(a) => Self::Array3(a.clone()),
            Self::Text(t) => Self::Text(t.clone()),
        }
    }
}

/// Checks that `T` is the byte type a text is made of.
pub(crate) fn check_text_element<T: 'static>() -> Result<(), crate::Error> {
    if core::any::TypeId::of::<T>() == core::any::TypeId::of::<u8>() {
        Ok(())
    } else {
        Err(crate::Error::type_mismatch::<T, u8>())
    }
}
