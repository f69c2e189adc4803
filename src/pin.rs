//! Scoped address-stability guards.
//!
//! Rust never relocates a live heap allocation, so pinning a storage does not
//! involve the allocator. A [`PinGuard`] instead keeps a strong reference on
//! the storage (the address stays valid even if every view is dropped) and
//! registers itself in the storage's pin counter until it is dropped.

use core::ptr;

use crate::alloc::fmt;
use crate::error::Error;
use crate::macros::{debug, trace};
use crate::storage::{Buffer, Storage};
use crate::Backend;

/// Checks that elements of type `T` can be handed out as raw memory.
///
/// Types that need to be dropped own resources (heap pointers, handles) and
/// are refused.
pub(crate) fn check_pinnable<T>() -> Result<(), Error> {
    if core::mem::needs_drop::<T>() {
        let element = core::any::type_name::<T>();
        debug!(target: "memory2d::pin", element, "pin refused");
        Err(Error::UnsupportedPin { element })
    } else {
        Ok(())
    }
}

/// Handle guaranteeing that the address returned by [`PinGuard::as_ptr`]
/// stays valid and stable while the guard is alive.
///
/// Guards of empty views are no-ops: they hold nothing and point to null.
///
/// # Examples
///
/// ```
/// # use memory2d::{Buffer, Memory2D};
/// let buffer = Buffer::from(vec![1_u32, 2, 3, 4, 5, 6]);
/// let view = Memory2D::from_buffer(buffer.clone(), 1, 2, 2, 1).unwrap();
/// {
///     let guard = view.pin().unwrap();
///     assert!(buffer.is_pinned());
///     assert_eq!(unsafe { *guard.as_ptr() }, 2);
/// }
/// assert!(!buffer.is_pinned());
/// ```
#[must_use = "the pin is released as soon as the guard is dropped"]
pub struct PinGuard<T, B>
where
    B: Backend,
{
    ptr: *const T,
    anchor: Option<Storage<T, B>>,
}

impl<T, B> PinGuard<T, B>
where
    B: Backend,
{
    /// Guard of an empty view.
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: ptr::null(),
            anchor: None,
        }
    }

    /// Pins `anchor` and points at its `index`-th element.
    ///
    /// # Safety
    ///
    /// `index` must not exceed the length of the storage.
    pub(crate) unsafe fn new(anchor: Storage<T, B>, index: usize) -> Self {
        debug_assert!(index <= anchor.len());
        anchor.pin();
        // SAFETY: precondition, `index` stays within the allocation
        let ptr = unsafe { anchor.base().add(index) };
        trace!(
            target: "memory2d::pin",
            storage = anchor.addr(),
            index,
            "pin acquired"
        );
        Self {
            ptr,
            anchor: Some(anchor),
        }
    }

    /// Moves the pinned address `count` elements forward.
    ///
    /// # Safety
    ///
    /// The resulting address must stay within the pinned storage.
    pub(crate) unsafe fn advance(mut self, count: usize) -> Self {
        if self.anchor.is_some() {
            // SAFETY: precondition
            self.ptr = unsafe { self.ptr.add(count) };
        }
        self
    }

    /// Returns the pinned address, or null for the guard of an empty view.
    #[inline]
    #[must_use]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Returns `true` if this guard actually holds a pin.
    #[inline]
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.anchor.is_some()
    }
}

impl<T, B> Drop for PinGuard<T, B>
where
    B: Backend,
{
    fn drop(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            anchor.unpin();
            trace!(target: "memory2d::pin", storage = anchor.addr(), "pin released");
        }
    }
}

impl<T, B> fmt::Debug for PinGuard<T, B>
where
    B: Backend,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinGuard")
            .field("ptr", &self.ptr)
            .field("pinned", &self.is_pinned())
            .finish()
    }
}

unsafe impl<T, B> Send for PinGuard<T, B>
where
    B: Backend,
    Buffer<T, B>: Send,
{
}

unsafe impl<T, B> Sync for PinGuard<T, B>
where
    B: Backend,
    Buffer<T, B>: Sync,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::vec;
    use crate::{Buffer, Text};

    #[test]
    fn test_check_pinnable() {
        use crate::alloc::string::String;

        assert!(check_pinnable::<u64>().is_ok());
        assert!(check_pinnable::<(u8, f32)>().is_ok());
        assert_eq!(
            check_pinnable::<String>(),
            Err(Error::UnsupportedPin {
                element: core::any::type_name::<String>()
            })
        );
    }

    #[test]
    fn test_empty_guard() {
        let g = PinGuard::<u8, crate::ThreadSafe>::empty();
        assert!(!g.is_pinned());
        assert!(g.as_ptr().is_null());
        let g = unsafe { g.advance(3) };
        assert!(g.as_ptr().is_null());
    }

    #[test]
    fn test_nested_guards() {
        let buffer = Buffer::from(vec![1, 2, 3]);
        let storage = Storage::Buffer(buffer.clone());
        let a = unsafe { PinGuard::new(storage.clone(), 0) };
        let b = unsafe { PinGuard::new(storage, 2) };
        assert_eq!(buffer.pin_count(), 2);
        assert_eq!(unsafe { *a.as_ptr() }, 1);
        assert_eq!(unsafe { *b.as_ptr() }, 3);
        drop(a);
        assert_eq!(buffer.pin_count(), 1);
        let b = unsafe { b.advance(0) };
        assert!(b.is_pinned());
        drop(b);
        assert_eq!(buffer.pin_count(), 0);
    }

    #[test]
    fn test_guard_outlives_storage_handles() {
        let text = Text::from("pinned");
        let guard = unsafe { PinGuard::<u8, _>::new(Storage::Text(text.clone()), 1) };
        assert_eq!(text.pin_count(), 1);
        drop(text);
        assert_eq!(unsafe { *guard.as_ptr() }, b'i');
    }
}
