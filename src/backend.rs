//! Sealed backend trait, the built-in counters and the shared cell they drive.
//!
//! A backend decides how the storage behind a view is shared:
//!
//! - [`Local`]: plain (non-atomic) counters, for single-threaded use,
//! - [`ThreadSafe`]: atomic counters, storages and views are `Send + Sync`.
//!
//! Each shared allocation carries two counters: the usual reference count and
//! a pin count, incremented by every live [`PinGuard`](crate::PinGuard).

use core::cell::Cell;
use core::marker::PhantomData;
use core::ptr::NonNull;
#[cfg(not(loom))]
use core::sync::atomic::{fence, AtomicUsize, Ordering};

#[cfg(loom)]
use loom::sync::atomic::{fence, AtomicUsize, Ordering};

use crate::alloc::boxed::Box;


mod private {
    pub trait Sealed {}
}

/// Trait for a basic counter.
pub trait Count: private::Sealed {
    /// Creates a new counter starting at `value`.
    fn with(value: usize) -> Self;

    /// Increments the counter and returns true iff the counter reaches `usize::MAX`.
    fn incr(&self) -> bool;

    /// Decrements the counter and returns true iff the counter reaches zero.
    fn decr(&self) -> bool;

    /// Returns the current value of the counter.
    fn get(&self) -> usize;
}

/// Sealed marker trait for the sharing strategy of a storage.
pub trait Backend: Count + 'static {}

/// Local (not thread-safe) counter.
pub struct Local(Cell<usize>);

/// Thread-safe counter.
pub struct ThreadSafe(AtomicUsize);

impl private::Sealed for Local {}
impl private::Sealed for ThreadSafe {}

impl Backend for Local {}
impl Backend for ThreadSafe {}

impl Count for Local {
    #[inline]
    fn with(value: usize) -> Self {
        Self(Cell::new(value))
    }

    #[inline]
    fn incr(&self) -> bool {
        let new_value = self.0.get().saturating_add(1);
        self.0.set(new_value);
        new_value == usize::MAX
    }

    #[inline]
    fn decr(&self) -> bool {
        let new_value = self.0.get().saturating_sub(1);
        self.0.set(new_value);
        new_value == 0
    }

    #[inline]
    fn get(&self) -> usize {
        self.0.get()
    }
}

impl Count for ThreadSafe {
    #[inline]
    fn with(value: usize) -> Self {
        Self(AtomicUsize::new(value))
    }

    #[inline]
    fn incr(&self) -> bool {
        let old = self.0.fetch_add(1, Ordering::Relaxed);
        old == usize::MAX - 1
    }

    #[inline]
    fn decr(&self) -> bool {
        let old_value = self.0.fetch_sub(1, Ordering::Release);
        if old_value == 1 {
            fence(Ordering::Acquire);
            true
        } else {
            false
        }
    }

    #[inline]
    fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}

/// Shared inner cell.
struct Inner<T, B: Backend> {
    count: B,
    pins: B,
    value: T,
}

/// Reference-counted pointer to an immutable value, with a pin counter.
///
/// All storages are thin wrappers around this pointer; cloning a storage
/// never copies its elements.
pub(crate) struct Shared<T, B: Backend>(NonNull<Inner<T, B>>, PhantomData<Inner<T, B>>);

impl<T, B: Backend> Shared<T, B> {
    /// Creates a new shared cell owning `value`.
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        let ptr = Box::into_raw(Box::new(Inner {
            count: B::with(1),
            pins: B::with(0),
            value,
        }));
        // SAFETY: `Box::into_raw` never returns null
        Self(unsafe { NonNull::new_unchecked(ptr) }, PhantomData)
    }

    #[inline]
    const fn inner(&self) -> &Inner<T, B> {
        // SAFETY: type invariant, the pointer is valid as long as `self` lives
        unsafe { self.0.as_ref() }
    }

    /// Gets a reference to the value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.inner().value
    }

    /// Returns `true` if both pointers share the same allocation.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    /// Address of the allocation, used as identity.
    #[inline]
    #[must_use]
    pub fn addr(&self) -> usize {
        self.0.as_ptr() as usize
    }

    /// Checks if this reference is unique.
    #[inline]
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.inner().count.get() == 1
    }

    /// Gets the reference count.
    #[inline]
    #[must_use]
    pub fn ref_count(&self) -> usize {
        self.inner().count.get()
    }

    /// Gets a mutable reference to the value, if this reference is unique.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.is_unique() {
            // SAFETY: uniqueness checked, no other reference can observe the value
            Some(unsafe { &mut self.0.as_mut().value })
        } else {
            None
        }
    }

    /// Registers a pin on the shared allocation.
    ///
    /// # Panics
    ///
    /// Panics if the pin counter overflows.
    #[inline]
    pub fn pin(&self) {
        if self.inner().pins.incr() {
            panic!("pin count overflow");
        }
    }

    /// Releases a pin previously registered with [`Self::pin`].
    #[inline]
    pub fn unpin(&self) {
        debug_assert!(self.pin_count() > 0, "unbalanced unpin");
        let _ = self.inner().pins.decr();
    }

    /// Gets the number of live pins.
    #[inline]
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.inner().pins.get()
    }
}

impl<T, B: Backend> Clone for Shared<T, B> {
    fn clone(&self) -> Self {
        if self.inner().count.incr() {
            panic!("ref count overflow")
        }
        Self(self.0, PhantomData)
    }
}

impl<T, B: Backend> Drop for Shared<T, B> {
    fn drop(&mut self) {
        if self.inner().count.decr() {
            // SAFETY: last reference, the allocation comes from `Box::into_raw`
            let _ = unsafe { Box::from_raw(self.0.as_ptr()) };
        }
    }
}

// `Local` is `!Sync` (it wraps a `Cell`), which rules out both impls for it.
unsafe impl<T, B> Send for Shared<T, B>
where
    T: Send + Sync,
    B: Backend + Send + Sync,
{
}

unsafe impl<T, B> Sync for Shared<T, B>
where
    T: Send + Sync,
    B: Backend + Send + Sync,
{
}
