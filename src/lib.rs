//! Zero-copy **read-only 2D views** for Rust 🦀
//!
//! * no copy **slicing** of rows and columns
//! * **five backing stores**: linear buffers, 2D and 3D buffers, texts and
//!   memory blocks
//! * scoped **pinning** of the underlying address
//! * **zero dependency**, except for optional `serde`, `borsh`, `bstr` and
//!   `tracing` support
//!
//! # Examples
//!
//! ```rust
//! use memory2d::{Buffer, Memory2D};
//!
//! // 2 rows of 3 elements, skipping 1 element between rows
//! let buffer = Buffer::from(vec![1, 2, 3, 4, 5, 6, 7, 8]);
//! let view = Memory2D::from_buffer(buffer, 0, 2, 3, 1).unwrap();
//! assert_eq!(view.to_vec(), [1, 2, 3, 5, 6, 7]);
//!
//! let clone = view.clone(); // no copy
//! std::thread::spawn(move || { println!("{clone}"); });
//!
//! let corner = view.slice(1, 1, 1, 2).unwrap(); // no copy
//! drop(view); // the slice is _owned_, it exists even if the view disappears
//! assert_eq!(corner.span().row(0), Some(&[6, 7][..]));
//! ```
//!
//! # Views and Storages
//!
//! - [`Memory2D<T, B>`](crate::memory2d::Memory2D) \
//!   the read-only 2D view
//! - [`Memory2DMut<T, B>`](crate::memory2d_mut::Memory2DMut) \
//!   its uniquely owned, writable sibling
//! - [`Buffer`](crate::storage::Buffer), [`Array2`](crate::storage::Array2),
//!   [`Array3`](crate::storage::Array3), [`Text`](crate::storage::Text) \
//!   the shared storages
//! - [`Memory<T, B>`](crate::memory::Memory) \
//!   a linear window over a storage
//!
//! where `B` is a backend, see below.
//!
//! # Two Backends
//!
//! The crate provides two backends for the reference counters of the
//! storages:
//!
//! - `ThreadSafe` (atomic counters),
//! - `Local` (plain cells).
//!
//! The crate root also provides some convenience type aliases:
//!
//! - `memory2d::Memory2D`, `memory2d::Buffer`, etc. that set `B` to
//!   `ThreadSafe`,
//! - `memory2d::LocalMemory2D`, `memory2d::LocalBuffer`, etc. that set `B` to
//!   `Local`.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(not(feature = "std"))]
pub(crate) extern crate alloc;

#[cfg(feature = "std")]
pub(crate) use std as alloc;

mod backend;
mod common;
pub mod error;
mod macros;
pub mod memory;
pub mod memory2d;
pub mod memory2d_mut;
mod pin;
pub mod span;
pub mod storage;

pub use backend::{Backend, Local, ThreadSafe};
pub use common::RangeError;
pub use error::{Error, Param};
pub use memory2d::Backing;
pub use pin::PinGuard;

/// Thread-safe shared linear buffer.
pub type Buffer<T> = storage::Buffer<T, ThreadSafe>;

/// Thread-safe shared 2D buffer.
pub type Array2<T> = storage::Array2<T, ThreadSafe>;

/// Thread-safe shared 3D buffer.
pub type Array3<T> = storage::Array3<T, ThreadSafe>;

/// Thread-safe shared text.
pub type Text = storage::Text<ThreadSafe>;

/// Thread-safe memory block.
pub type Memory<T> = memory::Memory<T, ThreadSafe>;

/// Thread-safe read-only 2D view.
pub type Memory2D<T> = memory2d::Memory2D<T, ThreadSafe>;

/// Thread-safe writable 2D view.
pub type Memory2DMut<T> = memory2d_mut::Memory2DMut<T, ThreadSafe>;

/// Thread-local shared linear buffer.
pub type LocalBuffer<T> = storage::Buffer<T, Local>;

/// Thread-local shared 2D buffer.
pub type LocalArray2<T> = storage::Array2<T, Local>;

/// Thread-local shared 3D buffer.
pub type LocalArray3<T> = storage::Array3<T, Local>;

/// Thread-local shared text.
pub type LocalText = storage::Text<Local>;

/// Thread-local memory block.
pub type LocalMemory<T> = memory::Memory<T, Local>;

/// Thread-local read-only 2D view.
pub type LocalMemory2D<T> = memory2d::Memory2D<T, Local>;

/// Thread-local writable 2D view.
pub type LocalMemory2DMut<T> = memory2d_mut::Memory2DMut<T, Local>;
