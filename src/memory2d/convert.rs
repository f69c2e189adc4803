//! Conversions into views.

use super::{Backing, Memory2D};
use crate::memory2d_mut::Memory2DMut;
use crate::storage::Array2;
use crate::Backend;

impl<T, B> From<Array2<T, B>> for Memory2D<T, B>
where
    B: Backend,
{
    /// Views the whole 2D buffer.
    fn from(array: Array2<T, B>) -> Self {
        let (height, width) = (array.rows(), array.columns());
        Self::from_parts(Some(Backing::Array2(array)), 0, height, width, 0)
    }
}

impl<T, B> Memory2D<T, B>
where
    B: Backend,
{
    const _ASSERTS: () = {
        assert!(size_of::<Self>() == size_of::<Memory2DMut<T, B>>());
        assert!(align_of::<Self>() == align_of::<Memory2DMut<T, B>>());
    };
}

impl<T, B> From<Memory2DMut<T, B>> for Memory2D<T, B>
where
    B: Backend,
{
    /// Gives up write access. Never fails and never copies.
    ///
    /// # Examples
    ///
    /// ```
    /// # use memory2d::{Memory2D, Memory2DMut};
    /// let mut grid = Memory2DMut::<u8>::new(2, 2);
    /// grid.fill(7);
    /// let view = Memory2D::from(grid);
    /// assert_eq!(view.to_vec(), [7, 7, 7, 7]);
    /// ```
    fn from(writable: Memory2DMut<T, B>) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::_ASSERTS;
        let (backing, offset, height, width, pitch) = writable.into_parts();
        Self {
            backing,
            offset,
            height,
            width,
            pitch,
        }
    }
}
