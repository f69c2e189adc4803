//! Identity comparison of views.

use core::hash::{Hash, Hasher};

use super::{Backing, Memory2D};
use crate::Backend;

impl<T, B> Eq for Memory2D<T, B> where B: Backend {}

impl<T, B> PartialEq for Memory2D<T, B>
where
    B: Backend,
{
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
            && self.height == other.height
            && self.width == other.width
            && self.pitch == other.pitch
            && match (&self.backing, &other.backing) {
                (Some(a), Some(b)) => a.same(b),
                (None, None) => true,
                _ => false,
            }
    }
}

impl<T, B> Hash for Memory2D<T, B>
where
    B: Backend,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.backing.as_ref().map(Backing::identity).hash(state);
        self.offset.hash(state);
        self.height.hash(state);
        self.width.hash(state);
        self.pitch.hash(state);
    }
}
