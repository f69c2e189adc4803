//! `bstr` support for byte storages.

use bstr::{BStr, BString, ByteSlice, Utf8Error};

use super::{Buffer, Text};
use crate::alloc::vec::Vec;
use crate::macros::symmetric_eq;
use crate::Backend;

impl<B> Buffer<u8, B>
where
    B: Backend,
{
    /// Returns the bytes as a byte string.
    #[inline]
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.as_slice().as_bstr()
    }
}

impl<B> AsRef<BStr> for Buffer<u8, B>
where
    B: Backend,
{
    #[inline]
    fn as_ref(&self) -> &BStr {
        self.as_bstr()
    }
}

impl<B> From<&BStr> for Buffer<u8, B>
where
    B: Backend,
{
    #[inline]
    fn from(value: &BStr) -> Self {
        Self::from(value.as_bytes())
    }
}

impl<B> From<BString> for Buffer<u8, B>
where
    B: Backend,
{
    #[inline]
    fn from(value: BString) -> Self {
        Self::from_vec(Vec::from(value))
    }
}

impl<B> Text<B>
where
    B: Backend,
{
    /// Returns the UTF-8 bytes as a byte string.
    #[inline]
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.as_bytes().as_bstr()
    }
}

impl<B> AsRef<BStr> for Text<B>
where
    B: Backend,
{
    #[inline]
    fn as_ref(&self) -> &BStr {
        self.as_bstr()
    }
}

impl<B> TryFrom<&BStr> for Text<B>
where
    B: Backend,
{
    type Error = Utf8Error;

    #[inline]
    fn try_from(value: &BStr) -> Result<Self, Self::Error> {
        value.to_str().map(Self::from)
    }
}

impl<B> From<Text<B>> for BString
where
    B: Backend,
{
    #[inline]
    fn from(value: Text<B>) -> Self {
        Self::from(value.as_str())
    }
}

#[inline]
fn eq_bstr<B: Backend>(a: &BStr, b: &Text<B>) -> bool {
    a == b.as_bytes()
}

symmetric_eq! {
    [B] [where B: Backend] (BStr, Text<B>) = eq_bstr;
}
