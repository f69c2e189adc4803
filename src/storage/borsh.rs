//! Borsh support for `Buffer` and `Array2`.
//!
//! A buffer is encoded like a `Vec<T>` (`u32` length then elements), a 2D
//! buffer as its `u32` row and column counts followed by its row-major
//! elements.

use borsh::io::{self};
use borsh::{BorshDeserialize, BorshSerialize};

use super::{Array2, Buffer};
use crate::alloc::vec::Vec;
use crate::Backend;


/// Upper bound of the initial allocation when decoding untrusted lengths.
const PREALLOCATION: usize = 4096;

impl<T, B> BorshSerialize for Buffer<T, B>
where
    T: BorshSerialize,
    B: Backend,
{
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.as_slice().serialize(writer)
    }
}

impl<T, B> BorshDeserialize for Buffer<T, B>
where
    T: BorshDeserialize,
    B: Backend,
{
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        Vec::<T>::deserialize_reader(reader).map(Self::from_vec)
    }
}

fn dimension(value: usize) -> io::Result<u32> {
    u32::try_from(value).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "dimension exceeds u32::MAX")
    })
}

impl<T, B> BorshSerialize for Array2<T, B>
where
    T: BorshSerialize,
    B: Backend,
{
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        dimension(self.rows())?.serialize(writer)?;
        dimension(self.columns())?.serialize(writer)?;
        for element in self.as_slice() {
            element.serialize(writer)?;
        }
        Ok(())
    }
}

impl<T, B> BorshDeserialize for Array2<T, B>
where
    T: BorshDeserialize,
    B: Backend,
{
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let rows = u32::deserialize_reader(reader)? as usize;
        let columns = u32::deserialize_reader(reader)? as usize;
        let Some(len) = rows.checked_mul(columns) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "2D buffer size overflows",
            ));
        };
        // zero-sized elements read no bytes, the length alone would drive the loop
        if core::mem::size_of::<T>() == 0 && len != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "2D buffer of zero-sized elements",
            ));
        }
        let mut data = Vec::with_capacity(len.min(PREALLOCATION));
        for _ in 0..len {
            data.push(T::deserialize_reader(reader)?);
        }
        Ok(Self::from_packed(rows, columns, data))
    }
}
