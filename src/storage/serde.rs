//! `serde` support for storages.
//!
//! - [`Buffer`] is a sequence,
//! - [`Text`] is a string,
//! - [`Array2`] is a struct `{ rows, columns, data }` with row-major data.

use core::marker::PhantomData;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Array2, Buffer, Text};
use crate::alloc::fmt;
use crate::alloc::string::String;
use crate::alloc::vec::Vec;
use crate::Backend;

impl<T, B> Serialize for Buffer<T, B>
where
    T: Serialize,
    B: Backend,
{
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_slice().serialize(serializer)
    }
}

impl<'de, T, B> Deserialize<'de> for Buffer<T, B>
where
    T: Deserialize<'de>,
    B: Backend,
{
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(Self::from_vec)
    }
}

impl<B> Serialize for Text<B>
where
    B: Backend,
{
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, B> Deserialize<'de> for Text<B>
where
    B: Backend,
{
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

const ARRAY2_FIELDS: &[&str; 3] = &["rows", "columns", "data"];

impl<T, B> Serialize for Array2<T, B>
where
    T: Serialize,
    B: Backend,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Array2", 3)?;
        state.serialize_field(ARRAY2_FIELDS[0], &self.rows())?;
        state.serialize_field(ARRAY2_FIELDS[1], &self.columns())?;
        state.serialize_field(ARRAY2_FIELDS[2], self.as_slice())?;
        state.end()
    }
}

impl<'de, T, B> Deserialize<'de> for Array2<T, B>
where
    T: Deserialize<'de>,
    B: Backend,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (rows, columns, data) = deserializer.deserialize_struct(
            "Array2",
            ARRAY2_FIELDS,
            GridVisitor::new("Array2", ARRAY2_FIELDS),
        )?;
        Self::from_vec(rows, columns, data).map_err(de::Error::custom)
    }
}

/// Visitor of a packed 2D grid: two dimensions followed by row-major data.
///
/// Accepts both the struct (map) and the tuple (sequence) forms.
pub(crate) struct GridVisitor<T> {
    name: &'static str,
    fields: &'static [&'static str; 3],
    marker: PhantomData<fn() -> T>,
}

impl<T> GridVisitor<T> {
    pub(crate) const fn new(name: &'static str, fields: &'static [&'static str; 3]) -> Self {
        Self {
            name,
            fields,
            marker: PhantomData,
        }
    }
}

impl<'de, T> Visitor<'de> for GridVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = (usize, usize, Vec<T>);

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "struct {}", self.name)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let Some(first) = seq.next_element()? else {
            return Err(de::Error::invalid_length(0, &self));
        };
        let Some(second) = seq.next_element()? else {
            return Err(de::Error::invalid_length(1, &self));
        };
        let Some(data) = seq.next_element()? else {
            return Err(de::Error::invalid_length(2, &self));
        };
        Ok((first, second, data))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut first = None;
        let mut second = None;
        let mut data = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == self.fields[0] {
                if first.is_some() {
                    return Err(de::Error::duplicate_field(self.fields[0]));
                }
                first = Some(map.next_value()?);
            } else if key == self.fields[1] {
                if second.is_some() {
                    return Err(de::Error::duplicate_field(self.fields[1]));
                }
                second = Some(map.next_value()?);
            } else if key == self.fields[2] {
                if data.is_some() {
                    return Err(de::Error::duplicate_field(self.fields[2]));
                }
                data = Some(map.next_value()?);
            } else {
                return Err(de::Error::unknown_field(&key, self.fields));
            }
        }
        let Some(first) = first else {
            return Err(de::Error::missing_field(self.fields[0]));
        };
        let Some(second) = second else {
            return Err(de::Error::missing_field(self.fields[1]));
        };
        let Some(data) = data else {
            return Err(de::Error::missing_field(self.fields[2]));
        };
        Ok((first, second, data))
    }
}
