//! `serde` support for views.
//!
//! A view is serialized as a struct `{ height, width, data }`, `data` being
//! the row-major elements without the skipped ones. Deserializing always
//! yields a packed view over a fresh 2D buffer.

use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::Memory2D;
use crate::span::Span2D;
use crate::storage::serde::GridVisitor;
use crate::storage::Array2;
use crate::Backend;

const FIELDS: &[&str; 3] = &["height", "width", "data"];

struct Elements<'a, T>(Span2D<'a, T>);

impl<T: Serialize> Serialize for Elements<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for element in self.0.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<T, B> Serialize for Memory2D<T, B>
where
    T: Serialize,
    B: Backend,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Memory2D", 3)?;
        state.serialize_field(FIELDS[0], &self.height)?;
        state.serialize_field(FIELDS[1], &self.width)?;
        state.serialize_field(FIELDS[2], &Elements(self.span()))?;
        state.end()
    }
}

impl<'de, T, B> Deserialize<'de> for Memory2D<T, B>
where
    T: Deserialize<'de>,
    B: Backend,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (height, width, data) = deserializer.deserialize_struct(
            "Memory2D",
            FIELDS,
            GridVisitor::new("Memory2D", FIELDS),
        )?;
        let array = Array2::from_vec(height, width, data).map_err(de::Error::custom)?;
        Ok(Self::from(array))
    }
}
