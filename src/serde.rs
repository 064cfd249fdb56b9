//! `Serialize` and `Deserialize` for both containers.
//!
//! The wire format is a plain sequence, indistinguishable from a `Vec<T>`,
//! and identical in both storage modes. Deserializing a [`SpillVec`] spills
//! as usual when the sequence outgrows the inline capacity; deserializing an
//! [`InlineVec`] fails with a data error instead.

use core::{fmt, marker::PhantomData};

use serde::{
    de::{Deserialize, Deserializer, Error, SeqAccess, Visitor},
    ser::{Serialize, Serializer},
};

use crate::{InlineVec, SpillVec};

impl<T: Serialize, const N: usize> Serialize for InlineVec<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

impl<T: Serialize, const N: usize> Serialize for SpillVec<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

struct InlineVecVisitor<T, const N: usize>(PhantomData<T>);

impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for InlineVecVisitor<T, N> {
    type Value = InlineVec<T, N>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a sequence of at most {N} elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut vec = InlineVec::new();
        while let Some(item) = seq.next_element()? {
            if vec.is_full() {
                return Err(A::Error::invalid_length(N + 1, &self));
            }
            // SAFETY: fullness checked above.
            unsafe { vec.push_unchecked(item) };
        }
        Ok(vec)
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for InlineVec<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(InlineVecVisitor(PhantomData))
    }
}

struct SpillVecVisitor<T, const N: usize>(PhantomData<T>);

impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for SpillVecVisitor<T, N> {
    type Value = SpillVec<T, N>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut vec = SpillVec::new();
        while let Some(item) = seq.next_element()? {
            vec.push(item);
        }
        Ok(vec)
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for SpillVec<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SpillVecVisitor(PhantomData))
    }
}
