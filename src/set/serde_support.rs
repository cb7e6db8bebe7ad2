//! Serde support for [`Set`].
//!
//! A set serializes as a sequence of its members in unspecified order and
//! deserializes from any sequence; duplicate entries collapse silently.

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Set;

/// Upper bound on capacity reserved from an untrusted length hint.
const MAX_PREALLOCATED_MEMBERS: usize = 4096;

impl<V, S> Serialize for Set<V, S>
where
    V: Serialize,
{
    /// Serializes the members while holding a shared lock, so the output is
    /// a consistent snapshot.
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let members = self.members.read();
        let mut sequence = serializer.serialize_seq(Some(members.len()))?;
        for value in members.iter() {
            sequence.serialize_element(value)?;
        }
        sequence.end()
    }
}

struct SetVisitor<V, S> {
    marker: PhantomData<fn() -> Set<V, S>>,
}

impl<V, S> SetVisitor<V, S> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, V, S> Visitor<'de> for SetVisitor<V, S>
where
    V: Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    type Value = Set<V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut sequence: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let capacity = sequence
            .size_hint()
            .unwrap_or(0)
            .min(MAX_PREALLOCATED_MEMBERS);
        let set = Set::with_capacity_and_hasher(capacity, S::default());
        {
            let mut members = set.members.write();
            while let Some(value) = sequence.next_element()? {
                members.insert(value);
            }
        }
        Ok(set)
    }
}

impl<'de, V, S> Deserialize<'de> for Set<V, S>
where
    V: Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SetVisitor::new())
    }
}
