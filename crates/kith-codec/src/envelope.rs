//! Wire types of the encoded graph.
//!
//! ```text
//! {
//!   "root_id": 1,
//!   "objects": {
//!     "1": { "name": "Ivan", "born_in": "2020-04-12T00:00:00", "friend_ids": [2, 1] },
//!     "2": { "name": "Petr", "born_in": "2021-09-27T00:00:00", "friend_ids": [1] }
//!   }
//! }
//! ```
//!
//! Field names are fixed. Object keys are surrogate ids written as decimal
//! strings, in ascending order. A key may appear only once.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CodecError;

/// Per-call identifier of an encoded person.
///
/// Only meaningful inside the envelope it was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurrogateId(u64);

impl SurrogateId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurrogateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One encoded person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    /// ISO-8601 date-time text.
    pub born_in: String,
    pub friend_ids: Vec<SurrogateId>,
}

/// Root pointer plus the flat table of every encoded person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub root_id: SurrogateId,
    #[serde(deserialize_with = "unique_objects")]
    pub objects: BTreeMap<SurrogateId, Record>,
}

/// Object table that fails on a repeated id instead of keeping the last one.
fn unique_objects<'de, D>(deserializer: D) -> Result<BTreeMap<SurrogateId, Record>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ObjectsVisitor;

    impl<'de> Visitor<'de> for ObjectsVisitor {
        type Value = BTreeMap<SurrogateId, Record>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of surrogate ids to records")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut objects = BTreeMap::new();
            while let Some((id, record)) = map.next_entry::<SurrogateId, Record>()? {
                match objects.entry(id) {
                    Entry::Occupied(_) => {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate object id {id}"
                        )));
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(record);
                    }
                }
            }
            Ok(objects)
        }
    }

    deserializer.deserialize_map(ObjectsVisitor)
}

impl Envelope {
    /// Parse an envelope from UTF-8 JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(data).map_err(|e| CodecError::MalformedEnvelope(e.to_string()))
    }

    /// Serialize to JSON bytes, two-space indented when `pretty`.
    pub fn to_vec(&self, pretty: bool) -> Result<Vec<u8>, CodecError> {
        let result = if pretty {
            serde_json::to_vec_pretty(self)
        } else {
            serde_json::to_vec(self)
        };
        result.map_err(|e| CodecError::Serialization(e.to_string()))
    }

    pub fn record_count(&self) -> usize {
        self.objects.len()
    }

    /// Total `friend_ids` entries across all records.
    pub fn reference_count(&self) -> usize {
        self.objects.values().map(|r| r.friend_ids.len()).sum()
    }

    /// How many times `id` appears in any `friend_ids` list.
    pub fn references_to(&self, id: SurrogateId) -> usize {
        self.objects
            .values()
            .flat_map(|r| r.friend_ids.iter())
            .filter(|&&f| f == id)
            .count()
    }
}
