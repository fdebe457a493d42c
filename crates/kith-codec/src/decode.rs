//! Envelope to graph decoding.
//!
//! Decoding runs in two phases over the object table:
//!
//! 1. **Materialize**: every record becomes a new `Person` with an empty
//!    friend list, and its surrogate id is mapped to the new handle.
//! 2. **Wire**: every `friend_ids` entry is resolved through that map and
//!    appended to its owner's friend list, in order.
//!
//! Because all people exist before any edge is added, forward references,
//! cycles and self-loops resolve without special cases. The graph is built
//! in a local arena that is dropped on the first error, so a failed decode
//! never hands out a partial graph.

use std::collections::HashMap;

use kith_core::{Person, PersonGraph, PersonId, RootedGraph};

use crate::envelope::{Envelope, SurrogateId};
use crate::error::CodecError;
use crate::timestamp::parse_timestamp;

/// Decodes JSON envelopes into fresh person graphs.
#[derive(Debug, Clone, Default)]
pub struct Decoder;

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    /// Parse and rebuild a graph from UTF-8 JSON bytes.
    pub fn decode(&self, data: &[u8]) -> Result<RootedGraph, CodecError> {
        let envelope = Envelope::from_slice(data)?;
        self.decode_envelope(&envelope)
    }

    /// Rebuild a graph from an already parsed envelope.
    pub fn decode_envelope(&self, envelope: &Envelope) -> Result<RootedGraph, CodecError> {
        if !envelope.objects.contains_key(&envelope.root_id) {
            return Err(CodecError::MissingRoot {
                root_id: envelope.root_id,
            });
        }

        let mut graph = PersonGraph::with_capacity(envelope.record_count());
        let mut handles: HashMap<SurrogateId, PersonId> =
            HashMap::with_capacity(envelope.record_count());

        // Phase 1: materialize.
        for (&id, record) in &envelope.objects {
            let born_in =
                parse_timestamp(&record.born_in).ok_or_else(|| CodecError::InvalidTimestamp {
                    id,
                    field: "born_in",
                    value: record.born_in.clone(),
                })?;
            let handle = graph.add_person(Person::new(record.name.as_str(), born_in));
            handles.insert(id, handle);
        }

        // Phase 2: wire friendships.
        for (&id, record) in &envelope.objects {
            let owner = handles[&id];
            for &target in &record.friend_ids {
                let friend = handles
                    .get(&target)
                    .copied()
                    .ok_or(CodecError::DanglingReference {
                        id,
                        field: "friend_ids",
                        target,
                    })?;
                graph.add_friend(owner, friend)?;
            }
        }

        let root = handles[&envelope.root_id];
        log::debug!(
            "decoded {} people, {} friendships (root id {})",
            graph.len(),
            graph.edge_count(),
            envelope.root_id
        );
        Ok(RootedGraph::new(graph, root)?)
    }
}
