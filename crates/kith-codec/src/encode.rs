//! Graph to envelope encoding.
//!
//! The encoder walks the graph depth-first from the root. A person gets its
//! surrogate id and its record the first time it is reached, before any of
//! its friends are visited, so a path that leads back to it (a self-loop or
//! a longer cycle) finds the id already assigned. Friend ids are appended to
//! each record in friend-list order.
//!
//! The walk keeps an explicit stack of frames instead of recursing, so the
//! depth of the graph does not bound the size of graph that can be encoded.

use std::collections::BTreeMap;

use kith_core::{GraphError, Person, PersonGraph, PersonId, RootedGraph};

use crate::envelope::{Envelope, Record, SurrogateId};
use crate::error::CodecError;
use crate::identity::IdentityTable;
use crate::timestamp::format_timestamp;

/// One person whose friend list is being walked.
struct Frame {
    person: PersonId,
    /// Index of this person's record in the output table.
    slot: usize,
    /// Next friend-list position to visit.
    next: usize,
}

/// Encodes person graphs to JSON envelopes.
#[derive(Debug, Clone)]
pub struct Encoder {
    pretty: bool,
}

impl Encoder {
    /// Encoder producing two-space indented output.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Choose indented (`true`) or compact (`false`) output.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Encode everything reachable from `root` to UTF-8 JSON bytes.
    pub fn encode(&self, graph: &PersonGraph, root: PersonId) -> Result<Vec<u8>, CodecError> {
        let envelope = self.encode_envelope(graph, root)?;
        let bytes = envelope.to_vec(self.pretty)?;
        log::debug!(
            "encoded {} records, {} references into {} bytes",
            envelope.record_count(),
            envelope.reference_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    pub fn encode_rooted(&self, rooted: &RootedGraph) -> Result<Vec<u8>, CodecError> {
        self.encode(rooted.graph(), rooted.root())
    }

    /// Build the envelope without serializing it.
    pub fn encode_envelope(
        &self,
        graph: &PersonGraph,
        root: PersonId,
    ) -> Result<Envelope, CodecError> {
        let root_person = graph.person(root).ok_or(CodecError::RootNotInGraph(root))?;

        let mut table = IdentityTable::new();
        let mut records: Vec<(SurrogateId, Record)> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        let (root_id, _) = table.assign(root);
        records.push((root_id, record_of(root_person)));
        stack.push(Frame {
            person: root,
            slot: 0,
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let person = graph
                .person(frame.person)
                .ok_or(GraphError::PersonNotFound(frame.person))?;
            let Some(&friend) = person.friends().get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let owner = frame.slot;

            let (friend_id, first_visit) = table.assign(friend);
            if first_visit {
                let friend_person = graph
                    .person(friend)
                    .ok_or(GraphError::PersonNotFound(friend))?;
                log::trace!("assigned id {friend_id} to '{}'", friend_person.name());
                records.push((friend_id, record_of(friend_person)));
                stack.push(Frame {
                    person: friend,
                    slot: records.len() - 1,
                    next: 0,
                });
            }
            records[owner].1.friend_ids.push(friend_id);
        }

        Ok(Envelope {
            root_id,
            objects: records.into_iter().collect::<BTreeMap<_, _>>(),
        })
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scalar attributes of a person, with an empty friend list sized for it.
fn record_of(person: &Person) -> Record {
    Record {
        name: person.name().to_string(),
        born_in: format_timestamp(person.born_in()),
        friend_ids: Vec::with_capacity(person.friend_count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn ids(values: &[u64]) -> Vec<SurrogateId> {
        values.iter().copied().map(SurrogateId::new).collect()
    }

    #[test]
    fn lone_person() {
        let mut g = PersonGraph::new();
        let a = g.add_person(Person::new("Solo", date(2023, 1, 1)));

        let env = Encoder::new().encode_envelope(&g, a).unwrap();
        assert_eq!(env.root_id, SurrogateId::new(1));
        assert_eq!(env.record_count(), 1);
        let rec = &env.objects[&SurrogateId::new(1)];
        assert_eq!(rec.name, "Solo");
        assert_eq!(rec.born_in, "2023-01-01T00:00:00");
        assert!(rec.friend_ids.is_empty());
    }

    #[test]
    fn self_loop_references_itself() {
        let mut g = PersonGraph::new();
        let a = g.add_person(Person::new("Narcissus", date(2000, 1, 1)));
        g.add_friend(a, a).unwrap();

        let env = Encoder::new().encode_envelope(&g, a).unwrap();
        assert_eq!(env.record_count(), 1);
        assert_eq!(env.objects[&SurrogateId::new(1)].friend_ids, ids(&[1]));
    }

    #[test]
    fn ids_follow_depth_first_first_visit() {
        // a -> [b, c], b -> [d], c -> [a], d -> []
        let mut g = PersonGraph::new();
        let a = g.add_person(Person::new("a", date(2000, 1, 1)));
        let b = g.add_person(Person::new("b", date(2000, 1, 1)));
        let c = g.add_person(Person::new("c", date(2000, 1, 1)));
        let d = g.add_person(Person::new("d", date(2000, 1, 1)));
        g.add_friend(a, b).unwrap();
        g.add_friend(a, c).unwrap();
        g.add_friend(b, d).unwrap();
        g.add_friend(c, a).unwrap();

        let env = Encoder::new().encode_envelope(&g, a).unwrap();
        let names: Vec<&str> = env.objects.values().map(|r| r.name.as_str()).collect();
        // d is reached through b before c is visited.
        assert_eq!(names, vec!["a", "b", "d", "c"]);
        assert_eq!(env.objects[&SurrogateId::new(1)].friend_ids, ids(&[2, 4]));
        assert_eq!(env.objects[&SurrogateId::new(4)].friend_ids, ids(&[1]));
    }

    #[test]
    fn unreachable_people_are_left_out() {
        let mut g = PersonGraph::new();
        let a = g.add_person(Person::new("a", date(2000, 1, 1)));
        let b = g.add_person(Person::new("b", date(2000, 1, 1)));
        g.add_friend(b, a).unwrap();

        let env = Encoder::new().encode_envelope(&g, a).unwrap();
        assert_eq!(env.record_count(), 1);
    }

    #[test]
    fn repeated_friend_is_listed_each_time() {
        let mut g = PersonGraph::new();
        let a = g.add_person(Person::new("a", date(2000, 1, 1)));
        let b = g.add_person(Person::new("b", date(2000, 1, 1)));
        g.add_friend(a, b).unwrap();
        g.add_friend(a, b).unwrap();

        let env = Encoder::new().encode_envelope(&g, a).unwrap();
        assert_eq!(env.record_count(), 2);
        assert_eq!(env.objects[&SurrogateId::new(1)].friend_ids, ids(&[2, 2]));
    }

    #[test]
    fn foreign_root_rejected() {
        let mut other = PersonGraph::new();
        other.add_person(Person::new("x", date(2000, 1, 1)));
        let far = other.add_person(Person::new("y", date(2000, 1, 1)));

        let mut g = PersonGraph::new();
        g.add_person(Person::new("a", date(2000, 1, 1)));

        let err = Encoder::new().encode(&g, far).unwrap_err();
        assert!(matches!(err, CodecError::RootNotInGraph(id) if id == far));
        assert!(!err.is_structural());
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let mut g = PersonGraph::new();
        let first = g.add_person(Person::new("p0", date(2000, 1, 1)));
        let mut prev = first;
        for i in 1..100_000 {
            let next = g.add_person(Person::new(format!("p{i}"), date(2000, 1, 1)));
            g.add_friend(prev, next).unwrap();
            prev = next;
        }
        g.add_friend(prev, first).unwrap();

        let env = Encoder::new().encode_envelope(&g, first).unwrap();
        assert_eq!(env.record_count(), 100_000);
        assert_eq!(env.reference_count(), 100_000);
        assert_eq!(
            env.objects[&SurrogateId::new(100_000)].friend_ids,
            ids(&[1])
        );
    }

    #[test]
    fn compact_and_pretty_differ_only_in_whitespace() {
        let mut g = PersonGraph::new();
        let a = g.add_person(Person::new("a", date(2000, 1, 1)));
        g.add_friend(a, a).unwrap();

        let pretty_encoder = Encoder::default();
        let compact_encoder = Encoder::new().pretty(false);
        assert!(pretty_encoder.is_pretty());
        assert!(!compact_encoder.is_pretty());

        let pretty = pretty_encoder.encode(&g, a).unwrap();
        let compact = compact_encoder.encode(&g, a).unwrap();
        assert!(pretty.len() > compact.len());
        let strip = |b: &[u8]| -> Vec<u8> {
            b.iter().copied().filter(|c| !c.is_ascii_whitespace()).collect()
        };
        assert_eq!(strip(&pretty), strip(&compact));
    }
}
