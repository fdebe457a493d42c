//! The person graph container.
//!
//! `PersonGraph` is an arena: it owns every [`Person`] and hands out
//! [`PersonId`] indices. Friendship edges are directed; the symmetric
//! "befriend" policy is an explicit operation layered on top.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GraphError;
use crate::person::{Person, PersonId};

/// Random identifier of one graph instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphId(Uuid);

impl GraphId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counts over the part of a graph reachable from a root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Reachable people, each counted once.
    pub people: usize,
    /// Directed friendship entries owned by reachable people.
    pub friendships: usize,
}

/// Arena of people linked by directed friendship edges.
#[derive(Debug)]
pub struct PersonGraph {
    id: GraphId,
    people: Vec<Person>,
}

impl PersonGraph {
    /// Create an empty graph with a fresh instance id.
    pub fn new() -> Self {
        Self {
            id: GraphId::new(),
            people: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: GraphId::new(),
            people: Vec::with_capacity(capacity),
        }
    }

    /// Instance id. Never shared between two graphs, including copies
    /// produced by decoding.
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Insert a person and return its handle.
    pub fn add_person(&mut self, person: Person) -> PersonId {
        let id = PersonId::from_index(self.people.len());
        self.people.push(person);
        id
    }

    /// Append a directed edge `from -> to` to `from`'s friend list.
    pub fn add_friend(&mut self, from: PersonId, to: PersonId) -> Result<(), GraphError> {
        if !self.contains(to) {
            return Err(GraphError::PersonNotFound(to));
        }
        let person = self
            .people
            .get_mut(from.index())
            .ok_or(GraphError::PersonNotFound(from))?;
        person.push_friend(to);
        Ok(())
    }

    /// Symmetric friendship: `a -> b` followed by `b -> a`.
    ///
    /// `befriend(a, a)` lists `a` twice in its own friend list.
    pub fn befriend(&mut self, a: PersonId, b: PersonId) -> Result<(), GraphError> {
        if !self.contains(a) {
            return Err(GraphError::PersonNotFound(a));
        }
        if !self.contains(b) {
            return Err(GraphError::PersonNotFound(b));
        }
        self.add_friend(a, b)?;
        self.add_friend(b, a)
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.index())
    }

    pub fn contains(&self, id: PersonId) -> bool {
        id.index() < self.people.len()
    }

    /// Number of people in the arena, reachable or not.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Iterate over every person with its handle, in insertion order.
    pub fn people(&self) -> impl Iterator<Item = (PersonId, &Person)> {
        self.people
            .iter()
            .enumerate()
            .map(|(i, p)| (PersonId::from_index(i), p))
    }

    /// Total directed edges in the arena.
    pub fn edge_count(&self) -> usize {
        self.people.iter().map(Person::friend_count).sum()
    }

    /// Every person reachable from `root`, in breadth-first order.
    pub fn reachable_from(&self, root: PersonId) -> Result<Vec<PersonId>, GraphError> {
        if !self.contains(root) {
            return Err(GraphError::PersonNotFound(root));
        }

        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        seen.insert(root);
        queue.push_back(root);

        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &friend in self.people[id.index()].friends() {
                if seen.insert(friend) {
                    queue.push_back(friend);
                }
            }
        }

        Ok(order)
    }

    /// People and friendship counts over the part reachable from `root`.
    pub fn stats_from(&self, root: PersonId) -> Result<GraphStats, GraphError> {
        let reachable = self.reachable_from(root)?;
        let friendships = reachable
            .iter()
            .map(|id| self.people[id.index()].friend_count())
            .sum();
        Ok(GraphStats {
            people: reachable.len(),
            friendships,
        })
    }
}

impl Clone for PersonGraph {
    /// Copies every person and edge into a new instance with its own id.
    fn clone(&self) -> Self {
        Self {
            id: GraphId::new(),
            people: self.people.clone(),
        }
    }
}

impl Default for PersonGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// A graph together with the person it is rooted at.
#[derive(Debug, Clone)]
pub struct RootedGraph {
    graph: PersonGraph,
    root: PersonId,
}

impl RootedGraph {
    /// Pair a graph with a root handle, checking the handle belongs to it.
    pub fn new(graph: PersonGraph, root: PersonId) -> Result<Self, GraphError> {
        if !graph.contains(root) {
            return Err(GraphError::PersonNotFound(root));
        }
        Ok(Self { graph, root })
    }

    pub fn graph(&self) -> &PersonGraph {
        &self.graph
    }

    pub fn root(&self) -> PersonId {
        self.root
    }

    pub fn root_person(&self) -> &Person {
        // `new` checked the handle and the arena never shrinks.
        &self.graph.people[self.root.index()]
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats_from(self.root).unwrap_or_default()
    }

    pub fn into_parts(self) -> (PersonGraph, PersonId) {
        (self.graph, self.root)
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

    fn person(name: &str) -> Person {
        Person::new(name, date(2000, 1, 1))
    }

    #[test]
    fn empty_graph() {
        let g = PersonGraph::new();
        assert!(g.is_empty());
        assert_eq!(g.len(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn graphs_have_distinct_ids() {
        let a = PersonGraph::new();
        let b = PersonGraph::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn clone_gets_fresh_id() {
        let mut g = PersonGraph::new();
        g.add_person(person("a"));
        let copy = g.clone();
        assert_ne!(g.id(), copy.id());
        assert_eq!(copy.len(), 1);
    }

    #[test]
    fn people_iterate_in_insertion_order() {
        let mut g = PersonGraph::new();
        let a = g.add_person(person("a"));
        let b = g.add_person(person("b"));
        let c = g.add_person(person("c"));

        let listed: Vec<(PersonId, &str)> = g.people().map(|(id, p)| (id, p.name())).collect();
        assert_eq!(listed, vec![(a, "a"), (b, "b"), (c, "c")]);
    }

    #[test]
    fn rooted_graph_splits_into_parts() {
        let mut g = PersonGraph::new();
        g.add_person(person("a"));
        let root = g.add_person(person("b"));
        let id = g.id();

        let rooted = RootedGraph::new(g, root).unwrap();
        let (graph, back) = rooted.into_parts();
        assert_eq!(back, root);
        assert_eq!(graph.id(), id);
        assert_eq!(graph.person(back).unwrap().name(), "b");
    }

    #[test]
    fn add_friend_is_directed() {
        let mut g = PersonGraph::new();
        let a = g.add_person(person("a"));
        let b = g.add_person(person("b"));
        g.add_friend(a, b).unwrap();

        assert_eq!(g.person(a).unwrap().friends(), &[b]);
        assert!(g.person(b).unwrap().friends().is_empty());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn befriend_is_symmetric() {
        let mut g = PersonGraph::new();
        let a = g.add_person(person("a"));
        let b = g.add_person(person("b"));
        g.befriend(a, b).unwrap();

        assert_eq!(g.person(a).unwrap().friends(), &[b]);
        assert_eq!(g.person(b).unwrap().friends(), &[a]);
    }

    #[test]
    fn befriend_self_lists_twice() {
        let mut g = PersonGraph::new();
        let a = g.add_person(person("a"));
        g.befriend(a, a).unwrap();
        assert_eq!(g.person(a).unwrap().friends(), &[a, a]);
    }

    #[test]
    fn foreign_handle_rejected() {
        let mut small = PersonGraph::new();
        let a = small.add_person(person("a"));

        let mut big = PersonGraph::new();
        big.add_person(person("x"));
        let far = big.add_person(person("y"));

        assert_eq!(
            small.add_friend(a, far),
            Err(GraphError::PersonNotFound(far))
        );
        assert_eq!(small.befriend(far, a), Err(GraphError::PersonNotFound(far)));
        // A failed befriend must not leave a half-added edge.
        assert_eq!(small.edge_count(), 0);
    }

    #[test]
    fn reachable_skips_unconnected() {
        let mut g = PersonGraph::new();
        let a = g.add_person(person("a"));
        let b = g.add_person(person("b"));
        let c = g.add_person(person("c"));
        let lonely = g.add_person(person("lonely"));
        g.add_friend(a, b).unwrap();
        g.add_friend(b, c).unwrap();
        g.add_friend(c, a).unwrap();
        g.add_friend(lonely, a).unwrap();

        let order = g.reachable_from(a).unwrap();
        assert_eq!(order, vec![a, b, c]);

        let stats = g.stats_from(a).unwrap();
        assert_eq!(stats.people, 3);
        assert_eq!(stats.friendships, 3);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn reachable_from_unknown_root() {
        let g = PersonGraph::new();
        let ghost = PersonId::from_index(0);
        assert_eq!(g.reachable_from(ghost), Err(GraphError::PersonNotFound(ghost)));
    }

    #[test]
    fn rooted_graph_checks_root() {
        let mut g = PersonGraph::new();
        let a = g.add_person(person("a"));
        let rooted = RootedGraph::new(g.clone(), a).unwrap();
        assert_eq!(rooted.root_person().name(), "a");
        assert_eq!(rooted.stats(), GraphStats { people: 1, friendships: 0 });

        let ghost = PersonId::from_index(5);
        assert!(RootedGraph::new(g, ghost).is_err());
    }
}
