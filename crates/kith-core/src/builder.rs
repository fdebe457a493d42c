//! Name-based construction API for person graphs.
//!
//! The `GraphBuilder` lets callers refer to people by name while wiring up
//! friendships, then hands back a [`RootedGraph`].
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kith_core::builder::GraphBuilder;
//!
//! let born = NaiveDate::from_ymd_opt(2020, 4, 12)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_person("Ivan", born).unwrap();
//! builder.add_person("Petr", born).unwrap();
//! builder.befriend("Ivan", "Petr").unwrap();
//!
//! let rooted = builder.build("Ivan").unwrap();
//! assert_eq!(rooted.root_person().friend_count(), 1);
//! ```

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::error::GraphError;
use crate::graph::{PersonGraph, RootedGraph};
use crate::person::{Person, PersonId};

/// Builds a `PersonGraph` where every person has a unique name.
pub struct GraphBuilder {
    graph: PersonGraph,
    names: HashMap<String, PersonId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: PersonGraph::new(),
            names: HashMap::new(),
        }
    }

    /// Add a person. Names must be unique within the builder.
    pub fn add_person(
        &mut self,
        name: &str,
        born_in: NaiveDateTime,
    ) -> Result<PersonId, GraphError> {
        if self.names.contains_key(name) {
            return Err(GraphError::DuplicateName(name.to_string()));
        }
        let id = self.graph.add_person(Person::new(name, born_in));
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Handle of a previously added person.
    pub fn lookup(&self, name: &str) -> Result<PersonId, GraphError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownName(name.to_string()))
    }

    /// Mutual friendship between two named people.
    pub fn befriend(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        let a = self.lookup(a)?;
        let b = self.lookup(b)?;
        self.graph.befriend(a, b)
    }

    /// One-directional friendship `from -> to`.
    pub fn link(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        let from = self.lookup(from)?;
        let to = self.lookup(to)?;
        self.graph.add_friend(from, to)
    }

    /// Access the graph under construction.
    pub fn graph(&self) -> &PersonGraph {
        &self.graph
    }

    /// Finish construction, rooting the graph at the named person.
    pub fn build(self, root: &str) -> Result<RootedGraph, GraphError> {
        let root = self.lookup(root)?;
        log::debug!(
            "built person graph: {} people, {} friendships",
            self.graph.len(),
            self.graph.edge_count()
        );
        RootedGraph::new(self.graph, root)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn build_by_name() {
        let mut b = GraphBuilder::new();
        b.add_person("Ivan", date(2020, 4, 12)).unwrap();
        b.add_person("Petr", date(2021, 9, 27)).unwrap();
        b.add_person("Anna", date(2019, 11, 5)).unwrap();
        b.befriend("Ivan", "Petr").unwrap();
        b.link("Anna", "Ivan").unwrap();

        let rooted = b.build("Ivan").unwrap();
        let root = rooted.root_person();
        assert_eq!(root.name(), "Ivan");
        assert_eq!(root.friend_count(), 1);
        assert_eq!(rooted.graph().edge_count(), 3);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut b = GraphBuilder::new();
        b.add_person("Ivan", date(2020, 4, 12)).unwrap();
        let err = b.add_person("Ivan", date(1999, 1, 1)).unwrap_err();
        assert_eq!(err, GraphError::DuplicateName("Ivan".into()));
        assert_eq!(b.graph().len(), 1);
    }

    #[test]
    fn unknown_names_rejected() {
        let mut b = GraphBuilder::new();
        b.add_person("Ivan", date(2020, 4, 12)).unwrap();
        assert_eq!(
            b.befriend("Ivan", "Olga"),
            Err(GraphError::UnknownName("Olga".into()))
        );
        assert_eq!(
            b.link("Olga", "Ivan"),
            Err(GraphError::UnknownName("Olga".into()))
        );
        assert!(matches!(b.build("Olga"), Err(GraphError::UnknownName(_))));
    }
}
