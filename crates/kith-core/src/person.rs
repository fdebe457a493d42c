//! The `Person` node and its arena handle.
//!
//! A person carries two scalar attributes (a name and a birth timestamp) and
//! an ordered list of friends. Friends are stored as [`PersonId`] handles into
//! the owning [`PersonGraph`](crate::graph::PersonGraph), so cycles and
//! self-references need no shared ownership.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Arena index of a person inside one `PersonGraph`.
///
/// Handles are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(u32);

impl PersonId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of this person in its graph's arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A person in the friendship graph.
#[derive(Debug, Clone)]
pub struct Person {
    name: String,
    born_in: NaiveDateTime,
    friends: Vec<PersonId>,
}

impl Person {
    /// Create a person with no friends yet.
    ///
    /// Friendships are added through the owning graph once both ends exist.
    pub fn new(name: impl Into<String>, born_in: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            born_in,
            friends: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn born_in(&self) -> NaiveDateTime {
        self.born_in
    }

    /// Friends in the order they were added. May contain duplicates and
    /// this person's own handle.
    pub fn friends(&self) -> &[PersonId] {
        &self.friends
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    /// Shallow comparison: same name, same birth timestamp, same number of
    /// friends. Friend identities are not compared.
    pub fn same_profile(&self, other: &Person) -> bool {
        self.name == other.name
            && self.born_in == other.born_in
            && self.friends.len() == other.friends.len()
    }

    pub(crate) fn push_friend(&mut self, friend: PersonId) {
        self.friends.push(friend);
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person(name='{}', born_in={}, friends_count={})",
            self.name,
            self.born_in,
            self.friends.len()
        )
    }
}
