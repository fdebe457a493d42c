//! Visited-set and surrogate id assignment for one encode call.

use std::collections::HashMap;

use kith_core::PersonId;

use crate::envelope::SurrogateId;

/// Maps each visited person to the surrogate id it was given.
///
/// Ids are handed out sequentially from 1 in first-visit order. A table
/// lives for exactly one encode call.
#[derive(Debug)]
pub struct IdentityTable {
    assigned: HashMap<PersonId, SurrogateId>,
    next: u64,
}

impl IdentityTable {
    pub fn new() -> Self {
        Self {
            assigned: HashMap::new(),
            next: 1,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            assigned: HashMap::with_capacity(capacity),
            next: 1,
        }
    }

    /// Surrogate id of an already visited person.
    pub fn lookup(&self, person: PersonId) -> Option<SurrogateId> {
        self.assigned.get(&person).copied()
    }

    pub fn contains(&self, person: PersonId) -> bool {
        self.assigned.contains_key(&person)
    }

    /// Mark `person` visited, returning its surrogate id and whether this
    /// call assigned it.
    pub fn assign(&mut self, person: PersonId) -> (SurrogateId, bool) {
        if let Some(&id) = self.assigned.get(&person) {
            return (id, false);
        }
        let id = SurrogateId::new(self.next);
        self.next = id.value() + 1;
        self.assigned.insert(person, id);
        (id, true)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

impl Default for IdentityTable {
    fn default() -> Self {
        Self::new()
    }
}
