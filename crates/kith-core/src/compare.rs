//! Structural comparison of rooted person graphs.
//!
//! Two rooted graphs are isomorphic when a bijection between their reachable
//! people maps root to root, preserves names and birth timestamps, and maps
//! the i-th friend of every person to the i-th friend of its image. Friend
//! lists are ordered, so the bijection is forced: a lock-step walk either
//! builds it or finds the first point where it breaks.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;

use crate::error::GraphError;
use crate::graph::PersonGraph;
use crate::person::PersonId;

/// First difference found between two rooted graphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    Name {
        left: PersonId,
        right: PersonId,
        left_name: String,
        right_name: String,
    },
    BornIn {
        left: PersonId,
        right: PersonId,
        left_born: NaiveDateTime,
        right_born: NaiveDateTime,
    },
    FriendCount {
        left: PersonId,
        right: PersonId,
        left_count: usize,
        right_count: usize,
    },
    /// A person maps to two different counterparts, or two people map to
    /// the same counterpart.
    Shape { left: PersonId, right: PersonId },
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Divergence::Name {
                left,
                right,
                left_name,
                right_name,
            } => write!(f, "name differs: {left} '{left_name}' vs {right} '{right_name}'"),
            Divergence::BornIn {
                left,
                right,
                left_born,
                right_born,
            } => write!(f, "born_in differs: {left} {left_born} vs {right} {right_born}"),
            Divergence::FriendCount {
                left,
                right,
                left_count,
                right_count,
            } => write!(
                f,
                "friend count differs: {left} has {left_count}, {right} has {right_count}"
            ),
            Divergence::Shape { left, right } => {
                write!(f, "edge structure differs at {left} / {right}")
            }
        }
    }
}

/// Walk both graphs from their roots and report the first divergence.
///
/// Returns `Ok(None)` when the reachable parts are isomorphic.
pub fn find_divergence(
    left: &PersonGraph,
    left_root: PersonId,
    right: &PersonGraph,
    right_root: PersonId,
) -> Result<Option<Divergence>, GraphError> {
    if !left.contains(left_root) {
        return Err(GraphError::PersonNotFound(left_root));
    }
    if !right.contains(right_root) {
        return Err(GraphError::PersonNotFound(right_root));
    }

    let mut forward: HashMap<PersonId, PersonId> = HashMap::new();
    let mut backward: HashMap<PersonId, PersonId> = HashMap::new();
    let mut pending = vec![(left_root, right_root)];
    forward.insert(left_root, right_root);
    backward.insert(right_root, left_root);

    while let Some((l, r)) = pending.pop() {
        let lp = left.person(l).ok_or(GraphError::PersonNotFound(l))?;
        let rp = right.person(r).ok_or(GraphError::PersonNotFound(r))?;

        if lp.name() != rp.name() {
            return Ok(Some(Divergence::Name {
                left: l,
                right: r,
                left_name: lp.name().to_string(),
                right_name: rp.name().to_string(),
            }));
        }
        if lp.born_in() != rp.born_in() {
            return Ok(Some(Divergence::BornIn {
                left: l,
                right: r,
                left_born: lp.born_in(),
                right_born: rp.born_in(),
            }));
        }
        if lp.friend_count() != rp.friend_count() {
            return Ok(Some(Divergence::FriendCount {
                left: l,
                right: r,
                left_count: lp.friend_count(),
                right_count: rp.friend_count(),
            }));
        }

        for (&lf, &rf) in lp.friends().iter().zip(rp.friends()) {
            match (forward.get(&lf), backward.get(&rf)) {
                (Some(&mapped), _) if mapped != rf => {
                    return Ok(Some(Divergence::Shape { left: lf, right: rf }));
                }
                (_, Some(&mapped)) if mapped != lf => {
                    return Ok(Some(Divergence::Shape { left: lf, right: rf }));
                }
                (Some(_), Some(_)) => {}
                _ => {
                    forward.insert(lf, rf);
                    backward.insert(rf, lf);
                    pending.push((lf, rf));
                }
            }
        }
    }

    Ok(None)
}

/// True when the parts reachable from the two roots are isomorphic.
pub fn is_isomorphic(
    left: &PersonGraph,
    left_root: PersonId,
    right: &PersonGraph,
    right_root: PersonId,
) -> Result<bool, GraphError> {
    Ok(find_divergence(left, left_root, right, right_root)?.is_none())
}
