//! Error types for person graph construction.

use thiserror::Error;

use crate::person::PersonId;

/// Errors that can occur while building or querying a person graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("duplicate person name: {0}")]
    DuplicateName(String),

    #[error("unknown person name: {0}")]
    UnknownName(String),
}
