//! Error types for the graph codec.

use std::io;

use thiserror::Error;

use kith_core::{GraphError, PersonId};

use crate::envelope::SurrogateId;

/// Errors from encoding or decoding a person graph.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("missing root: root_id {root_id} has no entry in objects")]
    MissingRoot { root_id: SurrogateId },

    #[error("dangling reference: object {id} field {field} references unknown id {target}")]
    DanglingReference {
        id: SurrogateId,
        field: &'static str,
        target: SurrogateId,
    },

    #[error("invalid timestamp: object {id} field {field} has {value:?}")]
    InvalidTimestamp {
        id: SurrogateId,
        field: &'static str,
        value: String,
    },

    #[error("root {0} is not a person of the graph being encoded")]
    RootNotInGraph(PersonId),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

impl CodecError {
    /// True for errors caused by the shape of the encoded input.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CodecError::MalformedEnvelope(_)
                | CodecError::MissingRoot { .. }
                | CodecError::DanglingReference { .. }
                | CodecError::InvalidTimestamp { .. }
        )
    }
}
