//! Person graph data model for kith.
//!
//! A [`PersonGraph`] is an arena of [`Person`] nodes linked by an ordered,
//! directed "friend" relation that may contain cycles, self-loops and shared
//! sub-graphs. The codec in `kith-codec` depends only on the read-only
//! accessors exposed here.

pub mod builder;
pub mod compare;
pub mod error;
pub mod graph;
pub mod person;

pub use builder::GraphBuilder;
pub use compare::{find_divergence, is_isomorphic, Divergence};
pub use error::GraphError;
pub use graph::{GraphId, GraphStats, PersonGraph, RootedGraph};
pub use person::{Person, PersonId};
