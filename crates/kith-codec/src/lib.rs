//! Cycle-preserving JSON codec for kith person graphs.
//!
//! Encodes everything reachable from a root person into a flat table of
//! records keyed by per-call surrogate ids, and rebuilds an isomorphic,
//! identity-fresh graph from that table.
//!
//! ## Encoded layout
//!
//! ```text
//! {
//!   "root_id": <integer>,
//!   "objects": {
//!     "<integer-id>": {
//!       "name": <string>,
//!       "born_in": <ISO-8601 date-time>,
//!       "friend_ids": [<integer>, ...]
//!     }
//!   }
//! }
//! ```
//!
//! Surrogate ids carry no meaning outside the buffer they were written to.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kith_codec::{Decoder, Encoder};
//! use kith_core::{Person, PersonGraph};
//!
//! let born = NaiveDate::from_ymd_opt(2020, 4, 12)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! let mut graph = PersonGraph::new();
//! let ivan = graph.add_person(Person::new("Ivan", born));
//! graph.add_friend(ivan, ivan).unwrap();
//!
//! let bytes = Encoder::new().encode(&graph, ivan).unwrap();
//! let decoded = Decoder::new().decode(&bytes).unwrap();
//! assert_eq!(decoded.root_person().friends(), &[decoded.root()]);
//! ```

pub mod decode;
pub mod encode;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod io;
pub mod timestamp;

pub use decode::Decoder;
pub use encode::Encoder;
pub use envelope::{Envelope, Record, SurrogateId};
pub use error::CodecError;
pub use identity::IdentityTable;
pub use io::{read_from, write_to};
pub use timestamp::{format_timestamp, parse_timestamp};
