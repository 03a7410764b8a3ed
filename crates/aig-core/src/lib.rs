//! aig-core — the sequential And-Inverter Graph data structure.
//!
//! Owns the graph itself (objects, signed edges, structural-hash AND
//! constructor, fanout index, replacement), the binary varint codec used by
//! AIGER, and the collaborator traits the decoder and retiming engine are
//! built against.

mod collaborators;
mod cursor;
mod edge;
mod error;
mod object;
mod network;
mod varint;

pub use collaborators::{AlwaysOk, NameRegistrar, NetworkChecker, NullProgress, ProgressSink};
pub use cursor::Cursor;
pub use edge::{Edge, ObjectId};
pub use error::{CoreError, CoreResult};
pub use object::{FaninSlot, FanoutEntry, Object, ObjectKind};
pub use network::Network;
pub use varint::{decode_delta_literals, decode_varint, encode_varint};
