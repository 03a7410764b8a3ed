//! Binary AIGER decoding (§4.C).
//!
//! Parses the `aig`/`aig2` wire format into an [`aig_core::Network`]: header,
//! terminal allocation, varint-delta AND body, driver resolution, and the
//! optional symbol table / `.model` comment block.

mod decode;
mod error;
mod header;
mod symbols;

pub use decode::{decode, decode_with, DecodeOptions};
pub use error::{FormatError, FormatResult};
pub use header::{Header, Variant};
