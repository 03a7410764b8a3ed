//! Structural register-retiming passes over a sequential AIG (§4.D).
//!
//! Two primitives — [`forward::try_forward_retime`] and
//! [`backward::try_backward_retime`] — each move a single register across
//! one AND gate while preserving sequential equivalence. [`retime_steps`]
//! drives either primitive for a fixed step count, scanning for the first
//! applicable candidate each step.

mod backward;
mod driver;
mod error;
mod forward;

pub use backward::try_backward_retime;
pub use driver::{retime_steps, RetimeOptions, RetimeReport};
pub use error::{RetimeError, RetimeResult};
pub use forward::try_forward_retime;

use aig_core::{Edge, Network};

/// Simulation value of `e` under the all-zero input assignment, combining
/// the referenced object's own phase with the edge's inversion bit.
pub(crate) fn edge_phase(network: &Network, e: Edge) -> bool {
    network.object(e.id()).f_phase() ^ e.inverted()
}
