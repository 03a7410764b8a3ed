use aig_core::{Network, ObjectKind};
use tracing::{debug, info};

use crate::backward::try_backward_retime;
use crate::error::{RetimeError, RetimeResult};
use crate::forward::try_forward_retime;

/// Options for [`retime_steps`]. Zero-field today; kept as a struct (not a
/// unit type) so the public API can grow without breaking callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RetimeOptions;

/// Outcome of a [`retime_steps`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetimeReport {
    /// Steps requested.
    pub steps_requested: usize,
    /// Steps that actually found and applied a candidate.
    pub steps_applied: usize,
    /// Ands removed by the final `cleanup` sweep.
    pub nodes_swept: usize,
}

/// Runs `steps` retiming steps over `network` in the given direction
/// (§4.D "Multi-step driver").
///
/// Requires `network.n_regs() > 0` on entry; a register-free network rejects
/// retiming with [`RetimeError::NoRegisters`].
pub fn retime_steps(
    network: &mut Network,
    steps: usize,
    forward: bool,
    _options: RetimeOptions,
) -> RetimeResult<RetimeReport> {
    if network.n_regs() == 0 {
        return Err(RetimeError::NoRegisters);
    }

    network.renumber_terminals();
    let mut steps_applied = 0;

    let nodes_swept = network.with_fanout_tracking(|network| {
        for step in 0..steps {
            let applied = if forward { apply_one_forward_step(network) } else { apply_one_backward_step(network) };
            if applied {
                steps_applied += 1;
            }
            debug!(step, forward, applied, "retime step complete");
        }
        network.cleanup()
    });

    // `replace` already re-attaches fanouts as it runs, so the final sweep
    // should find nothing left over. A nonzero count here means some step
    // broke the replacement protocol (RetimeStuckSweep).
    debug_assert_eq!(nodes_swept, 0, "cleanup swept {nodes_swept} nodes after retiming");

    info!(steps, steps_applied, nodes_swept, forward, "retime driver finished");
    Ok(RetimeReport { steps_requested: steps, steps_applied, nodes_swept })
}

fn apply_one_forward_step(network: &mut Network) -> bool {
    let candidates: Vec<aig_core::ObjectId> = (0..network.len())
        .map(|idx| aig_core::ObjectId(idx as u32))
        .filter(|&id| network.object(id).kind() == ObjectKind::And)
        .collect();
    for id in candidates {
        if let Some(new_edge) = try_forward_retime(network, id) {
            network.replace(id, new_edge, true);
            return true;
        }
    }
    false
}

fn apply_one_backward_step(network: &mut Network) -> bool {
    for &lo in network.los().to_vec().iter() {
        if let Some(new_edge) = try_backward_retime(network, lo) {
            network.replace(lo, new_edge, false);
            return true;
        }
    }
    false
}


/// Minimal combinational/sequential simulator used only to check §8 item 6
/// (retiming preserves two-cycle unrolled output behaviour). Not part of
/// the public API — retiming itself never needs to evaluate the graph.
#[cfg(test)]
mod sim {
    use std::collections::HashMap;

    use aig_core::{Edge, Network, ObjectId, ObjectKind};

    fn eval(
        network: &Network,
        edge: Edge,
        pi_vals: &[bool],
        lo_vals: &HashMap<ObjectId, bool>,
        memo: &mut HashMap<ObjectId, bool>,
    ) -> bool {
        let base = eval_object(network, edge.id(), pi_vals, lo_vals, memo);
        base ^ edge.inverted()
    }

    fn eval_object(
        network: &Network,
        id: ObjectId,
        pi_vals: &[bool],
        lo_vals: &HashMap<ObjectId, bool>,
        memo: &mut HashMap<ObjectId, bool>,
    ) -> bool {
        if let Some(&v) = memo.get(&id) {
            return v;
        }
        let obj = network.object(id);
        let value = match obj.kind() {
            ObjectKind::Const1 => true,
            ObjectKind::Pi => pi_vals[obj.pio_num().unwrap() as usize],
            ObjectKind::Bo => *lo_vals.get(&id).unwrap_or(&false),
            ObjectKind::And => {
                let f0 = obj.fanin0().unwrap();
                let f1 = obj.fanin1().unwrap();
                eval(network, f0, pi_vals, lo_vals, memo) && eval(network, f1, pi_vals, lo_vals, memo)
            }
            other => unreachable!("unexpected object kind in combinational cone: {other:?}"),
        };
        memo.insert(id, value);
        value
    }

    /// Runs one combinational cycle: returns `(po_outputs, next_lo_vals)`.
    fn step(network: &Network, pi_vals: &[bool], lo_vals: &HashMap<ObjectId, bool>) -> (Vec<bool>, HashMap<ObjectId, bool>) {
        let mut memo = HashMap::new();
        let outputs = network
            .pos()
            .iter()
            .map(|&po| eval(network, network.object(po).fanin0().unwrap(), pi_vals, lo_vals, &mut memo))
            .collect();
        let mut next = HashMap::new();
        for &lo in network.los() {
            let li = network.object(lo).pair().unwrap();
            let driver = network.object(li).fanin0().unwrap();
            next.insert(lo, eval(network, driver, pi_vals, lo_vals, &mut memo));
        }
        (outputs, next)
    }

    /// Unrolls two cycles from an all-zero initial register state, returning
    /// `[po_outputs_cycle0, po_outputs_cycle1]`.
    pub fn unroll_two_cycles(network: &Network, inputs: &[[bool; 2]; 2]) -> [Vec<bool>; 2] {
        let lo_vals0: HashMap<ObjectId, bool> = network.los().iter().map(|&lo| (lo, false)).collect();
        let (out0, lo_vals1) = step(network, &inputs[0], &lo_vals0);
        let (out1, _) = step(network, &inputs[1], &lo_vals1);
        [out0, out1]
    }
}
