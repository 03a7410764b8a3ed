use aig_core::{Edge, Network, ObjectId, ObjectKind};

use crate::edge_phase;

/// Attempts a forward retime across AND gate `and_id` (§4.D "Forward retime
/// at AND `n`"). Returns `None` ("no-op") when the precondition — both
/// fanins are latch outputs — does not hold; this guard runs before any
/// mutation.
///
/// On success, returns the edge that should replace every use of `and_id`
/// (the caller is responsible for calling [`aig_core::Network::replace`]).
pub fn try_forward_retime(network: &mut Network, and_id: ObjectId) -> Option<Edge> {
    let lo0 = network.fanin0_obj(and_id)?;
    let lo1 = network.fanin1_obj(and_id)?;
    if network.object(lo0).kind() != ObjectKind::Bo || network.object(lo1).kind() != ObjectKind::Bo
    {
        return None;
    }
    let bi0 = network.object(lo0).pair()?;
    let bi1 = network.object(lo1).pair()?;
    let e0 = network.object(bi0).fanin0()?;
    let e1 = network.object(bi1).fanin0()?;
    let c0 = network.fanin_c0(and_id);
    let c1 = network.fanin_c1(and_id);

    let n_new = network.and(e0.not_if(c0), e1.not_if(c1));
    let phase = edge_phase(network, n_new);

    let new_bi = network.create_bi();
    network.attach_latch_input(new_bi, n_new.not_if(phase));
    let new_bo = network.create_bo();
    network.pair_latch(new_bi, new_bo);
    debug_assert!(
        !network.object(new_bi).f_phase(),
        "forward retime must produce a phase-0 LI"
    );

    Some(Edge::new(new_bo, false).not_if(phase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_and_with_non_lo_fanin() {
        let mut n = Network::new();
        let a = n.create_pi();
        let b = n.create_pi();
        let and_ab = n.and(a, b);
        assert!(try_forward_retime(&mut n, and_ab.id()).is_none());
    }

    #[test]
    fn retimes_and_of_two_latch_outputs() {
        let mut n = Network::new();
        n.fanout_start();
        let p0 = n.create_pi();
        let p1 = n.create_pi();
        let (bi0, bo0) = n.create_latch();
        let (bi1, bo1) = n.create_latch();
        n.attach_latch_input(bi0, p0);
        n.attach_latch_input(bi1, p1);
        let and_edge = n.and(Edge::new(bo0, false), Edge::new(bo1, false));

        let replacement = try_forward_retime(&mut n, and_edge.id()).unwrap();
        assert_eq!(n.n_regs(), 3);

        let new_lo = n.object(replacement.id());
        let new_li = new_lo.pair().unwrap();
        let driver = n.object(new_li).fanin0().unwrap();
        let driver_obj = n.object(driver.id());
        assert_eq!(driver_obj.kind(), ObjectKind::And);
        let fanins = [n.fanin0_obj(driver.id()).unwrap(), n.fanin1_obj(driver.id()).unwrap()];
        assert!(fanins.contains(&p0.id()) && fanins.contains(&p1.id()));
        assert_eq!(n.object(new_li).f_phase(), false);
    }
}
