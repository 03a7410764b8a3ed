use aig_core::{Edge, Network, ObjectId, ObjectKind};

/// Attempts a backward retime at latch output `lo` (§4.D "Backward retime at
/// LO `ℓ`"). Returns `None` when the paired LI's driver is not an AND node.
///
/// On success, returns the edge that should replace every use of `lo` (the
/// caller calls [`aig_core::Network::replace`]).
///
/// Unlike [`crate::forward::try_forward_retime`], this does not assert the
/// new LIs land at phase 0 — backward retiming may legitimately produce
/// registers whose initial value is not zero (§4.D, §9 "Design Notes").
pub fn try_backward_retime(network: &mut Network, lo: ObjectId) -> Option<Edge> {
    let li = network.object(lo).pair()?;
    let driver = network.object(li).fanin0()?;
    if network.object(driver.id()).kind() != ObjectKind::And {
        return None;
    }
    let m = driver.id();
    let b = driver.inverted();
    let f0 = network.child0(m)?;
    let f1 = network.child1(m)?;
    let c0 = f0.inverted() ^ b;
    let c1 = f1.inverted() ^ b;

    let new_bi0 = network.create_bi();
    network.attach_latch_input(new_bi0, Edge::new(f0.id(), c0));
    let new_bo0 = network.create_bo();
    network.pair_latch(new_bi0, new_bo0);

    let new_bi1 = network.create_bi();
    network.attach_latch_input(new_bi1, Edge::new(f1.id(), c1));
    let new_bo1 = network.create_bo();
    network.pair_latch(new_bi1, new_bo1);

    let lo0_prime = Edge::new(new_bo0, c0);
    let lo1_prime = Edge::new(new_bo1, c1);
    Some(network.and(lo0_prime, lo1_prime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_lo_not_driven_by_and() {
        let mut n = Network::new();
        n.fanout_start();
        let p0 = n.create_pi();
        let (bi, bo) = n.create_latch();
        n.attach_latch_input(bi, p0);
        assert!(try_backward_retime(&mut n, bo).is_none());
    }

    #[test]
    fn splits_register_driven_by_and() {
        let mut n = Network::new();
        n.fanout_start();
        let a = n.create_pi();
        let b = n.create_pi();
        let ab = n.and(a, b);
        let (bi, bo) = n.create_latch();
        n.attach_latch_input(bi, ab);

        let n_regs_before = n.n_regs();
        let replacement = try_backward_retime(&mut n, bo).unwrap();
        assert_eq!(n.n_regs(), n_regs_before + 2);
        assert_eq!(n.object(replacement.id()).kind(), ObjectKind::And);
    }
}
