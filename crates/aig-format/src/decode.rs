use aig_core::{
    decode_delta_literals, decode_varint, AlwaysOk, Cursor, CoreError, Edge, NameRegistrar,
    NetworkChecker, Network, NullProgress, ObjectId, ProgressSink,
};

use tracing::{debug, trace};

use crate::error::{FormatError, FormatResult};
use crate::header::{parse_header, Variant};
use crate::symbols::parse_symbols_and_comments;

/// Options controlling optional decode behaviour (§2.3 of SPEC_FULL.md).
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Run the external consistency checker after decoding (§4.C step 10).
    pub run_check: bool,
    /// Assign generated default names (`"pi0"`, `"lo3"`, ...) to any
    /// PI/LO/PO not named by the symbol table (§4.C step 9).
    pub assign_default_names: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { run_check: false, assign_default_names: true }
    }
}

/// Records symbol-table names to be applied once parsing is done, since the
/// parser also needs its own `&mut Network` borrow while registering names.
#[derive(Default)]
struct DirectRegistrar {
    names: Vec<(ObjectId, String)>,
}

impl NameRegistrar for DirectRegistrar {
    fn assign_name(&mut self, id: ObjectId, base: &str, suffix: Option<&str>) {
        let name = match suffix {
            Some(s) => format!("{base}{s}"),
            None => base.to_string(),
        };
        self.names.push((id, name));
    }
}

fn resolve_literal(table: &[Edge], literal: u32) -> Result<Edge, CoreError> {
    let var = (literal >> 1) as usize;
    let edge = *table
        .get(var)
        .ok_or(CoreError::BadLiteral { literal, table_len: table.len() })?;
    Ok(edge.not_if(literal & 1 != 0))
}

/// Decodes a binary AIGER byte stream into a [`Network`] (§4.C).
pub fn decode(bytes: &[u8], options: DecodeOptions) -> FormatResult<Network> {
    decode_with(bytes, options, &mut NullProgress, &AlwaysOk)
}

/// Like [`decode`], but with explicit progress and checker collaborators (§6.2).
pub fn decode_with(
    bytes: &[u8],
    options: DecodeOptions,
    progress: &mut dyn ProgressSink,
    checker: &dyn NetworkChecker,
) -> FormatResult<Network> {
    let mut cursor = Cursor::new(bytes);
    let header_line = cursor
        .read_line()
        .map_err(|_| FormatError::BadHeader { reason: "missing header line".into() })?;
    let header = parse_header(header_line)?;
    debug!(m = header.m, i = header.i, l = header.l, o = header.o, a = header.a, "header parsed");

    let mut network = Network::new();

    // Step 2: allocate terminals. PIs and latches first (their edges seed
    // the literal table); POs are allocated unattached.
    for _ in 0..header.i {
        network.create_pi();
    }
    let mut bi_ids = Vec::with_capacity(header.l as usize);
    let mut lo_ids = Vec::with_capacity(header.l as usize);
    for _ in 0..header.l {
        let (bi, lo) = network.create_latch();
        bi_ids.push(bi);
        lo_ids.push(lo);
    }
    let mut po_ids = Vec::with_capacity(header.o as usize);
    for _ in 0..header.o {
        po_ids.push(network.create_po_unattached());
    }

    // Step 3: literal table. Index 0 is the constant-1 object, inverted
    // (literal 0 == false). Indices 1..=I+L are the PIs then the latch LOs.
    let mut table: Vec<Edge> = Vec::with_capacity(1 + (header.i + header.l + header.a) as usize);
    table.push(Edge::FALSE);
    for &pi in network.pis() {
        table.push(Edge::new(pi, false));
    }
    for &lo in &lo_ids {
        table.push(Edge::new(lo, false));
    }

    // Step 4: locate and decode the driver block.
    let driver_count = (header.l + header.o) as usize;
    let driver_literals = match header.variant {
        Variant::Standard => {
            let mut lits = Vec::with_capacity(driver_count);
            for _ in 0..driver_count {
                let line = cursor.read_line().map_err(|_| FormatError::TruncatedBody {
                    expected: header.a as usize,
                    got: 0,
                })?;
                let text = core::str::from_utf8(line)
                    .map_err(|_| FormatError::BadHeader { reason: "non-ASCII driver line".into() })?;
                let v: u32 = text
                    .trim()
                    .parse()
                    .map_err(|_| FormatError::BadHeader { reason: format!("bad driver literal {text:?}") })?;
                lits.push(v);
            }
            lits
        }
        Variant::Modified => decode_delta_literals(&mut cursor, driver_count)?,
    };

    // Step 5: AND body, strictly in increasing index order.
    progress.start(header.a as usize);
    for i in 0..header.a as usize {
        if progress.is_cancelled() {
            return Err(FormatError::BadHeader { reason: "decode cancelled".into() });
        }
        let lhs = 2 * (1 + header.i as usize + header.l as usize + i) as u32;
        let truncated = |_| FormatError::TruncatedBody { expected: header.a as usize, got: i };
        let d1 = decode_varint(&mut cursor).map_err(truncated)?;
        let d0 = decode_varint(&mut cursor).map_err(truncated)?;
        let rhs1 = lhs.wrapping_sub(d1);
        let rhs0 = rhs1.wrapping_sub(d0);
        let e0 = resolve_literal(&table, rhs0)?;
        let e1 = resolve_literal(&table, rhs1)?;
        let and_edge = network.and(e0, e1);
        table.push(and_edge);
        trace!(i, lhs, rhs0, rhs1, "AND record decoded");
        progress.update(i);
    }
    progress.stop();

    // Step 6: resolve drivers — latches first, then POs.
    for (r, &lit) in driver_literals[..header.l as usize].iter().enumerate() {
        let edge = resolve_literal(&table, lit)?;
        network.attach_latch_input(bi_ids[r], edge);
    }
    for (k, &lit) in driver_literals[header.l as usize..].iter().enumerate() {
        let edge = resolve_literal(&table, lit)?;
        network.attach_po_driver(po_ids[k], edge);
    }

    // Step 7: optional symbol table, step 8: optional `.model` comment.
    {
        let mut registrar = DirectRegistrar::default();
        parse_symbols_and_comments(&mut cursor, &mut network, &mut registrar)?;
        for (id, name) in registrar.names {
            network.set_object_name(id, name);
        }
    }
    debug!(names = network.names_len(), "symbol table parsed");

    // Step 9: default names for anything the symbol table left unnamed.
    if options.assign_default_names {
        assign_default_names(&mut network);
    }

    // Step 10: sweep, then optional consistency check.
    let swept = network.with_fanout_tracking(Network::cleanup);
    debug!(swept, "post-decode sweep complete");
    if options.run_check {
        network.with_fanout_tracking(|_| {});
        if !checker.check(&network) {
            return Err(FormatError::CheckFailed);
        }
    }

    Ok(network)
}

fn assign_default_names(network: &mut Network) {
    for (i, &pi) in network.pis().to_vec().iter().enumerate() {
        if network.object_name(pi).is_none() {
            network.set_object_name(pi, format!("pi{i}"));
        }
    }
    for (i, &lo) in network.los().to_vec().iter().enumerate() {
        if network.object_name(lo).is_none() {
            let base = format!("lo{i}");
            network.set_object_name(lo, base.clone());
            if let Some(bi) = network.object(lo).pair() {
                network.set_object_name(bi, format!("{base}L"));
                if let Some(driver) = network.object(bi).fanin0() {
                    network.set_object_name(driver.id(), format!("{base}_in"));
                }
            }
        }
    }
    for (i, &po) in network.pos().to_vec().iter().enumerate() {
        if network.object_name(po).is_none() {
            network.set_object_name(po, format!("po{i}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aig_core::encode_varint;
    use pretty_assertions::assert_eq;

    #[test]
    fn scenario_s2_minimal_aig() {
        // header "aig 3 2 0 1 1\n"; PO driver "6\n"; AND body deltas (2,2).
        let mut bytes = b"aig 3 2 0 1 1\n6\n".to_vec();
        bytes.extend(encode_varint(2));
        bytes.extend(encode_varint(2));

        let net = decode(&bytes, DecodeOptions::default()).unwrap();
        assert_eq!(net.pis().len(), 2);
        assert_eq!(net.pos().len(), 1);
        assert_eq!(net.n_regs(), 0);

        let po = net.pos()[0];
        let driver = net.object(po).fanin0().unwrap();
        assert!(!driver.inverted());
        assert_eq!(net.object(driver.id()).kind(), aig_core::ObjectKind::And);
    }

    #[test]
    fn scenario_s3_latched_aig() {
        // header "aig 2 1 1 1 0\n"; latch driver "2\n" (PI1); PO driver "4\n" (latch LO).
        let bytes = b"aig 2 1 1 1 0\n2\n4\n".to_vec();
        let net = decode(&bytes, DecodeOptions::default()).unwrap();
        assert_eq!(net.pis().len(), 1);
        assert_eq!(net.n_regs(), 1);
        assert_eq!(net.pos().len(), 1);

        let bi = net.lis()[0];
        let bi_driver = net.object(bi).fanin0().unwrap();
        assert_eq!(bi_driver.id(), net.pis()[0]);

        let po = net.pos()[0];
        let po_driver = net.object(po).fanin0().unwrap();
        assert_eq!(po_driver.id(), net.los()[0]);
    }

    #[test]
    fn scenario_s6_modified_matches_standard() {
        let standard = b"aig 3 2 0 1 1\n6\n".to_vec();
        let mut standard = standard;
        standard.extend(encode_varint(2));
        standard.extend(encode_varint(2));

        let mut modified = b"aig2 3 2 0 1 1\n".to_vec();
        modified.extend(encode_varint(6)); // plain first literal (PO driver)
        modified.extend(encode_varint(2));
        modified.extend(encode_varint(2));

        let a = decode(&standard, DecodeOptions::default()).unwrap();
        let b = decode(&modified, DecodeOptions::default()).unwrap();

        assert_eq!(a.pis().len(), b.pis().len());
        assert_eq!(a.pos().len(), b.pos().len());
        let a_po = a.object(a.pos()[0]).fanin0().unwrap();
        let b_po = b.object(b.pos()[0]).fanin0().unwrap();
        assert_eq!(a_po.inverted(), b_po.inverted());
        assert_eq!(a.object(a_po.id()).kind(), b.object(b_po.id()).kind());
    }

    #[test]
    fn bad_header_rejected() {
        let bytes = b"aig 4 2 0 1 1\n".to_vec();
        assert!(matches!(
            decode(&bytes, DecodeOptions::default()),
            Err(FormatError::BadHeader { .. })
        ));
    }

    #[test]
    fn truncated_and_body_rejected() {
        let mut bytes = b"aig 3 2 0 1 1\n6\n".to_vec();
        bytes.push(0x80); // truncated varint, no terminator byte
        assert!(matches!(
            decode(&bytes, DecodeOptions::default()),
            Err(FormatError::TruncatedBody { .. }) | Err(FormatError::Core(_))
        ));
    }

    #[test]
    fn default_names_assigned() {
        // header "aig 3 2 1 1 0\n"; latch driver "4\n" (PI1); PO driver "2\n" (PI0).
        let bytes = b"aig 3 2 1 1 0\n4\n2\n".to_vec();
        let net = decode(&bytes, DecodeOptions::default()).unwrap();
        assert_eq!(net.object_name(net.pis()[0]), Some("pi0"));
        assert_eq!(net.object_name(net.los()[0]), Some("lo0"));
        assert_eq!(net.object_name(net.lis()[0]), Some("lo0L"));
        // PI1 drives the latch input, so its plain default name is
        // overridden by the latch's "_in" suffix, mirroring the
        // symbol-table path in `symbols.rs`.
        assert_eq!(net.object_name(net.pis()[1]), Some("lo0_in"));
        assert_eq!(net.object_name(net.pos()[0]), Some("po0"));
    }
}
