use aig_core::{Cursor, NameRegistrar, Network};

use crate::error::FormatError;

/// Parses the optional symbol table and `.model` comment block (§4.C steps 7–8).
pub fn parse_symbols_and_comments(
    cursor: &mut Cursor<'_>,
    network: &mut Network,
    registrar: &mut dyn NameRegistrar,
) -> Result<(), FormatError> {
    loop {
        match cursor.peek_u8() {
            None => break,
            Some(b'c') => {
                parse_comment(cursor, network)?;
                break;
            }
            Some(kind @ (b'i' | b'l' | b'o')) => {
                parse_one_symbol(cursor, network, registrar, kind as char)?;
            }
            Some(other) => {
                return Err(FormatError::BadSymbolType { found: other as char });
            }
        }
    }
    Ok(())
}

fn parse_one_symbol(
    cursor: &mut Cursor<'_>,
    network: &mut Network,
    registrar: &mut dyn NameRegistrar,
    kind: char,
) -> Result<(), FormatError> {
    let line = cursor
        .read_line()
        .map_err(|_| FormatError::BadSymbolType { found: kind })?;
    let rest = &line[1..];
    let sp = rest
        .iter()
        .position(|&b| b == b' ')
        .ok_or(FormatError::BadSymbolType { found: kind })?;
    let index: usize = core::str::from_utf8(&rest[..sp])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(FormatError::BadSymbolType { found: kind })?;
    let name = String::from_utf8_lossy(&rest[sp + 1..]).into_owned();

    match kind {
        'i' => {
            let pis = network.pis();
            let id = *pis
                .get(index)
                .ok_or(FormatError::BadSymbolIndex { kind, index, len: pis.len() })?;
            registrar.assign_name(id, &name, None);
        }
        'o' => {
            let pos = network.pos();
            let id = *pos
                .get(index)
                .ok_or(FormatError::BadSymbolIndex { kind, index, len: pos.len() })?;
            registrar.assign_name(id, &name, None);
        }
        'l' => {
            let los = network.los();
            let lo = *los
                .get(index)
                .ok_or(FormatError::BadSymbolIndex { kind, index, len: los.len() })?;
            registrar.assign_name(lo, &name, None);
            if let Some(bi) = network.object(lo).pair() {
                registrar.assign_name(bi, &name, Some("L"));
                if let Some(driver) = network.object(bi).fanin0() {
                    registrar.assign_name(driver.id(), &name, Some("_in"));
                }
            }
        }
        _ => unreachable!("peeked only i/l/o"),
    }
    Ok(())
}

fn parse_comment(cursor: &mut Cursor<'_>, network: &mut Network) -> Result<(), FormatError> {
    // Consume the single 'c' marker byte; everything after is free-form
    // comment text that may carry a `.model NAME` line.
    let _ = cursor.read_u8();
    let remaining = cursor.remaining();
    let comment = cursor.read_bytes(remaining).unwrap_or(&[]);
    for line in comment.split(|&b| b == b'\n') {
        if let Some(name) = line.strip_prefix(b".model ") {
            network.set_name(String::from_utf8_lossy(name).trim_end().to_string());
            break;
        }
    }
    Ok(())
}
