//! The table of equivalents, primitives and the hash.

use std::io::Read;

use fmtscope_arena::Table;
use fmtscope_core::layout::{
    ACTIVE_BASE, CS_TOKEN_FLAG, EQTB_SIZE, FROZEN_CONTROL_SEQUENCE, HASH_BASE, PRIM_SIZE,
    UNDEFINED_CONTROL_SEQUENCE,
};

use super::{copy_element, count, ensure};
use crate::error::LoadError;
use crate::state::EngineState;
use crate::stream::DumpReader;

pub(crate) fn read<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    read_regions(r, state)?;
    read_locations(r, state)?;
    read_hash(r, state)
}

/// Regions 1 to 6, stored as alternating literal runs and repeat counts.
fn read_regions<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let eq = &mut state.eqtb;
    let limit = i64::from(EQTB_SIZE) + 1;
    let mut k = i64::from(ACTIVE_BASE);
    let mut i = 1;
    loop {
        let x = r.read_i32()?;
        let end = k + i64::from(x);
        ensure(x >= 1 && end <= limit, || {
            format!(
                "'eqtb' undumping (iteration No. {i}) failed at condition: \
                 x (= {x}) < 1 or k (= {k}) + x (= {end}) > {limit}"
            )
        })?;
        r.hexdump_int("Compressed block size", x);
        r.read_shown(
            &format!("Compressed 'eqtb' array, part {i} [{k}, {end})"),
            &mut eq.eqtb,
            k,
            count(x),
        )?;
        k = end;

        let x = r.read_i32()?;
        let end = k + i64::from(x);
        ensure(x >= 0 && end <= limit, || {
            format!(
                "'eqtb' unpacking (iteration No. {i}) failed at condition: \
                 x (= {x}) < 0 or k (= {k}) + x (= {end}) > {limit}"
            )
        })?;
        r.inform(
            &format!("unpacking {x} items of 'eqtb'"),
            format!("eqtb[{k}, {}] <- eqtb[{}]", end - 1, k - 1),
        );
        r.hexdump_int("Packed items", x);
        for j in k..end {
            copy_element(&mut eq.eqtb, k - 1, j)?;
        }
        k = end;
        i += 1;
        if k > i64::from(EQTB_SIZE) {
            break;
        }
    }

    if eq.hash_high > 0 {
        r.read_shown(
            "'eqtb' hash extra",
            &mut eq.eqtb,
            i64::from(EQTB_SIZE + 1),
            count(eq.hash_high),
        )?;
    }
    Ok(())
}

fn read_locations<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let eq = &mut state.eqtb;

    let x = r.read_i32()?;
    ensure((HASH_BASE..=eq.hash_top).contains(&x), || {
        format!("'par_loc' ({x}) is not in [{HASH_BASE}, {}]", eq.hash_top)
    })?;
    eq.par_loc = x;
    r.report_value("'par_loc'", x);
    eq.par_token = CS_TOKEN_FLAG + eq.par_loc;
    r.derived("'par_token'", eq.par_token);

    let x = r.read_i32()?;
    ensure((HASH_BASE..=eq.hash_top).contains(&x), || {
        format!("'write_loc' ({x}) is not in [{HASH_BASE}, {}]", eq.hash_top)
    })?;
    eq.write_loc = x;
    r.report_value("'write_loc'", x);

    let prims = count(PRIM_SIZE + 1);
    eq.prim = Table::alloc("prim", prims);
    r.read_into(&mut eq.prim, 0, prims)?;
    r.memstats(&eq.prim);
    r.hexdump_range("'prim' array", &eq.prim, 0, prims)?;
    eq.prim_eqtb = Table::alloc("prim_eqtb", prims);
    r.read_into(&mut eq.prim_eqtb, 0, prims)?;
    r.memstats(&eq.prim_eqtb);
    r.hexdump_range("'prim_eqtb' array", &eq.prim_eqtb, 0, prims)?;
    Ok(())
}

fn read_hash<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let eq = &mut state.eqtb;

    let x = r.read_i32()?;
    ensure((HASH_BASE..=FROZEN_CONTROL_SEQUENCE).contains(&x), || {
        format!("'hash_used' ({x}) not in [{HASH_BASE}, {FROZEN_CONTROL_SEQUENCE}]")
    })?;
    eq.hash_used = x;
    r.report_value("'hash_used'", x);

    // Sparse part: strictly increasing (index, word) pairs up to hash_used.
    let mut p = HASH_BASE - 1;
    let mut sparse = 0;
    loop {
        let x = r.read_i32()?;
        ensure(x > p && x <= eq.hash_used, || {
            format!(
                "Invalid index to 'hash' array: {x} not in [{}, {}]",
                p + 1,
                eq.hash_used
            )
        })?;
        p = x;
        r.hexdump_int("Index to 'hash' array", x);
        r.read_shown(&format!("Hash item at {p}"), &mut eq.hash, i64::from(p), 1)?;
        sparse += 1;
        if p == eq.hash_used {
            break;
        }
    }
    r.inform("number of hash items undumped (#1)", sparse);

    let dense = UNDEFINED_CONTROL_SEQUENCE - 1 - eq.hash_used;
    r.read_into(&mut eq.hash, i64::from(eq.hash_used + 1), count(dense))?;
    r.inform("number of hash items undumped (#2)", dense);
    r.hexdump_range(
        "Rest of 'hash' array",
        &eq.hash,
        i64::from(eq.hash_used + 1),
        count(dense),
    )?;

    if eq.hash_high > 0 {
        r.read_shown(
            "Extra items of 'hash' array",
            &mut eq.hash,
            i64::from(EQTB_SIZE + 1),
            count(eq.hash_high),
        )?;
    }

    eq.cs_count = r.read_i32()?;
    r.report_value("'cs_count'", eq.cs_count);
    Ok(())
}
