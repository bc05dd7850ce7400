//! Dynamic memory: the variable-size ring, the one-word region and the
//! sparse array roots.

use std::io::Read;

use fmtscope_core::layout::{
    hi_mem_stat_min, lo_mem_stat_max, EMPTY_FLAG, INT_VAL, MIN_LO_MEM_GAP, NULL, TOK_VAL,
};

use super::{count, ensure};
use crate::error::LoadError;
use crate::state::EngineState;
use crate::stream::DumpReader;

pub(crate) fn read<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let etex = state.header.etex_ex();
    let mem = &mut state.memory;
    let lo_stat_max = lo_mem_stat_max(mem.mem_bot);
    let hi_stat_min = hi_mem_stat_min(mem.mem_top);

    let x = r.read_i32()?;
    ensure(
        (lo_stat_max + MIN_LO_MEM_GAP..=hi_stat_min - 1).contains(&x),
        || {
            format!(
                "'lo_mem_max' ({x}) is not in [{}, {}].",
                lo_stat_max + MIN_LO_MEM_GAP,
                hi_stat_min - 1
            )
        },
    )?;
    mem.lo_mem_max = x;
    r.report_value("'lo_mem_max'", x);

    let x = r.read_i32()?;
    ensure((lo_stat_max + 1..=mem.lo_mem_max).contains(&x), || {
        format!(
            "'rover' ({x}) is not in [{}, {}].",
            lo_stat_max + 1,
            mem.lo_mem_max
        )
    })?;
    mem.rover = x;
    r.report_value("'rover'", x);

    if etex {
        let mut bytes = Vec::new();
        for k in INT_VAL..=TOK_VAL {
            let x = r.read_i32()?;
            ensure((NULL..=mem.lo_mem_max).contains(&x), || {
                format!(
                    "'sa_root[{k}]' ({x}) is not in [{NULL}, {}].",
                    mem.lo_mem_max
                )
            })?;
            mem.sa_root[count(k)] = x;
            bytes.extend_from_slice(&x.to_be_bytes());
        }
        r.hexdump("'sa_root' array", &bytes);
    }

    // Area 1: used blocks interleaved with the free ring, one chunk per
    // free block. Addresses are widened so corrupt sizes cannot wrap.
    let lo_mem_max = i64::from(mem.lo_mem_max);
    let mut p = i64::from(mem.mem_bot);
    let mut q = mem.rover;
    let mut chunk = 1;
    loop {
        let end = i64::from(q) + 2;
        let n = end - p;
        ensure(n > 0 && end <= lo_mem_max + 1, || {
            format!(
                "Main memory is corrupted before area #1, chunk {chunk} \
                 (bad range [{p}, {end}))."
            )
        })?;
        r.read_into(&mut mem.mem, p, count(n))?;
        r.hexdump_range(
            &format!("'mem' array, area #1, chunk {chunk} [{p}, {end})"),
            &mem.mem,
            p,
            count(n),
        )?;
        p = i64::from(q) + i64::from(mem.node_size(q)?);
        let rlink = mem.rlink(q)?;
        ensure(
            p <= lo_mem_max && !(q >= rlink && rlink != mem.rover),
            || {
                format!(
                    "Main memory is corrupted after area #1, chunk {chunk} (failed at \
                     condition p (= {p}) > lo_mem_max (= {lo_mem_max}) or (q (= {q}) >= \
                     rlink(q) (= {rlink}) and rlink(q) (= {rlink}) != rover (= {}))).",
                    mem.rover
                )
            },
        )?;
        q = rlink;
        chunk += 1;
        if q == mem.rover {
            break;
        }
    }

    let n = lo_mem_max + 1 - p;
    r.read_into(&mut mem.mem, p, count(n))?;
    r.hexdump_range(
        &format!("'mem' array, area #2 [{p}, {})", lo_mem_max + 1),
        &mem.mem,
        p,
        count(n),
    )?;

    if mem.mem_min < mem.mem_bot - 2 {
        r.inform("making more low memory available", "...");
        let p = mem.llink(mem.rover)?;
        let q = mem.mem_min + 1;
        mem.set_link(mem.mem_min, NULL)?;
        mem.set_info(mem.mem_min, NULL)?;
        mem.set_rlink(p, q)?;
        mem.set_llink(mem.rover, q)?;
        mem.set_rlink(q, mem.rover)?;
        mem.set_llink(q, p)?;
        mem.set_link(q, EMPTY_FLAG)?;
        mem.set_node_size(q, mem.mem_bot - q)?;
    }

    let x = r.read_i32()?;
    ensure((mem.lo_mem_max + 1..=hi_stat_min).contains(&x), || {
        format!(
            "'hi_mem_min' ({x}) not in [{}, {hi_stat_min}].",
            mem.lo_mem_max + 1
        )
    })?;
    mem.hi_mem_min = x;
    r.report_value("'hi_mem_min'", x);

    let x = r.read_i32()?;
    ensure((NULL..=mem.mem_top).contains(&x), || {
        format!("'avail' ({x}) not in [{NULL}, {}].", mem.mem_top)
    })?;
    mem.avail = x;
    r.report_value("'avail'", x);
    mem.mem_end = mem.mem_top;
    r.derived("'mem_end'", mem.mem_end);

    let n = mem.mem_end + 1 - mem.hi_mem_min;
    r.read_into(&mut mem.mem, i64::from(mem.hi_mem_min), count(n))?;
    r.hexdump_range(
        &format!(
            "'mem' array, area #3 [{}, {})",
            mem.hi_mem_min,
            mem.mem_end + 1
        ),
        &mem.mem,
        i64::from(mem.hi_mem_min),
        count(n),
    )?;

    mem.var_used = r.read_i32()?;
    r.report_value("'var_used'", mem.var_used);
    mem.dyn_used = r.read_i32()?;
    r.report_value("'dyn_used'", mem.dyn_used);
    Ok(())
}
