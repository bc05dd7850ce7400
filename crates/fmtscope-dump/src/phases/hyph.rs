//! Hyphenation exceptions and the pattern trie.

use std::io::Read;

use fmtscope_arena::Table;
use fmtscope_core::layout::{HYPH_PRIME, MAX_HALFWORD, MAX_TRIE_OP, MIN_HALFWORD, TRIE_OP_SIZE};

use super::{count, ensure};
use crate::error::LoadError;
use crate::state::EngineState;
use crate::stream::DumpReader;

pub(crate) fn read<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    read_exceptions(r, state)?;
    read_trie(r, state)?;
    read_ops(r, state)
}

fn read_exceptions<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let str_ptr = state.strings.str_ptr();
    let h = &mut state.hyph;

    let x = r.read_i32()?;
    ensure(x >= 0, || format!("'hyph_count' ({x}) < 0."))?;
    ensure(x <= h.hyph_size, || {
        format!("'hyph_size' is too small. It should be at least {x}.")
    })?;
    h.hyph_count = x;
    r.report_value("'hyph_count'", x);

    let x = r.read_i32()?;
    ensure(x >= HYPH_PRIME, || format!("'hyph_next' ({x}) < {HYPH_PRIME}."))?;
    ensure(x <= h.hyph_size, || {
        format!("'hyph_size' is too small. It should be at least {x}.")
    })?;
    h.hyph_next = x;
    r.report_value("'hyph_next'", x);

    let mut j = 0;
    for k in 1..=h.hyph_count {
        let raw = r.read_i32()?;
        ensure(raw >= 0, || {
            format!("Hyphenation tables, phase #1, loop {k}: j < 0 ({raw}).")
        })?;
        r.hexdump_int(
            &format!("Hyphenation tables, phase #1, loop {k}, index 'j'"),
            raw,
        );
        h.hyph_next = raw >> 16;
        j = raw & 0xFFFF;
        ensure(j < h.hyph_size && h.hyph_next <= h.hyph_size, || {
            format!(
                "Hyphenation tables, phase #1, loop {k}: j >= hyph_size ({j}) or \
                 hyph_next > hyph_size ({}) (hyph_size = {}).",
                h.hyph_next, h.hyph_size
            )
        })?;
        let link = u16::try_from(h.hyph_next).unwrap_or(u16::MAX);
        h.hyph_link.set(i64::from(j), link)?;

        let word = r.read_i32()?;
        ensure((0..=str_ptr).contains(&word), || {
            format!(
                "Hyphenation tables, phase #1, loop {k}: hyph_word[{j}] ({word}) \
                 is not in [0, {str_ptr}]."
            )
        })?;
        h.hyph_word.set(i64::from(j), word)?;
        r.hexdump_int(&format!("'hyph_word[{j}]' value"), word);

        let list = r.read_i32()?;
        ensure((MIN_HALFWORD..=MAX_HALFWORD).contains(&list), || {
            format!(
                "Hyphenation tables, phase #1, loop {k}: hyph_list[{j}] ({list}) \
                 is not in [{MIN_HALFWORD}, {MAX_HALFWORD}]."
            )
        })?;
        h.hyph_list.set(i64::from(j), list)?;
        r.hexdump_int(&format!("'hyph_list[{j}]' value"), list);
    }

    let j = (j + 1).max(HYPH_PRIME);
    h.hyph_next = if j >= h.hyph_size {
        HYPH_PRIME
    } else {
        j + 1
    };
    r.derived("'hyph_next' (adjusted)", h.hyph_next);
    Ok(())
}

fn read_trie<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let h = &mut state.hyph;

    let j = r.read_i32()?;
    ensure(j >= 0, || format!("j < 0 ({j})."))?;
    ensure(j <= h.trie_size, || {
        format!("'trie_size' is too small. It should be at least {j}.")
    })?;
    r.hexdump_int("Hyphenation tables, phase #2 - size 'j'", j);
    h.trie_max = j;

    let x = r.read_i32()?;
    ensure((0..=j).contains(&x), || {
        format!("'hyph_start' ({x}) is not in [0, {j}].")
    })?;
    h.hyph_start = x;
    r.report_value("'hyph_start'", x);

    let n = count(j + 1);
    h.trie_trl = Table::alloc("trie_trl", n);
    r.read_into(&mut h.trie_trl, 0, n)?;
    r.memstats(&h.trie_trl);
    r.hexdump_range("'trie_trl' array", &h.trie_trl, 0, n)?;
    h.trie_tro = Table::alloc("trie_tro", n);
    r.read_into(&mut h.trie_tro, 0, n)?;
    r.memstats(&h.trie_tro);
    r.hexdump_range("'trie_tro' array", &h.trie_tro, 0, n)?;
    h.trie_trc = Table::alloc("trie_trc", n);
    r.read_into(&mut h.trie_trc, 0, n)?;
    r.memstats(&h.trie_trc);
    r.hexdump_range("'trie_trc' array", &h.trie_trc, 0, n)?;
    Ok(())
}

fn read_ops<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let h = &mut state.hyph;

    let j = r.read_i32()?;
    ensure(j >= 0, || format!("j < 0 ({j})."))?;
    ensure(j <= TRIE_OP_SIZE, || {
        format!("'TRIE_OP_SIZE' is too small. It should be at least {j}.")
    })?;
    r.hexdump_int("Hyphenation tables, phase #3 - size 'j'", j);
    h.trie_op_ptr = j;

    let n = count(j);
    r.read_shown("'hyf_distance' array", &mut h.hyf_distance, 1, n)?;
    r.read_shown("'hyf_num' array", &mut h.hyf_num, 1, n)?;
    r.read_into(&mut h.hyf_next, 1, n)?;
    for i in 1..=j {
        let x = i32::from(h.hyf_next.get(i64::from(i))?);
        ensure(x <= MAX_TRIE_OP, || format!("'hyf_next[{i}]' ({x}) > MAX_TRIE_OP."))?;
    }
    r.hexdump_range("'hyf_next' array", &h.hyf_next, 1, n)?;

    for k in 0..256 {
        h.trie_used.set(k, 0)?;
        h.op_start.set(k, 0)?;
    }

    // Countdown: each language takes x of the remaining j ops, languages
    // in decreasing order.
    let mut remaining = j;
    let mut k = 256;
    while remaining > 0 {
        let x = r.read_i32()?;
        ensure((0..=k - 1).contains(&x), || {
            format!(
                "Hyphenation tables, phase #4 (trie_used, op_start), j = {remaining}: \
                 k ({x}) is not in [0, {}].",
                k - 1
            )
        })?;
        k = x;
        r.hexdump_int(
            &format!("Hyphenation tables, phase #4, j = {remaining}, index 'k'"),
            x,
        );
        let x = r.read_i32()?;
        ensure((1..=remaining).contains(&x), || {
            format!(
                "Hyphenation tables, phase #4 (trie_used, op_start), j = {remaining}: \
                 x ({x}) is not in [1, {remaining}]."
            )
        })?;
        r.hexdump_int(
            &format!("Hyphenation tables, phase #4, j = {remaining}, value 'x'"),
            x,
        );
        let used = u16::try_from(x).unwrap_or(u16::MAX);
        h.trie_used.set(i64::from(k), used)?;
        remaining -= x;
        h.op_start.set(i64::from(k), remaining)?;
    }
    h.trie_not_ready = false;
    Ok(())
}
