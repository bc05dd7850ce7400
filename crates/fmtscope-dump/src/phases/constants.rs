//! Signature, character maps and the global sizing constants.

use std::io::Read;

use fmtscope_arena::Table;
use fmtscope_core::config::{SUP_HASH_EXTRA, SUP_MAIN_MEMORY};
use fmtscope_core::layout::{
    contrib_head, page_head, ENGINE_NAME, EQTB_SIZE, FORMAT_MAGIC, HASH_OFFSET, HASH_PRIME,
    HYPH_PRIME, LEVEL_ZERO, MAX_ENGINE_NAME_LENGTH, MAX_HALFWORD, MIN_MEM_SPAN, NULL,
    UNDEFINED_CONTROL_SEQUENCE, UNDEFINED_CS,
};

use super::{copy_element, count, ensure, signature_text};
use crate::error::LoadError;
use crate::state::EngineState;
use crate::stream::DumpReader;

pub(crate) fn read<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    read_signature(r, state)?;
    read_hash_sizes(r, state)?;
    read_etex_mode(r, state)?;
    read_memory_sizes(r, state)?;
    check_prime(r, "EQTB_SIZE", EQTB_SIZE)?;
    check_prime(r, "HASH_PRIME", HASH_PRIME)?;
    check_prime(r, "HYPH_PRIME", HYPH_PRIME)
}

fn read_signature<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let x = r.read_i32()?;
    ensure(x == FORMAT_MAGIC, || "Bad .fmt file signature.".into())?;
    r.inform("format file signature", signature_text(x));
    r.hexdump_int("Format file signature", x);

    let len = r.read_i32()?;
    ensure((0..=MAX_ENGINE_NAME_LENGTH).contains(&len), || {
        format!("TeX engine name size is out of range [0..{MAX_ENGINE_NAME_LENGTH}].")
    })?;
    r.hexdump_int("Engine name length", len);
    let name = r.read_bytes(count(len))?;
    let text = String::from_utf8_lossy(&name);
    let trimmed = text.trim_end();
    ensure(trimmed == ENGINE_NAME, || {
        format!("This .fmt file creator is not {ENGINE_NAME}.")
    })?;
    r.inform("engine name", format!("{trimmed:?}"));
    r.hexdump("Engine name", &name);
    state.header.engine_name = trimmed.to_string();

    let checksum = r.read_i32()?;
    r.inform("string pool checksum", checksum);
    r.hexdump_int("String pool checksum", checksum);
    state.header.pool_checksum = checksum;

    state.header.xord = r.read_bytes(256)?;
    r.hexdump("'xord' array", &state.header.xord);
    state.header.xchr = r.read_bytes(256)?;
    r.hexdump("'xchr' array", &state.header.xchr);
    state.header.xprn = r.read_bytes(256)?;
    r.hexdump("'xprn' array", &state.header.xprn);

    let x = r.read_i32()?;
    ensure(x == MAX_HALFWORD, || format!("Bad MAX_HALFWORD value ({x})."))?;
    r.inform("'MAX_HALFWORD' constant value", MAX_HALFWORD);
    r.hexdump_int("'MAX_HALFWORD' constant", x);
    Ok(())
}

fn read_hash_sizes<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let eq = &mut state.eqtb;
    let hash_high = r.read_i32()?;
    ensure((0..=SUP_HASH_EXTRA).contains(&hash_high), || {
        format!("'hash_high' value out of range [0..{SUP_HASH_EXTRA}].")
    })?;
    r.report_value("'hash_high'", hash_high);
    eq.hash_high = hash_high;
    eq.hash_extra = eq.hash_extra.max(hash_high);
    r.derived("'hash_extra'", eq.hash_extra);
    eq.eqtb_top = EQTB_SIZE + eq.hash_extra;
    r.derived("'eqtb_top'", eq.eqtb_top);
    eq.hash_top = if eq.hash_extra == 0 {
        UNDEFINED_CONTROL_SEQUENCE
    } else {
        eq.eqtb_top
    };
    r.derived("'hash_top'", eq.hash_top);

    eq.hash = Table::alloc_based(
        "hash",
        count(1 + eq.hash_top - HASH_OFFSET),
        i64::from(HASH_OFFSET),
    );
    r.memstats(&eq.hash);

    eq.eqtb = Table::alloc("eqtb", count(eq.eqtb_top + 1));
    let undefined = i64::from(UNDEFINED_CONTROL_SEQUENCE);
    eq.eqtb.at_mut(undefined).hh().rh().set(NULL)?;
    eq.eqtb.at_mut(undefined).hh().b0().set(UNDEFINED_CS)?;
    eq.eqtb.at_mut(undefined).hh().b1().set(LEVEL_ZERO)?;
    for x in EQTB_SIZE + 1..=eq.eqtb_top {
        copy_element(&mut eq.eqtb, undefined, i64::from(x))?;
    }
    r.memstats(&eq.eqtb);
    Ok(())
}

fn read_etex_mode<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let mode = r.read_i32()?;
    ensure(mode == 0 || mode == 1, || {
        "Bad eTeX mode value (must be 0 or 1).".into()
    })?;
    state.header.etex_mode = mode;
    r.inform("eTeX mode", mode);
    r.hexdump_int("eTeX mode", mode);
    state.header.max_reg_num = if state.header.etex_ex() { 32_767 } else { 255 };
    r.derived("'max_reg_num'", state.header.max_reg_num);
    Ok(())
}

fn read_memory_sizes<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let config = &state.config;
    let mem = &mut state.memory;

    let x = r.read_i32()?;
    ensure(x == config.mem_bot, || {
        format!("mem_bot != {} ({x}).", config.mem_bot)
    })?;
    mem.mem_bot = x;
    r.report_value("'mem_bot'", x);

    let mem_top = r.read_i32()?;
    ensure(mem.mem_bot + MIN_MEM_SPAN <= mem_top, || {
        format!(
            "mem_bot + {MIN_MEM_SPAN} > mem_top ({} + {MIN_MEM_SPAN} > {mem_top}).",
            mem.mem_bot
        )
    })?;
    let span = i64::from(mem_top) - i64::from(mem.mem_bot) + 1;
    ensure(span <= i64::from(SUP_MAIN_MEMORY), || {
        format!(
            "Main memory size 'SUP_MAIN_MEMORY' is too small ({SUP_MAIN_MEMORY}). \
             'SUP_MAIN_MEMORY' should be at least {span}."
        )
    })?;
    mem.mem_top = mem_top;
    r.report_value("'mem_top'", mem_top);

    state.nest.head = contrib_head(mem_top);
    state.nest.tail = contrib_head(mem_top);
    state.page_tail = page_head(mem_top);
    r.derived("'page_tail'", state.page_tail);

    r.derived("'extra_mem_bot'", config.extra_mem_bot);
    r.derived("'extra_mem_top'", config.extra_mem_top);
    mem.mem_min = mem.mem_bot - config.extra_mem_bot;
    r.derived("'mem_min'", mem.mem_min);
    mem.mem_max = mem_top + config.extra_mem_top;
    r.derived("'mem_max'", mem.mem_max);
    r.derived("'main_memory'", config.main_memory);
    mem.mem = Table::alloc_based(
        "mem",
        count(mem.mem_max - mem.mem_min + 1),
        i64::from(mem.mem_min),
    );
    r.memstats(&mem.mem);
    Ok(())
}

fn check_prime<R: Read>(
    r: &mut DumpReader<'_, R>,
    name: &str,
    expected: i32,
) -> Result<(), LoadError> {
    let x = r.read_i32()?;
    ensure(x == expected, || format!("{name} != {expected} ({x})."))?;
    r.inform(&format!("'{name}' constant value"), expected);
    r.hexdump_int(&format!("'{name}' constant"), x);
    Ok(())
}
