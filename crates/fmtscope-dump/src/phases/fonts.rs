//! Font memory and the per-font arrays.

use std::io::Read;

use fmtscope_arena::{Element, Scalar, Table};
use fmtscope_core::config::SUP_FONT_MEM_SIZE;
use fmtscope_core::layout::{
    FONT_BASE, MAX_FONT_MAX, MAX_HALFWORD, MIN_FMEM_PTR, MIN_HALFWORD, MIN_QUARTERWORD, NON_CHAR,
    NULL_FONT, PDFTEX_BANNER,
};

use super::{count, ensure};
use crate::error::LoadError;
use crate::state::{EngineState, PdfFont};
use crate::stream::DumpReader;

pub(crate) fn read<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let fonts = &mut state.fonts;

    let x = r.read_i32()?;
    ensure(x >= MIN_FMEM_PTR, || format!("'fmem_ptr' < {MIN_FMEM_PTR} ({x})."))?;
    ensure(x <= SUP_FONT_MEM_SIZE, || {
        format!("Font mem size is too low. Set 'SUP_FONT_MEM_SIZE' to at least {x}.")
    })?;
    fonts.fmem_ptr = x;
    r.report_value("'fmem_ptr'", x);
    fonts.font_mem_size = fonts.font_mem_size.max(fonts.fmem_ptr);
    fonts.info = Table::alloc("font_info", count(fonts.font_mem_size));
    r.read_into(&mut fonts.info, 0, count(fonts.fmem_ptr))?;
    r.memstats(&fonts.info);
    r.hexdump_range("'font_info' array", &fonts.info, 0, count(fonts.fmem_ptr))?;

    let x = r.read_i32()?;
    ensure(x >= FONT_BASE, || format!("'font_ptr' < {FONT_BASE} ({x})."))?;
    ensure(x <= FONT_BASE + MAX_FONT_MAX, || {
        format!(
            "'MAX_FONT_MAX' is too low. Set 'MAX_FONT_MAX' to at least {}.",
            x - FONT_BASE
        )
    })?;
    fonts.font_ptr = x;
    r.report_value("'font_ptr'", x);

    let slots = count(fonts.font_max.max(fonts.font_ptr));
    fonts.check = Table::alloc("font_check", slots);
    fonts.size = Table::alloc("font_size", slots);
    fonts.dsize = Table::alloc("font_dsize", slots);
    fonts.params = Table::alloc("font_params", slots);
    fonts.name = Table::alloc("font_name", slots);
    fonts.area = Table::alloc("font_area", slots);
    fonts.bc = Table::alloc("font_bc", slots);
    fonts.ec = Table::alloc("font_ec", slots);
    fonts.glue = Table::alloc("font_glue", slots);
    fonts.hyphen_char = Table::alloc("hyphen_char", slots);
    fonts.skew_char = Table::alloc("skew_char", slots);
    fonts.bchar_label = Table::alloc("bchar_label", slots);
    fonts.bchar = Table::alloc("font_bchar", slots);
    fonts.false_bchar = Table::alloc("font_false_bchar", slots);
    fonts.char_base = Table::alloc("char_base", slots);
    fonts.width_base = Table::alloc("width_base", slots);
    fonts.height_base = Table::alloc("height_base", slots);
    fonts.depth_base = Table::alloc("depth_base", slots);
    fonts.italic_base = Table::alloc("italic_base", slots);
    fonts.lig_kern_base = Table::alloc("lig_kern_base", slots);
    fonts.kern_base = Table::alloc("kern_base", slots);
    fonts.exten_base = Table::alloc("exten_base", slots);
    fonts.param_base = Table::alloc("param_base", slots);

    let attr = state.strings.intern(b"")?;
    fonts.pdf = vec![PdfFont::with_attr(attr); slots + 1];
    state.strings.intern(PDFTEX_BANNER.as_bytes())?;

    let n = count(fonts.font_ptr + 1 - NULL_FONT);
    let str_ptr = state.strings.str_ptr();
    let lo_mem_max = state.memory.lo_mem_max;
    let fmem_ptr = fonts.fmem_ptr;

    read_array(r, "font_check", &mut fonts.check, n)?;
    read_array(r, "font_size", &mut fonts.size, n)?;
    read_array(r, "font_dsize", &mut fonts.dsize, n)?;
    read_checked(r, "font_params", &mut fonts.params, n, |i, x| {
        ensure((MIN_HALFWORD..=MAX_HALFWORD).contains(&x), || {
            format!("'font_params[{i}]' is not in [{MIN_HALFWORD}, {MAX_HALFWORD}].")
        })
    })?;
    read_array(r, "hyphen_char", &mut fonts.hyphen_char, n)?;
    read_array(r, "skew_char", &mut fonts.skew_char, n)?;
    read_checked(r, "font_name", &mut fonts.name, n, |i, x| {
        ensure(x <= str_ptr, || format!("'font_name[{i}]' > {str_ptr} ({x})."))
    })?;
    read_checked(r, "font_area", &mut fonts.area, n, |i, x| {
        ensure(x <= str_ptr, || format!("'font_area[{i}]' > {str_ptr} ({x})."))
    })?;
    read_array(r, "font_bc", &mut fonts.bc, n)?;
    read_array(r, "font_ec", &mut fonts.ec, n)?;
    read_array(r, "char_base", &mut fonts.char_base, n)?;
    read_array(r, "width_base", &mut fonts.width_base, n)?;
    read_array(r, "height_base", &mut fonts.height_base, n)?;
    read_array(r, "depth_base", &mut fonts.depth_base, n)?;
    read_array(r, "italic_base", &mut fonts.italic_base, n)?;
    read_array(r, "lig_kern_base", &mut fonts.lig_kern_base, n)?;
    read_array(r, "kern_base", &mut fonts.kern_base, n)?;
    read_array(r, "exten_base", &mut fonts.exten_base, n)?;
    read_array(r, "param_base", &mut fonts.param_base, n)?;
    read_checked(r, "font_glue", &mut fonts.glue, n, |i, x| {
        ensure((MIN_HALFWORD..=lo_mem_max).contains(&x), || {
            format!("'font_glue[{i}]' ({x}) is not in [{MIN_HALFWORD}, {lo_mem_max}].")
        })
    })?;
    read_checked(r, "bchar_label", &mut fonts.bchar_label, n, |i, x| {
        ensure((0..=fmem_ptr - 1).contains(&x), || {
            format!("'bchar_label[{i}]' ({x}) is not in [0, {}].", fmem_ptr - 1)
        })
    })?;
    for (label, table) in [
        ("font_bchar", &mut fonts.bchar),
        ("font_false_bchar", &mut fonts.false_bchar),
    ] {
        read_checked(r, label, table, n, |i, x: i16| {
            let x = i32::from(x);
            ensure((MIN_QUARTERWORD..=NON_CHAR).contains(&x), || {
                format!("'{label}[{i}]' ({x}) is not in [{MIN_QUARTERWORD}, {NON_CHAR}].")
            })
        })?;
    }
    Ok(())
}

/// Read fonts `NULL_FONT .. NULL_FONT + n` of one array.
fn read_array<R: Read, T: Element>(
    r: &mut DumpReader<'_, R>,
    label: &str,
    table: &mut Table<T>,
    n: usize,
) -> Result<(), LoadError> {
    let at = i64::from(NULL_FONT);
    r.read_into(table, at, n)?;
    r.memstats(table);
    r.hexdump_range(&format!("'{label}' array"), table, at, n)
}

/// Like [`read_array`], validating every entry before reporting.
fn read_checked<R, T, F>(
    r: &mut DumpReader<'_, R>,
    label: &str,
    table: &mut Table<T>,
    n: usize,
    check: F,
) -> Result<(), LoadError>
where
    R: Read,
    T: Scalar,
    F: Fn(i64, T) -> Result<(), LoadError>,
{
    let at = i64::from(NULL_FONT);
    r.read_into(table, at, n)?;
    for i in at..at + n as i64 {
        check(i, table.get(i)?)?;
    }
    r.memstats(table);
    r.hexdump_range(&format!("'{label}' array"), table, at, n)
}
