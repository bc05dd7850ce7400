//! Interaction mode, format identification and the trailer.

use std::io::Read;

use fmtscope_core::layout::{BATCH_MODE, ERROR_STOP_MODE, FORMAT_TRAILER};

use super::ensure;
use crate::error::LoadError;
use crate::state::EngineState;
use crate::stream::DumpReader;

pub(crate) fn read<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let x = r.read_i32()?;
    ensure((BATCH_MODE..=ERROR_STOP_MODE).contains(&x), || {
        format!("'interaction' ({x}) is not in [{BATCH_MODE}, {ERROR_STOP_MODE}].")
    })?;
    state.header.interaction = x;
    r.report_value("'interaction'", x);

    let str_ptr = state.strings.str_ptr();
    let x = r.read_i32()?;
    ensure((0..=str_ptr).contains(&x), || {
        format!("'format_ident' ({x}) is not in [0, {str_ptr}].")
    })?;
    state.header.format_ident = x;
    r.report_value("'format_ident'", x);

    let x = r.read_i32()?;
    ensure(x == FORMAT_TRAILER, || {
        format!("Bad .fmt file trailer value ({x}).")
    })?;
    r.hexdump_int("Trailer", x);
    Ok(())
}
