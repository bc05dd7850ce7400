//! MLTeX and encTeX blocks.

use std::io::Read;

use fmtscope_core::layout::{
    ENCTEX_SIGNATURE, MLTEX_SIGNATURE, MUBYTE_CSWRITE_SIZE, MUBYTE_TABLE_SIZE,
};

use super::{count, ensure, signature_text};
use crate::error::LoadError;
use crate::state::EngineState;
use crate::stream::DumpReader;

/// Read a block signature followed by a 0/1 flag.
fn read_flag<R: Read>(
    r: &mut DumpReader<'_, R>,
    feature: &str,
    signature: i32,
    flag: &str,
) -> Result<bool, LoadError> {
    let x = r.read_i32()?;
    ensure(x == signature, || format!("{feature} signature expected."))?;
    r.inform(&format!("{feature} signature"), signature_text(x));
    r.hexdump_int(&format!("{feature} signature"), x);

    let x = r.read_i32()?;
    ensure(x == 0 || x == 1, || {
        format!("'{flag}' value is not in [0, 1] ({x}).")
    })?;
    r.inform(&format!("'{flag}' value"), x == 1);
    r.hexdump_int(&format!("'{feature} enabled' flag"), x);
    Ok(x == 1)
}

pub(crate) fn read_mltex<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    state.header.mltex_enabled = read_flag(r, "MLTeX", MLTEX_SIGNATURE, "mltex_enabled_p")?;
    Ok(())
}

pub(crate) fn read_enctex<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let enabled = read_flag(r, "encTeX", ENCTEX_SIGNATURE, "enctex_enabled_p")?;
    state.header.enctex_enabled = enabled;
    if enabled {
        let enc = &mut state.encoding;
        let table = count(MUBYTE_TABLE_SIZE);
        r.read_shown("'mubyte_read' array", &mut enc.mubyte_read, 0, table)?;
        r.read_shown("'mubyte_write' array", &mut enc.mubyte_write, 0, table)?;
        r.read_shown(
            "'mubyte_cswrite' array",
            &mut enc.mubyte_cswrite,
            0,
            count(MUBYTE_CSWRITE_SIZE),
        )?;
    }
    Ok(())
}
