//! Load entry points.

use std::io::Read;

use fmtscope_core::layout::PDF_IGNORED_DIMEN_CODE;
use fmtscope_core::{Host, TexConfig};
use tracing::{debug, error};

use crate::error::LoadError;
use crate::phases::pipeline;
use crate::state::EngineState;
use crate::stream::DumpReader;

/// Read a whole format from `input`, a stream of `total` bytes.
///
/// Every field is mirrored to `host` as it is read. On failure the error
/// carries the number of bytes consumed before the failing read or check,
/// and the partly built state is dropped.
pub fn read_format<R: Read>(
    input: R,
    total: u64,
    config: &TexConfig,
    host: &mut dyn Host,
) -> Result<EngineState, LoadError> {
    let mut state = EngineState::new(config);
    let mut reader = DumpReader::new(input, total, host);

    for phase in pipeline::<R>() {
        debug!(phase = phase.name, offset = reader.position(), "load phase");
        reader.status(phase.status);
        (phase.run)(&mut reader, &mut state).map_err(|e| e.at(reader.position()))?;
    }

    state.nest.aux = state
        .eqtb
        .dimen_par(PDF_IGNORED_DIMEN_CODE)
        .map_err(|e| LoadError::from(e).at(reader.position()))?;
    let nest = &state.nest;
    reader.inform("cur_list.mode_field", nest.mode);
    reader.inform("cur_list.head_field", nest.head);
    reader.inform("cur_list.tail_field", nest.tail);
    reader.inform("cur_list.eTeX_aux_field", nest.etex_aux);
    reader.inform("cur_list.pg_field", nest.prev_graf);
    reader.inform("cur_list.ml_field", nest.mode_line);
    reader.inform("cur_list.aux_field", nest.aux);
    debug!(bytes = reader.position(), "format loaded");
    Ok(state)
}

/// Load a format, reporting the outcome to `host`.
///
/// `name` only appears in messages. A failure raises one alert on the host
/// and yields `None`.
pub fn load_format<R: Read>(
    input: R,
    total: u64,
    name: &str,
    config: &TexConfig,
    host: &mut dyn Host,
) -> Option<EngineState> {
    host.log(&format!("Loading \"{name}\" ...\n"));
    match read_format(input, total, config, host) {
        Ok(state) => {
            host.log("... succeed.\n");
            host.status(&format!("Format file \"{name}\" was successfully loaded."));
            Some(state)
        }
        Err(err) => {
            error!(
                kind = ?err.kind(),
                offset = err.offset(),
                detail = err.detail(),
                "format load failed"
            );
            host.alert(&alert_text(name, &err));
            host.log("... failed.\n");
            None
        }
    }
}

/// The message shown when loading `name` fails with `err`.
pub fn alert_text(name: &str, err: &LoadError) -> String {
    format!(
        "Loading pdfTeX format file \"{name}\" failed near offset {:08X}.\nReason: {}\nDetail: {}",
        err.offset(),
        err.reason(),
        err.detail()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;

    #[test]
    fn alert_names_the_file_offset_and_reason() {
        let err = LoadError::format("Bad .fmt file signature.").at(4);
        assert_eq!(
            alert_text("plain.fmt", &err),
            "Loading pdfTeX format file \"plain.fmt\" failed near offset 00000004.\n\
             Reason: pdfTeX format file is corrupted.\n\
             Detail: Bad .fmt file signature."
        );
        assert_eq!(err.kind(), LoadErrorKind::Format);
    }
}
