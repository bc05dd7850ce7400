//! The ten load phases, in stream order.
//!
//! Each phase reads its section of the format, validates every field the
//! moment it is read, and reports it to the host. A failed check returns a
//! [`LoadError`] right away; nothing is retried.

use std::fmt::Display;
use std::io::Read;

use fmtscope_arena::{Element, Table};

use crate::error::LoadError;
use crate::state::EngineState;
use crate::stream::DumpReader;

mod constants;
mod eqtb;
mod features;
mod fonts;
mod hyph;
mod last;
mod memory;
mod pdftex;
mod strings;

/// One step of the load pipeline.
pub(crate) struct Phase<R> {
    /// Name used in diagnostics.
    pub name: &'static str,
    /// Status line shown while the phase runs.
    pub status: &'static str,
    /// The reader.
    pub run: fn(&mut DumpReader<'_, R>, &mut EngineState) -> Result<(), LoadError>,
}

/// Every phase in the order the format stores them.
pub(crate) fn pipeline<R: Read>() -> [Phase<R>; 10] {
    [
        Phase {
            name: "constants",
            status: "Undumping constants ...",
            run: constants::read,
        },
        Phase {
            name: "mltex",
            status: "Undumping MLTeX specific data ...",
            run: features::read_mltex,
        },
        Phase {
            name: "enctex",
            status: "Undumping encTeX specific data ...",
            run: features::read_enctex,
        },
        Phase {
            name: "strings",
            status: "Undumping string pool ...",
            run: strings::read,
        },
        Phase {
            name: "memory",
            status: "Undumping dynamic memory ...",
            run: memory::read,
        },
        Phase {
            name: "eqtb",
            status: "Undumping the table of equivalents ...",
            run: eqtb::read,
        },
        Phase {
            name: "fonts",
            status: "Undumping font informations ...",
            run: fonts::read,
        },
        Phase {
            name: "hyphenation",
            status: "Undumping hyphenation tables ...",
            run: hyph::read,
        },
        Phase {
            name: "pdftex",
            status: "Undumping pdfTeX specific data ...",
            run: pdftex::read,
        },
        Phase {
            name: "trailer",
            status: "Undumping the couple of last things ...",
            run: last::read,
        },
    ]
}

/// Fail with a format error unless `ok`.
pub(crate) fn ensure(ok: bool, detail: impl FnOnce() -> String) -> Result<(), LoadError> {
    if ok {
        Ok(())
    } else {
        Err(LoadError::format(detail()))
    }
}

/// Convert a count already checked to be non-negative.
pub(crate) fn count(n: impl TryInto<usize>) -> usize {
    n.try_into().unwrap_or(0)
}

impl<R: Read> DumpReader<'_, R> {
    /// Report an accepted integer as `- label value: x` plus its bytes.
    pub(crate) fn report_value(&mut self, label: &str, value: i32) {
        self.inform(&format!("{label} value"), value);
        self.hexdump_int(&format!("{label} value"), value);
    }

    /// Report a value that was derived, not read.
    pub(crate) fn derived(&mut self, label: &str, value: impl Display) {
        self.inform(&format!("{label} value"), value);
    }

    /// Read `n` elements into `table` at `at`, then show them.
    pub(crate) fn read_shown<T: Element>(
        &mut self,
        label: &str,
        table: &mut Table<T>,
        at: i64,
        n: usize,
    ) -> Result<(), LoadError> {
        self.read_into(table, at, n)?;
        self.hexdump_range(label, table, at, n)
    }
}

/// Copy element `from` of `table` over element `to`.
pub(crate) fn copy_element<T: Element>(
    table: &mut Table<T>,
    from: i64,
    to: i64,
) -> Result<(), LoadError> {
    let word = table.read_range(from, 1)?.to_vec();
    table.write_range(to, 1, &word)?;
    Ok(())
}

/// Show four bytes the way the format spells a signature.
pub(crate) fn signature_text(value: i32) -> String {
    format!("{:?}", String::from_utf8_lossy(&value.to_be_bytes()))
}
