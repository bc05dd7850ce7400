//! Forward-only dump stream with progress and host reporting.

use std::fmt::Display;
use std::io::Read;

use fmtscope_arena::{Element, MemoryError, Table};
use fmtscope_core::{ArithError, Host};

use crate::error::LoadError;

/// Reads the big-endian words of a format file and mirrors every field it
/// consumes to the host.
///
/// Progress is `position * max_progress / total`, reported only when it
/// grows.
pub struct DumpReader<'h, R> {
    input: R,
    host: &'h mut dyn Host,
    position: u64,
    total: u64,
    max_progress: u64,
    last_progress: Option<u64>,
}

impl<'h, R: Read> DumpReader<'h, R> {
    /// Wrap `input`, a stream of `total` bytes.
    pub fn new(input: R, total: u64, host: &'h mut dyn Host) -> Self {
        let max_progress = u64::from(host.max_progress());
        Self {
            input,
            host,
            position: 0,
            total,
            max_progress,
            last_progress: None,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes left before the declared end of the stream.
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.position)
    }

    /// Read exactly `n` bytes.
    ///
    /// A request past the declared end fails before anything is allocated.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, LoadError> {
        if n as u64 > self.remaining() {
            return Err(LoadError::io(format!("read {n} bytes."), None));
        }
        let mut buf = vec![0; n];
        self.input
            .read_exact(&mut buf)
            .map_err(|e| LoadError::io(format!("read {n} bytes."), Some(e)))?;
        self.position += n as u64;
        self.report_progress()?;
        Ok(buf)
    }

    /// Read one 4-byte big-endian signed integer.
    pub fn read_i32(&mut self) -> Result<i32, LoadError> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read `n` elements of `T` straight into `table` starting at index `at`.
    pub fn read_into<T: Element>(
        &mut self,
        table: &mut Table<T>,
        at: i64,
        n: usize,
    ) -> Result<(), LoadError> {
        if n > 0 {
            let last = at.saturating_add(n as i64 - 1);
            if !table.contains(at) || !table.contains(last) {
                return Err(MemoryError::OutOfRange {
                    label: table.label().to_string(),
                    offset: at.saturating_sub(table.origin()).saturating_mul(T::SIZE as i64),
                    len: n.saturating_mul(T::SIZE),
                    size: table.arena().len(),
                }
                .into());
            }
        }
        let bytes = self.read_bytes(n * T::SIZE)?;
        table.write_range(at, n, &bytes)?;
        Ok(())
    }

    fn report_progress(&mut self) -> Result<(), LoadError> {
        let scaled = (self.position * self.max_progress)
            .checked_div(self.total)
            .ok_or(ArithError::DivisionByZero)?;
        if self.last_progress.is_none_or(|last| scaled > last) {
            self.last_progress = Some(scaled);
            self.host
                .progress(u32::try_from(scaled).unwrap_or(u32::MAX));
        }
        Ok(())
    }

    /// Log one line of text.
    pub fn line(&mut self, text: &str) {
        self.host.log(text);
        self.host.log("\n");
    }

    /// Log `- label: value`.
    pub fn inform(&mut self, label: &str, value: impl Display) {
        self.line(&format!("- {label}: {value}"));
    }

    /// Show raw bytes in the hex view.
    pub fn hexdump(&mut self, label: &str, bytes: &[u8]) {
        self.host.hexdump(label, bytes);
    }

    /// Show one integer as its four stored bytes.
    pub fn hexdump_int(&mut self, label: &str, value: i32) {
        self.host.hexdump(label, &value.to_be_bytes());
    }

    /// Show `n` elements of `table` starting at index `at`.
    pub fn hexdump_range<T: Element>(
        &mut self,
        label: &str,
        table: &Table<T>,
        at: i64,
        n: usize,
    ) -> Result<(), LoadError> {
        let bytes = table.read_range(at, n)?;
        self.host.hexdump(label, bytes);
        Ok(())
    }

    /// Log the allocation summary of `table`.
    pub fn memstats<T: Element>(&mut self, table: &Table<T>) {
        let stats = table.stats();
        self.line(&format!("- '{}' statistics:", stats.label));
        self.line(&format!("  + cell type: {}", stats.cell_type));
        self.line(&format!("  + cell size (bytes): {}", stats.cell_size));
        self.line(&format!("  + allocated space (cells): {}", stats.cells));
        self.line(&format!("  + allocated space (bytes): {}", stats.bytes));
        self.line(&format!("  + base offset (cells): {}", stats.base_cells));
        self.line(&format!("  + base offset (bytes): {}", stats.base_bytes));
    }

    /// Replace the host status line.
    pub fn status(&mut self, message: &str) {
        self.host.status(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;
    use fmtscope_test_utils::RecordingHost;

    #[test]
    fn progress_is_reported_only_when_it_grows() {
        let data = [0u8; 8];
        let mut host = RecordingHost::new();
        let mut reader = DumpReader::new(&data[..], 400, &mut host);
        for _ in 0..8 {
            reader.read_bytes(1).unwrap();
        }
        assert_eq!(reader.position(), 8);
        assert_eq!(host.progress, vec![0, 1, 2]);
    }

    #[test]
    fn short_read_is_io() {
        let data = [0u8, 0, 1];
        let mut host = RecordingHost::new();
        let mut reader = DumpReader::new(&data[..], 3, &mut host);
        let err = reader.read_i32().unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Io);
        assert_eq!(err.detail(), "read 4 bytes.");
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn oversized_requests_fail_before_reading() {
        let data = [0u8; 8];
        let mut host = RecordingHost::new();
        let mut reader = DumpReader::new(&data[..], 8, &mut host);
        reader.read_i32().unwrap();
        let err = reader.read_bytes(usize::MAX / 2).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Io);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn reads_outside_the_table_are_refused_up_front() {
        let data = [0u8; 64];
        let mut host = RecordingHost::new();
        let mut reader = DumpReader::new(&data[..], 64, &mut host);
        let mut table: Table<i32> = Table::alloc("str_start", 3);
        let err = reader.read_into(&mut table, 2, 5).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::MemoryAccess);
        assert_eq!(reader.position(), 0);
        reader.read_into(&mut table, 0, 4).unwrap();
        assert_eq!(reader.position(), 16);
    }

    #[test]
    fn empty_total_is_arithmetic() {
        let data = [0u8; 4];
        let mut host = RecordingHost::new();
        let mut reader = DumpReader::new(&data[..], 0, &mut host);
        let err = reader.read_i32().unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Arithmetic);
    }

    #[test]
    fn integers_are_big_endian() {
        let data = [0x57, 0x32, 0x54, 0x58];
        let mut host = RecordingHost::new();
        let mut reader = DumpReader::new(&data[..], 4, &mut host);
        assert_eq!(reader.read_i32().unwrap(), 0x5732_5458);
    }

    #[test]
    fn memstats_lists_the_table_shape() {
        let table: Table<i32> = Table::alloc("str_start", 3);
        let mut host = RecordingHost::new();
        DumpReader::new(&[][..], 0, &mut host).memstats(&table);
        let log = host.log_text();
        assert!(log.starts_with("- 'str_start' statistics:\n  + cell type: int\n"));
        assert!(log.contains("  + allocated space (bytes): 16\n"));
        assert!(log.ends_with("  + base offset (bytes): 0\n"));
    }
}
