//! Output sinks supplied by whoever drives a load or a show.

/// Receiver of everything the loader and the printer report.
///
/// All calls are plain ordered method calls on the caller's thread. Text
/// passed to [`log`](Host::log) is a fragment; line breaks are part of the
/// text.
pub trait Host {
    /// Append a fragment of text to the log view.
    fn log(&mut self, text: &str);

    /// Show a labelled block of raw bytes in the hex view.
    fn hexdump(&mut self, label: &str, bytes: &[u8]);

    /// Report load progress in `0..=max_progress()`.
    fn progress(&mut self, value: u32);

    /// Report a failure the user must see.
    fn alert(&mut self, message: &str);

    /// Upper bound of the values passed to [`progress`](Host::progress).
    fn max_progress(&self) -> u32 {
        100
    }

    /// Replace the one-line status text.
    fn status(&mut self, _message: &str) {}
}

/// A host that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl Host for NullHost {
    fn log(&mut self, _text: &str) {}

    fn hexdump(&mut self, _label: &str, _bytes: &[u8]) {}

    fn progress(&mut self, _value: u32) {}

    fn alert(&mut self, _message: &str) {}
}
