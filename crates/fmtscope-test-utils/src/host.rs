use fmtscope_core::Host;

/// A [`Host`] that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    pub log: Vec<String>,
    pub hexdumps: Vec<(String, Vec<u8>)>,
    pub progress: Vec<u32>,
    pub alerts: Vec<String>,
    pub statuses: Vec<String>,
    pub max_progress: u32,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            max_progress: 100,
            ..Self::default()
        }
    }

    /// Everything logged so far, concatenated.
    pub fn log_text(&self) -> String {
        self.log.concat()
    }

    /// Labels of every hexdump, in order.
    pub fn hexdump_labels(&self) -> Vec<&str> {
        self.hexdumps.iter().map(|(label, _)| label.as_str()).collect()
    }
}

impl Host for RecordingHost {
    fn log(&mut self, text: &str) {
        self.log.push(text.to_string());
    }

    fn hexdump(&mut self, label: &str, bytes: &[u8]) {
        self.hexdumps.push((label.to_string(), bytes.to_vec()));
    }

    fn progress(&mut self, value: u32) {
        self.progress.push(value);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn max_progress(&self) -> u32 {
        self.max_progress
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }
}
