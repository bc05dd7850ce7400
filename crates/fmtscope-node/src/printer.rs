//! Character-level output with the conventions of TeX's print routines.
//!
//! A [`Printer`] borrows a loaded [`EngineState`] and writes to a
//! [`Host`]. Text accumulates in a buffer that is handed to
//! [`Host::log`] before every alert and whenever a public show call
//! finishes, so log fragments and alerts reach the host in order.
//!
//! Pool strings are printed byte by byte through [`Printer::print_char`],
//! which applies the format's `xchr` table and turns `\newlinechar` into a
//! line break. Fixed labels (`[:GLUE_NODE`, `dimensions`, ...) bypass that
//! translation.

use fmtscope_arena::MemoryError;
use fmtscope_core::layout::{
    ACTIVE_BASE, EQTB_SIZE, FILLL, HASH_BASE, MUBYTE_ZERO, NEW_LINE_CHAR_CODE, NULL_CS,
    NULL_FLAG, NULL_FONT, SCRIPT_SIZE, SINGLE_BASE, TEXT_SIZE, UNDEFINED_CONTROL_SEQUENCE, UNITY,
};
use fmtscope_core::Host;
use fmtscope_dump::{EngineState, PdfFont};
use smallvec::SmallVec;
use tracing::warn;

/// Decimal or hexadecimal digits, least significant first.
type Digits = SmallVec<[u8; 12]>;

/// Renders parts of an [`EngineState`] as text on a [`Host`].
pub struct Printer<'a> {
    state: &'a EngineState,
    host: &'a mut dyn Host,
    buf: String,
    new_line_char: i32,
}

impl<'a> Printer<'a> {
    /// A printer over `state` writing to `host`.
    pub fn new(state: &'a EngineState, host: &'a mut dyn Host) -> Self {
        let new_line_char = state.eqtb.int_par(NEW_LINE_CHAR_CODE).unwrap_or(-1);
        Self {
            state,
            host,
            buf: String::new(),
            new_line_char,
        }
    }

    /// The state being printed.
    pub fn state(&self) -> &'a EngineState {
        self.state
    }

    /// Hand buffered text to the host.
    pub fn flush(&mut self) {
        if !self.buf.is_empty() {
            self.host.log(&self.buf);
            self.buf.clear();
        }
    }

    /// Raise `message` on the host after flushing pending text.
    pub fn alert(&mut self, message: &str) {
        self.flush();
        warn!(message, "printer anomaly");
        self.host.alert(message);
    }

    /// Append a fixed label verbatim.
    pub(crate) fn text(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Append a fixed label and end the line.
    pub(crate) fn line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    /// End the current line.
    pub fn print_ln(&mut self) {
        self.buf.push('\n');
    }

    /// Print one character through `xchr`; `\newlinechar` ends the line.
    pub fn print_char(&mut self, c: u8) {
        if i32::from(c) == self.new_line_char {
            self.print_ln();
            return;
        }
        let shown = self.state.header.xchr.get(usize::from(c)).copied().unwrap_or(c);
        self.buf.push(char::from(shown));
    }

    /// Print every byte of `s` through [`print_char`](Self::print_char).
    pub fn print_str(&mut self, s: &str) {
        s.bytes().for_each(|b| self.print_char(b));
    }

    /// Print pool string `s`.
    pub fn print(&mut self, s: i32) {
        let str_ptr = self.state.strings.str_ptr();
        if s >= str_ptr {
            self.alert(&format!("print(s): s ({s}) >= str_ptr ({str_ptr})."));
            return;
        }
        if s < 0 {
            self.alert(&format!("print(s): s ({s}) < 0."));
            return;
        }
        let state = self.state;
        match state.strings.bytes(s) {
            Ok(bytes) => bytes.iter().for_each(|&b| self.print_char(b)),
            Err(e) => self.alert(&format!("print(s): {e}")),
        }
    }

    /// Print pool string `s`, each byte as its own printable string.
    pub fn slow_print(&mut self, s: i32) {
        if s >= self.state.strings.str_ptr() || s < 256 {
            self.print(s);
            return;
        }
        let state = self.state;
        match state.strings.bytes(s) {
            Ok(bytes) => bytes.iter().for_each(|&b| self.print(i32::from(b))),
            Err(e) => self.alert(&format!("slow_print(s): {e}")),
        }
    }

    /// Print `\name`.
    pub fn print_esc(&mut self, name: &str) {
        self.print_char(b'\\');
        self.print_str(name);
    }

    /// Print a backslash followed by pool string `s`.
    pub fn print_esc_str(&mut self, s: i32) {
        self.print_char(b'\\');
        self.slow_print(s);
    }

    fn print_the_digs(&mut self, digs: &Digits) {
        for &d in digs.iter().rev() {
            let c = if d < 10 { b'0' + d } else { b'A' - 10 + d };
            self.print_char(c);
        }
    }

    fn digits(mut n: i64, radix: i64) -> Digits {
        let mut digs = Digits::new();
        loop {
            digs.push((n % radix) as u8);
            n /= radix;
            if n == 0 {
                break digs;
            }
        }
    }

    /// Print `n` in decimal.
    pub fn print_int(&mut self, n: i32) {
        let mut n = i64::from(n);
        if n < 0 {
            self.print_char(b'-');
            n = -n;
        }
        self.print_the_digs(&Self::digits(n, 10));
    }

    /// Print `n` in hexadecimal after a `"`.
    ///
    /// Negative values print as `"-` followed by the magnitude.
    pub fn print_hex(&mut self, n: i32) {
        let mut n = i64::from(n);
        self.print_char(b'"');
        if n < 0 {
            self.print_char(b'-');
            n = -n;
        }
        self.print_the_digs(&Self::digits(n, 16));
    }

    /// Print a scaled value with the fewest decimals that read back exactly.
    pub fn print_scaled(&mut self, s: i32) {
        let unity = i64::from(UNITY);
        let mut s = i64::from(s);
        if s < 0 {
            self.print_char(b'-');
            s = -s;
        }
        self.print_the_digs(&Self::digits(s / unity, 10));
        self.print_char(b'.');
        s = 10 * (s % unity) + 5;
        let mut delta = 10;
        loop {
            if delta > unity {
                s += 0o100000 - 50000;
            }
            self.print_char(b'0' + (s / unity) as u8);
            s = 10 * (s % unity);
            delta *= 10;
            if s <= delta {
                break;
            }
        }
    }

    /// Print a rule dimension, which may be running.
    pub fn print_rule_dimen(&mut self, d: i32) {
        if d == NULL_FLAG {
            self.text("<running dimension>");
        } else {
            self.print_scaled(d);
        }
    }

    /// Print a glue component of the given infinity `order`.
    pub fn print_glue(&mut self, d: i32, order: u8, unit: &str) {
        self.print_scaled(d);
        if order > FILLL {
            self.print_str("foul");
        } else if order > 0 {
            self.print_str("fil");
            for _ in 1..order {
                self.print_char(b'l');
            }
        } else {
            self.print_str(unit);
        }
    }

    /// Print the glue specification at `p`, or `*` if `p` is not a
    /// low-memory address.
    pub fn print_spec(&mut self, p: i32, unit: &str) -> Result<(), MemoryError> {
        let mem = &self.state.memory;
        if p < mem.mem_min || p >= mem.lo_mem_max {
            self.print_char(b'*');
            return Ok(());
        }
        self.print_scaled(mem.width(p)?);
        self.print_str(unit);
        let stretch = mem.stretch(p)?;
        if stretch != 0 {
            self.print_str(" plus ");
            self.print_glue(stretch, mem.stretch_order(p)?, unit);
        }
        let shrink = mem.shrink(p)?;
        if shrink != 0 {
            self.print_str(" minus ");
            self.print_glue(shrink, mem.shrink_order(p)?, unit);
        }
        Ok(())
    }

    fn pdf_font(&self, f: i32) -> Result<&'a PdfFont, MemoryError> {
        let pdf = &self.state.fonts.pdf;
        usize::try_from(f)
            .ok()
            .and_then(|i| pdf.get(i))
            .ok_or_else(|| MemoryError::OutOfRange {
                label: "pdf_font".into(),
                offset: i64::from(f),
                len: 1,
                size: pdf.len(),
            })
    }

    /// Print the identifying fields of font `f`, one per line.
    pub fn print_font_identifier(&mut self, f: i32, indent: &str) -> Result<(), MemoryError> {
        let fonts = &self.state.fonts;
        let eqtb = &self.state.eqtb;
        let pdf = self.pdf_font(f)?;

        self.text(indent);
        if pdf.blink == NULL_FONT {
            self.text(&format!("id_text({f}): \""));
            self.print(eqtb.font_id_text(f)?);
        } else {
            let b = pdf.blink;
            self.text(&format!("id_text(pdf_font_blink[{f}] = {b}): \""));
            self.print(eqtb.font_id_text(b)?);
        }
        self.line("\"");

        self.text(&format!("{indent}name({f}): \""));
        self.print(fonts.font_name(f)?);
        self.line("\"");

        let area = fonts.area.get(i64::from(f))?;
        self.text(&format!("{indent}area({f}): "));
        if area > 0 && area < self.state.strings.str_ptr() {
            self.text("\"");
            self.print(area);
            self.text("\"");
        } else {
            self.text(&area.to_string());
        }
        self.print_ln();

        self.text(&format!("{indent}at_size({f}): "));
        self.print_scaled(fonts.font_size(f)?);
        self.line("pt");
        self.text(&format!("{indent}design_size({f}): "));
        self.print_scaled(fonts.font_dsize(f)?);
        self.line("pt");

        self.text(&format!("{indent}pdf_font_expand_ratio({f}): "));
        if pdf.expand_ratio > 0 {
            self.text("+");
        }
        self.print_int(pdf.expand_ratio);
        self.print_ln();
        Ok(())
    }

    /// Print the font and character of the character node at `p`.
    pub fn print_font_and_char(&mut self, p: i32, indent: &str) -> Result<(), MemoryError> {
        let mem = &self.state.memory;
        if p > mem.mem_end {
            self.line(&format!("{indent}CLOBBERED."));
            return Ok(());
        }
        let f = i32::from(mem.font(p)?);
        if f > self.state.fonts.font_max {
            self.line(&format!("{indent}*** BAD FONT LOCATION ({p}) ***"));
            return Ok(());
        }
        self.line(&format!("{indent}Font {{"));
        self.print_font_identifier(f, &format!("{indent}  "))?;
        self.line(&format!("{indent}}}"));
        self.text(&format!("{indent}Character: '"));
        self.print(i32::from(mem.character(p)?));
        self.line("'");
        Ok(())
    }

    /// Print control sequence `p` as a token, with range checks.
    pub fn print_cs(&mut self, p: i32) -> Result<(), MemoryError> {
        let eqtb = &self.state.eqtb;
        if p < HASH_BASE {
            if p >= SINGLE_BASE {
                if p == NULL_CS {
                    self.text("[ESCAPE, \"\"]");
                } else {
                    self.text("[ESCAPE, \"");
                    self.print(p - SINGLE_BASE);
                    self.text("\"]");
                }
            } else if p < ACTIVE_BASE {
                self.alert(&format!("print_cs: p < ACTIVE_BASE ({p})."));
            } else {
                self.text("[ACTIVE_CHAR, \"");
                self.print(p - ACTIVE_BASE);
                self.text("\"]");
            }
        } else if (UNDEFINED_CONTROL_SEQUENCE..=EQTB_SIZE).contains(&p) || p > eqtb.eqtb_top {
            self.alert(&format!("print_cs: p ({p}) is out of range."));
        } else if eqtb.text(p)? >= self.state.strings.str_ptr() {
            self.alert(&format!("print_cs: p ({p}) does not exist in str_pool."));
        } else {
            self.text("[ESCAPE, \"");
            self.print(eqtb.text(p)?);
            self.text("\"]");
        }
        Ok(())
    }

    /// Print control sequence `p` as a token, without range checks.
    pub fn sprint_cs(&mut self, p: i32) -> Result<(), MemoryError> {
        if p < SINGLE_BASE {
            self.text("[ACTIVE_CHAR, \"");
            self.print(p - ACTIVE_BASE);
            self.text("\"]");
        } else if p < NULL_CS {
            self.text("[ESCAPE, \"");
            self.print(p - SINGLE_BASE);
            self.text("\"]");
        } else if p < HASH_BASE {
            self.text("[ESCAPE, \"\"]");
        } else {
            self.text("[ESCAPE, \"");
            self.print(self.state.eqtb.text(p)?);
            self.text("\"]");
        }
        Ok(())
    }

    /// Print pool string `s` with every `"` escaped. String 0 prints nothing.
    pub fn print_quoted(&mut self, s: i32) -> Result<(), MemoryError> {
        if s == 0 {
            return Ok(());
        }
        let state = self.state;
        for &b in state.strings.bytes(s)? {
            if b == b'"' {
                self.text("\\");
            }
            self.print(i32::from(b));
        }
        Ok(())
    }

    /// Print a file name from its area, name and extension strings.
    pub fn print_file_name(&mut self, n: i32, a: i32, e: i32) -> Result<(), MemoryError> {
        self.print_quoted(a)?;
        self.print_quoted(n)?;
        self.print_quoted(e)
    }

    /// Print the family and character of the noad field at `p`.
    pub fn print_fam_and_char(&mut self, p: i32) -> Result<(), MemoryError> {
        let mem = &self.state.memory;
        self.text("{fam: ");
        self.print_int(i32::from(mem.fam(p)?));
        self.text(", char: '");
        self.print(i32::from(mem.character(p)?));
        self.text("'}");
        Ok(())
    }

    /// Print the delimiter field at `p` as one hexadecimal code.
    pub fn print_delimiter(&mut self, p: i32) -> Result<(), MemoryError> {
        let mem = &self.state.memory;
        let small = (i32::from(mem.small_fam(p)?) << 8) + i32::from(mem.small_char(p)?);
        let a = (small << 12) + (i32::from(mem.large_fam(p)?) << 8) + i32::from(mem.large_char(p)?);
        if a < 0 {
            self.print_int(a);
        } else {
            self.print_hex(a);
        }
        Ok(())
    }

    /// Print a math style by its command name.
    pub fn print_style(&mut self, c: u8) {
        match c >> 1 {
            0 => self.print_esc("displaystyle"),
            1 => self.print_esc("textstyle"),
            2 => self.print_esc("scriptstyle"),
            3 => self.print_esc("scriptscriptstyle"),
            _ => self.print_str("Unknown style!"),
        }
    }

    /// Print a math font size by its command name.
    pub fn print_size(&mut self, s: i32) {
        if s == TEXT_SIZE {
            self.print_esc("textfont");
        } else if s == SCRIPT_SIZE {
            self.print_esc("scriptfont");
        } else {
            self.print_esc("scriptscriptfont");
        }
    }

    /// Print `name {stream_num: n}`, with the encTeX setting of a write.
    pub fn print_write_whatsit(&mut self, name: &str, stream: u8, mubyte: Option<u8>) {
        self.print_str(name);
        self.text(" {stream_num: ");
        self.print_int(i32::from(stream));
        if let Some(m) = mubyte.map(i32::from).filter(|&m| m != MUBYTE_ZERO) {
            self.text(", mubyte: ");
            self.print_int(m - MUBYTE_ZERO);
        }
        self.text("}");
    }

    /// Text buffered but not yet flushed.
    #[cfg(test)]
    pub(crate) fn pending(&self) -> &str {
        &self.buf
    }
}

impl Drop for Printer<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtscope_core::TexConfig;
    use fmtscope_test_utils::RecordingHost;
    use proptest::prelude::*;

    fn render(f: impl FnOnce(&mut Printer<'_>)) -> String {
        let state = EngineState::new(&TexConfig::new());
        let mut host = RecordingHost::new();
        {
            let mut printer = Printer::new(&state, &mut host);
            f(&mut printer);
        }
        host.log_text()
    }

    #[test]
    fn integers_print_in_decimal() {
        assert_eq!(render(|p| p.print_int(0)), "0");
        assert_eq!(render(|p| p.print_int(-42)), "-42");
        assert_eq!(render(|p| p.print_int(i32::MIN)), "-2147483648");
    }

    #[test]
    fn hex_uses_uppercase_digits() {
        assert_eq!(render(|p| p.print_hex(0x1F)), "\"1F");
        assert_eq!(render(|p| p.print_hex(0)), "\"0");
        assert_eq!(render(|p| p.print_hex(-26)), "\"-1A");
    }

    #[test]
    fn scaled_values_round_trip_in_few_digits() {
        assert_eq!(render(|p| p.print_scaled(UNITY)), "1.0");
        assert_eq!(render(|p| p.print_scaled(UNITY / 2 * 3)), "1.5");
        assert_eq!(render(|p| p.print_scaled(-UNITY / 4)), "-0.25");
        assert_eq!(render(|p| p.print_scaled(1)), "0.00002");
        assert_eq!(render(|p| p.print_scaled(10 * UNITY)), "10.0");
    }

    #[test]
    fn glue_orders_spell_their_infinity() {
        assert_eq!(render(|p| p.print_glue(UNITY, 0, "pt")), "1.0pt");
        assert_eq!(render(|p| p.print_glue(UNITY, 1, "pt")), "1.0fil");
        assert_eq!(render(|p| p.print_glue(UNITY, 3, "pt")), "1.0filll");
        assert_eq!(render(|p| p.print_glue(UNITY, 4, "pt")), "1.0foul");
    }

    #[test]
    fn running_rules_are_named() {
        assert_eq!(render(|p| p.print_rule_dimen(NULL_FLAG)), "<running dimension>");
    }

    #[test]
    fn styles_and_sizes_print_as_commands() {
        assert_eq!(render(|p| p.print_style(2)), "\\textstyle");
        assert_eq!(render(|p| p.print_style(9)), "Unknown style!");
        assert_eq!(render(|p| p.print_size(SCRIPT_SIZE)), "\\scriptfont");
    }

    #[test]
    fn write_whatsits_show_mubyte_only_when_set() {
        let plain = render(|p| p.print_write_whatsit("write", 3, Some(MUBYTE_ZERO as u8)));
        assert_eq!(plain, "write {stream_num: 3}");
        let mubyte = render(|p| p.print_write_whatsit("write", 3, Some(MUBYTE_ZERO as u8 + 2)));
        assert_eq!(mubyte, "write {stream_num: 3, mubyte: 2}");
    }

    #[test]
    fn missing_strings_raise_alerts() {
        let state = EngineState::new(&TexConfig::new());
        let mut host = RecordingHost::new();
        {
            let mut printer = Printer::new(&state, &mut host);
            printer.text("before");
            printer.print(7);
            assert_eq!(printer.pending(), "");
        }
        assert_eq!(host.log, vec!["before".to_string()]);
        assert_eq!(host.alerts, vec!["print(s): s (7) >= str_ptr (0).".to_string()]);
    }

    proptest! {
        #[test]
        fn print_int_matches_display(n in any::<i32>()) {
            prop_assert_eq!(render(|p| p.print_int(n)), n.to_string());
        }

        #[test]
        fn print_scaled_reads_back(s in -0x4000_0000i32..0x4000_0000) {
            let text = render(|p| p.print_scaled(s));
            let value: f64 = text.parse().unwrap();
            let back = (value * f64::from(UNITY)).round() as i64;
            prop_assert!((back - i64::from(s)).abs() <= 1);
        }
    }
}
