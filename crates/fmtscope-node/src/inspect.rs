//! Views of the fixed list heads at the top of main memory.
//!
//! Each view dumps the raw head word, prints a title and then shows the
//! list hanging off the head. Failures alert once, like
//! [`Printer::show_node_list`].

use std::collections::HashSet;

use fmtscope_core::arith::x_over_n;
use fmtscope_core::layout::{
    active, adjust_head, align_head, contrib_head, end_span, hold_head, omit_template,
    page_head, page_ins_head, temp_head, DELTA_NODE, HYPHENATED, INS_NODE, NULL, SPLIT_UP,
    UNHYPHENATED,
};

use crate::error::ShowError;
use crate::names::fitness_name;
use crate::printer::Printer;
use crate::tokens::TOKEN_LIMIT;

/// Lower-case hex, with a sign for negative values.
pub(crate) fn hex(n: i32) -> String {
    if n < 0 {
        format!("-{:x}", n.unsigned_abs())
    } else {
        format!("{n:x}")
    }
}

impl Printer<'_> {
    pub(crate) fn inspect(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<(), ShowError>,
    ) -> Result<(), ShowError> {
        let result = body(self);
        self.finish(result)
    }

    fn location(&mut self, m: i32) -> Result<(), ShowError> {
        let bytes = self.state().memory.mem.read_range(i64::from(m), 1)?;
        let mut s = format!("{m:08X}:");
        for b in bytes {
            s.push_str(&format!(" {b:02X}"));
        }
        self.line(&s);
        Ok(())
    }

    /// Dump the eight bytes of memory word `m`.
    pub fn show_memory_location(&mut self, m: i32) -> Result<(), ShowError> {
        self.inspect(|p| p.location(m))
    }

    fn head_list(&mut self, head: i32, title: &str) -> Result<(), ShowError> {
        self.inspect(|p| {
            p.location(head)?;
            p.line(title);
            let first = p.state().memory.link(head)?;
            if first != NULL {
                p.walk_list(first, "  ")?;
            }
            Ok(())
        })
    }

    fn head_tokens(&mut self, head: i32, title: &str) -> Result<(), ShowError> {
        self.inspect(|p| {
            p.location(head)?;
            p.line(title);
            let first = p.state().memory.link(head)?;
            if first != NULL {
                p.show_token_list(first, "  ", TOKEN_LIMIT)?;
            }
            Ok(())
        })
    }

    fn top(&self) -> i32 {
        self.state().memory.mem_top
    }

    /// Insertion classes waiting on the current page.
    pub fn show_page_ins(&mut self) -> Result<(), ShowError> {
        let head = page_ins_head(self.top());
        self.inspect(|p| {
            let mem = &p.state().memory;
            let eqtb = &p.state().eqtb;
            p.location(head)?;
            p.line("Page insertions:");
            let mut seen = HashSet::new();
            let mut r = mem.link(head)?;
            while r != head {
                if !seen.insert(r) {
                    return Err(ShowError::Cycle { at: r });
                }
                p.print_esc("insert");
                let class = mem.subtype(r)?;
                p.print_int(i32::from(class));
                p.text(" adds ");
                let count = eqtb.count(i32::from(class))?;
                let height = mem.height(r)?;
                let adds = if count == 1000 {
                    height
                } else {
                    x_over_n(height, 1000)?.0.saturating_mul(count)
                };
                p.print_scaled(adds);
                if mem.node_type(r)? == SPLIT_UP {
                    let broken = mem.broken_ins(r)?;
                    let mut q = page_head(p.top());
                    let mut splits = 0;
                    let mut walked = HashSet::new();
                    loop {
                        q = mem.link(q)?;
                        if q == NULL {
                            break;
                        }
                        if !walked.insert(q) {
                            return Err(ShowError::Cycle { at: q });
                        }
                        if mem.node_type(q)? == INS_NODE && mem.subtype(q)? == class {
                            splits += 1;
                        }
                        if q == broken {
                            break;
                        }
                    }
                    p.text(", #");
                    p.print_int(splits);
                    p.text(" might split");
                }
                p.print_ln();
                r = mem.link(r)?;
            }
            Ok(())
        })
    }

    /// Material waiting to move to the current page.
    pub fn show_contrib(&mut self) -> Result<(), ShowError> {
        self.head_list(contrib_head(self.top()), "Page contribution list:")
    }

    /// The current page.
    pub fn show_page(&mut self) -> Result<(), ShowError> {
        self.head_list(page_head(self.top()), "Current page list:")
    }

    /// The temporary list, as nodes.
    pub fn show_temp(&mut self) -> Result<(), ShowError> {
        self.head_list(temp_head(self.top()), "Temporary list:")
    }

    /// The temporary list, as tokens.
    pub fn show_ttemp(&mut self) -> Result<(), ShowError> {
        self.head_tokens(temp_head(self.top()), "Temporary (token) list:")
    }

    /// The hold list, as nodes.
    pub fn show_hold(&mut self) -> Result<(), ShowError> {
        self.head_list(hold_head(self.top()), "Hold list:")
    }

    /// The hold list, as tokens.
    pub fn show_thold(&mut self) -> Result<(), ShowError> {
        self.head_tokens(hold_head(self.top()), "Hold (token) list:")
    }

    /// Material migrating out of the current paragraph.
    pub fn show_adjust(&mut self) -> Result<(), ShowError> {
        self.head_list(adjust_head(self.top()), "Adjustment list:")
    }

    /// The line breaker's active and delta nodes.
    pub fn show_active(&mut self) -> Result<(), ShowError> {
        let head = active(self.top());
        self.inspect(|p| {
            let mem = &p.state().memory;
            p.location(head)?;
            p.location(head + 1)?;
            p.line("Active break nodes list:");
            let mut seen = HashSet::new();
            let mut r = head;
            while mem.link(r)? != NULL {
                r = mem.link(r)?;
                if r == head {
                    break;
                }
                if !seen.insert(r) {
                    return Err(ShowError::Cycle { at: r });
                }
                match mem.node_type(r)? {
                    kind @ (HYPHENATED | UNHYPHENATED) => {
                        p.line("  [[ACTIVE_NODE");
                        let kind = if kind == HYPHENATED {
                            "hyphenated"
                        } else {
                            "unhyphenated"
                        };
                        p.line(&format!("    Type: {kind}"));
                        p.text("    Line number: ");
                        p.print_int(mem.line_number(r)?);
                        p.print_ln();
                        p.line(&format!("    Fitness: {}", fitness_name(mem.fitness(r)?)));
                        p.text("    Total demerits: ");
                        p.print_int(mem.total_demerits(r)?);
                        p.print_ln();
                        let b = mem.break_node(r)?;
                        if b != NULL {
                            p.line("    Associated passive node:");
                            p.text("    - serial number: ");
                            p.print_int(mem.serial(b)?);
                            p.print_ln();
                            p.passive_link("previous passive node", mem.link(b)?);
                            p.passive_link("current break", mem.cur_break(b)?);
                            p.passive_link("previous break", mem.prev_break(b)?);
                        }
                        p.line("  ]]");
                    }
                    DELTA_NODE => {
                        p.line("  [[DELTA_NODE");
                        p.text("    Natural width difference: ");
                        p.print_scaled(mem.sc(r + 1)?);
                        p.print_ln();
                        p.text("    Stretch differences: ");
                        for (k, unit) in [(2, "pt "), (3, "fil "), (4, "fill "), (5, "filll")] {
                            p.print_scaled(mem.sc(r + k)?);
                            p.text(unit);
                        }
                        p.print_ln();
                        p.text("    Shrink difference: ");
                        p.print_scaled(mem.sc(r + 6)?);
                        p.print_ln();
                        p.line("  ]]");
                    }
                    _ => p.line("  [[???]]"),
                }
            }
            Ok(())
        })
    }

    fn passive_link(&mut self, label: &str, q: i32) {
        self.text(&format!("    - {label}: "));
        if q == NULL {
            self.line("NULL");
        } else {
            self.print_int(q);
            self.line(&format!(" ({})", hex(q)));
        }
    }

    /// The alignment currently being built.
    pub fn show_align(&mut self) -> Result<(), ShowError> {
        self.head_list(align_head(self.top()), "Align list:")
    }

    /// The span list sentinel.
    pub fn show_end_span(&mut self) -> Result<(), ShowError> {
        let head = end_span(self.top());
        self.inspect(|p| {
            let mem = &p.state().memory;
            p.location(head)?;
            p.line("End span:");
            p.text("- link: ");
            p.print_int(mem.link(head)?);
            p.print_ln();
            p.text("- info: ");
            p.print_int(mem.info(head)?);
            p.print_ln();
            Ok(())
        })
    }

    /// The `\omit` template, which starts at its head word.
    pub fn show_omit_template(&mut self) -> Result<(), ShowError> {
        let head = omit_template(self.top());
        self.inspect(|p| {
            p.location(head)?;
            p.line("Omit template token list:");
            p.show_token_list(head, "  ", TOKEN_LIMIT)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtscope_core::layout::{PENALTY_NODE, UNITY};
    use fmtscope_core::TexConfig;
    use fmtscope_dump::{read_format, EngineState};
    use fmtscope_test_utils::{node_word, word_hh, word_int, FmtBuilder, RecordingHost};

    fn load(builder: FmtBuilder) -> EngineState {
        let bytes = builder.build();
        let mut host = RecordingHost::new();
        read_format(bytes.as_slice(), bytes.len() as u64, &TexConfig::new(), &mut host)
            .unwrap()
    }

    fn run(
        state: &EngineState,
        f: impl FnOnce(&mut Printer<'_>) -> Result<(), ShowError>,
    ) -> (Result<(), ShowError>, RecordingHost) {
        let mut host = RecordingHost::new();
        let result = f(&mut Printer::new(state, &mut host));
        (result, host)
    }

    #[test]
    fn hex_keeps_the_sign_outside() {
        assert_eq!(hex(255), "ff");
        assert_eq!(hex(-16), "-10");
    }

    #[test]
    fn memory_locations_print_eight_bytes() {
        let state = load(
            FmtBuilder::new()
                .with_free_words(4)
                .with_lo_word(24, word_int(0x0102_0304)),
        );
        let (result, host) = run(&state, |p| p.show_memory_location(24));
        assert_eq!(result, Ok(()));
        assert_eq!(host.log_text(), "00000018: 01 02 03 04 00 00 00 00\n");
    }

    #[test]
    fn contribution_list_shows_its_nodes() {
        let builder = FmtBuilder::new().with_free_words(4);
        let head = contrib_head(builder.mem_top);
        let state = load(
            builder
                .with_hi_word(head, node_word(24, 0, 0))
                .with_lo_word(24, node_word(NULL, PENALTY_NODE, 0))
                .with_lo_word(25, word_int(10_000)),
        );
        let (result, host) = run(&state, |p| p.show_contrib());
        assert_eq!(result, Ok(()));
        let text = host.log_text();
        assert!(text.contains(
            "Page contribution list:\n  [:PENALTY_NODE\n    value: 10000\n  :]\n"
        ));
    }

    #[test]
    fn empty_lists_only_print_the_title() {
        let state = load(FmtBuilder::new());
        let (result, host) = run(&state, |p| p.show_hold());
        assert_eq!(result, Ok(()));
        let text = host.log_text();
        assert!(text.ends_with("Hold list:\n"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn delta_nodes_list_their_differences() {
        let builder = FmtBuilder::new().with_free_words(4);
        let head = active(builder.mem_top);
        let state = load(
            builder
                .with_hi_word(head, node_word(24, 0, 0))
                .with_lo_word(24, node_word(NULL, DELTA_NODE, 0))
                .with_lo_word(25, word_int(UNITY))
                .with_lo_word(30, word_int(-UNITY)),
        );
        let (result, host) = run(&state, |p| p.show_active());
        assert_eq!(result, Ok(()));
        let text = host.log_text();
        assert!(text.contains("  [[DELTA_NODE\n    Natural width difference: 1.0\n"));
        assert!(text.contains("    Stretch differences: 0.0pt 0.0fil 0.0fill 0.0filll\n"));
        assert!(text.contains("    Shrink difference: -1.0\n  ]]\n"));
    }

    #[test]
    fn looping_active_list_is_reported() {
        let builder = FmtBuilder::new().with_free_words(4);
        let head = active(builder.mem_top);
        let state = load(
            builder
                .with_hi_word(head, node_word(24, 0, 0))
                .with_lo_word(24, node_word(24, 9, 0))
                .with_lo_word(25, word_hh(NULL, NULL)),
        );
        let (result, host) = run(&state, |p| p.show_active());
        assert_eq!(result, Err(ShowError::Cycle { at: 24 }));
        assert_eq!(host.log_text().matches("[[???]]").count(), 1);
        assert_eq!(host.alerts.len(), 1);
    }

    #[test]
    fn end_span_prints_both_halves() {
        let builder = FmtBuilder::new();
        let head = end_span(builder.mem_top);
        let state = load(builder.with_hi_word(head, word_hh(7, -3)));
        let (result, host) = run(&state, |p| p.show_end_span());
        assert_eq!(result, Ok(()));
        assert!(host.log_text().ends_with("End span:\n- link: 7\n- info: -3\n"));
    }
}
