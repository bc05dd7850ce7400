//! Token list rendering, one token per line.

use fmtscope_arena::MemoryError;
use fmtscope_core::layout::{
    CS_TOKEN_FLAG, END_MATCH, LEFT_BRACE, LETTER, MAC_PARAM, MATCH, MATH_SHIFT, NULL,
    OTHER_CHAR, OUT_PARAM, RIGHT_BRACE, SPACER, SUB_MARK, SUP_MARK, TAB_MARK,
};

use crate::printer::Printer;

/// Tokens shown from one list before it is cut off with `ETC.`.
pub const TOKEN_LIMIT: usize = 10_000;

/// Brace nesting of the list being shown.
struct Level<'i> {
    indent: &'i str,
    depth: usize,
}

impl Level<'_> {
    fn prefix(&self, printer: &mut Printer<'_>) {
        printer.text(self.indent);
        for _ in 0..self.depth {
            printer.text("  ");
        }
    }

    fn message(&self, printer: &mut Printer<'_>, msg: &str) {
        self.prefix(printer);
        printer.line(msg);
    }

    fn token(&self, printer: &mut Printer<'_>, category: &str, c: i32) {
        self.prefix(printer);
        printer.text(&format!("[{category}, \""));
        printer.print(c);
        printer.line("\"]");
    }

    fn number(&self, printer: &mut Printer<'_>, category: &str, n: i32) {
        self.prefix(printer);
        printer.line(&format!("[{category}, {n}]"));
    }
}

fn category_name(m: u8) -> Option<&'static str> {
    Some(match m {
        MATH_SHIFT => "MATH_SHIFT",
        TAB_MARK => "TAB_MARK",
        SUP_MARK => "SUP_MARK",
        SUB_MARK => "SUB_MARK",
        SPACER => "SPACER",
        LETTER => "LETTER",
        OTHER_CHAR => "OTHER_CHAR",
        MAC_PARAM => "MAC_PARAM",
        _ => return None,
    })
}

impl Printer<'_> {
    /// Show at most `limit` tokens of the list starting at `p`.
    ///
    /// A malformed entry ends the list with `CLOBERRED.` or `BAD.`; an
    /// unfinished list ends with `ETC.`.
    pub fn show_token_list(&mut self, mut p: i32, indent: &str, limit: usize) -> Result<(), MemoryError> {
        let mem = &self.state().memory;
        let mut level = Level { indent, depth: 0 };
        let mut shown = 0;
        let mut params = 0;
        while p != NULL && shown < limit {
            if p < mem.hi_mem_min || p > mem.mem_end {
                level.message(self, "CLOBERRED.");
                return Ok(());
            }
            let info = mem.info(p)?;
            if info >= CS_TOKEN_FLAG {
                level.prefix(self);
                self.print_cs(info - CS_TOKEN_FLAG)?;
                self.print_ln();
            } else if info < 0 {
                level.message(self, "BAD.");
                return Ok(());
            } else {
                let c = info & 0xFF;
                let Ok(m) = u8::try_from(info >> 8) else {
                    level.message(self, "BAD.");
                    return Ok(());
                };
                match m {
                    LEFT_BRACE => {
                        level.token(self, "LEFT_BRACE", c);
                        level.depth += 1;
                    }
                    RIGHT_BRACE => {
                        level.depth = level.depth.saturating_sub(1);
                        level.token(self, "RIGHT_BRACE", c);
                    }
                    OUT_PARAM => {
                        if !(1..=9).contains(&c) {
                            self.alert(&format!(
                                "show_token_list: Invalid parameter number ({c})."
                            ));
                            return Ok(());
                        }
                        level.number(self, "OUT_PARAM", c);
                    }
                    MATCH => {
                        if params > 9 {
                            self.alert("show_token_list: Too many #'s.");
                            return Ok(());
                        }
                        params += 1;
                        level.token(self, &format!("MATCH #{params}"), c);
                    }
                    END_MATCH => {
                        level.number(self, "END_MATCH", c);
                        if c == 0 {
                            self.print_ln();
                            level.message(self, "### MACRO BODY ###");
                            self.print_ln();
                        }
                    }
                    other => match category_name(other) {
                        Some(name) => level.token(self, name, c),
                        None => {
                            level.message(self, "BAD.");
                            return Ok(());
                        }
                    },
                }
            }
            p = mem.link(p)?;
            shown += 1;
        }
        if p != NULL {
            level.message(self, "ETC.");
        }
        Ok(())
    }
}
