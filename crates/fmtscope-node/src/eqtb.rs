//! Views of the table of equivalents.
//!
//! [`Printer::show_eqtb`] explains a single slot by region. The `list_*`
//! methods print one line per slot of a region, keyed by slot number.

use std::ops::RangeInclusive;

use fmtscope_core::layout::{
    ACTIVE_BASE, ASSIGN_TOKS, BOX_BASE, CALL, CAT_CODE_BASE, CHAR_SUB_CODE_BASE, COUNT_BASE,
    CUR_FONT_LOC, DEL_CODE_BASE, DIMEN_BASE, EQTB_SIZE, ETEX_PENS, ETEX_PEN_BASE, GLUE_BASE,
    INT_BASE, LC_CODE_BASE, LOCAL_BASE, MATH_CODE_BASE, MATH_FONT_BASE, MU_SKIP_BASE, NULL,
    NULL_CS, PAR_SHAPE_LOC, SCALED_BASE, SET_SHAPE, SF_CODE_BASE, SINGLE_BASE, SKIP_BASE,
    THIN_MU_SKIP_CODE, TOKS_BASE, UC_CODE_BASE, XCHR_CODE_BASE, XORD_CODE_BASE, XPRN_CODE_BASE,
};

use crate::error::ShowError;
use crate::inspect::hex;
use crate::names::catcode_name;
use crate::printer::Printer;
use crate::tokens::TOKEN_LIMIT;

const BLOCK_INDENT: &str = "     ";

impl Printer<'_> {
    /// Explain eqtb slot `n`.
    pub fn show_eqtb(&mut self, n: i32) -> Result<(), ShowError> {
        self.inspect(|p| p.eqtb_item(n))
    }

    fn eqtb_item(&mut self, n: i32) -> Result<(), ShowError> {
        let eqtb = &self.state().eqtb;
        self.line(&format!("Equivalents table's item no. {n}:"));
        if (ACTIVE_BASE..=eqtb.eqtb_top).contains(&n) {
            self.line(&format!("* eq_type({n}) = {:x}", eqtb.eq_type(n)?));
            self.line(&format!("* eq_level({n}) = {:x}", eqtb.eq_level(n)?));
            self.line(&format!("* equiv({n}) = {}", hex(eqtb.equiv(n)?)));
        }
        if n < ACTIVE_BASE {
            self.alert(&format!("No eqtb item at {n}."));
        } else if n < GLUE_BASE || (n > EQTB_SIZE && n <= eqtb.eqtb_top) {
            self.line(" - Region: 1 or 2 (control sequences)");
            self.text(" - Item name: ");
            self.sprint_cs(n)?;
            self.print_ln();
            self.text(" - Control sequence name: ");
            let cmd = eqtb.eq_type(n)?;
            self.print_cmd_chr(cmd, eqtb.equiv(n)?)?;
            self.print_ln();
            if cmd >= CALL {
                self.line(" - Token list:");
                let body = self.state().memory.link(eqtb.equiv(n)?)?;
                self.show_token_list(body, BLOCK_INDENT, TOKEN_LIMIT)?;
            }
        } else if n < LOCAL_BASE {
            self.line(" - Region: 3 (glue or muglue registers)");
            self.text(" - Register: ");
            self.glue_slot(n)?;
            self.print_ln();
        } else if n < INT_BASE {
            self.line(" - Region: 4 (penalties, toklists, boxes, codes, fonts)");
            self.local_slot(n)?;
        } else if n < DIMEN_BASE {
            self.line(" - Region: 5 (parameters, counts, delcodes)");
            if n < COUNT_BASE {
                self.text(" - Parameter: ");
                self.print_param(n - INT_BASE);
            } else if n < DEL_CODE_BASE {
                self.text(" - Count register: ");
                self.register("count", n - COUNT_BASE);
            } else {
                self.text(" - Delcode register: ");
                self.register("delcode", n - DEL_CODE_BASE);
            }
            self.text("=");
            self.print_int(eqtb.eqtb_int(n)?);
            self.print_ln();
        } else if n <= EQTB_SIZE {
            self.line(" - Region: 6 (lengths, dimensions)");
            if n < SCALED_BASE {
                self.text(" - Length parameter: ");
                self.print_length_param(n - DIMEN_BASE);
            } else {
                self.text(" - Dimension register: ");
                self.register("dimen", n - SCALED_BASE);
            }
            self.text("=");
            self.print_scaled(eqtb.eqtb_sc(n)?);
            self.line("pt");
        } else {
            self.line(" - ???");
        }
        Ok(())
    }

    /// Region 3: glue parameters, `\skip` and `\muskip`.
    fn glue_slot(&mut self, n: i32) -> Result<(), ShowError> {
        let spec = self.state().eqtb.equiv(n)?;
        let unit = if n < SKIP_BASE {
            self.print_skip_param(n - GLUE_BASE);
            if n < GLUE_BASE + THIN_MU_SKIP_CODE {
                "pt"
            } else {
                "mu"
            }
        } else if n < MU_SKIP_BASE {
            self.register("skip", n - SKIP_BASE);
            "pt"
        } else {
            self.register("muskip", n - MU_SKIP_BASE);
            "mu"
        };
        self.text("=");
        self.print_spec(spec, unit)?;
        Ok(())
    }

    /// Region 4: shapes, token lists, boxes, fonts and codes.
    fn local_slot(&mut self, n: i32) -> Result<(), ShowError> {
        let equiv = self.state().eqtb.equiv(n)?;
        if n == PAR_SHAPE_LOC || (ETEX_PEN_BASE..ETEX_PENS).contains(&n) {
            self.text(if n == PAR_SHAPE_LOC {
                " - Paragraph shape: "
            } else {
                " - Penalties: "
            });
            self.shape_slot(n)?;
            self.print_ln();
        } else if n < TOKS_BASE {
            self.text(" - Token list name: ");
            self.print_cmd_chr(ASSIGN_TOKS, n)?;
            self.print_ln();
            self.token_slot(equiv)?;
        } else if n < ETEX_PEN_BASE {
            self.text(" - Toks register: ");
            self.register("toks", n - TOKS_BASE);
            self.print_ln();
            self.token_slot(equiv)?;
        } else if n < CUR_FONT_LOC {
            self.text(" - Box register: ");
            self.register("box", n - BOX_BASE);
            if equiv == NULL {
                self.line("=void");
            } else {
                self.print_ln();
                self.line(" - Node list:");
                self.walk_list(equiv, BLOCK_INDENT)?;
            }
        } else if n == XORD_CODE_BASE {
            self.line(" - \\xordcode slot (reserved/unused)");
        } else if n == XCHR_CODE_BASE {
            self.line(" - \\xchrcode slot (reserved/unused)");
        } else if n == XPRN_CODE_BASE {
            self.line(" - \\xprncode slot (reserved/unused)");
        } else if n < CAT_CODE_BASE {
            self.text(" - Font identifier: ");
            if n == CUR_FONT_LOC {
                self.text("<current font>");
            } else {
                self.math_font(n);
            }
            self.text("=");
            self.font_id(equiv)?;
            self.print_ln();
        } else {
            self.text(" - Code: ");
            self.code_name(n);
            self.text("=");
            self.print_int(equiv);
            self.print_ln();
        }
        Ok(())
    }

    fn token_slot(&mut self, equiv: i32) -> Result<(), ShowError> {
        if equiv != NULL {
            self.line(" - Token list:");
            let body = self.state().memory.link(equiv)?;
            self.show_token_list(body, BLOCK_INDENT, TOKEN_LIMIT)?;
        }
        Ok(())
    }

    /// `\parshape` or an eTeX penalty array, as command name and values.
    fn shape_slot(&mut self, n: i32) -> Result<(), ShowError> {
        let mem = &self.state().memory;
        let q = self.state().eqtb.equiv(n)?;
        self.print_cmd_chr(SET_SHAPE, n)?;
        self.text("=");
        if q == NULL {
            self.text("0");
        } else if n > PAR_SHAPE_LOC {
            let count = mem.penalty(q)?;
            self.print_int(count);
            for i in 1..=count {
                self.text(" ");
                self.print_int(mem.penalty(q + i)?);
            }
        } else {
            let count = mem.info(q)?;
            self.print_int(count);
            for i in 1..=count {
                self.text(" (");
                self.print_scaled(mem.sc(q + 2 * i - 1)?);
                self.text(", ");
                self.print_scaled(mem.sc(q + 2 * i)?);
                self.text(")");
            }
        }
        Ok(())
    }

    fn register(&mut self, name: &str, index: i32) {
        self.print_esc(name);
        self.print_int(index);
    }

    fn math_font(&mut self, n: i32) {
        let k = n - MATH_FONT_BASE;
        match k / 16 {
            0 => self.register("textfont", k),
            1 => self.register("scriptfont", k - 16),
            _ => self.register("scriptscriptfont", k - 32),
        }
    }

    fn font_id(&mut self, f: i32) -> Result<(), ShowError> {
        let name = self.state().eqtb.font_id_text(f)?;
        self.print_esc_str(name);
        Ok(())
    }

    fn code_name(&mut self, n: i32) {
        let (name, base) = if n < LC_CODE_BASE {
            ("catcode", CAT_CODE_BASE)
        } else if n < UC_CODE_BASE {
            ("lccode", LC_CODE_BASE)
        } else if n < SF_CODE_BASE {
            ("uccode", UC_CODE_BASE)
        } else if n < MATH_CODE_BASE {
            ("sfcode", SF_CODE_BASE)
        } else if n < CHAR_SUB_CODE_BASE {
            ("mathcode", MATH_CODE_BASE)
        } else {
            ("charsubdef", CHAR_SUB_CODE_BASE)
        };
        self.register(name, n - base);
    }

    /// Title line, then one call of `row` per slot.
    fn listing(
        &mut self,
        title: &str,
        slots: RangeInclusive<i32>,
        mut row: impl FnMut(&mut Self, i32) -> Result<(), ShowError>,
    ) -> Result<(), ShowError> {
        self.inspect(|p| {
            p.line(title);
            for n in slots {
                row(p, n)?;
            }
            Ok(())
        })
    }

    /// A listing whose rows all read `n: <name>=<value>`.
    fn keyed_listing(
        &mut self,
        title: &str,
        slots: RangeInclusive<i32>,
        mut row: impl FnMut(&mut Self, i32) -> Result<(), ShowError>,
    ) -> Result<(), ShowError> {
        self.listing(title, slots, |p, n| {
            p.text(&format!("{n}: "));
            row(p, n)
        })
    }

    fn defined_cs(&mut self, n: i32) -> Result<(), ShowError> {
        let eqtb = &self.state().eqtb;
        let equiv = eqtb.equiv(n)?;
        if equiv != NULL || eqtb.eq_level(n)? != 0 {
            self.text(&format!("{n}: "));
            self.sprint_cs(n)?;
            self.text(", ");
            self.print_cmd_chr(eqtb.eq_type(n)?, equiv)?;
            self.print_ln();
        }
        Ok(())
    }

    /// Active characters with a meaning.
    pub fn list_actives(&mut self) -> Result<(), ShowError> {
        self.listing("Active characters:", ACTIVE_BASE..=SINGLE_BASE - 1, Self::defined_cs)
    }

    /// Single-character control sequences with a meaning.
    pub fn list_singles(&mut self) -> Result<(), ShowError> {
        self.listing(
            "Single-character control sequences:",
            SINGLE_BASE..=NULL_CS - 1,
            Self::defined_cs,
        )
    }

    /// Multi-letter control sequences with a meaning, the extra hash included.
    pub fn list_hash(&mut self) -> Result<(), ShowError> {
        let top = self.state().eqtb.eqtb_top;
        self.listing("Multi-letter control sequences:", NULL_CS..=GLUE_BASE - 1, |p, n| {
            p.defined_cs(n)?;
            if n == GLUE_BASE - 1 {
                for m in EQTB_SIZE + 1..=top {
                    p.defined_cs(m)?;
                }
            }
            Ok(())
        })
    }

    /// Glue parameters.
    pub fn list_glues(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("Glue registers:", GLUE_BASE..=SKIP_BASE - 1, |p, n| {
            p.glue_slot(n)?;
            p.print_ln();
            Ok(())
        })
    }

    /// `\skip` registers.
    pub fn list_skips(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("Skip registers:", SKIP_BASE..=MU_SKIP_BASE - 1, |p, n| {
            p.glue_slot(n)?;
            p.print_ln();
            Ok(())
        })
    }

    /// `\muskip` registers.
    pub fn list_muskips(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("mu-Skip registers:", MU_SKIP_BASE..=LOCAL_BASE - 1, |p, n| {
            p.glue_slot(n)?;
            p.print_ln();
            Ok(())
        })
    }

    /// `\parshape`.
    pub fn show_parshape(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("Paragraph shape:", PAR_SHAPE_LOC..=PAR_SHAPE_LOC, |p, n| {
            p.shape_slot(n)?;
            p.print_ln();
            Ok(())
        })
    }

    fn toks_row(&mut self, equiv: i32) {
        self.text("=");
        self.line(if equiv != NULL { "..." } else { "null" });
    }

    /// Named token list parameters such as `\everypar`.
    pub fn list_assign_toks(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("Assign toks:", PAR_SHAPE_LOC + 1..=TOKS_BASE - 1, |p, n| {
            p.print_cmd_chr(ASSIGN_TOKS, n)?;
            p.toks_row(p.state().eqtb.equiv(n)?);
            Ok(())
        })
    }

    /// `\toks` registers.
    pub fn list_toks(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("Toks registers:", TOKS_BASE..=ETEX_PEN_BASE - 1, |p, n| {
            p.register("toks", n - TOKS_BASE);
            p.toks_row(p.state().eqtb.equiv(n)?);
            Ok(())
        })
    }

    /// eTeX penalty arrays.
    pub fn list_penalties(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("Penalties:", ETEX_PEN_BASE..=BOX_BASE - 1, |p, n| {
            p.shape_slot(n)?;
            p.print_ln();
            Ok(())
        })
    }

    /// `\box` registers.
    pub fn list_boxes(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("Box registers:", BOX_BASE..=CUR_FONT_LOC - 1, |p, n| {
            p.register("box", n - BOX_BASE);
            p.text("=");
            let empty = p.state().eqtb.equiv(n)? == NULL;
            p.line(if empty { "void" } else { "[...]" });
            Ok(())
        })
    }

    /// The current font.
    pub fn show_current_font(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("Current font:", CUR_FONT_LOC..=CUR_FONT_LOC, |p, n| {
            p.text("<current font>=");
            p.font_id(p.state().eqtb.equiv(n)?)?;
            p.print_ln();
            Ok(())
        })
    }

    /// The reserved character translation slots.
    pub fn list_xcodes(&mut self) -> Result<(), ShowError> {
        self.inspect(|p| {
            p.line("X-codes:");
            p.line(&format!("{XORD_CODE_BASE}: \\xordcode slot (reserved/unused)"));
            p.line(&format!("{XCHR_CODE_BASE}: \\xchrcode slot (reserved/unused)"));
            p.line(&format!("{XPRN_CODE_BASE}: \\xprncode slot (reserved/unused)"));
            Ok(())
        })
    }

    /// Math font families.
    pub fn list_fonts(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("Font identifiers:", MATH_FONT_BASE..=CAT_CODE_BASE - 1, |p, n| {
            p.math_font(n);
            p.text("=");
            p.font_id(p.state().eqtb.equiv(n)?)?;
            p.print_ln();
            Ok(())
        })
    }

    /// `\catcode` table, with category names.
    pub fn list_catcodes(&mut self) -> Result<(), ShowError> {
        self.keyed_listing("Category codes:", CAT_CODE_BASE..=LC_CODE_BASE - 1, |p, n| {
            let code = p.state().eqtb.equiv(n)?;
            p.code_name(n);
            p.text("=");
            p.print_int(code);
            p.line(&format!(" ({})", catcode_name(code)));
            Ok(())
        })
    }

    fn code_rows(&mut self, title: &str, slots: RangeInclusive<i32>) -> Result<(), ShowError> {
        self.keyed_listing(title, slots, |p, n| {
            p.code_name(n);
            p.text("=");
            p.print_int(p.state().eqtb.equiv(n)?);
            p.print_ln();
            Ok(())
        })
    }

    /// `\lccode` table.
    pub fn list_lccodes(&mut self) -> Result<(), ShowError> {
        self.code_rows("LC codes:", LC_CODE_BASE..=UC_CODE_BASE - 1)
    }

    /// `\uccode` table.
    pub fn list_uccodes(&mut self) -> Result<(), ShowError> {
        self.code_rows("UC codes:", UC_CODE_BASE..=SF_CODE_BASE - 1)
    }

    /// `\sfcode` table.
    pub fn list_sfcodes(&mut self) -> Result<(), ShowError> {
        self.code_rows("SF codes:", SF_CODE_BASE..=MATH_CODE_BASE - 1)
    }

    /// `\mathcode` table.
    pub fn list_mathcodes(&mut self) -> Result<(), ShowError> {
        self.code_rows("Math codes:", MATH_CODE_BASE..=CHAR_SUB_CODE_BASE - 1)
    }

    /// MLTeX `\charsubdef` table.
    pub fn list_charsubs(&mut self) -> Result<(), ShowError> {
        self.code_rows("Character substitution codes:", CHAR_SUB_CODE_BASE..=INT_BASE - 1)
    }

    fn int_rows(
        &mut self,
        title: &str,
        slots: RangeInclusive<i32>,
        name: impl Fn(&mut Self, i32),
    ) -> Result<(), ShowError> {
        self.keyed_listing(title, slots, |p, n| {
            name(p, n);
            p.text("=");
            p.print_int(p.state().eqtb.eqtb_int(n)?);
            p.print_ln();
            Ok(())
        })
    }

    /// Integer parameters.
    pub fn list_intpars(&mut self) -> Result<(), ShowError> {
        self.int_rows("Integer parameters:", INT_BASE..=COUNT_BASE - 1, |p, n| {
            p.print_param(n - INT_BASE)
        })
    }

    /// `\count` registers.
    pub fn list_counts(&mut self) -> Result<(), ShowError> {
        self.int_rows("Count registers:", COUNT_BASE..=DEL_CODE_BASE - 1, |p, n| {
            p.register("count", n - COUNT_BASE)
        })
    }

    /// `\delcode` table.
    pub fn list_dels(&mut self) -> Result<(), ShowError> {
        self.int_rows("Del codes:", DEL_CODE_BASE..=DIMEN_BASE - 1, |p, n| {
            p.register("delcode", n - DEL_CODE_BASE)
        })
    }

    fn dimen_rows(
        &mut self,
        title: &str,
        slots: RangeInclusive<i32>,
        name: impl Fn(&mut Self, i32),
    ) -> Result<(), ShowError> {
        self.keyed_listing(title, slots, |p, n| {
            name(p, n);
            p.text("=");
            p.print_scaled(p.state().eqtb.eqtb_sc(n)?);
            p.line("pt");
            Ok(())
        })
    }

    /// Dimension parameters.
    pub fn list_lengths(&mut self) -> Result<(), ShowError> {
        self.dimen_rows("Length parameters:", DIMEN_BASE..=SCALED_BASE - 1, |p, n| {
            p.print_length_param(n - DIMEN_BASE)
        })
    }

    /// `\dimen` registers.
    pub fn list_dimens(&mut self) -> Result<(), ShowError> {
        self.dimen_rows("Dimension registers:", SCALED_BASE..=EQTB_SIZE, |p, n| {
            p.register("dimen", n - SCALED_BASE)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtscope_core::layout::UNITY;
    use fmtscope_core::TexConfig;
    use fmtscope_dump::{read_format, EngineState};
    use fmtscope_test_utils::{word_int, FmtBuilder, RecordingHost};

    fn load(builder: FmtBuilder) -> EngineState {
        let bytes = builder.with_eqtb_word(EQTB_SIZE, [0; 8]).build();
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
    fn count_register_is_explained_by_region() {
        let n = COUNT_BASE + 5;
        let state = load(FmtBuilder::new().with_eqtb_word(n, word_int(42)));
        let (result, host) = run(&state, |p| p.show_eqtb(n));
        assert_eq!(result, Ok(()));
        assert_eq!(
            host.log_text(),
            format!(
                "Equivalents table's item no. {n}:\n\
                 * eq_type({n}) = 0\n\
                 * eq_level({n}) = 0\n\
                 * equiv({n}) = 2a\n\
                 \x20- Region: 5 (parameters, counts, delcodes)\n\
                 \x20- Count register: \\count5=42\n"
            )
        );
    }

    #[test]
    fn dimension_register_prints_points() {
        let n = SCALED_BASE + 3;
        let state = load(FmtBuilder::new().with_eqtb_word(n, word_int(3 * UNITY / 2)));
        let (result, host) = run(&state, |p| p.show_eqtb(n));
        assert_eq!(result, Ok(()));
        assert!(host.log_text().ends_with(
            " - Region: 6 (lengths, dimensions)\n - Dimension register: \\dimen3=1.5pt\n"
        ));
    }

    #[test]
    fn slots_below_the_table_alert() {
        let state = load(FmtBuilder::new());
        let (result, host) = run(&state, |p| p.show_eqtb(0));
        assert_eq!(result, Ok(()));
        assert_eq!(host.alerts, vec!["No eqtb item at 0.".to_string()]);
        assert_eq!(host.log_text(), "Equivalents table's item no. 0:\n");
    }

    #[test]
    fn catcodes_are_named() {
        let n = CAT_CODE_BASE + 65;
        let state = load(FmtBuilder::new().with_eqtb_word(n, word_int(11)));
        let (result, host) = run(&state, |p| p.list_catcodes());
        assert_eq!(result, Ok(()));
        let text = host.log_text();
        assert!(text.starts_with("Category codes:\n"));
        assert!(text.contains(&format!("{n}: \\catcode65=11 (letter)\n")));
        assert!(text.contains(&format!("{}: \\catcode0=0 (escape)\n", CAT_CODE_BASE)));
        assert_eq!(text.lines().count(), 257);
    }

    #[test]
    fn charsubdef_rows_count_from_their_own_base() {
        let state = load(FmtBuilder::new());
        let (_, host) = run(&state, |p| p.list_charsubs());
        let text = host.log_text();
        assert!(text.contains(&format!("{}: \\charsubdef0=0\n", CHAR_SUB_CODE_BASE)));
        assert!(text.contains(&format!("{}: \\charsubdef255=0\n", INT_BASE - 1)));
    }

    #[test]
    fn dimension_listing_has_its_own_title() {
        let state = load(FmtBuilder::new());
        let (_, host) = run(&state, |p| p.list_dimens());
        let text = host.log_text();
        assert!(text.starts_with("Dimension registers:\n"));
        assert!(text.ends_with(&format!("{EQTB_SIZE}: \\dimen255=0.0pt\n")));
    }

    #[test]
    fn void_boxes_and_empty_toks() {
        let state = load(FmtBuilder::new());
        let (_, host) = run(&state, |p| {
            p.list_boxes()?;
            p.list_toks()
        });
        let text = host.log_text();
        assert!(text.contains(&format!("{BOX_BASE}: \\box0=")));
        assert!(text.contains(&format!("{TOKS_BASE}: \\toks0=")));
    }

    #[test]
    fn reserved_xcode_slots() {
        let state = load(FmtBuilder::new());
        let (_, host) = run(&state, |p| p.list_xcodes());
        assert_eq!(
            host.log_text(),
            format!(
                "X-codes:\n\
                 {XORD_CODE_BASE}: \\xordcode slot (reserved/unused)\n\
                 {XCHR_CODE_BASE}: \\xchrcode slot (reserved/unused)\n\
                 {XPRN_CODE_BASE}: \\xprncode slot (reserved/unused)\n"
            )
        );
    }
}
