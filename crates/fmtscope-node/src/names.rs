//! Names of parameters, category codes and command/modifier pairs.

use fmtscope_arena::MemoryError;
use fmtscope_core::layout::{
    lo_mem_stat_max, ASSIGN_DIMEN, ASSIGN_GLUE, ASSIGN_INT, ASSIGN_MU_GLUE, ASSIGN_TOKS, CALL,
    CAR_RET, CAT_CODE_BASE, CHAR_GIVEN, CHAR_NUM, CLUB_PENALTIES_LOC, COUNT_BASE, CR_CODE,
    DEF_CODE, DEF_FAMILY, DEF_FONT, DELIM_NUM, DIMEN_BASE, DIMEN_VAL, DIMEN_VAL_LIMIT,
    DISPLAY_WIDOW_PENALTIES_LOC, END_CS_NAME, END_TEMPLATE, ENDV, EVERY_CR_LOC,
    EVERY_DISPLAY_LOC, EVERY_EOF_LOC, EVERY_HBOX_LOC, EVERY_JOB_LOC, EVERY_MATH_LOC,
    EVERY_PAR_LOC, EVERY_VBOX_LOC, GLUE_BASE, GLUE_VAL, INTER_LINE_PENALTIES_LOC, INT_BASE,
    INT_VAL, LAST_ITEM, LC_CODE_BASE, LEFT_BRACE, LETTER, LONG_OUTER_CALL, MAC_PARAM, MARK,
    MATH_CHAR_NUM, MATH_CODE_BASE, MATH_FONT_BASE, MATH_GIVEN, MATH_SHIFT, MU_SKIP_BASE, NULL,
    OTHER_CHAR, OUTPUT_ROUTINE_LOC, PAR_END, PAR_SHAPE_LOC, PDF_COPY_FONT, PDF_PAGES_ATTR_LOC,
    PDF_PAGE_ATTR_LOC, PDF_PAGE_RESOURCES_LOC, PDF_PK_MODE_LOC, PRIM_SIZE, PROTECTED_TOKEN,
    RADICAL, REGISTER, RELAX, RIGHT_BRACE, SCALED_BASE, SET_FONT, SET_SHAPE, SF_CODE_BASE,
    SKIP_BASE, SPACER, SPAN_CODE, SUB_MARK, SUP_MARK, TAB_MARK, TOKS_BASE, TOKS_REGISTER,
    UC_CODE_BASE, UNDEFINED_CS, WIDOW_PENALTIES_LOC, XCHR_CODE_BASE, XORD_CODE_BASE,
    XPRN_CODE_BASE,
};

use crate::printer::Printer;

/// Glue parameters, indexed from `glue_base`.
pub const SKIP_PARAM_NAMES: [&str; 18] = [
    "lineskip",
    "baselineskip",
    "parskip",
    "abovedisplayskip",
    "belowdisplayskip",
    "abovedisplayshortskip",
    "belowdisplayshortskip",
    "leftskip",
    "rightskip",
    "topskip",
    "splittopskip",
    "tabskip",
    "spaceskip",
    "xspaceskip",
    "parfillskip",
    "thinmuskip",
    "medmuskip",
    "thickmuskip",
];

/// Integer parameters, indexed from `int_base`.
pub const INT_PARAM_NAMES: [&str; 102] = [
    "pretolerance",
    "tolerance",
    "linepenalty",
    "hyphenpenalty",
    "exhyphenpenalty",
    "clubpenalty",
    "widowpenalty",
    "displaywidowpenalty",
    "brokenpenalty",
    "binoppenalty",
    "relpenalty",
    "predisplaypenalty",
    "postdisplaypenalty",
    "interlinepenalty",
    "doublehyphendemerits",
    "finalhyphendemerits",
    "adjdemerits",
    "mag",
    "delimiterfactor",
    "looseness",
    "time",
    "day",
    "month",
    "year",
    "showboxbreadth",
    "showboxdepth",
    "hbadness",
    "vbadness",
    "pausing",
    "tracingonline",
    "tracingmacros",
    "tracingstats",
    "tracingparagraphs",
    "tracingpages",
    "tracingoutput",
    "tracinglostchars",
    "tracingcommands",
    "tracingrestores",
    "uchyph",
    "outputpenalty",
    "maxdeadcycles",
    "hangafter",
    "floatingpenalty",
    "globaldefs",
    "fam",
    "escapechar",
    "defaulthyphenchar",
    "defaultskewchar",
    "endlinechar",
    "newlinechar",
    "language",
    "lefthyphenmin",
    "righthyphenmin",
    "holdinginserts",
    "errorcontextlines",
    "charsubdefmin",
    "charsubdefmax",
    "tracingcharsubdef",
    "mubytein",
    "mubyteout",
    "mubytelog",
    "specialout",
    "pdfoutput",
    "pdfcompresslevel",
    "pdfobjcompresslevel",
    "pdfdecimaldigits",
    "pdfmovechars",
    "pdfimageresolution",
    "pdfpkresolution",
    "pdfuniqueresname",
    "pdfoptionalwaysusepdfpagebox",
    "pdfoptionpdfinclusionerrorlevel",
    "pdfminorversion",
    "pdfforcepagebox",
    "pdfpagebox",
    "pdfinclusionerrorlevel",
    "pdfgamma",
    "pdfimagegamma",
    "pdfimagehicolor",
    "pdfimageapplygamma",
    "pdfadjustspacing",
    "pdfprotrudechars",
    "pdftracingfonts",
    "pdfadjustinterwordglue",
    "pdfprependkern",
    "pdfappendkern",
    "pdfgentounicode",
    "pdfdraftmode",
    "pdfinclusioncopyfonts",
    "pdfsuppresswarningdupdest",
    "pdfsuppresswarningdupmap",
    "synctex",
    "tracingassigns",
    "tracinggroups",
    "tracingifs",
    "tracingscantokens",
    "tracingnesting",
    "predisplaydirection",
    "lastlinefit",
    "savingvdiscards",
    "savinghyphcodes",
    "TeXXeTstate",
];

/// Dimension parameters, indexed from `dimen_base`.
pub const DIMEN_PARAM_NAMES: [&str; 34] = [
    "parindent",
    "mathsurround",
    "lineskiplimit",
    "hsize",
    "vsize",
    "maxdepth",
    "splitmaxdepth",
    "boxmaxdepth",
    "hfuzz",
    "vfuzz",
    "delimitershortfall",
    "nulldelimiterspace",
    "scriptspace",
    "predisplaysize",
    "displaywidth",
    "displayindent",
    "overfullrule",
    "hangindent",
    "hoffset",
    "voffset",
    "emergencystretch",
    "pdfhorigin",
    "pdfvorigin",
    "pdfpagewidth",
    "pdfpageheight",
    "pdflinkmargin",
    "pdfdestmargin",
    "pdfthreadmargin",
    "pdffirstlineheight",
    "pdflastlinedepth",
    "pdfeachlineheight",
    "pdfeachlinedepth",
    "pdfignoreddimen",
    "pdfpxdimen",
];

/// Category codes 0 through 15.
pub const CATCODE_NAMES: [&str; 16] = [
    "escape",
    "begin group",
    "end group",
    "math switch",
    "tab align",
    "end of line",
    "macro parameter",
    "superscript",
    "subscript",
    "ignore",
    "space",
    "letter",
    "other",
    "active",
    "comment",
    "illegal",
];

/// Fitness classes of active break nodes.
pub const FITNESS_NAMES: [&str; 4] = ["very loose fit", "loose fit", "decent fit", "tight fit"];

fn lookup(names: &'static [&'static str], n: i32) -> Option<&'static str> {
    usize::try_from(n).ok().and_then(|i| names.get(i)).copied()
}

/// Name of category code `c`, or `???`.
pub fn catcode_name(c: i32) -> &'static str {
    lookup(&CATCODE_NAMES, c).unwrap_or("???")
}

/// Name of fitness class `f`, or `???`.
pub fn fitness_name(f: u8) -> &'static str {
    lookup(&FITNESS_NAMES, i32::from(f)).unwrap_or("???")
}

impl Printer<'_> {
    /// Print glue parameter `n` as `\name`.
    pub fn print_skip_param(&mut self, n: i32) {
        match lookup(&SKIP_PARAM_NAMES, n) {
            Some(name) => self.print_esc(name),
            None => self.print_str("[unknown glue parameter!]"),
        }
    }

    /// Print integer parameter `n` as `\name`.
    pub fn print_param(&mut self, n: i32) {
        match lookup(&INT_PARAM_NAMES, n) {
            Some(name) => self.print_esc(name),
            None => self.print_str("[unknown integer parameter!]"),
        }
    }

    /// Print dimension parameter `n` as `\name`.
    pub fn print_length_param(&mut self, n: i32) {
        match lookup(&DIMEN_PARAM_NAMES, n) {
            Some(name) => self.print_esc(name),
            None => self.print_str("[unknown dimen parameter!]"),
        }
    }

    fn chr_cmd(&mut self, label: &str, chr: i32) {
        self.print_str(label);
        self.text("'");
        self.print(chr);
        self.text("'");
    }

    /// Print the register number held by sparse array node `q`.
    pub fn print_sa_num(&mut self, q: i32) -> Result<(), MemoryError> {
        let mem = &self.state().memory;
        let n = if i32::from(mem.sa_index(q)?) < DIMEN_VAL_LIMIT {
            mem.sa_ptr(q)?
        } else {
            let mut n = i32::from(mem.sa_index(q)? & 15);
            let q = mem.link(q)?;
            n += i32::from(mem.sa_index(q)?) << 4;
            let q = mem.link(q)?;
            let hi = i32::from(mem.sa_index(q)?) + (i32::from(mem.sa_index(mem.link(q)?)?) << 4);
            n + (hi << 8)
        };
        self.print_int(n);
        Ok(())
    }

    /// Print the meaning of command `cmd` with modifier `chr`.
    ///
    /// Commands without a dedicated case are looked up among the
    /// primitives by their eqtb entry.
    pub fn print_cmd_chr(&mut self, cmd: u8, chr: i32) -> Result<(), MemoryError> {
        let state = self.state();
        let mem_bot = state.memory.mem_bot;
        match cmd {
            LEFT_BRACE => self.chr_cmd("begin-group character ", chr),
            RIGHT_BRACE => self.chr_cmd("end-group character ", chr),
            MATH_SHIFT => self.chr_cmd("math shift character ", chr),
            MAC_PARAM => self.chr_cmd("macro parameter character ", chr),
            SUP_MARK => self.chr_cmd("superscript character ", chr),
            SUB_MARK => self.chr_cmd("subscript character ", chr),
            ENDV => self.print_str("end of alignment template"),
            SPACER => self.chr_cmd("blank space ", chr),
            LETTER => self.chr_cmd("the letter ", chr),
            OTHER_CHAR => self.chr_cmd("the character ", chr),
            TAB_MARK if chr == SPAN_CODE => self.print_esc("span"),
            TAB_MARK => self.chr_cmd("alignment tab character ", chr),
            CAR_RET if chr == CR_CODE => self.print_esc("cr"),
            CAR_RET => self.print_esc("crcr"),
            ASSIGN_GLUE | ASSIGN_MU_GLUE => {
                if chr < SKIP_BASE {
                    self.print_skip_param(chr - GLUE_BASE);
                } else if chr < MU_SKIP_BASE {
                    self.print_esc("skip");
                    self.print_int(chr - SKIP_BASE);
                } else {
                    self.print_esc("muskip");
                    self.print_int(chr - MU_SKIP_BASE);
                }
            }
            ASSIGN_TOKS => {
                if chr >= TOKS_BASE {
                    self.print_esc("toks");
                    self.print_int(chr - TOKS_BASE);
                } else {
                    self.print_esc(toks_param_name(chr));
                }
            }
            ASSIGN_INT => {
                if chr < COUNT_BASE {
                    self.print_param(chr - INT_BASE);
                } else {
                    self.print_esc("count");
                    self.print_int(chr - COUNT_BASE);
                }
            }
            ASSIGN_DIMEN => {
                if chr < SCALED_BASE {
                    self.print_length_param(chr - DIMEN_BASE);
                } else {
                    self.print_esc("dimen");
                    self.print_int(chr - SCALED_BASE);
                }
            }
            CHAR_NUM => self.print_esc("char"),
            DEF_FONT => self.print_esc("font"),
            PDF_COPY_FONT => self.print_esc("pdfcopyfont"),
            DELIM_NUM => self.print_esc("delimiter"),
            MATH_CHAR_NUM => self.print_esc("mathchar"),
            RADICAL => self.print_esc("radical"),
            RELAX => self.print_esc("relax"),
            PAR_END => self.print_esc("par"),
            END_CS_NAME if chr == 10 => self.print_esc("endmubyte"),
            END_CS_NAME => self.print_esc("endcsname"),
            MARK => {
                self.print_esc("mark");
                if chr > 0 {
                    self.print_char(b's');
                }
            }
            SET_SHAPE => match chr {
                PAR_SHAPE_LOC => self.print_esc("parshape"),
                INTER_LINE_PENALTIES_LOC => self.print_esc("interlinepenalties"),
                CLUB_PENALTIES_LOC => self.print_esc("clubpenalties"),
                WIDOW_PENALTIES_LOC => self.print_esc("widowpenalties"),
                DISPLAY_WIDOW_PENALTIES_LOC => self.print_esc("displaywidowpenalties"),
                _ => self.alert(&format!("Impossible case in print_cmd_chr.SET_SHAPE ({chr}).")),
            },
            TOKS_REGISTER => {
                self.print_esc("toks");
                if chr != mem_bot {
                    self.print_sa_num(chr)?;
                }
            }
            REGISTER => {
                let (kind, register) = if chr < mem_bot || chr > lo_mem_stat_max(mem_bot) {
                    (i32::from(state.memory.sa_index(chr)? >> 4), chr)
                } else {
                    (chr - mem_bot, NULL)
                };
                self.print_esc(match kind {
                    INT_VAL => "count",
                    DIMEN_VAL => "dimen",
                    GLUE_VAL => "skip",
                    _ => "muskip",
                });
                if register != NULL {
                    self.print_sa_num(register)?;
                }
            }
            LAST_ITEM => self.print_esc(match chr {
                INT_VAL => "lastpenalty",
                DIMEN_VAL => "lastkern",
                _ => "lastskip",
            }),
            CHAR_GIVEN => {
                self.print_esc("char");
                self.print_hex(chr);
            }
            MATH_GIVEN => {
                self.print_esc("mathchar");
                self.print_hex(chr);
            }
            DEF_CODE => self.print_esc(match chr {
                XORD_CODE_BASE => "xordcode",
                XCHR_CODE_BASE => "xchrcode",
                XPRN_CODE_BASE => "xprncode",
                CAT_CODE_BASE => "catcode",
                MATH_CODE_BASE => "mathcode",
                LC_CODE_BASE => "lccode",
                UC_CODE_BASE => "uccode",
                SF_CODE_BASE => "sfcode",
                _ => "delcode",
            }),
            DEF_FAMILY => self.print_size(chr - MATH_FONT_BASE),
            SET_FONT => {
                let fonts = &state.fonts;
                self.print_str("select font ");
                self.slow_print(fonts.font_name(chr)?);
                let size = fonts.font_size(chr)?;
                if size != fonts.font_dsize(chr)? {
                    self.print_str(" at ");
                    self.print_scaled(size);
                    self.print_str("pt");
                }
            }
            UNDEFINED_CS => self.print_str("undefined"),
            CALL..=LONG_OUTER_CALL => {
                let mut n = cmd - CALL;
                if chr != NULL {
                    let mem = &state.memory;
                    if mem.info(mem.link(chr)?)? == PROTECTED_TOKEN {
                        n += 4;
                    }
                }
                if n & 4 != 0 {
                    self.print_esc("protected");
                }
                if n & 1 != 0 {
                    self.print_esc("long");
                }
                if n & 2 != 0 {
                    self.print_esc("outer");
                }
                if n > 0 {
                    self.print_char(b' ');
                }
                self.print_str("macro");
                if chr == NULL {
                    self.text(" (null)");
                }
            }
            END_TEMPLATE => self.print_esc("outer endtemplate"),
            _ => match self.primitive_for(cmd, chr)? {
                Some(name) => self.print_esc_str(name),
                None => self.print_str("[unknown command code!]"),
            },
        }
        Ok(())
    }

    /// Text of the primitive whose meaning is `(cmd, chr)`.
    fn primitive_for(&self, cmd: u8, chr: i32) -> Result<Option<i32>, MemoryError> {
        let eqtb = &self.state().eqtb;
        for p in 1..=PRIM_SIZE {
            let text = eqtb.prim_text(p)?;
            if text != 0 && eqtb.prim_eq_type(p)? == cmd && eqtb.prim_equiv(p)? == chr {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }
}

fn toks_param_name(loc: i32) -> &'static str {
    match loc {
        OUTPUT_ROUTINE_LOC => "output",
        EVERY_PAR_LOC => "everypar",
        EVERY_MATH_LOC => "everymath",
        EVERY_DISPLAY_LOC => "everydisplay",
        EVERY_HBOX_LOC => "everyhbox",
        EVERY_VBOX_LOC => "everyvbox",
        EVERY_JOB_LOC => "everyjob",
        EVERY_CR_LOC => "everycr",
        EVERY_EOF_LOC => "everyeof",
        PDF_PAGES_ATTR_LOC => "pdfpagesattr",
        PDF_PAGE_ATTR_LOC => "pdfpageattr",
        PDF_PAGE_RESOURCES_LOC => "pdfpageresources",
        PDF_PK_MODE_LOC => "pdfpkmode",
        _ => "errhelp",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtscope_core::layout::{
        LINE_SKIP_CODE, NEW_LINE_CHAR_CODE, PDF_ADJUST_SPACING_CODE, SYNCTEX_CODE,
        TEXXET_STATE_CODE, THICK_MU_SKIP_CODE,
    };
    use fmtscope_core::TexConfig;
    use fmtscope_dump::EngineState;
    use fmtscope_test_utils::RecordingHost;

    fn render(f: impl FnOnce(&mut Printer<'_>) -> Result<(), MemoryError>) -> String {
        let state = EngineState::new(&TexConfig::new());
        let mut host = RecordingHost::new();
        {
            let mut printer = Printer::new(&state, &mut host);
            f(&mut printer).unwrap();
        }
        host.log_text()
    }

    #[test]
    fn parameter_tables_line_up_with_codes() {
        assert_eq!(INT_PARAM_NAMES[NEW_LINE_CHAR_CODE as usize], "newlinechar");
        assert_eq!(INT_PARAM_NAMES[PDF_ADJUST_SPACING_CODE as usize], "pdfadjustspacing");
        assert_eq!(INT_PARAM_NAMES[SYNCTEX_CODE as usize], "synctex");
        assert_eq!(INT_PARAM_NAMES[TEXXET_STATE_CODE as usize], "TeXXeTstate");
        assert_eq!(SKIP_PARAM_NAMES[LINE_SKIP_CODE as usize], "lineskip");
        assert_eq!(SKIP_PARAM_NAMES[THICK_MU_SKIP_CODE as usize], "thickmuskip");
    }

    #[test]
    fn unknown_parameters_have_placeholders() {
        let text = render(|p| {
            p.print_param(-1);
            p.print_skip_param(18);
            p.print_length_param(34);
            Ok(())
        });
        assert_eq!(
            text,
            "[unknown integer parameter!][unknown glue parameter!][unknown dimen parameter!]"
        );
    }

    #[test]
    fn register_commands_name_their_bank() {
        let text = render(|p| p.print_cmd_chr(ASSIGN_INT, COUNT_BASE + 12));
        assert_eq!(text, "\\count12");
        let text = render(|p| p.print_cmd_chr(ASSIGN_GLUE, GLUE_BASE + 2));
        assert_eq!(text, "\\parskip");
        let text = render(|p| p.print_cmd_chr(ASSIGN_TOKS, EVERY_PAR_LOC));
        assert_eq!(text, "\\everypar");
    }

    #[test]
    fn null_macros_are_marked() {
        let text = render(|p| p.print_cmd_chr(CALL + 3, NULL));
        assert_eq!(text, "\\long\\outer macro (null)");
        assert_eq!(render(|p| p.print_cmd_chr(CALL, NULL)), "macro (null)");
    }

    #[test]
    fn catcodes_out_of_range_are_unknown() {
        assert_eq!(catcode_name(11), "letter");
        assert_eq!(catcode_name(16), "???");
        assert_eq!(fitness_name(4), "???");
    }
}
