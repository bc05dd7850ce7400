//! pdfTeX memory layout: eqtb regions, node codes and format signatures.
//!
//! Region bases are derived from one another exactly the way the engine
//! derives them, so a single changed width (say `HASH_SIZE`) moves every
//! later base consistently.

// ── Halfwords and quarterwords ──────────────────────────────────

/// Largest halfword value.
pub const MAX_HALFWORD: i32 = 0xFFF_FFFF;
/// Smallest halfword value.
pub const MIN_HALFWORD: i32 = -0xFFF_FFFF;
/// The null pointer.
pub const NULL: i32 = MIN_HALFWORD;
/// Smallest quarterword value.
pub const MIN_QUARTERWORD: i32 = 0;
/// Largest quarterword value.
pub const MAX_QUARTERWORD: i32 = 255;
/// Outermost save level.
pub const LEVEL_ZERO: u8 = 0;
/// Marks a free block in the variable-size memory ring.
pub const EMPTY_FLAG: i32 = MAX_HALFWORD;
/// Running dimension marker for rules.
pub const NULL_FLAG: i32 = -0x4000_0000;
/// Character code meaning "no character".
pub const NON_CHAR: i32 = 256;
/// `prev_depth` value that suppresses interline glue.
pub const IGNORE_DEPTH: i32 = -65_536_000;
/// Fixed-point one.
pub const UNITY: i32 = 0x1_0000;
/// Default value for code tables.
pub const DEFAULT_CODE: i32 = 0x4000_0000;
/// Offset added to control sequence pointers inside token lists.
pub const CS_TOKEN_FLAG: i32 = 0xFFF;

// ── Format signatures ──────────────────────────────────────────

/// First word of every pdfTeX format file (`W2TX`).
pub const FORMAT_MAGIC: i32 = 0x5732_5458;
/// MLTeX block signature (`MLTX`).
pub const MLTEX_SIGNATURE: i32 = 0x4D4C_5458;
/// encTeX block signature (`ECTX`).
pub const ENCTEX_SIGNATURE: i32 = 0x4543_5458;
/// Terminal word of every format file.
pub const FORMAT_TRAILER: i32 = 69_069;
/// Engine name recorded after the magic word.
pub const ENGINE_NAME: &str = "pdftex";
/// Upper bound of the engine name length.
pub const MAX_ENGINE_NAME_LENGTH: i32 = 256;
/// Banner the engine interns into the pool while loading fonts.
pub const PDFTEX_BANNER: &str =
    "This is pdfTeX, Version 3.141592653-2.6-1.40.25 (TeX Live 2023) kpathsea version 6.3.5";

// ── Static sizes ───────────────────────────────────────────────

/// Number of primary hash slots.
pub const HASH_SIZE: i32 = 15_000;
/// Hash multiplier prime.
pub const HASH_PRIME: i32 = 8_501;
/// Hyphenation exception hash prime.
pub const HYPH_PRIME: i32 = 607;
/// Capacity of the trie op tables.
pub const TRIE_OP_SIZE: i32 = 35_111;
/// Largest trie op value.
pub const MAX_TRIE_OP: i32 = 65_535;
/// Number of primitive slots.
pub const PRIM_SIZE: i32 = 2_100;
/// Index of the first font.
pub const FONT_BASE: i32 = 0;
/// The null font.
pub const NULL_FONT: i32 = FONT_BASE;
/// Hard upper bound on the number of fonts.
pub const MAX_FONT_MAX: i32 = 9_000;
/// Words of font memory a format must hold at minimum.
pub const MIN_FMEM_PTR: i32 = 7;
/// Number of object table heads.
pub const HEAD_TAB_MAX: i32 = 6;
/// Smallest object table the loader allocates.
pub const INF_OBJ_TAB_SIZE: i32 = 1_000;
/// Largest object table accepted.
pub const SUP_OBJ_TAB_SIZE: i32 = 8_388_607;
/// Largest `pdf_mem` accepted.
pub const SUP_PDF_MEM_SIZE: i32 = 10_000_000;

// ── Eqtb region 1 and 2: active characters and control sequences ──

/// First active character.
pub const ACTIVE_BASE: i32 = 1;
/// First single-character control sequence.
pub const SINGLE_BASE: i32 = ACTIVE_BASE + 256;
/// The empty control sequence.
pub const NULL_CS: i32 = SINGLE_BASE + 256;
/// First multi-letter control sequence.
pub const HASH_BASE: i32 = NULL_CS + 1;
/// The hash array starts at this index.
pub const HASH_OFFSET: i32 = HASH_BASE;
/// First frozen control sequence.
pub const FROZEN_CONTROL_SEQUENCE: i32 = HASH_BASE + HASH_SIZE;
/// `\relax` frozen copy.
pub const FROZEN_PROTECTION: i32 = FROZEN_CONTROL_SEQUENCE;
/// Frozen `\cr`.
pub const FROZEN_CR: i32 = FROZEN_CONTROL_SEQUENCE + 1;
/// Frozen `\endgroup`.
pub const FROZEN_END_GROUP: i32 = FROZEN_CONTROL_SEQUENCE + 2;
/// Frozen `\right`.
pub const FROZEN_RIGHT: i32 = FROZEN_CONTROL_SEQUENCE + 3;
/// Frozen `\fi`.
pub const FROZEN_FI: i32 = FROZEN_CONTROL_SEQUENCE + 4;
/// Frozen end of template.
pub const FROZEN_END_TEMPLATE: i32 = FROZEN_CONTROL_SEQUENCE + 5;
/// Frozen `\endv`.
pub const FROZEN_ENDV: i32 = FROZEN_CONTROL_SEQUENCE + 6;
/// Frozen `\relax`.
pub const FROZEN_RELAX: i32 = FROZEN_CONTROL_SEQUENCE + 7;
/// `\endwrite`.
pub const END_WRITE: i32 = FROZEN_CONTROL_SEQUENCE + 8;
/// Frozen `\notexpanded:`.
pub const FROZEN_DONT_EXPAND: i32 = FROZEN_CONTROL_SEQUENCE + 9;
/// Frozen `\special`.
pub const FROZEN_SPECIAL: i32 = FROZEN_CONTROL_SEQUENCE + 10;
/// Frozen `\pdfprimitive`.
pub const FROZEN_PRIMITIVE: i32 = FROZEN_CONTROL_SEQUENCE + 11;
/// Frozen `\nullfont`.
pub const FROZEN_NULL_FONT: i32 = FROZEN_CONTROL_SEQUENCE + 12;
/// Font identifiers live at `FONT_ID_BASE + f`.
pub const FONT_ID_BASE: i32 = FROZEN_NULL_FONT - FONT_BASE;
/// The undefined control sequence; last slot of region 2.
pub const UNDEFINED_CONTROL_SEQUENCE: i32 = FROZEN_NULL_FONT + MAX_FONT_MAX + 1;

// ── Eqtb region 3: glue ────────────────────────────────────────

/// First glue parameter.
pub const GLUE_BASE: i32 = UNDEFINED_CONTROL_SEQUENCE + 1;
/// `\lineskip`.
pub const LINE_SKIP_CODE: i32 = 0;
/// `\baselineskip`.
pub const BASELINE_SKIP_CODE: i32 = 1;
/// `\parskip`.
pub const PAR_SKIP_CODE: i32 = 2;
/// `\abovedisplayskip`.
pub const ABOVE_DISPLAY_SKIP_CODE: i32 = 3;
/// `\belowdisplayskip`.
pub const BELOW_DISPLAY_SKIP_CODE: i32 = 4;
/// `\abovedisplayshortskip`.
pub const ABOVE_DISPLAY_SHORT_SKIP_CODE: i32 = 5;
/// `\belowdisplayshortskip`.
pub const BELOW_DISPLAY_SHORT_SKIP_CODE: i32 = 6;
/// `\leftskip`.
pub const LEFT_SKIP_CODE: i32 = 7;
/// `\rightskip`.
pub const RIGHT_SKIP_CODE: i32 = 8;
/// `\topskip`.
pub const TOP_SKIP_CODE: i32 = 9;
/// `\splittopskip`.
pub const SPLIT_TOP_SKIP_CODE: i32 = 10;
/// `\tabskip`.
pub const TAB_SKIP_CODE: i32 = 11;
/// `\spaceskip`.
pub const SPACE_SKIP_CODE: i32 = 12;
/// `\xspaceskip`.
pub const XSPACE_SKIP_CODE: i32 = 13;
/// `\parfillskip`.
pub const PAR_FILL_SKIP_CODE: i32 = 14;
/// `\thinmuskip`.
pub const THIN_MU_SKIP_CODE: i32 = 15;
/// `\medmuskip`.
pub const MED_MU_SKIP_CODE: i32 = 16;
/// `\thickmuskip`.
pub const THICK_MU_SKIP_CODE: i32 = 17;
/// Number of glue parameters.
pub const GLUE_PARS: i32 = 18;
/// `\skip0`.
pub const SKIP_BASE: i32 = GLUE_BASE + GLUE_PARS;
/// `\muskip0`.
pub const MU_SKIP_BASE: i32 = SKIP_BASE + 256;
/// First slot of region 4.
pub const LOCAL_BASE: i32 = MU_SKIP_BASE + 256;

// ── Eqtb region 4: local halfword quantities ───────────────────

/// `\parshape`.
pub const PAR_SHAPE_LOC: i32 = LOCAL_BASE;
/// `\output`.
pub const OUTPUT_ROUTINE_LOC: i32 = LOCAL_BASE + 1;
/// `\everypar`.
pub const EVERY_PAR_LOC: i32 = LOCAL_BASE + 2;
/// `\everymath`.
pub const EVERY_MATH_LOC: i32 = LOCAL_BASE + 3;
/// `\everydisplay`.
pub const EVERY_DISPLAY_LOC: i32 = LOCAL_BASE + 4;
/// `\everyhbox`.
pub const EVERY_HBOX_LOC: i32 = LOCAL_BASE + 5;
/// `\everyvbox`.
pub const EVERY_VBOX_LOC: i32 = LOCAL_BASE + 6;
/// `\everyjob`.
pub const EVERY_JOB_LOC: i32 = LOCAL_BASE + 7;
/// `\everycr`.
pub const EVERY_CR_LOC: i32 = LOCAL_BASE + 8;
/// `\errhelp`.
pub const ERR_HELP_LOC: i32 = LOCAL_BASE + 9;
/// `\pdfpagesattr`.
pub const PDF_PAGES_ATTR_LOC: i32 = LOCAL_BASE + 10;
/// `\pdfpageattr`.
pub const PDF_PAGE_ATTR_LOC: i32 = LOCAL_BASE + 11;
/// `\pdfpageresources`.
pub const PDF_PAGE_RESOURCES_LOC: i32 = LOCAL_BASE + 12;
/// `\pdfpkmode`.
pub const PDF_PK_MODE_LOC: i32 = LOCAL_BASE + 13;
/// `\everyeof`.
pub const EVERY_EOF_LOC: i32 = LOCAL_BASE + 14;
/// `\toks0`.
pub const TOKS_BASE: i32 = LOCAL_BASE + 15;
/// eTeX penalty arrays.
pub const ETEX_PEN_BASE: i32 = TOKS_BASE + 256;
/// `\interlinepenalties`.
pub const INTER_LINE_PENALTIES_LOC: i32 = ETEX_PEN_BASE;
/// `\clubpenalties`.
pub const CLUB_PENALTIES_LOC: i32 = ETEX_PEN_BASE + 1;
/// `\widowpenalties`.
pub const WIDOW_PENALTIES_LOC: i32 = ETEX_PEN_BASE + 2;
/// `\displaywidowpenalties`.
pub const DISPLAY_WIDOW_PENALTIES_LOC: i32 = ETEX_PEN_BASE + 3;
/// End of the eTeX penalty arrays.
pub const ETEX_PENS: i32 = ETEX_PEN_BASE + 4;
/// `\box0`.
pub const BOX_BASE: i32 = ETEX_PENS;
/// The current font.
pub const CUR_FONT_LOC: i32 = BOX_BASE + 256;
/// Active `xord` table.
pub const XORD_CODE_BASE: i32 = CUR_FONT_LOC + 1;
/// Active `xchr` table.
pub const XCHR_CODE_BASE: i32 = XORD_CODE_BASE + 1;
/// Active `xprn` table.
pub const XPRN_CODE_BASE: i32 = XCHR_CODE_BASE + 1;
/// `\textfont0`.
pub const MATH_FONT_BASE: i32 = XPRN_CODE_BASE + 1;
/// `\catcode0`.
pub const CAT_CODE_BASE: i32 = MATH_FONT_BASE + 48;
/// `\lccode0`.
pub const LC_CODE_BASE: i32 = CAT_CODE_BASE + 256;
/// `\uccode0`.
pub const UC_CODE_BASE: i32 = LC_CODE_BASE + 256;
/// `\sfcode0`.
pub const SF_CODE_BASE: i32 = UC_CODE_BASE + 256;
/// `\mathcode0`.
pub const MATH_CODE_BASE: i32 = SF_CODE_BASE + 256;
/// `\charsubdef` table.
pub const CHAR_SUB_CODE_BASE: i32 = MATH_CODE_BASE + 256;
/// First slot of region 5.
pub const INT_BASE: i32 = CHAR_SUB_CODE_BASE + 256;

// ── Eqtb region 5: integers ───────────────────────────────────

/// Number of TeX integer parameters.
pub const TEX_INT_PARS: i32 = 55;
/// First web2c integer parameter.
pub const WEB2C_INT_BASE: i32 = TEX_INT_PARS;
/// `\newlinechar`.
pub const NEW_LINE_CHAR_CODE: i32 = 49;
/// `\escapechar`.
pub const ESCAPE_CHAR_CODE: i32 = 45;
/// `\charsubdefmin`.
pub const CHAR_SUB_DEF_MIN_CODE: i32 = WEB2C_INT_BASE;
/// `\charsubdefmax`.
pub const CHAR_SUB_DEF_MAX_CODE: i32 = WEB2C_INT_BASE + 1;
/// First pdfTeX integer parameter.
pub const PDFTEX_FIRST_INTEGER_CODE: i32 = WEB2C_INT_BASE + 7;
/// `\pdfadjustspacing`.
pub const PDF_ADJUST_SPACING_CODE: i32 = PDFTEX_FIRST_INTEGER_CODE + 18;
/// `\pdfprotrudechars`.
pub const PDF_PROTRUDE_CHARS_CODE: i32 = PDFTEX_FIRST_INTEGER_CODE + 19;
/// `\synctex`.
pub const SYNCTEX_CODE: i32 = PDFTEX_FIRST_INTEGER_CODE + 29;
/// First eTeX integer parameter.
pub const ETEX_INT_BASE: i32 = SYNCTEX_CODE + 1;
/// `\TeXXeTstate`.
pub const TEXXET_STATE_CODE: i32 = ETEX_INT_BASE + 9;
/// Number of integer parameters.
pub const INT_PARS: i32 = TEXXET_STATE_CODE + 1;
/// `\count0`.
pub const COUNT_BASE: i32 = INT_BASE + INT_PARS;
/// `\delcode0`.
pub const DEL_CODE_BASE: i32 = COUNT_BASE + 256;
/// First slot of region 6.
pub const DIMEN_BASE: i32 = DEL_CODE_BASE + 256;

// ── Eqtb region 6: dimensions ─────────────────────────────────

/// Number of TeX dimension parameters.
pub const TEX_DIMEN_PARS: i32 = 21;
/// `\pdfignoreddimen`.
pub const PDF_IGNORED_DIMEN_CODE: i32 = TEX_DIMEN_PARS + 11;
/// Number of dimension parameters.
pub const DIMEN_PARS: i32 = TEX_DIMEN_PARS + 13;
/// `\dimen0`.
pub const SCALED_BASE: i32 = DIMEN_BASE + DIMEN_PARS;
/// Last slot of the static eqtb.
pub const EQTB_SIZE: i32 = SCALED_BASE + 255;

// ── Save-stack value levels ─────────────────────────────────────

/// Integer values.
pub const INT_VAL: i32 = 0;
/// Dimension values.
pub const DIMEN_VAL: i32 = 1;
/// Glue values.
pub const GLUE_VAL: i32 = 2;
/// Mu-glue values.
pub const MU_VAL: i32 = 3;
/// Box values.
pub const BOX_VAL: i32 = 4;
/// Token list values.
pub const TOK_VAL: i32 = 5;
/// Mark classes.
pub const MARK_VAL: i32 = 6;
/// Number of sparse array roots in an eTeX format.
pub const SA_ROOT_COUNT: i32 = MARK_VAL;
/// Sparse array `sa_index` of dimension registers and below.
pub const DIMEN_VAL_LIMIT: i32 = 0x20;

// ── Interaction levels and modes ───────────────────────────────

/// `\batchmode`.
pub const BATCH_MODE: i32 = 0;
/// `\nonstopmode`.
pub const NONSTOP_MODE: i32 = 1;
/// `\scrollmode`.
pub const SCROLL_MODE: i32 = 2;
/// `\errorstopmode`.
pub const ERROR_STOP_MODE: i32 = 3;
/// Vertical mode.
pub const VMODE: i32 = 1;

// ── encTeX ──────────────────────────────────────────────────────

/// Entries of `mubyte_read` and `mubyte_write`.
pub const MUBYTE_TABLE_SIZE: i32 = 256;
/// Entries of `mubyte_cswrite`.
pub const MUBYTE_CSWRITE_SIZE: i32 = 128;
/// Base of `\mubyte` subtype values in write nodes.
pub const MUBYTE_ZERO: i32 = 64;

// ── Memory words relative to `mem_bot` and `mem_top` ──────────

/// `zero_glue` specification.
pub const fn zero_glue(mem_bot: i32) -> i32 {
    mem_bot
}
/// `fil_glue` specification.
pub const fn fil_glue(mem_bot: i32) -> i32 {
    mem_bot + 4
}
/// `fill_glue` specification.
pub const fn fill_glue(mem_bot: i32) -> i32 {
    mem_bot + 8
}
/// `ss_glue` specification.
pub const fn ss_glue(mem_bot: i32) -> i32 {
    mem_bot + 12
}
/// `fil_neg_glue` specification.
pub const fn fil_neg_glue(mem_bot: i32) -> i32 {
    mem_bot + 16
}
/// Last statically allocated low-memory word.
pub const fn lo_mem_stat_max(mem_bot: i32) -> i32 {
    mem_bot + 19
}
/// Head of the page insertion list.
pub const fn page_ins_head(mem_top: i32) -> i32 {
    mem_top
}
/// Head of the contribution list.
pub const fn contrib_head(mem_top: i32) -> i32 {
    mem_top - 1
}
/// Head of the current page.
pub const fn page_head(mem_top: i32) -> i32 {
    mem_top - 2
}
/// Temporary list head.
pub const fn temp_head(mem_top: i32) -> i32 {
    mem_top - 3
}
/// Hold list head.
pub const fn hold_head(mem_top: i32) -> i32 {
    mem_top - 4
}
/// Adjustment list head.
pub const fn adjust_head(mem_top: i32) -> i32 {
    mem_top - 5
}
/// Active list head used by the line breaker.
pub const fn active(mem_top: i32) -> i32 {
    mem_top - 7
}
/// Alignment stack head.
pub const fn align_head(mem_top: i32) -> i32 {
    mem_top - 8
}
/// Span list terminator.
pub const fn end_span(mem_top: i32) -> i32 {
    mem_top - 9
}
/// Template of `\omit`.
pub const fn omit_template(mem_top: i32) -> i32 {
    mem_top - 10
}
/// Permanently empty list.
pub const fn null_list(mem_top: i32) -> i32 {
    mem_top - 11
}
/// Ligature trick node.
pub const fn lig_trick(mem_top: i32) -> i32 {
    mem_top - 12
}
/// Scratch word.
pub const fn garbage(mem_top: i32) -> i32 {
    mem_top - 12
}
/// Backup token list head.
pub const fn backup_head(mem_top: i32) -> i32 {
    mem_top - 13
}
/// Pre-adjustment list head.
pub const fn pre_adjust_head(mem_top: i32) -> i32 {
    mem_top - 14
}
/// First statically allocated high-memory word.
pub const fn hi_mem_stat_min(mem_top: i32) -> i32 {
    mem_top - 14
}
/// Smallest gap a format must leave between `mem_bot` and `mem_top`.
pub const MIN_MEM_SPAN: i32 = 1100;
/// Smallest free gap above the static low-memory words.
pub const MIN_LO_MEM_GAP: i32 = 1000;

// ── Node types ──────────────────────────────────────────────────

/// Horizontal list box.
pub const HLIST_NODE: u8 = 0;
/// Vertical list box.
pub const VLIST_NODE: u8 = 1;
/// Rule.
pub const RULE_NODE: u8 = 2;
/// Insertion.
pub const INS_NODE: u8 = 3;
/// Mark.
pub const MARK_NODE: u8 = 4;
/// Vertical adjustment.
pub const ADJUST_NODE: u8 = 5;
/// Ligature.
pub const LIGATURE_NODE: u8 = 6;
/// Discretionary break.
pub const DISC_NODE: u8 = 7;
/// Extension node.
pub const WHATSIT_NODE: u8 = 8;
/// Math on/off.
pub const MATH_NODE: u8 = 9;
/// Glue.
pub const GLUE_NODE: u8 = 10;
/// Kern.
pub const KERN_NODE: u8 = 11;
/// Penalty.
pub const PENALTY_NODE: u8 = 12;
/// Unset alignment box.
pub const UNSET_NODE: u8 = 13;
/// Style change in an mlist.
pub const STYLE_NODE: u8 = 14;
/// Four-way math choice.
pub const CHOICE_NODE: u8 = 15;
/// Ordinary noad.
pub const ORD_NOAD: u8 = 16;
/// Large operator noad.
pub const OP_NOAD: u8 = 17;
/// Binary operator noad.
pub const BIN_NOAD: u8 = 18;
/// Relation noad.
pub const REL_NOAD: u8 = 19;
/// Opening noad.
pub const OPEN_NOAD: u8 = 20;
/// Closing noad.
pub const CLOSE_NOAD: u8 = 21;
/// Punctuation noad.
pub const PUNCT_NOAD: u8 = 22;
/// Inner noad.
pub const INNER_NOAD: u8 = 23;
/// Radical noad.
pub const RADICAL_NOAD: u8 = 24;
/// Generalized fraction noad.
pub const FRACTION_NOAD: u8 = 25;
/// Underline noad.
pub const UNDER_NOAD: u8 = 26;
/// Overline noad.
pub const OVER_NOAD: u8 = 27;
/// Accent noad.
pub const ACCENT_NOAD: u8 = 28;
/// `\vcenter` noad.
pub const VCENTER_NOAD: u8 = 29;
/// `\left` noad.
pub const LEFT_NOAD: u8 = 30;
/// `\right` or `\middle` noad.
pub const RIGHT_NOAD: u8 = 31;
/// Margin kern inserted by character protrusion.
pub const MARGIN_KERN_NODE: u8 = 40;

// ── Node subtypes ───────────────────────────────────────────────

/// Box subtype of an eTeX display list.
pub const DLIST: u8 = 2;
/// Glue that vanishes when `\nonscript` applies.
pub const COND_MATH_GLUE: u8 = 98;
/// Glue in mu units.
pub const MU_GLUE: u8 = 99;
/// Aligned leaders.
pub const A_LEADERS: u8 = 100;
/// Centered leaders.
pub const C_LEADERS: u8 = 101;
/// Expanded leaders.
pub const X_LEADERS: u8 = 102;
/// Ordinary kern.
pub const NORMAL: u8 = 0;
/// Explicit kern.
pub const EXPLICIT: u8 = 1;
/// Kern inserted for an accent.
pub const ACC_KERN: u8 = 2;
/// Margin kern on the left side.
pub const LEFT_SIDE: u8 = 0;
/// Math node: start of a formula.
pub const BEFORE: u8 = 0;
/// Math node: end of a formula.
pub const AFTER: u8 = 1;
/// Math node: left-to-right segment.
pub const L_CODE: u8 = 4;
/// Math node: right-to-left segment.
pub const R_CODE: u8 = 8;
/// Glue order: finite.
pub const GLUE_NORMAL: u8 = 0;
/// Glue sign: stretching.
pub const STRETCHING: u8 = 1;
/// Glue sign: shrinking.
pub const SHRINKING: u8 = 2;
/// First infinite glue order.
pub const FIL: u8 = 1;
/// Largest infinite glue order.
pub const FILLL: u8 = 3;
/// Noad subtype for displayed limits.
pub const LIMITS: u8 = 1;
/// Noad subtype for suppressed limits.
pub const NO_LIMITS: u8 = 2;

// ── Math fields ─────────────────────────────────────────────────

/// Math field empty.
pub const MATH_EMPTY: i32 = 0;
/// Math field holds a character.
pub const MATH_CHAR: i32 = 1;
/// Math field holds a box.
pub const SUB_BOX: i32 = 2;
/// Math field holds an mlist.
pub const SUB_MLIST: i32 = 3;
/// Math field holds a text character.
pub const MATH_TEXT_CHAR: i32 = 4;
/// Fraction thickness meaning "use the font default".
pub const DEFAULT_CODE_THICKNESS: i32 = DEFAULT_CODE;
/// Offset of the text size math fonts.
pub const TEXT_SIZE: i32 = 0;
/// Offset of the script size math fonts.
pub const SCRIPT_SIZE: i32 = 16;
/// Offset of the scriptscript size math fonts.
pub const SCRIPT_SCRIPT_SIZE: i32 = 32;

// ── Whatsit subtypes ────────────────────────────────────────────

/// `\openout`.
pub const OPEN_NODE: u8 = 0;
/// `\write`.
pub const WRITE_NODE: u8 = 1;
/// `\closeout`.
pub const CLOSE_NODE: u8 = 2;
/// `\special`.
pub const SPECIAL_NODE: u8 = 3;
/// Language change.
pub const LANGUAGE_NODE: u8 = 4;
/// `\pdfliteral`.
pub const PDF_LITERAL_NODE: u8 = 6;
/// `\pdfrefobj`.
pub const PDF_REFOBJ_NODE: u8 = 8;
/// `\pdfrefxform`.
pub const PDF_REFXFORM_NODE: u8 = 10;
/// `\pdfrefximage`.
pub const PDF_REFXIMAGE_NODE: u8 = 12;
/// `\pdfannot`.
pub const PDF_ANNOT_NODE: u8 = 13;
/// `\pdfstartlink`.
pub const PDF_START_LINK_NODE: u8 = 14;
/// `\pdfendlink`.
pub const PDF_END_LINK_NODE: u8 = 15;
/// `\pdfdest`.
pub const PDF_DEST_NODE: u8 = 17;
/// `\pdfthread`.
pub const PDF_THREAD_NODE: u8 = 18;
/// `\pdfstartthread`.
pub const PDF_START_THREAD_NODE: u8 = 19;
/// `\pdfendthread`.
pub const PDF_END_THREAD_NODE: u8 = 20;
/// `\pdfsavepos`.
pub const PDF_SAVE_POS_NODE: u8 = 21;
/// `\pdfsnaprefpoint`.
pub const PDF_SNAP_REF_POINT_NODE: u8 = 34;
/// `\pdfsnapy`.
pub const PDF_SNAPY_NODE: u8 = 35;
/// `\pdfsnapycomp`.
pub const PDF_SNAPY_COMP_NODE: u8 = 36;
/// `\pdfcolorstack`.
pub const PDF_COLORSTACK_NODE: u8 = 38;
/// `\pdfsetmatrix`.
pub const PDF_SETMATRIX_NODE: u8 = 39;
/// `\pdfsave`.
pub const PDF_SAVE_NODE: u8 = 40;
/// `\pdfrestore`.
pub const PDF_RESTORE_NODE: u8 = 41;

/// Literal placed relative to the current origin.
pub const SET_ORIGIN: i32 = 0;
/// Literal placed inside the page stream.
pub const DIRECT_PAGE: i32 = 1;
/// Literal emitted verbatim.
pub const DIRECT_ALWAYS: i32 = 2;

/// Color stack: set.
pub const COLORSTACK_SET: i32 = 0;
/// Color stack: push.
pub const COLORSTACK_PUSH: i32 = 1;
/// Color stack: pop.
pub const COLORSTACK_POP: i32 = 2;
/// Color stack: current.
pub const COLORSTACK_CURRENT: i32 = 3;
/// Color stack commands up to this one carry data.
pub const COLORSTACK_DATA: i32 = COLORSTACK_PUSH;

/// Link action: go to page.
pub const PDF_ACTION_PAGE: u8 = 0;
/// Link action: go to destination.
pub const PDF_ACTION_GOTO: u8 = 1;
/// Link action: thread.
pub const PDF_ACTION_THREAD: u8 = 2;
/// Link action: user defined.
pub const PDF_ACTION_USER: u8 = 3;

/// Destination: `/XYZ`.
pub const PDF_DEST_XYZ: u8 = 0;
/// Destination: `/Fit`.
pub const PDF_DEST_FIT: u8 = 1;
/// Destination: `/FitH`.
pub const PDF_DEST_FITH: u8 = 2;
/// Destination: `/FitV`.
pub const PDF_DEST_FITV: u8 = 3;
/// Destination: `/FitB`.
pub const PDF_DEST_FITB: u8 = 4;
/// Destination: `/FitBH`.
pub const PDF_DEST_FITBH: u8 = 5;
/// Destination: `/FitBV`.
pub const PDF_DEST_FITBV: u8 = 6;
/// Destination: `/FitR`.
pub const PDF_DEST_FITR: u8 = 7;

// ── Object table ─────────────────────────────────────────────────

/// Raw `\pdfobj` objects.
pub const OBJ_TYPE_OBJ: i32 = 3;
/// Form XObjects.
pub const OBJ_TYPE_XFORM: i32 = 4;
/// Image XObjects.
pub const OBJ_TYPE_XIMAGE: i32 = 5;

// ── Image types ──────────────────────────────────────────────────

/// Embedded PDF page.
pub const IMAGE_TYPE_PDF: i32 = 1;
/// PNG image.
pub const IMAGE_TYPE_PNG: i32 = 2;
/// JPEG image.
pub const IMAGE_TYPE_JPG: i32 = 3;
/// JBIG2 image.
pub const IMAGE_TYPE_JBIG2: i32 = 4;

// ── Fonts ────────────────────────────────────────────────────────

/// `pdf_font_type` of a font not yet written to PDF.
pub const NEW_FONT_TYPE: u8 = 0;

// ── Line breaking ────────────────────────────────────────────────

/// Active node: break at an ordinary place.
pub const UNHYPHENATED: u8 = 0;
/// Active node: break at a discretionary.
pub const HYPHENATED: u8 = 1;
/// Delta node between two active nodes.
pub const DELTA_NODE: u8 = 2;
/// Page insertion already split.
pub const SPLIT_UP: u8 = 1;

// ── Command codes ────────────────────────────────────────────────

/// `\relax`.
pub const RELAX: u8 = 0;
/// Begin-group character.
pub const LEFT_BRACE: u8 = 1;
/// End-group character.
pub const RIGHT_BRACE: u8 = 2;
/// Math shift character.
pub const MATH_SHIFT: u8 = 3;
/// Alignment delimiter.
pub const TAB_MARK: u8 = 4;
/// End of line; also `out_param` in token lists.
pub const CAR_RET: u8 = 5;
/// Output parameter inside a macro body.
pub const OUT_PARAM: u8 = 5;
/// Macro parameter character.
pub const MAC_PARAM: u8 = 6;
/// Superscript character.
pub const SUP_MARK: u8 = 7;
/// Subscript character.
pub const SUB_MARK: u8 = 8;
/// End of alignment template.
pub const ENDV: u8 = 9;
/// Blank space.
pub const SPACER: u8 = 10;
/// Letter.
pub const LETTER: u8 = 11;
/// Other character.
pub const OTHER_CHAR: u8 = 12;
/// `\par`; also parameter match in token lists.
pub const PAR_END: u8 = 13;
/// Parameter match token.
pub const MATCH: u8 = 13;
/// End of a macro parameter text.
pub const END_MATCH: u8 = 14;
/// `\delimiter`.
pub const DELIM_NUM: u8 = 15;
/// `\char`.
pub const CHAR_NUM: u8 = 16;
/// `\mathchar`.
pub const MATH_CHAR_NUM: u8 = 17;
/// `\mark`.
pub const MARK: u8 = 18;
/// `\radical`.
pub const RADICAL: u8 = 66;
/// `\endcsname`.
pub const END_CS_NAME: u8 = 67;
/// `\chardef` result.
pub const CHAR_GIVEN: u8 = 68;
/// `\mathchardef` result.
pub const MATH_GIVEN: u8 = 69;
/// Internal quantities.
pub const LAST_ITEM: u8 = 70;
/// `\toks`.
pub const TOKS_REGISTER: u8 = 71;
/// Token list parameters.
pub const ASSIGN_TOKS: u8 = 72;
/// Integer parameters.
pub const ASSIGN_INT: u8 = 73;
/// Dimension parameters.
pub const ASSIGN_DIMEN: u8 = 74;
/// Glue parameters.
pub const ASSIGN_GLUE: u8 = 75;
/// Mu-glue parameters.
pub const ASSIGN_MU_GLUE: u8 = 76;
/// `\parshape` and the eTeX penalty arrays.
pub const SET_SHAPE: u8 = 84;
/// `\catcode` and friends.
pub const DEF_CODE: u8 = 85;
/// `\textfont` and friends.
pub const DEF_FAMILY: u8 = 86;
/// A font identifier.
pub const SET_FONT: u8 = 87;
/// `\font`.
pub const DEF_FONT: u8 = 88;
/// `\count` and friends.
pub const REGISTER: u8 = 89;
/// `\pdfcopyfont`.
pub const PDF_COPY_FONT: u8 = 102;
/// Largest non-expandable command.
pub const MAX_COMMAND: u8 = PDF_COPY_FONT;
/// Undefined control sequence.
pub const UNDEFINED_CS: u8 = MAX_COMMAND + 1;
/// `\expandafter`.
pub const EXPAND_AFTER: u8 = MAX_COMMAND + 2;
/// Non-long, non-outer macro.
pub const CALL: u8 = MAX_COMMAND + 11;
/// `\long` macro.
pub const LONG_CALL: u8 = MAX_COMMAND + 12;
/// `\outer` macro.
pub const OUTER_CALL: u8 = MAX_COMMAND + 13;
/// `\long\outer` macro.
pub const LONG_OUTER_CALL: u8 = MAX_COMMAND + 14;
/// End of an alignment template.
pub const END_TEMPLATE: u8 = MAX_COMMAND + 15;
/// `\noexpand` marker.
pub const DONT_EXPAND: u8 = MAX_COMMAND + 16;
/// Glue pointer held in eqtb.
pub const GLUE_REF: u8 = MAX_COMMAND + 17;
/// Shape pointer held in eqtb.
pub const SHAPE_REF: u8 = MAX_COMMAND + 18;
/// Box pointer held in eqtb.
pub const BOX_REF: u8 = MAX_COMMAND + 19;
/// Raw data held in eqtb.
pub const DATA: u8 = MAX_COMMAND + 20;
/// `chr_code` of `\span`.
pub const SPAN_CODE: i32 = 256;
/// `chr_code` of `\cr`.
pub const CR_CODE: i32 = 257;
/// Token ending the parameter part of a macro.
pub const END_MATCH_TOKEN: i32 = 0o7000;
/// Token marking a `\protected` macro.
pub const PROTECTED_TOKEN: i32 = END_MATCH_TOKEN + 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eqtb_regions_land_on_pdftex_offsets() {
        assert_eq!(HASH_BASE, 514);
        assert_eq!(FROZEN_CONTROL_SEQUENCE, 15_514);
        assert_eq!(FROZEN_NULL_FONT, 15_526);
        assert_eq!(UNDEFINED_CONTROL_SEQUENCE, 24_527);
        assert_eq!(GLUE_BASE, 24_528);
        assert_eq!(LOCAL_BASE, 25_058);
        assert_eq!(TOKS_BASE, 25_073);
        assert_eq!(BOX_BASE, 25_333);
        assert_eq!(CAT_CODE_BASE, 25_641);
        assert_eq!(INT_BASE, 27_177);
        assert_eq!(INT_PARS, 102);
        assert_eq!(DIMEN_BASE, 27_791);
        assert_eq!(EQTB_SIZE, 28_080);
    }

    #[test]
    fn command_codes_line_up() {
        assert_eq!(UNDEFINED_CS, 103);
        assert_eq!(CALL, 113);
        assert_eq!(DATA, 122);
    }

    #[test]
    fn memory_heads_sit_below_mem_top() {
        let top = 1999;
        assert_eq!(page_ins_head(top), 1999);
        assert_eq!(hi_mem_stat_min(top), 1985);
        assert_eq!(lo_mem_stat_max(0), 19);
    }
}
