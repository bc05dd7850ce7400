//! Node list rendering.
//!
//! Every node prints as a block opened by `[:KIND` and closed by `:]`,
//! with its fields and sublists indented two spaces deeper. A walk keeps
//! every address it has shown; reaching one again, passing `mem_end` or
//! nesting past the configured depth stops the whole call with a
//! [`ShowError`] after a single alert.

use std::collections::HashSet;

use fmtscope_arena::MemoryError;
use fmtscope_core::arith::round;
use fmtscope_core::layout::{
    A_LEADERS, ACCENT_NOAD, AFTER, ACC_KERN, C_LEADERS, COLORSTACK_CURRENT, COLORSTACK_POP,
    COLORSTACK_PUSH, COLORSTACK_SET, COND_MATH_GLUE, DEFAULT_CODE, DIRECT_ALWAYS, DIRECT_PAGE,
    DLIST, LEFT_NOAD, LEFT_SIDE, LIMITS, L_CODE, MATH_CHAR, MATH_EMPTY, MU_GLUE, MUBYTE_ZERO,
    NORMAL, NULL, PDF_ACTION_GOTO, PDF_ACTION_PAGE, PDF_ACTION_THREAD, PDF_ACTION_USER,
    PDF_DEST_FIT, PDF_DEST_FITB, PDF_DEST_FITBH, PDF_DEST_FITBV, PDF_DEST_FITH, PDF_DEST_FITR,
    PDF_DEST_FITV, PDF_DEST_XYZ, RADICAL_NOAD, RIGHT_NOAD, R_CODE, SET_ORIGIN, SHRINKING,
    STRETCHING, SUB_BOX, SUB_MLIST, UNITY, X_LEADERS,
};
use fmtscope_dump::fields::addr;
use tracing::debug;

use crate::error::ShowError;
use crate::node::{BoxKind, Dims, Node, Whatsit};
use crate::printer::Printer;
use crate::tokens::TOKEN_LIMIT;

/// Bookkeeping for one public show call.
#[derive(Debug)]
struct Walk {
    visited: HashSet<i32>,
    depth: u32,
    limit: u32,
}

impl Walk {
    fn new(limit: u32) -> Self {
        Self {
            visited: HashSet::new(),
            depth: 0,
            limit,
        }
    }
}

impl Printer<'_> {
    /// Show the node list starting at `p`, each line prefixed by `indent`.
    pub fn show_node_list(&mut self, p: i32, indent: &str) -> Result<(), ShowError> {
        let result = self.walk_list(p, indent);
        self.finish(result)
    }

    /// [`show_node_list`](Self::show_node_list) without the alert.
    pub(crate) fn walk_list(&mut self, p: i32, indent: &str) -> Result<(), ShowError> {
        let mut walk = Walk::new(self.state().config.max_show_depth);
        self.node_list(&mut walk, p, indent)
    }

    /// Show the noad field at `p`.
    pub fn print_subsidiary_data(&mut self, p: i32, indent: &str) -> Result<(), ShowError> {
        let mut walk = Walk::new(self.state().config.max_show_depth);
        let result = self.subsidiary(&mut walk, p, indent);
        self.finish(result)
    }

    /// Alert once on failure, then flush.
    pub(crate) fn finish(&mut self, result: Result<(), ShowError>) -> Result<(), ShowError> {
        if let Err(err) = &result {
            self.alert(&err.to_string());
        }
        self.flush();
        result
    }

    fn node_list(&mut self, walk: &mut Walk, mut p: i32, indent: &str) -> Result<(), ShowError> {
        walk.depth += 1;
        if walk.depth > walk.limit {
            return Err(ShowError::TooDeep { limit: walk.limit });
        }
        let mem = &self.state().memory;
        while p > mem.mem_min {
            if p > mem.mem_end {
                return Err(ShowError::BeyondMemEnd {
                    at: p,
                    mem_end: mem.mem_end,
                });
            }
            if !walk.visited.insert(p) {
                debug!(at = p, "node list revisits a node");
                return Err(ShowError::Cycle { at: p });
            }
            let node = Node::decode(self.state(), p)?;
            self.node(walk, p, &node, indent)?;
            p = mem.link(p)?;
        }
        walk.depth -= 1;
        Ok(())
    }

    fn sublist(&mut self, walk: &mut Walk, p: i32, indent: &str) -> Result<(), ShowError> {
        self.node_list(walk, p, &format!("{indent}  "))
    }

    fn dims_line(&mut self, indent: &str, dims: Dims, rule: bool) {
        self.text(&format!("{indent}  dimensions ((h + d) * w): ("));
        let show = |printer: &mut Self, d: i32| {
            if rule {
                printer.print_rule_dimen(d);
            } else {
                printer.print_scaled(d);
            }
        };
        show(self, dims.height);
        self.text(" + ");
        show(self, dims.depth);
        self.text(") * ");
        show(self, dims.width);
        self.print_ln();
    }

    /// `head` then a braced token list, or `CLOBBERED.` if `p` is not a
    /// token list reference.
    fn token_block(
        &mut self,
        head: &str,
        p: i32,
        indent: &str,
        inner: usize,
    ) -> Result<(), MemoryError> {
        let mem = &self.state().memory;
        self.text(head);
        if p < mem.hi_mem_min || p > mem.mem_end {
            self.line("CLOBBERED.");
            return Ok(());
        }
        self.line("{");
        let body = format!("{indent}{}", " ".repeat(inner));
        self.show_token_list(mem.link(p)?, &body, TOKEN_LIMIT)?;
        self.line(&format!("{indent}{}}}", " ".repeat(inner - 2)));
        Ok(())
    }

    fn node(&mut self, walk: &mut Walk, p: i32, node: &Node, indent: &str) -> Result<(), ShowError> {
        match *node {
            Node::Char { .. } => {
                self.line(&format!("{indent}[:CHAR_NODE"));
                self.print_font_and_char(p, &format!("{indent}  "))?;
            }
            Node::Box {
                kind,
                dims,
                shift,
                list,
                glue_sign,
                glue_order,
                glue_set,
                subtype,
            } => {
                self.line(&format!("{indent}[:{}", node.name()));
                self.dims_line(indent, dims, false);
                if glue_set != 0.0 && glue_sign != NORMAL {
                    self.text(&format!("{indent}  glue_set: "));
                    match glue_sign {
                        SHRINKING => self.text("sign: '-' (shrinking), "),
                        STRETCHING => self.text("sign: '+' (stretching), "),
                        other => self.text(&format!("sign: ??? ({other}), ")),
                    }
                    self.text("value: ");
                    if glue_set.abs() > 20000.0 {
                        self.text(if glue_set > 0.0 {
                            "greater than "
                        } else {
                            "less than -"
                        });
                        self.print_glue(20000 * UNITY, glue_order, "");
                    } else {
                        self.print_glue(round(glue_set * f64::from(UNITY)), glue_order, "");
                    }
                    self.print_ln();
                }
                if shift != 0 {
                    self.text(&format!("{indent}  shift_amount: "));
                    self.print_scaled(shift);
                    self.print_ln();
                }
                if self.state().header.etex_ex() && kind == BoxKind::Hlist && subtype == DLIST {
                    self.line(&format!("{indent}  subtype: display (never be reserved)"));
                }
                self.line(&format!("{indent}  ----"));
                self.sublist(walk, list, indent)?;
            }
            Node::Unset {
                dims,
                list,
                span_count,
                stretch,
                shrink,
                glue_order,
                glue_sign,
            } => {
                self.line(&format!("{indent}[:UNSET_NODE"));
                self.dims_line(indent, dims, false);
                if span_count != 0 {
                    self.text(&format!("{indent}  columns: "));
                    self.print_int(i32::from(span_count) + 1);
                    self.print_ln();
                }
                if stretch != 0 {
                    self.text(&format!("{indent}  stretch: "));
                    self.print_glue(stretch, glue_order, "");
                    self.print_ln();
                }
                if shrink != 0 {
                    self.text(&format!("{indent}  shrink: "));
                    self.print_glue(shrink, glue_sign, "");
                    self.print_ln();
                }
                self.line(&format!("{indent}  ----"));
                self.sublist(walk, list, indent)?;
            }
            Node::Rule(dims) => {
                self.line(&format!("{indent}[:RULE_NODE"));
                self.dims_line(indent, dims, true);
            }
            Node::Ins {
                number,
                height,
                depth,
                split_top,
                float_cost,
                list,
            } => {
                self.line(&format!("{indent}[:INS_NODE"));
                self.text(&format!("{indent}  subtype (associated register): "));
                self.print_int(i32::from(number));
                self.print_ln();
                self.text(&format!("{indent}  natural size (height): "));
                self.print_scaled(height);
                self.print_ln();
                self.text(&format!("{indent}  split_top: "));
                self.print_spec(split_top, "")?;
                self.print_ln();
                self.text(&format!("{indent}  depth: "));
                self.print_scaled(depth);
                self.print_ln();
                self.text(&format!("{indent}  float cost: "));
                self.print_int(float_cost);
                self.print_ln();
                self.line(&format!("{indent}  ----"));
                self.sublist(walk, list, indent)?;
            }
            Node::Whatsit(whatsit) => {
                self.text(&format!("{indent}[:WHATSIT_NODE/"));
                self.whatsit(p, &whatsit, indent)?;
            }
            Node::Glue {
                subtype,
                spec,
                leader,
            } => {
                self.line(&format!("{indent}[:GLUE_NODE"));
                if subtype >= A_LEADERS {
                    self.text(&format!("{indent}  "));
                    match subtype {
                        C_LEADERS => self.text("c"),
                        X_LEADERS => self.text("x"),
                        _ => {}
                    }
                    self.text("leaders: ");
                    self.print_spec(spec, "")?;
                    self.print_ln();
                    self.line(&format!("{indent}  ----"));
                    self.sublist(walk, leader, indent)?;
                } else {
                    self.text(&format!("{indent}  glue"));
                    if subtype != NORMAL {
                        self.text(": ");
                        if subtype < COND_MATH_GLUE {
                            self.print_skip_param(i32::from(subtype) - 1);
                        } else if subtype == COND_MATH_GLUE {
                            self.print_esc("nonscript");
                        } else {
                            self.print_esc("mskip");
                        }
                    }
                    if subtype != COND_MATH_GLUE {
                        if subtype == NORMAL {
                            self.text(":");
                        }
                        self.text(" ");
                        let unit = if subtype < COND_MATH_GLUE { "" } else { "mu" };
                        self.print_spec(spec, unit)?;
                    }
                    self.print_ln();
                }
            }
            Node::MarginKern { side, width } => {
                self.line(&format!("{indent}[:MARGIN_KERN_NODE"));
                self.text(&format!("{indent}  kern: "));
                self.print_scaled(width);
                self.print_ln();
                let side = if side == LEFT_SIDE { "left" } else { "right" };
                self.line(&format!("{indent}  margin: {side}"));
            }
            Node::Kern { subtype, width } => {
                self.line(&format!("{indent}[:KERN_NODE"));
                if subtype == MU_GLUE {
                    self.text(&format!("{indent}  mkern: "));
                    self.print_scaled(width);
                    self.line("mu");
                } else {
                    self.text(&format!("{indent}  kern"));
                    self.text(if subtype == ACC_KERN { " (for accent): " } else { ": " });
                    self.print_scaled(width);
                    self.print_ln();
                }
            }
            Node::Math { subtype, width } => {
                self.line(&format!("{indent}[:MATH_NODE"));
                self.text(&format!("{indent}  kind: "));
                if subtype > AFTER {
                    self.text(if subtype % 2 == 1 { "end" } else { "begin" });
                    self.line(if subtype > R_CODE {
                        "R"
                    } else if subtype > L_CODE {
                        "L"
                    } else {
                        "M"
                    });
                } else {
                    self.text(if subtype == 0 { "mathon" } else { "mathoff" });
                    if width != 0 {
                        self.text(" (surrounded by ");
                        self.print_scaled(width);
                        self.text(")");
                    }
                    self.print_ln();
                }
            }
            Node::Ligature { subtype, chars } => {
                self.line(&format!("{indent}[:LIGATURE_NODE"));
                self.print_font_and_char(addr::lig_char(p), &format!("{indent}  "))?;
                self.line(&format!("{indent}  ligature:"));
                if subtype > 1 {
                    self.line(&format!("{indent}  | (implicit left boundary)"));
                }
                self.line(&format!("{indent}    characters to be ligatured:"));
                self.node_list(walk, chars, &format!("{indent}    "))?;
                if subtype & 1 == 1 {
                    self.line(&format!("{indent}  | (implicit right boundary)"));
                }
            }
            Node::Penalty(value) => {
                self.line(&format!("{indent}[:PENALTY_NODE"));
                self.text(&format!("{indent}  value: "));
                self.print_int(value);
                self.print_ln();
            }
            Node::Disc {
                replace_count,
                pre_break,
                post_break,
            } => {
                self.line(&format!("{indent}[:DISC_NODE"));
                self.text(&format!("{indent}  replace count: "));
                self.print_int(i32::from(replace_count));
                self.print_ln();
                self.line(&format!("{indent}  ---- (pre break)"));
                self.sublist(walk, pre_break, indent)?;
                self.line(&format!("{indent}  ---- (post break)"));
                self.sublist(walk, post_break, indent)?;
            }
            Node::Mark { class, tokens } => {
                self.line(&format!("{indent}[:MARK_NODE"));
                self.text(&format!("{indent}  marks: "));
                self.print_int(class);
                self.print_ln();
                self.token_block(&format!("{indent}  mark: "), tokens, indent, 4)?;
            }
            Node::Adjust { pre, list } => {
                self.line(&format!("{indent}[:ADJUST_NODE"));
                self.text(&format!("{indent}  preadjustment: "));
                self.print_int(i32::from(pre));
                self.print_ln();
                self.line(&format!("{indent}  ----"));
                self.sublist(walk, list, indent)?;
            }
            Node::Style(style) => {
                self.line(&format!("{indent}[:STYLE_NODE"));
                self.text(&format!("{indent}  style: "));
                self.print_style(style);
                self.print_ln();
            }
            Node::Choice {
                display,
                text,
                script,
                script_script,
            } => {
                self.line(&format!("{indent}[:CHOICE_NODE"));
                for (label, list) in [
                    ("display", display),
                    ("text", text),
                    ("script", script),
                    ("script script", script_script),
                ] {
                    self.line(&format!("{indent}  ---- ({label} mlist)"));
                    self.sublist(walk, list, indent)?;
                }
            }
            Node::Noad { kind, subtype } => {
                self.line(&format!("{indent}[:{}", node.name()));
                self.noad_header(p, kind, subtype, indent)?;
                let inner = format!("{indent}  ");
                if kind < LEFT_NOAD {
                    if subtype != NORMAL {
                        let limits = if subtype == LIMITS { "limits" } else { "nolimits" };
                        self.line(&format!("{indent}  ---- ({limits})"));
                    }
                    self.subsidiary(walk, addr::nucleus(p), &inner)?;
                }
                self.line(&format!("{indent}  ---- (superscript)"));
                self.subsidiary(walk, addr::supscr(p), &inner)?;
                self.line(&format!("{indent}  ---- (subscript)"));
                self.subsidiary(walk, addr::subscr(p), &inner)?;
            }
            Node::Fraction { thickness } => {
                self.line(&format!("{indent}[:FRACTION_NOAD"));
                self.text(&format!("{indent}  thickness: "));
                if thickness == DEFAULT_CODE {
                    self.line("default");
                } else {
                    self.print_scaled(thickness);
                    self.print_ln();
                }
                for (label, at) in [
                    ("left", addr::left_delimiter(p)),
                    ("right", addr::right_delimiter(p)),
                ] {
                    if self.delimiter_is_set(at)? {
                        self.text(&format!("{indent}  {label} delimiter: "));
                        self.print_delimiter(at)?;
                        self.print_ln();
                    }
                }
                let inner = format!("{indent}  ");
                self.line(&format!("{indent}  ---- (numerator)"));
                self.subsidiary(walk, addr::supscr(p), &inner)?;
                self.line(&format!("{indent}  ---- (denominator)"));
                self.subsidiary(walk, addr::subscr(p), &inner)?;
            }
            Node::Unknown(_) => {
                self.line(&format!("{indent}[:???:]"));
                return Ok(());
            }
        }
        self.line(&format!("{indent}:]"));
        Ok(())
    }

    fn noad_header(&mut self, p: i32, kind: u8, subtype: u8, indent: &str) -> Result<(), MemoryError> {
        match kind {
            RADICAL_NOAD => {
                self.text(&format!("{indent}  delimiter: "));
                self.print_delimiter(addr::left_delimiter(p))?;
                self.print_ln();
            }
            ACCENT_NOAD => {
                self.text(&format!("{indent}  "));
                self.print_fam_and_char(addr::accent_chr(p))?;
                self.print_ln();
            }
            LEFT_NOAD => {
                self.text(&format!("{indent}  delimiter: "));
                self.print_delimiter(addr::delimiter(p))?;
                self.print_ln();
            }
            RIGHT_NOAD => {
                let side = if subtype == NORMAL { "right" } else { "middle" };
                self.line(&format!("{indent}  kind: {side}"));
                self.text(&format!("{indent}  delimiter: "));
                self.print_delimiter(addr::delimiter(p))?;
                self.print_ln();
            }
            _ => {}
        }
        Ok(())
    }

    fn delimiter_is_set(&self, p: i32) -> Result<bool, MemoryError> {
        let mem = &self.state().memory;
        Ok(mem.small_fam(p)? != 0
            || mem.small_char(p)? != 0
            || mem.large_fam(p)? != 0
            || mem.large_char(p)? != 0)
    }

    fn subsidiary(&mut self, walk: &mut Walk, p: i32, indent: &str) -> Result<(), ShowError> {
        let mem = &self.state().memory;
        match mem.math_type(p)? {
            MATH_CHAR => {
                self.line(&format!("{indent}(:MATH_CHAR"));
                self.text(&format!("{indent}  "));
                self.print_fam_and_char(p)?;
                self.print_ln();
            }
            SUB_BOX => {
                self.line(&format!("{indent}(:SUB_BOX"));
                self.sublist(walk, mem.info(p)?, indent)?;
            }
            SUB_MLIST => {
                self.line(&format!("{indent}(:SUB_MLIST"));
                let list = mem.info(p)?;
                if list != NULL {
                    self.sublist(walk, list, indent)?;
                }
            }
            MATH_EMPTY => {
                self.line(&format!("{indent}(:MATH_EMPTY"));
            }
            _ => {
                self.line(&format!("{indent}(:???:)"));
                return Ok(());
            }
        }
        self.line(&format!("{indent}:)"));
        Ok(())
    }

    fn whatsit(&mut self, p: i32, whatsit: &Whatsit, indent: &str) -> Result<(), MemoryError> {
        if let Whatsit::Unknown(subtype) = *whatsit {
            self.alert(&format!("show_node_list: What `{subtype}' is?"));
            self.line("???");
            return Ok(());
        }
        self.line(whatsit.name());
        match *whatsit {
            Whatsit::Open {
                stream,
                name,
                area,
                ext,
            } => {
                self.text(&format!("{indent}  "));
                self.print_write_whatsit("openout", stream, None);
                self.print_ln();
                self.text(&format!("{indent}  file name: \""));
                self.print_file_name(name, area, ext)?;
                self.line("\"");
            }
            Whatsit::Write {
                stream,
                mubyte,
                tokens,
            } => {
                self.text(&format!("{indent}  "));
                self.print_write_whatsit("write", stream, Some(mubyte));
                self.print_ln();
                self.token_block(&format!("{indent}  tokens (mark): "), tokens, indent, 4)?;
            }
            Whatsit::Close { stream } => {
                self.text(&format!("{indent}  "));
                self.print_write_whatsit("closeout", stream, None);
                self.print_ln();
            }
            Whatsit::Special {
                stream,
                mubyte,
                tokens,
            } => {
                if i32::from(stream) != MUBYTE_ZERO {
                    let z = i32::from(stream) - MUBYTE_ZERO;
                    self.text(&format!("{indent}  write stream: "));
                    self.print_int(z);
                    self.print_ln();
                    if z == 2 || z == 3 {
                        self.text(&format!("{indent}  mubyte: "));
                        self.print_int(i32::from(mubyte) - MUBYTE_ZERO);
                        self.print_ln();
                    }
                }
                self.token_block(&format!("{indent}  tokens (mark): "), tokens, indent, 4)?;
            }
            Whatsit::Language { lang, lhm, rhm } => {
                self.text(&format!("{indent}  language: "));
                self.print_int(lang);
                self.print_ln();
                self.text(&format!("{indent}  hyphenmin (lhm/rhm): "));
                self.print_int(i32::from(lhm));
                self.text("/");
                self.print_int(i32::from(rhm));
                self.print_ln();
            }
            Whatsit::Literal { mode, data } => {
                self.text(&format!("{indent}  pdf literal mode: "));
                match mode {
                    SET_ORIGIN => self.line("SET_ORIGIN"),
                    DIRECT_PAGE => self.line("DIRECT_PAGE"),
                    DIRECT_ALWAYS => self.line("DIRECT_ALWAYS"),
                    other => {
                        self.alert(&format!("show_node_list: Bad pdf literal mode ({other})."));
                        self.line("???");
                    }
                }
                self.token_block(&format!("{indent}  data (mark): "), data, indent, 4)?;
            }
            Whatsit::Colorstack { stack, cmd, data } => {
                self.text(&format!("{indent}  stack: "));
                self.print_int(stack);
                self.print_ln();
                self.text(&format!("{indent}  command: "));
                match cmd {
                    COLORSTACK_SET => self.line("set"),
                    COLORSTACK_PUSH => self.line("push"),
                    COLORSTACK_POP => self.line("pop"),
                    COLORSTACK_CURRENT => self.line("current"),
                    other => {
                        self.alert(&format!(
                            "show_node_list: Bad pdf colorstack command ({other})."
                        ));
                        self.line("???");
                    }
                }
                if let Some(data) = data {
                    self.token_block(&format!("{indent}  data (mark): "), data, indent, 4)?;
                }
            }
            Whatsit::Setmatrix { data } => {
                self.token_block(&format!("{indent}  data (mark): "), data, indent, 4)?;
            }
            Whatsit::RefObj { objnum } => {
                if self.obj_data(objnum, 1)? > 0 {
                    self.line(&format!("{indent}  stream:"));
                    let attr = self.obj_data(objnum, 2)?;
                    if attr != NULL {
                        let head = format!("{indent}    attribute (mark): ");
                        self.token_block(&head, attr, indent, 6)?;
                    }
                }
                if self.obj_data(objnum, 3)? > 0 {
                    self.line(&format!("{indent}  file:"));
                    let data = self.obj_data(objnum, 0)?;
                    self.token_block(&format!("{indent}    data (mark): "), data, indent, 6)?;
                }
            }
            Whatsit::RefXform { objnum } | Whatsit::RefXimage { objnum } => {
                let dims = Dims {
                    width: self.obj_data(objnum, 0)?,
                    height: self.obj_data(objnum, 1)?,
                    depth: self.obj_data(objnum, 2)?,
                };
                self.dims_line(indent, dims, false);
            }
            Whatsit::Annot { dims, data } => {
                self.dims_line(indent, dims, true);
                self.token_block(&format!("{indent}  data (mark): "), data, indent, 4)?;
            }
            Whatsit::StartLink { dims, attr, action } => {
                self.dims_line(indent, dims, true);
                if attr != NULL {
                    self.token_block(&format!("{indent}  attribute (mark): "), attr, indent, 4)?;
                }
                self.action(action, indent)?;
            }
            Whatsit::Dest {
                dims,
                kind,
                named,
                id,
                zoom,
            } => {
                self.named_or_num(named, id, indent)?;
                self.text(&format!("{indent}  type: "));
                match kind {
                    PDF_DEST_XYZ => {
                        self.text("xyz");
                        if zoom != NULL {
                            self.text(" zoom [");
                            self.print_int(zoom);
                            self.text("]");
                        }
                        self.print_ln();
                    }
                    PDF_DEST_FITBH => self.line("fitbh"),
                    PDF_DEST_FITBV => self.line("fitbv"),
                    PDF_DEST_FITB => self.line("fitb"),
                    PDF_DEST_FITH => self.line("fith"),
                    PDF_DEST_FITV => self.line("fitv"),
                    PDF_DEST_FITR => {
                        self.text("fitr {dimensions ((h + d) * w): (");
                        self.print_rule_dimen(dims.height);
                        self.text(" + ");
                        self.print_rule_dimen(dims.depth);
                        self.text(") * ");
                        self.print_rule_dimen(dims.width);
                        self.line("}");
                    }
                    PDF_DEST_FIT => self.line("fit"),
                    other => {
                        self.alert(&format!("show_node_list: Unknown pdf dest type ({other})."));
                        self.line("???");
                    }
                }
            }
            Whatsit::Thread {
                dims,
                attr,
                named,
                id,
                ..
            } => {
                self.dims_line(indent, dims, true);
                if attr != NULL {
                    self.token_block(&format!("{indent}  attribute (mark): "), attr, indent, 4)?;
                }
                self.named_or_num(named, id, indent)?;
            }
            Whatsit::Snapy { glue, skip } => {
                self.text(&format!("{indent}  glue: "));
                self.print_spec(glue, "")?;
                self.print_ln();
                self.text(&format!("{indent}  skip: "));
                self.print_spec(skip, "")?;
                self.print_ln();
            }
            Whatsit::SnapyComp { ratio } => {
                self.text(&format!("{indent}  comp ratio: "));
                self.print_int(ratio);
                self.print_ln();
            }
            Whatsit::Save
            | Whatsit::Restore
            | Whatsit::EndLink
            | Whatsit::EndThread
            | Whatsit::SavePos
            | Whatsit::SnapRefPoint
            | Whatsit::Unknown(_) => {}
        }
        Ok(())
    }

    fn named_or_num(&mut self, named: bool, id: i32, indent: &str) -> Result<(), MemoryError> {
        if named {
            self.token_block(&format!("{indent}  name (mark): "), id, indent, 4)
        } else {
            self.text(&format!("{indent}  num: "));
            self.print_int(id);
            self.print_ln();
            Ok(())
        }
    }

    fn action(&mut self, action: i32, indent: &str) -> Result<(), MemoryError> {
        let mem = &self.state().memory;
        let kind = mem.pdf_action_type(action)?;
        if kind == PDF_ACTION_USER {
            let tokens = mem.pdf_action_tokens(action)?;
            let head = format!("{indent}  action user tokens (mark): ");
            return self.token_block(&head, tokens, indent, 4);
        }
        let file = mem.pdf_action_file(action)?;
        if file != NULL {
            self.token_block(&format!("{indent}  action file (mark): "), file, indent, 4)?;
        }
        let named = mem.pdf_action_named_id(action)? > 0;
        let id = mem.pdf_action_id(action)?;
        match kind {
            PDF_ACTION_GOTO | PDF_ACTION_THREAD => {
                let target = if kind == PDF_ACTION_GOTO { "goto" } else { "thread" };
                if named {
                    let head = format!("{indent}  action {target} name (mark): ");
                    self.token_block(&head, id, indent, 4)?;
                } else {
                    self.text(&format!("{indent}  action {target} num: "));
                    self.print_int(id);
                    self.print_ln();
                }
            }
            PDF_ACTION_PAGE => {
                self.text(&format!("{indent}  action page "));
                self.print_int(id);
                let tokens = mem.pdf_action_tokens(action)?;
                self.token_block(" tokens (mark): ", tokens, indent, 4)?;
            }
            other => {
                self.alert(&format!("show_node_list: Unknown action type ({other})."));
                self.line(&format!("{indent}  action ???"));
            }
        }
        Ok(())
    }

    /// Word `k` of the PDF memory record of object `objnum`.
    fn obj_data(&self, objnum: i32, k: i32) -> Result<i32, MemoryError> {
        let pdf = &self.state().pdf;
        let aux = pdf.obj_tab.at(i64::from(objnum)).int(4).get()?;
        pdf.pdf_mem.get(i64::from(aux) + i64::from(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtscope_core::layout::{
        GLUE_NODE, KERN_NODE, PENALTY_NODE, RULE_NODE, WHATSIT_NODE, WRITE_NODE,
    };
    use fmtscope_core::TexConfig;
    use fmtscope_dump::{read_format, EngineState};
    use fmtscope_test_utils::{node_word, word_hh, word_int, FmtBuilder, RecordingHost};

    const A: i32 = 24;
    const B: i32 = 26;

    fn load(builder: FmtBuilder) -> EngineState {
        let bytes = builder.build();
        let mut host = RecordingHost::new();
        read_format(bytes.as_slice(), bytes.len() as u64, &TexConfig::new(), &mut host)
            .unwrap()
    }

    fn show(state: &EngineState, p: i32) -> (Result<(), ShowError>, RecordingHost) {
        let mut host = RecordingHost::new();
        let result = Printer::new(state, &mut host).show_node_list(p, "");
        (result, host)
    }

    #[test]
    fn two_node_cycle_is_reported_once() {
        let state = load(
            FmtBuilder::new()
                .with_free_words(4)
                .with_lo_word(A, node_word(B, PENALTY_NODE, 0))
                .with_lo_word(A + 1, word_int(100))
                .with_lo_word(B, node_word(A, PENALTY_NODE, 0))
                .with_lo_word(B + 1, word_int(-50)),
        );
        let (result, host) = show(&state, A);
        assert_eq!(result, Err(ShowError::Cycle { at: A }));
        assert_eq!(host.alerts, vec!["show_node_list: node 24 was already shown.".to_string()]);
        let text = host.log_text();
        assert_eq!(text.matches("[:PENALTY_NODE").count(), 2);
        assert!(text.contains("  value: 100\n"));
        assert!(text.contains("  value: -50\n"));
    }

    #[test]
    fn mark_pointing_into_low_memory_is_clobbered() {
        let state = load(
            FmtBuilder::new()
                .with_free_words(4)
                .with_lo_word(A, node_word(NULL, WHATSIT_NODE, WRITE_NODE))
                .with_lo_word(A + 1, word_hh(B, 0)),
        );
        let (result, host) = show(&state, A);
        assert_eq!(result, Ok(()));
        assert!(host.log_text().contains("  tokens (mark): CLOBBERED.\n"));

        let mut host = RecordingHost::new();
        Printer::new(&state, &mut host)
            .show_token_list(B, "", TOKEN_LIMIT)
            .unwrap();
        assert_eq!(host.log_text(), "CLOBERRED.\n");
    }

    #[test]
    fn rules_and_kerns_print_as_blocks() {
        let state = load(
            FmtBuilder::new()
                .with_free_words(4)
                .with_lo_word(A, node_word(A + 4, RULE_NODE, 0))
                .with_lo_word(A + 1, word_int(UNITY))
                .with_lo_word(A + 2, word_int(UNITY / 2))
                .with_lo_word(A + 3, word_int(fmtscope_core::layout::NULL_FLAG))
                .with_lo_word(A + 4, node_word(NULL, KERN_NODE, ACC_KERN))
                .with_lo_word(A + 5, word_int(3 * UNITY)),
        );
        let (result, host) = show(&state, A);
        assert_eq!(result, Ok(()));
        assert_eq!(
            host.log_text(),
            "[:RULE_NODE\n\
             \x20 dimensions ((h + d) * w): (<running dimension> + 0.5) * 1.0\n\
             :]\n\
             [:KERN_NODE\n\
             \x20 kern (for accent): 3.0\n\
             :]\n"
        );
    }

    #[test]
    fn unknown_types_get_a_placeholder() {
        let state = load(
            FmtBuilder::new()
                .with_free_words(4)
                .with_lo_word(A, node_word(NULL, 77, 0)),
        );
        let (result, host) = show(&state, A);
        assert_eq!(result, Ok(()));
        assert_eq!(host.log_text(), "[:???:]\n");
        assert!(host.alerts.is_empty());
    }

    #[test]
    fn addresses_past_mem_end_abort_the_walk() {
        let state = load(FmtBuilder::new().with_free_words(4));
        let beyond = state.memory.mem_end + 1;
        let (result, host) = show(&state, beyond);
        assert!(matches!(result, Err(ShowError::BeyondMemEnd { .. })));
        assert_eq!(host.alerts.len(), 1);
    }

    #[test]
    fn leaders_pointing_back_at_their_glue_are_a_cycle() {
        let state = load(
            FmtBuilder::new()
                .with_free_words(4)
                .with_lo_word(A, node_word(NULL, GLUE_NODE, A_LEADERS))
                .with_lo_word(A + 1, fmtscope_test_utils::word_hh(A, NULL)),
        );
        let (result, _) = show(&state, A);
        assert_eq!(result, Err(ShowError::Cycle { at: A }));
    }
}
