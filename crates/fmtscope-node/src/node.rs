//! Typed view of a single node in main memory.
//!
//! [`Node::decode`] reads every field the printer shows for the node at an
//! address and returns a closed sum type. Nothing here follows links; the
//! addresses of sublists and token lists are carried as plain integers.

use fmtscope_arena::MemoryError;
use fmtscope_core::layout::{
    ACCENT_NOAD, ADJUST_NODE, BIN_NOAD, CHOICE_NODE, CLOSE_NODE, CLOSE_NOAD, COLORSTACK_DATA,
    DISC_NODE, FRACTION_NOAD, GLUE_NODE, HLIST_NODE, INNER_NOAD, INS_NODE, KERN_NODE,
    LANGUAGE_NODE, LEFT_NOAD, LIGATURE_NODE, MARGIN_KERN_NODE, MARK_NODE, MATH_NODE, OPEN_NODE,
    OPEN_NOAD, OP_NOAD, ORD_NOAD, OVER_NOAD, PDF_ANNOT_NODE, PDF_COLORSTACK_NODE,
    PDF_DEST_NODE, PDF_END_LINK_NODE, PDF_END_THREAD_NODE, PDF_LITERAL_NODE, PDF_REFOBJ_NODE,
    PDF_REFXFORM_NODE, PDF_REFXIMAGE_NODE, PDF_RESTORE_NODE, PDF_SAVE_NODE, PDF_SAVE_POS_NODE,
    PDF_SETMATRIX_NODE, PDF_SNAPY_COMP_NODE, PDF_SNAPY_NODE, PDF_SNAP_REF_POINT_NODE,
    PDF_START_LINK_NODE, PDF_START_THREAD_NODE, PDF_THREAD_NODE, PENALTY_NODE, PUNCT_NOAD,
    RADICAL_NOAD, REL_NOAD, RIGHT_NOAD, RULE_NODE, SPECIAL_NODE, STYLE_NODE, UNDER_NOAD,
    UNSET_NODE, VCENTER_NOAD, VLIST_NODE, WHATSIT_NODE, WRITE_NODE,
};
use fmtscope_dump::{EngineState, Memory};

/// Height, depth and width of a box, rule or PDF object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dims {
    /// Height above the baseline.
    pub height: i32,
    /// Depth below the baseline.
    pub depth: i32,
    /// Width.
    pub width: i32,
}

impl Dims {
    fn of_box(mem: &Memory, p: i32) -> Result<Self, MemoryError> {
        Ok(Self {
            height: mem.height(p)?,
            depth: mem.depth(p)?,
            width: mem.width(p)?,
        })
    }

    fn of_pdf(mem: &Memory, p: i32) -> Result<Self, MemoryError> {
        Ok(Self {
            height: mem.pdf_height(p)?,
            depth: mem.pdf_depth(p)?,
            width: mem.pdf_width(p)?,
        })
    }
}

/// Direction of a packaged box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxKind {
    /// `\hbox`.
    Hlist,
    /// `\vbox`.
    Vlist,
}

/// A decoded node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node {
    /// A character in a font.
    Char {
        /// Font number.
        font: u8,
        /// Character code.
        character: u8,
    },
    /// A packaged box.
    Box {
        /// Horizontal or vertical.
        kind: BoxKind,
        /// Box dimensions.
        dims: Dims,
        /// Shift perpendicular to the list direction.
        shift: i32,
        /// First node of the contents.
        list: i32,
        /// Stretching, shrinking or normal.
        glue_sign: u8,
        /// Infinity order of the glue setting.
        glue_order: u8,
        /// Glue set ratio.
        glue_set: f64,
        /// eTeX direction subtype.
        subtype: u8,
    },
    /// An alignment entry that has not been packaged yet.
    Unset {
        /// Natural dimensions.
        dims: Dims,
        /// First node of the contents.
        list: i32,
        /// Extra columns spanned.
        span_count: u8,
        /// Total stretch.
        stretch: i32,
        /// Total shrink.
        shrink: i32,
        /// Order of the stretch.
        glue_order: u8,
        /// Order of the shrink.
        glue_sign: u8,
    },
    /// A rule.
    Rule(Dims),
    /// An insertion.
    Ins {
        /// Insertion class.
        number: u8,
        /// Natural height plus depth.
        height: i32,
        /// Depth of the last box.
        depth: i32,
        /// `\splittopskip` specification.
        split_top: i32,
        /// `\floatingpenalty`.
        float_cost: i32,
        /// Inserted material.
        list: i32,
    },
    /// A mark.
    Mark {
        /// eTeX mark class.
        class: i32,
        /// Token list reference.
        tokens: i32,
    },
    /// Vertical material migrating out of a paragraph.
    Adjust {
        /// Non-zero for `\vadjust pre`.
        pre: u8,
        /// Adjusted material.
        list: i32,
    },
    /// A ligature; its font and character live in the next word.
    Ligature {
        /// Boundary flags.
        subtype: u8,
        /// Original characters.
        chars: i32,
    },
    /// A discretionary break.
    Disc {
        /// Nodes replaced when breaking here.
        replace_count: u8,
        /// Material before the break.
        pre_break: i32,
        /// Material after the break.
        post_break: i32,
    },
    /// An extension node.
    Whatsit(Whatsit),
    /// Math on, math off or a TeX--XeT direction marker.
    Math {
        /// Kind of marker.
        subtype: u8,
        /// `\mathsurround`.
        width: i32,
    },
    /// Glue or leaders.
    Glue {
        /// Parameter number plus one, or a leader/math code.
        subtype: u8,
        /// Glue specification.
        spec: i32,
        /// Leader box or rule.
        leader: i32,
    },
    /// A kern.
    Kern {
        /// Normal, explicit, accent or math kern.
        subtype: u8,
        /// Kern amount.
        width: i32,
    },
    /// A margin kern from character protrusion.
    MarginKern {
        /// Left or right margin.
        side: u8,
        /// Kern amount.
        width: i32,
    },
    /// A penalty.
    Penalty(i32),
    /// A style change inside an mlist.
    Style(u8),
    /// `\mathchoice`.
    Choice {
        /// Display branch.
        display: i32,
        /// Text branch.
        text: i32,
        /// Script branch.
        script: i32,
        /// Scriptscript branch.
        script_script: i32,
    },
    /// One of the fifteen ordinary noad kinds; fields are read by address.
    Noad {
        /// Noad type.
        kind: u8,
        /// Limits convention or left/middle flag.
        subtype: u8,
    },
    /// A generalized fraction; delimiters and operands are read by address.
    Fraction {
        /// Rule thickness, or `DEFAULT_CODE`.
        thickness: i32,
    },
    /// A type code nothing recognises.
    Unknown(u8),
}

/// A decoded extension node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Whatsit {
    /// `\openout`.
    Open {
        /// Stream number.
        stream: u8,
        /// File name string.
        name: i32,
        /// Area string.
        area: i32,
        /// Extension string.
        ext: i32,
    },
    /// `\write`.
    Write {
        /// Stream number.
        stream: u8,
        /// encTeX `\mubyte` setting.
        mubyte: u8,
        /// Token list reference.
        tokens: i32,
    },
    /// `\closeout`.
    Close {
        /// Stream number.
        stream: u8,
    },
    /// `\special`.
    Special {
        /// encTeX stream setting.
        stream: u8,
        /// encTeX `\mubyte` setting.
        mubyte: u8,
        /// Token list reference.
        tokens: i32,
    },
    /// Language change.
    Language {
        /// Language number.
        lang: i32,
        /// `\lefthyphenmin`.
        lhm: u8,
        /// `\righthyphenmin`.
        rhm: u8,
    },
    /// `\pdfliteral`.
    Literal {
        /// Placement mode.
        mode: i32,
        /// Token list reference.
        data: i32,
    },
    /// `\pdfcolorstack`.
    Colorstack {
        /// Stack number.
        stack: i32,
        /// Stack operation.
        cmd: i32,
        /// Token list reference, for operations that carry data.
        data: Option<i32>,
    },
    /// `\pdfsetmatrix`.
    Setmatrix {
        /// Token list reference.
        data: i32,
    },
    /// `\pdfsave`.
    Save,
    /// `\pdfrestore`.
    Restore,
    /// `\pdfrefobj`.
    RefObj {
        /// Object number.
        objnum: i32,
    },
    /// `\pdfrefxform`.
    RefXform {
        /// Object number.
        objnum: i32,
    },
    /// `\pdfrefximage`.
    RefXimage {
        /// Object number.
        objnum: i32,
    },
    /// `\pdfannot`.
    Annot {
        /// Annotation rectangle.
        dims: Dims,
        /// Token list reference.
        data: i32,
    },
    /// `\pdfstartlink`.
    StartLink {
        /// Link rectangle.
        dims: Dims,
        /// Attribute token list reference, or null.
        attr: i32,
        /// Action record.
        action: i32,
    },
    /// `\pdfendlink`.
    EndLink,
    /// `\pdfdest`.
    Dest {
        /// Destination rectangle for `fitr`.
        dims: Dims,
        /// Destination kind.
        kind: u8,
        /// Whether `id` is a name token list.
        named: bool,
        /// Name token list or number.
        id: i32,
        /// Zoom of an `xyz` destination, or null.
        zoom: i32,
    },
    /// `\pdfthread` or `\pdfstartthread`.
    Thread {
        /// `\pdfstartthread`.
        start: bool,
        /// Thread rectangle.
        dims: Dims,
        /// Attribute token list reference, or null.
        attr: i32,
        /// Whether `id` is a name token list.
        named: bool,
        /// Name token list or number.
        id: i32,
    },
    /// `\pdfendthread`.
    EndThread,
    /// `\pdfsavepos`.
    SavePos,
    /// `\pdfsnaprefpoint`.
    SnapRefPoint,
    /// `\pdfsnapy`.
    Snapy {
        /// Snapping glue.
        glue: i32,
        /// Final skip.
        skip: i32,
    },
    /// `\pdfsnapycomp`.
    SnapyComp {
        /// Compensation ratio.
        ratio: i32,
    },
    /// A subtype nothing recognises.
    Unknown(u8),
}

impl Node {
    /// Decode the node at `p`.
    pub fn decode(state: &EngineState, p: i32) -> Result<Self, MemoryError> {
        let mem = &state.memory;
        if mem.is_char_node(p) {
            return Ok(Self::Char {
                font: mem.font(p)?,
                character: mem.character(p)?,
            });
        }
        let kind = mem.node_type(p)?;
        let node = match kind {
            HLIST_NODE | VLIST_NODE => Self::Box {
                kind: if kind == HLIST_NODE {
                    BoxKind::Hlist
                } else {
                    BoxKind::Vlist
                },
                dims: Dims::of_box(mem, p)?,
                shift: mem.shift_amount(p)?,
                list: mem.list_ptr(p)?,
                glue_sign: mem.glue_sign(p)?,
                glue_order: mem.glue_order(p)?,
                glue_set: mem.glue_set(p)?,
                subtype: mem.subtype(p)?,
            },
            UNSET_NODE => Self::Unset {
                dims: Dims::of_box(mem, p)?,
                list: mem.list_ptr(p)?,
                span_count: mem.span_count(p)?,
                stretch: mem.glue_stretch(p)?,
                shrink: mem.glue_shrink(p)?,
                glue_order: mem.glue_order(p)?,
                glue_sign: mem.glue_sign(p)?,
            },
            RULE_NODE => Self::Rule(Dims::of_box(mem, p)?),
            INS_NODE => Self::Ins {
                number: mem.subtype(p)?,
                height: mem.height(p)?,
                depth: mem.depth(p)?,
                split_top: mem.split_top_ptr(p)?,
                float_cost: mem.float_cost(p)?,
                list: mem.ins_ptr(p)?,
            },
            MARK_NODE => Self::Mark {
                class: mem.mark_class(p)?,
                tokens: mem.mark_ptr(p)?,
            },
            ADJUST_NODE => Self::Adjust {
                pre: mem.adjust_pre(p)?,
                list: mem.adjust_ptr(p)?,
            },
            LIGATURE_NODE => Self::Ligature {
                subtype: mem.subtype(p)?,
                chars: mem.lig_ptr(p)?,
            },
            DISC_NODE => Self::Disc {
                replace_count: mem.replace_count(p)?,
                pre_break: mem.pre_break(p)?,
                post_break: mem.post_break(p)?,
            },
            WHATSIT_NODE => Self::Whatsit(Whatsit::decode(mem, p)?),
            MATH_NODE => Self::Math {
                subtype: mem.subtype(p)?,
                width: mem.width(p)?,
            },
            GLUE_NODE => Self::Glue {
                subtype: mem.subtype(p)?,
                spec: mem.glue_ptr(p)?,
                leader: mem.leader_ptr(p)?,
            },
            KERN_NODE => Self::Kern {
                subtype: mem.subtype(p)?,
                width: mem.width(p)?,
            },
            MARGIN_KERN_NODE => Self::MarginKern {
                side: mem.subtype(p)?,
                width: mem.width(p)?,
            },
            PENALTY_NODE => Self::Penalty(mem.penalty(p)?),
            STYLE_NODE => Self::Style(mem.subtype(p)?),
            CHOICE_NODE => Self::Choice {
                display: mem.display_mlist(p)?,
                text: mem.text_mlist(p)?,
                script: mem.script_mlist(p)?,
                script_script: mem.script_script_mlist(p)?,
            },
            ORD_NOAD | OP_NOAD | BIN_NOAD | REL_NOAD | OPEN_NOAD | CLOSE_NOAD | PUNCT_NOAD
            | INNER_NOAD | RADICAL_NOAD | OVER_NOAD | UNDER_NOAD | VCENTER_NOAD
            | ACCENT_NOAD | LEFT_NOAD | RIGHT_NOAD => Self::Noad {
                kind,
                subtype: mem.subtype(p)?,
            },
            FRACTION_NOAD => Self::Fraction {
                thickness: mem.thickness(p)?,
            },
            other => Self::Unknown(other),
        };
        Ok(node)
    }

    /// Block label, such as `GLUE_NODE`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Char { .. } => "CHAR_NODE",
            Self::Box {
                kind: BoxKind::Hlist,
                ..
            } => "HLIST_NODE",
            Self::Box {
                kind: BoxKind::Vlist,
                ..
            } => "VLIST_NODE",
            Self::Unset { .. } => "UNSET_NODE",
            Self::Rule(_) => "RULE_NODE",
            Self::Ins { .. } => "INS_NODE",
            Self::Mark { .. } => "MARK_NODE",
            Self::Adjust { .. } => "ADJUST_NODE",
            Self::Ligature { .. } => "LIGATURE_NODE",
            Self::Disc { .. } => "DISC_NODE",
            Self::Whatsit(_) => "WHATSIT_NODE",
            Self::Math { .. } => "MATH_NODE",
            Self::Glue { .. } => "GLUE_NODE",
            Self::Kern { .. } => "KERN_NODE",
            Self::MarginKern { .. } => "MARGIN_KERN_NODE",
            Self::Penalty(_) => "PENALTY_NODE",
            Self::Style(_) => "STYLE_NODE",
            Self::Choice { .. } => "CHOICE_NODE",
            Self::Noad { kind, .. } => noad_name(*kind),
            Self::Fraction { .. } => "FRACTION_NOAD",
            Self::Unknown(_) => "???",
        }
    }
}

fn noad_name(kind: u8) -> &'static str {
    match kind {
        ORD_NOAD => "ORD_NOAD",
        OP_NOAD => "OP_NOAD",
        BIN_NOAD => "BIN_NOAD",
        REL_NOAD => "REL_NOAD",
        OPEN_NOAD => "OPEN_NOAD",
        CLOSE_NOAD => "CLOSE_NOAD",
        PUNCT_NOAD => "PUNCT_NOAD",
        INNER_NOAD => "INNER_NOAD",
        RADICAL_NOAD => "RADICAL_NOAD",
        OVER_NOAD => "OVER_NOAD",
        UNDER_NOAD => "UNDER_NOAD",
        VCENTER_NOAD => "VCENTER_NOAD",
        ACCENT_NOAD => "ACCENT_NOAD",
        LEFT_NOAD => "LEFT_NOAD",
        RIGHT_NOAD => "RIGHT_NOAD",
        _ => "???",
    }
}

impl Whatsit {
    /// Decode the extension node at `p`.
    pub fn decode(mem: &Memory, p: i32) -> Result<Self, MemoryError> {
        let subtype = mem.subtype(p)?;
        let whatsit = match subtype {
            OPEN_NODE => Self::Open {
                stream: mem.write_stream(p)?,
                name: mem.open_name(p)?,
                area: mem.open_area(p)?,
                ext: mem.open_ext(p)?,
            },
            WRITE_NODE => Self::Write {
                stream: mem.write_stream(p)?,
                mubyte: mem.write_mubyte(p)?,
                tokens: mem.write_tokens(p)?,
            },
            CLOSE_NODE => Self::Close {
                stream: mem.write_stream(p)?,
            },
            SPECIAL_NODE => Self::Special {
                stream: mem.write_stream(p)?,
                mubyte: mem.write_mubyte(p)?,
                tokens: mem.write_tokens(p)?,
            },
            LANGUAGE_NODE => Self::Language {
                lang: mem.what_lang(p)?,
                lhm: mem.what_lhm(p)?,
                rhm: mem.what_rhm(p)?,
            },
            PDF_LITERAL_NODE => Self::Literal {
                mode: mem.pdf_literal_mode(p)?,
                data: mem.pdf_literal_data(p)?,
            },
            PDF_COLORSTACK_NODE => {
                let cmd = mem.pdf_colorstack_cmd(p)?;
                Self::Colorstack {
                    stack: mem.pdf_colorstack_stack(p)?,
                    cmd,
                    data: if cmd <= COLORSTACK_DATA {
                        Some(mem.pdf_colorstack_data(p)?)
                    } else {
                        None
                    },
                }
            }
            PDF_SETMATRIX_NODE => Self::Setmatrix {
                data: mem.pdf_setmatrix_data(p)?,
            },
            PDF_SAVE_NODE => Self::Save,
            PDF_RESTORE_NODE => Self::Restore,
            PDF_REFOBJ_NODE => Self::RefObj {
                objnum: mem.pdf_obj_objnum(p)?,
            },
            PDF_REFXFORM_NODE => Self::RefXform {
                objnum: mem.pdf_xform_objnum(p)?,
            },
            PDF_REFXIMAGE_NODE => Self::RefXimage {
                objnum: mem.pdf_ximage_objnum(p)?,
            },
            PDF_ANNOT_NODE => Self::Annot {
                dims: Dims::of_pdf(mem, p)?,
                data: mem.pdf_annot_data(p)?,
            },
            PDF_START_LINK_NODE => Self::StartLink {
                dims: Dims::of_pdf(mem, p)?,
                attr: mem.pdf_link_attr(p)?,
                action: mem.pdf_link_action(p)?,
            },
            PDF_END_LINK_NODE => Self::EndLink,
            PDF_DEST_NODE => Self::Dest {
                dims: Dims::of_pdf(mem, p)?,
                kind: mem.pdf_dest_type(p)?,
                named: mem.pdf_dest_named_id(p)? > 0,
                id: mem.pdf_dest_id(p)?,
                zoom: mem.pdf_dest_xyz_zoom(p)?,
            },
            PDF_THREAD_NODE | PDF_START_THREAD_NODE => Self::Thread {
                start: subtype == PDF_START_THREAD_NODE,
                dims: Dims::of_pdf(mem, p)?,
                attr: mem.pdf_thread_attr(p)?,
                named: mem.pdf_thread_named_id(p)? > 0,
                id: mem.pdf_thread_id(p)?,
            },
            PDF_END_THREAD_NODE => Self::EndThread,
            PDF_SAVE_POS_NODE => Self::SavePos,
            PDF_SNAP_REF_POINT_NODE => Self::SnapRefPoint,
            PDF_SNAPY_NODE => Self::Snapy {
                glue: mem.snap_glue_ptr(p)?,
                skip: mem.final_skip(p)?,
            },
            PDF_SNAPY_COMP_NODE => Self::SnapyComp {
                ratio: mem.snapy_comp_ratio(p)?,
            },
            other => Self::Unknown(other),
        };
        Ok(whatsit)
    }

    /// Label appended to `WHATSIT_NODE`, such as `OPEN_NODE`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "OPEN_NODE",
            Self::Write { .. } => "WRITE_NODE",
            Self::Close { .. } => "CLOSE_NODE",
            Self::Special { .. } => "SPECIAL_NODE",
            Self::Language { .. } => "LANGUAGE_NODE",
            Self::Literal { .. } => "PDF_LITERAL_NODE",
            Self::Colorstack { .. } => "PDF_COLORSTACK_NODE",
            Self::Setmatrix { .. } => "PDF_SETMATRIX_NODE",
            Self::Save => "PDF_SAVE_NODE",
            Self::Restore => "PDF_RESTORE_NODE",
            Self::RefObj { .. } => "PDF_REFOBJ_NODE",
            Self::RefXform { .. } => "PDF_REFXFORM_NODE",
            Self::RefXimage { .. } => "PDF_REFXIMAGE_NODE",
            Self::Annot { .. } => "PDF_ANNOT_NODE",
            Self::StartLink { .. } => "PDF_START_LINK_NODE",
            Self::EndLink => "PDF_END_LINK_NODE",
            Self::Dest { .. } => "PDF_DEST_NODE",
            Self::Thread { start: false, .. } => "PDF_THREAD_NODE",
            Self::Thread { start: true, .. } => "PDF_START_THREAD_NODE",
            Self::EndThread => "PDF_END_THREAD_NODE",
            Self::SavePos => "PDF_SAVE_POS_NODE",
            Self::SnapRefPoint => "PDF_SNAP_REF_POINT_NODE",
            Self::Snapy { .. } => "PDF_SNAPY_NODE",
            Self::SnapyComp { .. } => "PDF_SNAPY_COMP_NODE",
            Self::Unknown(_) => "???",
        }
    }
}
