//! Named fields of main memory, eqtb, hash and font records.
//!
//! Every accessor is offset arithmetic over the state's tables; an address
//! outside an allocated table is a [`MemoryError`], never a panic.

use fmtscope_arena::{Arena, Cell, MemoryError, MemoryWord};
use fmtscope_core::layout::{
    COUNT_BASE, DEL_CODE_BASE, DIMEN_BASE, FONT_ID_BASE, INT_BASE, SCALED_BASE,
};

use crate::state::{Equivalents, Fonts, Memory};

/// Defines `pub fn name(&self, p) -> Result<ty, MemoryError>` as a base
/// accessor applied to `p + delta`.
macro_rules! node_fields {
    ($($(#[$doc:meta])* $name:ident -> $ty:ty = $base:ident(+$delta:literal);)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, p: i32) -> Result<$ty, MemoryError> {
                self.$base(p.saturating_add($delta))
            }
        )*
    };
}

impl Memory {
    /// The word at address `p`.
    pub fn word(&self, p: i32) -> Cell<&Arena, MemoryWord> {
        self.mem.at(i64::from(p))
    }

    /// Whether `p` is a one-word character node.
    pub fn is_char_node(&self, p: i32) -> bool {
        p >= self.hi_mem_min
    }

    /// Right halfword of `p`: the next node.
    pub fn link(&self, p: i32) -> Result<i32, MemoryError> {
        self.word(p).hh().rh().get()
    }

    /// Left halfword of `p`.
    pub fn info(&self, p: i32) -> Result<i32, MemoryError> {
        self.word(p).hh().lh().get()
    }

    /// Node type quarterword.
    pub fn node_type(&self, p: i32) -> Result<u8, MemoryError> {
        self.word(p).hh().b0().get()
    }

    /// Node subtype quarterword.
    pub fn subtype(&self, p: i32) -> Result<u8, MemoryError> {
        self.word(p).hh().b1().get()
    }

    /// Whole word as an integer.
    pub fn int(&self, p: i32) -> Result<i32, MemoryError> {
        self.word(p).int().get()
    }

    /// Whole word as a scaled value.
    pub fn sc(&self, p: i32) -> Result<i32, MemoryError> {
        self.word(p).sc().get()
    }

    /// Whole word as a glue ratio.
    pub fn gr(&self, p: i32) -> Result<f64, MemoryError> {
        self.word(p).gr().get()
    }

    /// Quarterword `k` (0..=3) of the four-quarter view of `p`.
    pub fn quarter(&self, p: i32, k: u8) -> Result<u8, MemoryError> {
        let q = self.word(p).qqqq();
        match k {
            0 => q.b0().get(),
            1 => q.b1().get(),
            2 => q.b2().get(),
            _ => q.b3().get(),
        }
    }

    /// Set the right halfword of `p`.
    pub fn set_link(&mut self, p: i32, value: i32) -> Result<(), MemoryError> {
        self.mem.at_mut(i64::from(p)).hh().rh().set(value)
    }

    /// Set the left halfword of `p`.
    pub fn set_info(&mut self, p: i32, value: i32) -> Result<(), MemoryError> {
        self.mem.at_mut(i64::from(p)).hh().lh().set(value)
    }

    /// Set the size of free block `p`.
    pub fn set_node_size(&mut self, p: i32, value: i32) -> Result<(), MemoryError> {
        self.set_info(p, value)
    }

    /// Set the backward ring link of free block `p`.
    pub fn set_llink(&mut self, p: i32, value: i32) -> Result<(), MemoryError> {
        self.set_info(p + 1, value)
    }

    /// Set the forward ring link of free block `p`.
    pub fn set_rlink(&mut self, p: i32, value: i32) -> Result<(), MemoryError> {
        self.set_link(p + 1, value)
    }

    node_fields! {
        /// Size of free block `p`.
        node_size -> i32 = info(+0);
        /// Backward ring link of free block `p`.
        llink -> i32 = info(+1);
        /// Forward ring link of free block `p`.
        rlink -> i32 = link(+1);

        /// Box width.
        width -> i32 = sc(+1);
        /// Box depth.
        depth -> i32 = sc(+2);
        /// Box height.
        height -> i32 = sc(+3);
        /// Box shift.
        shift_amount -> i32 = sc(+4);
        /// Box contents.
        list_ptr -> i32 = link(+5);
        /// Order of the glue setting.
        glue_order -> u8 = subtype(+5);
        /// Sign of the glue setting.
        glue_sign -> u8 = node_type(+5);
        /// Glue set ratio.
        glue_set -> f64 = gr(+6);

        /// Font of a character node.
        font -> u8 = node_type(+0);
        /// Character of a character node.
        character -> u8 = subtype(+0);

        /// Penalty of splitting an insertion.
        float_cost -> i32 = int(+1);
        /// Insertion contents.
        ins_ptr -> i32 = info(+4);
        /// Glue at the top of a split insertion.
        split_top_ptr -> i32 = link(+4);

        /// Token list of a mark.
        mark_ptr -> i32 = link(+1);
        /// eTeX mark class.
        mark_class -> i32 = info(+1);
        /// Contents of an adjustment.
        adjust_ptr -> i32 = int(+1);
        /// Whether an adjustment migrates before the line.
        adjust_pre -> u8 = subtype(+0);

        /// Original characters of a ligature.
        lig_ptr -> i32 = link(+1);
        /// Nodes replaced by a discretionary.
        replace_count -> u8 = subtype(+0);
        /// Pre-break list of a discretionary.
        pre_break -> i32 = info(+1);
        /// Post-break list of a discretionary.
        post_break -> i32 = link(+1);

        /// Glue specification of a glue node.
        glue_ptr -> i32 = info(+1);
        /// Leader box or rule of a glue node.
        leader_ptr -> i32 = link(+1);
        /// Glue specification reference count.
        glue_ref_count -> i32 = link(+0);
        /// Stretch of a glue specification.
        stretch -> i32 = sc(+2);
        /// Shrink of a glue specification.
        shrink -> i32 = sc(+3);
        /// Stretch order of a glue specification.
        stretch_order -> u8 = node_type(+0);
        /// Shrink order of a glue specification.
        shrink_order -> u8 = subtype(+0);

        /// Protruded character of a margin kern.
        margin_char -> i32 = info(+2);
        /// Penalty value.
        penalty -> i32 = int(+1);
        /// Total stretch of an unset node.
        glue_stretch -> i32 = sc(+6);
        /// Total shrink of an unset node.
        glue_shrink -> i32 = sc(+4);
        /// Columns spanned by an unset node.
        span_count -> u8 = subtype(+0);

        /// Width of a PDF object node.
        pdf_width -> i32 = sc(+1);
        /// Height of a PDF object node.
        pdf_height -> i32 = sc(+2);
        /// Depth of a PDF object node.
        pdf_depth -> i32 = sc(+3);
        /// Token list of a literal.
        pdf_literal_data -> i32 = link(+1);
        /// Placement mode of a literal.
        pdf_literal_mode -> i32 = info(+1);
        /// Color stack number.
        pdf_colorstack_stack -> i32 = link(+1);
        /// Color stack command.
        pdf_colorstack_cmd -> i32 = info(+1);
        /// Color stack data.
        pdf_colorstack_data -> i32 = link(+2);
        /// Matrix data.
        pdf_setmatrix_data -> i32 = link(+1);
        /// Object number of `\pdfrefobj`.
        pdf_obj_objnum -> i32 = info(+1);
        /// Object number of `\pdfrefxform`.
        pdf_xform_objnum -> i32 = info(+4);
        /// Object number of `\pdfrefximage`.
        pdf_ximage_objnum -> i32 = info(+4);
        /// Annotation contents.
        pdf_annot_data -> i32 = info(+5);
        /// Link attributes.
        pdf_link_attr -> i32 = info(+5);
        /// Link action.
        pdf_link_action -> i32 = link(+5);
        /// Annotation object number.
        pdf_annot_objnum -> i32 = int(+6);
        /// Link object number.
        pdf_link_objnum -> i32 = int(+6);

        /// Action kind.
        pdf_action_type -> u8 = node_type(+0);
        /// Whether the action target is named.
        pdf_action_named_id -> u8 = subtype(+0);
        /// Action target.
        pdf_action_id -> i32 = link(+0);
        /// Action file.
        pdf_action_file -> i32 = info(+1);
        /// Action new-window flag.
        pdf_action_new_window -> i32 = link(+1);
        /// Action page tokens.
        pdf_action_tokens -> i32 = info(+2);

        /// Destination kind.
        pdf_dest_type -> u8 = node_type(+5);
        /// Whether the destination is named.
        pdf_dest_named_id -> u8 = subtype(+5);
        /// Destination identifier.
        pdf_dest_id -> i32 = link(+5);
        /// Zoom of an `/XYZ` destination.
        pdf_dest_xyz_zoom -> i32 = info(+6);
        /// Destination object number.
        pdf_dest_objnum -> i32 = link(+6);
        /// Whether the thread is named.
        pdf_thread_named_id -> u8 = subtype(+5);
        /// Thread identifier.
        pdf_thread_id -> i32 = link(+5);
        /// Thread attributes.
        pdf_thread_attr -> i32 = info(+6);

        /// Glue of a snap node.
        snap_glue_ptr -> i32 = info(+1);
        /// Final skip of a snap node.
        final_skip -> i32 = sc(+2);
        /// Compensation ratio of a snap-y node.
        snapy_comp_ratio -> i32 = int(+1);

        /// Kind of a noad field.
        math_type -> i32 = link(+0);
        /// Family of a noad field.
        fam -> u8 = node_type(+0);
        /// Fraction rule thickness.
        thickness -> i32 = sc(+1);
        /// Display branch of a choice node.
        display_mlist -> i32 = info(+1);
        /// Text branch of a choice node.
        text_mlist -> i32 = link(+1);
        /// Script branch of a choice node.
        script_mlist -> i32 = info(+2);
        /// Scriptscript branch of a choice node.
        script_script_mlist -> i32 = link(+2);

        /// Fitness class of an active node.
        fitness -> u8 = subtype(+0);
        /// Passive node of an active node.
        break_node -> i32 = link(+1);
        /// Line number of an active node.
        line_number -> i32 = info(+1);
        /// Total demerits of an active node.
        total_demerits -> i32 = int(+2);
        /// Break position of a passive node.
        cur_break -> i32 = link(+1);
        /// Previous passive node.
        prev_break -> i32 = info(+1);
        /// Serial number of a passive node.
        serial -> i32 = info(+0);
        /// Active short of an active node.
        active_short -> i32 = sc(+3);
        /// Active glue of an active node.
        active_glue -> i32 = sc(+4);

        /// Last node of a split page insertion.
        broken_ptr -> i32 = link(+1);
        /// Insertion that was split.
        broken_ins -> i32 = info(+1);
        /// Last insertion of a page insertion class.
        last_ins_ptr -> i32 = link(+2);
        /// Best insertion break.
        best_ins_ptr -> i32 = info(+2);

        /// Language of a language whatsit.
        what_lang -> i32 = link(+1);
        /// Left hyphen minimum.
        what_lhm -> u8 = node_type(+1);
        /// Right hyphen minimum.
        what_rhm -> u8 = subtype(+1);
        /// Token list of a write whatsit.
        write_tokens -> i32 = link(+1);
        /// Stream of a write whatsit.
        write_stream -> u8 = node_type(+1);
        /// encTeX `\mubyte` setting of a write whatsit.
        write_mubyte -> u8 = subtype(+1);
        /// File name of an open whatsit.
        open_name -> i32 = link(+1);
        /// File area of an open whatsit.
        open_area -> i32 = info(+2);
        /// File extension of an open whatsit.
        open_ext -> i32 = link(+2);

        /// Template u-part.
        u_part -> i32 = int(+3);
        /// Template v-part.
        v_part -> i32 = int(+2);
        /// Alignment extra information.
        extra_info -> i32 = info(+5);

        /// Sparse array node index.
        sa_index -> u8 = node_type(+0);
        /// Sparse array node use count.
        sa_used -> u8 = subtype(+0);
        /// Sparse array reference count.
        sa_ref -> i32 = info(+1);
        /// Sparse array value pointer.
        sa_ptr -> i32 = link(+1);
        /// Sparse array integer value.
        sa_int -> i32 = int(+2);
    }

    /// Family of a delimiter field's small variant.
    pub fn small_fam(&self, p: i32) -> Result<u8, MemoryError> {
        self.quarter(p, 0)
    }

    /// Character of a delimiter field's small variant.
    pub fn small_char(&self, p: i32) -> Result<u8, MemoryError> {
        self.quarter(p, 1)
    }

    /// Family of a delimiter field's large variant.
    pub fn large_fam(&self, p: i32) -> Result<u8, MemoryError> {
        self.quarter(p, 2)
    }

    /// Character of a delimiter field's large variant.
    pub fn large_char(&self, p: i32) -> Result<u8, MemoryError> {
        self.quarter(p, 3)
    }
}

/// Address helpers that are pure arithmetic.
pub mod addr {
    /// Character field of a ligature.
    pub fn lig_char(p: i32) -> i32 {
        p + 1
    }

    /// Nucleus field of a noad.
    pub fn nucleus(p: i32) -> i32 {
        p + 1
    }

    /// Superscript field of a noad, or the numerator of a fraction.
    pub fn supscr(p: i32) -> i32 {
        p + 2
    }

    /// Subscript field of a noad, or the denominator of a fraction.
    pub fn subscr(p: i32) -> i32 {
        p + 3
    }

    /// Left delimiter field of a noad.
    pub fn left_delimiter(p: i32) -> i32 {
        p + 4
    }

    /// Right delimiter field of a noad.
    pub fn right_delimiter(p: i32) -> i32 {
        p + 5
    }

    /// Accent field of an accent noad.
    pub fn accent_chr(p: i32) -> i32 {
        p + 4
    }

    /// Delimiter field of a left or right noad.
    pub fn delimiter(p: i32) -> i32 {
        nucleus(p)
    }
}

impl Equivalents {
    /// Command code of eqtb slot `p`.
    pub fn eq_type(&self, p: i32) -> Result<u8, MemoryError> {
        self.eqtb.at(i64::from(p)).hh().b0().get()
    }

    /// Save level of eqtb slot `p`.
    pub fn eq_level(&self, p: i32) -> Result<u8, MemoryError> {
        self.eqtb.at(i64::from(p)).hh().b1().get()
    }

    /// Equivalent of eqtb slot `p`.
    pub fn equiv(&self, p: i32) -> Result<i32, MemoryError> {
        self.eqtb.at(i64::from(p)).hh().rh().get()
    }

    /// Integer held in eqtb slot `p`.
    pub fn eqtb_int(&self, p: i32) -> Result<i32, MemoryError> {
        self.eqtb.at(i64::from(p)).int().get()
    }

    /// Scaled value held in eqtb slot `p`.
    pub fn eqtb_sc(&self, p: i32) -> Result<i32, MemoryError> {
        self.eqtb.at(i64::from(p)).sc().get()
    }

    /// Integer parameter `x`.
    pub fn int_par(&self, x: i32) -> Result<i32, MemoryError> {
        self.eqtb_int(INT_BASE + x)
    }

    /// Dimension parameter `x`.
    pub fn dimen_par(&self, x: i32) -> Result<i32, MemoryError> {
        self.eqtb_sc(DIMEN_BASE + x)
    }

    /// `\count` register `x`.
    pub fn count(&self, x: i32) -> Result<i32, MemoryError> {
        self.eqtb_int(COUNT_BASE + x)
    }

    /// `\dimen` register `x`.
    pub fn dimen(&self, x: i32) -> Result<i32, MemoryError> {
        self.eqtb_sc(SCALED_BASE + x)
    }

    /// `\delcode` of character `x`.
    pub fn del_code(&self, x: i32) -> Result<i32, MemoryError> {
        self.eqtb_int(DEL_CODE_BASE + x)
    }

    /// Hash collision chain of control sequence `p`.
    pub fn next(&self, p: i32) -> Result<i32, MemoryError> {
        self.hash.at(i64::from(p)).lh().get()
    }

    /// Name (string number) of control sequence `p`.
    pub fn text(&self, p: i32) -> Result<i32, MemoryError> {
        self.hash.at(i64::from(p)).rh().get()
    }

    /// Name of the identifier of font `f`.
    pub fn font_id_text(&self, f: i32) -> Result<i32, MemoryError> {
        self.text(FONT_ID_BASE + f)
    }

    /// Name of primitive `p`.
    pub fn prim_text(&self, p: i32) -> Result<i32, MemoryError> {
        self.prim.at(i64::from(p)).rh().get()
    }

    /// Command code of primitive `p`.
    pub fn prim_eq_type(&self, p: i32) -> Result<u8, MemoryError> {
        self.prim_eqtb.at(i64::from(p)).hh().b0().get()
    }

    /// Equivalent of primitive `p`.
    pub fn prim_equiv(&self, p: i32) -> Result<i32, MemoryError> {
        self.prim_eqtb.at(i64::from(p)).hh().rh().get()
    }
}

impl Fonts {
    /// Word `k` of font memory as an integer.
    pub fn info_int(&self, k: i32) -> Result<i32, MemoryError> {
        self.info.at(i64::from(k)).int().get()
    }

    /// File name of font `f`.
    pub fn font_name(&self, f: i32) -> Result<i32, MemoryError> {
        self.name.get(i64::from(f))
    }

    /// At size of font `f`.
    pub fn font_size(&self, f: i32) -> Result<i32, MemoryError> {
        self.size.get(i64::from(f))
    }

    /// Design size of font `f`.
    pub fn font_dsize(&self, f: i32) -> Result<i32, MemoryError> {
        self.dsize.get(i64::from(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EngineState;
    use fmtscope_arena::Table;
    use fmtscope_core::TexConfig;

    fn memory() -> Memory {
        let mut state = EngineState::new(&TexConfig::new());
        state.memory.mem = Table::alloc_based("mem", 32, 0);
        state.memory.hi_mem_min = 20;
        state.memory
    }

    #[test]
    fn type_and_subtype_share_the_info_bytes() {
        let mut mem = memory();
        mem.set_info(4, 0x0003_0007).unwrap();
        assert_eq!(mem.node_type(4).unwrap(), 3);
        assert_eq!(mem.subtype(4).unwrap(), 7);
    }

    #[test]
    fn ring_links_address_the_second_word() {
        let mut mem = memory();
        mem.set_node_size(2, 5).unwrap();
        mem.set_llink(2, 10).unwrap();
        mem.set_rlink(2, 11).unwrap();
        assert_eq!(mem.node_size(2).unwrap(), 5);
        assert_eq!(mem.info(3).unwrap(), 10);
        assert_eq!(mem.link(3).unwrap(), 11);
        assert_eq!(mem.rlink(2).unwrap(), 11);
        assert_eq!(mem.llink(2).unwrap(), 10);
    }

    #[test]
    fn box_fields_follow_the_word_offsets() {
        let mut mem = memory();
        mem.mem.at_mut(2).sc().set(655_360).unwrap();
        mem.set_link(6, 9).unwrap();
        assert_eq!(mem.width(1).unwrap(), 655_360);
        assert_eq!(mem.list_ptr(1).unwrap(), 9);
    }

    #[test]
    fn char_nodes_start_at_hi_mem_min() {
        let mem = memory();
        assert!(!mem.is_char_node(19));
        assert!(mem.is_char_node(20));
    }

    #[test]
    fn addresses_past_the_table_are_errors() {
        let mem = memory();
        assert!(mem.link(40).is_err());
        assert!(mem.width(32).is_err());
    }
}
