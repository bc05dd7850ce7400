//! The reconstructed engine state.

use fmtscope_arena::{FontWord, FourQuarters, MemoryWord, ObjEntry, Table, TwoHalves};
use fmtscope_core::layout::{
    contrib_head, HEAD_TAB_MAX, IGNORE_DEPTH, INF_OBJ_TAB_SIZE, MARK_VAL, NEW_FONT_TYPE, NULL,
    NULL_FONT, TRIE_OP_SIZE, VMODE,
};
use fmtscope_core::TexConfig;

use crate::phases::count;
use crate::strings::StringPool;

/// Everything read from the format file, plus the sizes it was loaded with.
///
/// A state is created empty by [`EngineState::new`], filled once by
/// [`read_format`](crate::read_format), and only ever read afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineState {
    /// Saturated sizing variables the state was created with.
    pub config: TexConfig,
    /// Signature block, character maps, engine flags and trailer values.
    pub header: Header,
    /// encTeX byte translation tables.
    pub encoding: Encoding,
    /// The string pool.
    pub strings: StringPool,
    /// Main memory.
    pub memory: Memory,
    /// Hash and table of equivalents.
    pub eqtb: Equivalents,
    /// Font metric tables.
    pub fonts: Fonts,
    /// Hyphenation exceptions and patterns trie.
    pub hyph: Hyphenation,
    /// pdfTeX images, memory and object table.
    pub pdf: PdfData,
    /// The outer semantic list.
    pub nest: ListState,
    /// Last node of the current page.
    pub page_tail: i32,
}

/// Fixed values of the format header and trailer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Engine name recorded in the format.
    pub engine_name: String,
    /// Checksum of the pool file the format was built with.
    pub pool_checksum: i32,
    /// Input character translation.
    pub xord: Vec<u8>,
    /// Output character translation.
    pub xchr: Vec<u8>,
    /// Printable character flags.
    pub xprn: Vec<u8>,
    /// eTeX mode (0 or 1).
    pub etex_mode: i32,
    /// Largest register number.
    pub max_reg_num: i32,
    /// Whether MLTeX character substitution is on.
    pub mltex_enabled: bool,
    /// Whether encTeX is on.
    pub enctex_enabled: bool,
    /// Interaction mode at dump time.
    pub interaction: i32,
    /// String number of the format identification.
    pub format_ident: i32,
}

impl Header {
    /// Whether eTeX extended mode is on.
    pub fn etex_ex(&self) -> bool {
        self.etex_mode == 1
    }
}

/// encTeX tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoding {
    /// Input byte sequences.
    pub mubyte_read: Table<i32>,
    /// Output byte sequences.
    pub mubyte_write: Table<i32>,
    /// Control sequence output.
    pub mubyte_cswrite: Table<i32>,
}

/// Main memory and its allocator state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    /// The words, indexed `mem_min ..= mem_max`.
    pub mem: Table<MemoryWord>,
    /// Bottom of the memory proper.
    pub mem_bot: i32,
    /// Top of the memory proper.
    pub mem_top: i32,
    /// Lowest allocated index.
    pub mem_min: i32,
    /// Highest allocated index.
    pub mem_max: i32,
    /// Top of the variable-size region.
    pub lo_mem_max: i32,
    /// Bottom of the one-word region.
    pub hi_mem_min: i32,
    /// Cursor into the free block ring.
    pub rover: i32,
    /// Head of the one-word free list.
    pub avail: i32,
    /// Last word in use.
    pub mem_end: i32,
    /// Words in variable-size nodes.
    pub var_used: i32,
    /// Words in one-word nodes.
    pub dyn_used: i32,
    /// Sparse array roots, `INT_VAL ..= MARK_VAL`.
    pub sa_root: [i32; MARK_VAL as usize + 1],
}

impl Memory {
    /// The sparse mark class root.
    pub fn sa_mark(&self) -> i32 {
        self.sa_root[MARK_VAL as usize]
    }
}

/// Hash, eqtb and primitive tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equivalents {
    /// Control sequence names, indexed from `HASH_OFFSET`.
    pub hash: Table<TwoHalves>,
    /// Table of equivalents, `0 ..= eqtb_top`.
    pub eqtb: Table<MemoryWord>,
    /// Primitive names.
    pub prim: Table<TwoHalves>,
    /// Primitive meanings.
    pub prim_eqtb: Table<MemoryWord>,
    /// Extra hash entries stored in the format.
    pub hash_high: i32,
    /// Extra hash entries allocated.
    pub hash_extra: i32,
    /// Last hash index.
    pub hash_top: i32,
    /// Last eqtb index.
    pub eqtb_top: i32,
    /// Allocation pointer of the hash.
    pub hash_used: i32,
    /// Location of `\par`.
    pub par_loc: i32,
    /// Token of `\par`.
    pub par_token: i32,
    /// Location of `\write`.
    pub write_loc: i32,
    /// Number of defined control sequences.
    pub cs_count: i32,
}

/// Per-font values pdfTeX keeps outside the TFM data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfFont {
    /// Characters shipped out.
    pub char_used: [u8; 32],
    /// Size the font was shipped at.
    pub size: i32,
    /// PDF font number.
    pub num: i32,
    /// Map file entry.
    pub map: u32,
    /// Font type.
    pub font_type: u8,
    /// String number of the attributes.
    pub attr: i32,
    /// Expansion chain.
    pub blink: i32,
    /// Expansion chain.
    pub elink: i32,
    /// Stretched variant.
    pub stretch: i32,
    /// Shrunk variant.
    pub shrink: i32,
    /// Expansion step.
    pub step: i32,
    /// Expansion ratio.
    pub expand_ratio: i32,
    /// Automatic expansion flag.
    pub auto_expand: i32,
    /// Left protrusion codes base.
    pub lp_base: i32,
    /// Right protrusion codes base.
    pub rp_base: i32,
    /// Expansion factors base.
    pub ef_base: i32,
    /// Interword kern codes base.
    pub kn_bs_base: i32,
    /// Interword stretch codes base.
    pub st_bs_base: i32,
    /// Interword shrink codes base.
    pub sh_bs_base: i32,
    /// Kern-before codes base.
    pub kn_bc_base: i32,
    /// Kern-after codes base.
    pub kn_ac_base: i32,
    /// Whether built-in ToUnicode maps are disabled.
    pub nobuiltin_tounicode: i32,
}

impl PdfFont {
    /// The values a font starts with; `attr` is the empty string's number.
    pub fn with_attr(attr: i32) -> Self {
        Self {
            char_used: [0; 32],
            size: 0,
            num: 0,
            map: 0,
            font_type: NEW_FONT_TYPE,
            attr,
            blink: NULL_FONT,
            elink: NULL_FONT,
            stretch: NULL_FONT,
            shrink: NULL_FONT,
            step: 0,
            expand_ratio: 0,
            auto_expand: 0,
            lp_base: 0,
            rp_base: 0,
            ef_base: 0,
            kn_bs_base: 0,
            st_bs_base: 0,
            sh_bs_base: 0,
            kn_bc_base: 0,
            kn_ac_base: 0,
            nobuiltin_tounicode: 0,
        }
    }
}

/// Font memory and the parallel per-font arrays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fonts {
    /// Font memory.
    pub info: Table<FontWord>,
    /// Words of font memory in use.
    pub fmem_ptr: i32,
    /// Words of font memory allocated.
    pub font_mem_size: i32,
    /// Last font in use.
    pub font_ptr: i32,
    /// Font slots configured.
    pub font_max: i32,
    /// TFM checksums.
    pub check: Table<FourQuarters>,
    /// At sizes.
    pub size: Table<i32>,
    /// Design sizes.
    pub dsize: Table<i32>,
    /// Number of parameters.
    pub params: Table<i32>,
    /// `\hyphenchar` values.
    pub hyphen_char: Table<i32>,
    /// `\skewchar` values.
    pub skew_char: Table<i32>,
    /// File names (string numbers).
    pub name: Table<i32>,
    /// File areas (string numbers).
    pub area: Table<i32>,
    /// First character.
    pub bc: Table<u8>,
    /// Last character.
    pub ec: Table<u8>,
    /// Base of `char_info` words.
    pub char_base: Table<i32>,
    /// Base of widths.
    pub width_base: Table<i32>,
    /// Base of heights.
    pub height_base: Table<i32>,
    /// Base of depths.
    pub depth_base: Table<i32>,
    /// Base of italic corrections.
    pub italic_base: Table<i32>,
    /// Base of the lig/kern program.
    pub lig_kern_base: Table<i32>,
    /// Base of kerns.
    pub kern_base: Table<i32>,
    /// Base of extensible recipes.
    pub exten_base: Table<i32>,
    /// Base of parameters.
    pub param_base: Table<i32>,
    /// Interword glue specs.
    pub glue: Table<i32>,
    /// Boundary char lig/kern start.
    pub bchar_label: Table<i32>,
    /// Right boundary character.
    pub bchar: Table<i16>,
    /// Boundary character that does not exist in the font.
    pub false_bchar: Table<i16>,
    /// pdfTeX per-font values, indexed by font number.
    pub pdf: Vec<PdfFont>,
}

/// One loaded image's metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageMeta {
    /// File name with trailing NULs removed.
    pub name: Vec<u8>,
    /// One of the `IMAGE_TYPE_*` codes.
    pub image_type: i32,
    /// Color type.
    pub color_type: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Horizontal resolution.
    pub x_res: i32,
    /// Vertical resolution.
    pub y_res: i32,
    /// Pages in the file.
    pub num_pages: i32,
    /// Color space object.
    pub colorspace_ref: i32,
    /// Transparency group object.
    pub group_ref: i32,
    /// PDF page box.
    pub page_box: Option<i32>,
    /// Selected page of a PDF or JBIG2 image.
    pub selected_page: Option<i32>,
}

/// pdfTeX extension data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfData {
    /// Image slots allocated when dumping.
    pub image_limit: i32,
    /// Images in use.
    pub cur_image: i32,
    /// Image metadata, `0 .. cur_image`.
    pub images: Vec<ImageMeta>,
    /// Size of `pdf_mem`.
    pub pdf_mem_size: i32,
    /// pdfTeX auxiliary memory.
    pub pdf_mem: Table<i32>,
    /// First free `pdf_mem` word.
    pub pdf_mem_ptr: i32,
    /// Object table size at dump time.
    pub obj_tab_size: i32,
    /// Objects in use.
    pub obj_ptr: i32,
    /// Objects created while building the format.
    pub sys_obj_ptr: i32,
    /// Object table.
    pub obj_tab: Table<ObjEntry>,
    /// `\pdfobj` count.
    pub obj_count: i32,
    /// `\pdfxform` count.
    pub xform_count: i32,
    /// `\pdfximage` count.
    pub ximage_count: i32,
    /// Heads of the object lists by type.
    pub head_tab: Table<i32>,
    /// Last `\pdfobj`.
    pub last_obj: i32,
    /// Last `\pdfxform`.
    pub last_xform: i32,
    /// Last `\pdfximage`.
    pub last_ximage: i32,
}

/// Hyphenation exceptions and the packed pattern trie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hyphenation {
    /// Exception table capacity.
    pub hyph_size: i32,
    /// Exceptions in use.
    pub hyph_count: i32,
    /// Next free exception slot.
    pub hyph_next: i32,
    /// Exception words (string numbers).
    pub hyph_word: Table<i32>,
    /// Exception hyphen positions.
    pub hyph_list: Table<i32>,
    /// Exception collision chain.
    pub hyph_link: Table<u16>,
    /// Trie capacity.
    pub trie_size: i32,
    /// Largest trie index in use.
    pub trie_max: i32,
    /// Start of the hyphenation-code trie.
    pub hyph_start: i32,
    /// Trie links.
    pub trie_trl: Table<i32>,
    /// Trie ops.
    pub trie_tro: Table<i32>,
    /// Trie characters.
    pub trie_trc: Table<u8>,
    /// Trie ops in use.
    pub trie_op_ptr: i32,
    /// Op distances, from index 1.
    pub hyf_distance: Table<u8>,
    /// Op hyphen values, from index 1.
    pub hyf_num: Table<u8>,
    /// Op chains, from index 1.
    pub hyf_next: Table<u16>,
    /// Ops per language.
    pub trie_used: Table<u16>,
    /// First op of each language.
    pub op_start: Table<i32>,
    /// Whether the trie still needs packing.
    pub trie_not_ready: bool,
}

/// The outermost semantic list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListState {
    /// Mode.
    pub mode: i32,
    /// List head.
    pub head: i32,
    /// List tail.
    pub tail: i32,
    /// eTeX auxiliary pointer.
    pub etex_aux: i32,
    /// Lines of the paragraph so far.
    pub prev_graf: i32,
    /// Source line the list started at.
    pub mode_line: i32,
    /// `prev_depth`, the vertical mode auxiliary value.
    pub aux: i32,
}

impl EngineState {
    /// An empty state for `config`, saturated first.
    pub fn new(config: &TexConfig) -> Self {
        let config = config.saturated();
        let mem_top = config.mem_top();
        let hyph_size = count(config.hyph_size);
        let hyph_list = Table::filled("hyph_list", hyph_size, NULL);
        let mubyte_read = Table::filled("mubyte_read", 256, NULL);
        let mubyte_cswrite = Table::filled("mubyte_cswrite", 128, NULL);

        Self {
            header: Header::default(),
            encoding: Encoding {
                mubyte_read,
                mubyte_write: Table::alloc("mubyte_write", 256),
                mubyte_cswrite,
            },
            strings: StringPool::new(&config),
            memory: Memory {
                mem: Table::empty("mem"),
                mem_bot: config.mem_bot,
                mem_top,
                mem_min: config.mem_bot,
                mem_max: mem_top,
                lo_mem_max: 0,
                hi_mem_min: 0,
                rover: 0,
                avail: 0,
                mem_end: 0,
                var_used: 0,
                dyn_used: 0,
                sa_root: [NULL; MARK_VAL as usize + 1],
            },
            eqtb: Equivalents {
                hash: Table::empty("hash"),
                eqtb: Table::empty("eqtb"),
                prim: Table::empty("prim"),
                prim_eqtb: Table::empty("prim_eqtb"),
                hash_high: 0,
                hash_extra: config.hash_extra,
                hash_top: 0,
                eqtb_top: 0,
                hash_used: 0,
                par_loc: 0,
                par_token: 0,
                write_loc: 0,
                cs_count: 0,
            },
            fonts: Fonts {
                info: Table::empty("font_info"),
                fmem_ptr: 0,
                font_mem_size: config.font_mem_size,
                font_ptr: 0,
                font_max: config.font_max,
                check: Table::empty("font_check"),
                size: Table::empty("font_size"),
                dsize: Table::empty("font_dsize"),
                params: Table::empty("font_params"),
                hyphen_char: Table::empty("hyphen_char"),
                skew_char: Table::empty("skew_char"),
                name: Table::empty("font_name"),
                area: Table::empty("font_area"),
                bc: Table::empty("font_bc"),
                ec: Table::empty("font_ec"),
                char_base: Table::empty("char_base"),
                width_base: Table::empty("width_base"),
                height_base: Table::empty("height_base"),
                depth_base: Table::empty("depth_base"),
                italic_base: Table::empty("italic_base"),
                lig_kern_base: Table::empty("lig_kern_base"),
                kern_base: Table::empty("kern_base"),
                exten_base: Table::empty("exten_base"),
                param_base: Table::empty("param_base"),
                glue: Table::empty("font_glue"),
                bchar_label: Table::empty("bchar_label"),
                bchar: Table::empty("font_bchar"),
                false_bchar: Table::empty("font_false_bchar"),
                pdf: Vec::new(),
            },
            hyph: Hyphenation {
                hyph_size: config.hyph_size,
                hyph_count: 0,
                hyph_next: 0,
                hyph_word: Table::alloc("hyph_word", hyph_size),
                hyph_list,
                hyph_link: Table::alloc("hyph_link", hyph_size),
                trie_size: config.trie_size,
                trie_max: 0,
                hyph_start: 0,
                trie_trl: Table::empty("trie_trl"),
                trie_tro: Table::empty("trie_tro"),
                trie_trc: Table::empty("trie_trc"),
                trie_op_ptr: 0,
                hyf_distance: Table::alloc("hyf_distance", TRIE_OP_SIZE as usize),
                hyf_num: Table::alloc("hyf_num", TRIE_OP_SIZE as usize),
                hyf_next: Table::alloc("hyf_next", TRIE_OP_SIZE as usize),
                trie_used: Table::alloc("trie_used", 256),
                op_start: Table::alloc("op_start", 256),
                trie_not_ready: true,
            },
            pdf: PdfData {
                image_limit: 0,
                cur_image: 0,
                images: Vec::new(),
                pdf_mem_size: 0,
                pdf_mem: Table::empty("pdf_mem"),
                pdf_mem_ptr: 0,
                obj_tab_size: 0,
                obj_ptr: 0,
                sys_obj_ptr: 0,
                obj_tab: Table::alloc("obj_tab", INF_OBJ_TAB_SIZE as usize),
                obj_count: 0,
                xform_count: 0,
                ximage_count: 0,
                head_tab: Table::alloc("head_tab", HEAD_TAB_MAX as usize + 1),
                last_obj: 0,
                last_xform: 0,
                last_ximage: 0,
            },
            nest: ListState {
                mode: VMODE,
                head: contrib_head(mem_top),
                tail: contrib_head(mem_top),
                etex_aux: NULL,
                prev_graf: 0,
                mode_line: 0,
                aux: IGNORE_DEPTH,
            },
            page_tail: 0,
            config,
        }
    }

    /// Drop everything loaded and return to the empty state.
    pub fn reset(&mut self) {
        *self = Self::new(&self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_saturated_and_empty() {
        let state = EngineState::new(&TexConfig::new().with_hyph_size(1));
        assert_eq!(state.hyph.hyph_size, 610);
        assert_eq!(state.hyph.hyph_list.get(610).unwrap(), NULL);
        assert!(state.memory.mem.is_empty());
        assert_eq!(state.nest.head, contrib_head(state.memory.mem_top));
        assert_eq!(state.encoding.mubyte_read.get(255).unwrap(), NULL);
        assert_eq!(state.encoding.mubyte_write.get(255).unwrap(), 0);
    }

    #[test]
    fn null_filled_tables_are_complete() {
        let state = EngineState::new(&TexConfig::new());
        let all_null = |t: &Table<i32>| (0..t.len() as i64).all(|i| t.get(i) == Ok(NULL));
        assert_eq!(state.hyph.hyph_list.len(), count(state.hyph.hyph_size) + 1);
        assert!(all_null(&state.hyph.hyph_list));
        assert!(all_null(&state.encoding.mubyte_read));
        assert_eq!(state.encoding.mubyte_cswrite.len(), 129);
        assert!(all_null(&state.encoding.mubyte_cswrite));
    }

    #[test]
    fn reset_restores_the_empty_state() {
        let config = TexConfig::new();
        let mut state = EngineState::new(&config);
        state.header.etex_mode = 1;
        state.strings.allocate();
        state.strings.intern(b"x").unwrap();
        state.reset();
        assert_eq!(state, EngineState::new(&config));
    }
}
