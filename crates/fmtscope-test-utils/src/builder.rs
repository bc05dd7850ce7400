use std::collections::BTreeMap;

use fmtscope_core::config::TexConfig;
use fmtscope_core::layout::{
    hi_mem_stat_min, lo_mem_stat_max, ENCTEX_SIGNATURE, ENGINE_NAME, EQTB_SIZE, FORMAT_MAGIC,
    FORMAT_TRAILER, HASH_BASE, HASH_PRIME, HYPH_PRIME, IMAGE_TYPE_JBIG2, IMAGE_TYPE_PDF,
    MAX_HALFWORD, MLTEX_SIGNATURE, NON_CHAR, NULL, PRIM_SIZE, TOK_VAL, INT_VAL,
    UNDEFINED_CONTROL_SEQUENCE,
};

/// An 8-byte memory word holding one integer.
pub fn word_int(x: i32) -> [u8; 8] {
    let mut w = [0; 8];
    w[..4].copy_from_slice(&x.to_be_bytes());
    w
}

/// An 8-byte memory word holding two halfwords.
pub fn word_hh(rh: i32, lh: i32) -> [u8; 8] {
    let mut w = [0; 8];
    w[..4].copy_from_slice(&rh.to_be_bytes());
    w[4..].copy_from_slice(&lh.to_be_bytes());
    w
}

/// The first word of a node: `link`, `type` and `subtype`.
pub fn node_word(link: i32, node_type: u8, subtype: u8) -> [u8; 8] {
    let mut w = [0; 8];
    w[..4].copy_from_slice(&link.to_be_bytes());
    w[5] = node_type;
    w[7] = subtype;
    w
}

/// One image record.
#[derive(Clone, Debug)]
pub struct ImageSpec {
    pub image_type: i32,
    pub name: Vec<u8>,
}

/// Writes a pdfTeX format stream.
///
/// The defaults describe the smallest format the loader accepts: one
/// free block in the variable-size ring, an all-default eqtb, no fonts
/// besides the null font, no hyphenation patterns and no PDF objects.
#[derive(Clone, Debug)]
pub struct FmtBuilder {
    pub magic: i32,
    pub engine_name: Vec<u8>,
    pub max_halfword: i32,
    pub hash_high: i32,
    pub etex: bool,
    pub mltex: i32,
    pub enctex: i32,
    pub mem_bot: i32,
    pub mem_top: i32,
    pub strings: Vec<Vec<u8>>,
    pub str_start_override: Option<Vec<i32>>,
    pub broken_ring: bool,
    /// Size of the single free block at `rover`. Words past it are dumped.
    pub free_words: i32,
    /// Words placed in low memory (`mem_bot ..= lo_mem_max`).
    pub lo_words: BTreeMap<i32, [u8; 8]>,
    /// Words placed in high memory (`hi_mem_min ..= mem_top`).
    pub hi_words: BTreeMap<i32, [u8; 8]>,
    pub eqtb_words: BTreeMap<i32, [u8; 8]>,
    pub hash_words: BTreeMap<i32, [u8; 8]>,
    pub font_ptr: i32,
    /// `(j, hyph_word, hyph_list)` triples, stored with a zero link.
    pub hyph_exceptions: Vec<(i32, i32, i32)>,
    /// `(language, op count)` pairs in decreasing language order.
    pub trie_ops: Vec<(i32, i32)>,
    pub images: Vec<ImageSpec>,
    pub pdf_mem: Vec<i32>,
    pub objects: Vec<[i32; 4]>,
    pub interaction: i32,
    pub format_ident: i32,
    pub trailer: i32,
    /// Raw values written in place of computed counts and sizes, keyed by
    /// field name (see [`FmtBuilder::with_field`]).
    pub overrides: BTreeMap<&'static str, i32>,
}

impl Default for FmtBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FmtBuilder {
    pub fn new() -> Self {
        Self {
            magic: FORMAT_MAGIC,
            engine_name: ENGINE_NAME.as_bytes().to_vec(),
            max_halfword: MAX_HALFWORD,
            hash_high: 0,
            etex: false,
            mltex: 0,
            enctex: 0,
            mem_bot: TexConfig::DEFAULT_MEM_BOT,
            mem_top: 4_999,
            strings: vec![b"plain".to_vec()],
            str_start_override: None,
            broken_ring: false,
            free_words: 995,
            lo_words: BTreeMap::new(),
            hi_words: BTreeMap::new(),
            eqtb_words: BTreeMap::new(),
            hash_words: BTreeMap::new(),
            font_ptr: 0,
            hyph_exceptions: Vec::new(),
            trie_ops: Vec::new(),
            images: Vec::new(),
            pdf_mem: Vec::new(),
            objects: Vec::new(),
            interaction: 3,
            format_ident: 0,
            trailer: FORMAT_TRAILER,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_strings(mut self, strings: &[&[u8]]) -> Self {
        self.strings = strings.iter().map(|s| s.to_vec()).collect();
        self
    }

    pub fn with_etex(mut self) -> Self {
        self.etex = true;
        self
    }

    pub fn with_broken_ring(mut self) -> Self {
        self.broken_ring = true;
        self
    }

    pub fn with_trailer(mut self, trailer: i32) -> Self {
        self.trailer = trailer;
        self
    }

    /// Write `value` for the named field instead of the consistent one.
    ///
    /// Known fields: `mem_top`, `pool_ptr`, `str_ptr`, `rover_size`,
    /// `eqtb_block`, `fmem_ptr`, `hyph_count`, `trie_max`,
    /// `image_name_length` and `pdf_mem_size`.
    pub fn with_field(mut self, name: &'static str, value: i32) -> Self {
        self.overrides.insert(name, value);
        self
    }

    fn field(&self, name: &str, value: i32) -> i32 {
        self.overrides.get(name).copied().unwrap_or(value)
    }

    pub fn with_magic(mut self, magic: i32) -> Self {
        self.magic = magic;
        self
    }

    pub fn with_free_words(mut self, words: i32) -> Self {
        self.free_words = words;
        self
    }

    /// Prepend the 256 one-byte strings a real pool starts with.
    ///
    /// String `c` is the byte `c` itself, so character codes print as
    /// themselves.
    pub fn with_char_strings(mut self) -> Self {
        let mut strings: Vec<Vec<u8>> = (0..=255u8).map(|c| vec![c]).collect();
        strings.append(&mut self.strings);
        self.strings = strings;
        self
    }

    pub fn with_hi_word(mut self, p: i32, word: [u8; 8]) -> Self {
        self.hi_words.insert(p, word);
        self
    }

    pub fn with_lo_word(mut self, p: i32, word: [u8; 8]) -> Self {
        self.lo_words.insert(p, word);
        self
    }

    pub fn with_eqtb_word(mut self, slot: i32, word: [u8; 8]) -> Self {
        self.eqtb_words.insert(slot, word);
        self
    }

    pub fn with_hash_word(mut self, slot: i32, word: [u8; 8]) -> Self {
        self.hash_words.insert(slot, word);
        self
    }

    /// Last word of the variable-size region.
    pub fn lo_mem_max(&self) -> i32 {
        lo_mem_stat_max(self.mem_bot) + 1_000
    }

    /// The free block cursor.
    pub fn rover(&self) -> i32 {
        lo_mem_stat_max(self.mem_bot) + 1
    }

    /// First word of the one-word region.
    pub fn hi_mem_min(&self) -> i32 {
        hi_mem_stat_min(self.mem_top) - 100
    }

    /// The finished stream.
    pub fn build(&self) -> Vec<u8> {
        let mut out = Writer::default();
        self.constants(&mut out);
        self.features(&mut out);
        self.string_pool(&mut out);
        self.memory(&mut out);
        self.equivalents(&mut out);
        self.fonts(&mut out);
        self.hyphenation(&mut out);
        self.pdftex(&mut out);
        out.int(self.interaction);
        out.int(self.format_ident);
        out.int(self.trailer);
        out.bytes
    }

    fn constants(&self, out: &mut Writer) {
        out.int(self.magic);
        out.int(self.engine_name.len() as i32);
        out.raw(&self.engine_name);
        out.int(0x1234_5678);
        let identity: Vec<u8> = (0..=255).collect();
        out.raw(&identity);
        out.raw(&identity);
        out.raw(&[1; 256]);
        out.int(self.max_halfword);
        out.int(self.hash_high);
        out.int(i32::from(self.etex));
        out.int(self.mem_bot);
        out.int(self.field("mem_top", self.mem_top));
        out.int(EQTB_SIZE);
        out.int(HASH_PRIME);
        out.int(HYPH_PRIME);
    }

    fn features(&self, out: &mut Writer) {
        out.int(MLTEX_SIGNATURE);
        out.int(self.mltex);
        out.int(ENCTEX_SIGNATURE);
        out.int(self.enctex);
        if self.enctex == 1 {
            for _ in 0..256 + 256 + 128 {
                out.int(NULL);
            }
        }
    }

    fn string_pool(&self, out: &mut Writer) {
        let pool: Vec<u8> = self.strings.concat();
        out.int(self.field("pool_ptr", pool.len() as i32));
        out.int(self.field("str_ptr", self.strings.len() as i32));
        match &self.str_start_override {
            Some(starts) => starts.iter().for_each(|&s| out.int(s)),
            None => {
                let mut at = 0;
                out.int(at);
                for s in &self.strings {
                    at += s.len() as i32;
                    out.int(at);
                }
            }
        }
        out.raw(&pool);
    }

    fn memory(&self, out: &mut Writer) {
        let lo_mem_max = self.lo_mem_max();
        let rover = self.rover();
        let block = self.free_words;
        out.int(lo_mem_max);
        out.int(rover);
        if self.etex {
            for _ in INT_VAL..=TOK_VAL {
                out.int(NULL);
            }
        }
        let mut lo = self.lo_words.clone();
        lo.insert(rover, word_hh(MAX_HALFWORD, self.field("rover_size", block)));
        let rlink = if self.broken_ring { rover - 1 } else { rover };
        lo.insert(rover + 1, word_hh(rlink, rover));
        // The free block's interior is never dumped.
        let word = |p: i32| lo.get(&p).copied().unwrap_or_default();
        for p in (self.mem_bot..rover + 2).chain(rover + block..=lo_mem_max) {
            out.raw(&word(p));
        }
        out.int(self.hi_mem_min());
        out.int(NULL);
        for p in self.hi_mem_min()..=self.mem_top {
            out.raw(&self.hi_words.get(&p).copied().unwrap_or_default());
        }
        out.int(0);
        out.int(0);
    }

    fn equivalents(&self, out: &mut Writer) {
        let last = self.eqtb_words.keys().next_back().copied().unwrap_or(1).max(1);
        out.int(self.field("eqtb_block", last));
        for k in 1..=last {
            out.raw(&self.eqtb_words.get(&k).copied().unwrap_or_default());
        }
        out.int(EQTB_SIZE - last);
        for _ in 0..self.hash_high {
            out.raw(&[0; 8]);
        }
        out.int(HASH_BASE);
        out.int(HASH_BASE);
        for _ in 0..2 * (PRIM_SIZE + 1) {
            out.raw(&[0; 8]);
        }
        out.int(HASH_BASE);
        out.int(HASH_BASE);
        out.raw(&self.hash_words.get(&HASH_BASE).copied().unwrap_or_default());
        for p in HASH_BASE + 1..UNDEFINED_CONTROL_SEQUENCE {
            out.raw(&self.hash_words.get(&p).copied().unwrap_or_default());
        }
        for _ in 0..self.hash_high {
            out.raw(&[0; 8]);
        }
        out.int(1);
    }

    fn fonts(&self, out: &mut Writer) {
        let fmem_ptr = 7;
        out.int(self.field("fmem_ptr", fmem_ptr));
        out.raw(&vec![0; 4 * fmem_ptr as usize]);
        out.int(self.font_ptr);
        let n = (self.font_ptr + 1) as usize;
        let ints = |out: &mut Writer, x: i32| (0..n).for_each(|_| out.int(x));
        out.raw(&vec![0; 4 * n]); // font_check
        ints(out, 0); // font_size
        ints(out, 0); // font_dsize
        ints(out, 7); // font_params
        ints(out, 45); // hyphen_char
        ints(out, -1); // skew_char
        ints(out, 0); // font_name
        ints(out, 0); // font_area
        out.raw(&vec![1; n]); // font_bc
        out.raw(&vec![0; n]); // font_ec
        for _ in 0..9 {
            ints(out, 0); // char_base ..= param_base
        }
        ints(out, NULL); // font_glue
        ints(out, 0); // bchar_label
        for _ in 0..2 {
            (0..n).for_each(|_| out.raw(&(NON_CHAR as i16).to_be_bytes()));
        }
    }

    fn hyphenation(&self, out: &mut Writer) {
        out.int(self.field("hyph_count", self.hyph_exceptions.len() as i32));
        out.int(HYPH_PRIME);
        for &(j, word, list) in &self.hyph_exceptions {
            out.int(j);
            out.int(word);
            out.int(list);
        }
        out.int(self.field("trie_max", 0));
        out.int(0);
        out.int(0);
        out.int(0);
        out.raw(&[0]);
        let ops: i32 = self.trie_ops.iter().map(|&(_, x)| x).sum();
        out.int(ops);
        out.raw(&vec![0; ops as usize]);
        out.raw(&vec![0; ops as usize]);
        out.raw(&vec![0; 2 * ops as usize]);
        for &(k, x) in &self.trie_ops {
            out.int(k);
            out.int(x);
        }
    }

    fn pdftex(&self, out: &mut Writer) {
        out.int(self.images.len() as i32);
        out.int(self.images.len() as i32);
        for (i, image) in self.images.iter().enumerate() {
            out.int(self.field("image_name_length", image.name.len() as i32));
            out.raw(&image.name);
            out.int(image.image_type);
            for field in 0..8 {
                out.int(i as i32 * 10 + field);
            }
            if image.image_type == IMAGE_TYPE_PDF {
                out.int(1);
                out.int(1);
            } else if image.image_type == IMAGE_TYPE_JBIG2 {
                out.int(1);
            }
        }
        out.int(self.field("pdf_mem_size", self.pdf_mem.len() as i32 + 1));
        out.int(self.pdf_mem.len() as i32 + 1);
        self.pdf_mem.iter().for_each(|&x| out.int(x));
        out.int(0);
        out.int(self.objects.len() as i32);
        out.int(self.objects.len() as i32);
        for row in &self.objects {
            row.iter().for_each(|&x| out.int(x));
        }
        for _ in 0..9 {
            out.int(0);
        }
    }
}

#[derive(Default)]
struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    fn int(&mut self, x: i32) {
        self.bytes.extend_from_slice(&x.to_be_bytes());
    }

    fn raw(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}
