//! Benchmark profiles for the fmtscope loader and printer.
//!
//! - [`reference_format`]: an eTeX format with the 256 one-byte strings and
//!   a penalty chain in low memory
//! - [`penalty_chain`]: the chain on its own, for printer benchmarks
//! - [`CHAIN_START`]: where the chain begins

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fmtscope_core::layout::{lo_mem_stat_max, NULL, PENALTY_NODE};
use fmtscope_core::TexConfig;
use fmtscope_test_utils::{node_word, word_int, FmtBuilder};

/// Words kept in the free block, so that low memory past it is dumped.
const FREE_WORDS: i32 = 4;

/// First node of the penalty chain.
pub const CHAIN_START: i32 = lo_mem_stat_max(TexConfig::DEFAULT_MEM_BOT) + 1 + FREE_WORDS;

/// Add a chain of `len` two-word penalty nodes starting at [`CHAIN_START`].
///
/// The chain must fit below `lo_mem_max`; 400 nodes always do.
pub fn penalty_chain(builder: FmtBuilder, len: i32) -> FmtBuilder {
    let mut builder = builder.with_free_words(FREE_WORDS);
    for k in 0..len {
        let p = CHAIN_START + 2 * k;
        let next = if k + 1 == len { NULL } else { p + 2 };
        builder = builder
            .with_lo_word(p, node_word(next, PENALTY_NODE, 0))
            .with_lo_word(p + 1, word_int(k * 100));
    }
    builder
}

/// The stream every load benchmark reads.
pub fn reference_format() -> Vec<u8> {
    let builder = FmtBuilder::new().with_etex().with_char_strings();
    penalty_chain(builder, 400).build()
}
