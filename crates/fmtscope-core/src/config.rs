//! Engine sizing variables.
//!
//! These mirror the `texmf.cnf` variables a pdfTeX binary reads at start-up.
//! The loader grows some of them when a format needs more room than the
//! configured value, so every [`TexConfig`] is saturated into the windows
//! below before use.

use crate::layout::MAX_FONT_MAX;

/// Smallest accepted `mem_bot`.
pub const INF_MEM_BOT: i32 = 0;
/// Largest accepted `mem_bot`.
pub const SUP_MEM_BOT: i32 = 1;
/// Smallest accepted `main_memory`.
pub const INF_MAIN_MEMORY: i32 = 2_999;
/// Largest accepted `main_memory`.
pub const SUP_MAIN_MEMORY: i32 = 256_000_000;
/// Smallest accepted `trie_size`.
pub const INF_TRIE_SIZE: i32 = 8_000;
/// Largest accepted `trie_size`.
pub const SUP_TRIE_SIZE: i32 = 0x3F_FFFF;
/// Smallest accepted `max_strings`.
pub const INF_MAX_STRINGS: i32 = 3_000;
/// Largest accepted `max_strings`.
pub const SUP_MAX_STRINGS: i32 = 2_097_151;
/// Smallest accepted `strings_free`.
pub const INF_STRINGS_FREE: i32 = 0;
/// Largest accepted `strings_free`.
pub const SUP_STRINGS_FREE: i32 = SUP_MAX_STRINGS;
/// Smallest accepted `font_mem_size`.
pub const INF_FONT_MEM_SIZE: i32 = 20_000;
/// Largest accepted `font_mem_size`.
pub const SUP_FONT_MEM_SIZE: i32 = 147_483_647;
/// Smallest accepted `font_max`.
pub const INF_FONT_MAX: i32 = 50;
/// Largest accepted `font_max`.
pub const SUP_FONT_MAX: i32 = MAX_FONT_MAX;
/// Smallest accepted `pool_size`.
pub const INF_POOL_SIZE: i32 = 32_000;
/// Largest accepted `pool_size`.
pub const SUP_POOL_SIZE: i32 = 40_000_000;
/// Smallest accepted `pool_free`.
pub const INF_POOL_FREE: i32 = 1_000;
/// Largest accepted `pool_free`.
pub const SUP_POOL_FREE: i32 = SUP_POOL_SIZE;
/// Smallest accepted `hash_extra`.
pub const INF_HASH_EXTRA: i32 = 0;
/// Largest accepted `hash_extra`.
pub const SUP_HASH_EXTRA: i32 = SUP_MAX_STRINGS;
/// Smallest accepted `hyph_size`.
pub const INF_HYPH_SIZE: i32 = 610;
/// Largest accepted `hyph_size`.
pub const SUP_HYPH_SIZE: i32 = 65_535;

/// Sizing variables for a load session.
///
/// Construct with [`TexConfig::new`] (the TeX Live defaults) and adjust with
/// the `with_*` setters. The loader only ever sees
/// [`saturated`](TexConfig::saturated) copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TexConfig {
    /// Lowest word of the main memory proper. Either 0 or 1.
    pub mem_bot: i32,
    /// Words of main memory between `mem_bot` and `mem_top`.
    pub main_memory: i32,
    /// Extra words allocated above `mem_top`.
    pub extra_mem_top: i32,
    /// Extra words allocated below `mem_bot`.
    pub extra_mem_bot: i32,
    /// Capacity of the string pool in bytes.
    pub pool_size: i32,
    /// Pool bytes that must stay free after loading.
    pub pool_free: i32,
    /// Capacity of the string table.
    pub max_strings: i32,
    /// Strings that must stay free after loading.
    pub strings_free: i32,
    /// Words of font memory.
    pub font_mem_size: i32,
    /// Number of font slots.
    pub font_max: i32,
    /// Capacity of the hyphenation trie.
    pub trie_size: i32,
    /// Capacity of the hyphenation exception table.
    pub hyph_size: i32,
    /// Extra control sequence slots beyond the static hash.
    pub hash_extra: i32,
    /// Nesting limit of the node printer.
    ///
    /// Not a TeX variable. Bounds recursion into sublists so a corrupt
    /// format cannot exhaust the stack.
    pub max_show_depth: u32,
}

impl TexConfig {
    /// Default `mem_bot`.
    pub const DEFAULT_MEM_BOT: i32 = 0;
    /// Default `main_memory`.
    pub const DEFAULT_MAIN_MEMORY: i32 = 250_000;
    /// Default `pool_size`.
    pub const DEFAULT_POOL_SIZE: i32 = 200_000;
    /// Default `pool_free`.
    pub const DEFAULT_POOL_FREE: i32 = 5_000;
    /// Default `max_strings`.
    pub const DEFAULT_MAX_STRINGS: i32 = 15_000;
    /// Default `strings_free`.
    pub const DEFAULT_STRINGS_FREE: i32 = 100;
    /// Default `font_mem_size`.
    pub const DEFAULT_FONT_MEM_SIZE: i32 = 100_000;
    /// Default `font_max`.
    pub const DEFAULT_FONT_MAX: i32 = 500;
    /// Default `trie_size`, as shipped in TeX Live's `texmf.cnf`.
    pub const DEFAULT_TRIE_SIZE: i32 = 1_000_000;
    /// Default `hyph_size`, as shipped in TeX Live's `texmf.cnf`.
    pub const DEFAULT_HYPH_SIZE: i32 = 8_191;
    /// Default printer nesting limit.
    pub const DEFAULT_MAX_SHOW_DEPTH: u32 = 256;

    /// Create a config holding the default value of every variable.
    pub fn new() -> Self {
        Self {
            mem_bot: Self::DEFAULT_MEM_BOT,
            main_memory: Self::DEFAULT_MAIN_MEMORY,
            extra_mem_top: 0,
            extra_mem_bot: 0,
            pool_size: Self::DEFAULT_POOL_SIZE,
            pool_free: Self::DEFAULT_POOL_FREE,
            max_strings: Self::DEFAULT_MAX_STRINGS,
            strings_free: Self::DEFAULT_STRINGS_FREE,
            font_mem_size: Self::DEFAULT_FONT_MEM_SIZE,
            font_max: Self::DEFAULT_FONT_MAX,
            trie_size: Self::DEFAULT_TRIE_SIZE,
            hyph_size: Self::DEFAULT_HYPH_SIZE,
            hash_extra: 0,
            max_show_depth: Self::DEFAULT_MAX_SHOW_DEPTH,
        }
    }

    /// Set `mem_bot`.
    pub fn with_mem_bot(mut self, mem_bot: i32) -> Self {
        self.mem_bot = mem_bot;
        self
    }

    /// Set `extra_mem_bot`.
    pub fn with_extra_mem_bot(mut self, words: i32) -> Self {
        self.extra_mem_bot = words;
        self
    }

    /// Set `extra_mem_top`.
    pub fn with_extra_mem_top(mut self, words: i32) -> Self {
        self.extra_mem_top = words;
        self
    }

    /// Set `font_max`.
    pub fn with_font_max(mut self, font_max: i32) -> Self {
        self.font_max = font_max;
        self
    }

    /// Set `trie_size`.
    pub fn with_trie_size(mut self, trie_size: i32) -> Self {
        self.trie_size = trie_size;
        self
    }

    /// Set `hyph_size`.
    pub fn with_hyph_size(mut self, hyph_size: i32) -> Self {
        self.hyph_size = hyph_size;
        self
    }

    /// Set `hash_extra`.
    pub fn with_hash_extra(mut self, hash_extra: i32) -> Self {
        self.hash_extra = hash_extra;
        self
    }

    /// Set the printer nesting limit.
    pub fn with_max_show_depth(mut self, depth: u32) -> Self {
        self.max_show_depth = depth;
        self
    }

    /// Clamp every variable into its accepted window.
    ///
    /// `extra_mem_top` and `extra_mem_bot` have no lower bound beyond zero
    /// and share the `main_memory` ceiling.
    pub fn saturated(&self) -> Self {
        Self {
            mem_bot: self.mem_bot.clamp(INF_MEM_BOT, SUP_MEM_BOT),
            main_memory: self.main_memory.clamp(INF_MAIN_MEMORY, SUP_MAIN_MEMORY),
            extra_mem_top: self.extra_mem_top.clamp(0, SUP_MAIN_MEMORY),
            extra_mem_bot: self.extra_mem_bot.clamp(0, SUP_MAIN_MEMORY),
            pool_size: self.pool_size.clamp(INF_POOL_SIZE, SUP_POOL_SIZE),
            pool_free: self.pool_free.clamp(INF_POOL_FREE, SUP_POOL_FREE),
            max_strings: self.max_strings.clamp(INF_MAX_STRINGS, SUP_MAX_STRINGS),
            strings_free: self.strings_free.clamp(INF_STRINGS_FREE, SUP_STRINGS_FREE),
            font_mem_size: self
                .font_mem_size
                .clamp(INF_FONT_MEM_SIZE, SUP_FONT_MEM_SIZE),
            font_max: self.font_max.clamp(INF_FONT_MAX, SUP_FONT_MAX),
            trie_size: self.trie_size.clamp(INF_TRIE_SIZE, SUP_TRIE_SIZE),
            hyph_size: self.hyph_size.clamp(INF_HYPH_SIZE, SUP_HYPH_SIZE),
            hash_extra: self.hash_extra.clamp(INF_HASH_EXTRA, SUP_HASH_EXTRA),
            max_show_depth: self.max_show_depth.max(1),
        }
    }

    /// Highest word of the main memory proper.
    pub fn mem_top(&self) -> i32 {
        self.mem_bot + self.main_memory - 1
    }
}

impl Default for TexConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_already_saturated() {
        let config = TexConfig::new();
        assert_eq!(config.saturated(), config);
    }

    #[test]
    fn mem_top_follows_main_memory() {
        let config = TexConfig::new().with_mem_bot(1);
        assert_eq!(config.mem_top(), 250_000);
    }

    #[test]
    fn out_of_window_values_are_clamped() {
        let config = TexConfig {
            mem_bot: 7,
            main_memory: 10,
            extra_mem_bot: -5,
            hyph_size: 1_000_000,
            font_max: 1,
            ..TexConfig::new()
        }
        .saturated();
        assert_eq!(config.mem_bot, SUP_MEM_BOT);
        assert_eq!(config.main_memory, INF_MAIN_MEMORY);
        assert_eq!(config.extra_mem_bot, 0);
        assert_eq!(config.hyph_size, SUP_HYPH_SIZE);
        assert_eq!(config.font_max, INF_FONT_MAX);
    }

    #[test]
    fn show_depth_never_drops_to_zero() {
        let config = TexConfig::new().with_max_show_depth(0).saturated();
        assert_eq!(config.max_show_depth, 1);
    }
}
