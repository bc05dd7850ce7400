//! End-to-end loads of synthetic formats through every phase.

use fmtscope_core::layout::{IMAGE_TYPE_PDF, NULL};
use fmtscope_core::TexConfig;
use fmtscope_dump::{load_format, read_format, EngineState, LoadError, LoadErrorKind};
use fmtscope_test_utils::{node_word, FmtBuilder, ImageSpec, RecordingHost};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────

fn load(bytes: &[u8]) -> (Result<EngineState, LoadError>, RecordingHost) {
    let mut host = RecordingHost::new();
    let result = read_format(bytes, bytes.len() as u64, &TexConfig::new(), &mut host);
    (result, host)
}

fn load_ok(builder: &FmtBuilder) -> (EngineState, RecordingHost) {
    let (result, host) = load(&builder.build());
    match result {
        Ok(state) => (state, host),
        Err(e) => panic!("load failed: {e}"),
    }
}

fn load_err(bytes: &[u8]) -> LoadError {
    match load(bytes).0 {
        Ok(_) => panic!("load unexpectedly succeeded"),
        Err(e) => e,
    }
}

// ── Successful loads ────────────────────────────────────────────

#[test]
fn minimal_format_loads() {
    let builder = FmtBuilder::new();
    let (state, host) = load_ok(&builder);
    assert_eq!(state.header.engine_name, "pdftex");
    assert_eq!(state.header.interaction, 3);
    assert_eq!(state.memory.mem_top, 4_999);
    assert_eq!(state.memory.rover, builder.rover());
    assert_eq!(state.memory.lo_mem_max, builder.lo_mem_max());
    assert_eq!(state.memory.hi_mem_min, builder.hi_mem_min());
    assert_eq!(state.memory.mem_end, 4_999);
    assert_eq!(state.strings.init_str_ptr(), 1);
    assert_eq!(state.strings.bytes(0).unwrap(), b"plain");
    assert!(!state.hyph.trie_not_ready);
    assert_eq!(host.progress.last(), Some(&100));
    assert!(host.alerts.is_empty());
}

#[test]
fn free_ring_survives_the_round_trip() {
    let builder = FmtBuilder::new();
    let (state, _) = load_ok(&builder);
    let rover = builder.rover();
    assert_eq!(state.memory.rlink(rover).unwrap(), rover);
    assert_eq!(state.memory.llink(rover).unwrap(), rover);
    assert_eq!(
        state.memory.node_size(rover).unwrap(),
        builder.lo_mem_max() - rover - 4
    );
}

#[test]
fn high_memory_words_land_at_their_address() {
    let builder = FmtBuilder::new();
    let p = builder.hi_mem_min() + 3;
    let builder = builder.with_hi_word(p, node_word(NULL, 12, 0));
    let (state, _) = load_ok(&builder);
    assert_eq!(state.memory.link(p).unwrap(), NULL);
    assert_eq!(state.memory.node_type(p).unwrap(), 12);
    assert!(state.memory.is_char_node(p));
}

#[test]
fn etex_mode_raises_the_register_limit() {
    let (state, _) = load_ok(&FmtBuilder::new().with_etex());
    assert!(state.header.etex_ex());
    assert_eq!(state.header.max_reg_num, 32_767);
    assert_eq!(state.memory.sa_root[0], NULL);
}

#[test]
fn duplicate_strings_are_warned_about() {
    let builder = FmtBuilder::new().with_strings(&[b"ab", b"ab"]);
    let (state, host) = load_ok(&builder);
    assert!(host
        .log_text()
        .contains("- warning: Duplicate string at 1 (2) in 'str_pool' array: \"ab\""));
    assert_eq!(state.strings.lookup(b"ab"), Some(1));
}

#[test]
fn hyphenation_exceptions_and_ops_are_stored() {
    let mut builder = FmtBuilder::new();
    builder.hyph_exceptions = vec![(700, 0, NULL)];
    builder.trie_ops = vec![(5, 2), (0, 1)];
    let (state, _) = load_ok(&builder);
    let h = &state.hyph;
    assert_eq!(h.hyph_count, 1);
    assert_eq!(h.hyph_word.get(700).unwrap(), 0);
    assert_eq!(h.hyph_next, 702);
    assert_eq!(h.trie_op_ptr, 3);
    assert_eq!(h.trie_used.get(5).unwrap(), 2);
    assert_eq!(h.op_start.get(5).unwrap(), 1);
    assert_eq!(h.op_start.get(0).unwrap(), 0);
    assert!(!h.trie_not_ready);
}

#[test]
fn image_names_lose_trailing_nuls() {
    let mut builder = FmtBuilder::new();
    builder.images = vec![ImageSpec {
        image_type: IMAGE_TYPE_PDF,
        name: b"logo.pdf\0\0".to_vec(),
    }];
    let (state, _) = load_ok(&builder);
    let image = &state.pdf.images[0];
    assert_eq!(image.name, b"logo.pdf");
    assert_eq!(image.page_box, Some(1));
    assert_eq!(image.selected_page, Some(1));
}

#[test]
fn objects_get_a_fixed_third_slot() {
    let mut builder = FmtBuilder::new();
    builder.objects = vec![[1, 2, 3, 4]];
    let (state, _) = load_ok(&builder);
    let column = |k: u8| state.pdf.obj_tab.at(1).int(k).get().unwrap();
    assert_eq!((0..5).map(column).collect::<Vec<_>>(), vec![1, 2, -1, 3, 4]);
}

#[test]
fn identical_streams_give_identical_states() {
    let bytes = FmtBuilder::new().with_etex().build();
    let (a, _) = load(&bytes);
    let (b, _) = load(&bytes);
    assert_eq!(a.unwrap(), b.unwrap());
}

// ── Rejections ──────────────────────────────────────────────────

#[test]
fn bad_magic_fails_after_four_bytes() {
    let err = load_err(&FmtBuilder::new().with_magic(0x1234).build());
    assert_eq!(err.kind(), LoadErrorKind::Format);
    assert_eq!(err.offset(), 4);
    assert_eq!(err.detail(), "Bad .fmt file signature.");
}

#[test]
fn decreasing_string_starts_are_rejected() {
    let mut builder = FmtBuilder::new().with_strings(&[b"ab", b"c"]);
    builder.str_start_override = Some(vec![0, 2, 1]);
    let err = load_err(&builder.build());
    assert_eq!(err.kind(), LoadErrorKind::Format);
    assert_eq!(err.detail(), "'str_start[2]' (1) < 'str_start[1]' (2).");
}

#[test]
fn unclosed_free_ring_names_the_chunk() {
    let err = load_err(&FmtBuilder::new().with_broken_ring().build());
    assert_eq!(err.kind(), LoadErrorKind::Format);
    assert!(err
        .detail()
        .starts_with("Main memory is corrupted after area #1, chunk 1"));
}

#[test]
fn truncated_stream_is_io() {
    let bytes = FmtBuilder::new().build();
    let err = load_err(&bytes[..bytes.len() - 2]);
    assert_eq!(err.kind(), LoadErrorKind::Io);
}

#[test]
fn bad_trailer_fails_at_the_end() {
    let bytes = FmtBuilder::new().with_trailer(1).build();
    let err = load_err(&bytes);
    assert_eq!(err.kind(), LoadErrorKind::Format);
    assert_eq!(err.offset(), bytes.len() as u64);
    assert_eq!(err.detail(), "Bad .fmt file trailer value (1).");
}

/// Every field `FmtBuilder::with_field` can corrupt, in stream order.
const SIZE_FIELDS: [&str; 10] = [
    "mem_top",
    "pool_ptr",
    "str_ptr",
    "rover_size",
    "eqtb_block",
    "fmem_ptr",
    "hyph_count",
    "trie_max",
    "image_name_length",
    "pdf_mem_size",
];

fn with_one_image() -> FmtBuilder {
    let mut builder = FmtBuilder::new();
    builder.images = vec![ImageSpec {
        image_type: IMAGE_TYPE_PDF,
        name: b"a.pdf".to_vec(),
    }];
    builder
}

#[test]
fn oversized_counts_are_rejected_per_phase() {
    use LoadErrorKind::{Format, Io, MemoryAccess};
    let cases = [
        ("mem_top", i32::MAX, Format),
        ("pool_ptr", i32::MAX, Format),
        ("pool_ptr", -1, Format),
        ("str_ptr", i32::MAX, Format),
        ("rover_size", i32::MAX, Format),
        ("rover_size", -100_000, MemoryAccess),
        ("eqtb_block", i32::MAX, Format),
        ("eqtb_block", -1, Format),
        ("fmem_ptr", i32::MAX, Format),
        ("hyph_count", i32::MAX, Format),
        ("trie_max", i32::MAX, Format),
        ("image_name_length", i32::MAX, Io),
        ("image_name_length", -1, Format),
        ("pdf_mem_size", i32::MAX, Format),
    ];
    for (field, value, kind) in cases {
        let bytes = with_one_image().with_field(field, value).build();
        let err = load_err(&bytes);
        assert_eq!(err.kind(), kind, "{field} = {value}: {err}");
    }
}

#[test]
fn overflowing_sizes_are_named_in_the_detail() {
    let err = load_err(&FmtBuilder::new().with_field("pool_ptr", i32::MAX).build());
    assert!(err.detail().contains(&format!(
        "should be at least {}",
        i64::from(i32::MAX) + i64::from(TexConfig::DEFAULT_POOL_FREE)
    )));

    let err = load_err(&FmtBuilder::new().with_field("eqtb_block", i32::MAX).build());
    assert!(err.detail().contains(&format!("k (= 1) + x (= {})", 1 + i64::from(i32::MAX))));

    let err = load_err(&FmtBuilder::new().with_field("rover_size", i32::MAX).build());
    assert!(err
        .detail()
        .starts_with("Main memory is corrupted after area #1, chunk 1"));
}

#[test]
fn load_format_alerts_once_on_failure() {
    let bytes = FmtBuilder::new().with_trailer(0).build();
    let mut host = RecordingHost::new();
    let state = load_format(
        &bytes[..],
        bytes.len() as u64,
        "plain.fmt",
        &TexConfig::new(),
        &mut host,
    );
    assert!(state.is_none());
    assert_eq!(host.alerts.len(), 1);
    assert!(host.alerts[0].starts_with("Loading pdfTeX format file \"plain.fmt\" failed"));
    assert!(host.log_text().ends_with("... failed.\n"));
}

#[test]
fn load_format_reports_success() {
    let bytes = FmtBuilder::new().build();
    let mut host = RecordingHost::new();
    let state = load_format(
        &bytes[..],
        bytes.len() as u64,
        "plain.fmt",
        &TexConfig::new(),
        &mut host,
    );
    assert!(state.is_some());
    assert!(host.log_text().starts_with("Loading \"plain.fmt\" ...\n"));
    assert_eq!(
        host.statuses.last().map(String::as_str),
        Some("Format file \"plain.fmt\" was successfully loaded.")
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pool_strings_load_back_byte_for_byte(
        strings in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..12), 1..8)
    ) {
        let refs: Vec<&[u8]> = strings.iter().map(Vec::as_slice).collect();
        let (state, _) = load_ok(&FmtBuilder::new().with_strings(&refs));
        prop_assert_eq!(state.strings.init_str_ptr(), strings.len() as i32);
        for (s, expected) in strings.iter().enumerate() {
            prop_assert_eq!(state.strings.bytes(s as i32).unwrap(), expected.as_slice());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn corrupt_sizes_never_panic(
        field in prop::sample::select(SIZE_FIELDS.to_vec()),
        value in prop_oneof![Just(i32::MAX), Just(i32::MIN), -1_000i32..1_000],
    ) {
        let bytes = with_one_image().with_field(field, value).build();
        let (result, _) = load(&bytes);
        if value == i32::MAX || value == i32::MIN {
            prop_assert!(result.is_err(), "{} = {} loaded", field, value);
        }
    }
}
