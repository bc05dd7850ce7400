//! Integration test: load synthetic formats and print from the result.
//!
//! Each test writes a stream with `FmtBuilder`, loads it through the
//! facade and checks what the host sees.

use fmtscope::node::TOKEN_LIMIT;
use fmtscope::prelude::*;
use fmtscope::types::layout::{LETTER, NULL, OTHER_CHAR, PENALTY_NODE};
use fmtscope_test_utils::{node_word, word_hh, word_int, FmtBuilder, RecordingHost};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────

fn read(bytes: &[u8]) -> Result<EngineState, LoadError> {
    let mut host = RecordingHost::new();
    read_format(bytes, bytes.len() as u64, &TexConfig::new(), &mut host)
}

fn state_of(builder: &FmtBuilder) -> EngineState {
    match read(&builder.build()) {
        Ok(state) => state,
        Err(e) => panic!("load failed: {e}"),
    }
}

fn token(cmd: u8, c: u8) -> i32 {
    i32::from(cmd) * 256 + i32::from(c)
}

// ── Loading ─────────────────────────────────────────────────────

#[test]
fn empty_string_between_two_others() {
    let state = state_of(&FmtBuilder::new().with_strings(&[b"abc", b"", b"defg"]));
    let lengths: Vec<i32> = (0..3).map(|s| state.strings.length(s).unwrap()).collect();
    assert_eq!(lengths, vec![3, 0, 4]);
    assert_eq!(state.strings.bytes(2).unwrap(), b"defg");
}

#[test]
fn wrong_magic_is_the_first_failure() {
    let err = read(&FmtBuilder::new().with_magic(0).with_trailer(7).build()).unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Format);
    assert_eq!(err.offset(), 4);
}

#[test]
fn load_format_swallows_the_error() {
    let bytes = FmtBuilder::new().with_broken_ring().build();
    let mut host = RecordingHost::new();
    let state = load_format(
        &bytes[..],
        bytes.len() as u64,
        "bad.fmt",
        &TexConfig::new(),
        &mut host,
    );
    assert!(state.is_none());
    assert_eq!(host.alerts.len(), 1);
    assert!(host.alerts[0].contains("Reason: pdfTeX format file is corrupted."));
    assert!(host.alerts[0].contains("Detail: Main memory is corrupted after area #1"));
}

#[test]
fn corrupted_trailer_names_the_value() {
    let bytes = FmtBuilder::new().with_trailer(69_070).build();
    let err = read(&bytes).unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Format);
    assert!(err.detail().contains("69070"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn any_truncation_is_an_io_failure(keep in 0.0f64..1.0) {
        let bytes = FmtBuilder::new().build();
        let cut = 1 + ((bytes.len() - 5) as f64 * keep) as usize;
        let err = read(&bytes[..cut]).unwrap_err();
        prop_assert_eq!(err.kind(), LoadErrorKind::Io);
    }
}

// ── Printing ────────────────────────────────────────────────────

#[test]
fn two_node_cycle_stops_the_walk() {
    let (a, b) = (24, 26);
    let state = state_of(
        &FmtBuilder::new()
            .with_free_words(4)
            .with_lo_word(a, node_word(b, PENALTY_NODE, 0))
            .with_lo_word(a + 1, word_int(1))
            .with_lo_word(b, node_word(a, PENALTY_NODE, 0))
            .with_lo_word(b + 1, word_int(2)),
    );
    let mut host = RecordingHost::new();
    let result = Printer::new(&state, &mut host).show_node_list(a, "");
    assert_eq!(result, Err(ShowError::Cycle { at: a }));
    assert_eq!(host.alerts.len(), 1);
    assert_eq!(host.log_text().matches(":]").count(), 2);
}

#[test]
fn printing_is_repeatable() {
    let state = state_of(
        &FmtBuilder::new()
            .with_free_words(4)
            .with_lo_word(24, node_word(NULL, PENALTY_NODE, 0))
            .with_lo_word(25, word_int(-10_000)),
    );
    let render = || {
        let mut host = RecordingHost::new();
        Printer::new(&state, &mut host).show_node_list(24, "  ").unwrap();
        host.log_text()
    };
    let first = render();
    assert_eq!(first, "  [:PENALTY_NODE\n    value: -10000\n  :]\n");
    assert_eq!(first, render());
}

#[test]
fn token_lists_print_one_token_per_line() {
    let builder = FmtBuilder::new().with_char_strings();
    let p = builder.hi_mem_min();
    let state = state_of(
        &builder
            .with_hi_word(p, word_hh(p + 1, token(LETTER, b'a')))
            .with_hi_word(p + 1, word_hh(NULL, token(OTHER_CHAR, b'1'))),
    );
    let mut host = RecordingHost::new();
    let mut printer = Printer::new(&state, &mut host);
    printer.show_token_list(p, "", TOKEN_LIMIT).unwrap();
    printer.show_token_list(p, "", 1).unwrap();
    drop(printer);
    assert_eq!(
        host.log_text(),
        "[LETTER, \"a\"]\n[OTHER_CHAR, \"1\"]\n[LETTER, \"a\"]\nETC.\n"
    );
}
