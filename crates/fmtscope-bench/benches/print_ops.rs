//! Criterion benchmarks for the printer over a loaded reference format.

use criterion::{criterion_group, criterion_main, Criterion};
use fmtscope_bench::{reference_format, CHAIN_START};
use fmtscope_core::{NullHost, TexConfig};
use fmtscope_dump::{read_format, EngineState};
use fmtscope_node::Printer;

fn loaded() -> EngineState {
    let bytes = reference_format();
    let mut host = NullHost;
    read_format(&bytes[..], bytes.len() as u64, &TexConfig::new(), &mut host).unwrap()
}

fn bench_show_chain(c: &mut Criterion) {
    let state = loaded();
    c.bench_function("show_node_list_400_penalties", |b| {
        b.iter(|| {
            let mut host = NullHost;
            Printer::new(&state, &mut host)
                .show_node_list(CHAIN_START, "")
                .unwrap();
        });
    });
}

fn bench_list_counts(c: &mut Criterion) {
    let state = loaded();
    c.bench_function("list_counts", |b| {
        b.iter(|| {
            let mut host = NullHost;
            Printer::new(&state, &mut host).list_counts().unwrap();
        });
    });
}

criterion_group!(benches, bench_show_chain, bench_list_counts);
criterion_main!(benches);
