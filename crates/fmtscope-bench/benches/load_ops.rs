//! Criterion benchmarks for reading a whole format.

use criterion::{criterion_group, criterion_main, Criterion};
use fmtscope_bench::reference_format;
use fmtscope_core::{NullHost, TexConfig};
use fmtscope_dump::{read_format, EngineState};

fn bench_read_format(c: &mut Criterion) {
    let bytes = reference_format();
    let config = TexConfig::new();
    c.bench_function("read_format_reference", |b| {
        b.iter(|| {
            let mut host = NullHost;
            let state = read_format(&bytes[..], bytes.len() as u64, &config, &mut host).unwrap();
            std::hint::black_box(state.memory.mem_end)
        });
    });
}

fn bench_new_state(c: &mut Criterion) {
    let config = TexConfig::new();
    c.bench_function("engine_state_new", |b| {
        b.iter(|| std::hint::black_box(EngineState::new(&config)));
    });
}

criterion_group!(benches, bench_read_format, bench_new_state);
criterion_main!(benches);
