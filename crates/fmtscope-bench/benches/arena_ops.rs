//! Criterion micro-benchmarks for checked memory access.

use criterion::{criterion_group, criterion_main, Criterion};
use fmtscope_arena::{MemoryWord, Table};
use fmtscope_bench::{reference_format, CHAIN_START};
use fmtscope_core::layout::NULL;
use fmtscope_core::{NullHost, TexConfig};
use fmtscope_dump::read_format;

fn bench_table_roundtrip(c: &mut Criterion) {
    let mut table: Table<MemoryWord> = Table::alloc("mem", 10_000);
    c.bench_function("table_int_write_read_10k", |b| {
        b.iter(|| {
            for i in 0..10_000i64 {
                table.at_mut(i).int().set(i as i32).unwrap();
            }
            let mut sum = 0i64;
            for i in 0..10_000i64 {
                sum += i64::from(table.at(i).int().get().unwrap());
            }
            std::hint::black_box(sum)
        });
    });
}

fn bench_follow_links(c: &mut Criterion) {
    let bytes = reference_format();
    let mut host = NullHost;
    let state =
        read_format(&bytes[..], bytes.len() as u64, &TexConfig::new(), &mut host).unwrap();
    c.bench_function("follow_400_links", |b| {
        b.iter(|| {
            let mut p = CHAIN_START;
            let mut total = 0;
            while p != NULL {
                total += state.memory.penalty(p).unwrap();
                p = state.memory.link(p).unwrap();
            }
            std::hint::black_box(total)
        });
    });
}

criterion_group!(benches, bench_table_roundtrip, bench_follow_links);
criterion_main!(benches);
