use std::{
    hint::black_box,
    io::{Cursor, Write},
};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rhx_benchmark::rhs_header;
use rhx_core::{decode_header, format_summary, read_header_file};
use tempfile::NamedTempFile;

fn bench_decode_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_header");

    for (groups, channels) in [(1, 16), (4, 32), (8, 128)] {
        let raw = rhs_header(groups, channels);
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{groups}x{channels}")),
            &raw,
            |b, raw| {
                b.iter(|| decode_header(Cursor::new(black_box(raw.as_slice()))).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_decode_file(c: &mut Criterion) {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(&rhs_header(8, 128)).unwrap();
    tmp.flush().unwrap();

    c.bench_function("read_header_file_8x128", |b| {
        b.iter(|| read_header_file(black_box(tmp.path())).unwrap());
    });
}

fn bench_summary(c: &mut Criterion) {
    let info = decode_header(Cursor::new(rhs_header(8, 128))).unwrap();

    c.bench_function("format_summary_8x128", |b| {
        b.iter(|| format_summary(black_box(&info)));
    });
}

criterion_group!(
    benches,
    bench_decode_memory,
    bench_decode_file,
    bench_summary
);
criterion_main!(benches);
