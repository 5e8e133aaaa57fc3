//! Criterion benchmarks for both codec directions.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pkdcl::{explode_bytes, implode_bytes, CompressionMode, DictionarySize};
use std::hint::black_box;

/// Deterministic mixed-content payload: readable text with recurring
/// phrases, plus a binary-ish section.
fn test_payload(len: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(len);
    let mut n = 0u32;
    while data.len() < len {
        data.extend_from_slice(format!("record {n:06}: ").as_bytes());
        data.extend_from_slice(match n % 4 {
            0 => b"the quick brown fox jumps over the lazy dog. ".as_slice(),
            1 => b"lorem ipsum dolor sit amet, consectetur. ".as_slice(),
            2 => b"a recurring phrase that compresses well. ".as_slice(),
            _ => [0x13, 0x37, 0x00, 0xFF, 0x80, 0x7F, 0x41, 0x41, 0x41, 0x20].as_slice(),
        });
        n = n.wrapping_mul(1664525).wrapping_add(1013904223);
    }
    data.truncate(len);
    data
}

fn bench_implode(c: &mut Criterion) {
    let mut group = c.benchmark_group("implode");
    for size in [4 * 1024, 64 * 1024] {
        let data = test_payload(size);
        group.throughput(Throughput::Bytes(size as u64));
        for (label, mode) in [("binary", CompressionMode::Binary), ("ascii", CompressionMode::ASCII)] {
            group.bench_with_input(
                BenchmarkId::new(label, size),
                &data,
                |b, data| {
                    b.iter(|| {
                        implode_bytes(black_box(data), mode, DictionarySize::Size4K).unwrap()
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_explode(c: &mut Criterion) {
    let mut group = c.benchmark_group("explode");
    for size in [4 * 1024, 64 * 1024] {
        let data = test_payload(size);
        let packed = implode_bytes(&data, CompressionMode::Binary, DictionarySize::Size4K).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("binary", size), &packed, |b, packed| {
            b.iter(|| explode_bytes(black_box(packed)).unwrap())
        });
    }
    group.finish();
}

fn bench_dictionary_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("dictionary_size");
    let data = test_payload(32 * 1024);
    group.throughput(Throughput::Bytes(data.len() as u64));
    for dict in [
        DictionarySize::Size1K,
        DictionarySize::Size2K,
        DictionarySize::Size4K,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(dict.bytes()),
            &data,
            |b, data| {
                b.iter(|| implode_bytes(black_box(data), CompressionMode::Binary, dict).unwrap())
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_implode, bench_explode, bench_dictionary_sizes);
criterion_main!(benches);
