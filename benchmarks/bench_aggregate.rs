use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chunksum::parallel::{chunk_sum, partition};
use chunksum::readers::parse_records;
use chunksum::{process_chunks, Record};

const RECORD_COUNT: usize = 1_000_000;

fn sample_records(count: usize) -> Vec<Record> {
    (0..count as i64).map(|i| Record::new(i, -2 * i)).collect()
}

fn bench_sequential_sum(c: &mut Criterion) {
    let records = sample_records(RECORD_COUNT);
    c.bench_function("chunk_sum_sequential", |b| {
        b.iter(|| black_box(chunk_sum(black_box(&records))));
    });
}

fn bench_process_chunks(c: &mut Criterion) {
    let records = sample_records(RECORD_COUNT);
    let mut group = c.benchmark_group("process_chunks");
    group.throughput(Throughput::Elements(RECORD_COUNT as u64));

    for workers in [1usize, 2, 4, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &w| {
            b.iter(|| black_box(process_chunks(black_box(&records), w)));
        });
    }
    group.finish();
}

fn bench_partition(c: &mut Criterion) {
    c.bench_function("partition_1m_by_7", |b| {
        b.iter(|| black_box(partition(black_box(RECORD_COUNT), black_box(7))));
    });
}

fn bench_parse_records(c: &mut Criterion) {
    let json = serde_json::to_vec(&sample_records(100_000)).unwrap();
    let mut group = c.benchmark_group("parse_records");
    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_function("100k", |b| {
        b.iter(|| black_box(parse_records(black_box(&json)).unwrap()));
    });
    group.finish();
}

criterion_group!(
    aggregate_benches,
    bench_sequential_sum,
    bench_process_chunks,
    bench_partition,
    bench_parse_records
);
criterion_main!(aggregate_benches);
