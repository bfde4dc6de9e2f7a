//! Benchmarks for metadata loading
//!
//! This benchmark measures:
//! - Bounded read + parse of the bundled document
//! - The boot version query on an already parsed document

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use initializr_metadata::metadata::source::BUNDLED_METADATA;
use initializr_metadata::{BootMetadataReader, MetadataSource};

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("metadata_load");
    group.throughput(Throughput::Bytes(BUNDLED_METADATA.len() as u64));
    group.bench_function("bundled", |b| {
        b.iter(|| BootMetadataReader::new(black_box(&MetadataSource::Bundled)))
    });
    group.finish();
}

fn bench_boot_versions(c: &mut Criterion) {
    let reader = match BootMetadataReader::new(&MetadataSource::Bundled) {
        Ok(reader) => reader,
        Err(e) => panic!("bundled metadata failed to load: {e}"),
    };
    c.bench_function("boot_versions", |b| b.iter(|| black_box(&reader).boot_versions()));
}

criterion_group!(benches, bench_load, bench_boot_versions);
criterion_main!(benches);
