//! Benchmarks for the chunk render pipeline.
//!
//! Run with: cargo bench --bench render_pipeline

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fractal_engine::core::actions::colourise::{colourise_buffer, colourise_chunk};
use fractal_engine::core::actions::compute_chunk::compute_chunk;
use fractal_engine::core::colour_mapping::schemes;
use fractal_engine::{
    ChunkOptions, EngineConfig, FractalEngine, FractalKind, FractalParameters, FrameSurface, IterationBuffer,
    RenderChunk, partition_chunks,
};

const SIZES: &[(u32, u32)] = &[(320, 240), (800, 600), (1920, 1080)];

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_chunks");

    for &(width, height) in SIZES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, height)),
            &(width, height),
            |b, &(width, height)| b.iter(|| partition_chunks(black_box(width), black_box(height), ChunkOptions::default())),
        );
    }

    group.finish();
}

fn bench_compute_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_chunk");
    let params = FractalParameters::default();
    let kernel = FractalKind::Mandelbrot.kernel();

    for size in [32u32, 64, 128] {
        // the centre chunk of an 800x600 view, mostly inside the set
        let chunk = RenderChunk::new(400 - size / 2, 300 - size / 2, size, size).unwrap();
        group.throughput(Throughput::Elements(u64::from(size * size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &chunk, |b, &chunk| {
            b.iter(|| compute_chunk(black_box(chunk), 800, 600, &params, kernel))
        });
    }

    group.finish();
}

fn bench_colourise(c: &mut Criterion) {
    let mut group = c.benchmark_group("colourise");
    let params = FractalParameters::default();
    let chunk = RenderChunk::new(0, 0, 800, 600).unwrap();
    let values = compute_chunk(chunk, 800, 600, &params, FractalKind::Mandelbrot.kernel());

    let mut iterations = IterationBuffer::new(800, 600, &params);
    iterations.store_chunk(chunk, &values).unwrap();

    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("chunk_sequential", |b| {
        b.iter(|| colourise_chunk(black_box(&values), 250, &schemes::fire_palette))
    });
    group.bench_function("buffer_parallel", |b| {
        b.iter(|| colourise_buffer(black_box(&iterations), &schemes::fire_palette))
    });

    group.finish();
}

fn bench_engine_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_render");
    group.sample_size(10);

    let engine = FractalEngine::new(EngineConfig::default()).unwrap();
    engine.wait_for_workers();

    for &(width, height) in &SIZES[..2] {
        let surface = Arc::new(FrameSurface::new(width, height));
        group.throughput(Throughput::Elements(u64::from(width * height)));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, height)),
            &surface,
            |b, surface| b.iter(|| engine.render(surface.clone()).wait()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_partition,
    bench_compute_chunk,
    bench_colourise,
    bench_engine_render
);
criterion_main!(benches);
