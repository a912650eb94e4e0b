use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use knoll_world::{FractalNoise, TerrainParams, extract_surface, generate_heightfield};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_heightfield");
    for size in [64usize, 256] {
        let params = TerrainParams::default().with_size(size);
        let noise = FractalNoise::new(params.noise);
        group.bench_function(format!("island_{}", size), |b| {
            b.iter(|| black_box(generate_heightfield(&params, &noise)))
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_surface");
    for size in [64usize, 256] {
        let params = TerrainParams::default().with_size(size);
        let hf = generate_heightfield(&params, &FractalNoise::new(params.noise));
        group.bench_function(format!("island_{}", size), |b| {
            b.iter(|| black_box(extract_surface(&hf)))
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(5));
    targets = bench_generate, bench_extract
}
criterion_main!(benches);
