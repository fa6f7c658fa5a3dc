//! Criterion benchmarks for whole pipeline steps on the CPU device.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fluidic_bench::{cpu_fluid, reference_profile, seed_dye, stress_profile};
use fluidic_engine::FluidConfig;

fn bench_step_4k(c: &mut Criterion) {
    let config = reference_profile();
    let dt = config.dt;
    let mut fluid = cpu_fluid(config).unwrap();
    seed_dye(&mut fluid, 8, 42);

    c.bench_function("step_4k", |b| {
        b.iter(|| black_box(fluid.advance(dt)));
    });
}

fn bench_step_65k(c: &mut Criterion) {
    let config = stress_profile();
    let dt = config.dt;
    let mut fluid = cpu_fluid(config).unwrap();
    seed_dye(&mut fluid, 8, 42);

    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("step_65k", |b| {
        b.iter(|| black_box(fluid.advance(dt)));
    });
    group.finish();
}

fn bench_step_4k_with_diffusion(c: &mut Criterion) {
    let config = FluidConfig {
        diffuse_velocity: true,
        ..reference_profile()
    };
    let dt = config.dt;
    let mut fluid = cpu_fluid(config).unwrap();
    seed_dye(&mut fluid, 8, 42);

    c.bench_function("step_4k_diffusion", |b| {
        b.iter(|| black_box(fluid.advance(dt)));
    });
}

fn bench_draw_4k(c: &mut Criterion) {
    let mut fluid = cpu_fluid(reference_profile()).unwrap();
    seed_dye(&mut fluid, 8, 42);

    c.bench_function("draw_4k", |b| {
        b.iter(|| black_box(fluid.draw()));
    });
}

criterion_group!(
    benches,
    bench_step_4k,
    bench_step_65k,
    bench_step_4k_with_diffusion,
    bench_draw_4k
);
criterion_main!(benches);
