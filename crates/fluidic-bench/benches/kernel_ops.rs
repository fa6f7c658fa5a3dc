//! Criterion micro-benchmarks for kernel loading, schema scanning, and a
//! single Jacobi sweep through the store's write-then-swap path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fluidic_arena::{FieldStore, StoreConfig};
use fluidic_core::{FieldSlot, GridSize};
use fluidic_cpu::{BundledSources, CpuDevice, KernelKind};
use fluidic_kernel::{Bindings, KernelLoader, KernelSource, ParamSchema};

const N: u32 = 128;

fn bench_schema_scan(c: &mut Criterion) {
    let source = KernelSource::assemble(&BundledSources, "jacobi", &["neighbours"]).unwrap();
    c.bench_function("schema_scan_jacobi", |b| {
        b.iter(|| black_box(ParamSchema::parse(black_box(source.text()))));
    });
}

fn bench_load_all(c: &mut Criterion) {
    c.bench_function("load_all_kernels", |b| {
        b.iter(|| {
            let mut device = CpuDevice::new(GridSize::square(1));
            let loader = KernelLoader::new(&BundledSources);
            for kind in KernelKind::ALL {
                black_box(
                    loader
                        .program(&mut device, kind.name(), kind.auxiliaries())
                        .unwrap(),
                );
            }
        });
    });
}

fn bench_jacobi_sweep(c: &mut Criterion) {
    let size = GridSize::square(N);
    let mut device = CpuDevice::new(size);
    let mut store = FieldStore::new(&mut device, &StoreConfig::new(size, size)).unwrap();
    let jacobi = KernelLoader::new(&BundledSources)
        .solve_step(&mut device, "jacobi", &["neighbours"])
        .unwrap();
    let bindings = Bindings::new()
        .field("x", FieldSlot::Pressure)
        .field("b", FieldSlot::Divergence)
        .vec3("d", size.step_vector(0.01))
        .float("alpha", 1.0)
        .float("beta", 4.0);

    c.bench_function("jacobi_sweep_16k", |b| {
        b.iter(|| black_box(jacobi.go(&mut device, &mut store, &bindings, FieldSlot::Pressure)));
    });
}

criterion_group!(benches, bench_schema_scan, bench_load_all, bench_jacobi_sweep);
criterion_main!(benches);
