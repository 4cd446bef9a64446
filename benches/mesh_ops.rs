//! Benchmarks for mesh operations.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera::algo::{curvature, normals, smooth};
use tessera::mesh::primitives::{icosphere, jagged_grid};
use tessera::prelude::*;

fn bench_topology(c: &mut Criterion) {
    let mesh: Mesh = jagged_grid(100, 1.0, 0.01).unwrap();

    c.bench_function("topology_build_grid_100x100", |b| {
        b.iter(|| Topology::build(&mesh));
    });

    let topology = Topology::build(&mesh);
    c.bench_function("border_mask_grid_100x100", |b| {
        b.iter(|| topology.border_mask());
    });
}

fn bench_normals(c: &mut Criterion) {
    let mesh: Mesh = icosphere(5).unwrap();

    let mut group = c.benchmark_group("normals_icosphere_5");
    group.bench_function("parallel", |b| b.iter(|| normals::compute_normals(&mesh)));
    group.bench_function("sequential", |b| {
        b.iter(|| normals::compute_normals_sequential(&mesh))
    });
    group.finish();
}

fn bench_curvature(c: &mut Criterion) {
    let mut group = c.benchmark_group("curvature");
    for subdivisions in [3, 5] {
        let mesh: Mesh = icosphere(subdivisions).unwrap();
        let topology = Topology::build(&mesh);

        group.bench_with_input(
            BenchmarkId::new("parallel", subdivisions),
            &mesh,
            |b, mesh| b.iter(|| curvature::compute_curvature(mesh, &topology).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("sequential", subdivisions),
            &mesh,
            |b, mesh| {
                b.iter(|| curvature::compute_curvature_sequential(mesh, &topology).unwrap())
            },
        );
    }
    group.finish();
}

fn bench_smoothing(c: &mut Criterion) {
    let mesh: Mesh = jagged_grid(100, 1.0, 0.01).unwrap();
    let topology = Topology::build(&mesh);
    let options = smooth::SmoothOptions::default().with_iterations(5);

    let mut group = c.benchmark_group("smooth_grid_100x100");
    group.bench_function("uniform_laplacian", |b| {
        b.iter(|| {
            let mut m = mesh.clone();
            smooth::uniform_laplacian_smooth(&mut m, &topology, &options).unwrap()
        })
    });
    group.bench_function("curvature_flow", |b| {
        b.iter(|| {
            let mut m = mesh.clone();
            smooth::curvature_flow_smooth(&mut m, &topology, &options).unwrap()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_topology,
    bench_normals,
    bench_curvature,
    bench_smoothing
);
criterion_main!(benches);
