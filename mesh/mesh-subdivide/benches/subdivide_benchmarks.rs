//! Benchmarks for mesh-subdivide operations.
//!
//! Run with: cargo bench -p mesh-subdivide
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-subdivide -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-subdivide -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_subdivide::{SubdivideParams, subdivide_mesh};
use mesh_types::{HeightFieldParams, PolyMesh, Surface, estimate_vertex_normals, unit_cube};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Sample a test surface at the given spacing over `[-10, 10)`.
fn surface(surface: Surface, resolution: f64) -> PolyMesh {
    surface.mesh(&HeightFieldParams::new().with_resolution(resolution))
}

// =============================================================================
// Subdivision Benchmarks
// =============================================================================

fn bench_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("Loop");

    let test_cases = [
        ("paraboloid_722tri", surface(Surface::Paraboloid, 1.0)),
        ("paraboloid_3042tri", surface(Surface::Paraboloid, 0.5)),
        ("sphere_722tri", surface(Surface::Sphere, 1.0)),
    ];

    for (name, mesh) in &test_cases {
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        for iterations in [1, 2] {
            group.bench_with_input(
                BenchmarkId::new(format!("iter{iterations}"), name),
                mesh,
                |b, mesh| {
                    let params = SubdivideParams::loop_subdivision().with_iterations(iterations);
                    b.iter(|| subdivide_mesh(black_box(mesh), black_box(&params)));
                },
            );
        }
    }

    group.finish();
}

fn bench_catmull_clark(c: &mut Criterion) {
    let mut group = c.benchmark_group("CatmullClark");

    let test_cases = [
        ("cube_6quad", unit_cube()),
        ("cone_722tri", surface(Surface::Cone, 1.0)),
        ("saddle_3042tri", surface(Surface::HyperbolicParaboloid, 0.5)),
    ];

    for (name, mesh) in &test_cases {
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        for iterations in [1, 3] {
            group.bench_with_input(
                BenchmarkId::new(format!("iter{iterations}"), name),
                mesh,
                |b, mesh| {
                    let params = SubdivideParams::catmull_clark().with_iterations(iterations);
                    b.iter(|| subdivide_mesh(black_box(mesh), black_box(&params)));
                },
            );
        }
    }

    group.finish();
}

fn bench_normals(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normals");

    for resolution in [1.0, 0.5, 0.25] {
        let mesh = surface(Surface::Ellipsoid, resolution);
        group.throughput(Throughput::Elements(mesh.vertices.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("estimate", mesh.vertices.len()),
            &mesh,
            |b, mesh| {
                b.iter(|| {
                    estimate_vertex_normals(black_box(&mesh.vertices), black_box(&mesh.faces))
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_loop, bench_catmull_clark, bench_normals);
criterion_main!(benches);
