//! Benchmarks for hole detection and repair.
//!
//! Run with: cargo bench -p mesh-repair
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-repair -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-repair -- --baseline main

#![allow(missing_docs, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hashbrown::HashMap;
use mesh_repair::{MeshAdjacency, RepairParams, detect_holes, repair_with_params, validate_mesh};
use mesh_types::{IndexedMesh, Vertex};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Create an icosphere mesh with specified subdivision level.
fn create_sphere(subdivisions: u32) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();

    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let (a, b) = (1.0, 1.0 / phi);

    let ico_verts = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ];
    for [x, y, z] in ico_verts {
        let len = (x * x + y * y + z * z).sqrt();
        mesh.vertices.push(Vertex::from_coords(x / len, y / len, z / len));
    }

    mesh.faces.extend_from_slice(&[
        [0, 1, 2],
        [3, 2, 1],
        [3, 4, 5],
        [3, 8, 4],
        [0, 6, 7],
        [0, 9, 6],
        [4, 10, 11],
        [6, 11, 10],
        [2, 5, 9],
        [11, 9, 5],
        [1, 7, 8],
        [10, 8, 7],
        [3, 5, 2],
        [3, 1, 8],
        [0, 2, 9],
        [0, 7, 1],
        [6, 9, 11],
        [6, 10, 7],
        [4, 11, 5],
        [4, 8, 10],
    ]);

    for _ in 0..subdivisions {
        mesh = subdivide_sphere(&mesh);
    }
    mesh
}

fn subdivide_sphere(mesh: &IndexedMesh) -> IndexedMesh {
    let mut vertices = mesh.vertices.clone();
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    let mut midpoint = |v1: u32, v2: u32| {
        let key = (v1.min(v2), v1.max(v2));
        *midpoints.entry(key).or_insert_with(|| {
            let m = nalgebra::center(
                &vertices[v1 as usize].position,
                &vertices[v2 as usize].position,
            );
            let m = m.coords.normalize();
            vertices.push(Vertex::from_coords(m.x, m.y, m.z));
            (vertices.len() - 1) as u32
        })
    };

    let mut faces = Vec::with_capacity(mesh.faces.len() * 4);
    for &[v0, v1, v2] in &mesh.faces {
        let m01 = midpoint(v0, v1);
        let m12 = midpoint(v1, v2);
        let m20 = midpoint(v2, v0);
        faces.push([v0, m01, m20]);
        faces.push([v1, m12, m01]);
        faces.push([v2, m20, m12]);
        faces.push([m01, m12, m20]);
    }

    IndexedMesh::from_parts(vertices, faces)
}

/// Remove every face whose centroid is above `z`, leaving one round hole.
fn cut_cap(mesh: &IndexedMesh, z: f64) -> IndexedMesh {
    let faces = mesh
        .faces
        .iter()
        .copied()
        .filter(|&f| mesh.face_triangle(f).centroid().z < z)
        .collect();
    IndexedMesh::from_parts(mesh.vertices.clone(), faces)
}

/// Remove every `stride`-th face, leaving many small holes.
fn perforate(mesh: &IndexedMesh, stride: usize) -> IndexedMesh {
    let mut used = hashbrown::HashSet::new();
    let faces = mesh
        .faces
        .iter()
        .enumerate()
        .filter(|(i, f)| {
            let punch = i % stride == 0 && f.iter().all(|v| !used.contains(v));
            if punch {
                used.extend(f.iter().copied());
            }
            !punch
        })
        .map(|(_, f)| *f)
        .collect();
    IndexedMesh::from_parts(mesh.vertices.clone(), faces)
}

/// Cone whose `n`-gon base is left open: a single hole with `n` edges.
fn open_cone(n: u32) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();
    for i in 0..n {
        let theta = std::f64::consts::TAU * f64::from(i) / f64::from(n);
        mesh.vertices
            .push(Vertex::from_coords(theta.cos(), theta.sin(), 0.0));
    }
    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, -1.0));
    for i in 0..n {
        mesh.faces.push([n, (i + 1) % n, i]);
    }
    mesh
}

// =============================================================================
// Validation and Detection Benchmarks
// =============================================================================

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Validation");

    for subdivisions in 1..=4 {
        let mesh = cut_cap(&create_sphere(subdivisions), 0.8);
        let name = format!("sphere_{}tri", mesh.faces.len());
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        group.bench_with_input(BenchmarkId::new("validate", &name), &mesh, |b, mesh| {
            b.iter(|| validate_mesh(black_box(mesh)));
        });

        group.bench_with_input(BenchmarkId::new("detect_holes", &name), &mesh, |b, mesh| {
            b.iter(|| {
                let adjacency = MeshAdjacency::build(black_box(&mesh.faces));
                detect_holes(&adjacency)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Repair Benchmarks
// =============================================================================

fn bench_single_hole(c: &mut Criterion) {
    let mut group = c.benchmark_group("SingleHole");
    let sphere = create_sphere(4);

    for cap in [0.95, 0.8, 0.5] {
        let mesh = cut_cap(&sphere, cap);
        let boundary = MeshAdjacency::build(&mesh.faces).boundary_edge_count();
        group.throughput(Throughput::Elements(boundary as u64));

        group.bench_with_input(
            BenchmarkId::new("repair", format!("{boundary}_edges")),
            &mesh,
            |b, mesh| {
                let params = RepairParams::default();
                b.iter(|| repair_with_params(black_box(mesh), &params));
            },
        );
    }

    group.finish();
}

fn bench_many_holes(c: &mut Criterion) {
    let mut group = c.benchmark_group("ManyHoles");
    let mesh = perforate(&create_sphere(4), 7);

    for parallel in [false, true] {
        let label = if parallel { "parallel" } else { "serial" };
        group.bench_function(label, |b| {
            let params = RepairParams::default().with_parallel(parallel);
            b.iter(|| repair_with_params(black_box(&mesh), &params));
        });
    }

    group.finish();
}

fn bench_large_hole(c: &mut Criterion) {
    let mut group = c.benchmark_group("LargeHole");
    group.sample_size(10);

    for n in [500, 1000, 2000] {
        let mesh = open_cone(n);
        group.throughput(Throughput::Elements(u64::from(n)));

        group.bench_with_input(BenchmarkId::new("repair", n), &mesh, |b, mesh| {
            let params = RepairParams::default();
            b.iter(|| repair_with_params(black_box(mesh), &params));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(
    benches,
    bench_validation,
    bench_single_hole,
    bench_many_holes,
    bench_large_hole
);

criterion_main!(benches);
