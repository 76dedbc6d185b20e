//! Benchmarks for conversion operations.

use criterion::{criterion_group, criterion_main, Criterion};
use solidmesh::convert::{obj_to_solid, solid_to_obj, ConvertOptions};
use solidmesh::io::{mtl, obj, solid};
use solidmesh::material::dedup;
use solidmesh::prelude::*;

fn create_grid_mesh(n: usize) -> SolidMesh {
    let mut mesh = SolidMesh::with_capacity("grid.solid", (n + 1) * (n + 1), n * n * 2);

    // Create grid vertices
    for j in 0..=n {
        for i in 0..=n {
            mesh.add_vertex(i as f32, 0.0, j as f32);
        }
    }

    // Create triangles, one color per row
    for j in 0..n {
        let color = Rgb::new(j as f32 / n as f32, 0.5, 1.0 - j as f32 / n as f32);
        for i in 0..n {
            let v00 = (j * (n + 1) + i) as i16;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1) as i16;
            let v11 = v01 + 1;

            mesh.add_triangle([v00, v10, v11], color);
            mesh.add_triangle([v00, v11, v01], color);
        }
    }

    mesh
}

fn bench_dedup(c: &mut Criterion) {
    let mesh = create_grid_mesh(50);

    c.bench_function("dedup_grid_50x50", |b| b.iter(|| dedup(&mesh.triangles)));
}

fn bench_codecs(c: &mut Criterion) {
    let mesh = create_grid_mesh(50);
    let options = ConvertOptions::default().with_mtl_name("grid.mtl");
    let bytes = solid::encode(&mesh).unwrap();
    let export = solid_to_obj(&mesh, &options).unwrap();

    c.bench_function("solid_decode_grid_50x50", |b| {
        b.iter(|| solid::decode(&bytes, "grid.solid").unwrap())
    });

    c.bench_function("obj_parse_grid_50x50", |b| {
        b.iter(|| obj::parse(export.obj.as_bytes()).unwrap())
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mesh = create_grid_mesh(30);
    let options = ConvertOptions::default()
        .with_mtl_name("grid.mtl")
        .with_vertex_limit(usize::MAX)
        .with_face_limit(usize::MAX);

    c.bench_function("solid_obj_solid_grid_30x30", |b| {
        b.iter(|| {
            let export = solid_to_obj(&mesh, &options).unwrap();
            let mut parsed = obj::parse(export.obj.as_bytes()).unwrap();
            parsed.materials = mtl::parse(export.mtl.as_bytes()).unwrap();
            obj_to_solid(&parsed, &options)
        });
    });
}

criterion_group!(benches, bench_dedup, bench_codecs, bench_pipeline);
criterion_main!(benches);
