use criterion::{criterion_group, criterion_main, Criterion};

use threegp::renderer::{matrix_to_array, projection_matrix, view_matrix};
use threegp::Camera;

pub fn combined_matrix(c: &mut Criterion) {
    let camera = Camera::default();

    c.bench_function("combined", |b| {
        b.iter(|| matrix_to_array(&(projection_matrix() * view_matrix(&camera))))
    });
}

criterion_group!(benches, combined_matrix);
criterion_main!(benches);
