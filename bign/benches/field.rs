//! bign-curve256v1 field and group arithmetic benchmarks

use bign::{ParamSet, oid};
use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use hex_literal::hex;
use std::hint::black_box;

const FE_A: [u8; 32] = hex!("1ccbe91c075fc7f4f033bfa248db8fccd3565de94bbfb12f3c59ff46c271bf83");
const FE_B: [u8; 32] = hex!("ce4014c68811f9a21a1fdb2c0e6113e06db7ca93b7404e78dc7ccd5ca89a4ca9");

fn bench_field_ops<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, params: &ParamSet) {
    let f = params.curve().field();
    let x = black_box(f.reduce_le_bytes(&FE_A).unwrap());
    let y = black_box(f.reduce_le_bytes(&FE_B).unwrap());
    group.bench_function("add", |b| b.iter(|| f.add(&x, &y)));
    group.bench_function("sub", |b| b.iter(|| f.sub(&x, &y)));
    group.bench_function("mul", |b| b.iter(|| f.mul(&x, &y)));
    group.bench_function("square", |b| b.iter(|| f.square(&x)));
    group.bench_function("invert", |b| b.iter(|| f.invert(&x)));
}

fn bench_point_ops<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, params: &ParamSet) {
    let curve = params.curve();
    let g = curve.to_projective(&curve.generator());
    let k = curve.scalar_field().reduce_le_bytes(&FE_B).unwrap();
    group.bench_function("double", |b| b.iter(|| curve.double(&g)));
    group.bench_function("add", |b| b.iter(|| curve.add(&g, &g)));
    group.bench_function("point-scalar mul", |b| b.iter(|| curve.mul(&g, &k)));
    group.bench_function("to_affine", |b| b.iter(|| curve.to_affine(&g)));
}

fn bench_field(c: &mut Criterion) {
    let params = ParamSet::load(oid::BIGN_CURVE256V1).unwrap();
    let mut group = c.benchmark_group("FieldElement");
    bench_field_ops(&mut group, &params);
    group.finish();
}

fn bench_point(c: &mut Criterion) {
    let params = ParamSet::load(oid::BIGN_CURVE256V1).unwrap();
    let mut group = c.benchmark_group("point operations");
    bench_point_ops(&mut group, &params);
    group.finish();
}

criterion_group!(benches, bench_field, bench_point);
criterion_main!(benches);
