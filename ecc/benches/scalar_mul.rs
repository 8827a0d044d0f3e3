//! Scalar multiplication benchmarks

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use ecc::{
    AffinePoint, Curve, Curve25519, NistP192, NistP224, NistP256, NistP384, NistP521, Scalar,
    rand_core::OsRng, x25519,
};
use hex_literal::hex;

fn bench_curve<'a, C: Curve, M: Measurement>(group: &mut BenchmarkGroup<'a, M>, name: &str) {
    let k = Scalar::<C>::random(&mut OsRng);
    let p = AffinePoint::<C>::mul_by_generator(&Scalar::random(&mut OsRng));

    // Build the fixed-base table outside the measurement.
    C::basepoint_table();

    group.bench_function(format!("{name} mul_g"), |b| {
        b.iter(|| AffinePoint::<C>::mul_by_generator(&k))
    });
    group.bench_function(format!("{name} mul_a"), |b| b.iter(|| p.mul(&k)));
}

fn bench_scalar_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar multiplication");
    bench_curve::<NistP192, _>(&mut group, "P-192");
    bench_curve::<NistP224, _>(&mut group, "P-224");
    bench_curve::<NistP256, _>(&mut group, "P-256");
    bench_curve::<NistP384, _>(&mut group, "P-384");
    bench_curve::<NistP521, _>(&mut group, "P-521");
    bench_curve::<Curve25519, _>(&mut group, "Curve25519");
    group.finish();
}

fn bench_x25519(c: &mut Criterion) {
    let k = hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
    let u = hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");

    let mut group = c.benchmark_group("X25519");
    group.bench_function("ladder", |b| b.iter(|| x25519::x25519(&k, &u)));
    group.bench_function("base", |b| b.iter(|| x25519::x25519_base(&k)));
    group.finish();
}

criterion_group!(benches, bench_scalar_mul, bench_x25519);
criterion_main!(benches);
