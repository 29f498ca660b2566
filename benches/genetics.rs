use criterion::{criterion_group, criterion_main, Criterion};
use forkmonkey_core::genome::{fingerprint, from_record, to_record};
use forkmonkey_core::GeneticsEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_genetics(c: &mut Criterion) {
    let engine = GeneticsEngine::default();
    let mut rng = StdRng::seed_from_u64(42);
    let parent = engine.generate(&mut rng, 1, None).unwrap();

    c.bench_function("generate_founder", |b| {
        b.iter(|| engine.generate(&mut rng, 1, None).unwrap())
    });

    c.bench_function("breed_rate_0.3", |b| {
        b.iter(|| engine.breed(&mut rng, &parent, 0.3).unwrap())
    });

    c.bench_function("evolve_strength_0.5", |b| {
        b.iter(|| engine.evolve(&mut rng, &parent, 0.5).unwrap())
    });

    c.bench_function("fingerprint_6_traits", |b| {
        b.iter(|| fingerprint::fingerprint(parent.traits()))
    });

    let record = to_record(&parent);
    c.bench_function("record_round_trip", |b| {
        b.iter(|| from_record(&record).unwrap())
    });
}

criterion_group!(benches, bench_genetics);
criterion_main!(benches);
