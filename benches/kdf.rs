//! benches/kdf.rs
//! PBKDF2-HMAC-SHA512 key derivation across iteration counts
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lockstitch_engine::aliases::PasswordString;
use lockstitch_engine::derive_keys;
use std::hint::black_box;
use std::time::Duration;

fn kdf_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("KDF");
    // Faster runs for slow high-iter benches
    group.measurement_time(Duration::from_secs(8));
    group.sample_size(20);

    let pw = PasswordString::new("benchmark-password".to_string());
    let salt = [0x42u8; 16];

    for &iters in &[1_000u32, 10_000, 100_000, 300_000] {
        let id = BenchmarkId::new("pbkdf2_sha512", iters);
        group.bench_with_input(id, &iters, |b, &iters| {
            b.iter(|| {
                let keys = derive_keys(black_box(&pw), black_box(&salt), iters).unwrap();
                black_box(keys);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, kdf_benches);
criterion_main!(benches);
