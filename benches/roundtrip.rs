// benches/roundtrip.rs
//! Round-trip (encrypt → decrypt) benchmarks, whole and head-only

use lockstitch_engine::aliases::PasswordString;
use lockstitch_engine::{decrypt, encrypt, EncryptParams, HeadSplit};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::io::Cursor;

const KDF_ITERATIONS: u32 = 1_000;
const CHUNK: usize = 64 * 1024;

// --- Size constants ---
const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn format_size(bytes: usize) -> String {
    if bytes >= MB {
        format!("{} MiB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KiB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");
    let password = PasswordString::new("benchmark-password".to_string());

    for &size in &[KB, 64 * KB, MB, 10 * MB] {
        let input = vec![0x41u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        for (label, head) in [("whole", 0u64), ("head_4k", 4096)] {
            let params = EncryptParams::with_iterations(KDF_ITERATIONS)
                .head(HeadSplit::resolve(head, size as u64))
                .chunk_size(CHUNK);

            group.bench_with_input(BenchmarkId::new(label, format_size(size)), &size, |b, _| {
                b.iter(|| {
                    let mut encrypted = Vec::with_capacity(size + 128);
                    encrypt(Cursor::new(black_box(&input)), &mut encrypted, password.clone(), &params)
                        .unwrap();

                    let mut decrypted = Vec::with_capacity(size);
                    decrypt(Cursor::new(&encrypted), &mut decrypted, password.clone(), CHUNK).unwrap();
                    black_box(decrypted);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
