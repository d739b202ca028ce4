//! AES-GCM benchmarks.
use criterion::{BenchmarkId, Throughput, criterion_group, criterion_main};
use gcm::{Aes128Gcm, Aes256Gcm, Direction, TagLength};

mod utils;
use utils::{Benchmarker, config};

const IV: [u8; 12] = [0x24; 12];

fn bench(c: &mut Benchmarker) {
    let mut group = c.benchmark_group("aes-gcm");

    let aes128 = Aes128Gcm::new(&Default::default());
    let aes256 = Aes256Gcm::new(&Default::default());

    for size in &[16, 1024, 16384] {
        let mut buf = vec![0u8; *size];

        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_function(BenchmarkId::new("encrypt-128", size), |b| {
            b.iter(|| aes128.encrypt_in_place_detached(&IV, b"", &mut buf, TagLength::MAX));
        });

        group.bench_function(BenchmarkId::new("encrypt-256", size), |b| {
            b.iter(|| aes256.encrypt_in_place_detached(&IV, b"", &mut buf, TagLength::MAX));
        });

        let tag = aes128
            .encrypt_in_place_detached(&IV, b"", &mut buf, TagLength::MAX)
            .unwrap();
        group.bench_function(BenchmarkId::new("decrypt-128", size), |b| {
            b.iter(|| {
                let mut ciphertext = buf.clone();
                aes128.decrypt_in_place_detached(&IV, b"", &mut ciphertext, &tag)
            });
        });

        group.bench_function(BenchmarkId::new("stream-encrypt-128", size), |b| {
            b.iter(|| {
                let mut stream = aes128.start(Direction::Encrypt, &IV, b"").unwrap();
                for chunk in buf.chunks_mut(100) {
                    stream.update(chunk).unwrap();
                }
                stream.finish_encrypt(TagLength::MAX)
            });
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = config();
    targets = bench
);

criterion_main!(benches);
