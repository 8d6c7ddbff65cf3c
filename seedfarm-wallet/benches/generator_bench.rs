//! Criterion benchmarks for candidate generation: fresh wallets, phrase rebuild, keccak, compact codes.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use seedfarm_mnemonic::Vocabulary;
use seedfarm_wallet::{keccak256, EthWalletGenerator};

const PHRASE: &str =
    "squeeze hill cube network mobile catalog plate yellow obtain oppose floor interest";

fn bench_generate(c: &mut Criterion) {
    let generator = EthWalletGenerator::new();
    let mut g = c.benchmark_group("generate");
    g.throughput(Throughput::Elements(1));
    g.bench_function("generate_candidate", |b| {
        b.iter(|| black_box(generator.generate_candidate()).unwrap());
    });
    g.finish();
}

fn bench_from_phrase(c: &mut Criterion) {
    let generator = EthWalletGenerator::new();
    let phrase = generator.generate_candidate().unwrap().phrase_string();
    let mut g = c.benchmark_group("from_phrase");
    g.throughput(Throughput::Elements(1));
    g.bench_function("from_phrase", |b| {
        b.iter(|| black_box(generator.from_phrase(&phrase)).unwrap());
    });
    g.finish();
}

fn bench_keccak(c: &mut Criterion) {
    let input = [0x42u8; 64];
    let mut g = c.benchmark_group("keccak");
    g.throughput(Throughput::Bytes(input.len() as u64));
    g.bench_function("keccak256_64", |b| {
        b.iter(|| black_box(keccak256(&input)));
    });
    g.finish();
}

fn bench_compact(c: &mut Criterion) {
    let vocabulary = Vocabulary::english().unwrap();
    let code = vocabulary.encode_phrase(PHRASE);
    let mut g = c.benchmark_group("compact");
    g.throughput(Throughput::Elements(1));
    g.bench_function("encode", |b| {
        b.iter(|| black_box(vocabulary.encode_phrase(PHRASE)));
    });
    g.bench_function("decode", |b| {
        b.iter(|| black_box(vocabulary.decode(&code)).unwrap());
    });
    g.finish();
}

criterion_group!(
    benches,
    bench_generate,
    bench_from_phrase,
    bench_keccak,
    bench_compact
);
criterion_main!(benches);
