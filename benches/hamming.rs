//! Encode / decode timings for human-scale inputs (a few hundred bits at most).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hamming_sim::{convert, decode, encode, inject_at, BitString, InputFormat};

fn generate_bits(len: usize) -> BitString {
    (0..len).map(|i| (i * 7 + 3) % 5 < 2).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for len in [4usize, 32, 128, 512] {
        let data = generate_bits(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            b.iter(|| encode(black_box(data)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for len in [4usize, 32, 128, 512] {
        let codeword = encode(&generate_bits(len)).codeword;
        let damaged = match inject_at(&codeword, (codeword.len() / 2) as i64) {
            Ok(injection) => injection.codeword,
            Err(_) => codeword,
        };
        group.bench_with_input(BenchmarkId::from_parameter(len), &damaged, |b, received| {
            b.iter(|| decode(black_box(received)))
        });
    }
    group.finish();
}

fn bench_text_pipeline(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog";
    c.bench_function("text_convert_encode_decode", |b| {
        b.iter(|| {
            let conversion = convert(black_box(text), InputFormat::Text);
            conversion.map(|conversion| decode(&encode(&conversion.binary).codeword))
        })
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_text_pipeline);
criterion_main!(benches);
