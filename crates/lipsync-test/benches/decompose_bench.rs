//! Benchmarks for text and IPA decomposition

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lipsync_phoneme::{ipa_to_phonemes, text_to_phonemes};

const SENTENCE: &str = "The quick brown fox jumps over the lazy dog while the church bells ring.";
const TRANSCRIPTION: &str = "/ðə kwɪk braʊn fɒks dʒʌmps ˈoʊvər ðə ˈleɪzi dɔɡ/";

fn bench_text_short(c: &mut Criterion) {
    c.bench_function("text_to_phonemes_short", |b| {
        b.iter(|| text_to_phonemes(black_box("hello")))
    });
}

fn bench_text_sentence(c: &mut Criterion) {
    c.bench_function("text_to_phonemes_sentence", |b| {
        b.iter(|| text_to_phonemes(black_box(SENTENCE)))
    });
}

fn bench_text_paragraph(c: &mut Criterion) {
    let paragraph = SENTENCE.repeat(20);

    c.bench_function("text_to_phonemes_paragraph", |b| {
        b.iter(|| text_to_phonemes(black_box(&paragraph)))
    });
}

fn bench_ipa_sentence(c: &mut Criterion) {
    c.bench_function("ipa_to_phonemes_sentence", |b| {
        b.iter(|| ipa_to_phonemes(black_box(TRANSCRIPTION)))
    });
}

fn bench_ipa_unknown_symbols(c: &mut Criterion) {
    // every symbol misses the table and falls back
    let noise = "ǂǁʘ".repeat(40);

    c.bench_function("ipa_to_phonemes_unknown", |b| {
        b.iter(|| ipa_to_phonemes(black_box(&noise)))
    });
}

criterion_group!(
    benches,
    bench_text_short,
    bench_text_sentence,
    bench_text_paragraph,
    bench_ipa_sentence,
    bench_ipa_unknown_symbols,
);
criterion_main!(benches);
