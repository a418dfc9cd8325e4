//! Scan throughput over a synthetic vocabulary.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use termtrie::{
    Boundary, CharPolicy, Continuation, MatchMode, MatcherConfig, ScanOptions, StringMatcher, TokenMatcher,
    TokenPolicy, tokenize,
};

const SYLLABLES: [&str; 12] = ["ka", "lo", "mi", "ne", "ra", "su", "to", "vi", "ber", "lin", "york", "new"];

fn vocabulary(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| {
            let a = SYLLABLES[i % SYLLABLES.len()];
            let b = SYLLABLES[(i / SYLLABLES.len()) % SYLLABLES.len()];
            let c = SYLLABLES[(i / 144) % SYLLABLES.len()];
            format!("{a}{b} {c}")
        })
        .collect()
}

fn corpus() -> String {
    let vocab = vocabulary(300);
    let mut text = String::new();
    for (i, entry) in vocab.iter().enumerate() {
        text.push_str(entry);
        text.push_str(if i % 3 == 0 { ", and then " } else { " " });
    }
    text.repeat(10)
}

fn bench_string_modes(c: &mut Criterion) {
    let text = corpus();
    let mut group = c.benchmark_group("string_scan");
    for (name, mode, continuation) in [
        ("longest_skip", MatchMode::Longest, Continuation::Skip),
        ("all_noskip", MatchMode::All, Continuation::NoSkip),
    ] {
        let mut matcher = StringMatcher::new(CharPolicy::case_insensitive(), MatcherConfig::default());
        for (i, entry) in vocabulary(1_000).into_iter().enumerate() {
            matcher.insert(&entry, i).unwrap();
        }
        let opts = ScanOptions::new(mode, continuation);
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| matcher.find_with(black_box(text), &opts).len())
        });
    }
    group.finish();
}

fn bench_word_boundaries(c: &mut Criterion) {
    let text = corpus();
    let mut matcher =
        StringMatcher::new(CharPolicy::case_insensitive(), MatcherConfig::default().with_boundary(Boundary::NonWord));
    for (i, entry) in vocabulary(1_000).into_iter().enumerate() {
        matcher.insert(&entry, i).unwrap();
    }
    c.bench_function("string_scan_word_boundaries", |b| b.iter(|| matcher.find(black_box(&text)).len()));
}

fn bench_tokens(c: &mut Criterion) {
    let text = corpus();
    let tokens = tokenize(&text);
    let mut matcher = TokenMatcher::new(TokenPolicy::case_insensitive(), MatcherConfig::default()).unwrap();
    for (i, entry) in vocabulary(1_000).iter().enumerate() {
        let entry_tokens: Vec<&str> = entry.split(' ').collect();
        matcher.insert(&entry_tokens, i).unwrap();
    }
    c.bench_function("token_scan", |b| b.iter(|| matcher.find(black_box(&tokens)).len()));
}

criterion_group!(benches, bench_string_modes, bench_word_boundaries, bench_tokens);
criterion_main!(benches);
