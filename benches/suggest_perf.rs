use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pricescope::suggest::SuggestionProvider;

fn synthetic_corpus(size: usize) -> Vec<String> {
    let brands = ["Nike", "Sony", "Apple", "Dell", "Amul", "Levi's"];
    let kinds = ["shoes", "phone", "laptop", "watch", "milk", "jeans"];
    (0..size)
        .map(|i| {
            format!(
                "{} {} {}",
                brands[i % brands.len()],
                kinds[(i / brands.len()) % kinds.len()],
                i
            )
        })
        .collect()
}

fn bench_suggest(c: &mut Criterion) {
    let provider = SuggestionProvider::new(synthetic_corpus(10_000));

    c.bench_function("suggest_common_prefix", |b| {
        b.iter(|| provider.suggest(black_box("nike"), black_box(5)))
    });

    c.bench_function("suggest_no_match", |b| {
        b.iter(|| provider.suggest(black_box("zzzz"), black_box(5)))
    });

    c.bench_function("suggest_below_min_len", |b| {
        b.iter(|| provider.suggest(black_box("n"), black_box(5)))
    });
}

criterion_group!(benches, bench_suggest);
criterion_main!(benches);
