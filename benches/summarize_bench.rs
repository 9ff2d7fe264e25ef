use criterion::{black_box, criterion_group, criterion_main, Criterion};
use precis::summarizer::{Summarizer, SummaryMode};

/// Synthetic document with a realistic sentence length distribution.
fn sample_document(sentences: usize) -> String {
    (0..sentences)
        .map(|i| {
            format!(
                "Topic{} keeps appearing in reports about topic{} and related work item {}.",
                i % 7,
                (i + 3) % 7,
                i
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_summarize(c: &mut Criterion) {
    let summarizer = Summarizer::new().expect("summarizer construction");
    let small = sample_document(20);
    let large = sample_document(500);

    c.bench_function("summarize_brief_20_sentences", |b| {
        b.iter(|| summarizer.summarize(black_box(&small), SummaryMode::Brief))
    });

    c.bench_function("summarize_brief_500_sentences", |b| {
        b.iter(|| summarizer.summarize(black_box(&large), SummaryMode::Brief))
    });

    c.bench_function("summarize_bullet_500_sentences", |b| {
        b.iter(|| summarizer.summarize(black_box(&large), SummaryMode::Bullet))
    });

    c.bench_function("summarizer_construction", |b| {
        b.iter(|| Summarizer::new().expect("summarizer construction"))
    });
}

criterion_group!(benches, bench_summarize);
criterion_main!(benches);
