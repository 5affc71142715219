use criterion::{criterion_group, criterion_main, Criterion};
use recap_core::normalize::tokens;
use recap_core::parser::parse_lines;
use recap_core::{term_counts, Inclusion};

const POST: [&str; 3] = [
    "Amazon EC2 now supports up-to-date Graviton4 instances (v2.1)",
    "Posted On: Nov 28, 2023",
    "Starting today, customers can launch memory-optimized instances in all commercial Regions, with up to 30% better price-performance.",
];

fn bench_tokens(c: &mut Criterion) {
    let text = POST.join(" ").repeat(50);
    c.bench_function("tokens_paragraph", |b| b.iter(|| tokens(&text).count()));
}

fn bench_term_counts(c: &mut Criterion) {
    let lines: Vec<&str> = POST.iter().copied().cycle().take(3 * 500).collect();
    let posts = parse_lines(lines);
    c.bench_function("term_counts_500_posts", |b| b.iter(|| term_counts(&posts, &Inclusion::All)));
}

criterion_group!(benches, bench_tokens, bench_term_counts);
criterion_main!(benches);
