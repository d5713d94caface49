use criterion::{black_box, criterion_group, criterion_main, Criterion};
use packrat::{EngineConfig, ParseSession};

#[path = "../tests/common/calculator.rs"]
#[allow(dead_code)]
mod calculator;

fn nested_expression(depth: usize) -> String {
    let mut source = String::from("1");
    for i in 0..depth {
        source = format!("({source}+{i})*2");
    }
    source
}

fn bench_calculator(c: &mut Criterion) {
    let grammar = calculator::calculator();
    let plain_grammar = calculator::calculator_without_memo();
    let source = nested_expression(12);

    let mut memoized = ParseSession::default();
    c.bench_function("calculator with memo", |b| {
        b.iter(|| memoized.parse_phrase(&grammar, black_box(source.as_str())))
    });

    let mut plain = ParseSession::new(EngineConfig::plain());
    c.bench_function("calculator without memo", |b| {
        b.iter(|| plain.parse_phrase(&plain_grammar, black_box(source.as_str())))
    });
}

criterion_group!(benches, bench_calculator);
criterion_main!(benches);
