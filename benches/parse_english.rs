use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chartwell::english::english;
use chartwell::{Grammar, Strategy};

fn count_parses(g: &Grammar, input: &[&str], strategy: Strategy) -> u64 {
  let chart = g.parse_with(input, &["S"], strategy, None);
  let forest = chart.forest();
  chart
    .solutions(&["S"])
    .into_iter()
    .map(|root| forest.count_trees(root))
    .sum()
}

fn criterion_benchmark(c: &mut Criterion) {
  let grammar = english();
  let simple_input = "the pigeons suffer".split(' ').collect::<Vec<_>>();
  let ambiguous_input = "the professors punish the boys in the green room by the cages"
    .split(' ')
    .collect::<Vec<_>>();

  c.bench_function("parse simple bottom-up", |b| {
    b.iter(|| count_parses(black_box(&grammar), black_box(&simple_input), Strategy::BottomUp))
  });

  c.bench_function("parse ambiguous bottom-up", |b| {
    b.iter(|| {
      count_parses(
        black_box(&grammar),
        black_box(&ambiguous_input),
        Strategy::BottomUp,
      )
    })
  });

  c.bench_function("parse ambiguous top-down", |b| {
    b.iter(|| {
      count_parses(
        black_box(&grammar),
        black_box(&ambiguous_input),
        Strategy::TopDown,
      )
    })
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
