use criterion::{black_box, criterion_group, criterion_main, Criterion};
use markov_sequence::prelude::*;
use markov_sequence::utils::random_graph;

fn bench_single_step(c: &mut Criterion) {
    let grammar = catalogue::menger18().unwrap();
    let graph = random_graph(200, 0.05, 42);
    let d1 = Point2::new(0.01, 0.0);
    let d2 = Point2::new(0.0, 0.01);

    c.bench_function("menger18_refine_random_200", |b| {
        b.iter(|| {
            let refined = Decomposition::refine(&grammar, black_box(graph.clone()), d1, d2).unwrap();
            black_box(refined.vertex_count())
        })
    });
}

fn bench_sequence(c: &mut Criterion) {
    let grammar = catalogue::nobeling().unwrap();
    let config = SequenceConfig::nobeling();

    c.bench_function("nobeling_sequence_3_levels", |b| {
        b.iter(|| {
            let mut sequence = MarkovSequence::new(&grammar);
            sequence.run(black_box(&config)).unwrap();
            black_box(sequence.last().edge_count())
        })
    });
}

criterion_group!(benches, bench_single_step, bench_sequence);
criterion_main!(benches);
