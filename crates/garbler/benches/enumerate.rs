//! Benchmark for truth-table enumeration over the in-process evaluator.

#![allow(unused_crate_dependencies)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use yao_fixtures::{BobInput, LocalEvaluator, adder, garble_seeded};
use yao_garbler::{GarblerConfig, GarblerSession};

fn bench_enumerate(c: &mut Criterion) {
    for n in [2, 4] {
        let circuit = garble_seeded(adder(n), 0).expect("adder garbles");

        c.bench_function(&format!("enumerate/adder{n}"), |b| {
            b.iter(|| {
                let evaluator = LocalEvaluator::new(BobInput::Enumerate);
                let mut session = GarblerSession::new(
                    evaluator.clone(),
                    evaluator,
                    std::io::sink(),
                    GarblerConfig::truth_table(),
                );
                session.send_circuit(&circuit).expect("send");
                black_box(session.enumerate(black_box(&circuit)).expect("enumerate"))
            });
        });
    }
}

criterion_group!(benches, bench_enumerate);
criterion_main!(benches);
