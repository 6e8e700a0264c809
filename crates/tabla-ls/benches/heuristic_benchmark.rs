// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tabla_ls::solver::HeuristicSolver;
use tabla_model::{frequency::auto_distribute, instance::Instance};
use tabla_search::solver::AssignmentSolver;

fn instance(items: usize, boards: usize, board_size: usize) -> Instance {
    let auto = auto_distribute(items, boards, board_size);
    Instance::new(items, boards, board_size, auto.frequencies)
}

fn bench_heuristic_solve(c: &mut Criterion) {
    let shapes = [
        ("loteria_36x15", instance(36, 15, 16)),
        ("medium_50x20", instance(50, 20, 25)),
        ("large_120x40", instance(120, 40, 25)),
    ];

    let mut group = c.benchmark_group("heuristic_solve");
    for (label, instance) in shapes {
        group.throughput(Throughput::Elements(
            (instance.num_items() * instance.num_boards()) as u64,
        ));
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &instance,
            |bencher, instance| {
                let solver = HeuristicSolver::new();
                bencher.iter(|| black_box(solver.solve(instance).unwrap()));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_heuristic_solve);
criterion_main!(benches);
