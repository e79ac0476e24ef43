use strgraph::parser::GFAParser;
use strgraph::{
    construct_complete_overlap_map, construct_partitioned_overlap_map,
    transitive_reduction, GraphParams, StringGraph, VertexId,
};

use criterion::{
    criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion,
};

const READ_LEN: usize = 100;

fn genome(len: usize) -> Vec<u8> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            b"ACGT"[(state >> 33) as usize % 4]
        })
        .collect()
}

/// Reads of a random genome starting every `step` bases, each linked
/// to every later read it overlaps.
fn tiled_gfa(num_reads: usize, step: usize) -> Vec<Vec<u8>> {
    let g = genome(num_reads * step + READ_LEN);
    let mut lines = Vec::new();

    for i in 0..num_reads {
        let start = i * step;
        let mut line = format!("S\tr{}\t", i).into_bytes();
        line.extend_from_slice(&g[start..start + READ_LEN]);
        lines.push(line);
    }
    for i in 0..num_reads {
        for j in (i + 1)..num_reads {
            let shift = (j - i) * step;
            if shift >= READ_LEN {
                break;
            }
            let line = format!("L\tr{}\t+\tr{}\t+\t{}M", i, j, READ_LEN - shift);
            lines.push(line.into_bytes());
        }
    }
    lines
}

fn load(lines: &[Vec<u8>]) -> StringGraph {
    GFAParser::new(GraphParams::new(20, 0.0))
        .parse_lines(lines.iter())
        .unwrap()
}

fn bench_load(c: &mut Criterion) {
    let lines = tiled_gfa(200, 10);
    c.bench_with_input(BenchmarkId::new("load", 200), &lines, |b, l| {
        b.iter(|| load(l));
    });
}

fn bench_neighborhood(c: &mut Criterion) {
    for &step in &[30, 10] {
        let graph = load(&tiled_gfa(200, step));
        let v = VertexId(100);

        c.bench_with_input(
            BenchmarkId::new("complete_map", step),
            &graph,
            |b, g| {
                b.iter(|| construct_complete_overlap_map(g, v, 0.0, 20));
            },
        );

        c.bench_with_input(
            BenchmarkId::new("partition", step),
            &graph,
            |b, g| {
                b.iter(|| construct_partitioned_overlap_map(g, v, 0.0, 20));
            },
        );
    }
}

fn bench_reduction(c: &mut Criterion) {
    let graph = load(&tiled_gfa(100, 10));
    c.bench_function("transitive_reduction", |b| {
        b.iter_batched(
            || graph.clone(),
            |mut g| transitive_reduction(&mut g).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    name = closure_benches;
    config = Criterion::default().sample_size(25);
    targets = bench_load, bench_neighborhood, bench_reduction
);

criterion_main!(closure_benches);
