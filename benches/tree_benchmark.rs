#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use incremental_commitment_tree::{
    COMMITMENT_TREE_DEPTH, EmptyRoots, IncrementalMerkleTree, IncrementalWitness,
};

/// Create a leaf hash from an integer (for benchmarking).
fn leaf_from_u32(i: u32) -> [u8; 32] {
    *blake3::hash(&i.to_le_bytes()).as_bytes()
}

fn prepare_tree(count: u32) -> IncrementalMerkleTree {
    let mut tree = IncrementalMerkleTree::new(COMMITMENT_TREE_DEPTH).expect("new tree");
    for i in 0..count {
        tree.append(leaf_from_u32(i)).expect("append");
    }
    tree
}

fn bench(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("tree append");
        let inputs = [1_000u32, 10_000, 100_000];
        for input in inputs.iter() {
            group.bench_with_input(BenchmarkId::new("leaves", input), input, |b, &size| {
                b.iter(|| prepare_tree(size));
            });
        }
    }

    c.bench_function("tree root", |b| {
        let table = EmptyRoots::to_level(COMMITMENT_TREE_DEPTH);
        let tree = prepare_tree(100_000);
        b.iter(|| tree.root(&table).expect("root"));
    });

    c.bench_function("tree path", |b| {
        let table = EmptyRoots::to_level(COMMITMENT_TREE_DEPTH);
        let tree = prepare_tree(100_000);
        b.iter(|| tree.path(&table).expect("path"));
    });

    c.bench_function("witness update", |b| {
        let table = EmptyRoots::to_level(COMMITMENT_TREE_DEPTH);
        let tree = prepare_tree(1_000);
        b.iter(|| {
            let mut witness = IncrementalWitness::from_tree(tree.clone());
            for i in 1_000..2_000u32 {
                witness
                    .append(leaf_from_u32(i), &table)
                    .expect("witness append");
            }
            witness.root(&table).expect("witness root")
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench
);
criterion_main!(benches);
