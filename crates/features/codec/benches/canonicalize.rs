use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use twin_codec::{Canonicalizer, read, write};
use twin_model::{DataType, ModelType, Node, NodeId, Tree};

fn build_tree(steps: usize) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let root = tree.insert(Node::collection("ProductionPlan"));
    for step in 0..steps {
        let collection = tree.insert(Node::collection(format!("Step{step:03}")));
        let title = tree.insert(Node::string_property("StepTitle", "Drilling"));
        let uri = tree.insert(Node::property("Station", DataType::AnyUri, "http://station:4840/"));
        let list = tree.insert(Node::list("Readings", ModelType::Property));
        for reading in 0..8 {
            let item = tree.insert(Node::property("", DataType::Double, reading.to_string()).anonymous());
            tree.add(list, item);
        }
        for child in [title, uri, list] {
            tree.add(collection, child);
        }
        tree.add(root, collection);
    }
    (tree, root)
}

fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");
    let canonicalizer = Canonicalizer::default();

    for steps in [10, 100, 1000] {
        let (tree, root) = build_tree(steps);
        let raw = write(&tree, root).unwrap();
        let size = serde_json::to_vec(&raw).map_or(0, |bytes| bytes.len());
        group.throughput(Throughput::Bytes(u64::try_from(size).unwrap_or(u64::MAX)));

        group.bench_with_input(BenchmarkId::new("write", steps), &(tree, root), |b, (tree, root)| {
            b.iter(|| black_box(write(tree, *root).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("rewrite", steps), &raw, |b, raw| {
            b.iter(|| black_box(canonicalizer.canonicalize(raw.clone()).unwrap()));
        });

        let canonical = canonicalizer.canonicalize(raw).unwrap();
        group.bench_with_input(BenchmarkId::new("read", steps), &canonical, |b, canonical| {
            b.iter(|| black_box(read(canonical).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_canonicalize);
criterion_main!(benches);
