use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ssz_canon::merkle::hash_tree_root;
use ssz_canon::{Blake3NodeHasher, Sha256NodeHasher, TypeDescriptor, UintWidth, Value};

fn uint_list(max_len: usize) -> TypeDescriptor {
    TypeDescriptor::list(TypeDescriptor::uint(UintWidth::U64), max_len).unwrap()
}

fn make_list(elements: usize) -> Value {
    Value::List((0..elements as u64).map(Value::Uint64).collect())
}

fn bench_hash_tree_root(c: &mut Criterion) {
    let sizes = [256usize, 4096, 16_384];
    for &size in &sizes {
        let ty = uint_list(size);
        let value = make_list(size);
        let bytes = (size * 8) as u64;

        let mut group = c.benchmark_group("hash_tree_root_sha256");
        group.throughput(Throughput::Bytes(bytes));
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| hash_tree_root::<Sha256NodeHasher>(&ty, value).expect("well-typed value"));
        });
        group.finish();

        let mut group = c.benchmark_group("hash_tree_root_blake3");
        group.throughput(Throughput::Bytes(bytes));
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| hash_tree_root::<Blake3NodeHasher>(&ty, value).expect("well-typed value"));
        });
        group.finish();
    }
}

criterion_group!(benches, bench_hash_tree_root);
criterion_main!(benches);
