// benches/partition.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use store_scrape::shards::planner;
use store_scrape::store::Store;

fn synthetic_stores(n: u32) -> Vec<Store> {
    (1..=n)
        .map(|i| Store {
            store_number: i.to_string(),
            name: Some(format!("Store {}", i)),
            city: Some("Ottawa".into()),
            province: Some("ON".into()),
            postal_code: None,
            slug: None,
            url: None,
        })
        .collect()
}

fn bench_partition(c: &mut Criterion) {
    let small = synthetic_stores(200);
    let large = synthetic_stores(10_000);

    c.bench_function("partition_200_by_8", |b| {
        b.iter(|| {
            let shards = planner::partition(black_box(&small), black_box(8)).unwrap();
            black_box(shards.len())
        })
    });

    c.bench_function("partition_10k_by_8", |b| {
        b.iter(|| {
            let shards = planner::partition(black_box(&large), black_box(8)).unwrap();
            black_box(shards.len())
        })
    });
}

criterion_group!(benches, bench_partition);
criterion_main!(benches);
